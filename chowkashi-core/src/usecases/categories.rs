use super::prelude::*;
use crate::{
    local_state::{KeyValueStore, LocalState},
    util::text::sanitize_input,
};

const MAX_CATEGORY_NAME_LEN: usize = 50;

/// Backend categories followed by the custom ones stored on the device.
pub async fn load_categories<R, S>(repo: &R, local: &LocalState<S>) -> Vec<Category>
where
    R: CategoryRepo,
    S: KeyValueStore,
{
    let mut categories = repo.all_categories().await.unwrap_or_else(|err| {
        log::warn!("Failed to load categories: {err}");
        vec![]
    });
    for name in local.custom_categories() {
        if !categories.iter().any(|c| c.matches_name(&name)) {
            categories.push(Category::custom(name));
        }
    }
    categories
}

/// Stores a new custom category name and returns all custom names.
pub fn add_custom_category<S>(local: &LocalState<S>, name: &str) -> Result<Vec<String>>
where
    S: KeyValueStore,
{
    let name = sanitize_input(name, MAX_CATEGORY_NAME_LEN);
    if name.is_empty() {
        return Err(Error::EmptyCategoryName);
    }
    let mut names = local.custom_categories();
    if names.iter().any(|n| n.eq_ignore_ascii_case(&name)) {
        return Ok(names);
    }
    names.push(name);
    local.save_custom_categories(&names)?;
    Ok(names)
}
