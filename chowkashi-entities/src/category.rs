use crate::id::Id;

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Category {
    pub id: Id,
    pub name: String,
    pub subcategories: Vec<String>,
}

impl Category {
    /// Custom categories only live on the device and have no backend id.
    pub fn custom(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            id: format!("custom:{}", name.to_lowercase()).into(),
            name,
            subcategories: vec![],
        }
    }

    pub fn is_custom(&self) -> bool {
        self.id.as_str().starts_with("custom:")
    }

    pub fn matches_name(&self, name: &str) -> bool {
        self.name.trim().eq_ignore_ascii_case(name.trim())
    }
}
