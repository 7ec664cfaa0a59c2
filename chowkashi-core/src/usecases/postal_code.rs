use super::prelude::*;
use crate::util::text::is_valid_postal_code;

/// Accepts exactly 6 digits or an empty input.
///
/// The empty string stands for "no postal code filter".
pub fn parse_postal_code_input(input: &str) -> Result<String> {
    let input = input.trim();
    if input.is_empty() || is_valid_postal_code(input) {
        Ok(input.to_string())
    } else {
        Err(Error::InvalidPostalCode)
    }
}

/// Optional postal code predicate for a combined search.
pub fn postal_code_filter(input: Option<&str>) -> Result<Option<String>> {
    let Some(input) = input else {
        return Ok(None);
    };
    let code = parse_postal_code_input(input)?;
    Ok((!code.is_empty()).then_some(code))
}

/// Queries approved listings by postal code.
///
/// Invalid input is rejected before the backend is contacted,
/// an empty input clears the filter. Backend failures are
/// logged and yield an empty result.
pub async fn search_by_postal_code<R>(repo: &R, input: &str) -> Result<Vec<BusinessListing>>
where
    R: ListingRepo,
{
    let postal_code = parse_postal_code_input(input)?;
    match repo.search_by_postal_code(&postal_code).await {
        Ok(listings) => Ok(listings),
        Err(err) => {
            log::warn!("Failed to search listings by postal code '{postal_code}': {err}");
            Ok(vec![])
        }
    }
}
