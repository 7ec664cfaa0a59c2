use chowkashi_core::{
    entities::*,
    repositories::{
        CategoryRepo, ListingQuery, ListingRepo, QuotationRepo, Result, ReviewRepo,
    },
};

use super::*;

/// Removes characters with a special meaning in filter expressions.
fn escape_pattern(text: &str) -> String {
    text.chars()
        .filter(|c| !matches!(c, ',' | '(' | ')' | '*' | '%' | '"' | '\\'))
        .collect::<String>()
        .trim()
        .to_string()
}

/// Filters pushed down to the listings table.
pub fn listing_filters(query: &ListingQuery) -> Vec<(&'static str, String)> {
    let mut filters = vec![("status", eq("approved"))];
    if let Some(category) = &query.category {
        filters.push(("category", eq(category)));
    }
    if let Some(postal_code) = &query.postal_code {
        filters.push(("postal_code", eq(postal_code)));
    }
    if query.open_now {
        filters.push(("is_open_now", "is.true".to_string()));
    }
    if let Some(text) = query.text.as_deref().map(escape_pattern) {
        if !text.is_empty() {
            filters.push((
                "or",
                format!(
                    "(name.ilike.*{text}*,category.ilike.*{text}*,subcategory.ilike.*{text}*)"
                ),
            ));
        }
    }
    filters.push(("order", "rating.desc.nullslast".to_string()));
    if let Some(limit) = query.limit {
        filters.push(("limit", limit.to_string()));
    }
    filters
}

impl ListingRepo for BackendClient {
    async fn query_listings(&self, query: &ListingQuery) -> Result<Vec<BusinessListing>> {
        let records: Vec<ListingRecord> =
            self.select(LISTINGS_TABLE, &listing_filters(query)).await?;
        log::debug!("Loaded {} listings", records.len());
        Ok(records.into_iter().map(Into::into).collect())
    }

    async fn search_by_postal_code(&self, postal_code: &str) -> Result<Vec<BusinessListing>> {
        let query = ListingQuery {
            postal_code: Some(postal_code.trim())
                .filter(|p| !p.is_empty())
                .map(ToString::to_string),
            ..Default::default()
        };
        self.query_listings(&query).await
    }

    async fn get_listing(&self, id: &str) -> Result<BusinessListing> {
        let record: ListingRecord = self.select_by_id(LISTINGS_TABLE, id).await?;
        Ok(record.into())
    }
}

impl ReviewRepo for BackendClient {
    async fn reviews_of_listing(&self, listing_id: &str) -> Result<Vec<Review>> {
        let filters = [
            ("business_id", eq(listing_id)),
            ("order", "created_at.desc".to_string()),
        ];
        let records: Vec<ReviewRecord> = self.select(REVIEWS_TABLE, &filters).await?;
        Ok(records.into_iter().map(Into::into).collect())
    }
}

impl CategoryRepo for BackendClient {
    async fn all_categories(&self) -> Result<Vec<Category>> {
        let filters = [("order", "name.asc".to_string())];
        let records: Vec<CategoryRecord> = self.select(CATEGORIES_TABLE, &filters).await?;
        Ok(records.into_iter().map(Into::into).collect())
    }
}

impl QuotationRepo for BackendClient {
    async fn get_service_request(&self, id: &str) -> Result<ServiceRequest> {
        let record: ServiceRequestRecord = self.select_by_id(SERVICE_REQUESTS_TABLE, id).await?;
        Ok(record.into())
    }

    async fn update_service_request_status(&self, id: &str, status: RequestStatus) -> Result<()> {
        let patch = StatusPatch {
            status: status.to_string(),
        };
        self.update_by_id(SERVICE_REQUESTS_TABLE, id, &patch).await
    }

    async fn get_quotation(&self, id: &str) -> Result<Quotation> {
        let record: QuotationRecord = self.select_by_id(QUOTATIONS_TABLE, id).await?;
        Ok(record.into())
    }

    async fn quotations_of_request(&self, request_id: &str) -> Result<Vec<Quotation>> {
        let filters = [
            ("request_id", eq(request_id)),
            ("order", "created_at.asc".to_string()),
        ];
        let records: Vec<QuotationRecord> = self.select(QUOTATIONS_TABLE, &filters).await?;
        Ok(records.into_iter().map(Into::into).collect())
    }

    async fn create_quotation(&self, quotation: Quotation) -> Result<()> {
        self.insert(QUOTATIONS_TABLE, &QuotationRecord::from(&quotation))
            .await
    }

    async fn update_quotation_status(&self, id: &str, status: QuotationStatus) -> Result<()> {
        let patch = StatusPatch {
            status: status.to_string(),
        };
        self.update_by_id(QUOTATIONS_TABLE, id, &patch).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_down_listing_filters() {
        let query = ListingQuery {
            text: Some("masala (dosa), *".into()),
            category: Some("Restaurants".into()),
            postal_code: Some("560004".into()),
            open_now: true,
            limit: Some(20),
        };
        let filters = listing_filters(&query);
        assert_eq!(
            filters,
            vec![
                ("status", "eq.approved".to_string()),
                ("category", "eq.Restaurants".to_string()),
                ("postal_code", "eq.560004".to_string()),
                ("is_open_now", "is.true".to_string()),
                (
                    "or",
                    "(name.ilike.*masala dosa*,category.ilike.*masala dosa*,subcategory.ilike.*masala dosa*)"
                        .to_string()
                ),
                ("order", "rating.desc.nullslast".to_string()),
                ("limit", "20".to_string()),
            ]
        );
    }

    #[test]
    fn only_approved_listings_without_predicates() {
        assert_eq!(
            listing_filters(&ListingQuery::default()),
            vec![
                ("status", "eq.approved".to_string()),
                ("order", "rating.desc.nullslast".to_string()),
            ]
        );
    }
}
