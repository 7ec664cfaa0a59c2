use super::{annotate::annotate_listings, filter_listings::*, postal_code::postal_code_filter, prelude::*};
use crate::util::sort::sort_listings;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchRequest {
    pub text: String,
    pub postal_code: Option<String>,
    /// Search around the device position.
    pub near_me: bool,
    pub user_location: Option<MapPoint>,
    pub filters: FilterSet,
    /// Rewrite the text with the query enhancement function first.
    pub enhance: bool,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchResults {
    pub listings: Vec<AnnotatedListing>,
    /// The location the distances refer to.
    pub user_location: Option<MapPoint>,
    /// The query text that has actually been sent.
    pub query: String,
    /// The backend failed and the result is empty.
    pub degraded: bool,
}

async fn enhance_query<F>(functions: &F, req: &SearchRequest, text: &str) -> String
where
    F: SearchFunctions,
{
    let request = EnhanceQueryRequest {
        query: text.to_string(),
        near_me: req.near_me,
        location: req.user_location,
    };
    match functions.enhance_query(&request).await {
        Ok(enhanced) if !enhanced.trim().is_empty() => {
            log::debug!("Enhanced query '{text}' to '{enhanced}'");
            enhanced.trim().to_string()
        }
        Ok(_) => text.to_string(),
        Err(err) => {
            log::warn!("Query enhancement failed, using the original text: {err}");
            text.to_string()
        }
    }
}

/// The complete search pipeline: query, annotate, filter and sort.
pub async fn search_listings<R, F>(
    repo: &R,
    functions: &F,
    req: &SearchRequest,
) -> Result<SearchResults>
where
    R: ListingRepo,
    F: SearchFunctions,
{
    let postal_code = postal_code_filter(req.postal_code.as_deref())?;
    let text = req.text.trim();
    let query = if req.enhance && !text.is_empty() {
        enhance_query(functions, req, text).await
    } else {
        text.to_string()
    };

    let fetched = if req.near_me || req.user_location.is_some() {
        let request = LocationSearchRequest {
            query: query.clone(),
            category: req.filters.category.clone(),
            location: req.user_location,
            postal_code: postal_code.clone(),
            open_now: req.filters.open_now,
        };
        functions
            .location_search(&request)
            .await
            .map(|res| (res.listings, res.user_location.or(req.user_location)))
    } else {
        let listing_query = listing_query(&query, postal_code.as_deref(), &req.filters);
        repo.query_listings(&listing_query)
            .await
            .map(|listings| (listings, None))
    };

    let (listings, user_location, degraded) = match fetched {
        Ok((listings, user_location)) => (listings, user_location, false),
        Err(err) => {
            log::warn!("Search for '{query}' failed: {err}");
            (vec![], req.user_location, true)
        }
    };
    log::debug!("Found {} listings for '{query}'", listings.len());

    let annotated = annotate_listings(listings, user_location);
    let filtered = apply_client_filters(annotated, &req.filters);
    let listings = sort_listings(&filtered, req.filters.sort);

    Ok(SearchResults {
        listings,
        user_location,
        query,
        degraded,
    })
}

#[cfg(test)]
mod tests {
    use super::{super::tests::MockDb, *};
    use chowkashi_entities::builders::*;
    use futures::executor::block_on;

    fn cafe(id: &str, lat: f64, lng: f64, rating: f64) -> BusinessListing {
        BusinessListing::build()
            .id(id)
            .name(id)
            .category("Cafes")
            .pos(MapPoint::from_lat_lng_deg(lat, lng))
            .rating(rating)
            .finish()
    }

    fn seeded_db() -> MockDb {
        let db = MockDb::default();
        db.listings.lock().unwrap().extend([
            cafe("near", 12.975, 77.595, 3.0),
            cafe("far", 13.2, 77.7, 4.5),
            cafe("mid", 13.0, 77.6, 4.0),
            BusinessListing::build()
                .id("pending")
                .status(ListingStatus::Pending)
                .finish(),
        ]);
        db
    }

    #[test]
    fn table_query_without_location() {
        let db = seeded_db();
        let req = SearchRequest {
            text: " cafe ".into(),
            filters: FilterSet {
                sort: Some(SortKey::Rating),
                category: Some("Cafes".into()),
                ..Default::default()
            },
            ..Default::default()
        };
        let results = block_on(search_listings(&db, &db, &req)).unwrap();
        assert!(!results.degraded);
        assert_eq!(results.query, "cafe");
        let ids: Vec<_> = results.listings.iter().map(|l| l.listing.id.as_str()).collect();
        assert_eq!(ids, vec!["far", "mid", "near"]);
        assert!(results.listings.iter().all(|l| l.distance.is_none()));
        let queries = db.listing_queries.lock().unwrap();
        assert_eq!(queries.len(), 1);
        assert_eq!(queries[0].category.as_deref(), Some("Cafes"));
        assert!(db.location_searches.lock().unwrap().is_empty());
    }

    #[test]
    fn location_search_annotates_filters_and_sorts() {
        let db = seeded_db();
        let user = MapPoint::from_lat_lng_deg(12.9716, 77.5946);
        let req = SearchRequest {
            user_location: Some(user),
            filters: FilterSet {
                radius_km: 10.0,
                sort: Some(SortKey::Distance),
                ..Default::default()
            },
            ..Default::default()
        };
        let results = block_on(search_listings(&db, &db, &req)).unwrap();
        let ids: Vec<_> = results.listings.iter().map(|l| l.listing.id.as_str()).collect();
        assert_eq!(ids, vec!["near", "mid"]);
        assert!(results
            .listings
            .windows(2)
            .all(|w| w[0].distance_km() <= w[1].distance_km()));
        assert_eq!(results.user_location, Some(user));
        assert_eq!(db.location_searches.lock().unwrap()[0].location, Some(user));
        assert!(db.listing_queries.lock().unwrap().is_empty());
    }

    #[test]
    fn near_me_uses_echoed_location() {
        let db = seeded_db();
        let echoed = MapPoint::from_lat_lng_deg(13.0, 77.6);
        *db.backend_location.lock().unwrap() = Some(echoed);
        let req = SearchRequest {
            near_me: true,
            ..Default::default()
        };
        let results = block_on(search_listings(&db, &db, &req)).unwrap();
        assert_eq!(results.user_location, Some(echoed));
        assert!(results.listings.iter().all(|l| l.distance.is_some()));
    }

    #[test]
    fn enhanced_query_is_sent() {
        let db = seeded_db();
        *db.enhancement.lock().unwrap() = Some("filter coffee cafe".into());
        let req = SearchRequest {
            text: "kaapi".into(),
            enhance: true,
            ..Default::default()
        };
        let results = block_on(search_listings(&db, &db, &req)).unwrap();
        assert_eq!(results.query, "filter coffee cafe");
        assert_eq!(
            db.listing_queries.lock().unwrap()[0].text.as_deref(),
            Some("filter coffee cafe")
        );
    }

    #[test]
    fn failed_enhancement_keeps_original_text() {
        let db = seeded_db();
        let req = SearchRequest {
            text: "kaapi".into(),
            enhance: true,
            ..Default::default()
        };
        let results = block_on(search_listings(&db, &db, &req)).unwrap();
        assert_eq!(results.query, "kaapi");
    }

    #[test]
    fn backend_failure_degrades_to_empty_result() {
        let db = MockDb::offline();
        let results = block_on(search_listings(&db, &db, &SearchRequest::default())).unwrap();
        assert!(results.degraded);
        assert!(results.listings.is_empty());
    }

    #[test]
    fn invalid_postal_code_is_rejected_before_querying() {
        let db = seeded_db();
        let req = SearchRequest {
            postal_code: Some("12345".into()),
            ..Default::default()
        };
        assert!(matches!(
            block_on(search_listings(&db, &db, &req)),
            Err(Error::InvalidPostalCode)
        ));
        assert!(db.listing_queries.lock().unwrap().is_empty());
    }
}
