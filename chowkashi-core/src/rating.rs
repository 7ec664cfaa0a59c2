use crate::entities::*;

pub trait Rated {
    fn review_summary(&self, _: &[Review]) -> ReviewSummary;
}

impl Rated for BusinessListing {
    fn review_summary(&self, reviews: &[Review]) -> ReviewSummary {
        debug_assert_eq!(
            reviews.len(),
            reviews.iter().filter(|r| r.listing_id == self.id).count()
        );
        summarize_reviews(reviews)
    }
}

pub fn summarize_reviews(reviews: &[Review]) -> ReviewSummary {
    let (total, criteria) = reviews.iter().fold(
        (AvgRatingValueBuilder::default(), CriteriaAveragesBuilder::default()),
        |(mut total, mut criteria), r| {
            total += r.value;
            for (criterion, value) in &r.criteria {
                criteria.add(*criterion, *value);
            }
            (total, criteria)
        },
    );
    ReviewSummary {
        count: total.count(),
        average: total.build(),
        criteria: criteria.build(),
    }
}

/// Replaces the stored aggregate with a freshly computed one.
pub fn apply_review_summary(listing: &mut BusinessListing, summary: &ReviewSummary) {
    if summary.count == 0 {
        listing.rating = None;
        listing.review_count = Some(0);
    } else {
        listing.rating = Some(f64::from(summary.average));
        listing.review_count = Some(u32::try_from(summary.count).unwrap_or(u32::MAX));
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use chowkashi_entities::builders::*;

    fn new_review(listing_id: &str, value: u8, criteria: &[(ReviewCriterion, u8)]) -> Review {
        Review {
            id: Id::new(),
            listing_id: listing_id.into(),
            author: Some("Asha".into()),
            value: value.into(),
            comment: None,
            criteria: criteria.iter().map(|(c, v)| (*c, (*v).into())).collect(),
            created_at: Timestamp::now(),
        }
    }

    #[test]
    fn average_rating() {
        let listing = BusinessListing::build().id("a").finish();
        let reviews = [
            new_review("a", 5, &[]),
            new_review("a", 4, &[]),
            new_review("a", 3, &[]),
            new_review("a", 4, &[]),
        ];
        let summary = listing.review_summary(&reviews);
        assert_eq!(summary.count, 4);
        assert_eq!(summary.average, 4.0.into());
        assert_eq!(listing.review_summary(&[]), ReviewSummary::default());
    }

    #[test]
    fn average_rating_per_criterion() {
        let reviews = [
            new_review("a", 5, &[(ReviewCriterion::Quality, 5), (ReviewCriterion::Service, 2)]),
            new_review("a", 3, &[(ReviewCriterion::Quality, 4)]),
        ];
        let summary = summarize_reviews(&reviews);
        assert_eq!(summary.criteria.get(ReviewCriterion::Quality), Some(4.5.into()));
        assert_eq!(summary.criteria.get(ReviewCriterion::Service), Some(2.0.into()));
        assert_eq!(summary.criteria.get(ReviewCriterion::Punctuality), None);
    }

    #[test]
    fn apply_summary_to_listing() {
        let mut listing = BusinessListing::build().rating(1.0).review_count(1).finish();
        let summary = summarize_reviews(&[new_review("x", 5, &[]), new_review("x", 4, &[])]);
        apply_review_summary(&mut listing, &summary);
        assert_eq!(listing.rating, Some(4.5));
        assert_eq!(listing.review_count, Some(2));
        apply_review_summary(&mut listing, &ReviewSummary::default());
        assert_eq!(listing.rating, None);
        assert_eq!(listing.review_count, Some(0));
    }
}
