use strum::{Display, EnumIter, EnumString};

use crate::{id::*, time::*};

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Display, EnumString, EnumIter)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ReviewCriterion {
    Quality,
    Service,
    Value,
    Punctuality,
}

/// Star rating given by a single review.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq, PartialOrd, Ord)]
pub struct RatingValue(u8);

impl RatingValue {
    pub fn new<I: Into<u8>>(val: I) -> Self {
        let new = Self(val.into());
        debug_assert!(new.is_valid());
        new
    }

    pub const fn min() -> Self {
        Self(1)
    }

    pub const fn max() -> Self {
        Self(5)
    }

    pub fn clamp(self) -> Self {
        Self(self.0.clamp(Self::min().0, Self::max().0))
    }

    pub fn is_valid(self) -> bool {
        self >= Self::min() && self <= Self::max()
    }
}

impl From<u8> for RatingValue {
    fn from(from: u8) -> Self {
        Self(from)
    }
}

impl From<RatingValue> for u8 {
    fn from(from: RatingValue) -> Self {
        from.0
    }
}

impl From<RatingValue> for f64 {
    fn from(from: RatingValue) -> Self {
        f64::from(from.0)
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, PartialOrd)]
pub struct AvgRatingValue(f64);

impl AvgRatingValue {
    pub const fn min() -> Self {
        Self(0.0)
    }

    pub const fn max() -> Self {
        Self(5.0)
    }

    pub fn clamp(self) -> Self {
        Self(self.0.max(Self::min().0).min(Self::max().0))
    }

    pub fn is_valid(self) -> bool {
        self >= Self::min() && self <= Self::max()
    }
}

impl From<f64> for AvgRatingValue {
    fn from(from: f64) -> Self {
        Self(from)
    }
}

impl From<AvgRatingValue> for f64 {
    fn from(from: AvgRatingValue) -> Self {
        from.0
    }
}

#[derive(Debug, Default, Clone)]
pub struct AvgRatingValueBuilder {
    acc: u64,
    cnt: usize,
}

impl AvgRatingValueBuilder {
    pub fn add(&mut self, val: RatingValue) {
        let val = val.clamp();
        self.acc += u64::from(val.0);
        self.cnt += 1;
    }

    pub const fn count(&self) -> usize {
        self.cnt
    }

    pub fn build(self) -> AvgRatingValue {
        if self.cnt > 0 {
            AvgRatingValue::from(self.acc as f64 / self.cnt as f64).clamp()
        } else {
            Default::default()
        }
    }
}

impl std::ops::AddAssign<RatingValue> for AvgRatingValueBuilder {
    fn add_assign(&mut self, rhs: RatingValue) {
        self.add(rhs);
    }
}

/// Averages per criterion; `None` if nobody rated that criterion.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct CriteriaAverages {
    pub quality: Option<AvgRatingValue>,
    pub service: Option<AvgRatingValue>,
    pub value: Option<AvgRatingValue>,
    pub punctuality: Option<AvgRatingValue>,
}

impl CriteriaAverages {
    pub fn get(&self, criterion: ReviewCriterion) -> Option<AvgRatingValue> {
        use ReviewCriterion as C;
        match criterion {
            C::Quality => self.quality,
            C::Service => self.service,
            C::Value => self.value,
            C::Punctuality => self.punctuality,
        }
    }
}

#[derive(Debug, Default, Clone)]
pub struct CriteriaAveragesBuilder {
    pub quality: AvgRatingValueBuilder,
    pub service: AvgRatingValueBuilder,
    pub value: AvgRatingValueBuilder,
    pub punctuality: AvgRatingValueBuilder,
}

impl CriteriaAveragesBuilder {
    pub fn add(&mut self, criterion: ReviewCriterion, val: RatingValue) {
        use ReviewCriterion as C;
        match criterion {
            C::Quality => self.quality.add(val),
            C::Service => self.service.add(val),
            C::Value => self.value.add(val),
            C::Punctuality => self.punctuality.add(val),
        }
    }

    pub fn build(self) -> CriteriaAverages {
        fn finish(b: AvgRatingValueBuilder) -> Option<AvgRatingValue> {
            (b.count() > 0).then(|| b.build())
        }
        CriteriaAverages {
            quality: finish(self.quality),
            service: finish(self.service),
            value: finish(self.value),
            punctuality: finish(self.punctuality),
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct ReviewSummary {
    pub average: AvgRatingValue,
    pub count: usize,
    pub criteria: CriteriaAverages,
}

#[rustfmt::skip]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Review {
    pub id         : Id,
    pub listing_id : Id,
    pub author     : Option<String>,
    pub value      : RatingValue,
    pub comment    : Option<String>,
    pub criteria   : Vec<(ReviewCriterion, RatingValue)>,
    pub created_at : Timestamp,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rating_value_range() {
        assert!(RatingValue::new(1u8).is_valid());
        assert!(RatingValue::new(5u8).is_valid());
        assert!(!RatingValue::from(0).is_valid());
        assert!(!RatingValue::from(6).is_valid());
        assert_eq!(RatingValue::from(9).clamp(), RatingValue::max());
        assert_eq!(RatingValue::from(0).clamp(), RatingValue::min());
    }

    #[test]
    fn average_of_nothing_is_zero() {
        assert_eq!(AvgRatingValueBuilder::default().build(), AvgRatingValue::from(0.0));
    }

    #[test]
    fn average_of_values() {
        let mut b = AvgRatingValueBuilder::default();
        b += RatingValue::new(5u8);
        b += RatingValue::new(4u8);
        b += RatingValue::new(3u8);
        assert_eq!(b.count(), 3);
        assert_eq!(b.build(), AvgRatingValue::from(4.0));
    }

    #[test]
    fn criteria_without_ratings_are_absent() {
        let mut b = CriteriaAveragesBuilder::default();
        b.add(ReviewCriterion::Service, RatingValue::new(2u8));
        b.add(ReviewCriterion::Service, RatingValue::new(3u8));
        let avg = b.build();
        assert_eq!(avg.get(ReviewCriterion::Service), Some(AvgRatingValue::from(2.5)));
        assert_eq!(avg.get(ReviewCriterion::Quality), None);
    }
}
