use thiserror::Error;

use crate::entities::*;

use super::text::{sanitize_input, DEFAULT_MAX_INPUT_LEN};

pub trait Validate {
    type Error;
    fn validate(&self) -> Result<(), Self::Error>;
}

pub trait AutoCorrect {
    fn auto_correct(self) -> Self;
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum QuotationInvalidation {
    #[error("The amount must be positive")]
    Amount,
    #[error("The quotation expires before it was created")]
    ValidUntil,
}

impl Validate for Quotation {
    type Error = QuotationInvalidation;
    fn validate(&self) -> Result<(), Self::Error> {
        if self.amount.is_zero() {
            return Err(Self::Error::Amount);
        }
        if self.is_expired_at(self.created_at) {
            return Err(Self::Error::ValidUntil);
        }
        Ok(())
    }
}

impl AutoCorrect for Quotation {
    fn auto_correct(mut self) -> Self {
        self.message = self
            .message
            .map(|m| sanitize_input(&m, DEFAULT_MAX_INPUT_LEN))
            .filter(|m| !m.is_empty());
        self
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReviewInvalidation {
    #[error("Rating value out of range")]
    Value,
    #[error("Rating value of criterion {0} out of range")]
    Criterion(ReviewCriterion),
}

impl Validate for Review {
    type Error = ReviewInvalidation;
    fn validate(&self) -> Result<(), Self::Error> {
        if !self.value.is_valid() {
            return Err(Self::Error::Value);
        }
        if let Some((criterion, _)) = self.criteria.iter().find(|(_, v)| !v.is_valid()) {
            return Err(Self::Error::Criterion(*criterion));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quotation(amount: Amount) -> Quotation {
        Quotation {
            id: "q".into(),
            request_id: "r".into(),
            provider_id: "p".into(),
            amount,
            message: Some("  <i>Can start</i>   tomorrow ".into()),
            valid_until: None,
            status: QuotationStatus::Pending,
            created_at: Timestamp::try_from_secs(1_000).unwrap(),
        }
    }

    #[test]
    fn validate_quotation() {
        assert!(quotation(Amount::from_rupees(500)).validate().is_ok());
        assert_eq!(
            quotation(Amount::from_paise(0)).validate(),
            Err(QuotationInvalidation::Amount)
        );
        let mut expired = quotation(Amount::from_rupees(1));
        expired.valid_until = Timestamp::try_from_secs(999);
        assert_eq!(expired.validate(), Err(QuotationInvalidation::ValidUntil));
    }

    #[test]
    fn auto_correct_quotation_message() {
        let q = quotation(Amount::from_rupees(1)).auto_correct();
        assert_eq!(q.message.as_deref(), Some("Can start tomorrow"));
        let mut blank = quotation(Amount::from_rupees(1));
        blank.message = Some(" <br/> ".into());
        assert_eq!(blank.auto_correct().message, None);
    }

    #[test]
    fn validate_review() {
        let mut review = Review {
            id: "r".into(),
            listing_id: "l".into(),
            author: None,
            value: RatingValue::from(4),
            comment: None,
            criteria: vec![(ReviewCriterion::Service, RatingValue::from(5))],
            created_at: Timestamp::now(),
        };
        assert!(review.validate().is_ok());
        review.criteria.push((ReviewCriterion::Value, RatingValue::from(0)));
        assert_eq!(
            review.validate(),
            Err(ReviewInvalidation::Criterion(ReviewCriterion::Value))
        );
        review.value = RatingValue::from(6);
        assert_eq!(review.validate(), Err(ReviewInvalidation::Value));
    }
}
