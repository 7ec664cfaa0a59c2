use std::fmt;

use strum::{Display, EnumString};

use crate::{id::*, time::*};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum RequestStatus {
    Open,
    Closed,
}

/// A user's request for a service that providers can quote on.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceRequest {
    pub id: Id,
    pub requester: Id,
    pub category: Option<String>,
    pub description: String,
    pub postal_code: Option<String>,
    pub status: RequestStatus,
    pub created_at: Timestamp,
}

impl ServiceRequest {
    pub fn is_open(&self) -> bool {
        self.status == RequestStatus::Open
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum QuotationStatus {
    Pending,
    Accepted,
    Rejected,
    Withdrawn,
}

/// Monetary amount in paise.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Amount(u64);

impl Amount {
    pub const fn from_paise(paise: u64) -> Self {
        Self(paise)
    }

    pub const fn from_rupees(rupees: u64) -> Self {
        Self(rupees * 100)
    }

    pub const fn paise(self) -> u64 {
        self.0
    }

    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "₹{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

/// A priced offer a provider sends against a service request.
#[rustfmt::skip]
#[derive(Debug, Clone, PartialEq)]
pub struct Quotation {
    pub id          : Id,
    pub request_id  : Id,
    pub provider_id : Id,
    pub amount      : Amount,
    pub message     : Option<String>,
    pub valid_until : Option<Timestamp>,
    pub status      : QuotationStatus,
    pub created_at  : Timestamp,
}

impl Quotation {
    pub fn is_pending(&self) -> bool {
        self.status == QuotationStatus::Pending
    }

    pub fn is_expired_at(&self, now: Timestamp) -> bool {
        self.valid_until.is_some_and(|until| until < now)
    }
}
