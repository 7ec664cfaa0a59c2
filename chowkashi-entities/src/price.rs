use std::{fmt, str::FromStr};

use thiserror::Error;

/// Price range of a listing in whole rupees.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceRange {
    min: u32,
    max: u32,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Invalid price range: {0}")]
pub struct PriceRangeParseError(String);

impl PriceRange {
    pub fn new(a: u32, b: u32) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    pub const fn min(self) -> u32 {
        self.min
    }

    pub const fn max(self) -> u32 {
        self.max
    }

    pub fn midpoint(self) -> f64 {
        (f64::from(self.min) + f64::from(self.max)) / 2.0
    }

    pub fn tier(self) -> PriceTier {
        PriceTier::from_midpoint(self.midpoint())
    }
}

/// Parses leniently: every run of digits is a number (thousand
/// separators are dropped), the first and the last number span the range.
impl FromStr for PriceRange {
    type Err = PriceRangeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let cleaned = s.replace(',', "");
        let numbers: Vec<u32> = cleaned
            .split(|c: char| !c.is_ascii_digit())
            .filter(|t| !t.is_empty())
            .map(str::parse)
            .collect::<Result<_, _>>()
            .map_err(|_| PriceRangeParseError(s.to_string()))?;
        match (numbers.first(), numbers.last()) {
            (Some(&first), Some(&last)) => Ok(Self::new(first, last)),
            _ => Err(PriceRangeParseError(s.to_string())),
        }
    }
}

impl fmt::Display for PriceRange {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.min == self.max {
            write!(f, "₹{}", self.min)
        } else {
            write!(f, "₹{} - ₹{}", self.min, self.max)
        }
    }
}

/// Coarse price bucket offered as a search filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PriceTier {
    Budget = 1,
    Moderate = 2,
    Premium = 3,
}

impl PriceTier {
    pub const BUDGET_MAX_MIDPOINT: f64 = 500.0;
    pub const MODERATE_MAX_MIDPOINT: f64 = 1_500.0;

    pub fn from_midpoint(midpoint: f64) -> Self {
        if midpoint <= Self::BUDGET_MAX_MIDPOINT {
            Self::Budget
        } else if midpoint <= Self::MODERATE_MAX_MIDPOINT {
            Self::Moderate
        } else {
            Self::Premium
        }
    }

    pub fn from_level(level: u8) -> Option<Self> {
        match level {
            1 => Some(Self::Budget),
            2 => Some(Self::Moderate),
            3 => Some(Self::Premium),
            _ => None,
        }
    }

    pub const fn level(self) -> u8 {
        self as u8
    }
}
