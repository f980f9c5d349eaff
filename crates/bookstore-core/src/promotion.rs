//! # Promotion Validation
//!
//! Decides whether a promotion code can be redeemed right now.
//!
//! ## Applicability Rule
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  A promotion is applicable at `now` when ALL hold:                      │
//! │                                                                         │
//! │    status == Active                                                     │
//! │    start_date <= date(now) <= end_date      (both ends inclusive)       │
//! │    remaining_quantity > 0                                               │
//! │    1 <= discount_percent <= 100             (data integrity)            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `date(now)` is the calendar date in `now`'s own time zone, so callers pick
//! the store's zone by choosing what they pass in.
//!
//! Codes compare exactly and case-sensitively. When several promotions share
//! a code, the first applicable one in input order wins.

use std::fmt;

use chrono::{DateTime, NaiveDate, TimeZone};

use crate::error::{CoreError, CoreResult};
use crate::types::{Promotion, PromotionStatus};
use crate::validation::is_valid_discount_percent;

/// Why a promotion cannot be redeemed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Inapplicable {
    Inactive,
    NotStarted { starts: NaiveDate },
    Expired { ended: NaiveDate },
    Exhausted,
    InvalidDiscount { percent: u8 },
}

impl fmt::Display for Inapplicable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Inapplicable::Inactive => write!(f, "inactive"),
            Inapplicable::NotStarted { starts } => write!(f, "starts on {starts}"),
            Inapplicable::Expired { ended } => write!(f, "ended on {ended}"),
            Inapplicable::Exhausted => write!(f, "no redemptions left"),
            Inapplicable::InvalidDiscount { percent } => {
                write!(f, "discount {percent}% outside 1-100")
            }
        }
    }
}

impl Promotion {
    /// Returns the first rule `now` violates, or `None` if applicable.
    pub fn inapplicability<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> Option<Inapplicable> {
        let today = now.date_naive();

        if self.status != PromotionStatus::Active {
            return Some(Inapplicable::Inactive);
        }
        if today < self.start_date {
            return Some(Inapplicable::NotStarted {
                starts: self.start_date,
            });
        }
        if today > self.end_date {
            return Some(Inapplicable::Expired {
                ended: self.end_date,
            });
        }
        if self.remaining_quantity <= 0 {
            return Some(Inapplicable::Exhausted);
        }
        if !is_valid_discount_percent(i64::from(self.discount_percent)) {
            return Some(Inapplicable::InvalidDiscount {
                percent: self.discount_percent,
            });
        }
        None
    }
}

/// Checks whether `promotion` can be redeemed at `now`.
///
/// ## Example
/// ```rust
/// use bookstore_core::promotion::is_applicable;
/// use bookstore_core::{Promotion, PromotionStatus};
/// use chrono::{NaiveDate, TimeZone, Utc};
///
/// let promo = Promotion {
///     id: "p1".into(),
///     code: "SALE10".into(),
///     discount_percent: 10,
///     start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
///     end_date: NaiveDate::from_ymd_opt(2024, 12, 31).unwrap(),
///     remaining_quantity: 5,
///     status: PromotionStatus::Active,
///     description: None,
/// };
///
/// let june = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
/// let next_year = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
/// assert!(is_applicable(&promo, &june));
/// assert!(!is_applicable(&promo, &next_year));
/// ```
pub fn is_applicable<Tz: TimeZone>(promotion: &Promotion, now: &DateTime<Tz>) -> bool {
    promotion.inapplicability(now).is_none()
}

/// Finds the first promotion whose code equals `code` exactly and which is
/// applicable at `now`.
pub fn find_applicable<'a, Tz: TimeZone>(
    code: &str,
    promotions: &'a [Promotion],
    now: &DateTime<Tz>,
) -> Option<&'a Promotion> {
    promotions
        .iter()
        .find(|promo| promo.code == code && is_applicable(promo, now))
}

/// Redeems a shopper-entered code against the fetched promotions.
///
/// ## User Workflow
/// ```text
/// Shopper enters code ──► redeem_code()
///                             │
///                             ├── match ──► Ok(&Promotion) ──► apply_discount()
///                             │
///                             └── none ───► InvalidPromotionCode ──► re-enter
/// ```
pub fn redeem_code<'a, Tz: TimeZone>(
    code: &str,
    promotions: &'a [Promotion],
    now: &DateTime<Tz>,
) -> CoreResult<&'a Promotion> {
    find_applicable(code, promotions, now).ok_or_else(|| CoreError::InvalidPromotionCode {
        code: code.to_string(),
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
