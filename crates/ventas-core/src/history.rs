//! # Sale History
//!
//! Read-side helpers over sales fetched from `GET /ventas/`: date range
//! filtering and customer name resolution for listings.
//!
//! ```text
//! GET /ventas/ ──► filter_by_date(range) ──► with_customer_names(customers) ──► table
//! ```

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use std::collections::HashMap;

use crate::money::Money;
use crate::types::{Customer, CustomerId, SaleId, SaleRecord};
use crate::validation::{validate_date_range, ValidationResult};

/// Customer name shown when the sale's customer no longer exists.
pub const UNKNOWN_CUSTOMER_NAME: &str = "Unavailable";

// =============================================================================
// Date Range
// =============================================================================

/// Inclusive calendar-date filter. Either bound may be open.
///
/// Sales are compared by the UTC calendar date of their timestamp.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
}

impl DateRange {
    /// Creates a range, rejecting `from > to`.
    pub fn new(from: Option<NaiveDate>, to: Option<NaiveDate>) -> ValidationResult<Self> {
        validate_date_range(from, to)?;
        Ok(DateRange { from, to })
    }

    /// A range that accepts every sale.
    pub fn unbounded() -> Self {
        DateRange::default()
    }

    pub fn from(&self) -> Option<NaiveDate> {
        self.from
    }

    pub fn to(&self) -> Option<NaiveDate> {
        self.to
    }

    pub fn is_unbounded(&self) -> bool {
        self.from.is_none() && self.to.is_none()
    }

    /// Whether `timestamp` falls inside the range.
    pub fn contains(&self, timestamp: &DateTime<Utc>) -> bool {
        let day = timestamp.date_naive();
        self.from.map_or(true, |from| day >= from) && self.to.map_or(true, |to| day <= to)
    }
}

/// Keeps the sales inside `range`, preserving backend order.
pub fn filter_by_date(records: Vec<SaleRecord>, range: &DateRange) -> Vec<SaleRecord> {
    if range.is_unbounded() {
        return records;
    }
    records
        .into_iter()
        .filter(|record| range.contains(&record.created_at))
        .collect()
}

// =============================================================================
// Listing Rows
// =============================================================================

/// One row of the sale history listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SaleSummary {
    pub id: SaleId,
    pub created_at: DateTime<Utc>,
    pub customer_id: CustomerId,
    pub customer_name: String,
    pub total: Money,
    pub line_count: usize,
}

/// Pairs each sale with its customer's name.
///
/// Customers missing from `customers` get [`UNKNOWN_CUSTOMER_NAME`].
pub fn with_customer_names(records: &[SaleRecord], customers: &[Customer]) -> Vec<SaleSummary> {
    let names: HashMap<CustomerId, &str> = customers
        .iter()
        .map(|c| (c.id, c.name.as_str()))
        .collect();

    records
        .iter()
        .map(|record| SaleSummary {
            id: record.id,
            created_at: record.created_at,
            customer_id: record.customer_id,
            customer_name: names
                .get(&record.customer_id)
                .copied()
                .unwrap_or(UNKNOWN_CUSTOMER_NAME)
                .to_string(),
            total: record.total,
            line_count: record.details.len(),
        })
        .collect()
}

// =============================================================================
// Unit Tests
// =============================================================================
