//! # Sale Composition
//!
//! Builds line items, accumulates them into the in-progress [`Sale`] and
//! packages the result for `POST /ventas/`.
//!
//! ## Sale Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Sale Lifecycle                                    │
//! │                                                                         │
//! │  ┌──────────┐  select_customer  ┌───────────┐  to_submission  ┌──────┐ │
//! │  │  Empty   │──────────────────►│ Composing │────────────────►│ POST │ │
//! │  └──────────┘                   └───────────┘                 └──┬───┘ │
//! │       ▲                           │      ▲                       │     │
//! │       │                    append │      │ (self-loop)           │     │
//! │       │                           └──────┘                       │     │
//! │       │                                                          │     │
//! │       ├──────────── reset (cancel) ◄─── Composing                │     │
//! │       └──────────── reset (submitted OK) ◄───────────────────────┘     │
//! │                                                                         │
//! │  Submit failure leaves the sale in Composing, unchanged.               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariant
//! `sale.total() == Σ (line.subtotal() + line.tax())` after every operation.
//! The fields are private so the only way to change a sale is through the
//! operations below, each of which keeps the running sums in step. A line
//! whose addition would overflow any sum is refused and the sale is handed
//! back unchanged.

use serde::Serialize;

use crate::catalog::Catalog;
use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::types::{CustomerId, NewSale, NewSaleDetail, Product, ProductId, TaxRate};
use crate::validation::{parse_quantity, validate_quantity, ValidationResult};

// =============================================================================
// Line Item
// =============================================================================

/// One product/quantity entry of a sale being composed.
///
/// ## Snapshot Pattern
/// The unit price and tax rate are copied from the product when the line
/// is built. Refreshing the catalog afterwards does not change the line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineItem {
    product_id: ProductId,
    product_name: String,
    quantity: i64,
    unit_price: Money,
    tax_rate: TaxRate,
    subtotal: Money,
    tax: Money,
}

impl LineItem {
    /// Computes a line for `quantity` units of `product`.
    ///
    /// - `subtotal = unit_price × quantity`
    /// - `tax = subtotal × tax_rate` when the product is taxed, else zero
    ///
    /// ## Example
    /// ```rust
    /// use ventas_core::money::Money;
    /// use ventas_core::sale::LineItem;
    /// use ventas_core::types::{Product, TaxRate};
    ///
    /// let product = Product {
    ///     id: 5,
    ///     code: "ACET-500".into(),
    ///     name: "Acetaminofen".into(),
    ///     price: Money::from_pesos(1000),
    ///     taxed: true,
    ///     tax_rate: TaxRate::from_bps(1900),
    /// };
    ///
    /// let line = LineItem::build(&product, 3).unwrap();
    /// assert_eq!(line.subtotal(), Money::from_pesos(3000));
    /// assert_eq!(line.tax(), Money::from_pesos(570));
    /// ```
    pub fn build(product: &Product, quantity: i64) -> ValidationResult<LineItem> {
        validate_quantity(quantity)?;

        let unit_price = product.price;
        let subtotal = unit_price
            .checked_mul_quantity(quantity)
            .ok_or_else(|| quantity_out_of_range(unit_price))?;

        let tax_rate = product.effective_tax_rate();
        let tax = subtotal
            .checked_tax(tax_rate)
            .ok_or_else(|| quantity_out_of_range(unit_price))?;

        // A line whose total cannot be represented could never be summed
        subtotal
            .checked_add(tax)
            .ok_or_else(|| quantity_out_of_range(unit_price))?;

        Ok(LineItem {
            product_id: product.id,
            product_name: product.name.clone(),
            quantity,
            unit_price,
            tax_rate,
            subtotal,
            tax,
        })
    }

    pub fn product_id(&self) -> ProductId {
        self.product_id
    }

    /// Product name at the time the line was built.
    pub fn product_name(&self) -> &str {
        &self.product_name
    }

    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    pub fn unit_price(&self) -> Money {
        self.unit_price
    }

    /// Rate applied to this line (zero for untaxed products).
    pub fn tax_rate(&self) -> TaxRate {
        self.tax_rate
    }

    /// Line value before IVA.
    pub fn subtotal(&self) -> Money {
        self.subtotal
    }

    pub fn tax(&self) -> Money {
        self.tax
    }

    /// Line value including IVA.
    pub fn line_total(&self) -> Money {
        self.subtotal + self.tax
    }

    fn to_detail(&self) -> NewSaleDetail {
        NewSaleDetail {
            product_id: self.product_id,
            quantity: self.quantity,
            unit_price: self.unit_price,
            subtotal: self.subtotal,
            tax: self.tax,
        }
    }
}

fn quantity_out_of_range(unit_price: Money) -> ValidationError {
    let max = if unit_price.is_zero() {
        i64::MAX
    } else {
        i64::MAX / unit_price.cents().abs() / 2
    };
    ValidationError::OutOfRange {
        field: "quantity".to_string(),
        min: 1,
        max,
    }
}

// =============================================================================
// Line Item Builder
// =============================================================================

/// Turns user selections (product reference + quantity text) into line
/// items, resolving the product through the fetched [`Catalog`].
#[derive(Debug, Clone, Copy)]
pub struct LineItemBuilder<'a> {
    catalog: &'a Catalog,
}

impl<'a> LineItemBuilder<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        LineItemBuilder { catalog }
    }

    /// Builds a line from raw user input.
    ///
    /// Quantity is checked before the product so the most common typo is
    /// reported first.
    pub fn build(&self, product_ref: &str, quantity_input: &str) -> ValidationResult<LineItem> {
        let quantity = parse_quantity(quantity_input)?;
        let product = self.catalog.resolve(product_ref)?;
        LineItem::build(product, quantity)
    }
}

// =============================================================================
// Sale
// =============================================================================

/// Where a sale is in its composition lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SaleStatus {
    /// Fresh sale: no customer, no lines.
    Empty,
    /// Customer selected and/or lines added.
    Composing,
}

/// The sale being composed.
///
/// Line items are append-only and kept in entry order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Sale {
    customer: Option<CustomerId>,
    items: Vec<LineItem>,
    subtotal: Money,
    tax: Money,
    total: Money,
    total_quantity: i64,
}

/// Result of [`Sale::append`]: the grown sale, or the untouched sale and
/// the reason the line was refused.
pub type AppendResult = Result<Sale, (Sale, ValidationError)>;

impl Sale {
    /// Creates an empty sale.
    pub fn new() -> Self {
        Sale::default()
    }

    /// Discards this sale and returns a fresh empty one.
    ///
    /// Used both for cancel and after a successful submit.
    #[must_use]
    pub fn reset(self) -> Sale {
        Sale::new()
    }

    /// Appends a line and adds its subtotal and tax to the running total.
    ///
    /// ## Example
    /// ```rust
    /// use ventas_core::money::Money;
    /// use ventas_core::sale::{LineItem, Sale};
    /// use ventas_core::types::{Product, TaxRate};
    ///
    /// let water = Product {
    ///     id: 6,
    ///     code: "AGUA".into(),
    ///     name: "Agua".into(),
    ///     price: Money::from_pesos(500),
    ///     taxed: false,
    ///     tax_rate: TaxRate::zero(),
    /// };
    ///
    /// let sale = Sale::new().append(LineItem::build(&water, 2).unwrap()).unwrap();
    /// assert_eq!(sale.total(), Money::from_pesos(1000));
    /// ```
    ///
    /// ## Errors
    /// `OutOfRange { field: "sale total" }` when the line would overflow the
    /// running sums. The sale comes back in the error unchanged.
    pub fn append(mut self, item: LineItem) -> AppendResult {
        let sums = (
            self.subtotal.checked_add(item.subtotal),
            self.tax.checked_add(item.tax),
            self.total.checked_add(item.line_total()),
            self.total_quantity.checked_add(item.quantity),
        );

        match sums {
            (Some(subtotal), Some(tax), Some(total), Some(total_quantity)) => {
                self.subtotal = subtotal;
                self.tax = tax;
                self.total = total;
                self.total_quantity = total_quantity;
                self.items.push(item);
                Ok(self)
            }
            _ => Err((
                self,
                ValidationError::OutOfRange {
                    field: "sale total".to_string(),
                    min: 0,
                    max: i64::MAX,
                },
            )),
        }
    }

    /// Selects the customer for this sale.
    ///
    /// The customer locks once the first line has been added; picking the
    /// same customer again is accepted. On error the sale is unchanged.
    pub fn select_customer(&mut self, customer: CustomerId) -> CoreResult<()> {
        match self.customer {
            Some(current) if current != customer && !self.items.is_empty() => {
                Err(CoreError::CustomerLocked {
                    current,
                    requested: customer,
                })
            }
            _ => {
                self.customer = Some(customer);
                Ok(())
            }
        }
    }

    pub fn status(&self) -> SaleStatus {
        if self.customer.is_none() && self.items.is_empty() {
            SaleStatus::Empty
        } else {
            SaleStatus::Composing
        }
    }

    pub fn customer(&self) -> Option<CustomerId> {
        self.customer
    }

    /// Whether the customer can still be changed.
    pub fn is_customer_locked(&self) -> bool {
        self.customer.is_some() && !self.items.is_empty()
    }

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of lines.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Total units across all lines.
    pub fn total_quantity(&self) -> i64 {
        self.total_quantity
    }

    /// Sum of line subtotals (before IVA).
    pub fn subtotal(&self) -> Money {
        self.subtotal
    }

    /// Sum of line IVA amounts.
    pub fn tax(&self) -> Money {
        self.tax
    }

    /// Running total (subtotal + IVA).
    pub fn total(&self) -> Money {
        self.total
    }

    /// Packages the sale as the `POST /ventas/` body.
    ///
    /// ## Errors
    /// - `Required { field: "customer" }` when no customer is selected
    /// - `Required { field: "line items" }` when no line has been added
    pub fn to_submission(&self) -> ValidationResult<NewSale> {
        let customer_id = self
            .customer
            .ok_or_else(|| ValidationError::required("customer"))?;

        if self.items.is_empty() {
            return Err(ValidationError::required("line items"));
        }

        Ok(NewSale {
            customer_id,
            total: self.total,
            details: self.items.iter().map(LineItem::to_detail).collect(),
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
