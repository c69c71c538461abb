//! # Domain Types
//!
//! Reference data and sale records exchanged with the backend.
//!
//! ## Type Map
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │    Customer     │   │   SaleRecord    │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │   │  id             │   │  id             │       │
//! │  │  codigo         │   │  cedula         │   │  cliente (FK)   │       │
//! │  │  nombre         │   │  nombre         │   │  fecha          │       │
//! │  │  valor_venta    │   │  email ...      │   │  total          │       │
//! │  │  maneja_iva     │   └─────────────────┘   │  detalles[]     │       │
//! │  │  porcentaje_iva │                         └─────────────────┘       │
//! │  └─────────────────┘                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Rust field names are English; `#[serde(rename)]` maps them to the
//! backend's Spanish JSON keys.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use crate::money::{parse_scaled, Money};

/// Backend identifier of a product.
pub type ProductId = i64;

/// Backend identifier of a customer.
pub type CustomerId = i64;

/// Backend identifier of a stored sale.
pub type SaleId = i64;

// =============================================================================
// Tax Rate
// =============================================================================

/// IVA rate represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000, so 19% IVA is 1900 bps and the tax on
/// an amount is integer math. On the wire the rate is a fraction
/// (`"0.19"`), encoded and decoded by the serde impls below.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct TaxRate(u32);

impl TaxRate {
    /// Creates a tax rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        TaxRate(bps)
    }

    /// Parses a fraction (`"0.19"`) into a rate.
    ///
    /// ## Example
    /// ```rust
    /// use ventas_core::types::TaxRate;
    ///
    /// assert_eq!(TaxRate::parse_fraction("0.19"), Some(TaxRate::from_bps(1900)));
    /// assert_eq!(TaxRate::parse_fraction("0.0825"), Some(TaxRate::from_bps(825)));
    /// assert_eq!(TaxRate::parse_fraction("-0.19"), None);
    /// ```
    pub fn parse_fraction(input: &str) -> Option<Self> {
        let bps = parse_scaled(input, 4)?;
        u32::try_from(bps).ok().map(TaxRate)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Zero tax rate.
    #[inline]
    pub const fn zero() -> Self {
        TaxRate(0)
    }

    /// Checks if tax rate is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Formats the rate as the backend's fraction (`"0.1900"`).
    pub fn to_fraction_string(&self) -> String {
        format!("{}.{:04}", self.0 / 10_000, self.0 % 10_000)
    }
}

/// Shows the rate as a percentage (`19%`, `8.25%`).
impl fmt::Display for TaxRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let whole = self.0 / 100;
        let fraction = self.0 % 100;
        if fraction == 0 {
            write!(f, "{}%", whole)
        } else if fraction % 10 == 0 {
            write!(f, "{}.{}%", whole, fraction / 10)
        } else {
            write!(f, "{}.{:02}%", whole, fraction)
        }
    }
}

impl Serialize for TaxRate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_fraction_string())
    }
}

impl<'de> Deserialize<'de> for TaxRate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(TaxRateVisitor)
    }
}

struct TaxRateVisitor;

impl<'de> Visitor<'de> for TaxRateVisitor {
    type Value = TaxRate;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a non-negative tax fraction such as 0.19")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<TaxRate, E> {
        TaxRate::parse_fraction(v).ok_or_else(|| E::custom(format!("invalid tax fraction '{}'", v)))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<TaxRate, E> {
        self.visit_str(&v.to_string())
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<TaxRate, E> {
        self.visit_str(&v.to_string())
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<TaxRate, E> {
        if !v.is_finite() {
            return Err(E::custom("tax fraction must be finite"));
        }
        self.visit_str(&v.to_string())
    }

    // Untaxed products may carry `null`
    fn visit_unit<E: de::Error>(self) -> Result<TaxRate, E> {
        Ok(TaxRate::zero())
    }

    fn visit_none<E: de::Error>(self) -> Result<TaxRate, E> {
        Ok(TaxRate::zero())
    }
}

// =============================================================================
// Product
// =============================================================================

/// A product available for sale. Read-only reference data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,

    /// Business code shown in listings.
    #[serde(rename = "codigo", default)]
    pub code: String,

    #[serde(rename = "nombre")]
    pub name: String,

    /// Unit sale price.
    #[serde(rename = "valor_venta")]
    pub price: Money,

    /// Whether IVA applies to this product.
    #[serde(rename = "maneja_iva", default)]
    pub taxed: bool,

    #[serde(rename = "porcentaje_iva", default)]
    pub tax_rate: TaxRate,
}

impl Product {
    /// Returns the rate that actually applies: zero for untaxed products.
    #[inline]
    pub fn effective_tax_rate(&self) -> TaxRate {
        if self.taxed {
            self.tax_rate
        } else {
            TaxRate::zero()
        }
    }
}

// =============================================================================
// Customer
// =============================================================================

/// A customer (cliente). Read-only reference data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub id: CustomerId,

    /// National identity number.
    #[serde(default)]
    pub cedula: String,

    #[serde(rename = "nombre")]
    pub name: String,

    #[serde(rename = "direccion", default)]
    pub address: String,

    #[serde(rename = "telefono", default)]
    pub phone: String,

    #[serde(default)]
    pub email: String,
}

// =============================================================================
// Stored Sales
// =============================================================================

/// A detail line of a stored sale, as returned by `GET /ventas/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleDetail {
    #[serde(rename = "producto")]
    pub product_id: ProductId,

    #[serde(rename = "cantidad")]
    pub quantity: i64,

    /// Not every backend version echoes the unit price back.
    #[serde(rename = "valor_unitario", default, skip_serializing_if = "Option::is_none")]
    pub unit_price: Option<Money>,

    /// Line value before IVA.
    #[serde(rename = "valor_producto")]
    pub subtotal: Money,

    #[serde(rename = "iva_calculado")]
    pub tax: Money,
}

impl SaleDetail {
    /// Unit price for display. Falls back to `subtotal / quantity` when
    /// the backend did not return one.
    pub fn display_unit_price(&self) -> Money {
        self.unit_price
            .unwrap_or_else(|| self.subtotal.per_unit(self.quantity))
    }

    /// Line total including IVA.
    #[inline]
    pub fn line_total(&self) -> Money {
        self.subtotal + self.tax
    }
}

/// The backend's canonical stored sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleRecord {
    pub id: SaleId,

    #[serde(rename = "cliente")]
    pub customer_id: CustomerId,

    /// Assigned by the backend on creation.
    #[serde(rename = "fecha", deserialize_with = "deserialize_timestamp")]
    pub created_at: DateTime<Utc>,

    pub total: Money,

    #[serde(rename = "detalles", default)]
    pub details: Vec<SaleDetail>,
}

/// Accepts RFC 3339 timestamps with any offset, and naive timestamps
/// (backends running without time zone support), which are read as UTC.
fn deserialize_timestamp<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
    let raw = String::deserialize(deserializer)?;
    if let Ok(ts) = DateTime::parse_from_rfc3339(&raw) {
        return Ok(ts.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(&raw, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|naive| naive.and_utc())
        .map_err(|_| de::Error::custom(format!("invalid sale timestamp '{}'", raw)))
}

// =============================================================================
// Sale Submission
// =============================================================================

/// Body of `POST /ventas/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewSale {
    #[serde(rename = "cliente")]
    pub customer_id: CustomerId,

    pub total: Money,

    #[serde(rename = "detalles")]
    pub details: Vec<NewSaleDetail>,
}

/// One line of a [`NewSale`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewSaleDetail {
    #[serde(rename = "producto")]
    pub product_id: ProductId,

    #[serde(rename = "cantidad")]
    pub quantity: i64,

    #[serde(rename = "valor_unitario")]
    pub unit_price: Money,

    #[serde(rename = "valor_producto")]
    pub subtotal: Money,

    #[serde(rename = "iva_calculado")]
    pub tax: Money,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_tax_rate_display() {
        assert_eq!(TaxRate::from_bps(1900).to_string(), "19%");
        assert_eq!(TaxRate::from_bps(825).to_string(), "8.25%");
        assert_eq!(TaxRate::from_bps(550).to_string(), "5.5%");
        assert_eq!(TaxRate::zero().to_string(), "0%");
    }

    #[test]
    fn test_tax_rate_wire_format() {
        let rate: TaxRate = serde_json::from_value(json!("0.19")).unwrap();
        assert_eq!(rate.bps(), 1900);
        let rate: TaxRate = serde_json::from_value(json!(0.19)).unwrap();
        assert_eq!(rate.bps(), 1900);
        let rate: TaxRate = serde_json::from_value(json!(0)).unwrap();
        assert!(rate.is_zero());
        assert_eq!(TaxRate::from_bps(1900).to_fraction_string(), "0.1900");
    }

    #[test]
    fn test_product_from_backend_json() {
        let product: Product = serde_json::from_value(json!({
            "id": 5,
            "codigo": "ACET-500",
            "nombre": "Acetaminofen 500mg",
            "valor_venta": "1000.00",
            "maneja_iva": true,
            "porcentaje_iva": "0.19"
        }))
        .unwrap();

        assert_eq!(product.id, 5);
        assert_eq!(product.price, Money::from_pesos(1000));
        assert_eq!(product.effective_tax_rate(), TaxRate::from_bps(1900));
    }

    #[test]
    fn test_untaxed_product_ignores_rate() {
        let product: Product = serde_json::from_value(json!({
            "id": 6,
            "codigo": "AGUA",
            "nombre": "Agua 600ml",
            "valor_venta": 500,
            "maneja_iva": false,
            "porcentaje_iva": "0.19"
        }))
        .unwrap();

        assert!(product.effective_tax_rate().is_zero());
    }

    #[test]
    fn test_sale_record_timestamps() {
        let aware: SaleRecord = serde_json::from_value(json!({
            "id": 1,
            "cliente": 3,
            "fecha": "2024-05-01T22:30:00-05:00",
            "total": "3570.00",
            "detalles": []
        }))
        .unwrap();
        assert_eq!(aware.created_at.to_rfc3339(), "2024-05-02T03:30:00+00:00");

        let naive: SaleRecord = serde_json::from_value(json!({
            "id": 2,
            "cliente": 3,
            "fecha": "2024-05-01T10:00:00.123456",
            "total": 1000
        }))
        .unwrap();
        assert_eq!(naive.created_at.date_naive().to_string(), "2024-05-01");
        assert!(naive.details.is_empty());
    }

    #[test]
    fn test_detail_unit_price_fallback() {
        let detail = SaleDetail {
            product_id: 5,
            quantity: 3,
            unit_price: None,
            subtotal: Money::from_pesos(3000),
            tax: Money::from_pesos(570),
        };
        assert_eq!(detail.display_unit_price(), Money::from_pesos(1000));
        assert_eq!(detail.line_total(), Money::from_pesos(3570));
    }

    #[test]
    fn test_new_sale_wire_shape() {
        let sale = NewSale {
            customer_id: 3,
            total: Money::from_pesos(3570),
            details: vec![NewSaleDetail {
                product_id: 5,
                quantity: 3,
                unit_price: Money::from_pesos(1000),
                subtotal: Money::from_pesos(3000),
                tax: Money::from_pesos(570),
            }],
        };

        assert_eq!(
            serde_json::to_value(&sale).unwrap(),
            json!({
                "cliente": 3,
                "total": "3570.00",
                "detalles": [{
                    "producto": 5,
                    "cantidad": 3,
                    "valor_unitario": "1000.00",
                    "valor_producto": "3000.00",
                    "iva_calculado": "570.00"
                }]
            })
        );
    }
}
