//! Property tests for sale accumulation.

use proptest::prelude::*;
use ventas_core::{LineItem, Money, Product, Sale, SaleStatus, TaxRate, ValidationError};

fn product(id: i64, price_cents: i64, taxed: bool, bps: u32) -> Product {
    Product {
        id,
        code: format!("P{}", id),
        name: format!("Producto {}", id),
        price: Money::from_cents(price_cents),
        taxed,
        tax_rate: TaxRate::from_bps(bps),
    }
}

fn arb_product() -> impl Strategy<Value = Product> {
    (1i64..500, 0i64..10_000_000, any::<bool>(), 0u32..=3000)
        .prop_map(|(id, price, taxed, bps)| product(id, price, taxed, bps))
}

fn arb_lines() -> impl Strategy<Value = Vec<(Product, i64)>> {
    prop::collection::vec((arb_product(), 1i64..1000), 0..20)
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 500,
        ..ProptestConfig::default()
    })]

    /// Total always equals the sum of line subtotals plus line taxes.
    #[test]
    fn total_matches_sum_of_lines(lines in arb_lines()) {
        let mut sale = Sale::new();
        for (product, qty) in &lines {
            sale = sale.append(LineItem::build(product, *qty).unwrap()).unwrap();
        }

        let expected: Money = sale.items().iter().map(|l| l.subtotal() + l.tax()).sum();
        prop_assert_eq!(sale.total(), expected);
        prop_assert_eq!(sale.total(), sale.subtotal() + sale.tax());
        prop_assert_eq!(sale.item_count(), lines.len());
    }

    /// Appending never lowers the total.
    #[test]
    fn append_is_monotonic(lines in arb_lines()) {
        let mut sale = Sale::new();
        for (product, qty) in &lines {
            let before = sale.total();
            sale = sale.append(LineItem::build(product, *qty).unwrap()).unwrap();
            prop_assert!(sale.total() >= before);
        }
    }

    /// Lines come back in the order they were appended.
    #[test]
    fn entry_order_is_preserved(lines in arb_lines()) {
        let mut sale = Sale::new();
        for (product, qty) in &lines {
            sale = sale.append(LineItem::build(product, *qty).unwrap()).unwrap();
        }

        let got: Vec<(i64, i64)> = sale.items().iter().map(|l| (l.product_id(), l.quantity())).collect();
        let want: Vec<(i64, i64)> = lines.iter().map(|(p, q)| (p.id, *q)).collect();
        prop_assert_eq!(got, want);
    }

    /// Untaxed products never carry IVA, whatever rate they declare.
    #[test]
    fn untaxed_lines_have_zero_tax(price in 0i64..10_000_000, qty in 1i64..1000, bps in 0u32..=3000) {
        let line = LineItem::build(&product(1, price, false, bps), qty).unwrap();
        prop_assert!(line.tax().is_zero());
        prop_assert_eq!(line.subtotal(), Money::from_cents(price * qty));
    }

    /// Tax is the exact product rounded to the nearest centavo.
    #[test]
    fn tax_is_within_half_a_centavo(price in 0i64..10_000_000, qty in 1i64..1000, bps in 0u32..=3000) {
        let line = LineItem::build(&product(1, price, true, bps), qty).unwrap();
        let exact = i128::from(line.subtotal().cents()) * i128::from(bps);
        let rounded = i128::from(line.tax().cents()) * 10_000;
        prop_assert!((exact - rounded).abs() * 2 <= 10_000);
    }

    /// Reset yields an empty sale whatever came before.
    #[test]
    fn reset_always_yields_empty_sale(customer in proptest::option::of(1i64..1000), lines in arb_lines()) {
        let mut sale = Sale::new();
        if let Some(customer) = customer {
            sale.select_customer(customer).unwrap();
        }
        for (product, qty) in &lines {
            sale = sale.append(LineItem::build(product, *qty).unwrap()).unwrap();
        }

        let sale = sale.reset();
        prop_assert!(sale.total().is_zero());
        prop_assert!(sale.subtotal().is_zero());
        prop_assert!(sale.tax().is_zero());
        prop_assert_eq!(sale.total_quantity(), 0);
        prop_assert!(sale.items().is_empty());
        prop_assert!(sale.customer().is_none());
        prop_assert_eq!(sale.status(), SaleStatus::Empty);
    }

    /// Huge lines either fit or are refused with the sale untouched; the
    /// total never wraps.
    #[test]
    fn oversized_lines_never_corrupt_total(
        quantities in prop::collection::vec(1i64..=i64::MAX / 100_000, 1..6),
    ) {
        let product = product(5, 100_000, true, 1900);
        let mut sale = Sale::new();

        for qty in quantities {
            let Ok(line) = LineItem::build(&product, qty) else { continue };
            sale = match sale.append(line) {
                Ok(sale) => sale,
                Err((unchanged, err)) => {
                    let is_out_of_range = matches!(err, ValidationError::OutOfRange { .. });
                    prop_assert!(is_out_of_range);
                    unchanged
                }
            };

            prop_assert!(!sale.total().is_negative());
            prop_assert_eq!(sale.total(), sale.subtotal() + sale.tax());
        }
    }

    /// Non-positive quantities are rejected.
    #[test]
    fn non_positive_quantity_is_rejected(product in arb_product(), qty in -1000i64..=0) {
        prop_assert!(LineItem::build(&product, qty).is_err());
    }

    /// The submission body carries the sale's total and every line.
    #[test]
    fn submission_mirrors_sale(customer in 1i64..1000, lines in arb_lines()) {
        prop_assume!(!lines.is_empty());

        let mut sale = Sale::new();
        sale.select_customer(customer).unwrap();
        for (product, qty) in &lines {
            sale = sale.append(LineItem::build(product, *qty).unwrap()).unwrap();
        }

        let body = sale.to_submission().unwrap();
        prop_assert_eq!(body.customer_id, customer);
        prop_assert_eq!(body.total, sale.total());
        prop_assert_eq!(body.details.len(), lines.len());
    }
}
