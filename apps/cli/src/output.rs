//! # Table Output
//!
//! Renders reference data, sale history and the in-progress sale as
//! terminal tables. Every renderer returns a `String` so commands decide
//! where it goes.

use std::ops::Range;
use tabled::builder::Builder;
use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Style};
use ventas_core::history::SaleSummary;
use ventas_core::{Catalog, Customer, Product, Sale, SaleRecord};

const DATE_FORMAT: &str = "%Y-%m-%d %H:%M";

fn render(builder: Builder, money_columns: Option<Range<usize>>) -> String {
    let mut table = builder.build();
    table.with(Style::modern_rounded());
    if let Some(columns) = money_columns {
        table.modify(Columns::new(columns), Alignment::right());
    }
    table.to_string()
}

// =============================================================================
// Reference Data
// =============================================================================

pub fn products_table(products: &[Product]) -> String {
    let mut builder = Builder::default();
    builder.push_record(["ID", "Code", "Name", "Price", "IVA"]);

    for p in products {
        let iva = if p.taxed {
            p.tax_rate.to_string()
        } else {
            "exempt".to_string()
        };
        builder.push_record([
            p.id.to_string(),
            p.code.clone(),
            p.name.clone(),
            p.price.to_string(),
            iva,
        ]);
    }

    render(builder, Some(3..4))
}

pub fn customers_table(customers: &[Customer]) -> String {
    let mut builder = Builder::default();
    builder.push_record(["ID", "Cédula", "Name", "Phone", "Email"]);

    for c in customers {
        builder.push_record([
            c.id.to_string(),
            c.cedula.clone(),
            c.name.clone(),
            c.phone.clone(),
            c.email.clone(),
        ]);
    }

    render(builder, None)
}

pub fn customer_detail(customer: &Customer) -> String {
    let mut builder = Builder::default();
    builder.push_record(["ID".to_string(), customer.id.to_string()]);
    builder.push_record(["Cédula".to_string(), customer.cedula.clone()]);
    builder.push_record(["Name".to_string(), customer.name.clone()]);
    builder.push_record(["Address".to_string(), customer.address.clone()]);
    builder.push_record(["Phone".to_string(), customer.phone.clone()]);
    builder.push_record(["Email".to_string(), customer.email.clone()]);
    render(builder, None)
}

// =============================================================================
// Sale History
// =============================================================================

pub fn sales_table(rows: &[SaleSummary]) -> String {
    let mut builder = Builder::default();
    builder.push_record(["ID", "Date (UTC)", "Customer", "Lines", "Total"]);

    for row in rows {
        builder.push_record([
            row.id.to_string(),
            row.created_at.format(DATE_FORMAT).to_string(),
            row.customer_name.clone(),
            row.line_count.to_string(),
            row.total.to_string(),
        ]);
    }

    render(builder, Some(3..5))
}

/// Header plus one row per detail line of a stored sale.
pub fn sale_detail(record: &SaleRecord, customer_name: &str, catalog: &Catalog) -> String {
    let header = format!(
        "Sale #{}  {}  {}\n",
        record.id,
        record.created_at.format(DATE_FORMAT),
        customer_name
    );

    let mut builder = Builder::default();
    builder.push_record(["Product", "Qty", "Unit price", "Subtotal", "IVA", "Line total"]);

    for line in &record.details {
        builder.push_record([
            catalog.name_of(line.product_id).to_string(),
            line.quantity.to_string(),
            line.display_unit_price().to_string(),
            line.subtotal.to_string(),
            line.tax.to_string(),
            line.line_total().to_string(),
        ]);
    }
    builder.push_record([
        "Total".to_string(),
        String::new(),
        String::new(),
        String::new(),
        String::new(),
        record.total.to_string(),
    ]);

    format!("{}{}", header, render(builder, Some(1..6)))
}

// =============================================================================
// In-Progress Sale
// =============================================================================

/// Lines of the sale being composed, with subtotal, IVA and total rows.
pub fn sale_lines(sale: &Sale, customer_name: Option<&str>) -> String {
    let header = format!("Customer: {}\n", customer_name.unwrap_or("(none)"));

    if sale.is_empty() {
        return format!("{}No lines yet.", header);
    }

    let mut builder = Builder::default();
    builder.push_record(["#", "Product", "Qty", "Unit price", "Subtotal", "IVA", "Line total"]);

    for (idx, line) in sale.items().iter().enumerate() {
        builder.push_record([
            (idx + 1).to_string(),
            line.product_name().to_string(),
            line.quantity().to_string(),
            line.unit_price().to_string(),
            line.subtotal().to_string(),
            line.tax().to_string(),
            line.line_total().to_string(),
        ]);
    }

    let summary = format!(
        "Subtotal: {}\nIVA:      {}\nTotal:    {}",
        sale.subtotal(),
        sale.tax(),
        sale.total()
    );

    format!("{}{}\n{}", header, render(builder, Some(2..7)), summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ventas_core::{LineItem, Money, TaxRate};

    fn acetaminofen() -> Product {
        Product {
            id: 5,
            code: "ACET-500".to_string(),
            name: "Acetaminofen".to_string(),
            price: Money::from_pesos(1000),
            taxed: true,
            tax_rate: TaxRate::from_bps(1900),
        }
    }

    #[test]
    fn test_products_table() {
        let mut water = acetaminofen();
        water.id = 6;
        water.name = "Agua".to_string();
        water.taxed = false;

        let out = products_table(&[acetaminofen(), water]);
        assert!(out.contains("Acetaminofen"));
        assert!(out.contains("$1.000"));
        assert!(out.contains("19%"));
        assert!(out.contains("exempt"));
    }

    #[test]
    fn test_sale_lines_totals() {
        let sale = Sale::new().append(LineItem::build(&acetaminofen(), 3).unwrap()).unwrap();
        let out = sale_lines(&sale, Some("Ana"));
        assert!(out.starts_with("Customer: Ana"));
        assert!(out.contains("$3.000"));
        assert!(out.contains("IVA:      $570"));
        assert!(out.contains("Total:    $3.570"));
    }

    #[test]
    fn test_empty_sale_lines() {
        let out = sale_lines(&Sale::new(), None);
        assert!(out.contains("(none)"));
        assert!(out.contains("No lines yet."));
    }
}
