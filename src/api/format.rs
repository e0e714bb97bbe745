use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use crate::database::catalog::VariantDetail;

/// Display-ready variant table row. Display only; nothing here feeds
/// back into persistence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantRow {
    pub id: Uuid,
    pub price: String,
    pub stock: i32,
    pub color: String,
    pub size: String,
    pub discount: String,
}

/// Currency formatting for display, two fraction digits
pub fn format_price(price: Decimal) -> String {
    format!("${:.2}", price)
}

fn name_or_none(name: Option<&str>) -> String {
    name.map_or_else(|| "None".to_string(), str::to_string)
}

/// Map a persisted variant plus its joined lookups into a table row.
/// Unresolved references render as the literal "None".
pub fn variant_row(detail: &VariantDetail) -> VariantRow {
    VariantRow {
        id: detail.variant.id,
        price: format_price(detail.variant.price),
        stock: detail.variant.stock,
        color: name_or_none(detail.color.as_ref().map(|c| c.name.as_str())),
        size: name_or_none(detail.size.as_ref().map(|s| s.name.as_str())),
        discount: name_or_none(detail.discount.as_ref().map(|d| d.name.as_str())),
    }
}

/// Project a joined listing into the rows the variants table renders
pub fn variant_rows(details: &[VariantDetail]) -> Vec<VariantRow> {
    details.iter().map(variant_row).collect()
}
