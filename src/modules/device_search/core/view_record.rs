use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

/// One flattened search hit: the device, the sale it went out with and the product.
/// `returned` lives only here and is never written back.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewRecord {
    pub device_id: i64,
    pub lookup_key: String,
    pub sale_id: i64,
    pub receipt_number: Option<String>,
    pub sold_at: Option<String>,
    pub product_id: i64,
    pub product_name: String,
    pub amount: Decimal,
    pub returned: bool,
}

impl ViewRecord {
    pub fn amount_display(&self) -> String {
        format_amount(self.amount)
    }
}

/// Two decimals, half away from zero. A value that rounds to zero never shows a sign.
pub fn format_amount(amount: Decimal) -> String {
    let mut rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    if rounded.is_zero() {
        rounded.set_sign_positive(true);
    }
    format!("{rounded:.2}")
}
