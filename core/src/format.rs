use alloc::format;
use alloc::string::{String, ToString};

use crate::Amount;

/// Renders amounts of a thousand or more as fractional thousands (`2500` becomes `2.5k`).
///
/// Amounts are whole currency units, fractions only appear after dividing by a thousand.
pub fn format_price(amount: Amount) -> String {
    if amount >= 1000 {
        format!("{}k", f64::from(amount) / 1000.0)
    } else {
        amount.to_string()
    }
}
