//! Price Computation
//!
//! All money is integer cents. Rate math (tax, percentage coupons, shipping
//! multipliers) goes through `Decimal` and is rounded half-up back to cents;
//! floats never touch a price.

use crate::db::models::{Coupon, DiscountType};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

/// Base domestic shipping charge
pub const SHIPPING_BASE_CENTS: i64 = 500;

/// Pre-discount subtotal at which shipping becomes free
pub const FREE_SHIPPING_THRESHOLD_CENTS: i64 = 10_000;

/// Round to whole cents, midpoint away from zero
fn round_half_up(value: Decimal) -> i64 {
    value
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        // cent-scale inputs cannot overflow i64
        .unwrap_or(i64::MAX)
}

/// Tax on the discounted subtotal, rate given in basis points (800 = 8%)
pub fn tax_cents(discounted_subtotal_cents: i64, tax_rate_bp: u32) -> i64 {
    let tax = Decimal::from(discounted_subtotal_cents) * Decimal::from(tax_rate_bp)
        / Decimal::from(10_000);
    round_half_up(tax)
}

/// Shipping charge for a destination country (ISO code), computed on the
/// pre-discount subtotal. No address means no shipping charge.
pub fn shipping_cents(pre_discount_subtotal_cents: i64, country: Option<&str>) -> i64 {
    let Some(country) = country else {
        return 0;
    };
    if pre_discount_subtotal_cents >= FREE_SHIPPING_THRESHOLD_CENTS {
        return 0;
    }
    let multiplier = match country.trim().to_ascii_lowercase().as_str() {
        "us" | "usa" | "united states" => Decimal::from(1),
        "ca" | "canada" | "mx" | "mexico" => Decimal::new(15, 1),
        _ => Decimal::new(25, 1),
    };
    round_half_up(Decimal::from(SHIPPING_BASE_CENTS) * multiplier)
}

/// Discount a coupon grants against a subtotal. The minimum-order check is
/// the caller's responsibility; the result is clamped to the subtotal.
pub fn discount_cents(coupon: &Coupon, subtotal_cents: i64) -> i64 {
    let raw = match coupon.discount_type {
        DiscountType::Percentage => {
            let cut = Decimal::from(subtotal_cents) * Decimal::from(coupon.discount_value)
                / Decimal::from(100);
            round_half_up(cut)
        }
        DiscountType::Fixed => coupon.discount_value,
    };
    let capped = match coupon.max_discount_cents {
        Some(cap) => raw.min(cap),
        None => raw,
    };
    capped.clamp(0, subtotal_cents)
}
