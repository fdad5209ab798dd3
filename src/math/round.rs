//! Fixed-precision rounding for reported figures.

/// Decimal places used for money and quantity outputs.
pub const MONEY_DECIMALS: i32 = 2;

/// Round half away from zero to `decimals` places.
///
/// Negative zero is normalized to `0.0` so serialized output is stable.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10_f64.powi(decimals);
    let rounded = (value * scale).round() / scale;
    if rounded == 0.0 { 0.0 } else { rounded }
}

/// Round to [`MONEY_DECIMALS`].
pub fn round_money(value: f64) -> f64 {
    round_to(value, MONEY_DECIMALS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_to_two_places() {
        assert_eq!(round_money(12.345_6), 12.35);
        assert_eq!(round_money(-1.004), -1.0);
        assert_eq!(round_money(7.0), 7.0);
    }

    #[test]
    fn negative_zero_is_normalized() {
        let v = round_money(-0.001);
        assert_eq!(v, 0.0);
        assert!(v.is_sign_positive());
    }
}
