//! Price factor grids.

/// `steps` evenly spaced factors between `min` and `max`, inclusive.
///
/// - `steps == 0` yields nothing
/// - `steps == 1` yields `[1.0]` (the base price only)
/// - reversed bounds are swapped
pub fn price_factors(min: f64, max: f64, steps: usize) -> Vec<f64> {
    match steps {
        0 => Vec::new(),
        1 => vec![1.0],
        _ => {
            let (lo, hi) = if min <= max { (min, max) } else { (max, min) };
            let step = (hi - lo) / (steps as f64 - 1.0);
            (0..steps)
                .map(|i| if i + 1 == steps { hi } else { lo + step * i as f64 })
                .collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn includes_endpoints() {
        assert_eq!(price_factors(0.5, 2.0, 3), vec![0.5, 1.25, 2.0]);
        let v = price_factors(0.5, 2.0, 5);
        assert_eq!(v.len(), 5);
        assert_eq!(v[0], 0.5);
        assert_eq!(v[4], 2.0);
        assert!((v[2] - 1.25).abs() < 1e-12);
    }

    #[test]
    fn degenerate_step_counts() {
        assert!(price_factors(0.5, 2.0, 0).is_empty());
        assert_eq!(price_factors(0.5, 2.0, 1), vec![1.0]);
    }

    #[test]
    fn reversed_bounds_are_swapped() {
        assert_eq!(price_factors(2.0, 0.5, 3), vec![0.5, 1.25, 2.0]);
    }
}
