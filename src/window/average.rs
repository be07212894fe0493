//! Window average computation

/// Arithmetic mean rounded to 2 decimal places, 0.0 for no values
///
/// The sum is accumulated in `i128` so large entries cannot overflow.
pub fn rounded_mean<I>(values: I) -> f64
where
    I: IntoIterator<Item = i64>,
{
    let (sum, count) = values
        .into_iter()
        .fold((0i128, 0usize), |(sum, count), v| (sum + v as i128, count + 1));

    if count == 0 {
        return 0.0;
    }

    round_2dp(sum as f64 / count as f64)
}

// Rounds the exact binary value of `value` through its decimal expansion,
// ties to even. Scaling by 100 first would round values such as 1.115
// (stored just below the tie) the wrong way.
fn round_2dp(value: f64) -> f64 {
    format!("{:.2}", value).parse().unwrap_or(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_is_zero() {
        assert_eq!(rounded_mean(Vec::new()), 0.0);
    }

    #[test]
    fn test_known_averages() {
        assert_eq!(rounded_mean(vec![2, 3, 5, 7]), 4.25);
        assert_eq!(rounded_mean(vec![2, 3, 5, 7, 1]), 3.6);
        assert_eq!(rounded_mean(vec![1, 2]), 1.5);
        assert_eq!(rounded_mean(vec![-3, -4]), -3.5);
    }

    #[test]
    fn test_rounds_to_two_places() {
        // 10 / 3 = 3.333...
        assert_eq!(rounded_mean(vec![1, 2, 7]), 3.33);
        // 20 / 3 = 6.666...
        assert_eq!(rounded_mean(vec![6, 7, 7]), 6.67);
    }

    #[test]
    fn test_exact_half_rounds_to_even() {
        // 1 / 8 = 0.125
        assert_eq!(rounded_mean(vec![1, 0, 0, 0, 0, 0, 0, 0]), 0.12);
        // 3 / 8 = 0.375
        assert_eq!(rounded_mean(vec![3, 0, 0, 0, 0, 0, 0, 0]), 0.38);
    }

    #[test]
    fn test_mean_just_below_tie_rounds_down() {
        // 223 / 200 = 1.115, stored as 1.11499999...
        let mut values = vec![1i64; 200];
        values[..23].fill(2);
        assert_eq!(rounded_mean(values), 1.11);

        // 2.675 is stored as 2.67499999...
        assert_eq!(round_2dp(2.675), 2.67);
    }

    #[test]
    fn test_large_values_do_not_overflow() {
        let avg = rounded_mean(vec![i64::MAX, i64::MAX]);
        assert_eq!(avg, i64::MAX as f64);
    }
}
