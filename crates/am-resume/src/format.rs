use crate::error::{ResumeError, ResumeResult};

/// Whole-number percentage of a fraction in [0, 1].
///
/// `0.76352` becomes `76%`; anything that rounds to zero becomes `~0%`.
/// Halves round to even.
pub fn float_to_percent(fraction: f64) -> ResumeResult<String> {
    if !(0.0..=1.0).contains(&fraction) {
        return Err(ResumeError::FractionOutOfRange(fraction));
    }

    let rounded = (fraction * 100.0).round_ties_even() as i64;
    if rounded == 0 {
        Ok(format!("~{rounded}%"))
    } else {
        Ok(format!("{rounded}%"))
    }
}

/// Shortest round-trip form of a float that always shows a fractional
/// part, so `25.0` prints as `25.0` and `33.33` as `33.33`
pub fn format_float(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e16 {
        format!("{value:.1}")
    } else {
        format!("{value}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_float_to_percent() {
        assert_eq!(float_to_percent(0.76352).unwrap(), "76%");
        assert_eq!(float_to_percent(0.01733).unwrap(), "2%");
        assert_eq!(float_to_percent(0.0002).unwrap(), "~0%");
        assert_eq!(float_to_percent(1.0).unwrap(), "100%");
        assert_eq!(float_to_percent(0.75).unwrap(), "75%");
    }

    #[test]
    fn test_float_to_percent_rejects_out_of_range() {
        assert_eq!(
            float_to_percent(1.5).unwrap_err(),
            ResumeError::FractionOutOfRange(1.5)
        );
        assert!(float_to_percent(-0.1).is_err());
    }

    #[test]
    fn test_format_float() {
        assert_eq!(format_float(25.0), "25.0");
        assert_eq!(format_float(40.0), "40.0");
        assert_eq!(format_float(33.33), "33.33");
        assert_eq!(format_float(0.5), "0.5");
        assert_eq!(format_float(100.0), "100.0");
    }
}
