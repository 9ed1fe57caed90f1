/// 三值統計計算，未知的運算回退為 a + b - c
pub fn calculate(a: f64, b: f64, c: f64, operation: &str) -> f64 {
    let mut result = match operation {
        "sum" => a + b + c,
        "product" => a * b * c,
        "average" => (a + b + c) / 3.0,
        "min" => a.min(b).min(c),
        "max" => a.max(b).max(c),
        "sqrt_sum" => a.sqrt() + b.sqrt() + c.sqrt(),
        "log_sum" => {
            if a > 0.0 && b > 0.0 && c > 0.0 {
                a.ln() + b.ln() + c.ln()
            } else {
                -1.0
            }
        }
        "weighted_average" => a * 0.3 + b * 0.4 + c * 0.3,
        "geometric_mean" => {
            if a > 0.0 && b > 0.0 && c > 0.0 {
                (a * b * c).powf(1.0 / 3.0)
            } else {
                -1.0
            }
        }
        "harmonic_mean" => {
            if a != 0.0 && b != 0.0 && c != 0.0 {
                3.0 / ((1.0 / a) + (1.0 / b) + (1.0 / c))
            } else {
                -1.0
            }
        }
        _ => {
            tracing::warn!("Unknown operation '{}', falling back to a + b - c", operation);
            a + b - c
        }
    };

    // 大於 1000 換算為千位，否則負值取絕對值
    if result > 1000.0 {
        result /= 1000.0;
    } else if result < 0.0 {
        result = result.abs();
    }

    (result * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sum_and_product() {
        assert_eq!(calculate(1.0, 2.0, 3.0, "sum"), 6.0);
        assert_eq!(calculate(2.0, 3.0, 4.0, "product"), 24.0);
    }

    #[test]
    fn test_average_variants() {
        assert_eq!(calculate(1.0, 2.0, 3.0, "average"), 2.0);
        assert_eq!(calculate(10.0, 20.0, 30.0, "weighted_average"), 20.0);
        assert_eq!(calculate(1.0, 2.0, 4.0, "harmonic_mean"), 1.71);
    }

    #[test]
    fn test_min_and_max() {
        assert_eq!(calculate(5.0, 2.0, 8.0, "min"), 2.0);
        assert_eq!(calculate(5.0, 2.0, 8.0, "max"), 8.0);
    }

    #[test]
    fn test_sqrt_sum() {
        assert_eq!(calculate(4.0, 9.0, 16.0, "sqrt_sum"), 9.0);
    }

    #[test]
    fn test_geometric_mean() {
        assert_eq!(calculate(2.0, 4.0, 8.0, "geometric_mean"), 4.0);
    }

    #[test]
    fn test_guarded_operations_report_negative_one_as_one() {
        // guard value -1 then flows through abs()
        assert_eq!(calculate(-1.0, 2.0, 3.0, "log_sum"), 1.0);
        assert_eq!(calculate(0.0, 2.0, 3.0, "geometric_mean"), 1.0);
        assert_eq!(calculate(0.0, 2.0, 3.0, "harmonic_mean"), 1.0);
    }

    #[test]
    fn test_large_results_scale_to_thousands() {
        assert_eq!(calculate(10.0, 20.0, 30.0, "product"), 6.0);
        assert_eq!(calculate(500.0, 400.0, 200.0, "sum"), 1.1);
    }

    #[test]
    fn test_negative_results_become_absolute() {
        assert_eq!(calculate(1.0, 1.0, -12.0, "sum"), 10.0);
    }

    #[test]
    fn test_unknown_operation_falls_back() {
        assert_eq!(calculate(10.0, 5.0, 3.0, "bogus"), 12.0);
    }

    #[test]
    fn test_rounding_to_two_decimals() {
        assert_eq!(calculate(1.0, 1.0, 1.0, "average"), 1.0);
        assert_eq!(calculate(1.0, 2.0, 2.0, "average"), 1.67);
    }
}
