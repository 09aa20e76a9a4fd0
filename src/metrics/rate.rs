/// Round half away from zero to two decimal places.
pub fn round_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// `part / total` as a percentage with two decimals; 0.0 for an empty total.
pub fn percentage(part: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }

    #[allow(clippy::cast_precision_loss)]
    let ratio = part as f64 / total as f64;
    round_hundredths(ratio * 100.0)
}
