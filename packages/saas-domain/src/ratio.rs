/// Divides two measures. A zero denominator or a non-finite result yields `None`, which is stored
/// as SQL NULL; NaN never reaches a gold table.
pub fn ratio(numerator: f64, denominator: f64) -> Option<f64> {
	if denominator == 0.0 {
		return None;
	}

	let value = numerator / denominator;

	value.is_finite().then_some(value)
}
