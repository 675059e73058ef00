use time::Date;

use crate::month::{MonthRange, first_of_month};

/// A span of activity for one entity, read from a silver record.
#[derive(Clone, Debug, PartialEq)]
pub struct ActivityInterval<V = ()> {
	pub entity_id: String,
	pub start: Option<Date>,
	/// `None` means open-ended.
	pub end: Option<Date>,
	pub value: V,
}

/// One entity active in one month. `month` is always the first day of the month.
#[derive(Clone, Debug, PartialEq)]
pub struct MonthlyActivity<V = ()> {
	pub entity_id: String,
	pub month: Date,
	pub value: V,
}

/// Expands each interval into one record per calendar month from the start month to the end month
/// inclusive.
///
/// Intervals without a start date produce nothing. An open-ended interval produces its start month
/// only, so an ongoing subscription counts as active for a single month. Every gold metric built on
/// this expansion shares that limitation.
pub fn expand_monthly<V, I>(intervals: I) -> impl Iterator<Item = MonthlyActivity<V>>
where
	I: IntoIterator<Item = ActivityInterval<V>>,
	V: Clone,
{
	intervals.into_iter().flat_map(|interval| {
		let ActivityInterval { entity_id, start, end, value } = interval;
		let months = start
			.map(|start| {
				let first = first_of_month(start);
				let last = end.map(first_of_month).unwrap_or(first);

				MonthRange::new(first, last)
			})
			.into_iter()
			.flatten();

		months.map(move |month| MonthlyActivity {
			entity_id: entity_id.clone(),
			month,
			value: value.clone(),
		})
	})
}
