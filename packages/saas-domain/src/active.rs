use time::Date;

use crate::{interval::MonthlyActivity, timeline::CustomerTimelines};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActiveCustomersMonthly {
	pub month: Date,
	pub active_customers: i64,
	pub new_customers: i64,
	pub churned_customers: i64,
}

/// Active, newly acquired and churned customer counts per active month. Months without new or
/// churned customers report zero for those counts.
pub fn build_active_customers_monthly<V, I>(activity: I) -> Vec<ActiveCustomersMonthly>
where
	I: IntoIterator<Item = MonthlyActivity<V>>,
{
	active_from_timelines(&CustomerTimelines::from_activity(activity))
}

pub fn active_from_timelines(timelines: &CustomerTimelines) -> Vec<ActiveCustomersMonthly> {
	let new = timelines.new_counts();
	let churned = timelines.churned_counts();

	timelines
		.active_counts()
		.into_iter()
		.map(|(month, active_customers)| ActiveCustomersMonthly {
			month,
			active_customers,
			new_customers: new.get(&month).copied().unwrap_or(0),
			churned_customers: churned.get(&month).copied().unwrap_or(0),
		})
		.collect()
}
