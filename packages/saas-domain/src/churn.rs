use time::Date;

use crate::{interval::MonthlyActivity, ratio::ratio, timeline::CustomerTimelines};

#[derive(Clone, Debug, PartialEq)]
pub struct ChurnMonthly {
	pub month: Date,
	pub active_customers: i64,
	pub churned_customers: i64,
	/// `None` when no customer is active in the month.
	pub churn_rate: Option<f64>,
}

/// One row per month with at least one active customer.
pub fn build_customer_churn_monthly<V, I>(activity: I) -> Vec<ChurnMonthly>
where
	I: IntoIterator<Item = MonthlyActivity<V>>,
{
	churn_from_timelines(&CustomerTimelines::from_activity(activity))
}

pub fn churn_from_timelines(timelines: &CustomerTimelines) -> Vec<ChurnMonthly> {
	let churned = timelines.churned_counts();

	timelines
		.active_counts()
		.into_iter()
		.map(|(month, active_customers)| {
			let churned_customers = churned.get(&month).copied().unwrap_or(0);

			ChurnMonthly {
				month,
				active_customers,
				churned_customers,
				churn_rate: ratio(churned_customers as f64, active_customers as f64),
			}
		})
		.collect()
}
