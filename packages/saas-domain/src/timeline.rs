use std::collections::{BTreeMap, BTreeSet};

use time::Date;

use crate::{interval::MonthlyActivity, month::next_month};

/// Active months per customer, in ascending order.
///
/// Churn is read off the timeline: a month whose successor month is absent is the customer's
/// churn month. The final month of the dataset therefore always counts as churned, since nothing
/// later exists to prove continued activity.
#[derive(Clone, Debug, Default)]
pub struct CustomerTimelines {
	by_customer: BTreeMap<String, BTreeSet<Date>>,
}
impl CustomerTimelines {
	pub fn from_activity<V, I>(activity: I) -> Self
	where
		I: IntoIterator<Item = MonthlyActivity<V>>,
	{
		let mut by_customer: BTreeMap<String, BTreeSet<Date>> = BTreeMap::new();

		for record in activity {
			by_customer.entry(record.entity_id).or_default().insert(record.month);
		}

		Self { by_customer }
	}

	pub fn customer_count(&self) -> usize {
		self.by_customer.len()
	}

	pub fn months(&self, customer_id: &str) -> Option<&BTreeSet<Date>> {
		self.by_customer.get(customer_id)
	}

	/// Distinct customers active per month.
	pub fn active_counts(&self) -> BTreeMap<Date, i64> {
		let mut counts = BTreeMap::new();

		for months in self.by_customer.values() {
			for month in months {
				*counts.entry(*month).or_insert(0) += 1;
			}
		}

		counts
	}

	/// Distinct customers per month that have no activity in the following month.
	pub fn churned_counts(&self) -> BTreeMap<Date, i64> {
		let mut counts = BTreeMap::new();

		for months in self.by_customer.values() {
			let mut timeline = months.iter().copied().peekable();

			while let Some(month) = timeline.next() {
				let continues = match (next_month(month), timeline.peek()) {
					(Some(expected), Some(following)) => expected == *following,
					_ => false,
				};

				if !continues {
					*counts.entry(month).or_insert(0) += 1;
				}
			}
		}

		counts
	}

	/// Customers per month whose earliest active month is that month.
	pub fn new_counts(&self) -> BTreeMap<Date, i64> {
		let mut counts = BTreeMap::new();

		for first in self.by_customer.values().filter_map(|months| months.first()) {
			*counts.entry(*first).or_insert(0) += 1;
		}

		counts
	}
}
