use std::collections::{BTreeMap, HashSet};

use time::Date;

use crate::interval::MonthlyActivity;

#[derive(Clone, Debug, PartialEq)]
pub struct MrrMonthly {
	pub month: Date,
	pub mrr: f64,
	pub active_subscriptions: i64,
}

#[derive(Default)]
struct MonthTotals {
	mrr: f64,
	subscriptions: HashSet<String>,
}

/// Sums monthly amounts and counts distinct subscriptions per month.
///
/// Records without an amount still count as active subscriptions but add nothing to revenue.
/// Months with no records are absent from the output.
pub fn build_mrr_monthly<I>(activity: I) -> Vec<MrrMonthly>
where
	I: IntoIterator<Item = MonthlyActivity<Option<f64>>>,
{
	let mut totals: BTreeMap<Date, MonthTotals> = BTreeMap::new();

	for record in activity {
		let month = totals.entry(record.month).or_default();

		if let Some(amount) = record.value {
			month.mrr += amount;
		}

		month.subscriptions.insert(record.entity_id);
	}

	totals
		.into_iter()
		.map(|(month, totals)| MrrMonthly {
			month,
			mrr: totals.mrr,
			active_subscriptions: totals.subscriptions.len() as i64,
		})
		.collect()
}
