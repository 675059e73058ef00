use std::collections::HashMap;

use time::Date;

use crate::{
	active::ActiveCustomersMonthly, churn::ChurnMonthly, engagement::DauMauMonthly,
	mrr::MrrMonthly,
};

#[derive(Clone, Debug, PartialEq)]
pub struct DashboardRow {
	pub month: Date,
	pub mrr: f64,
	pub active_customers: Option<i64>,
	pub churn_rate: Option<f64>,
	pub dau_mau_ratio: Option<f64>,
}

/// Headline KPIs over the assembled dashboard table.
#[derive(Clone, Debug, PartialEq)]
pub struct DashboardSummary {
	pub month: Date,
	pub mrr: f64,
	pub active_customers: Option<i64>,
	/// Mean of the non-null churn rates over the trailing window.
	pub avg_churn_rate: Option<f64>,
	/// Number of months the churn average was taken over.
	pub churn_window_months: usize,
	pub dau_mau_ratio: Option<f64>,
}

/// Left-joins the metric tables onto the MRR months.
///
/// Months that only appear in the churn, active-customer or DAU/MAU tables are dropped. A month
/// missing from a joined table yields `None` for that measure, never zero.
pub fn assemble_dashboard(
	mrr: &[MrrMonthly],
	active: &[ActiveCustomersMonthly],
	churn: &[ChurnMonthly],
	dau_mau: &[DauMauMonthly],
) -> Vec<DashboardRow> {
	let active_by_month =
		active.iter().map(|row| (row.month, row.active_customers)).collect::<HashMap<_, _>>();
	let churn_by_month = churn.iter().map(|row| (row.month, row.churn_rate)).collect::<HashMap<_, _>>();
	let ratio_by_month =
		dau_mau.iter().map(|row| (row.month, row.dau_mau_ratio)).collect::<HashMap<_, _>>();
	let mut rows = mrr
		.iter()
		.map(|row| DashboardRow {
			month: row.month,
			mrr: row.mrr,
			active_customers: active_by_month.get(&row.month).copied(),
			churn_rate: churn_by_month.get(&row.month).copied().flatten(),
			dau_mau_ratio: ratio_by_month.get(&row.month).copied().flatten(),
		})
		.collect::<Vec<_>>();

	rows.sort_by_key(|row| row.month);

	rows
}

/// Summarizes the latest month plus a trailing churn average. `None` for an empty table.
pub fn summarize_dashboard(rows: &[DashboardRow], churn_window: usize) -> Option<DashboardSummary> {
	let mut ordered = rows.iter().collect::<Vec<_>>();

	ordered.sort_by_key(|row| row.month);

	let latest = *ordered.last()?;
	let window = &ordered[ordered.len().saturating_sub(churn_window.max(1))..];
	let rates = window.iter().filter_map(|row| row.churn_rate).collect::<Vec<_>>();
	let avg_churn_rate =
		(!rates.is_empty()).then(|| rates.iter().sum::<f64>() / rates.len() as f64);

	Some(DashboardSummary {
		month: latest.month,
		mrr: latest.mrr,
		active_customers: latest.active_customers,
		avg_churn_rate,
		churn_window_months: window.len(),
		dau_mau_ratio: latest.dau_mau_ratio,
	})
}
