use saas_domain::{DashboardRow, DashboardSummary, summarize_dashboard};
use saas_storage::{audit, gold, table::{self, TableRow}};

use crate::{Pipeline, Result};

/// Read-only view over the dashboard table and the audit sink.
#[derive(Clone, Debug, PartialEq)]
pub struct Report {
	/// `None` until the dashboard table has at least one month.
	pub summary: Option<DashboardSummary>,
	pub rejected: Vec<RejectedCount>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RejectedCount {
	pub table_name: String,
	pub rule_name: String,
	pub rows: i64,
}

impl Pipeline {
	/// Summarizes `gold.dashboard_monthly`. A dashboard that was never built has no summary.
	pub async fn dashboard_summary(&self) -> Result<Option<DashboardSummary>> {
		if !table::table_exists(&self.db, DashboardRow::TABLE).await? {
			return Ok(None);
		}

		let rows = gold::read_dashboard_monthly(&self.db).await?;
		let window = self.cfg.report.churn_window_months as usize;

		Ok(summarize_dashboard(&rows, window))
	}

	pub async fn report(&self) -> Result<Report> {
		let summary = self.dashboard_summary().await?;
		let rejected = audit::count_rejected_rows(&self.db)
			.await?
			.into_iter()
			.map(|(table_name, rule_name, rows)| RejectedCount { table_name, rule_name, rows })
			.collect();

		Ok(Report { summary, rejected })
	}
}
