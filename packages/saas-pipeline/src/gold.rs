use saas_domain::{
	ActivityInterval, assemble_dashboard, build_active_customers_monthly,
	build_customer_churn_monthly, build_dau_mau_monthly, build_mrr_monthly, expand_monthly,
};
use saas_storage::{
	gold, models::SubscriptionInterval, silver,
	table::{self, TableRow},
};

use crate::{Pipeline, Result, TableRows};

impl Pipeline {
	/// Rebuilds the four metric tables, then the dashboard from what they stored.
	pub async fn run_gold(&self) -> Result<Vec<TableRows>> {
		Ok(vec![
			self.build_gold_mrr_monthly().await?,
			self.build_gold_customer_churn_monthly().await?,
			self.build_gold_dau_mau_monthly().await?,
			self.build_gold_active_customers_monthly().await?,
			self.build_gold_dashboard_monthly().await?,
		])
	}

	pub async fn build_gold_mrr_monthly(&self) -> Result<TableRows> {
		let intervals = silver::read_active_subscriptions(&self.db)
			.await?
			.into_iter()
			.filter_map(SubscriptionInterval::into_amount_interval);
		let rows = build_mrr_monthly(expand_monthly(intervals));

		self.write_gold(&rows).await
	}

	pub async fn build_gold_customer_churn_monthly(&self) -> Result<TableRows> {
		let rows = build_customer_churn_monthly(expand_monthly(self.customer_intervals().await?));

		self.write_gold(&rows).await
	}

	pub async fn build_gold_dau_mau_monthly(&self) -> Result<TableRows> {
		let rows = build_dau_mau_monthly(silver::read_qualifying_usage(&self.db).await?);

		self.write_gold(&rows).await
	}

	pub async fn build_gold_active_customers_monthly(&self) -> Result<TableRows> {
		let rows =
			build_active_customers_monthly(expand_monthly(self.customer_intervals().await?));

		self.write_gold(&rows).await
	}

	/// Must run after the four metric tables; it reads them back rather than recomputing.
	pub async fn build_gold_dashboard_monthly(&self) -> Result<TableRows> {
		let mrr = gold::read_mrr_monthly(&self.db).await?;
		let active = gold::read_active_customers_monthly(&self.db).await?;
		let churn = gold::read_customer_churn_monthly(&self.db).await?;
		let dau_mau = gold::read_dau_mau_monthly(&self.db).await?;
		let rows = assemble_dashboard(&mrr, &active, &churn, &dau_mau);

		self.write_gold(&rows).await
	}

	async fn customer_intervals(&self) -> Result<Vec<ActivityInterval>> {
		Ok(silver::read_customer_intervals(&self.db)
			.await?
			.into_iter()
			.filter_map(SubscriptionInterval::into_customer_interval)
			.collect())
	}

	async fn write_gold<R>(&self, rows: &[R]) -> Result<TableRows>
	where
		R: TableRow,
	{
		let written = table::replace_table(&self.db, rows).await?;

		Ok(TableRows::new(R::TABLE, written))
	}
}
