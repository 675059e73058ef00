use sqlx::{Postgres, query_builder::Separated};

use saas_domain::{ActiveCustomersMonthly, ChurnMonthly, DashboardRow, DauMauMonthly, MrrMonthly};

use crate::{
	Result,
	db::Db,
	models::{
		ActiveCustomersMonthlyRow, ChurnMonthlyRow, DashboardMonthlyRow, DauMauMonthlyRow,
		MrrMonthlyRow,
	},
	table::TableRow,
};

impl TableRow for MrrMonthly {
	const COLUMNS: &'static [(&'static str, &'static str)] = &[
		("month", "DATE PRIMARY KEY"),
		("mrr", "DOUBLE PRECISION NOT NULL"),
		("active_subscriptions", "BIGINT NOT NULL"),
	];
	const TABLE: &'static str = "gold.mrr_monthly";

	fn bind_columns<'args>(&self, row: &mut Separated<'_, 'args, Postgres, &'static str>) {
		row.push_bind(self.month).push_bind(self.mrr).push_bind(self.active_subscriptions);
	}
}

impl TableRow for ChurnMonthly {
	const COLUMNS: &'static [(&'static str, &'static str)] = &[
		("month", "DATE PRIMARY KEY"),
		("active_customers", "BIGINT NOT NULL"),
		("churned_customers", "BIGINT NOT NULL"),
		("churn_rate", "DOUBLE PRECISION"),
	];
	const CONSTRAINTS: &'static [&'static str] =
		&["CHECK (churn_rate IS NULL OR churn_rate BETWEEN 0 AND 1)"];
	const TABLE: &'static str = "gold.customer_churn_monthly";

	fn bind_columns<'args>(&self, row: &mut Separated<'_, 'args, Postgres, &'static str>) {
		row.push_bind(self.month)
			.push_bind(self.active_customers)
			.push_bind(self.churned_customers)
			.push_bind(self.churn_rate);
	}
}

impl TableRow for DauMauMonthly {
	const COLUMNS: &'static [(&'static str, &'static str)] = &[
		("month", "DATE PRIMARY KEY"),
		("dau", "DOUBLE PRECISION NOT NULL"),
		("mau", "BIGINT NOT NULL"),
		("dau_mau_ratio", "DOUBLE PRECISION"),
	];
	const TABLE: &'static str = "gold.dau_mau_monthly";

	fn bind_columns<'args>(&self, row: &mut Separated<'_, 'args, Postgres, &'static str>) {
		row.push_bind(self.month)
			.push_bind(self.dau)
			.push_bind(self.mau)
			.push_bind(self.dau_mau_ratio);
	}
}

impl TableRow for ActiveCustomersMonthly {
	const COLUMNS: &'static [(&'static str, &'static str)] = &[
		("month", "DATE PRIMARY KEY"),
		("active_customers", "BIGINT NOT NULL"),
		("new_customers", "BIGINT NOT NULL"),
		("churned_customers", "BIGINT NOT NULL"),
	];
	const TABLE: &'static str = "gold.active_customers_monthly";

	fn bind_columns<'args>(&self, row: &mut Separated<'_, 'args, Postgres, &'static str>) {
		row.push_bind(self.month)
			.push_bind(self.active_customers)
			.push_bind(self.new_customers)
			.push_bind(self.churned_customers);
	}
}

impl TableRow for DashboardRow {
	const COLUMNS: &'static [(&'static str, &'static str)] = &[
		("month", "DATE PRIMARY KEY"),
		("mrr", "DOUBLE PRECISION NOT NULL"),
		("active_customers", "BIGINT"),
		("churn_rate", "DOUBLE PRECISION"),
		("dau_mau_ratio", "DOUBLE PRECISION"),
	];
	const TABLE: &'static str = "gold.dashboard_monthly";

	fn bind_columns<'args>(&self, row: &mut Separated<'_, 'args, Postgres, &'static str>) {
		row.push_bind(self.month)
			.push_bind(self.mrr)
			.push_bind(self.active_customers)
			.push_bind(self.churn_rate)
			.push_bind(self.dau_mau_ratio);
	}
}

pub async fn read_mrr_monthly(db: &Db) -> Result<Vec<MrrMonthly>> {
	let rows = sqlx::query_as::<_, MrrMonthlyRow>(
		"SELECT month, mrr, active_subscriptions FROM gold.mrr_monthly ORDER BY month",
	)
	.fetch_all(&db.pool)
	.await?;

	Ok(rows.into_iter().map(Into::into).collect())
}

pub async fn read_customer_churn_monthly(db: &Db) -> Result<Vec<ChurnMonthly>> {
	let rows = sqlx::query_as::<_, ChurnMonthlyRow>(
		"\
SELECT month, active_customers, churned_customers, churn_rate
FROM gold.customer_churn_monthly
ORDER BY month",
	)
	.fetch_all(&db.pool)
	.await?;

	Ok(rows.into_iter().map(Into::into).collect())
}

pub async fn read_dau_mau_monthly(db: &Db) -> Result<Vec<DauMauMonthly>> {
	let rows = sqlx::query_as::<_, DauMauMonthlyRow>(
		"SELECT month, dau, mau, dau_mau_ratio FROM gold.dau_mau_monthly ORDER BY month",
	)
	.fetch_all(&db.pool)
	.await?;

	Ok(rows.into_iter().map(Into::into).collect())
}

pub async fn read_active_customers_monthly(db: &Db) -> Result<Vec<ActiveCustomersMonthly>> {
	let rows = sqlx::query_as::<_, ActiveCustomersMonthlyRow>(
		"\
SELECT month, active_customers, new_customers, churned_customers
FROM gold.active_customers_monthly
ORDER BY month",
	)
	.fetch_all(&db.pool)
	.await?;

	Ok(rows.into_iter().map(Into::into).collect())
}

pub async fn read_dashboard_monthly(db: &Db) -> Result<Vec<DashboardRow>> {
	let rows = sqlx::query_as::<_, DashboardMonthlyRow>(
		"\
SELECT month, mrr, active_customers, churn_rate, dau_mau_ratio
FROM gold.dashboard_monthly
ORDER BY month",
	)
	.fetch_all(&db.pool)
	.await?;

	Ok(rows.into_iter().map(Into::into).collect())
}
