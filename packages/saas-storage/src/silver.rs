use std::collections::HashSet;

use sqlx::{Postgres, query_builder::Separated};

use saas_domain::{
	UsageActivity,
	silver::{SilverCustomer, SilverPayment, SilverSubscription, SilverUsageEvent, SilverUser},
};

use crate::{
	Result,
	db::Db,
	models::{SubscriptionInterval, UsageRecord},
	table::TableRow,
};

impl TableRow for SilverCustomer {
	const COLUMNS: &'static [(&'static str, &'static str)] = &[
		("customer_id", "TEXT"),
		("customer_name", "TEXT"),
		("industry", "TEXT"),
		("country", "TEXT"),
		("signup_date", "DATE"),
		("plan_type", "TEXT"),
		("signup_year", "INTEGER"),
	];
	const TABLE: &'static str = "silver.customers";

	fn bind_columns<'args>(&self, row: &mut Separated<'_, 'args, Postgres, &'static str>) {
		row.push_bind(self.customer_id.clone())
			.push_bind(self.customer_name.clone())
			.push_bind(self.industry.clone())
			.push_bind(self.country.clone())
			.push_bind(self.signup_date)
			.push_bind(self.plan_type.clone())
			.push_bind(self.signup_year);
	}
}

impl TableRow for SilverUser {
	const COLUMNS: &'static [(&'static str, &'static str)] = &[
		("user_id", "TEXT"),
		("customer_id", "TEXT"),
		("user_role", "TEXT"),
		("email", "TEXT"),
		("created_at", "TIMESTAMP"),
		("is_active", "BOOLEAN"),
		("created_year", "INTEGER"),
	];
	const TABLE: &'static str = "silver.users";

	fn bind_columns<'args>(&self, row: &mut Separated<'_, 'args, Postgres, &'static str>) {
		row.push_bind(self.user_id.clone())
			.push_bind(self.customer_id.clone())
			.push_bind(self.user_role.clone())
			.push_bind(self.email.clone())
			.push_bind(self.created_at)
			.push_bind(self.is_active)
			.push_bind(self.created_year);
	}
}

impl TableRow for SilverSubscription {
	const COLUMNS: &'static [(&'static str, &'static str)] = &[
		("subscription_id", "TEXT"),
		("customer_id", "TEXT"),
		("plan_name", "TEXT"),
		("start_date", "DATE"),
		("end_date", "DATE"),
		("monthly_amount", "DOUBLE PRECISION"),
		("subscription_status", "TEXT"),
		("is_active", "BOOLEAN NOT NULL"),
		("start_year", "INTEGER"),
	];
	const TABLE: &'static str = "silver.subscriptions";

	fn bind_columns<'args>(&self, row: &mut Separated<'_, 'args, Postgres, &'static str>) {
		row.push_bind(self.subscription_id.clone())
			.push_bind(self.customer_id.clone())
			.push_bind(self.plan_name.clone())
			.push_bind(self.start_date)
			.push_bind(self.end_date)
			.push_bind(self.monthly_amount)
			.push_bind(self.subscription_status.clone())
			.push_bind(self.is_active)
			.push_bind(self.start_year);
	}
}

impl TableRow for SilverPayment {
	const COLUMNS: &'static [(&'static str, &'static str)] = &[
		("payment_id", "TEXT"),
		("customer_id", "TEXT"),
		("subscription_id", "TEXT"),
		("payment_date", "TIMESTAMP"),
		("payment_amount", "DOUBLE PRECISION"),
		("payment_method", "TEXT"),
		("payment_status", "TEXT"),
		("payment_year", "INTEGER"),
	];
	const TABLE: &'static str = "silver.payments";

	fn bind_columns<'args>(&self, row: &mut Separated<'_, 'args, Postgres, &'static str>) {
		row.push_bind(self.payment_id.clone())
			.push_bind(self.customer_id.clone())
			.push_bind(self.subscription_id.clone())
			.push_bind(self.payment_date)
			.push_bind(self.payment_amount)
			.push_bind(self.payment_method.clone())
			.push_bind(self.payment_status.clone())
			.push_bind(self.payment_year);
	}
}

impl TableRow for SilverUsageEvent {
	const COLUMNS: &'static [(&'static str, &'static str)] = &[
		("event_id", "TEXT"),
		("user_id", "TEXT"),
		("event_type", "TEXT"),
		("event_date", "DATE"),
		("event_count", "BIGINT"),
		("event_year", "INTEGER"),
	];
	const TABLE: &'static str = "silver.usage_events";

	fn bind_columns<'args>(&self, row: &mut Separated<'_, 'args, Postgres, &'static str>) {
		row.push_bind(self.event_id.clone())
			.push_bind(self.user_id.clone())
			.push_bind(self.event_type.clone())
			.push_bind(self.event_date)
			.push_bind(self.event_count)
			.push_bind(self.event_year);
	}
}

/// Customer ids currently in `silver.customers`. Used by the orphan user rule.
pub async fn read_customer_ids(db: &Db) -> Result<HashSet<String>> {
	let ids: Vec<String> = sqlx::query_scalar(
		"SELECT DISTINCT customer_id FROM silver.customers WHERE customer_id IS NOT NULL",
	)
	.fetch_all(&db.pool)
	.await?;

	Ok(ids.into_iter().collect())
}

/// Subscriptions flagged active, in a stable order so float sums repeat exactly across runs.
pub async fn read_active_subscriptions(db: &Db) -> Result<Vec<SubscriptionInterval>> {
	let rows = sqlx::query_as::<_, SubscriptionInterval>(
		"\
SELECT subscription_id, customer_id, start_date, end_date, monthly_amount
FROM silver.subscriptions
WHERE is_active = true
ORDER BY subscription_id, start_date, end_date, monthly_amount",
	)
	.fetch_all(&db.pool)
	.await?;

	Ok(rows)
}

/// Every subscription regardless of status. Customer lifecycle counts read from this.
pub async fn read_customer_intervals(db: &Db) -> Result<Vec<SubscriptionInterval>> {
	let rows = sqlx::query_as::<_, SubscriptionInterval>(
		"\
SELECT subscription_id, customer_id, start_date, end_date, monthly_amount
FROM silver.subscriptions
ORDER BY customer_id, start_date, end_date, subscription_id",
	)
	.fetch_all(&db.pool)
	.await?;

	Ok(rows)
}

/// Usage events with a positive count.
pub async fn read_qualifying_usage(db: &Db) -> Result<Vec<UsageActivity>> {
	let rows = sqlx::query_as::<_, UsageRecord>(
		"\
SELECT user_id, event_date
FROM silver.usage_events
WHERE event_count > 0
ORDER BY event_date, user_id",
	)
	.fetch_all(&db.pool)
	.await?;

	Ok(rows.into_iter().map(Into::into).collect())
}
