use saas_domain::{
	RejectedRow,
	quality,
	silver::{SilverCustomer, SilverPayment, SilverSubscription, SilverUsageEvent, SilverUser},
};
use saas_storage::{audit, bronze, silver, table::{self, TableRow}};

use crate::{Pipeline, Result, TableRows};

impl Pipeline {
	/// Rebuilds the silver tables in dependency order. Users are checked against the customers
	/// written just before them.
	pub async fn run_silver(&self) -> Result<Vec<TableRows>> {
		Ok(vec![
			self.build_silver_customers().await?,
			self.build_silver_users().await?,
			self.build_silver_subscriptions().await?,
			self.build_silver_payments().await?,
			self.build_silver_usage_events().await?,
		])
	}

	pub async fn build_silver_customers(&self) -> Result<TableRows> {
		let rows = bronze::read_customers(&self.db)
			.await?
			.into_iter()
			.map(SilverCustomer::from)
			.collect::<Vec<_>>();
		let rejected = quality::CUSTOMERS_PK_UNIQUENESS.reject(quality::duplicate_customers(&rows));

		self.write_silver(&rows, &rejected).await
	}

	pub async fn build_silver_users(&self) -> Result<TableRows> {
		let rows =
			bronze::read_users(&self.db).await?.into_iter().map(SilverUser::from).collect::<Vec<_>>();
		let known_customers = silver::read_customer_ids(&self.db).await?;
		let rejected = quality::USERS_FK_CUSTOMER_EXISTS
			.reject(quality::orphan_users(&rows, &known_customers));

		self.write_silver(&rows, &rejected).await
	}

	pub async fn build_silver_subscriptions(&self) -> Result<TableRows> {
		let rows = bronze::read_subscriptions(&self.db)
			.await?
			.into_iter()
			.map(SilverSubscription::from)
			.collect::<Vec<_>>();
		let rejected = quality::SUBSCRIPTIONS_AMOUNT_POSITIVE
			.reject(quality::negative_amount_subscriptions(&rows));

		self.write_silver(&rows, &rejected).await
	}

	pub async fn build_silver_payments(&self) -> Result<TableRows> {
		let rows = bronze::read_payments(&self.db)
			.await?
			.into_iter()
			.map(SilverPayment::from)
			.collect::<Vec<_>>();
		let rejected =
			quality::PAYMENTS_AMOUNT_POSITIVE.reject(quality::non_positive_payments(&rows));

		self.write_silver(&rows, &rejected).await
	}

	pub async fn build_silver_usage_events(&self) -> Result<TableRows> {
		let rows = bronze::read_usage_events(&self.db)
			.await?
			.into_iter()
			.map(SilverUsageEvent::from)
			.collect::<Vec<_>>();
		let rejected = quality::USAGE_EVENTS_COUNT_NON_NEGATIVE
			.reject(quality::negative_event_counts(&rows));

		self.write_silver(&rows, &rejected).await
	}

	// Flagged rows stay in the silver table; the audit copy only records the violation.
	async fn write_silver<R>(&self, rows: &[R], rejected: &[RejectedRow]) -> Result<TableRows>
	where
		R: TableRow,
	{
		let written = table::replace_table(&self.db, rows).await?;
		let audited = audit::append_rejected_rows(&self.db, rejected).await?;

		if audited > 0 {
			tracing::warn!(table = R::TABLE, rejected = audited, "Rows failed a quality rule.");
		}

		Ok(TableRows { table: R::TABLE, rows: written, rejected: audited })
	}
}
