use time::Date;

use saas_domain::{
	ActivityInterval, ActiveCustomersMonthly, ChurnMonthly, DashboardRow, DauMauMonthly,
	MrrMonthly, UsageActivity,
	silver::{BronzeCustomer, BronzePayment, BronzeSubscription, BronzeUsageEvent, BronzeUser},
};

#[derive(Debug, sqlx::FromRow)]
pub struct BronzeCustomerRow {
	pub customer_id: Option<String>,
	pub customer_name: Option<String>,
	pub industry: Option<String>,
	pub country: Option<String>,
	pub signup_date: Option<String>,
	pub plan_type: Option<String>,
}
impl From<BronzeCustomerRow> for BronzeCustomer {
	fn from(row: BronzeCustomerRow) -> Self {
		Self {
			customer_id: row.customer_id,
			customer_name: row.customer_name,
			industry: row.industry,
			country: row.country,
			signup_date: row.signup_date,
			plan_type: row.plan_type,
		}
	}
}

#[derive(Debug, sqlx::FromRow)]
pub struct BronzeUserRow {
	pub user_id: Option<String>,
	pub customer_id: Option<String>,
	pub user_role: Option<String>,
	pub email: Option<String>,
	pub created_at: Option<String>,
	pub is_active: Option<String>,
}
impl From<BronzeUserRow> for BronzeUser {
	fn from(row: BronzeUserRow) -> Self {
		Self {
			user_id: row.user_id,
			customer_id: row.customer_id,
			user_role: row.user_role,
			email: row.email,
			created_at: row.created_at,
			is_active: row.is_active,
		}
	}
}

#[derive(Debug, sqlx::FromRow)]
pub struct BronzeSubscriptionRow {
	pub subscription_id: Option<String>,
	pub customer_id: Option<String>,
	pub plan_name: Option<String>,
	pub start_date: Option<String>,
	pub end_date: Option<String>,
	pub monthly_amount: Option<String>,
	pub subscription_status: Option<String>,
}
impl From<BronzeSubscriptionRow> for BronzeSubscription {
	fn from(row: BronzeSubscriptionRow) -> Self {
		Self {
			subscription_id: row.subscription_id,
			customer_id: row.customer_id,
			plan_name: row.plan_name,
			start_date: row.start_date,
			end_date: row.end_date,
			monthly_amount: row.monthly_amount,
			subscription_status: row.subscription_status,
		}
	}
}

#[derive(Debug, sqlx::FromRow)]
pub struct BronzePaymentRow {
	pub payment_id: Option<String>,
	pub customer_id: Option<String>,
	pub subscription_id: Option<String>,
	pub payment_date: Option<String>,
	pub amount: Option<String>,
	pub payment_method: Option<String>,
	pub payment_status: Option<String>,
}
impl From<BronzePaymentRow> for BronzePayment {
	fn from(row: BronzePaymentRow) -> Self {
		Self {
			payment_id: row.payment_id,
			customer_id: row.customer_id,
			subscription_id: row.subscription_id,
			payment_date: row.payment_date,
			amount: row.amount,
			payment_method: row.payment_method,
			payment_status: row.payment_status,
		}
	}
}

#[derive(Debug, sqlx::FromRow)]
pub struct BronzeUsageEventRow {
	pub event_id: Option<String>,
	pub user_id: Option<String>,
	pub event_type: Option<String>,
	pub event_date: Option<String>,
	pub event_count: Option<String>,
}
impl From<BronzeUsageEventRow> for BronzeUsageEvent {
	fn from(row: BronzeUsageEventRow) -> Self {
		Self {
			event_id: row.event_id,
			user_id: row.user_id,
			event_type: row.event_type,
			event_date: row.event_date,
			event_count: row.event_count,
		}
	}
}

/// Active subscription projected for MRR expansion.
#[derive(Debug, sqlx::FromRow)]
pub struct SubscriptionInterval {
	pub subscription_id: Option<String>,
	pub customer_id: Option<String>,
	pub start_date: Option<Date>,
	pub end_date: Option<Date>,
	pub monthly_amount: Option<f64>,
}
impl SubscriptionInterval {
	/// Subscriptions without an id cannot be attributed and yield `None`.
	pub fn into_amount_interval(self) -> Option<ActivityInterval<Option<f64>>> {
		Some(ActivityInterval {
			entity_id: self.subscription_id?,
			start: self.start_date,
			end: self.end_date,
			value: self.monthly_amount,
		})
	}

	/// Customer-keyed interval used by churn and active customer counts.
	pub fn into_customer_interval(self) -> Option<ActivityInterval> {
		Some(ActivityInterval {
			entity_id: self.customer_id?,
			start: self.start_date,
			end: self.end_date,
			value: (),
		})
	}
}

#[derive(Debug, sqlx::FromRow)]
pub struct UsageRecord {
	pub user_id: Option<String>,
	pub event_date: Option<Date>,
}
impl From<UsageRecord> for UsageActivity {
	fn from(row: UsageRecord) -> Self {
		Self { user_id: row.user_id, event_date: row.event_date }
	}
}

#[derive(Debug, sqlx::FromRow)]
pub struct MrrMonthlyRow {
	pub month: Date,
	pub mrr: f64,
	pub active_subscriptions: i64,
}
impl From<MrrMonthlyRow> for MrrMonthly {
	fn from(row: MrrMonthlyRow) -> Self {
		Self { month: row.month, mrr: row.mrr, active_subscriptions: row.active_subscriptions }
	}
}

#[derive(Debug, sqlx::FromRow)]
pub struct ChurnMonthlyRow {
	pub month: Date,
	pub active_customers: i64,
	pub churned_customers: i64,
	pub churn_rate: Option<f64>,
}
impl From<ChurnMonthlyRow> for ChurnMonthly {
	fn from(row: ChurnMonthlyRow) -> Self {
		Self {
			month: row.month,
			active_customers: row.active_customers,
			churned_customers: row.churned_customers,
			churn_rate: row.churn_rate,
		}
	}
}

#[derive(Debug, sqlx::FromRow)]
pub struct DauMauMonthlyRow {
	pub month: Date,
	pub dau: f64,
	pub mau: i64,
	pub dau_mau_ratio: Option<f64>,
}
impl From<DauMauMonthlyRow> for DauMauMonthly {
	fn from(row: DauMauMonthlyRow) -> Self {
		Self { month: row.month, dau: row.dau, mau: row.mau, dau_mau_ratio: row.dau_mau_ratio }
	}
}

#[derive(Debug, sqlx::FromRow)]
pub struct ActiveCustomersMonthlyRow {
	pub month: Date,
	pub active_customers: i64,
	pub new_customers: i64,
	pub churned_customers: i64,
}
impl From<ActiveCustomersMonthlyRow> for ActiveCustomersMonthly {
	fn from(row: ActiveCustomersMonthlyRow) -> Self {
		Self {
			month: row.month,
			active_customers: row.active_customers,
			new_customers: row.new_customers,
			churned_customers: row.churned_customers,
		}
	}
}

#[derive(Debug, sqlx::FromRow)]
pub struct DashboardMonthlyRow {
	pub month: Date,
	pub mrr: f64,
	pub active_customers: Option<i64>,
	pub churn_rate: Option<f64>,
	pub dau_mau_ratio: Option<f64>,
}
impl From<DashboardMonthlyRow> for DashboardRow {
	fn from(row: DashboardMonthlyRow) -> Self {
		Self {
			month: row.month,
			mrr: row.mrr,
			active_customers: row.active_customers,
			churn_rate: row.churn_rate,
			dau_mau_ratio: row.dau_mau_ratio,
		}
	}
}
