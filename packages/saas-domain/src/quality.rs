use std::collections::{HashMap, HashSet};

use serde_json::{Map, Value};

use crate::{
	coerce::format_timestamp,
	silver::{SilverCustomer, SilverPayment, SilverSubscription, SilverUsageEvent, SilverUser},
};

pub const CUSTOMERS_PK_UNIQUENESS: QualityRule = QualityRule {
	table_name: "silver.customers",
	rule_name: "PK_UNIQUENESS",
	reason: "Duplicate customer_id found",
};
pub const USERS_FK_CUSTOMER_EXISTS: QualityRule = QualityRule {
	table_name: "silver.users",
	rule_name: "FK_CUSTOMER_EXISTS",
	reason: "Invalid customer_id",
};
pub const SUBSCRIPTIONS_AMOUNT_POSITIVE: QualityRule = QualityRule {
	table_name: "silver.subscriptions",
	rule_name: "AMOUNT_POSITIVE",
	reason: "monthly_amount is negative",
};
pub const PAYMENTS_AMOUNT_POSITIVE: QualityRule = QualityRule {
	table_name: "silver.payments",
	rule_name: "PAYMENT_AMOUNT_POSITIVE",
	reason: "payment_amount is zero or negative",
};
pub const USAGE_EVENTS_COUNT_NON_NEGATIVE: QualityRule = QualityRule {
	table_name: "silver.usage_events",
	rule_name: "EVENT_COUNT_NON_NEGATIVE",
	reason: "event_count is negative",
};

/// A row that can be written to the audit sink as a column to text mapping.
pub trait AuditRecord {
	fn audit_fields(&self) -> Vec<(&'static str, Option<String>)>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct QualityRule {
	pub table_name: &'static str,
	pub rule_name: &'static str,
	pub reason: &'static str,
}
impl QualityRule {
	pub fn reject<'a, R, I>(&self, rows: I) -> Vec<RejectedRow>
	where
		R: AuditRecord + 'a,
		I: IntoIterator<Item = &'a R>,
	{
		rows.into_iter().map(|row| RejectedRow::new(self, row)).collect()
	}
}

#[derive(Clone, Debug, PartialEq)]
pub struct RejectedRow {
	pub table_name: String,
	pub rule_name: String,
	pub reason: String,
	/// Offending row, every value rendered as a string or null.
	pub row_data: Map<String, Value>,
}
impl RejectedRow {
	pub fn new<R>(rule: &QualityRule, row: &R) -> Self
	where
		R: AuditRecord + ?Sized,
	{
		let row_data = row
			.audit_fields()
			.into_iter()
			.map(|(key, value)| (key.to_string(), value.map(Value::String).unwrap_or(Value::Null)))
			.collect();

		Self {
			table_name: rule.table_name.to_string(),
			rule_name: rule.rule_name.to_string(),
			reason: rule.reason.to_string(),
			row_data,
		}
	}
}

/// Every customer whose id occurs more than once, including all copies. Missing ids are compared
/// like any other value.
pub fn duplicate_customers(rows: &[SilverCustomer]) -> Vec<&SilverCustomer> {
	let mut counts: HashMap<Option<&str>, usize> = HashMap::new();

	for row in rows {
		*counts.entry(row.customer_id.as_deref()).or_insert(0) += 1;
	}

	rows.iter()
		.filter(|row| counts.get(&row.customer_id.as_deref()).copied().unwrap_or(0) > 1)
		.collect()
}

/// Users whose customer id is missing or not among `known_customers`.
pub fn orphan_users<'a>(
	rows: &'a [SilverUser],
	known_customers: &HashSet<String>,
) -> Vec<&'a SilverUser> {
	rows.iter()
		.filter(|row| match row.customer_id.as_deref() {
			Some(customer_id) => !known_customers.contains(customer_id),
			None => true,
		})
		.collect()
}

pub fn negative_amount_subscriptions(rows: &[SilverSubscription]) -> Vec<&SilverSubscription> {
	rows.iter().filter(|row| row.monthly_amount.is_some_and(|amount| amount < 0.0)).collect()
}

pub fn non_positive_payments(rows: &[SilverPayment]) -> Vec<&SilverPayment> {
	rows.iter().filter(|row| row.payment_amount.is_some_and(|amount| amount <= 0.0)).collect()
}

pub fn negative_event_counts(rows: &[SilverUsageEvent]) -> Vec<&SilverUsageEvent> {
	rows.iter().filter(|row| row.event_count.is_some_and(|count| count < 0)).collect()
}

impl AuditRecord for SilverCustomer {
	fn audit_fields(&self) -> Vec<(&'static str, Option<String>)> {
		vec![
			("customer_id", self.customer_id.clone()),
			("customer_name", self.customer_name.clone()),
			("industry", self.industry.clone()),
			("country", self.country.clone()),
			("signup_date", self.signup_date.map(|date| date.to_string())),
			("plan_type", self.plan_type.clone()),
			("signup_year", self.signup_year.map(|year| year.to_string())),
		]
	}
}

impl AuditRecord for SilverUser {
	fn audit_fields(&self) -> Vec<(&'static str, Option<String>)> {
		vec![
			("user_id", self.user_id.clone()),
			("customer_id", self.customer_id.clone()),
			("user_role", self.user_role.clone()),
			("email", self.email.clone()),
			("created_at", self.created_at.map(format_timestamp)),
			("is_active", self.is_active.map(|active| active.to_string())),
			("created_year", self.created_year.map(|year| year.to_string())),
		]
	}
}

impl AuditRecord for SilverSubscription {
	fn audit_fields(&self) -> Vec<(&'static str, Option<String>)> {
		vec![
			("subscription_id", self.subscription_id.clone()),
			("customer_id", self.customer_id.clone()),
			("plan_name", self.plan_name.clone()),
			("start_date", self.start_date.map(|date| date.to_string())),
			("end_date", self.end_date.map(|date| date.to_string())),
			("monthly_amount", self.monthly_amount.map(|amount| amount.to_string())),
			("subscription_status", self.subscription_status.clone()),
			("is_active", Some(self.is_active.to_string())),
			("start_year", self.start_year.map(|year| year.to_string())),
		]
	}
}

impl AuditRecord for SilverPayment {
	fn audit_fields(&self) -> Vec<(&'static str, Option<String>)> {
		vec![
			("payment_id", self.payment_id.clone()),
			("customer_id", self.customer_id.clone()),
			("subscription_id", self.subscription_id.clone()),
			("payment_date", self.payment_date.map(format_timestamp)),
			("payment_amount", self.payment_amount.map(|amount| amount.to_string())),
			("payment_method", self.payment_method.clone()),
			("payment_status", self.payment_status.clone()),
			("payment_year", self.payment_year.map(|year| year.to_string())),
		]
	}
}

impl AuditRecord for SilverUsageEvent {
	fn audit_fields(&self) -> Vec<(&'static str, Option<String>)> {
		vec![
			("event_id", self.event_id.clone()),
			("user_id", self.user_id.clone()),
			("event_type", self.event_type.clone()),
			("event_date", self.event_date.map(|date| date.to_string())),
			("event_count", self.event_count.map(|count| count.to_string())),
			("event_year", self.event_year.map(|year| year.to_string())),
		]
	}
}
