//! Raw bronze rows and their cleaned silver counterparts.
//!
//! Bronze rows are text exactly as loaded from CSV. Conversion into silver never fails: malformed
//! cells become `None` and the row is kept.

use time::{Date, PrimitiveDateTime};

use crate::coerce::{
	clean_text, parse_bool, parse_date, parse_integer, parse_number, parse_timestamp,
};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BronzeCustomer {
	pub customer_id: Option<String>,
	pub customer_name: Option<String>,
	pub industry: Option<String>,
	pub country: Option<String>,
	pub signup_date: Option<String>,
	pub plan_type: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SilverCustomer {
	pub customer_id: Option<String>,
	pub customer_name: Option<String>,
	pub industry: Option<String>,
	pub country: Option<String>,
	pub signup_date: Option<Date>,
	pub plan_type: Option<String>,
	pub signup_year: Option<i32>,
}
impl From<BronzeCustomer> for SilverCustomer {
	fn from(row: BronzeCustomer) -> Self {
		let signup_date = parse_date(row.signup_date.as_deref());

		Self {
			customer_id: clean_text(row.customer_id),
			customer_name: clean_text(row.customer_name),
			industry: clean_text(row.industry),
			country: clean_text(row.country),
			signup_date,
			plan_type: clean_text(row.plan_type),
			signup_year: signup_date.map(Date::year),
		}
	}
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BronzeUser {
	pub user_id: Option<String>,
	pub customer_id: Option<String>,
	pub user_role: Option<String>,
	pub email: Option<String>,
	pub created_at: Option<String>,
	pub is_active: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SilverUser {
	pub user_id: Option<String>,
	pub customer_id: Option<String>,
	pub user_role: Option<String>,
	pub email: Option<String>,
	pub created_at: Option<PrimitiveDateTime>,
	pub is_active: Option<bool>,
	pub created_year: Option<i32>,
}
impl From<BronzeUser> for SilverUser {
	fn from(row: BronzeUser) -> Self {
		let created_at = parse_timestamp(row.created_at.as_deref());

		Self {
			user_id: clean_text(row.user_id),
			customer_id: clean_text(row.customer_id),
			user_role: clean_text(row.user_role),
			email: clean_text(row.email),
			created_at,
			is_active: parse_bool(row.is_active.as_deref()),
			created_year: created_at.map(|ts| ts.year()),
		}
	}
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BronzeSubscription {
	pub subscription_id: Option<String>,
	pub customer_id: Option<String>,
	pub plan_name: Option<String>,
	pub start_date: Option<String>,
	pub end_date: Option<String>,
	pub monthly_amount: Option<String>,
	pub subscription_status: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SilverSubscription {
	pub subscription_id: Option<String>,
	pub customer_id: Option<String>,
	pub plan_name: Option<String>,
	pub start_date: Option<Date>,
	pub end_date: Option<Date>,
	pub monthly_amount: Option<f64>,
	pub subscription_status: Option<String>,
	/// True only when the status reads "active" in any letter case.
	pub is_active: bool,
	pub start_year: Option<i32>,
}
impl From<BronzeSubscription> for SilverSubscription {
	fn from(row: BronzeSubscription) -> Self {
		let start_date = parse_date(row.start_date.as_deref());
		let subscription_status = clean_text(row.subscription_status);
		let is_active = subscription_status
			.as_deref()
			.map(|status| status.eq_ignore_ascii_case("active"))
			.unwrap_or(false);

		Self {
			subscription_id: clean_text(row.subscription_id),
			customer_id: clean_text(row.customer_id),
			plan_name: clean_text(row.plan_name),
			start_date,
			end_date: parse_date(row.end_date.as_deref()),
			monthly_amount: parse_number(row.monthly_amount.as_deref()),
			subscription_status,
			is_active,
			start_year: start_date.map(Date::year),
		}
	}
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BronzePayment {
	pub payment_id: Option<String>,
	pub customer_id: Option<String>,
	pub subscription_id: Option<String>,
	pub payment_date: Option<String>,
	pub amount: Option<String>,
	pub payment_method: Option<String>,
	pub payment_status: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SilverPayment {
	pub payment_id: Option<String>,
	pub customer_id: Option<String>,
	pub subscription_id: Option<String>,
	pub payment_date: Option<PrimitiveDateTime>,
	pub payment_amount: Option<f64>,
	pub payment_method: Option<String>,
	pub payment_status: Option<String>,
	pub payment_year: Option<i32>,
}
impl From<BronzePayment> for SilverPayment {
	fn from(row: BronzePayment) -> Self {
		let payment_date = parse_timestamp(row.payment_date.as_deref());

		Self {
			payment_id: clean_text(row.payment_id),
			customer_id: clean_text(row.customer_id),
			subscription_id: clean_text(row.subscription_id),
			payment_date,
			payment_amount: parse_number(row.amount.as_deref()),
			payment_method: clean_text(row.payment_method),
			payment_status: clean_text(row.payment_status),
			payment_year: payment_date.map(|ts| ts.year()),
		}
	}
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BronzeUsageEvent {
	pub event_id: Option<String>,
	pub user_id: Option<String>,
	pub event_type: Option<String>,
	pub event_date: Option<String>,
	pub event_count: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SilverUsageEvent {
	pub event_id: Option<String>,
	pub user_id: Option<String>,
	pub event_type: Option<String>,
	pub event_date: Option<Date>,
	pub event_count: Option<i64>,
	pub event_year: Option<i32>,
}
impl From<BronzeUsageEvent> for SilverUsageEvent {
	fn from(row: BronzeUsageEvent) -> Self {
		let event_date = parse_date(row.event_date.as_deref());

		Self {
			event_id: clean_text(row.event_id),
			user_id: clean_text(row.user_id),
			event_type: clean_text(row.event_type),
			event_date,
			event_count: parse_integer(row.event_count.as_deref()),
			event_year: event_date.map(Date::year),
		}
	}
}
