//! Raw CSV landing tables. Every bronze column is text so loading never rejects a cell.

use std::collections::HashSet;

use saas_domain::silver::{
	BronzeCustomer, BronzePayment, BronzeSubscription, BronzeUsageEvent, BronzeUser,
};

use crate::{
	Error, Result,
	db::Db,
	models::{
		BronzeCustomerRow, BronzePaymentRow, BronzeSubscriptionRow, BronzeUsageEventRow,
		BronzeUserRow,
	},
};

pub const CUSTOMERS_COLUMNS: &[&str] =
	&["customer_id", "customer_name", "industry", "country", "signup_date", "plan_type"];
pub const USERS_COLUMNS: &[&str] =
	&["user_id", "customer_id", "user_role", "email", "created_at", "is_active"];
pub const SUBSCRIPTIONS_COLUMNS: &[&str] = &[
	"subscription_id",
	"customer_id",
	"plan_name",
	"start_date",
	"end_date",
	"monthly_amount",
	"subscription_status",
];
pub const PAYMENTS_COLUMNS: &[&str] = &[
	"payment_id",
	"customer_id",
	"subscription_id",
	"payment_date",
	"amount",
	"payment_method",
	"payment_status",
];
pub const USAGE_EVENTS_COLUMNS: &[&str] =
	&["event_id", "user_id", "event_type", "event_date", "event_count"];

/// Returns the known columns of a bronze table given without its schema prefix.
pub fn table_columns(table: &str) -> Option<&'static [&'static str]> {
	match table {
		"customers" => Some(CUSTOMERS_COLUMNS),
		"users" => Some(USERS_COLUMNS),
		"subscriptions" => Some(SUBSCRIPTIONS_COLUMNS),
		"payments" => Some(PAYMENTS_COLUMNS),
		"usage_events" => Some(USAGE_EVENTS_COLUMNS),
		_ => None,
	}
}

/// Replaces the contents of `bronze.{table}` with the CSV in `csv`.
///
/// The header row picks the target columns, so files may omit or reorder columns. Omitted
/// columns load as NULL.
pub async fn load_csv(db: &Db, table: &str, csv: &[u8]) -> Result<u64> {
	let known = table_columns(table)
		.ok_or_else(|| Error::InvalidArgument(format!("Unknown bronze table {table:?}.")))?;
	let header = parse_header(csv)?;

	validate_header(table, &header, known)?;

	let truncate = format!("TRUNCATE bronze.{table}");
	let copy = format!(
		"COPY bronze.{table} ({}) FROM STDIN WITH (FORMAT csv, HEADER true)",
		header.join(", ")
	);
	let mut tx = db.pool.begin().await?;

	sqlx::query(truncate.as_str()).execute(&mut *tx).await?;

	let mut copy_in = tx.copy_in_raw(copy.as_str()).await?;

	copy_in.send(strip_bom(csv)).await?;

	let rows = copy_in.finish().await?;

	tx.commit().await?;

	Ok(rows)
}

pub async fn read_customers(db: &Db) -> Result<Vec<BronzeCustomer>> {
	let rows: Vec<BronzeCustomerRow> = sqlx::query_as(
		"SELECT customer_id, customer_name, industry, country, signup_date, plan_type \
		 FROM bronze.customers",
	)
	.fetch_all(&db.pool)
	.await?;

	Ok(rows.into_iter().map(Into::into).collect())
}

pub async fn read_users(db: &Db) -> Result<Vec<BronzeUser>> {
	let rows: Vec<BronzeUserRow> = sqlx::query_as(
		"SELECT user_id, customer_id, user_role, email, created_at, is_active FROM bronze.users",
	)
	.fetch_all(&db.pool)
	.await?;

	Ok(rows.into_iter().map(Into::into).collect())
}

pub async fn read_subscriptions(db: &Db) -> Result<Vec<BronzeSubscription>> {
	let rows: Vec<BronzeSubscriptionRow> = sqlx::query_as(
		"SELECT subscription_id, customer_id, plan_name, start_date, end_date, monthly_amount, \
		 subscription_status FROM bronze.subscriptions",
	)
	.fetch_all(&db.pool)
	.await?;

	Ok(rows.into_iter().map(Into::into).collect())
}

pub async fn read_payments(db: &Db) -> Result<Vec<BronzePayment>> {
	let rows: Vec<BronzePaymentRow> = sqlx::query_as(
		"SELECT payment_id, customer_id, subscription_id, payment_date, amount, payment_method, \
		 payment_status FROM bronze.payments",
	)
	.fetch_all(&db.pool)
	.await?;

	Ok(rows.into_iter().map(Into::into).collect())
}

pub async fn read_usage_events(db: &Db) -> Result<Vec<BronzeUsageEvent>> {
	let rows: Vec<BronzeUsageEventRow> = sqlx::query_as(
		"SELECT event_id, user_id, event_type, event_date, event_count FROM bronze.usage_events",
	)
	.fetch_all(&db.pool)
	.await?;

	Ok(rows.into_iter().map(Into::into).collect())
}

fn strip_bom(csv: &[u8]) -> &[u8] {
	csv.strip_prefix(b"\xEF\xBB\xBF".as_slice()).unwrap_or(csv)
}

fn parse_header(csv: &[u8]) -> Result<Vec<String>> {
	let body = strip_bom(csv);
	let line_end = body.iter().position(|byte| *byte == b'\n').unwrap_or(body.len());
	let line = std::str::from_utf8(&body[..line_end])
		.map_err(|_| Error::InvalidArgument("CSV header is not valid UTF-8.".to_string()))?;
	let line = line.strip_suffix('\r').unwrap_or(line);

	if line.trim().is_empty() {
		return Err(Error::InvalidArgument("CSV input has no header row.".to_string()));
	}

	Ok(line
		.split(',')
		.map(|name| {
			let name = name.trim();
			let name = name
				.strip_prefix('"')
				.and_then(|inner| inner.strip_suffix('"'))
				.unwrap_or(name);

			name.trim().to_ascii_lowercase()
		})
		.collect())
}

fn validate_header(table: &str, header: &[String], known: &[&str]) -> Result<()> {
	let mut seen = HashSet::new();

	for name in header {
		if !known.contains(&name.as_str()) {
			return Err(Error::InvalidArgument(format!(
				"Column {name:?} is not a column of bronze.{table}."
			)));
		}
		if !seen.insert(name.as_str()) {
			return Err(Error::InvalidArgument(format!(
				"Column {name:?} appears more than once in the bronze.{table} header."
			)));
		}
	}

	Ok(())
}

#[cfg(test)]
mod tests {
	use crate::bronze::{USAGE_EVENTS_COLUMNS, parse_header, table_columns, validate_header};

	#[test]
	fn header_tolerates_bom_quotes_and_crlf() {
		let header = parse_header(b"\xEF\xBB\xBF\"event_id\", User_ID ,event_date\r\ne1,u1,2024-01-01\r\n")
			.expect("Header should parse.");

		assert_eq!(header, vec!["event_id", "user_id", "event_date"]);
		assert!(validate_header("usage_events", &header, USAGE_EVENTS_COLUMNS).is_ok());
	}

	#[test]
	fn empty_input_has_no_header() {
		assert!(parse_header(b"").is_err());
		assert!(parse_header(b"\r\n").is_err());
	}

	#[test]
	fn unknown_and_duplicate_columns_are_rejected() {
		let unknown = vec!["event_id".to_string(), "mystery".to_string()];
		let duplicate = vec!["event_id".to_string(), "event_id".to_string()];

		assert!(validate_header("usage_events", &unknown, USAGE_EVENTS_COLUMNS).is_err());
		assert!(validate_header("usage_events", &duplicate, USAGE_EVENTS_COLUMNS).is_err());
	}

	#[test]
	fn only_bronze_tables_have_columns() {
		assert!(table_columns("payments").is_some());
		assert!(table_columns("mrr_monthly").is_none());
	}
}
