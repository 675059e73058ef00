use std::path::PathBuf;

use serde::Deserialize;

/// Bronze tables that a CSV source may target.
pub const BRONZE_TABLES: [&str; 5] = ["customers", "users", "subscriptions", "payments", "usage_events"];

#[derive(Debug, Deserialize)]
pub struct Config {
	pub service: Service,
	pub storage: Storage,
	#[serde(default)]
	pub bronze: Bronze,
	#[serde(default)]
	pub report: Report,
}

#[derive(Debug, Deserialize)]
pub struct Service {
	pub log_level: String,
}

#[derive(Debug, Deserialize)]
pub struct Storage {
	pub postgres: Postgres,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Postgres {
	pub dsn: String,
	pub pool_max_conns: u32,
	/// Rows per multi-row INSERT when rewriting silver and gold tables.
	#[serde(default = "default_insert_batch_rows")]
	pub insert_batch_rows: u32,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Bronze {
	pub inputs_dir: PathBuf,
	pub sources: Vec<BronzeSource>,
}
impl Default for Bronze {
	fn default() -> Self {
		Self {
			inputs_dir: PathBuf::from("bronze_inputs"),
			sources: BRONZE_TABLES
				.iter()
				.map(|table| BronzeSource {
					file: format!("saas_bronze_raw_data-{table}.csv"),
					table: (*table).to_string(),
				})
				.collect(),
		}
	}
}

#[derive(Clone, Debug, Deserialize)]
pub struct BronzeSource {
	/// File name relative to `bronze.inputs_dir`.
	pub file: String,
	/// Unqualified bronze table name, e.g. "customers".
	pub table: String,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Report {
	pub churn_window_months: u32,
}
impl Default for Report {
	fn default() -> Self {
		Self { churn_window_months: 3 }
	}
}

fn default_insert_batch_rows() -> u32 {
	1_000
}
