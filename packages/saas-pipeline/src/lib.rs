//! Orchestrates the bronze, silver and gold layers over one [`Db`] handle.
//!
//! Every step reads its inputs in full, transforms them in memory and rewrites its target table in
//! a single transaction before the next step starts.

pub mod bronze;
pub mod gold;
pub mod report;
pub mod silver;

mod error;

pub use error::{Error, Result};
pub use report::{RejectedCount, Report};

use saas_config::Config;
use saas_storage::db::Db;

/// Rows written to one table by a pipeline step.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TableRows {
	pub table: &'static str,
	pub rows: u64,
	/// Rows sent to `audit.rejected_rows` by this table's quality rule.
	pub rejected: u64,
}
impl TableRows {
	fn new(table: &'static str, rows: u64) -> Self {
		Self { table, rows, rejected: 0 }
	}
}

pub struct Pipeline {
	pub cfg: Config,
	pub db: Db,
}
impl Pipeline {
	pub fn new(cfg: Config, db: Db) -> Self {
		Self { cfg, db }
	}

	/// Rebuilds silver from bronze, then gold from silver.
	pub async fn run_all(&self) -> Result<Vec<TableRows>> {
		let mut tables = self.run_silver().await?;

		tables.extend(self.run_gold().await?);

		Ok(tables)
	}

	pub async fn close(self) {
		self.db.close().await;
	}
}
