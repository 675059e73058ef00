use std::fs;

use crate::{Error, Pipeline, Result, TableRows};

impl Pipeline {
	/// Loads every configured CSV source into its bronze table, replacing prior contents.
	///
	/// Sources load in configuration order. The first unreadable file or rejected header stops the
	/// run; tables loaded before it keep their new contents.
	pub async fn load_bronze(&self) -> Result<Vec<TableRows>> {
		let bronze = &self.cfg.bronze;
		let mut tables = Vec::with_capacity(bronze.sources.len());

		for source in &bronze.sources {
			let path = bronze.inputs_dir.join(&source.file);
			let table = bronze_table_name(&source.table)?;
			let csv =
				fs::read(&path).map_err(|err| Error::ReadInput { path: path.clone(), source: err })?;
			let rows = saas_storage::bronze::load_csv(&self.db, &source.table, &csv).await?;

			tracing::info!(table, rows, path = %path.display(), "Bronze table loaded.");

			tables.push(TableRows::new(table, rows));
		}

		Ok(tables)
	}
}

fn bronze_table_name(table: &str) -> Result<&'static str> {
	match table {
		"customers" => Ok("bronze.customers"),
		"users" => Ok("bronze.users"),
		"subscriptions" => Ok("bronze.subscriptions"),
		"payments" => Ok("bronze.payments"),
		"usage_events" => Ok("bronze.usage_events"),
		other => Err(Error::InvalidInput { message: format!("Unknown bronze table {other:?}.") }),
	}
}
