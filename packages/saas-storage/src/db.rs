use sqlx::{PgPool, postgres::PgPoolOptions};

use crate::{Result, schema};

/// Row Store handle shared by every pipeline step of a run.
pub struct Db {
	pub pool: PgPool,
	insert_batch_rows: usize,
}
impl Db {
	pub async fn connect(cfg: &saas_config::Postgres) -> Result<Self> {
		let pool =
			PgPoolOptions::new().max_connections(cfg.pool_max_conns).connect(&cfg.dsn).await?;

		Ok(Self { pool, insert_batch_rows: (cfg.insert_batch_rows as usize).max(1) })
	}

	/// Creates the layer schemas, bronze tables and the audit table. Silver and gold tables are
	/// owned by their builders.
	pub async fn ensure_schema(&self) -> Result<()> {
		let sql = schema::render_schema();
		let lock_id: i64 = 7_120_115;
		// Advisory locks are held per connection. Use a single transaction so the lock is scoped to
		// one connection and automatically released when the transaction ends.
		let mut tx = self.pool.begin().await?;

		sqlx::query("SELECT pg_advisory_xact_lock($1)").bind(lock_id).execute(&mut *tx).await?;

		for statement in sql.split(';') {
			let trimmed = statement.trim();

			if trimmed.is_empty() {
				continue;
			}

			sqlx::query(trimmed).execute(&mut *tx).await?;
		}

		tx.commit().await?;

		Ok(())
	}

	pub fn insert_batch_rows(&self) -> usize {
		self.insert_batch_rows
	}

	/// Waits for checked-out connections to return, then closes the pool.
	pub async fn close(self) {
		self.pool.close().await;
	}
}
