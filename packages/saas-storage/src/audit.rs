use serde_json::Value;
use sqlx::{Postgres, QueryBuilder};

use saas_domain::RejectedRow;

use crate::{Result, db::Db};

/// Appends rejected rows to `audit.rejected_rows`. Earlier runs are kept.
pub async fn append_rejected_rows(db: &Db, rows: &[RejectedRow]) -> Result<u64> {
	if rows.is_empty() {
		return Ok(0);
	}

	let mut tx = db.pool.begin().await?;
	let mut appended = 0_u64;

	for chunk in rows.chunks(db.insert_batch_rows()) {
		let mut builder = QueryBuilder::<Postgres>::new(
			"INSERT INTO audit.rejected_rows (table_name, rule_name, rejected_reason, row_data) ",
		);

		builder.push_values(chunk, |mut row, rejected| {
			row.push_bind(rejected.table_name.clone())
				.push_bind(rejected.rule_name.clone())
				.push_bind(rejected.reason.clone())
				.push_bind(Value::Object(rejected.row_data.clone()));
		});

		appended += builder.build().execute(&mut *tx).await?.rows_affected();
	}

	tx.commit().await?;

	Ok(appended)
}

/// Rejected row counts per `(table_name, rule_name)`, ordered by table then rule.
pub async fn count_rejected_rows(db: &Db) -> Result<Vec<(String, String, i64)>> {
	let rows = sqlx::query_as::<_, (String, String, i64)>(
		"\
SELECT table_name, rule_name, COUNT(*)::BIGINT
FROM audit.rejected_rows
GROUP BY table_name, rule_name
ORDER BY table_name, rule_name",
	)
	.fetch_all(&db.pool)
	.await?;

	Ok(rows)
}
