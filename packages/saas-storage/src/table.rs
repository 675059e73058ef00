use sqlx::{Postgres, QueryBuilder, query_builder::Separated};

use crate::{Result, db::Db};

/// A row type that owns a fully rebuilt table.
pub trait TableRow {
	/// Schema-qualified table name.
	const TABLE: &'static str;
	/// Column name and SQL definition pairs, in bind order.
	const COLUMNS: &'static [(&'static str, &'static str)];
	/// Extra table constraints appended to the column list.
	const CONSTRAINTS: &'static [&'static str] = &[];

	fn bind_columns<'args>(&self, row: &mut Separated<'_, 'args, Postgres, &'static str>);
}

/// Drops the table, recreates it and inserts every row, all in one transaction. A failure leaves
/// the previous version of the table in place.
pub async fn replace_table<R>(db: &Db, rows: &[R]) -> Result<u64>
where
	R: TableRow,
{
	let mut tx = db.pool.begin().await?;
	let drop_sql = format!("DROP TABLE IF EXISTS {}", R::TABLE);
	let create_sql = create_table_sql::<R>();

	sqlx::query(drop_sql.as_str()).execute(&mut *tx).await?;
	sqlx::query(create_sql.as_str()).execute(&mut *tx).await?;

	let mut inserted = 0_u64;

	for chunk in rows.chunks(db.insert_batch_rows()) {
		let mut builder = QueryBuilder::<Postgres>::new(format!(
			"INSERT INTO {} ({}) ",
			R::TABLE,
			column_names::<R>()
		));

		builder.push_values(chunk, |mut row, value| value.bind_columns(&mut row));

		inserted += builder.build().execute(&mut *tx).await?.rows_affected();
	}

	tx.commit().await?;

	tracing::info!(table = R::TABLE, rows = inserted, "Table rebuilt.");

	Ok(inserted)
}

pub fn create_table_sql<R>() -> String
where
	R: TableRow,
{
	let definitions = R::COLUMNS
		.iter()
		.map(|(name, definition)| format!("{name} {definition}"))
		.chain(R::CONSTRAINTS.iter().map(|constraint| constraint.to_string()))
		.collect::<Vec<_>>();

	format!("CREATE TABLE {} (\n\t{}\n)", R::TABLE, definitions.join(",\n\t"))
}

fn column_names<R>() -> String
where
	R: TableRow,
{
	R::COLUMNS.iter().map(|(name, _)| *name).collect::<Vec<_>>().join(", ")
}

/// True once a builder has created `table`. Accepts schema-qualified names.
pub async fn table_exists(db: &Db, table: &str) -> Result<bool> {
	let exists = sqlx::query_scalar::<_, bool>("SELECT to_regclass($1) IS NOT NULL")
		.bind(table)
		.fetch_one(&db.pool)
		.await?;

	Ok(exists)
}
