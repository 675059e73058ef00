pub fn render_schema() -> String {
	let init = include_str!("../../../sql/init.sql");

	expand_includes(init)
}

fn expand_includes(sql: &str) -> String {
	let mut out = String::new();

	for line in sql.lines() {
		let trimmed = line.trim();

		if let Some(path) = trimmed.strip_prefix("\\ir ") {
			match path.trim() {
				"00_schemas.sql" => out.push_str(include_str!("../../../sql/00_schemas.sql")),
				"tables/001_bronze_customers.sql" =>
					out.push_str(include_str!("../../../sql/tables/001_bronze_customers.sql")),
				"tables/002_bronze_users.sql" =>
					out.push_str(include_str!("../../../sql/tables/002_bronze_users.sql")),
				"tables/003_bronze_subscriptions.sql" =>
					out.push_str(include_str!("../../../sql/tables/003_bronze_subscriptions.sql")),
				"tables/004_bronze_payments.sql" =>
					out.push_str(include_str!("../../../sql/tables/004_bronze_payments.sql")),
				"tables/005_bronze_usage_events.sql" =>
					out.push_str(include_str!("../../../sql/tables/005_bronze_usage_events.sql")),
				"tables/006_audit_rejected_rows.sql" =>
					out.push_str(include_str!("../../../sql/tables/006_audit_rejected_rows.sql")),
				_ => out.push_str(line),
			}
		} else {
			out.push_str(line);
		}

		out.push('\n');
	}

	out
}

#[cfg(test)]
mod tests {
	use crate::schema::render_schema;

	#[test]
	fn includes_are_expanded() {
		let sql = render_schema();

		assert!(!sql.contains("\\ir "), "Unexpanded include left in schema:\n{sql}");
		assert!(sql.contains("CREATE SCHEMA IF NOT EXISTS gold"));
		assert!(sql.contains("CREATE TABLE IF NOT EXISTS bronze.usage_events"));
		assert!(sql.contains("CREATE TABLE IF NOT EXISTS audit.rejected_rows"));
	}
}
