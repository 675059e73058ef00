use serde_json::{Map, Value};
use time::macros::date;

use saas_domain::{MrrMonthly, RejectedRow};
use saas_storage::{audit, bronze, db::Db, gold, table};
use saas_testkit::TestDatabase;

async fn bootstrapped(test_db: &TestDatabase) -> Db {
	let db = Db::connect(&test_db.postgres_config()).await.expect("Failed to connect to Postgres.");

	db.ensure_schema().await.expect("Failed to ensure schema.");

	db
}

fn rejected(table_name: &str, customer_id: &str) -> RejectedRow {
	let mut row_data = Map::new();

	row_data.insert("customer_id".to_string(), Value::String(customer_id.to_string()));
	row_data.insert("industry".to_string(), Value::Null);

	RejectedRow {
		table_name: table_name.to_string(),
		rule_name: "PK_UNIQUENESS".to_string(),
		reason: "Duplicate customer_id found".to_string(),
		row_data,
	}
}

#[tokio::test]
#[ignore = "Requires external Postgres. Set SAAS_PG_DSN to run."]
async fn db_connects_and_bootstraps() {
	let Some(base_dsn) = saas_testkit::env_dsn() else {
		eprintln!("Skipping db_connects_and_bootstraps; set SAAS_PG_DSN to run this test.");

		return;
	};
	let test_db = TestDatabase::new(&base_dsn).await.expect("Failed to create test database.");
	let db = bootstrapped(&test_db).await;

	db.ensure_schema().await.expect("Schema bootstrap should be repeatable.");

	let schemas: i64 = sqlx::query_scalar(
		"SELECT count(*) FROM information_schema.schemata \
		 WHERE schema_name IN ('bronze', 'silver', 'gold', 'audit')",
	)
	.fetch_one(&db.pool)
	.await
	.expect("Failed to query schemas.");

	assert_eq!(schemas, 4);

	let bronze_tables: i64 = sqlx::query_scalar(
		"SELECT count(*) FROM information_schema.tables WHERE table_schema = 'bronze'",
	)
	.fetch_one(&db.pool)
	.await
	.expect("Failed to query bronze tables.");

	assert_eq!(bronze_tables, 5);

	db.close().await;
	test_db.cleanup().await.expect("Failed to cleanup test database.");
}

#[tokio::test]
#[ignore = "Requires external Postgres. Set SAAS_PG_DSN to run."]
async fn replace_table_rewrites_in_batches() {
	let Some(base_dsn) = saas_testkit::env_dsn() else {
		eprintln!("Skipping replace_table_rewrites_in_batches; set SAAS_PG_DSN to run this test.");

		return;
	};
	let test_db = TestDatabase::new(&base_dsn).await.expect("Failed to create test database.");
	let db = bootstrapped(&test_db).await;
	let rows = vec![
		MrrMonthly { month: date!(2024 - 01 - 01), mrr: 100.0, active_subscriptions: 1 },
		MrrMonthly { month: date!(2024 - 02 - 01), mrr: 150.5, active_subscriptions: 2 },
		MrrMonthly { month: date!(2024 - 03 - 01), mrr: 0.0, active_subscriptions: 1 },
	];

	for _ in 0..2 {
		let inserted = table::replace_table(&db, &rows).await.expect("Failed to replace table.");

		assert_eq!(inserted, 3);
	}

	let stored = gold::read_mrr_monthly(&db).await.expect("Failed to read mrr_monthly.");

	assert_eq!(stored, rows);

	let inserted = table::replace_table(&db, &rows[..1]).await.expect("Failed to replace table.");
	let stored = gold::read_mrr_monthly(&db).await.expect("Failed to read mrr_monthly.");

	assert_eq!(inserted, 1);
	assert_eq!(stored, rows[..1].to_vec());

	db.close().await;
	test_db.cleanup().await.expect("Failed to cleanup test database.");
}

#[tokio::test]
#[ignore = "Requires external Postgres. Set SAAS_PG_DSN to run."]
async fn audit_rows_accumulate_across_appends() {
	let Some(base_dsn) = saas_testkit::env_dsn() else {
		eprintln!("Skipping audit_rows_accumulate_across_appends; set SAAS_PG_DSN to run this test.");

		return;
	};
	let test_db = TestDatabase::new(&base_dsn).await.expect("Failed to create test database.");
	let db = bootstrapped(&test_db).await;

	assert_eq!(audit::append_rejected_rows(&db, &[]).await.expect("Empty append failed."), 0);

	let batch = vec![
		rejected("silver.customers", "c1"),
		rejected("silver.customers", "c1"),
		rejected("silver.customers", "c2"),
	];

	assert_eq!(audit::append_rejected_rows(&db, &batch).await.expect("Append failed."), 3);
	assert_eq!(audit::append_rejected_rows(&db, &batch[..1]).await.expect("Append failed."), 1);

	let counts = audit::count_rejected_rows(&db).await.expect("Failed to count rejected rows.");

	assert_eq!(
		counts,
		vec![("silver.customers".to_string(), "PK_UNIQUENESS".to_string(), 4)]
	);

	let industry: Option<Value> = sqlx::query_scalar(
		"SELECT row_data -> 'industry' FROM audit.rejected_rows ORDER BY rejected_id LIMIT 1",
	)
	.fetch_one(&db.pool)
	.await
	.expect("Failed to read row_data.");

	assert_eq!(industry, Some(Value::Null));

	db.close().await;
	test_db.cleanup().await.expect("Failed to cleanup test database.");
}

#[tokio::test]
#[ignore = "Requires external Postgres. Set SAAS_PG_DSN to run."]
async fn csv_load_follows_header_and_replaces_contents() {
	let Some(base_dsn) = saas_testkit::env_dsn() else {
		eprintln!(
			"Skipping csv_load_follows_header_and_replaces_contents; set SAAS_PG_DSN to run this test."
		);

		return;
	};
	let test_db = TestDatabase::new(&base_dsn).await.expect("Failed to create test database.");
	let db = bootstrapped(&test_db).await;
	let first = b"event_date,event_id,user_id,event_count\r\n2024-01-02,e1,u1,3\r\n,e2,,\r\n";
	let loaded =
		bronze::load_csv(&db, "usage_events", first).await.expect("Failed to load usage events.");

	assert_eq!(loaded, 2);

	let events = bronze::read_usage_events(&db).await.expect("Failed to read usage events.");

	assert_eq!(events.len(), 2);

	let e1 = events
		.iter()
		.find(|event| event.event_id.as_deref() == Some("e1"))
		.expect("e1 should be loaded.");

	assert_eq!(e1.event_date.as_deref(), Some("2024-01-02"));
	assert_eq!(e1.event_count.as_deref(), Some("3"));
	assert_eq!(e1.event_type, None);

	let second = b"event_id,user_id\ne3,u3\n";

	assert_eq!(bronze::load_csv(&db, "usage_events", second).await.expect("Reload failed."), 1);
	assert_eq!(bronze::read_usage_events(&db).await.expect("Read failed.").len(), 1);

	let unknown = b"event_id,mystery\ne4,x\n";

	assert!(bronze::load_csv(&db, "usage_events", unknown).await.is_err());
	assert!(bronze::load_csv(&db, "mrr_monthly", second).await.is_err());
	assert_eq!(bronze::read_usage_events(&db).await.expect("Read failed.").len(), 1);

	db.close().await;
	test_db.cleanup().await.expect("Failed to cleanup test database.");
}
