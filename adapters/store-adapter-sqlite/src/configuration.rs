//! Configuration record storage.

use sqlx::{Row, SqlitePool, sqlite::SqliteRow};

use categora::prelude::*;

use crate::db_err;

fn from_row(row: &SqliteRow) -> Configuration {
	Configuration {
		category_id: row.get::<String, _>("category_id").into(),
		configuration_id: row.get::<String, _>("configuration_id").into(),
		name: row.get::<String, _>("name").into(),
		category_version: row.get::<i64, _>("category_version") as u32,
	}
}

pub(crate) async fn read(
	db: &SqlitePool,
	category_id: &str,
	configuration_id: &str,
) -> CgResult<Option<Configuration>> {
	let row = sqlx::query(
		"SELECT * FROM configurations WHERE category_id = ? AND configuration_id = ?",
	)
	.bind(category_id)
	.bind(configuration_id)
	.fetch_optional(db)
	.await
	.map_err(db_err)?;

	Ok(row.as_ref().map(from_row))
}

pub(crate) async fn write(db: &SqlitePool, configuration: &Configuration) -> CgResult<()> {
	sqlx::query(
		"INSERT OR REPLACE INTO configurations (category_id, configuration_id, name, category_version)
		VALUES (?, ?, ?, ?)",
	)
	.bind(configuration.category_id.as_ref())
	.bind(configuration.configuration_id.as_ref())
	.bind(configuration.name.as_ref())
	.bind(configuration.category_version as i64)
	.execute(db)
	.await
	.map_err(db_err)?;
	Ok(())
}

pub(crate) async fn delete(
	db: &SqlitePool,
	category_id: &str,
	configuration_id: &str,
) -> CgResult<()> {
	sqlx::query("DELETE FROM configurations WHERE category_id = ? AND configuration_id = ?")
		.bind(category_id)
		.bind(configuration_id)
		.execute(db)
		.await
		.map_err(db_err)?;
	Ok(())
}

pub(crate) async fn list_by_category(
	db: &SqlitePool,
	category_id: &str,
) -> CgResult<Vec<Configuration>> {
	let rows = sqlx::query("SELECT * FROM configurations WHERE category_id = ?")
		.bind(category_id)
		.fetch_all(db)
		.await
		.map_err(db_err)?;

	Ok(rows.iter().map(from_row).collect())
}

pub(crate) async fn list_all(db: &SqlitePool) -> CgResult<Vec<Configuration>> {
	let rows =
		sqlx::query("SELECT * FROM configurations").fetch_all(db).await.map_err(db_err)?;

	Ok(rows.iter().map(from_row).collect())
}

// vim: ts=4
