//! Category version storage.

use sqlx::{Row, SqlitePool, sqlite::SqliteRow};

use categora::prelude::*;

use crate::{db_err, insert_err};

fn from_row(row: &SqliteRow) -> CgResult<Version> {
	let status: String = row.get("status");
	Ok(Version {
		version_id: row.get::<String, _>("version_id").into(),
		category_id: row.get::<String, _>("category_id").into(),
		version_num: row.get::<i64, _>("version_num") as u32,
		description: row.get::<Option<String>, _>("description").unwrap_or_default().into(),
		status: status.parse()?,
		schema: row.get::<Option<String>, _>("schema").unwrap_or_default().into(),
		approved_by: row.get::<Option<String>, _>("approved_by").map(Into::into),
		approved_date: row.get::<Option<String>, _>("approved_date").map(Into::into),
		created_by: row.get::<String, _>("created_by").into(),
		created_date: row.get::<String, _>("created_date").into(),
	})
}

/// Descending query on the sort key, limit 1
pub(crate) async fn read_latest(db: &SqlitePool, category_id: &str) -> CgResult<Option<Version>> {
	let row = sqlx::query(
		"SELECT * FROM versions WHERE category_id = ? ORDER BY version_num DESC LIMIT 1",
	)
	.bind(category_id)
	.fetch_optional(db)
	.await
	.map_err(db_err)?;

	row.as_ref().map(from_row).transpose()
}

pub(crate) async fn list(db: &SqlitePool, category_id: &str) -> CgResult<Vec<Version>> {
	let rows = sqlx::query("SELECT * FROM versions WHERE category_id = ?")
		.bind(category_id)
		.fetch_all(db)
		.await
		.map_err(db_err)?;

	rows.iter().map(from_row).collect()
}

pub(crate) async fn insert(db: &SqlitePool, version: &Version) -> CgResult<()> {
	sqlx::query(
		"INSERT INTO versions (category_id, version_num, version_id, description, status,
			schema, approved_by, approved_date, created_by, created_date)
		VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
	)
	.bind(version.category_id.as_ref())
	.bind(version.version_num as i64)
	.bind(version.version_id.as_ref())
	.bind(version.description.as_ref())
	.bind(version.status.as_str())
	.bind(version.schema.as_ref())
	.bind(version.approved_by.as_deref())
	.bind(version.approved_date.as_deref())
	.bind(version.created_by.as_ref())
	.bind(version.created_date.as_ref())
	.execute(db)
	.await
	.map_err(|err| {
		insert_err(
			err,
			format!(
				"Version {} already exists for category {}",
				version.version_num, version.category_id
			),
		)
	})?;
	Ok(())
}

pub(crate) async fn write(db: &SqlitePool, version: &Version) -> CgResult<()> {
	sqlx::query(
		"INSERT OR REPLACE INTO versions (category_id, version_num, version_id, description,
			status, schema, approved_by, approved_date, created_by, created_date)
		VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
	)
	.bind(version.category_id.as_ref())
	.bind(version.version_num as i64)
	.bind(version.version_id.as_ref())
	.bind(version.description.as_ref())
	.bind(version.status.as_str())
	.bind(version.schema.as_ref())
	.bind(version.approved_by.as_deref())
	.bind(version.approved_date.as_deref())
	.bind(version.created_by.as_ref())
	.bind(version.created_date.as_ref())
	.execute(db)
	.await
	.map_err(db_err)?;
	Ok(())
}

pub(crate) async fn delete_all(db: &SqlitePool, category_id: &str) -> CgResult<u32> {
	let result = sqlx::query("DELETE FROM versions WHERE category_id = ?")
		.bind(category_id)
		.execute(db)
		.await
		.map_err(db_err)?;
	Ok(result.rows_affected() as u32)
}

// vim: ts=4
