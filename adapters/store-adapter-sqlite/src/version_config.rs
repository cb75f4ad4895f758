//! Configuration version storage (`VersionConfiguration` table).

use std::collections::BTreeMap;

use sqlx::{Row, SqlitePool, sqlite::SqliteRow};

use categora::prelude::*;

use crate::{db_err, insert_err};

fn from_row(row: &SqliteRow) -> CgResult<ConfigVersion> {
	let status: String = row.get("status");
	let fields: BTreeMap<String, serde_json::Value> = row
		.get::<Option<String>, _>("fields")
		.and_then(|f| serde_json::from_str(&f).ok())
		.unwrap_or_default();

	Ok(ConfigVersion {
		configuration_id: row.get::<String, _>("configuration_id").into(),
		version_num: row.get::<i64, _>("version_num") as u32,
		status: status.parse()?,
		description: row.get::<Option<String>, _>("description").unwrap_or_default().into(),
		fields,
		approved_by: row.get::<Option<String>, _>("approved_by").map(Into::into),
		approved_date: row.get::<Option<String>, _>("approved_date").map(Into::into),
		created_by: row.get::<String, _>("created_by").into(),
		created_date: row.get::<String, _>("created_date").into(),
	})
}

fn fields_json(version: &ConfigVersion) -> CgResult<String> {
	Ok(serde_json::to_string(&version.fields)?)
}

pub(crate) async fn read_latest(
	db: &SqlitePool,
	configuration_id: &str,
) -> CgResult<Option<ConfigVersion>> {
	let row = sqlx::query(
		"SELECT * FROM version_configurations WHERE configuration_id = ?
		ORDER BY version_num DESC LIMIT 1",
	)
	.bind(configuration_id)
	.fetch_optional(db)
	.await
	.map_err(db_err)?;

	row.as_ref().map(from_row).transpose()
}

pub(crate) async fn read(
	db: &SqlitePool,
	configuration_id: &str,
	version_num: u32,
) -> CgResult<Option<ConfigVersion>> {
	let row = sqlx::query(
		"SELECT * FROM version_configurations WHERE configuration_id = ? AND version_num = ?",
	)
	.bind(configuration_id)
	.bind(version_num as i64)
	.fetch_optional(db)
	.await
	.map_err(db_err)?;

	row.as_ref().map(from_row).transpose()
}

pub(crate) async fn list(
	db: &SqlitePool,
	configuration_id: &str,
) -> CgResult<Vec<ConfigVersion>> {
	let rows = sqlx::query("SELECT * FROM version_configurations WHERE configuration_id = ?")
		.bind(configuration_id)
		.fetch_all(db)
		.await
		.map_err(db_err)?;

	rows.iter().map(from_row).collect()
}

pub(crate) async fn insert(db: &SqlitePool, version: &ConfigVersion) -> CgResult<()> {
	sqlx::query(
		"INSERT INTO version_configurations (configuration_id, version_num, status, description,
			fields, approved_by, approved_date, created_by, created_date)
		VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
	)
	.bind(version.configuration_id.as_ref())
	.bind(version.version_num as i64)
	.bind(version.status.as_str())
	.bind(version.description.as_ref())
	.bind(fields_json(version)?)
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
				"Version {} already exists for configuration {}",
				version.version_num, version.configuration_id
			),
		)
	})?;
	Ok(())
}

pub(crate) async fn write(db: &SqlitePool, version: &ConfigVersion) -> CgResult<()> {
	sqlx::query(
		"INSERT OR REPLACE INTO version_configurations (configuration_id, version_num, status,
			description, fields, approved_by, approved_date, created_by, created_date)
		VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
	)
	.bind(version.configuration_id.as_ref())
	.bind(version.version_num as i64)
	.bind(version.status.as_str())
	.bind(version.description.as_ref())
	.bind(fields_json(version)?)
	.bind(version.approved_by.as_deref())
	.bind(version.approved_date.as_deref())
	.bind(version.created_by.as_ref())
	.bind(version.created_date.as_ref())
	.execute(db)
	.await
	.map_err(db_err)?;
	Ok(())
}

pub(crate) async fn delete_all(db: &SqlitePool, configuration_id: &str) -> CgResult<u32> {
	let result = sqlx::query("DELETE FROM version_configurations WHERE configuration_id = ?")
		.bind(configuration_id)
		.execute(db)
		.await
		.map_err(db_err)?;
	Ok(result.rows_affected() as u32)
}

// vim: ts=4
