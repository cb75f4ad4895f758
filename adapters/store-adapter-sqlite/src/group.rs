//! User group storage.
//!
//! The membership and access sets are stored as JSON arrays in the
//! `user_list` / `category_access` columns. The contains-user scan decodes
//! and filters in Rust, mirroring a scan-with-filter against a document
//! store.

use std::collections::BTreeSet;

use sqlx::{Row, SqlitePool, sqlite::SqliteRow};

use categora::prelude::*;

use crate::db_err;

fn set_column(row: &SqliteRow, column: &str) -> BTreeSet<String> {
	row.get::<Option<String>, _>(column)
		.and_then(|v| serde_json::from_str(&v).ok())
		.unwrap_or_default()
}

fn from_row(row: &SqliteRow) -> UserGroup {
	UserGroup {
		user_group_id: row.get::<String, _>("user_group_id").into(),
		user_group_name: row.get::<String, _>("user_group_name").into(),
		user_list: set_column(row, "user_list"),
		category_access: set_column(row, "category_access"),
	}
}

pub(crate) async fn find(db: &SqlitePool, user_group_id: &str) -> CgResult<Option<UserGroup>> {
	let row = sqlx::query("SELECT * FROM user_groups WHERE user_group_id = ? LIMIT 1")
		.bind(user_group_id)
		.fetch_optional(db)
		.await
		.map_err(db_err)?;

	Ok(row.as_ref().map(from_row))
}

pub(crate) async fn read(
	db: &SqlitePool,
	user_group_id: &str,
	user_group_name: &str,
) -> CgResult<Option<UserGroup>> {
	let row =
		sqlx::query("SELECT * FROM user_groups WHERE user_group_id = ? AND user_group_name = ?")
			.bind(user_group_id)
			.bind(user_group_name)
			.fetch_optional(db)
			.await
			.map_err(db_err)?;

	Ok(row.as_ref().map(from_row))
}

pub(crate) async fn write(db: &SqlitePool, group: &UserGroup) -> CgResult<()> {
	let user_list = serde_json::to_string(&group.user_list)?;
	let category_access = serde_json::to_string(&group.category_access)?;

	sqlx::query(
		"INSERT OR REPLACE INTO user_groups (user_group_id, user_group_name, user_list, category_access)
		VALUES (?, ?, ?, ?)",
	)
	.bind(group.user_group_id.as_ref())
	.bind(group.user_group_name.as_ref())
	.bind(user_list)
	.bind(category_access)
	.execute(db)
	.await
	.map_err(db_err)?;
	Ok(())
}

pub(crate) async fn delete(
	db: &SqlitePool,
	user_group_id: &str,
	user_group_name: &str,
) -> CgResult<()> {
	sqlx::query("DELETE FROM user_groups WHERE user_group_id = ? AND user_group_name = ?")
		.bind(user_group_id)
		.bind(user_group_name)
		.execute(db)
		.await
		.map_err(db_err)?;
	Ok(())
}

pub(crate) async fn list(db: &SqlitePool) -> CgResult<Vec<UserGroup>> {
	let rows = sqlx::query("SELECT * FROM user_groups").fetch_all(db).await.map_err(db_err)?;
	Ok(rows.iter().map(from_row).collect())
}

pub(crate) async fn containing_user(db: &SqlitePool, username: &str) -> CgResult<Vec<UserGroup>> {
	let groups = list(db).await?;
	Ok(groups.into_iter().filter(|g| g.user_list.contains(username)).collect())
}

// vim: ts=4
