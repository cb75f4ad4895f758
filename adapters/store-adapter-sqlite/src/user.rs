//! User account storage.

use sqlx::{Row, SqlitePool, sqlite::SqliteRow};

use categora::prelude::*;

use crate::db_err;

fn from_row(row: &SqliteRow) -> User {
	let roles: Vec<Box<str>> = row
		.get::<Option<String>, _>("roles")
		.and_then(|v| serde_json::from_str(&v).ok())
		.unwrap_or_default();

	User {
		user_id: row.get::<String, _>("user_id").into(),
		username: row.get::<String, _>("username").into(),
		password_hash: row.get::<Option<String>, _>("password_hash").unwrap_or_default().into(),
		roles,
	}
}

pub(crate) async fn read(db: &SqlitePool, username: &str) -> CgResult<Option<User>> {
	let row = sqlx::query("SELECT * FROM users WHERE username = ?")
		.bind(username)
		.fetch_optional(db)
		.await
		.map_err(db_err)?;

	Ok(row.as_ref().map(from_row))
}

pub(crate) async fn write(db: &SqlitePool, user: &User) -> CgResult<()> {
	let roles = serde_json::to_string(&user.roles)?;

	sqlx::query(
		"INSERT OR REPLACE INTO users (user_id, username, password_hash, roles)
		VALUES (?, ?, ?, ?)",
	)
	.bind(user.user_id.as_ref())
	.bind(user.username.as_ref())
	.bind(user.password_hash.as_ref())
	.bind(roles)
	.execute(db)
	.await
	.map_err(db_err)?;
	Ok(())
}

pub(crate) async fn delete(db: &SqlitePool, username: &str) -> CgResult<()> {
	sqlx::query("DELETE FROM users WHERE username = ?")
		.bind(username)
		.execute(db)
		.await
		.map_err(db_err)?;
	Ok(())
}

pub(crate) async fn list(db: &SqlitePool) -> CgResult<Vec<User>> {
	let rows = sqlx::query("SELECT * FROM users").fetch_all(db).await.map_err(db_err)?;
	Ok(rows.iter().map(from_row).collect())
}

// vim: ts=4
