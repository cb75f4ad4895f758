//! Category record storage.

use sqlx::{Row, SqlitePool, sqlite::SqliteRow};

use categora::prelude::*;

use crate::db_err;

fn from_row(row: &SqliteRow) -> Category {
	Category {
		category_id: row.get::<String, _>("category_id").into(),
		name: row.get::<String, _>("name").into(),
	}
}

pub(crate) async fn read(db: &SqlitePool, category_id: &str) -> CgResult<Option<Category>> {
	let row = sqlx::query("SELECT category_id, name FROM categories WHERE category_id = ?")
		.bind(category_id)
		.fetch_optional(db)
		.await
		.map_err(db_err)?;

	Ok(row.as_ref().map(from_row))
}

pub(crate) async fn write(db: &SqlitePool, category: &Category) -> CgResult<()> {
	sqlx::query("INSERT OR REPLACE INTO categories (category_id, name) VALUES (?, ?)")
		.bind(category.category_id.as_ref())
		.bind(category.name.as_ref())
		.execute(db)
		.await
		.map_err(db_err)?;
	Ok(())
}

pub(crate) async fn delete(db: &SqlitePool, category_id: &str) -> CgResult<()> {
	sqlx::query("DELETE FROM categories WHERE category_id = ?")
		.bind(category_id)
		.execute(db)
		.await
		.map_err(db_err)?;
	Ok(())
}

pub(crate) async fn list(db: &SqlitePool) -> CgResult<Vec<Category>> {
	let rows = sqlx::query("SELECT category_id, name FROM categories")
		.fetch_all(db)
		.await
		.map_err(db_err)?;

	Ok(rows.iter().map(from_row).collect())
}

// vim: ts=4
