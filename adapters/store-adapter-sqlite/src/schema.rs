//! Database schema initialization.
//!
//! Creates the five logical tables on first open. Column names are the
//! stable storage identifiers shared with pre-existing data.

use sqlx::SqlitePool;

pub(crate) async fn init_db(db: &SqlitePool) -> Result<(), sqlx::Error> {
	let mut tx = db.begin().await?;

	// Categories
	//************
	sqlx::query(
		"CREATE TABLE IF NOT EXISTS categories (
		category_id text NOT NULL,
		name text NOT NULL,
		PRIMARY KEY(category_id)
	)",
	)
	.execute(&mut *tx)
	.await?;

	// Category versions
	//*******************
	sqlx::query(
		"CREATE TABLE IF NOT EXISTS versions (
		category_id text NOT NULL,
		version_num integer NOT NULL,
		version_id text NOT NULL,
		description text,
		status text NOT NULL,
		schema text,
		approved_by text,
		approved_date text,
		created_by text NOT NULL,
		created_date text NOT NULL,
		PRIMARY KEY(category_id, version_num)
	)",
	)
	.execute(&mut *tx)
	.await?;

	// Configurations
	//****************
	sqlx::query(
		"CREATE TABLE IF NOT EXISTS configurations (
		category_id text NOT NULL,
		configuration_id text NOT NULL,
		name text NOT NULL,
		category_version integer NOT NULL,
		PRIMARY KEY(category_id, configuration_id)
	)",
	)
	.execute(&mut *tx)
	.await?;
	sqlx::query(
		"CREATE UNIQUE INDEX IF NOT EXISTS idx_configurations_id ON configurations(configuration_id)",
	)
	.execute(&mut *tx)
	.await?;

	// Configuration versions
	//************************
	sqlx::query(
		"CREATE TABLE IF NOT EXISTS version_configurations (
		configuration_id text NOT NULL,
		version_num integer NOT NULL,
		status text NOT NULL,
		description text,
		fields json,
		approved_by text,
		approved_date text,
		created_by text NOT NULL,
		created_date text NOT NULL,
		PRIMARY KEY(configuration_id, version_num)
	)",
	)
	.execute(&mut *tx)
	.await?;

	// User groups
	//*************
	sqlx::query(
		"CREATE TABLE IF NOT EXISTS user_groups (
		user_group_id text NOT NULL,
		user_group_name text NOT NULL,
		user_list json,
		category_access json,
		PRIMARY KEY(user_group_id, user_group_name)
	)",
	)
	.execute(&mut *tx)
	.await?;

	// Users
	//*******
	sqlx::query(
		"CREATE TABLE IF NOT EXISTS users (
		user_id text NOT NULL,
		username text NOT NULL,
		password_hash text,
		roles json,
		PRIMARY KEY(username)
	)",
	)
	.execute(&mut *tx)
	.await?;

	tx.commit().await
}

// vim: ts=4
