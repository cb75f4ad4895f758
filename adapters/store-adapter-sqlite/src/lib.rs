//! SQLite-backed store adapter for Categora.
//!
//! Single-file database opened in WAL mode with a small connection pool.
//! Latest-version lookups are descending queries on the sort key limited to
//! one row; the conditional `insert_*` operations rely on the primary key so
//! a colliding version slot surfaces as a Conflict.

use std::path::Path;

use async_trait::async_trait;
use sqlx::sqlite::{self, SqlitePool};

use categora::prelude::*;
use categora::store_adapter::StoreAdapter;

mod category;
mod configuration;
mod group;
mod schema;
mod user;
mod version;
mod version_config;

use schema::init_db;

pub(crate) fn db_err(err: sqlx::Error) -> Error {
	warn!("DB: {:#?}", err);
	Error::DbError
}

/// Error mapping for conditional creates: a unique-constraint violation on
/// the version slot is a Conflict (the second of two racing writers), all
/// other failures collapse to DbError.
pub(crate) fn insert_err(err: sqlx::Error, msg: String) -> Error {
	match &err {
		sqlx::Error::Database(db) if db.is_unique_violation() => Error::Conflict(msg),
		_ => db_err(err),
	}
}

#[derive(Debug)]
pub struct StoreAdapterSqlite {
	db: SqlitePool,
}

impl StoreAdapterSqlite {
	pub async fn new(path: impl AsRef<Path>) -> CgResult<Self> {
		let opts = sqlite::SqliteConnectOptions::new()
			.filename(path.as_ref())
			.create_if_missing(true)
			.journal_mode(sqlite::SqliteJournalMode::Wal);
		let db = sqlite::SqlitePoolOptions::new()
			.max_connections(5)
			.connect_with(opts)
			.await
			.map_err(db_err)?;

		init_db(&db).await.map_err(db_err)?;

		Ok(Self { db })
	}
}

#[async_trait]
impl StoreAdapter for StoreAdapterSqlite {
	// Category table
	//****************
	async fn read_category(&self, category_id: &str) -> CgResult<Option<Category>> {
		category::read(&self.db, category_id).await
	}

	async fn write_category(&self, cat: &Category) -> CgResult<()> {
		category::write(&self.db, cat).await
	}

	async fn delete_category(&self, category_id: &str) -> CgResult<()> {
		category::delete(&self.db, category_id).await
	}

	async fn list_categories(&self) -> CgResult<Vec<Category>> {
		category::list(&self.db).await
	}

	// Version table
	//***************
	async fn read_latest_version(&self, category_id: &str) -> CgResult<Option<Version>> {
		version::read_latest(&self.db, category_id).await
	}

	async fn list_versions(&self, category_id: &str) -> CgResult<Vec<Version>> {
		version::list(&self.db, category_id).await
	}

	async fn insert_version(&self, v: &Version) -> CgResult<()> {
		version::insert(&self.db, v).await
	}

	async fn write_version(&self, v: &Version) -> CgResult<()> {
		version::write(&self.db, v).await
	}

	async fn delete_versions(&self, category_id: &str) -> CgResult<u32> {
		version::delete_all(&self.db, category_id).await
	}

	// Configuration table
	//*********************
	async fn read_configuration(
		&self,
		category_id: &str,
		configuration_id: &str,
	) -> CgResult<Option<Configuration>> {
		configuration::read(&self.db, category_id, configuration_id).await
	}

	async fn write_configuration(&self, config: &Configuration) -> CgResult<()> {
		configuration::write(&self.db, config).await
	}

	async fn delete_configuration(
		&self,
		category_id: &str,
		configuration_id: &str,
	) -> CgResult<()> {
		configuration::delete(&self.db, category_id, configuration_id).await
	}

	async fn list_configurations(&self, category_id: &str) -> CgResult<Vec<Configuration>> {
		configuration::list_by_category(&self.db, category_id).await
	}

	async fn list_all_configurations(&self) -> CgResult<Vec<Configuration>> {
		configuration::list_all(&self.db).await
	}

	// VersionConfiguration table
	//****************************
	async fn read_latest_config_version(
		&self,
		configuration_id: &str,
	) -> CgResult<Option<ConfigVersion>> {
		version_config::read_latest(&self.db, configuration_id).await
	}

	async fn read_config_version(
		&self,
		configuration_id: &str,
		version_num: u32,
	) -> CgResult<Option<ConfigVersion>> {
		version_config::read(&self.db, configuration_id, version_num).await
	}

	async fn list_config_versions(&self, configuration_id: &str) -> CgResult<Vec<ConfigVersion>> {
		version_config::list(&self.db, configuration_id).await
	}

	async fn insert_config_version(&self, v: &ConfigVersion) -> CgResult<()> {
		version_config::insert(&self.db, v).await
	}

	async fn write_config_version(&self, v: &ConfigVersion) -> CgResult<()> {
		version_config::write(&self.db, v).await
	}

	async fn delete_config_versions(&self, configuration_id: &str) -> CgResult<u32> {
		version_config::delete_all(&self.db, configuration_id).await
	}

	// UserGroups table
	//******************
	async fn find_user_group(&self, user_group_id: &str) -> CgResult<Option<UserGroup>> {
		group::find(&self.db, user_group_id).await
	}

	async fn read_user_group(
		&self,
		user_group_id: &str,
		user_group_name: &str,
	) -> CgResult<Option<UserGroup>> {
		group::read(&self.db, user_group_id, user_group_name).await
	}

	async fn write_user_group(&self, g: &UserGroup) -> CgResult<()> {
		group::write(&self.db, g).await
	}

	async fn delete_user_group(
		&self,
		user_group_id: &str,
		user_group_name: &str,
	) -> CgResult<()> {
		group::delete(&self.db, user_group_id, user_group_name).await
	}

	async fn list_user_groups(&self) -> CgResult<Vec<UserGroup>> {
		group::list(&self.db).await
	}

	async fn groups_containing_user(&self, username: &str) -> CgResult<Vec<UserGroup>> {
		group::containing_user(&self.db, username).await
	}

	// Users table
	//*************
	async fn read_user(&self, username: &str) -> CgResult<Option<User>> {
		user::read(&self.db, username).await
	}

	async fn write_user(&self, u: &User) -> CgResult<()> {
		user::write(&self.db, u).await
	}

	async fn delete_user(&self, username: &str) -> CgResult<()> {
		user::delete(&self.db, username).await
	}

	async fn list_users(&self) -> CgResult<Vec<User>> {
		user::list(&self.db).await
	}
}

// vim: ts=4
