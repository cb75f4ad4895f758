//! The persistence gateway: a `Categora` store adapter.
//!
//! Every storage backend implements [`StoreAdapter`]. The trait exposes typed
//! operations over five logical tables (Category, Version, Configuration,
//! VersionConfiguration, UserGroups/Users), shaped after the generic
//! key-value operations the services need: point-get by primary/composite
//! key, put/overwrite, delete, linear scan-with-filter, and
//! descending-query-with-limit for latest-version lookups.
//!
//! # Concurrency
//!
//! There is no optimistic-concurrency stamp on writes. Two concurrent
//! editors of the same entity can race: read-modify-write set mutations
//! (group membership, category access) can lose one update, and this is an
//! accepted limitation of the design. Version-slot allocation is the one
//! place a guard exists: [`StoreAdapter::insert_version`] and
//! [`StoreAdapter::insert_config_version`] are conditional creates that fail
//! with [`Error::Conflict`](crate::error::Error::Conflict) when the
//! (partition, version_num) slot is already occupied, so the second of two
//! racing add-version writers fails instead of silently overwriting the
//! first.

use async_trait::async_trait;
use std::fmt::Debug;

use crate::error::CgResult;
use crate::types::{Category, ConfigVersion, Configuration, User, UserGroup, Version};

#[async_trait]
pub trait StoreAdapter: Debug + Send + Sync {
	// Category table
	//****************
	/// Point-get by primary key
	async fn read_category(&self, category_id: &str) -> CgResult<Option<Category>>;
	/// Put/overwrite by primary key
	async fn write_category(&self, category: &Category) -> CgResult<()>;
	async fn delete_category(&self, category_id: &str) -> CgResult<()>;
	/// Linear, unordered scan
	async fn list_categories(&self) -> CgResult<Vec<Category>>;

	// Version table (partition category_id, sort version_num)
	//*********************************************************
	/// Descending query by `version_num`, limit 1
	async fn read_latest_version(&self, category_id: &str) -> CgResult<Option<Version>>;
	/// Scan-with-filter on `category_id`; unordered
	async fn list_versions(&self, category_id: &str) -> CgResult<Vec<Version>>;
	/// Conditional create: fails with Conflict when the
	/// (category_id, version_num) slot already exists
	async fn insert_version(&self, version: &Version) -> CgResult<()>;
	/// Unconditional overwrite by composite key
	async fn write_version(&self, version: &Version) -> CgResult<()>;
	/// Bulk wipe of a category's history (test utility); returns rows removed
	async fn delete_versions(&self, category_id: &str) -> CgResult<u32>;

	// Configuration table (partition category_id, sort configuration_id)
	//********************************************************************
	async fn read_configuration(
		&self,
		category_id: &str,
		configuration_id: &str,
	) -> CgResult<Option<Configuration>>;
	async fn write_configuration(&self, configuration: &Configuration) -> CgResult<()>;
	async fn delete_configuration(&self, category_id: &str, configuration_id: &str)
		-> CgResult<()>;
	/// Scan-with-filter on `category_id`
	async fn list_configurations(&self, category_id: &str) -> CgResult<Vec<Configuration>>;
	async fn list_all_configurations(&self) -> CgResult<Vec<Configuration>>;

	// VersionConfiguration table (partition configuration_id, sort version_num)
	//***************************************************************************
	/// Descending query by `version_num`, limit 1
	async fn read_latest_config_version(
		&self,
		configuration_id: &str,
	) -> CgResult<Option<ConfigVersion>>;
	/// Point-get by exact composite key
	async fn read_config_version(
		&self,
		configuration_id: &str,
		version_num: u32,
	) -> CgResult<Option<ConfigVersion>>;
	async fn list_config_versions(&self, configuration_id: &str) -> CgResult<Vec<ConfigVersion>>;
	/// Conditional create, same guard as [`StoreAdapter::insert_version`]
	async fn insert_config_version(&self, version: &ConfigVersion) -> CgResult<()>;
	async fn write_config_version(&self, version: &ConfigVersion) -> CgResult<()>;
	/// Bulk wipe (test utility); returns rows removed
	async fn delete_config_versions(&self, configuration_id: &str) -> CgResult<u32>;

	// UserGroups table (composite key user_group_id + user_group_name)
	//******************************************************************
	/// Query by partition key alone
	async fn find_user_group(&self, user_group_id: &str) -> CgResult<Option<UserGroup>>;
	/// Point-get by full composite key
	async fn read_user_group(
		&self,
		user_group_id: &str,
		user_group_name: &str,
	) -> CgResult<Option<UserGroup>>;
	async fn write_user_group(&self, group: &UserGroup) -> CgResult<()>;
	async fn delete_user_group(&self, user_group_id: &str, user_group_name: &str) -> CgResult<()>;
	async fn list_user_groups(&self) -> CgResult<Vec<UserGroup>>;
	/// Scan-with-filter: groups whose `user_list` contains the username
	async fn groups_containing_user(&self, username: &str) -> CgResult<Vec<UserGroup>>;

	// Users table
	//*************
	async fn read_user(&self, username: &str) -> CgResult<Option<User>>;
	async fn write_user(&self, user: &User) -> CgResult<()>;
	async fn delete_user(&self, username: &str) -> CgResult<()>;
	async fn list_users(&self) -> CgResult<Vec<User>>;
}

// vim: ts=4
