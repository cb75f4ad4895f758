//! In-memory store adapter.
//!
//! Keeps all five logical tables in `BTreeMap`s behind a single
//! `parking_lot::RwLock`. Non-persistent; the backend the service crates test
//! against, also usable by embedders that want a throwaway store.

use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::BTreeMap;

use categora::prelude::*;
use categora::store_adapter::StoreAdapter;

#[derive(Debug, Default)]
struct Tables {
	categories: BTreeMap<String, Category>,
	versions: BTreeMap<(String, u32), Version>,
	configurations: BTreeMap<(String, String), Configuration>,
	config_versions: BTreeMap<(String, u32), ConfigVersion>,
	groups: BTreeMap<(String, String), UserGroup>,
	users: BTreeMap<String, User>,
}

#[derive(Debug, Default)]
pub struct StoreAdapterMemory {
	tables: RwLock<Tables>,
}

impl StoreAdapterMemory {
	pub fn new() -> Self {
		Self::default()
	}
}

#[async_trait]
impl StoreAdapter for StoreAdapterMemory {
	// Category table
	//****************
	async fn read_category(&self, category_id: &str) -> CgResult<Option<Category>> {
		Ok(self.tables.read().categories.get(category_id).cloned())
	}

	async fn write_category(&self, category: &Category) -> CgResult<()> {
		self.tables
			.write()
			.categories
			.insert(category.category_id.to_string(), category.clone());
		Ok(())
	}

	async fn delete_category(&self, category_id: &str) -> CgResult<()> {
		self.tables.write().categories.remove(category_id);
		Ok(())
	}

	async fn list_categories(&self) -> CgResult<Vec<Category>> {
		Ok(self.tables.read().categories.values().cloned().collect())
	}

	// Version table
	//***************
	async fn read_latest_version(&self, category_id: &str) -> CgResult<Option<Version>> {
		let tables = self.tables.read();
		let latest = tables
			.versions
			.range((category_id.to_string(), 0)..=(category_id.to_string(), u32::MAX))
			.next_back()
			.map(|(_, v)| v.clone());
		Ok(latest)
	}

	async fn list_versions(&self, category_id: &str) -> CgResult<Vec<Version>> {
		let tables = self.tables.read();
		Ok(tables
			.versions
			.values()
			.filter(|v| v.category_id.as_ref() == category_id)
			.cloned()
			.collect())
	}

	async fn insert_version(&self, version: &Version) -> CgResult<()> {
		let mut tables = self.tables.write();
		let key = (version.category_id.to_string(), version.version_num);
		if tables.versions.contains_key(&key) {
			return Err(Error::Conflict(format!(
				"Version {} already exists for category {}",
				version.version_num, version.category_id
			)));
		}
		tables.versions.insert(key, version.clone());
		Ok(())
	}

	async fn write_version(&self, version: &Version) -> CgResult<()> {
		let key = (version.category_id.to_string(), version.version_num);
		self.tables.write().versions.insert(key, version.clone());
		Ok(())
	}

	async fn delete_versions(&self, category_id: &str) -> CgResult<u32> {
		let mut tables = self.tables.write();
		let keys: Vec<_> = tables
			.versions
			.range((category_id.to_string(), 0)..=(category_id.to_string(), u32::MAX))
			.map(|(k, _)| k.clone())
			.collect();
		for key in &keys {
			tables.versions.remove(key);
		}
		Ok(keys.len() as u32)
	}

	// Configuration table
	//*********************
	async fn read_configuration(
		&self,
		category_id: &str,
		configuration_id: &str,
	) -> CgResult<Option<Configuration>> {
		let key = (category_id.to_string(), configuration_id.to_string());
		Ok(self.tables.read().configurations.get(&key).cloned())
	}

	async fn write_configuration(&self, configuration: &Configuration) -> CgResult<()> {
		let key =
			(configuration.category_id.to_string(), configuration.configuration_id.to_string());
		self.tables.write().configurations.insert(key, configuration.clone());
		Ok(())
	}

	async fn delete_configuration(
		&self,
		category_id: &str,
		configuration_id: &str,
	) -> CgResult<()> {
		let key = (category_id.to_string(), configuration_id.to_string());
		self.tables.write().configurations.remove(&key);
		Ok(())
	}

	async fn list_configurations(&self, category_id: &str) -> CgResult<Vec<Configuration>> {
		let tables = self.tables.read();
		Ok(tables
			.configurations
			.values()
			.filter(|c| c.category_id.as_ref() == category_id)
			.cloned()
			.collect())
	}

	async fn list_all_configurations(&self) -> CgResult<Vec<Configuration>> {
		Ok(self.tables.read().configurations.values().cloned().collect())
	}

	// VersionConfiguration table
	//****************************
	async fn read_latest_config_version(
		&self,
		configuration_id: &str,
	) -> CgResult<Option<ConfigVersion>> {
		let tables = self.tables.read();
		let latest = tables
			.config_versions
			.range((configuration_id.to_string(), 0)..=(configuration_id.to_string(), u32::MAX))
			.next_back()
			.map(|(_, v)| v.clone());
		Ok(latest)
	}

	async fn read_config_version(
		&self,
		configuration_id: &str,
		version_num: u32,
	) -> CgResult<Option<ConfigVersion>> {
		let key = (configuration_id.to_string(), version_num);
		Ok(self.tables.read().config_versions.get(&key).cloned())
	}

	async fn list_config_versions(&self, configuration_id: &str) -> CgResult<Vec<ConfigVersion>> {
		let tables = self.tables.read();
		Ok(tables
			.config_versions
			.values()
			.filter(|v| v.configuration_id.as_ref() == configuration_id)
			.cloned()
			.collect())
	}

	async fn insert_config_version(&self, version: &ConfigVersion) -> CgResult<()> {
		let mut tables = self.tables.write();
		let key = (version.configuration_id.to_string(), version.version_num);
		if tables.config_versions.contains_key(&key) {
			return Err(Error::Conflict(format!(
				"Version {} already exists for configuration {}",
				version.version_num, version.configuration_id
			)));
		}
		tables.config_versions.insert(key, version.clone());
		Ok(())
	}

	async fn write_config_version(&self, version: &ConfigVersion) -> CgResult<()> {
		let key = (version.configuration_id.to_string(), version.version_num);
		self.tables.write().config_versions.insert(key, version.clone());
		Ok(())
	}

	async fn delete_config_versions(&self, configuration_id: &str) -> CgResult<u32> {
		let mut tables = self.tables.write();
		let keys: Vec<_> = tables
			.config_versions
			.range((configuration_id.to_string(), 0)..=(configuration_id.to_string(), u32::MAX))
			.map(|(k, _)| k.clone())
			.collect();
		for key in &keys {
			tables.config_versions.remove(key);
		}
		Ok(keys.len() as u32)
	}

	// UserGroups table
	//******************
	async fn find_user_group(&self, user_group_id: &str) -> CgResult<Option<UserGroup>> {
		let tables = self.tables.read();
		Ok(tables
			.groups
			.values()
			.find(|g| g.user_group_id.as_ref() == user_group_id)
			.cloned())
	}

	async fn read_user_group(
		&self,
		user_group_id: &str,
		user_group_name: &str,
	) -> CgResult<Option<UserGroup>> {
		let key = (user_group_id.to_string(), user_group_name.to_string());
		Ok(self.tables.read().groups.get(&key).cloned())
	}

	async fn write_user_group(&self, group: &UserGroup) -> CgResult<()> {
		let key = (group.user_group_id.to_string(), group.user_group_name.to_string());
		self.tables.write().groups.insert(key, group.clone());
		Ok(())
	}

	async fn delete_user_group(
		&self,
		user_group_id: &str,
		user_group_name: &str,
	) -> CgResult<()> {
		let key = (user_group_id.to_string(), user_group_name.to_string());
		self.tables.write().groups.remove(&key);
		Ok(())
	}

	async fn list_user_groups(&self) -> CgResult<Vec<UserGroup>> {
		Ok(self.tables.read().groups.values().cloned().collect())
	}

	async fn groups_containing_user(&self, username: &str) -> CgResult<Vec<UserGroup>> {
		let tables = self.tables.read();
		Ok(tables
			.groups
			.values()
			.filter(|g| g.user_list.contains(username))
			.cloned()
			.collect())
	}

	// Users table
	//*************
	async fn read_user(&self, username: &str) -> CgResult<Option<User>> {
		Ok(self.tables.read().users.get(username).cloned())
	}

	async fn write_user(&self, user: &User) -> CgResult<()> {
		self.tables.write().users.insert(user.username.to_string(), user.clone());
		Ok(())
	}

	async fn delete_user(&self, username: &str) -> CgResult<()> {
		self.tables.write().users.remove(username);
		Ok(())
	}

	async fn list_users(&self) -> CgResult<Vec<User>> {
		Ok(self.tables.read().users.values().cloned().collect())
	}
}


// vim: ts=4
