//! Store adapter CRUD operation tests
//!
//! Tests create, read, update and delete paths for every table.

use std::collections::{BTreeMap, BTreeSet};

use categora::store_adapter::StoreAdapter;
use categora::types::{Category, ConfigVersion, Configuration, User, UserGroup, Version, VersionStatus};
use categora_store_adapter_sqlite::StoreAdapterSqlite;
use tempfile::TempDir;

async fn create_test_adapter() -> (StoreAdapterSqlite, TempDir) {
	let temp_dir = TempDir::new().expect("Failed to create temp directory");

	let adapter = StoreAdapterSqlite::new(temp_dir.path().join("store.db"))
		.await
		.expect("Failed to create adapter");

	(adapter, temp_dir)
}

fn version(category_id: &str, version_num: u32, status: VersionStatus) -> Version {
	Version {
		version_id: format!("v-{}-{}", category_id, version_num).into(),
		category_id: category_id.into(),
		version_num,
		description: "test version".into(),
		status,
		schema: "{}".into(),
		approved_by: None,
		approved_date: None,
		created_by: "alice".into(),
		created_date: "2025-01-01T00:00:00.000Z".into(),
	}
}

fn config_version(configuration_id: &str, version_num: u32, status: VersionStatus) -> ConfigVersion {
	ConfigVersion {
		configuration_id: configuration_id.into(),
		version_num,
		status,
		description: "test config version".into(),
		fields: BTreeMap::from([("timeout".to_string(), serde_json::json!(30))]),
		approved_by: None,
		approved_date: None,
		created_by: "alice".into(),
		created_date: "2025-01-01T00:00:00.000Z".into(),
	}
}

#[tokio::test]
async fn test_category_roundtrip() {
	let (adapter, _temp) = create_test_adapter().await;

	let cat = Category { category_id: "cat-1".into(), name: "Network".into() };
	adapter.write_category(&cat).await.expect("Should write category");

	let read = adapter.read_category("cat-1").await.expect("Should read category");
	assert_eq!(read.as_ref().map(|c| c.name.as_ref()), Some("Network"));

	adapter.delete_category("cat-1").await.expect("Should delete category");
	let gone = adapter.read_category("cat-1").await.expect("Should read category");
	assert!(gone.is_none(), "Deleted category should not be readable");
}

#[tokio::test]
async fn test_read_missing_category() {
	let (adapter, _temp) = create_test_adapter().await;

	let read = adapter.read_category("no-such-id").await.expect("Read should not fail");
	assert!(read.is_none());
}

#[tokio::test]
async fn test_version_insert_and_overwrite() {
	let (adapter, _temp) = create_test_adapter().await;

	let v1 = version("cat-1", 1, VersionStatus::InEditing);
	adapter.insert_version(&v1).await.expect("Should insert version 1");

	// Inserting into an occupied slot is a conflict
	let dup = version("cat-1", 1, VersionStatus::InEditing);
	let err = adapter.insert_version(&dup).await.expect_err("Duplicate slot should conflict");
	assert!(matches!(err, categora::error::Error::Conflict(_)));

	// write_version overwrites in place
	let mut updated = v1.clone();
	updated.status = VersionStatus::PendingApproval;
	adapter.write_version(&updated).await.expect("Should overwrite version");

	let latest = adapter
		.read_latest_version("cat-1")
		.await
		.expect("Should read latest")
		.expect("Version should exist");
	assert_eq!(latest.status, VersionStatus::PendingApproval);
}

#[tokio::test]
async fn test_delete_versions_reports_count() {
	let (adapter, _temp) = create_test_adapter().await;

	for num in 1..=3 {
		adapter
			.insert_version(&version("cat-1", num, VersionStatus::Retired))
			.await
			.expect("Should insert version");
	}
	adapter
		.insert_version(&version("cat-2", 1, VersionStatus::InEditing))
		.await
		.expect("Should insert version");

	let deleted = adapter.delete_versions("cat-1").await.expect("Should delete versions");
	assert_eq!(deleted, 3);

	// The other category is untouched
	let remaining = adapter.list_versions("cat-2").await.expect("Should list versions");
	assert_eq!(remaining.len(), 1);
}

#[tokio::test]
async fn test_configuration_roundtrip() {
	let (adapter, _temp) = create_test_adapter().await;

	let config = Configuration {
		category_id: "cat-1".into(),
		configuration_id: "cfg-1".into(),
		name: "edge-router".into(),
		category_version: 1,
	};
	adapter.write_configuration(&config).await.expect("Should write configuration");

	let read = adapter
		.read_configuration("cat-1", "cfg-1")
		.await
		.expect("Should read configuration")
		.expect("Configuration should exist");
	assert_eq!(read.name.as_ref(), "edge-router");
	assert_eq!(read.category_version, 1);

	adapter.delete_configuration("cat-1", "cfg-1").await.expect("Should delete configuration");
	let gone = adapter.read_configuration("cat-1", "cfg-1").await.expect("Should read");
	assert!(gone.is_none());
}

#[tokio::test]
async fn test_config_version_fields_survive_roundtrip() {
	let (adapter, _temp) = create_test_adapter().await;

	let v = config_version("cfg-1", 1, VersionStatus::InEditing);
	adapter.insert_config_version(&v).await.expect("Should insert config version");

	let read = adapter
		.read_config_version("cfg-1", 1)
		.await
		.expect("Should read config version")
		.expect("Config version should exist");
	assert_eq!(read.fields.get("timeout"), Some(&serde_json::json!(30)));
	assert_eq!(read.status, VersionStatus::InEditing);
}

#[tokio::test]
async fn test_config_version_insert_conflict() {
	let (adapter, _temp) = create_test_adapter().await;

	adapter
		.insert_config_version(&config_version("cfg-1", 1, VersionStatus::InEditing))
		.await
		.expect("Should insert config version");

	let err = adapter
		.insert_config_version(&config_version("cfg-1", 1, VersionStatus::Approved))
		.await
		.expect_err("Duplicate slot should conflict");
	assert!(matches!(err, categora::error::Error::Conflict(_)));
}

#[tokio::test]
async fn test_user_group_roundtrip() {
	let (adapter, _temp) = create_test_adapter().await;

	let group = UserGroup {
		user_group_id: "grp-1".into(),
		user_group_name: "operators".into(),
		user_list: BTreeSet::from(["alice".to_string(), "bob".to_string()]),
		category_access: BTreeSet::from(["cat-1".to_string()]),
	};
	adapter.write_user_group(&group).await.expect("Should write group");

	let read = adapter
		.read_user_group("grp-1", "operators")
		.await
		.expect("Should read group")
		.expect("Group should exist");
	assert!(read.user_list.contains("alice"));
	assert!(read.category_access.contains("cat-1"));

	// Lookup by id alone
	let found = adapter
		.find_user_group("grp-1")
		.await
		.expect("Should find group")
		.expect("Group should exist");
	assert_eq!(found.user_group_name.as_ref(), "operators");

	adapter.delete_user_group("grp-1", "operators").await.expect("Should delete group");
	let gone = adapter.find_user_group("grp-1").await.expect("Should find");
	assert!(gone.is_none());
}

#[tokio::test]
async fn test_user_roundtrip() {
	let (adapter, _temp) = create_test_adapter().await;

	let user = User {
		user_id: "u-1".into(),
		username: "alice".into(),
		password_hash: "$argon2$stub".into(),
		roles: vec!["ADMIN".into()],
	};
	adapter.write_user(&user).await.expect("Should write user");

	let read = adapter
		.read_user("alice")
		.await
		.expect("Should read user")
		.expect("User should exist");
	assert_eq!(read.roles, vec![Box::<str>::from("ADMIN")]);
	assert_eq!(read.password_hash.as_ref(), "$argon2$stub");

	adapter.delete_user("alice").await.expect("Should delete user");
	let gone = adapter.read_user("alice").await.expect("Should read");
	assert!(gone.is_none());
}

// vim: ts=4
