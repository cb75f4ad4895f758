//! Configuration lifecycle tests
//!
//! Covers creation with a caller-supplied initial status, the always-append
//! update rule, approval with history retirement, and the targeted
//! single-version update.

use std::collections::BTreeMap;
use std::sync::Arc;

use categora_config::ConfigurationService;
use categora_store_adapter_memory::StoreAdapterMemory;
use categora_types::error::Error;
use categora_types::requests::{
	AddConfigurationRequest, UpdateConfigVersionRequest, UpdateConfigurationRequest,
};
use categora_types::types::{Identity, VersionStatus};

fn service() -> ConfigurationService {
	ConfigurationService::new(Arc::new(StoreAdapterMemory::new()))
}

fn alice() -> Identity {
	Identity::new("alice", &[])
}

fn add_request(name: &str, status: VersionStatus) -> AddConfigurationRequest {
	AddConfigurationRequest {
		category_id: "cat-1".into(),
		category_version: 1,
		name: name.into(),
		description: "test configuration".into(),
		status,
		fields: BTreeMap::from([("timeout".to_string(), serde_json::json!(30))]),
	}
}

#[tokio::test]
async fn test_create_writes_version_one_with_given_status() {
	let service = service();

	let config = service
		.add_configuration(&alice(), add_request("edge-router", VersionStatus::InEditing))
		.await
		.expect("Should create configuration");
	assert_eq!(config.category_version, 1);

	let latest = service
		.versions()
		.latest_version(&config.configuration_id)
		.await
		.expect("read latest")
		.expect("Version 1 should exist");
	assert_eq!(latest.version_num, 1);
	assert_eq!(latest.status, VersionStatus::InEditing);
	assert_eq!(latest.created_by.as_ref(), "alice");
	assert!(latest.approved_by.is_none(), "Approver is always empty at creation");
	assert_eq!(latest.fields.get("timeout"), Some(&serde_json::json!(30)));
}

#[tokio::test]
async fn test_duplicate_name_within_category_is_conflict() {
	let service = service();
	service
		.add_configuration(&alice(), add_request("edge-router", VersionStatus::InEditing))
		.await
		.expect("create");

	let err = service
		.add_configuration(&alice(), add_request("Edge-Router", VersionStatus::InEditing))
		.await
		.expect_err("Case-insensitive duplicate should conflict");
	assert!(matches!(err, Error::Conflict(_)));
}

#[tokio::test]
async fn test_update_always_appends_in_editing() {
	let service = service();
	let config = service
		.add_configuration(&alice(), add_request("edge-router", VersionStatus::Approved))
		.await
		.expect("create");

	service
		.update_configuration(
			&alice(),
			UpdateConfigurationRequest {
				category_id: config.category_id.clone(),
				configuration_id: config.configuration_id.clone(),
				description: "raise timeout".into(),
				fields: BTreeMap::from([("timeout".to_string(), serde_json::json!(60))]),
			},
		)
		.await
		.expect("Should append a version");

	let mut versions = service
		.versions()
		.all_versions(&config.configuration_id)
		.await
		.expect("list versions");
	versions.sort_by_key(|v| v.version_num);

	assert_eq!(versions.len(), 2);
	// The original version is untouched
	assert_eq!(versions[0].status, VersionStatus::Approved);
	assert_eq!(versions[0].fields.get("timeout"), Some(&serde_json::json!(30)));
	// The appended one starts the edit cycle over
	assert_eq!(versions[1].status, VersionStatus::InEditing);
	assert!(versions[1].approved_by.is_none());
	assert_eq!(versions[1].fields.get("timeout"), Some(&serde_json::json!(60)));
}

#[tokio::test]
async fn test_update_unknown_configuration_is_not_found() {
	let service = service();

	let err = service
		.update_configuration(
			&alice(),
			UpdateConfigurationRequest {
				category_id: "cat-1".into(),
				configuration_id: "nope".into(),
				description: "".into(),
				fields: BTreeMap::new(),
			},
		)
		.await
		.expect_err("Unknown configuration");
	assert!(matches!(err, Error::NotFound));
}

#[tokio::test]
async fn test_approve_retires_older_versions() {
	let service = service();
	let config = service
		.add_configuration(&alice(), add_request("edge-router", VersionStatus::InEditing))
		.await
		.expect("create");

	service
		.update_configuration(
			&alice(),
			UpdateConfigurationRequest {
				category_id: config.category_id.clone(),
				configuration_id: config.configuration_id.clone(),
				description: "second draft".into(),
				fields: BTreeMap::new(),
			},
		)
		.await
		.expect("append v2");

	service
		.approve_configuration(&config.configuration_id, "admin")
		.await
		.expect("Should approve");

	let mut versions = service
		.versions()
		.all_versions(&config.configuration_id)
		.await
		.expect("list versions");
	versions.sort_by_key(|v| v.version_num);

	assert_eq!(versions[0].status, VersionStatus::Retired);
	assert_eq!(versions[1].status, VersionStatus::Approved);
	assert_eq!(versions[1].approved_by.as_deref(), Some("admin"));
	assert!(versions[1].approved_date.is_some());
}

#[tokio::test]
async fn test_approving_twice_is_conflict() {
	let service = service();
	let config = service
		.add_configuration(&alice(), add_request("edge-router", VersionStatus::InEditing))
		.await
		.expect("create");

	service
		.approve_configuration(&config.configuration_id, "admin")
		.await
		.expect("first approval");

	let err = service
		.approve_configuration(&config.configuration_id, "admin")
		.await
		.expect_err("Second approval of the same version");
	assert!(matches!(err, Error::Conflict(_)));
}

#[tokio::test]
async fn test_retire_unknown_configuration_is_not_found() {
	let service = service();

	let err = service.retire_configuration("nope").await.expect_err("No history");
	assert!(matches!(err, Error::NotFound));
}

#[tokio::test]
async fn test_targeted_version_update() {
	let service = service();
	let config = service
		.add_configuration(&alice(), add_request("edge-router", VersionStatus::InEditing))
		.await
		.expect("create");

	let updated = service
		.versions()
		.update_version(
			&config.configuration_id,
			1,
			&UpdateConfigVersionRequest {
				status: Some(VersionStatus::PendingApproval),
				approved_by: None,
				description: "ready for review".into(),
				fields: BTreeMap::from([("timeout".to_string(), serde_json::json!(45))]),
			},
		)
		.await
		.expect("Should update version 1");

	assert_eq!(updated.status, VersionStatus::PendingApproval);
	assert_eq!(updated.description.as_ref(), "ready for review");
	assert_eq!(updated.fields.get("timeout"), Some(&serde_json::json!(45)));

	// The exact-key miss is NotFound
	let err = service
		.versions()
		.update_version(&config.configuration_id, 9, &UpdateConfigVersionRequest::default())
		.await
		.expect_err("Unknown version number");
	assert!(matches!(err, Error::NotFound));
}

#[tokio::test]
async fn test_illegal_status_transition_is_rejected() {
	let service = service();
	let config = service
		.add_configuration(&alice(), add_request("edge-router", VersionStatus::InEditing))
		.await
		.expect("create");

	// In Editing cannot jump straight to Approved
	let err = service
		.versions()
		.update_version(
			&config.configuration_id,
			1,
			&UpdateConfigVersionRequest {
				status: Some(VersionStatus::Approved),
				..Default::default()
			},
		)
		.await
		.expect_err("Skipping review");
	assert!(matches!(err, Error::Conflict(_)));
}

#[tokio::test]
async fn test_delete_all_configurations() {
	let service = service();

	// Empty store: nothing to delete
	let err = service.delete_all_configurations().await.expect_err("Nothing to delete");
	assert!(matches!(err, Error::NotFound));

	service
		.add_configuration(&alice(), add_request("edge-router", VersionStatus::InEditing))
		.await
		.expect("create");
	service
		.add_configuration(&alice(), add_request("core-router", VersionStatus::InEditing))
		.await
		.expect("create");

	let removed = service.delete_all_configurations().await.expect("Should wipe");
	assert_eq!(removed, 2);
	let remaining = service.all_configurations().await.expect("list");
	assert!(remaining.is_empty());
}

// vim: ts=4
