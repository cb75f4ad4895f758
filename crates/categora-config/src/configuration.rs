//! Configuration lifecycle service.

use std::sync::Arc;

use categora_types::requests::{AddConfigurationRequest, UpdateConfigurationRequest};
use categora_types::utils::name_eq_ignore_case;

use crate::prelude::*;
use crate::version::ConfigVersionEngine;

#[derive(Clone, Debug)]
pub struct ConfigurationService {
	store: Arc<dyn StoreAdapter>,
	versions: ConfigVersionEngine,
}

impl ConfigurationService {
	pub fn new(store: Arc<dyn StoreAdapter>) -> Self {
		let versions = ConfigVersionEngine::new(store.clone());
		Self { store, versions }
	}

	pub fn versions(&self) -> &ConfigVersionEngine {
		&self.versions
	}

	/// Create a configuration under a category, pinned to the caller-supplied
	/// `category_version`, and its version 1 with the caller-supplied initial
	/// status. Duplicate name within the category (case-insensitive) is a
	/// Conflict.
	pub async fn add_configuration(
		&self,
		identity: &Identity,
		request: AddConfigurationRequest,
	) -> CgResult<Configuration> {
		let existing = self.store.list_configurations(&request.category_id).await?;
		if existing.iter().any(|c| name_eq_ignore_case(&c.name, &request.name)) {
			return Err(Error::Conflict(format!(
				"Configuration already exists with name: {}",
				request.name
			)));
		}

		let configuration = Configuration {
			category_id: request.category_id.clone(),
			configuration_id: random_id(),
			name: request.name.clone(),
			category_version: request.category_version,
		};
		self.store.write_configuration(&configuration).await?;

		// Version 1, approver always empty at creation
		self.versions
			.add_version(
				&configuration.configuration_id,
				request.status,
				None,
				&identity.username,
				&request.description,
				request.fields,
			)
			.await?;

		info!(
			category_id = %configuration.category_id,
			configuration_id = %configuration.configuration_id,
			name = %configuration.name,
			"created configuration"
		);
		Ok(configuration)
	}

	pub async fn configuration_by_name(
		&self,
		category_id: &str,
		name: &str,
	) -> CgResult<Option<Configuration>> {
		let configurations = self.store.list_configurations(category_id).await?;
		Ok(configurations.into_iter().find(|c| c.name.as_ref() == name))
	}

	pub async fn configurations_by_category(
		&self,
		category_id: &str,
	) -> CgResult<Vec<Configuration>> {
		self.store.list_configurations(category_id).await
	}

	pub async fn all_configurations(&self) -> CgResult<Vec<Configuration>> {
		self.store.list_all_configurations().await
	}

	/// Edit a configuration. Never mutates an existing version: always
	/// appends a new one with status forced to In Editing and no approver,
	/// regardless of the current state.
	pub async fn update_configuration(
		&self,
		identity: &Identity,
		request: UpdateConfigurationRequest,
	) -> CgResult<Configuration> {
		let configuration = self
			.store
			.read_configuration(&request.category_id, &request.configuration_id)
			.await?
			.ok_or(Error::NotFound)?;

		let history = self.versions.all_versions(&request.configuration_id).await?;
		if history.is_empty() {
			return Err(Error::NotFound);
		}

		self.versions
			.add_version(
				&request.configuration_id,
				VersionStatus::InEditing,
				None,
				&identity.username,
				&request.description,
				request.fields,
			)
			.await?;

		Ok(configuration)
	}

	/// Approve the latest version of a configuration; retires all others.
	pub async fn approve_configuration(
		&self,
		configuration_id: &str,
		approved_by: &str,
	) -> CgResult<()> {
		self.versions.approve(configuration_id, approved_by).await
	}

	/// Retire every version of a configuration.
	pub async fn retire_configuration(&self, configuration_id: &str) -> CgResult<()> {
		self.versions.retire_all(configuration_id).await
	}

	/// Test utility: single-record delete by composite key. The version
	/// history is left in place as an audit trail.
	pub async fn delete_configuration(
		&self,
		category_id: &str,
		configuration_id: &str,
	) -> CgResult<()> {
		self.store
			.read_configuration(category_id, configuration_id)
			.await?
			.ok_or(Error::NotFound)?;
		self.store.delete_configuration(category_id, configuration_id).await
	}

	/// Test utility: wipe every configuration record and its version history.
	pub async fn delete_all_configurations(&self) -> CgResult<u32> {
		let configurations = self.store.list_all_configurations().await?;
		if configurations.is_empty() {
			return Err(Error::NotFound);
		}
		let mut removed = 0;
		for configuration in configurations {
			self.store.delete_config_versions(&configuration.configuration_id).await?;
			self.store
				.delete_configuration(&configuration.category_id, &configuration.configuration_id)
				.await?;
			removed += 1;
		}
		Ok(removed)
	}
}

// vim: ts=4
