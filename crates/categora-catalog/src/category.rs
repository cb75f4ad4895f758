//! Category lifecycle service.
//!
//! Drives the approval state machine over a category's latest version.
//! Older versions are historical and immutable once superseded, except for
//! the retirement transitions applied by approval and teardown. Cascades
//! have no transactional boundary: a failure partway leaves already-applied
//! writes in place and surfaces the error.

use std::collections::HashSet;
use std::sync::Arc;

use categora_access::GroupService;
use categora_config::ConfigurationService;
use categora_types::requests::{AddCategoryRequest, UpdateCategoryRequest};
use categora_types::utils::name_eq_ignore_case;

use crate::prelude::*;
use crate::version::VersionEngine;

/// Configurations pinned to the given category version number.
///
/// The selection step of cascade retirement, kept pure so it can be tested
/// without storage.
pub fn pinned_configurations(
	configurations: &[Configuration],
	version_num: u32,
) -> Vec<&Configuration> {
	configurations.iter().filter(|c| c.category_version == version_num).collect()
}

#[derive(Clone, Debug)]
pub struct CategoryService {
	store: Arc<dyn StoreAdapter>,
	versions: VersionEngine,
	configurations: ConfigurationService,
	groups: GroupService,
}

impl CategoryService {
	pub fn new(store: Arc<dyn StoreAdapter>) -> Self {
		Self {
			versions: VersionEngine::new(store.clone()),
			configurations: ConfigurationService::new(store.clone()),
			groups: GroupService::new(store.clone()),
			store,
		}
	}

	pub fn versions(&self) -> &VersionEngine {
		&self.versions
	}

	pub fn configurations(&self) -> &ConfigurationService {
		&self.configurations
	}

	/// Create a category and its version 1. The name is globally unique,
	/// case-insensitively; a duplicate is a Conflict and writes nothing.
	pub async fn add_category(
		&self,
		identity: &Identity,
		request: AddCategoryRequest,
	) -> CgResult<Category> {
		let categories = self.store.list_categories().await?;
		if categories.iter().any(|c| name_eq_ignore_case(&c.name, &request.name)) {
			return Err(Error::Conflict(format!(
				"Category already exists with name: {}",
				request.name
			)));
		}

		let category = Category { category_id: random_id(), name: request.name };
		self.store.write_category(&category).await?;

		let schema = serde_json::to_string(&request.schema)?;
		self.versions
			.add_version(&category.category_id, &request.description, &identity.username, &schema)
			.await?;

		info!(category_id = %category.category_id, name = %category.name, "created category");
		Ok(category)
	}

	pub async fn category_by_id(&self, category_id: &str) -> CgResult<Category> {
		self.store.read_category(category_id).await?.ok_or(Error::NotFound)
	}

	pub async fn all_categories(&self) -> CgResult<Vec<Category>> {
		self.store.list_categories().await
	}

	/// Categories visible to the caller. An administrator sees everything;
	/// anyone else sees the deduplicated union of `category_access` across
	/// every group they belong to.
	pub async fn accessible_categories(&self, identity: &Identity) -> CgResult<Vec<Category>> {
		if identity.is_admin() {
			return self.store.list_categories().await;
		}

		let mut accessible_ids: HashSet<String> = HashSet::new();
		for group_id in self.groups.user_group_ids(&identity.username).await? {
			if let Some(group) = self.store.find_user_group(&group_id).await? {
				accessible_ids.extend(group.category_access.iter().cloned());
			}
		}

		let mut categories = Vec::with_capacity(accessible_ids.len());
		for category_id in accessible_ids {
			if let Some(category) = self.store.read_category(&category_id).await? {
				categories.push(category);
			}
		}
		Ok(categories)
	}

	/// In Editing → Pending Approval on the latest version. Any other state
	/// is a Conflict; a category or history that does not exist is NotFound.
	pub async fn request_approval(&self, category_id: &str) -> CgResult<()> {
		self.category_by_id(category_id).await?;
		let mut latest =
			self.versions.latest_version(category_id).await?.ok_or(Error::NotFound)?;

		match latest.status {
			VersionStatus::Approved => Err(Error::Conflict(format!(
				"Category is already approved with ID: {}",
				category_id
			))),
			VersionStatus::InEditing => {
				latest.status = VersionStatus::PendingApproval;
				self.versions.update_version(&mut latest).await
			}
			_ => Err(Error::Conflict(
				"Category is not in an editable state to request approval".into(),
			)),
		}
	}

	/// Approve the latest version and retire every previous one. For each
	/// version being retired, all configurations pinned to its number are
	/// retired through the configuration lifecycle (the cross-entity
	/// cascade). Returns the ids of the configurations the cascade retired.
	pub async fn approve_category(
		&self,
		category_id: &str,
		approved_by: &str,
	) -> CgResult<Vec<Box<str>>> {
		self.category_by_id(category_id).await?;
		let latest = self.versions.latest_version(category_id).await?.ok_or(Error::NotFound)?;

		let category_configs = self.configurations.configurations_by_category(category_id).await?;
		let mut retired_ids = Vec::new();

		for mut version in self.versions.all_versions(category_id).await? {
			if version.version_num == latest.version_num {
				version.status = VersionStatus::Approved;
				version.approved_by = Some(approved_by.into());
				version.approved_date = Some(now_iso());
			} else {
				version.status = VersionStatus::Retired;
				retired_ids.extend(
					self.retire_pinned(&category_configs, version.version_num).await?,
				);
			}
			self.versions.update_version(&mut version).await?;
		}

		info!(category_id, approved_by, retired = retired_ids.len(), "approved category");
		Ok(retired_ids)
	}

	/// Edit a category. Branches on the target status and the latest
	/// version's state:
	/// 1. target Retired: full teardown, every version retired and each
	///    version's pinned configurations cascaded to retired;
	/// 2. latest Approved: a new version is appended, preserving the
	///    approved one as history;
	/// 3. latest In Editing / Pending Approval: the latest version is
	///    mutated in place, demoting Pending Approval back to In Editing.
	pub async fn update_category(
		&self,
		identity: &Identity,
		request: UpdateCategoryRequest,
	) -> CgResult<()> {
		self.category_by_id(&request.category_id).await?;
		let mut latest = self
			.versions
			.latest_version(&request.category_id)
			.await?
			.ok_or(Error::NotFound)?;

		let schema = serde_json::to_string(&request.schema)?;

		if request.status == Some(VersionStatus::Retired) {
			let category_configs =
				self.configurations.configurations_by_category(&request.category_id).await?;
			for mut version in self.versions.all_versions(&request.category_id).await? {
				version.status = VersionStatus::Retired;
				self.versions.update_version(&mut version).await?;
				self.retire_pinned(&category_configs, version.version_num).await?;
			}
			info!(category_id = %request.category_id, "retired category");
		} else if latest.status == VersionStatus::Approved {
			self.versions
				.add_version(
					&request.category_id,
					&request.description,
					&identity.username,
					&schema,
				)
				.await?;
		} else {
			latest.description = request.description;
			latest.schema = schema.into();
			if latest.status == VersionStatus::PendingApproval {
				// Any edit during review restarts review
				latest.status = VersionStatus::InEditing;
			}
			self.versions.update_version(&mut latest).await?;
		}
		Ok(())
	}

	/// Supplemental: restart the edit cycle of an approved category by
	/// appending a fresh version. Conflict unless the latest version is
	/// Approved. Latest selection here is max-over-scan, the documented
	/// equivalent of the descending query.
	pub async fn restart_cycle(
		&self,
		identity: &Identity,
		request: UpdateCategoryRequest,
	) -> CgResult<Version> {
		self.category_by_id(&request.category_id).await?;

		let versions = self.versions.all_versions(&request.category_id).await?;
		let latest = versions.iter().max_by_key(|v| v.version_num).ok_or(Error::NotFound)?;

		if latest.status != VersionStatus::Approved {
			return Err(Error::Conflict(
				"Category is not in an approved state to restart the cycle".into(),
			));
		}

		let schema = serde_json::to_string(&request.schema)?;
		self.versions
			.add_version(&request.category_id, &request.description, &identity.username, &schema)
			.await
	}

	/// Test utility: delete the category's configurations, its version
	/// history, then the category record.
	pub async fn delete_category(&self, category_id: &str) -> CgResult<()> {
		self.category_by_id(category_id).await?;

		for config in self.configurations.configurations_by_category(category_id).await? {
			self.configurations
				.delete_configuration(&config.category_id, &config.configuration_id)
				.await?;
		}
		self.store.delete_versions(category_id).await?;
		self.store.delete_category(category_id).await
	}

	/// Retire every configuration pinned to `version_num`; returns their ids.
	async fn retire_pinned(
		&self,
		configurations: &[Configuration],
		version_num: u32,
	) -> CgResult<Vec<Box<str>>> {
		let mut retired = Vec::new();
		for config in pinned_configurations(configurations, version_num) {
			self.configurations.retire_configuration(&config.configuration_id).await?;
			retired.push(config.configuration_id.clone());
		}
		Ok(retired)
	}
}


// vim: ts=4
