//! Version engine for configurations.
//!
//! Mirrors the category version engine one level down: an append-only,
//! monotonically numbered history keyed by `configuration_id`. Unlike
//! category versions, the caller supplies the initial status on creation and
//! may supply the approver directly (used when a configuration is created in
//! a pre-set state).

use std::collections::BTreeMap;
use std::sync::Arc;

use categora_types::requests::UpdateConfigVersionRequest;

use crate::prelude::*;

#[derive(Clone, Debug)]
pub struct ConfigVersionEngine {
	store: Arc<dyn StoreAdapter>,
}

impl ConfigVersionEngine {
	pub fn new(store: Arc<dyn StoreAdapter>) -> Self {
		Self { store }
	}

	/// Latest version by descending query, limit 1. None only before the
	/// configuration's first version is written.
	pub async fn latest_version(&self, configuration_id: &str) -> CgResult<Option<ConfigVersion>> {
		self.store.read_latest_config_version(configuration_id).await
	}

	/// All versions of a configuration, unordered.
	pub async fn all_versions(&self, configuration_id: &str) -> CgResult<Vec<ConfigVersion>> {
		self.store.list_config_versions(configuration_id).await
	}

	/// Append a new version: next number = latest + 1, or 1 for the first.
	///
	/// This is the only path that allocates configuration version numbers.
	/// `approved_date` is stamped iff `approved_by` is given.
	pub async fn add_version(
		&self,
		configuration_id: &str,
		status: VersionStatus,
		approved_by: Option<&str>,
		created_by: &str,
		description: &str,
		fields: BTreeMap<String, serde_json::Value>,
	) -> CgResult<ConfigVersion> {
		let next_num = match self.latest_version(configuration_id).await? {
			Some(latest) => latest.version_num + 1,
			None => 1,
		};

		let version = ConfigVersion {
			configuration_id: configuration_id.into(),
			version_num: next_num,
			status,
			description: description.into(),
			fields,
			approved_by: approved_by.map(Into::into),
			approved_date: approved_by.is_some().then(now_iso),
			created_by: created_by.into(),
			created_date: now_iso(),
		};
		self.store.insert_config_version(&version).await?;
		debug!(configuration_id, version_num = next_num, "added configuration version");
		Ok(version)
	}

	/// Approve the latest version and retire every other one in the same
	/// pass. Fails with Conflict when the latest is already Approved, with
	/// NotFound when the configuration has no versions.
	pub async fn approve(&self, configuration_id: &str, approved_by: &str) -> CgResult<()> {
		let latest = self
			.latest_version(configuration_id)
			.await?
			.ok_or(Error::NotFound)?;

		let all = self.all_versions(configuration_id).await?;
		for mut version in all {
			if version.version_num == latest.version_num {
				if version.status == VersionStatus::Approved {
					return Err(Error::Conflict(format!(
						"Configuration {} is already approved",
						configuration_id
					)));
				}
				version.status = VersionStatus::Approved;
				version.approved_by = Some(approved_by.into());
				version.approved_date = Some(now_iso());
			} else {
				version.status = VersionStatus::Retired;
			}
			self.store.write_config_version(&version).await?;
		}
		debug!(configuration_id, approved_by, "approved configuration");
		Ok(())
	}

	/// Retire every version of a configuration. NotFound when the history is
	/// empty.
	pub async fn retire_all(&self, configuration_id: &str) -> CgResult<()> {
		let versions = self.all_versions(configuration_id).await?;
		if versions.is_empty() {
			return Err(Error::NotFound);
		}
		for mut version in versions {
			version.status = VersionStatus::Retired;
			self.store.write_config_version(&version).await?;
		}
		debug!(configuration_id, "retired all configuration versions");
		Ok(())
	}

	/// Targeted single-version update by exact (configuration_id,
	/// version_num) key. NotFound when the pair does not exist; a status
	/// change is validated against the transition table.
	pub async fn update_version(
		&self,
		configuration_id: &str,
		version_num: u32,
		request: &UpdateConfigVersionRequest,
	) -> CgResult<ConfigVersion> {
		let mut version = self
			.store
			.read_config_version(configuration_id, version_num)
			.await?
			.ok_or(Error::NotFound)?;

		if let Some(status) = request.status {
			if !version.status.can_transition(status) {
				return Err(Error::Conflict(format!(
					"Illegal status transition from {} to {}",
					version.status, status
				)));
			}
			version.status = status;
		}
		if let Some(approved_by) = &request.approved_by {
			version.approved_by = Some(approved_by.clone());
			version.approved_date = Some(now_iso());
		}
		version.description = request.description.clone();
		version.fields = request.fields.clone();

		self.store.write_config_version(&version).await?;
		Ok(version)
	}
}

// vim: ts=4
