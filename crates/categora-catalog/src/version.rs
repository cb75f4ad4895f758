//! Version engine for categories.
//!
//! Maintains the append-only version history of a category: contiguous
//! numbering from 1, no gaps, no reuse. Latest-version selection is a
//! descending query limited to one result at the store; a scan-then-max
//! fallback must return the same version.

use std::sync::Arc;

use crate::prelude::*;

#[derive(Clone, Debug)]
pub struct VersionEngine {
	store: Arc<dyn StoreAdapter>,
}

impl VersionEngine {
	pub fn new(store: Arc<dyn StoreAdapter>) -> Self {
		Self { store }
	}

	/// The version with the highest `version_num`, or None when the category
	/// has no versions yet (only true immediately after category creation,
	/// before its first version is written).
	pub async fn latest_version(&self, category_id: &str) -> CgResult<Option<Version>> {
		self.store.read_latest_version(category_id).await
	}

	/// All versions of a category, unordered; callers sort as needed.
	pub async fn all_versions(&self, category_id: &str) -> CgResult<Vec<Version>> {
		self.store.list_versions(category_id).await
	}

	/// Append a new version: next number = latest + 1, or 1 for the first.
	/// The only path that allocates version numbers. New versions always
	/// start In Editing with empty approver fields.
	pub async fn add_version(
		&self,
		category_id: &str,
		description: &str,
		created_by: &str,
		schema: &str,
	) -> CgResult<Version> {
		let next_num = match self.latest_version(category_id).await? {
			Some(latest) => latest.version_num + 1,
			None => 1,
		};

		let version = Version {
			version_id: random_id(),
			category_id: category_id.into(),
			version_num: next_num,
			description: description.into(),
			status: VersionStatus::InEditing,
			schema: schema.into(),
			approved_by: None,
			approved_date: None,
			created_by: created_by.into(),
			created_date: now_iso(),
		};
		self.store.insert_version(&version).await?;
		debug!(category_id, version_num = next_num, "added category version");
		Ok(version)
	}

	/// Persist an already-mutated version verbatim.
	///
	/// Quirk preserved from the original system: `created_date` is refreshed
	/// on every update, so it effectively behaves as a last-modified stamp.
	pub async fn update_version(&self, version: &mut Version) -> CgResult<()> {
		version.created_date = now_iso();
		self.store.write_version(version).await
	}
}

// vim: ts=4
