//! Stored entities and the version status machine.
//!
//! Field names are stable wire/storage identifiers shared with pre-existing
//! stored data (`category_id`, `version_num`, `category_version`, ...); the
//! Rust field names match them verbatim, so serde needs no renames except on
//! the status strings.

use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use std::collections::{BTreeMap, BTreeSet};

/// Lifecycle status of a [`Version`] or [`ConfigVersion`].
///
/// Serializes to the exact legacy status strings. Transitions are validated
/// centrally through [`VersionStatus::can_transition`]:
/// InEditing → PendingApproval → Approved, PendingApproval → InEditing
/// (any edit during review restarts review), and any state → Retired.
/// Retired is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VersionStatus {
	#[serde(rename = "In Editing")]
	InEditing,
	#[serde(rename = "Pending Approval")]
	PendingApproval,
	#[serde(rename = "Approved")]
	Approved,
	#[serde(rename = "Retired")]
	Retired,
}

impl VersionStatus {
	pub fn as_str(self) -> &'static str {
		match self {
			VersionStatus::InEditing => "In Editing",
			VersionStatus::PendingApproval => "Pending Approval",
			VersionStatus::Approved => "Approved",
			VersionStatus::Retired => "Retired",
		}
	}

	/// Central transition table for the approval state machine.
	pub fn can_transition(self, next: VersionStatus) -> bool {
		use VersionStatus::*;
		match (self, next) {
			(InEditing, PendingApproval) => true,
			(PendingApproval, Approved) => true,
			(PendingApproval, InEditing) => true,
			(Retired, _) => false,
			(_, Retired) => true,
			_ => false,
		}
	}
}

impl std::fmt::Display for VersionStatus {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		f.write_str(self.as_str())
	}
}

impl std::str::FromStr for VersionStatus {
	type Err = crate::error::Error;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"In Editing" => Ok(VersionStatus::InEditing),
			"Pending Approval" => Ok(VersionStatus::PendingApproval),
			"Approved" => Ok(VersionStatus::Approved),
			"Retired" => Ok(VersionStatus::Retired),
			_ => Err(crate::error::Error::Parse),
		}
	}
}

/// A named, versioned schema definition. `name` is globally unique,
/// case-insensitively.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Category {
	pub category_id: Box<str>,
	pub name: Box<str>,
}

/// One revision in a category's history. Partition key `category_id`, sort
/// key `version_num` (contiguous from 1, never reused).
#[skip_serializing_none]
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Version {
	pub version_id: Box<str>,
	pub category_id: Box<str>,
	pub version_num: u32,
	#[serde(default)]
	pub description: Box<str>,
	pub status: VersionStatus,
	/// Opaque serialized JSON schema blob
	#[serde(default)]
	pub schema: Box<str>,
	pub approved_by: Option<Box<str>>,
	pub approved_date: Option<Box<str>>,
	pub created_by: Box<str>,
	pub created_date: Box<str>,
}

/// A named instance under a category, pinned to the category version it was
/// created/last edited against. Partition key `category_id`, sort key
/// `configuration_id`; `name` is unique within the category,
/// case-insensitively.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Configuration {
	pub category_id: Box<str>,
	pub configuration_id: Box<str>,
	pub name: Box<str>,
	pub category_version: u32,
}

/// One revision in a configuration's history, numbered independently of the
/// parent category's versions. Stored in the `VersionConfiguration` table.
#[skip_serializing_none]
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ConfigVersion {
	pub configuration_id: Box<str>,
	pub version_num: u32,
	pub status: VersionStatus,
	#[serde(default)]
	pub description: Box<str>,
	/// Opaque key → value payload
	#[serde(default)]
	pub fields: BTreeMap<String, serde_json::Value>,
	pub approved_by: Option<Box<str>>,
	pub approved_date: Option<Box<str>>,
	pub created_by: Box<str>,
	pub created_date: Box<str>,
}

/// A named set of users granting shared category visibility. Composite key
/// (`user_group_id`, `user_group_name`).
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UserGroup {
	pub user_group_id: Box<str>,
	pub user_group_name: Box<str>,
	#[serde(default)]
	pub user_list: BTreeSet<String>,
	#[serde(default)]
	pub category_access: BTreeSet<String>,
}

/// A user account. The password hash is opaque to this core; hashing is the
/// authentication provider's concern.
#[skip_serializing_none]
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct User {
	pub user_id: Box<str>,
	pub username: Box<str>,
	#[serde(skip_serializing, default)]
	pub password_hash: Box<str>,
	#[serde(default)]
	pub roles: Vec<Box<str>>,
}

pub const ROLE_ADMIN: &str = "ADMIN";

/// Caller identity established by the authentication provider, passed
/// explicitly into every lifecycle operation that stamps `created_by` /
/// `approved_by` or filters visibility by role.
#[derive(Debug, Clone)]
pub struct Identity {
	pub username: Box<str>,
	pub roles: Box<[Box<str>]>,
}

impl Identity {
	pub fn new(username: impl Into<Box<str>>, roles: &[&str]) -> Self {
		Self {
			username: username.into(),
			roles: roles.iter().map(|r| Box::from(*r)).collect(),
		}
	}

	pub fn is_admin(&self) -> bool {
		self.roles.iter().any(|r| r.as_ref() == ROLE_ADMIN)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_status_strings_roundtrip() {
		for s in ["In Editing", "Pending Approval", "Approved", "Retired"] {
			let status: VersionStatus = s.parse().expect("known status");
			assert_eq!(status.as_str(), s);
			let json = serde_json::to_string(&status).expect("serialize");
			assert_eq!(json, format!("\"{}\"", s));
		}
	}

	#[test]
	fn test_transition_table() {
		use VersionStatus::*;
		assert!(InEditing.can_transition(PendingApproval));
		assert!(PendingApproval.can_transition(Approved));
		assert!(PendingApproval.can_transition(InEditing));
		assert!(Approved.can_transition(Retired));
		assert!(!InEditing.can_transition(Approved));
		assert!(!Approved.can_transition(InEditing));
		assert!(!Retired.can_transition(InEditing));
		assert!(!Retired.can_transition(Approved));
	}

	#[test]
	fn test_identity_admin_role() {
		assert!(Identity::new("root", &["ADMIN"]).is_admin());
		assert!(!Identity::new("jo", &["USER"]).is_admin());
	}
}

// vim: ts=4
