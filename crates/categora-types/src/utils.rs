//! Id and timestamp helpers.

use chrono::{SecondsFormat, Utc};

/// Generate a fresh entity id (UUIDv4, lowercase hyphenated).
pub fn random_id() -> Box<str> {
	uuid::Uuid::new_v4().to_string().into_boxed_str()
}

/// Current time as an RFC 3339 UTC string, the storage format of
/// `created_date` / `approved_date`.
pub fn now_iso() -> Box<str> {
	Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true).into_boxed_str()
}

/// Case-insensitive name equality used for the uniqueness checks on category
/// and configuration names.
pub fn name_eq_ignore_case(a: &str, b: &str) -> bool {
	a.eq_ignore_ascii_case(b)
}


// vim: ts=4
