//! Error taxonomy shared by all Categora crates.

use axum::{Json, http::StatusCode, response::IntoResponse};

pub type CgResult<T> = std::result::Result<T, Error>;

/// Request-scoped failure raised by lifecycle and store operations.
///
/// Every variant maps to a distinct HTTP status so an embedding can hand the
/// error straight to axum. Lifecycle failures are never retried here; the
/// caller resubmits.
#[derive(Debug)]
pub enum Error {
	/// Entity, version, or group absent
	NotFound,
	/// Duplicate name, already-approved, or an invalid state transition
	Conflict(String),
	/// Schema serialization or malformed request data
	ValidationError(String),
	PermissionDenied,
	DbError,
	Parse,
}

impl From<serde_json::Error> for Error {
	fn from(err: serde_json::Error) -> Self {
		Self::ValidationError(format!("JSON serialization failed: {}", err))
	}
}

impl std::fmt::Display for Error {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		match self {
			Error::NotFound => write!(f, "not found"),
			Error::Conflict(msg) => write!(f, "conflict: {}", msg),
			Error::ValidationError(msg) => write!(f, "validation failed: {}", msg),
			Error::PermissionDenied => write!(f, "permission denied"),
			Error::DbError => write!(f, "store error"),
			Error::Parse => write!(f, "parse error"),
		}
	}
}

impl std::error::Error for Error {}

impl IntoResponse for Error {
	fn into_response(self) -> axum::response::Response {
		let status = match &self {
			Error::NotFound => StatusCode::NOT_FOUND,
			Error::Conflict(_) => StatusCode::CONFLICT,
			Error::ValidationError(_) => StatusCode::UNPROCESSABLE_ENTITY,
			Error::PermissionDenied => StatusCode::FORBIDDEN,
			Error::DbError | Error::Parse => StatusCode::INTERNAL_SERVER_ERROR,
		};
		(status, Json(serde_json::json!({ "error": self.to_string() }))).into_response()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_display_carries_message() {
		let err = Error::Conflict("Category already exists with name: Network".into());
		assert_eq!(err.to_string(), "conflict: Category already exists with name: Network");
	}
}

// vim: ts=4
