//! Minimal user account CRUD.
//!
//! Stores identity records only. The password hash arrives pre-computed from
//! the authentication provider; this core never hashes or verifies passwords.

use std::sync::Arc;

use crate::prelude::*;

#[derive(Clone, Debug)]
pub struct UserService {
	store: Arc<dyn StoreAdapter>,
}

impl UserService {
	pub fn new(store: Arc<dyn StoreAdapter>) -> Self {
		Self { store }
	}

	/// Create a user. Duplicate username is a Conflict.
	pub async fn create_user(
		&self,
		username: &str,
		password_hash: &str,
		roles: &[&str],
	) -> CgResult<User> {
		if self.store.read_user(username).await?.is_some() {
			return Err(Error::Conflict(format!("User already exists: {}", username)));
		}
		let user = User {
			user_id: random_id(),
			username: username.into(),
			password_hash: password_hash.into(),
			roles: roles.iter().map(|r| Box::from(*r)).collect(),
		};
		self.store.write_user(&user).await?;
		Ok(user)
	}

	pub async fn user_by_username(&self, username: &str) -> CgResult<User> {
		self.store.read_user(username).await?.ok_or(Error::NotFound)
	}

	pub async fn list_users(&self) -> CgResult<Vec<User>> {
		self.store.list_users().await
	}

	pub async fn delete_user(&self, username: &str) -> CgResult<()> {
		self.store.read_user(username).await?.ok_or(Error::NotFound)?;
		self.store.delete_user(username).await
	}

	/// Identity context for a stored user, as the authentication provider
	/// would establish it.
	pub async fn identity(&self, username: &str) -> CgResult<Identity> {
		let user = self.user_by_username(username).await?;
		Ok(Identity { username: user.username, roles: user.roles.into_boxed_slice() })
	}
}


// vim: ts=4
