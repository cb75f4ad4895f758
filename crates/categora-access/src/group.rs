//! User group CRUD and set mutators.
//!
//! Membership and category-access mutations are read-modify-write against the
//! stored set attributes; there is no server-side atomic set-add, so two
//! concurrent writers to the same group can lose one update. Accepted
//! limitation, see the store adapter docs.

use std::sync::Arc;

use categora_types::requests::UserGroupRequest;

use crate::prelude::*;

#[derive(Clone, Debug)]
pub struct GroupService {
	store: Arc<dyn StoreAdapter>,
}

impl GroupService {
	pub fn new(store: Arc<dyn StoreAdapter>) -> Self {
		Self { store }
	}

	/// Create a group. Duplicate `user_group_name` is a Conflict; unlike
	/// category and configuration names the compare is exact, not
	/// case-insensitive. This is the only place the membership and access
	/// sets are written wholesale.
	pub async fn create_group(&self, request: UserGroupRequest) -> CgResult<UserGroup> {
		let groups = self.store.list_user_groups().await?;
		if groups.iter().any(|g| g.user_group_name == request.user_group_name) {
			return Err(Error::Conflict(format!(
				"A user group with this name already exists: {}",
				request.user_group_name
			)));
		}

		let group = UserGroup {
			user_group_id: random_id(),
			user_group_name: request.user_group_name,
			user_list: request.user_list.into_iter().collect(),
			category_access: request.category_access.into_iter().collect(),
		};
		self.store.write_user_group(&group).await?;
		info!(user_group_id = %group.user_group_id, name = %group.user_group_name, "created user group");
		Ok(group)
	}

	pub async fn group_by_id(&self, user_group_id: &str) -> CgResult<UserGroup> {
		self.store.find_user_group(user_group_id).await?.ok_or(Error::NotFound)
	}

	pub async fn list_groups(&self) -> CgResult<Vec<UserGroup>> {
		self.store.list_user_groups().await
	}

	/// Substring search on `user_group_name` (case-sensitive, as stored).
	pub async fn search_groups(&self, query: &str) -> CgResult<Vec<UserGroup>> {
		let groups = self.store.list_user_groups().await?;
		Ok(groups.into_iter().filter(|g| g.user_group_name.contains(query)).collect())
	}

	/// Add a username to a group's member set. Idempotent: adding an existing
	/// member succeeds without a write.
	pub async fn add_user_to_group(
		&self,
		user_group_id: &str,
		user_group_name: &str,
		username: &str,
	) -> CgResult<()> {
		let mut group = self
			.store
			.read_user_group(user_group_id, user_group_name)
			.await?
			.ok_or(Error::NotFound)?;

		if !group.user_list.insert(username.to_string()) {
			return Ok(());
		}
		self.store.write_user_group(&group).await
	}

	/// Remove a username from a group's member set. NotFound when the group
	/// is absent or the user is not a member.
	pub async fn remove_user_from_group(
		&self,
		user_group_id: &str,
		user_group_name: &str,
		username: &str,
	) -> CgResult<()> {
		let mut group = self
			.store
			.read_user_group(user_group_id, user_group_name)
			.await?
			.ok_or(Error::NotFound)?;

		if !group.user_list.remove(username) {
			return Err(Error::NotFound);
		}
		self.store.write_user_group(&group).await
	}

	/// Remove a category id from a group's access set. NotFound when the
	/// group is absent or the category is not in the set.
	pub async fn remove_category_from_group(
		&self,
		user_group_id: &str,
		user_group_name: &str,
		category_id: &str,
	) -> CgResult<()> {
		let mut group = self
			.store
			.read_user_group(user_group_id, user_group_name)
			.await?
			.ok_or(Error::NotFound)?;

		if !group.category_access.remove(category_id) {
			return Err(Error::NotFound);
		}
		self.store.write_user_group(&group).await
	}

	pub async fn delete_group(&self, user_group_id: &str, user_group_name: &str) -> CgResult<()> {
		self.store
			.read_user_group(user_group_id, user_group_name)
			.await?
			.ok_or(Error::NotFound)?;
		self.store.delete_user_group(user_group_id, user_group_name).await
	}

	/// Ids of every group whose member set contains the username. The lookup
	/// category visibility filtering depends on.
	pub async fn user_group_ids(&self, username: &str) -> CgResult<Vec<Box<str>>> {
		let groups = self.store.groups_containing_user(username).await?;
		Ok(groups.into_iter().map(|g| g.user_group_id).collect())
	}
}


// vim: ts=4
