//! User groups and category visibility for Categora.
//!
//! A user group is a named set of usernames plus a set of category ids its
//! members may see. [`group::GroupService`] owns group CRUD and the
//! membership/access set mutators; [`user::UserService`] is minimal CRUD over
//! the Users table (password hashing and token issuance live with the
//! authentication provider, not here).

pub mod group;
pub mod user;

mod prelude;

pub use group::GroupService;
pub use user::UserService;

// vim: ts=4
