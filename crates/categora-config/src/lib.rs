//! Configuration lifecycle for Categora.
//!
//! A configuration is a named instance under a category, pinned to the
//! category version it was created against, with its own independently
//! numbered version history. [`version::ConfigVersionEngine`] maintains that
//! history; [`configuration::ConfigurationService`] orchestrates creation,
//! updates (always append), approval, and retirement.

pub mod configuration;
pub mod version;

mod prelude;

pub use configuration::ConfigurationService;
pub use version::ConfigVersionEngine;

// vim: ts=4
