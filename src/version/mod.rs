//! Upstream Linux kernel versions
//!
//! # Modules
//!
//! - [`linux`]: The [`LinuxVersion`] value type, its parser, renderer and ordering
//! - [`tags`]: Picking version tags out of a list of git tag names
//! - [`error`]: Error type for `FromStr` and deserialization

pub mod error;
pub mod linux;
pub mod tags;

pub use error::ParseVersionError;
pub use linux::{LinuxVersion, UNVERSIONED_LABEL, UNVERSIONED_MAJOR};
