//! Parse, render and order upstream Linux kernel version tags
//! (`vMAJOR.MINOR[.REL][-rcN]`).
//!
//! ```
//! use linux_version::LinuxVersion;
//!
//! let rc = LinuxVersion::parse("v6.1-rc3").unwrap();
//! let release = LinuxVersion::parse("v6.1").unwrap();
//!
//! assert!(rc.comes_before(&release));
//! assert_eq!(release.to_string(), "v6.1");
//! assert_eq!(LinuxVersion::parse("v6.1-rc3x"), None);
//! ```

pub mod version;

pub use version::{LinuxVersion, ParseVersionError};
