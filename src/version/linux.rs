//! Upstream Linux kernel version tags
//!
//! Tags follow the `vMAJOR.MINOR[.REL][-rcN]` convention:
//! - `v5.10` - final release
//! - `v2.6.39` - release level (only used by v2.6 kernels)
//! - `v6.1-rc3` - release candidate, comes before `v6.1`
//!
//! Two values have special meaning: [`LinuxVersion::NO_VERSION`] for commits
//! that precede no tag, and [`LinuxVersion::UNSET`] for "no value at all".
//! Any version with a zero major renders like `UNSET`.

use std::cmp::Ordering;
use std::fmt;
use std::num::NonZeroU8;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::{Captures, Regex};
use serde::de::{self, Deserialize, Deserializer, Visitor};
use serde::ser::{Serialize, Serializer};
use tracing::trace;

use crate::version::error::ParseVersionError;

/// Major number reserved for [`LinuxVersion::NO_VERSION`]
pub const UNVERSIONED_MAJOR: u8 = 255;

/// Textual form of [`LinuxVersion::NO_VERSION`]
pub const UNVERSIONED_LABEL: &str = "Unversioned";

/// Match: v6.1, v2.6.39, v6.1-rc3, v2.6.39-rc7
static VERSION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^v([0-9]{1,2})[.]([0-9]+)(?:[.]([0-9]+))?(?:-rc([0-9]+))?$")
        .expect("version tag regex must compile")
});

/// An upstream Linux version.
///
/// The release level and release candidate number are optional: a `0` at the
/// [`from_fields`](Self::from_fields) boundary means "not present", so there is
/// no `v6.1.0` distinct from `v6.1` and no `-rc0`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct LinuxVersion {
    major: u8,
    minor: u8,
    rel: Option<NonZeroU8>,
    rc: Option<NonZeroU8>,
}

impl LinuxVersion {
    /// Version for commits which don't precede a version tag, e.g. commits past
    /// the newest tag when HEAD itself is not tagged. Sorts after every tag.
    pub const NO_VERSION: Self = Self::from_fields(UNVERSIONED_MAJOR, 0, 0, 0);

    /// The zero value. Renders to an empty string and sorts before every tag.
    pub const UNSET: Self = Self::from_fields(0, 0, 0, 0);

    /// Create a final release `v{major}.{minor}`
    pub const fn new(major: u8, minor: u8) -> Self {
        Self::from_fields(major, minor, 0, 0)
    }

    /// Create a version from the raw field layout, where `rel == 0` and
    /// `rc == 0` mean the component is absent.
    pub const fn from_fields(major: u8, minor: u8, rel: u8, rc: u8) -> Self {
        Self {
            major,
            minor,
            rel: NonZeroU8::new(rel),
            rc: NonZeroU8::new(rc),
        }
    }

    /// Raw field layout `(major, minor, rel, rc)`, the inverse of [`from_fields`](Self::from_fields)
    pub const fn to_fields(&self) -> (u8, u8, u8, u8) {
        (self.major, self.minor, raw(self.rel), raw(self.rc))
    }

    /// Set the release level; `0` removes it
    pub const fn with_rel(self, rel: u8) -> Self {
        Self {
            rel: NonZeroU8::new(rel),
            ..self
        }
    }

    /// Set the release candidate number; `0` makes this a final release
    pub const fn with_rc(self, rc: u8) -> Self {
        Self {
            rc: NonZeroU8::new(rc),
            ..self
        }
    }

    pub const fn major(&self) -> u8 {
        self.major
    }

    pub const fn minor(&self) -> u8 {
        self.minor
    }

    pub fn rel(&self) -> Option<u8> {
        self.rel.map(NonZeroU8::get)
    }

    pub fn rc(&self) -> Option<u8> {
        self.rc.map(NonZeroU8::get)
    }

    pub const fn is_unversioned(&self) -> bool {
        self.major == UNVERSIONED_MAJOR
    }

    /// Returns true for values that render to an empty string
    pub const fn is_unset(&self) -> bool {
        self.major == 0
    }

    pub const fn is_release_candidate(&self) -> bool {
        self.rc.is_some()
    }

    /// Parse a tag such as `v6.1-rc3`, or the `Unversioned` label.
    ///
    /// Returns `None` for anything else.
    ///
    /// Numbers are stored in 8 bits and wrap: `v1.999` parses as minor `231`.
    /// Leading zeros are accepted, so `v01.02` parses as `v1.2`. A zero major
    /// (`v0.1`) parses, but like [`UNSET`](Self::UNSET) renders empty.
    pub fn parse(text: &str) -> Option<Self> {
        if text == UNVERSIONED_LABEL {
            return Some(Self::NO_VERSION);
        }

        let Some(caps) = VERSION_RE.captures(text) else {
            trace!("Not a Linux version tag: '{}'", text);
            return None;
        };

        Some(Self::from_fields(
            capture_u8(&caps, 1),
            capture_u8(&caps, 2),
            capture_u8(&caps, 3),
            capture_u8(&caps, 4),
        ))
    }

    /// Returns true if all four fields match
    pub fn equals(&self, other: &Self) -> bool {
        self == other
    }

    /// Returns true if `self` is strictly older than `other`
    pub fn comes_before(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Less
    }

    /// Returns true if `self` is strictly newer than `other`
    pub fn comes_after(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Greater
    }
}

const fn raw(field: Option<NonZeroU8>) -> u8 {
    match field {
        Some(value) => value.get(),
        None => 0,
    }
}

/// Decimal capture to u8, taking the exact value modulo 256 for any number of
/// digits (`10^20` becomes 0, it does not saturate to 255). Missing groups are 0.
fn capture_u8(caps: &Captures, group: usize) -> u8 {
    caps.get(group).map_or(0, |m| {
        m.as_str()
            .bytes()
            .fold(0u8, |acc, digit| acc.wrapping_mul(10).wrapping_add(digit - b'0'))
    })
}

/// Order two release candidate numbers of otherwise equal versions.
///
/// `None` is the final release, which comes after all of its candidates.
fn compare_rc(lhs: Option<NonZeroU8>, rhs: Option<NonZeroU8>) -> Ordering {
    match (lhs, rhs) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(lhs), Some(rhs)) => lhs.cmp(&rhs),
    }
}

impl Ord for LinuxVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        self.major
            .cmp(&other.major)
            .then(self.minor.cmp(&other.minor))
            // An absent release level sorts as 0
            .then(self.rel.cmp(&other.rel))
            .then_with(|| compare_rc(self.rc, other.rc))
    }
}

impl PartialOrd for LinuxVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for LinuxVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.major {
            0 => Ok(()),
            UNVERSIONED_MAJOR => f.write_str(UNVERSIONED_LABEL),
            major => {
                write!(f, "v{}.{}", major, self.minor)?;
                if let Some(rel) = self.rel {
                    write!(f, ".{}", rel)?;
                }
                if let Some(rc) = self.rc {
                    write!(f, "-rc{}", rc)?;
                }
                Ok(())
            }
        }
    }
}

impl FromStr for LinuxVersion {
    type Err = ParseVersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| ParseVersionError::Invalid(s.to_string()))
    }
}

impl Serialize for LinuxVersion {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

struct LinuxVersionVisitor;

impl Visitor<'_> for LinuxVersionVisitor {
    type Value = LinuxVersion;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a Linux version tag, \"Unversioned\" or an empty string")
    }

    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        if v.is_empty() {
            return Ok(LinuxVersion::UNSET);
        }
        v.parse().map_err(E::custom)
    }
}

impl<'de> Deserialize<'de> for LinuxVersion {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_str(LinuxVersionVisitor)
    }
}
