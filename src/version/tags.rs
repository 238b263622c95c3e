//! Picking Linux version tags out of a repository's tag list
//!
//! Most tags in a kernel tree are not version tags (signed pull request tags,
//! subsystem tags, ...), so anything that doesn't parse is skipped silently.

use std::collections::BTreeSet;

use tracing::debug;

use crate::version::linux::LinuxVersion;

/// Parse every tag and return the version tags sorted oldest to newest.
///
/// Duplicates are removed. The `Unversioned` label is not a tag and is skipped.
pub fn version_tags<I, S>(tags: I) -> Vec<LinuxVersion>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut scanned = 0usize;
    let versions: BTreeSet<LinuxVersion> = tags
        .into_iter()
        .inspect(|_| scanned += 1)
        .filter_map(|tag| LinuxVersion::parse(tag.as_ref()))
        .filter(|version| !version.is_unversioned())
        .collect();

    debug!(
        "Found {} version tags among {} tags",
        versions.len(),
        scanned
    );
    versions.into_iter().collect()
}

/// Returns the newest version tag, or `None` if no tag is a version tag
pub fn latest<I, S>(tags: I) -> Option<LinuxVersion>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    tags.into_iter()
        .filter_map(|tag| LinuxVersion::parse(tag.as_ref()))
        .filter(|version| !version.is_unversioned())
        .max()
}

/// Returns the newest version that comes before `target`
pub fn preceding_tag(versions: &[LinuxVersion], target: &LinuxVersion) -> Option<LinuxVersion> {
    versions
        .iter()
        .filter(|version| version.comes_before(target))
        .max()
        .copied()
}

/// Returns the oldest version that comes after `target`.
///
/// Falls back to [`LinuxVersion::NO_VERSION`] when `target` is newer than
/// every known version, i.e. it doesn't precede any tag yet.
pub fn following_tag(versions: &[LinuxVersion], target: &LinuxVersion) -> LinuxVersion {
    versions
        .iter()
        .filter(|version| version.comes_after(target))
        .min()
        .copied()
        .unwrap_or(LinuxVersion::NO_VERSION)
}
