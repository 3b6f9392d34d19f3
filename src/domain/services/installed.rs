//! Installed-package index and install-state diffing
//!
//! Turns a listing of the cache directory into `InstalledPackageRecord`s and
//! compares them against requirements (what to fetch) and against the
//! resolved view (what to delete).

use std::collections::HashSet;
use std::path::Path;

use crate::domain::entities::{
    InstallIndex, InstalledPackageRecord, Requirement, ResolvedPackageSpec,
};
use crate::domain::value_objects::{PackageId, ARCHIVE_EXTENSION};

/// Build installed records from the file names found in `cache_dir`.
///
/// Identity comes from the install index when it knows the archive, else
/// from the `<name>-<version>.pkg` pattern. Archives matching neither are
/// skipped with a warning: they are invisible to fetch and cleanup.
pub fn index_installed<I, S>(
    archive_names: I,
    cache_dir: &Path,
    index: &InstallIndex,
) -> Vec<InstalledPackageRecord>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let suffix = format!(".{}", ARCHIVE_EXTENSION);
    let mut records = Vec::new();

    for name in archive_names {
        let name = name.as_ref();
        if !name.ends_with(&suffix) {
            tracing::debug!(file = name, "ignoring non-archive file in cache");
            continue;
        }

        let id = index
            .identity_of(name)
            .cloned()
            .or_else(|| PackageId::parse_archive_file_name(name));

        match id {
            Some(id) => records.push(InstalledPackageRecord::new(id, cache_dir.join(name))),
            None => tracing::warn!(
                file = name,
                "skipping cached archive: name does not match <name>-<version>.{}",
                ARCHIVE_EXTENSION
            ),
        }
    }

    records.sort_by(|a, b| a.id().cmp(b.id()));
    records
}

/// Requirements with no installed record of that name satisfying them
pub fn unsatisfied<'a>(
    requirements: &'a [Requirement],
    installed: &[InstalledPackageRecord],
) -> Vec<&'a Requirement> {
    requirements
        .iter()
        .filter(|req| {
            !installed
                .iter()
                .any(|rec| rec.name() == req.name() && req.is_satisfied_by(rec.version()))
        })
        .collect()
}

/// Installed records whose exact `(name, version)` is absent from `required`
pub fn detect_stale<'a>(
    installed: &'a [InstalledPackageRecord],
    required: &[ResolvedPackageSpec],
) -> Vec<&'a InstalledPackageRecord> {
    let keep: HashSet<&PackageId> = required.iter().map(ResolvedPackageSpec::id).collect();
    let mut seen: HashSet<&PackageId> = HashSet::new();

    installed
        .iter()
        .filter(|rec| !keep.contains(rec.id()))
        .filter(|rec| seen.insert(rec.id()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::IndexEntry;
    use crate::domain::value_objects::ContentHash;
    use semver::{Version, VersionReq};

    fn id(name: &str, version: &str) -> PackageId {
        PackageId::new(name, Version::parse(version).unwrap())
    }

    fn record(name: &str, version: &str) -> InstalledPackageRecord {
        InstalledPackageRecord::new(id(name, version), format!("/sb/cache/{name}-{version}.pkg"))
    }

    fn spec(name: &str, version: &str) -> ResolvedPackageSpec {
        ResolvedPackageSpec::new(id(name, version), format!("/sb/gems/{name}-{version}"))
    }

    #[test]
    fn index_installed_parses_file_names() {
        let records = index_installed(
            ["rack-1.0.0.pkg", "json-2.1.0.pkg"],
            Path::new("/sb/cache"),
            &InstallIndex::new(),
        );
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id(), &id("json", "2.1.0"));
        assert_eq!(records[1].archive(), Path::new("/sb/cache/rack-1.0.0.pkg"));
    }

    #[test]
    fn index_installed_skips_malformed_names() {
        let records = index_installed(
            ["rack.pkg", "notes.txt", "rack-1.0.0.pkg"],
            Path::new("/sb/cache"),
            &InstallIndex::new(),
        );
        assert_eq!(records, vec![record("rack", "1.0.0")]);
    }

    #[test]
    fn index_installed_prefers_recorded_identity() {
        let mut index = InstallIndex::new();
        index.record(
            "rack.pkg",
            IndexEntry::new(id("rack", "1.5.0"), ContentHash::from_hex("abc")),
        );
        let records = index_installed(["rack.pkg"], Path::new("/sb/cache"), &index);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id(), &id("rack", "1.5.0"));
        assert_eq!(records[0].archive(), Path::new("/sb/cache/rack.pkg"));
    }

    #[test]
    fn unsatisfied_checks_version() {
        let reqs = vec![
            Requirement::new("rack", VersionReq::parse(">=1.0.0").unwrap()),
            Requirement::new("json", VersionReq::parse(">=1.0.0").unwrap()),
            Requirement::new("rake", VersionReq::STAR),
        ];
        let installed = vec![record("rack", "1.2.0"), record("json", "0.9.0")];

        let missing: Vec<&str> = unsatisfied(&reqs, &installed)
            .iter()
            .map(|r| r.name())
            .collect();
        assert_eq!(missing, vec!["json", "rake"]);
    }

    #[test]
    fn unsatisfied_is_empty_when_everything_installed() {
        let reqs = vec![Requirement::new("rack", VersionReq::STAR)];
        assert!(unsatisfied(&reqs, &[record("rack", "3.0.0")]).is_empty());
    }

    #[test]
    fn detect_stale_matches_exact_name_and_version() {
        let installed = vec![record("a", "1.0.0"), record("a", "2.0.0"), record("b", "2.0.0")];
        let required = vec![spec("a", "1.0.0")];

        let stale: Vec<String> = detect_stale(&installed, &required)
            .iter()
            .map(|r| r.id().to_string())
            .collect();
        assert_eq!(stale, vec!["a@2.0.0", "b@2.0.0"]);
    }

    #[test]
    fn detect_stale_reports_each_package_once() {
        let installed = vec![
            record("c", "1.0.0"),
            InstalledPackageRecord::new(id("c", "1.0.0"), "/sb/cache/c-copy.pkg"),
        ];
        assert_eq!(detect_stale(&installed, &[]).len(), 1);
    }
}
