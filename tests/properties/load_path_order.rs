//! Property tests for the load path ordering contract.

use std::path::PathBuf;

use proptest::prelude::*;

use bundlebox::{LoadPath, PackageId, ResolvedPackageSpec};
use semver::Version;

fn segment() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[a-z]{1,6}").unwrap()
}

/// Specs with distinct names, each with an optional bin dir and 0-2 require paths
fn specs() -> impl Strategy<Value = Vec<ResolvedPackageSpec>> {
    proptest::collection::btree_set(segment(), 0..6).prop_flat_map(|names| {
        let count = names.len();
        (
            Just(names.into_iter().collect::<Vec<_>>()),
            proptest::collection::vec(proptest::option::of(segment()), count),
            proptest::collection::vec(proptest::collection::vec(segment(), 0..3), count),
        )
            .prop_map(|(names, bins, requires)| {
                names
                    .into_iter()
                    .zip(bins)
                    .zip(requires)
                    .map(|((name, bin), require)| {
                        let id = PackageId::new(name.clone(), Version::new(1, 0, 0));
                        ResolvedPackageSpec::new(id, PathBuf::from("/sb/gems").join(&name))
                            .with_bin_dir(bin)
                            .with_require_paths(require)
                    })
                    .collect()
            })
    })
}

fn ambient() -> impl Strategy<Value = Vec<PathBuf>> {
    proptest::collection::vec(segment().prop_map(|s| PathBuf::from("/ambient").join(s)), 0..4)
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 96,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: emission order is root, then each spec's bin dir and require
    /// paths in resolver order.
    #[test]
    fn property_emission_order_follows_specs(specs in specs()) {
        let root = PathBuf::from("/sb/environments");
        let load_path = LoadPath::for_specs(&root, &specs);

        let mut expected = vec![root.clone()];
        for spec in &specs {
            let install = spec.full_install_path();
            if let Some(bin) = spec.bin_dir() {
                expected.push(install.join(bin));
            }
            for require in spec.require_paths() {
                expected.push(install.join(require));
            }
        }

        prop_assert_eq!(load_path.emission_order(), expected);
    }

    /// PROPERTY: a bootstrap's emitted list rebuilds the same load path.
    #[test]
    fn property_emission_order_is_reversible(specs in specs()) {
        let load_path = LoadPath::for_specs("/sb/environments", &specs);
        let rebuilt = LoadPath::from_emission_order(load_path.emission_order());
        prop_assert_eq!(rebuilt, Some(load_path));
    }

    /// PROPERTY: lookups see explicit entries, then the root, then the
    /// ambient path; every entry appears once at its first position.
    #[test]
    fn property_effective_order_prefers_sandbox(specs in specs(), ambient in ambient()) {
        let root = PathBuf::from("/sb/environments");
        let load_path = LoadPath::for_specs(&root, &specs);
        let effective = load_path.effective(&ambient);

        let mut unique = effective.clone();
        unique.sort();
        unique.dedup();
        prop_assert_eq!(unique.len(), effective.len());

        let root_pos = effective.iter().position(|p| p == &root).unwrap();
        for entry in load_path.entries() {
            let pos = effective.iter().position(|p| p == entry).unwrap();
            prop_assert!(pos < root_pos);
        }
        for entry in &ambient {
            let pos = effective.iter().position(|p| p == entry).unwrap();
            prop_assert!(pos > root_pos);
        }

        let mut first_seen = Vec::new();
        for entry in load_path.entries() {
            if !first_seen.contains(entry) {
                first_seen.push(entry.clone());
            }
        }
        prop_assert_eq!(&effective[..root_pos], &first_seen[..]);
    }
}
