//! Property tests for environment partitioning.

use proptest::prelude::*;

use bundlebox::domain::services::{all_environments, select};
use bundlebox::{DependencySpec, Environment};
use semver::VersionReq;

fn env_name() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("default".to_string()),
        Just("test".to_string()),
        Just("development".to_string()),
        proptest::string::string_regex("[a-z]{1,8}").unwrap(),
    ]
}

fn restriction() -> impl Strategy<Value = Option<Vec<String>>> {
    proptest::option::of(proptest::collection::vec(env_name(), 1..3))
}

fn dependencies() -> impl Strategy<Value = Vec<DependencySpec>> {
    proptest::collection::vec((restriction(), restriction()), 0..6).prop_map(|restrictions| {
        restrictions
            .into_iter()
            .enumerate()
            .map(|(i, (only, except))| {
                let mut dep = DependencySpec::new(format!("dep{i}"), VersionReq::STAR);
                if let Some(only) = only {
                    dep = dep.with_only(only);
                }
                if let Some(except) = except {
                    dep = dep.with_except(except);
                }
                dep
            })
            .collect()
    })
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: `default` is always an environment.
    #[test]
    fn property_default_environment_always_present(deps in dependencies()) {
        prop_assert!(all_environments(&deps).contains(&Environment::default_env()));
    }

    /// PROPERTY: every tag named by a dependency is an environment.
    #[test]
    fn property_every_tag_is_an_environment(deps in dependencies()) {
        let envs = all_environments(&deps);
        for dep in &deps {
            for tag in dep.environment_tags() {
                prop_assert!(envs.contains(&Environment::new(tag)));
            }
        }
    }

    /// PROPERTY: an unrestricted dependency is visible everywhere, including
    /// environments nobody declared.
    #[test]
    fn property_unrestricted_is_visible_everywhere(name in env_name()) {
        let dep = DependencySpec::new("free", VersionReq::STAR);
        prop_assert!(dep.is_visible_in(&name));
    }

    /// PROPERTY: `select` keeps declaration order and matches `is_visible_in`.
    #[test]
    fn property_select_is_ordered_filter(deps in dependencies(), name in env_name()) {
        let env = Environment::new(name.clone());
        let selected: Vec<&str> = select(&deps, Some(&env)).into_iter().map(|d| d.name()).collect();
        let expected: Vec<&str> = deps
            .iter()
            .filter(|d| d.is_visible_in(&name))
            .map(|d| d.name())
            .collect();
        prop_assert_eq!(selected, expected);
        prop_assert_eq!(select(&deps, None).len(), deps.len());
    }

    /// PROPERTY: `only` restricts visibility to the listed environments.
    #[test]
    fn property_only_restricts(only in proptest::collection::vec(env_name(), 1..3), name in env_name()) {
        let dep = DependencySpec::new("restricted", VersionReq::STAR).with_only(only.clone());
        prop_assert_eq!(dep.is_visible_in(&name), only.contains(&name));
    }
}
