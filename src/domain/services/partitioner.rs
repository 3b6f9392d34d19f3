//! Environment Partitioner
//!
//! Computes which environments exist and which dependencies each one sees.

use std::collections::BTreeSet;

use crate::domain::entities::DependencySpec;
use crate::domain::value_objects::Environment;

/// Every environment name: `default` plus every `only`/`except` tag.
///
/// Sorted, so iteration order is stable.
pub fn all_environments(dependencies: &[DependencySpec]) -> BTreeSet<Environment> {
    dependencies
        .iter()
        .flat_map(DependencySpec::environment_tags)
        .map(Environment::new)
        .chain(std::iter::once(Environment::default_env()))
        .collect()
}

/// Dependencies visible in `environment`, in declaration order.
///
/// `None` applies no filter.
pub fn select<'a>(
    dependencies: &'a [DependencySpec],
    environment: Option<&Environment>,
) -> Vec<&'a DependencySpec> {
    dependencies
        .iter()
        .filter(|dep| environment.map_or(true, |env| dep.is_visible_in(env.as_str())))
        .collect()
}
