//! Requirement resolution over a fixed candidate set
//!
//! Used against the sandbox's own metadata (resolve_for_environment) and by
//! the directory repository resolver. Greedy: each name gets the highest
//! candidate version satisfying the first requirement that reaches it; later
//! requirements on the same name must accept that choice.
//!
//! Output order is pre-order: each requirement's package, then its unseen
//! runtime dependencies, following requirement order.

use std::collections::HashMap;

use crate::domain::entities::{Requirement, ResolvedPackageSpec};
use crate::error::UnresolvedDependency;

/// Resolve `requirements` against `candidates`.
///
/// On ties between identical versions the earliest candidate wins.
pub fn resolve(
    requirements: &[Requirement],
    candidates: &[ResolvedPackageSpec],
) -> Result<Vec<ResolvedPackageSpec>, Vec<UnresolvedDependency>> {
    let mut state = Resolution {
        candidates,
        chosen: Vec::new(),
        by_name: HashMap::new(),
        unresolved: Vec::new(),
    };

    for requirement in requirements {
        state.visit(requirement);
    }

    if state.unresolved.is_empty() {
        Ok(state.chosen)
    } else {
        Err(state.unresolved)
    }
}

struct Resolution<'a> {
    candidates: &'a [ResolvedPackageSpec],
    chosen: Vec<ResolvedPackageSpec>,
    by_name: HashMap<String, usize>,
    unresolved: Vec<UnresolvedDependency>,
}

impl Resolution<'_> {
    fn visit(&mut self, requirement: &Requirement) {
        if let Some(&idx) = self.by_name.get(requirement.name()) {
            if !requirement.is_satisfied_by(self.chosen[idx].version()) {
                self.fail(requirement);
            }
            return;
        }

        let candidates = self.candidates;
        let best = candidates
            .iter()
            .filter(|c| c.name() == requirement.name())
            .filter(|c| requirement.is_satisfied_by(c.version()))
            .fold(None::<&ResolvedPackageSpec>, |best, c| match best {
                Some(b) if b.version() >= c.version() => Some(b),
                _ => Some(c),
            });

        let Some(best) = best else {
            self.fail(requirement);
            return;
        };

        self.by_name
            .insert(best.name().to_string(), self.chosen.len());
        self.chosen.push(best.clone());

        for dependency in best.dependencies() {
            self.visit(dependency);
        }
    }

    fn fail(&mut self, requirement: &Requirement) {
        let unresolved = UnresolvedDependency::new(
            requirement.name(),
            requirement.version_req().to_string(),
        );
        if !self.unresolved.contains(&unresolved) {
            self.unresolved.push(unresolved);
        }
    }
}
