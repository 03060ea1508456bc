//! Module filter: which modules become active for this process.

use std::collections::BTreeSet;

use super::error::CompositionError;

/// Compute the active module set.
///
/// Empty sets count as "not configured". Include and exclude are mutually
/// exclusive, and every configured name must exist in `all_modules`.
pub fn resolve(
    all_modules: &BTreeSet<String>,
    include: Option<&BTreeSet<String>>,
    exclude: Option<&BTreeSet<String>>,
) -> Result<BTreeSet<String>, CompositionError> {
    let include = include.filter(|set| !set.is_empty());
    let exclude = exclude.filter(|set| !set.is_empty());

    match (include, exclude) {
        (Some(include), Some(exclude)) => Err(CompositionError::ConfigConflict {
            include: include.iter().cloned().collect(),
            exclude: exclude.iter().cloned().collect(),
        }),
        (Some(include), None) => {
            check_known(all_modules, include)?;
            Ok(include.intersection(all_modules).cloned().collect())
        }
        (None, Some(exclude)) => {
            check_known(all_modules, exclude)?;
            Ok(all_modules.difference(exclude).cloned().collect())
        }
        (None, None) => Ok(all_modules.clone()),
    }
}

fn check_known(
    all_modules: &BTreeSet<String>,
    configured: &BTreeSet<String>,
) -> Result<(), CompositionError> {
    let unknown: Vec<String> = configured.difference(all_modules).cloned().collect();
    if unknown.is_empty() {
        Ok(())
    } else {
        Err(CompositionError::UnknownModule { names: unknown })
    }
}
