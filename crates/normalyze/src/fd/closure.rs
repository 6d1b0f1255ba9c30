//! Attribute closure under a functional dependency set.

use std::collections::BTreeSet;

use super::FunctionalDependency;

/// Compute the closure X+ of `start` under `fds`.
///
/// Fixed-point iteration: scan the FD set, adding each dependent whose
/// determinant is already covered, until a full scan adds nothing. The result
/// is the unique least fixed point, so it does not depend on FD scan order,
/// and the function never touches a dataset.
pub fn closure(start: &BTreeSet<String>, fds: &[FunctionalDependency]) -> BTreeSet<String> {
    let mut result = start.clone();
    let mut changed = true;

    while changed {
        changed = false;
        for fd in fds {
            if !result.contains(&fd.dependent) && fd.determinant.is_subset(&result) {
                result.insert(fd.dependent.clone());
                changed = true;
            }
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fd(det: &[&str], dep: &str) -> FunctionalDependency {
        FunctionalDependency::new(det.iter().map(|s| s.to_string()), dep, 1.0).unwrap()
    }

    fn set(attrs: &[&str]) -> BTreeSet<String> {
        attrs.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_closure_chains_dependencies() {
        let fds = vec![fd(&["a"], "b"), fd(&["b"], "c")];
        assert_eq!(closure(&set(&["a"]), &fds), set(&["a", "b", "c"]));
    }

    #[test]
    fn test_closure_requires_full_determinant() {
        let fds = vec![fd(&["a", "b"], "c")];
        assert_eq!(closure(&set(&["a"]), &fds), set(&["a"]));
        assert_eq!(closure(&set(&["a", "b"]), &fds), set(&["a", "b", "c"]));
    }

    #[test]
    fn test_closure_is_idempotent() {
        let fds = vec![fd(&["a"], "b"), fd(&["b"], "c"), fd(&["c"], "d")];
        let once = closure(&set(&["a"]), &fds);
        assert_eq!(closure(&once, &fds), once);
    }

    #[test]
    fn test_closure_ignores_scan_order() {
        let forward = vec![fd(&["a"], "b"), fd(&["b"], "c")];
        let backward = vec![fd(&["b"], "c"), fd(&["a"], "b")];
        assert_eq!(closure(&set(&["a"]), &forward), closure(&set(&["a"]), &backward));
    }

    #[test]
    fn test_closure_of_empty_set() {
        let fds = vec![fd(&["a"], "b")];
        assert!(closure(&BTreeSet::new(), &fds).is_empty());
    }
}
