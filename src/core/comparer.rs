use std::collections::HashSet;

/// Returns `true` iff the unique set of scripts differs between the two snapshots.
///
/// Order and duplicate counts are ignored. Runs in linear time: both sets
/// are built once, sizes compared, then one-directional membership is
/// checked, which is enough once the cardinalities match.
pub fn scripts_changed<A, B>(
    old_scripts: &[A],
    new_scripts: &[B],
) -> bool
where
    A: AsRef<str>,
    B: AsRef<str>,
{
    let old_set: HashSet<&str> = old_scripts.iter().map(AsRef::as_ref).collect();
    let new_set: HashSet<&str> = new_scripts.iter().map(AsRef::as_ref).collect();

    if old_set.len() != new_set.len() {
        return true;
    }

    !old_set.iter().all(|script| new_set.contains(script))
}
