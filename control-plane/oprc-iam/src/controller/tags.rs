use std::collections::{BTreeMap, BTreeSet};

use crate::crd::Tag;

/// Tags to add and tag keys to remove so that `remote` converges to `local`.
///
/// A key present on both sides with a different value is only added, which
/// overwrites the remote value. Both lists are sorted by key.
pub fn diff_tags(local: &[Tag], remote: &[Tag]) -> (Vec<Tag>, Vec<String>) {
    let wanted: BTreeMap<&str, &str> = local
        .iter()
        .map(|t| (t.key.as_str(), t.value.as_str()))
        .collect();
    let mut add = wanted.clone();
    let mut remove: BTreeSet<&str> = BTreeSet::new();

    for t in remote {
        match wanted.get(t.key.as_str()) {
            Some(v) if *v == t.value => {
                add.remove(t.key.as_str());
            }
            Some(_) => {}
            None => {
                remove.insert(t.key.as_str());
            }
        }
    }

    let add = add.into_iter().map(|(k, v)| Tag::new(k, v)).collect();
    let remove = remove.into_iter().map(str::to_string).collect();
    (add, remove)
}
