#![allow(dead_code)]

use std::collections::BTreeMap;
use std::path::PathBuf;

use oprc_iam::crd::Tag;
use oprc_iam::remote::ObservedRole;

pub fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

pub fn load_observed(name: &str) -> ObservedRole {
    let raw = std::fs::read_to_string(fixture(name)).expect("read fixture");
    serde_json::from_str(&raw).expect("parse observed fixture")
}

pub fn tags(pairs: &[(&str, &str)]) -> Vec<Tag> {
    pairs.iter().map(|(k, v)| Tag::new(*k, *v)).collect()
}

pub fn tag_map(tags: &[Tag]) -> BTreeMap<String, String> {
    tags.iter().map(|t| (t.key.clone(), t.value.clone())).collect()
}

/// Apply a tag diff to `remote` the way the remote API would.
pub fn apply_tag_diff(
    remote: &[Tag],
    add: &[Tag],
    remove: &[String],
) -> BTreeMap<String, String> {
    let mut out = tag_map(remote);
    for t in add {
        out.insert(t.key.clone(), t.value.clone());
    }
    for k in remove {
        out.remove(k);
    }
    out
}
