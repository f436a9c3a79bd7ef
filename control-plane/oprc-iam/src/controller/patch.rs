use json_patch::PatchOperation;
use serde_json::{Map, Value};

use super::late_init::late_initialize_role;
use crate::crd::RoleParameters;
use crate::errors::DiffError;
use crate::policy::decode_policy;
use crate::remote::ObservedRole;

const POLICY_FIELD: &str = "assumeRolePolicyDocument";
const TAGS_FIELD: &str = "tags";

/// Build a sparse [`RoleParameters`] holding only the fields of `target` that
/// differ from what `observed` currently has.
///
/// Policy documents are diffed by JSON value and tags by key, so formatting
/// and ordering never show up as changes.
pub fn create_patch(observed: &ObservedRole, target: &RoleParameters) -> Result<RoleParameters, DiffError> {
    let current = late_initialize_role(RoleParameters::default(), Some(observed));

    let ops = json_patch::diff(&comparable(&current)?, &comparable(target)?);
    let target_json = serde_json::to_value(target)?;

    let mut sparse = Map::new();
    for op in ops.0.iter() {
        let Some(field) = top_level_field(op) else {
            continue;
        };
        // Removed fields fall back to the observed value, which is "no change".
        if let Some(v) = target_json.get(&field) {
            sparse.insert(field, v.clone());
        }
    }

    let bytes = serde_json::to_vec(&Value::Object(sparse))?;
    let patch: RoleParameters = serde_json::from_slice(&bytes)?;
    Ok(patch)
}

fn comparable(params: &RoleParameters) -> Result<Value, DiffError> {
    let mut value = serde_json::to_value(params)?;
    let Some(obj) = value.as_object_mut() else {
        return Err(DiffError::PatchConstruction(
            "role parameters did not serialize to an object".into(),
        ));
    };
    // Unparseable documents stay as strings and are diffed verbatim.
    let parsed = match obj.get(POLICY_FIELD) {
        Some(Value::String(doc)) => decode_policy(doc).ok(),
        _ => None,
    };
    if let Some(parsed) = parsed {
        obj.insert(POLICY_FIELD.to_string(), parsed);
    }
    if let Some(Value::Array(tags)) = obj.get_mut(TAGS_FIELD) {
        tags.sort_by(|a, b| a["key"].as_str().cmp(&b["key"].as_str()));
    }
    Ok(value)
}

fn top_level_field(op: &PatchOperation) -> Option<String> {
    let path = match op {
        PatchOperation::Add(o) => o.path.as_str(),
        PatchOperation::Remove(o) => o.path.as_str(),
        PatchOperation::Replace(o) => o.path.as_str(),
        PatchOperation::Move(o) => o.path.as_str(),
        PatchOperation::Copy(o) => o.path.as_str(),
        PatchOperation::Test(o) => o.path.as_str(),
    };
    let token = path.strip_prefix('/')?.split('/').next()?;
    Some(token.replace("~1", "/").replace("~0", "~"))
}
