use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::crd::Tag;
use crate::errors::DiffError;
use crate::policy;

/// Role as last returned by the remote IAM API.
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct ObservedRole {
    #[serde(default)]
    pub arn: Option<String>,
    #[serde(default)]
    pub role_id: Option<String>,
    #[serde(default)]
    pub role_name: Option<String>,
    #[serde(default)]
    pub create_date: Option<DateTime<Utc>>,
    /// URL-encoded, compacted trust policy
    #[serde(default)]
    pub assume_role_policy_document: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub max_session_duration: Option<i32>,
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub permissions_boundary: Option<AttachedPermissionsBoundary>,
    #[serde(default)]
    pub role_last_used: Option<RoleLastUsed>,
    #[serde(default)]
    pub tags: Vec<Tag>,
    /// Transient link to the object that resolved this role. Not resource
    /// state; never serialized and never compared.
    #[serde(skip)]
    pub cross_ref: Option<CrossReference>,
}

#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct AttachedPermissionsBoundary {
    #[serde(default)]
    pub permissions_boundary_arn: Option<String>,
    #[serde(default)]
    pub permissions_boundary_type: Option<String>,
}

#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct RoleLastUsed {
    #[serde(default)]
    pub last_used_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub region: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CrossReference {
    pub kind: String,
    pub name: String,
    pub field_path: Option<String>,
}

impl ObservedRole {
    /// Structural equality over every resource-state field.
    ///
    /// `cross_ref` is excluded. Tags compare as a set keyed by tag key and
    /// policy documents compare as JSON values once byte equality fails.
    pub fn semantic_eq(&self, other: &ObservedRole) -> Result<bool, DiffError> {
        let plain = self.arn == other.arn
            && self.role_id == other.role_id
            && self.role_name == other.role_name
            && self.create_date == other.create_date
            && self.description == other.description
            && self.max_session_duration == other.max_session_duration
            && self.path == other.path
            && self.permissions_boundary == other.permissions_boundary
            && self.role_last_used == other.role_last_used
            && tags_eq(&self.tags, &other.tags);
        if !plain {
            return Ok(false);
        }
        policies_eq(
            self.assume_role_policy_document.as_deref(),
            other.assume_role_policy_document.as_deref(),
        )
    }

    pub fn permissions_boundary_arn(&self) -> Option<&String> {
        self.permissions_boundary
            .as_ref()
            .and_then(|b| b.permissions_boundary_arn.as_ref())
    }
}

// Duplicate keys collapse to the last value, matching how tags are applied.
fn tags_eq(a: &[Tag], b: &[Tag]) -> bool {
    let index = |tags: &[Tag]| -> BTreeMap<String, String> {
        tags.iter().map(|t| (t.key.clone(), t.value.clone())).collect()
    };
    index(a) == index(b)
}

fn policies_eq(a: Option<&str>, b: Option<&str>) -> Result<bool, DiffError> {
    match (a, b) {
        (None, None) => Ok(true),
        (Some(x), Some(y)) if x == y => Ok(true),
        (Some(x), Some(y)) => {
            let left = policy::decode_policy(x)?;
            let right = policy::decode_policy(y)?;
            Ok(left == right)
        }
        _ => Ok(false),
    }
}
