use serde::Serialize;
use tracing::{debug, instrument};

use super::late_init::late_initialize_role;
use super::patch::create_patch;
use super::tags::diff_tags;
use super::up_to_date::is_role_up_to_date;
use crate::crd::{RoleParameters, Tag};
use crate::errors::DiffError;
use crate::policy::compact_document;
use crate::remote::{ObservedRole, UpdateRoleRequest};

/// Remote calls needed to converge a role, in the order they should be sent.
#[derive(Serialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePlan {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub update_role: Option<UpdateRoleRequest>,
    /// Compact trust policy to send with `UpdateAssumeRolePolicy`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub update_assume_role_policy: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub put_permissions_boundary: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tag: Vec<Tag>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub untag: Vec<String>,
    /// Drifted fields that cannot be changed in place (e.g. `path`)
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub immutable_drift: Vec<String>,
}

impl UpdatePlan {
    /// True when no remote call is needed. Immutable drift is reported but
    /// does not count as an action.
    pub fn is_empty(&self) -> bool {
        self.update_role.is_none()
            && self.update_assume_role_policy.is_none()
            && self.put_permissions_boundary.is_none()
            && self.tag.is_empty()
            && self.untag.is_empty()
    }
}

/// Decide which remote calls bring `observed` in line with `desired`.
///
/// Runs one reconciliation pass: late-initialize, compare, and only on drift
/// derive the patch and tag diff. Errors from the comparison are returned
/// as is; see [`DiffError::assume_up_to_date`].
#[instrument(level = "debug", skip_all, fields(role = ?observed.role_name))]
pub fn plan_update(desired: RoleParameters, observed: &ObservedRole) -> Result<UpdatePlan, DiffError> {
    let desired = late_initialize_role(desired, Some(observed));

    if is_role_up_to_date(&desired, observed)? {
        debug!("role up to date");
        return Ok(UpdatePlan::default());
    }

    let patch = create_patch(observed, &desired)?;
    let mut plan = UpdatePlan::default();

    if patch.description.is_some() || patch.max_session_duration.is_some() {
        plan.update_role = Some(UpdateRoleRequest {
            role_name: observed.role_name.clone().unwrap_or_default(),
            description: desired.description.clone(),
            max_session_duration: desired.max_session_duration,
        });
    }
    if !patch.assume_role_policy_document.is_empty() {
        plan.update_assume_role_policy = Some(compact_document(&patch.assume_role_policy_document)?);
    }
    plan.put_permissions_boundary = patch.permissions_boundary;
    if patch.path.is_some() {
        plan.immutable_drift.push("path".to_string());
    }

    let (tag, untag) = diff_tags(&desired.tags, &observed.tags);
    plan.tag = tag;
    plan.untag = untag;

    debug!(
        update_role = plan.update_role.is_some(),
        update_policy = plan.update_assume_role_policy.is_some(),
        boundary = plan.put_permissions_boundary.is_some(),
        tag = plan.tag.len(),
        untag = plan.untag.len(),
        immutable_drift = ?plan.immutable_drift,
        "role update planned"
    );
    Ok(plan)
}
