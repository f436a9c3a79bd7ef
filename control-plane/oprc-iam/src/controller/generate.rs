use crate::crd::{RoleObservation, RoleParameters};
use crate::remote::{CreateRoleRequest, ObservedRole};

/// Map role parameters onto a create call. The policy document is passed as
/// written; the remote side validates it.
pub fn generate_create_role_input(name: &str, params: &RoleParameters) -> CreateRoleRequest {
    CreateRoleRequest {
        role_name: name.to_string(),
        assume_role_policy_document: params.assume_role_policy_document.clone(),
        description: params.description.clone(),
        max_session_duration: params.max_session_duration,
        path: params.path.clone(),
        permissions_boundary: params.permissions_boundary.clone(),
        tags: params.tags.clone(),
    }
}

pub fn generate_role_observation(role: &ObservedRole) -> RoleObservation {
    RoleObservation {
        arn: role.arn.clone().unwrap_or_default(),
        role_id: role.role_id.clone().unwrap_or_default(),
    }
}
