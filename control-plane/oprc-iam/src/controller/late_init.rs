use crate::crd::RoleParameters;
use crate::policy::unescape_policy;
use crate::remote::ObservedRole;

/// Fill the unset fields of `desired` with the values seen on `observed`.
///
/// Fields the user already set are never touched. Tags are only adopted as a
/// whole, when `desired` has none. The remote policy document is stored
/// decoded so it can be canonicalized again like a user-supplied one.
pub fn late_initialize_role(
    mut desired: RoleParameters,
    observed: Option<&ObservedRole>,
) -> RoleParameters {
    let Some(role) = observed else {
        return desired;
    };

    if desired.assume_role_policy_document.is_empty() {
        if let Some(doc) = role.assume_role_policy_document.as_deref() {
            desired.assume_role_policy_document = unescape_policy(doc);
        }
    }
    late_init(&mut desired.description, &role.description);
    late_init(&mut desired.max_session_duration, &role.max_session_duration);
    late_init(&mut desired.path, &role.path);
    if desired.permissions_boundary.is_none() {
        desired.permissions_boundary = role.permissions_boundary_arn().cloned();
    }
    if desired.tags.is_empty() && !role.tags.is_empty() {
        desired.tags = role.tags.clone();
    }
    desired
}

fn late_init<T: Clone>(field: &mut Option<T>, from: &Option<T>) {
    if field.is_none() {
        *field = from.clone();
    }
}
