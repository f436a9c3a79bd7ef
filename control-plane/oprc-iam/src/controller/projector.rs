use crate::crd::RoleParameters;
use crate::errors::DiffError;
use crate::policy::compact_and_escape_json;
use crate::remote::ObservedRole;

/// Write `params` onto `role` as if they had been applied remotely.
///
/// On a malformed policy document the error is returned with `role` possibly
/// half-written, so only call this on a scratch copy.
pub fn generate_role(params: &RoleParameters, role: &mut ObservedRole) -> Result<(), DiffError> {
    if !params.assume_role_policy_document.is_empty() {
        let doc = compact_and_escape_json(&params.assume_role_policy_document)?;
        role.assume_role_policy_document = Some(doc);
    }
    role.description = params.description.clone();
    role.max_session_duration = params.max_session_duration;
    role.path = params.path.clone();

    match &params.permissions_boundary {
        // The boundary type is server-assigned; keep whatever is observed.
        Some(arn) => {
            role.permissions_boundary
                .get_or_insert_with(Default::default)
                .permissions_boundary_arn = Some(arn.clone());
        }
        None => role.permissions_boundary = None,
    }

    if !params.tags.is_empty() {
        role.tags = params.tags.clone();
    }
    Ok(())
}
