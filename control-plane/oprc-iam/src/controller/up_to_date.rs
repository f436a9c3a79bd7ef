use tracing::{debug, warn};

use super::projector::generate_role;
use crate::crd::RoleParameters;
use crate::errors::DiffError;
use crate::remote::ObservedRole;

/// Check whether applying `params` would leave `observed` unchanged.
///
/// `params` is projected onto a scratch copy of `observed` and the copy is
/// compared with the original; `observed` itself is never modified.
///
/// On error, [`DiffError::assume_up_to_date`] tells the caller which verdict
/// to act on: comparison failures report "up to date" so that no update is
/// attempted on uncertain state, a malformed desired document reports drift.
pub fn is_role_up_to_date(params: &RoleParameters, observed: &ObservedRole) -> Result<bool, DiffError> {
    let mut scratch = observed.clone();
    generate_role(params, &mut scratch)?;

    match scratch.semantic_eq(observed) {
        Ok(equal) => {
            debug!(role = ?observed.role_name, up_to_date = equal, "role comparison");
            Ok(equal)
        }
        Err(e) => {
            warn!(role = ?observed.role_name, error = %e, "role comparison failed; assuming up to date");
            Err(e)
        }
    }
}
