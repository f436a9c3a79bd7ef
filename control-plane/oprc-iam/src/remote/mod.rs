pub mod requests;
pub mod role;

pub use requests::{CreateRoleRequest, UpdateRoleRequest};
pub use role::{AttachedPermissionsBoundary, CrossReference, ObservedRole, RoleLastUsed};
