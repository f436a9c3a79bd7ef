pub mod role;

pub use role::{RoleObservation, RoleParameters, Tag};
