//! Pure decision functions a role reconciler calls on every pass.
//!
//! Typical order: [`late_initialize_role`] the desired parameters, ask
//! [`is_role_up_to_date`], and only on drift compute [`create_patch`] and
//! [`diff_tags`]. [`plan_update`] runs that sequence end to end.

pub mod generate;
pub mod late_init;
pub mod patch;
pub mod plan;
pub mod projector;
pub mod tags;
pub mod up_to_date;

pub use generate::{generate_create_role_input, generate_role_observation};
pub use late_init::late_initialize_role;
pub use patch::create_patch;
pub use plan::{UpdatePlan, plan_update};
pub use projector::generate_role;
pub use tags::diff_tags;
pub use up_to_date::is_role_up_to_date;
