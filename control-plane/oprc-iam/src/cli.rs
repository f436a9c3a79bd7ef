use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::{info, warn};

use crate::config::IamDiffConfig;
use crate::controller::{
    UpdatePlan, create_patch, diff_tags, generate_create_role_input,
    generate_role_observation, is_role_up_to_date, late_initialize_role,
    plan_update,
};
use crate::crd::RoleParameters;
use crate::remote::ObservedRole;

/// Offline role reconciliation over JSON files
#[derive(clap::Parser, Clone, Debug)]
#[clap(author, version, about, long_about = None)]
pub struct IamCli {
    #[command(subcommand)]
    pub command: IamCommands,
}

#[derive(clap::Subcommand, Clone, Debug)]
pub enum IamCommands {
    /// Remote calls needed to converge the observed role
    #[clap(aliases = &["p"])]
    Plan {
        #[clap(flatten)]
        input: PairArgs,
    },
    /// Desired parameters with unset fields filled from the observed role
    #[clap(aliases = &["li"])]
    LateInit {
        #[clap(flatten)]
        input: PairArgs,
    },
    /// Whether the observed role already matches the desired parameters
    #[clap(aliases = &["utd"])]
    UpToDate {
        #[clap(flatten)]
        input: PairArgs,
    },
    /// Sparse parameters holding only the changed fields
    Patch {
        #[clap(flatten)]
        input: PairArgs,
    },
    /// Tags to add and tag keys to remove
    Tags {
        #[clap(flatten)]
        input: PairArgs,
    },
    /// Create request for a new role
    CreateInput {
        /// Role name
        #[arg(short, long)]
        name: String,
        /// Desired parameters file
        #[arg(short, long)]
        desired: PathBuf,
    },
    /// Identity fields of the observed role
    Observe {
        /// Observed role file
        #[arg(short, long)]
        observed: PathBuf,
    },
}

#[derive(clap::Args, Clone, Debug)]
pub struct PairArgs {
    /// Desired parameters file
    #[arg(short, long)]
    pub desired: PathBuf,
    /// Observed role file
    #[arg(short, long)]
    pub observed: PathBuf,
}

impl PairArgs {
    fn load(&self) -> anyhow::Result<(RoleParameters, ObservedRole)> {
        Ok((read_json(&self.desired)?, read_json(&self.observed)?))
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("parsing {}", path.display()))
}

/// Execute `command` and return the rendered output.
pub fn run(command: &IamCommands, cfg: &IamDiffConfig) -> anyhow::Result<String> {
    let out = match command {
        IamCommands::Plan { input } => {
            let (desired, observed) = input.load()?;
            match plan_update(desired, &observed) {
                Ok(plan) => {
                    info!(empty = plan.is_empty(), "plan computed");
                    cfg.render(&plan)?
                }
                Err(e) if cfg.fail_open && e.assume_up_to_date() => {
                    warn!(error = %e, "comparison failed; planning no changes");
                    cfg.render(&UpdatePlan::default())?
                }
                Err(e) => return Err(e.into()),
            }
        }
        IamCommands::LateInit { input } => {
            let (desired, observed) = input.load()?;
            cfg.render(&late_initialize_role(desired, Some(&observed)))?
        }
        IamCommands::UpToDate { input } => {
            let (desired, observed) = input.load()?;
            let desired = late_initialize_role(desired, Some(&observed));
            match is_role_up_to_date(&desired, &observed) {
                Ok(up_to_date) => cfg.render(&json!({ "upToDate": up_to_date }))?,
                Err(e) => cfg.render(&json!({
                    "upToDate": cfg.fail_open && e.assume_up_to_date(),
                    "error": e.to_string(),
                }))?,
            }
        }
        IamCommands::Patch { input } => {
            let (desired, observed) = input.load()?;
            let desired = late_initialize_role(desired, Some(&observed));
            cfg.render(&create_patch(&observed, &desired)?)?
        }
        IamCommands::Tags { input } => {
            let (desired, observed) = input.load()?;
            let desired = late_initialize_role(desired, Some(&observed));
            let (add, remove) = diff_tags(&desired.tags, &observed.tags);
            cfg.render(&json!({ "add": add, "remove": remove }))?
        }
        IamCommands::CreateInput { name, desired } => {
            let desired: RoleParameters = read_json(desired)?;
            cfg.render(&generate_create_role_input(name, &desired))?
        }
        IamCommands::Observe { observed } => {
            let observed: ObservedRole = read_json(observed)?;
            cfg.render(&generate_role_observation(&observed))?
        }
    };
    Ok(out)
}
