use clap::Parser;
use envconfig::Envconfig;
use oprc_iam::{cli::{IamCli, run}, config::IamDiffConfig, init_tracing};
use tracing::debug;

fn main() -> anyhow::Result<()> {
    let cfg = IamDiffConfig::init_from_env()?;
    init_tracing(&cfg.log);
    debug!(?cfg, "Starting oprc-iam");

    let cli = IamCli::parse();
    let out = run(&cli.command, &cfg)?;
    println!("{}", out);
    Ok(())
}
