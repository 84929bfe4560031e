use crate::cli::{ParamOverrides, ParamsArgs};
use crate::config::build_config;
use crate::config::file::FileConfig;
use crate::error::Result;
use tracing::info;

pub async fn run(args: ParamsArgs) -> Result<()> {
    print!("{}", render(&args)?);
    Ok(())
}

/// The effective configuration as TOML, in the same layout the `-c` file accepts.
fn render(args: &ParamsArgs) -> Result<String> {
    let config = build_config(
        args.config.as_deref(),
        &ParamOverrides::default(),
        &args.set_values,
    )?;
    info!("Rendering effective analysis parameters.");
    FileConfig::from(&config).to_toml()
}
