use anyhow::Result;

use forkstrap::paths;

use super::ConfigArgs;

/// Print the effective configuration after file, environment and flags.
pub fn execute(args: ConfigArgs, json: bool) -> Result<()> {
    let config = args.resolve()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(());
    }

    println!("# {}", paths::config_path().display());
    print!("{}", config.to_toml()?);
    Ok(())
}
