use anyhow::Result;
use colored::Colorize;
use serde::Serialize;

use forkstrap::paths;
use forkstrap::preflight::{self, ToolCheck};

use super::ConfigArgs;

#[derive(Serialize)]
struct DoctorReport {
    config_path: String,
    config_exists: bool,
    tools: Vec<ToolCheck>,
    ready: bool,
}

/// Check required tools. Exit code 0 when everything is present, 1 otherwise.
pub fn execute(args: ConfigArgs, json: bool) -> Result<i32> {
    let config = args.resolve()?;
    let config_path = paths::config_path();

    let tools = preflight::check_tools(&config);
    let report = DoctorReport {
        config_path: config_path.display().to_string(),
        config_exists: config_path.exists(),
        ready: preflight::all_found(&tools),
        tools,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        display(&report);
    }

    Ok(if report.ready { 0 } else { 1 })
}

fn display(report: &DoctorReport) {
    println!("🏥 Checking environment...\n");

    for tool in &report.tools {
        match &tool.path {
            Some(path) => println!(
                "  {} {} ({}) - {}",
                "✓".green(),
                tool.name,
                tool.purpose,
                path.display()
            ),
            None => println!(
                "  {} {} ({}) - not found on PATH",
                "✗".red(),
                tool.name,
                tool.purpose
            ),
        }
    }

    let status = if report.config_exists {
        "found"
    } else {
        "not found, using defaults"
    };
    println!("\nConfig: {} ({})", report.config_path, status);

    if report.ready {
        println!("\n{}", "✅ Ready to provision.".green());
    } else {
        println!("\n{}", "Install the missing tools before running forkstrap.".red());
    }
}
