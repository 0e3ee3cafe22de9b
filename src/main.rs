use std::io::Write;

use anyhow::{Context, Result};
use clap::Parser;

use bext::cli::{self, CliArgs, CliCommand};
use bext::config_paths;

fn main() -> Result<()> {
    let args = CliArgs::parse();
    bext::tracing::init();

    match args.command {
        CliCommand::Check(settings) => {
            let report = cli::check(&settings.load()?);
            let yaml = serde_yaml::to_string(&report).context("serializing keymap")?;

            let mut stdout = std::io::stdout().lock();
            write!(stdout, "{yaml}")?;
            for key in &report.dropped {
                writeln!(stdout, "# dropped: {key:?}")?;
            }
        }
        CliCommand::Replay { settings, events } => {
            let report = cli::replay(settings.load()?, &events);
            let json = serde_json::to_string_pretty(&report).context("serializing report")?;
            println!("{json}");
        }
        CliCommand::Paths => {
            let show = |path: Option<std::path::PathBuf>| {
                path.map(|p| p.display().to_string())
                    .unwrap_or_else(|| "(unavailable)".to_string())
            };
            println!("config:   {}", show(config_paths::config_dir()));
            println!("settings: {}", show(config_paths::settings_file()));
            println!("logs:     {}", show(config_paths::logs_dir()));
            println!("log file: {}", show(config_paths::log_file()));
        }
    }

    Ok(())
}
