use std::path::{Path, PathBuf};

use clap::Subcommand;
use cupmate_core::Config;

use super::{load_config, CmdResult};

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Get a config value
    Get {
        /// Dot-separated key (e.g. "intake.daily_goal", "reminders.sound")
        key: String,
    },
    /// Print the whole configuration
    List {
        /// Output as JSON instead of TOML
        #[arg(long)]
        json: bool,
    },
    /// Print the config file location
    Path,
    /// Write a default config file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Reset config to defaults
    Reset,
}

fn target_path(config_path: Option<&Path>) -> Result<PathBuf, Box<dyn std::error::Error>> {
    match config_path {
        Some(p) => Ok(p.to_path_buf()),
        None => Ok(Config::path()?),
    }
}

pub fn run(action: ConfigAction, config_path: Option<&Path>) -> CmdResult {
    match action {
        ConfigAction::Get { key } => {
            let config = load_config(config_path)?;
            match config.get(&key) {
                Some(value) => println!("{value}"),
                None => return Err(format!("unknown key: {key}").into()),
            }
        }
        ConfigAction::List { json } => {
            let config = load_config(config_path)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&config)?);
            } else {
                print!("{}", toml::to_string_pretty(&config)?);
            }
        }
        ConfigAction::Path => println!("{}", target_path(config_path)?.display()),
        ConfigAction::Init { force } => {
            let path = target_path(config_path)?;
            if path.exists() && !force {
                return Err(format!("{} already exists (use --force)", path.display()).into());
            }
            Config::default().save_to(&path)?;
            println!("wrote {}", path.display());
        }
        ConfigAction::Reset => {
            let path = target_path(config_path)?;
            Config::default().save_to(&path)?;
            println!("config reset to defaults");
        }
    }
    Ok(())
}
