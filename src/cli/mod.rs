pub mod classify;
pub mod generate;
pub mod init;
pub mod sheets;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::error::Result;
use crate::settings::{load_settings, shellexpand_path, Settings};

#[derive(Parser)]
#[command(
    name = "leadsheet",
    version,
    about = "Turn the CRM lead-tracking workbook into a typed TypeScript data module."
)]
pub struct Cli {
    /// Settings file (default: ~/.config/leadsheet/settings.json)
    #[arg(long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Read every configured sheet and regenerate the data module.
    Generate {
        /// Workbook to read (overrides settings)
        #[arg(long)]
        workbook: Option<String>,
        /// Module to write (overrides settings)
        #[arg(long)]
        output: Option<String>,
        /// createdAt/updatedAt stamp, YYYY-MM-DD (default: settings, then today)
        #[arg(long)]
        date: Option<String>,
    },
    /// List workbook sheets and the role each one plays.
    Sheets {
        /// Workbook to inspect (overrides settings)
        #[arg(long)]
        workbook: Option<String>,
    },
    /// Show how status and visa text would be classified.
    Classify {
        /// Status text, e.g. 'Evrak Toplanıyor'
        #[arg(long)]
        status: Option<String>,
        /// Country text
        #[arg(long, default_value = "")]
        country: String,
        /// Visa type text
        #[arg(long, default_value = "")]
        visa: String,
    },
    /// Write the default settings file so sheet layouts can be edited.
    Init {
        /// Overwrite an existing settings file
        #[arg(long)]
        force: bool,
    },
}

pub(crate) fn config_path(config: Option<&str>) -> Option<PathBuf> {
    config.map(|c| PathBuf::from(shellexpand_path(c)))
}

pub(crate) fn settings_for(config: Option<&str>) -> Result<Settings> {
    load_settings(config_path(config).as_deref())
}

/// Flag value if given, otherwise the settings value, with `~` expanded.
pub(crate) fn resolve_path(flag: Option<&str>, fallback: &str) -> PathBuf {
    PathBuf::from(shellexpand_path(flag.unwrap_or(fallback)))
}
