use crate::cli::config_path;
use crate::error::{LeadsheetError, Result};
use crate::settings::{default_settings_path, save_settings, Settings};

pub fn run(config: Option<&str>, force: bool) -> Result<()> {
    let path = config_path(config).unwrap_or_else(default_settings_path);
    if path.exists() && !force {
        return Err(LeadsheetError::Settings(format!(
            "{} already exists\nRun `leadsheet init --force` to replace it.",
            path.display()
        )));
    }
    save_settings(&Settings::default(), &path)?;
    println!("Wrote default settings to {}", path.display());
    Ok(())
}
