// src/cli/config.rs
use super::{CliError, ConfigCommand};
use crate::settings::io::{load_settings_from_file, save_settings_to_file};
use crate::settings::AppSettings;
use crate::sheets::Domain;

/// `show` prints the effective settings; the setters edit the stored file so
/// environment overrides are never persisted.
pub fn run(settings: AppSettings, action: ConfigCommand) -> Result<(), CliError> {
    match action {
        ConfigCommand::Show => {
            println!("Export URL: {}", settings.spreadsheet_export_url);
            for domain in Domain::ALL {
                let tab = settings.tabs.get(domain);
                println!("  {:<20} {}", domain.label(), if tab.is_empty() { "(not set)" } else { tab });
            }
            println!("AI model:   {}", settings.ai_model_id);
            println!("Store:      {}", settings.resolved_store_path()?.display());
        }
        ConfigCommand::SetTab { domain, tab_id } => {
            let mut stored: AppSettings = load_settings_from_file()?;
            stored.tabs.set(domain, tab_id.trim().to_string());
            let path = save_settings_to_file(&stored)?;
            println!("{} tab set; saved to {}", domain.label(), path.display());
        }
        ConfigCommand::SetUrl { url } => {
            if !url.starts_with("http") {
                return Err(CliError::InvalidArgument(format!("Not a URL: {}", url)));
            }
            let mut stored: AppSettings = load_settings_from_file()?;
            stored.spreadsheet_export_url = url;
            let path = save_settings_to_file(&stored)?;
            println!("Export URL saved to {}", path.display());
        }
    }
    Ok(())
}
