use crate::commands::{confirm, prompt};
use crate::config::{parse_api_url, Config, DEFAULT_API_URL};
use crate::error::{EmsError, Result};

pub fn run() -> Result<()> {
    let config_path = Config::config_path()?;

    if config_path.exists()
        && !confirm(&format!(
            "Config file already exists at {}. Overwrite?",
            config_path.display()
        ))?
    {
        println!("Aborted.");
        return Ok(());
    }

    println!("EMS CLI Configuration");
    println!("=====================\n");

    let answer = prompt(&format!("Employee API URL [{DEFAULT_API_URL}]: "))?.unwrap_or_default();
    let api_url = match answer.trim() {
        "" => DEFAULT_API_URL.to_string(),
        other => parse_api_url(other)?.to_string(),
    };

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| EmsError::ConfigWrite {
            path: config_path.clone(),
            source: e,
        })?;
    }

    let config = Config {
        api_url: Some(api_url),
    };
    let contents = toml::to_string(&config).map_err(|e| EmsError::ConfigWrite {
        path: config_path.clone(),
        source: std::io::Error::other(e),
    })?;

    std::fs::write(&config_path, contents).map_err(|e| EmsError::ConfigWrite {
        path: config_path.clone(),
        source: e,
    })?;

    tracing::debug!(path = %config_path.display(), "config written");
    println!("\nConfig saved to {}", config_path.display());
    println!("You can now use 'ems' commands!");

    Ok(())
}
