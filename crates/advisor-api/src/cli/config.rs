//! `advisor config` -- show where configuration comes from and what it says.

use anyhow::Result;
use console::style;

use advisor_infra::config::{ConfigError, config_path, read_client_config};

use crate::state::AppState;

pub async fn show_config(state: &AppState, json: bool) -> Result<()> {
    let path = config_path(&state.data_dir);
    let file_status = match read_client_config(&state.data_dir).await {
        Ok(_) => "loaded".to_string(),
        Err(ConfigError::NotFound(_)) => "not found (using defaults)".to_string(),
        Err(err) => format!("ignored: {err}"),
    };

    if json {
        let output = serde_json::json!({
            "data_dir": state.data_dir.display().to_string(),
            "config_file": path.display().to_string(),
            "config_file_status": file_status,
            "config": state.config,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    let timeout = state
        .config
        .connect_timeout_secs
        .map(|secs| format!("{secs}s"))
        .unwrap_or_else(|| "none".to_string());

    println!();
    println!("  {}", style("Advisor configuration").bold());
    println!();
    println!("  {}     {}", style("Data dir:").bold(), state.data_dir.display());
    println!(
        "  {}  {} {}",
        style("Config file:").bold(),
        path.display(),
        style(format!("({file_status})")).dim()
    );
    println!();
    println!("  {}     {}", style("Base URL:").bold(), style(&state.config.base_url).cyan());
    println!("  {}   {}", style("User agent:").bold(), state.config.user_agent);
    println!("  {} {}", style("Connect timeout:").bold(), timeout);
    println!();
    Ok(())
}
