use crate::error::CalendarError;
use crate::infrastructure::config::{ensure_default_configs, load_settings, CalendarSettings};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub struct BootstrapResult {
    pub config_dir: PathBuf,
    pub settings: CalendarSettings,
}

pub fn bootstrap_workspace(workspace_root: &Path) -> Result<BootstrapResult, CalendarError> {
    let config_dir = workspace_root.join("config");
    fs::create_dir_all(&config_dir)?;

    ensure_default_configs(&config_dir)?;
    let settings = load_settings(&config_dir)?;

    Ok(BootstrapResult {
        config_dir,
        settings,
    })
}
