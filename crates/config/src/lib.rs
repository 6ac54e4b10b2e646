pub mod fold;
pub mod shared;

use schemars::schema_for;

use std::{fs::OpenOptions, io::Read, path::PathBuf, sync::OnceLock};

pub use crate::fold::FoldConfig;
pub use crate::shared::Curve;

static CONFIG_PATH: OnceLock<PathBuf> = OnceLock::new();

/// Override the config file location. Only the first call has effect.
pub fn set_config_path(path: Option<&str>) {
    if let Some(p) = path {
        if CONFIG_PATH.set(PathBuf::from(p)).is_err() {
            log::warn!("config path already set, ignoring {p}");
        }
    }
}

pub fn get_config_path() -> Result<PathBuf, String> {
    if let Some(p) = CONFIG_PATH.get() {
        return Ok(p.clone());
    }
    let bd = xdg::BaseDirectories::new();
    bd.place_config_file("foldable/config.jsonc")
        .map_err(|e| format!("failed to create config file: {e}"))
}

fn get_config_file_content() -> Result<String, String> {
    let p = get_config_path()?;

    OpenOptions::new()
        .read(true)
        .open(&p)
        .and_then(|mut f| {
            let mut s = String::new();
            f.read_to_string(&mut s).map(|_| s)
        })
        .map_err(|e| format!("failed to open config file {}: {e}", p.display()))
}

pub fn parse_config(s: &str) -> Result<FoldConfig, String> {
    let conf: FoldConfig =
        serde_jsonrc::from_str(s).map_err(|e| format!("JSON parse error: {e}"))?;
    conf.validate()?;
    Ok(conf)
}

pub fn get_config_root() -> Result<FoldConfig, String> {
    let s = get_config_file_content()?;
    parse_config(&s)
}

pub fn output_json_schema() -> Result<(), String> {
    let schema = schema_for!(FoldConfig);
    let s = serde_jsonrc::to_string_pretty(&schema).map_err(|e| e.to_string())?;
    println!("{s}");
    Ok(())
}
