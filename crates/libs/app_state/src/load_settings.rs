use crate::AppSettings;
use color_eyre::eyre::{Context, Result};
use std::path::Path;
use tracing::debug;

pub const DEFAULT_SETTINGS_PATH: &str = "config/settings.yaml";

/// Load the app settings from a YAML file, overlaid with `APP__`-prefixed environment variables
/// (e.g. `APP__FFMPEG__BINARY=/opt/ffmpeg/bin/ffmpeg`).
pub fn load_app_settings_from(config_path: &Path) -> Result<AppSettings> {
    // Need to load from dotenv to get it to overwrite settings from env.
    dotenv::from_path(".env").ok();
    let config_path = config_path
        .canonicalize()
        .wrap_err_with(|| format!("Cannot find settings file {}", config_path.display()))?;
    debug!("Loading settings from {}", config_path.display());

    let builder = config::Config::builder()
        .add_source(config::File::from(config_path))
        .add_source(
            config::Environment::with_prefix("APP")
                .separator("__")
                .try_parsing(true),
        );

    let settings = builder.build()?.try_deserialize::<AppSettings>()?;
    Ok(settings)
}
