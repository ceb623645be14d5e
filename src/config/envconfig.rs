use std::path::Path;

use ::config as config_rs;
use anyhow::{Context, Result};
use serde::de::DeserializeOwned;

/// Config loaded from `PREFIX`-ed environment variables, with `SEPARATOR`
/// marking nesting (`APP_GENERAL__PORT` -> `general.port`).
pub trait EnvConfig: Sized + DeserializeOwned {
    const PREFIX: &'static str = "APP";
    const SEPARATOR: &'static str = "__";
    /// Unprefixed variables mapped onto config keys, applied last.
    const LEGACY_OVERRIDES: &'static [(&'static str, &'static str)] = &[];

    fn load_dotenv() {
        // .env next to the manifest first, then the working directory.
        let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
        let _ = dotenvy::from_filename(manifest_dir.join(".env")).or_else(|_| dotenvy::dotenv());
    }

    fn validate(&self) -> Result<()> {
        Ok(())
    }

    fn from_env() -> Result<Self> {
        Self::load_dotenv();
        Self::from_vars(std::env::vars())
    }

    /// Builds the config from an explicit variable set instead of the process
    /// environment.
    fn from_vars(vars: impl IntoIterator<Item = (String, String)>) -> Result<Self> {
        let vars: config_rs::Map<String, String> = vars.into_iter().collect();

        let mut builder = config_rs::Config::builder().add_source(
            config_rs::Environment::with_prefix(Self::PREFIX)
                .prefix_separator("_")
                .separator(Self::SEPARATOR)
                .try_parsing(true)
                .source(Some(vars.clone())),
        );

        for (var, key) in Self::LEGACY_OVERRIDES {
            let value = vars
                .get(*var)
                .filter(|value| !value.trim().is_empty())
                .cloned();
            builder = builder
                .set_override_option(*key, value)
                .with_context(|| format!("failed to apply {var} override"))?;
        }

        let cfg = builder
            .build()
            .context("failed to read environment variables for config")?
            .try_deserialize::<Self>()
            .context("failed to deserialize environment into config")?;

        cfg.validate()?;
        Ok(cfg)
    }
}
