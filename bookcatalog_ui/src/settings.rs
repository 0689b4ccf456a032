use anyhow::Context;
use config::{Config, Environment, File};
use serde::Deserialize;

const CONFIG_FILE: &str = "bookcatalog";
const ENV_PREFIX: &str = "BOOKCATALOG";

#[derive(Debug, Clone, Deserialize, Eq, PartialEq)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize, Eq, PartialEq)]
/// Configuration layered from defaults, an optional `bookcatalog.toml` and
/// `BOOKCATALOG_*` environment variables (`__` separates nested keys, e.g. `BOOKCATALOG_SERVER__PORT`)
pub struct Settings {
    /// Base url of the catalog REST API
    pub backend_url: String,
    /// Serve a seeded in-process catalog instead of calling `backend_url`
    pub use_in_memory_backend: bool,
    pub server: ServerSettings,
}

impl Settings {
    pub fn load() -> anyhow::Result<Self> {
        Self::build(Environment::with_prefix(ENV_PREFIX))
    }

    fn build(environment: Environment) -> anyhow::Result<Self> {
        Config::builder()
            .set_default("backend_url", "http://localhost:5000")?
            .set_default("use_in_memory_backend", false)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8080)?
            .add_source(File::with_name(CONFIG_FILE).required(false))
            .add_source(
                environment
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .context("Failed to build configuration")?
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }
}
