use std::env;
use std::path::PathBuf;

use config::Config;
use config::Environment;
use config::File;
use serde::Deserialize;
use serde::Serialize;

use crate::errors::CreationError;
use crate::utils::net;
use crate::Result;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct InstanceConfig {
    /// Instance name; defaults to the resolved listen address when empty.
    #[serde(default)]
    pub name: String,

    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,

    /// Comma-separated endpoints of the election backend every instance in
    /// the ensemble shares.
    #[serde(default)]
    pub backend_endpoints: String,

    #[serde(default = "default_log_dir")]
    pub log_dir: PathBuf,
}

impl Default for InstanceConfig {
    fn default() -> Self {
        Self {
            name: String::new(),
            listen_addr: default_listen_addr(),
            backend_endpoints: String::new(),
            log_dir: default_log_dir(),
        }
    }
}

impl InstanceConfig {
    /// Produces the fully-resolved configuration an instance is started
    /// with.
    ///
    /// Resolution validates the raw settings, normalizes `listen_addr` to a
    /// single-scheme URL and fills an empty `name` from it. The resolved
    /// `listen_addr` is the address the instance must be indexed under
    /// afterwards; it may differ from the requested one.
    pub fn resolve(mut self) -> Result<Self> {
        self.validate()?;
        self.listen_addr = net::normalize_addr(&self.listen_addr);
        if self.name.is_empty() {
            self.name = self.listen_addr.clone();
        }
        Ok(self)
    }

    /// # Errors
    /// Returns `CreationError::ConfigResolution` if any configuration rule is
    /// violated
    pub fn validate(&self) -> Result<()> {
        if self.listen_addr.is_empty() {
            return Err(CreationError::ConfigResolution("listen_addr cannot be empty".into()).into());
        }
        if self.backend_endpoints.is_empty() {
            return Err(CreationError::ConfigResolution(
                "backend_endpoints must name at least one endpoint".into(),
            )
            .into());
        }
        if self.log_dir.as_os_str().is_empty() {
            return Err(CreationError::ConfigResolution("log_dir path cannot be empty".into()).into());
        }
        Ok(())
    }

    /// Load configuration from layered sources:
    /// 1. Optional config file
    /// 2. `CONFIG_PATH` file override
    /// 3. `TEMPO`-prefixed environment variables (highest priority)
    pub fn load(path: Option<&str>) -> Result<Self> {
        let mut builder = Config::builder();

        if let Some(p) = path {
            builder = builder.add_source(File::with_name(p).required(true));
        }

        if let Ok(p) = env::var("CONFIG_PATH") {
            builder = builder.add_source(File::with_name(&p));
        }

        builder = builder.add_source(
            Environment::with_prefix("TEMPO")
                .separator("__")
                .ignore_empty(true)
                .try_parsing(true),
        );

        Ok(builder.build()?.try_deserialize()?)
    }
}

fn default_listen_addr() -> String {
    "127.0.0.1:9081".to_string()
}
fn default_log_dir() -> PathBuf {
    PathBuf::from("/tmp/tempo/logs")
}
