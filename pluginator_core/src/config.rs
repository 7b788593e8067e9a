//! Generator configuration.
//!
//! Defaults reproduce the builtin-plugin layout. An optional `pluginator.toml`
//! found in the current directory or one of its ancestors can override them:
//!
//! ```toml
//! [generator]
//! package_name = "builtins"
//! plugin_symbol = "KustomizePlugin"
//! output_dir = "${KUSTOMIZE_ROOT:-../../..}/api/builtins"
//! require_plugin_type = false
//! ```

use crate::error::{PluginatorError, Result};
use crate::provenance::Provenance;
use serde::Deserialize;
use std::{
    env, fs,
    path::{Path, PathBuf},
};
use tracing::{debug, error, info, trace, warn};

pub const CONFIG_FILE_NAME: &str = "pluginator.toml";
pub const DEFAULT_PACKAGE_NAME: &str = "builtins";
pub const DEFAULT_PLUGIN_SYMBOL: &str = "KustomizePlugin";

/// Where the builtins package lives relative to a plugin's source directory,
/// e.g. from `plugin/builtin/secretgenerator` to `api`.
const API_DIR_FROM_PLUGIN_DIR: [&str; 4] = ["..", "..", "..", "api"];

#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Package clause of the generated file.
    pub package_name: String,

    /// Name of the exported plugin variable whose declaration is dropped.
    pub plugin_symbol: String,

    /// Explicit output directory. When unset the directory is derived from
    /// the package name, see [`GeneratorConfig::output_dir`].
    pub output_dir: Option<PathBuf>,

    /// Fail instead of emitting `resmap.unknownPlugin` when the plugin has
    /// neither a `Transform(` nor a `Generate(` method.
    pub require_plugin_type: bool,

    pub provenance: Provenance,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            package_name: DEFAULT_PACKAGE_NAME.to_string(),
            plugin_symbol: DEFAULT_PLUGIN_SYMBOL.to_string(),
            output_dir: None,
            require_plugin_type: false,
            provenance: Provenance::current(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    #[serde(default)]
    generator: GeneratorSection,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct GeneratorSection {
    package_name: Option<String>,
    plugin_symbol: Option<String>,
    output_dir: Option<String>,
    require_plugin_type: Option<bool>,
}

impl GeneratorConfig {
    /// The directory generated files are written to, relative to the plugin
    /// source directory unless absolute.
    pub fn output_dir(&self) -> PathBuf {
        match &self.output_dir {
            Some(dir) => dir.clone(),
            None => API_DIR_FROM_PLUGIN_DIR
                .iter()
                .collect::<PathBuf>()
                .join(&self.package_name),
        }
    }

    /// Loads `pluginator.toml` from the current directory or its ancestors,
    /// falling back to defaults when there is none.
    pub fn load() -> Result<Self> {
        let current_dir = env::current_dir()?;
        Self::load_from(&current_dir)
    }

    /// Like [`GeneratorConfig::load`] but starts the search at `start_dir`.
    pub fn load_from(start_dir: &Path) -> Result<Self> {
        match Self::find_config_file(start_dir) {
            Some(path) => {
                info!("Found configuration file at: {:?}", path);
                Self::from_toml_path(&path)
            }
            None => {
                debug!("No {} found, using defaults", CONFIG_FILE_NAME);
                Ok(Self::default())
            }
        }
    }

    /// Loads configuration from a specific file.
    pub fn from_toml_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| {
            error!("Failed to read configuration file: {}", e);
            PluginatorError::open_input(path, e)
        })?;
        Self::parse_toml(&contents, path)
    }

    fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
        start_dir.ancestors().find_map(|dir| {
            let candidate = dir.join(CONFIG_FILE_NAME);
            trace!("Checking for config at: {:?}", candidate);
            candidate.is_file().then_some(candidate)
        })
    }

    fn parse_toml(contents: &str, path: &Path) -> Result<Self> {
        let file: ConfigFile = toml::from_str(contents).map_err(|e| {
            error!("Failed to parse {:?}: {}", path, e);
            PluginatorError::from(e)
        })?;
        let section = file.generator;
        let mut config = Self::default();

        if let Some(package_name) = section.package_name {
            config.package_name = Self::substitute_env_vars(&package_name)?;
            if config.package_name.is_empty() {
                return Err(PluginatorError::config("package_name must not be empty"));
            }
        }

        if let Some(symbol) = section.plugin_symbol {
            config.plugin_symbol = Self::substitute_env_vars(&symbol)?;
        }

        if let Some(output_dir) = section.output_dir {
            // Relative paths are resolved from the config file's directory
            let output_dir = PathBuf::from(Self::substitute_env_vars(&output_dir)?);
            let base_dir = path.parent().unwrap_or(Path::new("."));
            config.output_dir = Some(base_dir.join(output_dir));
        }

        if let Some(require) = section.require_plugin_type {
            config.require_plugin_type = require;
        }

        debug!(
            "Configuration: package {}, symbol {}, output {:?}, strict {}",
            config.package_name,
            config.plugin_symbol,
            config.output_dir(),
            config.require_plugin_type
        );
        Ok(config)
    }

    /// Substitute environment variables in config strings.
    /// Supports `${VAR_NAME}` and `${VAR_NAME:-default}`.
    fn substitute_env_vars(value: &str) -> Result<String> {
        let re = regex::Regex::new(r"\$\{([^}:]+)(?::-([^}]*))?\}")?;
        let mut result = value.to_string();

        for cap in re.captures_iter(value) {
            let var_name = &cap[1];
            let replacement = match (env::var(var_name), cap.get(2)) {
                (Ok(val), _) => val,
                (Err(_), Some(default)) => {
                    warn!(
                        "Environment variable {} not set, using default: {}",
                        var_name,
                        default.as_str()
                    );
                    default.as_str().to_string()
                }
                (Err(_), None) => {
                    error!(
                        "Environment variable {} not set and no default provided",
                        var_name
                    );
                    return Err(PluginatorError::EnvVarNotSet(var_name.to_string()));
                }
            };
            result = result.replace(&cap[0], &replacement);
        }

        Ok(result)
    }

    pub fn builder() -> GeneratorConfigBuilder {
        GeneratorConfigBuilder::new()
    }
}

/// Builder for creating a GeneratorConfig programmatically.
#[derive(Debug, Clone, Default)]
pub struct GeneratorConfigBuilder {
    config: GeneratorConfig,
}

impl GeneratorConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: GeneratorConfig::default(),
        }
    }

    /// Starts from an existing configuration, e.g. one loaded from a file.
    pub fn from_config(config: GeneratorConfig) -> Self {
        Self { config }
    }

    pub fn package_name(mut self, name: impl Into<String>) -> Self {
        self.config.package_name = name.into();
        self
    }

    pub fn plugin_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.config.plugin_symbol = symbol.into();
        self
    }

    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.output_dir = Some(dir.into());
        self
    }

    pub fn require_plugin_type(mut self, require: bool) -> Self {
        self.config.require_plugin_type = require;
        self
    }

    pub fn provenance(mut self, provenance: Provenance) -> Self {
        self.config.provenance = provenance;
        self
    }

    pub fn build(self) -> GeneratorConfig {
        self.config
    }
}
