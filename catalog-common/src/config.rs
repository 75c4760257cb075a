//! Configuration loading and root folder resolution
//!
//! Bootstrap settings come from, in priority order:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable (`CATALOG_ROOT_FOLDER`, then `CATALOG_ROOT`)
//! 3. TOML config file (`<config dir>/catalog/<module>.toml`)
//! 4. OS-dependent compiled default (fallback)
//!
//! A missing or unreadable TOML file never stops startup: a warning is logged
//! and the compiled defaults are used.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Default HTTP port for the catalog web server
pub const DEFAULT_PORT: u16 = 5740;

/// Default bind address
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Database file name inside the root folder
pub const DATABASE_FILE: &str = "catalog.db";

/// Primary root folder environment variable
pub const ENV_ROOT_FOLDER: &str = "CATALOG_ROOT_FOLDER";

/// Alternative root folder environment variable
pub const ENV_ROOT: &str = "CATALOG_ROOT";

/// Built-in defaults used when nothing else is configured
#[derive(Debug, Clone)]
pub struct CompiledDefaults {
    pub root_folder: PathBuf,
    pub host: String,
    pub port: u16,
    pub log_level: String,
    pub log_file: Option<PathBuf>,
}

impl CompiledDefaults {
    pub fn for_current_platform() -> Self {
        let root_folder = if cfg!(target_os = "linux") {
            // ~/.local/share/catalog
            dirs::data_local_dir()
                .map(|d| d.join("catalog"))
                .unwrap_or_else(|| PathBuf::from("/var/lib/catalog"))
        } else if cfg!(target_os = "macos") {
            // ~/Library/Application Support/catalog
            dirs::data_dir()
                .map(|d| d.join("catalog"))
                .unwrap_or_else(|| PathBuf::from("/Library/Application Support/catalog"))
        } else if cfg!(target_os = "windows") {
            // %LOCALAPPDATA%\catalog
            dirs::data_local_dir()
                .map(|d| d.join("catalog"))
                .unwrap_or_else(|| PathBuf::from("C:\\ProgramData\\catalog"))
        } else {
            PathBuf::from("./catalog_data")
        };

        Self {
            root_folder,
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            log_level: default_log_level(),
            log_file: None,
        }
    }
}

/// Bootstrap configuration loaded from TOML file
///
/// Every field is optional. Unset fields fall through to compiled defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TomlConfig {
    /// Folder holding `catalog.db`
    #[serde(default)]
    pub root_folder: Option<PathBuf>,

    /// Bind address for the HTTP server
    #[serde(default)]
    pub host: Option<String>,

    /// HTTP server port
    #[serde(default)]
    pub port: Option<u16>,

    /// Logging configuration (optional)
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log file path (optional, logs to stderr if not specified)
    #[serde(default)]
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl TomlConfig {
    /// Parse a TOML config file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|e| Error::Config(format!("Invalid config file {}: {}", path.display(), e)))
    }

    /// Load the module's config file, falling back to defaults on any problem
    pub fn load_or_default(module_name: &str) -> Self {
        let (config, problem) = Self::load_or_default_from(config_file_path(module_name).as_deref());
        if let Some(e) = problem {
            warn!("{} (using defaults)", e);
        }
        config
    }

    /// Like [`TomlConfig::load_or_default`], but hands back the load error
    /// instead of logging it, for callers that read config before logging
    /// is set up. A missing file is not an error.
    pub fn load_or_default_from(path: Option<&Path>) -> (Self, Option<Error>) {
        let Some(path) = path else {
            debug!("No config directory on this platform, using defaults");
            return (Self::default(), None);
        };

        if !path.exists() {
            debug!("Config file {} not found, using defaults", path.display());
            return (Self::default(), None);
        }

        match Self::load(path) {
            Ok(config) => (config, None),
            Err(e) => (Self::default(), Some(e)),
        }
    }

    /// Bind address: TOML value or compiled default
    pub fn host_or_default(&self) -> String {
        self.host
            .clone()
            .unwrap_or_else(|| CompiledDefaults::for_current_platform().host)
    }

    /// Port: TOML value or compiled default
    pub fn port_or_default(&self) -> u16 {
        self.port.unwrap_or(DEFAULT_PORT)
    }
}

/// Per-module config file location, e.g. `~/.config/catalog/catalog-web.toml`
pub fn config_file_path(module_name: &str) -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("catalog").join(format!("{}.toml", module_name)))
}

/// Resolves the root folder following the priority order in the module docs
pub struct RootFolderResolver {
    module_name: String,
    cli_override: Option<PathBuf>,
    toml: Option<TomlConfig>,
}

impl RootFolderResolver {
    pub fn new(module_name: &str) -> Self {
        Self {
            module_name: module_name.to_string(),
            cli_override: None,
            toml: None,
        }
    }

    /// Root folder given on the command line
    pub fn with_cli_override(mut self, root_folder: Option<PathBuf>) -> Self {
        self.cli_override = root_folder;
        self
    }

    /// Use an already-loaded TOML config instead of reading the module's file
    pub fn with_toml(mut self, toml: TomlConfig) -> Self {
        self.toml = Some(toml);
        self
    }

    pub fn resolve(&self) -> PathBuf {
        // Priority 1: Command-line argument
        if let Some(path) = &self.cli_override {
            return path.clone();
        }

        // Priority 2: Environment variables
        for var in [ENV_ROOT_FOLDER, ENV_ROOT] {
            if let Ok(path) = std::env::var(var) {
                if !path.trim().is_empty() {
                    return PathBuf::from(path);
                }
            }
        }

        // Priority 3: TOML config file
        let toml = match &self.toml {
            Some(toml) => toml.clone(),
            None => TomlConfig::load_or_default(&self.module_name),
        };
        if let Some(root_folder) = toml.root_folder {
            return root_folder;
        }

        // Priority 4: OS-dependent compiled default
        CompiledDefaults::for_current_platform().root_folder
    }
}

/// Prepares the resolved root folder for use
pub struct RootFolderInitializer {
    root_folder: PathBuf,
}

impl RootFolderInitializer {
    pub fn new(root_folder: PathBuf) -> Self {
        Self { root_folder }
    }

    /// Create the root folder (and parents) if missing; safe to call repeatedly
    pub fn ensure_directory_exists(&self) -> Result<()> {
        if !self.root_folder.exists() {
            std::fs::create_dir_all(&self.root_folder)?;
        }
        Ok(())
    }

    pub fn database_path(&self) -> PathBuf {
        self.root_folder.join(DATABASE_FILE)
    }

    pub fn database_exists(&self) -> bool {
        self.database_path().exists()
    }
}
