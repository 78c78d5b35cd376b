//! Generator configuration.
//!
//! Can be loaded from TOML, e.g. `openapi-ts.toml`:
//! ```toml
//! input = "openapi.yaml"
//! output = "src/types/api.ts"
//! type_prefix = "I"
//! type_style = "interface"
//!
//! [custom_type_imports]
//! Dayjs = "import { Dayjs } from 'dayjs';"
//! ```

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Default config file name looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "openapi-ts.toml";

/// How named object schemas are declared.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeStyle {
    /// `type Name = { ... };`
    #[default]
    Alias,
    /// `interface Name { ... }`
    Interface,
}

/// Options for one generation run.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Path or `http(s)` URL of the OpenAPI document.
    pub input: Option<String>,
    /// Destination `.ts` file.
    pub output: Option<PathBuf>,
    pub type_prefix: String,
    pub type_suffix: String,
    /// Prefix declarations with `export`.
    pub export_types: bool,
    pub type_style: TypeStyle,
    /// Render named enums as string-literal unions instead of `enum`.
    pub union_enums: bool,
    /// Custom type name to the import statement that provides it.
    pub custom_type_imports: BTreeMap<String, String>,
    /// Accepted for compatibility; nullability is always emitted.
    pub strict_nullable: bool,
    /// Treat document validation failures as fatal.
    pub strict_validation: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input: None,
            output: None,
            type_prefix: String::new(),
            type_suffix: String::new(),
            export_types: true,
            type_style: TypeStyle::default(),
            union_enums: false,
            custom_type_imports: BTreeMap::new(),
            strict_nullable: true,
            strict_validation: true,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::ConfigFile {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        toml::from_str(&content).map_err(|e| Error::ConfigFile {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Load `openapi-ts.toml` from `dir` if it exists, else defaults.
    pub fn discover(dir: &Path) -> Result<Self> {
        let path = dir.join(CONFIG_FILE_NAME);
        if path.is_file() {
            tracing::debug!(path = %path.display(), "loading config");
            Self::load_file(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Check that everything needed for a file-to-file run is present.
    pub fn validate(&self) -> Result<()> {
        if self.input.as_deref().is_none_or(|i| i.trim().is_empty()) {
            return Err(Error::Config("input path is required".into()));
        }
        if self.output.as_ref().is_none_or(|o| o.as_os_str().is_empty()) {
            return Err(Error::Config("output path is required".into()));
        }
        Ok(())
    }
}
