use crate::generators::base::naming::relative_module_path;
use crate::generators::{RenderOptions, RouteStyle};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Key holding the generator settings inside `package.json`
pub const PACKAGE_JSON_KEY: &str = "rpcTypegen";

/// Default configuration file name
pub const CONFIG_FILE_NAME: &str = "rpc-typegen.json";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid route style: {0}. Use 'table' or 'register'")]
    InvalidRouteStyle(String),
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BundleConfig {
    /// Directory receiving the bundled client and router
    #[serde(default = "default_bundle_out_dir")]
    pub out_dir: String,

    /// Bundler executable
    #[serde(default = "default_esbuild")]
    pub esbuild: String,
}

impl Default for BundleConfig {
    fn default() -> Self {
        Self {
            out_dir: default_bundle_out_dir(),
            esbuild: default_esbuild(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GenerateConfig {
    /// Directory holding the handler modules
    #[serde(default = "default_entry_dir")]
    pub entry_dir: String,

    /// Prefix of every endpoint path, normalized to `/.../`
    #[serde(default = "default_endpoint_path_prefix")]
    pub endpoint_path_prefix: String,

    /// Where the generated router is written
    #[serde(default = "default_router_path")]
    pub router_path: String,

    /// Directory of the generated client; the file is `<clientName>.ts`
    #[serde(default = "default_client_out_dir")]
    pub client_out_dir: String,

    /// Class name of the generated client
    #[serde(default = "default_client_name")]
    pub client_name: String,

    /// Client template file replacing the built-in one
    #[serde(default)]
    pub client_template: Option<String>,

    /// Router template file replacing the built-in one
    #[serde(default)]
    pub server_template: Option<String>,

    #[serde(default)]
    pub route_style: RouteStyle,

    /// Indentation unit of generated code
    #[serde(default = "default_indent")]
    pub indent: String,

    /// Module path the router imports handlers from.
    /// Defaults to the entry directory relative to the router.
    #[serde(default)]
    pub imports_base: Option<String>,

    /// Accept handlers declared without parameters
    #[serde(default)]
    pub allow_parameterless: Option<bool>,

    /// Regular expressions matched against entry-relative paths. Unset means
    /// dot-entries and `node_modules` are skipped.
    #[serde(default)]
    pub exclude_patterns: Option<Vec<String>>,

    /// Prepend a generated-file comment
    #[serde(default)]
    pub emit_header: Option<bool>,

    #[serde(default)]
    pub verbose: Option<bool>,

    /// Bundle the generated files when present
    #[serde(default)]
    pub bundle: Option<BundleConfig>,
}

fn default_entry_dir() -> String {
    "./src/api".to_string()
}

fn default_endpoint_path_prefix() -> String {
    "/".to_string()
}

fn default_router_path() -> String {
    "src/rpcRouter.ts".to_string()
}

fn default_client_out_dir() -> String {
    "src/client".to_string()
}

fn default_client_name() -> String {
    "RpcClient".to_string()
}

fn default_indent() -> String {
    "\t".to_string()
}

fn default_bundle_out_dir() -> String {
    "dist".to_string()
}

fn default_esbuild() -> String {
    "esbuild".to_string()
}

impl Default for GenerateConfig {
    fn default() -> Self {
        Self {
            entry_dir: default_entry_dir(),
            endpoint_path_prefix: default_endpoint_path_prefix(),
            router_path: default_router_path(),
            client_out_dir: default_client_out_dir(),
            client_name: default_client_name(),
            client_template: None,
            server_template: None,
            route_style: RouteStyle::default(),
            indent: default_indent(),
            imports_base: None,
            allow_parameterless: None,
            exclude_patterns: None,
            emit_header: None,
            verbose: Some(false),
            bundle: None,
        }
    }
}

impl GenerateConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load the `rpcTypegen` section of a `package.json`, if it has one
    pub fn from_package_json<P: AsRef<Path>>(path: P) -> Result<Option<Self>, ConfigError> {
        let content = fs::read_to_string(path)?;
        let manifest: serde_json::Value = serde_json::from_str(&content)?;

        match manifest.get(PACKAGE_JSON_KEY) {
            Some(section) => {
                let config: Self = serde_json::from_value(section.clone())?;
                config.validate()?;
                Ok(Some(config))
            }
            None => Ok(None),
        }
    }

    /// Save configuration to a file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Store the configuration under `rpcTypegen` in an existing `package.json`,
    /// keeping everything else in the manifest
    pub fn save_to_package_json<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        if !path.as_ref().exists() {
            return Err(ConfigError::InvalidConfig(format!(
                "package.json not found at {}",
                path.as_ref().display()
            )));
        }

        let content = fs::read_to_string(&path)?;
        let mut manifest: serde_json::Value = serde_json::from_str(&content)?;
        let Some(object) = manifest.as_object_mut() else {
            return Err(ConfigError::InvalidConfig(format!(
                "{} does not contain a JSON object",
                path.as_ref().display()
            )));
        };
        object.insert(PACKAGE_JSON_KEY.to_string(), serde_json::to_value(self)?);

        let content = serde_json::to_string_pretty(&manifest)?;
        fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.entry_dir.trim().is_empty() {
            return Err(ConfigError::InvalidConfig(
                "entryDir must not be empty".to_string(),
            ));
        }
        if self.router_path.trim().is_empty() {
            return Err(ConfigError::InvalidConfig(
                "routerPath must not be empty".to_string(),
            ));
        }
        if !is_identifier(&self.client_name) {
            return Err(ConfigError::InvalidConfig(format!(
                "clientName '{}' is not a valid identifier",
                self.client_name
            )));
        }
        if self.indent.is_empty() || !self.indent.chars().all(|c| c == ' ' || c == '\t') {
            return Err(ConfigError::InvalidConfig(
                "indent must consist of spaces or tabs".to_string(),
            ));
        }

        for template in [&self.client_template, &self.server_template]
            .into_iter()
            .flatten()
        {
            if !Path::new(template).is_file() {
                return Err(ConfigError::InvalidConfig(format!(
                    "Template file does not exist: {}",
                    template
                )));
            }
        }

        for pattern in self.exclude_patterns.iter().flatten() {
            Regex::new(pattern).map_err(|e| {
                ConfigError::InvalidConfig(format!("invalid exclude pattern '{}': {}", pattern, e))
            })?;
        }

        if let Some(bundle) = &self.bundle {
            if bundle.esbuild.trim().is_empty() {
                return Err(ConfigError::InvalidConfig(
                    "bundle.esbuild must name an executable".to_string(),
                ));
            }
        }

        Ok(())
    }

    /// Merge with another configuration, with other taking precedence
    pub fn merge(&mut self, other: &GenerateConfig) {
        if other.entry_dir != default_entry_dir() {
            self.entry_dir = other.entry_dir.clone();
        }
        if other.endpoint_path_prefix != default_endpoint_path_prefix() {
            self.endpoint_path_prefix = other.endpoint_path_prefix.clone();
        }
        if other.router_path != default_router_path() {
            self.router_path = other.router_path.clone();
        }
        if other.client_out_dir != default_client_out_dir() {
            self.client_out_dir = other.client_out_dir.clone();
        }
        if other.client_name != default_client_name() {
            self.client_name = other.client_name.clone();
        }
        if other.client_template.is_some() {
            self.client_template = other.client_template.clone();
        }
        if other.server_template.is_some() {
            self.server_template = other.server_template.clone();
        }
        if other.route_style != RouteStyle::default() {
            self.route_style = other.route_style;
        }
        if other.indent != default_indent() {
            self.indent = other.indent.clone();
        }
        if other.imports_base.is_some() {
            self.imports_base = other.imports_base.clone();
        }
        if other.allow_parameterless.is_some() {
            self.allow_parameterless = other.allow_parameterless;
        }
        if other.exclude_patterns.is_some() {
            self.exclude_patterns = other.exclude_patterns.clone();
        }
        if other.emit_header.is_some() {
            self.emit_header = other.emit_header;
        }
        if other.verbose.is_some() {
            self.verbose = other.verbose;
        }
        if other.bundle.is_some() {
            self.bundle = other.bundle.clone();
        }
    }

    pub fn is_verbose(&self) -> bool {
        self.verbose.unwrap_or(false)
    }

    pub fn allows_parameterless(&self) -> bool {
        self.allow_parameterless.unwrap_or(true)
    }

    pub fn should_emit_header(&self) -> bool {
        self.emit_header.unwrap_or(true)
    }

    /// `<clientOutDir>/<clientName>.ts`
    pub fn client_path(&self) -> PathBuf {
        Path::new(&self.client_out_dir).join(format!("{}.ts", self.client_name))
    }

    pub fn router_path(&self) -> PathBuf {
        PathBuf::from(&self.router_path)
    }

    /// The configured import base, or the entry directory as seen from the router.
    /// Relative paths are resolved against `base`.
    pub fn resolved_imports_base(&self, base: &Path) -> String {
        if let Some(imports_base) = &self.imports_base {
            return imports_base.trim_end_matches('/').to_string();
        }
        let router = self.router_path();
        let router_dir = router.parent().unwrap_or_else(|| Path::new(""));
        relative_module_path(router_dir, Path::new(&self.entry_dir), base)
    }

    pub fn render_options(&self, base: &Path) -> RenderOptions {
        RenderOptions {
            endpoint_path_prefix: self.endpoint_path_prefix.clone(),
            client_name: self.client_name.clone(),
            route_style: self.route_style,
            imports_base: self.resolved_imports_base(base),
            indent: self.indent.clone(),
            emit_header: self.should_emit_header(),
        }
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' || first == '$' => chars
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$'),
        _ => false,
    }
}
