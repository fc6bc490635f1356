pub mod base;
pub mod client;
pub mod server;

use crate::error::Result;
use crate::interface::config::ConfigError;
use crate::models::RouteTree;
use base::{Document, TemplateEngine};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub use base::templates::{GlobalContext, DEFAULT_CLIENT_TEMPLATE, DEFAULT_SERVER_TEMPLATE};

pub const GENERATOR_NAME: &str = "rpc-typegen";

/// How the router binds a path to its handler.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RouteStyle {
    /// `'POST /path': handler,` entries of a route lookup table
    #[default]
    Table,
    /// `app.post('/path', handler);` registration calls
    Register,
}

impl RouteStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            RouteStyle::Table => "table",
            RouteStyle::Register => "register",
        }
    }

    fn fragment_template(&self) -> &'static str {
        match self {
            RouteStyle::Table => "server/route_table.ts.tera",
            RouteStyle::Register => "server/route_register.ts.tera",
        }
    }
}

impl fmt::Display for RouteStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RouteStyle {
    type Err = ConfigError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "table" => Ok(RouteStyle::Table),
            "register" => Ok(RouteStyle::Register),
            other => Err(ConfigError::InvalidRouteStyle(other.to_string())),
        }
    }
}

/// Settings shared by the client and server renders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    pub endpoint_path_prefix: String,
    pub client_name: String,
    pub route_style: RouteStyle,
    /// Module path the router imports handlers from, without a trailing `/`
    pub imports_base: String,
    pub indent: String,
    pub emit_header: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            endpoint_path_prefix: "/".to_string(),
            client_name: "RpcClient".to_string(),
            route_style: RouteStyle::default(),
            imports_base: "../api".to_string(),
            indent: "\t".to_string(),
            emit_header: true,
        }
    }
}

/// Renders a route tree into the client and router documents.
pub struct Renderer {
    engine: TemplateEngine,
    options: RenderOptions,
}

impl Renderer {
    pub fn new(options: RenderOptions) -> Result<Self> {
        Ok(Self {
            engine: TemplateEngine::new()?,
            options,
        })
    }

    pub fn render_client(&self, tree: &RouteTree, template: &str) -> Result<String> {
        let document = Document::parse("client", template);
        let document = client::render(&self.engine, &self.options, tree, document)?;
        self.finish(&document)
    }

    pub fn render_server(&self, tree: &RouteTree, template: &str) -> Result<String> {
        let document = Document::parse("server", template);
        let document = server::render(&self.engine, &self.options, tree, document)?;
        self.finish(&document)
    }

    fn finish(&self, document: &Document) -> Result<String> {
        let body = document.render();
        if !self.options.emit_header {
            return Ok(body);
        }
        let header = self.engine.header(GENERATOR_NAME)?;
        Ok(format!("{}\n\n{}", header, body.trim_start_matches('\n')))
    }
}
