use crate::error::Result;
use serde::Serialize;
use std::collections::HashMap;
use tera::{Context, Tera, Value};

/// Client document used when no template file is configured
pub const DEFAULT_CLIENT_TEMPLATE: &str = include_str!("templates/client.template.ts");

/// Router document used when no template file is configured
pub const DEFAULT_SERVER_TEMPLATE: &str = include_str!("templates/server.template.ts");

/// Context available to the generated-file header
#[derive(Debug, Clone, Serialize)]
pub struct GlobalContext {
    pub version: String,
    pub generator_name: String,
}

impl GlobalContext {
    pub fn new(generator_name: &str) -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            generator_name: generator_name.to_string(),
        }
    }
}

/// Tera engine holding the embedded fragment templates.
#[derive(Debug)]
pub struct TemplateEngine {
    tera: Tera,
}

impl TemplateEngine {
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();

        macro_rules! template {
            ($name:expr, $path:expr) => {
                tera.add_raw_template($name, include_str!($path))?;
            };
        }

        template!("common/header.tera", "templates/header.tera");
        template!("server/import.ts.tera", "templates/server/import.ts.tera");
        template!("server/route_table.ts.tera", "templates/server/route_table.ts.tera");
        template!(
            "server/route_register.ts.tera",
            "templates/server/route_register.ts.tera"
        );
        template!("client/method.ts.tera", "templates/client/method.ts.tera");

        tera.register_filter("escape_js", escape_js_filter);

        Ok(Self { tera })
    }

    /// Render a fragment from any serializable context. Trailing whitespace is trimmed.
    pub fn render<T: Serialize>(&self, template_name: &str, context: &T) -> Result<String> {
        let context = Context::from_serialize(context)?;
        let rendered = self.tera.render(template_name, &context)?;
        Ok(rendered.trim_end().to_string())
    }

    pub fn header(&self, generator_name: &str) -> Result<String> {
        self.render("common/header.tera", &GlobalContext::new(generator_name))
    }
}

fn escape_js_filter(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    match value.as_str() {
        Some(s) => Ok(Value::String(escape_for_js(s))),
        None => Err("escape_js filter expects a string".into()),
    }
}

/// Escape a string for use inside a single- or double-quoted JavaScript literal
pub fn escape_for_js(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('\'', "\\'")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
        .replace('\r', "\\r")
        .replace('\t', "\\t")
}
