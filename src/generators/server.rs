use crate::error::Result;
use crate::generators::base::{Document, NameRegistry, TemplateEngine};
use crate::generators::RenderOptions;
use crate::models::RouteTree;
use serde::Serialize;

pub const REQUIRED_MARKERS: &[&str] = &["imports", "routes"];

#[derive(Serialize)]
struct ImportContext<'a> {
    alias: &'a str,
    source: String,
}

#[derive(Serialize)]
struct RouteContext<'a> {
    alias: &'a str,
    path: String,
}

pub(crate) fn render(
    engine: &TemplateEngine,
    options: &RenderOptions,
    tree: &RouteTree,
    mut document: Document,
) -> Result<Document> {
    document.require(REQUIRED_MARKERS)?;

    // handler aliases share module scope with the template's own bindings
    let mut registry = NameRegistry::reserving(document.declared_bindings());
    let base = options.imports_base.trim_end_matches('/');
    let route_template = options.route_style.fragment_template();

    for endpoint in tree.endpoints_in_order() {
        let alias = registry.claim(&endpoint.function_name);

        let import = engine.render(
            "server/import.ts.tera",
            &ImportContext {
                alias: &alias,
                source: format!("{}/{}", base, endpoint.source_path()),
            },
        )?;
        document.append("imports", &import);

        let route = engine.render(
            route_template,
            &RouteContext {
                alias: &alias,
                path: endpoint.http_path(&options.endpoint_path_prefix),
            },
        )?;
        document.append("routes", &route);
    }

    Ok(document)
}
