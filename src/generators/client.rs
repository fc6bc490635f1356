use crate::analysis::type_names::rename_declared_type;
use crate::error::{Error, Result};
use crate::generators::base::naming::{exported_declaration, to_identifier};
use crate::generators::base::{CodeWriter, Document, NameRegistry, TemplateEngine};
use crate::generators::RenderOptions;
use crate::models::{Endpoint, RouteTree, TypeInfo};
use serde::Serialize;

pub const REQUIRED_MARKERS: &[&str] = &["types", "functions"];

const TYPES_NAMESPACE: &str = "types";

/// Members the default client class declares next to the generated ones
const CLIENT_MEMBERS: &[&str] = &["constructor", "options", "call"];

#[derive(Serialize)]
struct MethodContext<'a> {
    name: &'a str,
    separator: &'a str,
    terminator: &'a str,
    indent: &'a str,
    path: String,
    body_type: Option<String>,
    return_type: String,
}

/// Output buffers filled by one walk over the tree
struct ClientParts {
    types: CodeWriter,
    functions: CodeWriter,
}

pub(crate) fn render(
    engine: &TemplateEngine,
    options: &RenderOptions,
    tree: &RouteTree,
    mut document: Document,
) -> Result<Document> {
    document.require(REQUIRED_MARKERS)?;

    let mut parts = ClientParts {
        types: CodeWriter::new(&options.indent),
        functions: CodeWriter::new(&options.indent),
    };
    let mut registry = NameRegistry::new();

    if !tree.is_empty() {
        parts
            .types
            .write(0, &format!("export namespace {} {{", TYPES_NAMESPACE));
        render_node(engine, options, tree, &mut Vec::new(), &mut registry, &mut parts)?;
        parts.types.write(0, "}");
    }

    document.append("types", &parts.types.finish());
    if !parts.functions.is_empty() {
        document.append("functions", &parts.functions.finish());
    }
    document.append("clientName", &options.client_name);
    Ok(document)
}

/// Render one directory scope. `namespaces` holds the sanitized names from
/// the root down to this node; its length is the node's nesting level.
fn render_node(
    engine: &TemplateEngine,
    options: &RenderOptions,
    tree: &RouteTree,
    namespaces: &mut Vec<String>,
    registry: &mut NameRegistry,
    parts: &mut ClientParts,
) -> Result<()> {
    let level = namespaces.len();
    // methods and groups of one scope become members of the same object
    let mut members = if level == 0 {
        NameRegistry::reserving(CLIENT_MEMBERS)
    } else {
        NameRegistry::new()
    };

    for endpoint in &tree.endpoints {
        let member = members.claim(&endpoint.function_name);
        render_endpoint(engine, options, endpoint, &member, namespaces, registry, parts)?;
    }

    for child in &tree.children {
        if child.is_empty() {
            continue;
        }
        let Some(name) = child.name.as_deref() else {
            return Err(Error::CodeGeneration(
                "only the root of a route tree may be unnamed".to_string(),
            ));
        };
        let ident = members.claim(&to_identifier(name));

        parts
            .types
            .write(level + 1, &format!("export namespace {} {{", ident));
        let (open, close) = if level == 0 {
            (format!("{} = {{", ident), "};")
        } else {
            (format!("{}: {{", ident), "},")
        };
        parts.functions.write(level, &open);

        namespaces.push(ident);
        render_node(engine, options, child, namespaces, registry, parts)?;
        namespaces.pop();

        parts.functions.write(level, close);
        parts.types.write(level + 1, "}");
    }

    Ok(())
}

fn render_endpoint(
    engine: &TemplateEngine,
    options: &RenderOptions,
    endpoint: &Endpoint,
    member: &str,
    namespaces: &[String],
    registry: &mut NameRegistry,
    parts: &mut ClientParts,
) -> Result<()> {
    let level = namespaces.len();

    let body_type = match &endpoint.body {
        Some(body) => Some(declare(body, level, namespaces, registry, parts)),
        None => None,
    };
    let return_type = declare(&endpoint.returns, level, namespaces, registry, parts);

    let (separator, terminator) = if level == 0 { (" =", ";") } else { (":", ",") };
    let method = engine.render(
        "client/method.ts.tera",
        &MethodContext {
            name: member,
            separator,
            terminator,
            indent: &options.indent,
            path: endpoint.http_path(&options.endpoint_path_prefix),
            body_type,
            return_type,
        },
    )?;
    parts.functions.write(level, &method);
    Ok(())
}

/// Claim a collision-free name for `info`, write its declaration into the
/// current namespace and return the qualified reference to it.
fn declare(
    info: &TypeInfo,
    level: usize,
    namespaces: &[String],
    registry: &mut NameRegistry,
    parts: &mut ClientParts,
) -> String {
    let name = registry.claim(&info.name);
    let declaration = rename_declared_type(&info.declaration, &info.name, &name);
    parts
        .types
        .write(level + 1, &exported_declaration(&declaration));

    let mut reference = vec![TYPES_NAMESPACE];
    reference.extend(namespaces.iter().map(String::as_str));
    reference.push(&name);
    reference.join(".")
}
