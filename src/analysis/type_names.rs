use heck::ToUpperCamelCase;
use regex::Regex;
use std::sync::LazyLock;

static QUALIFIER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\.([^.]+)$").unwrap());

/// Standard library types that never resolve to a user declaration.
const GLOBAL_TYPES: &[&str] = &[
    "Array",
    "ArrayBuffer",
    "BigInt",
    "Blob",
    "Boolean",
    "Date",
    "Error",
    "File",
    "FormData",
    "Function",
    "Map",
    "Number",
    "Object",
    "ReadonlyArray",
    "Record",
    "RegExp",
    "Set",
    "String",
    "Symbol",
    "URL",
    "Uint8Array",
];

/// Which side of a handler signature a type sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeRole {
    Body,
    Response,
}

impl TypeRole {
    fn suffix(self) -> &'static str {
        match self {
            TypeRole::Body => "Body",
            TypeRole::Response => "Response",
        }
    }
}

/// Keep only the final segment of a dotted type name: `models.User` -> `User`.
pub fn strip_qualifier(name: &str) -> String {
    let name = name.trim();
    match QUALIFIER.captures(name) {
        Some(caps) => caps[1].to_string(),
        None => name.to_string(),
    }
}

pub fn is_global_type(name: &str) -> bool {
    GLOBAL_TYPES.contains(&name)
}

/// Name given to a structural type that has no declaration of its own,
/// e.g. `getUser` + body -> `GetUserBody`.
pub fn synthesized_name(function_name: &str, role: TypeRole) -> String {
    format!("{}{}", function_name.to_upper_camel_case(), role.suffix())
}

pub fn alias_declaration(name: &str, type_text: &str) -> String {
    format!(
        "export type {} = {};",
        name,
        type_text.trim().trim_end_matches(';')
    )
}

/// Rename the identifier introduced by a `type`, `interface`, `enum` or `class`
/// declaration, together with the references to it inside the declaration.
/// Property keys, member accesses and quoted text of the same spelling are kept.
pub fn rename_declared_type(declaration: &str, from: &str, to: &str) -> String {
    if from == to {
        return declaration.to_string();
    }
    let Ok(re) = Regex::new(&format!(r"\b{}\b", regex::escape(from))) else {
        return declaration.to_string();
    };

    let mut out = String::with_capacity(declaration.len());
    let mut last = 0;
    for m in re.find_iter(declaration) {
        let before = declaration[..m.start()].chars().next_back();
        let after = declaration[m.end()..].trim_start();
        let keep = matches!(before, Some('.' | '\'' | '"' | '`'))
            || after.starts_with(':')
            || after.starts_with("?:");
        out.push_str(&declaration[last..m.start()]);
        out.push_str(if keep { m.as_str() } else { to });
        last = m.end();
    }
    out.push_str(&declaration[last..]);
    out
}
