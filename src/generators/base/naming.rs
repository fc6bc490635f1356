use regex::Regex;
use std::path::{Component, Path, PathBuf};
use std::sync::LazyLock;

/// Unindented declarations: `const x`, `export default class X`, `type X`, ...
static TOP_LEVEL_DECLARATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?m)^(?:export\s+(?:default\s+)?)?(?:declare\s+)?(?:async\s+)?(?:const|let|var|function\*?|class|type|interface|enum|namespace)\s+([A-Za-z_$][\w$]*)",
    )
    .unwrap()
});

/// The binding clause of an unindented import: `http` in `import http from 'http'`.
static TOP_LEVEL_IMPORT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?m)^import\s+(?:type\s+)?([^'";]+?)\s+from\s"#).unwrap());

/// Turn a directory name into a usable TypeScript identifier.
/// `user-profile` -> `user_profile`, `2fa` -> `_2fa`.
pub fn to_identifier(name: &str) -> String {
    let mut ident: String = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '$' {
                c
            } else {
                '_'
            }
        })
        .collect();
    if ident.is_empty() || ident.starts_with(|c: char| c.is_ascii_digit()) {
        ident.insert(0, '_');
    }
    ident
}

/// Identifiers bound at module scope by the imports and declarations of `source`.
pub fn top_level_bindings(source: &str) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for caps in TOP_LEVEL_IMPORT.captures_iter(source) {
        let clause = caps[1].replace(['{', '}'], ",");
        for binding in clause.split(',') {
            // `* as ns`, `a as b` and `type a` all bind the last word
            if let Some(name) = binding.split_whitespace().last() {
                names.push(name.to_string());
            }
        }
    }
    for caps in TOP_LEVEL_DECLARATION.captures_iter(source) {
        names.push(caps[1].to_string());
    }
    names
}

/// Declarations inside a namespace must be exported to be reachable as `types.x.Name`.
pub fn exported_declaration(declaration: &str) -> String {
    let trimmed = declaration.trim();
    if trimmed.starts_with("export ") {
        trimmed.to_string()
    } else {
        format!("export {}", trimmed)
    }
}

/// Lexically normalize a path, making it absolute against `base`.
fn normalize(path: &Path, base: &Path) -> PathBuf {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    };
    let mut out = PathBuf::new();
    for component in joined.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

/// Module specifier prefix leading from `from_dir` to `to_dir`, always
/// starting with `.` and using `/` separators: `../api`, `./handlers`, `.`.
pub fn relative_module_path(from_dir: &Path, to_dir: &Path, base: &Path) -> String {
    let from = normalize(from_dir, base);
    let to = normalize(to_dir, base);

    let from_parts: Vec<_> = from.components().collect();
    let to_parts: Vec<_> = to.components().collect();
    let common = from_parts
        .iter()
        .zip(to_parts.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let mut parts: Vec<String> = Vec::new();
    for _ in common..from_parts.len() {
        parts.push("..".to_string());
    }
    for part in &to_parts[common..] {
        parts.push(part.as_os_str().to_string_lossy().into_owned());
    }

    if parts.is_empty() {
        ".".to_string()
    } else if parts[0] == ".." {
        parts.join("/")
    } else {
        format!("./{}", parts.join("/"))
    }
}
