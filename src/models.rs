use serde::{Deserialize, Serialize};

/// A type referenced by a handler signature, carried as source text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeInfo {
    /// Display name, with any dotted qualifier stripped
    pub name: String,
    /// Full declaration text, emitted verbatim into the client
    pub declaration: String,
}

impl TypeInfo {
    pub fn new(name: impl Into<String>, declaration: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            declaration: declaration.into(),
        }
    }
}

/// One discovered request handler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Endpoint {
    /// Directory names from the entry root down to the handler's directory
    pub path_segments: Vec<String>,
    pub function_name: String,
    pub source_file_name: String,
    /// `None` only for handlers declared without parameters
    pub body: Option<TypeInfo>,
    pub returns: TypeInfo,
}

impl Endpoint {
    /// HTTP path of this endpoint under the given prefix.
    ///
    /// The prefix is normalized first, so `"api"`, `"/api"` and `"/api/"` all
    /// yield `/api/users/getUser` for segments `["users"]` and `getUser`.
    pub fn http_path(&self, prefix: &str) -> String {
        let mut path = normalize_prefix(prefix);
        for segment in &self.path_segments {
            path.push_str(segment);
            path.push('/');
        }
        path.push_str(&self.function_name);
        path
    }

    /// Location of the handler module relative to the entry directory, using `/`.
    pub fn source_path(&self) -> String {
        let mut parts: Vec<&str> = self.path_segments.iter().map(String::as_str).collect();
        parts.push(&self.source_file_name);
        parts.join("/")
    }
}

/// Normalize an endpoint path prefix so it starts and ends with `/`.
pub fn normalize_prefix(prefix: &str) -> String {
    let trimmed = prefix.trim().trim_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else {
        format!("/{}/", trimmed)
    }
}

/// One directory scope of the handler tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteTree {
    /// Directory name; absent only for the root
    pub name: Option<String>,
    pub children: Vec<RouteTree>,
    pub endpoints: Vec<Endpoint>,
}

impl RouteTree {
    pub fn root() -> Self {
        Self::default()
    }

    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Total number of endpoints in this subtree
    pub fn endpoint_count(&self) -> usize {
        self.endpoints.len()
            + self
                .children
                .iter()
                .map(RouteTree::endpoint_count)
                .sum::<usize>()
    }

    pub fn is_empty(&self) -> bool {
        self.endpoint_count() == 0
    }

    /// Endpoints in render order: a node's own endpoints, then each child depth-first.
    pub fn endpoints_in_order(&self) -> Vec<&Endpoint> {
        let mut out = Vec::new();
        self.collect_endpoints(&mut out);
        out
    }

    fn collect_endpoints<'a>(&'a self, out: &mut Vec<&'a Endpoint>) {
        out.extend(self.endpoints.iter());
        for child in &self.children {
            child.collect_endpoints(out);
        }
    }
}
