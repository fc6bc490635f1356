pub mod route_tree;
pub mod ts_parser;
pub mod type_names;

use crate::error::Result;
use crate::models::{Endpoint, TypeInfo};
use std::path::{Path, PathBuf};

use type_names::{alias_declaration, strip_qualifier, synthesized_name, TypeRole};

pub use route_tree::RouteTreeBuilder;
pub use ts_parser::TypeScriptAnalyzer;

/// Shape of a module's default export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DefaultExport {
    /// `export default function name(...) {}` or `export default name;`
    /// pointing at a function declared in the same module
    Function(FunctionRef),
    AnonymousFunction,
    ArrowFunction,
    Class,
    ReExport,
    Expression,
}

/// Handle to a function found by a [`StaticAnalysis`] implementation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionRef {
    pub file: PathBuf,
    pub name: Option<String>,
    pub parameter_count: usize,
}

/// A type as written in a signature, plus the symbol it names, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedType {
    pub text: String,
    /// `None` for structural types: literals, keywords, unions, generic
    /// instantiations and global builtins
    pub symbol: Option<SymbolRef>,
}

impl ResolvedType {
    pub fn structural(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            symbol: None,
        }
    }

    pub fn named(text: impl Into<String>, file: impl Into<PathBuf>, name: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            symbol: Some(SymbolRef {
                file: file.into(),
                name: name.into(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SymbolRef {
    pub file: PathBuf,
    pub name: String,
}

/// Static type analysis over handler modules.
///
/// Lookups return `None` when the information is not available; only
/// unexpected faults (unreadable or unparsable files) surface as errors.
pub trait StaticAnalysis {
    fn exported_default(&mut self, file: &Path) -> Result<Option<DefaultExport>>;

    fn parameter_type(&self, function: &FunctionRef, index: usize) -> Option<ResolvedType>;

    /// `T` of a declared `Wrapper<T>` return type
    fn return_type_argument(&self, function: &FunctionRef) -> Option<ResolvedType>;

    fn declaration_text(&self, symbol: &SymbolRef) -> Option<String>;

    /// Drop any per-file state once a file has been inspected
    fn release(&mut self, _file: &Path) {}
}

/// Decides whether a module is a request handler and turns it into an [`Endpoint`].
pub struct HandlerExtractor<A> {
    analyzer: A,
    allow_parameterless: bool,
}

impl<A: StaticAnalysis> HandlerExtractor<A> {
    pub fn new(analyzer: A) -> Self {
        Self {
            analyzer,
            allow_parameterless: true,
        }
    }

    pub fn allow_parameterless(mut self, allow: bool) -> Self {
        self.allow_parameterless = allow;
        self
    }

    pub fn analyzer(&self) -> &A {
        &self.analyzer
    }

    /// Inspect one module. `Ok(None)` means the module is not a handler.
    pub fn extract(&mut self, file: &Path, path_segments: &[String]) -> Result<Option<Endpoint>> {
        let endpoint = self.qualify(file, path_segments);
        self.analyzer.release(file);
        endpoint
    }

    fn qualify(&mut self, file: &Path, path_segments: &[String]) -> Result<Option<Endpoint>> {
        let function = match self.analyzer.exported_default(file)? {
            Some(DefaultExport::Function(function)) => function,
            _ => return Ok(None),
        };
        let function_name = match function.name.as_deref() {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => return Ok(None),
        };

        let body = match self.analyzer.parameter_type(&function, 0) {
            Some(resolved) => match self.type_info(resolved, &function_name, TypeRole::Body) {
                Some(info) => Some(info),
                None => return Ok(None),
            },
            None if self.allow_parameterless && function.parameter_count == 0 => None,
            None => return Ok(None),
        };

        let returns = match self
            .analyzer
            .return_type_argument(&function)
            .and_then(|resolved| self.type_info(resolved, &function_name, TypeRole::Response))
        {
            Some(info) => info,
            None => return Ok(None),
        };

        let source_file_name = match file.file_name() {
            Some(name) => name.to_string_lossy().into_owned(),
            None => return Ok(None),
        };

        Ok(Some(Endpoint {
            path_segments: path_segments.to_vec(),
            function_name,
            source_file_name,
            body,
            returns,
        }))
    }

    fn type_info(&self, resolved: ResolvedType, function_name: &str, role: TypeRole) -> Option<TypeInfo> {
        if resolved.text.trim().is_empty() {
            return None;
        }
        match resolved.symbol {
            Some(symbol) => {
                let declaration = self.analyzer.declaration_text(&symbol)?;
                Some(TypeInfo::new(strip_qualifier(&resolved.text), declaration))
            }
            None => {
                let name = synthesized_name(function_name, role);
                let declaration = alias_declaration(&name, &resolved.text);
                Some(TypeInfo::new(name, declaration))
            }
        }
    }
}
