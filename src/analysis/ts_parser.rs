use crate::analysis::type_names::{is_global_type, rename_declared_type};
use crate::analysis::{DefaultExport, FunctionRef, ResolvedType, StaticAnalysis, SymbolRef};
use crate::error::{Error, Result};
use deno_ast::swc::ast as swc_ast;
use deno_ast::swc::common::{Span, Spanned};
use deno_ast::{MediaType, ParseParams, ParsedSource, SourcePos, SourceRange, SourceTextInfo};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Candidate suffixes tried when resolving an extensionless relative import
const IMPORT_SUFFIXES: &[&str] = &[".ts", ".tsx", ".mts", ".d.ts", "/index.ts"];

/// A parsed TypeScript module together with its source text
struct ParsedModule {
    source: ParsedSource,
    text_info: SourceTextInfo,
}

impl ParsedModule {
    fn parse(path: &Path) -> Result<Self> {
        let text: Arc<str> = deno_ast::strip_bom(fs::read_to_string(path)?).into();
        // deno_ast requires absolute paths for file specifiers
        let absolute = fs::canonicalize(path)?;
        let specifier =
            deno_ast::ModuleSpecifier::from_file_path(&absolute).map_err(|_| Error::Parse {
                file: path.display().to_string(),
                message: "not a valid module path".to_string(),
            })?;

        let source = deno_ast::parse_module(ParseParams {
            specifier,
            text: text.clone(),
            media_type: MediaType::from_path(&absolute),
            capture_tokens: false,
            scope_analysis: false,
            maybe_syntax: None,
        })
        .map_err(|e| Error::Parse {
            file: path.display().to_string(),
            message: e.to_string(),
        })?;

        Ok(Self {
            source,
            text_info: SourceTextInfo::new(text),
        })
    }

    fn module(&self) -> Option<&swc_ast::Module> {
        match self.source.program_ref() {
            deno_ast::ProgramRef::Module(m) => Some(m),
            deno_ast::ProgramRef::Script(_) => None,
        }
    }

    fn text(&self, span: Span) -> String {
        let range = SourceRange::new(
            SourcePos::unsafely_from_byte_pos(span.lo),
            SourcePos::unsafely_from_byte_pos(span.hi),
        );
        self.text_info.range_text(&range).to_string()
    }

    /// `interface`, `type` and `enum` declarations at module level, by name
    fn type_declarations(&self, module: &swc_ast::Module) -> HashMap<String, String> {
        let mut declarations = HashMap::new();
        for item in &module.body {
            match item {
                swc_ast::ModuleItem::ModuleDecl(swc_ast::ModuleDecl::ExportDecl(export)) => {
                    if let Some(name) = type_decl_name(&export.decl) {
                        declarations.insert(name, self.text(export.span));
                    }
                }
                swc_ast::ModuleItem::Stmt(swc_ast::Stmt::Decl(decl)) => {
                    if let Some(name) = type_decl_name(decl) {
                        declarations.insert(name, self.text(decl.span()));
                    }
                }
                _ => {}
            }
        }
        declarations
    }

    /// Declarations brought in through named or namespace imports of relative modules.
    /// Imports that cannot be resolved or parsed are ignored.
    fn imported_declarations(
        &self,
        module: &swc_ast::Module,
        dir: &Path,
        declarations: &mut HashMap<String, String>,
    ) {
        for item in &module.body {
            let import = match item {
                swc_ast::ModuleItem::ModuleDecl(swc_ast::ModuleDecl::Import(import)) => import,
                _ => continue,
            };
            let specifier = wtf8_to_string(&import.src);
            if !specifier.starts_with('.') {
                continue;
            }
            let Some(target) = resolve_relative_import(dir, &specifier) else {
                continue;
            };
            let Ok(imported) = ParsedModule::parse(&target) else {
                continue;
            };
            let Some(imported_module) = imported.module() else {
                continue;
            };
            let exported = imported.type_declarations(imported_module);

            for spec in &import.specifiers {
                match spec {
                    swc_ast::ImportSpecifier::Named(named) => {
                        let local = named.local.sym.to_string();
                        let original = named
                            .imported
                            .as_ref()
                            .map(export_name)
                            .unwrap_or_else(|| local.clone());
                        if let Some(text) = exported.get(&original) {
                            declarations
                                .entry(local.clone())
                                .or_insert_with(|| rename_declared_type(text, &original, &local));
                        }
                    }
                    swc_ast::ImportSpecifier::Namespace(_) => {
                        for (name, text) in &exported {
                            declarations
                                .entry(name.clone())
                                .or_insert_with(|| text.clone());
                        }
                    }
                    swc_ast::ImportSpecifier::Default(_) => {}
                }
            }
        }
    }
}

/// What the analyzer learned about one handler module
#[derive(Debug, Clone, Default)]
struct ModuleFacts {
    default_export: Option<DefaultExport>,
    parameters: Vec<Option<ResolvedType>>,
    return_argument: Option<ResolvedType>,
    declarations: HashMap<String, String>,
}

impl ModuleFacts {
    fn collect(file: &Path) -> Result<Self> {
        let parsed = ParsedModule::parse(file)?;
        let Some(module) = parsed.module() else {
            return Ok(Self::default());
        };

        let mut declarations = parsed.type_declarations(module);
        let dir = file.parent().unwrap_or_else(|| Path::new("."));
        parsed.imported_declarations(module, dir, &mut declarations);

        let (default_export, function) = find_default_export(module, file);
        let resolve = |ty: &swc_ast::TsType| resolve_type(&parsed, ty, &declarations, file);

        let mut parameters = Vec::new();
        let mut return_argument = None;
        if let Some(function) = function {
            parameters = handler_params(function)
                .map(|param| pat_type_ann(&param.pat).map(|ann| resolve(&ann.type_ann)))
                .collect();
            return_argument = function
                .return_type
                .as_ref()
                .and_then(|ann| promised_type(&ann.type_ann))
                .map(resolve);
        }

        Ok(Self {
            default_export,
            parameters,
            return_argument,
            declarations,
        })
    }
}

fn resolve_type(
    parsed: &ParsedModule,
    ty: &swc_ast::TsType,
    declarations: &HashMap<String, String>,
    file: &Path,
) -> ResolvedType {
    let text = parsed.text(ty.span());
    match ty {
        swc_ast::TsType::TsTypeRef(reference) if reference.type_params.is_none() => {
            let name = entity_name(&reference.type_name);
            if is_global_type(&name) && !declarations.contains_key(&name) {
                ResolvedType::structural(text)
            } else {
                ResolvedType::named(text, file, name)
            }
        }
        _ => ResolvedType::structural(text),
    }
}

/// [`StaticAnalysis`] over TypeScript sources, backed by deno_ast.
///
/// Each file is parsed once when its default export is requested; the facts
/// needed by the other lookups are kept until [`StaticAnalysis::release`].
#[derive(Debug, Default)]
pub struct TypeScriptAnalyzer {
    cache: HashMap<PathBuf, ModuleFacts>,
}

impl TypeScriptAnalyzer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cached_files(&self) -> usize {
        self.cache.len()
    }
}

impl StaticAnalysis for TypeScriptAnalyzer {
    fn exported_default(&mut self, file: &Path) -> Result<Option<DefaultExport>> {
        let facts = ModuleFacts::collect(file)?;
        let export = facts.default_export.clone();
        self.cache.insert(file.to_path_buf(), facts);
        Ok(export)
    }

    fn parameter_type(&self, function: &FunctionRef, index: usize) -> Option<ResolvedType> {
        self.cache
            .get(&function.file)?
            .parameters
            .get(index)?
            .clone()
    }

    fn return_type_argument(&self, function: &FunctionRef) -> Option<ResolvedType> {
        self.cache.get(&function.file)?.return_argument.clone()
    }

    fn declaration_text(&self, symbol: &SymbolRef) -> Option<String> {
        self.cache
            .get(&symbol.file)?
            .declarations
            .get(&symbol.name)
            .cloned()
    }

    fn release(&mut self, file: &Path) {
        self.cache.remove(file);
    }
}

fn find_default_export<'a>(
    module: &'a swc_ast::Module,
    file: &Path,
) -> (Option<DefaultExport>, Option<&'a swc_ast::Function>) {
    for item in &module.body {
        let decl = match item {
            swc_ast::ModuleItem::ModuleDecl(decl) => decl,
            swc_ast::ModuleItem::Stmt(_) => continue,
        };
        match decl {
            swc_ast::ModuleDecl::ExportDefaultDecl(export) => {
                return match &export.decl {
                    swc_ast::DefaultDecl::Fn(fn_expr) => match &fn_expr.ident {
                        Some(ident) => {
                            let function = fn_expr.function.as_ref();
                            (
                                Some(function_export(file, ident.sym.to_string(), function)),
                                Some(function),
                            )
                        }
                        None => (Some(DefaultExport::AnonymousFunction), None),
                    },
                    swc_ast::DefaultDecl::Class(_) => (Some(DefaultExport::Class), None),
                    _ => (Some(DefaultExport::Expression), None),
                };
            }
            swc_ast::ModuleDecl::ExportDefaultExpr(export) => {
                return match export.expr.as_ref() {
                    swc_ast::Expr::Arrow(_) => (Some(DefaultExport::ArrowFunction), None),
                    swc_ast::Expr::Ident(ident) => {
                        let name = ident.sym.to_string();
                        match local_function(module, &name) {
                            Some(function) => {
                                (Some(function_export(file, name, function)), Some(function))
                            }
                            None => (Some(DefaultExport::Expression), None),
                        }
                    }
                    _ => (Some(DefaultExport::Expression), None),
                };
            }
            swc_ast::ModuleDecl::ExportNamed(named) if exports_default(named) => {
                return (Some(DefaultExport::ReExport), None);
            }
            _ => {}
        }
    }
    (None, None)
}

fn function_export(file: &Path, name: String, function: &swc_ast::Function) -> DefaultExport {
    DefaultExport::Function(FunctionRef {
        file: file.to_path_buf(),
        name: Some(name),
        parameter_count: handler_params(function).count(),
    })
}

/// A function declared in this module, preferring the implementation over overload signatures
fn local_function<'a>(module: &'a swc_ast::Module, name: &str) -> Option<&'a swc_ast::Function> {
    let mut found: Option<&swc_ast::Function> = None;
    for item in &module.body {
        let decl = match item {
            swc_ast::ModuleItem::Stmt(swc_ast::Stmt::Decl(decl)) => decl,
            swc_ast::ModuleItem::ModuleDecl(swc_ast::ModuleDecl::ExportDecl(export)) => &export.decl,
            _ => continue,
        };
        if let swc_ast::Decl::Fn(fn_decl) = decl {
            if &*fn_decl.ident.sym == name {
                let function = fn_decl.function.as_ref();
                if function.body.is_some() {
                    return Some(function);
                }
                found.get_or_insert(function);
            }
        }
    }
    found
}

fn exports_default(named: &swc_ast::NamedExport) -> bool {
    named.specifiers.iter().any(|spec| match spec {
        swc_ast::ExportSpecifier::Named(n) => {
            export_name(n.exported.as_ref().unwrap_or(&n.orig)) == "default"
        }
        swc_ast::ExportSpecifier::Default(_) => true,
        swc_ast::ExportSpecifier::Namespace(_) => false,
    })
}

/// Parameters that take an argument at the call site (a leading `this` annotation does not)
fn handler_params(function: &swc_ast::Function) -> impl Iterator<Item = &swc_ast::Param> {
    function.params.iter().filter(|param| {
        !matches!(&param.pat, swc_ast::Pat::Ident(ident) if &*ident.id.sym == "this")
    })
}

fn pat_type_ann(pat: &swc_ast::Pat) -> Option<&swc_ast::TsTypeAnn> {
    match pat {
        swc_ast::Pat::Ident(ident) => ident.type_ann.as_deref(),
        swc_ast::Pat::Object(object) => object.type_ann.as_deref(),
        swc_ast::Pat::Array(array) => array.type_ann.as_deref(),
        swc_ast::Pat::Rest(rest) => rest.type_ann.as_deref(),
        swc_ast::Pat::Assign(assign) => pat_type_ann(&assign.left),
        _ => None,
    }
}

/// `T` of `Wrapper<T>`; any other return annotation yields nothing
fn promised_type(ty: &swc_ast::TsType) -> Option<&swc_ast::TsType> {
    match ty {
        swc_ast::TsType::TsTypeRef(reference) => match &reference.type_params {
            Some(params) if params.params.len() == 1 => Some(params.params[0].as_ref()),
            _ => None,
        },
        _ => None,
    }
}

fn entity_name(name: &swc_ast::TsEntityName) -> String {
    match name {
        swc_ast::TsEntityName::Ident(ident) => ident.sym.to_string(),
        swc_ast::TsEntityName::TsQualifiedName(qualified) => qualified.right.sym.to_string(),
    }
}

fn type_decl_name(decl: &swc_ast::Decl) -> Option<String> {
    match decl {
        swc_ast::Decl::TsInterface(interface) => Some(interface.id.sym.to_string()),
        swc_ast::Decl::TsTypeAlias(alias) => Some(alias.id.sym.to_string()),
        swc_ast::Decl::TsEnum(ts_enum) => Some(ts_enum.id.sym.to_string()),
        _ => None,
    }
}

fn export_name(name: &swc_ast::ModuleExportName) -> String {
    match name {
        swc_ast::ModuleExportName::Ident(ident) => ident.sym.to_string(),
        swc_ast::ModuleExportName::Str(s) => wtf8_to_string(s),
    }
}

fn wtf8_to_string(s: &swc_ast::Str) -> String {
    String::from_utf8_lossy(s.value.as_bytes()).into_owned()
}

fn resolve_relative_import(dir: &Path, specifier: &str) -> Option<PathBuf> {
    let base = dir.join(specifier);
    if base.is_file() {
        return Some(base);
    }
    // ESM style `./types.js` pointing at `./types.ts`
    if let Some(stem) = specifier.strip_suffix(".js") {
        let candidate = dir.join(format!("{}.ts", stem));
        if candidate.is_file() {
            return Some(candidate);
        }
    }
    IMPORT_SUFFIXES
        .iter()
        .map(|suffix| dir.join(format!("{}{}", specifier, suffix)))
        .find(|candidate| candidate.is_file())
}
