pub mod cli;
pub mod config;
pub mod output;

use crate::analysis::route_tree::RouteTreeBuilder;
use crate::analysis::ts_parser::TypeScriptAnalyzer;
use crate::analysis::HandlerExtractor;
use crate::build::{Bundler, Destinations, Emitter, ProjectScanner};
use crate::error::{Error, Result};
use crate::generators::{Renderer, DEFAULT_CLIENT_TEMPLATE, DEFAULT_SERVER_TEMPLATE};
use std::fs;
use std::path::{Path, PathBuf};

pub use cli::*;
pub use config::*;
pub use output::*;

/// What one generation run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationSummary {
    pub endpoint_count: usize,
    pub generated_files: Vec<PathBuf>,
    pub bundled: bool,
}

/// Run the whole pipeline: scan handlers, render both documents, write them
/// and optionally bundle them.
pub fn generate_from_config(config: &GenerateConfig) -> Result<GenerationSummary> {
    let logger = Logger::new(config.is_verbose(), false);
    generate_with_logger(config, logger)
}

pub fn generate_with_logger(config: &GenerateConfig, logger: Logger) -> Result<GenerationSummary> {
    let mut reporter = ProgressReporter::new(logger.clone(), 4);

    reporter.start_step("Validating configuration");
    checked(&mut reporter, config.validate().map_err(Error::from))?;
    reporter.complete_step(Some(&format!("Scanning {}", config.entry_dir)));

    reporter.start_step("Scanning handlers");
    let extractor = HandlerExtractor::new(TypeScriptAnalyzer::new())
        .allow_parameterless(config.allows_parameterless());
    let builder = RouteTreeBuilder::new(extractor, logger.clone());
    let builder = match &config.exclude_patterns {
        Some(patterns) => builder.with_exclude_patterns(patterns),
        None => Ok(builder),
    };
    let tree = checked(
        &mut reporter,
        builder.and_then(|mut builder| builder.build(Path::new(&config.entry_dir))),
    )?;
    let endpoint_count = tree.endpoint_count();
    if endpoint_count == 0 {
        logger.warning(&format!(
            "No handlers found in {}. A handler module default-exports a named async function.",
            config.entry_dir
        ));
    }
    for endpoint in tree.endpoints_in_order() {
        logger.verbose(&format!(
            "  - {} ({})",
            endpoint.http_path(&config.endpoint_path_prefix),
            endpoint.source_path()
        ));
    }
    reporter.complete_step(Some(&format!("Found {} endpoints", endpoint_count)));

    reporter.start_step("Rendering client and router");
    let rendered = checked(&mut reporter, render_documents(config, &tree))?;
    reporter.complete_step(None);

    reporter.start_step("Writing output");
    let bundler = checked(&mut reporter, configured_bundler(config, &logger))?;
    let bundled = bundler.is_some();
    let destinations = Destinations::new(config.client_path(), config.router_path());
    let generated_files = checked(
        &mut reporter,
        Emitter::new(logger.clone())
            .with_bundler(bundler)
            .emit(&rendered.0, &rendered.1, &destinations),
    )?;
    reporter.complete_step(Some(&format!("Wrote {} files", generated_files.len())));

    reporter.finish(&format!(
        "Generated client and router for {} endpoints",
        endpoint_count
    ));

    Ok(GenerationSummary {
        endpoint_count,
        generated_files,
        bundled,
    })
}

/// Write a configuration file for `init`. A `package.json` target receives the
/// settings under its `rpcTypegen` key.
pub fn write_init_config(config: &GenerateConfig, output: &Path, force: bool) -> Result<()> {
    let is_manifest = output
        .file_name()
        .is_some_and(|name| name == "package.json");

    if is_manifest {
        let manifest = fs::read_to_string(output)?;
        if manifest.contains(&format!("\"{}\"", PACKAGE_JSON_KEY)) && !force {
            return Err(ConfigError::InvalidConfig(format!(
                "{} already has a {} section. Use --force to overwrite",
                output.display(),
                PACKAGE_JSON_KEY
            ))
            .into());
        }
        config.save_to_package_json(output)?;
    } else {
        if output.exists() && !force {
            return Err(ConfigError::InvalidConfig(format!(
                "{} already exists. Use --force to overwrite",
                output.display()
            ))
            .into());
        }
        config.save_to_file(output)?;
    }
    Ok(())
}

/// Resolve the configuration a CLI run starts from: an explicit file, then
/// `rpc-typegen.json` in the working directory, then the nearest `package.json`.
pub fn load_base_config(config_file: Option<&Path>) -> Result<GenerateConfig> {
    if let Some(path) = config_file {
        return Ok(GenerateConfig::from_file(path)?);
    }
    let local = Path::new(CONFIG_FILE_NAME);
    if local.is_file() {
        return Ok(GenerateConfig::from_file(local)?);
    }
    if let Ok(Some(project)) = ProjectScanner::new().detect_project() {
        if let Some(config) = GenerateConfig::from_package_json(&project.package_json_path)? {
            return Ok(config);
        }
    }
    Ok(GenerateConfig::default())
}

fn render_documents(
    config: &GenerateConfig,
    tree: &crate::models::RouteTree,
) -> Result<(String, String)> {
    let client_template = load_template(config.client_template.as_deref(), DEFAULT_CLIENT_TEMPLATE)?;
    let server_template = load_template(config.server_template.as_deref(), DEFAULT_SERVER_TEMPLATE)?;

    let base = std::env::current_dir()?;
    let renderer = Renderer::new(config.render_options(&base))?;
    let client = renderer.render_client(tree, &client_template)?;
    let server = renderer.render_server(tree, &server_template)?;
    Ok((client, server))
}

fn load_template(path: Option<&str>, default: &str) -> Result<String> {
    match path {
        Some(path) => fs::read_to_string(path)
            .map_err(|e| Error::Template(format!("cannot read template {}: {}", path, e))),
        None => Ok(default.to_string()),
    }
}

fn configured_bundler(config: &GenerateConfig, logger: &Logger) -> Result<Option<Bundler>> {
    let Some(bundle) = &config.bundle else {
        return Ok(None);
    };

    let externals = match ProjectScanner::new().detect_project() {
        Ok(Some(project)) => {
            logger.verbose(&format!(
                "Externals from {}: {}",
                project.package_json_path.display(),
                project.externals.join(", ")
            ));
            project.externals
        }
        Ok(None) => Vec::new(),
        Err(e) => return Err(Error::Bundle(format!("cannot read package.json: {}", e))),
    };

    Ok(Some(
        Bundler::new(bundle.esbuild.clone(), bundle.out_dir.clone()).with_externals(externals),
    ))
}

/// Report a failed step before handing the error back.
fn checked<T>(reporter: &mut ProgressReporter, result: Result<T>) -> Result<T> {
    if let Err(e) = &result {
        reporter.fail_step(&e.to_string());
    }
    result
}
