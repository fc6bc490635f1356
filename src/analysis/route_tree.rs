use crate::analysis::{HandlerExtractor, StaticAnalysis};
use crate::error::{Error, Result};
use crate::interface::config::ConfigError;
use crate::interface::output::Logger;
use crate::models::RouteTree;
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use walkdir::WalkDir;

const HANDLER_EXTENSIONS: &[&str] = &["ts", "tsx", "mts"];

/// Skipped unless the configuration supplies its own `exclude_patterns`:
/// dot-entries and `node_modules`.
pub const DEFAULT_EXCLUDE_PATTERNS: &[&str] = &[r"(^|/)\.", r"(^|/)node_modules$"];

static DEFAULT_EXCLUDES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    DEFAULT_EXCLUDE_PATTERNS
        .iter()
        .map(|p| Regex::new(p).unwrap())
        .collect()
});

/// Walks an entry directory and builds the [`RouteTree`] of handler endpoints.
pub struct RouteTreeBuilder<A> {
    extractor: HandlerExtractor<A>,
    logger: Logger,
    exclude_patterns: Vec<Regex>,
}

impl<A: StaticAnalysis> RouteTreeBuilder<A> {
    pub fn new(extractor: HandlerExtractor<A>, logger: Logger) -> Self {
        Self {
            extractor,
            logger,
            exclude_patterns: DEFAULT_EXCLUDES.clone(),
        }
    }

    /// Skip entries whose `/`-separated path relative to the root matches any
    /// pattern. Replaces [`DEFAULT_EXCLUDE_PATTERNS`].
    pub fn with_exclude_patterns(mut self, patterns: &[String]) -> Result<Self> {
        self.exclude_patterns = patterns
            .iter()
            .map(|p| {
                Regex::new(p).map_err(|e| {
                    Error::from(ConfigError::InvalidConfig(format!(
                        "invalid exclude pattern '{}': {}",
                        p, e
                    )))
                })
            })
            .collect::<Result<_>>()?;
        Ok(self)
    }

    pub fn build(&mut self, root: &Path) -> Result<RouteTree> {
        if !root.is_dir() {
            return Err(Error::InvalidEntryDir(root.display().to_string()));
        }
        self.build_tree(root, &[])
    }

    /// Build the subtree for the directory at `root/path_segments`, in
    /// filesystem enumeration order.
    pub fn build_tree(&mut self, root: &Path, path_segments: &[String]) -> Result<RouteTree> {
        let dir: PathBuf = path_segments.iter().fold(root.to_path_buf(), |d, s| d.join(s));
        let mut tree = match path_segments.last() {
            Some(name) => RouteTree::named(name.clone()),
            None => RouteTree::root(),
        };

        for entry in WalkDir::new(&dir).min_depth(1).max_depth(1) {
            let entry = entry?;
            let file_name = entry.file_name().to_string_lossy().into_owned();
            let relative = path_segments
                .iter()
                .map(String::as_str)
                .chain(std::iter::once(file_name.as_str()))
                .collect::<Vec<_>>()
                .join("/");

            if self.is_excluded(&relative) {
                self.logger.verbose(&format!("Excluded {}", relative));
                continue;
            }

            if entry.file_type().is_dir() {
                let mut segments = path_segments.to_vec();
                segments.push(file_name);
                tree.children.push(self.build_tree(root, &segments)?);
            } else if self.is_handler_source(&file_name) {
                match self.extractor.extract(entry.path(), path_segments) {
                    Ok(Some(endpoint)) => {
                        if tree
                            .endpoints
                            .iter()
                            .any(|e| e.function_name == endpoint.function_name)
                        {
                            self.logger.warning(&format!(
                                "Skipping {}: handler '{}' is already defined in this directory",
                                entry.path().display(),
                                endpoint.function_name
                            ));
                            continue;
                        }
                        self.logger.verbose(&format!(
                            "Found handler {} in {}",
                            endpoint.function_name, relative
                        ));
                        tree.endpoints.push(endpoint);
                    }
                    Ok(None) => {
                        self.logger
                            .debug(&format!("Skipping {}: not a handler module", relative));
                    }
                    Err(e) => {
                        self.logger.error(&format!(
                            "Error processing file {}: {}",
                            entry.path().display(),
                            e
                        ));
                    }
                }
            }
        }

        Ok(tree)
    }

    fn is_excluded(&self, relative: &str) -> bool {
        self.exclude_patterns.iter().any(|re| re.is_match(relative))
    }

    fn is_handler_source(&self, file_name: &str) -> bool {
        if file_name.ends_with(".d.ts") {
            return false;
        }
        Path::new(file_name)
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| HANDLER_EXTENSIONS.contains(&ext))
    }
}
