#![allow(dead_code)]
/// Common test utilities and helpers
use rpc_typegen::analysis::route_tree::RouteTreeBuilder;
use rpc_typegen::analysis::ts_parser::TypeScriptAnalyzer;
use rpc_typegen::analysis::HandlerExtractor;
use rpc_typegen::generators::{RenderOptions, Renderer, DEFAULT_CLIENT_TEMPLATE, DEFAULT_SERVER_TEMPLATE};
use rpc_typegen::{GenerateConfig, Logger, RouteTree};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A scratch project with an `api` handler directory
pub struct TestProject {
    pub temp_dir: TempDir,
}

impl TestProject {
    pub fn new() -> Self {
        let project = Self {
            temp_dir: TempDir::new().unwrap(),
        };
        fs::create_dir_all(project.entry_dir()).unwrap();
        project
    }

    /// Write a file relative to the project root
    pub fn write_file(&self, name: &str, content: &str) -> &Self {
        let file_path = self.temp_dir.path().join(name);
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(file_path, content).unwrap();
        self
    }

    /// Write a handler module relative to the entry directory
    pub fn write_handler(&self, name: &str, content: &str) -> &Self {
        self.write_file(&format!("api/{}", name), content)
    }

    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn entry_dir(&self) -> PathBuf {
        self.temp_dir.path().join("api")
    }

    /// Build the route tree of the entry directory with the real analyzer
    pub fn route_tree(&self) -> RouteTree {
        RouteTreeBuilder::new(HandlerExtractor::new(TypeScriptAnalyzer::new()), Logger::quiet())
            .build(&self.entry_dir())
            .unwrap()
    }

    /// Render both documents with the built-in templates and no header
    pub fn render(&self, options: RenderOptions) -> (String, String) {
        let tree = self.route_tree();
        let renderer = Renderer::new(RenderOptions {
            emit_header: false,
            ..options
        })
        .unwrap();
        (
            renderer.render_client(&tree, DEFAULT_CLIENT_TEMPLATE).unwrap(),
            renderer.render_server(&tree, DEFAULT_SERVER_TEMPLATE).unwrap(),
        )
    }

    /// A configuration writing into this project, with absolute paths
    pub fn config(&self) -> GenerateConfig {
        GenerateConfig {
            entry_dir: self.path_string("api"),
            router_path: self.path_string("server/rpcRouter.ts"),
            client_out_dir: self.path_string("web/client"),
            verbose: Some(false),
            ..Default::default()
        }
    }

    pub fn path_string(&self, relative: &str) -> String {
        self.temp_dir.path().join(relative).to_string_lossy().to_string()
    }

    pub fn read_file(&self, relative: &str) -> String {
        fs::read_to_string(self.temp_dir.path().join(relative)).unwrap()
    }

    pub fn file_exists(&self, relative: &str) -> bool {
        self.temp_dir.path().join(relative).exists()
    }
}

/// Assert that generated content contains expected string
#[macro_export]
macro_rules! assert_generated_contains {
    ($content:expr, $expected:expr) => {
        assert!(
            $content.contains($expected),
            "Expected generated content to contain:\n{}\n\nBut got:\n{}",
            $expected,
            $content
        );
    };
    ($content:expr, $expected:expr, $($arg:tt)*) => {
        assert!(
            $content.contains($expected),
            $($arg)*
        );
    };
}

/// Assert that generated content does NOT contain string
#[macro_export]
macro_rules! assert_generated_not_contains {
    ($content:expr, $unexpected:expr) => {
        assert!(
            !$content.contains($unexpected),
            "Expected generated content NOT to contain:\n{}\n\nBut got:\n{}",
            $unexpected,
            $content
        );
    };
}
