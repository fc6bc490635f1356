use crate::error::{Error, Result};
use std::fmt;
use std::path::{Path, PathBuf};
use tokio::process::Command;
use tokio::task::JoinSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Browser,
    Node,
}

impl Platform {
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Browser => "browser",
            Platform::Node => "node",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModuleFormat {
    Esm,
    Cjs,
}

impl ModuleFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ModuleFormat::Esm => "esm",
            ModuleFormat::Cjs => "cjs",
        }
    }
}

/// One esbuild invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildTarget {
    pub entry: PathBuf,
    pub platform: Platform,
    pub format: ModuleFormat,
}

impl fmt::Display for BuildTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}, {})",
            self.entry.display(),
            self.platform.as_str(),
            self.format.as_str()
        )
    }
}

/// Runs the external bundler over the generated client and router.
#[derive(Debug, Clone)]
pub struct Bundler {
    program: String,
    out_dir: PathBuf,
    externals: Vec<String>,
}

impl Bundler {
    pub fn new(program: impl Into<String>, out_dir: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            out_dir: out_dir.into(),
            externals: Vec::new(),
        }
    }

    /// Modules left as runtime imports instead of being inlined
    pub fn with_externals(mut self, externals: Vec<String>) -> Self {
        self.externals = externals;
        self
    }

    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    /// Client for the browser and router for node, each as ESM and CommonJS.
    pub fn targets(client: &Path, router: &Path) -> Vec<BuildTarget> {
        let mut targets = Vec::with_capacity(4);
        for (entry, platform) in [(client, Platform::Browser), (router, Platform::Node)] {
            for format in [ModuleFormat::Esm, ModuleFormat::Cjs] {
                targets.push(BuildTarget {
                    entry: entry.to_path_buf(),
                    platform,
                    format,
                });
            }
        }
        targets
    }

    pub fn args(&self, target: &BuildTarget) -> Vec<String> {
        let mut args = vec![
            target.entry.to_string_lossy().into_owned(),
            "--bundle".to_string(),
            format!("--platform={}", target.platform.as_str()),
            format!("--format={}", target.format.as_str()),
            format!("--outdir={}", self.out_dir.display()),
        ];
        if target.format == ModuleFormat::Cjs {
            args.push("--out-extension:.js=.cjs".to_string());
        }
        args.extend(self.externals.iter().map(|e| format!("--external:{}", e)));
        args
    }

    /// Run every target concurrently and wait for all of them. The first
    /// failure aborts the builds still running.
    pub fn run_all(&self, targets: &[BuildTarget]) -> Result<()> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;

        runtime.block_on(async {
            let mut builds = JoinSet::new();
            for target in targets {
                let program = self.program.clone();
                let args = self.args(target);
                let label = target.to_string();
                builds.spawn(async move { run_build(program, args, label).await });
            }

            while let Some(joined) = builds.join_next().await {
                let outcome = joined.map_err(|e| e.to_string()).and_then(|r| r);
                if let Err(message) = outcome {
                    builds.abort_all();
                    return Err(Error::Bundle(message));
                }
            }
            Ok(())
        })
    }
}

async fn run_build(
    program: String,
    args: Vec<String>,
    label: String,
) -> std::result::Result<(), String> {
    let output = Command::new(&program)
        .args(&args)
        .kill_on_drop(true)
        .output()
        .await
        .map_err(|e| format!("failed to run {} for {}: {}", program, label, e))?;

    if output.status.success() {
        Ok(())
    } else {
        Err(format!(
            "{} failed for {}: {}",
            program,
            label,
            String::from_utf8_lossy(&output.stderr).trim()
        ))
    }
}
