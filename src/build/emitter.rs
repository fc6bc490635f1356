use crate::build::bundler::Bundler;
use crate::error::Result;
use crate::generators::base::FileWriter;
use crate::interface::output::Logger;
use std::path::{Path, PathBuf};

/// Where the two rendered documents go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Destinations {
    pub client_path: PathBuf,
    pub router_path: PathBuf,
}

impl Destinations {
    pub fn new(client_path: impl Into<PathBuf>, router_path: impl Into<PathBuf>) -> Self {
        Self {
            client_path: client_path.into(),
            router_path: router_path.into(),
        }
    }
}

/// Writes the rendered client and router and optionally bundles them.
pub struct Emitter {
    logger: Logger,
    bundler: Option<Bundler>,
}

impl Emitter {
    pub fn new(logger: Logger) -> Self {
        Self {
            logger,
            bundler: None,
        }
    }

    pub fn with_bundler(mut self, bundler: Option<Bundler>) -> Self {
        self.bundler = bundler;
        self
    }

    /// Write both documents, replacing previous output. Returns the written paths.
    pub fn emit(
        &self,
        client_doc: &str,
        server_doc: &str,
        destinations: &Destinations,
    ) -> Result<Vec<PathBuf>> {
        let mut writer = FileWriter::new();
        writer.write_file(&destinations.client_path, client_doc)?;
        self.logger
            .verbose(&format!("Wrote {}", destinations.client_path.display()));
        writer.write_file(&destinations.router_path, server_doc)?;
        self.logger
            .verbose(&format!("Wrote {}", destinations.router_path.display()));

        if let Some(bundler) = &self.bundler {
            self.bundle(bundler, &destinations.client_path, &destinations.router_path)?;
        }

        Ok(writer.into_generated_files())
    }

    fn bundle(&self, bundler: &Bundler, client: &Path, router: &Path) -> Result<()> {
        let targets = Bundler::targets(client, router);
        for target in &targets {
            self.logger.debug(&format!(
                "Bundling {} into {}",
                target,
                bundler.out_dir().display()
            ));
        }
        bundler.run_all(&targets)?;
        self.logger.verbose(&format!(
            "Bundled {} targets into {}",
            targets.len(),
            bundler.out_dir().display()
        ));
        Ok(())
    }
}
