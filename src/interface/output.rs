use indicatif::{ProgressBar, ProgressStyle};
use std::fmt;
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Error,
    Warning,
    Info,
    Debug,
    Verbose,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogLevel::Error => write!(f, "ERROR"),
            LogLevel::Warning => write!(f, "WARN"),
            LogLevel::Info => write!(f, "INFO"),
            LogLevel::Debug => write!(f, "DEBUG"),
            LogLevel::Verbose => write!(f, "VERBOSE"),
        }
    }
}

/// Console logger. Errors and warnings go to stderr, everything else to stdout.
#[derive(Debug, Clone)]
pub struct Logger {
    verbose: bool,
    debug: bool,
    quiet: bool,
}

impl Logger {
    pub fn new(verbose: bool, debug: bool) -> Self {
        Self {
            verbose,
            debug,
            quiet: false,
        }
    }

    /// A logger that only reports errors; used by library callers and tests
    pub fn quiet() -> Self {
        Self {
            verbose: false,
            debug: false,
            quiet: true,
        }
    }

    pub fn should_log(&self, level: LogLevel) -> bool {
        match level {
            LogLevel::Error => true,
            LogLevel::Warning | LogLevel::Info => !self.quiet,
            LogLevel::Debug => !self.quiet && (self.debug || self.verbose),
            LogLevel::Verbose => !self.quiet && self.verbose,
        }
    }

    pub fn log(&self, level: LogLevel, message: &str) {
        if !self.should_log(level) {
            return;
        }
        match level {
            LogLevel::Error => eprintln!("❌ {}", message),
            LogLevel::Warning => eprintln!("⚠️ {}", message),
            LogLevel::Info => println!("{}", message),
            LogLevel::Debug => println!("🔍 {}", message),
            LogLevel::Verbose => println!("💬 {}", message),
        }
    }

    pub fn error(&self, message: &str) {
        self.log(LogLevel::Error, message);
    }

    pub fn warning(&self, message: &str) {
        self.log(LogLevel::Warning, message);
    }

    pub fn info(&self, message: &str) {
        self.log(LogLevel::Info, message);
    }

    pub fn debug(&self, message: &str) {
        self.log(LogLevel::Debug, message);
    }

    pub fn verbose(&self, message: &str) {
        self.log(LogLevel::Verbose, message);
    }

    pub fn is_verbose(&self) -> bool {
        self.verbose
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new(false, false)
    }
}

pub struct ProgressReporter {
    logger: Logger,
    progress_bar: Option<ProgressBar>,
    current_step: usize,
    total_steps: usize,
    step_name: String,
}

impl ProgressReporter {
    pub fn new(logger: Logger, total_steps: usize) -> Self {
        let progress_bar = if logger.is_verbose() {
            None
        } else {
            let pb = ProgressBar::new_spinner();
            if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
                pb.set_style(
                    style.tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
                );
            }
            pb.enable_steady_tick(Duration::from_millis(100));
            Some(pb)
        };

        Self {
            logger,
            progress_bar,
            current_step: 0,
            total_steps,
            step_name: String::new(),
        }
    }

    pub fn start_step(&mut self, step_name: &str) {
        self.current_step += 1;
        self.step_name = step_name.to_string();

        match self.progress_bar {
            Some(ref pb) => pb.set_message(format!(
                "{} ({}/{})",
                step_name, self.current_step, self.total_steps
            )),
            None => self.logger.info(&format!(
                "🚀 {} ({}/{})",
                step_name, self.current_step, self.total_steps
            )),
        }
    }

    pub fn complete_step(&mut self, message: Option<&str>) {
        if self.progress_bar.is_some() {
            return;
        }
        match message {
            Some(msg) => self.logger.info(&format!("✅ {} - {}", self.step_name, msg)),
            None => self.logger.info(&format!("✅ {}", self.step_name)),
        }
    }

    pub fn fail_step(&mut self, error: &str) {
        if let Some(ref pb) = self.progress_bar {
            pb.finish_with_message(format!("✗ {} - {}", self.step_name, error));
        }
        self.logger
            .error(&format!("Failed {}: {}", self.step_name, error));
    }

    pub fn finish(&self, total_message: &str) {
        if let Some(ref pb) = self.progress_bar {
            pb.finish_and_clear();
        }
        println!("✓ {}", total_message);
    }
}

impl Drop for ProgressReporter {
    fn drop(&mut self) {
        if let Some(ref pb) = self.progress_bar {
            pb.finish_and_clear();
        }
    }
}

/// Post-generation hints for wiring the generated files into an app.
pub fn print_usage_info(client_path: &Path, router_path: &Path, client_name: &str) {
    println!("\n📁 Client: {}", client_path.display());
    println!("📁 Router: {}", router_path.display());

    println!("\n💡 Use the client in your frontend:");
    println!(
        "  import {} from './{}';",
        client_name,
        client_path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| client_name.to_string())
    );
    println!(
        "  const api = new {}({{ baseUrl: 'http://localhost:5003' }});",
        client_name
    );
    println!("\n💡 Start the server with your TypeScript runner, e.g.:");
    println!("  npx tsx {}", router_path.display());
}
