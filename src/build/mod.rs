pub mod bundler;
pub mod emitter;
pub mod project_scanner;

pub use bundler::{BuildTarget, Bundler, ModuleFormat, Platform};
pub use emitter::{Destinations, Emitter};
pub use project_scanner::{ProjectInfo, ProjectScanner, ScanError};
