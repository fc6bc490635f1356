pub mod code_writer;
pub mod document;
pub mod file_writer;
pub mod name_registry;
pub mod naming;
pub mod templates;

pub use code_writer::CodeWriter;
pub use document::Document;
pub use file_writer::FileWriter;
pub use name_registry::NameRegistry;
pub use templates::TemplateEngine;
