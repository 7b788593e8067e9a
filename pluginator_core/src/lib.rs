// Pluginator - derives builtin plugin sources from hand-written Go plugins

pub mod config;
pub mod emitter;
pub mod error;
pub mod generator;
pub mod output;
pub mod provenance;
pub mod renamer;
pub mod scanner;
pub mod types;

// Re-export commonly used items for convenience
pub use config::{GeneratorConfig, GeneratorConfigBuilder};
pub use error::{PluginatorError, Result};
pub use generator::{GenerationReport, PluginGenerator, RenderOutcome};
pub use output::{BuiltinsDir, OutputLocator};
pub use provenance::Provenance;
pub use types::{PluginType, RootName};
