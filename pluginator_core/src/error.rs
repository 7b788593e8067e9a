use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PluginatorError {
    #[error("expecting .go suffix on {name}")]
    InvalidInputName { name: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("unable to open `{}`; {source}", path.display())]
    OpenInput {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("unable to create `{}`; {source}", path.display())]
    CreateOutput {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Trouble writing: {line}; {source}")]
    Write {
        line: String,
        source: std::io::Error,
    },

    #[error("{} missing package main", file.display())]
    MissingPackageMain { file: PathBuf },

    #[error("unexpected {marker} on line {line}")]
    UnexpectedMarker { marker: &'static str, line: usize },

    #[error("{} implements neither Transform( nor Generate(", file.display())]
    MissingPluginType { file: PathBuf },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Environment variable not set: {0}")]
    EnvVarNotSet(String),

    #[error("Invalid regex pattern: {0}")]
    Regex(String),
}

impl From<regex::Error> for PluginatorError {
    fn from(err: regex::Error) -> Self {
        PluginatorError::Regex(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, PluginatorError>;

impl PluginatorError {
    pub fn invalid_input_name(name: impl Into<String>) -> Self {
        PluginatorError::InvalidInputName { name: name.into() }
    }

    pub fn open_input(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        PluginatorError::OpenInput {
            path: path.into(),
            source,
        }
    }

    pub fn create_output(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        PluginatorError::CreateOutput {
            path: path.into(),
            source,
        }
    }

    pub fn write(line: impl Into<String>, source: std::io::Error) -> Self {
        PluginatorError::Write {
            line: line.into(),
            source,
        }
    }

    pub fn missing_package_main(file: impl Into<PathBuf>) -> Self {
        PluginatorError::MissingPackageMain { file: file.into() }
    }

    pub fn unexpected_marker(marker: &'static str, line: usize) -> Self {
        PluginatorError::UnexpectedMarker { marker, line }
    }

    pub fn missing_plugin_type(file: impl Into<PathBuf>) -> Self {
        PluginatorError::MissingPluginType { file: file.into() }
    }

    pub fn config(message: impl Into<String>) -> Self {
        PluginatorError::Config(message.into())
    }

    /// True for errors caused by the plugin source itself rather than the
    /// environment it was run in.
    pub fn is_source_error(&self) -> bool {
        matches!(
            self,
            PluginatorError::MissingPackageMain { .. }
                | PluginatorError::UnexpectedMarker { .. }
                | PluginatorError::MissingPluginType { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_input_name_message() {
        let err = PluginatorError::invalid_input_name("secretgenerator.txt");
        assert_eq!(err.to_string(), "expecting .go suffix on secretgenerator.txt");
    }

    #[test]
    fn test_unexpected_marker_message() {
        let err = PluginatorError::unexpected_marker("Generate(", 14);
        assert_eq!(err.to_string(), "unexpected Generate( on line 14");
        assert!(err.is_source_error());
    }

    #[test]
    fn test_missing_package_main_message() {
        let err = PluginatorError::missing_package_main("Foo.go");
        assert_eq!(err.to_string(), "Foo.go missing package main");
    }

    #[test]
    fn test_io_errors_are_not_source_errors() {
        let err = PluginatorError::open_input(
            "Foo.go",
            std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
        );
        assert!(!err.is_source_error());
        assert!(err.to_string().starts_with("unable to open `Foo.go`"));
    }
}
