//! Names and classifications shared by the scanner, renamer and emitter.

use crate::error::{PluginatorError, Result};
use std::fmt;
use strum::Display;

/// Suffix the input file name must carry.
pub const GO_SUFFIX: &str = ".go";

/// Which resmap plugin interface a hand-written plugin implements.
///
/// The `Display` form is embedded in the generated constructor's return type,
/// e.g. `resmap.TransformerPlugin`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display)]
pub enum PluginType {
    /// No capability marker seen (yet).
    #[default]
    #[strum(to_string = "unknown")]
    Unknown,
    /// The plugin has a `Transform(` method.
    Transformer,
    /// The plugin has a `Generate(` method.
    Generator,
}

impl PluginType {
    pub fn is_known(&self) -> bool {
        !matches!(self, PluginType::Unknown)
    }
}

/// The input file's base name without the `.go` suffix.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RootName(String);

impl RootName {
    /// Validates a file name such as `SecretGenerator.go` and strips the suffix.
    ///
    /// # Errors
    ///
    /// Returns `PluginatorError::InvalidInputName` when the suffix is missing
    /// or nothing precedes it.
    pub fn from_file_name(name: &str) -> Result<Self> {
        match name.strip_suffix(GO_SUFFIX) {
            Some(stem) if !stem.is_empty() => Ok(Self(stem.to_string())),
            _ => Err(PluginatorError::invalid_input_name(name)),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `Foo` -> `Foo.go`
    pub fn file_name(&self) -> String {
        format!("{}{}", self.0, GO_SUFFIX)
    }

    /// `Foo` -> `FooPlugin`
    pub fn plugin_struct_name(&self) -> String {
        format!("{}Plugin", self.0)
    }

    /// `Foo` -> `NewFooPlugin`
    pub fn constructor_name(&self) -> String {
        format!("New{}Plugin", self.0)
    }
}

impl fmt::Display for RootName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plugin_type_display() {
        assert_eq!(PluginType::Unknown.to_string(), "unknown");
        assert_eq!(PluginType::Transformer.to_string(), "Transformer");
        assert_eq!(PluginType::Generator.to_string(), "Generator");
    }

    #[test]
    fn test_plugin_type_default_is_unknown() {
        assert_eq!(PluginType::default(), PluginType::Unknown);
        assert!(!PluginType::default().is_known());
        assert!(PluginType::Generator.is_known());
    }

    #[test]
    fn test_root_name_strips_suffix() {
        let root = RootName::from_file_name("SecretGenerator.go").unwrap();
        assert_eq!(root.as_str(), "SecretGenerator");
        assert_eq!(root.file_name(), "SecretGenerator.go");
        assert_eq!(root.plugin_struct_name(), "SecretGeneratorPlugin");
        assert_eq!(root.constructor_name(), "NewSecretGeneratorPlugin");
    }

    #[test]
    fn test_root_name_rejects_wrong_suffix() {
        for name in ["Foo", "Foo.rs", "Foo.go.bak", "", ".go"] {
            let err = RootName::from_file_name(name).unwrap_err();
            assert!(
                matches!(err, PluginatorError::InvalidInputName { .. }),
                "expected InvalidInputName for {:?}, got {:?}",
                name,
                err
            );
        }
    }

    #[test]
    fn test_root_name_only_strips_one_suffix() {
        let root = RootName::from_file_name("Foo.go.go").unwrap();
        assert_eq!(root.as_str(), "Foo.go");
    }
}
