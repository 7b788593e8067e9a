//! Specializes the generic `plugin` type to `<root>Plugin`.

use crate::types::RootName;
use std::borrow::Cow;

/// Patterns that reference the generic plugin type, in priority order.
pub const RENAME_PATTERNS: [&str; 2] = ["type plugin struct", "*plugin)"];

const PLACEHOLDER: &str = "plugin";

/// Rewrites the first placeholder pattern found in a line.
#[derive(Debug, Clone)]
pub struct Renamer {
    replacement: String,
}

impl Renamer {
    pub fn new(root: &RootName) -> Self {
        Self {
            replacement: root.plugin_struct_name(),
        }
    }

    /// Returns the line with the first matching pattern specialized, or the
    /// line untouched when no pattern is present.
    pub fn rename<'a>(&self, line: &'a str) -> Cow<'a, str> {
        RENAME_PATTERNS
            .iter()
            .find_map(|pattern| self.replace(line, pattern))
            .map_or(Cow::Borrowed(line), Cow::Owned)
    }

    // Only the placeholder inside the matched pattern changes, so
    // `(p *plugin) Config(h *resmap.PluginHelpers)` keeps its other words.
    fn replace(&self, line: &str, target: &str) -> Option<String> {
        if !line.contains(target) {
            return None;
        }
        let newer = target.replacen(PLACEHOLDER, &self.replacement, 1);
        Some(line.replacen(target, &newer, 1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn renamer(root: &str) -> Renamer {
        Renamer::new(&RootName::from_file_name(&format!("{}.go", root)).unwrap())
    }

    #[test]
    fn test_rename_struct_declaration() {
        assert_eq!(
            renamer("Foo").rename("type plugin struct {"),
            "type FooPlugin struct {"
        );
    }

    #[test]
    fn test_rename_method_receiver() {
        assert_eq!(
            renamer("Foo").rename("func (p *plugin) DoThing() error {"),
            "func (p *FooPlugin) DoThing() error {"
        );
    }

    #[test]
    fn test_rename_only_first_occurrence() {
        assert_eq!(
            renamer("Foo").rename("x := (*plugin)(a); y := (*plugin)(b)"),
            "x := (*FooPlugin)(a); y := (*plugin)(b)"
        );
    }

    #[test]
    fn test_struct_pattern_takes_priority() {
        assert_eq!(
            renamer("Foo").rename("type plugin struct { self *plugin) }"),
            "type FooPlugin struct { self *plugin) }"
        );
    }

    #[test]
    fn test_unrelated_uses_of_plugin_untouched() {
        let r = renamer("Foo");
        for line in [
            "var KustomizePlugin plugin",
            "// plugin docs",
            "p := &plugin{}",
            "type pluginHelper struct {",
        ] {
            assert!(matches!(r.rename(line), Cow::Borrowed(_)), "{}", line);
        }
    }

    proptest! {
        #[test]
        fn test_rename_without_placeholder_is_identity(line in "[^p]*") {
            let r = renamer("Foo");
            prop_assert_eq!(r.rename(&line), line.as_str());
        }

        #[test]
        fn test_rename_is_stable_on_its_own_output(
            prefix in "[a-z ]{0,12}",
            suffix in "[a-z ]{0,12}",
        ) {
            let r = renamer("Foo");
            let line = format!("{}type plugin struct{}", prefix, suffix);
            let once = r.rename(&line).into_owned();
            prop_assert_eq!(r.rename(&once), once.as_str());
        }
    }
}
