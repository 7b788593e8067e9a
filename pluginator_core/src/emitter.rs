//! Writes the generated source: header, body lines and constructor.

use crate::error::{PluginatorError, Result};
use crate::renamer::Renamer;
use crate::types::{PluginType, RootName};
use std::io::Write;

/// Package the generated constructor's return type lives in.
pub const RESMAP_PACKAGE: &str = "resmap";

/// Line-oriented writer that specializes every line through a [`Renamer`].
pub struct Emitter<W: Write> {
    out: W,
    renamer: Renamer,
    bytes_written: usize,
}

impl<W: Write> Emitter<W> {
    pub fn new(out: W, root: &RootName) -> Self {
        Self {
            out,
            renamer: Renamer::new(root),
            bytes_written: 0,
        }
    }

    /// Renames and writes one line followed by `\n`.
    pub fn write_line(&mut self, line: &str) -> Result<()> {
        let renamed = self.renamer.rename(line);
        self.out
            .write_all(renamed.as_bytes())
            .and_then(|_| self.out.write_all(b"\n"))
            .map_err(|e| PluginatorError::write(line, e))?;
        self.bytes_written += renamed.len() + 1;
        Ok(())
    }

    /// The generated-code marker, provenance comment and package clause.
    ///
    /// The phrasing of the first line is what `go generate` tooling looks for
    /// to recognize generated files.
    pub fn write_header(&mut self, root: &RootName, provenance: &str, package: &str) -> Result<()> {
        self.write_line(&format!(
            "// Code generated by pluginator on {}; DO NOT EDIT.",
            root
        ))?;
        self.write_line(&format!("// pluginator {}", provenance))?;
        // Three blank lines; gofmt collapses them.
        for _ in 0..3 {
            self.write_line("")?;
        }
        self.write_line(&format!("package {}", package))
    }

    /// A blank line, then `func New<root>Plugin() resmap.<Type>Plugin`.
    pub fn write_constructor(&mut self, root: &RootName, plugin_type: PluginType) -> Result<()> {
        self.write_line("")?;
        self.write_line(&format!(
            "func {}() {}.{}Plugin {{",
            root.constructor_name(),
            RESMAP_PACKAGE,
            plugin_type
        ))?;
        self.write_line(&format!("  return &{}{{}}", root.plugin_struct_name()))?;
        self.write_line("}")
    }

    pub fn bytes_written(&self) -> usize {
        self.bytes_written
    }

    /// Flushes and hands back the underlying writer.
    pub fn finish(mut self) -> Result<W> {
        self.out.flush()?;
        Ok(self.out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn root() -> RootName {
        RootName::from_file_name("Foo.go").unwrap()
    }

    fn emitted(f: impl FnOnce(&mut Emitter<Vec<u8>>) -> Result<()>) -> String {
        let mut emitter = Emitter::new(Vec::new(), &root());
        f(&mut emitter).unwrap();
        String::from_utf8(emitter.finish().unwrap()).unwrap()
    }

    #[test]
    fn test_header_layout() {
        let out = emitted(|e| e.write_header(&root(), "{0.1.0 unknown}", "builtins"));
        assert_eq!(
            out,
            "// Code generated by pluginator on Foo; DO NOT EDIT.\n\
             // pluginator {0.1.0 unknown}\n\
             \n\
             \n\
             \n\
             package builtins\n"
        );
    }

    #[test]
    fn test_constructor_for_each_plugin_type() {
        for (plugin_type, label) in [
            (PluginType::Transformer, "Transformer"),
            (PluginType::Generator, "Generator"),
            (PluginType::Unknown, "unknown"),
        ] {
            let out = emitted(|e| e.write_constructor(&root(), plugin_type));
            assert_eq!(
                out,
                format!(
                    "\nfunc NewFooPlugin() resmap.{}Plugin {{\n  return &FooPlugin{{}}\n}}\n",
                    label
                )
            );
        }
    }

    #[test]
    fn test_write_line_renames() {
        let out = emitted(|e| e.write_line("func (p *plugin) Config() error {"));
        assert_eq!(out, "func (p *FooPlugin) Config() error {\n");
    }

    #[test]
    fn test_bytes_written_counts_renamed_output() {
        let mut emitter = Emitter::new(Vec::new(), &root());
        emitter.write_line("type plugin struct {").unwrap();
        let expected = "type FooPlugin struct {\n".len();
        assert_eq!(emitter.bytes_written(), expected);
        assert_eq!(emitter.finish().unwrap().len(), expected);
    }

    struct FailingWriter;

    impl Write for FailingWriter {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::other("disk full"))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_write_failure_reports_line() {
        let mut emitter = Emitter::new(FailingWriter, &root());
        let err = emitter.write_line("package builtins").unwrap_err();
        match err {
            PluginatorError::Write { line, .. } => assert_eq!(line, "package builtins"),
            other => panic!("expected Write error, got {:?}", other),
        }
    }
}
