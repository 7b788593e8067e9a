//! Drives one plugin source through the scanner and emitter.

use crate::config::GeneratorConfig;
use crate::emitter::Emitter;
use crate::error::{PluginatorError, Result};
use crate::output::OutputLocator;
use crate::scanner::{read_to_package_main, LineAction, PluginScanner, SourceLines};
use crate::types::{PluginType, RootName};
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Outcome of rendering one plugin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOutcome {
    pub plugin_type: PluginType,
    /// Input lines copied into the output.
    pub lines_written: usize,
    /// Input lines dropped after `package main`.
    pub lines_dropped: usize,
    pub bytes_written: usize,
}

/// Report of a file-to-file generation.
#[derive(Debug, Clone)]
pub struct GenerationReport {
    pub input: PathBuf,
    pub output: PathBuf,
    pub outcome: RenderOutcome,
}

/// Generator for the builtin version of one plugin.
pub struct PluginGenerator {
    root: RootName,
    config: GeneratorConfig,
}

impl PluginGenerator {
    pub fn new(root: RootName, config: GeneratorConfig) -> Self {
        Self { root, config }
    }

    pub fn root(&self) -> &RootName {
        &self.root
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Transforms plugin source read from `input` into `output`.
    ///
    /// Nothing is written when the input has no `package main` line.
    pub fn render<R: BufRead, W: Write>(&self, input: R, output: W) -> Result<RenderOutcome> {
        let mut lines = SourceLines::new(input);
        let skipped = read_to_package_main(&mut lines, Path::new(&self.root.file_name()))?;
        self.render_body(lines, skipped, output)
    }

    /// Renders an in-memory source, returning the generated text.
    pub fn render_to_string(&self, source: &str) -> Result<(String, RenderOutcome)> {
        let mut out = Vec::new();
        let outcome = self.render(source.as_bytes(), &mut out)?;
        let generated = String::from_utf8(out)
            .map_err(|e| PluginatorError::Io(io::Error::new(io::ErrorKind::InvalidData, e)))?;
        Ok((generated, outcome))
    }

    /// Reads `<root>.go` from `input_dir` and writes the generated file to
    /// wherever `locator` points.
    ///
    /// The output file is only created once the input is known to contain
    /// `package main`. A failure after that leaves a partial file behind.
    pub fn generate_file(
        &self,
        input_dir: &Path,
        locator: &impl OutputLocator,
    ) -> Result<GenerationReport> {
        let input_path = input_dir.join(self.root.file_name());
        let mut lines = SourceLines::new(self.open_input(&input_path)?);
        let skipped = read_to_package_main(&mut lines, &input_path)?;

        let output_path = locator.locate(&self.root);
        info!("Generating {:?} from {:?}", output_path, input_path);
        let file = File::create(&output_path)
            .map_err(|e| PluginatorError::create_output(&output_path, e))?;

        let outcome = self.render_body(lines, skipped, BufWriter::new(file))?;
        info!(
            "Generated {} plugin {} ({} bytes)",
            outcome.plugin_type, self.root, outcome.bytes_written
        );

        Ok(GenerationReport {
            input: input_path,
            output: output_path,
            outcome,
        })
    }

    /// Reads `<root>.go` from `input_dir` and writes the generated source to
    /// `output` instead of a file.
    pub fn generate_to<W: Write>(&self, input_dir: &Path, output: W) -> Result<RenderOutcome> {
        let input_path = input_dir.join(self.root.file_name());
        let mut lines = SourceLines::new(self.open_input(&input_path)?);
        let skipped = read_to_package_main(&mut lines, &input_path)?;
        self.render_body(lines, skipped, output)
    }

    fn open_input(&self, path: &Path) -> Result<BufReader<File>> {
        debug!("Opening {:?}", path);
        File::open(path)
            .map(BufReader::new)
            .map_err(|e| PluginatorError::open_input(path, e))
    }

    fn render_body<I, W>(&self, lines: I, skipped: usize, output: W) -> Result<RenderOutcome>
    where
        I: Iterator<Item = io::Result<String>>,
        W: Write,
    {
        let mut emitter = Emitter::new(output, &self.root);
        emitter.write_header(
            &self.root,
            &self.config.provenance.short(),
            &self.config.package_name,
        )?;

        let mut scanner = PluginScanner::new(&self.config.plugin_symbol, skipped + 1);
        for line in lines {
            let line = line?;
            if scanner.scan(&line)? == LineAction::Write {
                emitter.write_line(&line)?;
            }
        }

        let plugin_type = scanner.plugin_type();
        if !plugin_type.is_known() {
            if self.config.require_plugin_type {
                return Err(PluginatorError::missing_plugin_type(self.root.file_name()));
            }
            warn!(
                "{} has neither a Transform( nor a Generate( method; emitting resmap.{}Plugin",
                self.root.file_name(),
                plugin_type
            );
        }

        emitter.write_constructor(&self.root, plugin_type)?;
        let bytes_written = emitter.bytes_written();
        emitter.finish()?;

        Ok(RenderOutcome {
            plugin_type,
            lines_written: scanner.lines_written(),
            lines_dropped: scanner.lines_dropped(),
            bytes_written,
        })
    }
}
