//! Line scanner and capability classifier.
//!
//! The scanner decides, line by line, whether an input line is dropped or
//! written, and watches for the method signatures that identify the plugin's
//! capability.

use crate::error::{PluginatorError, Result};
use crate::types::PluginType;
use std::io::{self, BufRead};
use std::path::Path;
use tracing::{debug, trace};

/// Everything up to and including the first line with this prefix is skipped.
pub const PACKAGE_MAIN_PREFIX: &str = "package main";

/// Directive comments that must not survive into generated code.
pub const DROPPED_PREFIXES: [&str; 2] = ["//go:generate", "//noinspection"];

pub const TRANSFORM_MARKER: &str = " Transform(";
pub const GENERATE_MARKER: &str = " Generate(";

/// Splits input into lines, dropping the `\n` terminator and then at most one
/// trailing `\r`. Unlike [`BufRead::lines`] this also drops the `\r` of a
/// final line that has no `\n`.
pub struct SourceLines<R> {
    reader: R,
}

impl<R: BufRead> SourceLines<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: BufRead> Iterator for SourceLines<R> {
    type Item = io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut line = String::new();
        match self.reader.read_line(&mut line) {
            Ok(0) => None,
            Ok(_) => {
                if line.ends_with('\n') {
                    line.pop();
                }
                if line.ends_with('\r') {
                    line.pop();
                }
                Some(Ok(line))
            }
            Err(e) => Some(Err(e)),
        }
    }
}

/// Consumes lines until one starts with `package main`.
///
/// Returns the number of lines consumed.
///
/// # Errors
///
/// `MissingPackageMain` when the input ends first, `Io` when a read fails.
pub fn read_to_package_main<I>(lines: &mut I, file: &Path) -> Result<usize>
where
    I: Iterator<Item = io::Result<String>>,
{
    let mut consumed = 0;
    for line in lines {
        let line = line?;
        consumed += 1;
        if line.starts_with(PACKAGE_MAIN_PREFIX) {
            debug!("Found package main on line {}", consumed);
            return Ok(consumed);
        }
    }
    Err(PluginatorError::missing_package_main(file))
}

/// What to do with a scanned line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineAction {
    Drop,
    Write,
}

/// Classifies the lines that follow `package main`.
#[derive(Debug)]
pub struct PluginScanner {
    symbol_declaration: String,
    plugin_type: PluginType,
    line_number: usize,
    written: usize,
    dropped: usize,
}

impl PluginScanner {
    /// `first_line` is the 1-based number of the first line that will be fed
    /// to [`PluginScanner::scan`], used in error messages.
    pub fn new(plugin_symbol: &str, first_line: usize) -> Self {
        Self {
            symbol_declaration: format!("var {} plugin", plugin_symbol),
            plugin_type: PluginType::Unknown,
            line_number: first_line.saturating_sub(1),
            written: 0,
            dropped: 0,
        }
    }

    /// Decides the fate of one line, updating the classification.
    ///
    /// # Errors
    ///
    /// `UnexpectedMarker` when a capability marker appears after the plugin
    /// type has already been decided.
    pub fn scan(&mut self, line: &str) -> Result<LineAction> {
        self.line_number += 1;

        if self.is_dropped(line) {
            trace!("Dropping line {}: {}", self.line_number, line);
            self.dropped += 1;
            return Ok(LineAction::Drop);
        }

        self.classify(line)?;
        self.written += 1;
        Ok(LineAction::Write)
    }

    pub fn plugin_type(&self) -> PluginType {
        self.plugin_type
    }

    pub fn lines_written(&self) -> usize {
        self.written
    }

    pub fn lines_dropped(&self) -> usize {
        self.dropped
    }

    fn is_dropped(&self, line: &str) -> bool {
        DROPPED_PREFIXES
            .iter()
            .any(|prefix| line.starts_with(prefix))
            || line == self.symbol_declaration
    }

    fn classify(&mut self, line: &str) -> Result<()> {
        let (marker, detected) = if line.contains(TRANSFORM_MARKER) {
            (TRANSFORM_MARKER, PluginType::Transformer)
        } else if line.contains(GENERATE_MARKER) {
            (GENERATE_MARKER, PluginType::Generator)
        } else {
            return Ok(());
        };

        if self.plugin_type.is_known() {
            return Err(PluginatorError::unexpected_marker(
                marker.trim_start(),
                self.line_number,
            ));
        }

        debug!("Line {} marks a {} plugin", self.line_number, detected);
        self.plugin_type = detected;
        Ok(())
    }
}
