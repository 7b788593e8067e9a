//! Output location strategies.

use crate::types::RootName;
use std::path::PathBuf;

/// Maps a root name to the path its generated file is written to.
pub trait OutputLocator {
    fn locate(&self, root: &RootName) -> PathBuf;
}

impl<F> OutputLocator for F
where
    F: Fn(&RootName) -> PathBuf,
{
    fn locate(&self, root: &RootName) -> PathBuf {
        self(root)
    }
}

/// Writes `<root>.go` into a fixed directory.
///
/// With the default configuration the directory is `../../../api/builtins`,
/// which from `plugin/builtin/secretgenerator` lands in `api/builtins`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuiltinsDir {
    dir: PathBuf,
}

impl BuiltinsDir {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl OutputLocator for BuiltinsDir {
    fn locate(&self, root: &RootName) -> PathBuf {
        self.dir.join(root.file_name())
    }
}
