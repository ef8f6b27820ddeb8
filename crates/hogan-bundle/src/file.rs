//! File records exchanged with the host pipeline.

use std::fmt;
use std::io::Read;
use std::path::{Component, Path, PathBuf};

/// The contents of a [`File`].
pub enum Contents {
    /// No contents (e.g. a directory entry). Skipped by transforms.
    Null,
    /// Fully materialized bytes.
    Buffer(Vec<u8>),
    /// Contents still being read.
    Stream(Box<dyn Read + Send>),
}

impl fmt::Debug for Contents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Contents::Null => write!(f, "Null"),
            Contents::Buffer(bytes) => write!(f, "Buffer({} bytes)", bytes.len()),
            Contents::Stream(_) => write!(f, "Stream"),
        }
    }
}

/// A file flowing through the pipeline.
///
/// `path` is usually absolute or relative to `cwd`; `base` is the root
/// the file was found under, and [`relative`](Self::relative) is `path`
/// seen from `base`.
#[derive(Debug)]
pub struct File {
    pub cwd: PathBuf,
    pub base: PathBuf,
    pub path: PathBuf,
    pub contents: Contents,
}

impl File {
    pub fn new(
        cwd: impl Into<PathBuf>,
        base: impl Into<PathBuf>,
        path: impl Into<PathBuf>,
        contents: Contents,
    ) -> Self {
        Self {
            cwd: cwd.into(),
            base: base.into(),
            path: path.into(),
            contents,
        }
    }

    /// A file with buffered contents.
    pub fn buffer(
        cwd: impl Into<PathBuf>,
        base: impl Into<PathBuf>,
        path: impl Into<PathBuf>,
        contents: impl Into<Vec<u8>>,
    ) -> Self {
        Self::new(cwd, base, path, Contents::Buffer(contents.into()))
    }

    pub fn is_null(&self) -> bool {
        matches!(self.contents, Contents::Null)
    }

    pub fn is_stream(&self) -> bool {
        matches!(self.contents, Contents::Stream(_))
    }

    pub fn is_buffer(&self) -> bool {
        matches!(self.contents, Contents::Buffer(_))
    }

    /// Buffered bytes, if any.
    pub fn bytes(&self) -> Option<&[u8]> {
        match &self.contents {
            Contents::Buffer(bytes) => Some(bytes.as_slice()),
            _ => None,
        }
    }

    /// `path` relative to `base`. Both are resolved against `cwd` and
    /// normalized first; a path outside `base` climbs out with `..`.
    /// When the two have different roots, `path` is returned as is.
    pub fn relative(&self) -> PathBuf {
        let base = self.cwd.join(&self.base);
        let path = self.cwd.join(&self.path);
        let base = normalize(&base);
        let path = normalize(&path);

        if root(&base) != root(&path) {
            return self.path.clone();
        }
        let shared = base.iter().zip(&path).take_while(|(a, b)| a == b).count();
        std::iter::repeat(Component::ParentDir)
            .take(base.len() - shared)
            .chain(path[shared..].iter().copied())
            .collect()
    }
}

/// Lexically resolve `.` and `..`. A `..` that would climb above a
/// relative path's start is kept.
fn normalize(path: &Path) -> Vec<Component<'_>> {
    let mut parts: Vec<Component<'_>> = Vec::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match parts.last() {
                Some(Component::Normal(_)) => {
                    parts.pop();
                }
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => parts.push(component),
            },
            _ => parts.push(component),
        }
    }
    parts
}

fn root<'a>(parts: &'a [Component<'a>]) -> &'a [Component<'a>] {
    let len = parts
        .iter()
        .take_while(|c| matches!(c, Component::Prefix(_) | Component::RootDir))
        .count();
    &parts[..len]
}
