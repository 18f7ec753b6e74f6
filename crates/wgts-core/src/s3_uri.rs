//! `s3://bucket/path` locations.
//!
//! Pure string functions. Paths are handled segment-wise: empty segments are
//! dropped on every join, and a trailing `/` survives only where the appended
//! relative path carries one.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct S3Uri {
    pub bucket: String,
    /// Object path without a leading `/`. Ends in `/` for directory locations.
    pub path: String,
}

pub const SCHEME: &str = "s3://";

fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty())
}

impl S3Uri {
    pub fn new(bucket: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            path: path.into(),
        }
    }

    pub fn parse(uri: &str) -> Option<Self> {
        let rest = uri.strip_prefix(SCHEME)?;
        let (bucket, path) = rest.split_once('/').unwrap_or((rest, ""));
        if bucket.is_empty() {
            return None;
        }
        Some(Self::new(bucket, path.trim_start_matches('/')))
    }

    /// Root location for a run: the key's segments up to and including the
    /// first one equal to `run_id`. All segments are kept when none match.
    pub fn run_root(bucket: &str, key: &str, run_id: &str) -> Self {
        let mut parts = Vec::new();
        for part in segments(key) {
            parts.push(part);
            if part == run_id {
                break;
            }
        }
        Self::new(bucket, parts.join("/"))
    }

    pub fn is_dir(&self) -> bool {
        self.path.ends_with('/')
    }

    /// Append a relative path below this location.
    pub fn join(&self, relative: &str) -> Self {
        let mut path = segments(&self.path)
            .chain(segments(relative))
            .collect::<Vec<_>>()
            .join("/");
        if relative.ends_with('/') {
            path.push('/');
        }
        Self::new(self.bucket.clone(), path)
    }

    /// Path of `self` below `root`, without leading or trailing `/`.
    ///
    /// `None` unless `self` is a strict descendant of `root` in the same bucket.
    pub fn relative_to(&self, root: &S3Uri) -> Option<String> {
        if self.bucket != root.bucket {
            return None;
        }
        let mut own = segments(&self.path);
        for expected in segments(&root.path) {
            if own.next()? != expected {
                return None;
            }
        }
        let rest = own.collect::<Vec<_>>();
        if rest.is_empty() {
            return None;
        }
        Some(rest.join("/"))
    }
}

impl fmt::Display for S3Uri {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "{SCHEME}{}", self.bucket)
        } else {
            write!(f, "{SCHEME}{}/{}", self.bucket, self.path)
        }
    }
}
