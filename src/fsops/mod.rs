// src/fsops/mod.rs

//! Filesystem operations behind a trait so stages stay testable.
//!
//! The temp workspace is the only shared mutable resource in the pipeline;
//! stages running in the same parallel group never write to overlapping
//! paths, which is what makes the concurrent use of this interface safe.

use std::fmt::Debug;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use globset::Glob;

use crate::errors::Result;

/// Abstract filesystem interface used by the stages.
pub trait FileOps: Send + Sync + Debug {
    fn exists(&self, path: &Path) -> bool;

    fn read_to_string(&self, path: &Path) -> Result<String>;

    /// Write `contents`, creating parent directories as needed.
    fn write(&self, path: &Path, contents: &[u8]) -> Result<()>;

    fn create_dir_all(&self, path: &Path) -> Result<()>;

    /// Copy a single file, creating the destination's parent directories.
    fn copy_file(&self, src: &Path, dest: &Path) -> Result<()>;

    /// Files directly under `dir` whose file name matches `pattern`.
    ///
    /// A missing directory yields an empty list, not an error: selecting
    /// zero files is a legal outcome for every render/copy stage.
    fn list_matching(&self, dir: &Path, pattern: &str) -> Result<Vec<PathBuf>>;

    /// Copy every file matching `pattern` from `src_dir` into `dest_dir`
    /// verbatim. Returns the destination paths.
    fn copy_matching(&self, src_dir: &Path, pattern: &str, dest_dir: &Path)
    -> Result<Vec<PathBuf>>;

    /// Recursively delete `path`. Deleting a nonexistent path is success.
    fn delete_tree(&self, path: &Path) -> Result<()>;

    /// Propagate `src`'s permission bits to `dest` (rendered install scripts
    /// must keep their executable bit). No-op on non-unix platforms.
    fn copy_permissions(&self, src: &Path, dest: &Path) -> Result<()>;
}

/// Implementation that uses `std::fs`.
#[derive(Debug, Clone, Default)]
pub struct RealFileOps;

impl FileOps for RealFileOps {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn read_to_string(&self, path: &Path) -> Result<String> {
        Ok(fs::read_to_string(path).with_context(|| format!("reading file {:?}", path))?)
    }

    fn write(&self, path: &Path, contents: &[u8]) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| format!("creating dir {:?}", parent))?;
        }
        fs::write(path, contents).with_context(|| format!("writing to file {:?}", path))?;
        Ok(())
    }

    fn create_dir_all(&self, path: &Path) -> Result<()> {
        Ok(fs::create_dir_all(path).with_context(|| format!("creating dir {:?}", path))?)
    }

    fn copy_file(&self, src: &Path, dest: &Path) -> Result<()> {
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent).with_context(|| format!("creating dir {:?}", parent))?;
        }
        fs::copy(src, dest).with_context(|| format!("copying {:?} to {:?}", src, dest))?;
        Ok(())
    }

    fn list_matching(&self, dir: &Path, pattern: &str) -> Result<Vec<PathBuf>> {
        if !dir.is_dir() {
            return Ok(Vec::new());
        }

        let matcher = Glob::new(pattern)
            .with_context(|| format!("compiling glob pattern {:?}", pattern))?
            .compile_matcher();

        let mut matches = Vec::new();
        for entry in fs::read_dir(dir).with_context(|| format!("reading dir {:?}", dir))? {
            let entry = entry?;
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            if let Some(name) = path.file_name() {
                if matcher.is_match(name) {
                    matches.push(path);
                }
            }
        }

        // Deterministic processing order regardless of readdir order.
        matches.sort();
        Ok(matches)
    }

    fn copy_matching(
        &self,
        src_dir: &Path,
        pattern: &str,
        dest_dir: &Path,
    ) -> Result<Vec<PathBuf>> {
        let sources = self.list_matching(src_dir, pattern)?;
        let mut copied = Vec::with_capacity(sources.len());

        for src in sources {
            let Some(name) = src.file_name() else { continue };
            let dest = dest_dir.join(name);
            self.copy_file(&src, &dest)?;
            copied.push(dest);
        }

        Ok(copied)
    }

    fn delete_tree(&self, path: &Path) -> Result<()> {
        match fs::remove_dir_all(path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    #[cfg(unix)]
    fn copy_permissions(&self, src: &Path, dest: &Path) -> Result<()> {
        let meta = fs::metadata(src).with_context(|| format!("reading metadata {:?}", src))?;
        fs::set_permissions(dest, meta.permissions())
            .with_context(|| format!("setting permissions on {:?}", dest))?;
        Ok(())
    }

    #[cfg(not(unix))]
    fn copy_permissions(&self, _src: &Path, _dest: &Path) -> Result<()> {
        Ok(())
    }
}
