use ignore::WalkBuilder;
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, instrument, warn};

use crate::config::AnalysisConfig;
use crate::constants::analysis::DEFAULT_EXCLUDED_DIRS;
use crate::types::{GeniusError, Result};

/// Directory (relative to the root, root = `""`) → file names directly inside it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FileTree {
    dirs: BTreeMap<String, Vec<String>>,
}

impl FileTree {
    pub fn directories(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.dirs
            .iter()
            .map(|(dir, files)| (dir.as_str(), files.as_slice()))
    }

    pub fn files_in(&self, dir: &str) -> Option<&[String]> {
        self.dirs.get(dir).map(Vec::as_slice)
    }

    /// Every file as a `/`-separated path relative to the root, in walk order
    pub fn file_paths(&self) -> Vec<String> {
        self.dirs
            .iter()
            .flat_map(|(dir, files)| {
                files.iter().map(move |name| {
                    if dir.is_empty() {
                        name.clone()
                    } else {
                        format!("{}/{}", dir, name)
                    }
                })
            })
            .collect()
    }

    pub fn file_count(&self) -> usize {
        self.dirs.values().map(Vec::len).sum()
    }

    pub fn dir_count(&self) -> usize {
        self.dirs.len()
    }

    pub fn into_inner(self) -> BTreeMap<String, Vec<String>> {
        self.dirs
    }
}

/// Walks a repository checkout, pruning excluded directory names at any depth.
///
/// Reads directory listings only, never file contents.
pub struct FileTreeWalker {
    root: PathBuf,
    exclude: Arc<HashSet<String>>,
    respect_gitignore: bool,
}

impl FileTreeWalker {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            exclude: Arc::new(DEFAULT_EXCLUDED_DIRS.iter().map(|d| d.to_string()).collect()),
            respect_gitignore: false,
        }
    }

    pub fn from_config<P: AsRef<Path>>(root: P, config: &AnalysisConfig) -> Self {
        Self::new(root)
            .with_exclude(config.exclude_dirs.iter().cloned())
            .respect_gitignore(config.respect_gitignore)
    }

    /// Replace the excluded directory names
    pub fn with_exclude(mut self, names: impl IntoIterator<Item = String>) -> Self {
        self.exclude = Arc::new(names.into_iter().collect());
        self
    }

    pub fn respect_gitignore(mut self, enabled: bool) -> Self {
        self.respect_gitignore = enabled;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    #[instrument(skip(self), fields(root = %self.root.display()))]
    pub fn walk(&self) -> Result<FileTree> {
        // Fail fast on a missing or unreadable root; subdirectory errors are only warnings.
        let metadata = std::fs::metadata(&self.root)
            .map_err(|e| GeniusError::repository_unreadable(&self.root, e))?;
        if !metadata.is_dir() {
            return Err(GeniusError::repository_unreadable(
                &self.root,
                std::io::Error::new(std::io::ErrorKind::NotADirectory, "not a directory"),
            ));
        }
        std::fs::read_dir(&self.root)
            .map_err(|e| GeniusError::repository_unreadable(&self.root, e))?;

        let exclude = Arc::clone(&self.exclude);
        let mut builder = WalkBuilder::new(&self.root);
        builder
            .standard_filters(false)
            .follow_links(false)
            .sort_by_file_name(|a, b| a.cmp(b))
            .filter_entry(move |entry| {
                let is_dir = entry.file_type().is_some_and(|t| t.is_dir());
                !(is_dir
                    && entry.depth() > 0
                    && entry
                        .file_name()
                        .to_str()
                        .is_some_and(|name| exclude.contains(name)))
            });
        if self.respect_gitignore {
            builder.git_ignore(true).git_exclude(true).require_git(false);
        }

        let mut dirs: BTreeMap<String, Vec<String>> = BTreeMap::new();
        let mut skipped = 0usize;

        for result in builder.build() {
            let entry = match result {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Skipping unreadable entry: {}", e);
                    skipped += 1;
                    continue;
                }
            };

            let Some(file_type) = entry.file_type() else {
                continue;
            };
            let rel = self.relative(entry.path());

            // Links are not followed; a link to a file is still listed as a file.
            let is_file = file_type.is_file()
                || (file_type.is_symlink() && entry.path().is_file());
            if file_type.is_dir() {
                dirs.entry(rel).or_default();
            } else if is_file {
                let (parent, name) = match rel.rsplit_once('/') {
                    Some((parent, name)) => (parent.to_string(), name.to_string()),
                    None => (String::new(), rel),
                };
                dirs.entry(parent).or_default().push(name);
            }
        }

        debug!(
            "Walked {} directories, skipped {} unreadable entries",
            dirs.len(),
            skipped
        );

        Ok(FileTree { dirs })
    }

    fn relative(&self, path: &Path) -> String {
        let rel = path.strip_prefix(&self.root).unwrap_or(path);
        rel.components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/")
    }
}
