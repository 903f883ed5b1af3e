use super::files::atomic_write;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use thiserror::Error;
use walkdir::{DirEntry, WalkDir};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("document not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {}: {message}", path.display())]
    Write { path: PathBuf, message: String },

    #[error("failed to list documents under {}: {message}", root.display())]
    List { root: PathBuf, message: String },
}

/// Line-oriented text store holding the annotated documents.
///
/// Reads and writes are always whole-document. Paths are relative to the
/// store root.
pub trait DocumentStore {
    fn list_documents(&self) -> Result<Vec<PathBuf>, StoreError>;
    fn read_document(&self, path: &Path) -> Result<String, StoreError>;
    fn write_document(&self, path: &Path, content: &str) -> Result<(), StoreError>;
    fn modified_time(&self, path: &Path) -> Result<SystemTime, StoreError>;
}

/// Markdown files under a vault directory
#[derive(Debug, Clone)]
pub struct VaultStore {
    root: PathBuf,
    exclude_folders: Vec<String>,
}

impl VaultStore {
    pub fn new(root: impl Into<PathBuf>, exclude_folders: Vec<String>) -> Self {
        Self {
            root: root.into(),
            exclude_folders,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        self.root.join(path)
    }

    /// Hidden directories (`.git`, `.quadrant`, ...) and excluded folders are skipped
    fn is_skipped(&self, entry: &DirEntry) -> bool {
        if entry.depth() == 0 {
            return false;
        }
        let name = entry.file_name().to_string_lossy();
        if name.starts_with('.') {
            return true;
        }
        if !entry.file_type().is_dir() {
            return false;
        }
        entry
            .path()
            .strip_prefix(&self.root)
            .map(|rel| {
                let rel = rel.to_string_lossy().replace('\\', "/");
                self.exclude_folders
                    .iter()
                    .any(|folder| rel == folder.trim_matches('/'))
            })
            .unwrap_or(false)
    }
}

impl DocumentStore for VaultStore {
    fn list_documents(&self) -> Result<Vec<PathBuf>, StoreError> {
        let mut documents = Vec::new();

        let walker = WalkDir::new(&self.root)
            .follow_links(false)
            .into_iter()
            .filter_entry(|entry| !self.is_skipped(entry));

        for entry in walker {
            let entry = entry.map_err(|e| StoreError::List {
                root: self.root.clone(),
                message: e.to_string(),
            })?;

            if !entry.file_type().is_file() {
                continue;
            }
            let is_markdown = entry
                .path()
                .extension()
                .map_or(false, |ext| ext.eq_ignore_ascii_case("md"));
            if !is_markdown {
                continue;
            }
            if let Ok(rel) = entry.path().strip_prefix(&self.root) {
                documents.push(rel.to_path_buf());
            }
        }

        // Sort by path so scans are stable between runs
        documents.sort();
        Ok(documents)
    }

    fn read_document(&self, path: &Path) -> Result<String, StoreError> {
        let full = self.resolve(path);
        if !full.is_file() {
            return Err(StoreError::NotFound(path.to_path_buf()));
        }
        fs::read_to_string(&full).map_err(|source| StoreError::Read {
            path: path.to_path_buf(),
            source,
        })
    }

    fn write_document(&self, path: &Path, content: &str) -> Result<(), StoreError> {
        let full = self.resolve(path);
        if let Some(parent) = full.parent() {
            fs::create_dir_all(parent).map_err(|e| StoreError::Write {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
        }
        atomic_write(&full, content).map_err(|e| StoreError::Write {
            path: path.to_path_buf(),
            message: format!("{:#}", e),
        })
    }

    fn modified_time(&self, path: &Path) -> Result<SystemTime, StoreError> {
        let full = self.resolve(path);
        if !full.exists() {
            return Err(StoreError::NotFound(path.to_path_buf()));
        }
        fs::metadata(&full)
            .and_then(|meta| meta.modified())
            .map_err(|source| StoreError::Read {
                path: path.to_path_buf(),
                source,
            })
    }
}

#[cfg(test)]
pub(crate) use memory::MemoryStore;


#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_vault_lists_markdown_only() {
        let temp_dir = tempdir().unwrap();
        let root = temp_dir.path();
        fs::create_dir_all(root.join("Projects")).unwrap();
        fs::create_dir_all(root.join(".obsidian")).unwrap();
        fs::create_dir_all(root.join("Archive")).unwrap();
        fs::write(root.join("inbox.md"), "- [ ] a ⭐").unwrap();
        fs::write(root.join("Projects/work.MD"), "- [ ] b").unwrap();
        fs::write(root.join("Projects/notes.txt"), "- [ ] c").unwrap();
        fs::write(root.join(".obsidian/hidden.md"), "- [ ] d").unwrap();
        fs::write(root.join("Archive/old.md"), "- [ ] e").unwrap();

        let store = VaultStore::new(root, vec!["Archive".to_string()]);
        let docs = store.list_documents().unwrap();
        assert_eq!(
            docs,
            vec![PathBuf::from("Projects/work.MD"), PathBuf::from("inbox.md")]
        );
    }

    #[test]
    fn test_vault_read_write_round_trip() {
        let temp_dir = tempdir().unwrap();
        let store = VaultStore::new(temp_dir.path(), Vec::new());
        let path = Path::new("Daily/2025-06-08.md");

        store.write_document(path, "pages:: 3\n").unwrap();
        assert_eq!(store.read_document(path).unwrap(), "pages:: 3\n");
        assert!(store.modified_time(path).is_ok());
    }

    #[test]
    fn test_vault_missing_document() {
        let temp_dir = tempdir().unwrap();
        let store = VaultStore::new(temp_dir.path(), Vec::new());

        let err = store.read_document(Path::new("gone.md")).unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
        assert!(matches!(
            store.modified_time(Path::new("gone.md")),
            Err(StoreError::NotFound(_))
        ));
    }
}
