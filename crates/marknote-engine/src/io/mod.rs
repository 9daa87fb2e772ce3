use crate::models::{FileTree, has_markdown_extension};
use relative_path::{RelativePath, RelativePathBuf};
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("File not found: {0}")]
    NotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid notes directory: {0}")]
    InvalidNotesDir(String),
    #[error("File already exists: {0}")]
    AlreadyExists(PathBuf),
    #[error("No folder is open")]
    NoFolderOpen,
    #[error("No file is open")]
    NoFileOpen,
    #[error("Invalid file name: {0:?}")]
    InvalidFileName(String),
    #[error("Unsaved changes in {0}")]
    UnsavedChanges(RelativePathBuf),
}

/// Read a markdown file and return its content
pub fn read_file(relative_path: &RelativePath, notes_root: &Path) -> Result<String, IoError> {
    let absolute_path = relative_path.to_path(notes_root);
    if !absolute_path.exists() {
        return Err(IoError::NotFound(absolute_path));
    }
    fs::read_to_string(&absolute_path).map_err(IoError::Io)
}

/// Write content to a markdown file, creating parent directories as needed
pub fn write_file(
    relative_path: &RelativePath,
    notes_root: &Path,
    content: &str,
) -> Result<(), IoError> {
    let absolute_path = relative_path.to_path(notes_root);

    if let Some(parent) = absolute_path.parent() {
        fs::create_dir_all(parent).map_err(IoError::Io)?;
    }

    fs::write(&absolute_path, content).map_err(IoError::Io)
}

/// Create a new empty file. Fails if anything already exists at the path.
pub fn create_file(relative_path: &RelativePath, notes_root: &Path) -> Result<PathBuf, IoError> {
    let absolute_path = relative_path.to_path(notes_root);

    if let Some(parent) = absolute_path.parent() {
        fs::create_dir_all(parent).map_err(IoError::Io)?;
    }

    match OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&absolute_path)
    {
        Ok(_) => {
            log::info!("created {}", absolute_path.display());
            Ok(absolute_path)
        }
        Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
            Err(IoError::AlreadyExists(absolute_path))
        }
        Err(e) => Err(IoError::Io(e)),
    }
}

/// Scan for markdown files in the notes directory, skipping hidden entries
pub fn scan_markdown_files(notes_root: &Path) -> Result<Vec<PathBuf>, IoError> {
    let (mut files, _) = scan(notes_root)?;
    files.sort();
    Ok(files)
}

/// Scan for every folder under the notes directory, including empty ones
pub fn scan_folders(notes_root: &Path) -> Result<Vec<PathBuf>, IoError> {
    let (_, mut folders) = scan(notes_root)?;
    folders.sort();
    Ok(folders)
}

/// Build a file tree from the markdown files and folders in the notes directory
pub fn build_file_tree(notes_root: &Path) -> Result<FileTree, IoError> {
    let (files, folders) = scan(notes_root)?;
    log::debug!(
        "scanned {}: {} files, {} folders",
        notes_root.display(),
        files.len(),
        folders.len()
    );
    Ok(FileTree::build(notes_root.to_path_buf(), &files, &folders))
}

/// Rescan `tree`'s root in place, keeping its expansion state
pub fn refresh_file_tree(tree: &mut FileTree) -> Result<(), IoError> {
    let (files, folders) = scan(tree.root_path())?;
    tree.refresh(&files, &folders);
    Ok(())
}

fn scan(notes_root: &Path) -> Result<(Vec<PathBuf>, Vec<PathBuf>), IoError> {
    if !notes_root.exists() {
        return Err(IoError::InvalidNotesDir(
            "notes directory not found".to_string(),
        ));
    }

    let mut files = Vec::new();
    let mut folders = Vec::new();
    scan_directory_recursive(notes_root, &mut files, &mut folders)?;
    Ok((files, folders))
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.starts_with('.'))
}

fn scan_directory_recursive(
    dir: &Path,
    files: &mut Vec<PathBuf>,
    folders: &mut Vec<PathBuf>,
) -> Result<(), IoError> {
    let entries = fs::read_dir(dir).map_err(IoError::Io)?;

    for entry in entries {
        let entry = entry.map_err(IoError::Io)?;
        let path = entry.path();

        if is_hidden(&path) {
            continue;
        }

        if path.is_dir() {
            folders.push(path.clone());
            scan_directory_recursive(&path, files, folders)?;
        } else if let Some(name) = path.file_name().and_then(|name| name.to_str())
            && has_markdown_extension(name)
        {
            files.push(path);
        }
    }

    Ok(())
}

pub fn validate_notes_dir(path: &Path) -> Result<(), IoError> {
    if !path.exists() || !path.is_dir() {
        return Err(IoError::InvalidNotesDir(
            "Directory does not exist".to_string(),
        ));
    }

    Ok(())
}
