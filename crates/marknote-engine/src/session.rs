//! Editing session state without any widgets.
//!
//! A [`Session`] owns the open notes folder, the file being edited, its text
//! and the live [`Preview`]. Front ends drive it with user actions and read
//! back the tree rows, preview blocks and window title.

use std::path::Path;
use std::sync::Arc;

use relative_path::{RelativePath, RelativePathBuf};

use crate::io::{self, IoError};
use crate::models::{FileTree, MarkdownFile, normalize_note_name};
use crate::parsing::{ParseOptions, ParsedDoc};
use crate::preview::Preview;

const APP_NAME: &str = "Marknote";

#[derive(Debug, Default)]
pub struct Session {
    tree: Option<FileTree>,
    current_file: Option<MarkdownFile>,
    content: String,
    modified: bool,
    preview: Preview,
}

impl Session {
    pub fn new(options: ParseOptions) -> Self {
        Self {
            preview: Preview::new(options),
            ..Self::default()
        }
    }

    /// Opens `path` as the notes root. Any open file is closed without saving.
    pub fn open_folder(&mut self, path: &Path) -> Result<(), IoError> {
        io::validate_notes_dir(path)?;
        let tree = io::build_file_tree(path)?;
        log::info!("opened notes folder {}", path.display());

        self.tree = Some(tree);
        self.current_file = None;
        self.content.clear();
        self.modified = false;
        self.preview.clear();
        Ok(())
    }

    pub fn notes_root(&self) -> Option<&Path> {
        self.tree.as_ref().map(FileTree::root_path)
    }

    pub fn file_tree(&self) -> Option<&FileTree> {
        self.tree.as_ref()
    }

    pub fn file_tree_mut(&mut self) -> Option<&mut FileTree> {
        self.tree.as_mut()
    }

    pub fn current_file(&self) -> Option<&MarkdownFile> {
        self.current_file.as_ref()
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn is_modified(&self) -> bool {
        self.modified
    }

    /// Reads `relative_path` into the session. The result is not marked
    /// modified.
    ///
    /// Fails with [`IoError::UnsavedChanges`] while the open file has unsaved
    /// edits, and puts the tree selection back on that file. Call
    /// [`Session::save`] or [`Session::discard_changes`] first.
    pub fn load_file(&mut self, relative_path: &RelativePath) -> Result<(), IoError> {
        if let Err(e) = self.check_saved() {
            if let (Some(tree), Some(file)) = (self.tree.as_mut(), &self.current_file) {
                tree.select(file.relative_path());
            }
            return Err(e);
        }
        let root = self.notes_root().ok_or(IoError::NoFolderOpen)?;
        let content = io::read_file(relative_path, root)?;

        self.current_file = Some(MarkdownFile::new(relative_path.to_relative_path_buf()));
        self.content = content;
        self.modified = false;
        self.preview.update(&self.content);
        if let Some(tree) = self.tree.as_mut() {
            tree.select(relative_path);
        }
        Ok(())
    }

    /// Drops unsaved edits by rereading the open file from disk.
    pub fn discard_changes(&mut self) -> Result<(), IoError> {
        let Some(file) = self.current_file.clone() else {
            return Ok(());
        };
        if self.modified {
            log::info!("discarding unsaved changes to {}", file.relative_path());
        }
        self.modified = false;
        self.load_file(file.relative_path())
    }

    fn check_saved(&self) -> Result<(), IoError> {
        match &self.current_file {
            Some(file) if self.modified => Err(IoError::UnsavedChanges(
                file.relative_path().to_relative_path_buf(),
            )),
            _ => Ok(()),
        }
    }

    /// Replaces the text as a user edit and reparses the preview.
    pub fn set_content(&mut self, text: impl Into<String>) {
        self.content = text.into();
        self.modified = true;
        self.preview.update(&self.content);
    }

    pub fn save(&mut self) -> Result<(), IoError> {
        let file = self.current_file.as_ref().ok_or(IoError::NoFileOpen)?;
        let root = self.notes_root().ok_or(IoError::NoFolderOpen)?;
        io::write_file(file.relative_path(), root, &self.content)?;
        log::info!("saved {}", file.relative_path());
        self.modified = false;
        Ok(())
    }

    /// Folder that new files go into: the selected folder, the folder of the
    /// selected file, or the root. `None` when no folder is open.
    pub fn target_dir(&self) -> Option<RelativePathBuf> {
        let tree = self.tree.as_ref()?;
        let Some(selected) = tree.selected() else {
            return Some(RelativePathBuf::new());
        };
        if tree.is_folder(selected) {
            return Some(selected.to_relative_path_buf());
        }
        Some(
            selected
                .parent()
                .map(RelativePath::to_relative_path_buf)
                .unwrap_or_default(),
        )
    }

    /// Creates an empty note called `name` in [`Session::target_dir`] and
    /// opens it. `.md` is appended unless the name already ends with it.
    /// Nothing is created while the open file has unsaved edits.
    pub fn create_file(&mut self, name: &str) -> Result<RelativePathBuf, IoError> {
        let dir = self.target_dir().ok_or(IoError::NoFolderOpen)?;
        self.check_saved()?;
        let file_name = normalize_note_name(name)
            .filter(|n| !n.contains(['/', '\\']))
            .ok_or_else(|| IoError::InvalidFileName(name.to_string()))?;
        let relative_path = dir.join(&file_name);

        if let Some(tree) = self.tree.as_mut() {
            io::create_file(&relative_path, tree.root_path())?;
            io::refresh_file_tree(tree)?;
        }
        self.load_file(&relative_path)?;
        Ok(relative_path)
    }

    /// Rescans the folder and rereads the open file unless it has unsaved
    /// edits.
    pub fn reload(&mut self) -> Result<(), IoError> {
        let Some(tree) = self.tree.as_mut() else {
            return Err(IoError::NoFolderOpen);
        };
        io::refresh_file_tree(tree)?;

        let Some(file) = self.current_file.clone() else {
            return Ok(());
        };
        if self.modified {
            log::warn!(
                "not reloading {}: unsaved changes",
                file.relative_path()
            );
            return Ok(());
        }
        self.load_file(file.relative_path())
    }

    pub fn title(&self) -> String {
        let Some(file) = &self.current_file else {
            return match self.notes_root().and_then(Path::file_name) {
                Some(folder) => format!("{APP_NAME} — {}", folder.to_string_lossy()),
                None => APP_NAME.to_string(),
            };
        };
        let name = file.relative_path().file_name().unwrap_or_default();
        if self.modified {
            format!("{APP_NAME} — {name} *")
        } else {
            format!("{APP_NAME} — {name}")
        }
    }

    pub fn preview(&self) -> Arc<ParsedDoc> {
        self.preview.current()
    }

    pub fn parse_options(&self) -> &ParseOptions {
        self.preview.options()
    }

    /// Switches parser options and reparses the current text.
    pub fn set_parse_options(&mut self, options: ParseOptions) {
        self.preview.set_options(options);
        self.preview.update(&self.content);
    }
}
