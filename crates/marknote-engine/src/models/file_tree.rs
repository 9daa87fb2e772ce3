use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use relative_path::{RelativePath, RelativePathBuf};

#[derive(Debug, Clone, PartialEq)]
struct FileTreeNode {
    name: String,
    path: RelativePathBuf,
    is_folder: bool,
    children: BTreeMap<String, FileTreeNode>,
}

impl FileTreeNode {
    fn new(name: &str, path: RelativePathBuf, is_folder: bool) -> Self {
        Self {
            name: name.to_string(),
            path,
            is_folder,
            children: BTreeMap::new(),
        }
    }

    fn root() -> Self {
        Self::new("", RelativePathBuf::new(), true)
    }

    fn insert(&mut self, parts: &[&str], is_folder: bool) {
        let Some((first, rest)) = parts.split_first() else {
            return;
        };
        let path = self.path.join(first);

        if rest.is_empty() {
            self.children
                .entry(first.to_string())
                .or_insert_with(|| FileTreeNode::new(first, path, is_folder));
        } else {
            // Intermediate components are always folders
            self.children
                .entry(first.to_string())
                .or_insert_with(|| FileTreeNode::new(first, path, true))
                .insert(rest, is_folder);
        }
    }

    fn find(&self, parts: &[&str]) -> Option<&FileTreeNode> {
        match parts.split_first() {
            None => Some(self),
            Some((first, rest)) => self.children.get(*first)?.find(rest),
        }
    }

    /// Children sorted folders first, then by case-insensitive name.
    fn sorted_children(&self) -> Vec<&FileTreeNode> {
        let mut children: Vec<_> = self.children.values().collect();
        children.sort_by(|a, b| {
            b.is_folder
                .cmp(&a.is_folder)
                .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
        });
        children
    }
}

fn split(path: &RelativePath) -> Vec<&str> {
    path.as_str().split('/').filter(|s| !s.is_empty()).collect()
}

/// One visible row of the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileTreeItem {
    pub path: RelativePathBuf,
    pub name: String,
    pub is_folder: bool,
    pub is_expanded: bool,
    pub depth: usize,
}

/// Folder and note hierarchy under a notes root.
///
/// Expansion is an explicit path-to-flag map plus one selected path. The flat
/// list of visible rows is rebuilt after every change to either.
#[derive(Debug, Clone, PartialEq)]
pub struct FileTree {
    root_path: PathBuf,
    root: FileTreeNode,
    expanded: BTreeMap<RelativePathBuf, bool>,
    selected: Option<RelativePathBuf>,
    items: Vec<FileTreeItem>,
}

impl FileTree {
    pub fn new(root_path: PathBuf) -> Self {
        Self {
            root_path,
            root: FileTreeNode::root(),
            expanded: BTreeMap::new(),
            selected: None,
            items: Vec::new(),
        }
    }

    /// Builds the tree from absolute file and folder paths under `root_path`.
    /// Paths outside the root are ignored.
    pub fn build(root_path: PathBuf, files: &[PathBuf], folders: &[PathBuf]) -> Self {
        let mut tree = Self::new(root_path);
        tree.fill(files, folders);
        tree.rebuild();
        tree
    }

    fn fill(&mut self, files: &[PathBuf], folders: &[PathBuf]) {
        self.root = FileTreeNode::root();
        let entries = folders
            .iter()
            .map(|p| (p, true))
            .chain(files.iter().map(|p| (p, false)));

        for (path, is_folder) in entries {
            let Some(relative) = self.relative(path) else {
                continue;
            };
            self.root.insert(&split(&relative), is_folder);
        }
    }

    fn relative(&self, path: &Path) -> Option<RelativePathBuf> {
        let stripped = path.strip_prefix(&self.root_path).ok()?;
        RelativePathBuf::from_path(stripped).ok()
    }

    /// Rescans with new contents while keeping expansion state. The selection
    /// is kept if its path still exists.
    pub fn refresh(&mut self, files: &[PathBuf], folders: &[PathBuf]) {
        self.fill(files, folders);
        if self.selected.as_deref().is_some_and(|p| !self.contains(p)) {
            self.selected = None;
        }
        self.rebuild();
    }

    /// Clears expansion and selection.
    pub fn reset(&mut self) {
        self.expanded.clear();
        self.selected = None;
        self.rebuild();
    }

    pub fn root_path(&self) -> &Path {
        &self.root_path
    }

    /// The visible rows, in display order.
    pub fn items(&self) -> &[FileTreeItem] {
        &self.items
    }

    pub fn selected(&self) -> Option<&RelativePath> {
        self.selected.as_deref()
    }

    /// Index of the selected row, if it is visible.
    pub fn selected_index(&self) -> Option<usize> {
        let selected = self.selected.as_deref()?;
        self.items
            .iter()
            .position(|item| item.path.as_relative_path() == selected)
    }

    pub fn contains(&self, path: &RelativePath) -> bool {
        self.root.find(&split(path)).is_some()
    }

    pub fn is_folder(&self, path: &RelativePath) -> bool {
        self.root.find(&split(path)).is_some_and(|node| node.is_folder)
    }

    pub fn is_expanded(&self, path: &RelativePath) -> bool {
        self.expanded.get(path).copied().unwrap_or(false)
    }

    pub fn toggle_folder(&mut self, path: &RelativePath) {
        let expanded = !self.is_expanded(path);
        self.set_expanded(path, expanded);
    }

    pub fn expand_folder(&mut self, path: &RelativePath) {
        self.set_expanded(path, true);
    }

    pub fn collapse_folder(&mut self, path: &RelativePath) {
        self.set_expanded(path, false);
    }

    fn set_expanded(&mut self, path: &RelativePath, expanded: bool) {
        if !self.is_folder(path) {
            return;
        }
        self.expanded.insert(path.to_relative_path_buf(), expanded);
        self.rebuild();
    }

    /// Selects `path` and expands its ancestors so the row is visible.
    pub fn select(&mut self, path: &RelativePath) {
        let mut parent = path.parent();
        while let Some(folder) = parent {
            if !folder.as_str().is_empty() {
                self.expanded.insert(folder.to_relative_path_buf(), true);
            }
            parent = folder.parent();
        }
        self.selected = Some(path.to_relative_path_buf());
        self.rebuild();
    }

    /// Selects the visible row at `index`, if any.
    pub fn select_index(&mut self, index: usize) {
        if let Some(item) = self.items.get(index) {
            self.selected = Some(item.path.clone());
        }
    }

    pub fn select_next(&mut self) {
        if self.items.is_empty() {
            return;
        }
        let next = match self.selected_index() {
            Some(i) => (i + 1) % self.items.len(),
            None => 0,
        };
        self.select_index(next);
    }

    pub fn select_previous(&mut self) {
        if self.items.is_empty() {
            return;
        }
        let previous = match self.selected_index() {
            Some(0) | None => self.items.len() - 1,
            Some(i) => i - 1,
        };
        self.select_index(previous);
    }

    fn rebuild(&mut self) {
        let mut items = Vec::new();
        self.collect(&self.root, 0, &mut items);
        self.items = items;
    }

    fn collect(&self, node: &FileTreeNode, depth: usize, items: &mut Vec<FileTreeItem>) {
        for child in node.sorted_children() {
            let is_expanded = child.is_folder && self.is_expanded(&child.path);
            items.push(FileTreeItem {
                path: child.path.clone(),
                name: child.name.clone(),
                is_folder: child.is_folder,
                is_expanded,
                depth,
            });
            if is_expanded {
                self.collect(child, depth + 1, items);
            }
        }
    }
}
