use relative_path::{RelativePath, RelativePathBuf};

const MARKDOWN_EXTENSION: &str = "md";

/// True when `name` ends in `.md`, ignoring case.
pub fn has_markdown_extension(name: &str) -> bool {
    name.rsplit_once('.')
        .is_some_and(|(stem, ext)| !stem.is_empty() && ext.eq_ignore_ascii_case(MARKDOWN_EXTENSION))
}

/// `name` with any `.md` suffix removed, ignoring case.
pub fn strip_markdown_extension(name: &str) -> &str {
    if has_markdown_extension(name) {
        &name[..name.len() - MARKDOWN_EXTENSION.len() - 1]
    } else {
        name
    }
}

/// Turns user input into a note file name: trimmed, with `.md` appended
/// unless already present.
///
/// Returns `None` for blank input and for hidden names such as `.md`, which
/// folder scans never list.
pub fn normalize_note_name(input: &str) -> Option<String> {
    let name = input.trim();
    if name.is_empty() || name.starts_with('.') {
        return None;
    }
    if has_markdown_extension(name) {
        Some(name.to_string())
    } else {
        Some(format!("{name}.{MARKDOWN_EXTENSION}"))
    }
}

/// A note file addressed relative to the notes root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkdownFile {
    relative_path: RelativePathBuf,
    display_name: String,
}

impl MarkdownFile {
    pub fn new(relative_path: RelativePathBuf) -> Self {
        let display_name = relative_path
            .file_name()
            .map(strip_markdown_extension)
            .unwrap_or("Untitled")
            .to_string();

        Self {
            relative_path,
            display_name,
        }
    }

    pub fn relative_path(&self) -> &RelativePath {
        &self.relative_path
    }

    /// File name without the `.md` extension, as shown in titles.
    pub fn display_name(&self) -> &str {
        &self.display_name
    }
}

impl From<RelativePathBuf> for MarkdownFile {
    fn from(path: RelativePathBuf) -> Self {
        Self::new(path)
    }
}
