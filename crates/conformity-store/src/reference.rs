//! Reference-document store backed by a directory of `.txt` and `.pdf` files.

use std::path::{Component, Path, PathBuf};

use tracing::{debug, info};

use crate::StoreError;

/// Formats the loader understands, keyed by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Text,
    Pdf,
}

impl DocumentFormat {
    /// Detect the format from a file name's extension (case-insensitive).
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "txt" => Some(Self::Text),
            "pdf" => Some(Self::Pdf),
            _ => None,
        }
    }
}

/// Reference documents addressable by bare file name.
///
/// Every name is resolved beneath a single root directory. Names that carry a
/// directory component, `..`, or an absolute path are treated as missing so a
/// request can never read outside the root. Extracted text is not cached.
#[derive(Debug, Clone)]
pub struct ReferenceStore {
    root: PathBuf,
}

impl ReferenceStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Heuristic used by the compliance endpoint: does `text` name a document
    /// rather than carry the document itself?
    ///
    /// A filename is a single whitespace-free token ending in `.txt` or `.pdf`.
    pub fn looks_like_filename(text: &str) -> bool {
        let text = text.trim();
        !text.is_empty()
            && !text.chars().any(char::is_whitespace)
            && DocumentFormat::from_path(Path::new(text)).is_some()
    }

    /// Resolve `filename` to a path inside the root, checking format and existence.
    pub fn resolve(&self, filename: &str) -> Result<(PathBuf, DocumentFormat), StoreError> {
        let name = Path::new(filename.trim());
        let mut components = name.components();
        let single = matches!(
            (components.next(), components.next()),
            (Some(Component::Normal(_)), None)
        );
        if !single {
            return Err(StoreError::DocumentNotFound(filename.to_string()));
        }

        let format = DocumentFormat::from_path(name)
            .ok_or_else(|| StoreError::UnsupportedExtension(filename.to_string()))?;

        let path = self.root.join(name);
        if !path.is_file() {
            return Err(StoreError::DocumentNotFound(filename.to_string()));
        }
        Ok((path, format))
    }

    /// Load a reference document's text.
    ///
    /// `.txt` files are read as UTF-8. `.pdf` files have each page's text
    /// extracted and joined with newlines.
    pub fn load(&self, filename: &str) -> Result<String, StoreError> {
        let (path, format) = self.resolve(filename)?;
        debug!(path = %path.display(), ?format, "loading reference document");

        let text = match format {
            DocumentFormat::Text => std::fs::read_to_string(&path)?,
            DocumentFormat::Pdf => {
                let pages = pdf_extract::extract_text_by_pages(&path).map_err(|e| {
                    StoreError::PdfExtract {
                        path: path.clone(),
                        message: e.to_string(),
                    }
                })?;
                pages.join("\n")
            }
        };

        info!(file = filename, chars = text.len(), "loaded reference document");
        Ok(text)
    }
}
