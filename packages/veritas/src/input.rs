//! User-supplied content awaiting analysis.

use bytes::Bytes;
use std::path::PathBuf;

const FALLBACK_MIME_TYPE: &str = "application/octet-stream";

/// Where an attachment's bytes come from.
#[derive(Debug, Clone)]
pub enum AttachmentSource {
    /// Bytes already in memory
    Bytes(Bytes),

    /// A file read at encode time
    Path(PathBuf),

    /// A `data:<mime>;base64,<payload>` URL, as produced by browser file readers
    DataUrl(String),
}

/// A binary attachment (usually an image) submitted with the content.
#[derive(Debug, Clone)]
pub struct Attachment {
    pub mime_type: String,
    pub display_name: String,
    pub source: AttachmentSource,
}

impl Attachment {
    pub fn from_bytes(
        display_name: impl Into<String>,
        mime_type: impl Into<String>,
        bytes: impl Into<Bytes>,
    ) -> Self {
        Self {
            mime_type: mime_type.into(),
            display_name: display_name.into(),
            source: AttachmentSource::Bytes(bytes.into()),
        }
    }

    /// Reference a file on disk. The MIME type is guessed from the extension.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let mime_type = mime_guess::from_path(&path)
            .first_raw()
            .unwrap_or(FALLBACK_MIME_TYPE)
            .to_string();
        let display_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        Self {
            mime_type,
            display_name,
            source: AttachmentSource::Path(path),
        }
    }

    /// Wrap a data URL. The MIME type is taken from its header when present.
    pub fn from_data_url(display_name: impl Into<String>, data_url: impl Into<String>) -> Self {
        let data_url = data_url.into();
        let mime_type = data_url
            .strip_prefix("data:")
            .and_then(|rest| rest.split(|c: char| c == ';' || c == ',').next())
            .filter(|m| !m.is_empty())
            .unwrap_or(FALLBACK_MIME_TYPE)
            .to_string();

        Self {
            mime_type,
            display_name: display_name.into(),
            source: AttachmentSource::DataUrl(data_url),
        }
    }

    /// Override the MIME type.
    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = mime_type.into();
        self
    }
}

/// True iff there is something worth sending to the provider.
pub fn has_content(text: &str, url: &str, files: &[Attachment]) -> bool {
    !text.trim().is_empty() || !url.trim().is_empty() || !files.is_empty()
}

/// Text, URL and attachments entered by the user.
///
/// No validation happens here: malformed URLs and unsupported file types are
/// passed through for the provider to reject.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    pub text: String,
    pub url: String,
    pub files: Vec<Attachment>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    pub fn with_file(mut self, file: Attachment) -> Self {
        self.files.push(file);
        self
    }

    pub fn has_content(&self) -> bool {
        has_content(&self.text, &self.url, &self.files)
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn set_url(&mut self, url: impl Into<String>) {
        self.url = url.into();
    }

    /// Append files, preserving order.
    pub fn add_files(&mut self, files: impl IntoIterator<Item = Attachment>) {
        self.files.extend(files);
    }

    /// Replace the whole selection (what a file picker does).
    pub fn replace_files(&mut self, files: impl IntoIterator<Item = Attachment>) {
        self.files = files.into_iter().collect();
    }

    /// Remove the file at `index`; later files shift down by one.
    pub fn remove_file(&mut self, index: usize) -> Option<Attachment> {
        if index < self.files.len() {
            Some(self.files.remove(index))
        } else {
            None
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
