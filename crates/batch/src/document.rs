use std::path::Path;

/// A submitted document: display name plus raw bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputDocument {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl InputDocument {
    pub fn new(file_name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes: bytes.into(),
        }
    }

    /// Read a document from disk; the file name is the last path component.
    pub async fn from_path(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Ok(Self { file_name, bytes })
    }
}
