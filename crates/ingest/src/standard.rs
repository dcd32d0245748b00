use crate::document::{ExtractionError, PageTextProvider};

/// Used as comparison context when no reference standard was supplied.
pub const DEFAULT_STANDARD_PLACEHOLDER: &str = "Nenhuma norma de referência foi fornecida. \
Avalie as notas estrutural, funcional e de durabilidade segundo os critérios gerais de \
inspeção de Obras de Arte Especiais (OAE) adotados pela ARTESP.";

/// Reference standard text passed to conclusion analysis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceStandard {
    /// Source file name, `None` for the built-in placeholder.
    pub name: Option<String>,
    pub text: String,
}

impl ReferenceStandard {
    pub fn placeholder() -> Self {
        Self {
            name: None,
            text: DEFAULT_STANDARD_PLACEHOLDER.to_string(),
        }
    }

    /// Build from page texts: every page, in order, each followed by a newline.
    pub fn from_pages<I, S>(name: impl Into<String>, pages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut text = String::new();
        for page in pages {
            text.push_str(page.as_ref());
            text.push('\n');
        }
        Self {
            name: Some(name.into()),
            text,
        }
    }

    /// Decode a standard document with the given provider.
    pub async fn load(
        provider: &dyn PageTextProvider,
        file_name: &str,
        bytes: &[u8],
    ) -> Result<Self, ExtractionError> {
        let pages = provider.page_texts(file_name, bytes).await?;
        tracing::info!(file = %file_name, pages = pages.len(), "reference standard loaded");
        Ok(Self::from_pages(file_name, pages))
    }

    pub fn is_placeholder(&self) -> bool {
        self.name.is_none()
    }
}

impl Default for ReferenceStandard {
    fn default() -> Self {
        Self::placeholder()
    }
}
