use std::fmt;

use serde::{Deserialize, Serialize};

/// Front-matter fields detected on the first pages of a report.
///
/// Each field is empty until a page matches, and is never overwritten afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataCandidates {
    #[serde(rename = "workNameCandidate")]
    pub work_name: String,
    #[serde(rename = "kmCandidate")]
    pub km: String,
    #[serde(rename = "sentidoCandidate")]
    pub sentido: String,
}

impl MetadataCandidates {
    /// Fill every still-empty field from `other`.
    pub fn merge_missing(&mut self, other: MetadataCandidates) {
        if self.work_name.is_empty() && !other.work_name.is_empty() {
            self.work_name = other.work_name;
        }
        if self.km.is_empty() && !other.km.is_empty() {
            self.km = other.km;
        }
        if self.sentido.is_empty() && !other.sentido.is_empty() {
            self.sentido = other.sentido;
        }
    }

    pub fn is_complete(&self) -> bool {
        !self.work_name.is_empty() && !self.km.is_empty() && !self.sentido.is_empty()
    }
}

/// Output of a conclusion-mode scan.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConclusionExtraction {
    /// Trimmed conclusion chapter text; empty when the chapter heading never appeared.
    pub text: String,
    #[serde(flatten)]
    pub metadata: MetadataCandidates,
}

impl ConclusionExtraction {
    pub fn is_found(&self) -> bool {
        !self.text.is_empty()
    }
}

// ── Audit sections ────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SectionLabel {
    /// Chapter 3, "ANOMALIAS CONSTATADAS".
    Anomalies,
    /// Chapter 4, "ENSAIOS".
    Tests,
    AnnexII,
    AnnexIII,
    AnnexIV,
    AnnexVII,
}

impl SectionLabel {
    /// Heading detection order. The first label whose heading matches a page wins.
    pub const PRIORITY: [SectionLabel; 6] = [
        SectionLabel::Anomalies,
        SectionLabel::Tests,
        SectionLabel::AnnexII,
        SectionLabel::AnnexIII,
        SectionLabel::AnnexIV,
        SectionLabel::AnnexVII,
    ];

    /// Key used in serialized section maps.
    pub fn key(&self) -> &'static str {
        match self {
            SectionLabel::Anomalies => "cap3",
            SectionLabel::Tests => "cap4",
            SectionLabel::AnnexII => "annexII",
            SectionLabel::AnnexIII => "annexIII",
            SectionLabel::AnnexIV => "annexIV",
            SectionLabel::AnnexVII => "annexVII",
        }
    }
}

impl fmt::Display for SectionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Output of an audit-mode scan: one text per [`SectionLabel`], always all six.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditSections {
    pub file_name: String,
    pub cap3: String,
    pub cap4: String,
    #[serde(rename = "annexII")]
    pub annex_ii: String,
    #[serde(rename = "annexIII")]
    pub annex_iii: String,
    #[serde(rename = "annexIV")]
    pub annex_iv: String,
    #[serde(rename = "annexVII")]
    pub annex_vii: String,
    #[serde(flatten)]
    pub metadata: MetadataCandidates,
}

impl AuditSections {
    pub fn new(file_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            ..Default::default()
        }
    }

    pub fn section(&self, label: SectionLabel) -> &str {
        match label {
            SectionLabel::Anomalies => &self.cap3,
            SectionLabel::Tests => &self.cap4,
            SectionLabel::AnnexII => &self.annex_ii,
            SectionLabel::AnnexIII => &self.annex_iii,
            SectionLabel::AnnexIV => &self.annex_iv,
            SectionLabel::AnnexVII => &self.annex_vii,
        }
    }

    pub fn section_mut(&mut self, label: SectionLabel) -> &mut String {
        match label {
            SectionLabel::Anomalies => &mut self.cap3,
            SectionLabel::Tests => &mut self.cap4,
            SectionLabel::AnnexII => &mut self.annex_ii,
            SectionLabel::AnnexIII => &mut self.annex_iii,
            SectionLabel::AnnexIV => &mut self.annex_iv,
            SectionLabel::AnnexVII => &mut self.annex_vii,
        }
    }

    /// Labels whose accumulated text is non-empty, in priority order.
    pub fn populated(&self) -> Vec<SectionLabel> {
        SectionLabel::PRIORITY
            .into_iter()
            .filter(|l| !self.section(*l).is_empty())
            .collect()
    }
}
