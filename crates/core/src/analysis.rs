use std::fmt;

use serde::{Deserialize, Serialize};

/// How the engineer's grading compares with the reference standard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClassificationStatus {
    #[serde(rename = "Menos Criteriosa")]
    LessStrict,
    #[serde(rename = "Mais Criteriosa")]
    MoreStrict,
    #[serde(rename = "Compatível")]
    Compatible,
    #[serde(rename = "Desconhecido")]
    Unknown,
}

impl ClassificationStatus {
    /// Map the model's wire code. Unrecognised codes count as compatible.
    pub fn from_code(code: &str) -> Self {
        match code.trim() {
            "LESS_STRICT" => Self::LessStrict,
            "MORE_STRICT" => Self::MoreStrict,
            "COMPATIBLE" => Self::Compatible,
            _ => Self::Compatible,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::LessStrict => "Menos Criteriosa",
            Self::MoreStrict => "Mais Criteriosa",
            Self::Compatible => "Compatível",
            Self::Unknown => "Desconhecido",
        }
    }
}

impl fmt::Display for ClassificationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Conclusion ("therapy") analysis of one report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub id: String,
    pub file_name: String,
    pub work_name: String,
    pub km: String,
    pub sentido: String,
    pub structural: String,
    pub structural_motivation: String,
    pub functional: String,
    pub functional_motivation: String,
    pub durability: String,
    pub durability_motivation: String,
    pub summary: String,
    pub points_of_attention: Vec<String>,
    pub compliance_status: ClassificationStatus,
    pub compliance_reasoning: String,
    pub processing_time_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditItem {
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Literal text found in chapter 3.
    pub found_in_cap3: String,
    #[serde(rename = "foundInAnnexVII")]
    pub found_in_annex_vii: bool,
    #[serde(rename = "foundInAnnexII")]
    pub found_in_annex_ii: bool,
    #[serde(default)]
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditCategory {
    pub name: String,
    pub items: Vec<AuditItem>,
}

/// Consistency audit between chapter 3 and the quantitative annexes of one report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsistencyAuditResult {
    pub id: String,
    pub file_name: String,
    pub work_name: String,
    pub km: String,
    pub sentido: String,
    pub categories: Vec<AuditCategory>,
    pub critical_inconsistencies: Vec<String>,
    pub recommendations: Vec<String>,
    pub processing_time_ms: u64,
}

/// Results that carry a measured processing time.
pub trait Timed {
    fn set_processing_time_ms(&mut self, ms: u64);
}

impl Timed for AnalysisResult {
    fn set_processing_time_ms(&mut self, ms: u64) {
        self.processing_time_ms = ms;
    }
}

impl Timed for ConsistencyAuditResult {
    fn set_processing_time_ms(&mut self, ms: u64) {
        self.processing_time_ms = ms;
    }
}
