//! Chapter and annex heading predicates.
//!
//! Every heading is a named pattern that can either be tested (`is_match`) or
//! located (`find`). Matching is case-insensitive and tolerant of spacing
//! between the numeral and the title. Numerals are matched as whole tokens so
//! "ANEXO II" never fires on "ANEXO III" and "V." never fires inside "IV.".

use std::sync::LazyLock;

use oae_core::SectionLabel;
use regex::Regex;

#[derive(Debug)]
pub struct Heading {
    name: &'static str,
    regex: Regex,
}

impl Heading {
    fn new(name: &'static str, pattern: &str) -> Self {
        let regex = Regex::new(&format!("(?i){pattern}")).unwrap();
        Self { name, regex }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }

    /// Byte offset where the first match starts.
    pub fn find(&self, text: &str) -> Option<usize> {
        self.regex.find(text).map(|m| m.start())
    }
}

pub static CONCLUSION_START: LazyLock<Heading> =
    LazyLock::new(|| Heading::new("conclusion-start", r"\bIV\.\s*CONCLUS[ÃA]O"));

pub static CONCLUSION_END: LazyLock<Heading> = LazyLock::new(|| {
    Heading::new("conclusion-end", r"\bV\.\s*A[ÇC][ÕO]ES\s*RECONSTITUIDORAS")
});

static ANOMALIES: LazyLock<Heading> =
    LazyLock::new(|| Heading::new("anomalies-chapter", r"\b3\.\s*ANOMALIAS\s*CONSTATADAS"));
static TESTS: LazyLock<Heading> = LazyLock::new(|| Heading::new("tests-chapter", r"\b4\.\s*ENSAIOS"));
static ANNEX_II: LazyLock<Heading> = LazyLock::new(|| Heading::new("annex-II", r"\bANEXO\s*II\b"));
static ANNEX_III: LazyLock<Heading> = LazyLock::new(|| Heading::new("annex-III", r"\bANEXO\s*III\b"));
static ANNEX_IV: LazyLock<Heading> = LazyLock::new(|| Heading::new("annex-IV", r"\bANEXO\s*IV\b"));
static ANNEX_VII: LazyLock<Heading> = LazyLock::new(|| Heading::new("annex-VII", r"\bANEXO\s*VII\b"));

/// Heading that opens the given audit section.
pub fn audit_heading(label: SectionLabel) -> &'static Heading {
    match label {
        SectionLabel::Anomalies => &ANOMALIES,
        SectionLabel::Tests => &TESTS,
        SectionLabel::AnnexII => &ANNEX_II,
        SectionLabel::AnnexIII => &ANNEX_III,
        SectionLabel::AnnexIV => &ANNEX_IV,
        SectionLabel::AnnexVII => &ANNEX_VII,
    }
}

/// First audit section (in [`SectionLabel::PRIORITY`] order) whose heading appears on the page.
///
/// Position within the page is irrelevant: priority alone decides.
pub fn classify_page(text: &str) -> Option<SectionLabel> {
    SectionLabel::PRIORITY
        .into_iter()
        .find(|label| audit_heading(*label).is_match(text))
}
