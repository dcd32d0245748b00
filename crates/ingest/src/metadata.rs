use std::sync::LazyLock;

use oae_core::MetadataCandidates;
use regex::Regex;

/// Front matter is assumed to fit in the first three pages.
pub const FRONT_MATTER_PAGES: usize = 3;

static WORK_NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:Trecho|Obra|Local):\s*(.*?)(?:\n|km|$)").unwrap()
});

// "km 013+600 – Transversal": chainage, then a hyphen/en-dash/em-dash, then the direction.
static KM_SENTIDO_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)km\s*(\d+\s*\+\s*\d+)\s*[-–—]\s*(.*)").unwrap()
});

/// Pull work name, chainage and direction candidates out of one page.
///
/// Only the first match of each pattern is considered. Missing fields are empty.
pub fn extract_metadata(page_text: &str) -> MetadataCandidates {
    let work_name = WORK_NAME_RE
        .captures(page_text)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim().to_string())
        .unwrap_or_default();

    let (km, sentido) = match KM_SENTIDO_RE.captures(page_text) {
        Some(caps) => (
            format!("km {}", caps.get(1).map_or("", |m| m.as_str().trim())),
            caps.get(2).map_or("", |m| m.as_str().trim()).to_string(),
        ),
        None => (String::new(), String::new()),
    };

    MetadataCandidates {
        work_name,
        km,
        sentido,
    }
}

/// First-match-wins accumulator over the front-matter pages of one document.
#[derive(Debug, Default)]
pub struct MetadataCollector {
    candidates: MetadataCandidates,
}

impl MetadataCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a page (1-based number). Pages past the front matter are ignored.
    pub fn observe(&mut self, page_number: usize, page_text: &str) {
        if page_number == 0 || page_number > FRONT_MATTER_PAGES || self.candidates.is_complete() {
            return;
        }
        self.candidates.merge_missing(extract_metadata(page_text));
    }

    pub fn candidates(&self) -> &MetadataCandidates {
        &self.candidates
    }

    pub fn into_candidates(self) -> MetadataCandidates {
        self.candidates
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_all_fields_from_cover_line() {
        let meta = extract_metadata("Trecho: Rodovia SP-280 km 013+600 – Transversal");
        assert_eq!(meta.work_name, "Rodovia SP-280");
        assert_eq!(meta.km, "km 013+600");
        assert_eq!(meta.sentido, "Transversal");
    }

    #[test]
    fn work_name_stops_at_line_break() {
        let meta = extract_metadata("OBRA:   Viaduto do Córrego Fundo  \nOutro dado");
        assert_eq!(meta.work_name, "Viaduto do Córrego Fundo");
    }

    #[test]
    fn work_name_runs_to_end_of_input() {
        let meta = extract_metadata("local: Passagem Inferior PI-02");
        assert_eq!(meta.work_name, "Passagem Inferior PI-02");
    }

    #[test]
    fn chainage_tolerates_spacing_and_dash_variants() {
        let meta = extract_metadata("KM 13 + 600 - Norte");
        assert_eq!(meta.km, "km 13 + 600");
        assert_eq!(meta.sentido, "Norte");

        let meta = extract_metadata("km 102+050—Pista Sul\nmais texto");
        assert_eq!(meta.km, "km 102+050");
        assert_eq!(meta.sentido, "Pista Sul");
    }

    #[test]
    fn only_first_chainage_counts() {
        let meta = extract_metadata("km 1+000 - Leste\nkm 2+000 - Oeste");
        assert_eq!(meta.km, "km 1+000");
        assert_eq!(meta.sentido, "Leste");
    }

    #[test]
    fn no_match_yields_empty_fields() {
        let meta = extract_metadata("Relatório de inspeção rotineira");
        assert_eq!(meta, MetadataCandidates::default());
    }

    #[test]
    fn chainage_without_separator_is_ignored() {
        let meta = extract_metadata("km 013+600 Transversal");
        assert!(meta.km.is_empty());
        assert!(meta.sentido.is_empty());
    }

    #[test]
    fn collector_keeps_first_match_per_field() {
        let mut collector = MetadataCollector::new();
        collector.observe(1, "Obra: Ponte A");
        collector.observe(2, "Obra: Ponte B\nkm 5+100 - Capital");
        collector.observe(3, "km 9+900 - Interior");
        let meta = collector.into_candidates();
        assert_eq!(meta.work_name, "Ponte A");
        assert_eq!(meta.km, "km 5+100");
        assert_eq!(meta.sentido, "Capital");
    }

    #[test]
    fn collector_ignores_pages_after_front_matter() {
        let mut collector = MetadataCollector::new();
        collector.observe(4, "Obra: Ponte tardia\nkm 1+000 - Sul");
        assert_eq!(collector.candidates(), &MetadataCandidates::default());
    }

    #[test]
    fn collector_is_order_independent_for_disjoint_fields() {
        let pages = ["Obra: Viaduto X", "capa interna", "km 7+300 - Litoral"];

        let mut forward = MetadataCollector::new();
        for (i, p) in pages.iter().enumerate() {
            forward.observe(i + 1, p);
        }

        let mut reversed = MetadataCollector::new();
        for (i, p) in pages.iter().enumerate().rev() {
            reversed.observe(i + 1, p);
        }

        assert_eq!(forward.into_candidates(), reversed.into_candidates());
    }
}
