//! Tests for the conclusion and audit scanners.

use std::cell::Cell;

use oae_core::{MetadataCandidates, SectionLabel};

use super::{extract_audit_sections, extract_conclusion, AuditScanner, ConclusionScanner, ConclusionState, ScanControl};

fn report_pages() -> Vec<&'static str> {
    vec![
        "Obra: Viaduto Rio Claro\nkm 010+200 – Norte",
        "Sumário técnico IV. CONCLUSÃO\nA estrutura apresenta fissuras.",
        "Nota estrutural: 3",
        "Fim da conclusão. V. AÇÕES RECONSTITUIDORAS\nRecuperar a viga V1.",
        "ANEXO I - Fotos",
    ]
}

// ── Conclusion mode ─────────────────────────────────────────────────

#[test]
fn conclusion_missing_start_yields_empty_text() {
    let pages = ["capa", "3. ANOMALIAS CONSTATADAS", "V. AÇÕES RECONSTITUIDORAS"];
    let result = extract_conclusion(pages);
    assert!(result.text.is_empty());
    assert!(!result.is_found());
}

#[test]
fn conclusion_is_bounded_by_start_and_end_headings() {
    let pulled = Cell::new(0);
    let pages = report_pages();
    let result = extract_conclusion(pages.iter().inspect(|_| pulled.set(pulled.get() + 1)));

    assert_eq!(
        result.text,
        "IV. CONCLUSÃO\nA estrutura apresenta fissuras.\nNota estrutural: 3\nFim da conclusão."
    );
    assert!(!result.text.contains("Sumário"));
    assert!(!result.text.contains("Recuperar"));
    // The page after the end heading is never pulled from the iterator.
    assert_eq!(pulled.get(), 4);
}

#[test]
fn conclusion_without_end_runs_to_end_of_document() {
    let pages = ["capa", "IV. Conclusão\nprimeira parte", "segunda parte", "última página  "];
    let result = extract_conclusion(pages);
    assert_eq!(
        result.text,
        "IV. Conclusão\nprimeira parte\nsegunda parte\núltima página"
    );
}

#[test]
fn end_heading_on_start_page_is_not_honoured() {
    let pages = ["IV. CONCLUSÃO texto V. AÇÕES RECONSTITUIDORAS resto", "seguinte"];
    let result = extract_conclusion(pages);
    assert_eq!(
        result.text,
        "IV. CONCLUSÃO texto V. AÇÕES RECONSTITUIDORAS resto\nseguinte"
    );
}

#[test]
fn conclusion_collects_front_matter_metadata() {
    let result = extract_conclusion(report_pages());
    assert_eq!(
        result.metadata,
        MetadataCandidates {
            work_name: "Viaduto Rio Claro".into(),
            km: "km 010+200".into(),
            sentido: "Norte".into(),
        }
    );
}

#[test]
fn metadata_after_page_three_is_ignored() {
    let pages = ["capa", "IV. CONCLUSÃO", "texto", "Obra: Tarde Demais"];
    let result = extract_conclusion(pages);
    assert!(result.metadata.work_name.is_empty());
}

#[test]
fn scanner_refuses_pages_once_done() {
    let mut scanner = ConclusionScanner::new();
    assert_eq!(scanner.feed("IV. CONCLUSÃO início"), ScanControl::Continue);
    assert_eq!(scanner.state(), ConclusionState::In);
    assert_eq!(scanner.feed("fim V. AÇÕES RECONSTITUIDORAS"), ScanControl::Stop);
    assert_eq!(scanner.state(), ConclusionState::Done);
    assert_eq!(scanner.feed("mais texto"), ScanControl::Stop);
    assert_eq!(scanner.pages_seen(), 2);
    assert_eq!(scanner.finish().text, "IV. CONCLUSÃO início\nfim");
}

#[test]
fn fresh_scanner_per_document_does_not_leak() {
    let first = extract_conclusion(["IV. CONCLUSÃO do primeiro"]);
    let second = extract_conclusion(["sem capítulo"]);
    assert_eq!(first.text, "IV. CONCLUSÃO do primeiro");
    assert!(second.text.is_empty());
}

// ── Audit mode ──────────────────────────────────────────────────────

#[test]
fn audit_only_populates_matched_annexes() {
    let pages = [
        "capa Obra: Ponte Seca",
        "ANEXO II\ntabela 1",
        "continua tabela",
        "ANEXO VII\nquantitativos",
    ];
    let sections = extract_audit_sections("ponte.pdf", pages);

    assert_eq!(sections.file_name, "ponte.pdf");
    assert_eq!(sections.annex_ii, "ANEXO II\ntabela 1\ncontinua tabela\n");
    assert_eq!(sections.annex_vii, "ANEXO VII\nquantitativos\n");
    for label in [
        SectionLabel::Anomalies,
        SectionLabel::Tests,
        SectionLabel::AnnexIII,
        SectionLabel::AnnexIV,
    ] {
        assert_eq!(sections.section(label), "", "{label} should be empty");
    }
    assert_eq!(sections.metadata.work_name, "Ponte Seca");
}

#[test]
fn audit_drops_pages_before_first_heading() {
    let pages = ["capa", "índice", "3. ANOMALIAS CONSTATADAS\nfissura"];
    let sections = extract_audit_sections("a.pdf", pages);
    assert_eq!(sections.cap3, "3. ANOMALIAS CONSTATADAS\nfissura\n");
    assert_eq!(sections.populated(), vec![SectionLabel::Anomalies]);
}

#[test]
fn audit_resolves_overlapping_annexes_by_priority() {
    let sections = extract_audit_sections("a.pdf", ["ANEXO III e também ANEXO II"]);
    assert_eq!(sections.annex_ii, "ANEXO III e também ANEXO II\n");
    assert!(sections.annex_iii.is_empty());
}

#[test]
fn audit_annex_iii_is_not_swallowed_by_annex_ii() {
    let sections = extract_audit_sections("a.pdf", ["ANEXO II", "ANEXO III fotos", "mais fotos"]);
    assert_eq!(sections.annex_ii, "ANEXO II\n");
    assert_eq!(sections.annex_iii, "ANEXO III fotos\nmais fotos\n");
}

#[test]
fn audit_sections_are_sticky_and_ordered() {
    let mut scanner = AuditScanner::new("b.pdf");
    assert_eq!(scanner.current(), None);
    scanner.feed("3. ANOMALIAS CONSTATADAS");
    scanner.feed("p2");
    scanner.feed("4. ENSAIOS");
    scanner.feed("p4");
    scanner.feed("3. anomalias constatadas (continuação)");
    assert_eq!(scanner.current(), Some(SectionLabel::Anomalies));

    let sections = scanner.finish();
    assert_eq!(
        sections.cap3,
        "3. ANOMALIAS CONSTATADAS\np2\n3. anomalias constatadas (continuação)\n"
    );
    assert_eq!(sections.cap4, "4. ENSAIOS\np4\n");
}
