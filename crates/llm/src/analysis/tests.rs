//! Tests for the LLM-backed analyzer, driven by a scripted provider.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use oae_core::{AuditSections, ClassificationStatus, MetadataCandidates, SequentialIdGenerator};
use serde_json::{json, Value};

use super::{AnalysisError, ConclusionRequest, LlmAnalyzer, ReportAnalyzer};
use crate::provider::{LlmError, LlmProvider, Message, Role};

#[derive(Default)]
struct Captured {
    messages: Vec<Message>,
    schema: Option<Value>,
}

struct ScriptedProvider {
    reply: Mutex<Option<Result<String, LlmError>>>,
    captured: Arc<Mutex<Captured>>,
}

impl ScriptedProvider {
    fn new(reply: Result<String, LlmError>) -> (Self, Arc<Mutex<Captured>>) {
        let captured = Arc::new(Mutex::new(Captured::default()));
        let provider = Self {
            reply: Mutex::new(Some(reply)),
            captured: captured.clone(),
        };
        (provider, captured)
    }
}

#[async_trait]
impl LlmProvider for ScriptedProvider {
    async fn complete(
        &self,
        messages: Vec<Message>,
        _temperature: f32,
        _max_tokens: u32,
    ) -> Result<String, LlmError> {
        self.captured.lock().unwrap().messages = messages;
        self.reply
            .lock()
            .unwrap()
            .take()
            .expect("provider called more than once")
    }

    async fn complete_structured(
        &self,
        messages: Vec<Message>,
        temperature: f32,
        max_tokens: u32,
        schema: &Value,
    ) -> Result<String, LlmError> {
        self.captured.lock().unwrap().schema = Some(schema.clone());
        self.complete(messages, temperature, max_tokens).await
    }
}

fn analyzer(reply: Result<String, LlmError>) -> (LlmAnalyzer, Arc<Mutex<Captured>>) {
    let (provider, captured) = ScriptedProvider::new(reply);
    let analyzer = LlmAnalyzer::new(Box::new(provider), 0.0, 4096)
        .with_ids(Arc::new(SequentialIdGenerator::new("res")));
    (analyzer, captured)
}

fn conclusion_reply(work_name: &str, km: Option<&str>, status: &str) -> String {
    let mut value = json!({
        "workName": work_name,
        "structural": "3",
        "structuralMotivation": "fissuras na viga V1",
        "functional": "4",
        "functionalMotivation": "pavimento íntegro",
        "durability": "2",
        "durabilityMotivation": "armadura exposta",
        "summary": "IV. CONCLUSÃO texto integral",
        "pointsOfAttention": ["viga V1"],
        "complianceStatus": status,
        "complianceReasoning": "notas coerentes"
    });
    if let Some(km) = km {
        value["km"] = json!(km);
    }
    value.to_string()
}

fn request(metadata: MetadataCandidates) -> ConclusionRequest {
    ConclusionRequest {
        file_name: "terapia.pdf".into(),
        text: "IV. CONCLUSÃO texto integral".into(),
        metadata,
        standard: "Norma ARTESP".into(),
    }
}

// ── Conclusion ──────────────────────────────────────────────────────

#[tokio::test]
async fn conclusion_maps_response_and_prefers_model_values() {
    let (analyzer, captured) = analyzer(Ok(conclusion_reply("Viaduto Modelo", Some("km 1+000"), "MORE_STRICT")));
    let detected = MetadataCandidates {
        work_name: "Viaduto Detectado".into(),
        km: "km 9+999".into(),
        sentido: "Norte".into(),
    };

    let result = analyzer.analyze_conclusion(&request(detected)).await.unwrap();

    assert_eq!(result.id, "res-1");
    assert_eq!(result.file_name, "terapia.pdf");
    assert_eq!(result.work_name, "Viaduto Modelo");
    assert_eq!(result.km, "km 1+000");
    // Model omitted `sentido`: the detected candidate fills in.
    assert_eq!(result.sentido, "Norte");
    assert_eq!(result.structural_motivation, "fissuras na viga V1");
    assert_eq!(result.compliance_status, ClassificationStatus::MoreStrict);
    assert_eq!(result.points_of_attention, vec!["viga V1"]);

    let captured = captured.lock().unwrap();
    assert!(matches!(captured.messages[0].role, Role::System));
    let user = &captured.messages[1].content;
    assert!(user.contains("Norma ARTESP"));
    assert!(user.contains("IV. CONCLUSÃO texto integral"));
    let schema = captured.schema.as_ref().unwrap();
    assert!(schema["properties"].get("complianceStatus").is_some());
}

#[tokio::test]
async fn conclusion_falls_back_to_placeholders() {
    let (analyzer, _) = analyzer(Ok(conclusion_reply("", None, "UNEXPECTED")));

    let result = analyzer
        .analyze_conclusion(&request(MetadataCandidates::default()))
        .await
        .unwrap();

    assert_eq!(result.work_name, "OAE Não Identificada");
    assert_eq!(result.km, "KM Não Identificado");
    assert_eq!(result.sentido, "Sentido Não Identificado");
    assert_eq!(result.compliance_status, ClassificationStatus::Compatible);
}

#[tokio::test]
async fn conclusion_accepts_fenced_json() {
    let fenced = format!("```json\n{}\n```", conclusion_reply("Ponte", None, "LESS_STRICT"));
    let (analyzer, _) = analyzer(Ok(fenced));

    let result = analyzer
        .analyze_conclusion(&request(MetadataCandidates::default()))
        .await
        .unwrap();
    assert_eq!(result.compliance_status, ClassificationStatus::LessStrict);
}

#[tokio::test]
async fn invalid_key_becomes_credential_error() {
    let (analyzer, _) = analyzer(Err(LlmError::InvalidCredentials("API key not valid".into())));

    let err = analyzer
        .analyze_conclusion(&request(MetadataCandidates::default()))
        .await
        .unwrap_err();

    assert!(matches!(err, AnalysisError::Credentials));
    assert!(err.to_string().contains("GEMINI_API_KEY"));
}

#[tokio::test]
async fn malformed_json_is_schema_error_with_raw_text() {
    let (analyzer, _) = analyzer(Ok(r#"{"workName": "Ponte"}"#.into()));

    let err = analyzer
        .analyze_conclusion(&request(MetadataCandidates::default()))
        .await
        .unwrap_err();

    match err {
        AnalysisError::Schema { raw_response, .. } => assert!(raw_response.contains("Ponte")),
        other => panic!("expected schema error, got {other:?}"),
    }
}

#[tokio::test]
async fn empty_reply_is_empty_response() {
    let (analyzer, _) = analyzer(Err(LlmError::EmptyResponse));
    let err = analyzer
        .analyze_conclusion(&request(MetadataCandidates::default()))
        .await
        .unwrap_err();
    assert!(matches!(err, AnalysisError::EmptyResponse));
}

// ── Audit ───────────────────────────────────────────────────────────

fn audit_reply() -> String {
    json!({
        "categories": [{
            "name": "Fissuras",
            "items": [{
                "title": "Fissura na laje",
                "description": "Fissuras transversais",
                "foundInCap3": "fissuras transversais na laje",
                "foundInAnnexVII": true,
                "foundInAnnexII": false,
                "notes": ""
            }]
        }],
        "criticalInconsistencies": ["Fissura ausente do Anexo II"],
        "recommendations": ["Atualizar Anexo II"]
    })
    .to_string()
}

#[tokio::test]
async fn audit_sends_chapter_and_annexes_and_uses_candidates() {
    let (analyzer, captured) = analyzer(Ok(audit_reply()));
    let mut sections = AuditSections::new("patologia.pdf");
    sections.cap3 = "3. ANOMALIAS CONSTATADAS fissuras".into();
    sections.annex_ii = "ANEXO II tabela".into();
    sections.annex_vii = "ANEXO VII quantitativos".into();
    sections.metadata.km = "km 20+000".into();

    let result = analyzer.analyze_audit(&sections).await.unwrap();

    assert_eq!(result.id, "res-1");
    assert_eq!(result.file_name, "patologia.pdf");
    assert_eq!(result.work_name, "Obra Não Identificada");
    assert_eq!(result.km, "km 20+000");
    assert_eq!(result.sentido, "Sentido Não Identificado");
    assert_eq!(result.categories.len(), 1);
    assert!(result.categories[0].items[0].found_in_annex_vii);
    assert_eq!(result.critical_inconsistencies, vec!["Fissura ausente do Anexo II"]);

    let captured = captured.lock().unwrap();
    let user = &captured.messages[1].content;
    assert!(user.contains("Cap 3: 3. ANOMALIAS CONSTATADAS fissuras"));
    assert!(user.contains("Anexo II: ANEXO II tabela"));
    assert!(user.contains("Anexo VII: ANEXO VII quantitativos"));
    let schema = captured.schema.as_ref().unwrap();
    assert!(schema["properties"].get("criticalInconsistencies").is_some());
}

#[tokio::test]
async fn audit_transport_failure_is_llm_error() {
    let (analyzer, _) = analyzer(Err(LlmError::ApiError {
        status: 503,
        body: "overloaded".into(),
    }));
    let err = analyzer
        .analyze_audit(&AuditSections::new("x.pdf"))
        .await
        .unwrap_err();
    assert!(matches!(err, AnalysisError::Llm(LlmError::ApiError { status: 503, .. })));
}
