//! Response contracts for the two analyses.
//!
//! The JSON values are sent as Gemini `responseSchema`; the structs are what the
//! model's JSON is parsed into before mapping to domain results.

use oae_core::AuditCategory;
use serde::Deserialize;
use serde_json::{json, Value};

/// Schema for the conclusion ("therapy") analysis.
pub fn analysis_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "workName": { "type": "STRING" },
            "km": { "type": "STRING" },
            "sentido": { "type": "STRING" },
            "structural": { "type": "STRING" },
            "structuralMotivation": {
                "type": "STRING",
                "description": "Motivação literal encontrada no texto para a nota estrutural."
            },
            "functional": { "type": "STRING" },
            "functionalMotivation": {
                "type": "STRING",
                "description": "Motivação literal encontrada no texto para a nota funcional."
            },
            "durability": { "type": "STRING" },
            "durabilityMotivation": {
                "type": "STRING",
                "description": "Motivação literal encontrada no texto para a nota de durabilidade."
            },
            "summary": {
                "type": "STRING",
                "description": "Transcrição literal e completa do capítulo de conclusão."
            },
            "pointsOfAttention": { "type": "ARRAY", "items": { "type": "STRING" } },
            "complianceStatus": {
                "type": "STRING",
                "enum": ["LESS_STRICT", "MORE_STRICT", "COMPATIBLE"]
            },
            "complianceReasoning": {
                "type": "STRING",
                "description": "Comparação entre as motivações encontradas e o que a norma de referência prescreve."
            }
        },
        "required": [
            "workName", "structural", "structuralMotivation",
            "functional", "functionalMotivation", "durability",
            "durabilityMotivation", "summary", "pointsOfAttention",
            "complianceStatus", "complianceReasoning"
        ]
    })
}

/// Schema for the chapter 3 × annex consistency audit.
pub fn audit_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "categories": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "name": { "type": "STRING" },
                        "items": {
                            "type": "ARRAY",
                            "items": {
                                "type": "OBJECT",
                                "properties": {
                                    "title": { "type": "STRING" },
                                    "description": { "type": "STRING" },
                                    "foundInCap3": { "type": "STRING" },
                                    "foundInAnnexVII": { "type": "BOOLEAN" },
                                    "foundInAnnexII": { "type": "BOOLEAN" },
                                    "notes": { "type": "STRING" }
                                },
                                "required": ["title", "foundInCap3", "foundInAnnexVII", "foundInAnnexII"]
                            }
                        }
                    },
                    "required": ["name", "items"]
                }
            },
            "criticalInconsistencies": { "type": "ARRAY", "items": { "type": "STRING" } },
            "recommendations": { "type": "ARRAY", "items": { "type": "STRING" } }
        },
        "required": ["categories", "criticalInconsistencies", "recommendations"]
    })
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConclusionResponse {
    pub work_name: String,
    #[serde(default)]
    pub km: Option<String>,
    #[serde(default)]
    pub sentido: Option<String>,
    pub structural: String,
    pub structural_motivation: String,
    pub functional: String,
    pub functional_motivation: String,
    pub durability: String,
    pub durability_motivation: String,
    pub summary: String,
    pub points_of_attention: Vec<String>,
    pub compliance_status: String,
    pub compliance_reasoning: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditResponse {
    pub categories: Vec<AuditCategory>,
    pub critical_inconsistencies: Vec<String>,
    pub recommendations: Vec<String>,
}
