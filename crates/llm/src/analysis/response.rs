use serde::de::DeserializeOwned;

use super::AnalysisError;

/// Parse a model response into `T`, accepting JSON wrapped in prose or code fences.
pub(super) fn parse_response<T: DeserializeOwned>(response: &str) -> Result<T, AnalysisError> {
    if response.trim().is_empty() {
        return Err(AnalysisError::EmptyResponse);
    }
    let json_str = extract_json(response);
    serde_json::from_str(json_str).map_err(|e| AnalysisError::Schema {
        reason: e.to_string(),
        raw_response: response.to_string(),
    })
}

/// Strip code fences or surrounding prose, leaving the outermost JSON object.
fn extract_json(response: &str) -> &str {
    let trimmed = response.trim();
    let body = match trimmed.split_once("```") {
        Some((_, fenced)) => {
            // Opening fence line may carry an info string (`json`).
            let fenced = match fenced.split_once('\n') {
                Some((info, rest)) if !info.contains('{') => rest,
                _ => fenced,
            };
            fenced.split_once("```").map_or(fenced, |(inner, _)| inner)
        }
        None => trimmed,
    };

    match (body.find('{'), body.rfind('}')) {
        (Some(start), Some(end)) if end > start => &body[start..=end],
        _ => body.trim(),
    }
}
