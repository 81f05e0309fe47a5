use std::collections::BTreeMap;

use serde_json::Value;
use tracing::{debug, warn};

use super::error::GenerationError;
use crate::analysis::Checklist;

/// Removes a leading ```` ```json ```` (or bare ```` ``` ````) fence and a trailing ```` ``` ````.
pub fn strip_code_fences(raw: &str) -> &str {
    let mut text = raw.trim();

    if let Some(rest) = text.strip_prefix("```json") {
        text = rest;
    } else if let Some(rest) = text.strip_prefix("```JSON") {
        text = rest;
    } else if let Some(rest) = text.strip_prefix("```") {
        text = rest;
    }

    if let Some(rest) = text.strip_suffix("```") {
        text = rest;
    }

    text.trim()
}

/// Parses generator output into one verdict per checklist concern.
///
/// Keys outside the checklist are dropped. Every concern must be present with a string value.
pub fn parse_verdicts(
    raw: &str,
    checklist: &Checklist,
) -> Result<BTreeMap<String, String>, GenerationError> {
    let body = strip_code_fences(raw);
    if body.is_empty() {
        return Err(GenerationError::EmptyResponse);
    }

    let value: Value = serde_json::from_str(body).map_err(|e| GenerationError::Parse {
        reason: e.to_string(),
    })?;

    let Value::Object(mut object) = value else {
        return Err(GenerationError::Parse {
            reason: format!("expected an object, got {}", json_kind(&value)),
        });
    };

    let mut verdicts = BTreeMap::new();
    let mut missing = Vec::new();

    for concern in checklist {
        match object.remove(concern.as_str()) {
            Some(Value::String(verdict)) => {
                if !is_well_formed(&verdict) {
                    debug!(concern = %concern, "Verdict does not follow NO / YES. <reason>");
                }
                verdicts.insert(concern.to_string(), verdict);
            }
            Some(_) => {
                return Err(GenerationError::InvalidVerdict {
                    concern: concern.to_string(),
                });
            }
            None => missing.push(concern.to_string()),
        }
    }

    if !missing.is_empty() {
        return Err(GenerationError::MissingConcerns { missing });
    }

    if !object.is_empty() {
        warn!(
            extra_keys = object.len(),
            "Dropping generator keys that are not checklist concerns"
        );
    }

    Ok(verdicts)
}

fn is_well_formed(verdict: &str) -> bool {
    let verdict = verdict.trim();
    verdict == "NO" || verdict.starts_with("YES.")
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
