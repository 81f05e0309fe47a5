use std::collections::BTreeMap;
use std::io::Write;

use super::*;

fn verdicts(values: &[&str]) -> BTreeMap<String, String> {
    values
        .iter()
        .enumerate()
        .map(|(i, v)| (format!("concern {i}"), v.to_string()))
        .collect()
}

#[test]
fn test_default_checklist() {
    let checklist = Checklist::default();
    assert_eq!(checklist.len(), 6);
    assert_eq!(
        checklist.iter().next().map(Concern::as_str),
        Some("Does the policy allow them to sell my data to third parties?")
    );
    assert!(checklist.contains("Is there a mandatory binding arbitration clause?"));
    assert!(!checklist.contains("Error"));
}

#[test]
fn test_checklist_rejects_invalid() {
    assert!(matches!(
        Checklist::new(Vec::<String>::new()),
        Err(ChecklistError::Empty)
    ));
    assert!(matches!(
        Checklist::new(["ok?", "  "]),
        Err(ChecklistError::BlankConcern { index: 1 })
    ));
    assert!(matches!(
        Checklist::new(["same?", "same?"]),
        Err(ChecklistError::DuplicateConcern { .. })
    ));
}

#[test]
fn test_checklist_preserves_order() {
    let checklist = Checklist::new(["b?", "a?", "c?"]).unwrap();
    let order: Vec<_> = checklist.iter().map(Concern::as_str).collect();
    assert_eq!(order, vec!["b?", "a?", "c?"]);
}

#[test]
fn test_checklist_from_json_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, r#"["Do they sell data?", "Is there arbitration?"]"#).unwrap();

    let checklist = Checklist::from_json_file(file.path()).unwrap();
    assert_eq!(checklist.len(), 2);
    assert!(checklist.contains("Is there arbitration?"));
}

#[test]
fn test_checklist_from_bad_json_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, r#"{{"not": "an array"}}"#).unwrap();
    assert!(matches!(
        Checklist::from_json_file(file.path()),
        Err(ChecklistError::Parse { .. })
    ));

    assert!(matches!(
        Checklist::from_json_file(std::path::Path::new("/nonexistent/checklist.json")),
        Err(ChecklistError::Io { .. })
    ));
}

#[test]
fn test_concern_serializes_as_string() {
    let json = serde_json::to_string(&Concern::new("Q?")).unwrap();
    assert_eq!(json, r#""Q?""#);
}

#[test]
fn test_score_monotonicity() {
    let expected = [100, 85, 70, 55, 40, 25, 10, 0, 0, 0];
    for (flagged, want) in expected.iter().enumerate() {
        let mut values = vec!["YES. bad"; flagged];
        values.extend(["NO"; 3]);
        assert_eq!(
            AnalysisResult::from_verdicts(verdicts(&values)).safety_score,
            *want,
            "flagged = {flagged}"
        );
    }
}

#[test]
fn test_flag_is_case_insensitive_substring() {
    assert!(is_flagged("YES. They sell data."));
    assert!(is_flagged("yes, arbitration applies"));
    assert!(is_flagged("Eyes only"));
    assert!(!is_flagged("NO"));
    assert!(!is_flagged(""));
}

#[test]
fn test_too_short_shape() {
    let result = AnalysisResult::too_short();
    assert_eq!(result.safety_score, 0);
    assert_eq!(result.verdict("Error"), Some("Text too short."));

    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(
        json,
        serde_json::json!({"safety_score": 0, "analysis": {"Error": "Text too short."}})
    );
}

#[test]
fn test_flagged_count() {
    let result = AnalysisResult::from_verdicts(verdicts(&["NO", "YES. x", "NO", "yes"]));
    assert_eq!(result.flagged_count(), 2);
    assert_eq!(result.safety_score, 70);
}
