//! Stored records must validate against their generated JSON Schemas.

use chrono::Utc;
use press_core::entities::{Draft, Idea, PublishedArticle};
use press_core::enums::Flair;
use schemars::schema_for;

fn validation_errors(schema: &serde_json::Value, instance: &serde_json::Value) -> Vec<String> {
    let validator = jsonschema::validator_for(schema).expect("schema should be valid");
    validator
        .iter_errors(instance)
        .map(|e| format!("{e}"))
        .collect()
}

#[test]
fn idea_record_matches_schema() {
    let idea = Idea::pending("ide-1a2b3c4d", "Bootstrapped PR", Flair::GrowthHacks, Utc::now());
    let schema = serde_json::to_value(schema_for!(Idea)).unwrap();
    let errors = validation_errors(&schema, &serde_json::to_value(&idea).unwrap());
    assert!(errors.is_empty(), "{errors:?}");
}

#[test]
fn published_article_record_matches_schema() {
    let idea = Idea::pending("ide-1a2b3c4d", "Grants 101", Flair::ProfitPathways, Utc::now());
    let draft = Draft::from_idea(&idea, "**Grants 101**\n\nBody.", Utc::now());
    let article: PublishedArticle = draft.to_published("art-9f8e7d6c", "local-dev-user", Utc::now());
    let schema = serde_json::to_value(schema_for!(PublishedArticle)).unwrap();
    let errors = validation_errors(&schema, &serde_json::to_value(&article).unwrap());
    assert!(errors.is_empty(), "{errors:?}");
}

#[test]
fn unknown_flair_fails_schema() {
    let schema = serde_json::to_value(schema_for!(Idea)).unwrap();
    let instance = serde_json::json!({
        "id": "ide-1",
        "title": "t",
        "flair": "Not a flair",
        "status": "pending",
        "createdAt": "2026-02-08T12:00:00Z"
    });
    assert!(!validation_errors(&schema, &instance).is_empty());
}
