//! Score a sample respondent with a hand-written artifact bundle

use socialytix::{ScoringArtifacts, ScoringPipeline};
use std::collections::HashMap;
use std::sync::Arc;

fn main() {
    let bundle = r#"{
        "schema": "socialytix.artifacts.v1",
        "feature_columns": [
            "Age", "Gender", "Academic_Level", "Country",
            "Avg_Daily_Usage_Hours", "Most_Used_Platform",
            "Affects_Academic_Performance", "Relationship_Status",
            "Conflicts_Over_Social_Media", "Sleep_Hours_Per_Night"
        ],
        "encoders": {
            "Gender": { "classes": ["female", "male", "other"] },
            "Academic_Level": { "classes": ["graduate", "high school", "undergraduate"] },
            "Country": { "classes": ["india", "norway", "usa"] },
            "Most_Used_Platform": { "classes": ["facebook", "instagram", "tiktok"] },
            "Affects_Academic_Performance": { "classes": ["no", "yes"] },
            "Relationship_Status": { "classes": ["complicated", "in relationship", "single"] }
        },
        "mental_model": {
            "target": "mental_health_score",
            "n_features": 10,
            "trees": [
                { "nodes": [
                    { "feature": 4, "threshold": 3.0, "left": 1, "right": 2 },
                    { "value": 7.8 },
                    { "value": 5.2 }
                ] }
            ]
        },
        "addiction_model": {
            "target": "addiction_score",
            "n_features": 10,
            "trees": [
                { "nodes": [
                    { "feature": 4, "threshold": 3.0, "left": 1, "right": 2 },
                    { "value": 3.0 },
                    { "value": 6.5 }
                ] }
            ]
        }
    }"#;

    let artifacts = match ScoringArtifacts::from_json(bundle) {
        Ok(artifacts) => artifacts,
        Err(e) => {
            eprintln!("Error: {e:?}");
            return;
        }
    };

    let pipeline = ScoringPipeline::new(Arc::new(artifacts));

    let answers = HashMap::from([
        ("Age".to_string(), "21".to_string()),
        ("Gender".to_string(), "Female".to_string()),
        ("Academic_Level".to_string(), "Undergraduate".to_string()),
        ("Country".to_string(), "Norway".to_string()),
        ("Avg_Daily_Usage_Hours".to_string(), "2.5".to_string()),
        ("Most_Used_Platform".to_string(), "Instagram".to_string()),
        ("Affects_Academic_Performance".to_string(), "No".to_string()),
        ("Relationship_Status".to_string(), "Single".to_string()),
        ("Conflicts_Over_Social_Media".to_string(), "0".to_string()),
        ("Sleep_Hours_Per_Night".to_string(), "8".to_string()),
    ]);

    match pipeline.score(&answers) {
        Ok(result) => {
            for line in result.message_lines() {
                println!("{line}");
            }
        }
        Err(e) => eprintln!("Error: {e:?}"),
    }
}
