use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    #[serde(rename = "prediction")]
    pub label: String,
    pub confidence: f64,
    #[serde(
        rename = "all_probabilities",
        alias = "probabilities",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub distribution: Option<BTreeMap<String, f64>>,
}

impl PredictionResult {
    pub fn validate(&self) -> Result<(), String> {
        if self.label.trim().is_empty() {
            return Err("prediction label is empty".to_string());
        }
        if !(0.0..=1.0).contains(&self.confidence) {
            return Err(format!("confidence {} outside [0, 1]", self.confidence));
        }
        if let Some(distribution) = &self.distribution {
            if let Some((label, p)) = distribution
                .iter()
                .find(|(_, p)| !(0.0..=1.0).contains(*p))
            {
                return Err(format!("probability {} for '{}' outside [0, 1]", p, label));
            }
        }
        Ok(())
    }
}
