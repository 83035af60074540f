use serde::{Deserialize, Serialize};

/// A display-only classification result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub label: String,
    pub category: String,
    /// 0–100.
    pub confidence: f32,
}

impl Prediction {
    pub fn new(label: &str, category: &str, confidence: f32) -> Self {
        Self {
            label: label.to_string(),
            category: category.to_string(),
            confidence,
        }
    }
}
