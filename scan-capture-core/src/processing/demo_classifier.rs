use crate::models::artifact::CapturedArtifact;
use crate::models::prediction::Prediction;
use crate::traits::classifier::Classifier;

/// Placeholder classifier for demos and tests.
///
/// Not a model: it rotates a fixed label list by a seed taken from the
/// artifact's byte size and lowers confidence by rank. Same size, same output.
#[derive(Debug, Clone)]
pub struct DemoClassifier {
    choices: Vec<Prediction>,
}

impl DemoClassifier {
    pub fn new() -> Self {
        Self {
            choices: vec![
                Prediction::new("Plastic Bottle", "plastic", 78.3),
                Prediction::new("Paper", "paper", 11.2),
                Prediction::new("Cardboard", "paper", 5.6),
                Prediction::new("Other", "other", 4.9),
            ],
        }
    }

    pub fn predict_for_size(&self, byte_len: usize) -> Vec<Prediction> {
        if self.choices.is_empty() {
            return Vec::new();
        }
        let seed = byte_len % 10;
        let offset = seed % self.choices.len();

        let mut ordered = self.choices.clone();
        ordered.rotate_left(offset);

        ordered
            .into_iter()
            .enumerate()
            .map(|(rank, mut p)| {
                let scaled = ((p.confidence - rank as f32 * 6.0) * 10.0).round() / 10.0;
                p.confidence = scaled.max(1.0);
                p
            })
            .collect()
    }
}

impl Default for DemoClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Classifier for DemoClassifier {
    fn classify(&self, artifact: &CapturedArtifact) -> Vec<Prediction> {
        self.predict_for_size(artifact.byte_len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::Utc;

    use crate::models::artifact::ArtifactKind;

    fn artifact_of_len(len: usize) -> CapturedArtifact {
        CapturedArtifact::new("scan-1.jpg".into(), "image/jpeg", ArtifactKind::Photo, vec![0; len], Utc::now())
    }

    #[test]
    fn same_size_same_predictions() {
        let classifier = DemoClassifier::new();
        let a = classifier.classify(&artifact_of_len(1234));
        let b = classifier.classify(&artifact_of_len(1234));
        assert_eq!(a, b);
        assert_eq!(a.len(), 4);
    }

    #[test]
    fn confidence_never_below_one() {
        let classifier = DemoClassifier::new();
        for len in 0..20 {
            for p in classifier.predict_for_size(len) {
                assert!(p.confidence >= 1.0);
            }
        }
    }

    #[test]
    fn top_prediction_keeps_base_confidence() {
        let top = &DemoClassifier::new().predict_for_size(10)[0];
        assert_eq!(top.label, "Plastic Bottle");
        assert_relative_eq!(top.confidence, 78.3, epsilon = 1e-4);
    }
}
