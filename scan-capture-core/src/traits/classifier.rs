use crate::models::artifact::CapturedArtifact;
use crate::models::prediction::Prediction;

/// Produces display predictions for a captured artifact, best first.
pub trait Classifier: Send + Sync {
    fn classify(&self, artifact: &CapturedArtifact) -> Vec<Prediction>;
}
