pub mod artifact_namer;
pub mod chunk_buffer;
pub mod demo_classifier;
pub mod photo_encoder;
