mod artifact_types;
mod triage_config;

pub use artifact_types::ArtifactKind;
pub use triage_config::{load_or_default, TriageConfig};
