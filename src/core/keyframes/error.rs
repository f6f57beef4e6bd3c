use crate::core::clustering::ClusteringError;
use crate::core::video::VideoError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum KeyframeError {
    #[error("Clustering error: {0}")]
    Clustering(#[from] ClusteringError),
    #[error("Video error: {0}")]
    Video(#[from] VideoError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Config parse error: {0}")]
    ConfigParse(#[from] json5::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid config: {0}")]
    InvalidConfig(String),
    #[error("Descriptor returned {found}x{found} distances for a scene of {expected} frames")]
    DescriptorMismatch { expected: usize, found: usize },
    #[error("Line {line}: invalid keyframe index '{value}'")]
    ParseIndex { line: usize, value: String },
}
