//! 关键帧选择 - 每个场景独立完成
//!
//! 1. 描述子 - 分块颜色直方图的余弦距离
//! 2. 相邻合并 + 自适应阈值切树
//! 3. 每段取中间帧，超长段分块取帧

pub mod config;
pub mod descriptor;
pub mod error;
pub mod extraction;
pub mod selector;
pub mod store;
pub mod threshold;

pub use config::SelectorConfig;
pub use descriptor::{ColorHistogramDescriptor, FnDescriptor, SceneDescriptor};
pub use error::KeyframeError;
pub use extraction::{cluster_boundaries, cluster_runs, representative_frames};
pub use selector::{KeyframeSelector, SceneKeyframes, VideoKeyframes};
pub use store::KeyframeStore;
pub use threshold::AdaptiveThreshold;
