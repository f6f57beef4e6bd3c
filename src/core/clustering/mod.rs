//! 场景内的时序约束层次聚类
//!
//! 1. 相邻合并 - 只合并时间上相邻的簇，构建合并树
//! 2. 切树 - 用调用方提供的判定函数把合并树切成连续的帧段

pub mod cutter;
pub mod distance;
pub mod error;
pub mod linkage;
pub mod merger;

pub use cutter::{cut_tree, form_clusters, max_merge_distances};
pub use distance::DistanceMatrix;
pub use error::ClusteringError;
pub use linkage::{Linkage, LinkageMethod, MergeEvent};
pub use merger::{build_linkage, SequentialClusterer};
