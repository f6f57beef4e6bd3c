use super::error::ClusteringError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Range;
use std::str::FromStr;

/// 簇间距离的聚合方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum LinkageMethod {
    /// 两簇间最大的帧对距离
    Max,
    /// 两簇间所有帧对距离的均值
    #[default]
    Average,
}

impl LinkageMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            LinkageMethod::Max => "max",
            LinkageMethod::Average => "average",
        }
    }
}

impl FromStr for LinkageMethod {
    type Err = ClusteringError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "max" => Ok(LinkageMethod::Max),
            "average" => Ok(LinkageMethod::Average),
            other => Err(ClusteringError::UnknownMethod(other.to_string())),
        }
    }
}

impl TryFrom<String> for LinkageMethod {
    type Error = ClusteringError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for LinkageMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 一次合并：`left` 与 `right` 在 `distance` 处合并成大小为 `size` 的新簇
///
/// Node ids follow the usual linkage numbering: `0..n` are leaves, the
/// cluster created by the `k`-th merge gets id `n + k`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MergeEvent {
    pub left: usize,
    pub right: usize,
    pub distance: f64,
    pub size: usize,
}

/// 单个场景的合并树，恰好包含 `n - 1` 次合并
#[derive(Debug, Clone, PartialEq)]
pub struct Linkage {
    n_leaves: usize,
    merges: Vec<MergeEvent>,
}

impl Linkage {
    pub(crate) fn with_capacity(n_leaves: usize) -> Self {
        Self {
            n_leaves,
            merges: Vec::with_capacity(n_leaves.saturating_sub(1)),
        }
    }

    pub(crate) fn push(&mut self, event: MergeEvent) {
        self.merges.push(event);
    }

    pub fn n_leaves(&self) -> usize {
        self.n_leaves
    }

    pub fn merges(&self) -> &[MergeEvent] {
        &self.merges
    }

    pub fn is_empty(&self) -> bool {
        self.merges.is_empty()
    }

    pub fn is_leaf(&self, id: usize) -> bool {
        id < self.n_leaves
    }

    /// Root id, `None` for a single-leaf scene.
    pub fn root(&self) -> Option<usize> {
        if self.merges.is_empty() {
            None
        } else {
            Some(self.n_leaves + self.merges.len() - 1)
        }
    }

    /// Merge event that created internal node `id`.
    pub fn merge_of(&self, id: usize) -> &MergeEvent {
        &self.merges[id - self.n_leaves]
    }

    /// Number of leaves under `id` (1 for a leaf).
    pub fn node_size(&self, id: usize) -> usize {
        if self.is_leaf(id) {
            1
        } else {
            self.merge_of(id).size
        }
    }

    /// Leaf range covered by every node, indexed by node id.
    ///
    /// Children are always created before their parent, so one forward
    /// pass is enough.
    pub fn node_ranges(&self) -> Vec<Range<usize>> {
        let mut ranges: Vec<Range<usize>> = (0..self.n_leaves).map(|i| i..i + 1).collect();
        for merge in &self.merges {
            let start = ranges[merge.left].start;
            let end = ranges[merge.right].end;
            ranges.push(start..end);
        }
        ranges
    }
}
