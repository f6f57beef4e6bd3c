//! 时序约束的凝聚聚类：只允许合并当前序列中相邻的两个簇

use super::distance::DistanceMatrix;
use super::linkage::{Linkage, LinkageMethod, MergeEvent};
use log::debug;
use ndarray::s;
use std::collections::HashMap;
use std::ops::Range;

/// 单个场景的相邻合并聚类器
///
/// Every run owns its own cluster ranges and distance cache; nothing is
/// shared between scenes.
pub struct SequentialClusterer<'a> {
    distances: &'a DistanceMatrix,
    method: LinkageMethod,
    /// 每个簇（叶子 + 已合并簇）覆盖的帧区间 `[from, to)`
    ranges: Vec<Range<usize>>,
    /// 已算过的簇间距离，键为 `(较小 id, 较大 id)`
    cache: HashMap<(usize, usize), f64>,
    /// 当前未合并的簇，保持原始帧顺序
    active: Vec<usize>,
}

impl<'a> SequentialClusterer<'a> {
    pub fn new(distances: &'a DistanceMatrix, method: LinkageMethod) -> Self {
        let n = distances.n_leaves();
        let mut ranges = Vec::with_capacity(2 * n - 1);
        ranges.extend((0..n).map(|i| i..i + 1));

        Self {
            distances,
            method,
            ranges,
            cache: HashMap::with_capacity(2 * n),
            active: (0..n).collect(),
        }
    }

    /// Runs all `n - 1` merges and returns the linkage.
    pub fn run(mut self) -> Linkage {
        let n = self.distances.n_leaves();
        let mut linkage = Linkage::with_capacity(n);

        for iteration in 0..n.saturating_sub(1) {
            let (position, distance) = self.closest_adjacent_pair();
            let left = self.active[position];
            let right = self.active[position + 1];

            let merged = n + iteration;
            let range = self.ranges[left].start..self.ranges[right].end;
            let size = range.len();
            self.ranges.push(range);
            self.active.splice(position..position + 2, std::iter::once(merged));

            linkage.push(MergeEvent {
                left,
                right,
                distance,
                size,
            });
        }

        debug!(
            "clustered {} frames with {} linkage, {} cached distances",
            n,
            self.method,
            self.cache.len()
        );
        linkage
    }

    /// Scans adjacent pairs left to right; the first minimum wins ties.
    fn closest_adjacent_pair(&mut self) -> (usize, f64) {
        let mut best = (0, f64::INFINITY);
        for position in 0..self.active.len() - 1 {
            let distance = self.distance(self.active[position], self.active[position + 1]);
            if distance < best.1 {
                best = (position, distance);
            }
        }
        best
    }

    fn distance(&mut self, a: usize, b: usize) -> f64 {
        let key = if a < b { (a, b) } else { (b, a) };
        if let Some(&cached) = self.cache.get(&key) {
            return cached;
        }
        let value = self.aggregate(&self.ranges[a], &self.ranges[b]);
        self.cache.insert(key, value);
        value
    }

    fn aggregate(&self, a: &Range<usize>, b: &Range<usize>) -> f64 {
        let view = self.distances.view();
        let block = view.slice(s![a.clone(), b.clone()]);
        match self.method {
            LinkageMethod::Max => block.fold(f64::NEG_INFINITY, |acc, &d| acc.max(d)),
            LinkageMethod::Average => block.sum() / block.len() as f64,
        }
    }
}

/// 构建单个场景的 linkage
pub fn build_linkage(distances: &DistanceMatrix, method: LinkageMethod) -> Linkage {
    SequentialClusterer::new(distances, method).run()
}
