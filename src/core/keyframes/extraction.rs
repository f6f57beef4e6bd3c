//! 从簇标签得到代表帧

use std::ops::Range;

/// 相同标签的最长连续段 `[lo, hi)`
pub fn cluster_runs(labels: &[u32]) -> Vec<Range<usize>> {
    let mut runs = Vec::new();
    let mut start = 0;
    for i in 1..=labels.len() {
        if i == labels.len() || labels[i] != labels[i - 1] {
            runs.push(start..i);
            start = i;
        }
    }
    runs
}

/// 标签发生变化的位置（新段的第一帧）
pub fn cluster_boundaries(labels: &[u32]) -> Vec<usize> {
    (1..labels.len())
        .filter(|&i| labels[i] != labels[i - 1])
        .collect()
}

/// 每段取一帧；超长的段按 `max_frames_in_cluster` 分块，取每块的第一帧
///
/// For an oversized run the leftover `len % max` frames are split with the
/// smaller half (floor) before the first chunk.
pub fn representative_frames(runs: &[Range<usize>], max_frames_in_cluster: usize) -> Vec<usize> {
    let mut keyframes = Vec::with_capacity(runs.len());
    for run in runs {
        let len = run.len();
        if len <= max_frames_in_cluster {
            keyframes.push((run.start + run.end) / 2);
            continue;
        }
        let first = run.start + (len % max_frames_in_cluster) / 2;
        keyframes.extend((first..run.end).step_by(max_frames_in_cluster));
    }
    keyframes.sort_unstable();
    keyframes
}
