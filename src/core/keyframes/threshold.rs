use super::config::SelectorConfig;

/// 随簇大小变化的切分阈值
///
/// Small clusters are accepted almost unconditionally so near-static footage
/// does not fall apart into singletons; the acceptance distance then shrinks
/// linearly until `interpolation_bound` frames, where it stays at
/// `merge_threshold`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdaptiveThreshold {
    merge_threshold: f64,
    min_frames_in_cluster: usize,
    interpolation_bound: usize,
}

impl AdaptiveThreshold {
    pub fn new(
        merge_threshold: f64,
        min_frames_in_cluster: usize,
        interpolation_bound: usize,
    ) -> Self {
        Self {
            merge_threshold,
            min_frames_in_cluster,
            interpolation_bound,
        }
    }

    pub fn from_config(config: &SelectorConfig) -> Self {
        Self::new(
            config.merge_threshold,
            config.min_frames_in_cluster,
            config.interpolation_bound,
        )
    }

    /// Cut predicate for [`crate::core::clustering::cut_tree`].
    pub fn should_cut(&self, distance: f64, left_size: usize, right_size: usize) -> bool {
        let total = left_size + right_size;
        if total >= self.interpolation_bound {
            return distance <= self.merge_threshold;
        }
        if total < self.min_frames_in_cluster {
            return true;
        }

        // min_frames_in_cluster <= total < interpolation_bound here
        let span = (self.interpolation_bound - self.min_frames_in_cluster) as f64;
        let remaining = (self.interpolation_bound - total) as f64;
        let threshold = self.merge_threshold + (1.0 - self.merge_threshold) * remaining / span;
        distance <= threshold
    }
}
