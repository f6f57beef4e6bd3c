//! 关键帧选择器：逐场景聚类、切树并取代表帧

use super::config::SelectorConfig;
use super::descriptor::SceneDescriptor;
use super::error::KeyframeError;
use super::extraction::{cluster_boundaries, cluster_runs, representative_frames};
use super::threshold::AdaptiveThreshold;
use crate::core::clustering::{build_linkage, cut_tree, DistanceMatrix};
use crate::core::video::{Frame, Scene};
use log::debug;
use rayon::prelude::*;

/// 单个场景的结果（场景内局部帧号）
#[derive(Debug, Clone, PartialEq)]
pub struct SceneKeyframes {
    pub keyframes: Vec<usize>,
    pub labels: Vec<u32>,
    pub boundaries: Vec<usize>,
}

/// 整个视频的结果（全局帧号）
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VideoKeyframes {
    pub keyframes: Vec<usize>,
    pub cluster_boundaries: Vec<usize>,
}

pub struct KeyframeSelector {
    config: SelectorConfig,
    threshold: AdaptiveThreshold,
}

impl KeyframeSelector {
    pub fn new(config: SelectorConfig) -> Result<Self, KeyframeError> {
        config.validate()?;
        Ok(Self {
            threshold: AdaptiveThreshold::from_config(&config),
            config,
        })
    }

    pub fn config(&self) -> &SelectorConfig {
        &self.config
    }

    /// Clusters one scene from its distance matrix.
    pub fn select_scene(&self, distances: &DistanceMatrix) -> SceneKeyframes {
        let labels = if distances.n_leaves() == 1 {
            vec![1]
        } else {
            let linkage = build_linkage(distances, self.config.linkage_method);
            cut_tree(&linkage, |distance, left, right| {
                self.threshold.should_cut(distance, left, right)
            })
        };

        let runs = cluster_runs(&labels);
        SceneKeyframes {
            keyframes: representative_frames(&runs, self.config.max_frames_in_cluster),
            boundaries: cluster_boundaries(&labels),
            labels,
        }
    }

    /// Runs every scene independently and concatenates the results in
    /// scene order, shifted to global frame numbers.
    pub fn select_video<D>(
        &self,
        frames: &[Frame],
        scenes: &[Scene],
        descriptor: &D,
    ) -> Result<VideoKeyframes, KeyframeError>
    where
        D: SceneDescriptor + ?Sized,
    {
        for scene in scenes {
            scene.check_bounds(frames.len())?;
        }

        let per_scene = scenes
            .par_iter()
            .enumerate()
            .map(|(scene_no, scene)| {
                let scene_frames = &frames[scene.frame_range()];
                let distances = descriptor.distance_matrix(scene_frames)?;
                if distances.n_leaves() != scene_frames.len() {
                    return Err(KeyframeError::DescriptorMismatch {
                        expected: scene_frames.len(),
                        found: distances.n_leaves(),
                    });
                }

                let local = self.select_scene(&distances);
                debug!(
                    "processed scene {} / {} ({} keyframes)",
                    scene_no + 1,
                    scenes.len(),
                    local.keyframes.len()
                );
                Ok(local)
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut result = VideoKeyframes::default();
        for (scene, local) in scenes.iter().zip(per_scene) {
            result
                .keyframes
                .extend(local.keyframes.iter().map(|kf| kf + scene.start));
            result
                .cluster_boundaries
                .extend(local.boundaries.iter().map(|b| b + scene.start));
        }
        Ok(result)
    }
}
