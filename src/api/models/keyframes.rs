use crate::core::keyframes::{KeyframeError, VideoKeyframes};
use crate::core::video::{RawFrame, Scene};
use serde::{Deserialize, Serialize};

/// 场景区间（闭区间帧号）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SceneRange {
    pub start: u64,
    pub end: u64,
}

impl From<SceneRange> for Scene {
    fn from(range: SceneRange) -> Self {
        Scene::new(range.start as usize, range.end as usize)
    }
}

/// 原生解码器传来的 YUV420 帧
#[derive(Debug, Clone)]
pub struct YuvFrameData {
    pub width: u32,
    pub height: u32,
    pub y_plane: Vec<u8>,
    pub u_plane: Vec<u8>,
    pub v_plane: Vec<u8>,
    pub frame_number: u64,
}

impl From<YuvFrameData> for RawFrame {
    fn from(data: YuvFrameData) -> Self {
        RawFrame {
            width: data.width,
            height: data.height,
            y_plane: data.y_plane,
            u_plane: data.u_plane,
            v_plane: data.v_plane,
            frame_number: data.frame_number,
        }
    }
}

/// 关键帧提取结果
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KeyframeReport {
    /// 全局关键帧帧号，升序
    pub keyframes: Vec<u64>,
    /// 场景内簇的分界帧号（可视化用）
    pub cluster_boundaries: Vec<u64>,
    pub scene_count: u32,
}

impl KeyframeReport {
    pub fn from_video(result: &VideoKeyframes, scene_count: usize) -> Self {
        Self {
            keyframes: result.keyframes.iter().map(|&kf| kf as u64).collect(),
            cluster_boundaries: result.cluster_boundaries.iter().map(|&b| b as u64).collect(),
            scene_count: scene_count as u32,
        }
    }

    pub fn to_json(&self) -> Result<String, KeyframeError> {
        Ok(serde_json::to_string(self)?)
    }
}
