use super::error::KeyframeError;
use crate::core::clustering::LinkageMethod;
use serde::{Deserialize, Serialize};

/// 关键帧选择参数
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectorConfig {
    /// 大簇的切分阈值（最严格的距离上限）
    pub merge_threshold: f64,
    /// 小于该帧数的簇总是直接成簇
    pub min_frames_in_cluster: usize,
    /// 超过该帧数的簇按固定长度分段取帧
    pub max_frames_in_cluster: usize,
    /// 达到该帧数后阈值固定为 merge_threshold
    pub interpolation_bound: usize,
    pub linkage_method: LinkageMethod,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            merge_threshold: 0.15,
            min_frames_in_cluster: 5,
            max_frames_in_cluster: 50,
            interpolation_bound: 25,
            linkage_method: LinkageMethod::Average,
        }
    }
}

impl SelectorConfig {
    /// Parses a JSON5 document holding either the bare parameters or a
    /// `keyframes` section with them. Missing fields take defaults.
    pub fn from_json5(text: &str) -> Result<Self, KeyframeError> {
        let document: serde_json::Value = json5::from_str(text)?;
        let section = match document.get("keyframes") {
            Some(section) => section.clone(),
            None => document,
        };
        // 先按名称解析，未知方法统一报 UnknownMethod
        if let Some(method) = section.get("linkage_method").and_then(|m| m.as_str()) {
            method.parse::<LinkageMethod>()?;
        }
        let config: SelectorConfig = serde_json::from_value(section)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), KeyframeError> {
        if !self.merge_threshold.is_finite() || !(0.0..=1.0).contains(&self.merge_threshold) {
            return Err(KeyframeError::InvalidConfig(format!(
                "merge_threshold must be within [0, 1], got {}",
                self.merge_threshold
            )));
        }
        if self.max_frames_in_cluster == 0 {
            return Err(KeyframeError::InvalidConfig(
                "max_frames_in_cluster must be at least 1".to_string(),
            ));
        }
        if self.interpolation_bound < self.min_frames_in_cluster {
            return Err(KeyframeError::InvalidConfig(format!(
                "interpolation_bound ({}) is below min_frames_in_cluster ({})",
                self.interpolation_bound, self.min_frames_in_cluster
            )));
        }
        Ok(())
    }
}
