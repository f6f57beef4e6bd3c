//! 视频关键帧提取器

use crate::api::models::keyframes::{KeyframeReport, SceneRange, YuvFrameData};
use crate::core::clustering::DistanceMatrix;
use crate::core::keyframes::{
    ColorHistogramDescriptor, KeyframeError, KeyframeSelector, KeyframeStore, SelectorConfig,
};
use crate::core::video::{Frame, RawFrame, Scene};
use flutter_rust_bridge::frb;
use log::info;
use rayon::prelude::*;

/// 关键帧提取器 - 场景内时序聚类 + 代表帧选择
///
/// ```dart
/// final extractor = KeyframeExtractor.create();
/// final report = await extractor.selectKeyframes(frames: yuvFrames, scenes: scenes);
/// extractor.saveKeyframes(dir: outDir, keyframes: report.keyframes);
/// ```
#[frb(opaque)]
pub struct KeyframeExtractor {
    selector: KeyframeSelector,
    descriptor: ColorHistogramDescriptor,
}

impl KeyframeExtractor {
    /// 使用默认参数创建
    #[frb(sync)]
    pub fn create() -> Result<Self, KeyframeError> {
        Self::with_config(SelectorConfig::default())
    }

    /// 从 JSON5 配置创建（可以是完整配置文件，取其中的 keyframes 段）
    #[frb(sync)]
    pub fn from_config(config: String) -> Result<Self, KeyframeError> {
        Self::with_config(SelectorConfig::from_json5(&config)?)
    }

    #[frb(ignore)]
    pub fn with_config(config: SelectorConfig) -> Result<Self, KeyframeError> {
        crate::init_logging();
        let selector = KeyframeSelector::new(config)?;
        let config = selector.config();
        info!(
            "🎬 KeyframeExtractor: created (threshold {}, clusters {}..{} frames, {} linkage)",
            config.merge_threshold,
            config.min_frames_in_cluster,
            config.max_frames_in_cluster,
            config.linkage_method
        );
        Ok(Self {
            selector,
            descriptor: ColorHistogramDescriptor::new(),
        })
    }

    /// 对整段视频的帧按场景选择关键帧
    #[frb]
    pub fn select_keyframes(
        &self,
        frames: Vec<YuvFrameData>,
        scenes: Vec<SceneRange>,
    ) -> Result<KeyframeReport, KeyframeError> {
        let frames = frames
            .into_par_iter()
            .map(|data| RawFrame::from(data).to_rgb()?.to_descriptor_size())
            .collect::<Result<Vec<Frame>, _>>()?;
        let scenes: Vec<Scene> = scenes.into_iter().map(Scene::from).collect();

        let result = self.selector.select_video(&frames, &scenes, &self.descriptor)?;
        info!(
            "✅ Selected {} keyframes from {} frames in {} scenes",
            result.keyframes.len(),
            frames.len(),
            scenes.len()
        );
        Ok(KeyframeReport::from_video(&result, scenes.len()))
    }

    /// 直接用外部距离矩阵选择单个场景的关键帧（场景内局部帧号）
    #[frb(sync)]
    pub fn select_from_distances(
        &self,
        distances: Vec<Vec<f64>>,
    ) -> Result<Vec<u64>, KeyframeError> {
        let distances = DistanceMatrix::from_rows(distances)?;
        let scene = self.selector.select_scene(&distances);
        Ok(scene.keyframes.into_iter().map(|kf| kf as u64).collect())
    }

    /// 保存关键帧到 `<dir>/keyframes.txt`，返回文件路径
    #[frb(sync)]
    pub fn save_keyframes(
        &self,
        dir: String,
        keyframes: Vec<u64>,
    ) -> Result<String, KeyframeError> {
        let keyframes: Vec<usize> = keyframes.into_iter().map(|kf| kf as usize).collect();
        let path = KeyframeStore::new(dir).save(&keyframes)?;
        Ok(path.to_string_lossy().into_owned())
    }

    /// 读取 `<dir>/keyframes.txt`
    #[frb(sync)]
    pub fn load_keyframes(&self, dir: String) -> Result<Vec<u64>, KeyframeError> {
        let keyframes = KeyframeStore::new(dir).load()?;
        Ok(keyframes.into_iter().map(|kf| kf as u64).collect())
    }
}

impl Drop for KeyframeExtractor {
    fn drop(&mut self) {
        info!("🗑️ KeyframeExtractor: released");
    }
}
