use super::error::KeyframeError;
use crate::core::clustering::DistanceMatrix;
use crate::core::video::{color_histograms, cosine_distance_matrix, Frame};
use rayon::prelude::*;

/// 为一个场景的帧生成两两距离矩阵
pub trait SceneDescriptor: Send + Sync {
    fn distance_matrix(&self, frames: &[Frame]) -> Result<DistanceMatrix, KeyframeError>;
}

/// 分块颜色直方图 + 余弦距离
#[derive(Debug, Clone, Copy, Default)]
pub struct ColorHistogramDescriptor;

impl ColorHistogramDescriptor {
    pub fn new() -> Self {
        Self
    }
}

impl SceneDescriptor for ColorHistogramDescriptor {
    fn distance_matrix(&self, frames: &[Frame]) -> Result<DistanceMatrix, KeyframeError> {
        let small = frames
            .par_iter()
            .map(Frame::to_descriptor_size)
            .collect::<Result<Vec<_>, _>>()?;
        let histograms = color_histograms(&small)?;
        let distances = cosine_distance_matrix(histograms.view());
        Ok(DistanceMatrix::new(distances)?)
    }
}

/// 由闭包计算距离的描述子（测试和外部特征用）
pub struct FnDescriptor<F> {
    distance: F,
}

impl<F> FnDescriptor<F>
where
    F: Fn(&Frame, &Frame) -> f64 + Send + Sync,
{
    pub fn new(distance: F) -> Self {
        Self { distance }
    }
}

impl<F> SceneDescriptor for FnDescriptor<F>
where
    F: Fn(&Frame, &Frame) -> f64 + Send + Sync,
{
    fn distance_matrix(&self, frames: &[Frame]) -> Result<DistanceMatrix, KeyframeError> {
        let n = frames.len();
        let values = ndarray::Array2::from_shape_fn((n, n), |(i, j)| {
            if i == j {
                0.0
            } else {
                (self.distance)(&frames[i], &frames[j])
            }
        });
        Ok(DistanceMatrix::new(values)?)
    }
}
