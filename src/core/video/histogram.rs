//! 分块颜色直方图与余弦距离矩阵

use super::error::VideoError;
use super::frame::{Frame, DESCRIPTOR_HEIGHT, DESCRIPTOR_WIDTH};
use ndarray::{Array2, ArrayView1, ArrayView2, Axis};
use rayon::prelude::*;

/// 3 行 x 4 列的分块（像素行区间）
const TILE_ROWS: [(u32, u32); 3] = [(0, 9), (9, 18), (18, 27)];
/// 分块的像素列区间
const TILE_COLS: [(u32, u32); 4] = [(0, 12), (12, 24), (24, 36), (36, 48)];

pub const BINS_PER_CHANNEL: usize = 6;
pub const BINS_PER_TILE: usize = BINS_PER_CHANNEL * BINS_PER_CHANNEL * BINS_PER_CHANNEL;
pub const TILE_COUNT: usize = TILE_ROWS.len() * TILE_COLS.len();
pub const HISTOGRAM_LEN: usize = TILE_COUNT * BINS_PER_TILE;

#[inline]
fn bin(value: u8) -> usize {
    value as usize * BINS_PER_CHANNEL / 256
}

/// 单帧直方图：每块一个 6x6x6 联合颜色直方图，共 2592 维
///
/// The frame must already be 48x27, see [`Frame::to_descriptor_size`].
pub fn color_histogram(frame: &Frame) -> Result<Vec<f64>, VideoError> {
    if frame.width != DESCRIPTOR_WIDTH || frame.height != DESCRIPTOR_HEIGHT {
        return Err(VideoError::UnexpectedSize {
            width: DESCRIPTOR_WIDTH,
            height: DESCRIPTOR_HEIGHT,
            found_width: frame.width,
            found_height: frame.height,
        });
    }
    if frame.data.len() != (DESCRIPTOR_WIDTH * DESCRIPTOR_HEIGHT * 3) as usize {
        return Err(VideoError::InvalidFrame {
            width: frame.width,
            height: frame.height,
            channels: 3,
            len: frame.data.len(),
        });
    }

    let mut hist = vec![0.0; HISTOGRAM_LEN];
    let mut tile = 0;
    for &(y_low, y_high) in &TILE_ROWS {
        for &(x_low, x_high) in &TILE_COLS {
            let offset = tile * BINS_PER_TILE;
            for y in y_low..y_high {
                for x in x_low..x_high {
                    let [r, g, b] = frame.pixel(x, y);
                    let idx = (bin(r) * BINS_PER_CHANNEL + bin(g)) * BINS_PER_CHANNEL + bin(b);
                    hist[offset + idx] += 1.0;
                }
            }
            tile += 1;
        }
    }
    Ok(hist)
}

/// 并行计算一组帧的直方图，返回 `[frames, 2592]`
pub fn color_histograms(frames: &[Frame]) -> Result<Array2<f64>, VideoError> {
    let rows = frames
        .par_iter()
        .map(color_histogram)
        .collect::<Result<Vec<_>, _>>()?;

    let mut histograms = Array2::zeros((frames.len(), HISTOGRAM_LEN));
    for (mut row, hist) in histograms.axis_iter_mut(Axis(0)).zip(rows.iter()) {
        row.assign(&ArrayView1::from(hist.as_slice()));
    }
    Ok(histograms)
}

/// `1 - cosine_similarity`，结果截断到 `>= 0`
///
/// Rows with zero norm have similarity 0 to everything, themselves
/// included.
pub fn cosine_distance_matrix(features: ArrayView2<'_, f64>) -> Array2<f64> {
    let mut normalized = features.to_owned();
    for mut row in normalized.axis_iter_mut(Axis(0)) {
        let norm = row.dot(&row).sqrt();
        if norm > 0.0 {
            row.mapv_inplace(|v| v / norm);
        }
    }

    let similarity = normalized.dot(&normalized.t());
    // rounding can push identical rows slightly below zero
    similarity.mapv(|s| (1.0 - s).max(0.0))
}
