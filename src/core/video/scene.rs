use super::error::VideoError;
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// 镜头检测给出的场景，`start` 与 `end` 均为闭区间帧号
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scene {
    pub start: usize,
    pub end: usize,
}

impl Scene {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn frame_count(&self) -> usize {
        self.end + 1 - self.start
    }

    pub fn frame_range(&self) -> Range<usize> {
        self.start..self.end + 1
    }

    /// Checks that the scene lies inside a video of `total_frames` frames.
    /// Ordering between scenes is not checked.
    pub fn check_bounds(&self, total_frames: usize) -> Result<(), VideoError> {
        if self.start > self.end || self.end >= total_frames {
            return Err(VideoError::SceneOutOfRange {
                start: self.start,
                end: self.end,
                frames: total_frames,
            });
        }
        Ok(())
    }
}

impl From<(usize, usize)> for Scene {
    fn from((start, end): (usize, usize)) -> Self {
        Self::new(start, end)
    }
}
