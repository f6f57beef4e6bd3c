use super::error::VideoError;

/// 颜色直方图使用的缩略帧尺寸
pub const DESCRIPTOR_WIDTH: u32 = 48;
pub const DESCRIPTOR_HEIGHT: u32 = 27;

/// `width * height * channels`，溢出时返回 `None`
fn buffer_len(width: u32, height: u32, channels: usize) -> Option<usize> {
    (width as usize)
        .checked_mul(height as usize)?
        .checked_mul(channels)
}

/// 帧数据结构（RGB，按行存储）
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
    pub frame_number: u64,
}

impl Frame {
    pub fn new(
        width: u32,
        height: u32,
        data: Vec<u8>,
        frame_number: u64,
    ) -> Result<Self, VideoError> {
        if buffer_len(width, height, 3) != Some(data.len()) {
            return Err(VideoError::InvalidFrame {
                width,
                height,
                channels: 3,
                len: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
            frame_number,
        })
    }

    /// 从 RGBA 缓冲区构建，丢弃 alpha
    pub fn from_rgba(
        width: u32,
        height: u32,
        rgba: &[u8],
        frame_number: u64,
    ) -> Result<Self, VideoError> {
        if buffer_len(width, height, 4) != Some(rgba.len()) {
            return Err(VideoError::InvalidFrame {
                width,
                height,
                channels: 4,
                len: rgba.len(),
            });
        }
        let mut rgb = Vec::with_capacity(rgba.len() / 4 * 3);
        for chunk in rgba.chunks_exact(4) {
            rgb.extend_from_slice(&chunk[..3]);
        }
        Self::new(width, height, rgb, frame_number)
    }

    pub fn pixel_count(&self) -> usize {
        self.data.len() / 3
    }

    pub fn pixel(&self, x: u32, y: u32) -> [u8; 3] {
        let idx = (y as usize * self.width as usize + x as usize) * 3;
        [self.data[idx], self.data[idx + 1], self.data[idx + 2]]
    }

    pub fn resize_to(&self, target_width: u32, target_height: u32) -> Result<Frame, VideoError> {
        if self.width == target_width && self.height == target_height {
            return Ok(self.clone());
        }
        let img = image::RgbImage::from_raw(self.width, self.height, self.data.clone())
            .ok_or_else(|| VideoError::InvalidFrame {
                width: self.width,
                height: self.height,
                channels: 3,
                len: self.data.len(),
            })?;
        let resized = image::imageops::resize(
            &img,
            target_width,
            target_height,
            image::imageops::FilterType::Triangle,
        );

        Ok(Frame {
            width: target_width,
            height: target_height,
            data: resized.into_raw(),
            frame_number: self.frame_number,
        })
    }

    /// 缩放到直方图描述子需要的 48x27
    pub fn to_descriptor_size(&self) -> Result<Frame, VideoError> {
        self.resize_to(DESCRIPTOR_WIDTH, DESCRIPTOR_HEIGHT)
    }
}

/// 解码器传来的 YUV420 平面数据
#[derive(Debug)]
pub struct RawFrame {
    pub width: u32,
    pub height: u32,
    pub y_plane: Vec<u8>,
    pub u_plane: Vec<u8>,
    pub v_plane: Vec<u8>,
    pub frame_number: u64,
}

impl RawFrame {
    pub fn to_rgb(&self) -> Result<Frame, VideoError> {
        let invalid = || VideoError::InvalidFrame {
            width: self.width,
            height: self.height,
            channels: 1,
            len: self.y_plane.len(),
        };

        // 奇数尺寸时色度平面向上取整
        let chroma_width = (self.width as usize + 1) / 2;
        let chroma_height = (self.height as usize + 1) / 2;
        let luma_len = buffer_len(self.width, self.height, 1).ok_or_else(invalid)?;
        let rgb_len = buffer_len(self.width, self.height, 3).ok_or_else(invalid)?;
        let chroma_len = chroma_width * chroma_height;
        if self.y_plane.len() < luma_len
            || self.u_plane.len() < chroma_len
            || self.v_plane.len() < chroma_len
        {
            return Err(invalid());
        }

        let width = self.width as usize;
        let mut rgb = vec![0u8; rgb_len];

        for y in 0..self.height as usize {
            for x in 0..width {
                let y_idx = y * width + x;
                let uv_idx = (y / 2) * chroma_width + x / 2;

                let y_val = self.y_plane[y_idx] as f32;
                let u_val = self.u_plane[uv_idx] as f32 - 128.0;
                let v_val = self.v_plane[uv_idx] as f32 - 128.0;

                let out = y_idx * 3;
                rgb[out] = (y_val + 1.402 * v_val).clamp(0.0, 255.0) as u8;
                rgb[out + 1] = (y_val - 0.344136 * u_val - 0.714136 * v_val).clamp(0.0, 255.0) as u8;
                rgb[out + 2] = (y_val + 1.772 * u_val).clamp(0.0, 255.0) as u8;
            }
        }

        Frame::new(self.width, self.height, rgb, self.frame_number)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_creation() {
        let frame = Frame::new(100, 50, vec![255u8; 100 * 50 * 3], 30).unwrap();
        assert_eq!(frame.pixel_count(), 5000);
        assert_eq!(frame.pixel(99, 49), [255, 255, 255]);
        assert_eq!(frame.frame_number, 30);
    }

    #[test]
    fn test_frame_rejects_short_buffer() {
        let err = Frame::new(4, 4, vec![0u8; 10], 0).unwrap_err();
        assert!(matches!(err, VideoError::InvalidFrame { len: 10, .. }));
    }

    #[test]
    fn test_from_rgba_drops_alpha() {
        let rgba = [10u8, 20, 30, 255, 40, 50, 60, 0];
        let frame = Frame::from_rgba(2, 1, &rgba, 0).unwrap();
        assert_eq!(frame.data, vec![10, 20, 30, 40, 50, 60]);
    }

    #[test]
    fn test_resize_to_descriptor_size() {
        let frame = Frame::new(96, 54, vec![128u8; 96 * 54 * 3], 0).unwrap();
        let small = frame.to_descriptor_size().unwrap();

        assert_eq!((small.width, small.height), (DESCRIPTOR_WIDTH, DESCRIPTOR_HEIGHT));
        assert_eq!(small.data.len(), 48 * 27 * 3);
        assert!(small.data.iter().all(|&v| (127..=129).contains(&v)));
    }

    #[test]
    fn test_yuv_grey_to_rgb() {
        let (width, height) = (64u32, 64u32);
        let raw = RawFrame {
            width,
            height,
            y_plane: vec![128u8; (width * height) as usize],
            u_plane: vec![128u8; (width * height / 4) as usize],
            v_plane: vec![128u8; (width * height / 4) as usize],
            frame_number: 3,
        };

        let frame = raw.to_rgb().unwrap();
        assert_eq!(frame.data.len(), (width * height * 3) as usize);
        assert_eq!(frame.pixel(10, 10), [128, 128, 128]);
        assert_eq!(frame.frame_number, 3);
    }

    #[test]
    fn test_oversized_dimensions_are_rejected() {
        let err = Frame::new(65536, 65537, vec![], 0).unwrap_err();
        assert!(matches!(err, VideoError::InvalidFrame { len: 0, .. }));
        assert!(Frame::new(u32::MAX, u32::MAX, vec![], 0).is_err());
        assert!(Frame::from_rgba(u32::MAX, u32::MAX, &[], 0).is_err());

        for (width, height) in [(65536, 65537), (u32::MAX, u32::MAX)] {
            let raw = RawFrame {
                width,
                height,
                y_plane: vec![],
                u_plane: vec![],
                v_plane: vec![],
                frame_number: 0,
            };
            assert!(matches!(raw.to_rgb(), Err(VideoError::InvalidFrame { .. })));
        }
    }

    #[test]
    fn test_yuv_odd_size_uses_rounded_up_chroma() {
        // 3x3 luma, 2x2 chroma; only the bottom-right chroma sample is red-shifted
        let raw = RawFrame {
            width: 3,
            height: 3,
            y_plane: vec![128u8; 9],
            u_plane: vec![128u8; 4],
            v_plane: vec![128, 128, 128, 228],
            frame_number: 0,
        };

        let frame = raw.to_rgb().unwrap();
        assert_eq!(frame.pixel(2, 2)[0], 255);
        assert_eq!(frame.pixel(2, 0)[0], 128);
        assert_eq!(frame.pixel(0, 2)[0], 128);
        assert_eq!(frame.pixel(1, 1)[0], 128);
    }

    #[test]
    fn test_yuv_rejects_missing_planes() {
        let raw = RawFrame {
            width: 8,
            height: 8,
            y_plane: vec![0u8; 10],
            u_plane: vec![],
            v_plane: vec![],
            frame_number: 0,
        };
        assert!(raw.to_rgb().is_err());
    }
}
