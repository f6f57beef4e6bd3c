use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum VideoError {
    #[error("frame buffer of {len} bytes does not match {width}x{height}x{channels}")]
    InvalidFrame {
        width: u32,
        height: u32,
        channels: usize,
        len: usize,
    },
    #[error("frame is {found_width}x{found_height}, descriptor needs {width}x{height}")]
    UnexpectedSize {
        width: u32,
        height: u32,
        found_width: u32,
        found_height: u32,
    },
    #[error("scene [{start}, {end}] is outside of {frames} frames")]
    SceneOutOfRange {
        start: usize,
        end: usize,
        frames: usize,
    },
}
