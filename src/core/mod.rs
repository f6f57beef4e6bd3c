pub mod clustering;
pub mod keyframes;
pub mod video;
