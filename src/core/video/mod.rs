pub mod error;
pub mod frame;
pub mod histogram;
pub mod scene;

pub use error::VideoError;
pub use frame::{Frame, RawFrame, DESCRIPTOR_HEIGHT, DESCRIPTOR_WIDTH};
pub use histogram::{color_histogram, color_histograms, cosine_distance_matrix, HISTOGRAM_LEN};
pub use scene::Scene;
