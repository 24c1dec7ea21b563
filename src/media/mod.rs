mod clip;

pub use clip::{SampleClip, VISIBILITY_THRESHOLD};
