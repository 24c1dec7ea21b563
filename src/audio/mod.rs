mod analyser;
mod ducking;
mod session;
mod tap;
mod track;

pub use analyser::{FrequencyAnalyser, NUM_BINS, WINDOW_SIZE};
pub use ducking::{ClipId, ForegroundAudio};
pub use session::AudioSession;
pub use tap::{SampleRing, TapSource};
pub use track::{BackgroundTrack, TrackState};
