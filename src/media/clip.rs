//! Showcase sample clips.
//!
//! Each card on the showcase wall may carry a clip. A clip only plays while
//! enough of its card is on screen (40% by default, high enough that a
//! card skimming the viewport edge doesn't flicker in and out of playback)
//! and it starts muted. Unmuting takes the foreground audible floor, which
//! ducks the background track; muting again (or tearing the clip down while
//! unmuted) releases it.

use rodio::{Decoder, OutputStreamHandle, Sink, Source};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::audio::{ClipId, ForegroundAudio};

/// Fraction of a card that must be visible before its clip plays.
pub const VISIBILITY_THRESHOLD: f32 = 0.4;

pub struct SampleClip {
    id: ClipId,
    sink: Option<Sink>,
    muted: bool,
    playing: bool,
    visible: bool,
}

impl SampleClip {
    /// Cards without media pass `None` for `path` and stay inert. A clip
    /// whose file cannot be opened degrades the same way.
    pub fn new(id: ClipId, handle: Option<&OutputStreamHandle>, path: Option<&Path>) -> Self {
        let sink = match (handle, path) {
            (Some(handle), Some(path)) => open_clip(handle, path),
            _ => None,
        };

        Self {
            id,
            sink,
            muted: true,
            playing: false,
            visible: false,
        }
    }

    pub fn id(&self) -> ClipId {
        self.id
    }

    pub fn has_media(&self) -> bool {
        self.sink.is_some()
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Drive playback from the card's current visibility ratio. Crossing the
    /// threshold pauses or resumes; staying on one side is a no-op, so rapid
    /// oscillation around the edge is harmless.
    pub fn set_visibility(&mut self, ratio: f32, threshold: f32) {
        let above = ratio >= threshold;
        if above == self.visible {
            return;
        }
        self.visible = above;

        let Some(sink) = &self.sink else {
            return;
        };
        if above {
            sink.play();
            self.playing = true;
        } else if self.playing {
            sink.pause();
            self.playing = false;
        }
    }

    /// Flip the clip's own mute state and publish or release the foreground
    /// floor accordingly.
    pub fn toggle_mute(&mut self, floor: &mut ForegroundAudio) {
        self.muted = !self.muted;
        if let Some(sink) = &self.sink {
            sink.set_volume(if self.muted { 0.0 } else { 1.0 });
        }
        if self.muted {
            floor.clear(self.id);
        } else {
            floor.publish(self.id);
        }
    }

    /// Tear the clip down, releasing its sink and, if it was audible, the
    /// foreground floor, so the background track never stays silenced by a
    /// clip that no longer exists.
    pub fn teardown(mut self, floor: &mut ForegroundAudio) {
        if !self.muted {
            floor.clear(self.id);
        }
        if let Some(sink) = self.sink.take() {
            sink.stop();
        }
    }
}

fn open_clip(handle: &OutputStreamHandle, path: &Path) -> Option<Sink> {
    let file = match File::open(path) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Failed to open clip {:?}: {}", path, e);
            return None;
        }
    };
    let decoder = match Decoder::new_looped(BufReader::new(file)) {
        Ok(d) => d,
        Err(e) => {
            eprintln!("Failed to decode clip {:?}: {}", path, e);
            return None;
        }
    };
    let sink = match Sink::try_new(handle) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Failed to open sink for clip {:?}: {}", path, e);
            return None;
        }
    };
    // Muted until the viewer asks for it; paused until the card is visible
    sink.set_volume(0.0);
    sink.append(decoder.convert_samples::<f32>());
    sink.pause();
    Some(sink)
}
