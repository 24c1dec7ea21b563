//! Background music track.
//!
//! The track starts looping immediately but muted (the silent-autoplay
//! stage); the first qualifying user gesture unlocks it: resume the audio
//! session, unmute, set the default volume, and connect the analyser, in
//! that order, with the connection made only once playback has actually
//! started. If playback cannot start the failure is swallowed: the track is
//! simply left non-playing and the user can start it from the controls.
//!
//! Ducking never overwrites the user's stored mute preference: the effective
//! mute is `stored preference OR foreground floor held`, so releasing the
//! floor restores exactly what the user chose.

use rodio::{Decoder, OutputStreamHandle, Sink, Source};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::audio::analyser::WINDOW_SIZE;
use crate::audio::session::AudioSession;
use crate::audio::tap::{SampleRing, TapSource};

/// Gate states for the track. There is no way back to `Locked`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackState {
    /// Pre-gesture: muted, playing silently if the device allows.
    Locked,
    /// Unlocked and audible (subject to the stored mute preference).
    UnlockedAudible,
    /// Unlocked but ducked under a foreground clip.
    UnlockedSuppressed,
}

pub struct BackgroundTrack {
    sink: Option<Sink>,
    ring: SampleRing,
    unlocked: bool,
    muted: bool,
    suppressed: bool,
    playing: bool,
    volume: f32,
    default_volume: f32,
}

impl BackgroundTrack {
    /// Build the track and begin the muted autoplay stage. A missing output
    /// device or an unreadable file leaves an inert track: every control
    /// becomes a no-op and the emblem simply never reacts.
    pub fn new(handle: Option<&OutputStreamHandle>, path: &Path, default_volume: f32) -> Self {
        let ring = SampleRing::new(WINDOW_SIZE);

        let sink = handle.and_then(|h| match Sink::try_new(h) {
            Ok(sink) => Some(sink),
            Err(e) => {
                eprintln!("Failed to open background sink: {}", e);
                None
            }
        });

        let mut track = Self {
            sink,
            ring,
            unlocked: false,
            muted: true,
            suppressed: false,
            playing: false,
            volume: default_volume,
            default_volume,
        };

        if track.sink.is_some() {
            match open_looped(path, track.ring.clone()) {
                Some(source) => {
                    if let Some(sink) = &track.sink {
                        sink.set_volume(0.0);
                        sink.append(source);
                        sink.play();
                    }
                    track.playing = true;
                    println!("Background track playing (muted): {:?}", path);
                }
                None => {
                    track.sink = None;
                }
            }
        }

        track
    }

    /// First-gesture unlock. Unmutes and starts playback; connects the
    /// analyser only once playback has started. Idempotent; the gate calls
    /// this at most once, but a repeat call is harmless.
    pub fn unlock(&mut self, session: &mut AudioSession) {
        if self.unlocked {
            return;
        }

        session.init(true);
        self.muted = false;
        self.volume = self.default_volume;

        match &self.sink {
            Some(sink) => {
                sink.play();
                self.playing = true;
                self.unlocked = true;
                session.connect_source(self.ring.clone());
                println!("Background track unlocked");
            }
            None => {
                // Swallowed: surfaces only as a non-playing state
                eprintln!("Background playback unavailable; waiting for manual start");
            }
        }

        self.apply_volume();
    }

    /// Observe the foreground floor. Forces the effective mute while held;
    /// never forces an unmute against the stored preference.
    pub fn set_suppressed(&mut self, held: bool) {
        if self.suppressed != held {
            self.suppressed = held;
            self.apply_volume();
        }
    }

    pub fn state(&self) -> TrackState {
        if !self.unlocked {
            TrackState::Locked
        } else if self.suppressed {
            TrackState::UnlockedSuppressed
        } else {
            TrackState::UnlockedAudible
        }
    }

    pub fn effective_muted(&self) -> bool {
        self.muted || self.suppressed
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    // Manual controls: direct state mutation, no-ops without a sink.

    pub fn toggle_play(&mut self) {
        let Some(sink) = &self.sink else {
            return;
        };
        if self.playing {
            sink.pause();
            self.playing = false;
        } else {
            sink.play();
            self.playing = true;
        }
    }

    pub fn toggle_mute(&mut self) {
        if self.sink.is_none() {
            return;
        }
        self.muted = !self.muted;
        self.apply_volume();
    }

    pub fn set_volume(&mut self, volume: f32) {
        if self.sink.is_none() {
            return;
        }
        self.volume = volume.clamp(0.0, 1.0);
        // Raising the volume above zero implies the user wants to hear it
        if self.volume > 0.0 && self.muted {
            self.muted = false;
        }
        self.apply_volume();
    }

    pub fn nudge_volume(&mut self, delta: f32) {
        self.set_volume(self.volume + delta);
    }

    fn apply_volume(&self) {
        if let Some(sink) = &self.sink {
            let volume = if self.effective_muted() { 0.0 } else { self.volume };
            sink.set_volume(volume);
        }
    }
}

fn open_looped(path: &Path, ring: SampleRing) -> Option<impl Source<Item = f32> + Send> {
    let file = match File::open(path) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Failed to open background track {:?}: {}", path, e);
            return None;
        }
    };
    let decoder = match Decoder::new_looped(BufReader::new(file)) {
        Ok(d) => d,
        Err(e) => {
            eprintln!("Failed to decode background track {:?}: {}", path, e);
            return None;
        }
    };
    Some(TapSource::new(decoder.convert_samples::<f32>(), ring))
}
