//! Playback tap.
//!
//! `TapSource` wraps any `rodio::Source<Item = f32>` and mirrors everything it
//! plays into a shared, fixed-length sample ring. Playback is unaffected; the
//! ring is what the analyser reads each frame. Interleaved channels are
//! downmixed to mono before they reach the ring.

use rodio::Source;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Shared fixed-length buffer of the most recent mono samples, oldest first.
#[derive(Clone)]
pub struct SampleRing {
    inner: Arc<Mutex<Vec<f32>>>,
}

impl SampleRing {
    pub fn new(len: usize) -> Self {
        Self {
            inner: Arc::new(Mutex::new(vec![0.0; len])),
        }
    }

    pub fn push(&self, sample: f32) {
        if let Ok(mut buffer) = self.inner.lock() {
            buffer.remove(0);
            buffer.push(sample);
        }
    }

    /// Copy the ring contents into `out`, resizing it to the ring length.
    pub fn copy_into(&self, out: &mut Vec<f32>) {
        if let Ok(buffer) = self.inner.lock() {
            out.clear();
            out.extend_from_slice(&buffer);
        }
    }
}

/// Pass-through source that feeds a [`SampleRing`] as a side effect.
pub struct TapSource<S> {
    inner: S,
    ring: SampleRing,
    channels: u16,
    sample_rate: u32,
    frame_acc: f32,
    frame_pos: u16,
}

impl<S> TapSource<S>
where
    S: Source<Item = f32>,
{
    pub fn new(source: S, ring: SampleRing) -> Self {
        let channels = source.channels().max(1);
        let sample_rate = source.sample_rate();
        Self {
            inner: source,
            ring,
            channels,
            sample_rate,
            frame_acc: 0.0,
            frame_pos: 0,
        }
    }
}

impl<S> Iterator for TapSource<S>
where
    S: Source<Item = f32>,
{
    type Item = f32;

    fn next(&mut self) -> Option<Self::Item> {
        let sample = self.inner.next()?;

        self.frame_acc += sample;
        self.frame_pos += 1;
        if self.frame_pos == self.channels {
            self.ring.push(self.frame_acc / self.channels as f32);
            self.frame_acc = 0.0;
            self.frame_pos = 0;
        }

        Some(sample)
    }
}

impl<S> Source for TapSource<S>
where
    S: Source<Item = f32>,
{
    fn current_frame_len(&self) -> Option<usize> {
        self.inner.current_frame_len()
    }

    fn channels(&self) -> u16 {
        self.channels
    }

    fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    fn total_duration(&self) -> Option<Duration> {
        self.inner.total_duration()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rodio::buffer::SamplesBuffer;

    #[test]
    fn passthrough_preserves_samples() {
        let input: Vec<f32> = (0..100).map(|i| i as f32 / 100.0).collect();
        let source = SamplesBuffer::new(1, 44100, input.clone());
        let ring = SampleRing::new(16);

        let output: Vec<f32> = TapSource::new(source, ring).collect();
        assert_eq!(output, input);
    }

    #[test]
    fn ring_holds_newest_mono_samples() {
        let input: Vec<f32> = (0..32).map(|i| i as f32).collect();
        let source = SamplesBuffer::new(1, 44100, input);
        let ring = SampleRing::new(8);

        let _: Vec<f32> = TapSource::new(source, ring.clone()).collect();

        let mut out = Vec::new();
        ring.copy_into(&mut out);
        assert_eq!(out, vec![24.0, 25.0, 26.0, 27.0, 28.0, 29.0, 30.0, 31.0]);
    }

    #[test]
    fn stereo_is_downmixed() {
        // Interleaved L/R pairs; the ring should see their averages
        let input = vec![1.0, 0.0, 0.5, 0.5, -1.0, 1.0];
        let source = SamplesBuffer::new(2, 44100, input);
        let ring = SampleRing::new(3);

        let _: Vec<f32> = TapSource::new(source, ring.clone()).collect();

        let mut out = Vec::new();
        ring.copy_into(&mut out);
        assert_eq!(out, vec![0.5, 0.5, 0.0]);
    }

    #[test]
    fn source_properties_preserved() {
        let source = SamplesBuffer::new(2, 48000, vec![0.0f32; 8]);
        let tap = TapSource::new(source, SampleRing::new(4));
        assert_eq!(tap.channels(), 2);
        assert_eq!(tap.sample_rate(), 48000);
    }

    #[test]
    fn ring_starts_silent() {
        let ring = SampleRing::new(4);
        let mut out = Vec::new();
        ring.copy_into(&mut out);
        assert_eq!(out, vec![0.0; 4]);
    }
}
