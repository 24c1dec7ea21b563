//! Frequency analysis.
//!
//! Performs a small real-time FFT over the most recently played samples and
//! exposes the result as byte magnitudes, one per frequency bin. The window
//! is deliberately short: the bins drive a per-frame visual, so responsiveness
//! matters more than frequency resolution.

use num_complex::Complex;
use rustfft::{Fft, FftPlanner};
use std::sync::Arc;

/// Transform window size in samples.
pub const WINDOW_SIZE: usize = 256;

/// Number of frequency bins produced per transform.
pub const NUM_BINS: usize = WINDOW_SIZE / 2;

/// dB floor mapped to byte magnitude 0.
const MIN_DB: f32 = -100.0;

/// dB ceiling mapped to byte magnitude 255.
const MAX_DB: f32 = -30.0;

/// Weight of the previous frame when smoothing bin magnitudes.
/// Keeps the bins from flickering at display refresh rates.
const SMOOTHING: f32 = 0.8;

/// Fixed-size analyser. The byte bins are overwritten in place on every
/// call to [`process`](FrequencyAnalyser::process); callers must not retain
/// the returned slice across calls.
pub struct FrequencyAnalyser {
    fft: Arc<dyn Fft<f32>>,
    fft_buffer: Vec<Complex<f32>>,
    fft_window: Vec<f32>,
    smoothed: [f32; NUM_BINS],
    bins: [u8; NUM_BINS],
}

impl FrequencyAnalyser {
    pub fn new() -> Self {
        let mut planner = FftPlanner::new();
        let fft = planner.plan_fft_forward(WINDOW_SIZE);

        // Pre-compute Hann window
        let fft_window: Vec<f32> = (0..WINDOW_SIZE)
            .map(|i| {
                0.5 * (1.0
                    - (2.0 * std::f32::consts::PI * i as f32 / WINDOW_SIZE as f32).cos())
            })
            .collect();

        Self {
            fft,
            fft_buffer: vec![Complex::new(0.0, 0.0); WINDOW_SIZE],
            fft_window,
            smoothed: [0.0; NUM_BINS],
            bins: [0; NUM_BINS],
        }
    }

    /// Run one transform over the newest `WINDOW_SIZE` samples and refresh
    /// the byte bins in place. Shorter inputs are zero-padded.
    pub fn process(&mut self, samples: &[f32]) -> &[u8] {
        let start = samples.len().saturating_sub(WINDOW_SIZE);
        let newest = &samples[start..];

        for i in 0..WINDOW_SIZE {
            if i < newest.len() {
                self.fft_buffer[i] = Complex::new(newest[i] * self.fft_window[i], 0.0);
            } else {
                self.fft_buffer[i] = Complex::new(0.0, 0.0);
            }
        }

        self.fft.process(&mut self.fft_buffer);

        for i in 0..NUM_BINS {
            let magnitude = self.fft_buffer[i].norm() / WINDOW_SIZE as f32;

            // Hold-style smoothing before the dB conversion, so quiet frames
            // decay instead of snapping to the floor
            self.smoothed[i] = self.smoothed[i] * SMOOTHING + magnitude * (1.0 - SMOOTHING);

            let db = 20.0 * (self.smoothed[i] + 1e-10).log10();
            let normalized = ((db - MIN_DB) / (MAX_DB - MIN_DB)).clamp(0.0, 1.0);
            self.bins[i] = (normalized * 255.0) as u8;
        }

        &self.bins
    }

    pub fn bins(&self) -> &[u8] {
        &self.bins
    }
}

impl Default for FrequencyAnalyser {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sine(freq: f32, sample_rate: f32, len: usize, amp: f32) -> Vec<f32> {
        (0..len)
            .map(|i| (2.0 * std::f32::consts::PI * freq * i as f32 / sample_rate).sin() * amp)
            .collect()
    }

    #[test]
    fn silence_yields_zero_bins() {
        let mut analyser = FrequencyAnalyser::new();
        let bins = analyser.process(&vec![0.0; WINDOW_SIZE]);
        assert_eq!(bins.len(), NUM_BINS);
        assert!(bins.iter().all(|&b| b == 0));
    }

    #[test]
    fn empty_input_is_treated_as_silence() {
        let mut analyser = FrequencyAnalyser::new();
        let bins = analyser.process(&[]);
        assert!(bins.iter().all(|&b| b == 0));
    }

    #[test]
    fn low_tone_lights_up_low_bins() {
        let mut analyser = FrequencyAnalyser::new();
        // ~3 cycles per window lands in the low bins
        let samples = sine(3.0 * 44100.0 / WINDOW_SIZE as f32, 44100.0, WINDOW_SIZE, 0.9);

        // Several passes so smoothing settles
        for _ in 0..20 {
            analyser.process(&samples);
        }

        let low: u32 = analyser.bins()[..8].iter().map(|&b| b as u32).sum();
        let high: u32 = analyser.bins()[NUM_BINS / 2..].iter().map(|&b| b as u32).sum();
        assert!(low > 0, "low bins should respond to a low tone");
        assert!(low > high, "low bins ({}) should dominate high bins ({})", low, high);
    }

    #[test]
    fn bins_are_overwritten_in_place() {
        let mut analyser = FrequencyAnalyser::new();
        let loud = sine(3.0 * 44100.0 / WINDOW_SIZE as f32, 44100.0, WINDOW_SIZE, 0.9);
        for _ in 0..20 {
            analyser.process(&loud);
        }
        let peak: u32 = analyser.bins().iter().map(|&b| b as u32).sum();
        assert!(peak > 0);

        // Feed silence; the same buffer decays back toward zero
        for _ in 0..200 {
            analyser.process(&vec![0.0; WINDOW_SIZE]);
        }
        let settled: u32 = analyser.bins().iter().map(|&b| b as u32).sum();
        assert!(settled < peak, "bins should decay after silence");
    }
}
