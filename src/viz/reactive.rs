//! Reactive transform driver.
//!
//! The emblem's per-frame motion as a pure function: bass energy drives the
//! scale target, the pointer drives the rotation targets, and both converge
//! through exponential smoothing (`x += factor * (target - x)`). The two
//! signals are orthogonal and never interfere. The smoothing is what keeps
//! frame-to-frame audio noise from reading as jitter.

/// Resting scale of the emblem.
pub const BASE_SCALE: f32 = 0.5;

/// Per-tick smoothing factor for the audio-driven scale.
pub const SCALE_SMOOTHING: f32 = 0.2;

/// Per-tick smoothing factor for the pointer-driven rotation.
pub const ROTATION_SMOOTHING: f32 = 0.1;

/// Fraction of the snapshot treated as the bass band.
const BASS_FRACTION: f32 = 0.2;

/// Bass average at which intensity reaches its nominal ceiling.
const INTENSITY_DOMAIN_MAX: f32 = 200.0;

/// Intensity at the nominal ceiling.
const INTENSITY_RANGE_MAX: f32 = 0.4;

/// Radians of yaw/pitch per unit of normalized pointer travel.
const POINTER_ROTATION: f32 = 0.5;

/// Per-object transform state, mutated once per rendered frame.
#[derive(Debug, Clone, Copy)]
pub struct VisualState {
    pub scale: f32,
    pub yaw: f32,
    pub pitch: f32,
}

impl VisualState {
    pub fn new() -> Self {
        Self {
            scale: BASE_SCALE,
            yaw: 0.0,
            pitch: 0.0,
        }
    }
}

impl Default for VisualState {
    fn default() -> Self {
        Self::new()
    }
}

pub fn lerp(current: f32, target: f32, factor: f32) -> f32 {
    current + (target - current) * factor
}

/// Arithmetic mean of the lowest [`BASS_FRACTION`] of the bins. A degenerate
/// (empty) snapshot counts as silence.
pub fn bass_average(bins: &[u8]) -> f32 {
    let count = (bins.len() as f32 * BASS_FRACTION).floor() as usize;
    if count == 0 {
        return 0.0;
    }
    bins[..count].iter().map(|&b| b as f32).sum::<f32>() / count as f32
}

/// Linear map of the bass average onto scale intensity: [0, 200] → [0, 0.4].
/// Deliberately unclamped above the nominal ceiling: out-of-domain input
/// extrapolates, and the smoothing keeps the visual result tame.
pub fn intensity(average: f32) -> f32 {
    average / INTENSITY_DOMAIN_MAX * INTENSITY_RANGE_MAX
}

/// Advance the state by one display-refresh tick.
///
/// `snapshot` is the latest frequency snapshot, or `None` while no analyser
/// is active (intensity zero; the pointer still steers rotation). `pointer`
/// is normalized to [-1, 1] on each axis.
pub fn tick(state: &mut VisualState, snapshot: Option<&[u8]>, pointer: [f32; 2]) {
    let multiplier = match snapshot {
        Some(bins) => 1.0 + intensity(bass_average(bins)),
        None => 1.0,
    };
    state.scale = lerp(state.scale, BASE_SCALE * multiplier, SCALE_SMOOTHING);

    let target_yaw = pointer[0] * POINTER_ROTATION;
    let target_pitch = -pointer[1] * POINTER_ROTATION;
    state.yaw = lerp(state.yaw, target_yaw, ROTATION_SMOOTHING);
    state.pitch = lerp(state.pitch, target_pitch, ROTATION_SMOOTHING);
}
