//! Foreground audio coordination.
//!
//! While a showcase clip is audibly playing, the background track has to
//! duck out of the way. Rather than a bare process-wide flag, the
//! coordinator tracks *which* clip currently holds the audible floor, so a
//! clip tearing down can only release a floor it actually holds, and another
//! clip's unmount never silences or un-silences the wrong thing.

/// Identity of a showcase clip, stable for the clip's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClipId(pub usize);

/// Single-writer audible-floor signal. Any clip may publish; only the
/// current holder's clear releases it.
#[derive(Default)]
pub struct ForegroundAudio {
    holder: Option<ClipId>,
}

impl ForegroundAudio {
    pub fn new() -> Self {
        Self { holder: None }
    }

    /// Mark `id` as the audibly-playing clip. Last writer wins.
    pub fn publish(&mut self, id: ClipId) {
        if self.holder != Some(id) {
            println!("Clip {} takes the audible floor", id.0);
        }
        self.holder = Some(id);
    }

    /// Release the floor, but only if `id` currently holds it.
    pub fn clear(&mut self, id: ClipId) {
        if self.holder == Some(id) {
            self.holder = None;
            println!("Clip {} releases the audible floor", id.0);
        }
    }

    /// True while any foreground clip is presumed audible.
    pub fn is_audible(&self) -> bool {
        self.holder.is_some()
    }

    pub fn holder(&self) -> Option<ClipId> {
        self.holder
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_silent() {
        let floor = ForegroundAudio::new();
        assert!(!floor.is_audible());
        assert_eq!(floor.holder(), None);
    }

    #[test]
    fn publish_then_clear_round_trip() {
        let mut floor = ForegroundAudio::new();
        floor.publish(ClipId(3));
        assert!(floor.is_audible());

        floor.clear(ClipId(3));
        assert!(!floor.is_audible());
    }

    #[test]
    fn non_holder_clear_is_ignored() {
        let mut floor = ForegroundAudio::new();
        floor.publish(ClipId(1));

        // A different clip tearing down must not release clip 1's floor
        floor.clear(ClipId(2));
        assert!(floor.is_audible());
        assert_eq!(floor.holder(), Some(ClipId(1)));
    }

    #[test]
    fn last_publisher_wins() {
        let mut floor = ForegroundAudio::new();
        floor.publish(ClipId(1));
        floor.publish(ClipId(2));
        assert_eq!(floor.holder(), Some(ClipId(2)));

        // Clip 1 muting itself afterwards changes nothing
        floor.clear(ClipId(1));
        assert!(floor.is_audible());

        floor.clear(ClipId(2));
        assert!(!floor.is_audible());
    }

    #[test]
    fn clear_is_idempotent() {
        let mut floor = ForegroundAudio::new();
        floor.publish(ClipId(0));
        floor.clear(ClipId(0));
        floor.clear(ClipId(0));
        assert!(!floor.is_audible());
    }
}
