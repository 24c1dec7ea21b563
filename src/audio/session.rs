//! Audio session.
//!
//! A single, explicitly-owned session object stands in for the process-wide
//! audio graph: it owns the frequency analyser and the one allowed source
//! connection. Components that need audio access receive it by reference;
//! there is no global lookup.
//!
//! The session starts suspended and only starts running inside a user
//! gesture; a resume attempt outside a gesture is silently inert, matching
//! the unlock rules of the media pipeline it drives.

use crate::audio::analyser::{FrequencyAnalyser, NUM_BINS, WINDOW_SIZE};
use crate::audio::tap::SampleRing;

struct SessionInner {
    analyser: FrequencyAnalyser,
    running: bool,
    source: Option<SampleRing>,
    scratch: Vec<f32>,
}

/// Lazily-created audio session. Create-or-get semantics: [`init`] is
/// idempotent, and the analyser is built exactly once for the session's
/// lifetime no matter how often it is called.
///
/// [`init`]: AudioSession::init
pub struct AudioSession {
    inner: Option<SessionInner>,
}

impl AudioSession {
    pub fn new() -> Self {
        Self { inner: None }
    }

    /// Create the session and its analyser on first call; later calls only
    /// attempt a resume. `gesture` is true when the caller is inside a user
    /// input handler; resuming is refused (silently) without one.
    pub fn init(&mut self, gesture: bool) {
        if self.inner.is_none() {
            self.inner = Some(SessionInner {
                analyser: FrequencyAnalyser::new(),
                running: false,
                source: None,
                scratch: Vec::with_capacity(WINDOW_SIZE),
            });
            println!("Audio session created ({} bins)", NUM_BINS);
        }

        let Some(inner) = self.inner.as_mut() else {
            return;
        };
        if !inner.running && gesture {
            inner.running = true;
        }
    }

    pub fn is_created(&self) -> bool {
        self.inner.is_some()
    }

    pub fn is_running(&self) -> bool {
        matches!(&self.inner, Some(inner) if inner.running)
    }

    /// Whether snapshots currently carry live data.
    pub fn is_active(&self) -> bool {
        matches!(&self.inner, Some(inner) if inner.running && inner.source.is_some())
    }

    /// Wire a sample ring into the analyser. Lazily creates the session if
    /// absent. At most one connection is ever made; repeat attempts are
    /// logged and leave the existing connection intact.
    pub fn connect_source(&mut self, ring: SampleRing) {
        self.init(false);
        let Some(inner) = self.inner.as_mut() else {
            return;
        };

        if inner.source.is_some() {
            eprintln!("Audio source already connected; keeping the existing connection");
            return;
        }
        inner.source = Some(ring);
        println!("Audio source connected to analyser");
    }

    pub fn is_connected(&self) -> bool {
        matches!(&self.inner, Some(inner) if inner.source.is_some())
    }

    /// Refresh the analyser's byte bins from the connected source and return
    /// them. Returns `None` while the session is absent, suspended, or has no
    /// source; callers treat that as zero intensity. The returned slice is
    /// overwritten by the next call.
    pub fn snapshot(&mut self) -> Option<&[u8]> {
        let inner = self.inner.as_mut()?;
        if !inner.running {
            return None;
        }
        let ring = inner.source.as_ref()?;
        ring.copy_into(&mut inner.scratch);
        Some(inner.analyser.process(&inner.scratch))
    }
}

impl Default for AudioSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_is_idempotent() {
        let mut session = AudioSession::new();
        assert!(!session.is_created());

        for _ in 0..5 {
            session.init(false);
        }
        assert!(session.is_created());
        assert!(!session.is_running(), "no gesture, must stay suspended");
    }

    #[test]
    fn resume_requires_gesture() {
        let mut session = AudioSession::new();
        session.init(false);
        assert!(!session.is_running());

        session.init(true);
        assert!(session.is_running());

        // Still running on later gesture-less calls
        session.init(false);
        assert!(session.is_running());
    }

    #[test]
    fn connect_creates_session_lazily() {
        let mut session = AudioSession::new();
        session.connect_source(SampleRing::new(WINDOW_SIZE));
        assert!(session.is_created());
        assert!(session.is_connected());
        assert!(!session.is_running(), "lazy creation must not resume");
    }

    #[test]
    fn double_connect_keeps_first_connection() {
        let mut session = AudioSession::new();

        let first = SampleRing::new(WINDOW_SIZE);
        for i in 0..WINDOW_SIZE {
            first.push((i as f32 * 0.1).sin() * 0.9);
        }
        session.connect_source(first);
        session.connect_source(SampleRing::new(WINDOW_SIZE)); // silent ring, ignored
        session.init(true);

        let bins = session.snapshot().expect("connected session snapshots");
        assert!(
            bins.iter().any(|&b| b > 0),
            "snapshot should still read the first (loud) ring"
        );
    }

    #[test]
    fn init_does_not_reset_connection() {
        let mut session = AudioSession::new();
        session.connect_source(SampleRing::new(WINDOW_SIZE));
        for _ in 0..3 {
            session.init(true);
        }
        assert!(session.is_connected());
        assert!(session.is_active());
    }

    #[test]
    fn snapshot_absent_until_running_and_connected() {
        let mut session = AudioSession::new();
        assert!(session.snapshot().is_none(), "no session");

        session.init(false);
        assert!(session.snapshot().is_none(), "suspended");

        session.init(true);
        assert!(session.snapshot().is_none(), "no source");

        session.connect_source(SampleRing::new(WINDOW_SIZE));
        assert!(session.snapshot().is_some());
    }

    #[test]
    fn snapshot_is_fixed_size() {
        let mut session = AudioSession::new();
        session.init(true);
        session.connect_source(SampleRing::new(WINDOW_SIZE));
        let bins = session.snapshot().unwrap();
        assert_eq!(bins.len(), NUM_BINS);
    }
}
