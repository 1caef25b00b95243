//! One-shot intro sequencing.
//!
//! The sequencer is a forward-only state machine
//! `Idle -> Playing -> Completing -> Done`. Three independent sources can end
//! it: the user skipping, the visual animation reporting that it finished,
//! and a failsafe timer for hosts that never report (throttled background
//! tabs). All three funnel into [`CompleteOnce`], so the completion callback
//! runs exactly once whatever order they arrive in.

use crate::constants::{
    PORTAL_WARP_SEC, TUNNEL_END_SCALE, TUNNEL_SPIN_DEG, TUNNEL_SPIN_SEC, WORMHOLE_FAILSAFE_SEC,
    WORMHOLE_FADE_SEC, WORMHOLE_PLAY_SEC,
};
use crate::ease::Ease;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum IntroPhase {
    Idle,
    Playing,
    Completing,
    Done,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CompletionSource {
    Skip,
    AnimationFinished,
    Failsafe,
}

/// Durations in seconds, measured from `start`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IntroTimeline {
    pub play_sec: f32,
    pub fade_sec: f32,
    pub failsafe_sec: f32,
}

impl IntroTimeline {
    /// Spinning tunnel, then a fade; the failsafe trails the fade slightly.
    pub const fn wormhole() -> Self {
        Self {
            play_sec: WORMHOLE_PLAY_SEC,
            fade_sec: WORMHOLE_FADE_SEC,
            failsafe_sec: WORMHOLE_FAILSAFE_SEC,
        }
    }

    /// The enter-portal warp has no fade of its own; navigation happens when
    /// the timer runs out.
    pub const fn portal() -> Self {
        Self {
            play_sec: PORTAL_WARP_SEC,
            fade_sec: 0.0,
            failsafe_sec: PORTAL_WARP_SEC,
        }
    }

    /// Time at which the visual animation is expected to report completion.
    pub fn finish_sec(&self) -> f32 {
        self.play_sec + self.fade_sec
    }
}

/// Single-fire latch around a callback.
pub struct CompleteOnce {
    callback: Option<Box<dyn FnOnce()>>,
}

impl CompleteOnce {
    pub fn new(callback: impl FnOnce() + 'static) -> Self {
        Self {
            callback: Some(Box::new(callback)),
        }
    }

    /// Run the callback if it has not run yet. Returns whether it ran.
    pub fn fire(&mut self) -> bool {
        match self.callback.take() {
            Some(cb) => {
                cb();
                true
            }
            None => false,
        }
    }

    pub fn has_fired(&self) -> bool {
        self.callback.is_none()
    }
}

impl std::fmt::Debug for CompleteOnce {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompleteOnce")
            .field("fired", &self.has_fired())
            .finish()
    }
}

/// Visual parameters of the wormhole overlay at some instant.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WormholeFrame {
    pub tunnel_rotate_deg: f32,
    pub tunnel_scale: f32,
    pub overlay_opacity: f32,
}

#[derive(Debug)]
pub struct IntroSequencer {
    phase: IntroPhase,
    timeline: IntroTimeline,
    started_at: Option<f64>,
    completed_at: Option<f64>,
    source: Option<CompletionSource>,
    latch: CompleteOnce,
}

impl IntroSequencer {
    pub fn new(timeline: IntroTimeline, on_complete: impl FnOnce() + 'static) -> Self {
        Self {
            phase: IntroPhase::Idle,
            timeline,
            started_at: None,
            completed_at: None,
            source: None,
            latch: CompleteOnce::new(on_complete),
        }
    }

    pub fn phase(&self) -> IntroPhase {
        self.phase
    }

    pub fn timeline(&self) -> IntroTimeline {
        self.timeline
    }

    pub fn is_done(&self) -> bool {
        self.phase == IntroPhase::Done
    }

    pub fn completed_at(&self) -> Option<f64> {
        self.completed_at
    }

    pub fn completion_source(&self) -> Option<CompletionSource> {
        self.source
    }

    fn advance(&mut self, to: IntroPhase) {
        if to > self.phase {
            log::debug!("[intro] {:?} -> {:?}", self.phase, to);
            self.phase = to;
        }
    }

    fn elapsed(&self, now_sec: f64) -> f32 {
        match self.started_at {
            Some(t0) => (now_sec - t0).max(0.0) as f32,
            None => 0.0,
        }
    }

    /// Begin playing. Only meaningful from `Idle`.
    pub fn start(&mut self, now_sec: f64) {
        if self.phase == IntroPhase::Idle {
            self.started_at = Some(now_sec);
            self.advance(IntroPhase::Playing);
        }
    }

    /// Move along the timeline. Reaching the finish time counts as the
    /// animation reporting completion; reaching the failsafe time forces it.
    pub fn tick(&mut self, now_sec: f64) -> IntroPhase {
        if matches!(self.phase, IntroPhase::Idle | IntroPhase::Done) {
            return self.phase;
        }
        let t = self.elapsed(now_sec);
        if self.phase == IntroPhase::Playing && t >= self.timeline.play_sec {
            self.advance(IntroPhase::Completing);
        }
        if self.phase == IntroPhase::Completing && t >= self.timeline.finish_sec() {
            self.finish(CompletionSource::AnimationFinished, now_sec);
        } else if t >= self.timeline.failsafe_sec {
            self.finish(CompletionSource::Failsafe, now_sec);
        }
        self.phase
    }

    /// User skip. Ends the sequence immediately.
    pub fn skip(&mut self, now_sec: f64) -> bool {
        self.finish(CompletionSource::Skip, now_sec)
    }

    /// Completion reported by the visual animation.
    pub fn animation_finished(&mut self, now_sec: f64) -> bool {
        if self.phase == IntroPhase::Idle {
            return false;
        }
        self.finish(CompletionSource::AnimationFinished, now_sec)
    }

    /// The failsafe timer fired.
    pub fn failsafe(&mut self, now_sec: f64) -> bool {
        self.finish(CompletionSource::Failsafe, now_sec)
    }

    /// Returns true only for the call that actually completed the sequence.
    fn finish(&mut self, source: CompletionSource, now_sec: f64) -> bool {
        if self.phase == IntroPhase::Done {
            return false;
        }
        self.advance(IntroPhase::Completing);
        self.advance(IntroPhase::Done);
        self.completed_at = Some(now_sec);
        self.source = Some(source);
        let fired = self.latch.fire();
        log::info!("[intro] done via {:?} at {:.3}s", source, self.elapsed(now_sec));
        fired
    }

    /// Wormhole visuals for the current time; the overlay is fully
    /// transparent once done.
    pub fn wormhole_frame(&self, now_sec: f64) -> WormholeFrame {
        if self.phase == IntroPhase::Done {
            return WormholeFrame {
                tunnel_rotate_deg: TUNNEL_SPIN_DEG,
                tunnel_scale: TUNNEL_END_SCALE,
                overlay_opacity: 0.0,
            };
        }
        wormhole_frame(&self.timeline, self.elapsed(now_sec))
    }
}

/// Tunnel spins and shrinks over `TUNNEL_SPIN_SEC`; the overlay fades out
/// between `play_sec` and `finish_sec`.
pub fn wormhole_frame(timeline: &IntroTimeline, elapsed_sec: f32) -> WormholeFrame {
    let spin = Ease::InOutQuad.apply(elapsed_sec / TUNNEL_SPIN_SEC);
    let fade = if timeline.fade_sec > 0.0 {
        Ease::InOutQuad.apply((elapsed_sec - timeline.play_sec) / timeline.fade_sec)
    } else if elapsed_sec >= timeline.play_sec {
        1.0
    } else {
        0.0
    };
    WormholeFrame {
        tunnel_rotate_deg: TUNNEL_SPIN_DEG * spin,
        tunnel_scale: 1.0 + (TUNNEL_END_SCALE - 1.0) * spin,
        overlay_opacity: 1.0 - fade,
    }
}
