// Host-side tests for the intro sequencer and its complete-once latch.

use portal_core::{
    wormhole_frame, CompleteOnce, CompletionSource, IntroPhase, IntroSequencer, IntroTimeline,
};
use std::cell::Cell;
use std::rc::Rc;

fn counting_sequencer(timeline: IntroTimeline) -> (IntroSequencer, Rc<Cell<u32>>) {
    let count = Rc::new(Cell::new(0));
    let c = count.clone();
    let seq = IntroSequencer::new(timeline, move || c.set(c.get() + 1));
    (seq, count)
}

fn timeline_3400ms() -> IntroTimeline {
    IntroTimeline {
        play_sec: 2.6,
        fade_sec: 0.8,
        failsafe_sec: 3.6,
    }
}

#[test]
fn starts_idle_and_plays_on_start() {
    let (mut seq, count) = counting_sequencer(IntroTimeline::wormhole());
    assert_eq!(seq.phase(), IntroPhase::Idle);
    assert_eq!(seq.tick(10.0), IntroPhase::Idle);
    seq.start(1.0);
    assert_eq!(seq.phase(), IntroPhase::Playing);
    assert_eq!(count.get(), 0);
}

#[test]
fn skip_during_playing_completes_immediately_once() {
    let (mut seq, count) = counting_sequencer(timeline_3400ms());
    seq.start(0.0);
    assert_eq!(seq.tick(0.1), IntroPhase::Playing);
    assert!(seq.skip(0.1));
    assert_eq!(seq.phase(), IntroPhase::Done);
    assert_eq!(seq.completed_at(), Some(0.1));
    assert_eq!(seq.completion_source(), Some(CompletionSource::Skip));
    assert_eq!(count.get(), 1);

    // Later timer expiry is a no-op
    assert_eq!(seq.tick(3.4), IntroPhase::Done);
    assert!(!seq.failsafe(3.6));
    assert_eq!(count.get(), 1);
    assert_eq!(seq.completed_at(), Some(0.1));
}

#[test]
fn timer_elapsing_without_skip_completes_once() {
    let (mut seq, count) = counting_sequencer(timeline_3400ms());
    seq.start(0.0);
    assert_eq!(seq.tick(1.0), IntroPhase::Playing);
    assert_eq!(seq.tick(2.7), IntroPhase::Completing);
    assert_eq!(count.get(), 0);
    assert_eq!(seq.tick(3.4), IntroPhase::Done);
    assert_eq!(
        seq.completion_source(),
        Some(CompletionSource::AnimationFinished)
    );
    assert_eq!(count.get(), 1);
    seq.tick(5.0);
    assert_eq!(count.get(), 1);
}

#[test]
fn skip_and_timer_racing_fire_once() {
    let (mut seq, count) = counting_sequencer(timeline_3400ms());
    seq.start(0.0);
    seq.tick(3.0);
    let a = seq.animation_finished(3.4);
    let b = seq.skip(3.4);
    let c = seq.failsafe(3.6);
    assert!(a);
    assert!(!b && !c);
    assert_eq!(count.get(), 1);
}

#[test]
fn failsafe_guarantees_progress_when_animation_never_reports() {
    let (mut seq, count) = counting_sequencer(IntroTimeline::wormhole());
    seq.start(0.0);
    // Host never ticks (backgrounded tab); only the timeout fires
    assert!(seq.failsafe(3.6));
    assert_eq!(seq.phase(), IntroPhase::Done);
    assert_eq!(seq.completion_source(), Some(CompletionSource::Failsafe));
    assert_eq!(count.get(), 1);
}

#[test]
fn tick_past_failsafe_completes_even_when_stuck_in_playing() {
    let timeline = IntroTimeline {
        play_sec: 10.0,
        fade_sec: 1.0,
        failsafe_sec: 4.0,
    };
    let (mut seq, count) = counting_sequencer(timeline);
    seq.start(0.0);
    assert_eq!(seq.tick(3.9), IntroPhase::Playing);
    assert_eq!(seq.tick(4.0), IntroPhase::Done);
    assert_eq!(seq.completion_source(), Some(CompletionSource::Failsafe));
    assert_eq!(count.get(), 1);
}

#[test]
fn phase_never_moves_backwards() {
    let (mut seq, _count) = counting_sequencer(timeline_3400ms());
    seq.start(0.0);
    let mut last = seq.phase();
    for i in 0..50 {
        let p = seq.tick(i as f64 * 0.1);
        assert!(p >= last, "{p:?} after {last:?}");
        last = p;
    }
    assert_eq!(last, IntroPhase::Done);
    seq.start(10.0);
    assert_eq!(seq.phase(), IntroPhase::Done);
}

#[test]
fn animation_signal_before_start_is_ignored() {
    let (mut seq, count) = counting_sequencer(IntroTimeline::wormhole());
    assert!(!seq.animation_finished(0.0));
    assert_eq!(seq.phase(), IntroPhase::Idle);
    assert_eq!(count.get(), 0);
}

#[test]
fn portal_timeline_completes_at_warp_end() {
    let (mut seq, count) = counting_sequencer(IntroTimeline::portal());
    seq.start(2.0);
    assert_eq!(seq.tick(6.9), IntroPhase::Playing);
    assert_eq!(seq.tick(7.0), IntroPhase::Done);
    assert_eq!(count.get(), 1);
}

#[test]
fn complete_once_latch_runs_callback_once() {
    let hits = Rc::new(Cell::new(0));
    let h = hits.clone();
    let mut latch = CompleteOnce::new(move || h.set(h.get() + 1));
    assert!(!latch.has_fired());
    assert!(latch.fire());
    assert!(!latch.fire());
    assert!(latch.has_fired());
    assert_eq!(hits.get(), 1);
}

#[test]
fn wormhole_frame_spins_then_fades() {
    let t = IntroTimeline::wormhole();
    let start = wormhole_frame(&t, 0.0);
    assert_eq!(start.tunnel_rotate_deg, 0.0);
    assert_eq!(start.tunnel_scale, 1.0);
    assert_eq!(start.overlay_opacity, 1.0);

    let spun = wormhole_frame(&t, 2.4);
    assert!((spun.tunnel_rotate_deg - 720.0).abs() < 1e-3);
    assert!((spun.tunnel_scale - 0.05).abs() < 1e-4);
    assert_eq!(spun.overlay_opacity, 1.0);

    let gone = wormhole_frame(&t, t.finish_sec());
    assert!(gone.overlay_opacity.abs() < 1e-6);
}

#[test]
fn done_sequencer_reports_transparent_overlay() {
    let (mut seq, _count) = counting_sequencer(IntroTimeline::wormhole());
    seq.start(0.0);
    seq.skip(0.5);
    assert_eq!(seq.wormhole_frame(0.5).overlay_opacity, 0.0);
}
