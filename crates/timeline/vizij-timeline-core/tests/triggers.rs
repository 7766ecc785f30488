use std::cell::Cell;
use std::rc::Rc;

use vizij_timeline_core::{
    shared, CompositeStateChange, MethodTriggerStateChange, PlaybackState, PlayerConfig,
    PropertyBag, PropertyStateChange, SequencePlayer, SharedTarget, StateChange, TargetRef,
};

fn mk_counter(name: &str) -> (MethodTriggerStateChange, Rc<Cell<u32>>) {
    let hits = Rc::new(Cell::new(0));
    let h = hits.clone();
    let trigger = MethodTriggerStateChange::new(move || h.set(h.get() + 1)).with_name(name);
    (trigger, hits)
}

fn mk_target() -> SharedTarget<PropertyBag> {
    shared(PropertyBag::new("cube").with("x", 0.0))
}

fn cfg(auto_play: bool) -> PlayerConfig {
    PlayerConfig {
        auto_play,
        ..PlayerConfig::default()
    }
}

fn tick_for(player: &mut SequencePlayer, seconds: f64, step: f64) {
    let steps = (seconds / step).round() as usize;
    for _ in 0..steps {
        player.tick(step);
    }
}

/// x animates over [0, 2]; a trigger sits at `at`.
fn mk_timeline(
    at: f64,
    auto_play: bool,
) -> (SequencePlayer, Rc<Cell<u32>>, SharedTarget<PropertyBag>) {
    let obj = mk_target();
    let (trigger, hits) = mk_counter("cue");
    let mut root = CompositeStateChange::new();
    root.add(PropertyStateChange::new(TargetRef::new(&obj), "x", 1.0).with_duration(2.0), 0.0)
        .unwrap();
    root.add_at(trigger, at).unwrap();
    let player = SequencePlayer::new(root, cfg(auto_play)).unwrap();
    (player, hits, obj)
}

/// it should execute once per forward crossing, re-arming on backward seeks
#[test]
fn trigger_exactly_once_law() {
    let (mut player, hits, _obj) = mk_timeline(0.5, true);
    assert!(player.is_playing());
    tick_for(&mut player, 0.8, 0.1);
    assert_eq!(hits.get(), 1);
    tick_for(&mut player, 0.5, 0.1);
    assert_eq!(hits.get(), 1);

    player.seek_to(0.2);
    assert_eq!(hits.get(), 1);
    tick_for(&mut player, 0.6, 0.1);
    assert_eq!(hits.get(), 2);
    tick_for(&mut player, 2.0, 0.1);
    assert_eq!(hits.get(), 2);
    assert_eq!(player.state(), PlaybackState::Finished);
}

#[test]
fn repeated_seeks_past_trigger_while_playing_fire_once() {
    let (mut player, hits, _obj) = mk_timeline(0.5, true);
    player.seek_to(1.0);
    player.seek_to(1.2);
    player.seek_to(1.7);
    assert_eq!(hits.get(), 1);
}

/// it should fire a zero-duration trigger at t=0 when seeking to the end of a parallel block
#[test]
fn parallel_trigger_scenario() {
    let obj = mk_target();
    let (trigger, hits) = mk_counter("start-cue");
    let mut root = CompositeStateChange::new();
    root.add_parallel(trigger, 0.0).unwrap();
    root.add_parallel(
        PropertyStateChange::new(TargetRef::new(&obj), "x", 1.0).with_duration(2.0),
        0.0,
    )
    .unwrap();
    assert_eq!(root.duration(), 2.0);

    let mut player = SequencePlayer::new(root, cfg(true)).unwrap();
    assert_eq!(hits.get(), 0);
    player.seek_to(2.0);
    assert_eq!(hits.get(), 1);
    // Finishing on the next tick must not fire it again.
    player.tick(0.016);
    assert_eq!(player.state(), PlaybackState::Finished);
    assert_eq!(hits.get(), 1);
}

#[test]
fn trigger_at_time_zero_fires_on_first_tick() {
    let (mut player, hits, _obj) = mk_timeline(0.0, true);
    assert_eq!(hits.get(), 0);
    player.tick(0.016);
    assert_eq!(hits.get(), 1);
}

/// it should mark, not fire, triggers crossed by a scrub while not playing
#[test]
fn paused_scrub_marks_without_firing() {
    let (mut player, hits, _obj) = mk_timeline(0.5, false);
    player.seek_to(1.0);
    assert_eq!(hits.get(), 0);
    let cue = player.plan().iter().find(|e| e.start == 0.5).map(|e| e.leaf).unwrap();
    assert!(player.leaf(cue).and_then(|l| l.as_trigger()).unwrap().is_triggered());

    // Resuming after the scrub does not fire it retroactively.
    player.play();
    tick_for(&mut player, 1.5, 0.1);
    assert_eq!(player.state(), PlaybackState::Finished);
    assert_eq!(hits.get(), 0);

    // Scrubbing back re-arms; the next forward pass fires it.
    player.seek_to(0.0);
    assert_eq!(player.state(), PlaybackState::Paused);
    player.resume();
    tick_for(&mut player, 1.0, 0.1);
    assert_eq!(hits.get(), 1);
}

#[test]
fn trigger_at_paused_position_fires_when_playback_moves_on() {
    let (mut player, hits, _obj) = mk_timeline(0.5, false);
    player.seek_to(0.5);
    assert_eq!(hits.get(), 0);
    player.play();
    player.tick(0.1);
    assert_eq!(hits.get(), 1);
}

/// it should re-arm a trigger when a paused seek lands on it from later in the timeline
#[test]
fn landing_on_trigger_is_independent_of_seek_path() {
    let (mut direct, direct_hits, _a) = mk_timeline(0.5, false);
    direct.seek_to(0.5);

    let (mut scrubbed, scrubbed_hits, _b) = mk_timeline(0.5, false);
    scrubbed.seek_to(1.0);
    scrubbed.seek_to(0.5);
    let cue = scrubbed.plan().iter().find(|e| e.start == 0.5).map(|e| e.leaf).unwrap();
    assert!(!scrubbed.leaf(cue).and_then(|l| l.as_trigger()).unwrap().is_triggered());

    for player in [&mut direct, &mut scrubbed] {
        player.play();
        player.tick(0.1);
    }
    assert_eq!(direct_hits.get(), 1);
    assert_eq!(scrubbed_hits.get(), 1);
}

/// it should fire triggers placed exactly at the end of the timeline
#[test]
fn end_trigger_fires_on_completion() {
    let obj = mk_target();
    let (trigger, hits) = mk_counter("end-cue");
    let mut root = CompositeStateChange::new();
    root.add(PropertyStateChange::new(TargetRef::new(&obj), "x", 1.0).with_duration(1.0), 0.0)
        .unwrap();
    root.add(trigger, 0.0).unwrap();
    let mut player = SequencePlayer::new(root, cfg(true)).unwrap();
    player.tick(0.6);
    assert_eq!(hits.get(), 0);
    player.tick(0.6);
    assert_eq!(player.state(), PlaybackState::Finished);
    assert_eq!(hits.get(), 1);
    assert_eq!(obj.borrow().float("x"), Some(1.0));
}

#[test]
fn triggers_run_in_plan_order() {
    let order = Rc::new(std::cell::RefCell::new(Vec::new()));
    let mut root = CompositeStateChange::new();
    for (name, at) in [("b", 0.4), ("a", 0.2), ("c", 0.6)] {
        let o = order.clone();
        root.add_at(MethodTriggerStateChange::new(move || o.borrow_mut().push(name)), at)
            .unwrap();
    }
    let mut player = SequencePlayer::new(root, cfg(true)).unwrap();
    player.seek_to(0.6);
    assert_eq!(*order.borrow(), vec!["a", "b", "c"]);
}
