//! Builds a small scene, plays it at 60 Hz, then scrubs backward.
//!
//! Run with `cargo run -p vizij-timeline-core --example walkthrough`.

use std::cell::Cell;
use std::rc::Rc;

use vizij_timeline_core::presets::{self, POSITION, ROTATION, SCALE};
use vizij_timeline_core::{
    shared, timecode, CompositeStateChange, FnSequence, MethodTriggerStateChange, PlayerBuilder,
    PlayerEvent, PropertyBag, PropertyStateChange, StateChange, TargetRef, Transition, Value,
};

fn main() -> anyhow::Result<()> {
    let cube = shared(
        PropertyBag::new("cube")
            .with(POSITION, Value::vec3(0.0, 0.0, 0.0))
            .with(SCALE, Value::vec3(1.0, 1.0, 1.0))
            .with(ROTATION, Value::quat(0.0, 0.0, 0.0, 1.0))
            .with("opacity", 0.0),
    );
    let cue_hits = Rc::new(Cell::new(0u32));

    let r = TargetRef::new(&cube);
    let hits = cue_hits.clone();
    let intro = FnSequence::new("intro", move || {
        let mut root = CompositeStateChange::new().with_name("intro");
        root.add(
            PropertyStateChange::new(r.clone(), "opacity", 1.0)
                .with_transition(Transition::Sine)
                .with_duration(0.5),
            0.0,
        )?;
        root.add(presets::walk_to(&r, [3.0, 0.0, 1.0], 0.5, 0.2)?, timecode(0, 0, 15))?;
        let h = hits.clone();
        root.add_parallel(
            MethodTriggerStateChange::new(move || h.set(h.get() + 1)).with_name("arrival cue"),
            0.5,
        )?;
        root.add(presets::pulse(&r, 1.3, 0.2, 0.1, 0.3)?, 0.0)?;
        Ok(root)
    });

    let mut player = PlayerBuilder::new()
        .sequence(intro)
        .on_finished(|| println!("-- finished --"))
        .build()?;

    println!(
        "{} leaves over {:.3}s",
        player.leaf_count(),
        player.total_duration()
    );
    for entry in player.plan() {
        if let Some(leaf) = player.leaf(entry.leaf) {
            println!("  [{:>6.3} .. {:>6.3}] {}", entry.start, entry.end, leaf.name());
        }
    }

    while player.is_playing() {
        player.tick(1.0 / 60.0);
    }
    println!("cue fired {} time(s)", cue_hits.get());
    println!("position after playback: {:?}", cube.borrow().props.get(POSITION));

    player.seek_to(0.25);
    println!("scrubbed to 0.25s: opacity {:?}", cube.borrow().float("opacity"));

    for event in player.take_events() {
        match event {
            PlayerEvent::Seeked { from, to } => println!("event: seek {from:.3} -> {to:.3}"),
            other => println!("event: {other:?}"),
        }
    }
    Ok(())
}
