use genie_shooter_core::entity::EntityKind;
use genie_shooter_core::input::{PAD_DOWN, PAD_LEFT, PAD_RIGHT, PAD_SELECT, PAD_START, PAD_UP};
use genie_shooter_core::{DrawCommand, GameState, ScriptedConsole, Simulation, SimulationSnapshot};

fn step(sim: &mut Simulation, console: &mut ScriptedConsole, pad: u8, trigger: bool) {
    console.set_input(pad, trigger);
    sim.advance_checked(console)
        .unwrap_or_else(|violation| panic!("{violation}"));
    console.recorder.present();
}

/// Circles the arena and pulls the trigger twice a second.
fn wander(frame: u32) -> (u8, bool) {
    let pad = match (frame / 45) % 4 {
        0 => PAD_RIGHT,
        1 => PAD_DOWN,
        2 => PAD_LEFT,
        _ => PAD_UP,
    };
    (pad, frame % 30 == 0)
}

#[test]
fn long_session_keeps_every_invariant() {
    let mut console = ScriptedConsole::default();
    let mut sim = Simulation::power_on(&mut console);

    let mut max_enemies = 0;
    let mut sessions = 0;
    for frame in 0..6_000u32 {
        let (pad, trigger) = match sim.game_state() {
            GameState::Gameplay => wander(frame),
            // Alternate so every press is a fresh edge.
            _ => (if frame % 2 == 0 { PAD_START } else { 0 }, false),
        };
        let before = sim.game_state();
        step(&mut sim, &mut console, pad, trigger);
        if before != GameState::Gameplay && sim.game_state() == GameState::Gameplay {
            sessions += 1;
        }
        let snapshot = sim.snapshot();
        max_enemies = max_enemies.max(snapshot.enemies().count());
        assert!(snapshot.pickups().count() <= 1);
    }

    assert!(sessions >= 1);
    assert!(max_enemies >= 1 && max_enemies <= 4);
    assert!(sim.high_score() <= 999);
}

#[test]
fn quitting_returns_to_title_after_cooldown() {
    let mut console = ScriptedConsole::default();
    let mut sim = Simulation::power_on(&mut console);
    step(&mut sim, &mut console, PAD_START, false);
    step(&mut sim, &mut console, 0, false);
    step(&mut sim, &mut console, 0, true);
    assert_eq!(sim.game_state(), GameState::Gameplay);

    step(&mut sim, &mut console, PAD_SELECT, false);
    assert_eq!(sim.game_state(), GameState::GameOver);
    for _ in 0..60 {
        step(&mut sim, &mut console, 0, false);
    }
    step(&mut sim, &mut console, 0, true);
    assert_eq!(sim.game_state(), GameState::Title);
    assert!(console
        .recorder
        .displayed()
        .contains(&DrawCommand::Brightness(4)));
}

#[test]
fn snapshot_serializes_to_json_and_back() {
    let mut console = ScriptedConsole::default();
    let mut sim = Simulation::power_on(&mut console);
    step(&mut sim, &mut console, PAD_START, false);
    step(&mut sim, &mut console, 0, false);
    step(&mut sim, &mut console, PAD_START, false);
    for frame in 0..200 {
        let (pad, trigger) = wander(frame);
        step(&mut sim, &mut console, pad, trigger);
    }

    let snapshot = sim.snapshot();
    let json = serde_json::to_string(&snapshot).expect("snapshot serializes");
    let decoded: SimulationSnapshot = serde_json::from_str(&json).expect("snapshot parses");
    assert_eq!(decoded, snapshot);
    assert!(decoded
        .entities
        .iter()
        .all(|entry| entry.entity.kind != EntityKind::None));
}
