//! End-to-end speaker behaviour through the public API, with a recording
//! network standing in for the server's packet fan-out.

use glam::DVec3;
use parking_lot::Mutex;
use std::sync::Arc;
use turtleworks::speaker::{MoveMessage, NoteMessage, SoundMessage};
use turtleworks::{task_channel, SoundNetwork, Speaker, SpeakerHost, TaskRunner};
use uuid::Uuid;

#[derive(Default)]
struct RecordingNetwork {
    moves: Mutex<Vec<MoveMessage>>,
    sounds: Mutex<Vec<(SoundMessage, f64)>>,
    notes: Mutex<Vec<(NoteMessage, f64)>>,
}

impl SoundNetwork for RecordingNetwork {
    fn broadcast_move(&self, message: MoveMessage) {
        self.moves.lock().push(message);
    }

    fn broadcast_sound(&self, message: SoundMessage, range: f64) {
        self.sounds.lock().push((message, range));
    }

    fn broadcast_note(&self, message: NoteMessage, range: f64) {
        self.notes.lock().push((message, range));
    }
}

struct TestHost {
    source: Uuid,
    position: Mutex<DVec3>,
    network: Mutex<Option<Arc<RecordingNetwork>>>,
}

impl TestHost {
    fn new() -> (Arc<Self>, Arc<RecordingNetwork>) {
        let network = Arc::new(RecordingNetwork::default());
        let host = Arc::new(TestHost {
            source: Uuid::new_v4(),
            position: Mutex::new(DVec3::new(0.5, 64.0, 0.5)),
            network: Mutex::new(Some(network.clone())),
        });
        (host, network)
    }

    fn move_to(&self, position: DVec3) {
        *self.position.lock() = position;
    }

    fn shut_down(&self) {
        *self.network.lock() = None;
    }
}

impl SpeakerHost for TestHost {
    fn source(&self) -> Uuid {
        self.source
    }

    fn position(&self) -> DVec3 {
        *self.position.lock()
    }

    fn network(&self) -> Option<Arc<dyn SoundNetwork>> {
        self.network
            .lock()
            .clone()
            .map(|network| network as Arc<dyn SoundNetwork>)
    }
}

fn rig() -> (Speaker, Arc<TestHost>, Arc<RecordingNetwork>, TaskRunner) {
    let (host, network) = TestHost::new();
    let (queue, runner) = task_channel();
    let speaker = Speaker::new(host.clone(), Arc::new(queue));
    speaker.update();
    (speaker, host, network, runner)
}

#[test]
fn note_budget_is_exactly_eight_per_tick() {
    let (speaker, _host, _network, _runner) = rig();
    let budget = speaker.config().max_notes_per_tick;

    for i in 0..budget {
        assert!(
            speaker.play_note("harp", None, None).unwrap(),
            "note {i} within the budget should be admitted"
        );
    }
    assert!(!speaker.play_note("harp", None, None).unwrap());
    assert!(!speaker.play_note("pling", None, None).unwrap());
}

#[test]
fn any_emission_blocks_sounds_for_the_rest_of_the_tick() {
    let (speaker, _host, _network, _runner) = rig();

    assert!(speaker.play_note("harp", None, None).unwrap());
    assert!(!speaker.play_sound("minecraft:block.bell.use", None, None).unwrap());

    speaker.update();
    assert!(speaker.play_sound("minecraft:block.bell.use", None, None).unwrap());
    assert!(!speaker.play_sound("minecraft:block.bell.use", None, None).unwrap());
}

#[test]
fn exhausted_budget_recovers_on_the_next_tick() {
    let (speaker, _host, _network, _runner) = rig();
    let budget = speaker.config().max_notes_per_tick;

    for _ in 0..budget {
        assert!(speaker.play_note("harp", None, None).unwrap());
    }
    assert!(!speaker.play_note("harp", None, None).unwrap());

    speaker.update();
    assert!(speaker.play_note("harp", None, None).unwrap());
}

#[test]
fn validation_failures_leave_the_limiter_untouched() {
    let (speaker, _host, _network, _runner) = rig();

    assert!(speaker.play_sound("no spaces allowed", None, None).is_err());
    assert!(speaker.play_note("harp", Some(f64::INFINITY), None).is_err());
    assert!(speaker.play_note("theremin", None, None).is_err());

    // The slot is still free: a plain sound is admitted in this same tick.
    assert!(speaker.play_sound("minecraft:block.bell.use", None, None).unwrap());
}

#[test]
fn dispatch_is_deferred_until_the_runner_drains() {
    let (speaker, host, network, runner) = rig();

    assert!(speaker.play_note("bell", Some(2.0), Some(12.0)).unwrap());
    assert!(network.notes.lock().is_empty());

    // The message carries the position at admission time, not dispatch time.
    let admitted_at = host.position();
    host.move_to(DVec3::new(100.0, 64.0, 100.0));

    assert_eq!(runner.run_pending(), 1);
    let notes = network.notes.lock();
    let (message, range) = &notes[0];
    assert_eq!(message.position, admitted_at);
    assert_eq!(message.sound.to_string(), "minecraft:block.note_block.bell");
    assert_eq!(message.volume, 2.0);
    assert_eq!(message.speed, 1.0);
    assert_eq!(*range, 32.0);
}

#[test]
fn volume_is_clamped_and_sets_the_range() {
    let (speaker, host, network, runner) = rig();

    assert!(speaker
        .play_sound("minecraft:block.bell.use", Some(100.0), Some(0.8))
        .unwrap());
    runner.run_pending();

    let sounds = network.sounds.lock();
    let (message, range) = &sounds[0];
    assert_eq!(message.source, host.source);
    assert_eq!(message.volume, 3.0);
    assert_eq!(message.pitch, 0.8);
    assert_eq!(*range, 48.0);
}

#[test]
fn dispatch_after_shutdown_is_absorbed() {
    let (speaker, host, network, runner) = rig();

    assert!(speaker.play_sound("minecraft:block.bell.use", None, None).unwrap());
    host.shut_down();

    assert_eq!(runner.run_pending(), 1);
    assert!(network.sounds.lock().is_empty());
}

#[test]
fn no_position_broadcast_before_any_emission() {
    let (speaker, host, network, _runner) = rig();

    for i in 0..50 {
        host.move_to(DVec3::new(i as f64 * 10.0, 64.0, 0.5));
        speaker.update();
    }
    assert!(network.moves.lock().is_empty());
}

#[test]
fn position_broadcast_waits_for_interval_and_displacement() {
    let (speaker, host, network, _runner) = rig();

    // rig() already ticked once, so the clock is at 1 here.
    assert!(speaker.play_note("harp", None, None).unwrap());

    // Ticks 2..=19: interval not yet elapsed, movement notwithstanding.
    for i in 0..18 {
        host.move_to(DVec3::new(i as f64, 64.0, 0.5));
        speaker.update();
        assert!(network.moves.lock().is_empty(), "broadcast before tick 20");
    }

    // Tick 20: first qualifying tick; the first broadcast needs no baseline.
    let settled = DVec3::new(18.0, 64.0, 0.5);
    host.move_to(settled);
    speaker.update();
    {
        let moves = network.moves.lock();
        assert_eq!(moves.len(), 1);
        assert_eq!(moves[0].source, host.source);
        assert_eq!(moves[0].position, settled);
    }

    // Sub-threshold drift never broadcasts, no matter how long it lasts.
    host.move_to(settled + DVec3::new(0.05, 0.0, 0.0));
    for _ in 0..40 {
        speaker.update();
    }
    assert_eq!(network.moves.lock().len(), 1);

    // A move past the threshold is picked up on the next qualifying tick.
    let moved = settled + DVec3::new(0.0, 0.0, 0.2);
    host.move_to(moved);
    speaker.update();
    let moves = network.moves.lock();
    assert_eq!(moves.len(), 2);
    assert_eq!(moves[1].position, moved);
}

#[test]
fn concurrent_notes_never_exceed_the_budget() {
    let (speaker, _host, _network, _runner) = rig();
    let speaker = Arc::new(speaker);
    let budget = speaker.config().max_notes_per_tick;

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let speaker = Arc::clone(&speaker);
            std::thread::spawn(move || {
                let mut admitted = 0u32;
                for _ in 0..10 {
                    if speaker.play_note("harp", None, None).unwrap() {
                        admitted += 1;
                    }
                }
                admitted
            })
        })
        .collect();

    let total: u32 = handles.into_iter().map(|h| h.join().unwrap()).sum();
    assert_eq!(total, budget);
}
