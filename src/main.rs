//! Demo driver: builds a turtle identity, then runs a speaker through a
//! few simulated seconds of ticks, printing everything it dispatches.

use anyhow::Result;
use glam::DVec3;
use parking_lot::Mutex;
use std::sync::Arc;
use turtleworks::speaker::{MoveMessage, NoteMessage, SoundMessage};
use turtleworks::{
    task_channel, SoundNetwork, Speaker, SpeakerHost, TurtleFamily, TurtleIdentity, TurtleUpgrade,
    UpgradeRegistry,
};
use uuid::Uuid;

/// Prints every message a real server would send to clients.
struct ConsoleNetwork;

impl SoundNetwork for ConsoleNetwork {
    fn broadcast_move(&self, message: MoveMessage) {
        println!("  [move]  {} -> {}", message.source, message.position);
    }

    fn broadcast_sound(&self, message: SoundMessage, range: f64) {
        println!(
            "  [sound] {} vol={:.1} pitch={:.2} range={:.0}",
            message.sound, message.volume, message.pitch, range
        );
    }

    fn broadcast_note(&self, message: NoteMessage, range: f64) {
        println!(
            "  [note]  {} vol={:.1} speed={:.3} range={:.0}",
            message.sound, message.volume, message.speed, range
        );
    }
}

/// A speaker strapped to a turtle drifting east.
struct DriftingHost {
    source: Uuid,
    position: Mutex<DVec3>,
    network: Arc<ConsoleNetwork>,
}

impl SpeakerHost for DriftingHost {
    fn source(&self) -> Uuid {
        self.source
    }

    fn position(&self) -> DVec3 {
        *self.position.lock()
    }

    fn network(&self) -> Option<Arc<dyn SoundNetwork>> {
        Some(self.network.clone() as Arc<dyn SoundNetwork>)
    }
}

fn main() -> Result<()> {
    env_logger::init();

    println!("turtleworks - turtle identity & speaker peripheral demo");
    println!("=======================================================\n");

    let mut registry = UpgradeRegistry::new();
    registry.register(TurtleUpgrade::new("turtleworks:drill", "Drilling"));
    registry.register(TurtleUpgrade::new("turtleworks:speaker", "Noisy"));

    let identity = TurtleIdentity::create(
        TurtleFamily::Advanced,
        42,
        Some("Bard"),
        Some(0x1FB0C8),
        registry.resolve("turtleworks:drill").cloned(),
        registry.resolve("turtleworks:speaker").cloned(),
        200,
        None,
    );
    let name = identity.display_name();
    println!("Turtle: {} {:?}", name.template_key(), name.arguments());
    println!(
        "Record: {}\n",
        serde_json::to_string_pretty(&identity.encode())?
    );

    let host = Arc::new(DriftingHost {
        source: Uuid::new_v4(),
        position: Mutex::new(DVec3::new(0.5, 64.0, 0.5)),
        network: Arc::new(ConsoleNetwork),
    });
    let (queue, runner) = task_channel();
    let speaker = Speaker::new(host.clone(), Arc::new(queue));

    // A minor arpeggio, one note every four ticks, while the turtle drifts.
    let melody = [0.0, 3.0, 7.0, 12.0, 7.0, 3.0];
    for tick in 0u64..60 {
        speaker.update();
        host.position.lock().x += 0.02;

        if tick % 4 == 0 {
            let semitone = melody[(tick / 4) as usize % melody.len()];
            speaker.play_note("harp", Some(1.0), Some(semitone))?;
        }
        if tick == 30 {
            speaker.play_sound("minecraft:entity.player.levelup", Some(0.5), None)?;
        }

        let dispatched = runner.run_pending();
        if dispatched > 0 {
            println!("tick {tick:>2}: dispatched {dispatched} message(s)");
        }
    }

    println!("\nDone.");
    Ok(())
}
