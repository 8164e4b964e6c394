//! Headless Constel demo: a scripted flight through a synthetic dataset.
//!
//! Generates a seeded layout of color-grouped nodes, enters game mode, and
//! flies a scripted pattern for a fixed number of frames, printing hunt
//! events as they happen. Useful for exercising the whole stack end to end
//! without a renderer.
//!
//! Run with: `cargo run -p constel-demo -- --seed 7 --frames 1200`

use clap::Parser;
use constel_config::GameConfig;
use constel_hunt::{HudSink, HuntPhase};
use constel_input::RawKeyEvent;
use constel_scene::{NodeEntity, NodeId, NodeSeed, Rgb, SceneRegistry, SphereBatches};
use constel_session::{ExploreSnapshot, GameSession, SceneData};
use glam::Vec3;
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::info;
use winit::event::ElementState;
use winit::keyboard::{KeyCode, PhysicalKey};

/// CLI arguments for the demo binary.
#[derive(Parser, Debug)]
#[command(name = "constel-demo", about = "Constel game-mode demo flight")]
struct DemoArgs {
    /// Seed for the synthetic layout and the hunt's target draw.
    #[arg(long, default_value_t = 7)]
    seed: u64,

    /// Number of nodes in the synthetic dataset.
    #[arg(long, default_value_t = 400)]
    nodes: u32,

    /// Number of simulated frames to run.
    #[arg(long, default_value_t = 1200)]
    frames: u32,

    /// Simulated frame rate in Hz.
    #[arg(long, default_value_t = 60.0)]
    fps: f64,

    /// Optional config directory (loads or creates `config.ron` there).
    #[arg(long)]
    config_dir: Option<std::path::PathBuf>,
}

/// HUD sink that narrates hunt events to the log.
struct ConsoleHud {
    labels: Vec<String>,
}

impl ConsoleHud {
    fn label(&self, id: NodeId) -> &str {
        self.labels
            .get(id.0 as usize)
            .map_or("<unknown>", String::as_str)
    }
}

impl HudSink for ConsoleHud {
    fn on_hover(&mut self, entity: Option<&NodeEntity>, distance: Option<f32>) {
        if let (Some(entity), Some(distance)) = (entity, distance) {
            info!("Crosshair lock: {} at {:.1}u", self.label(entity.id), distance);
        }
    }

    fn on_discovery(&mut self, entity: &NodeEntity, discovered: usize, total: usize) {
        info!(
            "Discovered {} ({}/{})",
            self.label(entity.id),
            discovered,
            total
        );
    }

    fn on_complete(&mut self, elapsed_secs: f64, discovered: usize) {
        info!(
            "Hunt complete: {} targets in {:.1}s",
            discovered, elapsed_secs
        );
    }
}

/// Family palette for the synthetic dataset, one batch per entry.
const PALETTE: [u32; 8] = [
    0xe6194b, 0x3cb44b, 0xffe119, 0x4363d8, 0xf58231, 0x911eb4, 0x46f0f0, 0xf032e6,
];

/// Generate a seeded layout: nodes scattered in a ball, grouped into
/// palette families, with a few left unplaced to exercise absence handling.
fn synthetic_layout(seed: u64, count: u32) -> (Vec<NodeSeed>, Vec<String>) {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut seeds = Vec::with_capacity(count as usize);
    let mut labels = Vec::with_capacity(count as usize);

    for i in 0..count {
        let family = rng.random_range(0..PALETTE.len());
        labels.push(format!("node-{i:03} (family {family})"));

        // Roughly uniform direction, radius biased toward the shell.
        let theta = rng.random::<f32>() * std::f32::consts::TAU;
        let phi = (1.0 - 2.0 * rng.random::<f32>()).acos();
        let radius = 60.0 * rng.random::<f32>().cbrt();
        let position = (i % 17 != 16).then(|| {
            Vec3::new(
                radius * phi.sin() * theta.cos(),
                radius * phi.sin() * theta.sin(),
                radius * phi.cos(),
            )
        });

        seeds.push(NodeSeed {
            id: NodeId(i),
            position,
            color: Rgb::from_hex(PALETTE[family]),
        });
    }
    (seeds, labels)
}

fn press(session: &mut GameSession, code: KeyCode, down: bool) {
    session.inbox_mut().process_raw(RawKeyEvent {
        key: PhysicalKey::Code(code),
        state: if down {
            ElementState::Pressed
        } else {
            ElementState::Released
        },
        repeat: false,
    });
}

fn main() {
    let args = DemoArgs::parse();

    let config = match &args.config_dir {
        Some(dir) => GameConfig::load_or_create(dir).unwrap_or_else(|err| {
            eprintln!("config error: {err}; using defaults");
            GameConfig::default()
        }),
        None => GameConfig::default(),
    };

    constel_log::init_logging(None, cfg!(debug_assertions), Some(&config));

    info!(
        "Constel demo flight | seed={} nodes={} frames={}",
        args.seed, args.nodes, args.frames
    );

    let (layout, labels) = synthetic_layout(args.seed, args.nodes);
    let (registry, specs) = SceneRegistry::build(layout);
    info!(
        "Synthetic layout ready: {} placed nodes in {} batches",
        registry.len(),
        specs.len()
    );

    let mut session = GameSession::new(config, args.seed);
    let mut hud = ConsoleHud { labels };

    let explore = ExploreSnapshot {
        position: Vec3::new(0.0, 0.0, 200.0),
        up: Vec3::Y,
        fov_deg: 60.0,
        target: Vec3::ZERO,
    };
    session.enter(
        SceneData {
            registry,
            batches: Box::new(SphereBatches::new(&specs)),
        },
        Some(explore),
        0.0,
    );
    session.inbox_mut().set_captured(true);

    let dt = (1.0 / args.fps) as f32;
    press(&mut session, KeyCode::KeyW, true);

    for frame in 0..args.frames {
        let now = (frame + 1) as f64 / args.fps;

        // Scripted choreography: a lazy weave with a boost burst in the
        // middle, enough to sweep past a handful of targets.
        session
            .inbox_mut()
            .on_pointer_motion((now * 0.9).sin() * 6.0, (now * 0.4).cos() * 2.0);
        if frame == args.frames / 3 {
            press(&mut session, KeyCode::ShiftLeft, true);
        }
        if frame == args.frames / 2 {
            press(&mut session, KeyCode::ShiftLeft, false);
        }

        let result = session.frame(dt, now, &mut hud);
        if frame % 120 == 0 {
            let (found, total) = session.hunt().progress();
            info!(
                "frame {frame}: speed={:.1} boosting={} progress={found}/{total}",
                result.speed, result.boosting
            );
        }
        if result.phase == HuntPhase::Complete {
            info!("All targets found, ending flight early");
            break;
        }
    }

    let (found, total) = session.hunt().progress();
    let elapsed = session.hunt().elapsed(args.frames as f64 / args.fps);
    info!("Flight over: {found}/{total} discovered in {elapsed:.1}s");

    let restored = session.exit();
    info!("Returned to explore mode (snapshot restored: {})", restored.is_some());
}
