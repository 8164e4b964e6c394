//! Enter/exit/restart orchestration and the per-frame driver.

use constel_config::GameConfig;
use constel_hunt::{CameraView, HudSink, HuntPhase, HuntTracker, TargetAcquisition};
use constel_input::InputInbox;
use constel_pilot::{ChaseCamera, PilotState, step_flight, update_chase_camera};
use constel_scene::{NodeId, RenderBatches, SceneRegistry};
use glam::Vec3;
use tracing::{info, warn};

/// Upper bound on one frame's delta time, in seconds. Absorbs background-tab
/// stalls without producing a physics explosion.
pub const MAX_FRAME_DT: f32 = 1.0;

/// Explore-mode camera state, saved on entry and returned on exit so the
/// caller can put its orbit camera back exactly where it was. Opaque to the
/// session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExploreSnapshot {
    /// Camera position.
    pub position: Vec3,
    /// Camera up vector.
    pub up: Vec3,
    /// Vertical field of view in degrees.
    pub fov_deg: f32,
    /// Orbit target point.
    pub target: Vec3,
}

/// The scene a session flies through: the entity registry plus the render
/// batches built from it. Owned by the session while game mode is active and
/// dropped on exit, releasing the render resources.
pub struct SceneData {
    /// Entity arena with the batch reverse index.
    pub registry: SceneRegistry,
    /// Renderer-side instanced batches.
    pub batches: Box<dyn RenderBatches>,
}

/// Pilot and camera state preserved across a mode switch.
#[derive(Debug, Clone)]
struct SavedGameState {
    pilot: PilotState,
    fov_deg: f32,
}

/// Everything one frame tells the caller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameResult {
    /// Pilot speed after the step.
    pub speed: f32,
    /// Whether boost was active.
    pub boosting: bool,
    /// Entity under the crosshair, if any.
    pub hovered: Option<NodeId>,
    /// Entity discovered this frame, if any.
    pub discovered: Option<NodeId>,
    /// Hunt phase after the frame.
    pub phase: HuntPhase,
    /// The info key was pressed this frame.
    pub info_requested: bool,
    /// Soft boundary pressure in `[0, 1]`.
    pub boundary_pressure: f32,
}

impl FrameResult {
    fn idle() -> Self {
        Self {
            speed: 0.0,
            boosting: false,
            hovered: None,
            discovered: None,
            phase: HuntPhase::Inactive,
            info_requested: false,
            boundary_pressure: 0.0,
        }
    }
}

/// One game-mode session: owns pilot, camera, hunt, acquisition, the input
/// inbox, and the scene while active.
pub struct GameSession {
    config: GameConfig,
    inbox: InputInbox,
    aspect: f32,
    active: bool,
    explore: Option<ExploreSnapshot>,
    saved: Option<SavedGameState>,
    scene: Option<SceneData>,
    pilot: PilotState,
    camera: ChaseCamera,
    hunt: HuntTracker,
    targeting: TargetAcquisition,
}

impl GameSession {
    /// Create an inactive session. `seed` drives the hunt's target draws.
    #[must_use]
    pub fn new(config: GameConfig, seed: u64) -> Self {
        let inbox = InputInbox::new(&config.input);
        let camera = ChaseCamera::new(&config.camera);
        Self {
            config,
            inbox,
            aspect: 16.0 / 9.0,
            active: false,
            explore: None,
            saved: None,
            scene: None,
            pilot: PilotState::new(),
            camera,
            hunt: HuntTracker::new(seed),
            targeting: TargetAcquisition::new(),
        }
    }

    /// Whether game mode is currently active.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// The input inbox, for pointer/keyboard event handlers to append into.
    pub fn inbox_mut(&mut self) -> &mut InputInbox {
        &mut self.inbox
    }

    /// Update the viewport aspect ratio used by screen-space acquisition.
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        if height > 0 {
            self.aspect = width as f32 / height as f32;
        }
    }

    /// Session configuration.
    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Pilot state; meaningful while active.
    #[must_use]
    pub fn pilot(&self) -> &PilotState {
        &self.pilot
    }

    /// Chase camera state; meaningful while active.
    #[must_use]
    pub fn camera(&self) -> &ChaseCamera {
        &self.camera
    }

    /// Hunt tracker (phase, targets, progress).
    #[must_use]
    pub fn hunt(&self) -> &HuntTracker {
        &self.hunt
    }

    /// The scene registry, while a scene is installed.
    #[must_use]
    pub fn registry(&self) -> Option<&SceneRegistry> {
        self.scene.as_ref().map(|s| &s.registry)
    }

    /// The most recently discovered entity, for the info readout.
    #[must_use]
    pub fn last_discovered(&self) -> Option<NodeId> {
        self.hunt.last_discovered()
    }

    /// Enter game mode.
    ///
    /// Stores the explore-camera snapshot for the eventual exit, installs
    /// the scene (any stale scene is dropped first, releasing its render
    /// batches before the new ones take over), restores the saved pilot and
    /// camera FOV when resuming (otherwise spawns a fresh pilot), snaps the
    /// chase camera, and starts the hunt.
    pub fn enter(&mut self, scene: SceneData, explore: Option<ExploreSnapshot>, now: f64) {
        if self.active {
            warn!("enter() called while already in game mode; ignored");
            return;
        }
        self.explore = explore;
        self.scene = None;
        self.scene = Some(scene);

        match self.saved.take() {
            Some(saved) => {
                self.pilot = saved.pilot;
                self.camera = ChaseCamera::new(&self.config.camera);
                self.camera.fov_deg = saved.fov_deg;
                info!("Game mode resumed from saved state");
            }
            None => {
                self.pilot = PilotState::new();
                self.camera = ChaseCamera::new(&self.config.camera);
                info!("Game mode entered fresh");
            }
        }
        self.camera.snap_to(&self.pilot, &self.config.camera);

        self.targeting.reset();
        if let Some(scene) = self.scene.as_ref() {
            self.hunt.initialize(&scene.registry, &self.config.hunt, now);
        }
        self.active = true;
    }

    /// Run one frame: input drain, flight, camera, acquisition, hunt, speed
    /// readout, in that order. A no-op before `enter` or after `exit`.
    pub fn frame(&mut self, dt: f32, now: f64, hud: &mut dyn HudSink) -> FrameResult {
        if !self.active {
            return FrameResult::idle();
        }
        let Some(scene) = self.scene.as_mut() else {
            return FrameResult::idle();
        };

        let dt = dt.clamp(0.0, MAX_FRAME_DT);
        let input = self.inbox.drain();

        let flight = step_flight(
            &mut self.pilot,
            &input,
            scene.registry.bounds(),
            &self.config.flight,
            dt,
        );
        update_chase_camera(&mut self.camera, &self.pilot, &flight, &self.config.camera, dt);

        let view = CameraView {
            position: self.camera.pose.position,
            orientation: self.camera.pose.orientation,
            fov_y_deg: self.camera.fov_deg,
            aspect: self.aspect,
        };
        let hovered = self.targeting.update(
            &view,
            self.pilot.pose.position,
            &mut scene.registry,
            scene.batches.as_mut(),
            &self.config.targeting,
            hud,
        );

        let discovered = self.hunt.update(
            self.pilot.pose.position,
            now,
            &mut scene.registry,
            scene.batches.as_mut(),
            hovered,
            &self.config.hunt,
            hud,
        );

        hud.on_speed(flight.speed, flight.boosting);

        FrameResult {
            speed: flight.speed,
            boosting: flight.boosting,
            hovered,
            discovered,
            phase: self.hunt.phase(),
            info_requested: input.info_requested,
            boundary_pressure: flight.boundary_pressure,
        }
    }

    /// Restart the hunt in place: fresh target draw, colors restored, pilot
    /// and camera untouched. A no-op outside game mode.
    pub fn restart(&mut self, now: f64) {
        if !self.active {
            return;
        }
        if let Some(scene) = self.scene.as_mut() {
            self.targeting.reset();
            self.hunt.restart(
                &mut scene.registry,
                scene.batches.as_mut(),
                &self.config.hunt,
                now,
            );
            info!("Hunt restarted");
        }
    }

    /// Exit game mode.
    ///
    /// Saves pilot and camera FOV for a state-preserving re-entry, tears
    /// down the scene (render batches drop here, before any re-entry builds
    /// new ones), and hands back the explore-camera snapshot taken at entry.
    /// Safe to call mid-frame: once it returns, further `frame` calls are
    /// no-ops.
    pub fn exit(&mut self) -> Option<ExploreSnapshot> {
        if !self.active {
            return None;
        }
        self.saved = Some(SavedGameState {
            pilot: self.pilot.clone(),
            fov_deg: self.camera.fov_deg,
        });
        self.hunt.reset();
        self.targeting.reset();
        self.inbox.release_all();
        self.scene = None;
        self.active = false;
        info!("Game mode exited");
        self.explore.take()
    }
}
