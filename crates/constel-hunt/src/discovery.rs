//! Discovery hunt: random target subset, proximity discovery, dimming and
//! pulse visual-weight schedule, and one-shot completion.
//!
//! Non-target entities fade toward a dim floor as the session runs, pulling
//! attention toward the remaining targets, which pulse around their base
//! brightness instead. Each discovery refunds some dimming progress so the
//! scene briefly re-brightens as a reward cue.

use std::collections::HashSet;

use constel_config::HuntConfig;
use constel_scene::{NodeId, RenderBatches, SceneRegistry};
use glam::Vec3;
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

use crate::events::HudSink;

/// Hunt session state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HuntPhase {
    /// No session running.
    Inactive,
    /// Session running, targets remain.
    Active,
    /// Every target discovered (or the target set was empty).
    Complete,
}

/// One hunt session: target subset, discoveries, and the dimming schedule.
#[derive(Debug, Clone)]
pub struct HuntTracker {
    phase: HuntPhase,
    targets: Vec<NodeId>,
    discovered: HashSet<NodeId>,
    start_time: f64,
    dimming_progress: f32,
    last_dim_update: f64,
    last_discovered: Option<NodeId>,
    completion_emitted: bool,
    rng: ChaCha8Rng,
}

impl HuntTracker {
    /// Create an inactive tracker. The seed makes target draws
    /// deterministic for tests and replays.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            phase: HuntPhase::Inactive,
            targets: Vec::new(),
            discovered: HashSet::new(),
            start_time: 0.0,
            dimming_progress: 0.0,
            last_dim_update: 0.0,
            last_discovered: None,
            completion_emitted: false,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> HuntPhase {
        self.phase
    }

    /// Target ids for this session, in draw order.
    #[must_use]
    pub fn targets(&self) -> &[NodeId] {
        &self.targets
    }

    /// Whether the given entity is a target this session.
    #[must_use]
    pub fn is_target(&self, id: NodeId) -> bool {
        self.targets.contains(&id)
    }

    /// Discovered target count and total target count.
    #[must_use]
    pub fn progress(&self) -> (usize, usize) {
        (self.discovered.len(), self.targets.len())
    }

    /// Current dimming progress in `[0, 1]`.
    #[must_use]
    pub fn dimming_progress(&self) -> f32 {
        self.dimming_progress
    }

    /// The most recently discovered target, for the info readout.
    #[must_use]
    pub fn last_discovered(&self) -> Option<NodeId> {
        self.last_discovered
    }

    /// Seconds elapsed since the session started.
    #[must_use]
    pub fn elapsed(&self, now: f64) -> f64 {
        now - self.start_time
    }

    /// Start a fresh session: clear discoveries, reset the dimming ramp, and
    /// draw a new random target subset from the placed entities.
    ///
    /// With no placed entities the session is immediately `Complete` and the
    /// completion event is suppressed, so completion can only fire for
    /// sessions that had at least one target.
    pub fn initialize(&mut self, registry: &SceneRegistry, cfg: &HuntConfig, now: f64) {
        self.discovered.clear();
        self.start_time = now;
        self.last_dim_update = now;
        self.dimming_progress = 0.0;
        self.last_discovered = None;
        self.select_targets(registry, cfg.target_count);

        if self.targets.is_empty() {
            self.phase = HuntPhase::Complete;
            self.completion_emitted = true;
            info!("Hunt started with no placed entities; nothing to discover");
        } else {
            self.phase = HuntPhase::Active;
            self.completion_emitted = false;
            info!(targets = self.targets.len(), "Hunt started");
        }
    }

    /// Restart from `Active` or `Complete`: restore every entity's base
    /// color, then start a fresh session with a new target draw.
    pub fn restart(
        &mut self,
        registry: &mut SceneRegistry,
        batches: &mut dyn RenderBatches,
        cfg: &HuntConfig,
        now: f64,
    ) {
        registry.restore_all_base_colors(batches);
        self.initialize(registry, cfg, now);
    }

    /// Stop the session and forget its state (mode exit).
    pub fn reset(&mut self) {
        self.phase = HuntPhase::Inactive;
        self.targets.clear();
        self.discovered.clear();
        self.last_discovered = None;
    }

    /// Per-frame update: proximity discovery, dimming ramp, and target pulse.
    ///
    /// `skip_highlight` names the entity currently holding the crosshair
    /// highlight; the dim/pulse pass leaves it alone so only one component
    /// writes any entity's display color per frame. Returns the last entity
    /// discovered this frame, if any.
    pub fn update(
        &mut self,
        pilot_position: Vec3,
        now: f64,
        registry: &mut SceneRegistry,
        batches: &mut dyn RenderBatches,
        skip_highlight: Option<NodeId>,
        cfg: &HuntConfig,
        hud: &mut dyn HudSink,
    ) -> Option<NodeId> {
        if self.phase == HuntPhase::Inactive {
            return None;
        }

        let mut newly_discovered = None;
        let targets = self.targets.clone();
        for id in targets {
            if self.discovered.contains(&id) {
                continue;
            }
            let Some(node) = registry.get(id) else {
                continue;
            };
            let distance = pilot_position.distance(node.position);
            if distance >= cfg.discovery_radius {
                continue;
            }
            let cooled_down = node
                .last_visit
                .is_none_or(|visit| now - visit > cfg.revisit_cooldown);
            if !cooled_down {
                continue;
            }

            self.discovered.insert(id);
            self.last_discovered = Some(id);
            registry.mark_visited(id, now);
            registry.restore_base_color(id, batches);
            newly_discovered = Some(id);

            // Reward cue: refund dimming so the scene re-brightens briefly.
            self.dimming_progress =
                (self.dimming_progress - cfg.discovery_dim_rebate).max(0.0);
            self.last_dim_update = now;

            let (found, total) = self.progress();
            if let Some(node) = registry.get(id) {
                info!(id = node.id.0, found, total, "Target discovered");
                hud.on_discovery(node, found, total);
            }

            if found == total && !self.targets.is_empty() {
                self.phase = HuntPhase::Complete;
                if !self.completion_emitted {
                    self.completion_emitted = true;
                    let elapsed = self.elapsed(now);
                    info!(elapsed_secs = elapsed, found, "Hunt complete");
                    hud.on_complete(elapsed, found);
                }
            }
        }

        // Dimming ramps toward 1 on wall-clock time, independent of frames.
        let elapsed_since_update = now - self.last_dim_update;
        if cfg.dimming_ramp > 0.0 {
            self.dimming_progress = (self.dimming_progress
                + (elapsed_since_update / cfg.dimming_ramp) as f32)
                .clamp(0.0, 1.0);
        }
        self.last_dim_update = now;

        // Visual weights: non-targets fade out, undiscovered targets pulse.
        let dim_factor = cfg.dim_floor + (1.0 - cfg.dim_floor) * (1.0 - self.dimming_progress);
        let pulse =
            ((now * cfg.pulse_speed).sin() as f32).mul_add(cfg.pulse_intensity, 1.0);
        let ids: Vec<NodeId> = registry.ids().collect();
        for id in ids {
            if skip_highlight == Some(id) {
                continue;
            }
            let is_target = self.targets.contains(&id);
            if !is_target {
                if let Some(base) = registry.get(id).map(|n| n.base_color) {
                    registry.set_display_color(id, base.scaled(dim_factor), batches);
                }
            } else if !self.discovered.contains(&id) {
                if let Some(base) = registry.get(id).map(|n| n.base_color) {
                    registry.set_display_color(id, base.scaled(pulse), batches);
                }
            }
        }
        debug!(
            progress = self.dimming_progress,
            found = self.discovered.len(),
            "hunt frame"
        );

        newly_discovered
    }

    /// Draw `min(count, placed)` distinct targets uniformly at random via a
    /// partial Fisher–Yates shuffle.
    fn select_targets(&mut self, registry: &SceneRegistry, count: usize) {
        let mut pool: Vec<NodeId> = registry.ids().collect();
        let draw = count.min(pool.len());
        for i in 0..draw {
            let j = self.rng.random_range(i..pool.len());
            pool.swap(i, j);
        }
        pool.truncate(draw);
        self.targets = pool;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use constel_scene::{NodeEntity, NodeSeed, Rgb, SphereBatches};

    #[derive(Default)]
    struct RecordingHud {
        discoveries: Vec<(NodeId, usize, usize)>,
        completions: Vec<(f64, usize)>,
    }

    impl HudSink for RecordingHud {
        fn on_discovery(&mut self, entity: &NodeEntity, discovered: usize, total: usize) {
            self.discoveries.push((entity.id, discovered, total));
        }

        fn on_complete(&mut self, elapsed_secs: f64, discovered: usize) {
            self.completions.push((elapsed_secs, discovered));
        }
    }

    fn grid_scene(count: u32) -> (SceneRegistry, SphereBatches) {
        // A line of entities 20 units apart, far enough to visit one at a time.
        let (registry, specs) = SceneRegistry::build((0..count).map(|i| NodeSeed {
            id: NodeId(i),
            position: Some(Vec3::new(i as f32 * 20.0, 0.0, 0.0)),
            color: Rgb::new(0.5, 0.5, 0.5),
        }));
        (registry, SphereBatches::new(&specs))
    }

    fn far_away() -> Vec3 {
        Vec3::new(-1000.0, 0.0, 0.0)
    }

    #[test]
    fn test_initialize_draws_capped_subset() {
        let (registry, _) = grid_scene(30);
        let cfg = HuntConfig::default();
        let mut tracker = HuntTracker::new(7);
        tracker.initialize(&registry, &cfg, 0.0);
        assert_eq!(tracker.phase(), HuntPhase::Active);
        assert_eq!(tracker.targets().len(), 10);
        let unique: HashSet<_> = tracker.targets().iter().collect();
        assert_eq!(unique.len(), 10, "no duplicate targets");

        // Fewer placed entities than the requested count.
        let (small, _) = grid_scene(4);
        tracker.initialize(&small, &cfg, 0.0);
        assert_eq!(tracker.targets().len(), 4);
    }

    #[test]
    fn test_same_seed_same_draw() {
        let (registry, _) = grid_scene(50);
        let cfg = HuntConfig::default();
        let mut a = HuntTracker::new(42);
        let mut b = HuntTracker::new(42);
        a.initialize(&registry, &cfg, 0.0);
        b.initialize(&registry, &cfg, 0.0);
        assert_eq!(a.targets(), b.targets());

        let mut c = HuntTracker::new(43);
        c.initialize(&registry, &cfg, 0.0);
        assert_ne!(a.targets(), c.targets(), "different seed, different draw");
    }

    #[test]
    fn test_empty_scene_completes_without_event() {
        let (mut registry, mut batches) = grid_scene(0);
        let cfg = HuntConfig::default();
        let mut tracker = HuntTracker::new(1);
        let mut hud = RecordingHud::default();
        tracker.initialize(&registry, &cfg, 0.0);
        assert_eq!(tracker.phase(), HuntPhase::Complete);
        tracker.update(Vec3::ZERO, 1.0, &mut registry, &mut batches, None, &cfg, &mut hud);
        assert!(hud.completions.is_empty(), "no completion for empty hunts");
    }

    #[test]
    fn test_discovery_within_radius() {
        let (mut registry, mut batches) = grid_scene(12);
        let cfg = HuntConfig::default();
        let mut tracker = HuntTracker::new(3);
        let mut hud = RecordingHud::default();
        tracker.initialize(&registry, &cfg, 0.0);
        let target = tracker.targets()[0];
        let target_pos = registry.get(target).unwrap().position;

        // Distance 5 with radius 8: discovered this frame.
        let pilot = target_pos + Vec3::new(5.0, 0.0, 0.0);
        tracker.dimming_progress = 0.5;
        let found = tracker.update(pilot, 1.0, &mut registry, &mut batches, None, &cfg, &mut hud);
        assert_eq!(found, Some(target));
        assert_eq!(hud.discoveries, vec![(target, 1, 10)]);
        assert_eq!(tracker.last_discovered(), Some(target));
        // Dimming refunded by the rebate before the (zero-length) ramp step.
        assert!((tracker.dimming_progress() - 0.2).abs() < 1e-5);
    }

    #[test]
    fn test_no_discovery_outside_radius() {
        let (mut registry, mut batches) = grid_scene(12);
        let cfg = HuntConfig::default();
        let mut tracker = HuntTracker::new(3);
        let mut hud = RecordingHud::default();
        tracker.initialize(&registry, &cfg, 0.0);
        let target = tracker.targets()[0];
        let target_pos = registry.get(target).unwrap().position;

        let pilot = target_pos + Vec3::new(cfg.discovery_radius + 0.5, 0.0, 0.0);
        let found = tracker.update(pilot, 1.0, &mut registry, &mut batches, None, &cfg, &mut hud);
        assert_eq!(found, None);
        assert!(hud.discoveries.is_empty());
    }

    #[test]
    fn test_discovered_set_is_monotone_subset() {
        let (mut registry, mut batches) = grid_scene(12);
        let cfg = HuntConfig::default();
        let mut tracker = HuntTracker::new(5);
        let mut hud = RecordingHud::default();
        tracker.initialize(&registry, &cfg, 0.0);

        let mut last_count = 0;
        let targets: Vec<NodeId> = tracker.targets().to_vec();
        for (i, &target) in targets.iter().enumerate() {
            let pos = registry.get(target).unwrap().position;
            tracker.update(pos, i as f64 * 10.0, &mut registry, &mut batches, None, &cfg, &mut hud);
            let (found, total) = tracker.progress();
            assert!(found >= last_count, "discoveries never decrease");
            assert!(found <= total);
            if found < total {
                assert_eq!(tracker.phase(), HuntPhase::Active, "stays active until the last find");
            }
            last_count = found;
        }
        assert_eq!(last_count, targets.len());
    }

    #[test]
    fn test_completion_fires_exactly_once() {
        let (mut registry, mut batches) = grid_scene(6);
        let cfg = HuntConfig {
            target_count: 2,
            ..HuntConfig::default()
        };
        let mut tracker = HuntTracker::new(9);
        let mut hud = RecordingHud::default();
        tracker.initialize(&registry, &cfg, 0.0);
        let targets: Vec<NodeId> = tracker.targets().to_vec();

        let first = registry.get(targets[0]).unwrap().position;
        tracker.update(first, 5.0, &mut registry, &mut batches, None, &cfg, &mut hud);
        assert_eq!(tracker.phase(), HuntPhase::Active, "one target remains");
        assert!(hud.completions.is_empty());

        let second = registry.get(targets[1]).unwrap().position;
        tracker.update(second, 12.0, &mut registry, &mut batches, None, &cfg, &mut hud);
        assert_eq!(tracker.phase(), HuntPhase::Complete);
        assert_eq!(hud.completions, vec![(12.0, 2)]);

        // Frames after completion never re-emit.
        for i in 0..10 {
            tracker.update(second, 13.0 + i as f64, &mut registry, &mut batches, None, &cfg, &mut hud);
        }
        assert_eq!(hud.completions.len(), 1);
    }

    #[test]
    fn test_revisit_cooldown_blocks_rediscovery_after_restart() {
        let (mut registry, mut batches) = grid_scene(1);
        let cfg = HuntConfig {
            target_count: 1,
            ..HuntConfig::default()
        };
        let mut tracker = HuntTracker::new(2);
        let mut hud = RecordingHud::default();
        tracker.initialize(&registry, &cfg, 0.0);
        let target = tracker.targets()[0];
        let pos = registry.get(target).unwrap().position;

        tracker.update(pos, 1.0, &mut registry, &mut batches, None, &cfg, &mut hud);
        assert_eq!(hud.discoveries.len(), 1);

        // Restart draws the same single entity; the pilot is still parked on
        // it, but the visit is too recent.
        tracker.restart(&mut registry, &mut batches, &cfg, 1.5);
        tracker.update(pos, 2.0, &mut registry, &mut batches, None, &cfg, &mut hud);
        assert_eq!(hud.discoveries.len(), 1, "cooldown still active");

        // After the cooldown expires the rediscovery lands.
        tracker.update(pos, 3.0, &mut registry, &mut batches, None, &cfg, &mut hud);
        assert_eq!(hud.discoveries.len(), 2);
    }

    #[test]
    fn test_dimming_progress_stays_in_unit_range() {
        let (mut registry, mut batches) = grid_scene(12);
        let cfg = HuntConfig::default();
        let mut tracker = HuntTracker::new(3);
        let mut hud = RecordingHud::default();
        tracker.initialize(&registry, &cfg, 0.0);

        // Enormous elapsed time saturates at 1.
        tracker.update(far_away(), 1e6, &mut registry, &mut batches, None, &cfg, &mut hud);
        assert!((tracker.dimming_progress() - 1.0).abs() < f32::EPSILON);

        // Repeated rebates floor at 0 (force by discovering at progress 0).
        tracker.dimming_progress = 0.0;
        let target = tracker.targets()[0];
        let pos = registry.get(target).unwrap().position;
        tracker.update(pos, 1e6 + 10.0, &mut registry, &mut batches, None, &cfg, &mut hud);
        assert!(tracker.dimming_progress() >= 0.0);
    }

    #[test]
    fn test_non_targets_dim_and_targets_pulse() {
        let (mut registry, mut batches) = grid_scene(12);
        let cfg = HuntConfig::default();
        let mut tracker = HuntTracker::new(3);
        let mut hud = RecordingHud::default();
        tracker.initialize(&registry, &cfg, 0.0);

        // One second in: dimming_progress = 1.0, non-targets at the floor.
        tracker.update(far_away(), 1.0, &mut registry, &mut batches, None, &cfg, &mut hud);
        let non_target = registry
            .iter()
            .find(|n| !tracker.is_target(n.id))
            .expect("10 of 12 are targets");
        let expected_dim = non_target.base_color.scaled(cfg.dim_floor);
        assert!((non_target.current_color.r - expected_dim.r).abs() < 1e-4);

        // Undiscovered targets pulse around base brightness.
        let target = registry.get(tracker.targets()[0]).unwrap();
        let expected_pulse = ((1.0_f64 * cfg.pulse_speed).sin() as f32)
            .mul_add(cfg.pulse_intensity, 1.0);
        assert!(
            (target.current_color.r - target.base_color.r * expected_pulse).abs() < 1e-4,
            "target should pulse"
        );
    }

    #[test]
    fn test_skip_highlight_is_left_alone() {
        let (mut registry, mut batches) = grid_scene(12);
        let cfg = HuntConfig::default();
        let mut tracker = HuntTracker::new(3);
        let mut hud = RecordingHud::default();
        tracker.initialize(&registry, &cfg, 0.0);

        let highlighted = registry
            .iter()
            .find(|n| !tracker.is_target(n.id))
            .map(|n| n.id)
            .expect("a non-target exists");
        let marker = Rgb::new(9.0, 9.0, 9.0);
        registry.set_display_color(highlighted, marker, &mut batches);

        tracker.update(
            far_away(),
            1.0,
            &mut registry,
            &mut batches,
            Some(highlighted),
            &cfg,
            &mut hud,
        );
        assert_eq!(
            registry.get(highlighted).unwrap().current_color,
            marker,
            "dim pass must not overwrite the crosshair highlight"
        );
    }

    #[test]
    fn test_restart_resets_discoveries_and_redraws() {
        let (mut registry, mut batches) = grid_scene(30);
        let cfg = HuntConfig::default();
        let mut tracker = HuntTracker::new(11);
        let mut hud = RecordingHud::default();
        tracker.initialize(&registry, &cfg, 0.0);
        let first_draw: Vec<NodeId> = tracker.targets().to_vec();

        let target = first_draw[0];
        let pos = registry.get(target).unwrap().position;
        tracker.update(pos, 1.0, &mut registry, &mut batches, None, &cfg, &mut hud);
        assert_eq!(tracker.progress().0, 1);

        tracker.restart(&mut registry, &mut batches, &cfg, 2.0);
        assert_eq!(tracker.phase(), HuntPhase::Active);
        assert_eq!(tracker.progress(), (0, 10));
        assert_ne!(tracker.targets(), first_draw.as_slice(), "fresh draw");
        // Restart restored every display color.
        for node in registry.iter() {
            assert_eq!(node.current_color, node.base_color);
        }
    }

    #[test]
    fn test_inactive_update_is_a_no_op() {
        let (mut registry, mut batches) = grid_scene(5);
        let cfg = HuntConfig::default();
        let mut tracker = HuntTracker::new(1);
        let mut hud = RecordingHud::default();
        let found = tracker.update(Vec3::ZERO, 1.0, &mut registry, &mut batches, None, &cfg, &mut hud);
        assert_eq!(found, None);
        assert!(hud.discoveries.is_empty());
        for node in registry.iter() {
            assert_eq!(node.current_color, node.base_color, "colors untouched");
        }
    }
}
