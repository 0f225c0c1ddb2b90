//! # Playground
//!
//! The single context that owns the simulation: physics world, scene,
//! pairings, frame clock and the optional hit sound. Nothing in here needs a
//! window or a GL context, so every behavior is covered by unit tests; the
//! engine loop only feeds it elapsed time and debug actions.
//!
//! ## Frame
//!
//! ```text
//! elapsed ─► FrameClock ─► delta ─► PhysicsWorld::step ─► impacts ─► HitSound
//!                                          │
//!                                          ▼
//!                                   sync_transforms ─► Scene
//! ```

use crate::audio::{AudioBackend, HitSound};
use crate::core::{
    FloorConfig, InitialObject, ObjectMaterialConfig, PhysicsConfig, PlaygroundConfig, SpawnConfig,
};
use crate::foundation::math::{vec3_from_array, Quat, Transform, Vec3};
use crate::foundation::time::FrameClock;
use crate::pairing::{sync_transforms, ObjectKind, ObjectPairing, PairingSet};
use crate::physics::{BodyDesc, BodyShape, Impact, PhysicsError, PhysicsWorld};
use crate::scene::{MeshId, MeshShape, Scene, SceneObject, SurfaceMaterial};
use crate::ui::{DebugAction, SpawnCounters};
use rand::Rng;

/// What happened during one [`Playground::tick`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameReport {
    /// Seconds since the previous tick
    pub delta: f64,
    /// Fixed physics steps taken
    pub sub_steps: u32,
    /// Contacts that started this frame
    pub impacts: Vec<Impact>,
    /// Hit sounds started this frame
    pub sounds_played: u32,
}

/// Physics world, scene and the pairings between them
pub struct Playground {
    world: PhysicsWorld,
    scene: Scene,
    pairings: PairingSet,
    clock: FrameClock,
    floor: MeshId,
    hit_sound: Option<HitSound>,
    audio: Option<Box<dyn AudioBackend>>,
    physics: PhysicsConfig,
    spawn: SpawnConfig,
    objects: ObjectMaterialConfig,
}

impl Playground {
    /// Empty world with the floor in place
    pub fn new(config: &PlaygroundConfig) -> Self {
        let world = PhysicsWorld::new(&config.physics);
        let mut scene = Scene::new();
        let floor = scene.add(floor_object(&config.floor));

        log::info!(
            "Playground ready: {}x{} floor, fixed step {:.4}s, up to {} sub-steps",
            config.floor.size,
            config.floor.size,
            config.physics.fixed_timestep,
            config.physics.max_sub_steps
        );

        Self {
            world,
            scene,
            pairings: PairingSet::new(),
            clock: FrameClock::new(),
            floor,
            hit_sound: None,
            audio: None,
            physics: config.physics.clone(),
            spawn: config.spawn.clone(),
            objects: config.objects.clone(),
        }
    }

    /// Wire up collision audio
    pub fn set_audio(&mut self, backend: Box<dyn AudioBackend>, hit_sound: HitSound) {
        log::info!("Hit sound enabled (threshold {:.2} m/s)", hit_sound.threshold());
        self.audio = Some(backend);
        self.hit_sound = Some(hit_sound);
    }

    /// Whether collisions can make noise
    pub fn has_audio(&self) -> bool {
        self.audio.is_some() && self.hit_sound.is_some()
    }

    /// Drop a sphere of `radius` centered at `position`
    pub fn create_sphere(&mut self, radius: f32, position: Vec3) -> Result<ObjectPairing, PhysicsError> {
        let shape = MeshShape::Sphere {
            radius,
            segments: self.objects.sphere_segments,
        };
        self.create_object(ObjectKind::Sphere, BodyShape::Sphere { radius }, shape, position)
    }

    /// Drop a box with the given edge lengths centered at `position`
    pub fn create_box(
        &mut self,
        width: f32,
        height: f32,
        depth: f32,
        position: Vec3,
    ) -> Result<ObjectPairing, PhysicsError> {
        self.create_object(
            ObjectKind::Box,
            BodyShape::cuboid(width, height, depth),
            MeshShape::Cuboid { width, height, depth },
            position,
        )
    }

    fn create_object(
        &mut self,
        kind: ObjectKind,
        body_shape: BodyShape,
        mesh_shape: MeshShape,
        position: Vec3,
    ) -> Result<ObjectPairing, PhysicsError> {
        // The body validates the parameters, so it goes first and a rejected
        // object leaves no orphan mesh behind.
        let body = self
            .world
            .add_body(&BodyDesc::new(body_shape, self.physics.object_mass, position))?;
        let mesh = self.scene.add(SceneObject::new(
            mesh_shape,
            SurfaceMaterial {
                color: self.objects.color,
                metalness: self.objects.metalness,
                roughness: self.objects.roughness,
                environment_mapped: true,
            },
            Transform::from_position(position),
        ));

        let pairing = ObjectPairing { kind, mesh, body };
        self.pairings.push(pairing);
        log::info!(
            "Created {:?} at ({:.2}, {:.2}, {:.2}), {} objects",
            kind,
            position.x,
            position.y,
            position.z,
            self.pairings.len()
        );
        Ok(pairing)
    }

    /// Create every object of a startup list
    pub fn create_initial_objects(&mut self, objects: &[InitialObject]) -> Result<Vec<ObjectPairing>, PhysicsError> {
        objects
            .iter()
            .map(|object| match *object {
                InitialObject::Sphere { radius, position } => {
                    self.create_sphere(radius, vec3_from_array(position))
                }
                InitialObject::Box { size, position } => {
                    self.create_box(size[0], size[1], size[2], vec3_from_array(position))
                }
            })
            .collect()
    }

    /// Sphere with a random radius at a random spot above the floor
    pub fn spawn_random_sphere<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<ObjectPairing, PhysicsError> {
        let radius = rng.gen_range(self.spawn.min_size..=self.spawn.max_sphere_radius);
        let position = self.random_spawn_position(rng);
        self.create_sphere(radius, position)
    }

    /// Box with random edges at a random spot above the floor
    pub fn spawn_random_box<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<ObjectPairing, PhysicsError> {
        let range = self.spawn.min_size..=self.spawn.max_box_size;
        let width = rng.gen_range(range.clone());
        let height = rng.gen_range(range.clone());
        let depth = rng.gen_range(range);
        let position = self.random_spawn_position(rng);
        self.create_box(width, height, depth, position)
    }

    fn random_spawn_position<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec3 {
        let extent = self.spawn.half_extent;
        Vec3::new(
            rng.gen_range(-extent..=extent),
            self.spawn.height,
            rng.gen_range(-extent..=extent),
        )
    }

    /// Run a debug-panel action
    pub fn apply<R: Rng + ?Sized>(&mut self, action: DebugAction, rng: &mut R) -> Result<ObjectPairing, PhysicsError> {
        match action {
            DebugAction::CreateSphere => self.spawn_random_sphere(rng),
            DebugAction::CreateBox => self.spawn_random_box(rng),
        }
    }

    /// Advance to `elapsed_seconds` since startup
    pub fn tick<R: Rng + ?Sized>(&mut self, elapsed_seconds: f64, rng: &mut R) -> FrameReport {
        let delta = self.clock.tick(elapsed_seconds);
        let step = self
            .world
            .step(self.physics.fixed_timestep, delta, self.physics.max_sub_steps);
        sync_transforms(&self.world, &mut self.scene, &self.pairings);

        let sounds_played = self.play_hit_sound(&step.impacts, rng);
        if let Some(audio) = self.audio.as_mut() {
            audio.update();
        }

        if step.sub_steps > 0 {
            log::trace!(
                "Frame {}: delta {:.4}s, {} sub-steps, {} impacts",
                self.clock.frame_count(),
                delta,
                step.sub_steps,
                step.impacts.len()
            );
        }

        FrameReport {
            delta,
            sub_steps: step.sub_steps,
            impacts: step.impacts,
            sounds_played,
        }
    }

    /// Play the clip once for the hardest impact that involves a paired object
    fn play_hit_sound<R: Rng + ?Sized>(&mut self, impacts: &[Impact], rng: &mut R) -> u32 {
        let (Some(hit_sound), Some(audio)) = (self.hit_sound.as_mut(), self.audio.as_mut()) else {
            return 0;
        };

        let pairings = &self.pairings;
        let strongest = impacts
            .iter()
            .filter(|impact| {
                pairings.find_by_body(impact.body1).is_some() || pairings.find_by_body(impact.body2).is_some()
            })
            .map(|impact| impact.speed)
            .fold(None, |best: Option<f32>, speed| Some(best.map_or(speed, |b| b.max(speed))));

        let Some(speed) = strongest else {
            return 0;
        };
        match hit_sound.on_impact(speed, audio.as_mut(), rng) {
            Ok(Some(_)) => 1,
            Ok(None) => 0,
            Err(e) => {
                log::warn!("Hit sound failed: {}", e);
                0
            }
        }
    }

    /// Sphere and box counts for the debug panel
    pub fn counters(&self) -> SpawnCounters {
        SpawnCounters {
            spheres: self.pairings.count_of(ObjectKind::Sphere),
            boxes: self.pairings.count_of(ObjectKind::Box),
        }
    }

    /// Renderable objects
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Rigid-body world
    pub fn world(&self) -> &PhysicsWorld {
        &self.world
    }

    /// Mesh and body pairs
    pub fn pairings(&self) -> &PairingSet {
        &self.pairings
    }

    /// Floor mesh
    pub fn floor(&self) -> MeshId {
        self.floor
    }

    /// Stop all sounds and release the audio device
    pub fn shutdown_audio(&mut self) {
        if let Some(mut audio) = self.audio.take() {
            audio.shutdown();
        }
        self.hit_sound = None;
    }
}

fn floor_object(config: &FloorConfig) -> SceneObject {
    // The plane primitive faces +Z; tip it over so it faces up
    let rotation = Quat::from_axis_angle(&Vec3::x_axis(), -std::f32::consts::FRAC_PI_2);
    SceneObject::new(
        MeshShape::Plane {
            width: config.size,
            depth: config.size,
        },
        SurfaceMaterial {
            color: config.color,
            metalness: config.metalness,
            roughness: config.roughness,
            environment_mapped: true,
        },
        Transform::from_position_rotation(Vec3::zeros(), rotation),
    )
    .with_shadows(false, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::RecordingBackend;
    use crate::core::AudioConfig;
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const FRAME: f64 = 1.0 / 60.0;

    fn playground() -> Playground {
        Playground::new(&PlaygroundConfig::default())
    }

    fn run_frames(playground: &mut Playground, frames: usize, rng: &mut StdRng) -> Vec<FrameReport> {
        let start = playground.clock.elapsed();
        (1..=frames)
            .map(|frame| playground.tick(start + frame as f64 * FRAME, rng))
            .collect()
    }

    fn assert_meshes_mirror_bodies(playground: &Playground) {
        for pairing in playground.pairings().iter() {
            let pose = playground.world().body_transform(pairing.body).expect("body");
            let mesh = playground.scene().get(pairing.mesh).expect("mesh").transform;
            assert_eq!(mesh.position, pose.position);
            assert_eq!(mesh.rotation, pose.rotation);
        }
    }

    #[test]
    fn test_new_playground_has_only_floor() {
        let playground = playground();
        assert_eq!(playground.scene().len(), 1);
        assert!(playground.pairings().is_empty());

        let floor = playground.scene().get(playground.floor()).expect("floor");
        assert!(floor.receive_shadow && !floor.cast_shadow);
        assert_eq!(floor.material.color, [0x77, 0x77, 0x77]);
        let bounds = floor.world_bounds();
        assert_relative_eq!(bounds.extents(), Vec3::new(5.0, 0.0, 5.0), epsilon = 1e-5);
    }

    #[test]
    fn test_create_sphere_pairs_mesh_and_body() {
        let mut playground = playground();
        let pairing = playground.create_sphere(0.5, Vec3::new(0.0, 3.0, 0.0)).expect("sphere");

        assert_eq!(pairing.kind, ObjectKind::Sphere);
        let mesh = playground.scene().get(pairing.mesh).expect("mesh");
        assert_eq!(mesh.shape, MeshShape::Sphere { radius: 0.5, segments: 20 });
        assert_eq!(mesh.transform.position, Vec3::new(0.0, 3.0, 0.0));
        assert!(mesh.cast_shadow);
        assert_relative_eq!(mesh.material.metalness, 0.3);
        assert_relative_eq!(mesh.material.roughness, 0.4);

        let body = playground.world().body_transform(pairing.body).expect("body");
        assert_eq!(body.position, Vec3::new(0.0, 3.0, 0.0));
    }

    #[test]
    fn test_create_box_uses_full_edges_for_mesh() {
        let mut playground = playground();
        let pairing = playground.create_box(1.0, 0.5, 2.0, Vec3::new(0.0, 3.0, 0.0)).expect("box");
        let mesh = playground.scene().get(pairing.mesh).expect("mesh");
        assert_eq!(mesh.shape, MeshShape::Cuboid { width: 1.0, height: 0.5, depth: 2.0 });
        assert_eq!(playground.counters(), SpawnCounters { spheres: 0, boxes: 1 });
    }

    #[test]
    fn test_rejected_object_leaves_no_mesh() {
        let mut playground = playground();
        assert!(playground.create_sphere(0.0, Vec3::zeros()).is_err());
        assert!(playground.create_box(1.0, -1.0, 1.0, Vec3::zeros()).is_err());
        assert_eq!(playground.scene().len(), 1);
        assert!(playground.pairings().is_empty());
    }

    #[test]
    fn test_initial_objects_from_default_config() {
        let mut playground = playground();
        let pairings = playground
            .create_initial_objects(&PlaygroundConfig::default().initial_objects)
            .expect("initial objects");

        assert_eq!(pairings.len(), 3);
        assert_eq!(playground.scene().len(), 4);
        let positions: Vec<Vec3> = pairings
            .iter()
            .map(|p| playground.scene().get(p.mesh).expect("mesh").transform.position)
            .collect();
        assert_eq!(
            positions,
            vec![Vec3::new(0.0, 3.0, 0.0), Vec3::new(2.0, 3.0, 0.0), Vec3::new(0.0, 3.0, 2.0)]
        );
    }

    #[test]
    fn test_random_spawns_stay_in_range() {
        let mut playground = playground();
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..50 {
            let sphere = playground.spawn_random_sphere(&mut rng).expect("sphere");
            let object = playground.scene().get(sphere.mesh).expect("mesh");
            let MeshShape::Sphere { radius, .. } = object.shape else {
                panic!("expected a sphere");
            };
            assert!((0.05..=0.5).contains(&radius));
            let p = object.transform.position;
            assert!(p.x.abs() <= 1.5 && p.z.abs() <= 1.5);
            assert_relative_eq!(p.y, 3.0);

            let cube = playground.spawn_random_box(&mut rng).expect("box");
            let object = playground.scene().get(cube.mesh).expect("mesh");
            let MeshShape::Cuboid { width, height, depth } = object.shape else {
                panic!("expected a box");
            };
            for edge in [width, height, depth] {
                assert!((0.05..=1.0).contains(&edge));
            }
        }
        assert_eq!(playground.counters(), SpawnCounters { spheres: 50, boxes: 50 });
    }

    #[test]
    fn test_apply_routes_actions() {
        let mut playground = playground();
        let mut rng = StdRng::seed_from_u64(1);
        let sphere = playground.apply(DebugAction::CreateSphere, &mut rng).expect("sphere");
        let cube = playground.apply(DebugAction::CreateBox, &mut rng).expect("box");
        assert_eq!(sphere.kind, ObjectKind::Sphere);
        assert_eq!(cube.kind, ObjectKind::Box);
    }

    #[test]
    fn test_tick_keeps_meshes_on_bodies() {
        let mut playground = playground();
        let mut rng = StdRng::seed_from_u64(9);
        playground
            .create_initial_objects(&PlaygroundConfig::default().initial_objects)
            .expect("initial objects");
        playground.spawn_random_box(&mut rng).expect("box");

        for report in run_frames(&mut playground, 120, &mut rng) {
            assert!(report.sub_steps <= 3);
            assert_meshes_mirror_bodies(&playground);
        }
        assert_eq!(playground.scene().len(), playground.pairings().len() + 1);
    }

    #[test]
    fn test_spheres_settle_on_floor() {
        let mut playground = playground();
        let mut rng = StdRng::seed_from_u64(2);
        playground
            .create_initial_objects(&PlaygroundConfig::default().initial_objects)
            .expect("initial objects");

        run_frames(&mut playground, 600, &mut rng);
        for pairing in playground.pairings().iter() {
            let y = playground.scene().get(pairing.mesh).expect("mesh").transform.position.y;
            assert_relative_eq!(y, 0.5, epsilon = 0.05);
        }
    }

    #[test]
    fn test_slow_frame_is_capped() {
        let mut playground = playground();
        let mut rng = StdRng::seed_from_u64(2);
        let report = playground.tick(1.0, &mut rng);
        assert_relative_eq!(report.delta, 1.0);
        assert_eq!(report.sub_steps, 3);
    }

    #[test]
    fn test_first_hard_landing_plays_sound() {
        let mut playground = playground();
        let mut rng = StdRng::seed_from_u64(4);
        playground.set_audio(
            Box::new(RecordingBackend::default()),
            HitSound::new(vec![1u8, 2, 3], &AudioConfig::default()),
        );
        assert!(playground.has_audio());
        playground.create_sphere(0.5, Vec3::new(0.0, 3.0, 0.0)).expect("sphere");

        let reports = run_frames(&mut playground, 300, &mut rng);
        let first_impact = reports
            .iter()
            .position(|report| !report.impacts.is_empty())
            .expect("sphere reaches the floor");
        assert_eq!(reports[first_impact].sounds_played, 1);
        assert!(reports[..first_impact].iter().all(|report| report.sounds_played == 0));

        let total: u32 = reports.iter().map(|report| report.sounds_played).sum();
        let loud_impacts = reports
            .iter()
            .filter(|report| report.impacts.iter().any(|impact| impact.speed > 1.5))
            .count() as u32;
        assert_eq!(total, loud_impacts);
    }

    #[test]
    fn test_without_audio_no_sound_is_counted() {
        let mut playground = playground();
        let mut rng = StdRng::seed_from_u64(4);
        playground.create_sphere(0.5, Vec3::new(0.0, 3.0, 0.0)).expect("sphere");
        let reports = run_frames(&mut playground, 300, &mut rng);
        assert!(reports.iter().any(|report| !report.impacts.is_empty()));
        assert!(reports.iter().all(|report| report.sounds_played == 0));
    }
}
