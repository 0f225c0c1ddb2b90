//! # Playground Configuration
//!
//! One serde tree for the whole demo. Every default below reproduces the
//! reference scene: 10 x 10 floor, gravity -9.82, friction 0.1,
//! restitution 0.7, camera at (-3, 3, 3) with a 75 degree field of view,
//! and three spheres of radius 0.5 dropped from a height of 3.
//!
//! Sections carry `#[serde(default)]`, so a file only needs the values it
//! changes:
//!
//! ```toml
//! log_level = "debug"
//!
//! [physics]
//! max_sub_steps = 5
//! ```

use crate::config::{Config, ConfigError};
use serde::{Deserialize, Serialize};

/// # Complete Application Configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaygroundConfig {
    /// Default log filter (overridden by `RUST_LOG`)
    pub log_level: String,
    /// Window settings
    pub window: WindowConfig,
    /// Camera and orbit controls
    pub camera: CameraConfig,
    /// Physics world settings
    pub physics: PhysicsConfig,
    /// Lights
    pub lighting: LightingConfig,
    /// Floor appearance
    pub floor: FloorConfig,
    /// Appearance of spawned objects
    pub objects: ObjectMaterialConfig,
    /// Random spawn ranges used by the debug panel
    pub spawn: SpawnConfig,
    /// Collision sound
    pub audio: AudioConfig,
    /// Asset locations
    pub assets: AssetPaths,
    /// Objects created at startup
    pub initial_objects: Vec<InitialObject>,
}

impl Default for PlaygroundConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            window: WindowConfig::default(),
            camera: CameraConfig::default(),
            physics: PhysicsConfig::default(),
            lighting: LightingConfig::default(),
            floor: FloorConfig::default(),
            objects: ObjectMaterialConfig::default(),
            spawn: SpawnConfig::default(),
            audio: AudioConfig::default(),
            assets: AssetPaths::default(),
            initial_objects: vec![
                InitialObject::Sphere { radius: 0.5, position: [0.0, 3.0, 0.0] },
                InitialObject::Sphere { radius: 0.5, position: [2.0, 3.0, 0.0] },
                InitialObject::Sphere { radius: 0.5, position: [0.0, 3.0, 2.0] },
            ],
        }
    }
}

impl PlaygroundConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.window.validate()?;
        self.camera.validate()?;
        self.physics.validate()?;
        self.lighting.validate()?;
        self.floor.validate()?;
        self.objects.validate()?;
        self.spawn.validate()?;
        self.audio.validate()?;
        for object in &self.initial_objects {
            object.validate()?;
        }
        Ok(())
    }
}

impl Config for PlaygroundConfig {}

fn invalid(message: impl Into<String>) -> ConfigError {
    ConfigError::Invalid(message.into())
}

fn positive(name: &str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(invalid(format!("{name} must be a positive number, got {value}")))
    }
}

fn non_negative(name: &str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(invalid(format!("{name} must be a non-negative number, got {value}")))
    }
}

fn finite(name: &str, values: &[f32]) -> Result<(), ConfigError> {
    if values.iter().all(|v| v.is_finite()) {
        Ok(())
    } else {
        Err(invalid(format!("{name} must be finite, got {values:?}")))
    }
}

/// `max` must be a finite number no smaller than `min`
fn ordered(name: &str, min: f32, max: f32) -> Result<(), ConfigError> {
    if max.is_finite() && max >= min {
        Ok(())
    } else {
        Err(invalid(format!("{name} range [{min}, {max}] is empty")))
    }
}

/// Window configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Window title
    pub title: String,
    /// Initial width in pixels
    pub width: u32,
    /// Initial height in pixels
    pub height: u32,
    /// Background clear color (RGB, 0-255)
    pub clear_color: [u8; 3],
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Physics Playground".to_string(),
            width: 1280,
            height: 720,
            clear_color: [0, 0, 0],
        }
    }
}

impl WindowConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(invalid("window size must be non-zero"));
        }
        Ok(())
    }
}

/// Camera and orbit-control configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Vertical field of view in degrees
    pub fov_degrees: f32,
    /// Near clip plane
    pub near: f32,
    /// Far clip plane
    pub far: f32,
    /// Initial eye position
    pub position: [f32; 3],
    /// Orbit target
    pub target: [f32; 3],
    /// Smooth the orbit motion over several frames
    pub enable_damping: bool,
    /// Fraction of the pending motion applied per frame when damping
    pub damping_factor: f32,
    /// Rotation speed multiplier
    pub rotate_speed: f32,
    /// Zoom speed multiplier
    pub zoom_speed: f32,
    /// Closest allowed distance to the target
    pub min_distance: f32,
    /// Farthest allowed distance to the target
    pub max_distance: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_degrees: 75.0,
            near: 0.1,
            far: 100.0,
            position: [-3.0, 3.0, 3.0],
            target: [0.0, 0.0, 0.0],
            enable_damping: true,
            damping_factor: 0.05,
            rotate_speed: 1.0,
            zoom_speed: 1.0,
            min_distance: 0.5,
            max_distance: 50.0,
        }
    }
}

impl CameraConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if !(self.fov_degrees > 0.0 && self.fov_degrees < 180.0) {
            return Err(invalid(format!("camera fov must be in (0, 180), got {}", self.fov_degrees)));
        }
        positive("camera.near", self.near)?;
        if !(self.far.is_finite() && self.far > self.near) {
            return Err(invalid("camera.far must be greater than camera.near"));
        }
        if !(self.damping_factor > 0.0 && self.damping_factor <= 1.0) {
            return Err(invalid("camera.damping_factor must be in (0, 1]"));
        }
        positive("camera.rotate_speed", self.rotate_speed)?;
        positive("camera.zoom_speed", self.zoom_speed)?;
        // A zero distance puts the eye on the target and leaves no view direction
        positive("camera.min_distance", self.min_distance)?;
        ordered("camera distance", self.min_distance, self.max_distance)?;
        finite("camera.position", &self.position)?;
        finite("camera.target", &self.target)?;
        if self.position == self.target {
            return Err(invalid("camera.position must differ from camera.target"));
        }
        Ok(())
    }
}

/// Physics world configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Gravity vector (m/s^2)
    pub gravity: [f32; 3],
    /// Fixed simulation timestep in seconds
    pub fixed_timestep: f64,
    /// Maximum fixed steps taken per frame
    pub max_sub_steps: u32,
    /// Default contact friction
    pub friction: f32,
    /// Default contact restitution
    pub restitution: f32,
    /// Mass of every spawned object
    pub object_mass: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: [0.0, -9.82, 0.0],
            fixed_timestep: 1.0 / 60.0,
            max_sub_steps: 3,
            friction: 0.1,
            restitution: 0.7,
            object_mass: 1.0,
        }
    }
}

impl PhysicsConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if !(self.fixed_timestep.is_finite() && self.fixed_timestep > 0.0) {
            return Err(invalid("physics.fixed_timestep must be positive"));
        }
        if self.max_sub_steps == 0 {
            return Err(invalid("physics.max_sub_steps must be at least 1"));
        }
        finite("physics.gravity", &self.gravity)?;
        non_negative("physics.friction", self.friction)?;
        non_negative("physics.restitution", self.restitution)?;
        positive("physics.object_mass", self.object_mass)
    }
}

/// Lighting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LightingConfig {
    /// Ambient light intensity
    pub ambient_intensity: f32,
    /// Directional light intensity
    pub directional_intensity: f32,
    /// Directional light position; it shines toward the origin
    pub directional_position: [f32; 3],
    /// Shadow map resolution (square)
    pub shadow_map_size: u32,
}

impl Default for LightingConfig {
    fn default() -> Self {
        Self {
            ambient_intensity: 2.1,
            directional_intensity: 0.6,
            directional_position: [5.0, 5.0, 5.0],
            shadow_map_size: 1024,
        }
    }
}

impl LightingConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        non_negative("lighting.ambient_intensity", self.ambient_intensity)?;
        non_negative("lighting.directional_intensity", self.directional_intensity)?;
        finite("lighting.directional_position", &self.directional_position)?;
        if self.directional_position == [0.0; 3] {
            return Err(invalid("lighting.directional_position must not be the origin"));
        }
        if self.shadow_map_size == 0 {
            return Err(invalid("lighting.shadow_map_size must be non-zero"));
        }
        Ok(())
    }
}

/// Floor appearance
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FloorConfig {
    /// Edge length of the square floor
    pub size: f32,
    /// Base color (RGB, 0-255)
    pub color: [u8; 3],
    /// Metalness
    pub metalness: f32,
    /// Roughness
    pub roughness: f32,
}

impl Default for FloorConfig {
    fn default() -> Self {
        Self {
            size: 10.0,
            color: [0x77, 0x77, 0x77],
            metalness: 0.3,
            roughness: 0.4,
        }
    }
}

impl FloorConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        positive("floor.size", self.size)?;
        non_negative("floor.metalness", self.metalness)?;
        non_negative("floor.roughness", self.roughness)
    }
}

/// Appearance of spawned spheres and boxes
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ObjectMaterialConfig {
    /// Base color (RGB, 0-255)
    pub color: [u8; 3],
    /// Metalness
    pub metalness: f32,
    /// Roughness
    pub roughness: f32,
    /// Sphere tessellation (width and height segments)
    pub sphere_segments: u32,
}

impl Default for ObjectMaterialConfig {
    fn default() -> Self {
        Self {
            color: [0xff, 0xff, 0xff],
            metalness: 0.3,
            roughness: 0.4,
            sphere_segments: 20,
        }
    }
}

impl ObjectMaterialConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        non_negative("objects.metalness", self.metalness)?;
        non_negative("objects.roughness", self.roughness)?;
        if self.sphere_segments < 3 {
            return Err(invalid("objects.sphere_segments must be at least 3"));
        }
        Ok(())
    }
}

/// Random spawn ranges for debug-panel objects
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnConfig {
    /// Smallest radius or edge length a random object may get
    pub min_size: f32,
    /// Largest random sphere radius
    pub max_sphere_radius: f32,
    /// Largest random box edge
    pub max_box_size: f32,
    /// Spawn height
    pub height: f32,
    /// Spawn x and z are uniform in `[-half_extent, half_extent]`
    pub half_extent: f32,
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            min_size: 0.05,
            max_sphere_radius: 0.5,
            max_box_size: 1.0,
            height: 3.0,
            half_extent: 1.5,
        }
    }
}

impl SpawnConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        positive("spawn.min_size", self.min_size)?;
        ordered("spawn sphere radius", self.min_size, self.max_sphere_radius)?;
        ordered("spawn box size", self.min_size, self.max_box_size)?;
        finite("spawn.height", &[self.height])?;
        non_negative("spawn.half_extent", self.half_extent)
    }
}

/// Collision sound configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioConfig {
    /// Master switch
    pub enabled: bool,
    /// Impacts must be faster than this (m/s) to be heard
    pub impact_threshold: f32,
    /// Lower bound of the random volume
    pub min_volume: f32,
    /// Upper bound of the random volume
    pub max_volume: f32,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            impact_threshold: 1.5,
            min_volume: 0.0,
            max_volume: 1.0,
        }
    }
}

impl AudioConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        non_negative("audio.impact_threshold", self.impact_threshold)?;
        non_negative("audio.min_volume", self.min_volume)?;
        ordered("audio volume", self.min_volume, self.max_volume)
    }
}

/// Asset locations
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetPaths {
    /// Directory holding px/nx/py/ny/pz/nz.png
    pub environment_map_dir: String,
    /// Collision sound clip
    pub hit_sound: String,
}

impl Default for AssetPaths {
    fn default() -> Self {
        Self {
            environment_map_dir: "resources/textures/environmentMaps/0".to_string(),
            hit_sound: "resources/sounds/hit.mp3".to_string(),
        }
    }
}

/// An object placed in the scene at startup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "lowercase")]
pub enum InitialObject {
    /// A sphere
    Sphere {
        /// Radius
        radius: f32,
        /// Center
        position: [f32; 3],
    },
    /// A box
    Box {
        /// Edge lengths (width, height, depth)
        size: [f32; 3],
        /// Center
        position: [f32; 3],
    },
}

impl InitialObject {
    fn validate(&self) -> Result<(), ConfigError> {
        match self {
            Self::Sphere { radius, position } => {
                positive("initial sphere radius", *radius)?;
                finite("initial sphere position", position)
            }
            Self::Box { size, position } => {
                size.iter().try_for_each(|edge| positive("initial box edge", *edge))?;
                finite("initial box position", position)
            }
        }
    }
}
