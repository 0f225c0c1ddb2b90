//! Core configuration types shared by every subsystem

pub mod config;

pub use config::{
    AssetPaths, AudioConfig, CameraConfig, FloorConfig, InitialObject, LightingConfig,
    ObjectMaterialConfig, PhysicsConfig, PlaygroundConfig, SpawnConfig, WindowConfig,
};
