//! Orbit camera controls
//!
//! Pure math, no window or GL types, so the behavior is testable. The eye
//! orbits `target` in spherical coordinates with the Y axis up:
//!
//! ```text
//! x = r * sin(phi) * sin(theta)
//! y = r * cos(phi)
//! z = r * sin(phi) * cos(theta)
//! ```
//!
//! Input accumulates into pending deltas; [`OrbitControls::update`] applies
//! them once per frame. With damping enabled only a fraction of the pending
//! rotation is applied per frame, which gives the camera its glide.

use crate::core::CameraConfig;
use crate::foundation::math::{Mat4, Point3, Vec3};
use std::f32::consts::{PI, TAU};

/// Keeps the eye off the poles, where the up vector degenerates
const POLE_EPSILON: f32 = 1e-6;

/// Base zoom factor per scroll step
const ZOOM_BASE: f32 = 0.95;

/// Below this the pending rotation counts as settled
const SETTLE_EPSILON: f32 = 1e-6;

/// Mouse-driven orbit around a target point
#[derive(Debug, Clone)]
pub struct OrbitControls {
    target: Vec3,
    radius: f32,
    theta: f32,
    phi: f32,
    pending_theta: f32,
    pending_phi: f32,
    pending_scale: f32,
    enable_damping: bool,
    damping_factor: f32,
    rotate_speed: f32,
    zoom_speed: f32,
    min_distance: f32,
    max_distance: f32,
}

impl OrbitControls {
    /// Start orbiting `target` from `position`
    pub fn new(position: Vec3, target: Vec3, config: &CameraConfig) -> Self {
        let offset = position - target;
        let radius = offset.norm();
        let (theta, phi) = if radius > 0.0 {
            (offset.x.atan2(offset.z), (offset.y / radius).clamp(-1.0, 1.0).acos())
        } else {
            (0.0, PI * 0.5)
        };

        let mut controls = Self {
            target,
            radius,
            theta,
            phi,
            pending_theta: 0.0,
            pending_phi: 0.0,
            pending_scale: 1.0,
            enable_damping: config.enable_damping,
            damping_factor: config.damping_factor,
            rotate_speed: config.rotate_speed,
            zoom_speed: config.zoom_speed,
            min_distance: config.min_distance,
            max_distance: config.max_distance,
        };
        controls.clamp();
        controls
    }

    /// Queue a drag of `dx`, `dy` pixels in a viewport `viewport_height` pixels tall.
    ///
    /// Dragging across the full height turns the camera one full circle.
    pub fn rotate(&mut self, dx: f32, dy: f32, viewport_height: f32) {
        if viewport_height <= 0.0 {
            return;
        }
        self.pending_theta -= TAU * dx / viewport_height * self.rotate_speed;
        self.pending_phi -= TAU * dy / viewport_height * self.rotate_speed;
    }

    /// Queue a zoom. Positive steps move closer, negative steps move away.
    pub fn zoom(&mut self, steps: f32) {
        if steps.is_finite() {
            self.pending_scale *= ZOOM_BASE.powf(steps * self.zoom_speed);
        }
    }

    /// Apply pending input. Returns whether the eye moved.
    ///
    /// Zoom is applied in full; rotation is damped when damping is enabled.
    pub fn update(&mut self) -> bool {
        let before = self.position();

        let fraction = if self.enable_damping { self.damping_factor } else { 1.0 };
        self.theta += self.pending_theta * fraction;
        self.phi += self.pending_phi * fraction;
        self.radius *= self.pending_scale;

        if self.enable_damping {
            self.pending_theta *= 1.0 - fraction;
            self.pending_phi *= 1.0 - fraction;
            if self.pending_theta.abs() < SETTLE_EPSILON {
                self.pending_theta = 0.0;
            }
            if self.pending_phi.abs() < SETTLE_EPSILON {
                self.pending_phi = 0.0;
            }
        } else {
            self.pending_theta = 0.0;
            self.pending_phi = 0.0;
        }
        self.pending_scale = 1.0;
        self.clamp();

        (self.position() - before).norm_squared() > SETTLE_EPSILON * SETTLE_EPSILON
    }

    fn clamp(&mut self) {
        self.phi = self.phi.clamp(POLE_EPSILON, PI - POLE_EPSILON);
        self.radius = self.radius.clamp(self.min_distance, self.max_distance);
    }

    /// Eye position
    pub fn position(&self) -> Vec3 {
        let (sin_phi, cos_phi) = self.phi.sin_cos();
        let (sin_theta, cos_theta) = self.theta.sin_cos();
        self.target + Vec3::new(sin_phi * sin_theta, cos_phi, sin_phi * cos_theta) * self.radius
    }

    /// Orbit center
    pub fn target(&self) -> Vec3 {
        self.target
    }

    /// Distance from eye to target
    pub fn distance(&self) -> f32 {
        self.radius
    }

    /// Whether damped motion is still playing out
    pub fn is_settled(&self) -> bool {
        self.pending_theta == 0.0 && self.pending_phi == 0.0
    }

    /// Right-handed look-at matrix, Y up
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(
            &Point3::from(self.position()),
            &Point3::from(self.target),
            &Vec3::y(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn controls(enable_damping: bool) -> OrbitControls {
        let config = CameraConfig { enable_damping, ..CameraConfig::default() };
        OrbitControls::new(Vec3::new(-3.0, 3.0, 3.0), Vec3::zeros(), &config)
    }

    #[test]
    fn test_initial_position_is_preserved() {
        let controls = controls(true);
        assert_relative_eq!(controls.position(), Vec3::new(-3.0, 3.0, 3.0), epsilon = 1e-5);
        assert_relative_eq!(controls.distance(), 27.0_f32.sqrt(), epsilon = 1e-5);
    }

    #[test]
    fn test_undamped_rotation_applies_at_once() {
        let mut controls = controls(false);
        let height = 720.0;
        // Half the viewport height is half a turn
        controls.rotate(-height * 0.5, 0.0, height);
        assert!(controls.update());
        assert_relative_eq!(controls.position(), Vec3::new(3.0, 3.0, -3.0), epsilon = 1e-4);
        assert!(controls.is_settled());
    }

    #[test]
    fn test_damped_rotation_glides_to_the_same_place() {
        let mut controls = controls(true);
        controls.rotate(-360.0, 0.0, 720.0);

        assert!(controls.update());
        let first = controls.position();
        assert!((first - Vec3::new(3.0, 3.0, -3.0)).norm() > 1.0);
        assert!(!controls.is_settled());

        for _ in 0..1000 {
            controls.update();
        }
        assert!(controls.is_settled());
        assert_relative_eq!(controls.position(), Vec3::new(3.0, 3.0, -3.0), epsilon = 1e-3);
    }

    #[test]
    fn test_zoom_scales_distance() {
        let mut controls = controls(true);
        let before = controls.distance();
        controls.zoom(2.0);
        controls.update();
        assert_relative_eq!(controls.distance(), before * 0.95 * 0.95, epsilon = 1e-5);

        controls.zoom(-2.0);
        controls.update();
        assert_relative_eq!(controls.distance(), before, epsilon = 1e-4);
    }

    #[test]
    fn test_limits_are_enforced() {
        let mut controls = controls(false);
        controls.rotate(0.0, 10_000.0, 720.0);
        controls.zoom(-1_000.0);
        controls.update();

        let offset = controls.position() - controls.target();
        assert!(offset.y > 0.0 || offset.y.abs() < 1e-3);
        assert_relative_eq!(controls.distance(), CameraConfig::default().max_distance);
    }

    #[test]
    fn test_view_matrix_looks_at_target() {
        let controls = controls(true);
        let in_view = controls.view_matrix().transform_point(&Point3::from(controls.target()));
        assert_relative_eq!(in_view.x, 0.0, epsilon = 1e-5);
        assert_relative_eq!(in_view.y, 0.0, epsilon = 1e-5);
        assert_relative_eq!(in_view.z, -controls.distance(), epsilon = 1e-4);
    }

    #[test]
    fn test_zero_height_viewport_is_ignored() {
        let mut controls = controls(false);
        controls.rotate(100.0, 100.0, 0.0);
        assert!(!controls.update());
    }
}
