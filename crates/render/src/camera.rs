use glam::{Mat4, Vec3};
use quadview_common::{CameraConfig, CameraMovement};

/// Fly camera driven by keyboard translation and mouse look.
///
/// Angles are kept in degrees. `front`, `right` and `up` are derived from
/// `yaw`/`pitch` and refreshed whenever the orientation changes.
#[derive(Debug, Clone)]
pub struct Camera {
    pub position: Vec3,
    pub front: Vec3,
    pub up: Vec3,
    pub right: Vec3,
    pub world_up: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    pub movement_speed: f32,
    pub mouse_sensitivity: f32,
    pub fov: f32,
    pub near: f32,
    pub far: f32,
    pub screen_width: u32,
    pub screen_height: u32,
}

const PITCH_LIMIT: f32 = 89.0;

impl Default for Camera {
    fn default() -> Self {
        Self::from_config(&CameraConfig::default())
    }
}

impl Camera {
    pub fn new(position: Vec3, up: Vec3, yaw: f32, pitch: f32) -> Self {
        let mut camera = Self {
            position,
            front: Vec3::NEG_Z,
            up,
            right: Vec3::X,
            world_up: up.try_normalize().unwrap_or(Vec3::Y),
            yaw,
            pitch: pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT),
            movement_speed: 3.0,
            mouse_sensitivity: 0.1,
            fov: 45.0,
            near: 0.1,
            far: 100.0,
            screen_width: 1,
            screen_height: 1,
        };
        camera.update_vectors();
        camera
    }

    pub fn from_config(config: &CameraConfig) -> Self {
        Self {
            movement_speed: config.movement_speed,
            mouse_sensitivity: config.mouse_sensitivity,
            fov: config.fov,
            ..Self::new(config.position, config.up, config.yaw, config.pitch)
        }
    }

    /// Translate along the view axes. `amount` is elapsed time already scaled
    /// by any speed multiplier.
    pub fn process_keyboard(&mut self, direction: CameraMovement, amount: f32) {
        let velocity = self.movement_speed * amount;
        match direction {
            CameraMovement::Forward => self.position += self.front * velocity,
            CameraMovement::Backward => self.position -= self.front * velocity,
            CameraMovement::Left => self.position -= self.right * velocity,
            CameraMovement::Right => self.position += self.right * velocity,
        }
    }

    /// Rotate by a cursor delta in pixels; positive `dy` looks up.
    pub fn process_mouse_movement(&mut self, dx: f32, dy: f32) {
        self.yaw += dx * self.mouse_sensitivity;
        self.pitch = (self.pitch + dy * self.mouse_sensitivity).clamp(-PITCH_LIMIT, PITCH_LIMIT);
        self.update_vectors();
    }

    pub fn set_screen_size(&mut self, width: u32, height: u32) {
        self.screen_width = width;
        self.screen_height = height;
    }

    pub fn aspect(&self) -> f32 {
        self.screen_width.max(1) as f32 / self.screen_height.max(1) as f32
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.position + self.front, self.up)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov.to_radians(), self.aspect(), self.near, self.far)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    fn update_vectors(&mut self) {
        let (yaw, pitch) = (self.yaw.to_radians(), self.pitch.to_radians());
        self.front = Vec3::new(
            yaw.cos() * pitch.cos(),
            pitch.sin(),
            yaw.sin() * pitch.cos(),
        )
        .normalize();
        self.right = self.front.cross(self.world_up).normalize();
        self.up = self.right.cross(self.front).normalize();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-5
    }

    #[test]
    fn default_camera() {
        let cam = Camera::default();
        assert_eq!(cam.position, Vec3::new(-5.0, 2.0, 3.0));
        let vp = cam.view_projection();
        // Should produce a valid matrix (no NaN)
        assert!(!vp.is_nan());
        assert!((cam.front.length() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn forward_follows_front_vector() {
        let mut cam = Camera::new(Vec3::ZERO, Vec3::Y, 0.0, 0.0);
        assert!(approx(cam.front, Vec3::X));
        cam.process_keyboard(CameraMovement::Forward, 1.0);
        assert!(approx(cam.position, Vec3::new(3.0, 0.0, 0.0)));
        cam.process_keyboard(CameraMovement::Backward, 1.0);
        assert!(approx(cam.position, Vec3::ZERO));
    }

    #[test]
    fn strafing_is_perpendicular() {
        let mut cam = Camera::new(Vec3::ZERO, Vec3::Y, -90.0, 0.0);
        cam.process_keyboard(CameraMovement::Right, 1.0);
        assert!(approx(cam.position, Vec3::new(3.0, 0.0, 0.0)));
        cam.process_keyboard(CameraMovement::Left, 2.0);
        assert!(approx(cam.position, Vec3::new(-3.0, 0.0, 0.0)));
    }

    #[test]
    fn displacement_is_linear_in_amount() {
        let mut slow = Camera::default();
        let mut fast = Camera::default();
        let start = slow.position;
        slow.process_keyboard(CameraMovement::Forward, 0.1);
        fast.process_keyboard(CameraMovement::Forward, 0.5);
        let ratio = (fast.position - start).length() / (slow.position - start).length();
        assert!((ratio - 5.0).abs() < 1e-4);
    }

    #[test]
    fn mouse_look_clamps_pitch() {
        let mut cam = Camera::new(Vec3::ZERO, Vec3::Y, 0.0, 0.0);
        cam.process_mouse_movement(0.0, 10_000.0);
        assert_eq!(cam.pitch, 89.0);
        cam.process_mouse_movement(0.0, -20_000.0);
        assert_eq!(cam.pitch, -89.0);
        assert!(!cam.view_matrix().is_nan());
    }

    #[test]
    fn mouse_look_scales_by_sensitivity() {
        let mut cam = Camera::new(Vec3::ZERO, Vec3::Y, 0.0, 0.0);
        cam.process_mouse_movement(10.0, 5.0);
        assert!((cam.yaw - 1.0).abs() < 1e-6);
        assert!((cam.pitch - 0.5).abs() < 1e-6);
    }

    #[test]
    fn aspect_tolerates_zero_height() {
        let mut cam = Camera::default();
        cam.set_screen_size(800, 0);
        assert_eq!(cam.aspect(), 800.0);
        cam.set_screen_size(800, 400);
        assert_eq!(cam.aspect(), 2.0);
    }

    #[test]
    fn from_config_applies_tuning() {
        let config = CameraConfig {
            movement_speed: 7.0,
            fov: 60.0,
            ..CameraConfig::default()
        };
        let cam = Camera::from_config(&config);
        assert_eq!(cam.movement_speed, 7.0);
        assert_eq!(cam.fov, 60.0);
        assert_eq!(cam.yaw, -1.75);
    }
}
