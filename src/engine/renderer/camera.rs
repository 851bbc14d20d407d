// Orthographic render camera

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec2, Vec3};

/// World-space camera for the quad renderer.
///
/// The logical viewport is 2 units tall (y spans [-1, 1]) with the width
/// following the window's aspect ratio. World coordinates are zoom-scaled,
/// then shifted back by the follow offset into that box.
#[derive(Debug, Clone)]
pub struct Camera {
    pub offset: Vec2,
    pub zoom: f32,
    aspect: f32,
    view_proj: Mat4,
}

impl Camera {
    pub fn new(viewport_width: f32, viewport_height: f32) -> Self {
        let mut camera = Self {
            offset: Vec2::ZERO,
            zoom: 1.0,
            aspect: aspect_ratio(viewport_width, viewport_height),
            view_proj: Mat4::IDENTITY,
        };
        camera.update_view_proj();
        camera
    }

    fn update_view_proj(&mut self) {
        let projection = Mat4::orthographic_rh(-self.aspect, self.aspect, -1.0, 1.0, -1.0, 1.0);
        let view = Mat4::from_translation(Vec3::new(-self.offset.x, -self.offset.y, 0.0))
            * Mat4::from_scale(Vec3::new(self.zoom, self.zoom, 1.0));

        self.view_proj = projection * view;
    }

    /// Track a follow offset and zoom for this frame
    pub fn follow(&mut self, offset: Vec2, zoom: f32) {
        self.offset = offset;
        self.zoom = zoom.max(0.1); // Prevent zoom from degenerating
        self.update_view_proj();
    }

    /// Resize the viewport
    pub fn resize(&mut self, width: f32, height: f32) {
        self.aspect = aspect_ratio(width, height);
        self.update_view_proj();
    }

    /// Get the view-projection matrix
    pub fn view_proj_matrix(&self) -> Mat4 {
        self.view_proj
    }
}

fn aspect_ratio(width: f32, height: f32) -> f32 {
    if height > 0.0 {
        width / height
    } else {
        1.0
    }
}

/// Camera uniform for the GPU
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
}

impl CameraUniform {
    /// Create a new camera uniform from a camera
    pub fn new(camera: &Camera) -> Self {
        Self {
            view_proj: camera.view_proj_matrix().to_cols_array_2d(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn project(camera: &Camera, world: Vec2) -> Vec2 {
        let clip = camera
            .view_proj_matrix()
            .project_point3(Vec3::new(world.x, world.y, 0.0));
        Vec2::new(clip.x, clip.y)
    }

    #[test]
    fn test_identity_camera_maps_unit_box() {
        let camera = Camera::new(600.0, 600.0);

        let center = project(&camera, Vec2::ZERO);
        assert_relative_eq!(center.x, 0.0);
        assert_relative_eq!(center.y, 0.0);

        let corner = project(&camera, Vec2::new(1.0, 1.0));
        assert_relative_eq!(corner.x, 1.0);
        assert_relative_eq!(corner.y, 1.0);
    }

    #[test]
    fn test_zoom_scales_world_before_offset() {
        let mut camera = Camera::new(600.0, 600.0);
        camera.follow(Vec2::ZERO, 0.5);

        // Zoomed out: a point two units away lands on the clip edge.
        let edge = project(&camera, Vec2::new(2.0, 0.0));
        assert_relative_eq!(edge.x, 1.0);
    }

    #[test]
    fn test_offset_shifts_after_zoom() {
        let mut camera = Camera::new(600.0, 600.0);
        camera.follow(Vec2::new(1.0, 0.0), 0.5);

        // The world point whose zoomed position equals the offset is centered.
        let centered = project(&camera, Vec2::new(2.0, 0.0));
        assert_relative_eq!(centered.x, 0.0);
    }

    #[test]
    fn test_wider_viewport_widens_visible_range() {
        let camera = Camera::new(800.0, 600.0);

        // At 4:3 the x = 1 point is inside the clip box, not on its edge.
        let point = project(&camera, Vec2::new(1.0, 0.0));
        assert!(point.x < 1.0);
        assert_relative_eq!(point.x, 0.75);
    }

    #[test]
    fn test_zoom_never_degenerates() {
        let mut camera = Camera::new(600.0, 600.0);
        camera.follow(Vec2::ZERO, 0.0);
        assert_eq!(camera.zoom, 0.1);
    }
}
