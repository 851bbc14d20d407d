// Shared entity record and physics capability

use glam::Vec2;

use crate::engine::physics::Aabb;
use crate::engine::renderer::TextureHandle;

/// Horizontal facing of an entity
///
/// `None` is the unset state static scenery stays in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Facing {
    #[default]
    None,
    Left,
    Right,
}

impl Facing {
    /// Mirror left/right; `None` stays put
    pub fn flipped(self) -> Self {
        match self {
            Facing::Left => Facing::Right,
            Facing::Right => Facing::Left,
            Facing::None => Facing::None,
        }
    }

    /// Sign used to mirror a quad when drawing: -1 for left, +1 otherwise
    pub fn sign(self) -> f32 {
        match self {
            Facing::Left => -1.0,
            _ => 1.0,
        }
    }
}

/// Spatial state shared by every game object: a bottom-left anchored box,
/// a facing direction, and an optional texture. Objects whose texture failed
/// to load carry `None` and draw as nothing.
#[derive(Debug, Clone, Default)]
pub struct Entity {
    pub position: Vec2,
    pub size: Vec2,
    pub facing: Facing,
    pub texture: Option<TextureHandle>,
}

impl Entity {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            position: Vec2::new(x, y),
            size: Vec2::new(width, height),
            facing: Facing::None,
            texture: None,
        }
    }

    /// Collision envelope at the entity's current position
    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.position.x, self.position.y, self.size.x, self.size.y)
    }

    pub fn face(&mut self, facing: Facing) {
        self.facing = facing;
    }

    /// Toggle the current facing
    pub fn flip(&mut self) {
        self.facing = self.facing.flipped();
    }
}

/// Physics capability composed into entities that fall and collide
#[derive(Debug, Clone, Copy, Default)]
pub struct Body {
    /// Per-tick displacement
    pub velocity: Vec2,

    /// Downward acceleration applied per tick while airborne
    pub gravity: f32,

    /// Set by the collision pass when standing on a platform top
    pub on_ground: bool,
}

impl Body {
    pub fn new(gravity: f32) -> Self {
        Self {
            velocity: Vec2::ZERO,
            gravity,
            on_ground: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_aabb_tracks_position() {
        let mut entity = Entity::new(-1.0, 1.0, 0.2, 0.4);
        assert_eq!(entity.aabb(), Aabb::new(-1.0, 1.0, 0.2, 0.4));

        entity.position.x += 0.5;
        assert_eq!(entity.aabb().left(), -0.5);
    }

    #[test]
    fn test_facing_flip() {
        let mut entity = Entity::new(0.0, 0.0, 1.0, 1.0);
        assert_eq!(entity.facing, Facing::None);

        // Unset facing never toggles into a direction on its own
        entity.flip();
        assert_eq!(entity.facing, Facing::None);

        entity.face(Facing::Right);
        entity.flip();
        assert_eq!(entity.facing, Facing::Left);
        entity.flip();
        assert_eq!(entity.facing, Facing::Right);
    }

    #[test]
    fn test_facing_sign() {
        assert_eq!(Facing::Left.sign(), -1.0);
        assert_eq!(Facing::Right.sign(), 1.0);
        assert_eq!(Facing::None.sign(), 1.0);
    }

    #[test]
    fn test_body_starts_airborne() {
        let body = Body::new(0.0025);
        assert!(!body.on_ground);
        assert_eq!(body.velocity, Vec2::ZERO);
    }
}
