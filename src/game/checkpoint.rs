// Checkpoints and respawn tracking

use glam::Vec2;

use super::entity::Entity;
use crate::engine::renderer::TextureHandle;

/// A static marker the player captures by touching it.
///
/// `reached` is one-way: once set it never reverts within a session.
#[derive(Debug, Clone)]
pub struct Checkpoint {
    pub entity: Entity,
    pub reached: bool,

    /// Swapped in for the base texture once captured
    pub reached_texture: Option<TextureHandle>,
}

impl Checkpoint {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            entity: Entity::new(x, y, width, height),
            reached: false,
            reached_texture: None,
        }
    }

    /// Texture to draw this checkpoint with right now
    pub fn display_texture(&self) -> Option<TextureHandle> {
        if self.reached {
            self.reached_texture
        } else {
            self.entity.texture
        }
    }
}

/// Owned snapshot of a captured checkpoint's position.
///
/// The player keeps one of these as its respawn target; mutating the
/// registry's checkpoint afterwards does not move it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RespawnPoint {
    pub position: Vec2,
}

impl From<&Checkpoint> for RespawnPoint {
    fn from(checkpoint: &Checkpoint) -> Self {
        Self {
            position: checkpoint.entity.position,
        }
    }
}

/// The scene's ordered checkpoint list.
///
/// Fixed after scene setup; only the `reached` flags mutate, and only from
/// the collision pass.
#[derive(Debug, Clone, Default)]
pub struct CheckpointRegistry {
    checkpoints: Vec<Checkpoint>,
}

impl CheckpointRegistry {
    pub fn new(checkpoints: Vec<Checkpoint>) -> Self {
        Self { checkpoints }
    }

    pub fn len(&self) -> usize {
        self.checkpoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.checkpoints.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Checkpoint> {
        self.checkpoints.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Checkpoint> {
        self.checkpoints.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Checkpoint> {
        self.checkpoints.iter_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_respawn_point_is_a_value_copy() {
        let mut checkpoint = Checkpoint::new(1.5, 0.2, 0.2, 0.2);
        let respawn = RespawnPoint::from(&checkpoint);

        // Moving the registry's checkpoint afterwards must not move the snapshot.
        checkpoint.entity.position = Vec2::new(9.0, 9.0);
        assert_eq!(respawn.position, Vec2::new(1.5, 0.2));
    }

    #[test]
    fn test_display_texture_swaps_on_capture() {
        let mut checkpoint = Checkpoint::new(0.0, 0.0, 0.2, 0.2);
        checkpoint.entity.texture = Some(TextureHandle::from_index(1));
        checkpoint.reached_texture = Some(TextureHandle::from_index(2));

        assert_eq!(
            checkpoint.display_texture(),
            Some(TextureHandle::from_index(1))
        );

        checkpoint.reached = true;
        assert_eq!(
            checkpoint.display_texture(),
            Some(TextureHandle::from_index(2))
        );
    }

    #[test]
    fn test_registry_keeps_order() {
        let registry = CheckpointRegistry::new(vec![
            Checkpoint::new(-1.0, 1.0, 0.2, 0.2),
            Checkpoint::new(1.5, 0.2, 0.2, 0.2),
        ]);

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.get(0).unwrap().entity.position.x, -1.0);
        assert_eq!(registry.get(1).unwrap().entity.position.x, 1.5);
    }
}
