// Non-player characters

use std::collections::HashMap;

use super::animation::Animation;
use super::dialogue::DialogueNode;
use super::entity::{Body, Entity, Facing};

/// A character the player can bump into for dialogue.
///
/// NPCs fall under the same gravity scheme as the player but are never
/// collision-resolved, so they have no respawn and no ground snapping.
#[derive(Debug, Clone)]
pub struct Npc {
    pub entity: Entity,
    pub body: Body,
    pub speed: f32,
    pub animation: Animation,
    pub dialogue: HashMap<String, DialogueNode>,
}

impl Npc {
    pub fn new(x: f32, y: f32, width: f32, height: f32, speed: f32, gravity: f32) -> Self {
        Self {
            entity: Entity::new(x, y, width, height),
            body: Body::new(gravity),
            speed,
            animation: Animation::new(),
            dialogue: HashMap::new(),
        }
    }

    /// Integrate one tick: animation plus vertical motion
    pub fn update(&mut self, now_ms: u64) {
        self.animation.update(now_ms);

        if !self.body.on_ground {
            self.body.velocity.y -= self.body.gravity;
        }
        self.entity.position.y += self.body.velocity.y;
    }

    /// Turn toward a world x position
    pub fn face_towards(&mut self, x: f32) {
        self.entity.facing = if x > self.entity.position.x {
            Facing::Right
        } else {
            Facing::Left
        };
    }

    /// Dialogue node for `key`; unknown keys yield nothing
    pub fn dialogue_node(&self, key: &str) -> Option<&DialogueNode> {
        self.dialogue.get(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_npc_falls_while_airborne() {
        let mut npc = Npc::new(1.0, 1.0, 0.2, 0.4, 0.015, 0.0025);

        npc.update(0);
        assert!(npc.body.velocity.y < 0.0);
        assert!(npc.entity.position.y < 1.0);

        let y_after_one = npc.entity.position.y;
        npc.update(0);
        // Gravity keeps accumulating.
        assert!(npc.entity.position.y < y_after_one);
    }

    #[test]
    fn test_faces_the_given_position() {
        let mut npc = Npc::new(1.0, 1.0, 0.2, 0.4, 0.015, 0.0025);

        npc.face_towards(3.0);
        assert_eq!(npc.entity.facing, Facing::Right);

        npc.face_towards(-1.0);
        assert_eq!(npc.entity.facing, Facing::Left);
    }

    #[test]
    fn test_unknown_dialogue_key_is_silent() {
        let npc = Npc::new(0.0, 0.0, 0.2, 0.4, 0.015, 0.0025);
        assert!(npc.dialogue_node("hello").is_none());
    }
}
