// Player controller: integration, jumping, dying, and the collision pass

use glam::Vec2;

use super::animation::Animation;
use super::checkpoint::{CheckpointRegistry, RespawnPoint};
use super::entity::{Body, Entity, Facing};
use super::npc::Npc;
use super::world::Platform;
use crate::engine::physics::{collision_sides, Side};

/// Rebound factor applied to vertical velocity when bumping a platform's
/// underside
const BOUNCE_DAMPING: f32 = 0.5;

/// Falling below this height kills the player
const FALL_LIMIT: f32 = -1.0;

/// Weapon carried by the player. Follows the leading hip each tick; it has
/// no physics of its own.
#[derive(Debug, Clone)]
pub struct Gun {
    pub entity: Entity,
    pub fire_rate: f32,
    pub damage: f32,
}

impl Gun {
    pub fn new(width: f32, height: f32, fire_rate: f32, damage: f32) -> Self {
        let mut entity = Entity::new(0.0, 0.0, width, height);
        entity.face(Facing::Right);
        Self {
            entity,
            fire_rate,
            damage,
        }
    }
}

/// NPC whose dialogue should be shown this tick, by index into the world's
/// NPC list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DialoguePrompt {
    pub npc_index: usize,
}

#[derive(Debug, Clone)]
pub struct Player {
    pub entity: Entity,
    pub body: Body,

    /// Horizontal step per tick
    pub speed: f32,

    /// Upward velocity set on jump
    pub jump_strength: f32,

    /// Where dying puts the player back
    pub respawn: RespawnPoint,

    pub animation: Animation,
    pub gun: Gun,
}

impl Player {
    pub fn new(
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        speed: f32,
        gravity: f32,
        jump_strength: f32,
    ) -> Self {
        let mut entity = Entity::new(x, y, width, height);
        entity.face(Facing::Right);

        Self {
            entity,
            body: Body::new(gravity),
            speed,
            jump_strength,
            respawn: RespawnPoint {
                position: Vec2::new(x, y),
            },
            animation: Animation::new(),
            gun: Gun::new(0.1, 0.1, 0.1, 1.0),
        }
    }

    /// Integrate one tick: animation, gravity, vertical motion, the fall
    /// limit, and the gun's positional follow.
    pub fn update(&mut self, now_ms: u64) {
        self.animation.update(now_ms);

        if !self.body.on_ground {
            self.body.velocity.y -= self.body.gravity;
        }
        self.entity.position.y += self.body.velocity.y;

        if self.entity.position.y < FALL_LIMIT {
            self.die();
        }

        let half = self.entity.size * 0.5;
        self.gun.entity.position.x = match self.entity.facing {
            Facing::Left => self.entity.position.x - half.x,
            _ => self.entity.position.x + half.x,
        };
        self.gun.entity.position.y = self.entity.position.y + half.y;
        self.gun.entity.facing = self.entity.facing;
    }

    /// Jump off the ground. Does nothing mid-air; there is no double jump.
    pub fn jump(&mut self) {
        if self.body.on_ground {
            self.body.velocity.y = self.jump_strength;
            self.body.on_ground = false;
        }
    }

    /// Put the player back at the last captured checkpoint with all motion
    /// cleared.
    pub fn die(&mut self) {
        self.entity.position = self.respawn.position;
        self.body.velocity = Vec2::ZERO;
        self.body.on_ground = false;
    }

    /// Step left and face that way. Driven directly from input; there is no
    /// air-control gating, so this works mid-jump too.
    pub fn run_left(&mut self) {
        self.entity.position.x -= self.speed;
        self.entity.face(Facing::Left);
    }

    /// Step right and face that way
    pub fn run_right(&mut self) {
        self.entity.position.x += self.speed;
        self.entity.face(Facing::Right);
    }

    /// One collision pass over the scene.
    ///
    /// Platforms resolve first so their position corrections are visible to
    /// the checkpoint and NPC checks in the same tick. Returns the dialogue
    /// prompts for the render layer; nothing here touches the renderer.
    pub fn resolve_collisions(
        &mut self,
        platforms: &[Platform],
        checkpoints: &mut CheckpointRegistry,
        npcs: &[Npc],
    ) -> Vec<DialoguePrompt> {
        let mut touched_platform = false;

        for platform in platforms {
            let sides = collision_sides(&self.entity.aabb(), &platform.entity.aabb());

            // Each side is an independent correction; the classifier only
            // ever sets one.
            if sides.contains(Side::Top) && self.body.velocity.y <= 0.0 {
                self.body.velocity.y = 0.0;
                self.entity.position.y = platform.entity.position.y + platform.entity.size.y;
                self.body.on_ground = true;
                touched_platform = true;
            }
            if sides.contains(Side::Bottom) {
                self.body.velocity.y = -self.body.velocity.y * BOUNCE_DAMPING;
            }
            if sides.contains(Side::Left) {
                self.entity.position.x = platform.entity.position.x - self.entity.size.x;
            }
            if sides.contains(Side::Right) {
                self.entity.position.x = platform.entity.position.x + platform.entity.size.x;
            }
        }

        if !touched_platform {
            self.body.on_ground = false;
        }

        for checkpoint in checkpoints.iter_mut() {
            let sides = collision_sides(&self.entity.aabb(), &checkpoint.entity.aabb());

            if !sides.is_empty() && !checkpoint.reached {
                checkpoint.reached = true;
                self.respawn = RespawnPoint::from(&*checkpoint);
            }
        }

        let mut prompts = Vec::new();
        for (npc_index, npc) in npcs.iter().enumerate() {
            let sides = collision_sides(&self.entity.aabb(), &npc.entity.aabb());

            if !sides.is_empty() {
                prompts.push(DialoguePrompt { npc_index });
            }
        }

        prompts
    }
}
