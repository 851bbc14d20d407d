// Game simulation
//
// Everything that makes up the demo's state lives here: the world aggregate,
// the player controller and its collision pass, NPCs with their dialogue,
// checkpoints, frame animation and the follow camera. Rendering and input
// are fed in from the engine side; nothing in this module touches wgpu or
// winit directly.

pub mod animation;
pub mod camera;
pub mod checkpoint;
pub mod dialogue;
pub mod entity;
pub mod npc;
pub mod player;
pub mod world;

pub use player::DialoguePrompt;
pub use world::{TickInput, World};
