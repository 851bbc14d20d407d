use std::sync::Arc;

use anyhow::Result;
use glam::Vec2;
use log::{error, info};
use winit::event::{Event, WindowEvent};
use winit::event_loop::EventLoop;
use winit::window::WindowBuilder;

mod engine;
mod game;

use engine::assets::{AssetLoader, AssetType};
use engine::game_loop::GameLoop;
use engine::input::{Action, InputManager};
use engine::renderer::{BitmapFont, Renderer, TextureHandle};
use game::dialogue::DialogueAction;
use game::player::DialoguePrompt;
use game::{TickInput, World};

/// Banner shown at the top of the scene
const GREETING: &str = "...You thought you could escape?\nThat's what they all think.";

/// Glyph size used for all on-screen text
const TEXT_SIZE: f32 = 0.1;

fn main() -> Result<()> {
    // Initialize logger
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    info!("Starting Rusted Escape...");

    // Create event loop and window
    let event_loop = EventLoop::new()?;
    let window = Arc::new(
        WindowBuilder::new()
            .with_title("Rusted Escape")
            .with_inner_size(winit::dpi::LogicalSize::new(800, 600))
            .with_resizable(true)
            .build(&event_loop)?,
    );

    let mut renderer = pollster::block_on(Renderer::new(window.clone()))?;

    // Load textures and build the scene. Missing assets log and draw as
    // nothing, so the demo keeps running either way.
    let assets = AssetLoader::from_env();
    let mut world = World::demo_scene();

    let player_tex = load_texture(&mut renderer, &assets, AssetType::Texture, "player.png");
    let player2_tex = load_texture(&mut renderer, &assets, AssetType::Texture, "player2.png");
    let platform_tex = load_texture(&mut renderer, &assets, AssetType::Texture, "platform.png");
    let checkpoint_tex = load_texture(&mut renderer, &assets, AssetType::Texture, "checkpoint.png");
    let reached_tex = load_texture(
        &mut renderer,
        &assets,
        AssetType::Texture,
        "checkpoint_reached.png",
    );
    let gun_tex = load_texture(&mut renderer, &assets, AssetType::Texture, "gun.png");
    let font = BitmapFont::new(load_texture(
        &mut renderer,
        &assets,
        AssetType::Font,
        "font_atlas.png",
    ));

    let walk_frames: Vec<TextureHandle> =
        [player_tex, player2_tex].into_iter().flatten().collect();

    world.player.entity.texture = player_tex;
    world.player.animation.add_state(0, walk_frames.clone());
    world.player.gun.entity.texture = gun_tex;

    for platform in &mut world.platforms {
        platform.entity.texture = platform_tex;
    }
    for checkpoint in world.checkpoints.iter_mut() {
        checkpoint.entity.texture = checkpoint_tex;
        checkpoint.reached_texture = reached_tex;
    }
    for npc in &mut world.npcs {
        npc.entity.texture = player_tex;
        npc.animation.add_state(0, walk_frames.clone());
    }

    let mut input = InputManager::new();
    let mut game_loop = GameLoop::new();
    let mut prompts: Vec<DialoguePrompt> = Vec::new();

    event_loop
        .run(move |event, elwt| match event {
            Event::WindowEvent { event, .. } => match event {
                WindowEvent::CloseRequested => {
                    info!("Close requested, shutting down...");
                    elwt.exit();
                }
                WindowEvent::Resized(physical_size) => {
                    renderer.resize(physical_size);
                }
                WindowEvent::KeyboardInput { event, .. } => {
                    input.process_keyboard_event(&event);
                }
                WindowEvent::RedrawRequested => {
                    if input.is_pressed(Action::Exit) {
                        elwt.exit();
                        return;
                    }

                    let ticks = game_loop.begin_frame();
                    let now_ms = game_loop.elapsed_ms();

                    for _ in 0..ticks {
                        let tick_input = TickInput {
                            move_left: input.is_pressed(Action::MoveLeft),
                            move_right: input.is_pressed(Action::MoveRight),
                            jump: input.is_pressed(Action::Jump),
                        };
                        prompts = world.tick(tick_input, now_ms);
                    }

                    // Interact picks the first choice of whoever is prompting.
                    if input.just_pressed(Action::Interact) {
                        for prompt in &prompts {
                            let npc = &world.npcs[prompt.npc_index];
                            if let Some(choice) = npc
                                .dialogue_node("hello")
                                .and_then(|node| node.choices.first())
                            {
                                dispatch_dialogue_action(choice.action);
                            }
                        }
                    }

                    input.update();

                    draw_world(&mut renderer, &world, &font, &prompts);
                    if let Err(e) = renderer.render() {
                        error!("Render error: {e}");
                    }
                }
                _ => {}
            },
            Event::AboutToWait => {
                window.request_redraw();
            }
            _ => {}
        })
        .map_err(|e| anyhow::anyhow!("Event loop error: {}", e))?;

    Ok(())
}

/// Queue one frame's worth of quads and text from the world state
fn draw_world(renderer: &mut Renderer, world: &World, font: &BitmapFont, prompts: &[DialoguePrompt]) {
    renderer.set_camera(Vec2::new(world.camera.x, world.camera.y), world.camera.zoom);

    renderer.draw_text(font, GREETING, Vec2::new(-0.5, 0.8), TEXT_SIZE);

    // Player: gun behind the animated sprite
    let player = &world.player;
    renderer.draw_entity(
        player.gun.entity.position,
        player.gun.entity.size,
        player.gun.entity.facing.sign(),
        player.gun.entity.texture,
    );
    renderer.draw_entity(
        player.entity.position,
        player.entity.size,
        player.entity.facing.sign(),
        player.animation.current_texture(),
    );

    for platform in &world.platforms {
        renderer.draw_entity(
            platform.entity.position,
            platform.entity.size,
            1.0,
            platform.entity.texture,
        );
    }

    for checkpoint in world.checkpoints.iter() {
        renderer.draw_entity(
            checkpoint.entity.position,
            checkpoint.entity.size,
            1.0,
            checkpoint.display_texture(),
        );
    }

    for npc in &world.npcs {
        renderer.draw_entity(
            npc.entity.position,
            npc.entity.size,
            npc.entity.facing.sign(),
            npc.animation.current_texture(),
        );
    }

    // Dialogue text hovers centered above whoever the player is touching.
    for prompt in prompts {
        let Some(npc) = world.npcs.get(prompt.npc_index) else {
            continue;
        };
        let Some(node) = npc.dialogue_node("hello") else {
            continue;
        };

        let center_x = npc.entity.position.x + npc.entity.size.x / 2.0;
        let text_x = center_x - BitmapFont::measure(&node.text, TEXT_SIZE) / 2.0;
        let text_y = npc.entity.position.y + npc.entity.size.y + 0.05;
        renderer.draw_text(font, &node.text, Vec2::new(text_x, text_y), TEXT_SIZE);
    }
}

/// The UI side of the dialogue system: what each tagged choice action does
fn dispatch_dialogue_action(action: DialogueAction) {
    match action {
        DialogueAction::FeelingGood => info!("I'm good, thanks!"),
        DialogueAction::FeelingBad => info!("I'm not doing well."),
    }
}

/// Load a texture by name, logging and returning `None` on failure
fn load_texture(
    renderer: &mut Renderer,
    assets: &AssetLoader,
    asset_type: AssetType,
    name: &str,
) -> Option<TextureHandle> {
    let bytes = match assets.load_bytes(asset_type, name) {
        Ok(bytes) => bytes,
        Err(e) => {
            error!("Failed to load {name}: {e}");
            return None;
        }
    };

    match renderer.load_texture_bytes(&bytes, name) {
        Ok(handle) => Some(handle),
        Err(e) => {
            error!("Failed to decode {name}: {e}");
            None
        }
    }
}
