//! CircuitGame demo application
//!
//! Creates an 800x600 window, one camera and a handful of textured cubes,
//! wires keyboard/mouse input to camera movement and runs the engine's frame
//! loop. All GPU work goes through the engine's render backend seam; this
//! binary plugs in the command-recording backend so it runs without a native
//! graphics backend present.

use circuit_engine::prelude::*;
use circuit_engine::render::backend::RecordingBackend;

const TITLE: &str = "Circuit Chan 0.0.3 Alpha";

struct CircuitGame;

impl Application for CircuitGame {
    fn initialize(&mut self, engine: &mut Engine) -> Result<(), AppError> {
        let shader = engine.load_shader(
            "shader_cube",
            "files/shaders/cube.vert",
            "files/shaders/cube.frag",
        )?;
        let texture = engine.load_texture("cube_texture", "files/textures/cube.png")?;

        engine.spawn_cube("cube0", shader, texture, Transform::identity())?;
        engine.spawn_cube(
            "cube1",
            shader,
            texture,
            Transform::new(
                Vec3::new(2.5, 0.0, -3.0),
                Vec3::new(0.0, 45.0, 0.0),
                Vec3::new(1.0, 1.0, 1.0),
            ),
        )?;
        engine.spawn_cube(
            "cube2",
            shader,
            texture,
            Transform::new(
                Vec3::new(-2.5, 1.0, -5.0),
                Vec3::new(30.0, 0.0, 0.0),
                Vec3::new(0.5, 0.5, 0.5),
            ),
        )?;

        engine.camera_mut().set_pos(Vec3::new(0.0, 0.0, 5.0));
        engine.camera_mut().set_move_state(true);

        log::info!(
            "\n====================\n\
             1: set vsync on\n\
             2: set vsync off\n\
             3: set vsync to triple buffering (vulkan only)\n\
             4: toggle sleep\n\
             5: toggle fps and resolution in title\n\
             ===================="
        );

        Ok(())
    }

    fn update(&mut self, _engine: &mut Engine, _delta_time: f32) -> Result<(), AppError> {
        Ok(())
    }

    fn cleanup(&mut self, _engine: &mut Engine) {
        log::info!("CircuitGame shutting down");
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // crash-path reporting before the process dies
    std::panic::set_hook(Box::new(|panic_info| {
        eprintln!("PANIC occurred: {panic_info:?}");
        if let Some(location) = panic_info.location() {
            eprintln!(
                "Panic location: {}:{}:{}",
                location.file(),
                location.line(),
                location.column()
            );
        }
    }));

    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    log::info!("Starting {TITLE}");

    let config = EngineConfig::new(TITLE).with_window_size(800, 600);

    let mut engine = Engine::new(config, Box::new(RecordingBackend::new()))?;
    engine.run(&mut CircuitGame)?;

    log::info!("{TITLE} finished successfully");
    Ok(())
}
