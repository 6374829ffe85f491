use anyhow::{Context, Error, Result};
use log::{error, info};
use simple_logger::SimpleLogger;
use std::process::ExitCode;
use winit::{
    event::{Event, WindowEvent},
    event_loop::EventLoop,
};

use quark::{config, Gl, GlWindow, Mesh, Program, QuarkConfig, ShaderError, ShaderSource};

struct App {
    // GL objects go before the window so they are deleted while the context
    // is still alive.
    program: Program<Gl>,
    mesh: Mesh,
    clear_color: [f32; 4],
    window: GlWindow,
}

impl App {
    fn new(event_loop: &EventLoop<()>, config: &QuarkConfig) -> Result<Self> {
        let window = GlWindow::new(event_loop, &config.window)?;
        let gl = window.gl();

        info!(
            "OpenGL version: {}",
            gl.get_string(gl::VERSION).unwrap_or_else(|| "unknown".into())
        );
        if let Some(glsl) = gl.get_string(gl::SHADING_LANGUAGE_VERSION) {
            info!("GLSL version: {}", glsl);
        }

        let geometry = config.render.demo.geometry();
        let mesh = Mesh::new(geometry.vertices, geometry.indices);

        let shader_path = &config.render.shader_path;
        let source = ShaderSource::from_file(shader_path)
            .with_context(|| format!("Failed to load shader {:?}", shader_path))?;
        let program = Program::from_source(&gl, &source)
            .with_context(|| format!("Failed to build shader program from {:?}", shader_path))?;
        program.bind();

        info!("Running {} demo", config.render.demo);
        Ok(Self {
            program,
            mesh,
            clear_color: config.render.clear_color,
            window,
        })
    }

    fn render(&self) -> Result<()> {
        let [r, g, b, a] = self.clear_color;
        unsafe {
            gl::ClearColor(r, g, b, a);
            gl::Clear(gl::COLOR_BUFFER_BIT);
        }

        self.program.bind();
        self.mesh.draw();
        self.window.swap_buffers()
    }
}

fn load_config() -> Result<QuarkConfig> {
    match std::env::args_os().nth(1) {
        Some(path) => QuarkConfig::load(path),
        None => config::load_or_create_config(),
    }
}

/// Logs a fatal error. Driver diagnostics were already logged where they
/// occurred, so only the outermost context is added for those.
fn report(e: &Error) {
    let already_logged = e
        .chain()
        .filter_map(|cause| cause.downcast_ref::<ShaderError>())
        .any(ShaderError::is_logged);

    if already_logged {
        error!("{}", e);
    } else {
        error!("{:#}", e);
    }
}

fn run(config: &QuarkConfig) -> Result<()> {
    let event_loop = EventLoop::new()?;
    let mut app = Some(App::new(&event_loop, config)?);
    let mut failure = None;

    event_loop.run(|event, elwt| {
        let Some(state) = app.as_ref() else {
            return;
        };

        match event {
            Event::WindowEvent { event, .. } => match event {
                WindowEvent::CloseRequested => {
                    info!("Window closed, shutting down");
                    app = None;
                    elwt.exit();
                }
                WindowEvent::Resized(size) => state.window.resize(size.width, size.height),
                WindowEvent::RedrawRequested => {
                    if let Err(e) = state.render() {
                        failure = Some(e);
                        app = None;
                        elwt.exit();
                    }
                }
                _ => (),
            },
            Event::AboutToWait => state.window.request_redraw(),
            _ => (),
        }
    })?;

    match failure {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

fn main() -> Result<ExitCode> {
    let config = load_config()?;
    SimpleLogger::new().with_level(config.log_level).init()?;
    info!("Initializing quark...");

    // Errors past this point go through the logger once instead of also
    // being printed by the runtime.
    match run(&config) {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(e) => {
            report(&e);
            Ok(ExitCode::FAILURE)
        }
    }
}
