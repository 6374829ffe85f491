use anyhow::{anyhow, bail, Context, Result};
use glutin::{
    config::{Config, ConfigTemplateBuilder},
    context::{ContextApi, ContextAttributesBuilder, GlProfile, PossiblyCurrentContext, Version},
    display::{GetGlDisplay, GlDisplay},
    prelude::*,
    surface::{Surface, SwapInterval, WindowSurface},
};
use glutin_winit::{DisplayBuilder, GlWindow as _};
use raw_window_handle::HasRawWindowHandle;
use std::{
    ffi::CString,
    num::NonZeroU32,
    panic::{self, AssertUnwindSafe},
    ptr,
};
use winit::{
    dpi::LogicalSize,
    event_loop::EventLoop,
    window::{Window, WindowBuilder},
};

use crate::config::WindowConfig;
use crate::render::Gl;

/// A window with a current OpenGL 3.3 compatibility context.
///
/// Fields drop in declaration order, so the surface and context are released
/// before the window they were created for.
pub struct GlWindow {
    gl_surface: Surface<WindowSurface>,
    gl_context: PossiblyCurrentContext,
    window: Window,
    gl: Gl,
}

impl GlWindow {
    pub fn new(event_loop: &EventLoop<()>, config: &WindowConfig) -> Result<Self> {
        let window_builder = WindowBuilder::new()
            .with_title(config.title.as_str())
            .with_inner_size(LogicalSize::new(config.width, config.height));

        let template = ConfigTemplateBuilder::new().with_alpha_size(8);
        let display_builder = DisplayBuilder::new().with_window_builder(Some(window_builder));

        let built = catch_no_config(|| display_builder.build(event_loop, template, pick_config));
        let Some(built) = built else {
            bail!("Display offered no GL config matching the requested template");
        };
        let (window, gl_config) = built.map_err(|e| anyhow!("Failed to create window: {}", e))?;
        let window = window.context("Failed to create window")?;
        let raw_window_handle = window.raw_window_handle();

        let context_attributes = ContextAttributesBuilder::new()
            .with_context_api(ContextApi::OpenGl(Some(Version::new(3, 3))))
            .with_profile(GlProfile::Compatibility)
            .build(Some(raw_window_handle));

        let gl_display = gl_config.display();

        let gl_context = unsafe { gl_display.create_context(&gl_config, &context_attributes) }
            .context("Failed to create OpenGL context")?;

        let attrs = window.build_surface_attributes(<_>::default());
        let gl_surface = unsafe { gl_display.create_window_surface(&gl_config, &attrs) }
            .context("Failed to create GL surface")?;

        let gl_context = gl_context
            .make_current(&gl_surface)
            .context("Failed to make context current")?;

        let gl = Gl::load_with(|symbol| match CString::new(symbol) {
            Ok(symbol) => gl_display.get_proc_address(symbol.as_c_str()) as *const _,
            Err(_) => ptr::null(),
        });

        let interval = if config.vsync {
            SwapInterval::Wait(NonZeroU32::MIN)
        } else {
            SwapInterval::DontWait
        };
        if let Err(e) = gl_surface.set_swap_interval(&gl_context, interval) {
            log::warn!("Failed to set swap interval: {}", e);
        }

        Ok(Self {
            gl_surface,
            gl_context,
            window,
            gl,
        })
    }

    pub fn gl(&self) -> Gl {
        self.gl
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    pub fn request_redraw(&self) {
        self.window.request_redraw();
    }

    pub fn resize(&self, width: u32, height: u32) {
        let (Some(w), Some(h)) = (NonZeroU32::new(width), NonZeroU32::new(height)) else {
            return;
        };

        self.gl_surface.resize(&self.gl_context, w, h);
        unsafe {
            gl::Viewport(0, 0, width as i32, height as i32);
        }
    }

    pub fn swap_buffers(&self) -> Result<()> {
        self.gl_surface
            .swap_buffers(&self.gl_context)
            .context("Failed to swap buffers")
    }
}

/// Unwind payload raised by [`pick_config`] when the display has no config
/// to choose from. The picker has to return a `Config`, so this is the only
/// way to leave it without one.
struct NoMatchingConfig;

fn pick_config(configs: Box<dyn Iterator<Item = Config> + '_>) -> Config {
    configs
        .reduce(|accum, config| {
            if config.num_samples() > accum.num_samples() {
                config
            } else {
                accum
            }
        })
        .unwrap_or_else(|| panic::resume_unwind(Box::new(NoMatchingConfig)))
}

/// Runs `f`, returning `None` if [`pick_config`] found nothing to pick.
/// Any other panic keeps unwinding.
fn catch_no_config<R>(f: impl FnOnce() -> R) -> Option<R> {
    match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(result) => Some(result),
        Err(payload) if payload.is::<NoMatchingConfig>() => None,
        Err(payload) => panic::resume_unwind(payload),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_list_is_not_a_panic() {
        let picked = catch_no_config(|| pick_config(Box::new(std::iter::empty())));
        assert!(picked.is_none());
    }

    #[test]
    fn test_catch_no_config_passes_results_through() {
        assert_eq!(catch_no_config(|| 7), Some(7));
    }

    #[test]
    #[should_panic(expected = "unrelated")]
    fn test_catch_no_config_keeps_other_panics() {
        catch_no_config(|| panic!("unrelated"));
    }
}
