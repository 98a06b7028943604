//! EGL window surface for a `NativeActivity` window.
//!
//! Setup follows the documented sequence: display, config, native window buffer format,
//! window surface, GLES context. [`HostSurface::make_current`] binds them to the calling
//! thread, and teardown runs in reverse on drop.

use crate::core::config::SurfaceConfig;
use crate::core::engine::HostSurface;
use crate::core::error::HostError;
use crate::core::pixel_format::{choose_config, ConfigAttrib, PixelFormat};
use khronos_egl as egl;
use std::ffi::c_void;
use std::ptr::NonNull;
use std::sync::Arc;

pub type EglInstance = egl::DynamicInstance<egl::EGL1_4>;

#[link(name = "android")]
extern "C" {
    fn ANativeWindow_setBuffersGeometry(
        window: *mut c_void,
        width: i32,
        height: i32,
        format: i32,
    ) -> i32;
}

fn egl_error(err: egl::Error) -> HostError {
    HostError::Graphics(err.to_string())
}

pub fn load_egl() -> Result<Arc<EglInstance>, HostError> {
    let lib = unsafe { libloading::Library::new("libEGL.so") }
        .map_err(|err| HostError::Graphics(err.to_string()))?;
    let egl = unsafe { EglInstance::load_required_from(lib) }
        .map_err(|err| HostError::Graphics(format!("{:?}", err)))?;
    Ok(Arc::new(egl))
}

fn attrib_name(attrib: ConfigAttrib) -> egl::Int {
    match attrib {
        ConfigAttrib::Red => egl::RED_SIZE,
        ConfigAttrib::Green => egl::GREEN_SIZE,
        ConfigAttrib::Blue => egl::BLUE_SIZE,
        ConfigAttrib::Alpha => egl::ALPHA_SIZE,
        ConfigAttrib::Depth => egl::DEPTH_SIZE,
        ConfigAttrib::Stencil => egl::STENCIL_SIZE,
        ConfigAttrib::BufferSize => egl::BUFFER_SIZE,
        ConfigAttrib::WindowSurface => egl::SURFACE_TYPE,
        ConfigAttrib::Es2Renderable => egl::RENDERABLE_TYPE,
    }
}

fn request_list(format: &PixelFormat, buffer_size: i32) -> Vec<egl::Int> {
    let mut list = vec![];
    for (attrib, value) in format.request_attribs(buffer_size) {
        let value = match attrib {
            ConfigAttrib::WindowSurface => egl::WINDOW_BIT,
            ConfigAttrib::Es2Renderable => egl::OPENGL_ES2_BIT,
            _ => value,
        };
        list.extend([attrib_name(attrib), value]);
    }
    list.push(egl::NONE);
    list
}

pub struct EglWindowSurface {
    egl: Arc<EglInstance>,
    display: egl::Display,
    surface: Option<egl::Surface>,
    context: Option<egl::Context>,
}

impl EglWindowSurface {
    /// Negotiate a config for `window` and create a surface and context on it.
    ///
    /// # Safety
    /// `window` must be a live `ANativeWindow` that outlives the returned surface.
    pub unsafe fn new(
        instance: Arc<EglInstance>,
        window: NonNull<c_void>,
        config: &SurfaceConfig,
    ) -> Result<Self, HostError> {
        let display = instance
            .get_display(egl::DEFAULT_DISPLAY)
            .ok_or_else(|| HostError::Graphics("no EGL display".to_string()))?;
        let (major, minor) = instance.initialize(display).map_err(egl_error)?;
        log::info!("EGL {}.{} initialised", major, minor);

        // From here on, drop terminates the display if a later step fails
        let mut this = Self {
            egl: instance.clone(),
            display,
            surface: None,
            context: None,
        };

        let format = config.pixel_format();
        let attribs = request_list(&format, config.buffer_size);
        let count = instance
            .matching_config_count(display, &attribs)
            .map_err(egl_error)?;
        let mut candidates = Vec::with_capacity(count);
        if count > 0 {
            instance
                .choose_config(display, &attribs, &mut candidates)
                .map_err(egl_error)?;
        }
        log::debug!("{} candidate configs for {:?}", candidates.len(), format);
        let chosen = choose_config(&candidates, &format, |candidate, attrib| {
            instance
                .get_config_attrib(display, candidate, attrib_name(attrib))
                .ok()
        })?;

        let visual = instance
            .get_config_attrib(display, chosen, egl::NATIVE_VISUAL_ID)
            .map_err(egl_error)?;
        ANativeWindow_setBuffersGeometry(window.as_ptr(), 0, 0, visual);

        let surface = instance
            .create_window_surface(
                display,
                chosen,
                window.as_ptr() as egl::NativeWindowType,
                None,
            )
            .map_err(egl_error)?;
        this.surface = Some(surface);

        log::info!("Creating OpenGL ES {} context", config.gles_version);
        let context_attribs = [egl::CONTEXT_CLIENT_VERSION, config.gles_version, egl::NONE];
        let context = instance
            .create_context(display, chosen, None, &context_attribs)
            .map_err(egl_error)?;
        this.context = Some(context);

        Ok(this)
    }

    fn surface(&self) -> Result<egl::Surface, HostError> {
        self.surface
            .ok_or_else(|| HostError::Graphics("surface already destroyed".to_string()))
    }
}

impl HostSurface for EglWindowSurface {
    fn make_current(&mut self) -> Result<(), HostError> {
        let surface = self.surface()?;
        self.egl
            .make_current(self.display, Some(surface), Some(surface), self.context)
            .map_err(egl_error)
    }

    fn size(&self) -> Result<(i32, i32), HostError> {
        let surface = self.surface()?;
        let width = self
            .egl
            .query_surface(self.display, surface, egl::WIDTH)
            .map_err(egl_error)?;
        let height = self
            .egl
            .query_surface(self.display, surface, egl::HEIGHT)
            .map_err(egl_error)?;
        Ok((width, height))
    }

    fn swap_buffers(&mut self) -> Result<(), HostError> {
        let surface = self.surface()?;
        self.egl
            .swap_buffers(self.display, surface)
            .map_err(egl_error)
    }
}

impl Drop for EglWindowSurface {
    fn drop(&mut self) {
        let _ = self.egl.make_current(self.display, None, None, None);
        if let Some(context) = self.context.take() {
            let _ = self.egl.destroy_context(self.display, context);
        }
        if let Some(surface) = self.surface.take() {
            let _ = self.egl.destroy_surface(self.display, surface);
        }
        let _ = self.egl.terminate(self.display);
    }
}
