use crate::android::backend::egl::{EglInstance, EglWindowSurface};
use crate::core::config::HostConfig;
use crate::core::engine::{Engine, HostSurface};
use crate::core::input::{TouchForwarder, TouchPhase};
use crate::core::lifecycle::Dispatcher;
use crate::core::logging::HostExpectation;
use std::sync::Arc;
use winit::application::ApplicationHandler;
use winit::event::{TouchPhase as WinitTouchPhase, WindowEvent};
use winit::event_loop::ActiveEventLoop;
use winit::raw_window_handle::{HasWindowHandle, RawWindowHandle};
use winit::window::{Window, WindowId};

/// The surface is declared first so it is torn down before the window it renders into.
struct Presentation {
    surface: EglWindowSurface,
    window: Window,
}

pub struct HostApp<E: Engine> {
    config: HostConfig,
    egl: Arc<EglInstance>,
    dispatcher: Dispatcher<E>,
    touches: TouchForwarder,
    presentation: Option<Presentation>,
}

impl<E: Engine> HostApp<E> {
    pub fn build(config: HostConfig, egl: Arc<EglInstance>, engine: E) -> Self {
        Self {
            touches: TouchForwarder::new(&config.input),
            config,
            egl,
            dispatcher: Dispatcher::new(engine),
            presentation: None,
        }
    }

    fn create_presentation(&self, event_loop: &ActiveEventLoop) -> Presentation {
        let window = event_loop
            .create_window(Window::default_attributes())
            .host_expect("Failed to create window");

        let native_window = match window.window_handle().map(|handle| handle.as_raw()) {
            Ok(RawWindowHandle::AndroidNdk(handle)) => handle.a_native_window,
            Ok(platform) => panic!("Unsupported platform: {:?}", platform),
            Err(error) => panic!("Failed to get window handle: {:?}", error),
        };

        // No usable config means there is nothing to render with
        let surface = unsafe {
            EglWindowSurface::new(self.egl.clone(), native_window, &self.config.surface)
        }
        .host_expect("Failed to create the GLES surface");

        Presentation { surface, window }
    }

    /// Report the surface size to the engine when it differs from the last one sent.
    fn sync_size(&mut self) {
        let Some(presentation) = self.presentation.as_ref() else {
            return;
        };
        match presentation.surface.size() {
            Ok((width, height)) => {
                if self.dispatcher.size() == Some((width, height)) {
                    return;
                }
                self.touches.set_surface_size(width, height);
                if let Err(err) = self.dispatcher.surface_changed(width, height) {
                    log::warn!("Dropping resize: {}", err);
                }
            }
            Err(err) => log::error!("Failed to query the surface size: {}", err),
        }
    }
}

impl<E: Engine> ApplicationHandler for HostApp<E> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        self.dispatcher.resume();
        if self.presentation.is_some() {
            return;
        }

        let mut presentation = self.create_presentation(event_loop);
        presentation
            .surface
            .make_current()
            .host_expect("Failed to make the GLES context current");
        presentation.window.request_redraw();
        self.presentation = Some(presentation);

        self.dispatcher.surface_created();
        self.sync_size();
    }

    fn suspended(&mut self, _event_loop: &ActiveEventLoop) {
        self.dispatcher.pause();
        self.dispatcher.surface_destroyed();
        self.presentation = None;
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested | WindowEvent::Destroyed => {
                log::info!("Window closed; stopping");
                event_loop.exit();
            }
            WindowEvent::Resized(_) | WindowEvent::ScaleFactorChanged { .. } => self.sync_size(),
            WindowEvent::RedrawRequested => {
                // The EGL size can change without a Resized event, e.g. on rotation
                self.sync_size();
                let Some(presentation) = self.presentation.as_mut() else {
                    return;
                };
                if self.dispatcher.render_frame() {
                    if let Err(err) = presentation.surface.swap_buffers() {
                        log::error!("Failed to swap buffers: {}", err);
                    }
                }
                presentation.window.request_redraw();
            }
            WindowEvent::Touch(touch) => {
                let phase = match touch.phase {
                    WinitTouchPhase::Started => TouchPhase::Down,
                    WinitTouchPhase::Moved => TouchPhase::Move,
                    WinitTouchPhase::Ended => TouchPhase::Up,
                    WinitTouchPhase::Cancelled => TouchPhase::Cancel,
                };
                let (x, y) = (touch.location.x, touch.location.y);
                for event in self.touches.forward(touch.id, phase, x, y) {
                    self.dispatcher.pointer(event);
                }
            }
            _ => {}
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        self.dispatcher.done();
        self.presentation = None;
    }
}
