use super::engine::Engine;
use super::error::HostError;
use super::input::PointerEvent;

/// Owns the engine and keeps host callbacks in the order the engine relies on.
#[derive(Debug)]
pub struct Dispatcher<E: Engine> {
    engine: E,
    initialized: bool,
    size: Option<(i32, i32)>,
    paused: bool,
    done: bool,
}

impl<E: Engine> Dispatcher<E> {
    pub fn new(engine: E) -> Self {
        Self {
            engine,
            initialized: false,
            size: None,
            paused: false,
            done: false,
        }
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    pub fn size(&self) -> Option<(i32, i32)> {
        self.size
    }

    /// A new GL context is current. The engine must rebuild its GL state.
    /// A fresh surface also means the host is in the foreground again.
    pub fn surface_created(&mut self) {
        if self.done {
            return;
        }
        log::info!("Initialising engine");
        self.engine.init();
        self.initialized = true;
        self.paused = false;
        self.size = None;
    }

    pub fn surface_changed(&mut self, width: i32, height: i32) -> Result<(), HostError> {
        if self.done {
            return Ok(());
        }
        if !self.initialized {
            return Err(HostError::OutOfOrder("resize before init"));
        }
        log::info!("Resizing to {}x{}", width, height);
        self.engine.resize(width, height);
        self.size = Some((width, height));
        Ok(())
    }

    /// The surface is gone; the next frame waits for a fresh resize.
    pub fn surface_destroyed(&mut self) {
        self.size = None;
    }

    /// Render one frame if the engine is ready for it. Returns whether a frame was produced.
    pub fn render_frame(&mut self) -> bool {
        if self.done || self.paused || !self.initialized || self.size.is_none() {
            return false;
        }
        self.engine.render_frame();
        true
    }

    pub fn pointer(&mut self, event: PointerEvent) {
        if self.done || !self.initialized {
            log::trace!("Dropping {:?}: engine not initialised", event);
            return;
        }
        match event {
            PointerEvent::Down => self.engine.pointer_down(),
            PointerEvent::Up => self.engine.pointer_up(),
            PointerEvent::Move { x, y } => self.engine.pointer_move(x, y),
            PointerEvent::Axis { dx, dy } => self.engine.pointer_axis(dx, dy),
        }
    }

    pub fn pause(&mut self) {
        if self.done || self.paused {
            return;
        }
        self.paused = true;
        self.engine.pause();
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    /// Tell the engine to shut down. Only the first call reaches it.
    pub fn done(&mut self) {
        if self.done {
            return;
        }
        self.done = true;
        self.engine.done();
    }
}
