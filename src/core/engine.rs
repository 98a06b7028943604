//! The boundary between the host and the engine core.

use super::error::HostError;

/// Calls the host makes into the engine.
///
/// The host guarantees `init` before any `resize` or `render_frame`, and a `resize` before the
/// first `render_frame` following any surface change. `init` runs again whenever the platform
/// hands over a fresh GL context, since resources from the previous context are gone.
#[cfg_attr(test, mockall::automock)]
pub trait Engine {
    fn init(&mut self);
    fn resize(&mut self, width: i32, height: i32);
    fn render_frame(&mut self);
    fn pointer_down(&mut self);
    fn pointer_up(&mut self);
    fn pointer_move(&mut self, x: i32, y: i32);
    /// Relative motion since the previous move, for engines steering with it like a joystick.
    fn pointer_axis(&mut self, _dx: f32, _dy: f32) {}
    fn pause(&mut self);
    fn done(&mut self);
}

/// A decoded platform bitmap. Dropping it releases the platform object.
pub trait Bitmap {
    fn width(&self) -> i32;
    fn height(&self) -> i32;
    /// Fill `out` row-major with ARGB8888 pixels. `out` holds at least `width * height` values.
    fn read_pixels(&self, out: &mut [u32]) -> Result<(), HostError>;

    fn pixel_count(&self) -> Result<usize, HostError> {
        let (width, height) = (self.width(), self.height());
        (width.max(0) as usize)
            .checked_mul(height.max(0) as usize)
            .ok_or(HostError::ImageTooLarge { width, height })
    }
}

/// Decodes named assets into bitmaps.
pub trait ImageSource {
    /// `None` when the asset is missing or cannot be decoded; no finer cause is reported.
    fn open_image(&self, name: &str) -> Option<Box<dyn Bitmap>>;
}

/// A window-backed GL surface the host renders into.
pub trait HostSurface {
    fn make_current(&mut self) -> Result<(), HostError>;
    /// Current size in pixels, as reported by the graphics stack.
    fn size(&self) -> Result<(i32, i32), HostError>;
    fn swap_buffers(&mut self) -> Result<(), HostError>;
}

impl<E: Engine + ?Sized> Engine for Box<E> {
    fn init(&mut self) {
        (**self).init()
    }
    fn resize(&mut self, width: i32, height: i32) {
        (**self).resize(width, height)
    }
    fn render_frame(&mut self) {
        (**self).render_frame()
    }
    fn pointer_down(&mut self) {
        (**self).pointer_down()
    }
    fn pointer_up(&mut self) {
        (**self).pointer_up()
    }
    fn pointer_move(&mut self, x: i32, y: i32) {
        (**self).pointer_move(x, y)
    }
    fn pointer_axis(&mut self, dx: f32, dy: f32) {
        (**self).pointer_axis(dx, dy)
    }
    fn pause(&mut self) {
        (**self).pause()
    }
    fn done(&mut self) {
        (**self).done()
    }
}
