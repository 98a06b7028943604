//! C ABI for engine cores that are not written in Rust.
//!
//! The core registers its entry points once with [`host_register_engine`] and reads assets
//! through the `host_*image*` functions.

use crate::core::engine::{Bitmap, Engine, ImageSource};
use std::ffi::{c_char, c_int, CStr};
use std::sync::{Arc, Mutex, RwLock};

/// Engine entry points. Null entries are skipped.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default)]
pub struct EngineVTable {
    pub init: Option<unsafe extern "C" fn()>,
    pub resize: Option<unsafe extern "C" fn(c_int, c_int)>,
    pub render_frame: Option<unsafe extern "C" fn()>,
    pub pointer_down: Option<unsafe extern "C" fn()>,
    pub pointer_up: Option<unsafe extern "C" fn()>,
    pub pointer_move: Option<unsafe extern "C" fn(c_int, c_int)>,
    pub pointer_axis: Option<unsafe extern "C" fn(f32, f32)>,
    pub pause: Option<unsafe extern "C" fn()>,
    pub done: Option<unsafe extern "C" fn()>,
}

static REGISTERED_ENGINE: Mutex<Option<EngineVTable>> = Mutex::new(None);

type SharedImageSource = Arc<dyn ImageSource + Send + Sync>;
static IMAGE_SOURCE: RwLock<Option<SharedImageSource>> = RwLock::new(None);

/// Register the engine entry points. Returns 0 on success, -1 for a null table.
///
/// # Safety
/// `vtable` must be null or point to a valid `EngineVTable`. The table is copied, but the
/// function pointers must stay callable for the rest of the process.
#[no_mangle]
pub unsafe extern "C" fn host_register_engine(vtable: *const EngineVTable) -> c_int {
    let Some(vtable) = vtable.as_ref() else {
        log::error!("Refusing to register a null engine table");
        return -1;
    };
    match REGISTERED_ENGINE.lock() {
        Ok(mut registered) => {
            *registered = Some(*vtable);
            0
        }
        Err(_) => -1,
    }
}

/// Engine backed by the table registered over the C ABI.
#[derive(Debug, Clone, Copy)]
pub struct FfiEngine {
    vtable: EngineVTable,
}

impl FfiEngine {
    pub fn new(vtable: EngineVTable) -> Self {
        Self { vtable }
    }

    pub fn registered() -> Option<Self> {
        let registered = *REGISTERED_ENGINE.lock().ok()?;
        registered.map(Self::new)
    }
}

impl Engine for FfiEngine {
    fn init(&mut self) {
        if let Some(f) = self.vtable.init {
            unsafe { f() }
        }
    }

    fn resize(&mut self, width: i32, height: i32) {
        if let Some(f) = self.vtable.resize {
            unsafe { f(width, height) }
        }
    }

    fn render_frame(&mut self) {
        if let Some(f) = self.vtable.render_frame {
            unsafe { f() }
        }
    }

    fn pointer_down(&mut self) {
        if let Some(f) = self.vtable.pointer_down {
            unsafe { f() }
        }
    }

    fn pointer_up(&mut self) {
        if let Some(f) = self.vtable.pointer_up {
            unsafe { f() }
        }
    }

    fn pointer_move(&mut self, x: i32, y: i32) {
        if let Some(f) = self.vtable.pointer_move {
            unsafe { f(x, y) }
        }
    }

    fn pointer_axis(&mut self, dx: f32, dy: f32) {
        if let Some(f) = self.vtable.pointer_axis {
            unsafe { f(dx, dy) }
        }
    }

    fn pause(&mut self) {
        if let Some(f) = self.vtable.pause {
            unsafe { f() }
        }
    }

    fn done(&mut self) {
        if let Some(f) = self.vtable.done {
            unsafe { f() }
        }
    }
}

/// Make `source` the one behind `host_open_image`, replacing any previous one.
pub fn install_image_source(source: SharedImageSource) {
    match IMAGE_SOURCE.write() {
        Ok(mut installed) => *installed = Some(source),
        Err(err) => log::error!("Failed to install image source: {}", err),
    }
}

pub fn image_source() -> Option<SharedImageSource> {
    IMAGE_SOURCE.read().ok()?.clone()
}

/// Opaque handle handed to the engine.
pub struct HostImage {
    bitmap: Box<dyn Bitmap>,
}

/// Decode asset `name`. Null when it is missing, undecodable, or no source is installed.
///
/// # Safety
/// `name` must be null or a valid NUL-terminated string.
#[no_mangle]
pub unsafe extern "C" fn host_open_image(name: *const c_char) -> *mut HostImage {
    if name.is_null() {
        return std::ptr::null_mut();
    }
    let Ok(name) = CStr::from_ptr(name).to_str() else {
        return std::ptr::null_mut();
    };
    let Some(source) = image_source() else {
        log::warn!("No image source installed, cannot open {}", name);
        return std::ptr::null_mut();
    };
    match source.open_image(name) {
        Some(bitmap) => Box::into_raw(Box::new(HostImage { bitmap })),
        None => std::ptr::null_mut(),
    }
}

/// # Safety
/// `image` must be null or a live handle from [`host_open_image`].
#[no_mangle]
pub unsafe extern "C" fn host_image_width(image: *const HostImage) -> c_int {
    image.as_ref().map_or(0, |image| image.bitmap.width())
}

/// # Safety
/// `image` must be null or a live handle from [`host_open_image`].
#[no_mangle]
pub unsafe extern "C" fn host_image_height(image: *const HostImage) -> c_int {
    image.as_ref().map_or(0, |image| image.bitmap.height())
}

/// Copy the ARGB pixels of `image` into `out`, which holds `len` values.
/// Returns 0 on success and -1 when a pointer is null, the buffer is short or the read fails.
///
/// # Safety
/// `image` must be null or a live handle from [`host_open_image`]; `out` must be null or
/// valid for `len` writes.
#[no_mangle]
pub unsafe extern "C" fn host_image_get_pixels(
    image: *const HostImage,
    out: *mut u32,
    len: usize,
) -> c_int {
    let Some(image) = image.as_ref() else {
        return -1;
    };
    if out.is_null() {
        return -1;
    }
    let needed = match image.bitmap.pixel_count() {
        Ok(needed) => needed,
        Err(err) => {
            log::error!("Failed to read pixels: {}", err);
            return -1;
        }
    };
    if len < needed {
        log::error!("Pixel buffer too small: need {}, got {}", needed, len);
        return -1;
    }
    let out = std::slice::from_raw_parts_mut(out, len);
    match image.bitmap.read_pixels(out) {
        Ok(()) => 0,
        Err(err) => {
            log::error!("Failed to read pixels: {}", err);
            -1
        }
    }
}

/// Release `image`. The handle is invalid afterwards.
///
/// # Safety
/// `image` must be null or a live handle from [`host_open_image`], not closed before.
#[no_mangle]
pub unsafe extern "C" fn host_close_image(image: *mut HostImage) {
    if !image.is_null() {
        drop(Box::from_raw(image));
    }
}
