use engine_host::core::engine::{Bitmap, Engine, ImageSource};
use engine_host::core::error::HostError;
use engine_host::ffi::*;
use std::ffi::CString;
use std::sync::atomic::{AtomicI32, Ordering};
use std::sync::Arc;

struct Checkerboard;

impl Bitmap for Checkerboard {
    fn width(&self) -> i32 {
        2
    }
    fn height(&self) -> i32 {
        2
    }
    fn read_pixels(&self, out: &mut [u32]) -> Result<(), HostError> {
        out[..4].copy_from_slice(&[0xff000000, 0xffffffff, 0xffffffff, 0xff000000]);
        Ok(())
    }
}

struct Assets;

impl ImageSource for Assets {
    fn open_image(&self, name: &str) -> Option<Box<dyn Bitmap>> {
        (name == "checker.png").then(|| Box::new(Checkerboard) as Box<dyn Bitmap>)
    }
}

#[test]
fn images_round_trip_through_the_c_abi() {
    install_image_source(Arc::new(Assets));
    let name = CString::new("checker.png").unwrap();
    unsafe {
        let image = host_open_image(name.as_ptr());
        assert!(!image.is_null());
        assert_eq!(host_image_width(image), 2);
        assert_eq!(host_image_height(image), 2);

        let mut short = [0u32; 3];
        assert_eq!(host_image_get_pixels(image, short.as_mut_ptr(), short.len()), -1);

        let mut pixels = [0u32; 4];
        assert_eq!(host_image_get_pixels(image, pixels.as_mut_ptr(), pixels.len()), 0);
        assert_eq!(pixels, [0xff000000, 0xffffffff, 0xffffffff, 0xff000000]);

        host_close_image(image);
    }
}

#[test]
fn missing_images_and_null_handles_are_tolerated() {
    install_image_source(Arc::new(Assets));
    let name = CString::new("missing.png").unwrap();
    unsafe {
        assert!(host_open_image(name.as_ptr()).is_null());
        assert!(host_open_image(std::ptr::null()).is_null());
        assert_eq!(host_image_width(std::ptr::null()), 0);
        assert_eq!(host_image_height(std::ptr::null()), 0);
        assert_eq!(host_image_get_pixels(std::ptr::null(), std::ptr::null_mut(), 0), -1);
        host_close_image(std::ptr::null_mut());
    }
}

static LAST_SIZE: AtomicI32 = AtomicI32::new(0);
static FRAMES: AtomicI32 = AtomicI32::new(0);
static LAST_AXIS: AtomicI32 = AtomicI32::new(0);

unsafe extern "C" fn on_resize(width: i32, height: i32) {
    LAST_SIZE.store(width * 10_000 + height, Ordering::SeqCst);
}

unsafe extern "C" fn on_render() {
    FRAMES.fetch_add(1, Ordering::SeqCst);
}

unsafe extern "C" fn on_axis(dx: f32, dy: f32) {
    LAST_AXIS.store((dx * 100.0) as i32 * 10_000 + (dy * 100.0) as i32, Ordering::SeqCst);
}

#[test]
fn registered_table_drives_the_engine() {
    assert_eq!(unsafe { host_register_engine(std::ptr::null()) }, -1);

    let vtable = EngineVTable {
        resize: Some(on_resize),
        render_frame: Some(on_render),
        pointer_axis: Some(on_axis),
        ..Default::default()
    };
    assert_eq!(unsafe { host_register_engine(&vtable) }, 0);

    let mut engine = FfiEngine::registered().unwrap();
    // Entries left null are skipped
    engine.init();
    engine.pointer_down();
    engine.resize(1280, 720);
    engine.render_frame();
    engine.render_frame();
    engine.pointer_axis(1.5, 12.0);

    assert_eq!(LAST_SIZE.load(Ordering::SeqCst), 1280 * 10_000 + 720);
    assert_eq!(FRAMES.load(Ordering::SeqCst), 2);
    assert_eq!(LAST_AXIS.load(Ordering::SeqCst), 150 * 10_000 + 1200);
}
