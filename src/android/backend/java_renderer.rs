//! JNI exports for a Java host that owns the GL surface.
//!
//! The Java side is an activity with a `GLSurfaceView` and its renderer, declaring:
//!
//! - `org.enginehost.HostActivity.nativeInit()`, called from `onCreate`
//! - `org.enginehost.HostRenderer.nativeInit/nativeResize/nativeRender/nativeDone`, called from
//!   the renderer callbacks on the GL thread
//! - `org.enginehost.HostView.nativePause/nativeResume/nativeDown/nativeUp/nativeMove`, called on
//!   the UI thread
//!
//! The view already turns touches into move/down/up calls, so no touch mapping happens here.

use crate::android::utils::{
    bitmap::AndroidImageSource,
    logging::init_logging,
    ndk::{clear_pending_exception, context_dir},
};
use crate::core::config::{HostConfig, CONFIG_FILE, VERSION};
use crate::core::error::HostError;
use crate::core::input::PointerEvent;
use crate::core::lifecycle::Dispatcher;
use crate::ffi::{install_image_source, FfiEngine};
use jni::objects::{JClass, JObject};
use jni::sys::jint;
use jni::JNIEnv;
use std::sync::{Arc, Mutex, OnceLock};

static DISPATCHER: Mutex<Option<Dispatcher<FfiEngine>>> = Mutex::new(None);
static SENTRY_GUARD: OnceLock<Option<sentry::ClientInitGuard>> = OnceLock::new();

fn with_dispatcher(call: &str, f: impl FnOnce(&mut Dispatcher<FfiEngine>)) {
    match DISPATCHER.lock() {
        Ok(mut dispatcher) => match dispatcher.as_mut() {
            Some(dispatcher) => f(dispatcher),
            None => log::warn!("{} before HostActivity.nativeInit; dropped", call),
        },
        Err(err) => log::error!("{}: {}", call, err),
    }
}

/// Only the copy in the data directory is read; the Java host has no asset manager handy here.
fn load_config(env: &mut JNIEnv, activity: &JObject) -> (HostConfig, Vec<HostError>) {
    let pushed = match context_dir(env, activity, "getFilesDir") {
        Ok(dir) => HostConfig::from_file(&dir.join(CONFIG_FILE)),
        Err(_) => {
            clear_pending_exception(env);
            Ok(None)
        }
    };
    HostConfig::resolve([pushed])
}

#[no_mangle]
pub extern "system" fn Java_org_enginehost_HostActivity_nativeInit(
    mut env: JNIEnv,
    activity: JObject,
) {
    let (config, config_errors) = load_config(&mut env, &activity);
    SENTRY_GUARD.get_or_init(|| init_logging(&config));
    for err in config_errors {
        log::warn!("Ignoring {}: {}", CONFIG_FILE, err);
    }
    log::info!("engine-host {} attached to the Java host", VERSION);

    match AndroidImageSource::new(&mut env, &activity) {
        Ok(source) => install_image_source(Arc::new(source)),
        Err(err) => log::error!("Images will not load: {}", err),
    }

    let Ok(mut dispatcher) = DISPATCHER.lock() else {
        return;
    };
    // The activity is recreated on configuration changes; the engine lives on
    if dispatcher.is_none() {
        match FfiEngine::registered() {
            Some(engine) => *dispatcher = Some(Dispatcher::new(engine)),
            None => log::error!("No engine registered with host_register_engine"),
        }
    }
}

#[no_mangle]
pub extern "system" fn Java_org_enginehost_HostRenderer_nativeInit(_env: JNIEnv, _class: JClass) {
    with_dispatcher("nativeInit", |dispatcher| dispatcher.surface_created());
}

#[no_mangle]
pub extern "system" fn Java_org_enginehost_HostRenderer_nativeResize(
    _env: JNIEnv,
    _class: JClass,
    width: jint,
    height: jint,
) {
    with_dispatcher("nativeResize", |dispatcher| {
        if let Err(err) = dispatcher.surface_changed(width, height) {
            log::warn!("Dropping resize: {}", err);
        }
    });
}

#[no_mangle]
pub extern "system" fn Java_org_enginehost_HostRenderer_nativeRender(_env: JNIEnv, _class: JClass) {
    with_dispatcher("nativeRender", |dispatcher| {
        dispatcher.render_frame();
    });
}

#[no_mangle]
pub extern "system" fn Java_org_enginehost_HostRenderer_nativeDone(_env: JNIEnv, _class: JClass) {
    with_dispatcher("nativeDone", |dispatcher| dispatcher.done());
}

#[no_mangle]
pub extern "system" fn Java_org_enginehost_HostView_nativePause(_env: JNIEnv, _class: JClass) {
    with_dispatcher("nativePause", |dispatcher| {
        dispatcher.pause();
        dispatcher.surface_destroyed();
    });
}

/// A view that preserves its EGL context gets only a resize after this, no new `nativeInit`.
#[no_mangle]
pub extern "system" fn Java_org_enginehost_HostView_nativeResume(_env: JNIEnv, _class: JClass) {
    with_dispatcher("nativeResume", |dispatcher| dispatcher.resume());
}

#[no_mangle]
pub extern "system" fn Java_org_enginehost_HostView_nativeDown(_env: JNIEnv, _class: JClass) {
    with_dispatcher("nativeDown", |dispatcher| dispatcher.pointer(PointerEvent::Down));
}

#[no_mangle]
pub extern "system" fn Java_org_enginehost_HostView_nativeUp(_env: JNIEnv, _class: JClass) {
    with_dispatcher("nativeUp", |dispatcher| dispatcher.pointer(PointerEvent::Up));
}

#[no_mangle]
pub extern "system" fn Java_org_enginehost_HostView_nativeMove(
    _env: JNIEnv,
    _class: JClass,
    x: jint,
    y: jint,
) {
    with_dispatcher("nativeMove", |dispatcher| {
        dispatcher.pointer(PointerEvent::Move { x, y })
    });
}
