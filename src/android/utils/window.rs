use super::ndk::run_in_jvm;
use crate::core::config::WindowConfig;
use jni::objects::{JObject, JValue};
use jni::JNIEnv;
use winit::platform::android::activity::{AndroidApp, WindowManagerFlags};

// We need this function to enable fullscreen immersive mode because the below is not enough:
// android_app.set_window_flags(WindowManagerFlags::FULLSCREEN, WindowManagerFlags::empty());
// More info: https://github.com/rust-mobile/android-activity/issues/95
pub fn enable_fullscreen_immersive_mode(env: &mut JNIEnv, activity: &JObject) -> jni::errors::Result<()> {
    let window = env
        .call_method(activity, "getWindow", "()Landroid/view/Window;", &[])?
        .l()?;
    let decor_view = env
        .call_method(window, "getDecorView", "()Landroid/view/View;", &[])?
        .l()?;

    let view_class = env.find_class("android/view/View")?;
    let mut flags = 0;
    for flag in [
        "SYSTEM_UI_FLAG_FULLSCREEN",
        "SYSTEM_UI_FLAG_HIDE_NAVIGATION",
        "SYSTEM_UI_FLAG_IMMERSIVE_STICKY",
    ] {
        flags |= env.get_static_field(&view_class, flag, "I")?.i()?;
    }

    env.call_method(
        decor_view,
        "setSystemUiVisibility",
        "(I)V",
        &[JValue::from(flags)],
    )?;
    Ok(())
}

/// `orientation` is an `ActivityInfo.SCREEN_ORIENTATION_*` value.
pub fn set_requested_orientation(
    env: &mut JNIEnv,
    activity: &JObject,
    orientation: i32,
) -> jni::errors::Result<()> {
    env.call_method(
        activity,
        "setRequestedOrientation",
        "(I)V",
        &[JValue::from(orientation)],
    )?;
    Ok(())
}

/// Apply the window setup before the first surface exists.
/// Failures are cosmetic, so they are logged rather than fatal.
pub fn configure_window(android_app: &AndroidApp, config: &WindowConfig) {
    let mut flags = WindowManagerFlags::empty();
    if config.fullscreen {
        flags |= WindowManagerFlags::FULLSCREEN;
    }
    if config.keep_screen_on {
        flags |= WindowManagerFlags::KEEP_SCREEN_ON;
    }
    android_app.set_window_flags(flags, WindowManagerFlags::empty());

    let orientation = config.orientation.android_value();
    let immersive = config.immersive;
    let result = run_in_jvm(
        |env, activity| {
            set_requested_orientation(env, activity, orientation)?;
            if immersive {
                enable_fullscreen_immersive_mode(env, activity)?;
            }
            Ok::<_, jni::errors::Error>(())
        },
        android_app,
    );
    if let Err(err) = result {
        log::warn!("Failed to configure the window: {}", err);
    }
}
