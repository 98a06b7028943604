use jni::objects::JObject;
use jni::JNIEnv;
#[cfg(feature = "java-renderer")]
use {jni::objects::JString, std::path::PathBuf};
#[cfg(feature = "native-activity")]
use {
    crate::core::logging::HostExpectation,
    jni::sys::{jobject, JNIInvokeInterface_},
    jni::JavaVM,
    winit::platform::android::activity::AndroidApp,
};

#[cfg(feature = "native-activity")]
pub fn java_vm(android_app: &AndroidApp) -> JavaVM {
    unsafe { JavaVM::from_raw(android_app.vm_as_ptr() as *mut *const JNIInvokeInterface_) }
        .host_expect("Failed to get JavaVM")
}

/// A higher-order function to run a provided JNI function against the activity.
///
/// A Java exception left pending by `jni_function` is logged and cleared, so later JNI calls
/// on this thread stay legal.
#[cfg(feature = "native-activity")]
pub fn run_in_jvm<F, T>(jni_function: F, android_app: &AndroidApp) -> T
where
    F: FnOnce(&mut JNIEnv, &JObject) -> T,
{
    let vm = java_vm(android_app);
    let mut env = vm
        .attach_current_thread()
        .host_expect("Failed to attach thread");

    let activity = unsafe { JObject::from_raw(android_app.activity_as_ptr() as jobject) };
    let result = jni_function(&mut env, &activity);
    clear_pending_exception(&mut env);
    result
}

pub fn clear_pending_exception(env: &mut JNIEnv) {
    if env.exception_check().unwrap_or(false) {
        let _ = env.exception_describe();
        let _ = env.exception_clear();
    }
}

/// Resolve one of the `Context` directory getters, e.g. `getFilesDir`.
#[cfg(feature = "java-renderer")]
pub fn context_dir(env: &mut JNIEnv, context: &JObject, method: &str) -> jni::errors::Result<PathBuf> {
    let file = env
        .call_method(context, method, "()Ljava/io/File;", &[])?
        .l()?;
    let path = env
        .call_method(file, "getAbsolutePath", "()Ljava/lang/String;", &[])?
        .l()?;
    let path: String = env.get_string(&JString::from(path))?.into();
    Ok(PathBuf::from(path))
}
