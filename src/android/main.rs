use crate::{
    android::{
        app::HostApp,
        backend::egl::load_egl,
        utils::{
            assets::load_config, bitmap::AndroidImageSource, logging::init_logging,
            ndk::run_in_jvm, window::configure_window,
        },
    },
    core::{
        config::{CONFIG_FILE, VERSION},
        engine::Engine,
        logging::HostExpectation,
    },
    ffi::{install_image_source, FfiEngine},
};
use std::sync::Arc;
use winit::{
    event_loop::{ControlFlow, EventLoop},
    platform::android::{activity::AndroidApp, EventLoopBuilderExtAndroid},
};

/// Entry point for an engine core that registered itself through `host_register_engine`,
/// typically from `JNI_OnLoad` or a library constructor.
#[no_mangle]
fn android_main(android_app: AndroidApp) {
    match FfiEngine::registered() {
        Some(engine) => run(android_app, engine),
        None => {
            android_logger::init_once(android_logger::Config::default());
            log::error!("No engine registered with host_register_engine; nothing to run");
        }
    }
}

/// Run `engine` inside the activity until it is destroyed.
pub fn run<E: Engine>(android_app: AndroidApp, engine: E) {
    std::env::set_var("RUST_BACKTRACE", "full");

    let (config, config_errors) = load_config(&android_app);
    let _guard = init_logging(&config);
    for err in config_errors {
        log::warn!("Ignoring {}: {}", CONFIG_FILE, err);
    }
    log::info!(
        "engine-host {} starting with {}",
        VERSION,
        serde_json::to_string(&config).unwrap_or_default()
    );

    configure_window(&android_app, &config.window);

    match run_in_jvm(AndroidImageSource::new, &android_app) {
        Ok(source) => install_image_source(Arc::new(source)),
        Err(err) => log::error!("Images will not load: {}", err),
    }

    let egl = load_egl().host_expect("Failed to load libEGL.so");

    let event_loop = EventLoop::builder()
        .with_android_app(android_app)
        .build()
        .host_expect("Failed to create event loop");

    // Frames are driven by redraw requests, so the loop may sleep between events
    event_loop.set_control_flow(ControlFlow::Wait);

    let mut app = HostApp::build(config, egl, engine);
    event_loop.run_app(&mut app).host_expect("Failed to run app");
}
