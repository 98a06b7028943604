pub mod core {
    pub mod config;
    pub mod engine;
    pub mod error;
    pub mod image;
    pub mod input;
    pub mod lifecycle;
    pub mod logging;
    pub mod pixel_format;
}
pub mod ffi;

#[cfg(target_os = "android")]
pub mod android {
    #[cfg(feature = "native-activity")]
    pub mod app;
    #[cfg(feature = "native-activity")]
    pub mod main;
    pub mod backend {
        #[cfg(feature = "native-activity")]
        pub mod egl;
        #[cfg(feature = "java-renderer")]
        pub mod java_renderer;
    }
    pub mod utils {
        #[cfg(feature = "native-activity")]
        pub mod assets;
        pub mod bitmap;
        pub mod logging;
        pub mod ndk;
        #[cfg(feature = "native-activity")]
        pub mod window;
    }
}
