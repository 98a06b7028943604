use std::error::Error;
use std::fmt::{self, Display};

/// Errors surfaced by the host layer.
#[derive(Debug)]
pub enum HostError {
    /// The driver reported no configuration matching the requested attributes.
    NoMatchingConfig,
    /// Configurations exist, but none offers the requested bit depths.
    NoSuitableConfig,
    /// A boundary call arrived before the call it depends on.
    OutOfOrder(&'static str),
    /// The caller's pixel buffer cannot hold the whole image.
    BufferTooSmall { needed: usize, got: usize },
    /// The pixel count of an image does not fit in memory indices.
    ImageTooLarge { width: i32, height: i32 },
    /// The config file could not be parsed.
    Config(toml::de::Error),
    /// The platform graphics stack failed.
    Graphics(String),
    /// A JNI call failed.
    Jni(String),
    Io(std::io::Error),
}

impl Display for HostError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HostError::NoMatchingConfig => write!(f, "no GLES configs"),
            HostError::NoSuitableConfig => {
                write!(f, "no GLES config offers the requested pixel format")
            }
            HostError::OutOfOrder(what) => write!(f, "out of order: {}", what),
            HostError::BufferTooSmall { needed, got } => write!(
                f,
                "pixel buffer too small: need {} pixels, got {}",
                needed, got
            ),
            HostError::ImageTooLarge { width, height } => {
                write!(f, "image too large: {}x{}", width, height)
            }
            HostError::Config(err) => write!(f, "malformed config: {}", err),
            HostError::Graphics(msg) => write!(f, "graphics error: {}", msg),
            HostError::Jni(msg) => write!(f, "JNI error: {}", msg),
            HostError::Io(err) => write!(f, "I/O error: {}", err),
        }
    }
}

impl Error for HostError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            HostError::Config(err) => Some(err),
            HostError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<toml::de::Error> for HostError {
    fn from(err: toml::de::Error) -> Self {
        HostError::Config(err)
    }
}

impl From<std::io::Error> for HostError {
    fn from(err: std::io::Error) -> Self {
        HostError::Io(err)
    }
}
