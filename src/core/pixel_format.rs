//! Surface pixel format negotiation.
//!
//! The driver is asked for every configuration that roughly matches, then the list is scanned
//! in driver order and the first configuration offering at least the requested bits wins.

use super::error::HostError;

/// Attributes read back from a candidate configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigAttrib {
    Red,
    Green,
    Blue,
    Alpha,
    Depth,
    Stencil,
    BufferSize,
    /// Only meaningful as a request: restrict to window-capable configurations.
    WindowSurface,
    /// Only meaningful as a request: restrict to GLES 2 capable configurations.
    Es2Renderable,
}

/// Minimum bit counts a configuration must offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelFormat {
    pub red: i32,
    pub green: i32,
    pub blue: i32,
    pub alpha: i32,
    pub depth: i32,
    pub stencil: i32,
}

impl PixelFormat {
    pub const RGBA4444_D8: PixelFormat = PixelFormat {
        red: 4,
        green: 4,
        blue: 4,
        alpha: 4,
        depth: 8,
        stencil: 0,
    };

    pub const RGB444_D8: PixelFormat = PixelFormat {
        red: 4,
        green: 4,
        blue: 4,
        alpha: 0,
        depth: 8,
        stencil: 0,
    };

    /// Attribute/value pairs for the driver-side pre-filter.
    ///
    /// Stencil is left to the scan, and alpha is only requested when some is wanted:
    /// drivers tend to sort alpha-less configurations last once alpha is in the request.
    pub fn request_attribs(&self, buffer_size: i32) -> Vec<(ConfigAttrib, i32)> {
        let mut attribs = vec![(ConfigAttrib::WindowSurface, 1)];
        if buffer_size > 0 {
            attribs.push((ConfigAttrib::BufferSize, buffer_size));
        }
        attribs.push((ConfigAttrib::Depth, self.depth));
        attribs.push((ConfigAttrib::Red, self.red));
        attribs.push((ConfigAttrib::Green, self.green));
        attribs.push((ConfigAttrib::Blue, self.blue));
        if self.alpha > 0 {
            attribs.push((ConfigAttrib::Alpha, self.alpha));
        }
        attribs.push((ConfigAttrib::Es2Renderable, 1));
        attribs
    }

    /// More bits than asked is fine.
    pub fn is_satisfied_by<F>(&self, mut query: F) -> bool
    where
        F: FnMut(ConfigAttrib) -> Option<i32>,
    {
        let mut at_least = |attrib, wanted| query(attrib).unwrap_or(0) >= wanted;
        at_least(ConfigAttrib::Stencil, self.stencil)
            && at_least(ConfigAttrib::Depth, self.depth)
            && at_least(ConfigAttrib::Red, self.red)
            && at_least(ConfigAttrib::Green, self.green)
            && at_least(ConfigAttrib::Blue, self.blue)
            && at_least(ConfigAttrib::Alpha, self.alpha)
    }
}

/// Return the first candidate satisfying `format`.
///
/// `query` reads an attribute of a candidate, `None` when the driver cannot answer, which
/// counts as zero bits.
pub fn choose_config<C, F>(candidates: &[C], format: &PixelFormat, mut query: F) -> Result<C, HostError>
where
    C: Copy,
    F: FnMut(C, ConfigAttrib) -> Option<i32>,
{
    if candidates.is_empty() {
        return Err(HostError::NoMatchingConfig);
    }
    candidates
        .iter()
        .copied()
        .find(|&candidate| format.is_satisfied_by(|attrib| query(candidate, attrib)))
        .ok_or(HostError::NoSuitableConfig)
}
