use super::engine::ImageSource;

/// Swap the red and blue channels of an ARGB pixel.
///
/// Read back as little-endian bytes, the result is laid out R, G, B, A, which is what GL
/// texture uploads expect.
pub fn argb_to_rgba(pixel: u32) -> u32 {
    (pixel & 0xff00ff00) | ((pixel & 0x00ff0000) >> 16) | ((pixel & 0x000000ff) << 16)
}

/// An image decoded in one go and already released on the platform side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    pub width: u32,
    pub height: u32,
    /// Row-major, RGBA byte order.
    pub pixels: Vec<u32>,
}

impl Image {
    pub fn load(source: &dyn ImageSource, name: &str) -> Option<Self> {
        let Some(bitmap) = source.open_image(name) else {
            log::error!("could not load {}", name);
            return None;
        };

        let mut pixels = match bitmap.pixel_count() {
            Ok(count) => vec![0u32; count],
            Err(err) => {
                log::error!("could not size {}: {}", name, err);
                return None;
            }
        };
        if let Err(err) = bitmap.read_pixels(&mut pixels) {
            log::error!("could not read pixels of {}: {}", name, err);
            return None;
        }
        pixels.iter_mut().for_each(|pixel| *pixel = argb_to_rgba(*pixel));

        Some(Self {
            width: bitmap.width().max(0) as u32,
            height: bitmap.height().max(0) as u32,
            pixels,
        })
    }

    pub fn as_bytes(&self) -> Vec<u8> {
        self.pixels
            .iter()
            .flat_map(|pixel| pixel.to_le_bytes())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::engine::Bitmap;
    use crate::core::error::HostError;
    use std::cell::Cell;
    use std::rc::Rc;

    struct TestBitmap {
        width: i32,
        height: i32,
        argb: Vec<u32>,
        released: Rc<Cell<bool>>,
    }

    impl Bitmap for TestBitmap {
        fn width(&self) -> i32 {
            self.width
        }
        fn height(&self) -> i32 {
            self.height
        }
        fn read_pixels(&self, out: &mut [u32]) -> Result<(), HostError> {
            out[..self.argb.len()].copy_from_slice(&self.argb);
            Ok(())
        }
    }

    impl Drop for TestBitmap {
        fn drop(&mut self) {
            self.released.set(true);
        }
    }

    struct TestSource {
        released: Rc<Cell<bool>>,
    }

    impl ImageSource for TestSource {
        fn open_image(&self, name: &str) -> Option<Box<dyn Bitmap>> {
            (name == "tiles.png").then(|| {
                Box::new(TestBitmap {
                    width: 2,
                    height: 1,
                    argb: vec![0xff112233, 0x80aabbcc],
                    released: self.released.clone(),
                }) as Box<dyn Bitmap>
            })
        }
    }

    #[test]
    fn swaps_red_and_blue() {
        assert_eq!(argb_to_rgba(0xff112233), 0xff332211);
        assert_eq!(argb_to_rgba(0x00ff0000), 0x000000ff);
    }

    #[test]
    fn load_converts_and_releases_the_bitmap() {
        let released = Rc::new(Cell::new(false));
        let source = TestSource {
            released: released.clone(),
        };
        let image = Image::load(&source, "tiles.png").unwrap();
        assert_eq!((image.width, image.height), (2, 1));
        assert_eq!(image.pixels, vec![0xff332211, 0x80ccbbaa]);
        assert_eq!(&image.as_bytes()[..4], &[0x11, 0x22, 0x33, 0xff]);
        assert!(released.get());
    }

    #[test]
    fn missing_asset_yields_nothing() {
        let source = TestSource {
            released: Rc::new(Cell::new(false)),
        };
        assert!(Image::load(&source, "missing.png").is_none());
    }
}
