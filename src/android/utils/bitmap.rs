//! Bitmaps decoded by the platform codec.
//!
//! Decoding goes `getAssets().open(name)` -> `BitmapFactory.decodeStream`, the resulting
//! `android.graphics.Bitmap` is held through a global reference and recycled on drop.

use super::ndk::clear_pending_exception;
use crate::core::engine::{Bitmap, ImageSource};
use crate::core::error::HostError;
use jni::objects::{GlobalRef, JObject, JValue};
use jni::{JNIEnv, JavaVM};
use std::sync::Arc;

fn jni_error(err: jni::errors::Error) -> HostError {
    HostError::Jni(err.to_string())
}

pub struct AndroidImageSource {
    vm: Arc<JavaVM>,
    activity: GlobalRef,
}

impl AndroidImageSource {
    pub fn new(env: &mut JNIEnv, activity: &JObject) -> Result<Self, HostError> {
        let vm = env.get_java_vm().map_err(jni_error)?;
        let activity = env.new_global_ref(activity).map_err(jni_error)?;
        Ok(Self {
            vm: Arc::new(vm),
            activity,
        })
    }

    fn decode(&self, env: &mut JNIEnv, name: &str) -> jni::errors::Result<Option<AndroidBitmap>> {
        env.with_local_frame(8, |env| {
            let assets = env
                .call_method(
                    self.activity.as_obj(),
                    "getAssets",
                    "()Landroid/content/res/AssetManager;",
                    &[],
                )?
                .l()?;
            let name = env.new_string(name)?;
            let stream = env
                .call_method(
                    &assets,
                    "open",
                    "(Ljava/lang/String;)Ljava/io/InputStream;",
                    &[JValue::from(&name)],
                )?
                .l()?;

            let decoded = env
                .call_static_method(
                    "android/graphics/BitmapFactory",
                    "decodeStream",
                    "(Ljava/io/InputStream;)Landroid/graphics/Bitmap;",
                    &[JValue::from(&stream)],
                )
                .and_then(|value| value.l());
            clear_pending_exception(env);
            env.call_method(&stream, "close", "()V", &[])?;

            let bitmap = decoded?;
            if bitmap.is_null() {
                return Ok(None);
            }
            let width = env.call_method(&bitmap, "getWidth", "()I", &[])?.i()?;
            let height = env.call_method(&bitmap, "getHeight", "()I", &[])?.i()?;
            Ok(Some(AndroidBitmap {
                vm: self.vm.clone(),
                bitmap: env.new_global_ref(&bitmap)?,
                width,
                height,
            }))
        })
    }
}

impl ImageSource for AndroidImageSource {
    fn open_image(&self, name: &str) -> Option<Box<dyn Bitmap>> {
        let mut env = self.vm.attach_current_thread().ok()?;
        match self.decode(&mut env, name) {
            Ok(Some(bitmap)) => Some(Box::new(bitmap)),
            Ok(None) => {
                log::debug!("{} is not a decodable image", name);
                None
            }
            Err(err) => {
                clear_pending_exception(&mut env);
                log::debug!("Failed to open {}: {}", name, err);
                None
            }
        }
    }
}

pub struct AndroidBitmap {
    vm: Arc<JavaVM>,
    bitmap: GlobalRef,
    width: i32,
    height: i32,
}

impl Bitmap for AndroidBitmap {
    fn width(&self) -> i32 {
        self.width
    }

    fn height(&self) -> i32 {
        self.height
    }

    fn read_pixels(&self, out: &mut [u32]) -> Result<(), HostError> {
        let needed = self.pixel_count()?;
        let length = i32::try_from(needed).map_err(|_| HostError::ImageTooLarge {
            width: self.width,
            height: self.height,
        })?;
        if out.len() < needed {
            return Err(HostError::BufferTooSmall {
                needed,
                got: out.len(),
            });
        }

        let mut env = self.vm.attach_current_thread().map_err(jni_error)?;
        let result = env.with_local_frame(4, |env| -> jni::errors::Result<Vec<i32>> {
            let array = env.new_int_array(length)?;
            env.call_method(
                self.bitmap.as_obj(),
                "getPixels",
                "([IIIIIII)V",
                &[
                    JValue::from(&array),
                    JValue::Int(0),
                    JValue::Int(self.width),
                    JValue::Int(0),
                    JValue::Int(0),
                    JValue::Int(self.width),
                    JValue::Int(self.height),
                ],
            )?;
            let mut pixels = vec![0; needed];
            env.get_int_array_region(&array, 0, &mut pixels)?;
            Ok(pixels)
        });

        match result {
            Ok(pixels) => {
                for (dst, src) in out.iter_mut().zip(pixels) {
                    *dst = src as u32;
                }
                Ok(())
            }
            Err(err) => {
                clear_pending_exception(&mut env);
                Err(jni_error(err))
            }
        }
    }
}

impl Drop for AndroidBitmap {
    fn drop(&mut self) {
        let Ok(mut env) = self.vm.attach_current_thread() else {
            return;
        };
        if let Err(err) = env.call_method(self.bitmap.as_obj(), "recycle", "()V", &[]) {
            clear_pending_exception(&mut env);
            log::warn!("Failed to recycle bitmap: {}", err);
        }
    }
}
