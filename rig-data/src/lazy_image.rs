//! Deferred image handles.
//!
//! A [`LazyImage`] only remembers where an image lives. Pixels are decoded
//! when the handle is resolved, every time it is resolved, so loading a
//! dataset never touches image files.

use image::{DynamicImage, RgbaImage};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur while resolving an image.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to decode image {}: {source}", .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Image {} decoded to an empty frame", .path.display())]
    Empty { path: PathBuf },
}

/// Turns an image path into decoded pixels.
///
/// The filesystem implementation is [`FsImageSource`]. Closures of the form
/// `Fn(&Path) -> Result<DynamicImage, LoadError>` also implement this trait,
/// which lets callers substitute synthetic images.
pub trait ImageSource {
    /// Decode the image stored at `path`.
    fn decode(&self, path: &Path) -> Result<DynamicImage, LoadError>;
}

/// Decodes images from disk using the `image` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsImageSource;

impl ImageSource for FsImageSource {
    fn decode(&self, path: &Path) -> Result<DynamicImage, LoadError> {
        image::open(path).map_err(|source| LoadError::Decode {
            path: path.to_path_buf(),
            source,
        })
    }
}

impl<F> ImageSource for F
where
    F: Fn(&Path) -> Result<DynamicImage, LoadError>,
{
    fn decode(&self, path: &Path) -> Result<DynamicImage, LoadError> {
        self(path)
    }
}

/// A reference to an image file that is decoded on demand.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LazyImage {
    path: PathBuf,
}

impl LazyImage {
    /// Create a handle. No I/O happens here.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the underlying image file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Decode the image exactly as stored (channel count and bit depth kept).
    pub fn resolve_unmodified<S>(&self, source: &S) -> Result<DynamicImage, LoadError>
    where
        S: ImageSource + ?Sized,
    {
        let image = source.decode(&self.path)?;
        if image.width() == 0 || image.height() == 0 {
            return Err(LoadError::Empty {
                path: self.path.clone(),
            });
        }
        Ok(image)
    }

    /// Decode the image and coerce it to 8-bit RGBA.
    ///
    /// Single-channel sources have their luminance replicated into the color
    /// channels with an opaque alpha; 16-bit sources are scaled down to 8 bits.
    pub fn resolve_modified<S>(&self, source: &S) -> Result<RgbaImage, LoadError>
    where
        S: ImageSource + ?Sized,
    {
        self.resolve_unmodified(source).map(DynamicImage::into_rgba8)
    }

    /// [`Self::resolve_unmodified`] against the filesystem.
    pub fn unmodified_load(&self) -> Result<DynamicImage, LoadError> {
        self.resolve_unmodified(&FsImageSource)
    }

    /// [`Self::resolve_modified`] against the filesystem.
    pub fn modified_load(&self) -> Result<RgbaImage, LoadError> {
        self.resolve_modified(&FsImageSource)
    }
}
