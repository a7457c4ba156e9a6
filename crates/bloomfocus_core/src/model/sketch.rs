//! Sketch artifact model.
//!
//! # Responsibility
//! - Wrap the encoded image produced by the drawing surface.
//! - Learn natural width/height once, at save time.
//!
//! # Invariants
//! - Encoded bytes are never mutated after construction.
//! - `width` and `height` are both non-zero.
//! - Clones share the same byte buffer.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use image::ImageReader;
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io::Cursor;
use std::sync::Arc;
use uuid::Uuid;

static DATA_URL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^data:(image/[A-Za-z0-9.+-]+);base64,([A-Za-z0-9+/=\s]*)$")
        .expect("valid data url regex")
});

/// Media type recorded when a sketch is built from bytes of unknown origin.
pub const DEFAULT_MEDIA_TYPE: &str = "image/png";

/// Stable identifier for one saved sketch.
pub type SketchId = Uuid;

/// Sketch construction errors.
#[derive(Debug)]
pub enum SketchError {
    /// No image bytes were supplied.
    Empty,
    /// Input is not a base64 `data:image/...` URL.
    UnsupportedDataUrl,
    /// Data URL payload is not valid base64.
    InvalidBase64(base64::DecodeError),
    /// Bytes could not be decoded as a known image format.
    Undecodable(image::ImageError),
    /// Decoded image has a zero width or height.
    ZeroDimension { width: u32, height: u32 },
}

impl Display for SketchError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "sketch image data must not be empty"),
            Self::UnsupportedDataUrl => {
                write!(f, "sketch data url must look like `data:image/<type>;base64,...`")
            }
            Self::InvalidBase64(err) => write!(f, "sketch data url payload is not base64: {err}"),
            Self::Undecodable(err) => write!(f, "sketch image could not be decoded: {err}"),
            Self::ZeroDimension { width, height } => {
                write!(f, "sketch image has zero dimension: {width}x{height}")
            }
        }
    }
}

impl Error for SketchError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidBase64(err) => Some(err),
            Self::Undecodable(err) => Some(err),
            _ => None,
        }
    }
}

impl From<base64::DecodeError> for SketchError {
    fn from(value: base64::DecodeError) -> Self {
        Self::InvalidBase64(value)
    }
}

impl From<image::ImageError> for SketchError {
    fn from(value: image::ImageError) -> Self {
        Self::Undecodable(value)
    }
}

/// Opaque, immutable image artifact saved from the drawing surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sketch {
    id: SketchId,
    media_type: String,
    data: Arc<[u8]>,
    width: u32,
    height: u32,
}

impl Sketch {
    /// Builds a sketch from encoded image bytes, decoding only the header.
    ///
    /// # Errors
    /// - `Empty` for zero-length input.
    /// - `Undecodable` when the format is unknown or the header is corrupt.
    /// - `ZeroDimension` when the header reports an empty image.
    pub fn from_encoded(data: impl Into<Vec<u8>>) -> Result<Self, SketchError> {
        Self::decode(DEFAULT_MEDIA_TYPE.to_string(), data.into())
    }

    /// Builds a sketch from a `data:image/<type>;base64,<payload>` URL, the
    /// native export format of canvas-based drawing surfaces.
    pub fn from_data_url(url: &str) -> Result<Self, SketchError> {
        let captures = DATA_URL_RE
            .captures(url.trim())
            .ok_or(SketchError::UnsupportedDataUrl)?;
        let media_type = captures[1].to_ascii_lowercase();
        let payload: String = captures[2]
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect();
        let data = STANDARD.decode(payload.as_bytes())?;
        Self::decode(media_type, data)
    }

    /// Builds a sketch whose natural size is already known to the caller.
    ///
    /// No decoding is performed; the bytes stay opaque.
    pub fn with_dimensions(
        data: impl Into<Vec<u8>>,
        width: u32,
        height: u32,
    ) -> Result<Self, SketchError> {
        let data = data.into();
        if data.is_empty() {
            return Err(SketchError::Empty);
        }
        if width == 0 || height == 0 {
            return Err(SketchError::ZeroDimension { width, height });
        }
        Ok(Self {
            id: Uuid::new_v4(),
            media_type: DEFAULT_MEDIA_TYPE.to_string(),
            data: data.into(),
            width,
            height,
        })
    }

    fn decode(media_type: String, data: Vec<u8>) -> Result<Self, SketchError> {
        if data.is_empty() {
            return Err(SketchError::Empty);
        }
        let (width, height) = ImageReader::new(Cursor::new(data.as_slice()))
            .with_guessed_format()
            .map_err(image::ImageError::IoError)?
            .into_dimensions()?;
        if width == 0 || height == 0 {
            return Err(SketchError::ZeroDimension { width, height });
        }
        Ok(Self {
            id: Uuid::new_v4(),
            media_type,
            data: data.into(),
            width,
            height,
        })
    }

    pub fn id(&self) -> SketchId {
        self.id
    }

    pub fn media_type(&self) -> &str {
        &self.media_type
    }

    /// Encoded image bytes exactly as saved.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Natural `width / height`.
    pub fn aspect_ratio(&self) -> f64 {
        f64::from(self.width) / f64::from(self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::{Sketch, SketchError};

    #[test]
    fn with_dimensions_rejects_empty_bytes() {
        let err = Sketch::with_dimensions(Vec::new(), 10, 10).expect_err("empty must fail");
        assert!(matches!(err, SketchError::Empty));
    }

    #[test]
    fn with_dimensions_rejects_zero_height() {
        let err = Sketch::with_dimensions(vec![1, 2, 3], 10, 0).expect_err("zero must fail");
        assert!(matches!(
            err,
            SketchError::ZeroDimension {
                width: 10,
                height: 0
            }
        ));
    }

    #[test]
    fn clones_share_identity_and_bytes() {
        let sketch = Sketch::with_dimensions(vec![9; 4], 20, 10).expect("valid sketch");
        let copy = sketch.clone();
        assert_eq!(copy.id(), sketch.id());
        assert_eq!(copy.data().as_ptr(), sketch.data().as_ptr());
        assert!((copy.aspect_ratio() - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn from_encoded_rejects_garbage() {
        let err = Sketch::from_encoded(b"not an image".to_vec()).expect_err("garbage must fail");
        assert!(matches!(err, SketchError::Undecodable(_)));
    }

    #[test]
    fn from_data_url_rejects_non_image_scheme() {
        let err = Sketch::from_data_url("data:text/plain;base64,aGVsbG8=")
            .expect_err("text payload must fail");
        assert!(matches!(err, SketchError::UnsupportedDataUrl));
    }

    #[test]
    fn from_data_url_rejects_bad_base64() {
        let err = Sketch::from_data_url("data:image/png;base64,@@@@")
            .expect_err("invalid base64 must fail");
        assert!(matches!(err, SketchError::UnsupportedDataUrl));

        let err = Sketch::from_data_url("data:image/png;base64,abc")
            .expect_err("truncated base64 must fail");
        assert!(matches!(err, SketchError::InvalidBase64(_)));
    }
}
