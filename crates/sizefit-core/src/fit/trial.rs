//! One encode attempt: resize from the source, encode, measure.
//!
//! A trial is a pure function of (image, format, quality, scale). Every
//! trial resamples the original image, never the output of an earlier
//! trial, so resampling loss cannot compound across a search.

use std::borrow::Cow;

use crate::decode::{resize, scaled_dimensions, DecodedImage, FilterType};
use crate::encode::{encode_image, EncodeError, OutputFormat};

/// Encoder capability used by the searches.
///
/// [`ImageCodec`] is the real implementation; the seam lets the search be
/// driven by any deterministic size model.
pub trait Codec {
    fn encode(
        &self,
        image: &DecodedImage,
        format: OutputFormat,
        quality: Option<u8>,
    ) -> Result<Vec<u8>, EncodeError>;
}

/// PNG and lossy WebP through [`encode_image`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageCodec;

impl Codec for ImageCodec {
    fn encode(
        &self,
        image: &DecodedImage,
        format: OutputFormat,
        quality: Option<u8>,
    ) -> Result<Vec<u8>, EncodeError> {
        encode_image(image, format, quality)
    }
}

impl<C: Codec + ?Sized> Codec for &C {
    fn encode(
        &self,
        image: &DecodedImage,
        format: OutputFormat,
        quality: Option<u8>,
    ) -> Result<Vec<u8>, EncodeError> {
        (**self).encode(image, format, quality)
    }
}

/// Parameters of a single trial.
#[derive(Debug, Clone, Copy)]
pub struct EncodeRequest<'a> {
    pub image: &'a DecodedImage,
    pub format: OutputFormat,
    /// Ignored by formats without a quality knob.
    pub quality: Option<u8>,
    /// Uniform scale factor in (0, 1].
    pub scale: f64,
    pub filter: FilterType,
}

impl<'a> EncodeRequest<'a> {
    /// Full-resolution request with the format's default quality.
    pub fn new(image: &'a DecodedImage, format: OutputFormat) -> Self {
        Self {
            image,
            format,
            quality: None,
            scale: 1.0,
            filter: FilterType::Lanczos3,
        }
    }

    pub fn with_quality(mut self, quality: Option<u8>) -> Self {
        self.quality = quality;
        self
    }

    pub fn with_scale(mut self, scale: f64) -> Self {
        debug_assert!(scale > 0.0 && scale <= 1.0, "scale {scale} outside (0, 1]");
        self.scale = scale;
        self
    }

    pub fn with_filter(mut self, filter: FilterType) -> Self {
        self.filter = filter;
        self
    }

    /// Quality the codec will actually see.
    fn effective_quality(&self) -> Option<u8> {
        if self.format.supports_quality() {
            self.quality
        } else {
            None
        }
    }
}

/// Result of one encode attempt. Never mutated after creation.
#[derive(Debug, Clone, PartialEq)]
pub struct EncodeTrial {
    bytes: Vec<u8>,
    quality: Option<u8>,
    scale: f64,
    width: u32,
    height: u32,
}

impl EncodeTrial {
    /// Encoded size in bytes.
    #[inline]
    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// Quality passed to the codec, `None` for formats without one.
    pub fn quality(&self) -> Option<u8> {
        self.quality
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Dimensions of the encoded image.
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Returns true if the trial is within `target` bytes.
    #[inline]
    pub fn fits(&self, target: usize) -> bool {
        self.size() <= target
    }

    #[cfg(test)]
    pub(crate) fn stub(size: usize, quality: Option<u8>, scale: f64) -> Self {
        Self {
            bytes: vec![0u8; size],
            quality,
            scale,
            width: 1,
            height: 1,
        }
    }
}

/// Run one trial.
///
/// # Errors
///
/// Returns the codec's error, or `EncodeError::ResizeFailed` if resampling
/// the source failed. Searches treat either as an infeasible probe.
pub fn run_trial<C: Codec + ?Sized>(
    codec: &C,
    request: &EncodeRequest<'_>,
) -> Result<EncodeTrial, EncodeError> {
    let source = request.image;
    let (width, height) = scaled_dimensions(source.width, source.height, request.scale);

    let image: Cow<'_, DecodedImage> = if (width, height) == (source.width, source.height) {
        Cow::Borrowed(source)
    } else {
        let resized = resize(source, width, height, request.filter)
            .map_err(|e| EncodeError::ResizeFailed(e.to_string()))?;
        Cow::Owned(resized)
    };

    let quality = request.effective_quality();
    let bytes = codec.encode(&image, request.format, quality)?;

    Ok(EncodeTrial {
        bytes,
        quality,
        scale: request.scale,
        width,
        height,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::{PixelLayout, PixelMode};
    use std::cell::RefCell;

    /// Records what the codec was asked to encode.
    #[derive(Default)]
    struct RecordingCodec {
        calls: RefCell<Vec<(u32, u32, Option<u8>)>>,
    }

    impl Codec for RecordingCodec {
        fn encode(
            &self,
            image: &DecodedImage,
            _format: OutputFormat,
            quality: Option<u8>,
        ) -> Result<Vec<u8>, EncodeError> {
            self.calls
                .borrow_mut()
                .push((image.width, image.height, quality));
            Ok(vec![0u8; (image.width * image.height) as usize])
        }
    }

    fn opaque(width: u32, height: u32) -> DecodedImage {
        DecodedImage::new(
            width,
            height,
            PixelLayout::Rgb8,
            PixelMode::Opaque,
            vec![100u8; (width * height * 3) as usize],
        )
    }

    #[cfg(feature = "libwebp")]
    #[test]
    fn test_full_scale_trial() {
        let img = opaque(40, 30);
        let codec = RecordingCodec::default();
        let request = EncodeRequest::new(&img, OutputFormat::WebP).with_quality(Some(55));

        let trial = run_trial(&codec, &request).unwrap();

        assert_eq!(trial.size(), 1200);
        assert_eq!(trial.quality(), Some(55));
        assert_eq!(trial.scale(), 1.0);
        assert_eq!(trial.dimensions(), (40, 30));
        assert_eq!(codec.calls.borrow().as_slice(), &[(40, 30, Some(55))]);
    }

    #[test]
    fn test_scaled_trial_resizes_from_source() {
        let img = opaque(40, 30);
        let codec = RecordingCodec::default();

        let request = EncodeRequest::new(&img, OutputFormat::WebP).with_scale(0.5);
        let trial = run_trial(&codec, &request).unwrap();

        assert_eq!(trial.dimensions(), (20, 15));
        assert_eq!(trial.scale(), 0.5);
        // the source is untouched
        assert_eq!((img.width, img.height), (40, 30));
    }

    #[test]
    fn test_png_trial_drops_quality() {
        let img = opaque(4, 4);
        let codec = RecordingCodec::default();
        let request = EncodeRequest::new(&img, OutputFormat::Png).with_quality(Some(10));

        let trial = run_trial(&codec, &request).unwrap();

        assert_eq!(trial.quality(), None);
        assert_eq!(codec.calls.borrow()[0].2, None);
    }

    #[test]
    fn test_tiny_scale_clamps_to_one_pixel() {
        let img = opaque(5, 3);
        let codec = RecordingCodec::default();
        let request = EncodeRequest::new(&img, OutputFormat::WebP).with_scale(0.01);

        let trial = run_trial(&codec, &request).unwrap();
        assert_eq!(trial.dimensions(), (1, 1));
    }

    #[test]
    fn test_fits() {
        let img = opaque(10, 10);
        let request = EncodeRequest::new(&img, OutputFormat::WebP);
        let trial = run_trial(&RecordingCodec::default(), &request).unwrap();

        assert!(trial.fits(100));
        assert!(trial.fits(1000));
        assert!(!trial.fits(99));
    }

    #[test]
    fn test_codec_error_propagates() {
        struct Failing;
        impl Codec for Failing {
            fn encode(
                &self,
                _image: &DecodedImage,
                format: OutputFormat,
                _quality: Option<u8>,
            ) -> Result<Vec<u8>, EncodeError> {
                Err(EncodeError::EncodingFailed {
                    format,
                    message: "rejected".to_string(),
                })
            }
        }

        let img = opaque(2, 2);
        let result = run_trial(&Failing, &EncodeRequest::new(&img, OutputFormat::WebP));
        assert!(matches!(result, Err(EncodeError::EncodingFailed { .. })));
    }

    #[test]
    fn test_real_codec_trial() {
        let img = opaque(32, 32);
        let request = EncodeRequest::new(&img, OutputFormat::WebP).with_quality(Some(60));
        let trial = run_trial(&ImageCodec, &request).unwrap();

        assert_eq!(&trial.bytes()[0..4], b"RIFF");
        assert_eq!(trial.size(), trial.clone().into_bytes().len());
    }
}
