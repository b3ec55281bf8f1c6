//! End-to-end compression: decode, plan, encode, assemble.

use crate::config::CompressionTarget;
use crate::decode::decode_source;
use crate::encode::{encode_within_budget, prepare_raster, JpegEncoder, RasterEncoder};
use crate::error::CompressError;
use crate::handle::HandleRegistry;
use crate::plan::plan_dimensions;
use crate::result::{assemble, CompressionResult};
use crate::source::SourceImage;

/// Compress one image with the JPEG backend, registering its display handle
/// in [`HandleRegistry::global`].
pub fn compress(
    source: &SourceImage,
    target: &CompressionTarget,
) -> Result<CompressionResult, CompressError> {
    target.validate()?;
    run(source, target, &JpegEncoder, HandleRegistry::global())
}

/// Compress one image with an explicit encoder and handle registry.
pub fn compress_with<E: RasterEncoder + ?Sized>(
    source: &SourceImage,
    target: &CompressionTarget,
    encoder: &E,
    registry: &HandleRegistry,
) -> Result<CompressionResult, CompressError> {
    target.validate()?;
    run(source, target, encoder, registry)
}

/// Compress every source independently.
///
/// Returns one outcome per input, in submission order. A failing image never
/// affects its siblings. With the `parallel` feature the images are spread
/// over the rayon pool; ordering is preserved either way.
pub fn compress_batch(
    sources: &[SourceImage],
    target: &CompressionTarget,
) -> Vec<Result<CompressionResult, CompressError>> {
    compress_batch_with(sources, target, &JpegEncoder, HandleRegistry::global())
}

/// [`compress_batch`] with an explicit encoder and handle registry.
pub fn compress_batch_with<E: RasterEncoder + Sync + ?Sized>(
    sources: &[SourceImage],
    target: &CompressionTarget,
    encoder: &E,
    registry: &HandleRegistry,
) -> Vec<Result<CompressionResult, CompressError>> {
    if let Err(e) = target.validate() {
        log::warn!("rejecting batch of {}: {}", sources.len(), e);
        return sources
            .iter()
            .map(|_| Err(CompressError::InvalidTarget(invalid_reason(&e))))
            .collect();
    }

    #[cfg(feature = "parallel")]
    let outcomes = {
        use rayon::prelude::*;
        sources
            .par_iter()
            .map(|source| run(source, target, encoder, registry))
            .collect::<Vec<_>>()
    };

    #[cfg(not(feature = "parallel"))]
    let outcomes = sources
        .iter()
        .map(|source| run(source, target, encoder, registry))
        .collect::<Vec<_>>();

    let failed = outcomes.iter().filter(|o| o.is_err()).count();
    log::info!(
        "batch finished: {} succeeded, {} failed",
        outcomes.len() - failed,
        failed
    );

    outcomes
}

fn invalid_reason(err: &CompressError) -> String {
    match err {
        CompressError::InvalidTarget(reason) => reason.clone(),
        other => other.to_string(),
    }
}

/// One pipeline run against an already validated target.
fn run<E: RasterEncoder + ?Sized>(
    source: &SourceImage,
    target: &CompressionTarget,
    encoder: &E,
    registry: &HandleRegistry,
) -> Result<CompressionResult, CompressError> {
    let raster = decode_source(source)
        .inspect_err(|e| log::warn!("decode failed for {} input: {}", source.mime_type(), e))?;

    let planned = plan_dimensions(raster.width(), raster.height(), target.max_dimension_px)?;
    log::debug!(
        "planned {}x{} -> {}x{}",
        raster.width(),
        raster.height(),
        planned.width,
        planned.height
    );

    let prepared = prepare_raster(&raster, planned);
    drop(raster);

    let candidate = encode_within_budget(encoder, &prepared, target)?;

    let result = assemble(
        candidate,
        planned,
        source.original_size(),
        target.max_output_bytes,
        target.format,
        registry,
    )?;

    log::info!(
        "compressed {} bytes -> {} bytes ({}x{}, ratio {}, {} pass(es))",
        source.original_size(),
        result.byte_size,
        result.width,
        result.height,
        result.compression_ratio_label(),
        result.passes
    );

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::DecodeError;
    use crate::test_support::{
        encode_fixture, gradient_rgb, noisy_rgb, translucent_rgba, ScriptedEncoder,
    };
    use image::{ImageFormat, Rgb};

    fn png_source(width: u32, height: u32) -> SourceImage {
        SourceImage::from_bytes(
            encode_fixture(&gradient_rgb(width, height), ImageFormat::Png),
            "image/png",
        )
    }

    #[test]
    fn test_compress_large_image_is_downscaled() {
        let registry = HandleRegistry::new();
        let source = png_source(400, 300);
        let target = CompressionTarget::new().with_max_dimension(192);

        let result = compress_with(&source, &target, &JpegEncoder, &registry).unwrap();

        assert_eq!((result.width, result.height), (192, 144));
        assert_eq!(&result.encoded_bytes[0..2], &[0xFF, 0xD8]);
        assert_eq!(result.byte_size, result.encoded_bytes.len() as u64);
        assert_eq!(
            result.compression_ratio,
            source.original_size() as f64 / result.byte_size as f64
        );
        assert_eq!(registry.live_count(), 1);
    }

    #[test]
    fn test_compress_small_image_single_pass() {
        let registry = HandleRegistry::new();
        let encoder = ScriptedEncoder::new(vec![Ok(1000)]);
        let source = png_source(50, 50);

        let result =
            compress_with(&source, &CompressionTarget::default(), &encoder, &registry).unwrap();

        assert_eq!((result.width, result.height), (50, 50));
        assert_eq!(result.passes, 1);
        assert_eq!(result.quality_used, 0.8);
        assert_eq!(encoder.calls().len(), 1);
    }

    #[test]
    fn test_compress_overshoot_returns_second_pass() {
        let registry = HandleRegistry::new();
        let mib = 1024 * 1024;
        let encoder = ScriptedEncoder::new(vec![
            Ok((mib as f64 * 1.6) as usize),
            Ok((mib as f64 * 1.1) as usize),
        ]);
        let source = png_source(64, 48);

        let result =
            compress_with(&source, &CompressionTarget::default(), &encoder, &registry).unwrap();

        assert_eq!(result.passes, 2);
        assert!((result.quality_used - 0.5).abs() < 1e-4);
        assert!(result.exceeds_budget);
        assert_eq!(encoder.calls().len(), 2);
    }

    #[test]
    fn test_compress_zero_byte_encode_is_degenerate() {
        let registry = HandleRegistry::new();
        let encoder = ScriptedEncoder::new(vec![Ok(0)]);

        let result = compress_with(
            &png_source(10, 10),
            &CompressionTarget::default(),
            &encoder,
            &registry,
        );

        assert!(matches!(result, Err(CompressError::DegenerateResult)));
        assert_eq!(registry.live_count(), 0);
    }

    #[test]
    fn test_compress_encoder_failure() {
        let registry = HandleRegistry::new();
        let encoder = ScriptedEncoder::new(vec![Err("codec unavailable")]);

        let result = compress_with(
            &png_source(10, 10),
            &CompressionTarget::default(),
            &encoder,
            &registry,
        );

        assert!(matches!(result, Err(CompressError::Encode(_))));
        assert_eq!(registry.live_count(), 0);
    }

    #[test]
    fn test_compress_corrupt_input() {
        let registry = HandleRegistry::new();
        let source = SourceImage::from_bytes(vec![0x00, 0x01, 0x02], "image/png");

        let result = compress_with(&source, &CompressionTarget::default(), &JpegEncoder, &registry);

        assert!(matches!(result, Err(CompressError::Decode(_))));
    }

    #[test]
    fn test_compress_empty_input() {
        let result = compress(
            &SourceImage::from_bytes(vec![], "image/jpeg"),
            &CompressionTarget::default(),
        );

        assert!(matches!(
            result,
            Err(CompressError::Decode(DecodeError::Empty))
        ));
    }

    #[test]
    fn test_compress_rejects_invalid_target() {
        let registry = HandleRegistry::new();
        let target = CompressionTarget::new().with_initial_quality(0.0);

        let result = compress_with(&png_source(10, 10), &target, &JpegEncoder, &registry);

        assert!(matches!(result, Err(CompressError::InvalidTarget(_))));
    }

    #[test]
    fn test_compress_transparent_png_on_white() {
        let registry = HandleRegistry::new();
        let source = SourceImage::from_bytes(
            encode_fixture(&translucent_rgba(32, 32), ImageFormat::Png),
            "image/png",
        );
        let target = CompressionTarget::new().with_initial_quality(1.0);

        let result = compress_with(&source, &target, &JpegEncoder, &registry).unwrap();

        let decoded = image::load_from_memory(&result.encoded_bytes).unwrap().to_rgb8();
        let Rgb([r, g, b]) = *decoded.get_pixel(28, 16);
        // Transparent half comes out (near) white
        assert!(r > 240 && g > 240 && b > 240, "got {:?}", (r, g, b));
    }

    #[test]
    fn test_compress_is_repeatable() {
        let registry = HandleRegistry::new();
        let source = SourceImage::from_bytes(
            encode_fixture(&noisy_rgb(80, 60), ImageFormat::Png),
            "image/png",
        );
        let target = CompressionTarget::new().with_max_output_bytes(3_000);

        let a = compress_with(&source, &target, &JpegEncoder, &registry).unwrap();
        let b = compress_with(&source, &target, &JpegEncoder, &registry).unwrap();

        assert_eq!(a.byte_size, b.byte_size);
        assert_eq!(a.quality_used, b.quality_used);
        assert_ne!(a.display_handle, b.display_handle);
    }

    #[test]
    fn test_batch_isolates_failures_and_keeps_order() {
        let registry = HandleRegistry::new();
        let sources = vec![
            png_source(40, 20),
            SourceImage::from_bytes(vec![], "image/png"),
            png_source(30, 60),
            SourceImage::from_bytes(b"not an image".to_vec(), "image/gif"),
        ];

        let outcomes =
            compress_batch_with(&sources, &CompressionTarget::default(), &JpegEncoder, &registry);

        assert_eq!(outcomes.len(), 4);
        let first = outcomes[0].as_ref().unwrap();
        assert_eq!((first.width, first.height), (40, 20));
        assert!(matches!(outcomes[1], Err(CompressError::Decode(DecodeError::Empty))));
        let third = outcomes[2].as_ref().unwrap();
        assert_eq!((third.width, third.height), (30, 60));
        assert!(matches!(outcomes[3], Err(CompressError::Decode(_))));
        assert_eq!(registry.live_count(), 2);
    }

    #[test]
    fn test_batch_invalid_target_fails_every_item() {
        let registry = HandleRegistry::new();
        let sources = vec![png_source(10, 10), png_source(20, 20)];
        let target = CompressionTarget::new().with_max_output_bytes(0);

        let outcomes = compress_batch_with(&sources, &target, &JpegEncoder, &registry);

        assert_eq!(outcomes.len(), 2);
        assert!(outcomes
            .iter()
            .all(|o| matches!(o, Err(CompressError::InvalidTarget(_)))));
        assert_eq!(registry.live_count(), 0);
    }

    #[test]
    fn test_release_after_batch() {
        let registry = HandleRegistry::new();
        let sources = vec![png_source(10, 10), png_source(12, 12)];
        let outcomes =
            compress_batch_with(&sources, &CompressionTarget::default(), &JpegEncoder, &registry);

        let handles: Vec<_> = outcomes
            .iter()
            .map(|o| o.as_ref().unwrap().display_handle)
            .collect();

        registry.release(&handles[0]);
        registry.release(&handles[0]);

        assert!(registry.is_live(&handles[1]));
        assert_eq!(registry.live_count(), 1);
    }
}
