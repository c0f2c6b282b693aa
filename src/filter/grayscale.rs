//! Colour to grayscale conversion.

use crate::image::{PixelBuffer, PixelFormat, PixelView};
use crate::util::BlobMatchResult;

/// BT.709 luma weights scaled by 10 000.
const WEIGHTS: [u32; 3] = [2125, 7154, 721];

/// Converts an RGB or RGBA view into a new `Gray8` buffer.
///
/// Uses integer BT.709 weights `0.2125 R + 0.7154 G + 0.0721 B`, truncated.
pub fn to_grayscale(image: PixelView<'_>) -> BlobMatchResult<PixelBuffer> {
    image.ensure_format(&[PixelFormat::Rgb24, PixelFormat::Rgba32], "grayscale conversion")?;
    let bpp = image.format().bytes_per_pixel();
    let mut data = Vec::with_capacity(image.width() * image.height());
    for y in 0..image.height() {
        data.extend(image.row_at(y).chunks_exact(bpp).map(|px| {
            let luma = WEIGHTS[0] * px[0] as u32 + WEIGHTS[1] * px[1] as u32 + WEIGHTS[2] * px[2] as u32;
            (luma / 10_000) as u8
        }));
    }
    PixelBuffer::new(data, image.width(), image.height(), PixelFormat::Gray8)
}

#[cfg(test)]
mod tests {
    use super::to_grayscale;
    use crate::image::{PixelFormat, PixelView};

    #[test]
    fn white_stays_white_and_weights_apply() {
        let data = [255u8, 255, 255, 100, 0, 0, 0, 100, 0];
        let view = PixelView::from_slice(&data, 3, 1, PixelFormat::Rgb24).unwrap();
        let gray = to_grayscale(view).unwrap();
        assert_eq!(gray.format(), PixelFormat::Gray8);
        assert_eq!(gray.data(), &[255, 21, 71]);
    }

    #[test]
    fn gray_input_is_rejected() {
        let data = [1u8];
        let view = PixelView::from_slice(&data, 1, 1, PixelFormat::Gray8).unwrap();
        assert!(to_grayscale(view).is_err());
    }
}
