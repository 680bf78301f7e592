use image::codecs::jpeg::JpegEncoder;
use image::{Rgb, RgbImage, RgbaImage};

use super::ExportError;

/// Chart images are written at maximum JPEG quality.
pub const JPEG_QUALITY: u8 = 100;

/// Composite the image over an opaque white background and drop alpha.
pub fn flatten_on_white(img: &RgbaImage) -> RgbImage {
    RgbImage::from_fn(img.width(), img.height(), |x, y| {
        let [r, g, b, a] = img.get_pixel(x, y).0;
        let a = u32::from(a);
        let blend = |c: u8| ((u32::from(c) * a + 255 * (255 - a) + 127) / 255) as u8;
        Rgb([blend(r), blend(g), blend(b)])
    })
}

/// Flatten and encode a captured chart as JPEG bytes.
pub fn chart_jpeg(img: &RgbaImage) -> Result<Vec<u8>, ExportError> {
    let flat = flatten_on_white(img);
    let mut bytes = Vec::new();
    JpegEncoder::new_with_quality(&mut bytes, JPEG_QUALITY).encode_image(&flat)?;
    Ok(bytes)
}
