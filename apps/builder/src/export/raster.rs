use font8x8::{UnicodeFonts, BASIC_FONTS, LATIN_FONTS};
use image::{Rgb, RgbImage};

use super::layout::{DrawOp, PageLayout, TextFace};
use super::page::PageGeometry;

const WHITE: Rgb<u8> = Rgb([255, 255, 255]);

fn glyph(c: char) -> [u8; 8] {
    BASIC_FONTS
        .get(c)
        .or_else(|| LATIN_FONTS.get(c))
        .or_else(|| BASIC_FONTS.get('?'))
        .unwrap_or([0; 8])
}

/// Paints the laid-out page onto a white bitmap `geometry.scale` times the
/// CSS size.
pub fn rasterize(page: &PageLayout, geometry: &PageGeometry) -> RgbImage {
    let mut image = RgbImage::from_pixel(geometry.raster_width(), geometry.raster_height(), WHITE);
    let scale = geometry.scale;

    for op in &page.ops {
        match op {
            DrawOp::Rect {
                x,
                y,
                width,
                height,
                color,
            } => fill(
                &mut image,
                x * scale,
                y * scale,
                width * scale,
                height * scale,
                Rgb(*color),
            ),
            DrawOp::Text { x, y, text, face } => {
                draw_text(&mut image, x * scale, y * scale, text, face, scale)
            }
        }
    }
    image
}

fn fill(image: &mut RgbImage, x: u32, y: u32, width: u32, height: u32, color: Rgb<u8>) {
    let x_end = (x + width).min(image.width());
    let y_end = (y + height).min(image.height());
    for py in y..y_end {
        for px in x..x_end {
            image.put_pixel(px, py, color);
        }
    }
}

fn draw_text(image: &mut RgbImage, x: u32, y: u32, text: &str, face: &TextFace, scale: u32) {
    let cell = face.size.px() * scale;
    // Size of one glyph bit in device pixels.
    let dot = (cell / 8).max(1);
    let color = Rgb(face.color);

    for (i, c) in text.chars().enumerate() {
        let origin_x = x + i as u32 * cell;
        for (row, bits) in glyph(c).iter().enumerate() {
            let shear = if face.italic { (7 - row as u32) * dot / 3 } else { 0 };
            for col in 0..8u32 {
                if bits & (1u8 << col) == 0 {
                    continue;
                }
                let px = origin_x + col * dot + shear;
                let py = y + row as u32 * dot;
                fill(image, px, py, dot, dot, color);
                if face.bold {
                    fill(image, px + scale, py, dot, dot, color);
                }
            }
        }
    }
}
