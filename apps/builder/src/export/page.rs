/// Physical page the preview is laid out on before rasterization.
///
/// Layout works in CSS pixels at 96 dpi; the raster is `scale` times larger
/// and the PDF page is sized in points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    pub width_px: u32,
    pub height_px: u32,
    /// Inner padding on every side, in CSS px.
    pub padding_px: u32,
    pub scale: u32,
    pub width_pt: f32,
    pub height_pt: f32,
}

/// A4 (210mm × 297mm): 794 × 1123 CSS px, 595.28 × 841.89 pt, rasterized at 2×.
pub const A4: PageGeometry = PageGeometry {
    width_px: 794,
    height_px: 1123,
    padding_px: 32,
    scale: 2,
    width_pt: 595.28,
    height_pt: 841.89,
};

impl PageGeometry {
    pub fn content_left(&self) -> u32 {
        self.padding_px
    }

    pub fn content_width(&self) -> u32 {
        self.width_px.saturating_sub(2 * self.padding_px)
    }

    /// Lowest y a line may reach before it is clipped.
    pub fn content_bottom(&self) -> u32 {
        self.height_px.saturating_sub(self.padding_px)
    }

    pub fn raster_width(&self) -> u32 {
        self.width_px * self.scale
    }

    pub fn raster_height(&self) -> u32 {
        self.height_px * self.scale
    }
}

impl Default for PageGeometry {
    fn default() -> Self {
        A4
    }
}
