use std::fs;
use std::path::Path;
use std::slice::Chunks;

use anyhow::{ensure, Context, Result};
use rusttype::{point, Font, Scale};

use crate::signature::{GRID_H, GRID_W};

/// Rasterization height in pixels. Cell width follows from the font's
/// advance width at this scale.
pub const FONT_HEIGHT_PX: f32 = 16.0;

/// Candidate font files, tried in order. The first one present on disk is
/// the font the tables are generated from.
pub const FONT_PATHS: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSansMono.ttf",
    "/usr/share/fonts/TTF/DejaVuSansMono.ttf",
    "/usr/share/fonts/dejavu/DejaVuSansMono.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationMono-Regular.ttf",
    "/usr/share/fonts/liberation/LiberationMono-Regular.ttf",
    "/usr/share/fonts/truetype/ubuntu/UbuntuMono-R.ttf",
];

/// The candidate fonts actually present on this machine.
pub fn available_fonts() -> Vec<&'static str> {
    FONT_PATHS
        .iter()
        .copied()
        .filter(|path| Path::new(path).is_file())
        .collect()
}

/// A grayscale bitmap, one byte per pixel, row-major.
pub struct GrayBitmap {
    bytes: Vec<u8>,
    width: usize,
}

impl GrayBitmap {
    pub fn new(w: usize, h: usize) -> GrayBitmap {
        GrayBitmap {
            bytes: vec![0; w * h],
            width: w,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.bytes.len() / self.width
    }

    pub fn get(&self, x: usize, y: usize) -> u8 {
        self.bytes[y * self.width + x]
    }

    /// Writes clip silently outside the bitmap.
    pub fn set(&mut self, x: usize, y: usize, val: u8) {
        if x >= self.width {
            return;
        }
        if let Some(p) = self.bytes.get_mut(y * self.width + x) {
            *p = val;
        }
    }

    pub fn lines(&self) -> Chunks<u8> {
        self.bytes.chunks(self.width)
    }

    pub fn raw(&self) -> &[u8] {
        &self.bytes
    }
}

/// A font fixed to one character cell size, ready to rasterize single glyphs.
pub struct CellFont {
    name: String,
    font: Font<'static>,
    ascent: f32,
    cell_w: usize,
    cell_h: usize,
}

impl CellFont {
    pub fn load(path: &str) -> Result<CellFont> {
        let data = fs::read(path).with_context(|| format!("reading font file {}", path))?;
        let font =
            Font::try_from_vec(data).with_context(|| format!("parsing font file {}", path))?;

        let scale = Scale::uniform(FONT_HEIGHT_PX);
        let v_metrics = font.v_metrics(scale);
        let cell_h = (v_metrics.ascent - v_metrics.descent).ceil() as usize;
        let cell_w = font
            .glyph('M')
            .scaled(scale)
            .h_metrics()
            .advance_width
            .ceil() as usize;
        ensure!(
            cell_w >= GRID_W && cell_h >= GRID_H,
            "font cell {}x{} is smaller than the {}x{} grid",
            cell_w,
            cell_h,
            GRID_W,
            GRID_H
        );

        let name = Path::new(path)
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or(path)
            .to_owned();
        Ok(CellFont {
            name,
            font,
            ascent: v_metrics.ascent,
            cell_w,
            cell_h,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn cell_w(&self) -> usize {
        self.cell_w
    }

    pub fn cell_h(&self) -> usize {
        self.cell_h
    }

    /// Rasterizes one glyph into its character cell, positioned on the
    /// baseline and clipped to the cell. Glyphs without an outline (space)
    /// come back empty.
    pub fn render(&self, ch: char) -> GrayBitmap {
        let mut out = GrayBitmap::new(self.cell_w, self.cell_h);
        let glyph = self
            .font
            .glyph(ch)
            .scaled(Scale::uniform(FONT_HEIGHT_PX))
            .positioned(point(0.0, self.ascent));
        if let Some(bb) = glyph.pixel_bounding_box() {
            glyph.draw(|x, y, coverage| {
                let x = x as i32 + bb.min.x;
                let y = y as i32 + bb.min.y;
                if x >= 0 && y >= 0 {
                    out.set(x as usize, y as usize, (coverage * 255.0) as u8);
                }
            });
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bitmap_get_set() {
        let mut bitmap = GrayBitmap::new(3, 2);
        bitmap.set(2, 1, 7);
        assert_eq!(bitmap.get(2, 1), 7);
        assert_eq!(bitmap.get(0, 0), 0);
        assert_eq!(bitmap.width(), 3);
        assert_eq!(bitmap.height(), 2);
    }

    #[test]
    fn bitmap_set_clips() {
        let mut bitmap = GrayBitmap::new(3, 2);
        bitmap.set(3, 0, 9);
        bitmap.set(0, 2, 9);
        assert!(bitmap.raw().iter().all(|&b| b == 0));
    }

    #[test]
    fn bitmap_lines_are_rows() {
        let mut bitmap = GrayBitmap::new(2, 2);
        bitmap.set(0, 1, 5);
        let lines: Vec<&[u8]> = bitmap.lines().collect();
        assert_eq!(lines, vec![&[0u8, 0][..], &[5u8, 0][..]]);
    }

    #[test]
    fn available_fonts_is_a_subset_of_candidates() {
        for path in available_fonts() {
            assert!(FONT_PATHS.contains(&path));
        }
    }
}
