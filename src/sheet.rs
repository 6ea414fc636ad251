use anyhow::{Context, Result};
use tracing::info;

use crate::font::CellFont;
use crate::table::{FIRST_GLYPH, GLYPH_CODES};

pub const SHEET_PATH: &str = "glyph-sheet.png";

/// Saves every rendered glyph side by side as one grayscale strip, for
/// eyeballing the rasterization the tables were generated from.
pub fn dump_sheet(font: &CellFont) -> Result<()> {
    let w = font.cell_w();
    let h = font.cell_h();
    let glyphs = GLYPH_CODES - FIRST_GLYPH;

    let mut strip = vec![0u8; w * glyphs * h];
    for (slot, code) in (FIRST_GLYPH..GLYPH_CODES).enumerate() {
        let bitmap = font.render(code as u8 as char);
        for (y, line) in bitmap.lines().enumerate() {
            let start = y * w * glyphs + slot * w;
            strip[start..start + w].copy_from_slice(line);
        }
    }

    image::save_buffer(
        SHEET_PATH,
        &strip,
        (w * glyphs) as u32,
        h as u32,
        image::ColorType::L8,
    )
    .with_context(|| format!("writing {}", SHEET_PATH))?;
    info!("wrote {} ({} glyphs at {}x{})", SHEET_PATH, glyphs, w, h);
    Ok(())
}
