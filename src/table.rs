use anyhow::{ensure, Result};
use tracing::debug;

use crate::font::CellFont;
use crate::signature::{self, CELLS, FULL_RANGE};

/// Length of the glyph-indexed table. Codes below FIRST_GLYPH are control
/// characters and keep an all-dark signature.
pub const GLYPH_CODES: usize = 0x7f;
pub const FIRST_GLYPH: usize = 0x20;

/// The packed per-cell intensity signature of every glyph code.
pub struct SignatureSet {
    signatures: [u16; GLYPH_CODES],
}

impl SignatureSet {
    /// Renders and quantizes every printable glyph of the font.
    pub fn from_font(font: &CellFont) -> Result<SignatureSet> {
        let counts = signature::cell_pixel_counts(font.cell_w(), font.cell_h());
        let mut totals = [[0u32; CELLS]; GLYPH_CODES];
        for code in FIRST_GLYPH..GLYPH_CODES {
            let bitmap = font.render(code as u8 as char);
            totals[code] = signature::accumulate(&bitmap);
        }

        let peak = signature::peak_intensity(&totals[FIRST_GLYPH..], &counts);
        ensure!(
            peak > 0,
            "font \"{}\" rendered every glyph blank",
            font.name()
        );
        debug!("peak cell intensity {}", peak);

        let mut signatures = [0u16; GLYPH_CODES];
        for code in FIRST_GLYPH..GLYPH_CODES {
            signatures[code] = signature::pack(&totals[code], &counts, peak);
        }
        Ok(SignatureSet { signatures })
    }

    pub fn from_signatures(signatures: [u16; GLYPH_CODES]) -> SignatureSet {
        SignatureSet { signatures }
    }

    pub fn signatures(&self) -> &[u16; GLYPH_CODES] {
        &self.signatures
    }

    /// For every possible packed signature, the glyph code whose signature is
    /// closest. Linear scan over all candidates; on equal distance the first
    /// scanned (lowest) code stays, an exact match ends the scan.
    pub fn best_matches(&self) -> [u8; FULL_RANGE] {
        let mut best = [0u8; FULL_RANGE];
        for code in 0..FULL_RANGE {
            let mut min_dist = u32::MAX;
            let mut chosen = 0u8;
            for glyph in FIRST_GLYPH..GLYPH_CODES {
                let d = signature::distance(code as u16, self.signatures[glyph]);
                if d < min_dist {
                    chosen = glyph as u8;
                    min_dist = d;
                    if d == 0 {
                        break;
                    }
                }
            }
            best[code] = chosen;
        }
        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signature::distance;

    fn spread_signatures() -> [u16; GLYPH_CODES] {
        let mut signatures = [0u16; GLYPH_CODES];
        for code in FIRST_GLYPH..GLYPH_CODES {
            signatures[code] = (code * 37 % FULL_RANGE) as u16;
        }
        signatures
    }

    #[test]
    fn best_match_is_never_beaten() {
        let set = SignatureSet::from_signatures(spread_signatures());
        let best = set.best_matches();
        for code in 0..FULL_RANGE {
            let chosen = distance(code as u16, set.signatures()[best[code] as usize]);
            for glyph in FIRST_GLYPH..GLYPH_CODES {
                assert!(
                    chosen <= distance(code as u16, set.signatures()[glyph]),
                    "code {:#x}: glyph {} beats chosen {}",
                    code,
                    glyph,
                    best[code]
                );
            }
        }
    }

    #[test]
    fn ties_go_to_the_lowest_code() {
        // every candidate is equidistant from every target
        let set = SignatureSet::from_signatures([0u16; GLYPH_CODES]);
        let best = set.best_matches();
        assert!(best.iter().all(|&glyph| glyph == FIRST_GLYPH as u8));
    }

    #[test]
    fn exact_match_wins() {
        let mut signatures = [0u16; GLYPH_CODES];
        signatures[0x30] = 0xfff;
        let set = SignatureSet::from_signatures(signatures);
        let best = set.best_matches();
        assert_eq!(best[0xfff], 0x30);
        assert_eq!(best[0x000], FIRST_GLYPH as u8);
    }

    #[test]
    fn chosen_glyphs_are_printable() {
        let set = SignatureSet::from_signatures(spread_signatures());
        for glyph in set.best_matches() {
            assert!((FIRST_GLYPH..GLYPH_CODES).contains(&(glyph as usize)));
        }
    }
}
