use std::io::{self, Write};

use crate::signature::FULL_RANGE;
use crate::table::{SignatureSet, GLYPH_CODES};

/// Prints the two generated tables as Rust source: signature -> best glyph
/// code, then glyph code -> signature. Layout is fixed so regenerated output
/// diffs cleanly: 16 decimal values per line, then 8 hex values per line.
pub fn write_tables(
    out: &mut impl Write,
    font_name: &str,
    set: &SignatureSet,
    best: &[u8; FULL_RANGE],
) -> io::Result<()> {
    writeln!(out, "// Generated by glyphmap from font \"{}\".", font_name)?;
    writeln!(out)?;

    writeln!(out, "pub static CELLS_TO_ASCII: [u8; {}] = [", FULL_RANGE)?;
    for (i, &glyph) in best.iter().enumerate() {
        if i % 16 == 0 {
            write!(out, "    ")?;
        }
        write!(out, "{},", glyph)?;
        if i % 16 == 15 {
            writeln!(out)?;
        } else {
            write!(out, " ")?;
        }
    }
    writeln!(out, "];")?;
    writeln!(out)?;

    writeln!(out, "pub static ASCII_TO_CELLS: [u16; {}] = [", GLYPH_CODES)?;
    for (i, &bits) in set.signatures().iter().enumerate() {
        if i % 8 == 0 {
            write!(out, "    ")?;
        }
        write!(out, "0x{:03x},", bits)?;
        if i % 8 == 7 || i == GLYPH_CODES - 1 {
            writeln!(out)?;
        } else {
            write!(out, " ")?;
        }
    }
    writeln!(out, "];")?;
    Ok(())
}
