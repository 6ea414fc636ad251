use anyhow::{bail, Context, Result};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use glyphmap::circle;
use glyphmap::emit;
use glyphmap::font::{self, CellFont};
use glyphmap::table::SignatureSet;

fn run() -> Result<()> {
    let fonts = font::available_fonts();
    if fonts.is_empty() {
        bail!(
            "no usable font found, searched: {}",
            font::FONT_PATHS.join(", ")
        );
    }

    let font = CellFont::load(fonts[0])
        .with_context(|| format!("could not load font \"{}\"", fonts[0]))?;
    info!(
        "using font \"{}\", cell {}x{}",
        font.name(),
        font.cell_w(),
        font.cell_h()
    );

    #[cfg(feature = "dump-sheet")]
    glyphmap::sheet::dump_sheet(&font)?;

    let set = SignatureSet::from_font(&font)?;
    let best = set.best_matches();

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    emit::write_tables(&mut out, font.name(), &set, &best).context("writing tables")?;
    circle::write_test_circle(&mut out, &best).context("writing test circle")?;
    Ok(())
}

fn main() {
    // stdout carries the generated source, diagnostics go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = run() {
        error!("{:#}", err);
        std::process::exit(1);
    }
}
