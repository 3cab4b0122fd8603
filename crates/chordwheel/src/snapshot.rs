use crate::gui::theme::ThemeColors;
use crate::gui::wheel::{self, WheelState};
use anyhow::Context as _;
use detent::Bounds;
use std::path::Path;

/// Renders the wheel at its resting rotation into a square PNG.
pub fn write_png(state: &WheelState, size: i32, path: &Path) -> anyhow::Result<()> {
    let surface = cairo::ImageSurface::create(cairo::Format::ARgb32, size, size)
        .context("creating image surface")?;
    let cr = cairo::Context::new(&surface)?;

    let geometry = state.geometry(Bounds::new(0.0, 0.0, size as f64, size as f64));
    wheel::draw(&cr, &geometry, &ThemeColors::default())?;
    drop(cr);

    let mut file = fs_err::File::create(path)?;
    surface
        .write_to_png(&mut file)
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}
