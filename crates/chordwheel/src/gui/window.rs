use detent::{Bounds, Point};
use gtk::prelude::*;
use gtk4 as gtk;

/// Layout box of `widget` in its own coordinates, or `None` before it has
/// been mapped and allocated.
pub fn layout_bounds(widget: &impl IsA<gtk::Widget>) -> Option<Bounds> {
    if !widget.is_mapped() {
        return None;
    }
    let bounds = Bounds::new(0.0, 0.0, widget.width() as f64, widget.height() as f64);
    bounds.is_laid_out().then_some(bounds)
}

/// Converts a position reported on `window`'s surface into `widget`
/// coordinates.
pub fn surface_to_widget(
    window: &gtk::ApplicationWindow,
    widget: &impl IsA<gtk::Widget>,
    (x, y): (f64, f64),
) -> Option<Point> {
    let (sx, sy) = window.surface_transform();
    window
        .translate_coordinates(widget, x - sx, y - sy)
        .map(|(x, y)| Point::new(x, y))
}
