use super::{RIM_STROKE, SEGMENT_STROKE};
use crate::gui::theme::ThemeColors;
use cairo::Context;
use detent::Point;
use detent::angle::to_screen_radians;
use detent::geometry::{Band, Caption, CoverLayer, Wedge, WheelGeometry};
use palette::Srgba;
use std::f64::consts::PI;

fn set_source(cr: &Context, color: Srgba<f64>) {
    let (r, g, b, a) = color.into_components();
    cr.set_source_rgba(r, g, b, a);
}

fn wedge_path(cr: &Context, center: Point, wedge: &Wedge) {
    let (a0, a1) = (
        to_screen_radians(wedge.start),
        to_screen_radians(wedge.end()),
    );
    cr.new_path();
    if wedge.inner_radius <= 0.0 {
        cr.move_to(center.x, center.y);
        cr.arc(center.x, center.y, wedge.outer_radius, a0, a1);
    } else {
        cr.arc(center.x, center.y, wedge.outer_radius, a0, a1);
        cr.arc_negative(center.x, center.y, wedge.inner_radius, a1, a0);
    }
    cr.close_path();
}

fn fill_wedge(cr: &Context, center: Point, wedge: &Wedge) -> Result<(), cairo::Error> {
    let fill = wedge.fill.into_format::<f64>();
    wedge_path(cr, center, wedge);
    cr.set_source_rgba(fill.red, fill.green, fill.blue, wedge.opacity);
    cr.fill()
}

fn draw_ring(
    cr: &Context,
    center: Point,
    ring: &[Wedge],
    colors: &ThemeColors,
) -> Result<(), cairo::Error> {
    for wedge in ring {
        fill_wedge(cr, center, wedge)?;
        wedge_path(cr, center, wedge);
        set_source(cr, colors.segment_stroke);
        cr.set_line_width(SEGMENT_STROKE);
        cr.stroke()?;
    }
    Ok(())
}

fn draw_caption(cr: &Context, caption: &Caption, colors: &ThemeColors) -> Result<(), cairo::Error> {
    let (weight, color) = match caption.band {
        Band::Outer => (cairo::FontWeight::Bold, colors.outer_text),
        Band::Inner => (cairo::FontWeight::Normal, colors.inner_text),
    };
    cr.select_font_face("Sans", cairo::FontSlant::Normal, weight);
    cr.set_font_size(caption.font_size);

    let Ok(ext) = cr.text_extents(&caption.text) else {
        return Ok(());
    };
    let (x, y) = (
        caption.at.x - (ext.width() / 2.0 + ext.x_bearing()),
        caption.at.y - (ext.height() / 2.0 + ext.y_bearing()),
    );

    if caption.band == Band::Outer {
        set_source(cr, colors.text_shadow);
        cr.move_to(x + 1.0, y + 1.0);
        cr.show_text(&caption.text)?;
    }
    set_source(cr, color);
    cr.move_to(x, y);
    cr.show_text(&caption.text)
}

fn draw_cover(
    cr: &Context,
    center: Point,
    cover: &CoverLayer,
    colors: &ThemeColors,
) -> Result<(), cairo::Error> {
    cr.save()?;
    cr.translate(center.x, center.y);
    cr.rotate(cover.rotation.to_radians());
    cr.translate(-center.x, -center.y);

    for wedge in &cover.wedges {
        fill_wedge(cr, center, wedge)?;
    }

    set_source(cr, colors.tick);
    cr.set_line_width(SEGMENT_STROKE);
    for tick in &cover.ticks {
        cr.move_to(tick.from.x, tick.from.y);
        cr.line_to(tick.to.x, tick.to.y);
    }
    cr.stroke()?;

    cr.restore()
}

pub fn draw(cr: &Context, geometry: &WheelGeometry, colors: &ThemeColors) -> Result<(), cairo::Error> {
    let center = geometry.center;

    draw_ring(cr, center, &geometry.outer_ring, colors)?;
    draw_ring(cr, center, &geometry.inner_ring, colors)?;

    set_source(cr, colors.hub);
    cr.arc(center.x, center.y, geometry.hub.radius, 0.0, 2.0 * PI);
    cr.fill_preserve()?;
    set_source(cr, colors.segment_stroke);
    cr.set_line_width(SEGMENT_STROKE);
    cr.stroke()?;

    for caption in &geometry.captions {
        draw_caption(cr, caption, colors)?;
    }

    draw_cover(cr, center, &geometry.cover, colors)?;

    let rim = geometry
        .outer_ring
        .first()
        .map(|w| w.outer_radius)
        .unwrap_or_default();
    cr.new_path();
    set_source(cr, colors.rim);
    cr.set_line_width(RIM_STROKE);
    cr.arc(center.x, center.y, rim, 0.0, 2.0 * PI);
    cr.stroke()
}
