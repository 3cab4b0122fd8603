//! Procedural wheel geometry: the fixed two-ring base, its labels, and the
//! rotating cover with its cut-out windows. Everything here is derived from
//! `(segments, angle)` and recomputed on every frame.

use crate::angle::{self, Point};
use crate::detent::{DETENT_COUNT, DETENT_STEP, Detent};
use crate::segment::Segments;
use palette::Srgb;

pub const COVER_FILL: Srgb<u8> = Srgb::new(0x22, 0x22, 0x22);
pub const COVER_OPACITY: f64 = 0.85;

/// What a cover slot lets through, indexed by the slot's unrotated detent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reveal {
    Hidden,
    Full,
    /// Outer ring visible, inner ring patched over.
    OuterOnly,
}

/// Windows at 10, 11 and 0 open together; 4 stands apart and shows only the
/// outer ring.
pub const COVER_LAYOUT: [Reveal; DETENT_COUNT] = [
    Reveal::Full,
    Reveal::Hidden,
    Reveal::Hidden,
    Reveal::Hidden,
    Reveal::OuterOnly,
    Reveal::Hidden,
    Reveal::Hidden,
    Reveal::Hidden,
    Reveal::Hidden,
    Reveal::Hidden,
    Reveal::Full,
    Reveal::Full,
];

/// Radii and font sizes, all proportional to the outer radius.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dimensions {
    pub outer: f64,
    pub inner: f64,
    pub hub: f64,
    pub outer_label: f64,
    pub inner_label: f64,
    pub outer_font: f64,
    pub inner_font: f64,
}

impl Dimensions {
    pub fn from_radius(outer: f64) -> Self {
        Self {
            outer,
            inner: outer * 0.6,
            hub: outer * 0.25,
            outer_label: outer * 0.8,
            inner_label: outer * 0.4,
            outer_font: outer * 0.14,
            inner_font: outer * 0.10,
        }
    }
}

/// Annular sector; `inner_radius == 0` is a plain pie slice.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Wedge {
    pub start: f64,
    pub sweep: f64,
    pub inner_radius: f64,
    pub outer_radius: f64,
    pub fill: Srgb<u8>,
    pub opacity: f64,
}

impl Wedge {
    fn slot(index: usize, inner_radius: f64, outer_radius: f64, fill: Srgb<u8>) -> Self {
        Self {
            start: index as f64 * DETENT_STEP,
            sweep: DETENT_STEP,
            inner_radius,
            outer_radius,
            fill,
            opacity: 1.0,
        }
    }

    pub fn end(&self) -> f64 {
        self.start + self.sweep
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Band {
    Outer,
    Inner,
}

/// Upright text anchored at its center.
#[derive(Debug, Clone, PartialEq)]
pub struct Caption {
    pub text: String,
    pub at: Point,
    pub band: Band,
    pub font_size: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub center: Point,
    pub radius: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tick {
    pub from: Point,
    pub to: Point,
}

/// Shapes in unrotated coordinates; renderers rotate the whole layer by
/// `rotation` degrees about the wheel center.
#[derive(Debug, Clone, PartialEq)]
pub struct CoverLayer {
    pub rotation: f64,
    pub wedges: Vec<Wedge>,
    pub ticks: Vec<Tick>,
}

impl CoverLayer {
    pub fn reveal(&self, slot: Detent) -> Reveal {
        reveal_at(self.rotation, slot)
    }

    pub fn visible(&self) -> impl Iterator<Item = (Detent, Reveal)> {
        visible_at(self.rotation)
    }
}

/// What a cover rotated by `rotation` shows over base slot `slot`, taking the
/// nearest detent.
pub fn reveal_at(rotation: f64, slot: Detent) -> Reveal {
    let shift = Detent::nearest(rotation).index();
    COVER_LAYOUT[(slot.index() + DETENT_COUNT - shift) % DETENT_COUNT]
}

pub fn visible_at(rotation: f64) -> impl Iterator<Item = (Detent, Reveal)> {
    (0..DETENT_COUNT)
        .map(Detent::new)
        .map(move |d| (d, reveal_at(rotation, d)))
        .filter(|(_, r)| *r != Reveal::Hidden)
}

#[derive(Debug, Clone, PartialEq)]
pub struct WheelGeometry {
    pub center: Point,
    pub outer_ring: Vec<Wedge>,
    pub inner_ring: Vec<Wedge>,
    pub hub: Circle,
    pub captions: Vec<Caption>,
    pub cover: CoverLayer,
}

pub fn generate(
    segments: &Segments,
    angle_degrees: f64,
    center: Point,
    dims: &Dimensions,
) -> WheelGeometry {
    let outer_ring = segments
        .iter()
        .map(|s| Wedge::slot(s.index, dims.inner, dims.outer, s.color))
        .collect();
    let inner_ring = segments
        .iter()
        .map(|s| Wedge::slot(s.index, 0.0, dims.inner, s.inner_color()))
        .collect();

    let captions = segments
        .iter()
        .flat_map(|s| {
            let mid = s.index as f64 * DETENT_STEP + DETENT_STEP / 2.0;
            [
                Caption {
                    text: s.outer_label.to_string(),
                    at: angle::polar(center, dims.outer_label, mid),
                    band: Band::Outer,
                    font_size: dims.outer_font,
                },
                Caption {
                    text: s.inner_label.to_string(),
                    at: angle::polar(center, dims.inner_label, mid),
                    band: Band::Inner,
                    font_size: dims.inner_font,
                },
            ]
        })
        .collect();

    WheelGeometry {
        center,
        outer_ring,
        inner_ring,
        hub: Circle {
            center,
            radius: dims.hub,
        },
        captions,
        cover: cover(angle_degrees, center, dims),
    }
}

fn cover(rotation: f64, center: Point, dims: &Dimensions) -> CoverLayer {
    let wedges = COVER_LAYOUT
        .iter()
        .enumerate()
        .filter_map(|(i, reveal)| {
            let outer = match reveal {
                Reveal::Full => return None,
                Reveal::Hidden => dims.outer,
                Reveal::OuterOnly => dims.inner,
            };
            Some(Wedge {
                opacity: COVER_OPACITY,
                ..Wedge::slot(i, 0.0, outer, COVER_FILL)
            })
        })
        .collect();

    let ticks = (0..DETENT_COUNT)
        .map(|i| {
            let deg = i as f64 * DETENT_STEP;
            Tick {
                from: angle::polar(center, dims.outer, deg),
                to: angle::polar(center, dims.inner, deg),
            }
        })
        .collect();

    CoverLayer {
        rotation,
        wedges,
        ticks,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wheel(angle: f64) -> WheelGeometry {
        generate(
            &Segments::circle_of_fifths(),
            angle,
            Point::new(100.0, 100.0),
            &Dimensions::from_radius(100.0),
        )
    }

    fn assert_tiles_circle(ring: &[Wedge]) {
        assert_eq!(ring.len(), 12);
        let mut spans: Vec<_> = ring.iter().map(|w| (w.start, w.end())).collect();
        spans.sort_by(|a, b| a.0.total_cmp(&b.0));
        assert_eq!(spans[0].0, 0.0);
        for pair in spans.windows(2) {
            assert_eq!(pair[0].1, pair[1].0, "gap or overlap at {}", pair[0].1);
        }
        assert_eq!(spans[11].1, 360.0);
    }

    #[test]
    fn test_rings_tile_the_circle_at_any_rotation() {
        for angle in [0.0, 47.0, -133.5, 720.0] {
            let g = wheel(angle);
            assert_tiles_circle(&g.outer_ring);
            assert_tiles_circle(&g.inner_ring);
        }
    }

    #[test]
    fn test_ring_bands_and_tints() {
        let g = wheel(0.0);
        let outer = g.outer_ring[0];
        let inner = g.inner_ring[0];
        assert_eq!((outer.inner_radius, outer.outer_radius), (60.0, 100.0));
        assert_eq!((inner.inner_radius, inner.outer_radius), (0.0, 60.0));
        assert_eq!(outer.fill, Srgb::new(0xB0, 0x50, 0x50));
        assert_eq!(inner.fill, Srgb::new(207, 150, 150));
        assert_eq!(g.hub.radius, 25.0);
    }

    #[test]
    fn test_captions_sit_mid_segment_and_ignore_rotation() {
        let still = wheel(0.0);
        let spun = wheel(123.0);
        assert_eq!(still.captions, spun.captions);
        assert_eq!(still.captions.len(), 24);

        // segment 0 label at 15 degrees past 12 o'clock, radius 80
        let c = &still.captions[0];
        assert_eq!(c.text, "C");
        assert_eq!(c.band, Band::Outer);
        let expected = angle::polar(Point::new(100.0, 100.0), 80.0, 15.0);
        assert!((c.at.x - expected.x).abs() < 1e-9 && (c.at.y - expected.y).abs() < 1e-9);
        assert_eq!(still.captions[1].text, "Am");
        assert_eq!(still.captions[1].band, Band::Inner);
    }

    #[test]
    fn test_cover_shape_is_fixed() {
        let g = wheel(0.0);
        let full: Vec<_> = g
            .cover
            .wedges
            .iter()
            .filter(|w| w.outer_radius == 100.0)
            .map(|w| (w.start / DETENT_STEP) as usize)
            .collect();
        assert_eq!(full, vec![1, 2, 3, 5, 6, 7, 8, 9]);

        let patch: Vec<_> = g
            .cover
            .wedges
            .iter()
            .filter(|w| w.outer_radius == 60.0)
            .collect();
        assert_eq!(patch.len(), 1);
        assert_eq!(patch[0].start, 120.0);
        assert!(g.cover.wedges.iter().all(|w| w.opacity == COVER_OPACITY));

        assert_eq!(wheel(210.0).cover.wedges, g.cover.wedges);
        assert_eq!(wheel(210.0).cover.rotation, 210.0);
    }

    #[test]
    fn test_ticks_span_outer_band() {
        let g = wheel(0.0);
        assert_eq!(g.cover.ticks.len(), 12);
        let t = g.cover.ticks[3];
        assert!((t.from.x - 200.0).abs() < 1e-9);
        assert!((t.to.x - 160.0).abs() < 1e-9);
    }

    #[test]
    fn test_visible_windows_follow_rotation() {
        let at_rest: Vec<_> = wheel(0.0).cover.visible().collect();
        assert_eq!(
            at_rest,
            vec![
                (Detent::new(0), Reveal::Full),
                (Detent::new(4), Reveal::OuterOnly),
                (Detent::new(10), Reveal::Full),
                (Detent::new(11), Reveal::Full),
            ]
        );

        let g = wheel(90.0);
        assert_eq!(g.cover.reveal(Detent::new(3)), Reveal::Full);
        assert_eq!(g.cover.reveal(Detent::new(1)), Reveal::Full);
        assert_eq!(g.cover.reveal(Detent::new(2)), Reveal::Full);
        assert_eq!(g.cover.reveal(Detent::new(7)), Reveal::OuterOnly);
        assert_eq!(g.cover.reveal(Detent::new(0)), Reveal::Hidden);
    }
}
