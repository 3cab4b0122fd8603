use gtk::gdk;
use gtk::prelude::*;
use gtk4 as gtk;
use palette::Srgba;

pub struct ThemeColors {
    pub segment_stroke: Srgba<f64>,
    pub rim: Srgba<f64>,
    pub hub: Srgba<f64>,
    pub outer_text: Srgba<f64>,
    pub inner_text: Srgba<f64>,
    pub text_shadow: Srgba<f64>,
    pub tick: Srgba<f64>,
}

impl Default for ThemeColors {
    fn default() -> Self {
        Self {
            segment_stroke: Srgba::new(1.0, 1.0, 1.0, 1.0),
            rim: Srgba::new(0.612, 0.639, 0.686, 1.0),
            hub: Srgba::new(0.0, 0.0, 0.0, 1.0),
            outer_text: Srgba::new(1.0, 1.0, 1.0, 1.0),
            inner_text: Srgba::new(0.0, 0.0, 0.0, 1.0),
            text_shadow: Srgba::new(0.0, 0.0, 0.0, 0.5),
            tick: Srgba::new(1.0, 1.0, 1.0, 1.0),
        }
    }
}

impl ThemeColors {
    /// Only the rim follows the desktop theme; the wheel itself keeps its
    /// own palette.
    pub fn from_context(context: &gtk::StyleContext) -> Self {
        let defaults = Self::default();
        Self {
            rim: Self::lookup_color(context, "borders", defaults.rim, Some(1.0)),
            ..defaults
        }
    }

    fn lookup_color(
        context: &gtk::StyleContext,
        name: &str,
        fallback: Srgba<f64>,
        alpha_override: Option<f64>,
    ) -> Srgba<f64> {
        context
            .lookup_color(name)
            .map(|c| {
                let (r, g, b, a) = (
                    c.red() as f64,
                    c.green() as f64,
                    c.blue() as f64,
                    c.alpha() as f64,
                );
                Srgba::new(r, g, b, alpha_override.unwrap_or(a))
            })
            .unwrap_or(fallback)
    }
}

pub fn load_css(css_data: &str) {
    let provider = gtk::CssProvider::new();
    provider.load_from_data(css_data);

    if let Some(display) = gdk::Display::default() {
        gtk::style_context_add_provider_for_display(
            &display,
            &provider,
            gtk::STYLE_PROVIDER_PRIORITY_APPLICATION,
        );
    }
}
