use dpad::config::ColorDefaults;
use gtk::gdk;
use gtk::prelude::*;
use gtk4 as gtk;
use palette::Srgba;

/// Literal colors taken from the current gtk theme, used for any color the
/// settings leave unset.
pub fn color_defaults(context: &gtk::StyleContext) -> ColorDefaults {
    let fallback = ColorDefaults::default();
    ColorDefaults {
        normal: lookup_color(context, "theme_fg_color", fallback.normal, Some(0.54)),
        pressed: lookup_color(context, "accent_bg_color", fallback.pressed, None),
        center_circle_normal: lookup_color(
            context,
            "theme_selected_bg_color",
            fallback.center_circle_normal,
            None,
        ),
        center_circle_pressed: lookup_color(
            context,
            "theme_selected_bg_color",
            fallback.center_circle_pressed,
            Some(0.7),
        ),
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

pub fn load_css() {
    let provider = gtk::CssProvider::new();
    let css_data = "
.dpad-drawing-area {
    background: none;
    background-color: transparent;
}
.dpad-status {
    font-family: monospace;
}
";
    provider.load_from_data(css_data);

    if let Some(display) = gdk::Display::default() {
        gtk::style_context_add_provider_for_display(
            &display,
            &provider,
            gtk::STYLE_PROVIDER_PRIORITY_APPLICATION,
        );
    }
}
