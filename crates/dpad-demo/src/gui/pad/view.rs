use cairo::{Context, FontSlant, FontWeight};
use dpad::config::IconSource;
use dpad::geometry::Point;
use dpad::render::IconSize;
use dpad::style::ResolvedStyle;
use dpad::DrawCommand;
use gdk_pixbuf::Pixbuf;
use gdk4::prelude::*;
use palette::Srgba;
use std::collections::HashMap;
use std::f64::consts::PI;

/// Decoded center icons, keyed by source. Failed loads are remembered too.
#[derive(Default)]
pub struct IconCache {
    icons: HashMap<IconSource, Option<Pixbuf>>,
}

impl IconCache {
    pub fn get(&mut self, source: &IconSource) -> Option<Pixbuf> {
        self.icons
            .entry(source.clone())
            .or_insert_with(|| match Pixbuf::from_file(source.as_str()) {
                Ok(pixbuf) => Some(pixbuf),
                Err(e) => {
                    log::warn!("Failed to load center icon '{}': {}", source, e);
                    None
                }
            })
            .clone()
    }

    pub fn clear(&mut self) {
        self.icons.clear();
    }
}

pub fn draw(
    cr: &Context,
    commands: &[DrawCommand],
    icons: &mut IconCache,
) -> Result<(), cairo::Error> {
    for command in commands {
        match command {
            DrawCommand::Wedge {
                center,
                radius,
                start_angle,
                sweep_angle,
                color,
            } => draw_wedge(cr, *center, *radius, *start_angle, *sweep_angle, *color)?,
            DrawCommand::Circle {
                center,
                radius,
                color,
            } => draw_circle(cr, *center, *radius, *color)?,
            DrawCommand::Icon {
                source,
                center,
                size,
                tint,
            } => {
                if let Some(pixbuf) = icons.get(source) {
                    draw_icon(cr, &pixbuf, *center, *size, *tint)?;
                }
            }
            DrawCommand::Text {
                text,
                center,
                size,
                color,
                style,
            } => draw_text(cr, text, *center, *size, *color, *style)?,
        }
    }
    Ok(())
}

fn set_color(cr: &Context, color: Srgba<f64>) {
    let (r, g, b, a) = color.into_components();
    cr.set_source_rgba(r, g, b, a);
}

fn draw_wedge(
    cr: &Context,
    center: Point,
    radius: f64,
    start_angle: f64,
    sweep_angle: f64,
    color: Srgba<f64>,
) -> Result<(), cairo::Error> {
    set_color(cr, color);
    cr.move_to(center.x, center.y);
    cr.arc(
        center.x,
        center.y,
        radius,
        start_angle.to_radians(),
        (start_angle + sweep_angle).to_radians(),
    );
    cr.close_path();
    cr.fill()
}

fn draw_circle(
    cr: &Context,
    center: Point,
    radius: f64,
    color: Srgba<f64>,
) -> Result<(), cairo::Error> {
    set_color(cr, color);
    cr.arc(center.x, center.y, radius, 0.0, 2.0 * PI);
    cr.fill()
}

fn draw_icon(
    cr: &Context,
    pixbuf: &Pixbuf,
    center: Point,
    size: IconSize,
    tint: Option<Srgba<f64>>,
) -> Result<(), cairo::Error> {
    let (pw, ph) = (pixbuf.width() as f64, pixbuf.height() as f64);
    if pw <= 0.0 || ph <= 0.0 {
        return Ok(());
    }
    let (w, h) = match size {
        IconSize::Intrinsic => (pw, ph),
        IconSize::Fixed(side) => (side, side),
    };

    cr.save()?;
    cr.translate(center.x - w / 2.0, center.y - h / 2.0);
    cr.scale(w / pw, h / ph);

    if let Some(tint) = tint {
        // keep the icon's alpha, replace its color
        cr.push_group();
        cr.set_source_pixbuf(pixbuf, 0.0, 0.0);
        cr.paint()?;
        cr.set_operator(cairo::Operator::In);
        set_color(cr, tint);
        cr.paint()?;
        cr.pop_group_to_source()?;
        cr.paint()?;
    } else {
        cr.set_source_pixbuf(pixbuf, 0.0, 0.0);
        cr.paint()?;
    }
    cr.restore()
}

fn draw_text(
    cr: &Context,
    text: &str,
    center: Point,
    size: f64,
    color: Srgba<f64>,
    style: ResolvedStyle,
) -> Result<(), cairo::Error> {
    let slant = if style.italic {
        FontSlant::Italic
    } else {
        FontSlant::Normal
    };
    let weight = if style.bold {
        FontWeight::Bold
    } else {
        FontWeight::Normal
    };

    set_color(cr, color);
    cr.select_font_face("Sans", slant, weight);
    cr.set_font_size(size);

    let ext = cr.text_extents(text)?;
    // center the ink box, not the advance box
    let x = center.x - ext.width() / 2.0 - ext.x_bearing();
    let y = center.y + ext.height() / 2.0 - (ext.y_bearing() + ext.height());
    cr.move_to(x, y);
    cr.show_text(text)?;

    if style.underline {
        let thickness = (size / 16.0).max(1.0);
        cr.set_line_width(thickness);
        cr.move_to(x, y + thickness * 2.0);
        cr.line_to(x + ext.x_advance(), y + thickness * 2.0);
        cr.stroke()?;
    }
    Ok(())
}
