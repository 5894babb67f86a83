use crate::config::{Config, RenderConfig};
use crate::fit::{AreaLabel, Fit, Rect};
use crate::measure::{MeasuredLabel, line_advance, measure_label};
use crate::series::{Band, BandShape, SeriesPoint};
use crate::theme::Theme;
use anyhow::Result;
use std::path::Path;

/// A band label together with the transform that places it, or a failed fit
/// when the band is too tight anywhere along its length.
#[derive(Debug, Clone)]
pub struct PlacedLabel {
    pub label: MeasuredLabel,
    pub fit: Fit,
}

/// Drawable chart area after the outer padding is taken off.
pub fn plot_rect(render: &RenderConfig) -> Rect {
    let width = (render.width - render.padding * 2.0).max(1.0);
    let height = (render.height - render.padding * 2.0).max(1.0);
    Rect {
        x: render.padding,
        y: render.padding,
        width,
        height,
    }
}

/// Measures every band's label and fits it into its band. The result is
/// index-aligned with `bands`.
pub fn place_labels(bands: &[Band], config: &Config) -> Vec<PlacedLabel> {
    let mut fitter = AreaLabel::from_area(BandShape);
    fitter.options = config.fit;
    bands
        .iter()
        .map(|band| {
            let label = measure_label(&band.label, &config.theme);
            let fit = fitter.fit(&band.points, &label.bounds);
            PlacedLabel { label, fit }
        })
        .collect()
}

pub fn render_svg(
    bands: &[Band],
    labels: &[PlacedLabel],
    theme: &Theme,
    render: &RenderConfig,
) -> String {
    let mut svg = String::new();
    let width = render.width.max(1.0);
    let height = render.height.max(1.0);

    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" viewBox=\"0 0 {width} {height}\">",
    ));

    svg.push_str(&format!(
        "<rect width=\"100%\" height=\"100%\" fill=\"{}\"/>",
        theme.background
    ));

    for (idx, band) in bands.iter().enumerate() {
        let d = band_path(&band.points);
        svg.push_str(&format!(
            "<path d=\"{}\" fill=\"{}\" fill-opacity=\"{}\" stroke=\"{}\" stroke-width=\"{}\"/>",
            d,
            theme.band_color(idx),
            theme.band_opacity,
            theme.band_stroke,
            theme.band_stroke_width
        ));
    }

    for placed in labels {
        if placed.fit.is_failed() {
            continue;
        }
        svg.push_str(&label_svg(placed, theme));
    }

    svg.push_str("</svg>");
    svg
}

/// Closed path running the upper boundary forward and the lower one back.
fn band_path(points: &[SeriesPoint]) -> String {
    if points.is_empty() {
        return String::new();
    }
    let mut d = String::new();
    d.push_str(&format!("M {:.2} {:.2}", points[0].x, points[0].y1));
    for point in points.iter().skip(1) {
        d.push_str(&format!(" L {:.2} {:.2}", point.x, point.y1));
    }
    for point in points.iter().rev() {
        d.push_str(&format!(" L {:.2} {:.2}", point.x, point.y0));
    }
    d.push_str(" Z");
    d
}

fn label_svg(placed: &PlacedLabel, theme: &Theme) -> String {
    let mut text = String::new();
    text.push_str(&format!("<g transform=\"{}\">", placed.fit));
    text.push_str(&format!(
        "<text x=\"0\" y=\"0\" font-family=\"{}\" font-size=\"{}\" fill=\"{}\">",
        escape_xml(&theme.font_family),
        theme.font_size,
        theme.label_color
    ));
    for (idx, line) in placed.label.lines.iter().enumerate() {
        if idx == 0 {
            text.push_str(&format!("<tspan x=\"0\" dy=\"0\">{}", escape_xml(line)));
        } else {
            let dy = line_advance(theme);
            text.push_str(&format!("<tspan x=\"0\" dy=\"{dy:.2}\">{}", escape_xml(line)));
        }
        text.push_str("</tspan>");
    }
    text.push_str("</text>");
    text.push_str("</g>");
    text
}

pub fn write_output_svg(svg: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, svg)?;
        }
        None => {
            print!("{}", svg);
        }
    }
    Ok(())
}

#[cfg(feature = "png")]
pub fn write_output_png(svg: &str, output: &Path, render_cfg: &RenderConfig) -> Result<()> {
    let mut opt = usvg::Options::default();
    opt.default_size = usvg::Size::from_wh(render_cfg.width, render_cfg.height)
        .unwrap_or(usvg::Size::from_wh(800.0, 600.0).unwrap());

    let tree = usvg::Tree::from_str(svg, &opt)?;
    let size = tree.size().to_int_size();
    let mut pixmap = resvg::tiny_skia::Pixmap::new(size.width(), size.height())
        .ok_or_else(|| anyhow::anyhow!("Failed to allocate pixmap"))?;

    let mut pixmap_mut = pixmap.as_mut();
    resvg::render(&tree, resvg::tiny_skia::Transform::default(), &mut pixmap_mut);
    pixmap.save_png(output)?;
    Ok(())
}

fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
