use crate::fit::LabelBox;
use crate::text_metrics;
use crate::theme::Theme;

const LINE_HEIGHT: f32 = 1.2;

/// A label broken into renderable lines plus its bounding box in local
/// coordinates. The origin sits on the first baseline, so `bounds.y` is
/// negative by one ascent.
#[derive(Debug, Clone, PartialEq)]
pub struct MeasuredLabel {
    pub lines: Vec<String>,
    pub bounds: LabelBox,
}

pub fn measure_label(text: &str, theme: &Theme) -> MeasuredLabel {
    let lines = split_lines(text);
    let font_size = theme.font_size;
    let family = theme.font_family.as_str();

    let mut width = 0.0f32;
    let mut ascent = None;
    for line in &lines {
        match text_metrics::measure_line(line, font_size, family) {
            Some(extents) => {
                width = width.max(extents.width);
                ascent = Some(extents.ascent);
            }
            None => width = width.max(estimated_width(line, font_size)),
        }
    }
    let ascent = ascent.unwrap_or(font_size * 0.8);
    let height = lines.len() as f32 * font_size * LINE_HEIGHT;

    MeasuredLabel {
        lines,
        bounds: LabelBox {
            x: 0.0,
            y: -ascent,
            width,
            height,
        },
    }
}

/// Vertical advance between consecutive baselines.
pub fn line_advance(theme: &Theme) -> f32 {
    theme.font_size * LINE_HEIGHT
}

fn split_lines(text: &str) -> Vec<String> {
    let unescaped = text.replace("\\n", "\n");
    unescaped
        .split('\n')
        .map(|line| line.trim().to_string())
        .collect()
}

// Rough per-character advances for when no system font can be queried.
// Buckets are calibrated loosely against common sans-serif faces.
fn char_width_factor(ch: char) -> f32 {
    match ch {
        ' ' => 0.31,
        'i' | 'j' | 'l' | 'I' | '.' | ',' | ':' | ';' | '!' | '\'' | '|' => 0.26,
        'f' | 't' | 'r' | '(' | ')' | '[' | ']' | '{' | '}' => 0.34,
        'm' | 'w' => 0.84,
        'M' | 'W' | '@' | '#' | '%' | '&' => 0.93,
        'A'..='Z' => 0.66,
        '0'..='9' => 0.60,
        _ => 0.55,
    }
}

fn estimated_width(text: &str, font_size: f32) -> f32 {
    text.chars().map(char_width_factor).sum::<f32>() * font_size
}
