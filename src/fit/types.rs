use std::fmt;

/// Bounding box of an unplaced label in its own local coordinates, as
/// reported by a measurement collaborator (see [`crate::measure`]). For SVG
/// text the origin usually sits at the first baseline, so `y` is negative.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelBox {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// Axis-aligned rectangle in region coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// Result of a fit request.
///
/// `rect` holds the winning rectangle in region coordinates, or `None` when
/// no rectangle of any admissible height fits — treat that as "do not render
/// the label", not as an error. The transform maps the label's local
/// coordinates onto the rectangle; a failed fit carries a zero scale, so
/// applying the transform unconditionally still collapses the label to
/// nothing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fit {
    pub rect: Option<Rect>,
    pub scale: f32,
    pub x_translate: f32,
    pub y_translate: f32,
}

impl Fit {
    pub(crate) const FAILED: Fit = Fit {
        rect: None,
        scale: 0.0,
        x_translate: 0.0,
        y_translate: 0.0,
    };

    pub fn is_failed(&self) -> bool {
        self.rect.is_none()
    }
}

/// Renders the placement as a CSS/SVG transform:
/// `translate(<x>,<y>) scale(<s>)`.
impl fmt::Display for Fit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "translate({},{}) scale({})",
            self.x_translate, self.y_translate, self.scale
        )
    }
}

/// One value exposing all three boundary accessors, so a fitter can be wired
/// from an area-generator-like object in a single call instead of three.
pub trait AreaAccessors<D> {
    fn x(&self, d: &D) -> f32;
    fn y0(&self, d: &D) -> f32;
    fn y1(&self, d: &D) -> f32;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transform_string_matches_svg_syntax() {
        let fit = Fit {
            rect: Some(Rect {
                x: 0.0,
                y: 0.0,
                width: 4.0,
                height: 2.0,
            }),
            scale: 0.5,
            x_translate: 1.5,
            y_translate: -2.0,
        };
        assert_eq!(fit.to_string(), "translate(1.5,-2) scale(0.5)");
    }

    #[test]
    fn failed_fit_collapses_to_zero_scale() {
        let fit = Fit::FAILED;
        assert!(fit.is_failed());
        assert_eq!(fit.to_string(), "translate(0,0) scale(0)");
    }
}
