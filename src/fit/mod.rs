//! Largest-rectangle label fitting. Given samples of a band's upper and
//! lower boundaries, finds the biggest rectangle of the label's aspect ratio
//! that fits inside the band and expresses the placement as a
//! translate/scale transform.

mod bisection;
mod region;
mod types;

use std::rc::Rc;

use serde::Deserialize;

pub use bisection::bisect_max;
pub use types::{AreaAccessors, Fit, LabelBox, Rect};

use region::RegionSamples;

/// Numeric knobs for the fitting search. Paddings are fractions of the
/// label box, for example 0.5 adds half a label width of clearance.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FitOptions {
    /// Smallest label height worth placing. Anything shorter reads as noise.
    pub min_height: f32,
    /// Half-width of the height interval at which the search stops.
    pub epsilon: f32,
    /// Iteration budget for the height search.
    pub max_iterations: usize,
    pub padding_left: f32,
    pub padding_right: f32,
    pub padding_top: f32,
    pub padding_bottom: f32,
}

impl Default for FitOptions {
    fn default() -> Self {
        Self {
            min_height: 2.0,
            epsilon: 0.01,
            max_iterations: 100,
            padding_left: 0.0,
            padding_right: 0.0,
            padding_top: 0.0,
            padding_bottom: 0.0,
        }
    }
}

type Accessor<D> = Box<dyn Fn(&D) -> f32>;

/// Fits labels into the band described by three boundary accessors over a
/// datum type `D`. Configure with the consuming setters, then call
/// [`AreaLabel::fit`] as often as needed; fitting never mutates the fitter.
///
/// The sample slice passed to `fit` must ascend by `x`, and `y0`/`y1` are
/// the lower and upper boundary in a y-down coordinate system.
pub struct AreaLabel<D> {
    x: Accessor<D>,
    y0: Accessor<D>,
    y1: Accessor<D>,
    pub options: FitOptions,
}

fn shape_accessors<D, A>(shape: A) -> (Accessor<D>, Accessor<D>, Accessor<D>)
where
    A: AreaAccessors<D> + 'static,
{
    let shape = Rc::new(shape);
    let x = {
        let shape = Rc::clone(&shape);
        Box::new(move |d: &D| shape.x(d)) as Accessor<D>
    };
    let y0 = {
        let shape = Rc::clone(&shape);
        Box::new(move |d: &D| shape.y0(d)) as Accessor<D>
    };
    let y1 = Box::new(move |d: &D| shape.y1(d)) as Accessor<D>;
    (x, y0, y1)
}

impl<D> AreaLabel<D> {
    pub fn new(
        x: impl Fn(&D) -> f32 + 'static,
        y0: impl Fn(&D) -> f32 + 'static,
        y1: impl Fn(&D) -> f32 + 'static,
    ) -> Self {
        Self {
            x: Box::new(x),
            y0: Box::new(y0),
            y1: Box::new(y1),
            options: FitOptions::default(),
        }
    }

    /// Builds a fitter from one value carrying all three accessors.
    pub fn from_area<A>(shape: A) -> Self
    where
        A: AreaAccessors<D> + 'static,
    {
        let (x, y0, y1) = shape_accessors(shape);
        Self {
            x,
            y0,
            y1,
            options: FitOptions::default(),
        }
    }

    pub fn x(mut self, accessor: impl Fn(&D) -> f32 + 'static) -> Self {
        self.x = Box::new(accessor);
        self
    }

    pub fn y0(mut self, accessor: impl Fn(&D) -> f32 + 'static) -> Self {
        self.y0 = Box::new(accessor);
        self
    }

    pub fn y1(mut self, accessor: impl Fn(&D) -> f32 + 'static) -> Self {
        self.y1 = Box::new(accessor);
        self
    }

    /// Replaces all three accessors at once, keeping the options.
    pub fn area<A>(mut self, shape: A) -> Self
    where
        A: AreaAccessors<D> + 'static,
    {
        let (x, y0, y1) = shape_accessors(shape);
        self.x = x;
        self.y0 = y0;
        self.y1 = y1;
        self
    }

    pub fn min_height(mut self, value: f32) -> Self {
        self.options.min_height = value;
        self
    }

    pub fn epsilon(mut self, value: f32) -> Self {
        self.options.epsilon = value;
        self
    }

    pub fn max_iterations(mut self, value: usize) -> Self {
        self.options.max_iterations = value;
        self
    }

    pub fn padding_left(mut self, value: f32) -> Self {
        self.options.padding_left = value;
        self
    }

    pub fn padding_right(mut self, value: f32) -> Self {
        self.options.padding_right = value;
        self
    }

    pub fn padding_top(mut self, value: f32) -> Self {
        self.options.padding_top = value;
        self
    }

    pub fn padding_bottom(mut self, value: f32) -> Self {
        self.options.padding_bottom = value;
        self
    }

    pub fn padding_x(mut self, value: f32) -> Self {
        self.options.padding_left = value;
        self.options.padding_right = value;
        self
    }

    pub fn padding_y(mut self, value: f32) -> Self {
        self.options.padding_top = value;
        self.options.padding_bottom = value;
        self
    }

    pub fn padding(self, value: f32) -> Self {
        self.padding_x(value).padding_y(value)
    }

    /// Finds the largest placement for `label` inside the band sampled by
    /// `data`. Returns [`Fit::is_failed`] when nothing at least
    /// `min_height` tall fits, when the search budget runs out first, or
    /// when the inputs are degenerate.
    pub fn fit(&self, data: &[D], label: &LabelBox) -> Fit {
        let options = self.options;
        if data.is_empty() || !(label.width > 0.0 && label.height > 0.0) {
            return Fit::FAILED;
        }

        let padding_factor_x = 1.0 + options.padding_left + options.padding_right;
        let padding_factor_y = 1.0 + options.padding_top + options.padding_bottom;
        // Aspect ratio of the label box once padding is folded in. The
        // search runs on the padded rectangle and the label is placed
        // inside it afterwards.
        let aspect = label.width * padding_factor_x / (label.height * padding_factor_y);

        let samples = RegionSamples {
            data,
            x: &*self.x,
            y0: &*self.y0,
            y1: &*self.y1,
        };
        let max_height = samples.max_height();

        let Some(height) = bisect_max(
            options.min_height,
            max_height,
            options.epsilon,
            options.max_iterations,
            |h| samples.find_fit(aspect, h).is_some(),
        ) else {
            return Fit::FAILED;
        };
        // The solver only returns heights its predicate accepted, so this
        // scan finds the same rectangle the probe saw.
        let Some(rect) = samples.find_fit(aspect, height) else {
            return Fit::FAILED;
        };

        let x_inner = rect.x + rect.width * options.padding_left / padding_factor_x;
        let y_inner = rect.y + rect.height * options.padding_top / padding_factor_y;
        let scale = rect.height / padding_factor_y / label.height;
        Fit {
            rect: Some(rect),
            scale,
            x_translate: x_inner - scale * label.x,
            y_translate: y_inner - scale * label.y,
        }
    }
}
