use super::types::Rect;

/// Borrowed view of an ordered sample slice plus the three boundary
/// accessors. Samples must ascend by `x`; `y0` is the lower boundary and
/// `y1` the upper one in a y-down coordinate system, so the region height at
/// a sample is `y0 - y1`.
pub(crate) struct RegionSamples<'a, D> {
    pub data: &'a [D],
    pub x: &'a dyn Fn(&D) -> f32,
    pub y0: &'a dyn Fn(&D) -> f32,
    pub y1: &'a dyn Fn(&D) -> f32,
}

impl<D> RegionSamples<'_, D> {
    /// Largest per-sample region height, never below zero. Upper bound for
    /// the height search; inverted samples count as zero height.
    pub fn max_height(&self) -> f32 {
        self.data
            .iter()
            .map(|d| (self.y0)(d) - (self.y1)(d))
            .fold(0.0, f32::max)
    }

    /// Index of the first sample whose x-position is at or past `bound`.
    fn right_index(&self, bound: f32) -> usize {
        self.data.partition_point(|d| (self.x)(d) < bound)
    }

    /// Leftmost rectangle of the given aspect ratio and height that fits
    /// under the region, anchored at one of the sample x-positions.
    /// Candidates with a non-positive width or height never fit.
    pub fn find_fit(&self, aspect: f32, height: f32) -> Option<Rect> {
        let width = aspect * height;
        if !(width > 0.0 && height > 0.0) {
            return None;
        }
        let x_max = (self.x)(self.data.last()?);

        for i0 in 0..self.data.len() {
            let x0 = (self.x)(&self.data[i0]);
            let x1 = x0 + width;

            // Anchors ascend in x, so the first right-edge overhang ends the
            // whole search.
            if x1 > x_max {
                break;
            }

            let i1 = self.right_index(x1);
            let mut floor = f32::INFINITY;
            let mut ceiling = f32::NEG_INFINITY;
            for d in &self.data[i0..i1] {
                let bottom = (self.y0)(d);
                if bottom < floor {
                    floor = bottom;
                }
                let top = (self.y1)(d);
                if top > ceiling {
                    ceiling = top;
                }
                // The gap only shrinks as the window widens.
                if floor - ceiling < height {
                    break;
                }
            }
            if floor - ceiling >= height {
                return Some(Rect {
                    x: x0,
                    y: ceiling,
                    width,
                    height,
                });
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Sample {
        x: f32,
        y0: f32,
        y1: f32,
    }

    fn sample(x: f32, y0: f32, y1: f32) -> Sample {
        Sample { x, y0, y1 }
    }

    fn sample_x(s: &Sample) -> f32 {
        s.x
    }

    fn sample_y0(s: &Sample) -> f32 {
        s.y0
    }

    fn sample_y1(s: &Sample) -> f32 {
        s.y1
    }

    fn region(data: &[Sample]) -> RegionSamples<'_, Sample> {
        RegionSamples {
            data,
            x: &sample_x,
            y0: &sample_y0,
            y1: &sample_y1,
        }
    }

    fn narrowing_band() -> Vec<Sample> {
        // Uniform 10-unit band that narrows to 2 units at x = 20.
        vec![
            sample(0.0, 10.0, 0.0),
            sample(10.0, 10.0, 0.0),
            sample(20.0, 4.0, 2.0),
        ]
    }

    #[test]
    fn full_band_height_fits_before_the_narrowing() {
        let data = narrowing_band();
        let rect = region(&data)
            .find_fit(2.0, 10.0)
            .expect("2:1 rect of height 10 should fit the wide part");
        assert_eq!(rect.x, 0.0);
        assert_eq!(rect.y, 0.0);
        assert_eq!(rect.width, 20.0);
        // The sample sitting exactly on the right edge is outside the
        // window, so the narrow tail does not constrain this fit.
    }

    #[test]
    fn narrow_tail_rejects_taller_candidates() {
        let data = narrowing_band();
        assert!(region(&data).find_fit(2.0, 10.5).is_none());
    }

    #[test]
    fn leftmost_anchor_wins_ties() {
        let data = vec![
            sample(0.0, 8.0, 0.0),
            sample(5.0, 8.0, 0.0),
            sample(10.0, 8.0, 0.0),
        ];
        // Height 8 fits anchored at x = 0 and at x = 5; the scan must pick
        // the smaller x.
        let rect = region(&data).find_fit(0.5, 8.0).expect("band should fit");
        assert_eq!(rect.x, 0.0);
    }

    #[test]
    fn rect_never_overhangs_the_last_sample() {
        let data = narrowing_band();
        for height in [2.0_f32, 4.0, 6.0, 8.0, 10.0] {
            if let Some(rect) = region(&data).find_fit(2.0, height) {
                let last_x = data.last().map(sample_x).unwrap_or(0.0);
                assert!(
                    rect.x + rect.width <= last_x,
                    "height {height} overhangs: {} > {last_x}",
                    rect.x + rect.width
                );
            }
        }
    }

    #[test]
    fn feasibility_is_monotonic_in_height() {
        let data = narrowing_band();
        let samples = region(&data);
        assert!(samples.find_fit(2.0, 10.0).is_some());
        for height in [9.0_f32, 7.5, 5.0, 3.0, 2.0] {
            assert!(
                samples.find_fit(2.0, height).is_some(),
                "height {height} should fit when 10.0 does"
            );
        }
    }

    #[test]
    fn notch_blocks_wide_rects_but_not_narrow_ones() {
        let data = vec![
            sample(0.0, 10.0, 0.0),
            sample(5.0, 6.0, 4.0),
            sample(10.0, 10.0, 0.0),
        ];
        let samples = region(&data);
        assert!(samples.find_fit(1.0, 10.0).is_none());
        let rect = samples.find_fit(1.0, 2.0).expect("short rect fits left of the notch");
        assert_eq!(rect.x, 0.0);
        assert_eq!(rect.y, 0.0);
    }

    #[test]
    fn degenerate_dimensions_never_fit() {
        let data = narrowing_band();
        let samples = region(&data);
        assert!(samples.find_fit(0.0, 5.0).is_none());
        assert!(samples.find_fit(2.0, 0.0).is_none());
        assert!(samples.find_fit(2.0, -1.0).is_none());
    }

    #[test]
    fn empty_slice_never_fits() {
        let data: Vec<Sample> = Vec::new();
        assert!(region(&data).find_fit(1.0, 1.0).is_none());
    }

    #[test]
    fn single_sample_offers_no_width() {
        let data = vec![sample(5.0, 10.0, 0.0)];
        assert!(region(&data).find_fit(1.0, 1.0).is_none());
    }

    #[test]
    fn inverted_boundaries_clamp_to_zero_max_height() {
        let data = vec![sample(0.0, 2.0, 8.0), sample(10.0, 2.0, 8.0)];
        assert_eq!(region(&data).max_height(), 0.0);
    }

    #[test]
    fn max_height_takes_the_tallest_sample() {
        let data = narrowing_band();
        assert_eq!(region(&data).max_height(), 10.0);
    }
}
