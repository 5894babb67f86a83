/// Finds the largest value in `[low, high]` that passes `test`, to within
/// `epsilon`, assuming the predicate is monotonic: true for every value up
/// to some threshold and false beyond it.
///
/// The returned value always passed the predicate itself — a narrow interval
/// around an infeasible midpoint is not accepted. Returns `None` once the
/// iteration budget runs out, which is also the outcome when even
/// `test(low)` fails.
pub fn bisect_max(
    low: f32,
    high: f32,
    epsilon: f32,
    max_iterations: usize,
    mut test: impl FnMut(f32) -> bool,
) -> Option<f32> {
    let mut a = low;
    let mut b = high;
    for _ in 0..max_iterations {
        let c = (a + b) / 2.0;
        let passes = test(c);
        if passes && (b - a) / 2.0 < epsilon {
            return Some(c);
        }
        if passes {
            a = c;
        } else {
            b = c;
        }
    }
    None
}
