use nalgebra::SVector;
use rayon::prelude::*;

/// Upper bound on the points one sampling pass produces.
pub const MAX_SAMPLES: usize = 1 << 24;

/// Component-wise `a + (b - a) * t`.
#[inline]
pub fn lerp<const D: usize>(a: &SVector<f64, D>, b: &SVector<f64, D>, t: f64) -> SVector<f64, D> {
    a + (b - a) * t
}

/// Evaluates the Bézier curve defined by `points` at `t` with De Casteljau's algorithm.
///
/// The curve has degree `points.len() - 1`. An empty slice evaluates to the origin.
/// `points` is only read; the interpolation runs on a working copy.
pub fn de_casteljau<const D: usize>(points: &[SVector<f64, D>], t: f64) -> SVector<f64, D> {
    let Some(n) = points.len().checked_sub(1) else {
        return SVector::zeros();
    };

    let mut work = points.to_vec();
    for r in 1..=n {
        for i in 0..=(n - r) {
            work[i] = lerp(&work[i], &work[i + 1], t);
        }
    }

    work[0]
}

/// Evaluates a curve of the given degree at `t`.
///
/// # Panics
///
/// When `points` does not hold exactly `degree + 1` control points. Callers gate on the
/// point count before drawing, so a mismatch is a bug and not an input to recover from.
pub fn evaluate<const D: usize>(points: &[SVector<f64, D>], degree: usize, t: f64) -> SVector<f64, D> {
    check_degree(points.len(), degree);
    de_casteljau(points, t)
}

fn check_degree(count: usize, degree: usize) {
    assert_eq!(
        count,
        degree + 1,
        "a degree {} curve needs {} control points, got {}",
        degree,
        degree + 1,
        count
    );
}

fn sample_count(step: f64) -> usize {
    assert!(
        step.is_finite() && step > 0.0,
        "sample step must be a positive number, got {step}"
    );
    // half a step of slack so accumulated rounding never drops t = 1
    let intervals = (1.0 / step + 0.5).floor();
    assert!(
        intervals < MAX_SAMPLES as f64,
        "sample step {step} needs more than {MAX_SAMPLES} samples"
    );
    intervals as usize + 1
}

#[inline]
fn sample_t(i: usize, step: f64) -> f64 {
    (i as f64 * step).min(1.0)
}

/// Lazy walk over the curve at `t = 0, step, 2 * step, ..., 1`.
///
/// Cloning a fresh `Samples` restarts the walk; every item is computed independently
/// from the borrowed control points.
#[derive(Clone, Debug)]
pub struct Samples<'a, const D: usize> {
    points: &'a [SVector<f64, D>],
    degree: usize,
    step: f64,
    next: usize,
    count: usize,
}

impl<'a, const D: usize> Iterator for Samples<'a, D> {
    type Item = SVector<f64, D>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.count {
            return None;
        }
        let t = sample_t(self.next, self.step);
        self.next += 1;
        Some(evaluate(self.points, self.degree, t))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.count - self.next;
        (left, Some(left))
    }
}

impl<'a, const D: usize> ExactSizeIterator for Samples<'a, D> {}

/// # Panics
///
/// On a point count other than `degree + 1`, a step that is not a positive number, or a
/// step so small the walk would exceed [`MAX_SAMPLES`].
pub fn samples<const D: usize>(points: &[SVector<f64, D>], degree: usize, step: f64) -> Samples<'_, D> {
    check_degree(points.len(), degree);
    Samples {
        points,
        degree,
        step,
        next: 0,
        count: sample_count(step),
    }
}

/// Same sequence as [`samples`], evaluated in parallel and collected in order.
pub fn sample_par<const D: usize>(
    points: &[SVector<f64, D>],
    degree: usize,
    step: f64,
) -> Vec<SVector<f64, D>> {
    check_degree(points.len(), degree);
    (0..sample_count(step))
        .into_par_iter()
        .map(|i| evaluate(points, degree, sample_t(i, step)))
        .collect()
}
