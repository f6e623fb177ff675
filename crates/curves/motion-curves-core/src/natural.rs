//! Natural cubic splines parametrized by normalized arc length.
//!
//! Points carry no timestamps: segment `i` joins point `i` to point `i + 1`, and the
//! public parameter `p` is the fraction of the (approximate) total path length.
//! Each segment is measured with a 10-chord polyline at construction.

use crate::error::CurveError;
use crate::series::flatten_rows;

/// Chords used to approximate each segment's length.
const LENGTH_CHORDS: usize = 10;

/// One cubic piece `a + b u + c u² + d u³` over `u ∈ [0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cubic {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
}

impl Cubic {
    #[inline]
    pub fn eval(&self, u: f64) -> f64 {
        ((self.d * u + self.c) * u + self.b) * u + self.a
    }

    /// First derivative with respect to `u`.
    #[inline]
    pub fn vel(&self, u: f64) -> f64 {
        (3.0 * self.d * u + 2.0 * self.c) * u + self.b
    }
}

/// Solve the natural-boundary tridiagonal system for one coordinate and return one
/// [`Cubic`] per segment. Requires `x.len() >= 2`.
pub fn natural_cubic(x: &[f64]) -> Vec<Cubic> {
    let n = x.len() - 1;
    let mut gamma = vec![0.0; n + 1];
    let mut delta = vec![0.0; n + 1];
    let mut d = vec![0.0; n + 1];

    gamma[0] = 0.5;
    for i in 1..n {
        gamma[i] = 1.0 / (4.0 - gamma[i - 1]);
    }
    gamma[n] = 1.0 / (2.0 - gamma[n - 1]);

    delta[0] = 3.0 * (x[1] - x[0]) * gamma[0];
    for i in 1..n {
        delta[i] = (3.0 * (x[i + 1] - x[i - 1]) - delta[i - 1]) * gamma[i];
    }
    delta[n] = (3.0 * (x[n] - x[n - 1]) - delta[n - 1]) * gamma[n];

    d[n] = delta[n];
    for i in (0..n).rev() {
        d[i] = delta[i] - gamma[i] * d[i + 1];
    }

    (0..n)
        .map(|i| Cubic {
            a: x[i],
            b: d[i],
            c: 3.0 * (x[i + 1] - x[i]) - 2.0 * d[i] - d[i + 1],
            d: 2.0 * (x[i] - x[i + 1]) + d[i] + d[i + 1],
        })
        .collect()
}

/// N-dimensional natural cubic spline through an ordered list of points.
#[derive(Debug, Clone, PartialEq)]
pub struct Spline {
    /// `curves[dim][segment]`
    curves: Vec<Vec<Cubic>>,
    segment_lengths: Vec<f64>,
    total_length: f64,
}

impl Spline {
    pub fn new<P: AsRef<[f64]>>(points: &[P]) -> Result<Self, CurveError> {
        let (dims, values) = flatten_rows(points, 2)?;
        let count = points.len();

        let curves: Vec<Vec<Cubic>> = (0..dims)
            .map(|j| {
                let column: Vec<f64> = (0..count).map(|i| values[i * dims + j]).collect();
                natural_cubic(&column)
            })
            .collect();

        let segment_lengths: Vec<f64> = (0..count - 1)
            .map(|seg| approx_length(&curves, seg))
            .collect();
        let total_length = segment_lengths.iter().sum();

        Ok(Self {
            curves,
            segment_lengths,
            total_length,
        })
    }

    #[inline]
    pub fn dims(&self) -> usize {
        self.curves.len()
    }

    /// Approximate length of every segment.
    #[inline]
    pub fn segment_lengths(&self) -> &[f64] {
        &self.segment_lengths
    }

    #[inline]
    pub fn total_length(&self) -> f64 {
        self.total_length
    }

    /// Cubic of dimension `dim` on segment `segment`.
    #[inline]
    pub fn cubic(&self, dim: usize, segment: usize) -> &Cubic {
        &self.curves[dim][segment]
    }

    /// Segment index and local parameter for normalized arc length `p`.
    ///
    /// `p` outside `[0, 1]` continues the first or last cubic.
    fn locate(&self, p: f64) -> (usize, f64) {
        let mut pos = p * self.total_length;
        let last = self.segment_lengths.len() - 1;
        let mut k = 0;
        while k < last && self.segment_lengths[k] < pos {
            pos -= self.segment_lengths[k];
            k += 1;
        }
        let len = self.segment_lengths[k];
        let u = if len > 0.0 { pos / len } else { 0.0 };
        (k, u)
    }

    pub fn pos_into(&self, p: f64, out: &mut [f64]) {
        let (k, u) = self.locate(p);
        for (slot, curve) in out.iter_mut().zip(&self.curves) {
            *slot = curve[k].eval(u);
        }
    }

    pub fn pos(&self, p: f64) -> Vec<f64> {
        let mut out = vec![0.0; self.dims()];
        self.pos_into(p, &mut out);
        out
    }

    /// # Panics
    /// If `dim >= self.dims()`.
    pub fn pos_axis(&self, p: f64, dim: usize) -> f64 {
        let (k, u) = self.locate(p);
        self.curves[dim][k].eval(u)
    }

    /// Derivative of each coordinate with respect to the local segment parameter.
    pub fn velocity_into(&self, p: f64, out: &mut [f64]) {
        let (k, u) = self.locate(p);
        for (slot, curve) in out.iter_mut().zip(&self.curves) {
            *slot = curve[k].vel(u);
        }
    }

    pub fn velocity(&self, p: f64) -> Vec<f64> {
        let mut out = vec![0.0; self.dims()];
        self.velocity_into(p, &mut out);
        out
    }
}

fn approx_length(curves: &[Vec<Cubic>], segment: usize) -> f64 {
    let mut sum = 0.0;
    let mut prev: Vec<f64> = curves.iter().map(|c| c[segment].eval(0.0)).collect();
    for step in 1..=LENGTH_CHORDS {
        let u = step as f64 / LENGTH_CHORDS as f64;
        let mut sq = 0.0;
        for (last, curve) in prev.iter_mut().zip(curves) {
            let v = curve[segment].eval(u);
            let diff = v - *last;
            sq += diff * diff;
            *last = v;
        }
        sum += sq.sqrt();
    }
    sum
}
