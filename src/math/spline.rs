use super::Vec2;
use crate::error::CurveError;

/// Each segment is shaped by a window of four consecutive control values.
pub const MIN_CONTROL_POINTS: usize = 4;

/// Uniform Catmull-Rom path through 2D control points.
///
/// With N control points the path has N - 3 segments. It starts at point 1,
/// ends at point N - 2 and passes through every point in between; the first
/// and last points only shape the end tangents.
#[derive(Debug, Clone, PartialEq)]
pub struct ControlPath {
    xs: Vec<f32>,
    ys: Vec<f32>,
}

impl ControlPath {
    pub fn new(xs: Vec<f32>, ys: Vec<f32>) -> Result<Self, CurveError> {
        validate(&xs, &ys)?;
        Ok(Self { xs, ys })
    }

    pub fn from_points(points: &[Vec2]) -> Result<Self, CurveError> {
        let xs = points.iter().map(|p| p.x).collect();
        let ys = points.iter().map(|p| p.y).collect();
        Self::new(xs, ys)
    }

    pub fn len(&self) -> usize {
        self.xs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.xs.is_empty()
    }

    pub fn segment_count(&self) -> usize {
        self.xs.len() - 3
    }

    pub fn point(&self, index: usize) -> Option<Vec2> {
        Some(Vec2::new(*self.xs.get(index)?, *self.ys.get(index)?))
    }

    /// Position at `progress` (0.0 to 1.0 across the whole path, clamped)
    pub fn evaluate(&self, progress: f32) -> Result<Vec2, CurveError> {
        if !progress.is_finite() {
            return Err(CurveError::NonFiniteProgress);
        }
        Ok(evaluate_unchecked(progress, &self.xs, &self.ys))
    }

    /// Unit direction of travel at `progress`
    pub fn tangent(&self, progress: f32) -> Result<Vec2, CurveError> {
        if !progress.is_finite() {
            return Err(CurveError::NonFiniteProgress);
        }
        let delta = 0.001;
        let p1 = (progress - delta).max(0.0);
        let p2 = (progress + delta).min(1.0);
        let a = evaluate_unchecked(p1, &self.xs, &self.ys);
        let b = evaluate_unchecked(p2, &self.xs, &self.ys);
        Ok((b - a).normalize())
    }

    /// Sample the path at N evenly spaced progress values
    pub fn sample(&self, n: usize) -> Vec<Vec2> {
        (0..n)
            .map(|i| {
                let progress = i as f32 / (n - 1).max(1) as f32;
                evaluate_unchecked(progress, &self.xs, &self.ys)
            })
            .collect()
    }

    /// Total approximate length of the path
    pub fn approximate_length(&self, samples: usize) -> f32 {
        self.sample(samples)
            .windows(2)
            .map(|w| w[0].distance(&w[1]))
            .sum()
    }
}

/// Evaluate the path described by two control sequences at `progress`.
///
/// Fails if the sequences differ in length, hold fewer than four values
/// or contain non-finite values, or if `progress` is NaN/infinite.
pub fn evaluate(progress: f32, xs: &[f32], ys: &[f32]) -> Result<Vec2, CurveError> {
    validate(xs, ys)?;
    if !progress.is_finite() {
        return Err(CurveError::NonFiniteProgress);
    }
    Ok(evaluate_unchecked(progress, xs, ys))
}

/// Catmull-Rom blend of one axis, running from `p[1]` at t = 0 to `p[2]` at t = 1
pub fn catmull_rom(t: f32, p: [f32; 4]) -> f32 {
    let t2 = t * t;
    let t3 = t2 * t;

    0.5 * (2.0 * p[1]
        + (p[2] - p[0]) * t
        + (2.0 * p[0] - 5.0 * p[1] + 4.0 * p[2] - p[3]) * t2
        + (3.0 * p[1] - p[0] - 3.0 * p[2] + p[3]) * t3)
}

fn validate(xs: &[f32], ys: &[f32]) -> Result<(), CurveError> {
    if xs.len() != ys.len() {
        return Err(CurveError::AxisLengthMismatch { x: xs.len(), y: ys.len() });
    }
    if xs.len() < MIN_CONTROL_POINTS {
        return Err(CurveError::TooFewPoints { found: xs.len() });
    }
    if let Some(index) = xs
        .iter()
        .zip(ys)
        .position(|(x, y)| !x.is_finite() || !y.is_finite())
    {
        return Err(CurveError::NonFiniteControlPoint { index });
    }
    Ok(())
}

/// Split clamped progress into a segment index and local t.
///
/// Progress 1.0 maps onto the last segment at t = 1 rather than one past it.
fn locate(progress: f32, segments: usize) -> (usize, f32) {
    let scaled = progress.clamp(0.0, 1.0) * segments as f32;
    let segment = (scaled.floor() as usize).min(segments - 1);
    (segment, scaled - segment as f32)
}

fn evaluate_unchecked(progress: f32, xs: &[f32], ys: &[f32]) -> Vec2 {
    let (segment, t) = locate(progress, xs.len() - 3);
    evaluate_segment(segment, t, xs, ys)
}

fn evaluate_segment(segment: usize, t: f32, xs: &[f32], ys: &[f32]) -> Vec2 {
    let window = |axis: &[f32]| {
        [axis[segment], axis[segment + 1], axis[segment + 2], axis[segment + 3]]
    };
    Vec2::new(catmull_rom(t, window(xs)), catmull_rom(t, window(ys)))
}

#[cfg(test)]
mod tests {
    use super::*;

    const XS: [f32; 6] = [0.0, 0.0, 10.0, 10.0, 20.0, 20.0];
    const YS: [f32; 6] = [0.0, 10.0, 0.0, 10.0, 0.0, 10.0];

    fn zigzag() -> ControlPath {
        ControlPath::new(XS.to_vec(), YS.to_vec()).unwrap()
    }

    fn assert_near(actual: Vec2, expected: Vec2) {
        assert!(
            actual.distance(&expected) < 0.0001,
            "expected {:?}, got {:?}",
            expected,
            actual
        );
    }

    #[test]
    fn test_path_endpoints() {
        let path = zigzag();
        assert_eq!(path.segment_count(), 3);
        assert_near(path.evaluate(0.0).unwrap(), Vec2::new(0.0, 10.0));
        assert_near(path.evaluate(1.0).unwrap(), Vec2::new(20.0, 0.0));
    }

    #[test]
    fn test_passes_through_inner_points() {
        let path = zigzag();
        assert_near(path.evaluate(1.0 / 3.0).unwrap(), path.point(2).unwrap());
        assert_near(path.evaluate(2.0 / 3.0).unwrap(), path.point(3).unwrap());
    }

    #[test]
    fn test_middle_segment_is_curved() {
        let path = zigzag();

        let mid = path.evaluate(0.5).unwrap();
        assert_near(mid, Vec2::new(10.0, 5.0));
        assert!(mid.y > 0.0 && mid.y < 10.0);

        // The chord from point 2 to point 3 is the line x = 10; the curve bulges off it.
        let quarter = path.evaluate(1.25 / 3.0).unwrap();
        assert!((quarter.x - 10.46875).abs() < 0.0001);
    }

    #[test]
    fn test_segment_boundaries_are_continuous() {
        for segment in 0..2 {
            let end = evaluate_segment(segment, 1.0, &XS, &YS);
            let start = evaluate_segment(segment + 1, 0.0, &XS, &YS);
            assert_near(end, start);

            let h = 0.001;
            let incoming = (end - evaluate_segment(segment, 1.0 - h, &XS, &YS)) * (1.0 / h);
            let outgoing = (evaluate_segment(segment + 1, h, &XS, &YS) - start) * (1.0 / h);
            assert!(
                incoming.distance(&outgoing) < 0.2,
                "tangent jump at boundary {}: {:?} vs {:?}",
                segment,
                incoming,
                outgoing
            );
        }
    }

    #[test]
    fn test_output_is_finite_everywhere() {
        for n in 4..12 {
            let xs: Vec<f32> = (0..n).map(|i| i as f32 * 3.0).collect();
            let ys: Vec<f32> = (0..n).map(|i| (i as f32).sin() * 5.0).collect();
            for i in 0..=200 {
                let p = evaluate(i as f32 / 200.0, &xs, &ys).unwrap();
                assert!(p.is_finite(), "n={} step={}", n, i);
            }
            let end = evaluate(1.0, &xs, &ys).unwrap();
            assert_near(end, Vec2::new(xs[n - 2], ys[n - 2]));
        }
    }

    #[test]
    fn test_progress_is_clamped() {
        let path = zigzag();
        assert_eq!(path.evaluate(1.5).unwrap(), path.evaluate(1.0).unwrap());
        assert_eq!(path.evaluate(-0.5).unwrap(), path.evaluate(0.0).unwrap());
    }

    #[test]
    fn test_minimal_path_is_single_segment() {
        let p = evaluate(0.5, &[0.0, 0.0, 4.0, 4.0], &[0.0, 0.0, 0.0, 0.0]).unwrap();
        assert_near(p, Vec2::new(2.0, 0.0));
    }

    #[test]
    fn test_invalid_curves_fail_fast() {
        assert_eq!(
            evaluate(0.5, &[0.0, 1.0, 2.0], &[0.0, 1.0, 2.0]),
            Err(CurveError::TooFewPoints { found: 3 })
        );
        assert_eq!(
            evaluate(0.5, &XS, &YS[..5]),
            Err(CurveError::AxisLengthMismatch { x: 6, y: 5 })
        );
        assert_eq!(
            ControlPath::new(vec![0.0, 1.0, f32::NAN, 3.0], vec![0.0; 4]),
            Err(CurveError::NonFiniteControlPoint { index: 2 })
        );
        assert_eq!(zigzag().evaluate(f32::NAN), Err(CurveError::NonFiniteProgress));
    }

    #[test]
    fn test_path_sampling() {
        let path = zigzag();
        let samples = path.sample(31);
        assert_eq!(samples.len(), 31);
        assert_near(samples[0], Vec2::new(0.0, 10.0));
        assert_near(samples[30], Vec2::new(20.0, 0.0));

        // At least as long as the polyline through the visited points.
        let polyline = 2.0 * 200.0_f32.sqrt() + 10.0;
        assert!(path.approximate_length(300) > polyline - 0.1);
    }

    #[test]
    fn test_path_tangent() {
        let path = ControlPath::from_points(&[
            Vec2::new(-1.0, 0.0),
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(2.0, 0.0),
        ])
        .unwrap();
        let tangent = path.tangent(0.5).unwrap();
        assert!((tangent.x - 1.0).abs() < 0.01);
        assert!(tangent.y.abs() < 0.01);
    }
}
