//! Gradient-stepping line rasterizer
//!
//! Cases, checked in order:
//! 1. both endpoints equal: one pixel
//! 2. `x1 == x2`: vertical run, one pixel per row
//! 3. gradient == 0: horizontal run, one pixel per column
//! 4. `|gradient| <= 1`: step x, interpolate and round y
//! 5. `|gradient| > 1`: step y, interpolate and round x
//!
//! Stepping always runs from the first endpoint towards the second; the
//! direction comes from comparing coordinates, never from the gradient's sign.
//! The gradient `dy / dx` is kept as an exact ratio, so the interpolated
//! coordinate is rounded half away from zero without floating-point drift and
//! swapping the endpoints yields the same pixels.

use std::convert::Infallible;

use crate::color::Color;
use crate::display::{BoundsPolicy, PixelBuffer};
use crate::error::RasterError;
use crate::geometry::Point;

/// Inclusive coordinate limits a walk is restricted to
#[derive(Debug, Clone, Copy)]
struct ClipWindow {
    x: (i64, i64),
    y: (i64, i64),
}

impl ClipWindow {
    fn of(buffer: &PixelBuffer) -> Self {
        Self {
            x: (0, i64::from(buffer.width()) - 1),
            y: (0, i64::from(buffer.height()) - 1),
        }
    }
}

/// Inclusive integer range from `from` to `to`, in either direction,
/// optionally cut down to `limits`
fn span(from: i32, to: i32, limits: Option<(i64, i64)>) -> impl Iterator<Item = i32> {
    let (from, to) = (i64::from(from), i64::from(to));
    let step: i64 = if from <= to { 1 } else { -1 };
    let (start, end, count) = match limits {
        Some((lo, hi)) if from.max(to) < lo || from.min(to) > hi => (from, to, 0),
        Some((lo, hi)) => {
            let (start, end) = (from.clamp(lo, hi), to.clamp(lo, hi));
            (start, end, (end - start).unsigned_abs() + 1)
        },
        None => (from, to, (to - from).unsigned_abs() + 1),
    };
    (0..count).map(move |i| (start + step * i as i64) as i32)
}

/// `numerator / denominator` rounded half away from zero
#[inline]
fn div_round(numerator: i128, denominator: i128) -> i128 {
    let (n, d) = if denominator < 0 {
        (-numerator, -denominator)
    } else {
        (numerator, denominator)
    };
    let q = (2 * n.abs() + d) / (2 * d);
    if n < 0 {
        -q
    } else {
        q
    }
}

/// Minor coordinate on the line through `(major0, minor0)` with slope
/// `d_minor / d_major`, evaluated at `major`
///
/// Rounds the full coordinate `(minor0 * d_major + d_minor * (major - major0)) / d_major`,
/// so the result does not depend on which endpoint is the anchor.
#[inline]
fn interpolate(major: i32, major0: i32, minor0: i32, d_major: i64, d_minor: i64) -> i32 {
    let numerator = i128::from(minor0) * i128::from(d_major)
        + i128::from(d_minor) * (i128::from(major) - i128::from(major0));
    // the segment's minor coordinates bound the result, so it fits in i32
    div_round(numerator, i128::from(d_major)) as i32
}

/// Visit every pixel of the segment `from → to` in stepping order
///
/// `plot` is called once per pixel; the first error it returns stops the walk
/// and is handed back to the caller.
pub fn trace_line<E>(
    from: Point,
    to: Point,
    plot: impl FnMut(Point) -> Result<(), E>,
) -> Result<(), E> {
    walk(from, to, None, plot)
}

fn walk<E>(
    from: Point,
    to: Point,
    window: Option<ClipWindow>,
    mut plot: impl FnMut(Point) -> Result<(), E>,
) -> Result<(), E> {
    if from == to {
        return plot(from);
    }

    let x_limits = window.map(|w| w.x);
    let y_limits = window.map(|w| w.y);

    if from.x == to.x {
        // Vertical: must be handled before the gradient divides by zero
        return span(from.y, to.y, y_limits).try_for_each(|y| plot(Point::new(from.x, y)));
    }

    let dx = i64::from(to.x) - i64::from(from.x);
    let dy = i64::from(to.y) - i64::from(from.y);

    if dy == 0 {
        return span(from.x, to.x, x_limits).try_for_each(|x| plot(Point::new(x, from.y)));
    }

    // |gradient| <= 1 without dividing
    if dy.unsigned_abs() <= dx.unsigned_abs() {
        // x changes fastest: one pixel per column
        span(from.x, to.x, x_limits)
            .try_for_each(|x| plot(Point::new(x, interpolate(x, from.x, from.y, dx, dy))))
    } else {
        // y changes fastest: one pixel per row
        span(from.y, to.y, y_limits)
            .try_for_each(|y| plot(Point::new(interpolate(y, from.y, from.x, dy, dx), y)))
    }
}

/// Pixels of the segment in stepping order
pub fn line_points(from: Point, to: Point) -> Vec<Point> {
    let mut points = Vec::new();
    let result: Result<(), Infallible> = trace_line(from, to, |p| {
        points.push(p);
        Ok(())
    });
    match result {
        Ok(()) => points,
        Err(never) => match never {},
    }
}

/// Rasterize a segment into the buffer
pub fn draw_line(
    buffer: &mut PixelBuffer,
    from: Point,
    to: Point,
    color: Color,
) -> Result<(), RasterError> {
    // Off-buffer steps would all be dropped anyway; skip walking them
    let window = match buffer.policy() {
        BoundsPolicy::Clip => Some(ClipWindow::of(buffer)),
        BoundsPolicy::Strict => None,
    };
    walk(from, to, window, |p| buffer.set(p.x, p.y, color))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn p(x: i32, y: i32) -> Point {
        Point::new(x, y)
    }

    fn point_set(from: Point, to: Point) -> HashSet<Point> {
        line_points(from, to).into_iter().collect()
    }

    #[test]
    fn test_span_both_directions() {
        assert_eq!(span(2, 5, None).collect::<Vec<_>>(), vec![2, 3, 4, 5]);
        assert_eq!(span(5, 2, None).collect::<Vec<_>>(), vec![5, 4, 3, 2]);
        assert_eq!(span(-1, -1, None).collect::<Vec<_>>(), vec![-1]);
    }

    #[test]
    fn test_span_limits_keep_direction() {
        assert_eq!(span(-10, 20, Some((0, 3))).collect::<Vec<_>>(), vec![0, 1, 2, 3]);
        assert_eq!(span(20, -10, Some((0, 3))).collect::<Vec<_>>(), vec![3, 2, 1, 0]);
        assert_eq!(span(1, 2, Some((0, 3))).collect::<Vec<_>>(), vec![1, 2]);
        assert_eq!(span(5, 9, Some((0, 3))).count(), 0);
        assert_eq!(span(-9, -1, Some((0, 3))).count(), 0);
    }

    #[test]
    fn test_div_round_half_away_from_zero() {
        assert_eq!(div_round(7, 2), 4);
        assert_eq!(div_round(-7, 2), -4);
        assert_eq!(div_round(7, -2), -4);
        assert_eq!(div_round(-7, -2), 4);
        assert_eq!(div_round(1, 3), 0);
        assert_eq!(div_round(2, 3), 1);
        assert_eq!(div_round(-2, 3), -1);
        assert_eq!(div_round(0, 5), 0);
    }

    #[test]
    fn test_span_extreme_range() {
        let mut s = span(i32::MIN, i32::MAX, None);
        assert_eq!(s.next(), Some(i32::MIN));
        assert_eq!(s.last(), Some(i32::MAX));
    }

    #[test]
    fn test_degenerate_line_is_single_pixel() {
        for &(x, y) in &[(0, 0), (7, 3), (-2, 9)] {
            assert_eq!(line_points(p(x, y), p(x, y)), vec![p(x, y)]);
        }
    }

    #[test]
    fn test_vertical_line_down_and_up() {
        assert_eq!(line_points(p(3, 1), p(3, 4)), vec![p(3, 1), p(3, 2), p(3, 3), p(3, 4)]);
        assert_eq!(line_points(p(3, 4), p(3, 1)), vec![p(3, 4), p(3, 3), p(3, 2), p(3, 1)]);
    }

    #[test]
    fn test_vertical_line_exact_set() {
        for (y1, y2) in [(0, 10), (10, 0), (-5, 5)] {
            let expected: HashSet<Point> = (y1.min(y2)..=y1.max(y2)).map(|y| p(4, y)).collect();
            assert_eq!(point_set(p(4, y1), p(4, y2)), expected);
        }
    }

    #[test]
    fn test_horizontal_line_both_directions() {
        assert_eq!(line_points(p(1, 2), p(4, 2)), vec![p(1, 2), p(2, 2), p(3, 2), p(4, 2)]);
        assert_eq!(line_points(p(4, 2), p(1, 2)), vec![p(4, 2), p(3, 2), p(2, 2), p(1, 2)]);
    }

    #[test]
    fn test_diagonal_45_degrees() {
        let expected: Vec<Point> = (0..=5).map(|i| p(i, i)).collect();
        assert_eq!(line_points(p(0, 0), p(5, 5)), expected);

        let anti: HashSet<Point> = (0..=5).map(|i| p(i, 5 - i)).collect();
        assert_eq!(point_set(p(0, 5), p(5, 0)), anti);
    }

    #[test]
    fn test_shallow_slope_rounds_half_away_from_zero() {
        // gradient 0.5: y = 0, 0.5, 1, 1.5, 2
        assert_eq!(
            line_points(p(0, 0), p(4, 2)),
            vec![p(0, 0), p(1, 1), p(2, 1), p(3, 2), p(4, 2)]
        );
    }

    #[test]
    fn test_shallow_negative_slope() {
        // gradient -0.5 anchored at (0, 4): y = 4, 3.5, 3, 2.5, 2
        assert_eq!(
            line_points(p(0, 4), p(4, 2)),
            vec![p(0, 4), p(1, 4), p(2, 3), p(3, 3), p(4, 2)]
        );
    }

    #[test]
    fn test_steep_slope_steps_y() {
        // gradient 3: x = 0, 1/3, 2/3, 1
        assert_eq!(
            line_points(p(0, 0), p(1, 3)),
            vec![p(0, 0), p(0, 1), p(1, 2), p(1, 3)]
        );
        assert_eq!(
            line_points(p(1, 3), p(0, 0)),
            vec![p(1, 3), p(1, 2), p(0, 1), p(0, 0)]
        );
    }

    #[test]
    fn test_steep_negative_slope() {
        // gradient -2 anchored at (0, 4): x = 0, 0.5, 1, 1.5, 2
        assert_eq!(
            line_points(p(0, 4), p(2, 0)),
            vec![p(0, 4), p(1, 3), p(1, 2), p(2, 1), p(2, 0)]
        );
    }

    #[test]
    fn test_reversed_endpoints_give_same_set() {
        let cases = [
            (p(0, 0), p(4, 2)),
            (p(0, 4), p(4, 2)),
            (p(0, 0), p(1, 3)),
            (p(0, 4), p(2, 0)),
            (p(0, 0), p(8, 2)),
            (p(3, 1), p(3, 9)),
            (p(9, 6), p(2, 6)),
            (p(0, 0), p(5, 5)),
        ];
        for (a, b) in cases {
            assert_eq!(point_set(a, b), point_set(b, a), "{a:?} <-> {b:?}");
        }
    }

    #[test]
    fn test_exact_half_rounds_away_from_zero() {
        // x at y = 9 is exactly 3.5
        assert!(point_set(p(0, 0), p(7, 18)).contains(&p(4, 9)));
        assert!(point_set(p(7, 18), p(0, 0)).contains(&p(4, 9)));
        // mirrored: -3.5 rounds to -4
        assert!(point_set(p(0, 0), p(-7, -18)).contains(&p(-4, -9)));
        assert!(point_set(p(-7, -18), p(0, 0)).contains(&p(-4, -9)));
        // shallow mirror: y at x = 9 is exactly 3.5
        assert!(point_set(p(0, 0), p(18, 7)).contains(&p(9, 4)));
        assert!(point_set(p(18, 7), p(0, 0)).contains(&p(9, 4)));
    }

    #[test]
    fn test_half_rounding_uses_absolute_coordinate() {
        // y at x = 1 is -2.5 (anchor -3 plus 0.5) and must round to -3
        assert_eq!(line_points(p(0, -3), p(2, -2)), vec![p(0, -3), p(1, -3), p(2, -2)]);
        assert_eq!(line_points(p(2, -2), p(0, -3)), vec![p(2, -2), p(1, -3), p(0, -3)]);
    }

    #[test]
    fn test_reversal_symmetry_on_small_grid() {
        const N: i32 = 16;
        for x1 in 0..N {
            for y1 in 0..N {
                for x2 in 0..N {
                    for y2 in 0..N {
                        let (a, b) = (p(x1, y1), p(x2, y2));
                        assert_eq!(point_set(a, b), point_set(b, a), "{a:?} <-> {b:?}");
                    }
                }
            }
        }
    }

    #[test]
    fn test_extreme_endpoints_do_not_overflow() {
        let first_points = |from: Point, to: Point| {
            let mut seen = Vec::new();
            let result = trace_line(from, to, |pt| {
                seen.push(pt);
                if seen.len() == 3 {
                    Err(())
                } else {
                    Ok(())
                }
            });
            assert_eq!(result, Err(()));
            seen
        };

        assert_eq!(
            first_points(p(-2_000_000_000, 0), p(2_000_000_000, 1)),
            vec![p(-2_000_000_000, 0), p(-1_999_999_999, 0), p(-1_999_999_998, 0)]
        );
        assert_eq!(
            first_points(p(i32::MAX, i32::MAX), p(i32::MIN, i32::MIN)),
            vec![p(i32::MAX, i32::MAX), p(i32::MAX - 1, i32::MAX - 1), p(i32::MAX - 2, i32::MAX - 2)]
        );
        assert_eq!(
            first_points(p(0, i32::MIN), p(1, i32::MAX)),
            vec![p(0, i32::MIN), p(0, i32::MIN + 1), p(0, i32::MIN + 2)]
        );
    }

    #[test]
    fn test_clipped_walk_only_visits_buffer_range() {
        let mut buf = PixelBuffer::with_size(10, 4)
            .unwrap()
            .with_policy(BoundsPolicy::Clip);
        // y at x = 0 is exactly 0.5, rounding to 1; it stays 1 across the buffer
        draw_line(&mut buf, p(-2_000_000_000, 0), p(2_000_000_000, 1), Color::BLACK).unwrap();
        assert_eq!(buf.count(Color::BLACK), 10);
        assert!((0..10).all(|x| buf.get(x, 1) == Some(Color::BLACK)));

        let mut buf = PixelBuffer::with_size(8, 8)
            .unwrap()
            .with_policy(BoundsPolicy::Clip);
        draw_line(&mut buf, p(i32::MIN, i32::MIN), p(i32::MAX, i32::MAX), Color::BLACK).unwrap();
        draw_line(&mut buf, p(3, i32::MAX), p(3, i32::MIN), Color::WHITE).unwrap();
        assert_eq!(buf.count(Color::WHITE), 8);
        assert_eq!(buf.count(Color::BLACK), 7);
        assert!((0..8).filter(|&i| i != 3).all(|i| buf.get(i, i) == Some(Color::BLACK)));
    }

    #[test]
    fn test_clipped_walk_matches_unclipped_pixels() {
        let (a, b) = (p(-13, -40), p(29, 51));
        let expected: HashSet<Point> = line_points(a, b)
            .into_iter()
            .filter(|pt| (0..12).contains(&pt.x) && (0..12).contains(&pt.y))
            .collect();

        let mut buf = PixelBuffer::with_size(12, 12)
            .unwrap()
            .with_policy(BoundsPolicy::Clip);
        draw_line(&mut buf, a, b, Color::BLACK).unwrap();
        let plotted: HashSet<Point> = (0..12)
            .flat_map(|y| (0..12).map(move |x| p(x, y)))
            .filter(|pt| buf.get(pt.x, pt.y) == Some(Color::BLACK))
            .collect();
        assert!(!expected.is_empty());
        assert_eq!(plotted, expected);
    }

    #[test]
    fn test_every_line_is_connected_and_hits_endpoints() {
        let coords = [-7, -3, 0, 1, 2, 5, 11];
        for &x1 in &coords {
            for &y1 in &coords {
                for &x2 in &coords {
                    for &y2 in &coords {
                        let (a, b) = (p(x1, y1), p(x2, y2));
                        let points = line_points(a, b);

                        assert_eq!(points.first(), Some(&a));
                        assert_eq!(points.last(), Some(&b));

                        // one pixel per step along the major axis
                        let major = (x2 - x1).abs().max((y2 - y1).abs());
                        assert_eq!(points.len() as i32, major + 1, "{a:?} -> {b:?}");

                        for pair in points.windows(2) {
                            let dx = (pair[1].x - pair[0].x).abs();
                            let dy = (pair[1].y - pair[0].y).abs();
                            assert!(dx <= 1 && dy <= 1, "gap in {a:?} -> {b:?}");
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn test_trace_line_stops_at_first_error() {
        let mut visited = 0;
        let result = trace_line(p(0, 0), p(10, 0), |pt| {
            visited += 1;
            if pt.x == 3 {
                Err(pt)
            } else {
                Ok(())
            }
        });
        assert_eq!(result, Err(p(3, 0)));
        assert_eq!(visited, 4);
    }

    #[test]
    fn test_draw_line_writes_buffer() {
        let mut buf = PixelBuffer::with_size(8, 8).unwrap();
        buf.clear(Color::WHITE);
        draw_line(&mut buf, p(0, 0), p(7, 7), Color::BLACK).unwrap();
        assert_eq!(buf.count(Color::BLACK), 8);
        for i in 0..8 {
            assert_eq!(buf.get(i, i), Some(Color::BLACK));
        }
    }

    #[test]
    fn test_draw_line_out_of_bounds_strict() {
        let mut buf = PixelBuffer::with_size(4, 4)
            .unwrap()
            .with_policy(BoundsPolicy::Strict);
        let err = draw_line(&mut buf, p(0, 0), p(6, 0), Color::BLACK).unwrap_err();
        assert!(matches!(err, RasterError::OutOfBounds { x: 4, y: 0, .. }));
        // pixels before the offending one are already plotted
        assert_eq!(buf.count(Color::BLACK), 4);
    }

    #[test]
    fn test_draw_line_out_of_bounds_clipped() {
        let mut buf = PixelBuffer::with_size(4, 4)
            .unwrap()
            .with_policy(BoundsPolicy::Clip);
        draw_line(&mut buf, p(-2, 1), p(6, 1), Color::BLACK).unwrap();
        assert_eq!(buf.count(Color::BLACK), 4);
    }
}
