// Pick a discrete Leja sequence out of a shape and build the polynomial
// which interpolates the shape at those points.
//
// Each new point maximises the product of distances to every point already
// chosen (each distance raised to 1/n). The products are kept per candidate
// and updated with only the newest point on each step.

use log::{debug, info};
use num::complex::Complex;

use super::error::{LejaError, Result};
use super::point::{Point, Shape};

#[derive(Clone, Debug)]
pub struct LejaPoints {
    points : Vec<Point>,
    cap_e : f64,
    constant : f64
}

// Candidates not yet picked, with their running weights
struct Candidates {
    weights : Vec<(Point, f64)>
}

impl Candidates {
    fn new(shape : &Shape, seed : &Point) -> Candidates {
        Candidates {
            weights : shape.points().iter()
                .filter(|&point| point != seed)
                .map(|point| (*point, 1.0))
                .collect()
        }
    }

    // Fold the distance to the last pick into every weight, then remove and
    // return the heaviest candidate along with its weight.
    fn take_next(&mut self, last : &Point, exp : f64) -> Result<(Point, f64)> {
        if self.weights.is_empty() {
            return Err(LejaError::InvalidState("no points left to select from".to_string()));
        }
        let mut best = 0;
        let mut max = -1.0;
        for (i, (z, weight)) in self.weights.iter_mut().enumerate() {
            *weight *= z.distance(last).powf(exp);
            if max < *weight {
                max = *weight;
                best = i;
            }
        }
        let (next, _) = self.weights.swap_remove(best);
        Ok((next, max))
    }

    fn len(&self) -> usize {
        self.weights.len()
    }
}

impl LejaPoints {
    // Select n leja points from the shape starting at seed (or the first
    // shape point). s scales the final polynomial by exp(-n*s/2).
    pub fn select(shape : &Shape, seed : Option<Point>, n : usize, s : f64) -> Result<LejaPoints> {
        if n < 2 {
            return Err(LejaError::InvalidArgument(
                format!("need at least 2 leja points, asked for {}", n)
            ));
        }
        if n > shape.len() {
            return Err(LejaError::InvalidArgument(
                format!("asked for {} leja points from a shape of {} points", n, shape.len())
            ));
        }
        let seed = match seed {
            Some(point) => point,
            None => *shape.first().ok_or_else(
                || LejaError::InvalidArgument("empty shape".to_string())
            )?
        };
        if !shape.contains(&seed) {
            return Err(LejaError::InvalidArgument(
                format!("seed point {} is not in the shape", seed.value())
            ));
        }
        let mut candidates = Candidates::new(shape, &seed);
        let mut points = Vec::with_capacity(n);
        points.push(seed);
        let exp = 1.0 / n as f64;
        let mut cap_e = 0.0;
        for step in 1..n {
            let last = points[points.len() - 1];
            let (next, max) = candidates.take_next(&last, exp)?;
            points.push(next);
            cap_e = max;
            if step % 100 == 0 {
                debug!("Selected {} of {} leja points", step + 1, n);
            }
        }
        let constant = (-(n as f64) * s / 2.0).exp();
        info!(
            "Selected {} leja points, {} shape points unused, capE {}, constant {}",
            points.len(), candidates.len(), cap_e, constant
        );
        LejaPoints::from_parts(points, cap_e, constant)
    }

    // Rebuild from previously computed values
    pub fn from_parts(points : Vec<Point>, cap_e : f64, constant : f64) -> Result<LejaPoints> {
        if !(cap_e.is_finite() && cap_e > 0.0) {
            return Err(LejaError::InvalidArgument(
                format!("capE must be positive and finite, got {}", cap_e)
            ));
        }
        if !constant.is_finite() {
            return Err(LejaError::InvalidArgument(
                format!("polynomial constant must be finite, got {}", constant)
            ));
        }
        Ok(LejaPoints { points, cap_e, constant })
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn cap_e(&self) -> f64 {
        self.cap_e
    }

    pub fn constant(&self) -> f64 {
        self.constant
    }

    pub fn polynomial(&self) -> LejaPolynomial<'_> {
        LejaPolynomial {
            points : &self.points,
            cap_e : self.cap_e,
            constant : self.constant
        }
    }
}

// The polynomial z * prod(z - leja) scaled by capE after every factor and
// by the polynomial constant at the end. Rescaling on every step keeps the
// partial products near unit size for thousands of factors.
#[derive(Clone, Copy)]
pub struct LejaPolynomial<'a> {
    points : &'a [Point],
    cap_e : f64,
    constant : f64
}

impl<'a> LejaPolynomial<'a> {
    pub fn evaluate(&self, z : Complex<f64>) -> Complex<f64> {
        let mut acc = z;
        for leja in self.points.iter() {
            acc = (acc * (z - leja.value())).unscale(self.cap_e);
        }
        acc.scale(self.constant)
    }

    pub fn points(&self) -> &'a [Point] {
        self.points
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use approx::assert_abs_diff_eq;

    use super::*;

    fn unit_square() -> Shape {
        vec![
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(0.0, 1.0),
            Point::new(1.0, 1.0)
        ].into_iter().collect()
    }

    fn circle(count : usize) -> Shape {
        (0..count).map(|i| {
            let theta = 2.0 * std::f64::consts::PI * i as f64 / count as f64;
            Point::new(theta.cos(), theta.sin())
        }).collect()
    }

    #[test]
    fn test_select_from_square() {
        let shape = unit_square();
        let leja = LejaPoints::select(&shape, None, 3, 0.01).unwrap();
        assert_eq!(leja.points().len(), 3);
        let distinct : HashSet<Point> = leja.points().iter().cloned().collect();
        assert_eq!(distinct.len(), 3);
        assert!(leja.points().iter().all(|p| shape.contains(p)));
        assert!(leja.cap_e() > 0.0 && leja.cap_e().is_finite());
        assert_abs_diff_eq!(leja.constant(), (-0.015_f64).exp());
        assert_abs_diff_eq!(leja.constant(), 0.98511, epsilon = 1e-5);
    }

    #[test]
    fn test_second_point_is_farthest_from_seed() {
        let shape = unit_square();
        let leja = LejaPoints::select(&shape, Some(Point::new(0.0, 0.0)), 3, 0.01).unwrap();
        assert_eq!(leja.points()[0], Point::new(0.0, 0.0));
        assert_eq!(leja.points()[1], Point::new(1.0, 1.0));
    }

    #[test]
    fn test_select_whole_shape() {
        let shape = circle(16);
        let leja = LejaPoints::select(&shape, None, 16, 1.0 / 16.0).unwrap();
        let distinct : HashSet<Point> = leja.points().iter().cloned().collect();
        assert_eq!(distinct.len(), 16);
        assert!(leja.cap_e() > 0.0 && leja.cap_e().is_finite());
    }

    #[test]
    fn test_last_candidate_is_taken() {
        let shape = unit_square();
        let mut candidates = Candidates::new(&shape, &Point::new(0.0, 0.0));
        let mut last = Point::new(0.0, 0.0);
        for _ in 0..3 {
            last = candidates.take_next(&last, 0.25).unwrap().0;
        }
        assert_eq!(candidates.len(), 0);
        assert!(matches!(
            candidates.take_next(&last, 0.25),
            Err(LejaError::InvalidState(_))
        ));
    }

    #[test]
    fn test_too_many_points_rejected() {
        let shape = unit_square();
        assert!(matches!(
            LejaPoints::select(&shape, None, 5, 0.01),
            Err(LejaError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_seed_outside_shape_rejected() {
        let shape = unit_square();
        assert!(matches!(
            LejaPoints::select(&shape, Some(Point::new(0.5, 0.5)), 3, 0.01),
            Err(LejaError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_single_point_rejected() {
        let shape = unit_square();
        assert!(LejaPoints::select(&shape, None, 1, 0.01).is_err());
    }

    #[test]
    fn test_bad_cap_e_rejected() {
        assert!(LejaPoints::from_parts(vec![], 0.0, 1.0).is_err());
        assert!(LejaPoints::from_parts(vec![], f64::INFINITY, 1.0).is_err());
        assert!(LejaPoints::from_parts(vec![], f64::NAN, 1.0).is_err());
    }

    #[test]
    fn test_evaluate_rescales_every_factor() {
        // z * (z - 1) * (z + 1) / 2 / 2 * 0.5 at z = 2 is 2 * 1 * 3 / 8
        let leja = LejaPoints::from_parts(
            vec![Point::new(1.0, 0.0), Point::new(-1.0, 0.0)], 2.0, 0.5
        ).unwrap();
        let p = leja.polynomial().evaluate(Complex::new(2.0, 0.0));
        assert_abs_diff_eq!(p.re, 0.75);
        assert_abs_diff_eq!(p.im, 0.0);
    }

    #[test]
    fn test_evaluate_complex_factor() {
        // i * (i - 1) = -1 - i
        let leja = LejaPoints::from_parts(vec![Point::new(1.0, 0.0)], 1.0, 1.0).unwrap();
        let p = leja.polynomial().evaluate(Complex::new(0.0, 1.0));
        assert_abs_diff_eq!(p.re, -1.0);
        assert_abs_diff_eq!(p.im, -1.0);
    }

    #[test]
    fn test_evaluate_many_factors_stays_finite() {
        let shape = circle(2000);
        let leja = LejaPoints::select(&shape, None, 1500, 1.0 / 1500.0).unwrap();
        let p = leja.polynomial().evaluate(Complex::new(0.3, 0.2));
        assert!(p.re.is_finite() && p.im.is_finite());
    }
}
