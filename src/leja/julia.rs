// Decide which points of a grid lie in the filled julia set of a leja
// polynomial.
//
// Two methods are available. Escape time iterates a few times and calls a
// point outside once its orbit leaves the escape radius. Distance estimation
// iterates longer while tracking the derivative and uses the sign of
// |z| ln|z| / |dz| to decide.
//
// Columns of the grid are independent and are classified in parallel.

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};

use json::JsonValue;
use log::debug;
use num::complex::Complex;
use rayon::prelude::*;

use super::error::{LejaError, Result};
use super::grid::ComplexGrid;
use super::point::{Point, Shape};
use super::sequence::LejaPolynomial;

const ESCAPE_RADIUS : f64 = 10.0;
const ESCAPE_ITERATIONS : usize = 15;
const DISTANCE_ITERATIONS : usize = 200;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Classification {
    LejaPoint,
    OriginalShape,
    OutsideSet,
    InsideSet
}

#[derive(Clone, Copy, Debug)]
pub enum Method<'a> {
    // Shape points, if given, are labelled rather than iterated
    EscapeTime { shape : Option<&'a Shape> },
    DistanceEstimate
}

// Which method a run asked for, parsed once from the config
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MethodKind {
    EscapeTime,
    DistanceEstimate
}

impl MethodKind {
    pub fn from_json(input : &JsonValue) -> Result<MethodKind> {
        match input.as_str().unwrap_or("escape-time") {
            "escape-time" => Ok(MethodKind::EscapeTime),
            "distance-estimate" => Ok(MethodKind::DistanceEstimate),
            other => Err(LejaError::InvalidArgument(format!("unknown method '{}'", other)))
        }
    }

    // The shape is only used by escape time
    pub fn with_shape(self, shape : Option<&Shape>) -> Method<'_> {
        match self {
            MethodKind::EscapeTime => Method::EscapeTime { shape },
            MethodKind::DistanceEstimate => Method::DistanceEstimate
        }
    }
}

impl<'a> Method<'a> {
    pub fn name(&self) -> &'static str {
        match self {
            Method::EscapeTime { .. } => "escape time",
            Method::DistanceEstimate => "distance estimation"
        }
    }
}

pub struct ClassificationGrid {
    width : usize,
    height : usize,
    // Column major, matching the sample grid
    labels : Vec<Classification>
}

impl ClassificationGrid {
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn get(&self, x : usize, y : usize) -> Option<Classification> {
        if x < self.width && y < self.height {
            self.labels.get(x * self.height + y).copied()
        } else {
            None
        }
    }

    pub fn count(&self, label : Classification) -> usize {
        self.labels.iter().filter(|&&l| l == label).count()
    }
}

pub struct JuliaClassifier<'a> {
    polynomial : LejaPolynomial<'a>,
    leja : HashSet<Point>
}

fn escaped(z : &Complex<f64>) -> bool {
    let size = z.norm();
    size > ESCAPE_RADIUS || size.is_nan()
}

impl<'a> JuliaClassifier<'a> {
    pub fn new(polynomial : LejaPolynomial<'a>) -> JuliaClassifier<'a> {
        JuliaClassifier {
            polynomial,
            leja : polynomial.points().iter().cloned().collect()
        }
    }

    // True if the orbit of z leaves the escape radius (or stops being a
    // number) within the iteration budget
    pub fn escapes(&self, z : &Point) -> bool {
        let mut z = z.value();
        for _ in 0..ESCAPE_ITERATIONS {
            z = self.polynomial.evaluate(z);
            if escaped(&z) {
                return true;
            }
        }
        false
    }

    // Estimated distance to the julia set, positive outside. Bounded orbits
    // end with |z| < 1 so the log and the estimate go negative. An orbit
    // that escaped but whose estimate overflowed (NaN z, infinite dz) is
    // infinitely far out.
    pub fn distance(&self, z : &Point) -> f64 {
        let mut z = z.value();
        let mut dz = Complex::new(1.0, 0.0);
        if z.norm() < ESCAPE_RADIUS {
            for _ in 0..DISTANCE_ITERATIONS {
                dz = z.scale(2.0) * dz;
                z = self.polynomial.evaluate(z);
                if escaped(&z) {
                    break;
                }
            }
        }
        let size = z.norm();
        let estimate = size * size.ln() / dz.norm();
        if escaped(&z) && !(estimate > 0.0) {
            f64::INFINITY
        } else {
            estimate
        }
    }

    pub fn classify(&self, z : &Point, method : &Method) -> Classification {
        match method {
            Method::EscapeTime { shape } => {
                if self.leja.contains(z) {
                    Classification::LejaPoint
                } else if shape.map_or(false, |s| s.contains(z)) {
                    Classification::OriginalShape
                } else if self.escapes(z) {
                    Classification::OutsideSet
                } else {
                    Classification::InsideSet
                }
            },
            Method::DistanceEstimate => {
                if self.distance(z) > 0.0 {
                    Classification::OutsideSet
                } else {
                    Classification::InsideSet
                }
            }
        }
    }

    pub fn classify_grid(&self, grid : &ComplexGrid, method : &Method) -> ClassificationGrid {
        let done = AtomicUsize::new(0);
        let width = grid.width();
        let labels = grid.column_slice()
            .par_chunks(grid.height())
            .flat_map_iter(|column| {
                let labels : Vec<Classification> = column.iter().map(
                    |z| self.classify(z, method)
                ).collect();
                let finished = done.fetch_add(1, Ordering::Relaxed) + 1;
                if finished % 100 == 0 || finished == width {
                    debug!("Classified {} of {} columns", finished, width);
                }
                labels
            })
            .collect();
        ClassificationGrid {
            width,
            height : grid.height(),
            labels
        }
    }
}
