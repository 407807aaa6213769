// Points of the complex plane that can be used as set members and map keys.
//
// Equality is exact on the bit patterns of both components. Every point
// compared against another has to come from the same grid generation (same
// origin, spacing and truncation) or two visually identical points will not
// match.

use std::collections::HashSet;
use std::hash::{Hash, Hasher};

use num::complex::Complex;

#[derive(Clone, Copy, Debug)]
pub struct Point(pub Complex<f64>);

impl Point {
    pub fn new(re : f64, im : f64) -> Point {
        Point(Complex::new(re, im))
    }

    pub fn re(&self) -> f64 {
        self.0.re
    }

    pub fn im(&self) -> f64 {
        self.0.im
    }

    pub fn value(&self) -> Complex<f64> {
        self.0
    }

    // Euclidean distance to another point
    pub fn distance(&self, other : &Point) -> f64 {
        (self.0 - other.0).norm()
    }

    fn key(&self) -> (u64, u64) {
        (self.0.re.to_bits(), self.0.im.to_bits())
    }
}

impl PartialEq for Point {
    fn eq(&self, other : &Point) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Point {}

impl Hash for Point {
    fn hash<H : Hasher>(&self, state : &mut H) {
        self.key().hash(state);
    }
}

impl From<Complex<f64>> for Point {
    fn from(z : Complex<f64>) -> Point {
        Point(z)
    }
}

// The set of points describing the shape we want a julia set to look like.
//
// Points are unique; insertion order is kept so that selection over the
// shape is reproducible between runs.
#[derive(Clone, Debug, Default)]
pub struct Shape {
    points : Vec<Point>,
    members : HashSet<Point>
}

impl Shape {
    pub fn new() -> Shape {
        Shape::default()
    }

    // Returns false if the point was already in the shape
    pub fn insert(&mut self, point : Point) -> bool {
        if self.members.insert(point) {
            self.points.push(point);
            true
        } else {
            false
        }
    }

    pub fn contains(&self, point : &Point) -> bool {
        self.members.contains(point)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn first(&self) -> Option<&Point> {
        self.points.first()
    }

    pub fn extend(&mut self, other : &Shape) {
        for point in other.points.iter() {
            self.insert(*point);
        }
    }
}

impl FromIterator<Point> for Shape {
    fn from_iter<I : IntoIterator<Item = Point>>(iter : I) -> Shape {
        let mut shape = Shape::new();
        for point in iter {
            shape.insert(point);
        }
        shape
    }
}
