// A rectangular sample of the complex plane and the reverse lookup from a
// complex value to the pixel holding it.
//
// x grows with the real part and y grows downwards (the imaginary part
// falls). Values are truncated to a fixed number of decimals so that grids
// built from the same parameters produce bitwise identical points.

use json::JsonValue;

use super::error::{LejaError, Result};
use super::point::Point;

// Truncate towards zero at the given number of decimals
fn truncate(val : f64, decimals : u32) -> f64 {
    let multiplier = 10_f64.powi(decimals as i32);
    // adding 0.0 turns -0.0 into 0.0
    (val * multiplier).trunc() / multiplier + 0.0
}

// Decimals needed to write the spacing exactly, capped at 15
pub fn decimals(spacing : f64) -> u32 {
    let text = format!("{}", spacing.abs());
    match text.split_once('.') {
        Some((_, frac)) => (frac.len() as u32).min(15),
        None => 0
    }
}

#[derive(Clone, Debug)]
pub struct ComplexGrid {
    width : usize,
    height : usize,
    // Column major
    points : Vec<Point>
}

impl ComplexGrid {
    fn build<F>(width : usize, height : usize, value : F) -> Result<ComplexGrid>
        where F : Fn(usize, usize) -> Point
    {
        if width < 2 || height < 2 {
            return Err(LejaError::InvalidArgument(
                format!("grid must be at least 2x2, got {}x{}", width, height)
            ));
        }
        let mut points = Vec::with_capacity(width * height);
        for x in 0..width {
            for y in 0..height {
                points.push(value(x, y));
            }
        }
        Ok(ComplexGrid { width, height, points })
    }

    // Grid where pixel (origin_x, origin_y) is zero
    pub fn centred(
        origin_x : f64,
        origin_y : f64,
        width : usize,
        height : usize,
        spacing : f64,
        rounding : u32
    ) -> Result<ComplexGrid> {
        ComplexGrid::build(width, height, |x, y| Point::new(
            truncate((x as f64 - origin_x) * spacing, rounding),
            truncate((origin_y - y as f64) * spacing, rounding)
        ))
    }

    // Grid whose top left pixel is (left, top)
    pub fn from_corner(
        left : f64,
        top : f64,
        spacing : f64,
        width : usize,
        height : usize
    ) -> Result<ComplexGrid> {
        let rounding = decimals(spacing);
        ComplexGrid::build(width, height, |x, y| Point::new(
            truncate(left + x as f64 * spacing, rounding),
            truncate(top - y as f64 * spacing, rounding)
        ))
    }

    pub fn from_json(input : &JsonValue, size : usize) -> Result<ComplexGrid> {
        let width = input["width"].as_usize().unwrap_or(2 * size);
        let height = input["height"].as_usize().unwrap_or(2 * size);
        let origin_x = input["origin_x"].as_f64().unwrap_or((width / 2) as f64);
        let origin_y = input["origin_y"].as_f64().unwrap_or((height / 2) as f64);
        let spacing = input["spacing"].as_f64().unwrap_or(0.005);
        let rounding = input["rounding"].as_u32().unwrap_or(3);
        if !(spacing > 0.0) {
            return Err(LejaError::InvalidArgument(
                format!("grid spacing must be positive, got {}", spacing)
            ));
        }
        ComplexGrid::centred(origin_x, origin_y, width, height, spacing, rounding)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn get(&self, x : usize, y : usize) -> Option<&Point> {
        if x < self.width && y < self.height {
            self.points.get(x * self.height + y)
        } else {
            None
        }
    }

    pub fn column_slice(&self) -> &[Point] {
        &self.points
    }

    pub fn top_left(&self) -> Point {
        self.points[0]
    }

    pub fn bottom_right(&self) -> Point {
        self.points[self.points.len() - 1]
    }

    pub fn locator(&self, bounds : Bounds) -> GridLocator {
        GridLocator::new(self.top_left(), self.bottom_right(), self.width, self.height, bounds)
    }
}

// What to do with values that land outside the grid
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Bounds {
    // Return the index as computed, possibly negative or past the edge
    Unchecked,
    // Pull the index onto the nearest edge pixel
    Clamp,
    // No index for values off the grid
    Strict
}

impl Bounds {
    pub fn from_json(input : &JsonValue) -> Result<Bounds> {
        match input.as_str().unwrap_or("unchecked") {
            "unchecked" => Ok(Bounds::Unchecked),
            "clamp" => Ok(Bounds::Clamp),
            "strict" => Ok(Bounds::Strict),
            other => Err(LejaError::InvalidArgument(format!("unknown bounds policy '{}'", other)))
        }
    }
}

// Maps complex values back to grid pixels by linear interpolation between
// the corners. Assumes a uniformly spaced grid.
//
// Scales by width - 1 and height - 1 and rounds, so the corners land exactly
// on (0, 0) and (width - 1, height - 1). Scaling by width and truncating
// would put the bottom right corner one pixel past the edge.
#[derive(Clone, Copy, Debug)]
pub struct GridLocator {
    left : f64,
    top : f64,
    right : f64,
    bottom : f64,
    width : usize,
    height : usize,
    bounds : Bounds
}

impl GridLocator {
    pub fn new(top_left : Point, bottom_right : Point, width : usize, height : usize, bounds : Bounds) -> GridLocator {
        GridLocator {
            left : top_left.re(),
            top : top_left.im(),
            right : bottom_right.re(),
            bottom : bottom_right.im(),
            width,
            height,
            bounds
        }
    }

    pub fn locate(&self, z : &Point) -> Option<(i64, i64)> {
        let x_ratio = (z.re() - self.left) / (self.right - self.left);
        let y_ratio = (self.top - z.im()) / (self.top - self.bottom);
        let x = (x_ratio * (self.width - 1) as f64).round();
        let y = (y_ratio * (self.height - 1) as f64).round();
        if !(x.is_finite() && y.is_finite()) {
            return None;
        }
        let (x, y) = (x as i64, y as i64);
        let max_x = self.width as i64 - 1;
        let max_y = self.height as i64 - 1;
        match self.bounds {
            Bounds::Unchecked => Some((x, y)),
            Bounds::Clamp => Some((x.clamp(0, max_x), y.clamp(0, max_y))),
            Bounds::Strict => {
                if (0..=max_x).contains(&x) && (0..=max_y).contains(&y) {
                    Some((x, y))
                } else {
                    None
                }
            }
        }
    }
}
