// Approximate a shape with the filled julia set of a polynomial.
//
// A leja sequence is picked out of the shape's points and the polynomial
// interpolating the shape at those points is iterated over a grid of the
// complex plane. Points whose orbits stay bounded make up the filled julia
// set, which should look like the original shape.
//
// Produces a picture of the shape, one of the julia set and optionally one
// zoomed in on a box of the grid.

use std::path::Path;
use std::time::{Duration, Instant};

use image::RgbImage;
use json::JsonValue;
use log::{info, warn};
use rand::seq::SliceRandom;
use rand::SeedableRng;

mod error;
mod grid;
mod julia;
mod persist;
mod point;
mod render;
mod sequence;
mod shape;

use error::{LejaError, Result};
use grid::{Bounds, ComplexGrid};
use julia::{Classification, JuliaClassifier, MethodKind};
use point::{Point, Shape};
use render::PixelBox;
use sequence::LejaPoints;

// Human readable duration, e.g. "2 min 5 s 120 ms"
pub fn format_elapsed(elapsed : Duration) -> String {
    let millis = elapsed.as_millis();
    let mut result = format!("{} ms", millis % 1000);
    let secs = millis / 1000;
    if secs > 0 {
        result = format!("{} s {}", secs % 60, result);
    }
    let mins = secs / 60;
    if mins > 0 {
        result = format!("{} min {}", mins % 60, result);
    }
    let hours = mins / 60;
    if hours > 0 {
        result = format!("{} h {}", hours, result);
    }
    result
}

struct Zoom {
    area : PixelBox,
    factor : usize
}

impl Zoom {
    fn from_json(input : &JsonValue, grid : &ComplexGrid) -> Result<Option<Zoom>> {
        if input.is_null() {
            return Ok(None);
        }
        let edge = |name : &str| input[name].as_u32().ok_or_else(
            || LejaError::InvalidArgument(format!("zoom needs '{}'", name))
        );
        let area = PixelBox {
            left : edge("left")?,
            right : edge("right")?,
            top : edge("top")?,
            bottom : edge("bottom")?
        };
        let factor = input["factor"].as_usize().unwrap_or(100);
        if area.left >= area.right || area.top >= area.bottom || factor == 0 {
            return Err(LejaError::InvalidArgument(format!("empty zoom area {:?}", area)));
        }
        if area.right as usize >= grid.width() || area.bottom as usize >= grid.height() {
            return Err(LejaError::InvalidArgument(
                format!("zoom area {:?} is not inside the grid", area)
            ));
        }
        Ok(Some(Zoom { area, factor }))
    }

    // A finer grid covering the zoom area, factor pixels per original pixel
    fn grid(&self, grid : &ComplexGrid) -> Result<ComplexGrid> {
        let corner = |x : u32, y : u32| grid.get(x as usize, y as usize).copied().ok_or_else(
            || LejaError::InvalidArgument(format!("({}, {}) is not on the grid", x, y))
        );
        let top_left = corner(self.area.left, self.area.top)?;
        let bottom_right = corner(self.area.right, self.area.bottom)?;
        let columns = (self.area.right - self.area.left) as usize;
        let rows = (self.area.bottom - self.area.top) as usize;
        let spacing = (bottom_right.re() - top_left.re()) / columns as f64 / self.factor as f64;
        ComplexGrid::from_corner(
            top_left.re(),
            top_left.im(),
            spacing,
            columns * self.factor,
            rows * self.factor
        )
    }
}

// Where the zoomed grid sits on the main grid
fn zoom_outline(zoomed : &ComplexGrid, grid : &ComplexGrid, bounds : Bounds) -> Option<PixelBox> {
    let locator = grid.locator(bounds);
    let (left, top) = locator.locate(&zoomed.top_left())?;
    let (right, bottom) = locator.locate(&zoomed.bottom_right())?;
    let pixel = |v : i64| u32::try_from(v).ok();
    Some(PixelBox {
        left : pixel(left)?,
        right : pixel(right)?,
        top : pixel(top)?,
        bottom : pixel(bottom)?
    })
}

fn seed_point(input : &JsonValue, grid : &ComplexGrid, shape : &Shape) -> Result<Option<Point>> {
    if let (Some(x), Some(y)) = (input["seed_x"].as_usize(), input["seed_y"].as_usize()) {
        let seed = grid.get(x, y).copied().ok_or_else(
            || LejaError::InvalidArgument(format!("seed pixel ({}, {}) is not on the grid", x, y))
        )?;
        return Ok(Some(seed));
    }
    if let Some(random_seed) = input["random_seed"].as_u64() {
        let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(random_seed);
        return Ok(shape.points().choose(&mut rng).copied());
    }
    Ok(None)
}

fn leja_from_json(input : &JsonValue, grid : &ComplexGrid, shape : &Shape) -> Result<LejaPoints> {
    let leja = if let Some(path) = input["load"].as_str() {
        persist::load(Path::new(path))?
    } else {
        let count = input["count"].as_usize().unwrap_or(1000);
        let s = input["s"].as_f64().unwrap_or(1.0 / count as f64);
        let seed = seed_point(input, grid, shape)?;
        info!("Selecting {} leja points out of {} with s = {}", count, shape.len(), s);
        let start = Instant::now();
        let leja = LejaPoints::select(shape, seed, count, s)?;
        info!("Selection took {}", format_elapsed(start.elapsed()));
        leja
    };
    if let Some(path) = input["save"].as_str() {
        persist::save(&leja, Path::new(path))?;
    }
    Ok(leja)
}

struct LejaJulia {
    grid : ComplexGrid,
    shape : Shape,
    leja : LejaPoints,
    method : MethodKind,
    bounds : Bounds,
    zoom : Option<Zoom>
}

impl LejaJulia {
    fn from_json(input : &JsonValue) -> Result<LejaJulia> {
        let size = input["size"].as_usize().unwrap_or(400);
        let grid = ComplexGrid::from_json(&input["grid"], size)?;
        let shape = shape::from_json(&input["shapes"], &grid, size)?;
        let leja = leja_from_json(&input["leja"], &grid, &shape)?;
        let method = MethodKind::from_json(&input["method"])?;
        let bounds = Bounds::from_json(&input["bounds"])?;
        let zoom = Zoom::from_json(&input["zoom"], &grid)?;
        Ok(LejaJulia { grid, shape, leja, method, bounds, zoom })
    }

    fn classify(&self, grid : &ComplexGrid, shape : Option<&Shape>) -> RgbImage {
        let method = self.method.with_shape(shape);
        let classifier = JuliaClassifier::new(self.leja.polynomial());
        info!("Classifying {}x{} grid using {}", grid.width(), grid.height(), method.name());
        let start = Instant::now();
        let labels = classifier.classify_grid(grid, &method);
        info!(
            "Classification took {}, {} of {} points inside the set",
            format_elapsed(start.elapsed()),
            labels.count(Classification::InsideSet),
            grid.width() * grid.height()
        );
        render::julia_image(&labels)
    }

    fn make_images(&self) -> Result<Vec<(String, RgbImage)>> {
        let mut images = Vec::new();
        let zoomed = match &self.zoom {
            Some(zoom) => Some((zoom.factor, zoom.grid(&self.grid)?)),
            None => None
        };
        let outline = zoomed.as_ref().and_then(|(_, zoomed)| {
            let outline = zoom_outline(zoomed, &self.grid, self.bounds);
            if outline.is_none() {
                warn!("Zoom area could not be located on the grid");
            }
            outline
        });
        images.push((
            "original shape".to_string(),
            render::shape_image(&self.shape, &self.grid, outline)
        ));
        images.push(("julia".to_string(), self.classify(&self.grid, Some(&self.shape))));
        if let Some((factor, zoomed)) = zoomed {
            images.push((format!("{}x zoom", factor), self.classify(&zoomed, None)));
        }
        Ok(images)
    }
}

pub fn generate(input : &JsonValue) -> std::io::Result<Vec<(String, RgbImage)>> {
    info!("Generating leja julia set");
    let experiment = LejaJulia::from_json(input)?;
    Ok(experiment.make_images()?)
}
