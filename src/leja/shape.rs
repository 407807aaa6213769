// Build shapes out of grid pixels.
//
// Shapes are outlines: either a built in square or the edge of a solid
// black figure on a white bitmap. Pixel positions are offset and then looked
// up in the sample grid so that the shape shares its points with the grid.

use std::path::Path;

use image::imageops::{self, FilterType};
use image::RgbImage;
use json::JsonValue;
use log::{info, warn};

use super::error::{LejaError, Result};
use super::grid::ComplexGrid;
use super::point::Shape;

// Mean channel value at or below which a pixel is part of the figure
const IN_IMAGE_LEVEL : u16 = 127;

fn in_image(img : &RgbImage, x : u32, y : u32) -> bool {
    let [r, g, b] = img.get_pixel(x, y).0;
    (r as u16 + g as u16 + b as u16) / 3 <= IN_IMAGE_LEVEL
}

// Outline of a square covering the middle half of a size x size box
pub fn square_pixels(size : u32) -> Vec<(u32, u32)> {
    let low = size / 4;
    let high = 3 * size / 4;
    let mut pixels = Vec::new();
    for i in low..high {
        pixels.push((i, low));
        pixels.push((i, high));
        pixels.push((low, i));
        pixels.push((high, i));
    }
    pixels
}

// Figure pixels with at least one 4-neighbour outside the figure, plus
// figure pixels on the image border
pub fn edge_pixels(img : &RgbImage) -> Vec<(u32, u32)> {
    let (width, height) = img.dimensions();
    let mut pixels = Vec::new();
    for x in 0..width {
        for y in 0..height {
            if !in_image(img, x, y) {
                continue;
            }
            let on_border = x == 0 || y == 0 || x == width - 1 || y == height - 1;
            let interior = !on_border
                && in_image(img, x - 1, y)
                && in_image(img, x + 1, y)
                && in_image(img, x, y - 1)
                && in_image(img, x, y + 1);
            if !interior {
                pixels.push((x, y));
            }
        }
    }
    pixels
}

pub fn image_pixels(path : &Path, size : u32) -> Result<Vec<(u32, u32)>> {
    let img = image::open(path)?.to_rgb8();
    if img.dimensions() == (size, size) {
        return Ok(edge_pixels(&img));
    }
    let scaled = imageops::resize(&img, size, size, FilterType::Triangle);
    Ok(edge_pixels(&scaled))
}

// Look the offset pixels up in the grid, dropping any that fall off it
pub fn shape_from_pixels(grid : &ComplexGrid, pixels : &[(u32, u32)], offset : (usize, usize)) -> Shape {
    let mut dropped = 0;
    let mut shape = Shape::new();
    for &(x, y) in pixels.iter() {
        match grid.get(x as usize + offset.0, y as usize + offset.1) {
            Some(point) => {
                shape.insert(*point);
            },
            None => dropped += 1
        }
    }
    if dropped > 0 {
        warn!("{} shape pixels fell outside the {}x{} grid", dropped, grid.width(), grid.height());
    }
    shape
}

fn part_from_json(input : &JsonValue, grid : &ComplexGrid, default_size : usize) -> Result<Shape> {
    let size = input["size"].as_u32().unwrap_or(default_size as u32);
    let offset = (
        input["x"].as_usize().unwrap_or(0),
        input["y"].as_usize().unwrap_or(0)
    );
    let pixels = match input["type"].as_str().unwrap_or("none") {
        "square" => square_pixels(size),
        "image" => {
            let path = input["path"].as_str().ok_or_else(
                || LejaError::InvalidArgument("image shape without a path".to_string())
            )?;
            image_pixels(Path::new(path), size)?
        },
        other => return Err(LejaError::InvalidArgument(format!("unknown shape type '{}'", other)))
    };
    Ok(shape_from_pixels(grid, &pixels, offset))
}

// The union of every shape listed in the input
pub fn from_json(input : &JsonValue, grid : &ComplexGrid, default_size : usize) -> Result<Shape> {
    if !input.is_array() || input.is_empty() {
        return Err(LejaError::InvalidArgument("Missing shapes".to_string()));
    }
    let mut shape = Shape::new();
    for part in input.members() {
        shape.extend(&part_from_json(part, grid, default_size)?);
    }
    info!("Shape has {} points", shape.len());
    Ok(shape)
}
