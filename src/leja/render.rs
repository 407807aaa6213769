// Turn shapes and classified grids into images

use image::{Rgb, RgbImage};
use imageproc::drawing::draw_hollow_rect_mut;
use imageproc::rect::Rect;

use super::grid::ComplexGrid;
use super::julia::{Classification, ClassificationGrid};
use super::point::Shape;

pub const OUTSIDE_SET : Rgb<u8> = Rgb([0, 0, 255]);
pub const INSIDE_SET : Rgb<u8> = Rgb([255, 0, 0]);
pub const ORIGINAL_SHAPE : Rgb<u8> = Rgb([192, 192, 192]);
pub const LEJA_POINT : Rgb<u8> = Rgb([0, 0, 0]);
pub const AXIS_POINT : Rgb<u8> = Rgb([255, 200, 0]);
pub const ZOOM_AREA : Rgb<u8> = Rgb([0, 255, 0]);
const BACKGROUND : Rgb<u8> = Rgb([255, 255, 255]);

// Pixel box on a grid, inclusive on every side
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PixelBox {
    pub left : u32,
    pub right : u32,
    pub top : u32,
    pub bottom : u32
}

impl PixelBox {
    fn rect(&self) -> Rect {
        Rect::at(self.left as i32, self.top as i32).of_size(
            self.right - self.left + 1,
            self.bottom - self.top + 1
        )
    }
}

pub fn colour(label : Classification) -> Rgb<u8> {
    match label {
        Classification::LejaPoint => LEJA_POINT,
        Classification::OriginalShape => ORIGINAL_SHAPE,
        Classification::OutsideSet => OUTSIDE_SET,
        Classification::InsideSet => INSIDE_SET
    }
}

pub fn julia_image(labels : &ClassificationGrid) -> RgbImage {
    RgbImage::from_fn(labels.width() as u32, labels.height() as u32, |x, y| {
        labels.get(x as usize, y as usize).map_or(BACKGROUND, colour)
    })
}

// The shape over the axes of the plane, with the zoom area outlined if given
pub fn shape_image(shape : &Shape, grid : &ComplexGrid, zoom : Option<PixelBox>) -> RgbImage {
    let mut img = RgbImage::from_fn(grid.width() as u32, grid.height() as u32, |x, y| {
        match grid.get(x as usize, y as usize) {
            Some(z) if shape.contains(z) => ORIGINAL_SHAPE,
            Some(z) if z.re() == 0.0 || z.im() == 0.0 => AXIS_POINT,
            _ => BACKGROUND
        }
    });
    if let Some(area) = zoom {
        draw_hollow_rect_mut(&mut img, area.rect(), ZOOM_AREA);
    }
    img
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::leja::julia::{JuliaClassifier, Method};
    use crate::leja::point::Point;
    use crate::leja::sequence::LejaPoints;

    #[test]
    fn test_shape_image() {
        let grid = ComplexGrid::centred(2.0, 2.0, 5, 5, 0.5, 1).unwrap();
        let shape : Shape = vec![Point::new(0.5, 0.5)].into_iter().collect();
        let img = shape_image(&shape, &grid, None);
        assert_eq!(img.dimensions(), (5, 5));
        assert_eq!(*img.get_pixel(3, 1), ORIGINAL_SHAPE);
        assert_eq!(*img.get_pixel(2, 0), AXIS_POINT);
        assert_eq!(*img.get_pixel(0, 2), AXIS_POINT);
        assert_eq!(*img.get_pixel(0, 0), BACKGROUND);
    }

    #[test]
    fn test_zoom_box_outline() {
        let grid = ComplexGrid::centred(5.0, 5.0, 10, 10, 0.5, 1).unwrap();
        let area = PixelBox { left : 6, right : 8, top : 6, bottom : 8 };
        let img = shape_image(&Shape::new(), &grid, Some(area));
        assert_eq!(*img.get_pixel(6, 6), ZOOM_AREA);
        assert_eq!(*img.get_pixel(8, 7), ZOOM_AREA);
        assert_eq!(*img.get_pixel(7, 8), ZOOM_AREA);
        assert_eq!(*img.get_pixel(7, 7), BACKGROUND);
        assert_eq!(*img.get_pixel(9, 9), BACKGROUND);
    }

    #[test]
    fn test_julia_image_colours() {
        let grid = ComplexGrid::centred(2.0, 2.0, 5, 5, 1.0, 1).unwrap();
        // z -> z^2
        let leja = LejaPoints::from_parts(vec![Point::new(0.0, 0.0)], 1.0, 1.0).unwrap();
        let classifier = JuliaClassifier::new(leja.polynomial());
        let labels = classifier.classify_grid(&grid, &Method::EscapeTime { shape : None });
        let img = julia_image(&labels);
        assert_eq!(*img.get_pixel(2, 2), LEJA_POINT);
        assert_eq!(*img.get_pixel(3, 2), INSIDE_SET);
        assert_eq!(*img.get_pixel(0, 0), OUTSIDE_SET);
    }
}
