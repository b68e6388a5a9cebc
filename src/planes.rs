//! Contains the PlaneMapper struct, which describes a relationship
//! between a rectangle on the integral plane with an origin at 0,0,
//! and a rectangle on the complex plane described by its center and
//! its extent.
use num::Complex;

/// Linear interpolation: the value `v`, taken as a position in the
/// interval `[in_min, in_max]`, mapped to the same relative position
/// in `[out_min, out_max]`.  The caller guarantees `in_min != in_max`.
#[inline]
pub fn map(v: f64, in_min: f64, in_max: f64, out_min: f64, out_max: f64) -> f64 {
    (out_max - out_min) / (in_max - in_min) * (v - in_min) + out_min
}

/// The "camera": the rectangle of the complex plane we're looking at,
/// given as a center point and the width and height around it.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Viewport {
    /// Real part of the center.
    pub center_x: f64,
    /// Imaginary part of the center.
    pub center_y: f64,
    /// Extent along the real axis.  Always positive.
    pub width: f64,
    /// Extent along the imaginary axis.  Always positive.
    pub height: f64,
}

impl Viewport {
    /// Builds a viewport, refusing empty or inverted extents.
    pub fn new(center_x: f64, center_y: f64, width: f64, height: f64) -> Option<Viewport> {
        // Written this way round so that NaN is refused too.
        if !(width > 0.0 && height > 0.0) {
            return None;
        }
        Some(Viewport {
            center_x,
            center_y,
            width,
            height,
        })
    }

    /// The corners of the rectangle this viewport describes.
    pub fn bounds(&self) -> PlaneBounds {
        PlaneBounds {
            x_min: self.center_x - self.width / 2.0,
            x_max: self.center_x + self.width / 2.0,
            y_min: self.center_y - self.height / 2.0,
            y_max: self.center_y + self.height / 2.0,
        }
    }
}

/// The same rectangle as a [`Viewport`], described by its edges.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PlaneBounds {
    /// Left edge.
    pub x_min: f64,
    /// Right edge.
    pub x_max: f64,
    /// Bottom edge.
    pub y_min: f64,
    /// Top edge.
    pub y_max: f64,
}

/// Describes the x, y of a pixel in the raster.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Pixel(pub usize, pub usize);

/// Maps pixels of a `width` by `height` raster onto a rectangle of
/// the complex plane.  Pixel column 0 lands on `x_min` and row 0 on
/// `y_min`; the far edges `x_max` and `y_max` belong to the pixel
/// just past the end of the raster.
#[derive(Debug)]
pub struct PlaneMapper {
    /// Raster width, in pixels.
    pub width: usize,
    /// Raster height, in pixels.
    pub height: usize,
    /// The complex rectangle the raster covers.
    pub bounds: PlaneBounds,
}

impl PlaneMapper {
    /// Constructor.  The bounds are fixed for the lifetime of the
    /// mapper.
    pub fn new(width: usize, height: usize, bounds: PlaneBounds) -> PlaneMapper {
        PlaneMapper {
            width,
            height,
            bounds,
        }
    }

    /// The total number of pixels in the raster.
    pub fn len(&self) -> usize {
        self.width * self.height
    }

    /// True if the raster has no pixels at all.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Given the column and row of a pixel, return the point on the
    /// complex plane it samples.
    pub fn pixel_to_point(&self, pixel: &Pixel) -> Complex<f64> {
        Complex::new(
            map(
                pixel.0 as f64,
                0.0,
                self.width as f64,
                self.bounds.x_min,
                self.bounds.x_max,
            ),
            map(
                pixel.1 as f64,
                0.0,
                self.height as f64,
                self.bounds.y_min,
                self.bounds.y_max,
            ),
        )
    }

    /// The linear offset of a pixel in a row-major buffer.
    #[inline]
    pub fn offset(&self, pixel: &Pixel) -> usize {
        pixel.1 * self.width + pixel.0
    }
}
