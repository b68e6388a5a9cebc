//! The escape-time engine.  This is the hot loop: every pixel of the
//! raster goes through [`iterate`] exactly once.

use num::Complex;

/// Extra steps taken after the orbit escapes (or the cap is hit), so
/// that the smoothed coloring schemes have a larger final magnitude
/// to work with.
pub const REFINEMENT_STEPS: usize = 4;

/// What the engine learned about one pixel.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct PixelRecord {
    /// How many steps the orbit took before it crossed the escape
    /// radius.  Equal to the iteration cap if it never did.
    pub iterations: u32,
    /// Where the orbit ended up, refinement steps included.
    pub last: Complex<f64>,
}

impl PixelRecord {
    /// True if the point survived every iteration, and so is treated
    /// as part of the set.
    #[inline]
    pub fn is_in_set(&self, max_iterations: u32) -> bool {
        self.iterations == max_iterations
    }
}

/// This is our classic iterator function.  Starting at `z = c`,
/// apply `z = z² + c` until either the orbit's magnitude reaches
/// `escape_radius` or `max_iterations` steps have been taken.  The
/// escape test happens before every step, so a point that starts
/// outside the radius reports zero iterations.
pub fn iterate(c: Complex<f64>, max_iterations: u32, escape_radius: f64) -> PixelRecord {
    let mut z = c;
    let mut iterations = 0;
    while iterations < max_iterations && z.norm_sqr().sqrt() < escape_radius {
        z = z * z + c;
        iterations += 1;
    }
    for _ in 0..REFINEMENT_STEPS {
        z = z * z + c;
    }
    PixelRecord { iterations, last: z }
}
