#![deny(missing_docs)]
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Mandelbrot renderer
//!
//! The Mandelbrot set is the set of points `c` on the complex plane
//! for which the recurrence `z = z² + c`, started at `z = c`, never
//! runs off to infinity.  In practice we can't iterate forever, so we
//! pick an escape radius and an iteration cap: a point whose orbit
//! crosses the radius has "escaped" after some number of steps, and a
//! point that survives every step is treated as being inside the set.
//!
//! Rendering happens in two passes.  The first maps every pixel of the
//! output raster to a point on the complex plane and records how long
//! that point took to escape (and where its orbit ended up).  The
//! second turns each of those records into a color using one of five
//! schemes, and writes the result out as a plain-text PPM.

extern crate crossbeam;
#[macro_use]
extern crate failure;
extern crate image;
extern crate itertools;
#[macro_use]
extern crate log;
extern crate num;
#[cfg(test)]
extern crate tempfile;

pub mod colorize;
pub mod config;
pub mod errors;
pub mod escape;
pub mod planes;
pub mod render;

pub use colorize::{colorize, ColorScheme};
pub use config::RenderConfig;
pub use errors::Error;
pub use escape::{iterate, PixelRecord};
pub use planes::{map, PlaneBounds, Viewport};
pub use render::Renderer;
