//! The render orchestrator: runs the escape-time engine over every
//! pixel of the raster, then colors the results and writes them out
//! as a plain-text PPM.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use crossbeam;
use image::{ImageBuffer, Rgb, RgbImage};
use itertools::iproduct;

use colorize::colorize;
use config::RenderConfig;
use errors::Error;
use escape::{iterate, PixelRecord};
use planes::{Pixel, PlaneBounds, PlaneMapper};

/// Owns a configuration, and the plane bounds derived from it, for
/// the length of one render.
pub struct Renderer {
    config: RenderConfig,
    plane: PlaneMapper,
}

impl Renderer {
    /// Fixes the plane bounds for this configuration.
    pub fn new(config: RenderConfig) -> Renderer {
        let plane = PlaneMapper::new(
            config.width as usize,
            config.height as usize,
            config.viewport.bounds(),
        );
        Renderer { config, plane }
    }

    /// The configuration being rendered.
    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// The rectangle of the complex plane being rendered.
    pub fn bounds(&self) -> PlaneBounds {
        self.plane.bounds
    }

    fn allocate(&self) -> Result<Vec<PixelRecord>, Error> {
        let records = self
            .plane
            .width
            .checked_mul(self.plane.height)
            .ok_or(Error::Allocation {
                records: usize::max_value(),
            })?;
        let mut buffer = Vec::new();
        buffer
            .try_reserve_exact(records)
            .map_err(|_| Error::Allocation { records })?;
        buffer.resize(records, PixelRecord::default());
        Ok(buffer)
    }

    /// Fill `band`, a run of whole rows starting at `first_row`.
    fn render_rows(&self, first_row: usize, band: &mut [PixelRecord]) {
        let width = self.plane.width;
        let rows = band.len() / width;
        for (row, column) in iproduct!(0..rows, 0..width) {
            let point = self.plane.pixel_to_point(&Pixel(column, first_row + row));
            band[row * width + column] =
                iterate(point, self.config.max_iterations, self.config.escape_radius);
        }
    }

    /// The single-threaded render: one pass over the raster in scan
    /// order.
    pub fn render_single(&self) -> Result<Vec<PixelRecord>, Error> {
        let mut buffer = self.allocate()?;
        if !self.plane.is_empty() {
            self.render_rows(0, &mut buffer);
        }
        Ok(buffer)
    }

    /// The multi-threaded render.  The raster is cut into `threads`
    /// bands of whole rows and each band is handed to its own scoped
    /// thread, which has the only mutable reference to that part of
    /// the buffer.  The result is identical to [`render_single`].
    ///
    /// [`render_single`]: #method.render_single
    pub fn render(&self, threads: usize) -> Result<Vec<PixelRecord>, Error> {
        let mut buffer = self.allocate()?;
        if self.plane.is_empty() {
            return Ok(buffer);
        }

        let threads = threads.max(1);
        let width = self.plane.width;
        let band_rows = (self.plane.height + threads - 1) / threads;
        info!(
            "rendering {}x{} at {} iterations on {} threads",
            self.plane.width, self.plane.height, self.config.max_iterations, threads
        );

        crossbeam::scope(|spawner| {
            for (index, band) in buffer.chunks_mut(band_rows * width).enumerate() {
                spawner.spawn(move |_| {
                    let first_row = index * band_rows;
                    debug!("rows {}..{}", first_row, first_row + band.len() / width);
                    self.render_rows(first_row, band);
                });
            }
        })
        .map_err(|_| Error::WorkerPanic)?;

        info!("render complete");
        Ok(buffer)
    }

    /// Colors every record, giving a raster in the same row-major
    /// order.
    pub fn paint(&self, records: &[PixelRecord]) -> RgbImage {
        assert!(records.len() == self.plane.len());
        let width = self.plane.width;
        ImageBuffer::from_fn(self.config.width, self.config.height, |x, y| {
            colorize(&records[y as usize * width + x as usize], &self.config)
        })
    }

    /// Writes the records as an ASCII PPM: the `P3` header, two
    /// comment lines giving the iteration cap and the plane bounds,
    /// then one `r g b` line per pixel in scan order.
    pub fn write_ppm<W: Write>(&self, mut out: W, records: &[PixelRecord]) -> Result<(), Error> {
        let image = self.paint(records);
        let b = self.plane.bounds;
        writeln!(out, "P3")?;
        writeln!(out, "{} {}", self.config.width, self.config.height)?;
        writeln!(out, "255")?;
        writeln!(out, "# max iterations = {}", self.config.max_iterations)?;
        writeln!(
            out,
            "# plane [{:.6};{:.6}]x[{:.6};{:.6}]",
            b.x_min, b.x_max, b.y_min, b.y_max
        )?;
        for &Rgb([r, g, b]) in image.pixels() {
            writeln!(out, "{} {} {}", r, g, b)?;
        }
        out.flush()?;
        Ok(())
    }

    /// Writes the records to `<basename>.ppm` and returns that path.
    pub fn save(&self, records: &[PixelRecord]) -> Result<PathBuf, Error> {
        let path = PathBuf::from(format!("{}.ppm", self.config.basename));
        let file = File::create(&path).map_err(|cause| Error::OutputOpen {
            path: path.display().to_string(),
            cause,
        })?;
        self.write_ppm(BufWriter::new(file), records)?;
        info!("wrote {}", path.display());
        Ok(path)
    }
}
