//! ASCII XYZ grid output.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use super::{RasterEncoder, RasterError, RasterTile};

/// Writes a `x,y,z` header followed by one `lng,lat,elevation` line per
/// sample, rows north to south. Coordinates are the positions each value was
/// sampled at, not the affine geotransform.
///
/// Row-major order keeps `y` sorted, which GDAL's XYZ driver requires.
#[derive(Debug, Clone, Copy, Default)]
pub struct XyzEncoder;

impl XyzEncoder {
    pub fn new() -> Self {
        Self
    }

    pub fn write_to<W: Write>(&self, mut writer: W, raster: &RasterTile) -> Result<(), RasterError> {
        writeln!(writer, "x,y,z")?;

        for y in 0..raster.height() {
            for x in 0..raster.width() {
                let (lng, lat) = raster.sample_location(x, y).ok_or_else(|| {
                    RasterError::InvalidRaster(format!("no sample position for pixel ({}, {})", x, y))
                })?;
                let elevation = raster.value(x, y).ok_or_else(|| {
                    RasterError::InvalidRaster(format!("no value for pixel ({}, {})", x, y))
                })?;
                writeln!(writer, "{},{},{}", lng, lat, elevation)?;
            }
        }

        Ok(())
    }
}

impl RasterEncoder for XyzEncoder {
    fn extension(&self) -> &'static str {
        "xyz"
    }

    fn encode(&self, path: &Path, raster: &RasterTile) -> Result<(), RasterError> {
        let mut writer = BufWriter::new(File::create(path)?);
        self.write_to(&mut writer, raster)?;
        writer.flush()?;
        Ok(())
    }
}
