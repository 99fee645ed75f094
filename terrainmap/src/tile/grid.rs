//! Per-tile sample grid and geographic extent.

use serde::{Deserialize, Serialize};

/// Elevation written for a pixel whose lookup failed.
///
/// Also recorded as the raster nodata value so GIS tools exclude these pixels
/// from statistics and resampling.
pub const NO_DATA_ELEVATION: f32 = -9999.0;

/// One pixel of a processed tile.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElevationSample {
    pub longitude: f64,
    pub latitude: f64,
    /// Metres, or [`NO_DATA_ELEVATION`].
    pub elevation: f32,
}

impl ElevationSample {
    pub fn is_nodata(&self) -> bool {
        self.elevation == NO_DATA_ELEVATION
    }
}

/// Fixed-size, row-major grid of samples for one tile.
///
/// Sample `(x, y)` lives at index `x + y * width`, the same order the pixels
/// were queried in, so reshaping into a raster band is lossless.
#[derive(Debug, Clone, PartialEq)]
pub struct ElevationGrid {
    width: u32,
    height: u32,
    samples: Vec<ElevationSample>,
    nodata_count: usize,
}

impl ElevationGrid {
    /// Builds a grid by calling `f(x, y)` for every cell in row-major order.
    pub fn from_fn(width: u32, height: u32, mut f: impl FnMut(u32, u32) -> ElevationSample) -> Self {
        let mut samples = Vec::with_capacity(width as usize * height as usize);
        let mut nodata_count = 0;
        for y in 0..height {
            for x in 0..width {
                let sample = f(x, y);
                if sample.is_nodata() {
                    nodata_count += 1;
                }
                samples.push(sample);
            }
        }
        Self {
            width,
            height,
            samples,
            nodata_count,
        }
    }

    /// Wraps row-major samples.
    ///
    /// Returns `None` if `samples.len() != width * height`.
    pub fn from_samples(width: u32, height: u32, samples: Vec<ElevationSample>) -> Option<Self> {
        if samples.len() != (width as usize) * (height as usize) {
            return None;
        }
        let nodata_count = samples.iter().filter(|s| s.is_nodata()).count();
        Some(Self {
            width,
            height,
            samples,
            nodata_count,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Number of samples carrying [`NO_DATA_ELEVATION`].
    pub fn nodata_count(&self) -> usize {
        self.nodata_count
    }

    #[inline]
    pub fn index(&self, x: u32, y: u32) -> usize {
        x as usize + y as usize * self.width as usize
    }

    pub fn get(&self, x: u32, y: u32) -> Option<&ElevationSample> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.samples.get(self.index(x, y))
    }

    pub fn samples(&self) -> &[ElevationSample] {
        &self.samples
    }

    /// Elevation band in row-major order.
    pub fn elevations(&self) -> Vec<f32> {
        self.samples.iter().map(|s| s.elevation).collect()
    }

    /// Lowest and highest valid elevation, ignoring nodata.
    pub fn elevation_range(&self) -> Option<(f32, f32)> {
        self.samples
            .iter()
            .filter(|s| !s.is_nodata())
            .map(|s| s.elevation)
            .fold(None, |acc, e| match acc {
                None => Some((e, e)),
                Some((lo, hi)) => Some((lo.min(e), hi.max(e))),
            })
    }
}

/// Geographic box covered by a tile's pixel grid, in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TileExtent {
    pub min_lng: f64,
    pub min_lat: f64,
    pub max_lng: f64,
    pub max_lat: f64,
}

impl TileExtent {
    pub fn width(&self) -> f64 {
        self.max_lng - self.min_lng
    }

    pub fn height(&self) -> f64 {
        self.max_lat - self.min_lat
    }

    pub fn contains(&self, latitude: f64, longitude: f64) -> bool {
        (self.min_lat..=self.max_lat).contains(&latitude)
            && (self.min_lng..=self.max_lng).contains(&longitude)
    }
}
