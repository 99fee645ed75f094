//! Affine pixel-to-world transform and spatial reference.

use std::fmt;

use crate::tile::TileExtent;

/// Coordinate reference system of an output raster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SpatialRef {
    /// WGS 84 geographic, degrees.
    #[default]
    Wgs84,
}

impl SpatialRef {
    pub fn epsg(&self) -> u16 {
        match self {
            SpatialRef::Wgs84 => 4326,
        }
    }
}

impl fmt::Display for SpatialRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EPSG:{}", self.epsg())
    }
}

/// Six-coefficient affine transform in GDAL order:
///
/// ```text
/// lng = c[0] + px·c[1] + py·c[2]
/// lat = c[3] + px·c[4] + py·c[5]
/// ```
///
/// Rasters built here are north-up, so `c[2]` and `c[4]` are zero and `c[5]`
/// is negative.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geotransform([f64; 6]);

impl Geotransform {
    /// North-up transform whose origin is the extent's north-west corner.
    pub fn from_extent(extent: &TileExtent, width: u32, height: u32) -> Self {
        let pixel_width = extent.width() / width as f64;
        let pixel_height = extent.height() / height as f64;
        Self([
            extent.min_lng,
            pixel_width,
            0.0,
            extent.max_lat,
            0.0,
            -pixel_height,
        ])
    }

    pub fn coefficients(&self) -> [f64; 6] {
        self.0
    }

    /// Maps a pixel position (edges at integers) to `(lng, lat)`.
    pub fn apply(&self, px: f64, py: f64) -> (f64, f64) {
        let c = &self.0;
        (
            c[0] + px * c[1] + py * c[2],
            c[3] + px * c[4] + py * c[5],
        )
    }

    /// World position of the top-left corner.
    pub fn origin(&self) -> (f64, f64) {
        (self.0[0], self.0[3])
    }

    /// Absolute pixel size `(width, height)` in degrees.
    pub fn pixel_size(&self) -> (f64, f64) {
        (self.0[1].abs(), self.0[5].abs())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn extent() -> TileExtent {
        TileExtent {
            min_lng: 8.4375,
            min_lat: 46.55886,
            max_lng: 8.7890625,
            max_lat: 46.80005,
        }
    }

    #[test]
    fn test_from_extent_coefficients() {
        let gt = Geotransform::from_extent(&extent(), 256, 256);
        let c = gt.coefficients();

        assert_relative_eq!(c[0], 8.4375);
        assert_relative_eq!(c[1], 0.3515625 / 256.0);
        assert_eq!(c[2], 0.0);
        assert_relative_eq!(c[3], 46.80005);
        assert_eq!(c[4], 0.0);
        assert_relative_eq!(c[5], -(46.80005 - 46.55886) / 256.0, epsilon = 1e-15);
    }

    #[test]
    fn test_apply_corners() {
        let gt = Geotransform::from_extent(&extent(), 256, 256);

        let (lng, lat) = gt.apply(0.0, 0.0);
        assert_relative_eq!(lng, 8.4375);
        assert_relative_eq!(lat, 46.80005);

        let (lng, lat) = gt.apply(256.0, 256.0);
        assert_relative_eq!(lng, 8.7890625, epsilon = 1e-12);
        assert_relative_eq!(lat, 46.55886, epsilon = 1e-12);
    }

    #[test]
    fn test_pixel_size_is_positive() {
        let gt = Geotransform::from_extent(&extent(), 256, 256);
        let (w, h) = gt.pixel_size();
        assert!(w > 0.0 && h > 0.0);
        assert_eq!(gt.origin(), (8.4375, 46.80005));
    }

    #[test]
    fn test_spatial_ref() {
        assert_eq!(SpatialRef::Wgs84.epsg(), 4326);
        assert_eq!(SpatialRef::default().to_string(), "EPSG:4326");
    }
}
