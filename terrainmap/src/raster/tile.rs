//! In-memory single-band raster.

use crate::tile::{TileData, NO_DATA_ELEVATION};

use super::{Geotransform, RasterError, SpatialRef};

/// One georeferenced elevation band, ready to encode.
///
/// Besides the affine geotransform, the raster keeps the coordinates each
/// value was actually sampled at: longitude per column and latitude per row.
/// Tile rows are evenly spaced in Web Mercator, not in latitude, so these
/// differ from what the geotransform gives away from the equator.
#[derive(Debug, Clone, PartialEq)]
pub struct RasterTile {
    width: u32,
    height: u32,
    band: Vec<f32>,
    spatial_ref: SpatialRef,
    geotransform: Geotransform,
    nodata: f32,
    longitudes: Vec<f64>,
    latitudes: Vec<f64>,
}

impl RasterTile {
    /// Creates a raster from a row-major band.
    ///
    /// # Errors
    ///
    /// [`RasterError::InvalidRaster`] if the band length is not
    /// `width * height`.
    pub fn new(
        width: u32,
        height: u32,
        band: Vec<f32>,
        geotransform: Geotransform,
    ) -> Result<Self, RasterError> {
        let expected = width as usize * height as usize;
        if band.len() != expected {
            return Err(RasterError::InvalidRaster(format!(
                "band has {} values, expected {}",
                band.len(),
                expected
            )));
        }

        let longitudes = (0..width)
            .map(|x| geotransform.apply(x as f64 + 0.5, 0.5).0)
            .collect();
        let latitudes = (0..height)
            .map(|y| geotransform.apply(0.5, y as f64 + 0.5).1)
            .collect();

        Ok(Self {
            width,
            height,
            band,
            spatial_ref: SpatialRef::Wgs84,
            geotransform,
            nodata: NO_DATA_ELEVATION,
            longitudes,
            latitudes,
        })
    }

    /// Builds the raster for a processed tile, keeping the sample positions.
    pub fn from_tile_data(data: &TileData) -> Self {
        let grid = &data.grid;
        let (width, height) = (grid.width(), grid.height());
        let samples = grid.samples();

        let longitudes = samples
            .iter()
            .take(width as usize)
            .map(|s| s.longitude)
            .collect();
        let latitudes = samples
            .iter()
            .step_by(width.max(1) as usize)
            .map(|s| s.latitude)
            .collect();

        Self {
            width,
            height,
            band: grid.elevations(),
            spatial_ref: SpatialRef::Wgs84,
            geotransform: Geotransform::from_extent(&data.extent, width, height),
            nodata: NO_DATA_ELEVATION,
            longitudes,
            latitudes,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn band(&self) -> &[f32] {
        &self.band
    }

    pub fn spatial_ref(&self) -> SpatialRef {
        self.spatial_ref
    }

    pub fn geotransform(&self) -> &Geotransform {
        &self.geotransform
    }

    pub fn nodata(&self) -> f32 {
        self.nodata
    }

    /// `(lng, lat)` at which pixel `(x, y)` was sampled.
    pub fn sample_location(&self, x: u32, y: u32) -> Option<(f64, f64)> {
        let lng = self.longitudes.get(x as usize)?;
        let lat = self.latitudes.get(y as usize)?;
        Some((*lng, *lat))
    }

    pub fn value(&self, x: u32, y: u32) -> Option<f32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.band
            .get(x as usize + y as usize * self.width as usize)
            .copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coord::TileCoord;
    use crate::source::ElevationEncoding;
    use crate::tile::testing::{terrain_png, StaticSource};
    use crate::tile::{TileExtent, TileProcessor};

    fn gt() -> Geotransform {
        Geotransform::from_extent(
            &TileExtent {
                min_lng: 0.0,
                min_lat: 0.0,
                max_lng: 1.0,
                max_lat: 1.0,
            },
            2,
            2,
        )
    }

    #[test]
    fn test_new_checks_band_length() {
        assert!(matches!(
            RasterTile::new(2, 2, vec![0.0; 3], gt()),
            Err(RasterError::InvalidRaster(_))
        ));
    }

    #[test]
    fn test_value_lookup() {
        let raster = RasterTile::new(2, 2, vec![1.0, 2.0, 3.0, 4.0], gt()).unwrap();
        assert_eq!(raster.value(1, 0), Some(2.0));
        assert_eq!(raster.value(0, 1), Some(3.0));
        assert_eq!(raster.value(2, 0), None);
        assert_eq!(raster.nodata(), NO_DATA_ELEVATION);
        assert_eq!(raster.spatial_ref().epsg(), 4326);
    }

    #[test]
    fn test_linear_raster_samples_at_pixel_centres() {
        let raster = RasterTile::new(2, 2, vec![0.0; 4], gt()).unwrap();
        assert_eq!(raster.sample_location(0, 0), Some((0.25, 0.75)));
        assert_eq!(raster.sample_location(1, 1), Some((0.75, 0.25)));
        assert_eq!(raster.sample_location(2, 0), None);
    }

    #[test]
    fn test_tile_raster_keeps_mercator_sample_rows() {
        let png = terrain_png(ElevationEncoding::Terrarium, |_, _| Some(1.0));
        let source = StaticSource::new(png, ElevationEncoding::Terrarium);
        let result = TileProcessor::new().process(TileCoord::new(0, 0, 1), &source);
        let data = result.data().unwrap();

        let raster = RasterTile::from_tile_data(data);
        for (x, y) in [(0, 0), (17, 128), (255, 255)] {
            let sample = data.grid.get(x, y).unwrap();
            assert_eq!(
                raster.sample_location(x, y),
                Some((sample.longitude, sample.latitude))
            );
        }

        // Mid-tile row of 0/0/1 sits far north of the linear midpoint
        let (_, lat) = raster.sample_location(0, 128).unwrap();
        let (_, linear_lat) = raster.geotransform().apply(0.5, 128.5);
        assert!(lat - linear_lat > 20.0);
    }
}
