//! Single-band float GeoTIFF output.

use std::fs::File;
use std::io::{BufWriter, Seek, Write};
use std::path::Path;

use tiff::encoder::colortype::Gray32Float;
use tiff::encoder::{DirectoryEncoder, TiffEncoder, TiffKind};
use tiff::tags::Tag;

use super::{RasterEncoder, RasterError, RasterTile};

pub(crate) const MODEL_PIXEL_SCALE_TAG: u16 = 33550;
pub(crate) const MODEL_TIEPOINT_TAG: u16 = 33922;
pub(crate) const GEO_KEY_DIRECTORY_TAG: u16 = 34735;
pub(crate) const GDAL_NODATA_TAG: u16 = 42113;

// GeoKey ids and values
const GT_MODEL_TYPE_GEO_KEY: u16 = 1024;
const GT_RASTER_TYPE_GEO_KEY: u16 = 1025;
const GEOGRAPHIC_TYPE_GEO_KEY: u16 = 2048;
const MODEL_TYPE_GEOGRAPHIC: u16 = 2;
const RASTER_PIXEL_IS_AREA: u16 = 1;

/// Writes a [`RasterTile`] as an uncompressed 32-bit float GeoTIFF.
#[derive(Debug, Clone, Copy, Default)]
pub struct GeoTiffEncoder;

impl GeoTiffEncoder {
    pub fn new() -> Self {
        Self
    }

    /// Encodes into any seekable writer.
    pub fn write_to<W: Write + Seek>(&self, writer: W, raster: &RasterTile) -> Result<(), RasterError> {
        let mut encoder = TiffEncoder::new(writer)?;
        let mut image = encoder.new_image::<Gray32Float>(raster.width(), raster.height())?;
        write_geo_tags(image.encoder(), raster)?;
        image.write_data(raster.band())?;
        Ok(())
    }
}

impl RasterEncoder for GeoTiffEncoder {
    fn extension(&self) -> &'static str {
        "tif"
    }

    fn encode(&self, path: &Path, raster: &RasterTile) -> Result<(), RasterError> {
        let mut writer = BufWriter::new(File::create(path)?);
        self.write_to(&mut writer, raster)?;
        writer.flush()?;
        Ok(())
    }
}

fn write_geo_tags<W: Write + Seek, K: TiffKind>(
    dir: &mut DirectoryEncoder<'_, W, K>,
    raster: &RasterTile,
) -> Result<(), RasterError> {
    let (scale_x, scale_y) = raster.geotransform().pixel_size();
    let (origin_x, origin_y) = raster.geotransform().origin();

    let pixel_scale = [scale_x, scale_y, 0.0];
    dir.write_tag(Tag::Unknown(MODEL_PIXEL_SCALE_TAG), pixel_scale.as_slice())?;

    // Pixel (0, 0) is tied to the north-west corner
    let tiepoint = [0.0, 0.0, 0.0, origin_x, origin_y, 0.0];
    dir.write_tag(Tag::Unknown(MODEL_TIEPOINT_TAG), tiepoint.as_slice())?;

    let geokeys = geo_key_directory(raster);
    dir.write_tag(Tag::Unknown(GEO_KEY_DIRECTORY_TAG), geokeys.as_slice())?;

    let nodata = format!("{}", raster.nodata());
    dir.write_tag(Tag::Unknown(GDAL_NODATA_TAG), nodata.as_str())?;

    Ok(())
}

fn geo_key_directory(raster: &RasterTile) -> Vec<u16> {
    // Header: version, revision, minor revision, key count
    let mut keys = vec![1, 1, 0, 3];
    keys.extend_from_slice(&[GT_MODEL_TYPE_GEO_KEY, 0, 1, MODEL_TYPE_GEOGRAPHIC]);
    keys.extend_from_slice(&[GT_RASTER_TYPE_GEO_KEY, 0, 1, RASTER_PIXEL_IS_AREA]);
    keys.extend_from_slice(&[GEOGRAPHIC_TYPE_GEO_KEY, 0, 1, raster.spatial_ref().epsg()]);
    keys
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::Geotransform;
    use crate::tile::{TileExtent, NO_DATA_ELEVATION};
    use approx::assert_relative_eq;
    use std::io::Cursor;
    use tiff::decoder::{Decoder, DecodingResult};

    fn raster() -> RasterTile {
        let extent = TileExtent {
            min_lng: 7.03125,
            min_lat: 46.07323,
            max_lng: 7.3828125,
            max_lat: 46.31658,
        };
        let mut band: Vec<f32> = (0..256 * 256).map(|i| (i % 4000) as f32).collect();
        band[1] = NO_DATA_ELEVATION;
        RasterTile::new(256, 256, band, Geotransform::from_extent(&extent, 256, 256)).unwrap()
    }

    fn encode(raster: &RasterTile) -> Vec<u8> {
        let mut buf = Cursor::new(Vec::new());
        GeoTiffEncoder::new().write_to(&mut buf, raster).unwrap();
        buf.into_inner()
    }

    #[test]
    fn test_readback_dimensions_and_band() {
        let raster = raster();
        let mut decoder = Decoder::new(Cursor::new(encode(&raster))).unwrap();

        assert_eq!(decoder.dimensions().unwrap(), (256, 256));
        match decoder.read_image().unwrap() {
            DecodingResult::F32(values) => {
                assert_eq!(values.len(), 65536);
                assert_eq!(values[0], 0.0);
                assert_eq!(values[1], NO_DATA_ELEVATION);
                assert_eq!(values[300], 300.0);
            }
            other => panic!("unexpected sample type: {:?}", std::mem::discriminant(&other)),
        }
    }

    #[test]
    fn test_readback_georeferencing() {
        let raster = raster();
        let mut decoder = Decoder::new(Cursor::new(encode(&raster))).unwrap();

        let tiepoint = decoder
            .get_tag_f64_vec(Tag::from_u16_exhaustive(MODEL_TIEPOINT_TAG))
            .unwrap();
        assert_eq!(tiepoint.len(), 6);
        assert_relative_eq!(tiepoint[3], 7.03125);
        assert_relative_eq!(tiepoint[4], 46.31658);

        let scale = decoder
            .get_tag_f64_vec(Tag::from_u16_exhaustive(MODEL_PIXEL_SCALE_TAG))
            .unwrap();
        let (w, h) = raster.geotransform().pixel_size();
        assert_relative_eq!(scale[0], w);
        assert_relative_eq!(scale[1], h);

        let keys = decoder
            .get_tag_u16_vec(Tag::from_u16_exhaustive(GEO_KEY_DIRECTORY_TAG))
            .unwrap();
        assert_eq!(keys[3], 3);
        assert_eq!(keys[keys.len() - 1], 4326);

        let nodata = decoder
            .get_tag_ascii_string(Tag::from_u16_exhaustive(GDAL_NODATA_TAG))
            .unwrap();
        assert_eq!(nodata.trim_end_matches('\0').parse::<f32>().unwrap(), NO_DATA_ELEVATION);
    }

    #[test]
    fn test_encode_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("10_536_358.tif");

        GeoTiffEncoder::new().encode(&path, &raster()).unwrap();
        assert!(std::fs::metadata(&path).unwrap().len() > 256 * 256 * 4);
    }

    #[test]
    fn test_encode_into_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("tile.tif");
        assert!(matches!(
            GeoTiffEncoder::new().encode(&path, &raster()),
            Err(RasterError::Io(_))
        ));
    }
}
