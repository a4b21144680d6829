//! Geographic to pixel projection for a fixed canvas.
//!
//! Latitudes go through the spherical Mercator warp used by web maps
//! (<https://wiki.openstreetmap.org/wiki/Mercator>), longitudes are linear. The
//! bounding box is fitted into the canvas without distortion; the axis with spare room
//! gets a centering offset (the letterbox), which the compositor later masks.

use std::f64::consts::PI;

use crate::data::osm::Bounds;
use crate::errors::{Error, Result};

/// Mercator vertical warp, in degree-like units.
pub fn warp_lat(lat: f64) -> f64 {
    180.0 / PI * (PI / 4.0 + lat * PI / 360.0).tan().ln()
}

/// Inverse of [`warp_lat`].
pub fn unwarp_lat(y: f64) -> f64 {
    180.0 / PI * (2.0 * (y * PI / 180.0).exp().atan() - PI / 2.0)
}

#[derive(Debug, Clone, PartialEq)]
pub struct GeoProjector {
    bounds: Bounds,
    width: f64,
    height: f64,
    x_offset: f64,
    y_offset: f64,
    warped_min_lat: f64,
    warped_max_lat: f64,
}

impl GeoProjector {
    pub fn new(bounds: Bounds, width: f64, height: f64) -> Result<Self> {
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(Error::InvalidCanvas { width, height });
        }

        let warped_min_lat = warp_lat(bounds.min_lat);
        let warped_max_lat = warp_lat(bounds.max_lat);
        let lat_span = warped_max_lat - warped_min_lat;
        let lon_span = bounds.max_lon - bounds.min_lon;

        // Also catches NaN from latitudes outside the Mercator domain.
        if !(lat_span.is_finite() && lon_span.is_finite() && lat_span > 0.0 && lon_span > 0.0) {
            return Err(Error::DegenerateBounds {
                min_lat: bounds.min_lat,
                max_lat: bounds.max_lat,
                min_lon: bounds.min_lon,
                max_lon: bounds.max_lon,
            });
        }

        let mut x_offset = 0.0;
        let mut y_offset = 0.0;
        if lon_span / lat_span >= width / height {
            let content_height = width * lat_span / lon_span;
            y_offset = (height - content_height) / 2.0;
        } else {
            let content_width = height * lon_span / lat_span;
            x_offset = (width - content_width) / 2.0;
        }

        Ok(GeoProjector {
            bounds,
            width,
            height,
            x_offset,
            y_offset,
            warped_min_lat,
            warped_max_lat,
        })
    }

    /// Pixel row of a latitude. North is up, so larger latitudes give smaller rows.
    pub fn project_lat(&self, lat: f64) -> f64 {
        let frac = (warp_lat(lat) - self.warped_min_lat) / self.lat_span();
        let content_height = self.height - 2.0 * self.y_offset;
        self.y_offset + (1.0 - frac) * content_height
    }

    /// Pixel column of a longitude.
    pub fn project_lon(&self, lon: f64) -> f64 {
        let frac = (lon - self.bounds.min_lon) / (self.bounds.max_lon - self.bounds.min_lon);
        let content_width = self.width - 2.0 * self.x_offset;
        self.x_offset + frac * content_width
    }

    /// Returns `(x, y)` for a `(lat, lon)` pair.
    pub fn project(&self, lat: f64, lon: f64) -> (f64, f64) {
        (self.project_lon(lon), self.project_lat(lat))
    }

    /// Inverse of [`GeoProjector::project`], returns `(lat, lon)`.
    pub fn unproject(&self, x: f64, y: f64) -> (f64, f64) {
        let content_width = self.width - 2.0 * self.x_offset;
        let content_height = self.height - 2.0 * self.y_offset;

        let lon_frac = (x - self.x_offset) / content_width;
        let lon = self.bounds.min_lon + lon_frac * (self.bounds.max_lon - self.bounds.min_lon);

        let lat_frac = 1.0 - (y - self.y_offset) / content_height;
        let lat = unwarp_lat(self.warped_min_lat + lat_frac * self.lat_span());

        (lat, lon)
    }

    fn lat_span(&self) -> f64 {
        self.warped_max_lat - self.warped_min_lat
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn x_offset(&self) -> f64 {
        self.x_offset
    }

    pub fn y_offset(&self) -> f64 {
        self.y_offset
    }

    /// Canvas size without the letterbox bands.
    pub fn content_size(&self) -> (f64, f64) {
        (
            self.width - 2.0 * self.x_offset,
            self.height - 2.0 * self.y_offset,
        )
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use assert_matches::assert_matches;

    use super::*;

    fn bounds(min_lat: f64, max_lat: f64, min_lon: f64, max_lon: f64) -> Bounds {
        Bounds {
            min_lat,
            max_lat,
            min_lon,
            max_lon,
        }
    }

    #[test]
    fn corners_land_on_content_edges() {
        let cases = [
            (bounds(51.50, 51.52, -0.14, -0.10), 800.0, 600.0),
            (bounds(51.50, 51.60, -0.14, -0.13), 800.0, 600.0),
            (bounds(-33.9, -33.8, 151.1, 151.3), 300.0, 900.0),
            (bounds(0.0, 1.0, 0.0, 1.0), 100.0, 100.0),
        ];

        for (b, width, height) in cases {
            let projector = GeoProjector::new(b, width, height).unwrap();
            let (xo, yo) = (projector.x_offset(), projector.y_offset());

            assert_abs_diff_eq!(projector.project_lon(b.min_lon), xo, epsilon = 1e-9);
            assert_abs_diff_eq!(projector.project_lon(b.max_lon), width - xo, epsilon = 1e-9);
            assert_abs_diff_eq!(projector.project_lat(b.max_lat), yo, epsilon = 1e-9);
            assert_abs_diff_eq!(projector.project_lat(b.min_lat), height - yo, epsilon = 1e-9);
        }
    }

    #[test]
    fn wide_box_is_letterboxed_vertically() {
        let projector = GeoProjector::new(bounds(51.50, 51.51, -0.2, 0.0), 500.0, 500.0).unwrap();

        assert_eq!(projector.x_offset(), 0.0);
        assert!(projector.y_offset() > 0.0);
    }

    #[test]
    fn tall_box_is_letterboxed_horizontally() {
        let projector = GeoProjector::new(bounds(51.0, 52.0, -0.01, 0.0), 500.0, 500.0).unwrap();

        assert_eq!(projector.y_offset(), 0.0);
        assert!(projector.x_offset() > 0.0);
    }

    #[test]
    fn matching_aspect_has_no_letterbox() {
        let b = bounds(10.0, 11.0, 20.0, 21.0);
        let lat_span = warp_lat(11.0) - warp_lat(10.0);
        let height = 400.0 * lat_span;
        let projector = GeoProjector::new(b, 400.0, height).unwrap();

        assert_abs_diff_eq!(projector.x_offset(), 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(projector.y_offset(), 0.0, epsilon = 1e-9);
    }

    #[test]
    fn project_there_and_back() {
        let projector =
            GeoProjector::new(bounds(52.20, 52.30, 20.90, 21.10), 1024.0, 768.0).unwrap();
        let (lat, lon) = (52.26470, 21.00027);

        let (x, y) = projector.project(lat, lon);
        let (back_lat, back_lon) = projector.unproject(x, y);

        assert_abs_diff_eq!(back_lat, lat, epsilon = 1e-9);
        assert_abs_diff_eq!(back_lon, lon, epsilon = 1e-9);
    }

    #[test]
    fn northern_bands_are_stretched() {
        let projector = GeoProjector::new(bounds(0.0, 80.0, 0.0, 80.0), 1000.0, 1000.0).unwrap();

        let equator_band = projector.project_lat(0.0) - projector.project_lat(10.0);
        let polar_band = projector.project_lat(70.0) - projector.project_lat(80.0);

        assert!(polar_band > 2.0 * equator_band);
    }

    #[test]
    fn zero_span_is_rejected() {
        assert_matches!(
            GeoProjector::new(bounds(1.0, 1.0, 0.0, 1.0), 100.0, 100.0),
            Err(Error::DegenerateBounds { .. })
        );
        assert_matches!(
            GeoProjector::new(bounds(0.0, 1.0, 2.0, 2.0), 100.0, 100.0),
            Err(Error::DegenerateBounds { .. })
        );
    }

    #[test]
    fn empty_canvas_is_rejected() {
        assert_matches!(
            GeoProjector::new(bounds(0.0, 1.0, 0.0, 1.0), 0.0, 100.0),
            Err(Error::InvalidCanvas { .. })
        );
    }

    #[test]
    fn mercator_warp_round_trips() {
        for lat in [-80.0, -45.5, 0.0, 12.25, 60.0, 84.9] {
            assert_abs_diff_eq!(unwarp_lat(warp_lat(lat)), lat, epsilon = 1e-9);
        }
    }
}
