use thiserror::Error;

#[derive(Debug, Error)]
#[error("Invalid geographic coordinates")]
pub struct InvalidGeoPoint;

/// Geographical position in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    lat: f64,
    lng: f64,
}

impl GeoPoint {
    pub const LAT_DEG_MAX: f64 = 90.0;
    pub const LNG_DEG_MAX: f64 = 180.0;

    pub fn try_new(lat: f64, lng: f64) -> Result<Self, InvalidGeoPoint> {
        if !lat.is_finite()
            || !lng.is_finite()
            || lat.abs() > Self::LAT_DEG_MAX
            || lng.abs() > Self::LNG_DEG_MAX
        {
            return Err(InvalidGeoPoint);
        }
        Ok(Self { lat, lng })
    }

    pub const fn lat(&self) -> f64 {
        self.lat
    }

    pub const fn lng(&self) -> f64 {
        self.lng
    }
}
