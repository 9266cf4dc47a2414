pub mod google;

pub use crate::blocking::google::{get_zip_code, GoogleMaps};

use crate::{BoxError, Point, Result};
use num_traits::Float;
use serde_json::Value;

/// Perform an HTTP GET and hand back the decoded JSON body.
///
/// Implemented for `reqwest::blocking::Client`; tests provide their own implementations
/// to stand in for the network. Any transport error, non-success status, or body that
/// isn't JSON must be reported as an error.
pub trait HttpGet {
    fn get_json(&self, url: &str) -> std::result::Result<Value, BoxError>;
}

impl HttpGet for reqwest::blocking::Client {
    fn get_json(&self, url: &str) -> std::result::Result<Value, BoxError> {
        // the URL carries the API key, keep it out of the error text
        let body = self
            .get(url)
            .send()
            .and_then(|resp| resp.error_for_status())
            .and_then(|resp| resp.json::<Value>())
            .map_err(reqwest::Error::without_url)?;
        Ok(body)
    }
}

/// Reverse-geocode a coordinate to a zip code.
///
/// Examples
///
/// ```no_run
/// use geocoding_zipcode::{GoogleMaps, Point};
/// use geocoding_zipcode::blocking::ZipCode;
///
/// let p = Point::new(-46.6388, -23.5489);
/// let google = GoogleMaps::new("YOUR_GOOGLE_MAPS_API_KEY".to_string());
/// let res = google.zip_code(&p).unwrap();
/// assert_eq!(res, "01007-040");
/// ```
pub trait ZipCode<T>
where
    T: Float,
{
    // NOTE TO IMPLEMENTERS: Point coordinates are lon, lat (x, y)
    // Google expects latlng, so they have to be swapped
    fn zip_code(&self, point: &Point<T>) -> Result<String>;
}
