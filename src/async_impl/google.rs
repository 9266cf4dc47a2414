use crate::async_impl::{HttpGet, ZipCode};
use crate::google::{construct_geocoding_url, extract_zip_code};
use crate::google::{GeocodingResponse, GeocodingResult, GoogleConfig};
use crate::{default_headers, Point, Result, ZipCodeError};
use async_trait::async_trait;
use log::{debug, error, warn};
use num_traits::Float;

/// An instance of the Google Maps geocoding service
pub struct GoogleMaps<C = reqwest::Client> {
    client: C,
    config: GoogleConfig,
}

impl GoogleMaps {
    /// Create a new Google Maps geocoding instance using the default endpoint
    pub fn new(api_key: String) -> Self {
        GoogleMaps::with_config(GoogleConfig::new(api_key))
    }

    /// Create a new Google Maps geocoding instance from a full configuration
    pub fn with_config(config: GoogleConfig) -> Self {
        let client = reqwest::Client::builder()
            .default_headers(default_headers())
            .build()
            .expect("Couldn't build a client!");
        GoogleMaps { client, config }
    }
}

impl Default for GoogleMaps {
    fn default() -> Self {
        GoogleMaps::with_config(GoogleConfig::default())
    }
}

impl<C> GoogleMaps<C>
where
    C: HttpGet,
{
    /// Create an instance issuing its requests through `client`
    pub fn with_client(client: C, config: GoogleConfig) -> Self {
        GoogleMaps { client, config }
    }

    /// The configuration requests are built from
    pub fn config(&self) -> &GoogleConfig {
        &self.config
    }

    /// Build the request URL for a coordinate. See [`construct_geocoding_url`].
    pub fn construct_url(&self, latitude: f64, longitude: f64) -> String {
        construct_geocoding_url(&self.config, latitude, longitude)
    }

    /// Fetch and decode the full response for `url`
    pub async fn fetch_full(&self, url: &str) -> Result<GeocodingResponse> {
        let res = match self.client.get_json(url).await {
            Ok(body) => serde_json::from_value::<GeocodingResponse>(body).map_err(Into::into),
            Err(err) => Err(err),
        }
        .map_err(|err| {
            error!("Error fetching geocoding data: {}", err);
            ZipCodeError::Fetch(err)
        })?;
        if !res.is_ok() {
            warn!(
                "Geocoding provider answered with status {:?}: {}",
                res.status,
                res.error_message.as_deref().unwrap_or("no error message")
            );
        }
        debug!("Received {} geocoding results", res.results.len());
        Ok(res)
    }

    /// Fetch the `results` list for `url`, in the order the provider returned it
    pub async fn fetch_geocoding_data(&self, url: &str) -> Result<Vec<GeocodingResult>> {
        Ok(self.fetch_full(url).await?.results)
    }

    /// Resolve a latitude / longitude pair to a zip code.
    ///
    /// Every failure is reported as [`ZipCodeError::Resolution`], with the fetch or
    /// not-found error as its source.
    pub async fn get_zip_code(&self, latitude: f64, longitude: f64) -> Result<String> {
        let url = self.construct_url(latitude, longitude);
        debug!("Looking up zip code for {},{}", latitude, longitude);

        let zip = match self.fetch_geocoding_data(&url).await {
            Ok(results) => extract_zip_code(&results),
            Err(err) => Err(err),
        };
        zip.map_err(|err| {
            error!("Error fetching zip code: {}", err);
            ZipCodeError::resolution(err)
        })
    }
}

#[async_trait(?Send)]
impl<C, T> ZipCode<T> for GoogleMaps<C>
where
    C: HttpGet,
    T: Float + Into<f64> + Send,
{
    /// A reverse lookup of a point. Google expects `latlng`, so `y` goes first.
    async fn zip_code(&self, point: &Point<T>) -> Result<String> {
        self.get_zip_code(point.y().into(), point.x().into()).await
    }
}

/// Resolve a latitude / longitude pair with the default configuration
pub async fn get_zip_code(latitude: f64, longitude: f64) -> Result<String> {
    GoogleMaps::default().get_zip_code(latitude, longitude).await
}
