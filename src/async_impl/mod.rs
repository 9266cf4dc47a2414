use async_trait::async_trait;
pub use geo_types::{Coordinate, Point};
use num_traits::Float;
use serde_json::Value;

use crate::{BoxError, Result};

pub mod google;

pub use crate::async_impl::google::{get_zip_code, GoogleMaps};

/// Async counterpart of [`blocking::HttpGet`](crate::blocking::HttpGet)
#[async_trait]
pub trait HttpGet {
    async fn get_json(&self, url: &str) -> std::result::Result<Value, BoxError>;
}

async fn fetch_json(client: &reqwest::Client, url: &str) -> reqwest::Result<Value> {
    client
        .get(url)
        .send()
        .await?
        .error_for_status()?
        .json::<Value>()
        .await
}

#[async_trait]
impl HttpGet for reqwest::Client {
    async fn get_json(&self, url: &str) -> std::result::Result<Value, BoxError> {
        // the URL carries the API key, keep it out of the error text
        let body = fetch_json(self, url)
            .await
            .map_err(reqwest::Error::without_url)?;
        Ok(body)
    }
}

#[async_trait(?Send)]
pub trait ZipCode<T>
where
    T: Float + Send,
{
    // NOTE TO IMPLEMENTERS: Point coordinates are lon, lat (x, y)
    // Google expects latlng, so they have to be swapped
    async fn zip_code(&self, point: &Point<T>) -> Result<String>;
}
