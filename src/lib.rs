//! This crate resolves a coordinate to a postal (zip) code using the
//! [Google Maps Geocoding API](https://developers.google.com/maps/documentation/geocoding/requests-reverse-geocoding).
//!
//! A lookup is a single request/response cycle: a request URL is built from the coordinate
//! and the configured key, one HTTP GET is issued, and the first address component tagged
//! `postal_code` in the response is returned. There are no retries and no caching.
//!
//! Two flavours are available, mirroring each other:
//! - [`blocking`] (feature `blocking`, default), built on `reqwest::blocking`
//! - [`async_impl`] (feature `async`, default), built on the async `reqwest::Client`
//!
//! Both accept any [`HttpGet`](blocking::HttpGet) implementation in place of the
//! `reqwest` client, which is how the lookup is tested without network access.
//!
//! ### Errors
//!
//! `get_zip_code` reports every failure as [`ZipCodeError::Resolution`], whose message is
//! always `"Could not retrieve zip code."`. The underlying fetch or not-found error is kept
//! as its `source()` and can be queried with [`ZipCodeError::is_fetch`] and
//! [`ZipCodeError::is_not_found`].
//!
//! ### A note on Coordinate Order
//! The request URL takes `latitude,longitude`, and so do the `get_zip_code` methods.
//! The [`ZipCode`](blocking::ZipCode) trait instead takes a [`Point`](struct.Point.html)
//! in `[Longitude, Latitude]` (`x, y`) order, like the rest of the georust ecosystem.
//!
//! ### Usage of rustls
//!
//! If you like to use [rustls](https://github.com/ctz/rustls) instead of OpenSSL
//! you can enable the `rustls-tls` feature in your `Cargo.toml`:
//!
//!```toml
//![dependencies]
//!geocoding-zipcode = { version = "*", default-features = false, features = ["blocking", "rustls-tls"] }
//!```

static UA_STRING: &str = "Rust-Geocoding-Zipcode";

pub use geo_types::{Coordinate, Point};
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use serde::{Deserialize, Serialize};

#[cfg(feature = "async")]
pub mod async_impl;
#[cfg(feature = "blocking")]
pub mod blocking;

mod error;
pub use crate::error::{BoxError, Result, ZipCodeError};

// The Google Maps geocoding provider
pub mod google;
pub use crate::google::{
    construct_geocoding_url, extract_zip_code, AddressComponent, GeocodingResponse,
    GeocodingResult, GoogleConfig,
};
#[cfg(feature = "blocking")]
pub use crate::blocking::google::GoogleMaps;

fn default_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(USER_AGENT, HeaderValue::from_static(UA_STRING));
    headers
}
