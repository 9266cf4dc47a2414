//! The [Google Maps Geocoding](https://developers.google.com/maps/documentation/geocoding/requests-reverse-geocoding)
//! provider: configuration, response types and the request-independent parts of a lookup.
//!
//! The HTTP side lives in [`blocking::google`](crate::blocking) and
//! [`async_impl::google`](crate::async_impl), both built on the functions here.
use crate::{Deserialize, Serialize};
use crate::{Result, ZipCodeError};
use serde::de::DeserializeOwned;
use serde::Deserializer;
use serde_json::Value;
use std::env;

/// The reverse-geocoding endpoint used unless configured otherwise
pub static DEFAULT_ENDPOINT: &str = "https://maps.googleapis.com/maps/api/geocode/json";
/// Stand-in key used when none was provided at build time
pub static PLACEHOLDER_API_KEY: &str = "YOUR_GOOGLE_MAPS_API_KEY";
/// Environment variable holding the API key
pub static API_KEY_VAR: &str = "GOOGLE_MAPS_API_KEY";
/// Environment variable overriding the endpoint
pub static ENDPOINT_VAR: &str = "GOOGLE_MAPS_GEOCODE_ENDPOINT";
/// The address component type carrying the zip code
pub static POSTAL_CODE: &str = "postal_code";

/// Credential and endpoint used to build requests
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GoogleConfig {
    pub api_key: String,
    pub endpoint: String,
}

impl GoogleConfig {
    /// Create a configuration for `api_key` against the default endpoint
    pub fn new(api_key: String) -> Self {
        GoogleConfig {
            api_key,
            endpoint: DEFAULT_ENDPOINT.to_string(),
        }
    }

    /// Read the configuration from the environment at runtime.
    ///
    /// `GOOGLE_MAPS_API_KEY` is required, `GOOGLE_MAPS_GEOCODE_ENDPOINT` optionally
    /// replaces the default endpoint.
    pub fn from_env() -> Result<Self> {
        let api_key = env::var(API_KEY_VAR)
            .ok()
            .filter(|key| !key.is_empty())
            .ok_or(ZipCodeError::MissingApiKey(API_KEY_VAR))?;
        let config = GoogleConfig::new(api_key);
        Ok(match env::var(ENDPOINT_VAR) {
            Ok(endpoint) if !endpoint.is_empty() => config.with_endpoint(&endpoint),
            _ => config,
        })
    }

    /// Set a custom endpoint, without query string (i.e. "https://maps.googleapis.com/maps/api/geocode/json")
    pub fn with_endpoint(mut self, endpoint: &str) -> Self {
        self.endpoint = endpoint.to_owned();
        self
    }

    /// Set a custom API key
    pub fn with_api_key(mut self, api_key: &str) -> Self {
        self.api_key = api_key.to_owned();
        self
    }
}

impl Default for GoogleConfig {
    /// The default endpoint with the key baked in at compile time from
    /// `GOOGLE_MAPS_API_KEY`, or the placeholder key if it was unset.
    fn default() -> Self {
        let api_key = option_env!("GOOGLE_MAPS_API_KEY").unwrap_or(PLACEHOLDER_API_KEY);
        GoogleConfig::new(api_key.to_string())
    }
}

// Rust's f64 Display, with -0 printed as 0. Very small or large magnitudes come out
// positional (1e-7 as 0.0000001) where JavaScript's String(n) would use an exponent.
fn format_coordinate(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    value.to_string()
}

/// Build the reverse-geocoding request URL for a latitude / longitude pair.
///
/// Coordinates are passed through unchanged, out-of-range values included.
///
/// # Examples
///
/// ```
/// use geocoding_zipcode::google::{construct_geocoding_url, GoogleConfig};
///
/// let config = GoogleConfig::new("KEY".to_string());
/// assert_eq!(
///     construct_geocoding_url(&config, -23.5489, -46.6388),
///     "https://maps.googleapis.com/maps/api/geocode/json?latlng=-23.5489,-46.6388&key=KEY"
/// );
/// ```
pub fn construct_geocoding_url(config: &GoogleConfig, latitude: f64, longitude: f64) -> String {
    format!(
        "{}?latlng={},{}&key={}",
        config.endpoint,
        format_coordinate(latitude),
        format_coordinate(longitude),
        config.api_key
    )
}

/// Return the first postal code found, walking results and their components in order.
///
/// This is first-match: if several results carry a postal code, the one in the
/// earliest result wins regardless of how specific it is. A first match without a
/// `long_name` counts as not found.
pub fn extract_zip_code(results: &[GeocodingResult]) -> Result<String> {
    results
        .iter()
        .flat_map(|result| result.address_components.iter())
        .find(|component| component.has_type(POSTAL_CODE))
        .and_then(|component| component.long_name.clone())
        .ok_or(ZipCodeError::NotFound)
}

/// Decode a `long_name` sent either as a string or as a bare number.
///
/// Anything else, `null` included, decodes as `None`.
pub fn deserialize_string_or_number<'de, D>(
    deserializer: D,
) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(Some(s)),
        Value::Number(n) => Ok(Some(n.to_string())),
        _ => Ok(None),
    }
}

/// Decode a field, falling back to its default when it is `null` or of another shape
pub fn deserialize_lenient<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(T::deserialize(value).unwrap_or_default())
}

/// Decode a list element by element. Elements of another shape become their default so
/// positions are kept, and anything other than an array becomes an empty list.
pub fn deserialize_lenient_seq<'de, D, T>(deserializer: D) -> std::result::Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => items
            .into_iter()
            .map(|item| T::deserialize(item).unwrap_or_default())
            .collect(),
        _ => Vec::new(),
    })
}

/// The top-level JSON response returned by a reverse-geocoding request
///
/// See [the documentation](https://developers.google.com/maps/documentation/geocoding/requests-reverse-geocoding#reverse-response)
/// for more details. Only the fields below are read, everything else is ignored.
/// Decoding is lenient: a missing, `null` or oddly typed field takes its default
/// instead of failing the whole response.
///
///```json
/// {
///   "results": [
///     {
///       "address_components": [
///         {
///           "long_name": "Praça da Sé",
///           "short_name": "Praça da Sé",
///           "types": ["route"]
///         },
///         {
///           "long_name": "São Paulo",
///           "short_name": "São Paulo",
///           "types": ["administrative_area_level_2", "political"]
///         },
///         {
///           "long_name": "01007-040",
///           "short_name": "01007-040",
///           "types": ["postal_code"]
///         }
///       ],
///       "formatted_address": "Praça da Sé - Sé, São Paulo - SP, 01007-040, Brazil",
///       "place_id": "ChIJ5Xz1B6tZzpQRbgyzMdQ3VjM",
///       "types": ["street_address"]
///     }
///   ],
///   "status": "OK"
/// }
///```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GeocodingResponse {
    #[serde(default, deserialize_with = "deserialize_lenient_seq")]
    pub results: Vec<GeocodingResult>,
    #[serde(default, deserialize_with = "deserialize_lenient")]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "deserialize_lenient")]
    pub error_message: Option<String>,
}

impl GeocodingResponse {
    /// `false` when the provider reported a status other than `OK` or `ZERO_RESULTS`
    pub fn is_ok(&self) -> bool {
        match self.status.as_deref() {
            None | Some("OK") | Some("ZERO_RESULTS") => true,
            Some(_) => false,
        }
    }
}

/// A reverse geocoding result
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GeocodingResult {
    #[serde(default, deserialize_with = "deserialize_lenient_seq")]
    pub address_components: Vec<AddressComponent>,
    #[serde(default, deserialize_with = "deserialize_lenient")]
    pub formatted_address: Option<String>,
    #[serde(default, deserialize_with = "deserialize_lenient")]
    pub place_id: Option<String>,
    #[serde(default, deserialize_with = "deserialize_lenient_seq")]
    pub types: Vec<String>,
}

/// One component of a result address, e.g. a route, a city or a postal code
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AddressComponent {
    #[serde(default, deserialize_with = "deserialize_string_or_number")]
    pub long_name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_lenient")]
    pub short_name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_lenient_seq")]
    pub types: Vec<String>,
}

impl AddressComponent {
    pub fn has_type(&self, kind: &str) -> bool {
        self.types.iter().any(|t| t == kind)
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use serde_json::{json, Value};
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::thread;

    /// Serve `response` verbatim to the first connection and return the endpoint URL
    pub fn serve_once(response: String) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        thread::spawn(move || {
            if let Ok((mut stream, _)) = listener.accept() {
                let mut buf = [0u8; 8192];
                let _ = stream.read(&mut buf);
                let _ = stream.write_all(response.as_bytes());
                let _ = stream.flush();
            }
        });
        format!("http://{}/json", addr)
    }

    /// Debug text of `err` followed by the display text of every source
    pub fn error_text(err: &(dyn std::error::Error + 'static)) -> String {
        let mut text = format!("{:?}", err);
        let mut source = err.source();
        while let Some(cause) = source {
            text.push_str(" / ");
            text.push_str(&cause.to_string());
            source = cause.source();
        }
        text
    }

    pub fn http_response(status: &str, content_type: &str, body: &str) -> String {
        format!(
            "HTTP/1.1 {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            content_type,
            body.len(),
            body
        )
    }

    /// A valid postal code behind components and results of unexpected shapes
    pub fn irregular() -> Value {
        json!({
            "results": [
                { "types": null, "place_id": 5 },
                {
                    "address_components": [
                        { "types": ["locality"] },
                        { "long_name": "01007040", "types": ["postal_code"] }
                    ]
                }
            ],
            "status": "OK"
        })
    }

    pub fn sao_paulo() -> Value {
        json!({
            "results": [
                {
                    "address_components": [
                        {
                            "long_name": "01007040",
                            "types": ["postal_code"]
                        }
                    ]
                }
            ],
            "status": "OK"
        })
    }

    pub fn locality_only() -> Value {
        json!({
            "results": [
                {
                    "address_components": [
                        {
                            "long_name": "São Paulo",
                            "types": ["locality"]
                        }
                    ]
                }
            ]
        })
    }
}
