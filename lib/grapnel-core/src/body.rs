//! JSON body encoding and decoding.
//!
//! The pipeline speaks JSON on both sides of the wire. [`to_json`] encodes
//! plan parameters into request bodies; [`from_json`] decodes response
//! bodies, keeping the JSON path to whatever field refused to parse.

use bytes::Bytes;

use crate::Result;

/// Serialize a value to JSON bytes.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
///
/// # Example
///
/// ```
/// use grapnel_core::to_json;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Reading { sensor: String, celsius: f32 }
///
/// let reading = Reading { sensor: "attic".to_string(), celsius: 21.5 };
/// let bytes = to_json(&reading).expect("serialize");
/// assert_eq!(bytes.as_ref(), br#"{"sensor":"attic","celsius":21.5}"#);
/// ```
pub fn to_json<T: serde::Serialize>(value: &T) -> Result<Bytes> {
    serde_json::to_vec(value)
        .map(Bytes::from)
        .map_err(Into::into)
}

/// Deserialize JSON bytes, reporting the path to any failing field.
///
/// Plain `serde_json` errors only carry line and column, which is useless
/// for a body that arrived over the wire. Routing deserialization through
/// `serde_path_to_error` names the field instead (e.g. `readings[2].celsius`).
///
/// # Errors
///
/// Returns [`Error::Decode`](crate::Error::Decode) when the bytes are not
/// valid JSON or do not match `T`, carrying the JSON path to the failure.
///
/// # Example
///
/// ```
/// use grapnel_core::from_json;
/// use serde::Deserialize;
///
/// #[derive(Debug, Deserialize)]
/// struct Reading { sensor: String, celsius: f32 }
///
/// let reading: Reading =
///     from_json(br#"{"sensor":"attic","celsius":21.5}"#).expect("deserialize");
/// assert_eq!(reading.sensor, "attic");
/// ```
pub fn from_json<T: serde::de::DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    let mut deserializer = serde_json::Deserializer::from_slice(bytes);
    serde_path_to_error::deserialize(&mut deserializer)
        .map_err(|err| crate::Error::decode(err.path().to_string(), err.inner().to_string()))
}
