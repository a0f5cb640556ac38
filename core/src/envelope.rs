//! Unwrapping of the `{ok, error, result}` envelope every response carries.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::endpoint::Method;
use crate::error::TelegraphError;
use crate::http::HttpResponse;

#[derive(Debug, Deserialize)]
pub struct Envelope {
    pub ok: bool,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub result: Option<Value>,
}

/// Turn a raw response into the result type expected for `method`.
///
/// A body that is not an envelope is an `Http` error when the status is not
/// 200, and a `Decode` error otherwise. `ok: false` becomes `Api` with the
/// server's description. A `result` that does not fit `T`, or is missing,
/// is a `Decode` error.
pub fn unwrap<T: DeserializeOwned>(method: Method, response: HttpResponse) -> Result<T, TelegraphError> {
    let envelope: Envelope = match serde_json::from_str(&response.body) {
        Ok(envelope) => envelope,
        Err(_) if response.status != 200 => {
            return Err(TelegraphError::Http {
                status: response.status,
                body: response.body,
            });
        }
        Err(source) => {
            return Err(TelegraphError::Decode {
                method: method.name(),
                payload: response.body,
                source,
            });
        }
    };

    if !envelope.ok {
        let description = envelope.error.unwrap_or_else(|| "UNKNOWN_ERROR".to_string());
        debug!(method = method.name(), error = %description, "api returned error");
        return Err(TelegraphError::Api(description));
    }

    let result = envelope.result.unwrap_or(Value::Null);
    T::deserialize(&result).map_err(|source| {
        debug!(method = method.name(), %source, "result did not match expected shape");
        TelegraphError::Decode {
            method: method.name(),
            payload: result.to_string(),
            source,
        }
    })
}
