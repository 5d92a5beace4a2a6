use crate::error::{Result, VerifyError};
use serde::de::DeserializeOwned;

/// Decode a raw JSON body into `T`.
///
/// Fails with [`VerifyError::Decode`] when the body is not JSON or does not
/// fit `T`. Fields `T` does not declare are ignored; optional fields that are
/// absent decode to `None`.
pub fn decode<T: DeserializeOwned>(raw_body: &str) -> Result<T> {
    serde_json::from_str(raw_body).map_err(|source| VerifyError::Decode {
        target: short_type_name::<T>(),
        source,
    })
}

fn short_type_name<T>() -> &'static str {
    let full = std::any::type_name::<T>();
    // Keep generic arguments intact: only strip the path before the outer type.
    let outer = full.split('<').next().unwrap_or(full);
    match outer.rfind("::") {
        Some(idx) => &full[idx + 2..],
        None => full,
    }
}
