use crate::error::{
    InvalidStudentIdSnafu, MalformedFieldSnafu, ReadBodySnafu, RosterError, UnreadableStudentIdSnafu,
};
use axum::{
    body::Bytes,
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::request::Parts,
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use snafu::{OptionExt, ResultExt};

/// JSON object body. Anything that is not an object (wrong syntax, an array, not JSON at all) becomes `T::default()`;
/// an object with a field of the wrong type is rejected.
#[derive(Debug)]
pub struct LenientJson<T>(pub T);

impl<T, S> FromRequest<S> for LenientJson<T>
where
    T: DeserializeOwned + Default,
    S: Send + Sync,
{
    type Rejection = RosterError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .context(ReadBodySnafu)?;

        match serde_json::from_slice::<Value>(&bytes) {
            Ok(object @ Value::Object(_)) => serde_json::from_value(object)
                .context(MalformedFieldSnafu)
                .map(Self),
            Ok(other) => {
                debug!(?other, "JSON body is not an object, treating it as empty");
                Ok(Self(T::default()))
            }
            Err(error) => {
                debug!(%error, "Unreadable JSON body, treating it as empty");
                Ok(Self(T::default()))
            }
        }
    }
}

/// Id from the `{id}` path segment, ASCII digits only. Anything else is a 404 like an unknown id.
#[derive(Debug, Clone, Copy)]
pub struct StudentId(pub i64);

impl<S> FromRequestParts<S> for StudentId
where
    S: Send + Sync,
{
    type Rejection = RosterError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(original) = Path::<String>::from_request_parts(parts, state)
            .await
            .context(UnreadableStudentIdSnafu)?;

        Some(original.as_str())
            .filter(|digits| !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()))
            .and_then(|digits| digits.parse().ok())
            .map(Self)
            .context(InvalidStudentIdSnafu {
                original: original.as_str(),
            })
    }
}
