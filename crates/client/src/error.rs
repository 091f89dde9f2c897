use thiserror::Error;

/// Request pipeline error.
///
/// `Unauthorized` is split out from `Api` because it carries a side effect:
/// by the time the caller sees it, the local session has already been torn
/// down. Callers handle it like any other failed call; navigation has been
/// taken care of.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(String),

    #[error("credential rejected by server")]
    Unauthorized,

    #[error("API error ({0}): {1}")]
    Api(u16, String),

    #[error("response parse error: {0}")]
    Decode(String),
}
