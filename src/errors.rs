use strum_macros::IntoStaticStr;
use thiserror::Error;

/// Reasons a weather lookup could not produce a result. The display text of each variant is the
/// user-facing message returned in the `error` field of the lookup response.
#[derive(Debug, Error, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
#[non_exhaustive]
pub enum WeatherError {
    #[error("Enter Something in the search text box")]
    MissingInput,

    #[error("Cant fetch data from the weathermap API")]
    TransportFailure { source: anyhow::Error },

    #[error("Unable to get the data :( TRY AGAIN")]
    IncompleteProviderData,
}

impl WeatherError {
    pub fn transport(source: impl Into<anyhow::Error>) -> Self {
        Self::TransportFailure { source: source.into() }
    }

    /// Short, stable label used to tag log events.
    pub fn kind(&self) -> &'static str {
        self.into()
    }
}
