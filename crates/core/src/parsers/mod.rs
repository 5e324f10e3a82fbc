pub mod collapsed;
pub mod pprof;

use thiserror::Error;

use crate::model::Sample;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("pprof: {0}")]
    Pprof(#[from] pprof::PprofParseError),
    #[error("collapsed: {0}")]
    Collapsed(#[from] collapsed::CollapsedParseError),
    #[error("unable to detect format")]
    UnknownFormat,
}

/// Auto-detect the profile format and parse it into samples.
///
/// A JSON object carrying `samples` + `locations` + `functions` is treated
/// as a pprof JSON export; anything else falls through to the collapsed
/// stack text format.
pub fn parse_auto(data: &[u8]) -> Result<Vec<Sample>, ParseError> {
    if let Ok(value) = serde_json::from_slice::<serde_json::Value>(data)
        && let Some(obj) = value.as_object()
    {
        if obj.contains_key("samples")
            && obj.contains_key("locations")
            && obj.contains_key("functions")
        {
            return Ok(pprof::parse_pprof(data)?);
        }
        return Err(ParseError::UnknownFormat);
    }

    if let Ok(samples) = collapsed::parse_collapsed(data) {
        return Ok(samples);
    }

    Err(ParseError::UnknownFormat)
}
