use serde::Deserialize;
use thiserror::Error;

use crate::model::{Frame, Sample};

#[derive(Debug, Error)]
pub enum PprofParseError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("no samples found")]
    NoSamples,
}

/// pprof JSON format (as produced by `go tool pprof -json` or pprof-rs JSON
/// export).
///
/// Only the first value dimension of each sample is kept; multi-valued
/// profiles lose their remaining dimensions here.
#[derive(Debug, Deserialize)]
struct PprofJson {
    #[serde(default)]
    samples: Vec<PprofSample>,
    #[serde(default)]
    locations: Vec<PprofLocation>,
    #[serde(default)]
    functions: Vec<PprofFunction>,
    #[serde(default, rename = "stringTable")]
    string_table: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct PprofSample {
    #[serde(default, rename = "locationId")]
    location_id: Vec<u64>,
    #[serde(default)]
    value: Vec<i64>,
}

#[derive(Debug, Deserialize)]
struct PprofLocation {
    id: u64,
    #[serde(default)]
    address: u64,
    #[serde(default)]
    line: Vec<PprofLine>,
}

#[derive(Debug, Deserialize)]
struct PprofLine {
    #[serde(default, rename = "functionId")]
    function_id: u64,
}

#[derive(Debug, Deserialize)]
struct PprofFunction {
    id: u64,
    #[serde(default)]
    name: u64,
}

/// Parse a pprof JSON export into samples.
///
/// Locations with no resolvable function keep `symbol = None`, so the tree
/// builder labels them by address.
pub fn parse_pprof(data: &[u8]) -> Result<Vec<Sample>, PprofParseError> {
    let pprof: PprofJson = serde_json::from_slice(data)?;

    if pprof.samples.is_empty() {
        return Err(PprofParseError::NoSamples);
    }

    let func_map: std::collections::HashMap<u64, &PprofFunction> =
        pprof.functions.iter().map(|f| (f.id, f)).collect();
    let loc_map: std::collections::HashMap<u64, &PprofLocation> =
        pprof.locations.iter().map(|l| (l.id, l)).collect();

    let resolve = |loc_id: u64| -> Frame {
        let address = loc_map.get(&loc_id).map_or(loc_id, |loc| loc.address);
        if let Some(loc) = loc_map.get(&loc_id)
            && let Some(line) = loc.line.first()
            && let Some(func) = func_map.get(&line.function_id)
            && let Some(name) = pprof.string_table.get(func.name as usize)
            && !name.is_empty()
        {
            return Frame {
                address,
                symbol: Some(name.clone()),
            };
        }
        Frame {
            address,
            symbol: None,
        }
    };

    let samples = pprof
        .samples
        .iter()
        .map(|sample| {
            // pprof stacks are already leaf-first, matching `Sample`.
            let frames = sample.location_id.iter().map(|&id| resolve(id)).collect();
            let value = sample.value.first().copied().unwrap_or(0).max(0) as u64;
            Sample { frames, value }
        })
        .collect();

    Ok(samples)
}
