//! Request/response shapes for callers that speak JSON.
//!
//! The inbound body is `{ "refs": [..], "frames": n, "algorithm": "..." }`.
//! Fields are decoded loosely and checked by [`SimulationRequest::validate`],
//! so a wrong type surfaces as a specific error code (`INVALID_REFS`,
//! `INVALID_FRAMES`, ...) instead of a generic decode failure.
//!
//! # Example
//! ```
//! use pagesim::request::handle_request;
//!
//! let body = r#"{"refs": [7, 0, 1, 2, 0, 3, 0, 4], "frames": 3, "algorithm": "LRU"}"#;
//! let response = handle_request(body).unwrap();
//! assert_eq!(response.result.total_faults, 6);
//! assert_eq!(response.metadata.efficiency, "25.00%");
//!
//! let err = handle_request(r#"{"refs": [], "frames": 3, "algorithm": "LRU"}"#).unwrap_err();
//! assert_eq!(err.code, pagesim::ErrorCode::InvalidRefs);
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::common::config::{frame_count_from_raw, SimulationConfig};
use crate::common::{Error, ErrorCode, PageId, Result};
use crate::engine::{Policy, SimulationInput, SimulationResult};

/// Largest integer an f64 represents exactly.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// An undecoded simulation request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimulationRequest {
    #[serde(default)]
    pub refs: Option<Value>,
    #[serde(default)]
    pub frames: Option<Value>,
    #[serde(default)]
    pub algorithm: Option<Value>,
}

impl SimulationRequest {
    /// Build a request from typed values.
    pub fn new(refs: &[i64], frames: i64, algorithm: impl Into<String>) -> Self {
        Self {
            refs: Some(Value::from(refs.to_vec())),
            frames: Some(Value::from(frames)),
            algorithm: Some(Value::String(algorithm.into())),
        }
    }

    /// Decode a request body.
    ///
    /// # Errors
    /// - [`Error::InvalidJson`] if `body` is not a JSON object
    pub fn from_json(body: &str) -> Result<Self> {
        serde_json::from_str(body).map_err(|e| Error::InvalidJson(e.to_string()))
    }

    /// Check every field and produce a runnable input.
    ///
    /// Checks run in order: `refs` is a non-empty array, `frames` is an
    /// integer in `1..=10`, `algorithm` names a policy, and finally every
    /// reference is a positive integer.
    pub fn validate(&self) -> Result<SimulationInput> {
        let refs = match &self.refs {
            Some(Value::Array(items)) if !items.is_empty() => items,
            _ => return Err(Error::EmptyReferences),
        };

        let frames = self
            .frames
            .as_ref()
            .and_then(as_integer)
            .ok_or_else(|| Error::InvalidFrameCount {
                got: describe(self.frames.as_ref()),
            })?;
        let frame_count = frame_count_from_raw(frames)?;

        let policy: Policy = match &self.algorithm {
            Some(Value::String(name)) => name.parse()?,
            other => return Err(Error::UnknownPolicy(describe(other.as_ref()))),
        };

        let pages = refs
            .iter()
            .enumerate()
            .map(|(index, value)| {
                as_integer(value)
                    .and_then(PageId::from_raw)
                    .ok_or_else(|| Error::InvalidReference {
                        index,
                        value: value.to_string(),
                    })
            })
            .collect::<Result<Vec<_>>>()?;

        SimulationInput::from_pages(pages, SimulationConfig::new(frame_count, policy)?)
    }
}

/// Integral JSON numbers only; `3.0` counts, `3.5` and `"3"` do not.
fn as_integer(value: &Value) -> Option<i64> {
    let Value::Number(n) = value else {
        return None;
    };
    n.as_i64().or_else(|| {
        n.as_f64()
            .filter(|f| f.fract() == 0.0 && f.abs() <= MAX_SAFE_INTEGER)
            .map(|f| f as i64)
    })
}

fn describe(value: Option<&Value>) -> String {
    value.map_or_else(|| "missing".to_string(), Value::to_string)
}

/// Summary attached to every successful response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseMetadata {
    pub algorithm: Policy,
    pub total_references: usize,
    pub frame_count: usize,
    /// Hit percentage with two decimals, e.g. `"41.67%"`.
    pub efficiency: String,
}

/// A simulation result plus metadata, serialized flat.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResponse {
    #[serde(flatten)]
    pub result: SimulationResult,
    pub metadata: ResponseMetadata,
}

impl SimulationResponse {
    pub fn new(input: &SimulationInput, result: SimulationResult) -> Self {
        let metadata = ResponseMetadata {
            algorithm: input.config().policy(),
            total_references: input.references().len(),
            frame_count: input.config().frame_count(),
            efficiency: format!("{:.2}%", result.efficiency()),
        };
        Self { result, metadata }
    }
}

/// Body returned for a rejected request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: ErrorCode,
}

impl From<Error> for ErrorResponse {
    fn from(err: Error) -> Self {
        Self {
            error: err.to_string(),
            code: err.code(),
        }
    }
}

/// Decode, validate and run one request body.
pub fn handle_request(body: &str) -> std::result::Result<SimulationResponse, ErrorResponse> {
    let input = SimulationRequest::from_json(body)
        .and_then(|request| request.validate())
        .map_err(|err| {
            debug!(error = %err, code = ?err.code(), "rejected simulation request");
            ErrorResponse::from(err)
        })?;

    let result = input.run();
    Ok(SimulationResponse::new(&input, result))
}

/// Parse a reference string such as `"1, 2,3 4"`.
///
/// Tokens are separated by commas and/or whitespace; empty tokens are
/// skipped.
///
/// # Errors
/// - [`Error::EmptyReferences`] if there are no tokens
/// - [`Error::InvalidReference`] for the first token that is not an integer
pub fn parse_reference_string(input: &str) -> Result<Vec<i64>> {
    let refs = input
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|token| !token.is_empty())
        .enumerate()
        .map(|(index, token)| {
            token.parse::<i64>().map_err(|_| Error::InvalidReference {
                index,
                value: token.to_string(),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    if refs.is_empty() {
        return Err(Error::EmptyReferences);
    }
    Ok(refs)
}
