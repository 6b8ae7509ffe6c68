// Rank drawing: the end-to-end pipeline.
//
// A draw is a pure function of its request:
//
//   params ++ code_points(trim(text))  --encode_seed-->  seed0
//   seed0 --xorshift64 x k-->  seed_k
//   rank_k = seed_k mod total + 1
//
// The caller names the iterations it wants in `steps` (default: just 100).
// One linear sweep of `max(steps)` xorshift rounds records every requested
// iteration, however many indices were asked for and however often they
// repeat. Ranks come back in request order, duplicates included.
//
// Request files are JSON (see `DrawRequest::from_json`). Numbers are
// validated by hand from a `serde_json::Value` so that a negative total or
// parameter is reported as `InvalidRange` rather than a generic parse error.

use std::collections::BTreeMap;

use fair_draw_prng::Xorshift64;
use serde::Serialize;
use serde_json::Value;

use crate::error::{DrawError, Result};
use crate::params::{ParamValue, StepIndex};
use crate::seed::encode_seed;
use crate::text::{encode_text, trim_label};

/// Everything that determines a draw.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DrawRequest {
    /// Label, usually a published commitment string. Outer whitespace is
    /// ignored; must not be blank.
    pub text: String,
    /// Optional numeric parameters, bound to primes before the text codes.
    pub params: Vec<ParamValue>,
    /// Ranks are drawn from `1..=total`. Must be at least 1.
    pub total: u64,
    /// Which stream iterations to report, in output order.
    pub steps: Vec<StepIndex>,
}

impl DrawRequest {
    /// A request reporting only the default step (100).
    pub fn new(text: impl Into<String>, params: Vec<ParamValue>, total: u64) -> Self {
        Self {
            text: text.into(),
            params,
            total,
            steps: vec![StepIndex::DEFAULT],
        }
    }

    /// Replace the reported steps.
    pub fn with_steps(mut self, steps: Vec<StepIndex>) -> Self {
        self.steps = steps;
        self
    }

    /// Check the request invariants: non-blank text and `total >= 1`.
    pub fn validate(&self) -> Result<()> {
        if trim_label(&self.text).is_empty() {
            return Err(DrawError::InvalidRange(
                "text must be non-empty after trimming whitespace".into(),
            ));
        }
        if self.total == 0 {
            return Err(DrawError::InvalidRange("total must be at least 1".into()));
        }
        Ok(())
    }

    /// Parse a request from JSON:
    ///
    /// ```json
    /// {"text": "...", "params": [1, "99999999999999999999"], "total": 10, "steps": [100, 5]}
    /// ```
    ///
    /// `params` defaults to empty and `steps` to `default_steps`. The result
    /// is validated before it is returned.
    pub fn from_json(json: &str, default_steps: &[StepIndex]) -> Result<Self> {
        let root: Value = serde_json::from_str(json)
            .map_err(|e| DrawError::InvalidType(format!("request is not valid JSON: {e}")))?;
        let Value::Object(fields) = root else {
            return Err(DrawError::InvalidType("request must be a JSON object".into()));
        };

        let text = match fields.get("text") {
            Some(Value::String(s)) => s.clone(),
            Some(other) => {
                return Err(DrawError::InvalidType(format!(
                    "text must be a string, got {other}"
                )));
            }
            None => return Err(DrawError::InvalidType("request is missing `text`".into())),
        };
        let params = match fields.get("params") {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(items)) => items
                .iter()
                .map(ParamValue::from_json)
                .collect::<Result<_>>()?,
            Some(other) => {
                return Err(DrawError::InvalidType(format!(
                    "params must be an array, got {other}"
                )));
            }
        };
        let total = match fields.get("total") {
            Some(value) => total_from_json(value)?,
            None => return Err(DrawError::InvalidType("request is missing `total`".into())),
        };
        let steps = match fields.get("steps") {
            None | Some(Value::Null) => default_steps.to_vec(),
            Some(Value::Array(items)) => items
                .iter()
                .map(StepIndex::from_json)
                .collect::<Result<_>>()?,
            Some(other) => {
                return Err(DrawError::InvalidType(format!(
                    "steps must be an array, got {other}"
                )));
            }
        };

        let request = DrawRequest {
            text,
            params,
            total,
            steps,
        };
        request.validate()?;
        Ok(request)
    }
}

/// `total` as a JSON number. Fractions are floored; negatives fail.
fn total_from_json(value: &Value) -> Result<u64> {
    let Value::Number(n) = value else {
        return Err(DrawError::InvalidType(format!(
            "total must be a number, got {value}"
        )));
    };
    if let Some(v) = n.as_u64() {
        return Ok(v);
    }
    let v = n.as_f64().unwrap_or(f64::NAN);
    if v.is_nan() || v < 1.0 {
        return Err(DrawError::InvalidRange(format!(
            "total must be at least 1, got {n}"
        )));
    }
    // `u64::MAX as f64` rounds up to 2^64.
    if v >= u64::MAX as f64 {
        return Err(DrawError::InvalidRange(format!("total {n} is too large")));
    }
    Ok(v.floor() as u64)
}

/// Output of a draw, in request order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DrawResult {
    /// The encoded seed (iteration 0).
    pub seed: u64,
    pub total: u64,
    /// The normalized steps, parallel to `ranks`.
    pub steps: Vec<StepIndex>,
    /// One rank in `1..=total` per requested step.
    pub ranks: Vec<u64>,
}

/// The initial seed for `text` and `params`: the parameters followed by the
/// text's code points, prime-power encoded.
pub fn derive_seed(text: &str, params: &[ParamValue]) -> Result<u64> {
    let codes = encode_text(text)?;
    let combined: Vec<u64> = params
        .iter()
        .map(|p| p.get())
        .chain(codes)
        .collect();
    encode_seed(&combined)
}

/// Ranks for `steps`, walking the stream from `seed0`.
///
/// `total` must be at least 1. Performs exactly `max(steps)` xorshift rounds,
/// so run time grows linearly with the largest step and any index is accepted.
pub fn ranks_from_seed(seed0: u64, total: u64, steps: &[StepIndex]) -> Result<Vec<u64>> {
    if total == 0 {
        return Err(DrawError::InvalidRange("total must be at least 1".into()));
    }
    // Requested iteration -> seed at that iteration, filled in by the sweep.
    let mut recorded: BTreeMap<u64, u64> = steps.iter().map(|s| (s.get(), 0)).collect();
    let max_step = recorded.keys().next_back().copied().unwrap_or(0);
    tracing::trace!(seed0, max_step, distinct = recorded.len(), "sweeping stream");

    if let Some(slot) = recorded.get_mut(&0) {
        *slot = seed0;
    }
    for (iteration, seed) in (1..=max_step).zip(Xorshift64::new(seed0)) {
        if let Some(slot) = recorded.get_mut(&iteration) {
            *slot = seed;
        }
    }

    Ok(steps
        .iter()
        .map(|s| recorded[&s.get()] % total + 1)
        .collect())
}

/// Run a full draw.
pub fn draw(request: &DrawRequest) -> Result<DrawResult> {
    request.validate()?;
    let seed = derive_seed(&request.text, &request.params)?;
    tracing::debug!(
        seed,
        params = request.params.len(),
        total = request.total,
        steps = request.steps.len(),
        "derived draw seed"
    );
    let ranks = ranks_from_seed(seed, request.total, &request.steps)?;
    Ok(DrawResult {
        seed,
        total: request.total,
        steps: request.steps.clone(),
        ranks,
    })
}

/// Convenience form of `draw` that returns only the ranks.
pub fn draw_ranks(
    text: &str,
    params: &[ParamValue],
    total: u64,
    steps: &[StepIndex],
) -> Result<Vec<u64>> {
    let request = DrawRequest {
        text: text.to_owned(),
        params: params.to_vec(),
        total,
        steps: steps.to_vec(),
    };
    draw(&request).map(|result| result.ranks)
}
