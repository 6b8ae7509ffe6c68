// fair_draw — reproducible lottery ranks from a text label and parameters.
//
// A draw is a pure function of (text, params, total, steps): anyone who
// re-runs the same inputs gets the same ranks, which is what lets a
// published draw be re-verified. Nothing is cached or persisted between
// calls, and no function here touches I/O, global state, or a clock.
//
// Module overview (leaves first):
// - `bitmath.rs`: 64-bit wraparound multiply and square-and-multiply power.
// - `primes.rs`:  First-N primes (linear sieve plus trial-division fallback).
// - `seed.rs`:    Prime-power encoding of an integer array into a u64 seed.
// - `text.rs`:    Trimmed text to Unicode code points.
// - `params.rs`:  Parameter and step-index parsing/normalization at the
//                 text and JSON boundary.
// - `draw.rs`:    `DrawRequest`, `DrawResult`, and the seed-then-sweep
//                 pipeline that produces ranks.
// - `error.rs`:   `DrawError` (`InvalidType` / `InvalidRange`).
//
// The xorshift stream itself lives in `fair_draw_prng` so that its frozen
// shift triple is versioned separately from everything built on top of it.
//
// Logging: `tracing` events at debug/trace level only. This crate never
// installs a subscriber; the binary decides what to show.
//
// **Critical constraint: determinism.** Historical draws must stay
// reproducible. Changing the prime order, the params-before-text
// concatenation, the step semantics, or the rank formula changes results.

pub mod bitmath;
pub mod draw;
pub mod error;
pub mod params;
pub mod primes;
pub mod seed;
pub mod text;

pub use draw::{DrawRequest, DrawResult, derive_seed, draw, draw_ranks, ranks_from_seed};
pub use error::{DrawError, Result};
pub use fair_draw_prng::{Xorshift64, xorshift64_step};
pub use params::{ParamValue, StepIndex, parse_param_list, parse_step_list};
pub use primes::first_primes;
pub use seed::encode_seed;
pub use text::{encode_text, trim_label};
