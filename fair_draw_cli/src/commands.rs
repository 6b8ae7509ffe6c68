// Subcommand implementations.
//
// Each command writes its user-facing output to the given writer (stdout in
// `main.rs`, a buffer in tests) and returns errors to the caller instead of
// printing them. A failed request prints nothing to the writer.

use std::io::Write;

use anyhow::Context;
use fair_draw::{
    DrawError, DrawRequest, draw, first_primes, parse_param_list, parse_step_list, trim_label,
};
use rand::Rng;

use crate::cli::DrawArgs;
use crate::commitment::random_text;
use crate::config::FairDrawConfig;
use crate::digest::DigestAlgorithm;

/// Generate commitment text of `length` symbols and print it with its digest.
pub fn commit<W: Write, R: Rng + ?Sized>(
    out: &mut W,
    rng: &mut R,
    length: usize,
    algorithm: DigestAlgorithm,
) -> anyhow::Result<()> {
    let text = random_text(length, rng)?;
    let digest = algorithm.hex_digest(&text);
    tracing::debug!(length, %algorithm, "generated commitment text");
    writeln!(out, "Commitment text: {text}")?;
    writeln!(out, "{algorithm} digest: {digest}")?;
    Ok(())
}

/// Turn `draw` arguments into a validated request, either from a request
/// file or from the individual flags.
pub fn build_request(args: &DrawArgs, config: &FairDrawConfig) -> anyhow::Result<DrawRequest> {
    if let Some(path) = &args.request {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("reading request {}", path.display()))?;
        let request = DrawRequest::from_json(&json, &config.default_steps)
            .with_context(|| format!("invalid request {}", path.display()))?;
        return Ok(request);
    }

    let text = args.text.clone().context("--text is required")?;
    let total = args.total.context("--total is required")?;
    let params = parse_param_list(&args.params.join(" ")).context("invalid --params")?;
    let mut steps = parse_step_list(&args.steps.join(" ")).context("invalid --steps")?;
    if steps.is_empty() {
        steps.clone_from(&config.default_steps);
    }
    let request = DrawRequest {
        text,
        params,
        total,
        steps,
    };
    request.validate()?;
    Ok(request)
}

/// Run the draw and print ranks space-separated, or the whole result as
/// JSON.
pub fn run_draw<W: Write>(out: &mut W, request: &DrawRequest, json: bool) -> anyhow::Result<()> {
    let result = draw(request)?;
    if json {
        serde_json::to_writer_pretty(&mut *out, &result)?;
        writeln!(out)?;
    } else {
        let line = result
            .ranks
            .iter()
            .map(u64::to_string)
            .collect::<Vec<_>>()
            .join(" ");
        writeln!(out, "{line}")?;
    }
    Ok(())
}

/// Compare the digest of `text` with `expected`. Returns whether they match;
/// a mismatch prints the actual digest.
pub fn verify<W: Write>(
    out: &mut W,
    text: &str,
    expected: &str,
    algorithm: DigestAlgorithm,
) -> anyhow::Result<bool> {
    if trim_label(text).is_empty() {
        return Err(DrawError::InvalidRange(
            "text must be non-empty after trimming whitespace".into(),
        )
        .into());
    }
    if algorithm.matches(text, expected) {
        writeln!(out, "Digest matches.")?;
        Ok(true)
    } else {
        let actual = algorithm.hex_digest(text);
        writeln!(out, "Digest does not match; the {algorithm} digest of the text is {actual}")?;
        Ok(false)
    }
}

/// Print the first `count` primes on one line.
pub fn primes<W: Write>(out: &mut W, count: usize) -> anyhow::Result<()> {
    let line = first_primes(count)
        .iter()
        .map(u64::to_string)
        .collect::<Vec<_>>()
        .join(" ");
    writeln!(out, "{line}")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use fair_draw::{ParamValue, StepIndex, draw_ranks};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn output(buf: Vec<u8>) -> String {
        String::from_utf8(buf).unwrap()
    }

    fn draw_args(text: &str, params: &[&str], total: u64, steps: &[&str]) -> DrawArgs {
        DrawArgs {
            text: Some(text.into()),
            params: params.iter().map(|s| s.to_string()).collect(),
            total: Some(total),
            steps: steps.iter().map(|s| s.to_string()).collect(),
            ..DrawArgs::default()
        }
    }

    #[test]
    fn commit_prints_text_and_matching_digest() {
        let mut out = Vec::new();
        let mut rng = StdRng::seed_from_u64(1);
        commit(&mut out, &mut rng, 12, DigestAlgorithm::Md5).unwrap();
        let out = output(out);
        let mut lines = out.lines();
        let text = lines.next().unwrap().strip_prefix("Commitment text: ").unwrap();
        let digest = lines.next().unwrap().strip_prefix("md5 digest: ").unwrap();
        assert_eq!(text.len(), 12);
        assert!(DigestAlgorithm::Md5.matches(text, digest));
    }

    #[test]
    fn commit_zero_length_fails_without_output() {
        let mut out = Vec::new();
        let mut rng = StdRng::seed_from_u64(1);
        assert!(commit(&mut out, &mut rng, 0, DigestAlgorithm::Md5).is_err());
        assert!(out.is_empty());
    }

    #[test]
    fn build_request_from_flags() {
        let args = draw_args("prize", &["1 2", "3"], 10, &["-1 5", "2.5"]);
        let request = build_request(&args, &FairDrawConfig::default()).unwrap();
        assert_eq!(request.params, vec![ParamValue(1), ParamValue(2), ParamValue(3)]);
        assert_eq!(request.steps, vec![StepIndex(0), StepIndex(5), StepIndex(2)]);
    }

    #[test]
    fn build_request_uses_config_default_steps() {
        let config = FairDrawConfig {
            default_steps: vec![StepIndex(7), StepIndex(8)],
            ..FairDrawConfig::default()
        };
        let request = build_request(&draw_args("prize", &[], 10, &[]), &config).unwrap();
        assert_eq!(request.steps, vec![StepIndex(7), StepIndex(8)]);
    }

    #[test]
    fn build_request_rejects_bad_input() {
        let config = FairDrawConfig::default();
        assert!(build_request(&draw_args("prize", &["x"], 10, &[]), &config).is_err());
        assert!(build_request(&draw_args("prize", &["-1"], 10, &[]), &config).is_err());
        assert!(build_request(&draw_args("prize", &[], 0, &[]), &config).is_err());
        assert!(build_request(&draw_args("  ", &[], 10, &[]), &config).is_err());
        assert!(build_request(&DrawArgs::default(), &config).is_err());
    }

    #[test]
    fn build_request_from_file() {
        let path = std::env::temp_dir()
            .join(format!("fair_draw_request_{}.json", std::process::id()));
        std::fs::write(&path, r#"{"text": "file", "params": [4], "total": 9}"#).unwrap();
        let args = DrawArgs {
            request: Some(path.clone()),
            ..DrawArgs::default()
        };
        let request = build_request(&args, &FairDrawConfig::default());
        std::fs::remove_file(&path).unwrap();
        let request = request.unwrap();
        assert_eq!(request.text, "file");
        assert_eq!(request.steps, vec![StepIndex::DEFAULT]);
    }

    #[test]
    fn run_draw_prints_ranks_in_order() {
        let request = build_request(
            &draw_args("line", &["5"], 100, &["3 3 0"]),
            &FairDrawConfig::default(),
        )
        .unwrap();
        let mut out = Vec::new();
        run_draw(&mut out, &request, false).unwrap();

        let expected = draw_ranks(
            "line",
            &[ParamValue(5)],
            100,
            &[StepIndex(3), StepIndex(3), StepIndex(0)],
        )
        .unwrap();
        let expected = format!("{} {} {}\n", expected[0], expected[1], expected[2]);
        assert_eq!(output(out), expected);
    }

    #[test]
    fn run_draw_json() {
        let request = DrawRequest::new("json", vec![], 5);
        let mut out = Vec::new();
        run_draw(&mut out, &request, true).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["total"], 5);
        assert_eq!(value["steps"], serde_json::json!([100]));
    }

    #[test]
    fn verify_match_and_mismatch() {
        let mut out = Vec::new();
        let matched = verify(
            &mut out,
            " abc ",
            "900150983cd24fb0d6963f7d28e17f72",
            DigestAlgorithm::Md5,
        )
        .unwrap();
        assert!(matched);
        assert_eq!(output(out), "Digest matches.\n");

        let mut out = Vec::new();
        let matched = verify(&mut out, "abc", "00", DigestAlgorithm::Md5).unwrap();
        assert!(!matched);
        assert!(output(out).contains("900150983cd24fb0d6963f7d28e17f72"));
    }

    #[test]
    fn verify_blank_text_is_an_error() {
        let mut out = Vec::new();
        assert!(verify(&mut out, "   ", "00", DigestAlgorithm::Md5).is_err());
        assert!(verify(&mut out, "\u{FEFF}", "00", DigestAlgorithm::Md5).is_err());
        assert!(out.is_empty());
    }

    #[test]
    fn primes_line() {
        let mut out = Vec::new();
        primes(&mut out, 5).unwrap();
        assert_eq!(output(out), "2 3 5 7 11\n");

        let mut out = Vec::new();
        primes(&mut out, 0).unwrap();
        assert_eq!(output(out), "\n");
    }
}
