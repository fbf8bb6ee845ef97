//! Structured result of a protocol synthesis request.

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Prefix of locally generated signatures.
pub const SIGNATURE_PREFIX: &str = "AXM";

const SIGNATURE_TOKEN_LEN: usize = 8;
const SIGNATURE_CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

pub const SENTINEL_AXIOM: &str = "ERROR_NULL_STATE";
pub const SENTINEL_SIGNATURE: &str = "ERROR_SIG_INVALID";
const SENTINEL_SYNTHESIS: &str =
    "Protocol synthesis failed. The remote reasoning core returned no usable state.";
const SENTINEL_VALIDATION: &str = "VALIDATION_ABORTED";

/// Model-authored metrics. None of these are checked locally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metrics {
    pub entropy: f64,
    pub latency: String,
    pub pruning_rate: String,
    pub valuation: String,
}

/// One generated protocol.
///
/// Always a total value: a failed request produces [`SynthesisResult::sentinel`]
/// instead of an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SynthesisResult {
    pub axiom: String,
    pub synthesis: String,
    pub validation: String,
    pub metrics: Metrics,
    /// Assigned on receipt, never taken from the remote payload.
    pub timestamp: DateTime<Utc>,
    pub signature: String,
}

impl SynthesisResult {
    /// The fixed fallback substituted whenever the generate call fails.
    pub fn sentinel(timestamp: DateTime<Utc>) -> Self {
        Self {
            axiom: SENTINEL_AXIOM.to_string(),
            synthesis: SENTINEL_SYNTHESIS.to_string(),
            validation: SENTINEL_VALIDATION.to_string(),
            metrics: Metrics {
                entropy: 1.0,
                latency: "ERR".to_string(),
                pruning_rate: "0%".to_string(),
                valuation: "$0".to_string(),
            },
            timestamp,
            signature: SENTINEL_SIGNATURE.to_string(),
        }
    }

    /// Whether every field except the timestamp matches the sentinel.
    pub fn is_sentinel(&self) -> bool {
        *self == Self::sentinel(self.timestamp)
    }

    /// Synthesis body split into its non-empty paragraphs.
    pub fn paragraphs(&self) -> impl Iterator<Item = &str> {
        self.synthesis
            .split('\n')
            .map(str::trim)
            .filter(|line| !line.is_empty())
    }
}

/// JSON shape the remote model is instructed to return.
///
/// Extra keys, including any `timestamp`, are ignored.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ProtocolPayload {
    pub axiom: String,
    pub synthesis: String,
    pub validation: String,
    pub metrics: Metrics,
    #[serde(default)]
    pub signature: Option<String>,
}

impl ProtocolPayload {
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text.trim())
    }

    /// Stamp the payload with its receipt time, filling a missing or blank
    /// signature with a locally generated tag.
    pub fn into_result(self, received_at: DateTime<Utc>) -> SynthesisResult {
        let signature = match self.signature {
            Some(signature) if !signature.trim().is_empty() => signature,
            _ => fallback_signature(),
        };

        SynthesisResult {
            axiom: self.axiom,
            synthesis: self.synthesis,
            validation: self.validation,
            metrics: self.metrics,
            timestamp: received_at,
            signature,
        }
    }
}

/// `AXM-` followed by eight random uppercase alphanumerics.
pub fn fallback_signature() -> String {
    let mut rng = rand::thread_rng();
    let token: String = (0..SIGNATURE_TOKEN_LEN)
        .map(|_| char::from(SIGNATURE_CHARSET[rng.gen_range(0..SIGNATURE_CHARSET.len())]))
        .collect();
    format!("{}-{}", SIGNATURE_PREFIX, token)
}

pub fn is_fallback_signature(signature: &str) -> bool {
    signature
        .strip_prefix(SIGNATURE_PREFIX)
        .and_then(|rest| rest.strip_prefix('-'))
        .map(|token| {
            token.len() == SIGNATURE_TOKEN_LEN
                && token
                    .chars()
                    .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
        })
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL_REPLY: &str = r#"{"axiom":"A","synthesis":"B","validation":"C","metrics":{"entropy":0.5,"latency":"10ms","pruningRate":"90%","valuation":"$1M"},"signature":"SIG-1"}"#;

    #[test]
    fn payload_keeps_remote_signature() {
        let now = Utc::now();
        let result = ProtocolPayload::from_json(FULL_REPLY)
            .expect("payload should parse")
            .into_result(now);

        assert_eq!(result.axiom, "A");
        assert_eq!(result.synthesis, "B");
        assert_eq!(result.validation, "C");
        assert_eq!(result.metrics.entropy, 0.5);
        assert_eq!(result.metrics.pruning_rate, "90%");
        assert_eq!(result.signature, "SIG-1");
        assert_eq!(result.timestamp, now);
    }

    #[test]
    fn remote_timestamp_is_ignored() {
        let reply = r#"{"axiom":"A","synthesis":"B","validation":"C","metrics":{"entropy":1,"latency":"1ms","pruningRate":"1%","valuation":"$1"},"timestamp":"1999-01-01T00:00:00Z"}"#;
        let now = Utc::now();
        let result = ProtocolPayload::from_json(reply)
            .expect("payload should parse")
            .into_result(now);

        assert_eq!(result.timestamp, now);
        assert_eq!(result.metrics.entropy, 1.0);
    }

    #[test]
    fn missing_or_blank_signature_gets_fallback() {
        let missing = r#"{"axiom":"A","synthesis":"B","validation":"C","metrics":{"entropy":0.1,"latency":"x","pruningRate":"y","valuation":"z"}}"#;
        let blank = r#"{"axiom":"A","synthesis":"B","validation":"C","metrics":{"entropy":0.1,"latency":"x","pruningRate":"y","valuation":"z"},"signature":"  "}"#;

        for reply in [missing, blank] {
            let result = ProtocolPayload::from_json(reply)
                .expect("payload should parse")
                .into_result(Utc::now());
            assert!(
                is_fallback_signature(&result.signature),
                "unexpected signature {}",
                result.signature
            );
        }
    }

    #[test]
    fn fallback_signatures_differ() {
        let a = fallback_signature();
        let b = fallback_signature();
        assert!(is_fallback_signature(&a));
        assert_ne!(a, b);
    }

    #[test]
    fn fallback_token_symbols_are_uniform() {
        let tokens: String = (0..2000)
            .map(|_| fallback_signature()[SIGNATURE_PREFIX.len() + 1..].to_string())
            .collect();
        let digits = tokens.chars().filter(|c| c.is_ascii_digit()).count();
        let share = digits as f64 / tokens.len() as f64;

        // 10 of 36 symbols are digits.
        assert!((0.24..0.32).contains(&share), "digit share {}", share);
    }

    #[test]
    fn malformed_payloads_are_rejected() {
        assert!(ProtocolPayload::from_json("not json").is_err());
        assert!(ProtocolPayload::from_json(r#"{"axiom":"A"}"#).is_err());
        assert!(ProtocolPayload::from_json(
            r#"{"axiom":"A","synthesis":"B","validation":"C","metrics":{"entropy":"high","latency":"x","pruningRate":"y","valuation":"z"}}"#
        )
        .is_err());
    }

    #[test]
    fn sentinel_fields_are_fixed() {
        let sentinel = SynthesisResult::sentinel(Utc::now());
        assert_eq!(sentinel.axiom, "ERROR_NULL_STATE");
        assert_eq!(sentinel.metrics.entropy, 1.0);
        assert_eq!(sentinel.metrics.latency, "ERR");
        assert_eq!(sentinel.metrics.pruning_rate, "0%");
        assert_eq!(sentinel.metrics.valuation, "$0");
        assert_eq!(sentinel.signature, "ERROR_SIG_INVALID");
        assert!(sentinel.is_sentinel());
        assert!(!is_fallback_signature(&sentinel.signature));
    }

    #[test]
    fn metrics_serialize_with_camel_case() {
        let sentinel = SynthesisResult::sentinel(Utc::now());
        let value = serde_json::to_value(&sentinel).expect("serialize");
        assert_eq!(value["metrics"]["pruningRate"], "0%");
    }

    #[test]
    fn paragraphs_skip_blank_lines() {
        let mut result = SynthesisResult::sentinel(Utc::now());
        result.synthesis = "first\n\n  second  \n".to_string();
        assert_eq!(result.paragraphs().collect::<Vec<_>>(), vec!["first", "second"]);
    }
}
