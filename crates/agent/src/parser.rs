//! Decoding of the model's structured reply.
//!
//! The reply must be exactly one JSON object:
//! `{"reasoning": "...", "act": "...", "observation": "..."}`. Nothing is
//! repaired; prose around the object, a missing `act` or a non-string
//! field is rejected as malformed and the caller may ask again.

use reactloop_core::error::ParseError;
use serde::Deserialize;

use crate::act::Act;

/// One decoded model reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentResponse {
    pub reasoning: String,
    pub act: Act,
    /// Usually empty from the model. On a finished run it holds the answer.
    pub observation: String,
}

#[derive(Deserialize)]
struct RawResponse {
    #[serde(default)]
    reasoning: String,
    act: String,
    #[serde(default)]
    observation: String,
}

/// Parse a raw completion into an [`AgentResponse`].
///
/// Returns [`ParseError::Malformed`] when the text is not the expected JSON
/// object and [`ParseError::InvalidAct`] when the object decodes but its
/// `act` has no `|` separator.
pub fn parse(raw: &str) -> Result<AgentResponse, ParseError> {
    let decoded: RawResponse = serde_json::from_str(raw).map_err(|e| ParseError::Malformed {
        reason: e.to_string(),
    })?;

    Ok(AgentResponse {
        act: decoded.act.parse()?,
        reasoning: decoded.reasoning,
        observation: decoded.observation,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_tool_act() {
        let resp = parse(
            r#"{"reasoning": "need math", "act": "calculator|2+2", "observation": ""}"#,
        )
        .unwrap();
        assert_eq!(resp.reasoning, "need math");
        assert_eq!(
            resp.act,
            Act::Invoke {
                tool: "calculator".into(),
                args: "2+2".into()
            }
        );
        assert!(resp.observation.is_empty());
    }

    #[test]
    fn optional_fields_default_to_empty() {
        let resp = parse(r#"{"act": "finish|done"}"#).unwrap();
        assert_eq!(resp.reasoning, "");
        assert_eq!(resp.observation, "");
        assert!(resp.act.is_finish());
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let resp = parse(r#"{"act": "finish|ok", "confidence": 0.9}"#).unwrap();
        assert_eq!(resp.act.to_string(), "finish|ok");
    }

    #[test]
    fn surrounding_whitespace_is_accepted() {
        assert!(parse("\n  {\"act\": \"finish|ok\"}\n").is_ok());
    }

    #[test]
    fn malformed_inputs() {
        let cases = [
            "not json",
            "Sure! {\"act\": \"finish|x\"}",
            "```json\n{\"act\": \"finish|x\"}\n```",
            r#"{"reasoning": "no act"}"#,
            r#"{"act": 42}"#,
            r#"{"act": "finish|x", "reasoning": ["a"]}"#,
            r#"["finish|x"]"#,
            "",
        ];
        for raw in cases {
            let err = parse(raw).unwrap_err();
            assert!(
                matches!(err, ParseError::Malformed { .. }),
                "expected malformed for {raw:?}, got {err:?}"
            );
            assert!(err.is_retryable());
        }
    }

    #[test]
    fn act_without_separator_is_invalid_act() {
        let err = parse(r#"{"reasoning": "r", "act": "just answer"}"#).unwrap_err();
        assert_eq!(
            err,
            ParseError::InvalidAct {
                act: "just answer".into()
            }
        );
        assert!(!err.is_retryable());
    }
}
