//! The model's chosen next step.

use std::fmt;
use std::str::FromStr;

use reactloop_core::error::ParseError;

const FINISH_PREFIX: &str = "finish|";

/// Either a tool invocation or the final answer.
///
/// Textual form is `finish|<answer>` or `<tool>|<args>`. Only the first `|`
/// separates; the rest belongs to the answer or arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Act {
    Finish { answer: String },
    Invoke { tool: String, args: String },
}

impl Act {
    pub fn is_finish(&self) -> bool {
        matches!(self, Act::Finish { .. })
    }
}

impl FromStr for Act {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(answer) = s.strip_prefix(FINISH_PREFIX) {
            return Ok(Act::Finish {
                answer: answer.to_string(),
            });
        }

        match s.split_once('|') {
            Some((tool, args)) => Ok(Act::Invoke {
                tool: tool.to_string(),
                args: args.to_string(),
            }),
            None => Err(ParseError::InvalidAct { act: s.to_string() }),
        }
    }
}

impl fmt::Display for Act {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Act::Finish { answer } => write!(f, "{FINISH_PREFIX}{answer}"),
            Act::Invoke { tool, args } => write!(f, "{tool}|{args}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finish_keeps_everything_after_prefix() {
        let act: Act = "finish|a|b|c".parse().unwrap();
        assert_eq!(
            act,
            Act::Finish {
                answer: "a|b|c".into()
            }
        );
    }

    #[test]
    fn invoke_splits_on_first_pipe() {
        let act: Act = "weather|Paris|imperial".parse().unwrap();
        assert_eq!(
            act,
            Act::Invoke {
                tool: "weather".into(),
                args: "Paris|imperial".into()
            }
        );
    }

    #[test]
    fn empty_args_are_allowed() {
        let act: Act = "clock|".parse().unwrap();
        assert_eq!(
            act,
            Act::Invoke {
                tool: "clock".into(),
                args: String::new()
            }
        );
    }

    #[test]
    fn no_pipe_is_invalid() {
        let err = "calculator 2+2".parse::<Act>().unwrap_err();
        assert_eq!(
            err,
            ParseError::InvalidAct {
                act: "calculator 2+2".into()
            }
        );
        assert!("finish".parse::<Act>().is_err());
    }

    #[test]
    fn display_reproduces_source() {
        for raw in ["finish|42", "finish|", "calculator|2+2", "search|a|b", "|x"] {
            let act: Act = raw.parse().unwrap();
            assert_eq!(act.to_string(), raw);
        }
    }

    #[test]
    fn finish_prefix_is_case_sensitive() {
        let act: Act = "Finish|done".parse().unwrap();
        assert!(!act.is_finish());
    }
}
