//! Calculator tool: evaluates arithmetic expressions.
//!
//! The argument text is the expression itself (`calculator|(2 + 3) * 4`).
//! Supports `+ - * / % ^`, parentheses, unary minus and decimals.

use async_trait::async_trait;
use reactloop_core::catalog::ParameterDescriptor;
use reactloop_core::error::ToolError;
use reactloop_core::tool::Tool;

/// Deepest nesting of parentheses, unary minus and `^` the parser accepts.
const MAX_DEPTH: usize = 256;

pub struct CalculatorTool;

#[async_trait]
impl Tool for CalculatorTool {
    fn name(&self) -> &str {
        "calculator"
    }

    fn description(&self) -> &str {
        "Evaluate a math expression. Supports +, -, *, /, %, ^ and parentheses."
    }

    fn parameters(&self) -> Vec<ParameterDescriptor> {
        vec![ParameterDescriptor::required(
            "expression",
            "string",
            "The expression to evaluate, e.g. (2 + 3) * 4",
        )]
    }

    async fn execute(&self, args: &str) -> Result<String, ToolError> {
        let expr = args.trim();
        if expr.is_empty() {
            return Err(ToolError::InvalidArguments("empty expression".into()));
        }

        let value = evaluate(expr).map_err(|reason| ToolError::ExecutionFailed {
            tool_name: self.name().to_string(),
            reason,
        })?;
        Ok(format_number(value))
    }
}

/// Render whole numbers without a trailing `.0`.
fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

/// Evaluate an arithmetic expression.
pub fn evaluate(expr: &str) -> Result<f64, String> {
    let tokens = tokenize(expr)?;
    let mut parser = Parser {
        tokens: &tokens,
        pos: 0,
        depth: 0,
    };
    let value = parser.expr()?;
    match parser.tokens.get(parser.pos) {
        None => {}
        Some(tok) => return Err(format!("unexpected {tok:?} at token {}", parser.pos)),
    }
    if !value.is_finite() {
        return Err("result is not a finite number".into());
    }
    Ok(value)
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Token {
    Num(f64),
    Op(char),
    Open,
    Close,
}

fn tokenize(input: &str) -> Result<Vec<Token>, String> {
    let mut tokens = Vec::new();
    let mut chars = input.char_indices().peekable();

    while let Some(&(start, c)) = chars.peek() {
        match c {
            c if c.is_whitespace() => {
                chars.next();
            }
            '+' | '-' | '*' | '/' | '%' | '^' => {
                tokens.push(Token::Op(c));
                chars.next();
            }
            '(' => {
                tokens.push(Token::Open);
                chars.next();
            }
            ')' => {
                tokens.push(Token::Close);
                chars.next();
            }
            c if c.is_ascii_digit() || c == '.' => {
                let mut end = start;
                while let Some(&(i, d)) = chars.peek() {
                    if !(d.is_ascii_digit() || d == '.') {
                        break;
                    }
                    end = i + d.len_utf8();
                    chars.next();
                }
                let literal = &input[start..end];
                let n = literal
                    .parse()
                    .map_err(|_| format!("invalid number '{literal}'"))?;
                tokens.push(Token::Num(n));
            }
            other => return Err(format!("unexpected character '{other}'")),
        }
    }

    Ok(tokens)
}

struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
    depth: usize,
}

impl Parser<'_> {
    fn peek_op(&self) -> Option<char> {
        match self.tokens.get(self.pos) {
            Some(Token::Op(c)) => Some(*c),
            _ => None,
        }
    }

    /// Run `f` one nesting level deeper, failing past `MAX_DEPTH`.
    fn nested<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<T, String>,
    ) -> Result<T, String> {
        if self.depth >= MAX_DEPTH {
            return Err("expression nested too deeply".into());
        }
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }

    // expr = term (('+' | '-') term)*
    fn expr(&mut self) -> Result<f64, String> {
        let mut acc = self.term()?;
        while let Some(op @ ('+' | '-')) = self.peek_op() {
            self.pos += 1;
            let rhs = self.term()?;
            acc = if op == '+' { acc + rhs } else { acc - rhs };
        }
        Ok(acc)
    }

    // term = factor (('*' | '/' | '%') factor)*
    fn term(&mut self) -> Result<f64, String> {
        let mut acc = self.factor()?;
        while let Some(op @ ('*' | '/' | '%')) = self.peek_op() {
            self.pos += 1;
            let rhs = self.factor()?;
            acc = match op {
                '*' => acc * rhs,
                _ if rhs == 0.0 => return Err("division by zero".into()),
                '/' => acc / rhs,
                _ => acc % rhs,
            };
        }
        Ok(acc)
    }

    // factor = unary ('^' factor)?    right-associative
    fn factor(&mut self) -> Result<f64, String> {
        let base = self.unary()?;
        if self.peek_op() == Some('^') {
            self.pos += 1;
            let exp = self.nested(Self::factor)?;
            return Ok(base.powf(exp));
        }
        Ok(base)
    }

    // unary = '-' unary | primary
    fn unary(&mut self) -> Result<f64, String> {
        if self.peek_op() == Some('-') {
            self.pos += 1;
            return Ok(-self.nested(Self::unary)?);
        }
        self.primary()
    }

    // primary = NUMBER | '(' expr ')'
    fn primary(&mut self) -> Result<f64, String> {
        let tok = self.tokens.get(self.pos).copied();
        self.pos += 1;
        match tok {
            Some(Token::Num(n)) => Ok(n),
            Some(Token::Open) => {
                let inner = self.nested(Self::expr)?;
                match self.tokens.get(self.pos) {
                    Some(Token::Close) => {
                        self.pos += 1;
                        Ok(inner)
                    }
                    _ => Err("missing closing parenthesis".into()),
                }
            }
            Some(other) => Err(format!("unexpected {other:?}")),
            None => Err("unexpected end of expression".into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn precedence_and_grouping() {
        assert_eq!(evaluate("2 + 3 * 4").unwrap(), 14.0);
        assert_eq!(evaluate("(2 + 3) * 4").unwrap(), 20.0);
        assert_eq!(evaluate("((1 + 2) * (3 + 4))").unwrap(), 21.0);
    }

    #[test]
    fn power_is_right_associative() {
        assert_eq!(evaluate("2 ^ 3 ^ 2").unwrap(), 512.0);
        assert_eq!(evaluate("-2 ^ 2").unwrap(), 4.0);
    }

    #[test]
    fn modulo_and_division() {
        assert_eq!(evaluate("10 % 4").unwrap(), 2.0);
        assert_eq!(evaluate("10 / 4").unwrap(), 2.5);
    }

    #[test]
    fn zero_divisor_rejected() {
        assert!(evaluate("1 / 0").is_err());
        assert!(evaluate("1 % 0").is_err());
    }

    #[test]
    fn malformed_expressions() {
        assert!(evaluate("2 +").is_err());
        assert!(evaluate("(1 + 2").is_err());
        assert!(evaluate("1 2").is_err());
        assert!(evaluate("sqrt(4)").is_err());
        assert!(evaluate("1..2").is_err());
    }

    #[test]
    fn moderate_nesting_evaluates() {
        let expr = format!("{}7{}", "(".repeat(100), ")".repeat(100));
        assert_eq!(evaluate(&expr).unwrap(), 7.0);
        assert_eq!(evaluate(&format!("{}3", "-".repeat(100))).unwrap(), 3.0);
    }

    #[tokio::test]
    async fn deep_parentheses_fail_without_overflow() {
        let expr = format!("{}1{}", "(".repeat(200_000), ")".repeat(200_000));
        let err = CalculatorTool.execute(&expr).await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "calculator failed: expression nested too deeply"
        );
    }

    #[test]
    fn long_unary_minus_run_is_rejected() {
        let expr = format!("{}1", "-".repeat(200_000));
        assert_eq!(evaluate(&expr).unwrap_err(), "expression nested too deeply");
    }

    #[test]
    fn long_power_chain_is_rejected() {
        let expr = vec!["1"; 100_000].join("^");
        assert_eq!(evaluate(&expr).unwrap_err(), "expression nested too deeply");
    }

    #[tokio::test]
    async fn execute_formats_whole_numbers() {
        assert_eq!(CalculatorTool.execute("2+2").await.unwrap(), "4");
        assert_eq!(CalculatorTool.execute(" 10 / 2 ").await.unwrap(), "5");
    }

    #[tokio::test]
    async fn execute_keeps_fractions() {
        let out = CalculatorTool.execute("10 / 3").await.unwrap();
        assert!(out.starts_with("3.333"));
    }

    #[tokio::test]
    async fn execute_empty_is_invalid_arguments() {
        let err = CalculatorTool.execute("   ").await.unwrap_err();
        assert!(matches!(err, ToolError::InvalidArguments(_)));
    }

    #[tokio::test]
    async fn execute_bad_expression_names_the_tool() {
        let err = CalculatorTool.execute("1 / 0").await.unwrap_err();
        assert_eq!(err.to_string(), "calculator failed: division by zero");
    }

    #[test]
    fn descriptor_advertises_expression() {
        let d = CalculatorTool.descriptor();
        assert_eq!(d.name, "calculator");
        assert_eq!(d.parameters.len(), 1);
        assert!(d.parameters[0].required);
    }
}
