//! System prompt assembly.

/// Response contract appended to every system prompt.
pub const RESPONSE_FORMAT: &str = r#"You must respond in this exact JSON format:
{
    "reasoning": "your step-by-step thinking about what to do",
    "act": "tool_name|arguments OR finish|your_final_answer",
    "observation": ""
}

If you need a tool, use "act": "tool_name|arguments".
If you have the answer, use "act": "finish|your answer here"."#;

/// Combine the base prompt, the rendered tool catalog and the response
/// contract into the system message for one iteration.
pub fn build_system_prompt(base: &str, tools: &str) -> String {
    format!("{base}\n\nAvailable tools:\n{tools}\n\n{RESPONSE_FORMAT}")
}
