//! Heuristic fallback reasoner
//!
//! Best-effort arithmetic over natural language, used when no OpenAI
//! credential is configured or the remote call fails. Scans the problem
//! text left to right for numbers, scaling words (double, triple, half),
//! and binary operation keywords, and applies them in order. Coverage is
//! intentionally informal; only the documented phrasings are contractual.

use std::sync::OnceLock;

use async_trait::async_trait;
use regex::Regex;

use crate::error::{McpMathError, Result};
use crate::llm::reasoning::{Reasoning, ReasoningProvider, ReasoningSource};
use crate::math::{Operation, format_number};

/// Model label reported for heuristic results
const HEURISTIC_MODEL: &str = "heuristic-fallback";

fn number_re() -> &'static Regex {
    static NUMBER_RE: OnceLock<Regex> = OnceLock::new();
    NUMBER_RE.get_or_init(|| Regex::new(r"-?\d+(?:\.\d+)?").expect("number pattern is valid"))
}

/// Scaling words that transform a single operand
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scale {
    Double,
    Triple,
    Halve,
}

impl Scale {
    fn from_keyword(word: &str) -> Option<Self> {
        match word {
            "double" | "doubled" | "doubles" => Some(Self::Double),
            "triple" | "tripled" | "triples" => Some(Self::Triple),
            "half" | "halve" | "halved" => Some(Self::Halve),
            _ => None,
        }
    }

    fn apply(&self, value: f64) -> f64 {
        match self {
            Self::Double => value * 2.0,
            Self::Triple => value * 3.0,
            Self::Halve => value / 2.0,
        }
    }

    fn describe(&self, input: f64, output: f64) -> String {
        let verb = match self {
            Self::Double => "Doubled",
            Self::Triple => "Tripled",
            Self::Halve => "Halved",
        };
        format!("{} {} to get {}.", verb, format_number(input), format_number(output))
    }
}

fn binary_from_keyword(word: &str) -> Option<Operation> {
    match word {
        "add" | "added" | "adding" | "plus" | "sum" => Some(Operation::Add),
        "subtract" | "subtracted" | "subtracting" | "minus" | "difference" => Some(Operation::Subtract),
        "multiply" | "multiplied" | "times" | "product" => Some(Operation::Multiply),
        "divide" | "divided" | "quotient" => Some(Operation::Divide),
        _ => None,
    }
}

fn describe_binary(operation: Operation, left: f64, right: f64, result: f64) -> String {
    let (left, right, result) = (format_number(left), format_number(right), format_number(result));
    match operation {
        Operation::Add => format!("Added {} and {} to get {}.", left, right, result),
        Operation::Subtract => format!("Subtracted {} from {} to get {}.", right, left, result),
        Operation::Multiply => format!("Multiplied {} by {} to get {}.", left, right, result),
        Operation::Divide => format!("Divided {} by {} to get {}.", left, right, result),
    }
}

/// Evaluate a problem with keyword scanning
///
/// Fails with UnparseableProblem only when no numeric content is found.
pub fn evaluate(problem: &str) -> Result<Reasoning> {
    let mut steps = vec![
        "Heuristic reasoner engaged; scanning the problem for numbers and operation keywords.".to_string(),
    ];

    let mut acc: Option<f64> = None;
    let mut pending_scale: Option<Scale> = None;
    let mut pending_binary: Option<Operation> = None;
    let mut operations_applied = 0usize;

    for token in problem.split_whitespace() {
        if let Some(number) = number_re()
            .find(token)
            .and_then(|m| m.as_str().parse::<f64>().ok())
        {
            if let Some(scale) = pending_scale.take() {
                let value = scale.apply(number);
                steps.push(scale.describe(number, value));
                acc = Some(value);
                operations_applied += 1;
            } else if let (Some(current), Some(operation)) = (acc, pending_binary) {
                match operation.apply(current, number) {
                    Ok(value) => {
                        steps.push(describe_binary(operation, current, number, value));
                        acc = Some(value);
                        operations_applied += 1;
                        pending_binary = None;
                    }
                    Err(McpMathError::DivisionByZero) => {
                        steps.push("Division by zero requested; the result is undefined.".to_string());
                        return Ok(Reasoning {
                            steps,
                            answer: "undefined".to_string(),
                            model: HEURISTIC_MODEL.to_string(),
                        });
                    }
                    Err(e) => return Err(e),
                }
            } else {
                acc = Some(number);
            }
            continue;
        }

        let word: String = token
            .chars()
            .filter(|c| c.is_ascii_alphabetic())
            .collect::<String>()
            .to_lowercase();

        if let Some(scale) = Scale::from_keyword(&word) {
            match acc {
                // "7 doubled" - scale the value already seen
                Some(current) if pending_binary.is_none() => {
                    let value = scale.apply(current);
                    steps.push(scale.describe(current, value));
                    acc = Some(value);
                    operations_applied += 1;
                }
                _ => pending_scale = Some(scale),
            }
        } else if let Some(operation) = binary_from_keyword(&word) {
            pending_binary = Some(operation);
        }
    }

    let Some(result) = acc else {
        return Err(McpMathError::UnparseableProblem(problem.to_string()));
    };

    if operations_applied == 0 {
        steps.push("No arithmetic keyword matched; reporting the last number mentioned.".to_string());
    }

    let answer = format_number(result);
    steps.push(format!("Computed result: {}.", answer));

    Ok(Reasoning {
        steps,
        answer,
        model: HEURISTIC_MODEL.to_string(),
    })
}

/// Local reasoner requiring no credentials
pub struct HeuristicReasoner;

#[async_trait]
impl ReasoningProvider for HeuristicReasoner {
    fn source(&self) -> ReasoningSource {
        ReasoningSource::Heuristic
    }

    async fn solve(&self, problem: &str, _model: Option<&str>) -> Result<Reasoning> {
        evaluate(problem)
    }
}
