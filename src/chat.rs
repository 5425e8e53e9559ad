//! Interactive REPL for the math servers
//!
//! One line of input produces at most one response before the next line is
//! read. Meta-commands are intercepted before any handler or planner sees
//! them; every other error is reported and the loop continues. The session
//! ends only on `exit` or end-of-input.

use std::io::{self, BufRead, Write};

use colored::*;

use crate::error::{McpMathError, Result};
use crate::math::Operation;
use crate::planner::Planner;
use crate::registry::ServerBlueprint;
use crate::servers::ServerHandler;

/// Inputs that terminate the REPL
const EXIT_COMMANDS: &[&str] = &["exit", "quit", ":q"];
/// Inputs that display help instructions
const HELP_COMMANDS: &[&str] = &["help", "?", ":help"];
/// Inputs that print the tool manifest
const MANIFEST_COMMANDS: &[&str] = &["tools", "manifest"];

/// Always-available commands intercepted before dispatch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetaCommand {
    Exit,
    Help,
    Tools,
}

impl MetaCommand {
    /// Recognize a meta-command, case-insensitively
    pub fn parse(input: &str) -> Option<Self> {
        let lowered = input.to_lowercase();
        if EXIT_COMMANDS.contains(&lowered.as_str()) {
            Some(Self::Exit)
        } else if HELP_COMMANDS.contains(&lowered.as_str()) {
            Some(Self::Help)
        } else if MANIFEST_COMMANDS.contains(&lowered.as_str()) {
            Some(Self::Tools)
        } else {
            None
        }
    }
}

/// Parse a manual command of the form `<operation> <number> <number>`
pub fn parse_manual_command(input: &str) -> Result<(Operation, f64, f64)> {
    let parts: Vec<&str> = input.split_whitespace().collect();
    if parts.len() != 3 {
        return Err(McpMathError::InvalidCommand(
            "Format: <operation> <number> <number> (e.g., add 2 3)".to_string(),
        ));
    }

    let operation = Operation::from_keyword(parts[0]).ok_or_else(|| {
        let known: Vec<&str> = Operation::ALL.iter().map(|op| op.keyword()).collect();
        McpMathError::InvalidCommand(format!(
            "Unknown operation '{}'. Known: {}",
            parts[0],
            known.join(", ")
        ))
    })?;

    let left: f64 = parts[1]
        .parse()
        .map_err(|_| McpMathError::InvalidCommand("Numbers must be valid floats".to_string()))?;
    let right: f64 = parts[2]
        .parse()
        .map_err(|_| McpMathError::InvalidCommand("Numbers must be valid floats".to_string()))?;

    Ok((operation, left, right))
}

fn operation_title(operation: Operation) -> &'static str {
    match operation {
        Operation::Add => "Add",
        Operation::Subtract => "Subtract",
        Operation::Multiply => "Multiply",
        Operation::Divide => "Divide",
    }
}

/// Read one line from stdin, returning None at end-of-input
async fn read_line(prompt: &str) -> Result<Option<String>> {
    let prompt = prompt.to_string();
    tokio::task::spawn_blocking(move || -> Result<Option<String>> {
        let mut stdout = io::stdout();
        write!(stdout, "{}", prompt)?;
        stdout.flush()?;

        let mut buffer = String::new();
        let bytes = io::stdin().lock().read_line(&mut buffer)?;
        if bytes == 0 {
            Ok(None)
        } else {
            Ok(Some(buffer))
        }
    })
    .await
    .map_err(io::Error::other)?
}

/// One interactive session against a selected server
pub struct ChatSession<'a> {
    blueprint: &'a ServerBlueprint,
    handler: ServerHandler,
    planner: Option<Planner>,
    show_json: bool,
    model: Option<String>,
}

impl<'a> ChatSession<'a> {
    pub fn new(blueprint: &'a ServerBlueprint, handler: ServerHandler) -> Self {
        Self {
            blueprint,
            handler,
            planner: None,
            show_json: false,
            model: None,
        }
    }

    /// Route natural-language input through the planner
    pub fn with_planner(mut self, planner: Planner) -> Self {
        self.planner = Some(planner);
        self
    }

    /// Print raw JSON payloads instead of formatted text
    pub fn with_show_json(mut self, show_json: bool) -> Self {
        self.show_json = show_json;
        self
    }

    /// Model override forwarded to the autonomous reasoner
    pub fn with_model(mut self, model: Option<String>) -> Self {
        self.model = model;
        self
    }

    /// Run the REPL until `exit` or end-of-input
    pub async fn run(&self) -> Result<()> {
        self.print_intro();

        loop {
            let Some(raw) = read_line("> ").await? else {
                println!("\nExiting chat.");
                break;
            };
            let line = raw.trim();
            if line.is_empty() {
                continue;
            }

            match MetaCommand::parse(line) {
                Some(MetaCommand::Exit) => {
                    println!("Goodbye!");
                    break;
                }
                Some(MetaCommand::Help) => {
                    self.print_help();
                    continue;
                }
                Some(MetaCommand::Tools) => {
                    self.print_manifest();
                    continue;
                }
                None => {}
            }

            // Errors end the turn, never the session
            if let Err(e) = self.dispatch(line).await {
                println!("{}", format!("[chat] {}", e).red());
            }
        }

        Ok(())
    }

    async fn dispatch(&self, line: &str) -> Result<()> {
        if self.planner.is_some() {
            self.handle_planner(line).await
        } else {
            self.handle_manual(line).await
        }
    }

    async fn handle_manual(&self, line: &str) -> Result<()> {
        match &self.handler {
            ServerHandler::Capability(_) => {
                println!(
                    "Capability registry is read-only. \
                     Run the data provider or prompt helper servers to execute math."
                );
                Ok(())
            }
            ServerHandler::Data(server) => {
                let (operation, left, right) = parse_manual_command(line)?;
                let result = server.execute(operation, left, right)?;
                if self.show_json {
                    println!("{}", serde_json::to_string_pretty(&result)?);
                } else {
                    println!(
                        "{} result: {} ({})",
                        operation_title(operation),
                        result.result,
                        result.format_inputs()
                    );
                }
                Ok(())
            }
            ServerHandler::Prompt(server) => {
                let (operation, left, right) = parse_manual_command(line)?;
                let result = server.execute(operation, left, right)?;
                if self.show_json {
                    println!("{}", serde_json::to_string_pretty(&result)?);
                } else {
                    println!("{} result: {}", operation_title(operation), result.result);
                    println!("Suggested prompt: {}", result.next_prompt);
                }
                Ok(())
            }
            ServerHandler::Autonomous(server) => {
                let result = server.solve(line, self.model.as_deref()).await?;
                if self.show_json {
                    println!("{}", serde_json::to_string_pretty(&result)?);
                } else {
                    if !result.reasoning_steps.is_empty() {
                        println!("Reasoning:");
                        for (index, step) in result.reasoning_steps.iter().enumerate() {
                            println!("  {}. {}", index + 1, step);
                        }
                    }
                    println!("Final answer: {}", result.final_answer);
                }
                Ok(())
            }
        }
    }

    async fn handle_planner(&self, line: &str) -> Result<()> {
        let Some(planner) = &self.planner else {
            return Err(McpMathError::Config("planner not configured".to_string()));
        };

        println!("{}", "[planner] Interpreting request via LLM...".cyan());
        let outcome = planner.run(line, &self.handler).await?;

        let action = match &outcome.tool_name {
            Some(tool) => format!("call {}", tool),
            None => "respond".to_string(),
        };
        println!("{}", format!("[planner] Completed plan: {}", action).cyan());

        if self.show_json {
            println!("{}", serde_json::to_string_pretty(&outcome)?);
        }
        println!("{}", outcome.message);
        Ok(())
    }

    fn print_intro(&self) {
        println!(
            "{}",
            format!(
                "[chat] mcp-math-servers v{} | Selected server '{}' ({})",
                env!("CARGO_PKG_VERSION"),
                self.blueprint.name,
                self.blueprint.category.label()
            )
            .cyan()
        );
        match &self.planner {
            Some(_) => println!(
                "{}",
                format!(
                    "[chat] Planner enabled using model {}.",
                    self.model.as_deref().unwrap_or("gpt-4.1-mini")
                )
                .cyan()
            ),
            None => println!("{}", "[chat] Planner disabled; manual commands required.".cyan()),
        }
        println!("{}", self.blueprint.instructions);
        println!("Type 'help' for commands, 'exit' to quit.");
        self.print_manifest();
    }

    fn print_help(&self) {
        if self.planner.is_some() {
            println!("Ask any natural-language question. Type 'exit' to quit.");
            return;
        }
        match &self.handler {
            ServerHandler::Capability(_) => println!(
                "This server only advertises tools. \
                 Use the data server to execute math operations."
            ),
            ServerHandler::Data(_) | ServerHandler::Prompt(_) => {
                println!("Type 'exit' to quit, 'tools' to reprint the manifest, or run a command.");
                println!("Format: <operation> <number> <number> (e.g., add 2 3)");
            }
            ServerHandler::Autonomous(_) => {
                println!("Type a natural-language math problem, 'tools' for the manifest, 'exit' to quit.");
            }
        }
    }

    fn print_manifest(&self) {
        println!("Tools:");
        for descriptor in self.handler.descriptors() {
            println!("  - {}: {}", descriptor.name, descriptor.description);
            if let Ok(schema) = serde_json::to_string_pretty(&descriptor.input_schema()) {
                println!("    schema: {}", schema);
            }
        }
    }
}
