use clap::Parser;
use colored::*;
use eyre::{Context, Result};
use log::info;
use std::fs;
use std::path::PathBuf;

mod cli;

use cli::Cli;
use cli::commands::Commands;
use mcp_math::chat::ChatSession;
use mcp_math::config::Config;
use mcp_math::demo;
use mcp_math::llm::{OpenAiClient, OpenAiConfig};
use mcp_math::planner::Planner;
use mcp_math::registry::{Registry, ServerCategory};
use mcp_math::servers::ServerHandler;

fn setup_logging() -> Result<()> {
    // Create log directory
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("mcp-math")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    let log_file = log_dir.join("mcp-math.log");

    // Setup env_logger with file output
    let target = Box::new(
        fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_file)
            .context("Failed to open log file")?,
    );

    env_logger::Builder::from_default_env()
        .target(env_logger::Target::Pipe(target))
        .init();

    info!("Logging initialized, writing to: {}", log_file.display());
    Ok(())
}

async fn run_application(cli: &Cli, config: &Config) -> Result<()> {
    info!("Starting application");

    if cli.is_verbose() {
        println!("{}", "Verbose mode enabled".yellow());
    }

    let registry = Registry::builtin();

    match &cli.command {
        None => {
            // Default: chat against the configured default server
            run_chat(&registry, config, None, None, false, None).await
        }
        Some(Commands::Chat {
            server,
            model,
            show_json,
            planner,
            no_planner,
        }) => {
            let planner_flag = if *planner {
                Some(true)
            } else if *no_planner {
                Some(false)
            } else {
                None
            };
            run_chat(
                &registry,
                config,
                server.as_deref(),
                model.clone(),
                *show_json,
                planner_flag,
            )
            .await
        }
        Some(Commands::Demo { scenario, list }) => {
            if *list {
                demo::list_scenarios();
                return Ok(());
            }
            demo::run(&registry, &config.llm, scenario.as_deref()).await?;
            Ok(())
        }
        Some(Commands::List) => {
            handle_list_command(&registry);
            Ok(())
        }
    }
}

fn handle_list_command(registry: &Registry) {
    println!("Available servers:");
    for blueprint in registry.list_all() {
        println!("  - {} ({})", blueprint.name.cyan(), blueprint.category.label());
        println!("    aliases: {}", blueprint.aliases.join(", "));
        println!("    {}", blueprint.summary);
    }
}

async fn run_chat(
    registry: &Registry,
    config: &Config,
    server: Option<&str>,
    model: Option<String>,
    show_json: bool,
    planner_flag: Option<bool>,
) -> Result<()> {
    let key = server.unwrap_or(&config.chat.default_server);
    let blueprint = registry.resolve(key)?;
    let handler = ServerHandler::build(blueprint.category, &config.llm)?;
    info!("Starting chat session against {}", blueprint.name);

    // Planner defaults to on for every category except autonomous, which
    // already reasons internally
    let wants_planner = planner_flag.unwrap_or(blueprint.category != ServerCategory::Autonomous);
    let planner = if wants_planner {
        if OpenAiClient::available() {
            let client = OpenAiClient::new(OpenAiConfig::from(&config.llm))?;
            let planner_model = model.clone().unwrap_or_else(|| config.llm.model.clone());
            Some(Planner::new(Box::new(client), planner_model))
        } else {
            println!(
                "{}",
                "[chat] Planner requested but OpenAI is unavailable; falling back to manual mode."
                    .yellow()
            );
            None
        }
    } else {
        None
    };

    let mut session = ChatSession::new(blueprint, handler)
        .with_show_json(show_json || config.chat.show_json)
        .with_model(model);
    if let Some(planner) = planner {
        session = session.with_planner(planner);
    }

    session.run().await?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    setup_logging()?;

    let cli = Cli::parse();
    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;

    run_application(&cli, &config).await
}
