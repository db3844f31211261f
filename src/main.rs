//! Main entry point for the orchestrator.
//!
//! Initializes logging, loads environment variables and the optional
//! configuration file, then hands the goal to the coordinator for
//! decomposition and execution.

mod agents;
mod cli;
mod config;
mod constants;
mod core;
mod errors;
mod llm;
mod sandbox;
mod tools;
mod utils;

use clap::Parser;
use colored::*;
use crate::core::Coordinator;
use tracing::{error, warn};

const DEFAULT_LLM_PROVIDER: &str = "openai";
const DEFAULT_LLM_MODEL: &str = "gpt-4o-mini";

#[tokio::main]
async fn main() {
    let cli = cli::Cli::try_parse().expect("Failed to parse CLI arguments");
    utils::init_logging(&cli.logging_level, cli.log_to_file);

    if let Err(e) = dotenvy::dotenv() {
        warn!("Failed to load .env file: {}", e);
    }

    let config = match &cli.config {
        Some(path) => match config::load_config(path) {
            Ok(config) => config,
            Err(e) => {
                error!("{}", e);
                std::process::exit(1);
            }
        },
        None => config::OrchestratorConfig::default(),
    };

    let llm_provider = cli
        .llm_provider
        .or_else(|| config.parameters.llm_provider.clone())
        .unwrap_or_else(|| DEFAULT_LLM_PROVIDER.to_string());
    let llm_model = cli
        .llm_model
        .or_else(|| config.parameters.llm_model.clone())
        .unwrap_or_else(|| DEFAULT_LLM_MODEL.to_string());

    println!("{}", format!("🎯 Goal: {}", cli.goal).bold().cyan());

    let mut coordinator = match Coordinator::from_config(&config, &llm_provider, &llm_model) {
        Ok(coordinator) => coordinator,
        Err(e) => {
            error!("Failed to initialize the coordinator: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = coordinator.process_goal(&cli.goal).await {
        error!("Goal processing failed: {}", e);
        std::process::exit(1);
    }
}
