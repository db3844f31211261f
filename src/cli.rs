use clap::Parser;

/// Command line interface for the orchestrator
#[derive(Parser)]
#[command(name = "forgeline", about = "Goal-driven multi-agent task orchestrator")]
pub struct Cli {
    /// Goal to decompose and carry out
    pub goal: String,

    /// Path to an optional YAML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// LLM provider ("openai" or "ollama"), overrides the configuration
    #[arg(long)]
    pub llm_provider: Option<String>,

    /// Model name, overrides the configuration
    #[arg(long)]
    pub llm_model: Option<String>,

    /// Sets the logging verbosity level for the application
    /// Possible values: "error", "warn", "info", "debug", "trace"
    /// Default: "info"
    #[arg(long, default_value_t = String::from("info"))]
    pub logging_level: String,

    /// Also write logs to a rolling file under logs/
    #[arg(long, default_value_t = false)]
    pub log_to_file: bool,
}
