//! CLI entrypoint for opsdesk
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

mod output;

use anyhow::{bail, Context, Result};
use clap::Parser;
use opsdesk_application::{
    AnswerQueryInput, AnswerQueryUseCase, ChatGateway, ChunkSearchTool, HistoryStorePort,
    IncidentDataAgent, IncidentSopAgent, SqlDataTool,
};
use opsdesk_infrastructure::{
    ConfigLoader, ElasticVectorSearch, HttpEmbeddingProvider, OpenAiChatGateway, PgHistoryStore,
    PgQueryExecutor,
};
use sqlx::postgres::PgPoolOptions;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "opsdesk", version, about = "Incident management assistant")]
struct Cli {
    /// The question to answer
    question: Option<String>,

    /// Conversation id used for history continuity
    #[arg(long, default_value = "default")]
    chat_id: String,

    /// Print the process flow after the answer
    #[arg(long)]
    show_trace: bool,

    /// Path to the config file (defaults to opsdesk.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let question = match cli.question {
        Some(q) => q,
        None => bail!("Question is required."),
    };

    let config = ConfigLoader::load(cli.config.as_deref())
        .map_err(|e| anyhow::anyhow!(e))
        .context("failed to load configuration")?;

    info!("Starting opsdesk");

    // === Dependency Injection ===
    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .connect(&config.database.url)
        .await
        .context("failed to connect to the incident database")?;

    let executor = Arc::new(PgQueryExecutor::new(pool.clone()));
    let history = PgHistoryStore::new(pool);

    let mut search =
        ElasticVectorSearch::new(&config.elasticsearch.url, &config.elasticsearch.index);
    if let (Some(username), Some(password)) =
        (&config.elasticsearch.username, &config.elasticsearch.password)
    {
        search = search.with_basic_auth(username, password);
    }

    let mut embedder = HttpEmbeddingProvider::new(
        &config.embeddings.endpoint,
        &config.embeddings.model,
        config.embeddings.dimensions,
    );
    if let Some(api_key) = &config.embeddings.api_key {
        embedder = embedder.with_api_key(api_key);
    }

    let mut chat_gateway = OpenAiChatGateway::new(&config.llm.endpoint, &config.llm.model);
    if let Some(api_key) = &config.llm.api_key {
        chat_gateway = chat_gateway.with_api_key(api_key);
    }
    let gateway: Arc<dyn ChatGateway> = Arc::new(chat_gateway);

    let data_agent = Arc::new(
        IncidentDataAgent::new(gateway.clone(), SqlDataTool::new(executor))
            .with_max_tool_turns(config.chat.max_tool_turns),
    );
    let sop_agent = Arc::new(
        IncidentSopAgent::new(
            gateway,
            ChunkSearchTool::new(Arc::new(embedder), Arc::new(search)),
        )
        .with_max_tool_turns(config.chat.max_tool_turns),
    );

    let use_case = AnswerQueryUseCase::new(data_agent, sop_agent)
        .with_context_turns(config.chat.context_turns);

    // A history outage degrades to an uncontextualized query
    let turns = match history
        .recent_turns(&cli.chat_id, config.chat.context_turns)
        .await
    {
        Ok(turns) => turns,
        Err(err) => {
            warn!(%err, "could not fetch chat history");
            Vec::new()
        }
    };

    let input = AnswerQueryInput::new(question.clone()).with_history(turns);
    let outcome = use_case.execute(input).await?;

    println!("{}", outcome.response);

    if cli.show_trace {
        println!();
        println!("{}", output::format_trace(&outcome.process_flow));
    }

    if let Err(err) = history.append(&cli.chat_id, &question, &outcome.response).await {
        warn!(%err, "could not save chat turn");
    }

    Ok(())
}
