//! Main entry point for the startup-intel binary
//!
//! Wires the real Ollama, Tavily and file-backed collaborators into an
//! orchestrator and exposes pipeline runs, similarity lookup and session
//! inspection as subcommands.

use std::io::{self, BufRead, Write};

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};

use agents::core::text::preview;
use agents::{LlmPitchGenerator, LlmSummarizer, LocalVectorStore, OllamaClient, SearchResearchAgent, TavilyClient, VectorStore};
use orchestrator::{FileSessionStore, Orchestrator, OrchestratorError, PipelineConfig, SessionStore};
use shared::{logging, stage_debug, stage_info, PipelineState, Stage};

const PREVIEW_CHARS: usize = 250;

/// Startup intelligence: market research, summary and pitch outline for a startup idea
#[derive(Parser)]
#[command(name = "startup-intel")]
#[command(about = "Researches a startup idea and drafts an investor pitch outline")]
pub struct Args {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the pipeline for a topic
    Run {
        /// Startup idea to research (prompted on stdin when omitted)
        #[arg(long)]
        topic: Option<String>,

        /// Save the run as a new chat session titled with the topic
        #[arg(long)]
        save_session: bool,

        /// Append the run to an existing chat session
        #[arg(long, conflicts_with = "save_session")]
        session: Option<String>,

        /// Fewer search results, shorter timeout, no vector storage
        #[arg(long)]
        quick: bool,
    },

    /// Find stored research similar to a query
    Similar {
        #[arg(long)]
        query: String,

        #[arg(long, default_value = "3")]
        k: usize,
    },

    /// Inspect stored chat sessions
    Sessions {
        #[command(subcommand)]
        action: SessionsCommand,
    },
}

#[derive(Subcommand)]
pub enum SessionsCommand {
    /// List sessions, most recently updated first
    List,
    /// Show one session's conversation
    Show { id: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logging::init_tracing_with_level(args.log_level.as_deref());

    let config = PipelineConfig::from_env().context("loading configuration")?;

    let result = execute(config, args.command).await;
    match &result {
        Ok(()) => logging::log_shutdown(Stage::Cli, "command finished"),
        Err(e) => {
            logging::log_error(Stage::Cli, "Command", &format!("{e:#}"));
            logging::log_shutdown(Stage::Cli, "command failed");
        }
    }
    result
}

async fn execute(mut config: PipelineConfig, command: Command) -> anyhow::Result<()> {
    match command {
        Command::Run {
            topic,
            save_session,
            session,
            quick,
        } => {
            if quick {
                config.apply_quick_mode();
            }
            let topic = match topic {
                Some(topic) => topic,
                None => prompt_topic()?,
            };
            if topic.trim().is_empty() {
                bail!("a startup idea is required");
            }
            run(&config, topic.trim(), save_session, session).await
        }
        Command::Similar { query, k } => similar(&config, &query, k).await,
        Command::Sessions { action } => sessions(&config, action).await,
    }
}

fn prompt_topic() -> anyhow::Result<String> {
    print!("Enter your startup idea: ");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

async fn run(config: &PipelineConfig, topic: &str, save_session: bool, session: Option<String>) -> anyhow::Result<()> {
    config.require_search_key()?;

    let llm = OllamaClient::new(config.ollama_config())?.with_stage(Stage::Processing);
    let search = TavilyClient::new(config.tavily_config()?)?;
    let research = SearchResearchAgent::new(search, llm.clone().with_stage(Stage::Research), config.max_research_results);
    let store = LocalVectorStore::open(llm.clone().with_stage(Stage::Vectorize), &config.vector_dir)?;

    stage_debug!(
        Stage::Cli,
        "Model {} at {}, {} search results, storage {}",
        config.ollama_model,
        config.ollama_base_url,
        config.max_research_results,
        if config.vector_storage_skipped() { "skipped" } else { "enabled" }
    );

    let orchestrator = Orchestrator::new(
        config.clone(),
        research,
        LlmSummarizer::new(llm.clone()),
        LlmPitchGenerator::new(llm),
        store,
    );
    let state = orchestrator.invoke(topic).await;
    print_result(&state);

    let sessions = FileSessionStore::new(config.sessions_dir());
    if let Some(id) = session {
        if sessions.get_session(&id).await?.is_none() {
            return Err(OrchestratorError::SessionNotFound { id }.into());
        }
        sessions.update_session(&id, Some(topic.to_string()), Some(state)).await?;
        stage_info!(Stage::Cli, "💬 Appended run to session {}", id);
    } else if save_session {
        let id = sessions.create_session(topic, topic, &state).await?;
        println!("\nSaved session {id}");
    }

    Ok(())
}

fn print_result(state: &PipelineState) {
    println!("\n=== Pitch Outline ===\n{}", state.pitch());
    println!("\n=== Summary ===\n{}", state.summary());
    println!("\n[{}]", state.vector_status());
}

async fn similar(config: &PipelineConfig, query: &str, k: usize) -> anyhow::Result<()> {
    let llm = OllamaClient::new(config.ollama_config())?;
    let store = LocalVectorStore::open(llm.with_stage(Stage::Vectorize), &config.vector_dir)?;

    let results = store.similarity_search(query, k).await?;
    if results.is_empty() {
        println!("No similar research found.");
        return Ok(());
    }

    for (i, scored) in results.iter().enumerate() {
        let content = &scored.document.page_content;
        let ellipsis = if content.chars().count() > PREVIEW_CHARS { "..." } else { "" };
        println!(
            "{}. {} (score {:.3})\n{}{}\n",
            i + 1,
            scored.document.metadata.topic,
            scored.score,
            preview(content, PREVIEW_CHARS),
            ellipsis
        );
    }
    Ok(())
}

async fn sessions(config: &PipelineConfig, action: SessionsCommand) -> anyhow::Result<()> {
    let store = FileSessionStore::new(config.sessions_dir());

    match action {
        SessionsCommand::List => {
            let sessions = store.list_sessions().await?;
            if sessions.is_empty() {
                println!("No sessions yet.");
            }
            for session in sessions {
                println!("{}  {}  {}", session.id, format_ts(session.updated_at), session.title);
            }
        }
        SessionsCommand::Show { id } => {
            let Some(record) = store.get_session(&id).await? else {
                return Err(OrchestratorError::SessionNotFound { id }.into());
            };
            println!("{} (created {})", record.title, format_ts(record.created_at));
            for message in &record.messages {
                let role = match message.role {
                    shared::ChatRole::User => "user",
                    shared::ChatRole::Assistant => "assistant",
                };
                println!("\n[{role}]\n{}", message.content);
            }
        }
    }
    Ok(())
}

fn format_ts(ts: i64) -> String {
    chrono::DateTime::<chrono::Utc>::from_timestamp(ts, 0)
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| ts.to_string())
}
