use std::sync::Arc;

use anyhow::Context;
use tokio::io::{AsyncBufReadExt, BufReader};

use autostream_agent::agent::{Agent, AgentDeps, ConversationState};
use autostream_agent::config::AgentConfig;
use autostream_agent::error::ConfigError;
use autostream_agent::intent::LlmIntentClassifier;
use autostream_agent::leads::LoggingLeadSink;
use autostream_agent::llm::{LlmProvider, OpenAiConfig, OpenAiProvider};
use autostream_agent::retrieval::{KnowledgeBase, KnowledgeRetriever};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let config = match AgentConfig::from_env() {
        Ok(config) => config,
        Err(ConfigError::MissingEnvVar(var)) => {
            eprintln!("Error: {var} not set");
            eprintln!("  export {var}=sk-...");
            std::process::exit(1);
        }
        Err(e) => return Err(e.into()),
    };

    eprintln!("{}", "=".repeat(60));
    eprintln!("AutoStream Conversational AI Agent");
    eprintln!("{}", "=".repeat(60));
    eprintln!();
    eprintln!("Welcome! I'm here to help you learn about AutoStream.");
    eprintln!("Type 'quit' or 'exit' to end the conversation.");
    eprintln!("   Model: {}", config.model);
    eprintln!("   Knowledge base: {}", config.knowledge_base_path.display());
    eprintln!();

    let kb = KnowledgeBase::load(&config.knowledge_base_path)
        .context("failed to load knowledge base")?;
    let retriever = Arc::new(KnowledgeRetriever::new(&kb));

    let llm: Arc<dyn LlmProvider> = Arc::new(OpenAiProvider::new(OpenAiConfig::new(
        config.api_key.clone(),
        config.model.clone(),
    ))?);
    let classifier = Arc::new(LlmIntentClassifier::new(llm.clone()));

    let agent = Agent::new(
        AgentDeps {
            llm,
            classifier,
            retriever,
            lead_sink: Arc::new(LoggingLeadSink::new()),
        },
        &config,
    );

    if std::env::args().any(|arg| arg == "--demo") {
        run_demo(&agent, config.debug).await
    } else {
        run_repl(&agent, config.debug).await
    }
}

/// Interactive line-oriented chat loop.
async fn run_repl(agent: &Agent, debug: bool) -> anyhow::Result<()> {
    let stdin = tokio::io::stdin();
    let mut lines = BufReader::new(stdin).lines();
    let mut state = ConversationState::new();

    eprint!("\nYou: ");
    while let Some(line) = lines.next_line().await? {
        let input = line.trim();
        if input.is_empty() {
            eprint!("\nYou: ");
            continue;
        }
        if matches!(input.to_lowercase().as_str(), "quit" | "exit" | "q") {
            eprintln!("\nThank you for chatting with AutoStream! Goodbye!");
            return Ok(());
        }

        match agent.process_turn(&state, input).await {
            Ok(outcome) => {
                println!("\nAgent: {}", outcome.response);
                state = outcome.state;
                if debug {
                    print_debug(&state);
                }
            }
            Err(e) => {
                // The turn failed; the previous state is still valid.
                eprintln!("\n[ERROR] {e}");
            }
        }
        eprint!("\nYou: ");
    }
    Ok(())
}

/// Scripted walk through a full conversation: inquiry, follow-up, lead
/// intent, then slot-filling to completion.
async fn run_demo(agent: &Agent, debug: bool) -> anyhow::Result<()> {
    const DEMO_MESSAGES: &[&str] = &[
        "Hi, tell me about your pricing.",
        "What's included in the Pro plan?",
        "That sounds good, I want to try the Pro plan for my YouTube channel.",
        "My name is John Doe",
        "john.doe@example.com",
    ];

    let mut state = ConversationState::new();
    eprintln!("Running demo conversation...\n");

    for (i, message) in DEMO_MESSAGES.iter().enumerate() {
        println!("\n[Turn {}] You: {message}", i + 1);
        let outcome = agent
            .process_turn(&state, message)
            .await
            .with_context(|| format!("demo turn {} failed", i + 1))?;
        println!("Agent: {}", outcome.response);
        state = outcome.state;
        if debug {
            print_debug(&state);
        }
    }

    eprintln!("\nDemo completed!");
    Ok(())
}

fn print_debug(state: &ConversationState) {
    let intent = state
        .intent
        .map(|i| i.to_string())
        .unwrap_or_else(|| "n/a".to_string());
    eprintln!("[DEBUG] Intent: {intent}");
    eprintln!("[DEBUG] Lead: {:?}", state.lead);
    eprintln!("[DEBUG] Turn: {}", state.turn_count);
}
