use neurapay_agent::{
    anthropic::AnthropicClient,
    api::start_server,
    config::AppConfig,
    conversational::ChatAgent,
    ledger::LedgerClient,
    prompt::describe_tools,
    sources::TransactionFetcher,
    tools::create_default_registry,
};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables
    dotenv::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = AppConfig::from_env()?;

    info!("NeuraPay Agent - API Server");
    info!("Port: {}", config.port);
    info!("Model: {}", config.model);
    info!("Banking API: {}", config.liminal_base_url);

    let ledger = LedgerClient::new(&config.liminal_base_url)?;
    let fetcher = Arc::new(TransactionFetcher::new(
        Some(ledger),
        config.transactions_csv.clone(),
    ));
    let registry = Arc::new(create_default_registry(fetcher));
    info!(
        "Registered {} tools:\n{}",
        registry.len(),
        describe_tools(&registry.definitions())
    );

    let llm = Arc::new(AnthropicClient::from_config(&config)?);
    let agent = Arc::new(ChatAgent::new(llm, registry));

    info!("Starting API server...");
    start_server(agent, config.port).await?;

    Ok(())
}
