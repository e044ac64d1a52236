use std::time::Duration;

use anyhow::{Context, Result, bail};
use clap::Parser;
use payelink_agent_search::config::DEFAULT_BASE_URL;
use payelink_agent_search::{
    AgentSearch, AsyncAgentSearchClient, Capability, ClientConfig, IoMode, SearchDepth,
    SearchOptions, SearchResponse,
};

/// agent-search - discover agents through the Payelink agent search service
///
/// The API key is read from --api-key or the PAYELINK_KEY environment variable.
///
/// Examples:
///   agent-search "Convert USD to KES"
///   agent-search "Analyze a power purchase agreement" --country KE --max-result 3
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Natural language description of the task to be handled
    #[arg(value_name = "QUERY")]
    query: String,

    /// Maximum number of agents to return
    #[arg(long = "max-result", short = 'n', value_name = "N")]
    max_result: Option<u32>,

    /// Country name or ISO code of the agent's organization
    #[arg(long, short = 'c')]
    country: Option<String>,

    /// Capability the agent must support (streaming, pushNotifications)
    #[arg(long)]
    capability: Option<Capability>,

    /// Input mode the agent must accept (repeatable)
    #[arg(long = "input-mode", value_name = "MIME")]
    input_modes: Vec<IoMode>,

    /// Output mode the agent must produce (repeatable)
    #[arg(long = "output-mode", value_name = "MIME")]
    output_modes: Vec<IoMode>,

    /// Latency versus relevance tradeoff (basic, advanced)
    #[arg(long = "search-depth", value_name = "DEPTH")]
    search_depth: Option<SearchDepth>,

    /// Organization URL to search instead of discovering (repeatable)
    #[arg(long = "allowed-url", value_name = "URL")]
    allowed_urls: Vec<String>,

    /// Additional attempts after a timeout or connection failure
    #[arg(long, default_value_t = 2)]
    retries: u32,

    /// Per-attempt timeout in seconds
    #[arg(long, value_name = "SECS", default_value_t = 30)]
    timeout: u64,

    /// Service base URL
    #[arg(long = "base-url", env = "PAYELINK_BASE_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// API key sent as a bearer token
    #[arg(long = "api-key", env = "PAYELINK_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Print the full response as JSON
    #[arg(long)]
    json: bool,
}

impl Cli {
    fn client_config(&self) -> ClientConfig {
        ClientConfig::new(&self.base_url)
            .with_retries(self.retries)
            .with_timeout(Duration::from_secs(self.timeout))
            .with_api_key(self.api_key.clone())
    }

    fn search_options(&self) -> SearchOptions {
        SearchOptions {
            max_result: self.max_result,
            country: self.country.clone(),
            capability: self.capability,
            default_input_mode: non_empty(&self.input_modes),
            default_output_mode: non_empty(&self.output_modes),
            search_depth: self.search_depth,
            allowed_url: non_empty(&self.allowed_urls),
        }
    }
}

fn non_empty<T: Clone>(values: &[T]) -> Option<Vec<T>> {
    if values.is_empty() {
        None
    } else {
        Some(values.to_vec())
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    let client = AsyncAgentSearchClient::from_config(cli.client_config())
        .context("Failed to create search client")?;
    let output = run(&client, &cli).await?;
    print!("{}", output);
    Ok(())
}

async fn run(searcher: &dyn AgentSearch, cli: &Cli) -> Result<String> {
    let response = searcher
        .search(&cli.query, cli.search_options())
        .await
        .context("Agent search failed")?;

    if cli.json {
        let mut output = serde_json::to_string_pretty(&response)?;
        output.push('\n');
        return Ok(output);
    }

    if !response.success {
        bail!(
            "Agent search failed: {}",
            response.error.as_deref().unwrap_or("the service reported a failure")
        );
    }

    Ok(render(&response))
}

fn render(response: &SearchResponse) -> String {
    if response.agents.is_empty() {
        return "No agents found\n".to_string();
    }

    let mut output = String::new();
    for agent in &response.agents {
        output.push_str(&format!(
            "{}\t{}\t{}\n",
            agent.agent_name.as_deref().unwrap_or("-"),
            agent.agent_url.as_deref().unwrap_or("-"),
            agent.organization_name.as_deref().unwrap_or("-"),
        ));
    }
    output
}
