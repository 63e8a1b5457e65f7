use clap::Parser;

// CLI argument structure
#[derive(Parser, Debug, Clone)]
#[command(name = "summarizer-gateway")]
#[command(about = "Rate-limited gateway for a hosted abstract summarization model")]
pub struct Args {
    // Port to run the server on
    #[arg(short, long, default_value_t = 8080)]
    pub port: u16,

    // Base URL of the hosted inference service
    #[arg(short, long, default_value = "https://api-inference.huggingface.co")]
    pub upstream_url: String,

    // Summarization model id on the inference service
    #[arg(short, long, default_value = "facebook/bart-large-cnn")]
    pub model: String,

    // Bearer token for the inference service, if it needs one
    #[arg(long)]
    pub api_token: Option<String>,

    // Cache TTL in seconds
    #[arg(short, long, default_value_t = 300)]
    pub cache_ttl: u64,

    // Rate limit max requests per window
    #[arg(long, default_value_t = 10)]
    pub rate_limit: u32,

    // Rate limit window in seconds
    #[arg(long, default_value_t = 60)]
    pub rate_window: u64,

    // Seconds between sweeps of expired rate limit entries
    #[arg(long, default_value_t = 300)]
    pub cleanup_interval: u64,

    // Per-request timeout for the upstream call, in seconds
    #[arg(long, default_value_t = 30)]
    pub upstream_timeout: u64,
}
