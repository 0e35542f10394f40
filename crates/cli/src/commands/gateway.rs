//! `agentic-chat gateway` — Start the HTTP API server.

use agentic_chat_config::AppConfig;

pub async fn run(port_override: Option<u16>) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;

    if let Some(port) = port_override {
        config.gateway.port = port;
        config.validate()?;
    }

    println!("💬 Agentic Chat Gateway");
    println!("   Listening:  {}", config.bind_addr());
    println!("   CORS:       {}", config.gateway.allowed_origin);
    println!("   Rate limit: {} req/min", config.gateway.rate_limit_per_minute);

    agentic_chat_gateway::start(config).await?;

    Ok(())
}
