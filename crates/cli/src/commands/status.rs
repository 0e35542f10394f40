//! `agentic-chat status` — Show configuration and responder status.

use agentic_chat_config::AppConfig;
use agentic_chat_responder::{FALLBACK_THRESHOLD, Responder};

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;
    let responder = Responder::builtin()?;

    let rules: Vec<_> = responder
        .heuristics()
        .rules()
        .iter()
        .map(|rule| rule.name())
        .collect();
    let entries: Vec<_> = responder
        .knowledge()
        .entries()
        .iter()
        .map(|entry| entry.id.as_str())
        .collect();

    println!("💬 Agentic Chat Status");
    println!("======================");
    println!("  Config dir:   {}", AppConfig::config_dir().display());
    println!("  Gateway:      {}", config.bind_addr());
    println!("  CORS origin:  {}", config.gateway.allowed_origin);
    println!("  Body limit:   {} bytes", config.gateway.body_limit_bytes);
    println!("  Rate limit:   {} req/min", config.gateway.rate_limit_per_minute);
    println!(
        "  Logging:      {}{}",
        config.logging.level,
        if config.logging.json { " (json)" } else { "" }
    );
    println!("  Heuristics:   {}", rules.join(" → "));
    println!("  Knowledge:    {}", entries.join(", "));
    println!("  Threshold:    {FALLBACK_THRESHOLD}");

    if AppConfig::config_path().exists() {
        println!("\n  ✅ Config file found");
    } else {
        println!("\n  ⚠️  No config file — run `agentic-chat onboard` first");
    }

    Ok(())
}
