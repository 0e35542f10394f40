//! `agentic-chat suggestions` — List conversation starters.

use agentic_chat_responder::PROMPT_SUGGESTIONS;

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    println!("💡 Try one of these:\n");
    for (index, suggestion) in PROMPT_SUGGESTIONS.iter().enumerate() {
        println!("  {}. {}", index + 1, suggestion.title);
        println!("     {}\n", suggestion.prompt);
    }
    println!("  Run `agentic-chat chat -m \"<prompt>\"` to try one.");

    Ok(())
}
