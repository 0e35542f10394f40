//! `agentic-chat chat` — Interactive or single-message chat mode.

use agentic_chat_core::{ChatMessage, Transcript};
use agentic_chat_responder::{Responder, WELCOME_MESSAGE};
use tokio::io::{self, AsyncBufReadExt, BufReader};

const EXIT_COMMANDS: &[&str] = &["exit", "quit", "/exit", "/quit", ":q"];

pub async fn run(message: Option<String>) -> Result<(), Box<dyn std::error::Error>> {
    let responder = Responder::builtin()?;

    if let Some(msg) = message {
        // Single message mode
        println!("{}", responder.respond(&[ChatMessage::user(msg)]));
        return Ok(());
    }

    println!();
    println!("  ╔══════════════════════════════════════════════╗");
    println!("  ║       Agentic Chat — Interactive Mode        ║");
    println!("  ╚══════════════════════════════════════════════╝");
    println!();
    println!("  Type your message and press Enter.");
    println!("  Type 'exit' or Ctrl+C to quit.");
    println!();

    let mut transcript = Transcript::with_greeting(WELCOME_MESSAGE);
    print_assistant(WELCOME_MESSAGE);

    let mut lines = BufReader::new(io::stdin()).lines();
    prompt_user()?;

    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            prompt_user()?;
            continue;
        }
        if EXIT_COMMANDS.contains(&line) {
            break;
        }

        let reply = exchange(&responder, &mut transcript, line);
        print_assistant(&reply);
        prompt_user()?;
    }

    tracing::debug!(
        turns = transcript.user_turns(),
        "Interactive session finished"
    );
    println!();
    println!("  Goodbye! 👋");
    println!();

    Ok(())
}

/// Record the user's turn, answer it from the whole transcript and record
/// the answer.
fn exchange(responder: &Responder, transcript: &mut Transcript, input: &str) -> String {
    transcript.push(ChatMessage::user(input));
    let reply = responder.respond(transcript.messages());
    transcript.push(ChatMessage::assistant(reply.clone()));
    reply
}

fn print_assistant(text: &str) {
    println!();
    for line in text.lines() {
        println!("  Assistant > {line}");
    }
    println!();
}

fn prompt_user() -> std::io::Result<()> {
    use std::io::Write;
    print!("  You > ");
    std::io::stdout().flush()
}
