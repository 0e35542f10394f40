//! End-to-end integration tests for Agentic Chat.
//!
//! These tests exercise the full pipeline from a conversation history to a
//! reply, both directly through the responder and over HTTP through the
//! gateway router built from a real configuration.

use std::sync::Arc;

use agentic_chat_config::AppConfig;
use agentic_chat_core::{ChatMessage, Role, Transcript};
use agentic_chat_gateway::{GatewayState, RespondResponse, build_router};
use agentic_chat_responder::{
    IDLE_REPLY, PROMPT_SUGGESTIONS, Responder, Route, WELCOME_MESSAGE,
};
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use tower::ServiceExt;

// ── Helpers ──────────────────────────────────────────────────────────────

fn responder() -> Responder {
    Responder::builtin().expect("built-in responder is valid")
}

fn app() -> axum::Router {
    let state = Arc::new(GatewayState::new(Arc::new(responder())));
    build_router(state, &AppConfig::default().gateway).expect("default gateway config is valid")
}

async fn post_messages(app: axum::Router, messages: &[ChatMessage]) -> (StatusCode, String) {
    let body = serde_json::json!({ "messages": messages });
    let req = Request::builder()
        .method("POST")
        .uri("/api/respond")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    let response = app.oneshot(req).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

// ── E2E: Responder scenarios ─────────────────────────────────────────────

#[test]
fn e2e_only_non_user_roles_is_idle() {
    let responder = responder();
    for history in [
        vec![],
        vec![ChatMessage::system("rules")],
        vec![ChatMessage::assistant(WELCOME_MESSAGE)],
        vec![
            ChatMessage::system("rules"),
            ChatMessage::assistant("hello, what is your plan?"),
        ],
    ] {
        assert_eq!(responder.respond(&history), IDLE_REPLY);
    }
}

#[test]
fn e2e_scenario_replies() {
    let responder = responder();

    let hello = responder.respond(&[ChatMessage::user("hello")]);
    assert!(hello.starts_with("Hi there!"));

    let plan = responder.respond(&[ChatMessage::user("Help me plan a product launch roadmap")]);
    assert!(plan.contains("**Context** –"));
    assert!(plan.contains("Help me plan a product launch roadmap"));

    let bug = responder.reply(&[ChatMessage::user("I have a bug in my React component")]);
    assert!(matches!(bug.route, Route::Knowledge { ref entry, .. } if entry == "code-help"));
    assert!(bug.text.contains("2. **Steps to implement**"));
    assert!(bug.text.contains("```ts"));

    let gibberish = responder.respond(&[ChatMessage::user("qwertyuiop zzz")]);
    assert!(!gibberish.contains("From what we've covered"));
    assert!(gibberish.contains("Drop more details"));
}

#[test]
fn e2e_fallback_with_earlier_turn_has_lead_in() {
    let history = vec![
        ChatMessage::user("let's write a blog post"),
        ChatMessage::assistant("..."),
        ChatMessage::user("qwertyuiop"),
    ];
    let reply = responder().respond(&history);
    let lead_in = reply.lines().next().unwrap();
    assert!(lead_in.contains("refining some writing"));
}

#[test]
fn e2e_suggestions_route_to_expected_paths() {
    let responder = responder();
    let routes: Vec<Route> = PROMPT_SUGGESTIONS
        .iter()
        .map(|s| responder.reply(&[ChatMessage::user(s.prompt)]).route)
        .collect();

    // "outline a product launch plan" → whole-word "plan".
    assert_eq!(routes[0], Route::Heuristic { rule: "plan" });
    // "Review this React component ..." → code-help by keywords.
    assert!(matches!(&routes[1], Route::Knowledge { entry, .. } if entry == "code-help"));
    // "Rewrite this landing page hero copy ..." → writing by keywords.
    assert!(matches!(&routes[2], Route::Knowledge { entry, .. } if entry == "writing"));
}

#[test]
fn e2e_transcript_conversation_is_deterministic() {
    let responder = responder();
    let mut first = Transcript::with_greeting(WELCOME_MESSAGE);
    let mut second = Transcript::with_greeting(WELCOME_MESSAGE);

    for input in ["hey", "our product needs a launch", "qwertyuiop"] {
        for transcript in [&mut first, &mut second] {
            transcript.push(ChatMessage::user(input));
            let reply = responder.respond(transcript.messages());
            transcript.push(ChatMessage::assistant(reply));
        }
    }

    assert_eq!(first, second);
    let last = first.messages().last().unwrap();
    assert_eq!(last.role, Role::Assistant);
    assert!(last.content.contains("shaping a product concept"));
}

// ── E2E: Gateway ─────────────────────────────────────────────────────────

#[tokio::test]
async fn e2e_gateway_round_trip() {
    let (status, body) = post_messages(
        app(),
        &[
            ChatMessage::assistant(WELCOME_MESSAGE),
            ChatMessage::user("I have a bug in my React component"),
        ],
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let reply: RespondResponse = serde_json::from_str(&body).unwrap();
    assert!(reply.message.contains("Reframe the problem"));
}

#[tokio::test]
async fn e2e_gateway_matches_direct_call() {
    let history = vec![
        ChatMessage::user("let's write a blog post"),
        ChatMessage::assistant("..."),
        ChatMessage::user("qwertyuiop"),
    ];
    let (status, body) = post_messages(app(), &history).await;
    assert_eq!(status, StatusCode::OK);

    let reply: RespondResponse = serde_json::from_str(&body).unwrap();
    assert_eq!(reply.message, responder().respond(&history));
}

#[tokio::test]
async fn e2e_gateway_rejects_object_messages() {
    let req = Request::builder()
        .method("POST")
        .uri("/api/respond")
        .header("content-type", "application/json")
        .body(Body::from(r#"{"messages": {"role": "user", "content": "hi"}}"#))
        .unwrap();

    let response = app().oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
