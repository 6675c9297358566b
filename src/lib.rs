//! Backend proxy for the "Dinh Dưỡng Thông Minh" diet-tracking app: AI
//! meal-plan generation and nutrition chat over the Gemini API.

// No unsafe, no undocumented public items, no sloppy style.
#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(nonstandard_style)]
#![deny(unused_must_use)]
// Clippy discipline for production paths.
#![deny(clippy::all)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::print_stdout)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]

/// Chat prompt framing for the nutrition assistant.
pub mod chat;
/// Environment-driven server configuration.
pub mod config;
/// Generative-model clients (Gemini).
pub mod llm;
/// Nutrition math (BMR/TDEE).
pub mod nutrition;
/// Meal-plan generation core: targets, prompt, sanitization, validation.
pub mod plan;
/// HTTP server and API routes.
pub mod server;
/// Entry helpers to start the server.
pub mod start_nutriplan;
