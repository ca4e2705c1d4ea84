//! Smoke test for the Gemini API configuration
//! This is a utility binary, not part of the main application

use pdf_chat_backend::config::Config;
use pdf_chat_backend::llm::{ChatClient, GeminiClient};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env();
    println!("Testing Gemini API access from Rust...\n");

    println!("1. Checking for GOOGLE_API_KEY environment variable...");
    match &config.gemini.api_key {
        Some(key) => println!("   ✓ GOOGLE_API_KEY is set (length: {} chars)", key.len()),
        None => {
            eprintln!("   ✗ GOOGLE_API_KEY not found in environment");
            eprintln!("   Export it first: export GOOGLE_API_KEY=\"your-key\"");
            return Err("GOOGLE_API_KEY not set".into());
        }
    }

    println!("\n2. Sending test prompt to {}...", config.gemini.model);
    let client = GeminiClient::from_config(&config.gemini)?;
    match client
        .send_message(
            &config.gemini.model,
            &[],
            "What is 2+2? Answer in one sentence.",
        )
        .await
    {
        Ok(reply) => {
            println!("   ✓ Response received:");
            println!("   {}", reply.trim());
        }
        Err(e) => {
            eprintln!("   ✗ Request failed: {}", e);
            return Err(e.into());
        }
    }

    println!("\n✓ All checks passed!");
    Ok(())
}
