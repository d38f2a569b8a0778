//! Basic Gemini client usage example

use gemini_client::{Content, GeminiClient, GenerateContentRequest, Part, Tool};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize from environment
    let client = GeminiClient::from_env()?;

    println!("=== Search-grounded generation ===");
    let request = GenerateContentRequest::new()
        .content(Content::user(vec![Part::text(
            "Who won the most recent Tour de France? Answer in one sentence.",
        )]))
        .tool(Tool::google_search());

    let response = client.generate_content("gemini-2.5-flash", &request).await?;

    println!("Response: {}", response.text().unwrap_or_default());

    println!("\n=== Sources ===");
    for chunk in response.grounding_chunks() {
        if let Some(web) = &chunk.web {
            println!(
                "- {} ({})",
                web.title.as_deref().unwrap_or("Source"),
                web.uri.as_deref().unwrap_or("")
            );
        }
    }

    Ok(())
}
