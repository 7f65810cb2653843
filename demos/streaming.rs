//! Streaming content generation example.
//!
//! Prints each response chunk as soon as it has fully arrived, along with
//! the latency since the request was sent, then reports the accumulated
//! response and token usage.
//!
//! # Usage
//!
//! ```bash
//! export GEMINI_API_KEY="your-api-key-here"
//! cargo run --example streaming
//! ```

use std::io::Write;
use std::time::Instant;

use futures::StreamExt;
use gemini_stream::streaming::StreamAccumulator;
use gemini_stream::types::{GenerateContentRequest, GenerationConfig};
use gemini_stream::GeminiClient;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_target(false)
        .init();

    let client = GeminiClient::from_env()?;
    let model =
        std::env::var("GEMINI_MODEL").unwrap_or_else(|_| "gemini-1.5-pro".to_string());

    let prompt = "Write a short story about a robot learning to paint. \
                  Make it about 200 words.";
    let mut request = GenerateContentRequest::from_prompt(prompt);
    request.generation_config = Some(GenerationConfig {
        candidate_count: Some(1),
        ..Default::default()
    });

    println!("Prompt: {prompt}\n");

    let started = Instant::now();
    let mut stream = client.content().generate_stream(&model, request).await?;

    let mut accumulator = StreamAccumulator::new();
    let mut chunk_count = 0u32;

    while let Some(result) = stream.next().await {
        match result {
            Ok(chunk) => {
                chunk_count += 1;
                let latency = started.elapsed();
                print!("[{:>7.3}s] {}", latency.as_secs_f64(), chunk.text());
                std::io::stdout().flush()?;
                println!();
                accumulator.add_chunk(chunk);
            }
            Err(e) => {
                eprintln!("\nError receiving chunk: {e}");
                return Err(e.into());
            }
        }
    }

    let final_response = accumulator.finalize();

    println!("\nChunks received: {chunk_count}");
    println!("Total time: {:.3}s", started.elapsed().as_secs_f64());

    if let Some(usage) = &final_response.usage_metadata {
        println!("\nPrompt tokens:     {}", usage.prompt_token_count);
        println!(
            "Completion tokens: {}",
            usage.candidates_token_count.unwrap_or(0)
        );
        println!("Total tokens:      {}", usage.total_token_count);
    }

    if let Some(candidate) = final_response
        .candidates
        .as_ref()
        .and_then(|c| c.first())
    {
        if let Some(finish_reason) = &candidate.finish_reason {
            println!("\nFinish reason: {finish_reason:?}");
        }
    }

    Ok(())
}
