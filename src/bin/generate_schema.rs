//! Schema generator for the chat endpoint.
//!
//! Writes `api_schema.json` describing the request and response bodies so
//! front ends and API Gateway models can be kept in sync with the Lambda.

use anyhow::{Context, Result};
use std::fs;

const OUTPUT_FILE: &str = "api_schema.json";

fn main() -> Result<()> {
    let schema = chat_relay::schema::api_schema().context("Failed to generate schema")?;
    let json = serde_json::to_string_pretty(&schema).context("Failed to serialize schema")?;

    fs::write(OUTPUT_FILE, json).with_context(|| format!("Failed to write {OUTPUT_FILE}"))?;
    println!("Generated {OUTPUT_FILE}");

    Ok(())
}
