/// OpenAI API provider
///
/// Backs the three generative capabilities: review summaries, fallback
/// recommendations, and vision-based text extraction from uploaded images.
/// All calls go through the chat-completions endpoint; images travel as
/// base64 PNG data URLs inside a vision message.
///
/// Fail-soft: a failed or empty completion normalizes to an empty string or
/// empty list so the orchestration keeps a defined input downstream.
use base64::{engine::general_purpose::STANDARD, Engine as _};
use image::{DynamicImage, ImageFormat};
use reqwest::Client as HttpClient;
use serde_json::{json, Value};
use std::io::Cursor;

use crate::{error::AppResult, services::providers::GenerativeProvider};

const SUMMARY_MAX_TOKENS: u32 = 400;
const RECOMMEND_MAX_TOKENS: u32 = 200;
const OCR_MAX_TOKENS: u32 = 1000;

#[derive(Clone)]
pub struct OpenAiProvider {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
    model: String,
}

impl OpenAiProvider {
    pub fn new(api_key: String, api_url: String, model: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            api_key,
            api_url,
            model,
        }
    }

    /// Sends one chat-completions request and returns the completion text,
    /// or an empty string when anything goes wrong.
    async fn complete(&self, content: Value, max_tokens: u32) -> String {
        let url = format!("{}/v1/chat/completions", self.api_url);

        let body = json!({
            "model": self.model,
            "messages": [{ "role": "user", "content": content }],
            "max_tokens": max_tokens,
        });

        let response = match self
            .http_client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
        {
            Ok(response) if response.status().is_success() => response,
            Ok(response) => {
                tracing::warn!(
                    status = %response.status(),
                    provider = "openai",
                    "Completion returned error status"
                );
                return String::new();
            }
            Err(e) => {
                tracing::warn!(error = %e, provider = "openai", "Completion request failed");
                return String::new();
            }
        };

        let parsed: Value = match response.json().await {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::warn!(error = %e, provider = "openai", "Failed to parse completion");
                return String::new();
            }
        };

        parsed["choices"][0]["message"]["content"]
            .as_str()
            .unwrap_or_default()
            .trim()
            .to_string()
    }
}

/// Encodes an image as base64 PNG for the vision API
fn image_to_base64(image: &DynamicImage) -> AppResult<String> {
    let mut buffer = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut buffer), ImageFormat::Png)
        .map_err(|e| crate::error::AppError::Internal(format!("Failed to encode image: {}", e)))?;
    Ok(STANDARD.encode(&buffer))
}

/// Splits a one-title-per-line completion into a title list
fn parse_title_lines(completion: &str) -> Vec<String> {
    completion
        .lines()
        .map(|line| line.trim_start_matches(['-', '*']).trim_start())
        .map(strip_numbering)
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Removes a leading "1." / "2)" numbering prefix from a line.
///
/// A bare digit run is only numbering when a delimiter and whitespace
/// follow; titles that start with digits ("1917", "300",
/// "2001: A Space Odyssey") pass through untouched.
fn strip_numbering(line: &str) -> &str {
    let digit_end = line
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(line.len());
    if digit_end == 0 {
        return line;
    }

    if let Some(rest) = line[digit_end..].strip_prefix(['.', ')']) {
        if rest.is_empty() || rest.starts_with(char::is_whitespace) {
            return rest;
        }
    }

    line
}

#[async_trait::async_trait]
impl GenerativeProvider for OpenAiProvider {
    async fn summarize(&self, title: &str) -> AppResult<String> {
        let prompt = format!(
            "Write a concise review summary of the movie \"{}\" in 4-6 sentences. \
            Cover the premise, tone, and critical reception. \
            Return only the summary text.",
            title
        );

        let summary = self.complete(json!(prompt), SUMMARY_MAX_TOKENS).await;

        tracing::info!(
            title = %title,
            chars = summary.len(),
            provider = "openai",
            "Summary generated"
        );

        Ok(summary)
    }

    async fn recommend_titles(&self, genre: &str) -> AppResult<Vec<String>> {
        let prompt = format!(
            "Recommend 5 widely acclaimed {} movies. \
            Return only the movie titles, one per line, with no numbering or commentary.",
            genre
        );

        let completion = self.complete(json!(prompt), RECOMMEND_MAX_TOKENS).await;
        let titles = parse_title_lines(&completion);

        tracing::info!(
            genre = %genre,
            results = titles.len(),
            provider = "openai",
            "AI recommendations generated"
        );

        Ok(titles)
    }

    async fn extract_text(&self, image: DynamicImage) -> AppResult<String> {
        let base64_image = image_to_base64(&image)?;

        let content = json!([
            {
                "type": "text",
                "text": "Extract all text visible in this image. \
                    Return only the extracted text, with no commentary. \
                    If the image contains no text, return an empty response."
            },
            {
                "type": "image_url",
                "image_url": {
                    "url": format!("data:image/png;base64,{}", base64_image)
                }
            }
        ]);

        let extracted = self.complete(content, OCR_MAX_TOKENS).await;

        tracing::info!(
            chars = extracted.len(),
            provider = "openai",
            "Image text extraction completed"
        );

        Ok(extracted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_title_lines_plain() {
        let completion = "Inception\nThe Matrix\nInterstellar";
        assert_eq!(
            parse_title_lines(completion),
            vec!["Inception", "The Matrix", "Interstellar"]
        );
    }

    #[test]
    fn test_parse_title_lines_strips_bullets_and_numbering() {
        let completion = "1. Inception\n2) The Matrix\n- Interstellar\n* Arrival";
        assert_eq!(
            parse_title_lines(completion),
            vec!["Inception", "The Matrix", "Interstellar", "Arrival"]
        );
    }

    #[test]
    fn test_parse_title_lines_skips_blank_lines() {
        let completion = "Inception\n\n   \nThe Matrix\n";
        assert_eq!(parse_title_lines(completion), vec!["Inception", "The Matrix"]);
    }

    #[test]
    fn test_parse_title_lines_empty_completion() {
        assert!(parse_title_lines("").is_empty());
    }

    #[test]
    fn test_parse_title_lines_keeps_digit_leading_titles() {
        let completion = "1917\n2001: A Space Odyssey\n300";
        assert_eq!(
            parse_title_lines(completion),
            vec!["1917", "2001: A Space Odyssey", "300"]
        );
    }

    #[test]
    fn test_parse_title_lines_numbered_digit_leading_titles() {
        let completion = "1. 1917\n2) 300\n3. 2001: A Space Odyssey";
        assert_eq!(
            parse_title_lines(completion),
            vec!["1917", "300", "2001: A Space Odyssey"]
        );
    }

    #[test]
    fn test_image_to_base64_round_trips() {
        let image = DynamicImage::new_rgb8(2, 2);
        let encoded = image_to_base64(&image).unwrap();
        let decoded = STANDARD.decode(encoded).unwrap();
        // PNG magic bytes
        assert_eq!(&decoded[..4], &[0x89, b'P', b'N', b'G']);
    }
}
