//! Random photo lookup against Unsplash and relay of the image bytes.
//!
//! Every failure on this path collapses into [`AppError::NotFoundError`] so the
//! caller only ever sees "Image not found".

use reqwest::{Client, Url};

use crate::api::models::ImageQuery;
use crate::config::Config;
use crate::error::{AppError, Result};

fn not_found() -> AppError {
    AppError::NotFoundError("Image not found".to_string())
}

/// Asks Unsplash for a random photo matching `query` and returns its raw URL.
pub async fn random_photo_url(client: &Client, config: &Config, query: &str) -> Result<Url> {
    let url = format!("{}/photos/random", config.unsplash_base_url);

    let res = client
        .get(&url)
        .query(&[
            ("query", query),
            ("client_id", config.unsplash_access_key.as_str()),
        ])
        .send()
        .await
        .map_err(|e| {
            tracing::warn!(error = %e.without_url(), "Unsplash request failed");
            not_found()
        })?;

    if !res.status().is_success() {
        tracing::warn!(status = res.status().as_u16(), "Unsplash returned an error status");
        return Err(not_found());
    }

    let json: serde_json::Value = res.json().await.map_err(|e| {
        tracing::warn!(error = %e.without_url(), "Unsplash response was not JSON");
        not_found()
    })?;

    let raw = json["urls"]["raw"].as_str().ok_or_else(|| {
        tracing::warn!("Unsplash response has no urls.raw field");
        not_found()
    })?;

    Url::parse(raw).map_err(|e| {
        tracing::warn!(error = %e, "Unsplash returned an unusable image URL");
        not_found()
    })
}

/// Appends the requested bounds to the image URL. Minimum and maximum bounds
/// share the `w` and `h` parameters; both are passed through in order and the
/// image host decides which one applies.
pub fn with_size_hints(mut url: Url, hints: &ImageQuery) -> Url {
    let params = [
        ("w", hints.min_width),
        ("h", hints.min_height),
        ("w", hints.max_width),
        ("h", hints.max_height),
    ];

    if params.iter().any(|(_, value)| value.is_some()) {
        let mut pairs = url.query_pairs_mut();
        for (name, value) in params {
            if let Some(value) = value {
                pairs.append_pair(name, &value.to_string());
            }
        }
    }

    url
}

pub async fn download(client: &Client, url: Url) -> Result<Vec<u8>> {
    let res = client.get(url).send().await.map_err(|e| {
        tracing::warn!(error = %e.without_url(), "Image download failed");
        not_found()
    })?;

    if !res.status().is_success() {
        tracing::warn!(status = res.status().as_u16(), "Image host returned an error status");
        return Err(not_found());
    }

    let bytes = res.bytes().await.map_err(|e| {
        tracing::warn!(error = %e.without_url(), "Failed to read image body");
        not_found()
    })?;

    Ok(bytes.to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hints(
        min_width: Option<u32>,
        min_height: Option<u32>,
        max_width: Option<u32>,
        max_height: Option<u32>,
    ) -> ImageQuery {
        ImageQuery {
            query: "otter".to_string(),
            min_width,
            min_height,
            max_width,
            max_height,
        }
    }

    #[test]
    fn url_is_untouched_without_hints() {
        let url = Url::parse("https://images.unsplash.com/photo-1?ixid=abc").unwrap();
        let out = with_size_hints(url.clone(), &hints(None, None, None, None));
        assert_eq!(out, url);
    }

    #[test]
    fn bounds_are_appended_in_order_after_existing_query() {
        let url = Url::parse("https://images.unsplash.com/photo-1?ixid=abc").unwrap();
        let out = with_size_hints(url, &hints(Some(100), Some(200), Some(800), None));
        assert_eq!(out.query(), Some("ixid=abc&w=100&h=200&w=800"));
    }

    #[test]
    fn bounds_start_a_query_when_url_has_none() {
        let url = Url::parse("https://images.unsplash.com/photo-1").unwrap();
        let out = with_size_hints(url, &hints(None, None, None, Some(600)));
        assert_eq!(out.as_str(), "https://images.unsplash.com/photo-1?h=600");
    }
}
