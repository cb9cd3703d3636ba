//! Language selection for response messages
//!
//! Domain errors carry both languages as `"English | 中文"`; the API picks one
//! half according to the request's `Accept-Language` header.

use actix_web::{http::header, HttpRequest};

use mall_core::errors::{extract_chinese_message, extract_english_message};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    English,
    Chinese,
}

impl Language {
    /// Pick the highest-weighted supported language from an `Accept-Language` value.
    ///
    /// Example: `"zh-CN,zh;q=0.9,en-US;q=0.8"` selects Chinese.
    pub fn from_header(value: Option<&str>) -> Self {
        let Some(value) = value else {
            return Language::English;
        };

        let mut preferred = Language::English;
        let mut best = 0.0_f32;

        for entry in value.split(',') {
            let mut parts = entry.trim().split(';');
            let tag = parts.next().unwrap_or("").trim().to_lowercase();
            let quality = parts
                .find_map(|p| p.trim().strip_prefix("q=").map(str::to_string))
                .and_then(|q| q.parse::<f32>().ok())
                .unwrap_or(1.0);

            let candidate = if tag.starts_with("zh") {
                Language::Chinese
            } else if tag.starts_with("en") {
                Language::English
            } else {
                continue;
            };

            if quality > best {
                preferred = candidate;
                best = quality;
            }
        }

        preferred
    }

    pub fn from_request(req: &HttpRequest) -> Self {
        Self::from_header(
            req.headers()
                .get(header::ACCEPT_LANGUAGE)
                .and_then(|v| v.to_str().ok()),
        )
    }

    /// Select this language's half of a bilingual message
    pub fn localize<'a>(&self, message: &'a str) -> &'a str {
        match self {
            Language::English => extract_english_message(message),
            Language::Chinese => extract_chinese_message(message),
        }
    }
}
