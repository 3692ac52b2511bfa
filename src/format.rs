use anyhow::{Result, bail};
use serde::Serialize;
use std::str::FromStr;

/// Output format for structured data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Plain text for humans
    #[default]
    Text,
    /// JSON - machine-parseable
    Json,
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => bail!("Invalid format '{}'. Use: text or json", s),
        }
    }
}

impl OutputFormat {
    /// Serialize data to the requested format
    pub fn serialize<T: Serialize>(self, data: &T) -> Result<String> {
        match self {
            Self::Json => serde_json::to_string_pretty(data)
                .map_err(|e| anyhow::anyhow!("JSON serialization failed: {}", e)),
            // Text format shouldn't use this path - caller renders raw text
            Self::Text => bail!("Text format should not use serialize()"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_formats() {
        assert_eq!("text".parse::<OutputFormat>().unwrap(), OutputFormat::Text);
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
    }

    #[test]
    fn rejects_unknown_format() {
        assert!("yaml".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn json_serializes() {
        let out = OutputFormat::Json.serialize(&vec!["a", "b"]).unwrap();
        assert!(out.contains("\"a\""));
    }

    #[test]
    fn text_refuses_serialize() {
        assert!(OutputFormat::Text.serialize(&1).is_err());
    }
}
