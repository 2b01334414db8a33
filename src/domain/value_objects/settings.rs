//! Assistant settings value object
//!
//! Settings are persisted as plain string key/value pairs. The key set is
//! part of the storage contract, so the keys live next to the type.

use serde::{Deserialize, Serialize};

/// Store key for the selected chat provider
pub const PROVIDER_KEY: &str = "ai_provider";
/// Store key for the provider credential
pub const API_KEY_KEY: &str = "ai_key";

/// Remote text-generation provider
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AiProvider {
    #[default]
    OpenAi,
    Anthropic,
    Google,
}

impl AiProvider {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OpenAi => "openai",
            Self::Anthropic => "anthropic",
            Self::Google => "google",
        }
    }
}

impl std::str::FromStr for AiProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "openai" => Ok(Self::OpenAi),
            "anthropic" => Ok(Self::Anthropic),
            "google" => Ok(Self::Google),
            other => Err(format!("Unknown AI provider: {}", other)),
        }
    }
}

impl std::fmt::Display for AiProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Provider selection plus credential
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AiSettings {
    #[serde(default)]
    pub provider: AiProvider,
    #[serde(default)]
    pub api_key: String,
}

impl AiSettings {
    /// A blank key means the remote assistant is not configured
    pub fn has_credential(&self) -> bool {
        !self.api_key.trim().is_empty()
    }

    /// Key with everything but the last four characters hidden
    pub fn masked_key(&self) -> String {
        let chars: Vec<char> = self.api_key.chars().collect();
        if chars.len() <= 4 {
            return "*".repeat(chars.len());
        }
        let visible: String = chars[chars.len() - 4..].iter().collect();
        format!("{}{}", "*".repeat(chars.len() - 4), visible)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_parses_case_insensitively() {
        assert_eq!("OpenAI".parse::<AiProvider>(), Ok(AiProvider::OpenAi));
        assert_eq!(" google ".parse::<AiProvider>(), Ok(AiProvider::Google));
        assert!("mistral".parse::<AiProvider>().is_err());
    }

    #[test]
    fn test_blank_key_is_not_a_credential() {
        let mut settings = AiSettings::default();
        assert!(!settings.has_credential());
        settings.api_key = "   ".to_string();
        assert!(!settings.has_credential());
        settings.api_key = "sk-test".to_string();
        assert!(settings.has_credential());
    }

    #[test]
    fn test_masked_key_keeps_last_four() {
        let settings = AiSettings {
            provider: AiProvider::Anthropic,
            api_key: "sk-abcdef1234".to_string(),
        };
        assert_eq!(settings.masked_key(), "*********1234");
        let short = AiSettings {
            provider: AiProvider::OpenAi,
            api_key: "abc".to_string(),
        };
        assert_eq!(short.masked_key(), "***");
    }
}
