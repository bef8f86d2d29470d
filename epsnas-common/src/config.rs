//! Decoder configuration
//!
//! `DecoderConfig` is an immutable value read once per decode call. It is
//! normally loaded from YAML:
//!
//! ```yaml
//! dissect_plain: false
//! null_decipher: true
//! decode_user_data_container_as: ip
//! decipher_key: "000102030405060708090a0b0c0d0e0f"
//! ```

use std::fmt;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Length of an EEA2 ciphering key in bytes.
pub const CIPHER_KEY_LEN: usize = 16;

/// How the payload of a User data container IE is handed off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserDataContainerAs {
    /// Keep the container as raw bytes
    #[default]
    None,
    /// IP packet
    Ip,
    /// Non-IP data, handed to `non_ip_data_dissector`
    NonIp,
    /// Ethernet frame without FCS
    Ethernet,
}

impl fmt::Display for UserDataContainerAs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserDataContainerAs::None => write!(f, "none"),
            UserDataContainerAs::Ip => write!(f, "ip"),
            UserDataContainerAs::NonIp => write!(f, "non_ip"),
            UserDataContainerAs::Ethernet => write!(f, "ethernet"),
        }
    }
}

/// NAS-EPS decoder configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecoderConfig {
    /// Treat every message as plain, skipping the security header.
    #[serde(default)]
    pub dissect_plain: bool,
    /// Assume EEA0 when no key is configured.
    #[serde(default)]
    pub null_decipher: bool,
    /// Hand-off target for User data container payloads.
    #[serde(default)]
    pub decode_user_data_container_as: UserDataContainerAs,
    /// Protocol name used for non-IP User data container payloads.
    #[serde(default)]
    pub non_ip_data_dissector: String,
    /// EEA2 key as 32 hex characters.
    #[serde(default)]
    pub decipher_key: Option<String>,
    /// Maximum container nesting (ESM in EMM, replayed NAS message).
    #[serde(default = "default_max_nesting_depth")]
    pub max_nesting_depth: usize,
}

fn default_max_nesting_depth() -> usize {
    4
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            dissect_plain: false,
            null_decipher: false,
            decode_user_data_container_as: UserDataContainerAs::None,
            non_ip_data_dissector: String::new(),
            decipher_key: None,
            max_nesting_depth: default_max_nesting_depth(),
        }
    }
}

impl DecoderConfig {
    /// Parses a decoder configuration from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self, Error> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Loads a decoder configuration from a YAML file.
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let contents = fs::read_to_string(path)?;
        Self::from_yaml(&contents)
    }

    /// Serializes the configuration to a YAML string.
    pub fn to_yaml(&self) -> Result<String, Error> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Decodes the configured ciphering key.
    ///
    /// Returns `Ok(None)` when no key (or an empty string) is configured.
    /// Whitespace and `:` separators inside the hex string are ignored.
    pub fn cipher_key(&self) -> Result<Option<[u8; CIPHER_KEY_LEN]>, Error> {
        let Some(text) = self.decipher_key.as_deref() else {
            return Ok(None);
        };
        let cleaned: String = text
            .trim()
            .trim_start_matches("0x")
            .chars()
            .filter(|c| !c.is_whitespace() && *c != ':')
            .collect();
        if cleaned.is_empty() {
            return Ok(None);
        }

        let bytes = hex::decode(&cleaned).map_err(|e| Error::InvalidKey(e.to_string()))?;
        let key: [u8; CIPHER_KEY_LEN] = bytes.as_slice().try_into().map_err(|_| {
            Error::InvalidKey(format!(
                "expected {CIPHER_KEY_LEN} bytes, got {}",
                bytes.len()
            ))
        })?;
        Ok(Some(key))
    }

    /// Checks the configuration for consistency.
    pub fn validate(&self) -> Result<(), Error> {
        self.cipher_key()?;
        if self.max_nesting_depth == 0 {
            return Err(Error::Config(
                "max_nesting_depth must be at least 1".to_string(),
            ));
        }
        if self.decode_user_data_container_as == UserDataContainerAs::NonIp
            && self.non_ip_data_dissector.trim().is_empty()
        {
            return Err(Error::Config(
                "non_ip_data_dissector is required when decoding user data as non_ip".to_string(),
            ));
        }
        Ok(())
    }
}
