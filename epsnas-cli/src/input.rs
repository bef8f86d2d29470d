//! Hex input parsing
//!
//! Accepts the formats captures are usually pasted in: plain hex, hex with
//! spaces or `:` separators, and an optional `0x` prefix. Lines starting
//! with `#` are comments.

use anyhow::{bail, Context, Result};

/// Parses one input line into message bytes.
///
/// Returns `Ok(None)` for blank and comment lines.
pub fn parse_hex_message(line: &str) -> Result<Option<Vec<u8>>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let body = line
        .strip_prefix("0x")
        .or_else(|| line.strip_prefix("0X"))
        .unwrap_or(line);
    let cleaned: String = body
        .chars()
        .filter(|c| !c.is_whitespace() && *c != ':' && *c != '-')
        .collect();

    if cleaned.len() % 2 != 0 {
        bail!("odd number of hex digits ({})", cleaned.len());
    }
    let data = hex::decode(&cleaned).with_context(|| format!("invalid hex: {line}"))?;
    Ok(Some(data))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_hex() {
        assert_eq!(parse_hex_message("074502").unwrap(), Some(vec![0x07, 0x45, 0x02]));
    }

    #[test]
    fn test_separators_and_prefix() {
        assert_eq!(parse_hex_message("0x07 45:02").unwrap(), Some(vec![0x07, 0x45, 0x02]));
        assert_eq!(parse_hex_message("  07-45-02  ").unwrap(), Some(vec![0x07, 0x45, 0x02]));
    }

    #[test]
    fn test_blank_and_comment_lines() {
        assert_eq!(parse_hex_message("").unwrap(), None);
        assert_eq!(parse_hex_message("   ").unwrap(), None);
        assert_eq!(parse_hex_message("# attach request").unwrap(), None);
    }

    #[test]
    fn test_invalid_input() {
        assert!(parse_hex_message("07 4").is_err());
        assert!(parse_hex_message("zz").is_err());
    }
}
