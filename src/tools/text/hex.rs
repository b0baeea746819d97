use crate::utils::error::{Result, ToolError};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum Encoding {
    Hex,
    Binary,
    Decimal,
    Octal,
}

impl Encoding {
    fn radix(&self) -> u32 {
        match self {
            Encoding::Hex => 16,
            Encoding::Binary => 2,
            Encoding::Decimal => 10,
            Encoding::Octal => 8,
        }
    }

    fn prefix(&self) -> &'static str {
        match self {
            Encoding::Hex => "0x",
            Encoding::Binary => "0b",
            Encoding::Octal => "0o",
            Encoding::Decimal => "",
        }
    }

    /// Digits per byte when the input is an unseparated stream.
    fn stream_width(&self) -> Option<usize> {
        match self {
            Encoding::Hex => Some(2),
            Encoding::Binary => Some(8),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncodeOptions {
    pub separator: String,
    pub uppercase: bool,
    pub prefix: bool,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            separator: " ".to_string(),
            uppercase: false,
            prefix: false,
        }
    }
}

pub fn encode(text: &str, encoding: Encoding, options: &EncodeOptions) -> String {
    let prefix = if options.prefix { encoding.prefix() } else { "" };

    text.as_bytes()
        .iter()
        .map(|&byte| {
            let digits = match encoding {
                Encoding::Hex if options.uppercase => format!("{:02X}", byte),
                Encoding::Hex => format!("{:02x}", byte),
                Encoding::Binary => format!("{:08b}", byte),
                Encoding::Decimal => byte.to_string(),
                Encoding::Octal => format!("{:03o}", byte),
            };
            format!("{}{}", prefix, digits)
        })
        .collect::<Vec<_>>()
        .join(&options.separator)
}

fn strip_prefix<'a>(token: &'a str, encoding: Encoding) -> &'a str {
    let prefix = encoding.prefix();
    if prefix.is_empty() {
        return token;
    }
    match token.get(..prefix.len()) {
        Some(head) if token.len() > prefix.len() && head.eq_ignore_ascii_case(prefix) => {
            &token[prefix.len()..]
        }
        _ => token,
    }
}

fn parse_byte(digits: &str, encoding: Encoding) -> Result<u8> {
    u8::from_str_radix(digits, encoding.radix()).map_err(|_| ToolError::DecodeError {
        message: format!("'{}' is not a valid base-{} byte", digits, encoding.radix()),
    })
}

pub fn decode(input: &str, encoding: Encoding) -> Result<String> {
    let mut bytes = Vec::new();

    let tokens = input
        .split(|c: char| c.is_whitespace() || matches!(c, ',' | ':' | ';'))
        .filter(|t| !t.is_empty());

    for token in tokens {
        let digits = strip_prefix(token, encoding);
        match encoding.stream_width() {
            Some(width) if digits.len() > width => {
                if !digits.is_ascii() || digits.len() % width != 0 {
                    return Err(ToolError::DecodeError {
                        message: format!(
                            "'{}' has {} digits, expected a multiple of {}",
                            digits,
                            digits.chars().count(),
                            width
                        ),
                    });
                }
                for start in (0..digits.len()).step_by(width) {
                    bytes.push(parse_byte(&digits[start..start + width], encoding)?);
                }
            }
            _ => bytes.push(parse_byte(digits, encoding)?),
        }
    }

    tracing::debug!("Decoded {} bytes from {:?} input", bytes.len(), encoding);

    String::from_utf8(bytes).map_err(|e| ToolError::DecodeError {
        message: format!("decoded bytes are not valid UTF-8: {}", e),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_single_character() {
        let options = EncodeOptions::default();
        assert_eq!(encode("A", Encoding::Hex, &options), "41");
        assert_eq!(encode("A", Encoding::Binary, &options), "01000001");
        assert_eq!(encode("A", Encoding::Decimal, &options), "65");
        assert_eq!(encode("A", Encoding::Octal, &options), "101");
    }

    #[test]
    fn test_encode_options() {
        let options = EncodeOptions {
            separator: ",".to_string(),
            uppercase: true,
            prefix: true,
        };
        assert_eq!(encode("\n\u{ff}", Encoding::Hex, &options), "0x0A,0xC3,0xBF");
        assert_eq!(encode("", Encoding::Hex, &options), "");
    }

    #[test]
    fn test_encode_utf8_bytes() {
        assert_eq!(encode("é", Encoding::Hex, &EncodeOptions::default()), "c3 a9");
    }

    #[test]
    fn test_decode_separated_and_streamed() {
        assert_eq!(decode("48 65 6c 6c 6f", Encoding::Hex).unwrap(), "Hello");
        assert_eq!(decode("48656C6C6F", Encoding::Hex).unwrap(), "Hello");
        assert_eq!(decode("0x48,0x69", Encoding::Hex).unwrap(), "Hi");
        assert_eq!(decode("0100100001101001", Encoding::Binary).unwrap(), "Hi");
        assert_eq!(decode("72 105", Encoding::Decimal).unwrap(), "Hi");
        assert_eq!(decode("110:151", Encoding::Octal).unwrap(), "Hi");
    }

    #[test]
    fn test_decode_reverses_encode() {
        let text = "Grüße, 世界!";
        for encoding in [Encoding::Hex, Encoding::Binary, Encoding::Decimal, Encoding::Octal] {
            let encoded = encode(text, encoding, &EncodeOptions::default());
            assert_eq!(decode(&encoded, encoding).unwrap(), text);
        }
    }

    #[test]
    fn test_decode_errors() {
        assert!(decode("486", Encoding::Hex).is_err());
        assert!(decode("zz", Encoding::Hex).is_err());
        assert!(decode("256", Encoding::Decimal).is_err());
        assert!(decode("012", Encoding::Binary).is_err());
        assert!(decode("ff fe", Encoding::Hex).is_err());
    }
}
