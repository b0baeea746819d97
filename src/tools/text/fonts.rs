//! Unicode "font" styles built from the Mathematical Alphanumeric Symbols
//! block and a few lookalike alphabets.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "kebab-case")]
pub enum FontStyle {
    Bold,
    Italic,
    BoldItalic,
    Script,
    BoldScript,
    Fraktur,
    DoubleStruck,
    Sans,
    SansBold,
    SansItalic,
    Monospace,
    Circled,
    Fullwidth,
    SmallCaps,
    UpsideDown,
}

impl FontStyle {
    pub const ALL: [FontStyle; 15] = [
        FontStyle::Bold,
        FontStyle::Italic,
        FontStyle::BoldItalic,
        FontStyle::Script,
        FontStyle::BoldScript,
        FontStyle::Fraktur,
        FontStyle::DoubleStruck,
        FontStyle::Sans,
        FontStyle::SansBold,
        FontStyle::SansItalic,
        FontStyle::Monospace,
        FontStyle::Circled,
        FontStyle::Fullwidth,
        FontStyle::SmallCaps,
        FontStyle::UpsideDown,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            FontStyle::Bold => "bold",
            FontStyle::Italic => "italic",
            FontStyle::BoldItalic => "bold-italic",
            FontStyle::Script => "script",
            FontStyle::BoldScript => "bold-script",
            FontStyle::Fraktur => "fraktur",
            FontStyle::DoubleStruck => "double-struck",
            FontStyle::Sans => "sans",
            FontStyle::SansBold => "sans-bold",
            FontStyle::SansItalic => "sans-italic",
            FontStyle::Monospace => "monospace",
            FontStyle::Circled => "circled",
            FontStyle::Fullwidth => "fullwidth",
            FontStyle::SmallCaps => "small-caps",
            FontStyle::UpsideDown => "upside-down",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StyledText {
    pub style: &'static str,
    pub text: String,
}

/// Code point layout of one alphabet in the math block.
struct MathAlphabet {
    upper: u32,
    lower: u32,
    digits: Option<u32>,
    /// Letters living in the Letterlike Symbols block instead.
    holes: &'static [(char, u32)],
}

const BOLD: MathAlphabet = MathAlphabet {
    upper: 0x1D400,
    lower: 0x1D41A,
    digits: Some(0x1D7CE),
    holes: &[],
};
const ITALIC: MathAlphabet = MathAlphabet {
    upper: 0x1D434,
    lower: 0x1D44E,
    digits: None,
    holes: &[('h', 0x210E)],
};
const BOLD_ITALIC: MathAlphabet = MathAlphabet {
    upper: 0x1D468,
    lower: 0x1D482,
    digits: None,
    holes: &[],
};
const SCRIPT: MathAlphabet = MathAlphabet {
    upper: 0x1D49C,
    lower: 0x1D4B6,
    digits: None,
    holes: &[
        ('B', 0x212C),
        ('E', 0x2130),
        ('F', 0x2131),
        ('H', 0x210B),
        ('I', 0x2110),
        ('L', 0x2112),
        ('M', 0x2133),
        ('R', 0x211B),
        ('e', 0x212F),
        ('g', 0x210A),
        ('o', 0x2134),
    ],
};
const BOLD_SCRIPT: MathAlphabet = MathAlphabet {
    upper: 0x1D4D0,
    lower: 0x1D4EA,
    digits: None,
    holes: &[],
};
const FRAKTUR: MathAlphabet = MathAlphabet {
    upper: 0x1D504,
    lower: 0x1D51E,
    digits: None,
    holes: &[('C', 0x212D), ('H', 0x210C), ('I', 0x2111), ('R', 0x211C), ('Z', 0x2128)],
};
const DOUBLE_STRUCK: MathAlphabet = MathAlphabet {
    upper: 0x1D538,
    lower: 0x1D552,
    digits: Some(0x1D7D8),
    holes: &[
        ('C', 0x2102),
        ('H', 0x210D),
        ('N', 0x2115),
        ('P', 0x2119),
        ('Q', 0x211A),
        ('R', 0x211D),
        ('Z', 0x2124),
    ],
};
const SANS: MathAlphabet = MathAlphabet {
    upper: 0x1D5A0,
    lower: 0x1D5BA,
    digits: Some(0x1D7E2),
    holes: &[],
};
const SANS_BOLD: MathAlphabet = MathAlphabet {
    upper: 0x1D5D4,
    lower: 0x1D5EE,
    digits: Some(0x1D7EC),
    holes: &[],
};
const SANS_ITALIC: MathAlphabet = MathAlphabet {
    upper: 0x1D608,
    lower: 0x1D622,
    digits: None,
    holes: &[],
};
const MONOSPACE: MathAlphabet = MathAlphabet {
    upper: 0x1D670,
    lower: 0x1D68A,
    digits: Some(0x1D7F6),
    holes: &[],
};

const SMALL_CAPS: [char; 26] = [
    'ᴀ', 'ʙ', 'ᴄ', 'ᴅ', 'ᴇ', 'ꜰ', 'ɢ', 'ʜ', 'ɪ', 'ᴊ', 'ᴋ', 'ʟ', 'ᴍ', 'ɴ', 'ᴏ', 'ᴘ', 'ǫ', 'ʀ', 'ꜱ', 'ᴛ',
    'ᴜ', 'ᴠ', 'ᴡ', 'x', 'ʏ', 'ᴢ',
];

const UPSIDE_DOWN: [char; 26] = [
    'ɐ', 'q', 'ɔ', 'p', 'ǝ', 'ɟ', 'ƃ', 'ɥ', 'ᴉ', 'ɾ', 'ʞ', 'l', 'ɯ', 'u', 'o', 'd', 'b', 'ɹ', 's', 'ʇ',
    'n', 'ʌ', 'ʍ', 'x', 'ʎ', 'z',
];

impl MathAlphabet {
    fn map(&self, c: char) -> char {
        if let Some(&(_, cp)) = self.holes.iter().find(|(hole, _)| *hole == c) {
            return char::from_u32(cp).unwrap_or(c);
        }
        let code = match c {
            'A'..='Z' => self.upper + (c as u32 - 'A' as u32),
            'a'..='z' => self.lower + (c as u32 - 'a' as u32),
            '0'..='9' => match self.digits {
                Some(base) => base + (c as u32 - '0' as u32),
                None => return c,
            },
            _ => return c,
        };
        char::from_u32(code).unwrap_or(c)
    }
}

fn math_alphabet(style: FontStyle) -> Option<&'static MathAlphabet> {
    Some(match style {
        FontStyle::Bold => &BOLD,
        FontStyle::Italic => &ITALIC,
        FontStyle::BoldItalic => &BOLD_ITALIC,
        FontStyle::Script => &SCRIPT,
        FontStyle::BoldScript => &BOLD_SCRIPT,
        FontStyle::Fraktur => &FRAKTUR,
        FontStyle::DoubleStruck => &DOUBLE_STRUCK,
        FontStyle::Sans => &SANS,
        FontStyle::SansBold => &SANS_BOLD,
        FontStyle::SansItalic => &SANS_ITALIC,
        FontStyle::Monospace => &MONOSPACE,
        _ => return None,
    })
}

fn circled(c: char) -> char {
    let code = match c {
        'A'..='Z' => 0x24B6 + (c as u32 - 'A' as u32),
        'a'..='z' => 0x24D0 + (c as u32 - 'a' as u32),
        '0' => 0x24EA,
        '1'..='9' => 0x2460 + (c as u32 - '1' as u32),
        _ => return c,
    };
    char::from_u32(code).unwrap_or(c)
}

fn fullwidth(c: char) -> char {
    match c {
        ' ' => '\u{3000}',
        '!'..='~' => char::from_u32(c as u32 + 0xFEE0).unwrap_or(c),
        _ => c,
    }
}

fn small_caps(c: char) -> char {
    match c {
        'a'..='z' => SMALL_CAPS[(c as u8 - b'a') as usize],
        _ => c,
    }
}

fn upside_down(c: char) -> char {
    match c {
        'a'..='z' => UPSIDE_DOWN[(c as u8 - b'a') as usize],
        'A'..='Z' => UPSIDE_DOWN[(c.to_ascii_lowercase() as u8 - b'a') as usize],
        '.' => '˙',
        ',' => '\'',
        '\'' => ',',
        '?' => '¿',
        '!' => '¡',
        '(' => ')',
        ')' => '(',
        '[' => ']',
        ']' => '[',
        '6' => '9',
        '9' => '6',
        _ => c,
    }
}

pub fn stylize(text: &str, style: FontStyle) -> String {
    if let Some(alphabet) = math_alphabet(style) {
        return text.chars().map(|c| alphabet.map(c)).collect();
    }
    match style {
        FontStyle::Circled => text.chars().map(circled).collect(),
        FontStyle::Fullwidth => text.chars().map(fullwidth).collect(),
        FontStyle::SmallCaps => text.chars().map(small_caps).collect(),
        FontStyle::UpsideDown => text.chars().rev().map(upside_down).collect(),
        _ => text.to_string(),
    }
}

pub fn stylize_all(text: &str) -> Vec<StyledText> {
    FontStyle::ALL
        .iter()
        .map(|&style| StyledText {
            style: style.name(),
            text: stylize(text, style),
        })
        .collect()
}
