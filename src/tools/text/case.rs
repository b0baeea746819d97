use super::SENTENCE_END;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum CaseStyle {
    Upper,
    Lower,
    Title,
    Sentence,
    Camel,
    Pascal,
    Snake,
    Kebab,
    Constant,
    Dot,
    Alternating,
    Inverse,
}

impl CaseStyle {
    pub const ALL: [CaseStyle; 12] = [
        CaseStyle::Upper,
        CaseStyle::Lower,
        CaseStyle::Title,
        CaseStyle::Sentence,
        CaseStyle::Camel,
        CaseStyle::Pascal,
        CaseStyle::Snake,
        CaseStyle::Kebab,
        CaseStyle::Constant,
        CaseStyle::Dot,
        CaseStyle::Alternating,
        CaseStyle::Inverse,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            CaseStyle::Upper => "UPPER CASE",
            CaseStyle::Lower => "lower case",
            CaseStyle::Title => "Title Case",
            CaseStyle::Sentence => "Sentence case",
            CaseStyle::Camel => "camelCase",
            CaseStyle::Pascal => "PascalCase",
            CaseStyle::Snake => "snake_case",
            CaseStyle::Kebab => "kebab-case",
            CaseStyle::Constant => "CONSTANT_CASE",
            CaseStyle::Dot => "dot.case",
            CaseStyle::Alternating => "aLtErNaTiNg",
            CaseStyle::Inverse => "iNVERSE",
        }
    }
}

pub fn convert_case(text: &str, style: CaseStyle) -> String {
    match style {
        CaseStyle::Upper => text.to_uppercase(),
        CaseStyle::Lower => text.to_lowercase(),
        CaseStyle::Title => title_case(text),
        CaseStyle::Sentence => sentence_case(text),
        CaseStyle::Camel => {
            let words = split_words(text);
            let mut out = String::new();
            for (i, word) in words.iter().enumerate() {
                if i == 0 {
                    out.push_str(&word.to_lowercase());
                } else {
                    out.push_str(&capitalize(word));
                }
            }
            out
        }
        CaseStyle::Pascal => split_words(text).iter().map(|w| capitalize(w)).collect(),
        CaseStyle::Snake => join_words(text, "_", false),
        CaseStyle::Kebab => join_words(text, "-", false),
        CaseStyle::Constant => join_words(text, "_", true),
        CaseStyle::Dot => join_words(text, ".", false),
        CaseStyle::Alternating => alternating_case(text),
        CaseStyle::Inverse => text
            .chars()
            .map(|c| {
                if c.is_uppercase() {
                    c.to_lowercase().collect::<String>()
                } else if c.is_lowercase() {
                    c.to_uppercase().collect::<String>()
                } else {
                    c.to_string()
                }
            })
            .collect(),
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut at_word_start = true;
    for c in text.chars() {
        if c.is_whitespace() {
            at_word_start = true;
            out.push(c);
        } else if at_word_start {
            out.extend(c.to_uppercase());
            at_word_start = false;
        } else {
            out.extend(c.to_lowercase());
        }
    }
    out
}

fn sentence_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut start = 0;
    for m in SENTENCE_END.find_iter(text) {
        capitalize_first(&text[start..m.end()], &mut out);
        start = m.end();
    }
    capitalize_first(&text[start..], &mut out);
    out
}

fn capitalize_first(sentence: &str, out: &mut String) {
    let mut done = false;
    for c in sentence.chars() {
        if !done && c.is_alphanumeric() {
            out.extend(c.to_uppercase());
            done = true;
        } else {
            out.extend(c.to_lowercase());
        }
    }
}

fn alternating_case(text: &str) -> String {
    let mut upper = false;
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if c.is_alphabetic() {
            if upper {
                out.extend(c.to_uppercase());
            } else {
                out.extend(c.to_lowercase());
            }
            upper = !upper;
        } else {
            out.push(c);
        }
    }
    out
}

fn join_words(text: &str, separator: &str, upper: bool) -> String {
    split_words(text)
        .iter()
        .map(|w| if upper { w.to_uppercase() } else { w.to_lowercase() })
        .collect::<Vec<_>>()
        .join(separator)
}

/// Splits identifiers and prose into words on separators and camelCase humps.
/// `"parseHTTPResponse_code"` yields `["parse", "HTTP", "Response", "code"]`.
pub fn split_words(text: &str) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    let mut words = Vec::new();
    let mut current = String::new();

    for (i, &c) in chars.iter().enumerate() {
        if !c.is_alphanumeric() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            continue;
        }

        if c.is_uppercase() && !current.is_empty() {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            let boundary = prev.is_lowercase()
                || prev.is_numeric()
                || (prev.is_uppercase() && next_is_lower);
            if boundary {
                words.push(std::mem::take(&mut current));
            }
        }
        current.push(c);
    }

    if !current.is_empty() {
        words.push(current);
    }
    words
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upper_and_lower() {
        assert_eq!(convert_case("abc", CaseStyle::Upper), "ABC");
        assert_eq!(convert_case("Hello World", CaseStyle::Lower), "hello world");
        assert_eq!(convert_case("straße", CaseStyle::Upper), "STRASSE");
    }

    #[test]
    fn test_title_case_keeps_whitespace() {
        assert_eq!(
            convert_case("the QUICK  brown\nfox", CaseStyle::Title),
            "The Quick  Brown\nFox"
        );
    }

    #[test]
    fn test_sentence_case() {
        assert_eq!(
            convert_case("HELLO THERE. how are you? fine!  ok", CaseStyle::Sentence),
            "Hello there. How are you? Fine!  Ok"
        );
        assert_eq!(convert_case("pi is 3.14 today", CaseStyle::Sentence), "Pi is 3.14 today");
        assert_eq!(convert_case("really?! yes.", CaseStyle::Sentence), "Really?! Yes.");
    }

    #[test]
    fn test_identifier_styles() {
        let input = "Hello world-foo_bar";
        assert_eq!(convert_case(input, CaseStyle::Camel), "helloWorldFooBar");
        assert_eq!(convert_case(input, CaseStyle::Pascal), "HelloWorldFooBar");
        assert_eq!(convert_case(input, CaseStyle::Snake), "hello_world_foo_bar");
        assert_eq!(convert_case(input, CaseStyle::Kebab), "hello-world-foo-bar");
        assert_eq!(convert_case(input, CaseStyle::Constant), "HELLO_WORLD_FOO_BAR");
        assert_eq!(convert_case(input, CaseStyle::Dot), "hello.world.foo.bar");
    }

    #[test]
    fn test_split_words_camel_humps() {
        assert_eq!(
            split_words("parseHTTPResponse_code"),
            vec!["parse", "HTTP", "Response", "code"]
        );
        assert_eq!(split_words("version2Update"), vec!["version2", "Update"]);
        assert!(split_words("  --  ").is_empty());
    }

    #[test]
    fn test_alternating_and_inverse() {
        assert_eq!(convert_case("hello world", CaseStyle::Alternating), "hElLo WoRlD");
        assert_eq!(convert_case("Hello World 1", CaseStyle::Inverse), "hELLO wORLD 1");
    }

    #[test]
    fn test_empty_input() {
        for style in CaseStyle::ALL {
            assert_eq!(convert_case("", style), "");
        }
    }
}
