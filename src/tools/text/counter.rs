use super::SENTENCE_END;
use regex::Regex;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::LazyLock;

const READING_WPM: usize = 200;
const SPEAKING_WPM: usize = 130;

static PARAGRAPH_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n[ \t\r]*\n").expect("valid paragraph regex"));

/// (platform, character limit)
const PLATFORM_LIMITS: &[(&str, usize)] = &[
    ("Twitter/X", 280),
    ("SMS", 160),
    ("Meta description", 160),
    ("Meta title", 60),
    ("Instagram caption", 2200),
    ("LinkedIn post", 3000),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextStats {
    pub characters: usize,
    pub characters_no_spaces: usize,
    pub words: usize,
    pub sentences: usize,
    pub paragraphs: usize,
    pub lines: usize,
    pub bytes: usize,
    pub reading_time_secs: usize,
    pub speaking_time_secs: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeywordCount {
    pub word: String,
    pub count: usize,
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlatformLimit {
    pub platform: &'static str,
    pub limit: usize,
    pub remaining: i64,
    pub within_limit: bool,
}

pub fn count_text(text: &str) -> TextStats {
    let words = count_words(text);

    TextStats {
        characters: text.chars().count(),
        characters_no_spaces: text.chars().filter(|c| !c.is_whitespace()).count(),
        words,
        sentences: count_sentences(text),
        paragraphs: PARAGRAPH_BREAK
            .split(text)
            .filter(|p| !p.trim().is_empty())
            .count(),
        lines: text.lines().count(),
        bytes: text.len(),
        reading_time_secs: minutes_to_secs(words, READING_WPM),
        speaking_time_secs: minutes_to_secs(words, SPEAKING_WPM),
    }
}

fn minutes_to_secs(words: usize, wpm: usize) -> usize {
    (words * 60).div_ceil(wpm)
}

fn is_word(token: &str) -> bool {
    token.chars().any(char::is_alphanumeric)
}

fn count_words(text: &str) -> usize {
    text.split_whitespace().filter(|t| is_word(t)).count()
}

fn count_sentences(text: &str) -> usize {
    SENTENCE_END.split(text).filter(|s| is_word(s)).count()
}

pub fn keyword_density(text: &str, top_n: usize) -> Vec<KeywordCount> {
    let total = count_words(text);
    if total == 0 {
        return Vec::new();
    }

    let mut counts: HashMap<String, usize> = HashMap::new();
    for token in text.split_whitespace() {
        let word = token
            .trim_matches(|c: char| !c.is_alphanumeric())
            .to_lowercase();
        if word.chars().count() >= 3 {
            *counts.entry(word).or_insert(0) += 1;
        }
    }

    let mut keywords: Vec<(String, usize)> = counts.into_iter().collect();
    keywords.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

    keywords
        .into_iter()
        .take(top_n)
        .map(|(word, count)| KeywordCount {
            word,
            count,
            percentage: (count as f64 / total as f64 * 10_000.0).round() / 100.0,
        })
        .collect()
}

pub fn check_limits(stats: &TextStats) -> Vec<PlatformLimit> {
    PLATFORM_LIMITS
        .iter()
        .map(|&(platform, limit)| PlatformLimit {
            platform,
            limit,
            remaining: limit as i64 - stats.characters as i64,
            within_limit: stats.characters <= limit,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_text() {
        let stats = count_text("");
        assert_eq!(stats.characters, 0);
        assert_eq!(stats.words, 0);
        assert_eq!(stats.sentences, 0);
        assert_eq!(stats.paragraphs, 0);
        assert_eq!(stats.lines, 0);
        assert_eq!(stats.reading_time_secs, 0);
    }

    #[test]
    fn test_basic_counts() {
        let text = "Hello world. How are you?\n\nThis is a second paragraph!\nWith two lines";
        let stats = count_text(text);
        assert_eq!(stats.words, 13);
        assert_eq!(stats.sentences, 4);
        assert_eq!(stats.paragraphs, 2);
        assert_eq!(stats.lines, 4);
        assert_eq!(stats.characters, text.chars().count());
        assert_eq!(
            stats.characters_no_spaces,
            text.chars().filter(|c| !c.is_whitespace()).count()
        );
    }

    #[test]
    fn test_punctuation_only_tokens_are_not_words() {
        let stats = count_text("wait ... what - ok");
        assert_eq!(stats.words, 3);
        assert_eq!(stats.sentences, 2);
    }

    #[test]
    fn test_decimal_point_does_not_end_a_sentence() {
        assert_eq!(count_text("Pi is 3.14 today").sentences, 1);
        assert_eq!(count_text("Version 2.0 is out. Get it at example.com now!").sentences, 2);
        assert_eq!(count_text("Really?! Yes.").sentences, 2);
    }

    #[test]
    fn test_multibyte_characters() {
        let stats = count_text("héllo 世界");
        assert_eq!(stats.characters, 8);
        assert_eq!(stats.bytes, "héllo 世界".len());
        assert_eq!(stats.words, 2);
    }

    #[test]
    fn test_reading_time_rounds_up() {
        let text = vec!["word"; 201].join(" ");
        let stats = count_text(&text);
        assert_eq!(stats.reading_time_secs, 61);
        assert_eq!(stats.speaking_time_secs, 93);
    }

    #[test]
    fn test_keyword_density_orders_by_count_then_word() {
        let keywords = keyword_density("Rust rust, code. Code test rust an", 2);
        assert_eq!(keywords.len(), 2);
        assert_eq!(keywords[0].word, "rust");
        assert_eq!(keywords[0].count, 3);
        assert_eq!(keywords[1].word, "code");
        assert_eq!(keywords[0].percentage, 42.86);
    }

    #[test]
    fn test_check_limits() {
        let stats = count_text(&"a".repeat(200));
        let limits = check_limits(&stats);
        let twitter = limits.iter().find(|l| l.platform == "Twitter/X").unwrap();
        assert!(twitter.within_limit);
        assert_eq!(twitter.remaining, 80);
        let sms = limits.iter().find(|l| l.platform == "SMS").unwrap();
        assert!(!sms.within_limit);
        assert_eq!(sms.remaining, -40);
    }
}
