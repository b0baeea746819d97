pub mod case;
pub mod counter;
pub mod fonts;
pub mod hex;

use regex::Regex;
use std::sync::LazyLock;

/// A run of `.`, `!` or `?` followed by whitespace or the end of the text.
pub(crate) static SENTENCE_END: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.!?]+(?:\s+|$)").expect("valid sentence regex"));
