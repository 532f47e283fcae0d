use std::{collections::HashMap, sync::LazyLock};

use regex::Regex;

use crate::types::{KeyTakeaway, Outline};

/// Sentences per paragraph.
pub const PARAGRAPH_SENTENCES: usize = 4;
/// How many of the most frequent words are considered for takeaways.
pub const TOP_WORDS: usize = 10;
/// Words must be longer than this (in characters) to be counted.
pub const MIN_WORD_CHARS: usize = 4;
/// Words must appear more than this many times to become a takeaway.
pub const MIN_MENTIONS: usize = 2;

static SENTENCE_BREAK: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[.!?]+").unwrap());
static WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b\w+\b").unwrap());

/// Split text on runs of sentence punctuation, dropping blank pieces.
pub fn split_sentences(text: &str) -> Vec<&str> {
    SENTENCE_BREAK
        .split(text)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

/// Group sentences into paragraphs of `PARAGRAPH_SENTENCES`.
/// The last paragraph holds whatever is left over.
pub fn group_paragraphs(sentences: &[&str]) -> Vec<String> {
    sentences
        .chunks(PARAGRAPH_SENTENCES)
        .map(|chunk| chunk.join(" "))
        .collect()
}

/// Count lowercase words longer than `MIN_WORD_CHARS`, most frequent first.
///
/// Words with equal counts keep the order in which they first appear in the text.
pub fn word_frequencies(text: &str) -> Vec<(String, usize)> {
    let lowered = text.to_lowercase();
    let mut counts: Vec<(String, usize)> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for m in WORD.find_iter(&lowered) {
        let word = m.as_str();
        if word.chars().count() <= MIN_WORD_CHARS {
            continue;
        }
        match index.get(word) {
            Some(&i) => counts[i].1 += 1,
            None => {
                index.insert(word, counts.len());
                counts.push((word.to_string(), 1));
            }
        }
    }

    // sort_by is stable, so ties stay in first-occurrence order
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

pub fn key_takeaways(text: &str) -> Vec<KeyTakeaway> {
    word_frequencies(text)
        .into_iter()
        .take(TOP_WORDS)
        .filter(|(_, mentions)| *mentions > MIN_MENTIONS)
        .map(|(word, mentions)| KeyTakeaway { word, mentions })
        .collect()
}

/// Segment a normalized transcript into an outline.
pub fn build_outline(transcript: &str, source: &str) -> Outline {
    let sentences = split_sentences(transcript);
    let mut paragraphs = group_paragraphs(&sentences).into_iter();

    let introduction = paragraphs.next();
    let sections = paragraphs.collect();

    Outline {
        source: source.to_string(),
        introduction,
        sections,
        key_takeaways: key_takeaways(transcript),
    }
}
