//! Corpus loading for the word-transition model.
//!
//! Text is split into words and single punctuation marks, lower-cased, and stripped of
//! `_` and `-`. The sorted unique tokens form the vocabulary; the token sequence gives
//! the empirical transition table.

use std::collections::{BTreeSet, HashMap};
use std::fs;
use std::path::Path;
use std::sync::Arc;

use lazy_static::lazy_static;
use regex::Regex;
use thiserror::Error;

use crate::trials::{TransitionTable, WordChain};
use crate::types::TrialError;

lazy_static! {
    // A run of word characters, or any single character that is neither a word
    // character nor whitespace
    static ref TOKEN_PATTERN: Regex = Regex::new(r"\w+|[^\w\s]").unwrap();
}

/// Tokens rendered without a leading space
pub const ATTACHED_PUNCTUATION: [&str; 9] = [".", ",", ")", "(", "?", "!", ":", "'", ";"];

#[derive(Debug, Error)]
pub enum CorpusError {
    #[error("Failed to read corpus: {0}")]
    Read(#[from] std::io::Error),
    #[error("Corpus contains no tokens")]
    Empty,
    #[error("Unknown word: {0}")]
    UnknownWord(String),
    #[error(transparent)]
    Trial(#[from] TrialError),
}

/// Splits text into normalized tokens
pub fn tokenize(text: &str) -> Vec<String> {
    TOKEN_PATTERN
        .find_iter(text)
        .map(|m| m.as_str().to_lowercase().replace(&['_', '-'][..], ""))
        .filter(|token| !token.is_empty())
        .collect()
}

/// Reads and tokenizes a UTF-8 text file
pub fn load_corpus(path: impl AsRef<Path>) -> Result<Vec<String>, CorpusError> {
    let text = fs::read_to_string(path)?;
    let tokens = tokenize(&text);
    if tokens.is_empty() {
        return Err(CorpusError::Empty);
    }
    Ok(tokens)
}

// ------------------------------------------------------------------------------------------------
// Vocabulary
// ------------------------------------------------------------------------------------------------

/// Sorted unique tokens of a corpus
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vocabulary {
    words: Vec<String>,
    index: HashMap<String, usize>,
}

impl Vocabulary {
    pub fn from_tokens(tokens: &[String]) -> Self {
        let words: Vec<String> = tokens.iter().cloned().collect::<BTreeSet<_>>().into_iter().collect();
        let index = words.iter().enumerate().map(|(i, w)| (w.clone(), i)).collect();
        Self { words, index }
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn index_of(&self, word: &str) -> Option<usize> {
        self.index.get(word).copied()
    }

    pub fn word(&self, index: usize) -> Option<&str> {
        self.words.get(index).map(String::as_str)
    }

    pub fn encode(&self, tokens: &[String]) -> Result<Vec<usize>, CorpusError> {
        tokens
            .iter()
            .map(|t| self.index_of(t).ok_or_else(|| CorpusError::UnknownWord(t.clone())))
            .collect()
    }

    /// Joins the words of `sequence`, attaching punctuation to the preceding word
    pub fn render(&self, sequence: &[usize]) -> String {
        let mut text = String::new();
        for word in sequence.iter().filter_map(|&i| self.word(i)) {
            if !ATTACHED_PUNCTUATION.contains(&word) {
                text.push(' ');
            }
            text.push_str(word);
        }
        text
    }
}

// ------------------------------------------------------------------------------------------------
// Text Model
// ------------------------------------------------------------------------------------------------

/// Vocabulary plus the empirical word-to-word transition table of a corpus
#[derive(Debug, Clone)]
pub struct TextModel {
    vocabulary: Vocabulary,
    table: Arc<TransitionTable>,
}

impl TextModel {
    pub fn from_tokens(tokens: &[String]) -> Result<Self, CorpusError> {
        if tokens.is_empty() {
            return Err(CorpusError::Empty);
        }
        let vocabulary = Vocabulary::from_tokens(tokens);
        let sequence = vocabulary.encode(tokens)?;
        let table = TransitionTable::from_sequence(&sequence, vocabulary.len())?;
        Ok(Self {
            vocabulary,
            table: Arc::new(table),
        })
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    pub fn table(&self) -> &TransitionTable {
        &self.table
    }

    /// A word chain of `words` words starting at `start_word`
    pub fn chain(&self, start_word: &str, words: usize) -> Result<WordChain, CorpusError> {
        let start = self
            .vocabulary
            .index_of(start_word)
            .ok_or_else(|| CorpusError::UnknownWord(start_word.to_string()))?;
        Ok(WordChain::new(self.table.clone(), start, words)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::randomness::RandomSource;
    use crate::trial::Trial;

    #[test]
    fn test_tokenize_splits_punctuation() {
        let tokens = tokenize("Emma Woodhouse, handsome--clever; and _rich_!");
        assert_eq!(
            tokens,
            vec!["emma", "woodhouse", ",", "handsome", "clever", ";", "and", "rich", "!"]
        );
    }

    #[test]
    fn test_vocabulary_is_sorted_and_unique() {
        let tokens = tokenize("b a c a b");
        let vocabulary = Vocabulary::from_tokens(&tokens);
        assert_eq!(vocabulary.len(), 3);
        assert_eq!(vocabulary.word(0), Some("a"));
        assert_eq!(vocabulary.index_of("c"), Some(2));
        assert_eq!(vocabulary.encode(&tokens).unwrap(), vec![1, 0, 2, 0, 1]);
        assert!(matches!(
            vocabulary.encode(&["z".to_string()]),
            Err(CorpusError::UnknownWord(_))
        ));
    }

    #[test]
    fn test_render_attaches_punctuation() {
        let tokens = tokenize("well , i said .");
        let vocabulary = Vocabulary::from_tokens(&tokens);
        let sequence = vocabulary.encode(&tokens).unwrap();
        assert_eq!(vocabulary.render(&sequence), " well, i said.");
    }

    #[test]
    fn test_text_model_generates_known_words() {
        let tokens = tokenize("the cat sat on the mat . the dog sat on the cat .");
        let model = TextModel::from_tokens(&tokens).unwrap();
        assert!((model.table().probability(
            model.vocabulary().index_of("sat").unwrap(),
            model.vocabulary().index_of("on").unwrap()
        ) - 1.0)
            .abs()
            < 1e-12);

        let chain = model.chain("the", 5).unwrap();
        let sequence = chain.run_trial(&mut RandomSource::from_seed(17)).unwrap();
        assert_eq!(sequence.len(), 5);
        assert_eq!(model.vocabulary().word(sequence[0]), Some("the"));
        for pair in sequence.windows(2) {
            assert!(model.table().probability(pair[0], pair[1]) > 0.0);
        }

        assert!(matches!(model.chain("zebra", 5), Err(CorpusError::UnknownWord(_))));
    }

    #[test]
    fn test_empty_corpus_rejected() {
        assert!(matches!(TextModel::from_tokens(&[]), Err(CorpusError::Empty)));
    }
}
