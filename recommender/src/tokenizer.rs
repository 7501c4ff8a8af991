//! Sub-word tokenization for keyword expansion
//!
//! The recommender only needs surface forms, so any morphological analyzer can
//! sit behind `MorphemeTokenizer`. The default implementation drives a tantivy
//! `TextAnalyzer`, which splits on non-alphanumeric boundaries and keeps Hangul
//! runs intact ("AI 디자인" -> "AI", "디자인").

use tantivy::tokenizer::{SimpleTokenizer, TextAnalyzer, TokenStream};
use thiserror::Error;

/// A token produced by the tokenizer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub surface: String,
}

impl Token {
    pub fn new(surface: impl Into<String>) -> Self {
        Self { surface: surface.into() }
    }

    /// Surface length in characters (not bytes)
    pub fn char_len(&self) -> usize {
        self.surface.chars().count()
    }
}

/// Error type for tokenizer calls
#[derive(Error, Debug)]
pub enum TokenizerError {
    #[error("Tokenizer unavailable")]
    Unavailable,
    #[error("Tokenizer failed: {0}")]
    Failed(String),
}

/// Text -> sub-word tokens. Implementations must be deterministic for
/// identical input.
pub trait MorphemeTokenizer: Send + Sync {
    fn tokenize(&self, text: &str) -> Result<Vec<Token>, TokenizerError>;
}

/// Tokenizer backed by a tantivy analyzer chain
#[derive(Clone)]
pub struct AnalyzerTokenizer {
    analyzer: TextAnalyzer,
}

impl AnalyzerTokenizer {
    pub fn new(analyzer: TextAnalyzer) -> Self {
        Self { analyzer }
    }

    /// Word splitting without case folding. Long compounds are kept whole.
    pub fn simple() -> Self {
        let analyzer = TextAnalyzer::builder(SimpleTokenizer::default()).build();
        Self::new(analyzer)
    }
}

impl Default for AnalyzerTokenizer {
    fn default() -> Self {
        Self::simple()
    }
}

impl MorphemeTokenizer for AnalyzerTokenizer {
    fn tokenize(&self, text: &str) -> Result<Vec<Token>, TokenizerError> {
        // token_stream needs &mut; analyzers are cheap to clone
        let mut analyzer = self.analyzer.clone();
        let mut stream = analyzer.token_stream(text);
        let mut tokens = Vec::new();
        while stream.advance() {
            tokens.push(Token::new(stream.token().text.as_str()));
        }
        Ok(tokens)
    }
}

/// Produces no sub-words, so matching uses the literal keyword alone.
#[derive(Debug, Clone, Copy, Default)]
pub struct LiteralOnlyTokenizer;

impl MorphemeTokenizer for LiteralOnlyTokenizer {
    fn tokenize(&self, _text: &str) -> Result<Vec<Token>, TokenizerError> {
        Ok(Vec::new())
    }
}

/// Stand-in used when no analyzer is configured. Every call reports
/// `Unavailable`, so expansion falls back to the literal keyword.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableTokenizer;

impl MorphemeTokenizer for UnavailableTokenizer {
    fn tokenize(&self, _text: &str) -> Result<Vec<Token>, TokenizerError> {
        Err(TokenizerError::Unavailable)
    }
}
