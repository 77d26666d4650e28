//! Document chunking strategies.
//!
//! This module provides the [`Chunker`] trait and two implementations:
//!
//! - [`FixedSizeChunker`] — hard cuts by character count with exact overlap
//! - [`RecursiveChunker`] — splits at paragraph, sentence, then word
//!   boundaries before falling back to a hard cut
//!
//! Chunking is pure text processing: deterministic, no I/O. Sizes and
//! overlaps are measured in characters, and all cuts respect UTF-8
//! boundaries.

use crate::document::Chunk;

/// A strategy for splitting document content into chunks.
pub trait Chunker: Send + Sync {
    /// Split one document's content into ordered chunks.
    ///
    /// `doc_index` is the position of the document in the corpus and is
    /// recorded on every produced chunk. Empty content yields no chunks;
    /// no produced chunk is ever empty.
    fn chunk(&self, doc_index: usize, content: &str) -> Vec<Chunk>;
}

fn make_chunks(doc_index: usize, texts: Vec<String>) -> Vec<Chunk> {
    texts
        .into_iter()
        .enumerate()
        .map(|(chunk_index, text)| Chunk { text, doc_index, chunk_index })
        .collect()
}

/// Splits content into fixed-size chunks with exactly `chunk_overlap`
/// characters shared between consecutive chunks.
///
/// The final chunk may be shorter. Stripping the first `chunk_overlap`
/// characters from every chunk after the first and concatenating
/// reconstructs the original content.
#[derive(Debug, Clone)]
pub struct FixedSizeChunker {
    chunk_size: usize,
    chunk_overlap: usize,
}

impl FixedSizeChunker {
    /// Create a new `FixedSizeChunker`.
    ///
    /// Callers are expected to pass a validated configuration with
    /// `chunk_overlap < chunk_size` and `chunk_size > 0`; see
    /// [`RagConfig`](crate::config::RagConfig).
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Self {
        Self { chunk_size, chunk_overlap }
    }
}

impl Chunker for FixedSizeChunker {
    fn chunk(&self, doc_index: usize, content: &str) -> Vec<Chunk> {
        make_chunks(doc_index, hard_cut(content, self.chunk_size, self.chunk_overlap))
    }
}

/// Splits content hierarchically: paragraphs, then sentences, then words.
///
/// Separators stay attached to the preceding segment at every level, so
/// concatenating the produced chunks reproduces the source text exactly
/// unless an oversized single word forced a hard cut. That also keeps each
/// chunk a verbatim substring of the source document.
#[derive(Debug, Clone)]
pub struct RecursiveChunker {
    chunk_size: usize,
    chunk_overlap: usize,
}

impl RecursiveChunker {
    /// Create a new `RecursiveChunker`.
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Self {
        Self { chunk_size, chunk_overlap }
    }
}

const SEPARATORS: [&str; 5] = ["\n\n", ". ", "! ", "? ", " "];

impl Chunker for RecursiveChunker {
    fn chunk(&self, doc_index: usize, content: &str) -> Vec<Chunk> {
        if content.is_empty() {
            return Vec::new();
        }
        let texts = split_and_merge(content, self.chunk_size, self.chunk_overlap, &SEPARATORS);
        make_chunks(doc_index, texts)
    }
}

/// Number of characters in `text`. Chunk budgets are in characters, not bytes.
fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Split text by a separator, then merge segments into chunks within the
/// size budget. A segment that alone exceeds the budget is split again with
/// the next separator, bottoming out in a hard cut.
fn split_and_merge(
    text: &str,
    chunk_size: usize,
    chunk_overlap: usize,
    separators: &[&str],
) -> Vec<String> {
    if char_len(text) <= chunk_size {
        return vec![text.to_string()];
    }
    if separators.is_empty() {
        return hard_cut(text, chunk_size, chunk_overlap);
    }

    let separator = separators[0];
    let remaining = &separators[1..];
    let segments = split_keeping_separator(text, separator);

    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    let flush = |current: &mut String, current_len: &mut usize, chunks: &mut Vec<String>| {
        if current.is_empty() {
            return;
        }
        if *current_len > chunk_size {
            chunks.extend(split_and_merge(current, chunk_size, chunk_overlap, remaining));
        } else {
            chunks.push(std::mem::take(current));
        }
        current.clear();
        *current_len = 0;
    };

    for segment in segments {
        let segment_len = char_len(segment);
        if current.is_empty() || current_len + segment_len <= chunk_size {
            current.push_str(segment);
            current_len += segment_len;
        } else {
            flush(&mut current, &mut current_len, &mut chunks);
            current.push_str(segment);
            current_len = segment_len;
        }
    }
    flush(&mut current, &mut current_len, &mut chunks);

    chunks
}

/// Split text at a separator, keeping the separator attached to the
/// preceding segment so that no characters are lost.
fn split_keeping_separator<'a>(text: &'a str, separator: &str) -> Vec<&'a str> {
    let mut segments = Vec::new();
    let mut start = 0;

    while let Some(pos) = text[start..].find(separator) {
        let end = start + pos + separator.len();
        segments.push(&text[start..end]);
        start = end;
    }

    if start < text.len() {
        segments.push(&text[start..]);
    }

    segments
}

/// Cut text into windows of `chunk_size` characters, consecutive windows
/// sharing `chunk_overlap` characters. Cuts land on character boundaries.
fn hard_cut(text: &str, chunk_size: usize, chunk_overlap: usize) -> Vec<String> {
    if text.is_empty() {
        return Vec::new();
    }

    // Byte offset of every character, plus an end sentinel.
    let mut boundaries: Vec<usize> = text.char_indices().map(|(i, _)| i).collect();
    boundaries.push(text.len());
    let total = boundaries.len() - 1;

    let step = chunk_size.saturating_sub(chunk_overlap).max(1);
    let mut chunks = Vec::new();
    let mut start = 0;

    while start < total {
        let end = (start + chunk_size).min(total);
        chunks.push(text[boundaries[start]..boundaries[end]].to_string());
        if end == total {
            break;
        }
        start += step;
    }

    chunks
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(chunks: &[Chunk]) -> Vec<&str> {
        chunks.iter().map(|c| c.text.as_str()).collect()
    }

    /// Reassemble fixed-size chunks by stripping the overlap prefix from
    /// every chunk after the first.
    fn strip_overlap_concat(chunks: &[Chunk], overlap: usize) -> String {
        let mut out = String::new();
        for (i, chunk) in chunks.iter().enumerate() {
            if i == 0 {
                out.push_str(&chunk.text);
            } else {
                out.extend(chunk.text.chars().skip(overlap));
            }
        }
        out
    }

    #[test]
    fn fixed_chunks_respect_size_and_overlap() {
        let content = "abcdefghijklmnopqrstuvwxyz";
        let chunks = FixedSizeChunker::new(10, 3).chunk(0, content);

        for chunk in &chunks {
            assert!(chunk.text.chars().count() <= 10);
            assert!(!chunk.text.is_empty());
        }
        for pair in chunks.windows(2) {
            let tail: String = pair[0]
                .text
                .chars()
                .skip(pair[0].text.chars().count() - 3)
                .collect();
            assert!(pair[1].text.starts_with(&tail));
        }
    }

    #[test]
    fn fixed_chunks_reconstruct_content() {
        let content = "The quick brown fox jumps over the lazy dog, twice on Sundays.";
        let chunks = FixedSizeChunker::new(16, 4).chunk(0, content);
        assert_eq!(strip_overlap_concat(&chunks, 4), content);
    }

    #[test]
    fn fixed_chunker_handles_multibyte_text() {
        let content = "héllö wörld — ünïcödé çôntent über ällés";
        let chunks = FixedSizeChunker::new(7, 2).chunk(0, content);
        for chunk in &chunks {
            assert!(chunk.text.chars().count() <= 7);
        }
        assert_eq!(strip_overlap_concat(&chunks, 2), content);
    }

    #[test]
    fn short_content_is_a_single_chunk() {
        let chunks = FixedSizeChunker::new(100, 10).chunk(3, "short");
        assert_eq!(texts(&chunks), vec!["short"]);
        assert_eq!(chunks[0].doc_index, 3);
        assert_eq!(chunks[0].chunk_index, 0);
    }

    #[test]
    fn empty_content_yields_no_chunks() {
        assert!(FixedSizeChunker::new(10, 2).chunk(0, "").is_empty());
        assert!(RecursiveChunker::new(10, 2).chunk(0, "").is_empty());
    }

    #[test]
    fn recursive_prefers_paragraph_boundaries() {
        let content = "First paragraph here.\n\nSecond paragraph follows.\n\nThird one ends.";
        let chunks = RecursiveChunker::new(30, 5).chunk(0, content);

        assert!(chunks.len() > 1);
        // Every non-final chunk ends at a paragraph break.
        for chunk in &chunks[..chunks.len() - 1] {
            assert!(chunk.text.ends_with("\n\n"), "unexpected cut: {:?}", chunk.text);
        }
    }

    #[test]
    fn recursive_falls_back_to_sentence_boundaries() {
        let content =
            "One short sentence. Another short sentence. A third short sentence. And a fourth.";
        let chunks = RecursiveChunker::new(45, 5).chunk(0, content);

        assert!(chunks.len() > 1);
        for chunk in &chunks[..chunks.len() - 1] {
            assert!(chunk.text.ends_with(". "), "unexpected cut: {:?}", chunk.text);
        }
    }

    #[test]
    fn recursive_chunks_concatenate_to_source() {
        let content = "Alpha beta gamma delta.\n\nEpsilon zeta eta theta iota kappa. \
                       Lambda mu nu xi omicron pi rho sigma tau upsilon phi chi psi omega.";
        let chunks = RecursiveChunker::new(40, 8).chunk(0, content);

        let rejoined: String = chunks.iter().map(|c| c.text.as_str()).collect();
        assert_eq!(rejoined, content);
    }

    #[test]
    fn recursive_respects_size_budget() {
        let content = "word ".repeat(200);
        let chunks = RecursiveChunker::new(32, 4).chunk(0, &content);

        assert!(!chunks.is_empty());
        for chunk in &chunks {
            assert!(chunk.text.chars().count() <= 32);
            assert!(!chunk.text.is_empty());
        }
    }

    #[test]
    fn oversized_single_word_gets_hard_cut() {
        let content = "x".repeat(50);
        let chunks = RecursiveChunker::new(20, 5).chunk(0, &content);

        for chunk in &chunks {
            assert!(chunk.text.chars().count() <= 20);
        }
        assert_eq!(strip_overlap_concat(&chunks, 5), content);
    }

    #[test]
    fn chunk_indices_are_sequential() {
        let content = "a b c d e f g h i j k l m n o p q r s t u v w x y z";
        let chunks = RecursiveChunker::new(10, 2).chunk(7, content);

        for (i, chunk) in chunks.iter().enumerate() {
            assert_eq!(chunk.chunk_index, i);
            assert_eq!(chunk.doc_index, 7);
        }
    }
}
