use crate::error::{Error, Result};
use crate::table::EmbeddingTable;
use rand::Rng;
use std::collections::HashMap;
use tracing::debug;

/// Default embedding dimension; two dimensions can be plotted directly.
pub const DEFAULT_DIMS: usize = 2;

/// Word to index mapping, indices assigned in first-occurrence order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Vocabulary {
    words: Vec<String>,               // index to word map
    word_map: HashMap<String, usize>, // word to index map
}

impl Vocabulary {
    /// Scans the corpus once. Words already seen keep their first index.
    pub fn from_corpus<S, W>(corpus: &[S]) -> Self
    where
        S: AsRef<[W]>,
        W: AsRef<str>,
    {
        let mut vocab = Vocabulary::default();
        for sentence in corpus {
            for word in sentence.as_ref() {
                let word = word.as_ref();
                if vocab.word_map.contains_key(word) {
                    continue;
                }
                vocab.word_map.insert(word.to_string(), vocab.words.len());
                vocab.words.push(word.to_string());
            }
        }
        vocab
    }

    pub fn get_index(&self, word: &str) -> Option<usize> {
        self.word_map.get(word).copied()
    }

    /// Like `get_index`, but a missing word is an error.
    pub fn index_of(&self, word: &str) -> Result<usize> {
        self.get_index(word)
            .ok_or_else(|| Error::UnknownToken(word.to_string()))
    }

    pub fn get_word(&self, idx: usize) -> &str {
        &self.words[idx]
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// Indexes the corpus and allocates the context and target tables,
/// in that order, both filled from `rng`.
pub fn build_vocabulary<S, W, R>(
    corpus: &[S],
    dims: usize,
    rng: &mut R,
) -> (Vocabulary, EmbeddingTable, EmbeddingTable)
where
    S: AsRef<[W]>,
    W: AsRef<str>,
    R: Rng + ?Sized,
{
    let vocab = Vocabulary::from_corpus(corpus);
    let context = EmbeddingTable::random(vocab.len(), dims, rng);
    let target = EmbeddingTable::random(vocab.len(), dims, rng);
    debug!(
        vocab_size = vocab.len(),
        dims,
        sentences = corpus.len(),
        "built vocabulary"
    );
    (vocab, context, target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn indices_follow_first_occurrence() {
        let corpus = vec![vec!["b", "a", "b"], vec!["c", "a", "d"]];
        let vocab = Vocabulary::from_corpus(&corpus);
        assert_eq!(vocab.len(), 4);
        assert_eq!(vocab.get_index("b"), Some(0));
        assert_eq!(vocab.get_index("a"), Some(1));
        assert_eq!(vocab.get_index("c"), Some(2));
        assert_eq!(vocab.get_index("d"), Some(3));
        assert_eq!(vocab.get_word(2), "c");
    }

    #[test]
    fn every_distinct_token_gets_one_index() {
        let corpus = vec![
            vec!["dog", "cat", "dog", "horse"],
            vec!["cat"],
            vec!["monkey", "dog", "toy"],
        ];
        let vocab = Vocabulary::from_corpus(&corpus);
        assert_eq!(vocab.len(), 5);
        let mut seen: Vec<usize> = vocab
            .words()
            .iter()
            .map(|w| vocab.get_index(w).unwrap())
            .collect();
        seen.sort_unstable();
        assert_eq!(seen, (0..5).collect::<Vec<_>>());
    }

    #[test]
    fn unknown_word_is_an_error() {
        let vocab = Vocabulary::from_corpus(&[vec!["a"]]);
        assert!(matches!(vocab.index_of("z"), Err(Error::UnknownToken(w)) if w == "z"));
    }

    #[test]
    fn tables_have_one_row_per_word() {
        let mut rng = StdRng::seed_from_u64(1);
        let corpus = vec![vec!["a", "b", "c"], vec!["c", "d"]];
        let (vocab, context, target) = build_vocabulary(&corpus, 3, &mut rng);
        assert_eq!(vocab.len(), 4);
        assert_eq!(context.shape(), (4, 3));
        assert_eq!(target.shape(), (4, 3));
        assert_ne!(context, target);
    }

    #[test]
    fn empty_corpus_gives_empty_tables() {
        let mut rng = StdRng::seed_from_u64(1);
        let corpus: Vec<Vec<String>> = Vec::new();
        let (vocab, context, target) = build_vocabulary(&corpus, DEFAULT_DIMS, &mut rng);
        assert!(vocab.is_empty());
        assert_eq!(context.shape(), (0, DEFAULT_DIMS));
        assert_eq!(target.shape(), (0, DEFAULT_DIMS));
    }
}
