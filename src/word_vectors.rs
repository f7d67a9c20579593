use crate::error::{Error, Result};
use crate::table::EmbeddingTable;
use crate::vocab::Vocabulary;
use rayon::prelude::*;
use std::collections::HashSet;
use std::io::Write;

/// A labelled point for a 2-D scatter plot of the embedding.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotPoint {
    pub word: String,
    pub x: f64,
    pub y: f64,
}

// Trained context vectors together with the words they belong to.
pub struct WordVectors {
    vocab: Vocabulary,
    vectors: EmbeddingTable, // as trained
    unit: Vec<f64>,          // the same vectors normalised to unit length, flattened
}

impl WordVectors {
    pub fn new(vocab: Vocabulary, vectors: EmbeddingTable) -> Result<WordVectors> {
        const EPS: f64 = 1e-8;
        let dims = vectors.dims();
        if vectors.rows() != vocab.len() {
            return Err(Error::ShapeMismatch {
                expected_rows: vocab.len(),
                expected_dims: dims,
                rows: vectors.rows(),
                dims,
            });
        }
        if dims == 0 {
            return Err(Error::InvalidConfig("word vectors have zero dimensions".into()));
        }

        let mut unit = Vec::with_capacity(vectors.rows() * dims);
        for row in vectors.iter_rows() {
            let norm: f64 = row.iter().map(|x| x * x).sum::<f64>().sqrt();
            if norm > EPS {
                unit.extend(row.iter().map(|x| x / norm));
            } else {
                unit.extend_from_slice(row);
            }
        }

        Ok(WordVectors {
            vocab,
            vectors,
            unit,
        })
    }

    pub fn get_word(&self, idx: usize) -> &str {
        self.vocab.get_word(idx)
    }

    pub fn get_index(&self, word: &str) -> Option<usize> {
        self.vocab.get_index(word)
    }

    pub fn get_vector(&self, idx: usize) -> &[f64] {
        self.vectors.row(idx)
    }

    pub fn len(&self) -> usize {
        self.vocab.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vocab.is_empty()
    }

    /// One point per word, in index order, taken from the first two coordinates.
    pub fn plot_points(&self) -> Result<Vec<PlotPoint>> {
        if self.vectors.dims() < 2 {
            return Err(Error::InvalidConfig(format!(
                "need at least 2 dimensions to plot, have {}",
                self.vectors.dims()
            )));
        }
        Ok((0..self.len())
            .map(|i| {
                let v = self.get_vector(i);
                PlotPoint {
                    word: self.get_word(i).to_string(),
                    x: v[0],
                    y: v[1],
                }
            })
            .collect())
    }

    /// Writes the plot points as `word x y` lines.
    pub fn write_points<W: Write>(&self, writer: &mut W) -> Result<()> {
        for p in self.plot_points()? {
            writeln!(writer, "{} {} {}", p.word, p.x, p.y)?;
        }
        Ok(())
    }

    fn unit_vector(&self, idx: usize) -> &[f64] {
        let dims = self.vectors.dims();
        &self.unit[idx * dims..(idx + 1) * dims]
    }

    /// Ranks words by cosine similarity to the sum of `words`.
    /// Input words are excluded; words not in the vocabulary are ignored.
    pub fn nearest_to_sum(&self, words: &[&str], n: usize) -> Option<Vec<(usize, f64)>> {
        let query: HashSet<usize> = words.iter().filter_map(|w| self.get_index(w)).collect();
        if query.is_empty() {
            return None;
        }

        // A word given twice counts twice in the sum.
        let mut direction = vec![0.0; self.vectors.dims()];
        for idx in words.iter().filter_map(|w| self.get_index(w)) {
            for (p, x) in direction.iter_mut().zip(self.unit_vector(idx)) {
                *p += x;
            }
        }
        let norm = dot(&direction, &direction).sqrt();
        if norm == 0.0 {
            return None;
        }
        direction.iter_mut().for_each(|p| *p /= norm);

        let mut ranked: Vec<(usize, f64)> = (0..self.len())
            .into_par_iter()
            .filter(|i| !query.contains(i))
            .map(|i| (i, dot(self.unit_vector(i), &direction)))
            .collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
        ranked.truncate(n);

        Some(ranked)
    }
}

fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn fixture() -> WordVectors {
        let vocab = Vocabulary::from_corpus(&[vec!["cat", "dog", "coffee", "eggs"]]);
        let table = EmbeddingTable::from_rows(&[
            vec![1.0, 0.1],
            vec![2.0, 0.3],
            vec![-0.1, 1.0],
            vec![0.0, -3.0],
        ])
        .unwrap();
        WordVectors::new(vocab, table).unwrap()
    }

    #[test]
    fn nearest_words_rank_by_cosine() {
        let wv = fixture();
        let top = wv.nearest_to_sum(&["cat"], 3).unwrap();
        let words: Vec<&str> = top.iter().map(|(i, _)| wv.get_word(*i)).collect();
        assert_eq!(words, vec!["dog", "coffee", "eggs"]);
        assert!(top[0].1 > 0.9);
    }

    #[test]
    fn inputs_are_excluded_and_oov_ignored() {
        let wv = fixture();
        let top = wv.nearest_to_sum(&["cat", "dog", "unicorn"], 10).unwrap();
        assert_eq!(top.len(), 2);
        assert!(top.iter().all(|(i, _)| *i >= 2));
        assert!(wv.nearest_to_sum(&["unicorn"], 10).is_none());
    }

    #[test]
    fn plot_points_follow_vocabulary_order() {
        let wv = fixture();
        let points = wv.plot_points().unwrap();
        assert_eq!(points.len(), 4);
        assert_eq!(points[2].word, "coffee");
        assert_abs_diff_eq!(points[2].x, -0.1);
        assert_abs_diff_eq!(points[2].y, 1.0);
        assert_eq!(wv.get_vector(3), &[0.0, -3.0]);
    }

    #[test]
    fn points_are_written_one_per_line() {
        let mut out = Vec::new();
        fixture().write_points(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.lines().count(), 4);
        assert_eq!(text.lines().next(), Some("cat 1 0.1"));
    }

    #[test]
    fn one_dimensional_vectors_cannot_be_plotted() {
        let vocab = Vocabulary::from_corpus(&[vec!["a"]]);
        let table = EmbeddingTable::from_rows(&[vec![0.5]]).unwrap();
        let wv = WordVectors::new(vocab, table).unwrap();
        assert!(matches!(wv.plot_points(), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn table_must_match_vocabulary() {
        let vocab = Vocabulary::from_corpus(&[vec!["a", "b"]]);
        let table = EmbeddingTable::zeros(3, 2);
        assert!(matches!(
            WordVectors::new(vocab, table),
            Err(Error::ShapeMismatch { .. })
        ));
    }
}
