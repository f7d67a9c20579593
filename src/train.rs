//! Skip-gram training with uniform negative sampling.
//!
//! Every position of every sentence yields one (context window, target) pair.
//! The context window is reduced to the mean of its context vectors, which is
//! scored against the target word and `neg_samples - 1` random negatives.
//! The target table learns from the mean; all context rows of the window
//! receive the same update, as their individual contributions to the mean
//! cannot be separated.

use crate::error::{Error, Result};
use crate::sampler::negative_samples;
use crate::table::EmbeddingTable;
use crate::vocab::Vocabulary;
use rand::Rng;
use tracing::{debug, trace};

/// Training hyper-parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrainConfig {
    /// Number of words on either side of the target.
    pub window: usize,
    /// Samples scored per pair: the true target plus `neg_samples - 1` negatives.
    pub neg_samples: usize,
    /// Learning rate.
    pub alpha: f64,
}

impl Default for TrainConfig {
    fn default() -> Self {
        TrainConfig {
            window: 5,
            neg_samples: 5,
            alpha: 0.05,
        }
    }
}

impl TrainConfig {
    pub fn validate(&self) -> Result<()> {
        if self.neg_samples == 0 {
            return Err(Error::InvalidConfig(
                "neg_samples must be at least 1 (the true target)".into(),
            ));
        }
        if !self.alpha.is_finite() || self.alpha <= 0.0 {
            return Err(Error::InvalidConfig(format!(
                "alpha must be a positive number, got {}",
                self.alpha
            )));
        }
        Ok(())
    }
}

/// Summary of one pass over the corpus.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TrainStats {
    /// Number of single-pair updates applied.
    pub pairs: usize,
    /// Positions skipped because their context window was empty.
    pub skipped: usize,
    /// Sum of the negative log-likelihood of every pair.
    pub loss: f64,
}

impl TrainStats {
    pub fn mean_loss(&self) -> f64 {
        if self.pairs == 0 {
            0.0
        } else {
            self.loss / self.pairs as f64
        }
    }
}

/// 1 / (1 + e^-x), evaluated so that `exp` never sees a positive argument.
#[inline]
pub fn logistic(x: f64) -> f64 {
    if x >= 0.0 {
        1.0 / (1.0 + (-x).exp())
    } else {
        let e = x.exp();
        e / (1.0 + e)
    }
}

// ln(logistic(x))
#[inline]
fn log_logistic(x: f64) -> f64 {
    if x >= 0.0 {
        -(-x).exp().ln_1p()
    } else {
        x - x.exp().ln_1p()
    }
}

/// `[1, 0, 0, ...]`: the true target is always sample 0.
pub fn labels(neg_samples: usize) -> Vec<f64> {
    (0..neg_samples)
        .map(|k| if k == 0 { 1.0 } else { 0.0 })
        .collect()
}

/// Words within `window` positions of `i`, left side first, excluding `i`
/// itself and clipped at the sentence boundaries.
pub fn context_window<W: AsRef<str>>(sentence: &[W], i: usize, window: usize) -> Vec<&str> {
    let start = i.saturating_sub(window);
    let stop = sentence.len().min(i.saturating_add(window).saturating_add(1));
    sentence[start..i]
        .iter()
        .chain(&sentence[i + 1..stop])
        .map(|w| w.as_ref())
        .collect()
}

/// A single update for one (context window, target word) pair.
/// Returns the pair's loss, `-ln p[0] - sum_{k>0} ln(1 - p[k])`, measured
/// before the update.
pub fn train_pair<R: Rng + ?Sized>(
    context_words: &[&str],
    target_word: &str,
    context: &mut EmbeddingTable,
    target: &mut EmbeddingTable,
    vocab: &Vocabulary,
    config: &TrainConfig,
    rng: &mut R,
) -> Result<f64> {
    if context_words.is_empty() {
        return Err(Error::InvalidConfig("empty context window".into()));
    }
    let dims = context.dims();

    // Mean of the context vectors
    let con_idx = context_words
        .iter()
        .map(|w| vocab.index_of(w))
        .collect::<Result<Vec<usize>>>()?;
    let mut mean = vec![0.0; dims];
    for &idx in &con_idx {
        for (m, x) in mean.iter_mut().zip(context.row(idx)) {
            *m += x;
        }
    }
    let n = con_idx.len() as f64;
    mean.iter_mut().for_each(|m| *m /= n);

    // True target first, then the negatives
    let tar_idx = negative_samples(
        vocab.index_of(target_word)?,
        config.neg_samples,
        vocab.len(),
        rng,
    )?;
    // Copies: the context update below must see the rows before they change.
    let tar_rows: Vec<Vec<f64>> = tar_idx.iter().map(|&i| target.row(i).to_vec()).collect();

    let mut loss = 0.0;
    let errors: Vec<f64> = tar_rows
        .iter()
        .zip(labels(tar_idx.len()))
        .map(|(row, label)| {
            let score: f64 = mean.iter().zip(row).map(|(c, t)| c * t).sum();
            loss -= if label > 0.0 {
                log_logistic(score)
            } else {
                log_logistic(-score)
            };
            (label - logistic(score)) * config.alpha
        })
        .collect();

    // Repeated negatives accumulate.
    for (&idx, &err) in tar_idx.iter().zip(&errors) {
        target.add_scaled(idx, err, &mean);
    }

    let mut update = vec![0.0; dims];
    for (row, &err) in tar_rows.iter().zip(&errors) {
        for (u, t) in update.iter_mut().zip(row) {
            *u += err * t;
        }
    }
    for &idx in &con_idx {
        context.add_scaled(idx, 1.0, &update);
    }

    Ok(loss)
}

/// One sequential pass over the corpus, updating both tables in place.
///
/// Sentences are visited in order, positions left to right. Positions with an
/// empty context window are skipped. On error the pass stops and the tables
/// keep the updates applied so far.
pub fn train<S, W, R>(
    corpus: &[S],
    context: &mut EmbeddingTable,
    target: &mut EmbeddingTable,
    vocab: &Vocabulary,
    config: &TrainConfig,
    rng: &mut R,
) -> Result<TrainStats>
where
    S: AsRef<[W]>,
    W: AsRef<str>,
    R: Rng + ?Sized,
{
    config.validate()?;
    check_shape(context, vocab.len(), context.dims())?;
    check_shape(target, vocab.len(), context.dims())?;

    let mut stats = TrainStats::default();
    for (n, sentence) in corpus.iter().enumerate() {
        let sentence = sentence.as_ref();
        for (i, word) in sentence.iter().enumerate() {
            let context_words = context_window(sentence, i, config.window);
            if context_words.is_empty() {
                stats.skipped += 1;
                continue;
            }
            stats.loss += train_pair(
                &context_words,
                word.as_ref(),
                context,
                target,
                vocab,
                config,
                rng,
            )?;
            stats.pairs += 1;
        }
        trace!(sentence = n, pairs = stats.pairs, "sentence done");
    }

    debug!(
        pairs = stats.pairs,
        skipped = stats.skipped,
        mean_loss = stats.mean_loss(),
        "training pass complete"
    );
    Ok(stats)
}

fn check_shape(table: &EmbeddingTable, rows: usize, dims: usize) -> Result<()> {
    if table.shape() != (rows, dims) {
        return Err(Error::ShapeMismatch {
            expected_rows: rows,
            expected_dims: dims,
            rows: table.rows(),
            dims: table.dims(),
        });
    }
    Ok(())
}
