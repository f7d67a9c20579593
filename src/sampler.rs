use crate::error::{Error, Result};
use rand::Rng;

/// Returns `[positive, n_1, ..., n_{neg_samples-1}]` where every `n_k` is drawn
/// uniformly from `[0, vocab_size)` and differs from `positive`.
/// Negatives may repeat.
///
/// Uniform rejection sampling: no frequency weighting.
pub fn negative_samples<R: Rng + ?Sized>(
    positive: usize,
    neg_samples: usize,
    vocab_size: usize,
    rng: &mut R,
) -> Result<Vec<usize>> {
    if neg_samples == 0 {
        return Err(Error::InvalidConfig(
            "neg_samples must include the positive sample".into(),
        ));
    }
    // Rejection would never terminate without a second word to draw.
    if neg_samples > 1 && vocab_size <= 1 {
        return Err(Error::VocabularyTooSmall {
            vocab_size,
            requested: neg_samples - 1,
        });
    }

    let mut indices = Vec::with_capacity(neg_samples);
    indices.push(positive);
    while indices.len() < neg_samples {
        let idx = rng.random_range(0..vocab_size);
        if idx != positive {
            indices.push(idx);
        }
    }
    Ok(indices)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn positive_comes_first_and_is_never_resampled() {
        let mut rng = StdRng::seed_from_u64(3);
        for positive in 0..4 {
            for _ in 0..200 {
                let s = negative_samples(positive, 5, 4, &mut rng).unwrap();
                assert_eq!(s.len(), 5);
                assert_eq!(s[0], positive);
                assert!(s[1..].iter().all(|&i| i != positive && i < 4));
            }
        }
    }

    #[test]
    fn two_word_vocabulary_always_draws_the_other_word() {
        let mut rng = StdRng::seed_from_u64(11);
        let s = negative_samples(1, 6, 2, &mut rng).unwrap();
        assert_eq!(s, vec![1, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn single_sample_needs_no_negatives() {
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(negative_samples(0, 1, 1, &mut rng).unwrap(), vec![0]);
    }

    #[test]
    fn single_word_vocabulary_fails_fast() {
        let mut rng = StdRng::seed_from_u64(0);
        let err = negative_samples(0, 5, 1, &mut rng).unwrap_err();
        assert!(matches!(
            err,
            Error::VocabularyTooSmall {
                vocab_size: 1,
                requested: 4
            }
        ));
    }
}
