//! Synthetic corpus generator.
//!
//! A handful of "topics", each with its own vocabulary. Some words belong to
//! one topic only (e.g. "eggs" is breakfast), others to several ("coffee" is
//! both breakfast and work). A sentence is drawn from one topic, with an
//! occasional word borrowed from the neighbouring topic for variation.

use crate::corpus::Corpus;
use crate::error::{Error, Result};
use rand::Rng;

pub const DEFAULT_SENTENCES: usize = 10_000;
pub const DEFAULT_SENTENCE_LEN: usize = 5;
pub const DEFAULT_SWITCH_PROB: f64 = 0.2;

#[derive(Debug, Clone, PartialEq)]
pub struct Topic {
    pub name: String,
    pub words: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TopicModel {
    topics: Vec<Topic>,
}

impl TopicModel {
    pub fn new(topics: Vec<Topic>) -> Result<Self> {
        if topics.is_empty() {
            return Err(Error::InvalidConfig("topic model has no topics".into()));
        }
        if let Some(t) = topics.iter().find(|t| t.words.is_empty()) {
            return Err(Error::InvalidConfig(format!(
                "topic '{}' has no words",
                t.name
            )));
        }
        Ok(TopicModel { topics })
    }

    pub fn topics(&self) -> &[Topic] {
        &self.topics
    }

    /// Draws `n_sentences` sentences of `sentence_len` words.
    ///
    /// Each sentence picks a topic uniformly. Each word comes from that topic,
    /// or with probability `switch_prob` from the previous one (the first topic
    /// borrows from the last).
    pub fn generate<R: Rng + ?Sized>(
        &self,
        n_sentences: usize,
        sentence_len: usize,
        switch_prob: f64,
        rng: &mut R,
    ) -> Result<Corpus> {
        if !(0.0..=1.0).contains(&switch_prob) {
            return Err(Error::InvalidConfig(format!(
                "switch probability must be in [0, 1], got {switch_prob}"
            )));
        }

        let n_topics = self.topics.len();
        let mut sentences = Vec::with_capacity(n_sentences);
        for _ in 0..n_sentences {
            let ind = rng.random_range(0..n_topics);
            let sentence: Vec<String> = (0..sentence_len)
                .map(|_| {
                    let topic = if rng.random_bool(switch_prob) {
                        &self.topics[(ind + n_topics - 1) % n_topics]
                    } else {
                        &self.topics[ind]
                    };
                    topic.words[rng.random_range(0..topic.words.len())].clone()
                })
                .collect();
            sentences.push(sentence);
        }
        Ok(sentences)
    }
}

fn topic(name: &str, words: &[&str]) -> Topic {
    Topic {
        name: name.to_string(),
        words: words.iter().map(|w| w.to_string()).collect(),
    }
}

impl Default for TopicModel {
    fn default() -> Self {
        TopicModel {
            topics: vec![
                topic(
                    "breakfast",
                    &["coffee", "eggs", "sausage", "early", "morning", "pancake"],
                ),
                topic("dinner", &["steak", "chicken", "wine", "late", "evening"]),
                topic(
                    "animal",
                    &["dog", "cat", "chicken", "rabbit", "horse", "monkey"],
                ),
                topic("cute", &["baby", "dog", "rabbit", "cat", "button", "toy"]),
                topic(
                    "work",
                    &["suit", "coffee", "computer", "report", "early", "morning"],
                ),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn sentences_have_requested_shape() {
        let mut rng = StdRng::seed_from_u64(2);
        let corpus = TopicModel::default().generate(100, 5, 0.2, &mut rng).unwrap();
        assert_eq!(corpus.len(), 100);
        assert!(corpus.iter().all(|s| s.len() == 5));
    }

    #[test]
    fn without_switching_a_sentence_stays_in_one_topic() {
        let model = TopicModel::default();
        let mut rng = StdRng::seed_from_u64(8);
        for sentence in model.generate(200, 5, 0.0, &mut rng).unwrap() {
            assert!(
                model
                    .topics()
                    .iter()
                    .any(|t| sentence.iter().all(|w| t.words.contains(w))),
                "{sentence:?}"
            );
        }
    }

    #[test]
    fn always_switching_uses_the_previous_topic() {
        let model = TopicModel::new(vec![topic("a", &["a1", "a2"]), topic("b", &["b1"])]).unwrap();
        let mut rng = StdRng::seed_from_u64(8);
        for sentence in model.generate(50, 4, 1.0, &mut rng).unwrap() {
            let first = &sentence[0];
            // every word of a sentence borrows from the same neighbour
            assert!(sentence.iter().all(|w| w.starts_with(&first[..1])));
        }
    }

    #[test]
    fn generation_is_reproducible() {
        let model = TopicModel::default();
        let a = model
            .generate(20, 5, 0.2, &mut StdRng::seed_from_u64(99))
            .unwrap();
        let b = model
            .generate(20, 5, 0.2, &mut StdRng::seed_from_u64(99))
            .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn bad_models_are_rejected() {
        assert!(TopicModel::new(vec![]).is_err());
        assert!(TopicModel::new(vec![topic("empty", &[])]).is_err());
        let mut rng = StdRng::seed_from_u64(0);
        assert!(
            TopicModel::default()
                .generate(1, 5, 1.5, &mut rng)
                .is_err()
        );
    }
}
