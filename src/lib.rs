//! Word embeddings from skip-gram training with negative sampling.
//!
//! ```
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//! use w2v_rs::{TrainConfig, build_vocabulary, train};
//!
//! let corpus = vec![vec!["coffee", "eggs", "morning"], vec!["dog", "cat", "toy"]];
//! let mut rng = StdRng::seed_from_u64(1);
//! let (vocab, mut context, mut target) = build_vocabulary(&corpus, 2, &mut rng);
//! let stats = train(&corpus, &mut context, &mut target, &vocab, &TrainConfig::default(), &mut rng)?;
//! assert_eq!(stats.pairs, 6);
//! assert_eq!(context.shape(), (6, 2));
//! # Ok::<(), w2v_rs::Error>(())
//! ```

pub mod corpus;
pub mod error;
pub mod logging;
pub mod sampler;
pub mod table;
pub mod topics;
pub mod train;
pub mod vocab;
pub mod word_vectors;

pub use corpus::{Corpus, read_sentences, read_sentences_from_file, write_sentences};
pub use error::{Error, Result};
pub use sampler::negative_samples;
pub use table::EmbeddingTable;
pub use topics::{Topic, TopicModel};
pub use train::{TrainConfig, TrainStats, context_window, labels, logistic, train, train_pair};
pub use vocab::{DEFAULT_DIMS, Vocabulary, build_vocabulary};
pub use word_vectors::{PlotPoint, WordVectors};
