use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use tracing::{debug, info};
use w2v_rs::{
    DEFAULT_DIMS, TrainConfig, WordVectors, build_vocabulary, logging, read_sentences_from_file,
    train,
};

/// Command-line arguments parsed by Clap.
#[derive(Parser, Debug)]
#[clap(author, version, about = "Train word vectors with skip-gram and negative sampling", long_about = None)]
struct Cli {
    #[clap(short, long, value_parser, default_value_t = 2)]
    verbose: i32,
    #[clap(long, value_parser = clap::value_parser!(u64).range(1..), default_value_t = DEFAULT_DIMS as u64)]
    vector_size: u64,
    #[clap(long, value_parser, default_value_t = 5)]
    window: usize,
    #[clap(
        long,
        value_parser = clap::value_parser!(u64).range(1..),
        default_value_t = 5,
        help = "Samples per pair: the true target plus negative-1 random words"
    )]
    negative: u64,
    #[clap(long, value_parser, default_value_t = 0.05)]
    alpha: f64,
    #[clap(long, value_parser, default_value_t = 1, help = "Passes over the corpus")]
    iter: usize,
    #[clap(long, value_parser, required = true, help = "Comma separated words, one sentence per line")]
    input_file: PathBuf,
    #[clap(long, value_parser, help = "Write 'word x y' plot points here")]
    points_file: Option<PathBuf>,
    #[clap(long, value_parser, num_args = 1.., help = "Words to look up nearest neighbours for after training")]
    query: Vec<String>,
    #[clap(long, value_parser, default_value_t = 0)]
    seed: u64,
}

/// Configuration parameters, built from command-line arguments.
#[derive(Debug, Clone)]
struct Config {
    input_file: PathBuf,
    points_file: Option<PathBuf>,
    query: Vec<String>,
    vector_size: usize,
    num_iter: usize,
    train: TrainConfig,
    seed: u64,
}

fn train_word2vec(config: &Config) -> Result<()> {
    info!("Training word2vec model");

    let sentences = read_sentences_from_file(&config.input_file)
        .with_context(|| format!("reading sentences from {}", config.input_file.display()))?;
    info!("Read {} sentences.", sentences.len());

    let seed = if config.seed == 0 {
        Local::now().timestamp().unsigned_abs()
    } else {
        config.seed
    };
    info!("Using random seed {seed}");
    let mut rng = StdRng::seed_from_u64(seed);

    let (vocab, mut context, mut target) =
        build_vocabulary(&sentences, config.vector_size, &mut rng);
    info!("vocab size: {}", vocab.len());
    info!("vector size: {}", config.vector_size);
    debug!(
        "window: {}; negative: {}; alpha: {}",
        config.train.window, config.train.neg_samples, config.train.alpha
    );

    for it in 0..config.num_iter {
        let stats = train(
            &sentences,
            &mut context,
            &mut target,
            &vocab,
            &config.train,
            &mut rng,
        )?;
        info!(
            "iter: {:03}, pairs: {}, loss: {}",
            it + 1,
            stats.pairs,
            stats.mean_loss()
        );
    }
    drop(target);

    let word_vectors = WordVectors::new(vocab, context)?;

    if let Some(path) = &config.points_file {
        info!("Saving plot points to {}", path.display());
        let mut f_out = BufWriter::new(
            File::create(path).with_context(|| format!("creating {}", path.display()))?,
        );
        word_vectors.write_points(&mut f_out)?;
        f_out.flush()?;
    }

    if !config.query.is_empty() {
        print_nearest(&word_vectors, &config.query)?;
    }
    Ok(())
}

fn print_nearest(word_vectors: &WordVectors, query: &[String]) -> io::Result<()> {
    const TOP_N: usize = 10;
    let mut out = io::stdout().lock();

    let oov_words: Vec<&str> = query
        .iter()
        .map(String::as_str)
        .filter(|w| word_vectors.get_index(w).is_none())
        .collect();
    for word in &oov_words {
        writeln!(out, "'{word}' is out of vocabulary")?;
    }

    let words: Vec<&str> = query.iter().map(String::as_str).collect();
    let Some(topn) = word_vectors.nearest_to_sum(&words, TOP_N) else {
        writeln!(out, "No near words!")?;
        return Ok(());
    };

    writeln!(out, "\nNearest words to '{}':", words.join(" + "))?;
    writeln!(out, "{:>4} {:>10} Word", "Rank", "Score")?;
    writeln!(out, "{}", "-".repeat(30))?;
    for (i, (idx, score)) in topn.iter().enumerate() {
        writeln!(
            out,
            "{:4}: {:10.6} {}",
            i + 1,
            score,
            word_vectors.get_word(*idx)
        )?;
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let config = Config {
        input_file: cli.input_file,
        points_file: cli.points_file,
        query: cli.query,
        vector_size: cli.vector_size as usize,
        num_iter: cli.iter,
        train: TrainConfig {
            window: cli.window,
            neg_samples: cli.negative as usize,
            alpha: cli.alpha,
        },
        seed: cli.seed,
    };

    train_word2vec(&config)
}
