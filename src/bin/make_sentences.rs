use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use tracing::info;
use w2v_rs::topics::{DEFAULT_SENTENCE_LEN, DEFAULT_SENTENCES, DEFAULT_SWITCH_PROB};
use w2v_rs::{TopicModel, logging, write_sentences};

#[derive(Parser, Debug)]
#[command(author, version, about = "Generate a synthetic corpus of topic sentences", long_about = None)]
struct Args {
    /// Set verbosity level
    #[arg(short, long, default_value_t = 1)]
    verbose: i32,

    /// Number of sentences to generate
    #[arg(long, default_value_t = DEFAULT_SENTENCES)]
    sentences: usize,

    /// Words per sentence
    #[arg(long = "sentence-len", default_value_t = DEFAULT_SENTENCE_LEN)]
    sentence_len: usize,

    /// Probability that a word is borrowed from the neighbouring topic
    #[arg(long = "switch-prob", default_value_t = DEFAULT_SWITCH_PROB)]
    switch_prob: f64,

    /// Random seed; 0 picks one from the clock
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Output file (if not provided, writes to stdout)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    logging::init(args.verbose);

    let seed = if args.seed == 0 {
        Local::now().timestamp().unsigned_abs()
    } else {
        args.seed
    };
    info!("Using random seed {seed}");
    let mut rng = StdRng::seed_from_u64(seed);

    let model = TopicModel::default();
    let sentences = model.generate(args.sentences, args.sentence_len, args.switch_prob, &mut rng)?;

    let mut writer: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("creating {}", path.display()))?,
        )),
        None => Box::new(BufWriter::new(io::stdout())),
    };
    write_sentences(&mut writer, &sentences)?;
    writer.flush()?;

    info!(
        "Wrote {} sentences from {} topics.",
        sentences.len(),
        model.topics().len()
    );
    Ok(())
}
