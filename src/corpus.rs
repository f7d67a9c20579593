use std::fs;
use std::io::{self, BufRead, BufReader, Write};
use std::path::Path;

/// One sentence per entry, one token per word.
pub type Corpus = Vec<Vec<String>>;

/// Reads a corpus where every line is a sentence of comma separated words:
///
/// ```text
/// word1,word2,word3...wordN
/// word1,word2,word3...wordN
/// ```
///
/// Surrounding whitespace is trimmed from each line; blank lines are skipped.
pub fn read_sentences<R: BufRead>(reader: R) -> io::Result<Corpus> {
    let mut sentences = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        sentences.push(line.split(',').map(str::to_owned).collect());
    }
    Ok(sentences)
}

pub fn read_sentences_from_file<P: AsRef<Path>>(path: P) -> io::Result<Corpus> {
    let file = fs::File::open(path)?;
    read_sentences(BufReader::new(file))
}

/// Writes sentences in the format read by `read_sentences`.
pub fn write_sentences<W, S, T>(writer: &mut W, corpus: &[S]) -> io::Result<()>
where
    W: Write,
    S: AsRef<[T]>,
    T: AsRef<str>,
{
    for sentence in corpus {
        let words: Vec<&str> = sentence.as_ref().iter().map(|w| w.as_ref()).collect();
        writeln!(writer, "{}", words.join(","))?;
    }
    Ok(())
}
