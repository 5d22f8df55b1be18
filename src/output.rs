//! Output management module
//!
//! Writes the vocabulary into one sorted file per supported word length.

use crate::normalize::canonical_len;
use crate::vocabulary::Vocabulary;
use anyhow::Context;
use std::collections::BTreeMap;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Default buffer size for file writing (1MB)
pub const DEFAULT_BUFFER_SIZE: usize = 1024 * 1024;

/// Default output file prefix
pub const DEFAULT_PREFIX: &str = "allowed";

/// Word lengths the game supports
pub const DEFAULT_LENGTHS: [usize; 4] = [5, 6, 7, 8];

/// Output file writer with buffering
pub struct OutputWriter {
    writer: BufWriter<File>,
    path: PathBuf,
    lines_written: u64,
}

impl OutputWriter {
    /// Create (or truncate) an output file
    pub fn new(path: PathBuf, buffer_size: usize) -> anyhow::Result<Self> {
        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&path)
            .with_context(|| format!("cannot create output file {:?}", path))?;

        Ok(Self {
            writer: BufWriter::with_capacity(buffer_size, file),
            path,
            lines_written: 0,
        })
    }

    /// Write a line to the output
    pub fn write_line(&mut self, line: &str) -> anyhow::Result<()> {
        writeln!(self.writer, "{}", line)
            .with_context(|| format!("cannot write to {:?}", self.path))?;
        self.lines_written += 1;
        Ok(())
    }

    /// Flush the buffer to disk
    pub fn flush(&mut self) -> anyhow::Result<()> {
        self.writer
            .flush()
            .with_context(|| format!("cannot flush {:?}", self.path))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn lines_written(&self) -> u64 {
        self.lines_written
    }
}

impl Drop for OutputWriter {
    fn drop(&mut self) {
        let _ = self.writer.flush();
    }
}

/// One open writer per supported length
pub struct BucketWriters {
    writers: BTreeMap<usize, OutputWriter>,
}

impl BucketWriters {
    /// Open every bucket file up front so empty buckets still produce a file
    pub fn create(
        output_dir: &Path,
        prefix: &str,
        lengths: &[usize],
        buffer_size: usize,
    ) -> anyhow::Result<Self> {
        let mut writers = BTreeMap::new();
        for &length in lengths {
            let path = bucket_path(output_dir, prefix, length);
            writers.insert(length, OutputWriter::new(path, buffer_size)?);
        }
        Ok(Self { writers })
    }

    /// Write a word to its length bucket
    ///
    /// Returns `false` when no bucket exists for the word's length.
    pub fn write_word(&mut self, word: &str) -> anyhow::Result<bool> {
        match self.writers.get_mut(&canonical_len(word)) {
            Some(writer) => {
                writer.write_line(word)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Flush all writers
    pub fn flush_all(&mut self) -> anyhow::Result<()> {
        for writer in self.writers.values_mut() {
            writer.flush()?;
        }
        Ok(())
    }

    /// Flush and close every file, returning per-bucket results by length
    pub fn finish(mut self) -> anyhow::Result<Vec<BucketReport>> {
        self.flush_all()?;
        Ok(self
            .writers
            .iter()
            .map(|(&length, w)| BucketReport {
                length,
                path: w.path().to_path_buf(),
                words: w.lines_written(),
            })
            .collect())
    }
}

/// Result for one bucket file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BucketReport {
    pub length: usize,
    pub path: PathBuf,
    pub words: u64,
}

/// Result of a partition run
#[derive(Debug, Clone, Default)]
pub struct PartitionReport {
    /// Buckets in ascending length order
    pub buckets: Vec<BucketReport>,
    /// Vocabulary words whose length has no bucket
    pub omitted: u64,
}

impl PartitionReport {
    pub fn written(&self) -> u64 {
        self.buckets.iter().map(|b| b.words).sum()
    }
}

/// Splits a vocabulary into per-length files
#[derive(Debug, Clone)]
pub struct Partitioner {
    output_dir: PathBuf,
    prefix: String,
    lengths: Vec<usize>,
    buffer_size: usize,
}

impl Partitioner {
    pub fn new(output_dir: PathBuf, prefix: &str, lengths: Vec<usize>) -> Self {
        Self {
            output_dir,
            prefix: prefix.to_string(),
            lengths,
            buffer_size: DEFAULT_BUFFER_SIZE,
        }
    }

    pub fn with_buffer_size(mut self, buffer_size: usize) -> Self {
        self.buffer_size = buffer_size;
        self
    }

    /// Paths of the files a run would write, by length
    pub fn planned_paths(&self) -> Vec<(usize, PathBuf)> {
        let mut lengths = self.lengths.clone();
        lengths.sort_unstable();
        lengths.dedup();
        lengths
            .into_iter()
            .map(|len| (len, bucket_path(&self.output_dir, &self.prefix, len)))
            .collect()
    }

    /// Write every bucket file in ascending order
    pub fn write(&self, vocabulary: &Vocabulary) -> anyhow::Result<PartitionReport> {
        ensure_output_dir(&self.output_dir)?;

        let mut writers =
            BucketWriters::create(&self.output_dir, &self.prefix, &self.lengths, self.buffer_size)?;
        let mut omitted = 0;

        for word in vocabulary.sorted() {
            if !writers.write_word(word)? {
                omitted += 1;
            }
        }

        let buckets = writers.finish()?;
        for bucket in &buckets {
            log::debug!("Wrote {} words to {:?}", bucket.words, bucket.path);
        }

        Ok(PartitionReport { buckets, omitted })
    }
}

/// File name for a length bucket, e.g. `allowed-5.txt`
pub fn bucket_path(output_dir: &Path, prefix: &str, length: usize) -> PathBuf {
    output_dir.join(format!("{}-{}.txt", prefix, length))
}

/// Ensure output directory exists
pub fn ensure_output_dir(path: &Path) -> anyhow::Result<()> {
    if !path.exists() {
        std::fs::create_dir_all(path)
            .with_context(|| format!("cannot create output directory {:?}", path))?;
    }
    Ok(())
}
