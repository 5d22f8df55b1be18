//! Word list reading with encoding detection
//!
//! Dictionary dumps come in whatever encoding their maintainer used, so the
//! reader sniffs the encoding once and transcodes every line to UTF-8.

use anyhow::Context;
use chardetng::EncodingDetector;
use encoding_rs::Encoding;
use memmap2::Mmap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Bytes sampled for encoding detection
const SAMPLE_SIZE: usize = 64 * 1024;

/// Legacy encoding for lines of a UTF-8 file that are not valid UTF-8
fn utf8_fallback() -> &'static Encoding {
    encoding_rs::WINDOWS_1252
}

/// Result of encoding detection
#[derive(Debug, Clone)]
pub struct EncodingInfo {
    /// Detected encoding name
    pub name: &'static str,
    /// Confidence level (0.0 - 1.0)
    pub confidence: f32,
    /// The encoding_rs Encoding reference
    pub encoding: &'static Encoding,
}

impl Default for EncodingInfo {
    fn default() -> Self {
        Self {
            name: "UTF-8",
            confidence: 1.0,
            encoding: encoding_rs::UTF_8,
        }
    }
}

/// Detect the encoding of a file by sampling its content
pub fn detect_encoding(path: &Path) -> anyhow::Result<EncodingInfo> {
    let file = File::open(path).with_context(|| format!("cannot open word list {:?}", path))?;
    let mut reader = BufReader::new(file);

    let mut sample = vec![0u8; SAMPLE_SIZE];
    let bytes_read = reader.read(&mut sample)?;
    sample.truncate(bytes_read);

    if bytes_read == 0 {
        return Ok(EncodingInfo::default());
    }

    if let Some(encoding) = detect_bom(&sample) {
        return Ok(EncodingInfo {
            name: encoding.name(),
            confidence: 1.0,
            encoding,
        });
    }

    // Lines past the sample that are not UTF-8 are handled by the reader's fallback
    if is_utf8_prefix(&sample) {
        return Ok(EncodingInfo::default());
    }

    let mut detector = EncodingDetector::new();
    detector.feed(&sample, bytes_read < SAMPLE_SIZE);
    let encoding = detector.guess(None, true);

    Ok(EncodingInfo {
        name: encoding.name(),
        confidence: if encoding == encoding_rs::UTF_8 { 0.5 } else { 0.8 },
        encoding,
    })
}

/// Valid UTF-8, allowing a sequence cut off at the end of the sample
fn is_utf8_prefix(sample: &[u8]) -> bool {
    match std::str::from_utf8(sample) {
        Ok(_) => true,
        Err(e) => e.error_len().is_none(),
    }
}

/// Detect BOM (Byte Order Mark) at the start of content
fn detect_bom(content: &[u8]) -> Option<&'static Encoding> {
    if content.starts_with(&[0xEF, 0xBB, 0xBF]) {
        return Some(encoding_rs::UTF_8);
    }
    if content.starts_with(&[0xFE, 0xFF]) {
        return Some(encoding_rs::UTF_16BE);
    }
    if content.starts_with(&[0xFF, 0xFE]) {
        return Some(encoding_rs::UTF_16LE);
    }
    None
}

fn bom_len(content: &[u8]) -> usize {
    match detect_bom(content) {
        Some(encoding) if encoding == encoding_rs::UTF_8 => 3,
        Some(_) => 2,
        None => 0,
    }
}

/// Lazy line reader over a memory-mapped word list
///
/// Yields each line with its terminator removed. Whitespace trimming and
/// validation are left to the normalizer.
pub struct WordListReader {
    // Zero-length files are never mapped
    mmap: Option<Mmap>,
    encoding: &'static Encoding,
    position: usize,
}

impl WordListReader {
    /// Open a word list, detecting its encoding
    pub fn open(path: &Path) -> anyhow::Result<Self> {
        let info = detect_encoding(path)?;
        Self::with_encoding(path, info.encoding)
    }

    /// Open a word list with a known encoding
    pub fn with_encoding(path: &Path, encoding: &'static Encoding) -> anyhow::Result<Self> {
        let file = File::open(path).with_context(|| format!("cannot open word list {:?}", path))?;
        let len = file
            .metadata()
            .with_context(|| format!("cannot stat word list {:?}", path))?
            .len();

        let mmap = if len == 0 {
            None
        } else {
            // The file is only read, and is not expected to change while the run is in progress
            Some(unsafe { Mmap::map(&file) }.with_context(|| format!("cannot map word list {:?}", path))?)
        };

        let position = mmap.as_deref().map(bom_len).unwrap_or(0);

        log::debug!("Reading {:?} as {} ({} bytes)", path, encoding.name(), len);

        Ok(Self {
            mmap,
            encoding,
            position,
        })
    }

    /// Get the total size of the file
    pub fn size(&self) -> usize {
        self.mmap.as_ref().map(|m| m.len()).unwrap_or(0)
    }
}

/// Length of the next UTF-16 line, newline included
///
/// Newlines are two bytes wide and aligned to code units.
fn utf16_line_end(remaining: &[u8], big_endian: bool) -> usize {
    let newline = if big_endian { [0x00, b'\n'] } else { [b'\n', 0x00] };
    remaining
        .chunks_exact(2)
        .position(|unit| unit == &newline[..])
        .map(|i| i * 2 + 2)
        .unwrap_or(remaining.len())
}

impl Iterator for WordListReader {
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        let mmap = self.mmap.as_ref()?;
        if self.position >= mmap.len() {
            return None;
        }

        let remaining = &mmap[self.position..];
        let line_end = if self.encoding == encoding_rs::UTF_16LE {
            utf16_line_end(remaining, false)
        } else if self.encoding == encoding_rs::UTF_16BE {
            utf16_line_end(remaining, true)
        } else {
            memchr::memchr(b'\n', remaining)
                .map(|i| i + 1)
                .unwrap_or(remaining.len())
        };
        let line_bytes = &remaining[..line_end];
        self.position += line_end;

        let decoded = if self.encoding == encoding_rs::UTF_8 {
            match std::str::from_utf8(line_bytes) {
                Ok(s) => s.to_string(),
                Err(_) => {
                    log::warn!(
                        "Invalid UTF-8 at byte {}, decoding line as {}",
                        self.position - line_end,
                        utf8_fallback().name()
                    );
                    let (decoded, _) = utf8_fallback().decode_without_bom_handling(line_bytes);
                    decoded.into_owned()
                }
            }
        } else {
            let (decoded, had_errors) = self.encoding.decode_without_bom_handling(line_bytes);
            if had_errors {
                log::warn!("Encoding errors in line, using lossy conversion");
            }
            decoded.into_owned()
        };

        let line = decoded.strip_suffix('\n').unwrap_or(decoded.as_str());
        let line = line.strip_suffix('\r').unwrap_or(line);
        Some(line.to_string())
    }
}
