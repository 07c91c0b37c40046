//! Log redaction for identifiers and clinical readings.
//!
//! Prediction inputs are health data. Call sites log counts, paths and model
//! names, not observations; this writer is the fallback that scrubs anything
//! that slips through before it reaches a log file or stdout:
//! - identifiers (UUIDs, record numbers, e-mail addresses, phone numbers)
//! - `name=value` / `name: value` readings for the observation fields
//!
//! Output longer than `BPSENSE_SANITIZE_MAX_BYTES` (default 8 KiB) per line is
//! truncated.

use std::sync::OnceLock;

use regex::Regex;
use tracing_subscriber::fmt::MakeWriter;

const DEFAULT_MAX_LINE_BYTES: usize = 8 * 1024;

struct Redaction {
    pattern: Regex,
    replacement: &'static str,
}

fn redactions() -> &'static [Redaction] {
    static RULES: OnceLock<Vec<Redaction>> = OnceLock::new();
    RULES.get_or_init(|| {
        [
            (
                r"\b[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}\b",
                "[ID]",
            ),
            (r"(?i)\b(?:MRN|patient[_ ]?id)[:=#\s]*[A-Za-z0-9-]{4,}\b", "[ID]"),
            (r"(?i)\b[a-z0-9._%+-]+@[a-z0-9-]+(?:\.[a-z0-9-]+)+\b", "[EMAIL]"),
            (r"\b\+?\d{1,3}[-.\s]\(?\d{3}\)?[-.\s]\d{3}[-.\s]\d{4}\b", "[PHONE]"),
            (
                r"(?i)\b(age|height|weight|heart_rate|bmi|bp_mean|bp_std|bp_max|bp_min|bp_median|hypertension|diabetes|cerebral_infarction|cerebrovascular_disease)(\s*[:=]\s*)[A-Za-z0-9.+-]+",
                "$1$2[REDACTED]",
            ),
        ]
        .into_iter()
        .map(|(pattern, replacement)| Redaction {
            // Patterns are static literals.
            pattern: Regex::new(pattern).expect("valid redaction pattern"),
            replacement,
        })
        .collect()
    })
}

fn max_line_bytes() -> usize {
    std::env::var("BPSENSE_SANITIZE_MAX_BYTES")
        .ok()
        .and_then(|v| v.trim().parse::<usize>().ok())
        .filter(|&v| v > 0)
        .unwrap_or(DEFAULT_MAX_LINE_BYTES)
}

/// Redact identifiers and clinical readings from `input`.
#[must_use]
pub fn sanitize(input: &str) -> String {
    redact(input, max_line_bytes())
}

fn redact(input: &str, max_bytes: usize) -> String {
    let mut end = input.len().min(max_bytes);
    while !input.is_char_boundary(end) {
        end -= 1;
    }

    let mut out = redactions()
        .iter()
        .fold(input[..end].to_string(), |text, rule| {
            rule.pattern.replace_all(&text, rule.replacement).into_owned()
        });

    if end < input.len() {
        out.push_str(" [TRUNCATED]");
        if input.ends_with('\n') {
            out.push('\n');
        }
    }
    out
}

/// `MakeWriter` wrapper that redacts each formatted log line.
#[derive(Debug, Clone)]
pub struct SanitizingMakeWriter<M> {
    inner: M,
}

impl<M> SanitizingMakeWriter<M> {
    #[must_use]
    pub fn new(inner: M) -> Self {
        Self { inner }
    }
}

/// Line-buffering writer produced by [`SanitizingMakeWriter`].
pub struct SanitizingWriter<W: std::io::Write> {
    inner: W,
    pending: Vec<u8>,
}

impl<W: std::io::Write> SanitizingWriter<W> {
    fn emit(&mut self, bytes: &[u8]) -> std::io::Result<()> {
        let text = String::from_utf8_lossy(bytes);
        self.inner.write_all(sanitize(&text).as_bytes())
    }
}

impl<W: std::io::Write> std::io::Write for SanitizingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.pending.extend_from_slice(buf);
        while let Some(pos) = self.pending.iter().position(|&b| b == b'\n') {
            let line: Vec<u8> = self.pending.drain(..=pos).collect();
            self.emit(&line)?;
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        if !self.pending.is_empty() {
            let rest = std::mem::take(&mut self.pending);
            self.emit(&rest)?;
        }
        self.inner.flush()
    }
}

impl<W: std::io::Write> Drop for SanitizingWriter<W> {
    fn drop(&mut self) {
        let _ = std::io::Write::flush(self);
    }
}

impl<'a, M> MakeWriter<'a> for SanitizingMakeWriter<M>
where
    M: MakeWriter<'a>,
{
    type Writer = SanitizingWriter<M::Writer>;

    fn make_writer(&'a self) -> Self::Writer {
        SanitizingWriter {
            inner: self.inner.make_writer(),
            pending: Vec::new(),
        }
    }
}
