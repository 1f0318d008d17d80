//! Number demultiplexing
//!
//! Path data written by vector tools omits separators wherever the grammar
//! allows it. A number ends where a second decimal point begins, so
//! `1.2.3` denotes `1.2` followed by `.3`.
use std::ops::Range;

/// Split a chunk containing unseparated decimal numbers into numeric
/// literals.
///
/// ```
/// use rrpath_compile::path::demux;
/// assert_eq!(demux("1.2.3"), ["1.2", "0.3"]);
/// assert_eq!(demux("0.5.25.125"), ["0.5", "0.25", "0.125"]);
/// assert_eq!(demux("5"), ["5"]);
/// ```
pub fn demux(chunk: &str) -> Vec<String> {
    demux_spanned(chunk, 0)
        .into_iter()
        .map(|(literal, _)| literal)
        .collect()
}

/// `demux` that also returns the source range of each literal. `start` is
/// the position of `chunk` in the source text.
pub(super) fn demux_spanned(chunk: &str, start: usize) -> Vec<(String, Range<usize>)> {
    let mut parts = chunk.split('.');
    let first = parts.next().unwrap_or("");

    let mut literals = Vec::new();
    let mut pos = start + first.len();

    for (i, part) in parts.enumerate() {
        // `pos` points to the dot preceding `part`
        let span_end = pos + 1 + part.len();
        if i == 0 {
            literals.push((format!("{}.{}", first, part), start..span_end));
        } else {
            literals.push((format!("0.{}", part), pos..span_end));
        }
        pos = span_end;
    }

    if literals.is_empty() {
        // No dot at all
        literals.push((chunk.to_owned(), start..start + chunk.len()));
    }

    literals
}
