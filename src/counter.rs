//! # Word counter
//!
//! Counts occurrences of a target word in a byte stream, incrementally.
//!
//! The stream is consumed in chunks terminated by a single space byte (`b' '`),
//! not by Unicode whitespace. Inside each chunk, non-overlapping **substring**
//! matches are counted, so `"Google"` contributes one hit for `"Go"`. The final
//! chunk (no trailing space) is scanned once end-of-data is reached.
//!
//! ```text
//! "Google Go gopher"  ──► ["Google ", "Go ", "gopher"] ──► 1 + 1 + 0 = 2
//! ```

use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};

use crate::error::CountError;

const DELIMITER: u8 = b' ';

/// Counts non-overlapping occurrences of `target` in `reader`.
///
/// The reader is consumed and dropped before returning, on every path.
///
/// ### Errors
/// A read error other than end-of-data stops counting and returns
/// [`CountError::Read`] carrying the matches found so far.
pub async fn count_words<R>(reader: R, target: &str) -> Result<u64, CountError>
where
    R: AsyncRead + Unpin,
{
    let needle = target.as_bytes();
    let mut reader = BufReader::new(reader);
    let mut chunk = Vec::with_capacity(64);
    let mut count = 0u64;

    loop {
        chunk.clear();
        match reader.read_until(DELIMITER, &mut chunk).await {
            Ok(0) => return Ok(count),
            Ok(_) => count += occurrences(&chunk, needle),
            Err(error) => {
                return Err(CountError::Read {
                    partial: count,
                    error,
                });
            }
        }
    }
}

/// Non-overlapping occurrences of `needle` in `haystack`; 0 for an empty needle.
pub(crate) fn occurrences(haystack: &[u8], needle: &[u8]) -> u64 {
    if needle.is_empty() || haystack.len() < needle.len() {
        return 0;
    }

    let mut hits = 0;
    let mut i = 0;
    while i + needle.len() <= haystack.len() {
        if &haystack[i..i + needle.len()] == needle {
            hits += 1;
            i += needle.len();
        } else {
            i += 1;
        }
    }
    hits
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::pin::Pin;
    use std::task::{Context, Poll};
    use tokio::io::ReadBuf;

    /// Serves `data` once, then fails every read.
    struct FailAfter {
        data: Option<&'static [u8]>,
    }

    impl AsyncRead for FailAfter {
        fn poll_read(
            mut self: Pin<&mut Self>,
            _cx: &mut Context<'_>,
            buf: &mut ReadBuf<'_>,
        ) -> Poll<io::Result<()>> {
            match self.data.take() {
                Some(data) => {
                    buf.put_slice(data);
                    Poll::Ready(Ok(()))
                }
                None => Poll::Ready(Err(io::Error::other("connection reset"))),
            }
        }
    }

    #[tokio::test]
    async fn test_substring_matches_count() {
        let n = count_words(&b"Google Go gopher"[..], "Go").await.unwrap();
        assert_eq!(n, 2);
    }

    #[tokio::test]
    async fn test_final_chunk_without_delimiter_is_scanned() {
        let n = count_words(&b"no match here Go"[..], "Go").await.unwrap();
        assert_eq!(n, 1);
    }

    #[tokio::test]
    async fn test_empty_stream_counts_zero() {
        let n = count_words(&b""[..], "Go").await.unwrap();
        assert_eq!(n, 0);
    }

    #[tokio::test]
    async fn test_split_on_space_only() {
        // Newlines and tabs do not split chunks; matches inside are still found.
        let n = count_words(&b"Go\nGo\tGoGo"[..], "Go").await.unwrap();
        assert_eq!(n, 4);
    }

    #[tokio::test]
    async fn test_case_sensitive() {
        let n = count_words(&b"go GO gO Go"[..], "Go").await.unwrap();
        assert_eq!(n, 1);
    }

    #[tokio::test]
    async fn test_read_error_keeps_partial_count() {
        let reader = FailAfter {
            data: Some(b"Go Go "),
        };
        let err = count_words(reader, "Go").await.unwrap_err();
        assert_eq!(err.partial(), 2);
    }

    #[test]
    fn test_occurrences_non_overlapping() {
        assert_eq!(occurrences(b"aaaa", b"aa"), 2);
        assert_eq!(occurrences(b"aaa", b"aa"), 1);
        assert_eq!(occurrences(b"a", b"aa"), 0);
        assert_eq!(occurrences(b"abc", b""), 0);
    }
}
