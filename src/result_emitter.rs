use std::io::{self, Write};

use crate::global_constants::LOG_TAG_EMIT;

pub fn truncate_to_char_limit(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_index, _)) => &text[..byte_index],
        None => text,
    }
}

/// Writes the one line the caller reads. Falls back to a bare newline if the full line
/// cannot be written, so the output is never left unterminated.
pub fn emit_normalized_text<W: Write>(writer: &mut W, text: &str, max_chars: usize) {
    let mut line = String::with_capacity(text.len().min(max_chars.saturating_mul(4)) + 1);
    line.push_str(truncate_to_char_limit(text, max_chars));
    line.push('\n');

    if let Err(error) = write_line(writer, line.as_bytes()) {
        log::debug!("{} failed to write result: {}", LOG_TAG_EMIT, error);
        if let Err(error) = write_line(writer, b"\n") {
            log::debug!("{} failed to write empty line: {}", LOG_TAG_EMIT, error);
        }
    }
}

fn write_line<W: Write>(writer: &mut W, bytes: &[u8]) -> io::Result<()> {
    writer.write_all(bytes)?;
    writer.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn emitted(text: &str, max_chars: usize) -> String {
        let mut buffer = Vec::new();
        emit_normalized_text(&mut buffer, text, max_chars);
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn test_truncation_is_a_hard_cutoff_with_single_newline() {
        assert_eq!(emitted("HelloWorld", 5), "Hello\n");
    }

    #[test]
    fn test_short_text_is_emitted_whole() {
        assert_eq!(emitted("Hi", 4000), "Hi\n");
    }

    #[test]
    fn test_empty_text_emits_empty_line() {
        assert_eq!(emitted("", 4000), "\n");
    }

    #[test]
    fn test_truncation_counts_characters_not_bytes() {
        assert_eq!(truncate_to_char_limit("日本語テキスト", 3), "日本語");
        assert_eq!(truncate_to_char_limit("héllo", 2), "hé");
    }

    #[test]
    fn test_zero_limit_emits_empty_line() {
        assert_eq!(emitted("anything", 0), "\n");
    }

    struct RejectLongWrites {
        written: Vec<u8>,
    }

    impl Write for RejectLongWrites {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            if buf.len() > 1 {
                return Err(io::Error::new(io::ErrorKind::Other, "encoding failure"));
            }
            self.written.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_failed_write_falls_back_to_empty_line() {
        let mut writer = RejectLongWrites { written: Vec::new() };

        emit_normalized_text(&mut writer, "Hello", 4000);

        assert_eq!(writer.written, b"\n");
    }
}
