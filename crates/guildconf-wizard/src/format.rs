//! Text splitting for size-limited messages.

/// Split text into chunks of at most `max_chars` characters.
///
/// Splits at paragraph boundaries (`\n\n`) first, then newlines, then
/// hard-cuts. A `max_chars` of `0` disables splitting.
pub fn chunk_text(text: &str, max_chars: usize) -> Vec<String> {
    if max_chars == 0 || text.chars().count() <= max_chars {
        return vec![text.to_string()];
    }

    let mut chunks = Vec::new();
    let mut remaining = text;

    while !remaining.is_empty() {
        let Some(hard_cut) = byte_offset_of_char(remaining, max_chars) else {
            chunks.push(remaining.to_string());
            break;
        };

        let split_at = find_split_point(remaining, hard_cut, "\n\n")
            .or_else(|| find_split_point(remaining, hard_cut, "\n"))
            .unwrap_or(hard_cut);

        let (chunk, rest) = remaining.split_at(split_at);
        chunks.push(chunk.trim_end_matches('\n').to_string());
        remaining = rest.trim_start_matches('\n');
    }

    chunks
}

/// Byte offset of the `n`th char, or `None` if `text` has `n` chars or fewer.
fn byte_offset_of_char(text: &str, n: usize) -> Option<usize> {
    text.char_indices().nth(n).map(|(i, _)| i)
}

/// Search backwards from `boundary` for `delimiter`; return the offset just
/// after it. A delimiter at offset 0 yields no split point.
fn find_split_point(text: &str, boundary: usize, delimiter: &str) -> Option<usize> {
    text[..boundary]
        .rfind(delimiter)
        .filter(|pos| *pos > 0)
        .map(|pos| pos.saturating_add(delimiter.len()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_is_one_chunk() {
        assert_eq!(chunk_text("short", 100), vec!["short"]);
        assert_eq!(chunk_text("", 100), vec![""]);
    }

    #[test]
    fn exact_limit_is_one_chunk() {
        let text = "x".repeat(100);
        assert_eq!(chunk_text(&text, 100).len(), 1);
    }

    #[test]
    fn splits_at_paragraph() {
        let text = "a".repeat(50) + "\n\n" + &"b".repeat(50);
        let chunks = chunk_text(&text, 60);
        assert_eq!(chunks, vec!["a".repeat(50), "b".repeat(50)]);
    }

    #[test]
    fn splits_at_newline_when_no_paragraph() {
        let text = "a".repeat(30) + "\n" + &"b".repeat(30);
        let chunks = chunk_text(&text, 40);
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0], "a".repeat(30));
    }

    #[test]
    fn hard_split_when_no_breaks() {
        let text = "x".repeat(200);
        let chunks = chunk_text(&text, 100);
        assert_eq!(chunks.len(), 2);
        assert!(chunks.iter().all(|c| c.len() == 100));
    }

    #[test]
    fn counts_characters_not_bytes() {
        let text = "é".repeat(10);
        assert_eq!(chunk_text(&text, 10).len(), 1);
        let chunks = chunk_text(&text, 4);
        assert_eq!(chunks, vec!["éééé", "éééé", "éé"]);
    }

    #[test]
    fn zero_disables_splitting() {
        let text = "x".repeat(5000);
        assert_eq!(chunk_text(&text, 0).len(), 1);
    }
}
