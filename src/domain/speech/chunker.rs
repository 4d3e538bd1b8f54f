/// Sentence terminators a chunk may end on; the trailing space starts the next chunk
const SENTENCE_BREAKS: [&str; 3] = [". ", "! ", "? "];

/// Split text into chunks of at most `max_chars` characters, preferring to cut right
/// after a sentence terminator.
///
/// Chunks borrow from `text` and concatenate back to it exactly. A terminator at window
/// offset 0 does not count as a break. When no sentence break exists inside the window
/// the chunk is cut hard at `max_chars`. Lengths are counted in
/// `char`s so a multi-byte code point is never split.
pub fn split_into_chunks(text: &str, max_chars: usize) -> Vec<&str> {
    let max_chars = max_chars.max(1);
    let mut chunks = Vec::new();
    let mut rest = text;

    while !rest.is_empty() {
        let window_end = match rest.char_indices().nth(max_chars) {
            Some((byte_index, _)) => byte_index,
            None => {
                chunks.push(rest);
                break;
            }
        };

        let cut = last_sentence_break(&rest[..window_end]).unwrap_or(window_end);
        let (chunk, tail) = rest.split_at(cut);
        chunks.push(chunk);
        rest = tail;
    }

    chunks
}

/// Byte offset just past the last terminator in `window`, ignoring a match at offset 0
fn last_sentence_break(window: &str) -> Option<usize> {
    SENTENCE_BREAKS
        .iter()
        .filter_map(|brk| window.rfind(brk))
        .filter(|&index| index > 0)
        .max()
        .map(|index| index + 1)
}
