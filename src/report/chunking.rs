/// Telegram rejects messages over 4096 UTF-16 units; stay under with headroom.
pub const MAX_CHUNK_CHARS: usize = 4000;

/// Splits `text` into message-sized chunks without ever breaking a line.
///
/// Lines keep their `\n` terminator and are packed greedily. A single line
/// longer than `max_chars` becomes a chunk of its own, over the limit.
/// Lengths are counted in UTF-16 code units, the unit Telegram measures
/// messages in, and joining the chunks gives back `text`.
pub fn chunk_report(text: &str, max_chars: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for line in text.split_inclusive('\n') {
        let line_len = utf16_len(line);

        if !current.is_empty() && current_len + line_len > max_chars {
            chunks.push(std::mem::take(&mut current));
            current_len = 0;
        }

        current.push_str(line);
        current_len += line_len;
    }

    if !current.is_empty() {
        chunks.push(current);
    }

    chunks
}

/// Message length as the chat API counts it; astral emoji count twice.
pub fn utf16_len(text: &str) -> usize {
    text.encode_utf16().count()
}
