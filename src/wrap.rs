//! Greedy word wrapping bounded by a character count.

/// Wrap `text` into lines no longer than `width` characters.
///
/// Explicit line breaks start new paragraphs. Each paragraph is
/// whitespace-normalized and filled greedily; a word longer than `width`
/// is kept whole on its own line. A blank paragraph still yields one
/// empty line so it reserves vertical space when drawn.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        let paragraph = paragraph.strip_suffix('\r').unwrap_or(paragraph);
        let before = lines.len();
        let mut current = String::new();
        let mut current_len = 0usize;
        for word in paragraph.split_whitespace() {
            let word_len = word.chars().count();
            if current_len == 0 {
                current.push_str(word);
                current_len = word_len;
            } else if current_len + 1 + word_len <= width {
                current.push(' ');
                current.push_str(word);
                current_len += 1 + word_len;
            } else {
                lines.push(std::mem::take(&mut current));
                current.push_str(word);
                current_len = word_len;
            }
        }
        if current_len > 0 {
            lines.push(current);
        }
        if lines.len() == before {
            lines.push(String::new());
        }
    }
    lines
}
