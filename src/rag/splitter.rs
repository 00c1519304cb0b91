/// Recursive character splitter: break on the coarsest separator that
/// produces pieces small enough, then reassemble pieces into windows of at
/// most `chunk_size` characters with `chunk_overlap` characters shared
/// between consecutive windows.
#[derive(Debug, Clone)]
pub struct TextSplitter {
    chunk_size: usize,
    chunk_overlap: usize,
    separators: Vec<&'static str>,
}

impl TextSplitter {
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Self {
        Self {
            chunk_size,
            chunk_overlap: chunk_overlap.min(chunk_size / 2),
            separators: vec![
                "\n\n", // Double newline (paragraphs)
                "\n",   // Single newline
                " ",    // Space
                "",     // Character level
            ],
        }
    }

    /// Trimmed, non-empty chunks in document order.
    pub fn split_text(&self, text: &str) -> Vec<String> {
        let pieces = self.recursive_split(text, 0);
        self.merge_pieces(pieces)
            .into_iter()
            .map(|chunk| chunk.trim().to_string())
            .filter(|chunk| !chunk.is_empty())
            .collect()
    }

    // Splits into atomic pieces no longer than chunk_size, separators kept
    // attached so concatenating the pieces reproduces the input.
    fn recursive_split(&self, text: &str, separator_index: usize) -> Vec<String> {
        if text.len() <= self.chunk_size {
            return vec![text.to_string()];
        }

        if separator_index >= self.separators.len() {
            return self.split_by_length(text);
        }

        let separator = self.separators[separator_index];

        if separator.is_empty() {
            return self.split_by_length(text);
        }

        let parts: Vec<&str> = text.split(separator).collect();

        if parts.len() == 1 {
            return self.recursive_split(text, separator_index + 1);
        }

        let last = parts.len() - 1;
        let mut pieces = Vec::new();

        for (i, part) in parts.iter().enumerate() {
            let mut piece = part.to_string();
            if i < last {
                piece.push_str(separator);
            }

            if piece.len() <= self.chunk_size {
                pieces.push(piece);
            } else {
                pieces.extend(self.recursive_split(&piece, separator_index + 1));
            }
        }

        pieces
    }

    fn split_by_length(&self, text: &str) -> Vec<String> {
        let mut chunks = Vec::new();
        let chars: Vec<char> = text.chars().collect();
        let mut start = 0;

        while start < chars.len() {
            let end = (start + self.chunk_size).min(chars.len());
            chunks.push(chars[start..end].iter().collect());

            if end == chars.len() {
                break;
            }

            start = end;
        }

        chunks
    }

    // Sliding window over the pieces: emit when the next piece would not
    // fit, then drop leading pieces until at most chunk_overlap characters
    // remain to seed the next window.
    fn merge_pieces(&self, pieces: Vec<String>) -> Vec<String> {
        let mut chunks = Vec::new();
        let mut window: Vec<String> = Vec::new();
        let mut window_len = 0usize;

        for piece in pieces {
            let piece_len = piece.len();

            if window_len + piece_len > self.chunk_size && !window.is_empty() {
                chunks.push(window.concat());

                while !window.is_empty()
                    && (window_len > self.chunk_overlap
                        || window_len + piece_len > self.chunk_size)
                {
                    let removed = window.remove(0);
                    window_len -= removed.len();
                }
            }

            window.push(piece);
            window_len += piece_len;
        }

        if !window.is_empty() {
            chunks.push(window.concat());
        }

        chunks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_is_one_chunk() {
        let splitter = TextSplitter::new(100, 20);
        let chunks = splitter.split_text("Short text");

        assert_eq!(chunks, vec!["Short text".to_string()]);
    }

    #[test]
    fn chunks_respect_size_bound() {
        let splitter = TextSplitter::new(30, 5);
        let text = "This is a test.\n\nThis is another paragraph.\n\nAnd a third one.";
        let chunks = splitter.split_text(text);

        assert!(!chunks.is_empty());
        for chunk in &chunks {
            assert!(chunk.len() <= 30, "chunk too long: {:?}", chunk);
        }
    }

    #[test]
    fn consecutive_chunks_overlap() {
        let splitter = TextSplitter::new(40, 15);
        let text = "one two three four five six seven eight nine ten eleven twelve thirteen";
        let chunks = splitter.split_text(text);

        assert!(chunks.len() > 1);
        for pair in chunks.windows(2) {
            let previous = &pair[0];
            let next = &pair[1];
            let shared = previous
                .split_whitespace()
                .any(|word| next.split_whitespace().any(|w| w == word));
            assert!(shared, "no overlap between {:?} and {:?}", previous, next);
        }
    }

    #[test]
    fn every_word_survives_splitting() {
        let splitter = TextSplitter::new(25, 8);
        let text = "alpha beta gamma delta epsilon zeta eta theta iota kappa";
        let chunks = splitter.split_text(text);

        let joined = chunks.join(" ");
        for word in text.split_whitespace() {
            assert!(joined.contains(word), "lost word {:?}", word);
        }
    }

    #[test]
    fn whitespace_only_input_yields_nothing() {
        let splitter = TextSplitter::new(30, 5);
        assert!(splitter.split_text("").is_empty());
        assert!(splitter.split_text("\n\n   \n\n \n").is_empty());
    }

    #[test]
    fn unbroken_text_splits_at_character_level() {
        let splitter = TextSplitter::new(10, 2);
        let text = "a".repeat(35);
        let chunks = splitter.split_text(&text);

        assert!(chunks.len() >= 4);
        for chunk in &chunks {
            assert!(chunk.len() <= 10);
        }
    }

    #[test]
    fn multibyte_text_does_not_panic() {
        let splitter = TextSplitter::new(12, 4);
        let text = "héllo wörld ünïcode tëxt ägäin ünd wïeder";
        let chunks = splitter.split_text(text);

        assert!(!chunks.is_empty());
    }
}
