//! 입력 버퍼와 원시 키 입력(chunk) 해석.

/// 줄 제출(Enter) 문자.
pub const SUBMIT: char = '\r';
/// 터미널이 Backspace 키로 보내는 DEL 문자.
pub const DELETE: char = '\u{7f}';

// 히스토리/커서 이동을 지원하지 않으므로 방향키 시퀀스는 통째로 버린다.
const ARROW_SEQUENCES: [&str; 4] = ["\x1b[A", "\x1b[B", "\x1b[C", "\x1b[D"];

/// 원시 입력 한 덩어리에서 해석된 논리 키 입력.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keystroke {
    Char(char),
    Backspace,
    Submit,
}

/// 임의 길이의 입력 덩어리를 키 입력 목록으로 변환한다.
/// 방향키 시퀀스는 덩어리 어디에 있든 그대로 제거된다.
pub fn decode_chunk(chunk: &str) -> Vec<Keystroke> {
    let mut out = Vec::with_capacity(chunk.len());
    let mut rest = chunk;

    while let Some(ch) = rest.chars().next() {
        if let Some(seq) = ARROW_SEQUENCES.iter().find(|seq| rest.starts_with(**seq)) {
            rest = &rest[seq.len()..];
            continue;
        }

        out.push(match ch {
            SUBMIT => Keystroke::Submit,
            DELETE => Keystroke::Backspace,
            other => Keystroke::Char(other),
        });
        rest = &rest[ch.len_utf8()..];
    }

    out
}

/// 아직 제출되지 않은 명령줄.
#[derive(Debug, Clone, Default)]
pub struct InputBuffer {
    chars: Vec<char>,
}

impl InputBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, ch: char) {
        self.chars.push(ch);
    }

    /// 마지막 문자를 지운다. 비어 있으면 아무 일도 하지 않는다.
    pub fn pop(&mut self) -> Option<char> {
        self.chars.pop()
    }

    /// 버퍼 내용을 꺼내고 비운다. 줄 제출 시에만 호출된다.
    pub fn take(&mut self) -> String {
        let line: String = self.chars.iter().collect();
        self.chars.clear();
        line
    }

    pub fn as_string(&self) -> String {
        self.chars.iter().collect()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_submit_backspace_and_chars() {
        assert_eq!(
            decode_chunk("a\u{7f}\r"),
            vec![Keystroke::Char('a'), Keystroke::Backspace, Keystroke::Submit]
        );
    }

    #[test]
    fn drops_arrow_sequences_anywhere_in_chunk() {
        assert!(decode_chunk("\x1b[A").is_empty());
        assert_eq!(
            decode_chunk("l\x1b[Ds\x1b[C"),
            vec![Keystroke::Char('l'), Keystroke::Char('s')]
        );
    }

    #[test]
    fn lone_escape_is_kept_as_a_char() {
        assert_eq!(decode_chunk("\x1b"), vec![Keystroke::Char('\x1b')]);
    }

    #[test]
    fn pop_on_empty_buffer_is_noop() {
        let mut buffer = InputBuffer::new();
        assert_eq!(buffer.pop(), None);
        assert!(buffer.is_empty());
    }

    #[test]
    fn take_empties_the_buffer() {
        let mut buffer = InputBuffer::new();
        for ch in "ls blogs".chars() {
            buffer.push(ch);
        }
        assert_eq!(buffer.as_string(), "ls blogs");
        assert_eq!(buffer.take(), "ls blogs");
        assert!(buffer.is_empty());
    }

    #[test]
    fn handles_multibyte_chars() {
        let mut buffer = InputBuffer::new();
        for key in decode_chunk("héllo") {
            if let Keystroke::Char(ch) = key {
                buffer.push(ch);
            }
        }
        buffer.pop();
        assert_eq!(buffer.as_string(), "héll");
    }
}
