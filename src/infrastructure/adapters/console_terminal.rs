//! 표준 출력 기반 터미널 포트 구현 어댑터.

use std::io::{self, Write};
use std::sync::Mutex;

use crossterm::cursor;
use crossterm::execute;
use crossterm::terminal::{self, ClearType};

use crate::application::ports::Terminal;

/// stdout에 그대로 쓰는 터미널 어댑터.
/// raw mode에서는 `\n`만으로 줄 시작으로 돌아가지 않으므로 `\r\n`으로 바꾼다.
pub struct ConsoleTerminal {
    // 비동기 작업과 입력 에코가 섞여 쓰지 않도록 쓰기를 직렬화한다.
    lock: Mutex<()>,
}

impl Default for ConsoleTerminal {
    fn default() -> Self {
        Self::new()
    }
}

impl ConsoleTerminal {
    pub fn new() -> Self {
        Self {
            lock: Mutex::new(()),
        }
    }

    fn emit(&self, text: &str) {
        let raw = terminal::is_raw_mode_enabled().unwrap_or(false);
        let rendered = if raw {
            convert_eol(text)
        } else {
            text.to_string()
        };

        let _guard = self.lock.lock();
        let mut out = io::stdout();
        let _ = out.write_all(rendered.as_bytes());
        let _ = out.flush();
    }
}

impl Terminal for ConsoleTerminal {
    fn write(&self, text: &str) {
        self.emit(text);
    }

    fn write_line(&self, text: &str) {
        self.emit(&format!("{text}\n"));
    }

    fn clear(&self) {
        let _guard = self.lock.lock();
        let mut out = io::stdout();
        let _ = execute!(
            out,
            terminal::Clear(ClearType::All),
            terminal::Clear(ClearType::Purge),
            cursor::MoveTo(0, 0)
        );
        let _ = out.flush();
    }
}

/// 단독 `\n`을 `\r\n`으로 바꾼다. 이미 `\r\n`인 곳은 그대로 둔다.
fn convert_eol(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 8);
    let mut prev = None;
    for ch in text.chars() {
        if ch == '\n' && prev != Some('\r') {
            out.push('\r');
        }
        out.push(ch);
        prev = Some(ch);
    }
    out
}
