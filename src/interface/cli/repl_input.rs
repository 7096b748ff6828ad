//! REPL 입력 처리기.
//! 키 입력을 인터프리터가 받는 원시 입력 덩어리(`\r`, DEL, 방향키 시퀀스 등)로 바꾼다.

use std::env;
use std::io::{self, IsTerminal, Write};

use anyhow::Result;
use crossterm::event::{
    DisableBracketedPaste, EnableBracketedPaste, Event, EventStream, KeyCode, KeyEvent,
    KeyEventKind, KeyModifiers,
};
use crossterm::execute;
use crossterm::terminal;
use futures::StreamExt;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

use crate::domain::input::{DELETE, SUBMIT};

/// 입력 소스에서 읽은 한 단위.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    Chunk(String),
    /// Ctrl-D 또는 입력 끝(EOF). 진행 중인 작업은 끝까지 기다린다.
    End,
    /// Ctrl-C. 진행 중인 작업을 버린다.
    Interrupt,
}

/// TTY에서는 raw mode 키 입력, 그 외에는 줄 단위 stdin.
pub enum InputSource {
    Raw {
        events: EventStream,
        _guard: RawModeGuard,
    },
    Lines(Lines<BufReader<Stdin>>),
}

impl InputSource {
    pub fn open() -> Result<Self> {
        if !supports_interactive_input() {
            return Ok(Self::line_fallback());
        }

        match RawModeGuard::enter() {
            Ok(guard) => Ok(Self::Raw {
                events: EventStream::new(),
                _guard: guard,
            }),
            Err(err) => {
                tracing::debug!("raw mode unavailable, using line input: {err:#}");
                Ok(Self::line_fallback())
            }
        }
    }

    fn line_fallback() -> Self {
        Self::Lines(BufReader::new(tokio::io::stdin()).lines())
    }

    /// 다음 입력 덩어리를 기다린다.
    pub async fn next(&mut self) -> Result<InputEvent> {
        match self {
            Self::Raw { events, .. } => loop {
                let Some(event) = events.next().await else {
                    return Ok(InputEvent::End);
                };
                if let Some(input) = translate_event(event?) {
                    return Ok(input);
                }
            },
            Self::Lines(lines) => match lines.next_line().await? {
                Some(line) => Ok(InputEvent::Chunk(format!("{}{SUBMIT}", trim_newline(line)))),
                None => Ok(InputEvent::End),
            },
        }
    }
}

fn supports_interactive_input() -> bool {
    if !io::stdin().is_terminal() || !io::stdout().is_terminal() {
        return false;
    }

    // dumb 터미널에서는 제어 시퀀스 기반 입력을 비활성화한다.
    if let Ok(term) = env::var("TERM")
        && term.eq_ignore_ascii_case("dumb")
    {
        return false;
    }

    true
}

fn translate_event(event: Event) -> Option<InputEvent> {
    match event {
        // 붙여넣기 줄바꿈은 Enter와 같게 취급한다.
        Event::Paste(text) => Some(InputEvent::Chunk(
            text.replace("\r\n", "\r").replace('\n', "\r"),
        )),
        Event::Key(key) => translate_key(key),
        _ => None,
    }
}

fn translate_key(key: KeyEvent) -> Option<InputEvent> {
    if key.kind == KeyEventKind::Release {
        return None;
    }

    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let chunk = match key.code {
        KeyCode::Char('c') if ctrl => return Some(InputEvent::Interrupt),
        KeyCode::Char('d') if ctrl => return Some(InputEvent::End),
        KeyCode::Char(_) if ctrl || key.modifiers.contains(KeyModifiers::ALT) => return None,
        KeyCode::Char(ch) => ch.to_string(),
        KeyCode::Enter => SUBMIT.to_string(),
        KeyCode::Backspace => DELETE.to_string(),
        KeyCode::Tab => "\t".to_string(),
        KeyCode::Up => "\x1b[A".to_string(),
        KeyCode::Down => "\x1b[B".to_string(),
        KeyCode::Right => "\x1b[C".to_string(),
        KeyCode::Left => "\x1b[D".to_string(),
        _ => return None,
    };

    Some(InputEvent::Chunk(chunk))
}

fn trim_newline(mut s: String) -> String {
    while matches!(s.chars().last(), Some('\n' | '\r')) {
        s.pop();
    }
    s
}

/// raw mode와 bracketed paste를 켜고, drop 시 되돌린다.
pub struct RawModeGuard;

impl RawModeGuard {
    fn enter() -> Result<Self> {
        terminal::enable_raw_mode()?;
        let mut stdout = io::stdout();
        if let Err(err) = execute!(stdout, EnableBracketedPaste) {
            tracing::debug!("bracketed paste unavailable: {err}");
        }
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let mut stdout = io::stdout();
        let _ = execute!(stdout, DisableBracketedPaste);
        let _ = terminal::disable_raw_mode();
        let _ = stdout.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    fn chunk(event: Option<InputEvent>) -> String {
        match event {
            Some(InputEvent::Chunk(text)) => text,
            other => panic!("expected chunk, got {other:?}"),
        }
    }

    #[test]
    fn maps_editing_keys_to_raw_chunks() {
        assert_eq!(chunk(translate_key(key(KeyCode::Enter, KeyModifiers::NONE))), "\r");
        assert_eq!(
            chunk(translate_key(key(KeyCode::Backspace, KeyModifiers::NONE))),
            "\u{7f}"
        );
        assert_eq!(chunk(translate_key(key(KeyCode::Up, KeyModifiers::NONE))), "\x1b[A");
        assert_eq!(
            chunk(translate_key(key(KeyCode::Char('L'), KeyModifiers::SHIFT))),
            "L"
        );
    }

    #[test]
    fn ctrl_c_and_ctrl_d_end_the_session() {
        assert_eq!(
            translate_key(key(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(InputEvent::Interrupt)
        );
        assert_eq!(
            translate_key(key(KeyCode::Char('d'), KeyModifiers::CONTROL)),
            Some(InputEvent::End)
        );
        assert_eq!(
            translate_key(key(KeyCode::Char('x'), KeyModifiers::CONTROL)),
            None
        );
    }

    #[test]
    fn pasted_newlines_become_submits() {
        assert_eq!(
            chunk(translate_event(Event::Paste("ls\r\necho hi\n".to_string()))),
            "ls\recho hi\r"
        );
    }

    #[test]
    fn trims_trailing_line_endings() {
        assert_eq!(trim_newline("help\r\n".to_string()), "help");
    }
}
