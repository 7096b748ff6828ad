//! 명령 테이블과 핸들러.
//!
//! 핸들러는 입출력을 직접 수행하지 않고 [`Reply`]로 할 일을 기술한다.
//! 실제 출력/조회/이동은 인터프리터가 수행한다.

use unicode_width::UnicodeWidthStr;

use crate::domain::catalog::BlogCatalog;
use crate::domain::command::Command;
use crate::domain::navigation::NavigationTarget;

pub const GOTO_USAGE: &str = "Usage: goto page <page> | goto blog <title|number>";
pub const LS_USAGE: &str = "Usage: ls [pages|blogs]";

/// 핸들러가 참조하는 세션 상태.
pub struct CommandContext<'a> {
    pub catalog: &'a BlogCatalog,
}

/// 비동기로 조회할 목록 종류.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Listing {
    Pages,
    Blogs,
    /// 페이지와 블로그를 동시에 조회하고 둘 다 끝난 뒤 출력한다.
    All,
}

/// 명령 실행 결과 기술.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Lines(Vec<String>),
    Clear,
    Navigate {
        announce: String,
        target: NavigationTarget,
    },
    /// 프롬프트는 조회가 끝날 때까지 미뤄진다.
    Fetch(Listing),
}

impl Reply {
    fn line(text: impl Into<String>) -> Self {
        Self::Lines(vec![text.into()])
    }
}

type Handler = fn(&Command, &CommandContext<'_>) -> Reply;

#[derive(Clone, Copy)]
enum SubVerb {
    Exact(&'static str),
    Missing,
    Any,
}

impl SubVerb {
    fn matches(self, sub_verb: Option<&str>) -> bool {
        match self {
            Self::Exact(expected) => sub_verb == Some(expected),
            Self::Missing => sub_verb.is_none(),
            Self::Any => true,
        }
    }
}

struct Entry {
    verb: &'static str,
    sub_verb: SubVerb,
    /// help에 노출할 (사용법, 설명). 폴백 항목은 `None`.
    help: Option<(&'static str, &'static str)>,
    handler: Handler,
}

// 같은 동사 안에서는 위에서부터 처음 일치하는 항목이 선택된다.
const COMMANDS: &[Entry] = &[
    Entry {
        verb: "ls",
        sub_verb: SubVerb::Missing,
        help: Some(("ls", "list pages and blogs")),
        handler: list_all,
    },
    Entry {
        verb: "ls",
        sub_verb: SubVerb::Exact("pages"),
        help: Some(("ls pages", "list pages")),
        handler: list_pages,
    },
    Entry {
        verb: "ls",
        sub_verb: SubVerb::Exact("blogs"),
        help: Some(("ls blogs", "list blogs (numbered)")),
        handler: list_blogs,
    },
    Entry {
        verb: "ls",
        sub_verb: SubVerb::Any,
        help: None,
        handler: ls_usage,
    },
    Entry {
        verb: "goto",
        sub_verb: SubVerb::Exact("page"),
        help: Some(("goto page <page>", "go to a page (ex: goto page 'videos')")),
        handler: goto_page,
    },
    Entry {
        verb: "goto",
        sub_verb: SubVerb::Exact("blog"),
        help: Some((
            "goto blog <blog|n>",
            "go to a blog by title or number (ex: goto blog 2)",
        )),
        handler: goto_blog,
    },
    Entry {
        verb: "goto",
        sub_verb: SubVerb::Any,
        help: None,
        handler: goto_usage,
    },
    Entry {
        verb: "home",
        sub_verb: SubVerb::Any,
        help: Some(("home", "go to the home page")),
        handler: home,
    },
    Entry {
        verb: "echo",
        sub_verb: SubVerb::Any,
        help: Some(("echo <text>", "echo arguments")),
        handler: echo,
    },
    Entry {
        verb: "clear",
        sub_verb: SubVerb::Any,
        help: Some(("clear", "clear the terminal")),
        handler: clear,
    },
    Entry {
        verb: "help",
        sub_verb: SubVerb::Any,
        help: Some(("help", "show this help")),
        handler: help,
    },
];

/// 명령을 테이블에서 찾아 실행한다. 알 수 없는 동사는 오류 한 줄이 된다.
pub fn dispatch(command: &Command, ctx: &CommandContext<'_>) -> Reply {
    let entry = COMMANDS
        .iter()
        .filter(|entry| entry.verb == command.verb)
        .find(|entry| entry.sub_verb.matches(command.sub_verb()));

    match entry {
        Some(entry) => (entry.handler)(command, ctx),
        None => Reply::line(format!(
            "{}: command not found. Try 'help' for more info.",
            command.verb
        )),
    }
}

/// 고정 도움말. 캐시/네트워크 상태와 무관하다.
pub fn help_lines() -> Vec<String> {
    let rows: Vec<(&str, &str)> = COMMANDS.iter().filter_map(|entry| entry.help).collect();
    let width = rows
        .iter()
        .map(|(usage, _)| UnicodeWidthStr::width(*usage))
        .max()
        .unwrap_or(0);

    let mut lines = vec!["Available commands:".to_string()];
    for (usage, description) in rows {
        let pad = width - UnicodeWidthStr::width(usage);
        lines.push(format!("  {usage}{}  - {description}", " ".repeat(pad)));
    }
    lines
}

fn list_all(_: &Command, _: &CommandContext<'_>) -> Reply {
    Reply::Fetch(Listing::All)
}

fn list_pages(_: &Command, _: &CommandContext<'_>) -> Reply {
    Reply::Fetch(Listing::Pages)
}

fn list_blogs(_: &Command, _: &CommandContext<'_>) -> Reply {
    Reply::Fetch(Listing::Blogs)
}

fn ls_usage(_: &Command, _: &CommandContext<'_>) -> Reply {
    Reply::line(LS_USAGE)
}

fn goto_usage(_: &Command, _: &CommandContext<'_>) -> Reply {
    Reply::line(GOTO_USAGE)
}

fn home(_: &Command, _: &CommandContext<'_>) -> Reply {
    Reply::Navigate {
        announce: "Navigating home...".to_string(),
        target: NavigationTarget::Home,
    }
}

fn echo(command: &Command, _: &CommandContext<'_>) -> Reply {
    Reply::line(command.rest())
}

fn clear(_: &Command, _: &CommandContext<'_>) -> Reply {
    Reply::Clear
}

fn help(_: &Command, _: &CommandContext<'_>) -> Reply {
    Reply::Lines(help_lines())
}

fn goto_page(command: &Command, _ctx: &CommandContext<'_>) -> Reply {
    let Some(argument) = command.argument() else {
        return Reply::line(GOTO_USAGE);
    };

    navigate_to(NavigationTarget::page(&argument))
}

fn goto_blog(command: &Command, ctx: &CommandContext<'_>) -> Reply {
    let Some(argument) = command.argument() else {
        return Reply::line(GOTO_USAGE);
    };

    // 번호 참조는 정규화 전에 현재 캐시 기준으로 제목으로 바꾼다.
    let resolved = ctx.catalog.resolve_reference(&argument);
    navigate_to(NavigationTarget::blog(&resolved))
}

fn navigate_to(target: NavigationTarget) -> Reply {
    Reply::Navigate {
        announce: format!("Navigating to {}...", target.path()),
        target,
    }
}
