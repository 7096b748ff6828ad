//! 대화형 세션(REPL)과 스크립트 실행 인터페이스.

use anyhow::Result;

use crate::application::interpreter::Interpreter;
use crate::domain::input::SUBMIT;
use crate::interface::cli::command::SessionOptions;
use crate::interface::cli::composition::AppComposition;
use crate::interface::cli::repl_input::{InputEvent, InputSource};

/// 터미널 입력을 인터프리터로 흘려보낸다.
/// 이동이 일어나거나 입력이 끝나면 세션을 종료한다.
pub async fn run_repl(composition: &AppComposition, options: &SessionOptions) -> Result<()> {
    let mut interpreter = composition.interpreter(options)?;
    let mut navigation = interpreter.subscribe_navigation();
    let mut input = InputSource::open()?;

    interpreter.start();

    loop {
        tokio::select! {
            changed = navigation.changed() => {
                if changed.is_err() || navigation.borrow().is_some() {
                    break;
                }
            }
            event = input.next() => match event? {
                InputEvent::Chunk(chunk) => interpreter.feed(&chunk),
                InputEvent::End => {
                    interpreter.wait_idle().await;
                    break;
                }
                InputEvent::Interrupt => {
                    interpreter.shutdown();
                    break;
                }
            },
        }
    }

    // 이동 이후 남은 지연 작업은 세션과 함께 버린다.
    interpreter.shutdown();
    drop(input);
    println!();
    Ok(())
}

/// 명령줄들을 순서대로 제출한다. 각 줄의 조회/이동이 끝난 뒤 다음 줄로 넘어간다.
pub async fn run_script(
    composition: &AppComposition,
    options: &SessionOptions,
    lines: &[String],
) -> Result<()> {
    let mut interpreter = composition.interpreter(options)?;
    interpreter.start();
    submit_lines(&mut interpreter, lines).await;
    println!();
    Ok(())
}

async fn submit_lines(interpreter: &mut Interpreter, lines: &[String]) {
    let navigation = interpreter.subscribe_navigation();

    for line in lines {
        interpreter.feed(&format!("{line}{SUBMIT}"));
        interpreter.wait_idle().await;

        if let Some(url) = navigation.borrow().as_ref() {
            tracing::debug!(%url, "session ended by navigation");
            break;
        }
    }
}
