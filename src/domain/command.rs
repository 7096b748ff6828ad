//! 제출된 한 줄을 명령으로 해석하는 모듈.

/// 제출된 한 줄에서 파싱된 일회성 명령.
/// 따옴표는 특별 취급하지 않고 토큰 안에 그대로 남는다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    pub verb: String,
    pub sub_verb: Option<String>,
    pub args: Vec<String>,
}

impl Command {
    /// 앞뒤 공백을 제거한 뒤 공백 구간 단위로 토큰을 나눈다.
    /// 빈 줄이면 `None`을 반환한다.
    pub fn parse(line: &str) -> Option<Self> {
        let mut tokens = line.split_whitespace().map(ToString::to_string);
        let verb = tokens.next()?;
        let sub_verb = tokens.next();
        let args = tokens.collect();

        Some(Self {
            verb,
            sub_verb,
            args,
        })
    }

    pub fn sub_verb(&self) -> Option<&str> {
        self.sub_verb.as_deref()
    }

    /// 나머지 인자를 단일 공백으로 다시 잇는다.
    /// 여러 단어로 된 대상(블로그 제목 등)은 이렇게 복원된다.
    pub fn argument(&self) -> Option<String> {
        if self.args.is_empty() {
            return None;
        }
        Some(self.args.join(" "))
    }

    /// 서브 동사와 인자를 모두 단일 공백으로 잇는다.
    pub fn rest(&self) -> String {
        self.sub_verb
            .iter()
            .chain(self.args.iter())
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(" ")
    }
}
