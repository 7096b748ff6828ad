//! Domain layer
//! 입력 버퍼, 명령 파싱, 블로그 캐시, 이동 대상 규칙을 I/O 없이 표현한다.

pub mod catalog;
pub mod command;
pub mod input;
pub mod navigation;
