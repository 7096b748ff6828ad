//! Application layer
//! 명령 테이블과 인터프리터를 정의하고 포트(추상 인터페이스)를 통해 인프라를 사용한다.

pub mod commands;
pub mod config;
pub mod interpreter;
pub mod ports;
pub mod schedule;
pub mod usecases;
