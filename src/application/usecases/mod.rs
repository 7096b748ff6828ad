//! 인터프리터 밖에서 실행되는 유스케이스 모음.

pub mod inspect_config;
