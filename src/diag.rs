//! 표준 에러 보고 모듈

use colored::Colorize;
use std::fmt::Display;
use std::process;

/// 표준 에러로 메시지 출력
pub fn warn(message: impl Display) {
    eprintln!("{}", message);
}

/// 메시지를 출력하고 종료 코드 1로 프로세스 종료
pub fn die(message: impl Display) -> ! {
    warn(format!("{} {}", "오류:".red().bold(), message));
    process::exit(1)
}
