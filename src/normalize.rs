//! 텍스트 정리 모듈
//!
//! 줄 끝 공백과 줄바꿈 형식을 정리하는 순수 함수들입니다.

use regex::Regex;
use std::borrow::Cow;
use std::sync::LazyLock;

static LINE_END: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[ \r\t]*\n").expect("줄 끝 정규식"));

static TRAILING_SPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+\z").expect("끝 공백 정규식"));

/// 한 줄의 끝 공백/탭/CR과 줄바꿈 제거
///
/// # Examples
/// ```
/// use clfilter::normalize::rstrip_line;
///
/// assert_eq!(rstrip_line("hello \t\r\n"), "hello");
/// assert_eq!(rstrip_line("  indented"), "  indented");
/// ```
pub fn rstrip_line(line: &str) -> &str {
    line.trim_end_matches([' ', '\t', '\r', '\n'])
}

/// 여러 줄 텍스트의 모든 줄바꿈 앞 공백/탭/CR 제거
///
/// `\r\n`은 `\n`으로 바뀌고 줄 안쪽 내용은 그대로 둡니다.
pub fn clean_text(text: &str) -> Cow<'_, str> {
    LINE_END.replace_all(text, "\n")
}

/// 문단용 정리: [`clean_text`] 후 끝의 공백 전체(빈 줄 포함)를 줄바꿈 하나로 축약
pub fn clean_paragraph(text: &str) -> String {
    let cleaned = clean_text(text);
    TRAILING_SPACE.replace(&cleaned, "\n").into_owned()
}

/// 공백이 아닌 문자가 하나라도 있는지 확인
pub fn has_content(text: &str) -> bool {
    text.chars().any(|c| !c.is_whitespace())
}
