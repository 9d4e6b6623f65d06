//! 필터 세션 설정 모듈
//!
//! 구분자, 자동 정리(autostrip), 제자리 수정, 인코딩 설정을 담습니다.
//! 세션이 만들어진 뒤에는 바뀌지 않습니다.

use encoding_rs::{Encoding, UTF_8};

use crate::error::{FilterError, Result};

/// 필터 세션 설정
#[derive(Debug, Clone, Copy)]
pub struct FilterConfig {
    /// CSV 행 구분자 (기본값: ',')
    pub delimiter: char,
    /// 줄 끝 공백 자동 정리 여부 (기본값: true)
    pub autostrip: bool,
    /// 표준 출력을 원본 파일로 되돌려 쓰는지 여부 (기본값: false)
    pub in_place: bool,
    /// 입력 인코딩 (기본값: UTF-8)
    pub encoding: &'static Encoding,
    /// URL 내용이 UTF-8이 아닐 때 시도할 인코딩 (None이면 ISO-8859-1)
    pub fallback_encoding: Option<&'static Encoding>,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            delimiter: ',',
            autostrip: true,
            in_place: false,
            encoding: UTF_8,
            fallback_encoding: None,
        }
    }
}

impl FilterConfig {
    /// 기본 설정 생성
    pub fn new() -> Self {
        Self::default()
    }

    /// 구분자 설정
    ///
    /// 따옴표와 줄바꿈 문자는 구분자로 쓸 수 없습니다.
    ///
    /// # Arguments
    /// * `delimiter` - CSV 필드 구분자
    ///
    /// # Returns
    /// 구분자가 바뀐 설정 또는 구분자 에러
    pub fn with_delimiter(mut self, delimiter: char) -> Result<Self> {
        if matches!(delimiter, '"' | '\n' | '\r') {
            return Err(FilterError::InvalidDelimiter {
                delimiter: delimiter.to_string(),
            });
        }
        self.delimiter = delimiter;
        Ok(self)
    }

    /// 자동 정리 설정
    pub fn with_autostrip(mut self, autostrip: bool) -> Self {
        self.autostrip = autostrip;
        self
    }

    /// 제자리 수정 설정
    pub fn with_in_place(mut self, in_place: bool) -> Self {
        self.in_place = in_place;
        self
    }

    /// 인코딩 이름으로 입력 인코딩 설정 (예: "utf-8", "euc-kr")
    pub fn with_encoding(mut self, label: &str) -> Result<Self> {
        self.encoding = lookup_encoding(label)?;
        Ok(self)
    }

    /// URL 대체 인코딩 설정
    pub fn with_fallback_encoding(mut self, label: &str) -> Result<Self> {
        self.fallback_encoding = Some(lookup_encoding(label)?);
        Ok(self)
    }
}

/// 구분자 문자열을 한 글자로 해석
///
/// `\t`, `tab` 표기는 탭 문자로 바꿉니다.
///
/// # Arguments
/// * `text` - 명령줄에서 받은 구분자 문자열
///
/// # Returns
/// 구분자 문자 또는 한 글자가 아닐 때의 에러
pub fn parse_delimiter(text: &str) -> Result<char> {
    let invalid = || FilterError::InvalidDelimiter {
        delimiter: text.to_string(),
    };

    match text {
        "\\t" | "tab" => return Ok('\t'),
        _ => {}
    }

    let mut chars = text.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(invalid()),
    }
}

fn lookup_encoding(label: &str) -> Result<&'static Encoding> {
    Encoding::for_label(label.trim().as_bytes()).ok_or_else(|| FilterError::UnknownEncoding {
        label: label.to_string(),
    })
}
