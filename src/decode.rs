//! 문자 디코딩 모듈
//!
//! 줄 단위 엄격 디코딩과, URL 내용에 쓰는 UTF-8 → 대체 인코딩 순서의 관대한 디코딩을 담당합니다.

use encoding_rs::{Encoding, UTF_8};

use crate::error::{FilterError, Result};

/// 관대한 디코딩 결과
///
/// UTF-8과 대체 인코딩 모두 실패한 경우에만 원본 바이트를 그대로 돌려줍니다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fetched {
    /// 디코딩된 텍스트
    Text(String),
    /// 어떤 인코딩으로도 해석되지 않은 원본 바이트
    Bytes(Vec<u8>),
}

impl Fetched {
    /// 텍스트 결과 참조
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Fetched::Text(text) => Some(text),
            Fetched::Bytes(_) => None,
        }
    }

    /// 텍스트 결과로 변환
    pub fn into_text(self) -> Option<String> {
        match self {
            Fetched::Text(text) => Some(text),
            Fetched::Bytes(_) => None,
        }
    }
}

/// 설정된 인코딩으로 한 줄 디코딩 (대체 문자 없이 실패 시 에러)
pub(crate) fn decode_line(
    bytes: Vec<u8>,
    encoding: &'static Encoding,
    name: &str,
    line: usize,
) -> Result<String> {
    let error = || FilterError::Decode {
        name: name.to_string(),
        line,
        encoding: encoding.name(),
    };

    if encoding == UTF_8 {
        return String::from_utf8(bytes).map_err(|_| error());
    }

    encoding
        .decode_without_bom_handling_and_without_replacement(&bytes)
        .map(|text| text.into_owned())
        .ok_or_else(error)
}

/// UTF-8 우선, 실패 시 대체 인코딩으로 디코딩
///
/// `fallback`이 `None`이면 ISO-8859-1을 쓰며, 이 경우 모든 바이트열이 디코딩됩니다.
///
/// # Arguments
/// * `bytes` - 디코딩할 원본 바이트
/// * `fallback` - UTF-8 실패 시 쓸 인코딩
///
/// # Returns
/// 디코딩된 텍스트, 두 디코딩이 모두 실패하면 원본 바이트
///
/// # Examples
/// ```
/// use clfilter::decode::{decode_lenient, Fetched};
///
/// let fetched = decode_lenient(vec![0x63, 0x61, 0x66, 0xE9], None);
/// assert_eq!(fetched, Fetched::Text("café".to_string()));
/// ```
pub fn decode_lenient(bytes: Vec<u8>, fallback: Option<&'static Encoding>) -> Fetched {
    let bytes = match String::from_utf8(bytes) {
        Ok(text) => return Fetched::Text(text),
        Err(e) => e.into_bytes(),
    };

    match fallback {
        None => Fetched::Text(encoding_rs::mem::decode_latin1(&bytes).into_owned()),
        Some(encoding) => {
            let decoded = encoding
                .decode_without_bom_handling_and_without_replacement(&bytes)
                .map(|text| text.into_owned());
            match decoded {
                Some(text) => Fetched::Text(text),
                None => Fetched::Bytes(bytes),
            }
        }
    }
}
