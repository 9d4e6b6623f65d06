//! 소스 통째 읽기 모듈
//!
//! 소스마다 전체 내용을 하나의 텍스트로 돌려줍니다. URL 소스는 네트워크에서 가져옵니다.

use encoding_rs::Encoding;
use std::io::Write;

use crate::decode::{decode_lenient, Fetched};
use crate::error::{FilterError, Result};
use crate::lines::LineSource;
use crate::normalize::clean_text;
use crate::source::{fetch_bytes, SourceKind};

/// URL 내용을 가져와 UTF-8 → 대체 인코딩 순서로 디코딩
///
/// 두 디코딩이 모두 실패하면 [`Fetched::Bytes`]로 원본 바이트를 돌려줍니다.
///
/// # Arguments
/// * `url` - 가져올 http/https URL
/// * `fallback` - UTF-8 실패 시 쓸 인코딩 (`None`이면 ISO-8859-1)
///
/// # Returns
/// 디코딩 결과 또는 가져오기 에러
pub fn fetch_url(url: &str, fallback: Option<&'static Encoding>) -> Result<Fetched> {
    Ok(decode_lenient(fetch_bytes(url)?, fallback))
}

/// 소스 단위 텍스트 반복자
///
/// 파일/표준 입력은 줄 반복자를 통해 읽으므로 줄 카운터가 갱신되고, 제자리 수정 모드에서는
/// 다음 소스로 넘어가기 전까지 [`Slurp::output`]이 그 파일의 임시 출력이 됩니다.
/// URL 소스에는 줄 카운터와 제자리 수정이 적용되지 않습니다.
pub struct Slurp {
    lines: LineSource,
}

impl Slurp {
    /// 줄 반복자 위에 통째 읽기 반복자 생성
    pub fn new(lines: LineSource) -> Self {
        Self { lines }
    }

    /// 현재 소스 이름
    pub fn filename(&self) -> Option<&str> {
        self.lines.filename()
    }

    /// 전체 줄 번호
    pub fn lineno(&self) -> usize {
        self.lines.lineno()
    }

    /// 출력 대상 ([`LineSource::output`] 참고)
    pub fn output(&mut self) -> &mut dyn Write {
        self.lines.output()
    }

    /// 열린 핸들을 닫고 남은 소스를 모두 버림
    pub fn close(&mut self) -> Result<()> {
        self.lines.close()
    }

    fn finish_text(&self, text: String) -> String {
        if self.lines.config().autostrip {
            clean_text(&text).into_owned()
        } else {
            text
        }
    }

    fn read_url(&mut self) -> Option<Result<String>> {
        let SourceKind::Url(url) = self.lines.detach_next()? else {
            return None;
        };
        log::debug!("URL 통째 읽기: {}", url);

        let fallback = self.lines.config().fallback_encoding;
        let result = fetch_url(&url, fallback).and_then(|fetched| match fetched {
            Fetched::Text(text) => Ok(self.finish_text(text)),
            Fetched::Bytes(_) => Err(FilterError::Fetch {
                url: url.clone(),
                reason: format!(
                    "UTF-8과 {} 모두 디코딩할 수 없습니다",
                    fallback.map_or("ISO-8859-1", |e| e.name())
                ),
            }),
        });
        Some(result)
    }

    fn read_source(&mut self) -> Option<Result<String>> {
        match self.lines.open_next() {
            Ok(true) => {}
            Ok(false) => return None,
            Err(e) => return Some(Err(e)),
        }

        let mut text = String::new();
        loop {
            match self.lines.read_raw() {
                Ok(Some(line)) => text.push_str(&line),
                Ok(None) => break,
                Err(e) => {
                    self.lines.abandon_current();
                    return Some(Err(e));
                }
            }
        }
        Some(Ok(self.finish_text(text)))
    }
}

impl Iterator for Slurp {
    type Item = Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Err(e) = self.lines.close_current() {
            return Some(Err(e));
        }

        if self.lines.next_pending()?.is_url() {
            self.read_url()
        } else {
            self.read_source()
        }
    }
}
