//! 에러 타입 정의 모듈
//!
//! clfilter에서 발생할 수 있는 모든 에러 타입을 정의합니다.

use std::path::PathBuf;
use thiserror::Error;

/// clfilter에서 발생할 수 있는 에러 타입
#[derive(Error, Debug)]
pub enum FilterError {
    /// 입력 소스 열기 실패
    #[error("입력을 열 수 없습니다 ({name}): {reason}")]
    SourceOpen { name: String, reason: String },

    /// 입력 읽기 실패
    #[error("입력 읽기 실패 ({name}): {reason}")]
    Read { name: String, reason: String },

    /// 설정된 인코딩으로 디코딩할 수 없음
    #[error("{encoding} 디코딩 실패 ({name}, {line}번째 줄)")]
    Decode {
        name: String,
        line: usize,
        encoding: &'static str,
    },

    /// URL 가져오기 실패
    #[error("URL을 가져올 수 없습니다 ({url}): {reason}")]
    Fetch { url: String, reason: String },

    /// CSV/TSV 행 파싱 실패
    #[error("행 파싱 실패 ({name}:{line}): {reason}")]
    RowParse {
        name: String,
        line: usize,
        reason: String,
    },

    /// 제자리 수정은 URL 입력과 함께 쓸 수 없음
    #[error("제자리 수정 모드에서는 URL 입력을 사용할 수 없습니다: {url}")]
    InPlaceUrl { url: String },

    /// 제자리 수정용 임시 파일 생성/교체 실패
    #[error("제자리 수정 실패 ({path}): {reason}")]
    InPlace { path: PathBuf, reason: String },

    /// 알 수 없는 인코딩 이름
    #[error("알 수 없는 인코딩: {label}")]
    UnknownEncoding { label: String },

    /// 사용할 수 없는 구분자
    #[error("사용할 수 없는 구분자: {delimiter:?}")]
    InvalidDelimiter { delimiter: String },

    /// 유효하지 않은 글로브 패턴
    #[error("유효하지 않은 패턴: {pattern}")]
    InvalidPattern { pattern: String },

    /// 외부 명령 실행 실패
    #[error("명령 실행 실패 ({command}): {reason}")]
    Command { command: String, reason: String },
}

/// clfilter 결과 타입 별칭
pub type Result<T> = std::result::Result<T, FilterError>;
