//! 입력 소스 모듈
//!
//! 소스 이름을 표준 입력, 파일, URL 중 하나로 해석하고 읽기 핸들을 엽니다.

use regex::Regex;
use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Cursor};
use std::path::PathBuf;
use std::sync::LazyLock;

use crate::error::{FilterError, Result};

/// 표준 입력의 표시 이름
pub const STDIN_NAME: &str = "<stdin>";

static URL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:https?|ftp)://").expect("URL 정규식"));

/// 입력 소스 종류
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceKind {
    /// 표준 입력 (`-` 또는 빈 입력 목록)
    Stdin,
    /// 로컬 파일
    File(PathBuf),
    /// http/https/ftp URL
    Url(String),
}

impl SourceKind {
    /// 소스 이름을 종류별로 해석
    ///
    /// # Examples
    /// ```
    /// use clfilter::source::SourceKind;
    ///
    /// assert_eq!(SourceKind::resolve("-"), SourceKind::Stdin);
    /// assert!(SourceKind::resolve("https://example.com/a.txt").is_url());
    /// assert!(!SourceKind::resolve("notes.txt").is_url());
    /// ```
    pub fn resolve(name: &str) -> Self {
        if name == "-" {
            SourceKind::Stdin
        } else if is_url(name) {
            SourceKind::Url(name.to_string())
        } else {
            SourceKind::File(PathBuf::from(name))
        }
    }

    /// 소스 이름 목록 해석 (빈 목록이면 표준 입력 하나)
    pub fn resolve_all<S: AsRef<str>>(names: &[S]) -> Vec<Self> {
        if names.is_empty() {
            return vec![SourceKind::Stdin];
        }
        names.iter().map(|n| Self::resolve(n.as_ref())).collect()
    }

    /// URL 소스인지 확인
    pub fn is_url(&self) -> bool {
        matches!(self, SourceKind::Url(_))
    }

    /// 표시 이름 (표준 입력은 `<stdin>`)
    pub fn display_name(&self) -> String {
        self.to_string()
    }

    /// 읽기 핸들 열기
    ///
    /// URL은 내용 전체를 받아 메모리에서 읽습니다.
    pub(crate) fn open(&self) -> Result<Box<dyn BufRead>> {
        match self {
            SourceKind::Stdin => Ok(Box::new(io::stdin().lock())),
            SourceKind::File(path) => {
                let file = File::open(path).map_err(|e| FilterError::SourceOpen {
                    name: path.display().to_string(),
                    reason: e.to_string(),
                })?;
                Ok(Box::new(BufReader::new(file)))
            }
            SourceKind::Url(url) => Ok(Box::new(Cursor::new(fetch_bytes(url)?))),
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceKind::Stdin => write!(f, "{}", STDIN_NAME),
            SourceKind::File(path) => write!(f, "{}", path.display()),
            SourceKind::Url(url) => write!(f, "{}", url),
        }
    }
}

/// http/https/ftp URL 형식인지 확인
pub fn is_url(name: &str) -> bool {
    URL_PATTERN.is_match(name)
}

/// URL 내용을 바이트로 가져오기 (재시도 없음)
///
/// ftp URL은 URL로 분류되지만 HTTP 클라이언트가 지원하지 않으므로 [`FilterError::Fetch`]로 끝납니다.
pub fn fetch_bytes(url: &str) -> Result<Vec<u8>> {
    let fetch_error = |e: reqwest::Error| FilterError::Fetch {
        url: url.to_string(),
        reason: e.to_string(),
    };

    log::debug!("URL 가져오기: {}", url);
    let response = reqwest::blocking::get(url)
        .and_then(|r| r.error_for_status())
        .map_err(fetch_error)?;
    let body = response.bytes().map_err(fetch_error)?;
    Ok(body.to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_url_pattern() {
        assert!(is_url("http://example.com"));
        assert!(is_url("https://example.com/x?y=1"));
        assert!(is_url("ftp://host/file"));
        assert!(!is_url("file:///etc/passwd"));
        assert!(!is_url("data/http://x"));
        assert!(!is_url("HTTPS://example.com"));
    }

    #[test]
    fn test_resolve_kinds() {
        assert_eq!(SourceKind::resolve("-"), SourceKind::Stdin);
        assert_eq!(
            SourceKind::resolve("a/b.txt"),
            SourceKind::File(PathBuf::from("a/b.txt"))
        );
        assert_eq!(
            SourceKind::resolve("http://h/x"),
            SourceKind::Url("http://h/x".to_string())
        );
    }

    #[test]
    fn test_empty_list_means_stdin() {
        let names: Vec<String> = Vec::new();
        assert_eq!(SourceKind::resolve_all(&names), vec![SourceKind::Stdin]);
    }

    #[test]
    fn test_display_name() {
        assert_eq!(SourceKind::Stdin.display_name(), "<stdin>");
        assert_eq!(
            SourceKind::File(Path::new("x.txt").to_path_buf()).display_name(),
            "x.txt"
        );
    }

    #[test]
    fn test_open_missing_file() {
        let result = SourceKind::resolve("/nonexistent/clfilter/input.txt").open();
        assert!(matches!(result, Err(FilterError::SourceOpen { .. })));
    }
}
