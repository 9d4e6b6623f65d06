//! 필터 세션 모듈
//!
//! 설정과 입력 소스 목록을 묶어 줄, 텍스트, 문단, 행 반복자를 만듭니다.

use crate::config::FilterConfig;
use crate::decode::Fetched;
use crate::error::Result;
use crate::lines::LineSource;
use crate::paragraph::Paragraphs;
use crate::pattern::expand_sources;
use crate::row::Rows;
use crate::slurp::{fetch_url, Slurp};
use crate::source::SourceKind;

/// 명령줄 필터 세션
///
/// ```no_run
/// use clfilter::{Filter, FilterConfig};
///
/// let filter = Filter::new(FilterConfig::new(), &["notes.txt"]).unwrap();
/// let mut paragraphs = filter.paragraphs();
/// while let Some(par) = paragraphs.next() {
///     print!("[{}] {}", paragraphs.parno(), par.unwrap());
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Filter {
    config: FilterConfig,
    sources: Vec<SourceKind>,
}

impl Filter {
    /// 새 세션 생성
    ///
    /// 글로브 패턴은 펼치고, 빈 목록은 표준 입력 하나로 해석합니다.
    ///
    /// # Arguments
    /// * `config` - 구분자, 자동 정리, 제자리 수정, 인코딩 설정
    /// * `names` - 소스 이름 목록 (`-`는 표준 입력, http/https/ftp는 URL)
    ///
    /// # Returns
    /// 새 세션 또는 잘못된 글로브 패턴 에러
    pub fn new<S: AsRef<str>>(config: FilterConfig, names: &[S]) -> Result<Self> {
        let expanded = expand_sources(names)?;
        Ok(Self {
            config,
            sources: SourceKind::resolve_all(&expanded),
        })
    }

    /// 세션 설정
    pub fn config(&self) -> &FilterConfig {
        &self.config
    }

    /// 해석된 입력 소스 목록
    pub fn sources(&self) -> &[SourceKind] {
        &self.sources
    }

    /// 한 줄씩 읽기 (autostrip이면 끝 공백 제거)
    pub fn lines(&self) -> LineSource {
        LineSource::new(self.sources.clone(), self.config)
    }

    /// 소스마다 전체 텍스트 읽기
    pub fn slurp(&self) -> Slurp {
        Slurp::new(self.lines())
    }

    /// [`Filter::slurp`]의 별칭
    pub fn text(&self) -> Slurp {
        self.slurp()
    }

    /// 문단 단위 읽기
    pub fn paragraphs(&self) -> Paragraphs {
        Paragraphs::new(self.lines())
    }

    /// 설정된 구분자로 CSV 행 읽기
    pub fn csv_rows(&self) -> Rows {
        Rows::new(self.lines(), self.config.delimiter)
    }

    /// 탭 구분 행 읽기
    pub fn tsv_rows(&self) -> Rows {
        Rows::new(self.lines(), '\t')
    }

    /// URL 하나를 가져와 관대한 디코딩
    pub fn fetch_url(&self, url: &str) -> Result<Fetched> {
        fetch_url(url, self.config.fallback_encoding)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_names_mean_stdin() {
        let names: [&str; 0] = [];
        let filter = Filter::new(FilterConfig::new(), &names).unwrap();
        assert_eq!(filter.sources(), &[SourceKind::Stdin]);
    }

    #[test]
    fn test_sources_resolved_in_order() {
        let filter = Filter::new(FilterConfig::new(), &["-", "https://example.com/a", "b.txt"])
            .unwrap();
        assert_eq!(filter.sources().len(), 3);
        assert_eq!(filter.sources()[0], SourceKind::Stdin);
        assert!(filter.sources()[1].is_url());
        assert_eq!(filter.sources()[2].display_name(), "b.txt");
    }
}
