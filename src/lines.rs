//! 여러 소스를 잇는 줄 단위 입력 모듈
//!
//! 소스 목록을 순서대로 열어 한 줄씩 읽으며, 전체/소스별 줄 번호와 현재 소스 이름을 추적합니다.

use std::collections::VecDeque;
use std::io::{self, BufRead, Write};

use crate::config::FilterConfig;
use crate::cursor::Cursor;
use crate::decode::decode_line;
use crate::error::{FilterError, Result};
use crate::inplace::InPlaceRewrite;
use crate::normalize::rstrip_line;
use crate::source::{SourceKind, STDIN_NAME};

/// 열려 있는 소스
///
/// 교체 전에 원본 핸들이 먼저 닫히도록 `reader`가 `rewrite`보다 앞에 있어야 합니다.
struct OpenSource {
    reader: Box<dyn BufRead>,
    rewrite: Option<InPlaceRewrite>,
}

/// 여러 소스에 걸친 줄 반복자
///
/// 반복자는 `autostrip`이 켜져 있으면 끝 공백과 줄바꿈을 제거한 줄을, 꺼져 있으면 원본 줄을 돌려줍니다.
/// 카운터를 함께 보려면 `while let Some(line) = lines.next()` 형태로 사용합니다.
pub struct LineSource {
    pending: VecDeque<SourceKind>,
    current: Option<OpenSource>,
    name: Option<String>,
    cursor: Cursor,
    config: FilterConfig,
    stdout: io::Stdout,
}

impl LineSource {
    /// 새 줄 반복자 생성 (빈 목록이면 표준 입력)
    pub fn new(sources: Vec<SourceKind>, config: FilterConfig) -> Self {
        let pending = if sources.is_empty() {
            VecDeque::from([SourceKind::Stdin])
        } else {
            VecDeque::from(sources)
        };

        Self {
            pending,
            current: None,
            name: None,
            cursor: Cursor::default(),
            config,
            stdout: io::stdout(),
        }
    }

    /// 현재 소스 이름 (아직 아무 소스도 열지 않았으면 None)
    pub fn filename(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// 전체 줄 번호
    pub fn lineno(&self) -> usize {
        self.cursor.lineno()
    }

    /// 현재 소스 안의 줄 번호
    pub fn file_lineno(&self) -> usize {
        self.cursor.file_lineno()
    }

    /// 방금 읽은 줄이 현재 소스의 첫 줄인지 확인
    pub fn is_first_line(&self) -> bool {
        self.cursor.file_lineno() == 1
    }

    /// 현재 카운터 상태
    pub fn cursor(&self) -> &Cursor {
        &self.cursor
    }

    /// 세션 설정
    pub fn config(&self) -> &FilterConfig {
        &self.config
    }

    /// 출력 대상
    ///
    /// 제자리 수정 중인 파일 소스가 열려 있으면 그 임시 파일, 아니면 표준 출력입니다.
    pub fn output(&mut self) -> &mut dyn Write {
        let Self {
            current, stdout, ..
        } = self;
        match current.as_mut().and_then(|src| src.rewrite.as_mut()) {
            Some(rewrite) => rewrite as &mut dyn Write,
            None => stdout,
        }
    }

    /// 현재 소스의 남은 줄을 버리고 다음 소스로 이동
    pub fn next_file(&mut self) -> Result<()> {
        self.close_current()
    }

    /// 열린 핸들을 닫고 남은 소스를 모두 버림
    pub fn close(&mut self) -> Result<()> {
        self.pending.clear();
        self.close_current()
    }

    pub(crate) fn cursor_mut(&mut self) -> &mut Cursor {
        &mut self.cursor
    }

    pub(crate) fn is_open(&self) -> bool {
        self.current.is_some()
    }

    pub(crate) fn next_pending(&self) -> Option<&SourceKind> {
        self.pending.front()
    }

    /// 다음 소스를 열지 않고 꺼냄 (줄 카운터가 적용되지 않는 URL 통째 읽기용)
    pub(crate) fn detach_next(&mut self) -> Option<SourceKind> {
        let kind = self.pending.pop_front()?;
        self.name = Some(kind.display_name());
        self.cursor.start_source();
        Some(kind)
    }

    /// 현재 소스를 닫고 다음 소스를 엶. 남은 소스가 없으면 false
    pub(crate) fn open_next(&mut self) -> Result<bool> {
        self.close_current()?;

        let Some(kind) = self.pending.pop_front() else {
            return Ok(false);
        };
        self.name = Some(kind.display_name());
        self.cursor.start_source();

        if let (true, SourceKind::Url(url)) = (self.config.in_place, &kind) {
            return Err(FilterError::InPlaceUrl { url: url.clone() });
        }

        log::debug!("소스 열기: {}", kind);
        let reader = kind.open()?;
        let rewrite = match (&kind, self.config.in_place) {
            (SourceKind::File(path), true) => Some(InPlaceRewrite::begin(path)?),
            _ => None,
        };

        self.current = Some(OpenSource { reader, rewrite });
        Ok(true)
    }

    /// 현재 소스에서 원본 줄 하나 읽기. 소스 끝이거나 열린 소스가 없으면 None
    pub(crate) fn read_raw(&mut self) -> Result<Option<String>> {
        let Some(src) = self.current.as_mut() else {
            return Ok(None);
        };

        let name = self.name.as_deref().unwrap_or(STDIN_NAME);
        let mut buf = Vec::new();
        let read = src
            .reader
            .read_until(b'\n', &mut buf)
            .map_err(|e| FilterError::Read {
                name: name.to_string(),
                reason: e.to_string(),
            })?;
        if read == 0 {
            return Ok(None);
        }

        self.cursor.bump_line();
        decode_line(buf, self.config.encoding, name, self.cursor.lineno()).map(Some)
    }

    pub(crate) fn close_current(&mut self) -> Result<()> {
        let Some(OpenSource { reader, rewrite }) = self.current.take() else {
            return Ok(());
        };
        drop(reader);

        log::debug!("소스 닫기: {}", self.name.as_deref().unwrap_or(STDIN_NAME));
        match rewrite {
            Some(mut rewrite) => rewrite.commit(),
            None => Ok(()),
        }
    }

    /// 읽기 에러 후 현재 소스 포기. 교체 실패는 원래 에러를 가리지 않도록 경고로만 남김
    pub(crate) fn abandon_current(&mut self) {
        if let Err(e) = self.close_current() {
            log::warn!("{}", e);
        }
    }

    fn present(&self, line: String) -> String {
        if self.config.autostrip {
            rstrip_line(&line).to_string()
        } else {
            line
        }
    }
}

impl Iterator for LineSource {
    type Item = Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if !self.is_open() {
                match self.open_next() {
                    Ok(true) => {}
                    Ok(false) => return None,
                    Err(e) => return Some(Err(e)),
                }
            }

            match self.read_raw() {
                Ok(Some(line)) => return Some(Ok(self.present(line))),
                Ok(None) => {
                    if let Err(e) = self.close_current() {
                        return Some(Err(e));
                    }
                }
                Err(e) => {
                    self.abandon_current();
                    return Some(Err(e));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    fn create_file(dir: &Path, name: &str, content: &str) -> SourceKind {
        let path = dir.join(name);
        fs::write(&path, content).unwrap();
        SourceKind::File(path)
    }

    #[test]
    fn test_counters_across_sources() {
        let temp_dir = TempDir::new().unwrap();
        let a = create_file(temp_dir.path(), "a.txt", "1\n2\n3\n");
        let b = create_file(temp_dir.path(), "b.txt", "4\n5\n");

        let mut lines = LineSource::new(vec![a, b], FilterConfig::new());
        let mut seen = Vec::new();
        while let Some(line) = lines.next() {
            seen.push((
                line.unwrap(),
                lines.lineno(),
                lines.file_lineno(),
                lines.is_first_line(),
            ));
        }

        assert_eq!(
            seen,
            vec![
                ("1".to_string(), 1, 1, true),
                ("2".to_string(), 2, 2, false),
                ("3".to_string(), 3, 3, false),
                ("4".to_string(), 4, 1, true),
                ("5".to_string(), 5, 2, false),
            ]
        );
        assert_eq!(lines.lineno(), 5);
    }

    #[test]
    fn test_filename_tracks_source() {
        let temp_dir = TempDir::new().unwrap();
        let a = create_file(temp_dir.path(), "a.txt", "x\n");
        let b = create_file(temp_dir.path(), "b.txt", "y\n");
        let a_name = a.display_name();
        let b_name = b.display_name();

        let mut lines = LineSource::new(vec![a, b], FilterConfig::new());
        assert_eq!(lines.filename(), None);

        lines.next().unwrap().unwrap();
        assert_eq!(lines.filename(), Some(a_name.as_str()));
        lines.next().unwrap().unwrap();
        assert_eq!(lines.filename(), Some(b_name.as_str()));
    }

    #[test]
    fn test_raw_lines_without_autostrip() {
        let temp_dir = TempDir::new().unwrap();
        let a = create_file(temp_dir.path(), "a.txt", "x  \r\ny");

        let lines = LineSource::new(vec![a], FilterConfig::new().with_autostrip(false));
        let all: Vec<String> = lines.map(|l| l.unwrap()).collect();
        assert_eq!(all, vec!["x  \r\n".to_string(), "y".to_string()]);
    }

    #[test]
    fn test_next_file_skips_rest() {
        let temp_dir = TempDir::new().unwrap();
        let a = create_file(temp_dir.path(), "a.txt", "a1\na2\na3\n");
        let b = create_file(temp_dir.path(), "b.txt", "b1\n");

        let mut lines = LineSource::new(vec![a, b], FilterConfig::new());
        assert_eq!(lines.next().unwrap().unwrap(), "a1");
        lines.next_file().unwrap();
        assert_eq!(lines.next().unwrap().unwrap(), "b1");
        assert_eq!(lines.lineno(), 2);
        assert_eq!(lines.file_lineno(), 1);
        assert!(lines.next().is_none());
    }

    #[test]
    fn test_missing_file_is_reported_then_skipped() {
        let temp_dir = TempDir::new().unwrap();
        let missing = SourceKind::File(temp_dir.path().join("missing.txt"));
        let b = create_file(temp_dir.path(), "b.txt", "b1\n");

        let mut lines = LineSource::new(vec![missing, b], FilterConfig::new());
        assert!(matches!(
            lines.next(),
            Some(Err(FilterError::SourceOpen { .. }))
        ));
        assert_eq!(lines.next().unwrap().unwrap(), "b1");
    }

    #[test]
    fn test_in_place_rejects_url() {
        let config = FilterConfig::new().with_in_place(true);
        let mut lines = LineSource::new(
            vec![SourceKind::Url("http://127.0.0.1:9/x".to_string())],
            config,
        );
        assert!(matches!(
            lines.next(),
            Some(Err(FilterError::InPlaceUrl { .. }))
        ));
        assert!(lines.next().is_none());
    }

    #[test]
    fn test_close_drops_pending() {
        let temp_dir = TempDir::new().unwrap();
        let a = create_file(temp_dir.path(), "a.txt", "a1\na2\n");
        let b = create_file(temp_dir.path(), "b.txt", "b1\n");

        let mut lines = LineSource::new(vec![a, b], FilterConfig::new());
        lines.next().unwrap().unwrap();
        lines.close().unwrap();
        assert!(lines.next().is_none());
    }
}
