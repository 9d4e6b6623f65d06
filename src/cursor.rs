//! 위치 카운터 모듈

/// 스트리밍 세션의 줄/문단 카운터
///
/// 전체 카운터는 세션 동안 줄어들지 않고, 소스별 카운터는 새 소스를 열 때마다 0으로 돌아갑니다.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cursor {
    lineno: usize,
    file_lineno: usize,
    parno: usize,
    file_parno: usize,
}

impl Cursor {
    /// 전체 줄 번호 (1부터)
    pub fn lineno(&self) -> usize {
        self.lineno
    }

    /// 현재 소스 안의 줄 번호 (1부터)
    pub fn file_lineno(&self) -> usize {
        self.file_lineno
    }

    /// 전체 문단 번호 (1부터)
    pub fn parno(&self) -> usize {
        self.parno
    }

    /// 현재 소스 안의 문단 번호 (1부터)
    pub fn file_parno(&self) -> usize {
        self.file_parno
    }

    pub(crate) fn start_source(&mut self) {
        self.file_lineno = 0;
        self.file_parno = 0;
    }

    pub(crate) fn bump_line(&mut self) {
        self.lineno += 1;
        self.file_lineno += 1;
    }

    pub(crate) fn bump_paragraph(&mut self) {
        self.parno += 1;
        self.file_parno += 1;
    }
}
