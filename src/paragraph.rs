//! 문단 분할 모듈
//!
//! 빈 줄(공백만 있는 줄)로 구분된 연속된 줄들을 하나의 문단으로 묶습니다.
//! 상태 기계([`Segmenter`])는 줄 반복자와 분리되어 있어 단독으로 구동할 수 있습니다.

use std::io::Write;
use std::mem;

use crate::cursor::Cursor;
use crate::error::Result;
use crate::lines::LineSource;
use crate::normalize::{clean_paragraph, has_content};

/// 문단 분할 상태
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParagraphState {
    /// 소스 시작, 아직 내용 없음
    #[default]
    BeforeParagraph,
    /// 문단 내용을 읽는 중
    InsideParagraph,
    /// 내용 뒤의 빈 줄들을 읽는 중
    InsideDelimiter,
}

/// 한 줄씩 밀어 넣는 문단 분할기
#[derive(Debug, Default)]
pub struct Segmenter {
    state: ParagraphState,
    buffer: String,
    autostrip: bool,
}

impl Segmenter {
    /// 새 분할기 생성
    pub fn new(autostrip: bool) -> Self {
        Self {
            autostrip,
            ..Default::default()
        }
    }

    /// 현재 상태
    pub fn state(&self) -> ParagraphState {
        self.state
    }

    /// 줄 하나 처리. 빈 줄 구간 뒤에 내용이 다시 나오면 앞 문단을 돌려줌
    ///
    /// 첫 내용 이전의 빈 줄은 어떤 문단에도 속하지 않고 버려집니다.
    pub fn push(&mut self, line: &str) -> Option<String> {
        let content = has_content(line);

        match (content, self.state) {
            (true, ParagraphState::InsideDelimiter) => {
                let done = mem::replace(&mut self.buffer, line.to_string());
                self.state = ParagraphState::InsideParagraph;
                Some(self.render(done))
            }
            (true, _) => {
                self.buffer.push_str(line);
                self.state = ParagraphState::InsideParagraph;
                None
            }
            (false, ParagraphState::BeforeParagraph) => None,
            (false, _) => {
                self.buffer.push_str(line);
                self.state = ParagraphState::InsideDelimiter;
                None
            }
        }
    }

    /// 소스 끝 처리. 남은 내용이 있으면 마지막 문단으로 돌려주고 상태를 초기화
    pub fn finish(&mut self) -> Option<String> {
        let rest = self.reset();
        if has_content(&rest) {
            Some(self.render(rest))
        } else {
            None
        }
    }

    /// 누적 내용을 버리고 처음 상태로 되돌림
    pub fn reset(&mut self) -> String {
        self.state = ParagraphState::BeforeParagraph;
        mem::take(&mut self.buffer)
    }

    fn render(&self, text: String) -> String {
        if self.autostrip {
            clean_paragraph(&text)
        } else {
            text
        }
    }
}

/// 여러 소스에 걸친 문단 반복자
///
/// 소스마다 따로 분할하며, 소스 경계를 넘어 문단이 이어지지 않습니다.
pub struct Paragraphs {
    lines: LineSource,
    segmenter: Segmenter,
    active: bool,
}

impl Paragraphs {
    /// 줄 반복자 위에 문단 반복자 생성
    pub fn new(lines: LineSource) -> Self {
        let segmenter = Segmenter::new(lines.config().autostrip);
        Self {
            lines,
            segmenter,
            active: false,
        }
    }

    /// 전체 문단 번호
    pub fn parno(&self) -> usize {
        self.lines.cursor().parno()
    }

    /// 현재 소스 안의 문단 번호
    pub fn file_parno(&self) -> usize {
        self.lines.cursor().file_parno()
    }

    /// 방금 돌려준 문단이 현재 소스의 첫 문단인지 확인
    pub fn is_first_paragraph(&self) -> bool {
        self.file_parno() == 1
    }

    /// 전체 줄 번호 (문단을 돌려준 시점까지 읽은 줄 수)
    pub fn lineno(&self) -> usize {
        self.lines.lineno()
    }

    /// 현재 소스 이름
    pub fn filename(&self) -> Option<&str> {
        self.lines.filename()
    }

    /// 현재 카운터 상태
    pub fn cursor(&self) -> &Cursor {
        self.lines.cursor()
    }

    /// 출력 대상 ([`LineSource::output`] 참고)
    pub fn output(&mut self) -> &mut dyn Write {
        self.lines.output()
    }

    /// 현재 소스의 남은 내용(누적 중인 문단 포함)을 버리고 다음 소스로 이동
    pub fn next_file(&mut self) -> Result<()> {
        self.segmenter.reset();
        self.active = false;
        self.lines.next_file()
    }

    /// 열린 핸들을 닫고 남은 소스를 모두 버림
    pub fn close(&mut self) -> Result<()> {
        self.segmenter.reset();
        self.active = false;
        self.lines.close()
    }

    fn emit(&mut self, paragraph: String) -> Option<Result<String>> {
        self.lines.cursor_mut().bump_paragraph();
        Some(Ok(paragraph))
    }
}

impl Iterator for Paragraphs {
    type Item = Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if !self.active {
                match self.lines.open_next() {
                    Ok(true) => self.active = true,
                    Ok(false) => return None,
                    Err(e) => return Some(Err(e)),
                }
            }

            match self.lines.read_raw() {
                Ok(Some(line)) => {
                    if let Some(paragraph) = self.segmenter.push(&line) {
                        return self.emit(paragraph);
                    }
                }
                Ok(None) => {
                    self.active = false;
                    if let Some(paragraph) = self.segmenter.finish() {
                        return self.emit(paragraph);
                    }
                }
                Err(e) => {
                    self.active = false;
                    self.segmenter.reset();
                    self.lines.abandon_current();
                    return Some(Err(e));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segment(text: &str, autostrip: bool) -> Vec<String> {
        let mut segmenter = Segmenter::new(autostrip);
        let mut out: Vec<String> = text
            .split_inclusive('\n')
            .filter_map(|line| segmenter.push(line))
            .collect();
        out.extend(segmenter.finish());
        out
    }

    #[test]
    fn test_state_transitions() {
        let mut segmenter = Segmenter::new(true);
        assert_eq!(segmenter.state(), ParagraphState::BeforeParagraph);

        assert!(segmenter.push("\n").is_none());
        assert_eq!(segmenter.state(), ParagraphState::BeforeParagraph);

        assert!(segmenter.push("a\n").is_none());
        assert_eq!(segmenter.state(), ParagraphState::InsideParagraph);

        assert!(segmenter.push("  \n").is_none());
        assert_eq!(segmenter.state(), ParagraphState::InsideDelimiter);

        assert!(segmenter.push("\n").is_none());
        assert_eq!(segmenter.state(), ParagraphState::InsideDelimiter);

        assert_eq!(segmenter.push("b\n"), Some("a\n".to_string()));
        assert_eq!(segmenter.state(), ParagraphState::InsideParagraph);

        assert_eq!(segmenter.finish(), Some("b\n".to_string()));
        assert_eq!(segmenter.state(), ParagraphState::BeforeParagraph);
    }

    #[test]
    fn test_basic_split() {
        assert_eq!(segment("x\ny\n\nz\n", true), vec!["x\ny\n", "z\n"]);
    }

    #[test]
    fn test_multiple_blank_lines_and_trailing_spaces() {
        assert_eq!(
            segment("a  \r\nb\n\n \n\t\nc\n\n\n", true),
            vec!["a\nb\n", "c\n"]
        );
    }

    #[test]
    fn test_leading_blank_lines_ignored() {
        assert_eq!(segment("\n\n  \nfirst\n\nsecond\n", true), vec!["first\n", "second\n"]);
    }

    #[test]
    fn test_only_blank_lines() {
        assert!(segment("\n \n\t\n\n", true).is_empty());
        assert!(segment("", true).is_empty());
    }

    #[test]
    fn test_no_trailing_newline() {
        assert_eq!(segment("a\n\nb", true), vec!["a\n", "b"]);
    }

    #[test]
    fn test_raw_paragraphs_keep_delimiters() {
        assert_eq!(segment("x\n\n\ny\n", false), vec!["x\n\n\n", "y\n"]);
    }

    #[test]
    fn test_reconstruct_input() {
        let input = "p1 l1\np1 l2\n\np2\n\np3 l1\np3 l2\n";
        let paragraphs = segment(input, true);
        assert_eq!(paragraphs.len(), 3);
        assert_eq!(paragraphs.join("\n"), input);
    }
}
