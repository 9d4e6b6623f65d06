//! 구분자 행(CSV/TSV) 모듈
//!
//! 줄 반복자에서 읽은 원본 줄을 구분자와 따옴표 규칙에 따라 필드 목록으로 나눕니다.
//! 따옴표 안의 줄바꿈은 다음 줄을 이어 읽어 한 행으로 처리합니다.

use std::io::Write;

use crate::error::{FilterError, Result};
use crate::lines::LineSource;
use crate::source::STDIN_NAME;

/// 한 행의 필드 목록
pub type Row = Vec<String>;

/// 행 파싱 결과
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseOutcome {
    /// 완성된 행
    Complete(Row),
    /// 따옴표가 열린 채 끝남 (다음 줄이 필요)
    Incomplete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FieldState {
    Start,
    Unquoted,
    Quoted,
    QuoteInQuoted,
}

/// 구분자 행 파서
///
/// 필드 앞 공백은 건너뛰고, `"..."` 안의 구분자/줄바꿈은 필드 내용으로 취급하며, `""`는 따옴표 하나가 됩니다.
#[derive(Debug, Clone, Copy)]
pub struct RowParser {
    delimiter: char,
}

impl RowParser {
    /// 새 파서 생성
    pub fn new(delimiter: char) -> Self {
        Self { delimiter }
    }

    /// 구분자
    pub fn delimiter(&self) -> char {
        self.delimiter
    }

    /// 한 레코드(줄바꿈 포함 가능) 파싱
    ///
    /// # Examples
    /// ```
    /// use clfilter::row::{ParseOutcome, RowParser};
    ///
    /// let parser = RowParser::new(',');
    /// let outcome = parser.parse("a, \"b,c\", d\n").unwrap();
    /// assert_eq!(
    ///     outcome,
    ///     ParseOutcome::Complete(vec!["a".into(), "b,c".into(), "d".into()])
    /// );
    /// ```
    pub fn parse(&self, record: &str) -> std::result::Result<ParseOutcome, String> {
        if record.trim_end_matches(['\r', '\n']).is_empty() {
            return Ok(ParseOutcome::Complete(Vec::new()));
        }

        let mut fields = Vec::new();
        let mut field = String::new();
        let mut state = FieldState::Start;
        let mut chars = record.chars();

        while let Some(c) = chars.next() {
            match state {
                FieldState::Start => {
                    if self.is_initial_space(c) {
                        continue;
                    } else if c == self.delimiter {
                        fields.push(std::mem::take(&mut field));
                    } else if c == '"' {
                        state = FieldState::Quoted;
                    } else if is_line_end(c) {
                        return self.end_record(chars.as_str(), fields, field);
                    } else {
                        field.push(c);
                        state = FieldState::Unquoted;
                    }
                }
                FieldState::Unquoted => {
                    if c == self.delimiter {
                        fields.push(std::mem::take(&mut field));
                        state = FieldState::Start;
                    } else if is_line_end(c) {
                        return self.end_record(chars.as_str(), fields, field);
                    } else {
                        field.push(c);
                    }
                }
                FieldState::Quoted => {
                    if c == '"' {
                        state = FieldState::QuoteInQuoted;
                    } else {
                        field.push(c);
                    }
                }
                FieldState::QuoteInQuoted => {
                    if c == '"' {
                        field.push('"');
                        state = FieldState::Quoted;
                    } else if c == self.delimiter {
                        fields.push(std::mem::take(&mut field));
                        state = FieldState::Start;
                    } else if is_line_end(c) {
                        return self.end_record(chars.as_str(), fields, field);
                    } else {
                        return Err(format!(
                            "닫는 따옴표 뒤에 예상치 못한 문자 {:?} ({}번째 필드)",
                            c,
                            fields.len() + 1
                        ));
                    }
                }
            }
        }

        if state == FieldState::Quoted {
            return Ok(ParseOutcome::Incomplete);
        }
        fields.push(field);
        Ok(ParseOutcome::Complete(fields))
    }

    fn is_initial_space(&self, c: char) -> bool {
        c == ' ' || (c == '\t' && self.delimiter != '\t')
    }

    fn end_record(
        &self,
        rest: &str,
        mut fields: Row,
        field: String,
    ) -> std::result::Result<ParseOutcome, String> {
        if !rest.chars().all(is_line_end) {
            return Err("따옴표 밖 필드에 줄바꿈 문자가 있습니다".to_string());
        }
        fields.push(field);
        Ok(ParseOutcome::Complete(fields))
    }
}

fn is_line_end(c: char) -> bool {
    c == '\n' || c == '\r'
}

/// 여러 소스에 걸친 행 반복자
///
/// 행은 정리(autostrip)되지 않은 원본 줄에서 파싱합니다.
/// 파싱 에러는 해당 행에만 해당하며, 다음 호출은 다음 줄부터 이어집니다.
pub struct Rows {
    lines: LineSource,
    parser: RowParser,
}

impl Rows {
    /// 줄 반복자 위에 행 반복자 생성
    pub fn new(lines: LineSource, delimiter: char) -> Self {
        Self {
            lines,
            parser: RowParser::new(delimiter),
        }
    }

    /// 전체 줄 번호
    pub fn lineno(&self) -> usize {
        self.lines.lineno()
    }

    /// 현재 소스 안의 줄 번호
    pub fn file_lineno(&self) -> usize {
        self.lines.file_lineno()
    }

    /// 현재 소스 이름
    pub fn filename(&self) -> Option<&str> {
        self.lines.filename()
    }

    /// 출력 대상 ([`LineSource::output`] 참고)
    pub fn output(&mut self) -> &mut dyn Write {
        self.lines.output()
    }

    /// 현재 소스의 남은 줄을 버리고 다음 소스로 이동
    pub fn next_file(&mut self) -> Result<()> {
        self.lines.next_file()
    }

    /// 열린 핸들을 닫고 남은 소스를 모두 버림
    pub fn close(&mut self) -> Result<()> {
        self.lines.close()
    }

    fn row_error(&self, line: usize, reason: String) -> FilterError {
        FilterError::RowParse {
            name: self.filename().unwrap_or(STDIN_NAME).to_string(),
            line,
            reason,
        }
    }

    /// 현재 소스에서 한 행 읽기. 소스 끝이면 None
    fn read_row(&mut self) -> Result<Option<Row>> {
        let Some(mut record) = self.lines.read_raw()? else {
            return Ok(None);
        };
        let start_line = self.lines.file_lineno();

        loop {
            match self.parser.parse(&record) {
                Ok(ParseOutcome::Complete(row)) => return Ok(Some(row)),
                Ok(ParseOutcome::Incomplete) => match self.lines.read_raw()? {
                    Some(more) => record.push_str(&more),
                    None => {
                        return Err(self.row_error(
                            start_line,
                            "따옴표가 닫히지 않은 채 입력이 끝났습니다".to_string(),
                        ))
                    }
                },
                Err(reason) => return Err(self.row_error(start_line, reason)),
            }
        }
    }
}

impl Iterator for Rows {
    type Item = Result<Row>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if !self.lines.is_open() {
                match self.lines.open_next() {
                    Ok(true) => {}
                    Ok(false) => return None,
                    Err(e) => return Some(Err(e)),
                }
            }

            match self.read_row() {
                Ok(Some(row)) => return Some(Ok(row)),
                Ok(None) => {
                    if let Err(e) = self.lines.close_current() {
                        return Some(Err(e));
                    }
                }
                Err(e @ FilterError::RowParse { .. }) => return Some(Err(e)),
                Err(e) => {
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

    fn complete(parser: &RowParser, record: &str) -> Row {
        match parser.parse(record).unwrap() {
            ParseOutcome::Complete(row) => row,
            ParseOutcome::Incomplete => panic!("incomplete: {:?}", record),
        }
    }

    #[test]
    fn test_quoted_delimiter_and_initial_space() {
        let parser = RowParser::new(',');
        assert_eq!(complete(&parser, "a, \"b,c\", d\n"), vec!["a", "b,c", "d"]);
    }

    #[test]
    fn test_empty_fields() {
        let parser = RowParser::new(',');
        assert_eq!(complete(&parser, "a,,b,\n"), vec!["a", "", "b", ""]);
        assert_eq!(complete(&parser, ",\r\n"), vec!["", ""]);
    }

    #[test]
    fn test_blank_line_is_empty_row() {
        let parser = RowParser::new(',');
        assert!(complete(&parser, "\n").is_empty());
        assert!(complete(&parser, "").is_empty());
    }

    #[test]
    fn test_doubled_quote() {
        let parser = RowParser::new(',');
        assert_eq!(
            complete(&parser, "\"say \"\"hi\"\"\",x\n"),
            vec!["say \"hi\"", "x"]
        );
    }

    #[test]
    fn test_trailing_space_kept_in_unquoted_field() {
        let parser = RowParser::new(',');
        assert_eq!(complete(&parser, " a  ,b\n"), vec!["a  ", "b"]);
    }

    #[test]
    fn test_quote_inside_unquoted_field_is_literal() {
        let parser = RowParser::new(',');
        assert_eq!(complete(&parser, "5\" disk,x\n"), vec!["5\" disk", "x"]);
    }

    #[test]
    fn test_open_quote_is_incomplete() {
        let parser = RowParser::new(',');
        assert_eq!(
            parser.parse("a,\"multi\n").unwrap(),
            ParseOutcome::Incomplete
        );
        assert_eq!(
            complete(&parser, "a,\"multi\nline\",b\n"),
            vec!["a", "multi\nline", "b"]
        );
    }

    #[test]
    fn test_garbage_after_closing_quote() {
        let parser = RowParser::new(',');
        assert!(parser.parse("\"ab\"c,d\n").is_err());
    }

    #[test]
    fn test_tab_delimiter_keeps_empty_tab_fields() {
        let parser = RowParser::new('\t');
        assert_eq!(complete(&parser, "a\t\tb\n"), vec!["a", "", "b"]);
        assert_eq!(complete(&parser, "a\t \"b\tc\"\n"), vec!["a", "b\tc"]);
    }

    #[test]
    fn test_space_delimiter_collapses_runs() {
        let parser = RowParser::new(' ');
        assert_eq!(complete(&parser, "a  b\n"), vec!["a", "b"]);
        assert_eq!(complete(&parser, "  x \"y z\"\n"), vec!["x", "y z"]);
    }
}
