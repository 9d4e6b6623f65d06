//! CLI 인자 파싱 모듈
//!
//! clap을 사용한 명령줄 인자 정의 및 필터 설정 변환을 담당합니다.

use clap::{Parser, ValueEnum};

use crate::config::{parse_delimiter, FilterConfig};
use crate::error::Result;

/// 입력 읽기 단위
#[derive(Debug, Clone, Copy, ValueEnum, Default, PartialEq)]
pub enum ReadMode {
    /// 한 줄씩
    #[default]
    Lines,
    /// 소스마다 전체 텍스트
    Text,
    /// 빈 줄로 구분된 문단
    Paragraph,
    /// CSV 행 (JSON 배열로 출력)
    Csv,
    /// TSV 행 (JSON 배열로 출력)
    Tsv,
}

impl ReadMode {
    /// 통계에 쓰는 항목 이름
    pub fn item_label(&self) -> &'static str {
        match self {
            ReadMode::Lines => "줄",
            ReadMode::Text => "텍스트",
            ReadMode::Paragraph => "문단",
            ReadMode::Csv | ReadMode::Tsv => "행",
        }
    }
}

impl std::fmt::Display for ReadMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReadMode::Lines => write!(f, "Lines"),
            ReadMode::Text => write!(f, "Text"),
            ReadMode::Paragraph => write!(f, "Paragraph"),
            ReadMode::Csv => write!(f, "Csv"),
            ReadMode::Tsv => write!(f, "Tsv"),
        }
    }
}

/// clfilter CLI 인자 구조체
#[derive(Parser, Debug)]
#[command(
    name = "clfilter",
    author = "YourName <your@email.com>",
    version,
    about = "COMMAND-LINE FILTER - 파일/표준입력/URL을 줄, 문단, 텍스트, CSV/TSV 행 단위로 읽는 필터",
    long_about = r#"
COMMAND-LINE FILTER
===================

입력 파일들(없으면 표준 입력, http/https/ftp URL 가능)을 차례로 읽어
선택한 단위로 출력합니다.

특징:
  • 여러 파일에 걸친 전체/파일별 줄 번호, 문단 번호
  • 줄 끝 공백과 CRLF 자동 정리 (--no-strip으로 끄기)
  • 빈 줄로 구분된 문단 단위 처리
  • 따옴표를 지원하는 CSV/TSV 행 파싱 (JSON 배열로 출력)
  • 제자리 수정 (-i): 출력이 원본 파일을 대체

예제:
  clfilter -n notes.txt
  clfilter -m paragraph -n -H chapter*.txt
  clfilter -m csv -d ';' data.csv
  clfilter -m text https://example.com/readme.txt
  clfilter -i -n draft.txt
"#
)]
pub struct Args {
    /// 입력 파일 (없거나 "-"이면 표준 입력, glob 패턴/URL 가능)
    pub files: Vec<String>,

    /// 읽기 단위
    #[arg(short, long, value_enum, default_value_t = ReadMode::Lines)]
    pub mode: ReadMode,

    /// CSV 구분자 (한 글자, "\t" 또는 "tab"은 탭)
    #[arg(short, long, default_value = ",")]
    pub delimiter: String,

    /// 줄 끝 공백 자동 정리 끄기
    #[arg(long)]
    pub no_strip: bool,

    /// 제자리 수정: 출력으로 원본 파일을 대체
    #[arg(short, long)]
    pub in_place: bool,

    /// 입력 인코딩
    #[arg(short, long, default_value = "utf-8")]
    pub encoding: String,

    /// URL 내용이 UTF-8이 아닐 때 시도할 인코딩 (기본값: ISO-8859-1)
    #[arg(long)]
    pub fallback_encoding: Option<String>,

    /// 줄/문단/행 번호 붙이기
    #[arg(short, long)]
    pub number: bool,

    /// 파일 이름 붙이기
    #[arg(short = 'H', long)]
    pub with_filename: bool,

    /// 처리 통계를 표준 에러로 출력
    #[arg(long)]
    pub stats: bool,

    /// 상세 로그 (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    /// 인자로부터 필터 설정 생성
    pub fn to_config(&self) -> Result<FilterConfig> {
        let mut config = FilterConfig::new()
            .with_delimiter(parse_delimiter(&self.delimiter)?)?
            .with_autostrip(!self.no_strip)
            .with_in_place(self.in_place)
            .with_encoding(&self.encoding)?;

        if let Some(ref label) = self.fallback_encoding {
            config = config.with_fallback_encoding(label)?;
        }

        Ok(config)
    }

    /// 로그 레벨 필터 이름
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}
