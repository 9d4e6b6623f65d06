//! clfilter - COMMAND-LINE FILTER TOOLKIT
//!
//! 유닉스 필터를 쉽게 만들기 위한 입력 추상화 라이브러리입니다.
//! 여러 파일(없으면 표준 입력, URL 가능)을 줄, 소스별 전체 텍스트, 문단, CSV/TSV 행 단위로 읽으며
//! 파일 경계를 넘어 줄 번호와 문단 번호를 추적합니다.
//!
//! # 주요 기능
//!
//! - 📄 **줄 단위 읽기**: 전체/파일별 줄 번호, 현재 파일 이름, 다음 파일로 건너뛰기
//! - 📚 **문단 단위 읽기**: 빈 줄로 구분된 문단과 전체/파일별 문단 번호
//! - 🧾 **CSV/TSV 행**: 따옴표 안의 구분자와 줄바꿈 지원
//! - 🌐 **URL 입력**: http/https URL은 네트워크에서 가져옴 (UTF-8 → ISO-8859-1 대체 디코딩)
//! - ✂️ **자동 정리**: 줄 끝 공백과 CRLF 정리 (기본값: 켜짐)
//! - ✏️ **제자리 수정**: 출력을 원본 파일로 원자적으로 교체
//!
//! # 예제
//!
//! ```no_run
//! use clfilter::{Filter, FilterConfig};
//!
//! let filter = Filter::new(FilterConfig::new(), &std::env::args().skip(1).collect::<Vec<_>>())?;
//! let mut lines = filter.lines();
//! while let Some(line) = lines.next() {
//!     println!("{}:{}: {}", lines.filename().unwrap_or_default(), lines.file_lineno(), line?);
//! }
//! # Ok::<(), clfilter::FilterError>(())
//! ```

pub mod cli;
pub mod config;
pub mod cursor;
pub mod decode;
pub mod diag;
pub mod error;
pub mod filter;
pub mod inplace;
pub mod lines;
pub mod normalize;
pub mod paragraph;
pub mod pattern;
pub mod process;
pub mod row;
pub mod slurp;
pub mod source;
pub mod stats;

// Re-exports for convenient access
pub use config::FilterConfig;
pub use cursor::Cursor;
pub use decode::Fetched;
pub use error::{FilterError, Result};
pub use filter::Filter;
pub use lines::LineSource;
pub use paragraph::{ParagraphState, Paragraphs, Segmenter};
pub use row::{Row, RowParser, Rows};
pub use slurp::Slurp;
pub use source::SourceKind;
