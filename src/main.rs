//! clfilter - COMMAND-LINE FILTER
//!
//! 메인 엔트리포인트

use anyhow::{Context, Result};
use clap::Parser;
use std::io::Write;

use clfilter::{
    cli::{Args, ReadMode},
    diag::{die, warn},
    stats::Statistics,
    Filter, FilterError,
};

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args);

    // 설정 오류는 복구하지 않음
    let config = args.to_config().unwrap_or_else(|e| die(e));
    let filter = Filter::new(config, &args.files).unwrap_or_else(|e| die(e));

    log::info!("필터 시작: 모드 {}, 소스 {}개", args.mode, filter.sources().len());
    log::debug!("Arguments: {:?}", args);

    let mut stats = Statistics::new(filter.sources().len());

    match args.mode {
        ReadMode::Lines => run_lines(&args, &filter, &mut stats)?,
        ReadMode::Text => run_text(&args, &filter, &mut stats)?,
        ReadMode::Paragraph => run_paragraphs(&args, &filter, &mut stats)?,
        ReadMode::Csv | ReadMode::Tsv => run_rows(&args, &filter, &mut stats)?,
    }

    if args.stats {
        stats.print_summary(args.mode.item_label());
    }

    Ok(())
}

/// 로그 초기화 (RUST_LOG가 있으면 우선)
fn init_logging(args: &Args) {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(args.log_level()))
        .init();
}

/// 파일 이름/번호 접두어 생성
fn prefix(args: &Args, filename: Option<&str>, number: usize) -> String {
    let mut prefix = String::new();
    if args.with_filename {
        prefix.push_str(filename.unwrap_or_default());
        prefix.push(':');
    }
    if args.number {
        prefix.push_str(&format!("{}:", number));
    }
    prefix
}

/// 줄 모드 실행
fn run_lines(args: &Args, filter: &Filter, stats: &mut Statistics) -> Result<()> {
    let mut lines = filter.lines();
    let strip = filter.config().autostrip;

    while let Some(line) = lines.next() {
        let line = line.context("줄 읽기 실패")?;
        let number = if args.with_filename {
            lines.file_lineno()
        } else {
            lines.lineno()
        };
        let mut out = prefix(args, lines.filename(), number);
        out.push_str(&line);
        if strip {
            out.push('\n');
        }

        lines.output().write_all(out.as_bytes())?;
        stats.record_item(out.len());
    }

    stats.lines = lines.lineno();
    lines.close().context("입력 닫기 실패")?;
    Ok(())
}

/// 텍스트 모드 실행
fn run_text(args: &Args, filter: &Filter, stats: &mut Statistics) -> Result<()> {
    let mut texts = filter.text();
    let mut count = 0;

    while let Some(text) = texts.next() {
        let text = text.context("텍스트 읽기 실패")?;
        count += 1;
        let mut out = prefix(args, texts.filename(), count);
        out.push_str(&text);

        texts.output().write_all(out.as_bytes())?;
        stats.record_item(out.len());
    }

    stats.lines = texts.lineno();
    texts.close().context("입력 닫기 실패")?;
    Ok(())
}

/// 문단 모드 실행 (문단 사이에 빈 줄 하나)
fn run_paragraphs(args: &Args, filter: &Filter, stats: &mut Statistics) -> Result<()> {
    let mut paragraphs = filter.paragraphs();

    while let Some(paragraph) = paragraphs.next() {
        let paragraph = paragraph.context("문단 읽기 실패")?;
        let number = if args.with_filename {
            paragraphs.file_parno()
        } else {
            paragraphs.parno()
        };

        let mut out = String::new();
        if !paragraphs.is_first_paragraph() {
            out.push('\n');
        }
        out.push_str(&prefix(args, paragraphs.filename(), number));
        out.push_str(&paragraph);

        paragraphs.output().write_all(out.as_bytes())?;
        stats.record_item(out.len());
    }

    stats.lines = paragraphs.lineno();
    paragraphs.close().context("입력 닫기 실패")?;
    Ok(())
}

/// CSV/TSV 모드 실행 (행마다 JSON 배열 한 줄)
fn run_rows(args: &Args, filter: &Filter, stats: &mut Statistics) -> Result<()> {
    let mut rows = match args.mode {
        ReadMode::Tsv => filter.tsv_rows(),
        _ => filter.csv_rows(),
    };

    while let Some(row) = rows.next() {
        let row = match row {
            Ok(row) => row,
            Err(e @ FilterError::RowParse { .. }) => {
                warn(&e);
                stats.record_row_error();
                continue;
            }
            Err(e) => return Err(e).context("행 읽기 실패"),
        };

        let number = if args.with_filename {
            rows.file_lineno()
        } else {
            rows.lineno()
        };
        let mut out = prefix(args, rows.filename(), number);
        out.push_str(&serde_json::to_string(&row)?);
        out.push('\n');

        rows.output().write_all(out.as_bytes())?;
        stats.record_item(out.len());
    }

    stats.lines = rows.lineno();
    rows.close().context("입력 닫기 실패")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(extra: &[&str]) -> Args {
        let mut argv = vec!["clfilter"];
        argv.extend_from_slice(extra);
        Args::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_prefix() {
        assert_eq!(prefix(&args(&[]), Some("a.txt"), 3), "");
        assert_eq!(prefix(&args(&["-n"]), Some("a.txt"), 3), "3:");
        assert_eq!(prefix(&args(&["-n", "-H"]), Some("a.txt"), 3), "a.txt:3:");
        assert_eq!(prefix(&args(&["-H"]), None, 1), ":");
    }
}
