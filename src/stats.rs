//! 통계 및 유틸리티 모듈
//!
//! 필터 실행 통계 수집 및 포맷팅을 담당합니다.

use colored::Colorize;
use std::time::{Duration, Instant};

/// 실행 통계 구조체
#[derive(Debug, Default)]
pub struct Statistics {
    /// 입력 소스 수
    pub sources: usize,
    /// 읽은 줄 수
    pub lines: usize,
    /// 출력한 항목 수 (줄/텍스트/문단/행)
    pub items: usize,
    /// 행 파싱 실패 수
    pub row_errors: usize,
    /// 쓴 총 바이트
    pub bytes_written: u64,
    /// 처리 시작 시간
    start_time: Option<Instant>,
}

impl Statistics {
    /// 새 통계 인스턴스 생성
    pub fn new(sources: usize) -> Self {
        Self {
            sources,
            start_time: Some(Instant::now()),
            ..Default::default()
        }
    }

    /// 출력 항목 하나 기록
    pub fn record_item(&mut self, bytes: usize) {
        self.items += 1;
        self.bytes_written += bytes as u64;
    }

    /// 행 파싱 실패 기록
    pub fn record_row_error(&mut self) {
        self.row_errors += 1;
    }

    /// 경과 시간 반환
    pub fn elapsed(&self) -> Duration {
        self.start_time
            .map(|t| t.elapsed())
            .unwrap_or(Duration::ZERO)
    }

    /// 통계 요약을 표준 에러로 출력
    pub fn print_summary(&self, item_label: &str) {
        eprintln!("\n{}", "═".repeat(50).bright_blue());
        eprintln!("{}", " 📊 처리 통계".bright_white().bold());
        eprintln!("{}", "═".repeat(50).bright_blue());

        eprintln!("  {} 입력 소스:    {}", "📁".bright_cyan(), self.sources);
        eprintln!("  {} 읽은 줄:      {}", "📥".bright_yellow(), self.lines);
        eprintln!(
            "  {} {:<10}{}",
            "✅".bright_green(),
            format!("{}:", item_label),
            self.items.to_string().green()
        );

        if self.row_errors > 0 {
            eprintln!(
                "  {} 행 오류:      {}",
                "❌".bright_red(),
                self.row_errors.to_string().red()
            );
        }

        eprintln!(
            "  {} 출력 용량:    {}",
            "📤".bright_magenta(),
            format_bytes(self.bytes_written)
        );
        eprintln!(
            "  {} 처리 시간:    {}",
            "⏱️".bright_cyan(),
            format_duration(self.elapsed())
        );

        eprintln!("{}", "═".repeat(50).bright_blue());
    }
}

/// 바이트를 읽기 쉬운 형식으로 변환
///
/// # Examples
/// ```
/// use clfilter::stats::format_bytes;
///
/// assert_eq!(format_bytes(500), "500 B");
/// assert_eq!(format_bytes(1024), "1.00 KB");
/// assert_eq!(format_bytes(1048576), "1.00 MB");
/// ```
pub fn format_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

/// 경과 시간을 읽기 쉬운 형식으로 변환
pub fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();
    let millis = duration.subsec_millis();

    if secs >= 3600 {
        format!("{}시간 {}분", secs / 3600, (secs % 3600) / 60)
    } else if secs >= 60 {
        format!("{}분 {}초", secs / 60, secs % 60)
    } else if secs > 0 {
        format!("{}.{:03}초", secs, millis)
    } else {
        format!("{}ms", millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(0), "0 B");
        assert_eq!(format_bytes(1023), "1023 B");
        assert_eq!(format_bytes(1536), "1.50 KB");
        assert_eq!(format_bytes(1073741824), "1.00 GB");
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::from_millis(500)), "500ms");
        assert_eq!(format_duration(Duration::from_secs(5)), "5.000초");
        assert_eq!(format_duration(Duration::from_secs(65)), "1분 5초");
        assert_eq!(format_duration(Duration::from_secs(3665)), "1시간 1분");
    }

    #[test]
    fn test_statistics_counters() {
        let mut stats = Statistics::new(2);
        stats.record_item(10);
        stats.record_item(5);
        stats.record_row_error();

        assert_eq!(stats.sources, 2);
        assert_eq!(stats.items, 2);
        assert_eq!(stats.row_errors, 1);
        assert_eq!(stats.bytes_written, 15);
    }
}
