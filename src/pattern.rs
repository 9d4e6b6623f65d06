//! 패턴 매칭 모듈
//!
//! glob 패턴으로 주어진 입력 소스 이름을 실제 파일 목록으로 펼칩니다.

use glob::glob;

use crate::error::{FilterError, Result};
use crate::source::is_url;

/// 이름에 glob 메타 문자가 있는지 확인
pub fn has_glob_meta(name: &str) -> bool {
    name.contains(['*', '?', '['])
}

/// 소스 이름 목록의 glob 패턴 펼치기
///
/// URL과 `-`는 그대로 두고, 일치하는 파일이 없는 패턴은 이름 그대로 남겨 열 때 에러가 나도록 합니다.
/// 펼친 결과는 정렬된 순서입니다.
///
/// # Arguments
/// * `names` - 명령줄에서 받은 소스 이름 목록
///
/// # Returns
/// 펼친 소스 이름 목록 또는 잘못된 패턴 에러
///
/// # Examples
/// ```
/// use clfilter::pattern::expand_sources;
///
/// let names = expand_sources(&["-", "plain.txt"]).unwrap();
/// assert_eq!(names, vec!["-", "plain.txt"]);
/// ```
pub fn expand_sources<S: AsRef<str>>(names: &[S]) -> Result<Vec<String>> {
    let mut expanded = Vec::with_capacity(names.len());

    for name in names {
        let name = name.as_ref();
        if name == "-" || is_url(name) || !has_glob_meta(name) {
            expanded.push(name.to_string());
            continue;
        }

        let paths = glob(name).map_err(|_| FilterError::InvalidPattern {
            pattern: name.to_string(),
        })?;
        let mut matches: Vec<String> = paths
            .filter_map(|p| p.ok())
            .filter(|p| p.is_file())
            .map(|p| p.display().to_string())
            .collect();

        if matches.is_empty() {
            log::debug!("일치하는 파일 없음: {}", name);
            expanded.push(name.to_string());
        } else {
            matches.sort();
            expanded.append(&mut matches);
        }
    }

    Ok(expanded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_expand_wildcard() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("b.txt"), "b").unwrap();
        fs::write(temp_dir.path().join("a.txt"), "a").unwrap();
        fs::write(temp_dir.path().join("c.csv"), "c").unwrap();

        let pattern = format!("{}/*.txt", temp_dir.path().display());
        let names = expand_sources(&[pattern]).unwrap();

        assert_eq!(names.len(), 2);
        assert!(names[0].ends_with("a.txt"));
        assert!(names[1].ends_with("b.txt"));
    }

    #[test]
    fn test_no_match_kept_literally() {
        let temp_dir = TempDir::new().unwrap();
        let pattern = format!("{}/*.none", temp_dir.path().display());
        let names = expand_sources(&[pattern.clone()]).unwrap();
        assert_eq!(names, vec![pattern]);
    }

    #[test]
    fn test_url_not_expanded() {
        let names = expand_sources(&["https://example.com/search?q=a*"]).unwrap();
        assert_eq!(names, vec!["https://example.com/search?q=a*"]);
    }

    #[test]
    fn test_invalid_pattern() {
        let result = expand_sources(&["[invalid"]);
        assert!(matches!(result, Err(FilterError::InvalidPattern { .. })));
    }

    #[test]
    fn test_has_glob_meta() {
        assert!(has_glob_meta("*.json"));
        assert!(has_glob_meta("data?.txt"));
        assert!(has_glob_meta("file[0-9]"));
        assert!(!has_glob_meta("plain.txt"));
    }
}
