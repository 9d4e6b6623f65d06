//! 제자리 수정 모듈
//!
//! 소스 파일과 같은 폴더에 임시 파일을 만들고, 소스를 닫을 때 원본 위치로 원자적으로 교체합니다.
//! 명시적으로 [`InPlaceRewrite::commit`]하지 않아도 drop 시점에 교체됩니다.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

use crate::error::{FilterError, Result};

/// 진행 중인 제자리 수정
#[derive(Debug)]
pub struct InPlaceRewrite {
    target: PathBuf,
    temp: Option<NamedTempFile>,
}

impl InPlaceRewrite {
    /// 대상 파일 옆에 임시 출력 파일 생성
    pub fn begin(target: &Path) -> Result<Self> {
        let dir = match target.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let temp = NamedTempFile::new_in(dir).map_err(|e| FilterError::InPlace {
            path: target.to_path_buf(),
            reason: e.to_string(),
        })?;

        log::debug!("제자리 수정 시작: {}", target.display());
        Ok(Self {
            target: target.to_path_buf(),
            temp: Some(temp),
        })
    }

    /// 수정 대상 경로
    pub fn target(&self) -> &Path {
        &self.target
    }

    /// 임시 파일을 원본 위치로 교체 (두 번째 호출부터는 아무 일도 하지 않음)
    pub fn commit(&mut self) -> Result<()> {
        let Some(mut temp) = self.temp.take() else {
            return Ok(());
        };

        let in_place_error = |reason: String| FilterError::InPlace {
            path: self.target.clone(),
            reason,
        };

        temp.flush().map_err(|e| in_place_error(e.to_string()))?;
        if let Ok(meta) = fs::metadata(&self.target) {
            fs::set_permissions(temp.path(), meta.permissions())
                .map_err(|e| in_place_error(e.to_string()))?;
        }
        temp.persist(&self.target)
            .map_err(|e| in_place_error(e.error.to_string()))?;

        log::debug!("제자리 수정 완료: {}", self.target.display());
        Ok(())
    }
}

impl Write for InPlaceRewrite {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self.temp.as_mut() {
            Some(temp) => temp.write(buf),
            None => Err(io::Error::other("제자리 수정이 이미 완료되었습니다")),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self.temp.as_mut() {
            Some(temp) => temp.flush(),
            None => Ok(()),
        }
    }
}

impl Drop for InPlaceRewrite {
    fn drop(&mut self) {
        if let Err(e) = self.commit() {
            log::warn!("{}", e);
        }
    }
}
