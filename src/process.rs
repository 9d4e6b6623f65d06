//! 외부 명령 실행 모듈
//!
//! 셸 명령을 실행하고 출력을 문자열이나 줄 목록으로 받습니다. 인자들은 공백으로 이어 하나의 명령이 됩니다.

use std::process::{Command, ExitStatus, Stdio};

use crate::error::{FilterError, Result};

fn shell(command: &str) -> Command {
    let mut cmd = Command::new("sh");
    cmd.arg("-c").arg(command);
    cmd
}

fn command_error(command: &str, e: std::io::Error) -> FilterError {
    FilterError::Command {
        command: command.to_string(),
        reason: e.to_string(),
    }
}

/// 명령을 실행하고 표준 출력과 표준 에러를 합친 출력을 반환 (끝 줄바꿈 하나 제거)
///
/// 종료 코드는 확인하지 않습니다.
pub fn qx(args: &[&str]) -> Result<String> {
    let command = args.join(" ");
    let output = shell(&format!("{{ {}\n}} 2>&1", command))
        .stdin(Stdio::null())
        .output()
        .map_err(|e| command_error(&command, e))?;

    let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
    if text.ends_with('\n') {
        text.pop();
    }
    Ok(text)
}

/// [`qx`]의 출력을 줄 목록으로 반환
pub fn qx_lines(args: &[&str]) -> Result<Vec<String>> {
    Ok(qx(args)?.lines().map(str::to_string).collect())
}

/// 명령을 터미널 입출력에 연결해 실행하고 종료 상태 반환
pub fn qx_system(args: &[&str]) -> Result<ExitStatus> {
    let command = args.join(" ");
    shell(&command)
        .status()
        .map_err(|e| command_error(&command, e))
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[test]
    fn test_qx_combines_streams() {
        let out = qx(&["echo", "out;", "echo", "err", "1>&2"]).unwrap();
        assert_eq!(out, "out\nerr");
    }

    #[test]
    fn test_qx_lines() {
        let lines = qx_lines(&["printf", "'a\\nb\\nc\\n'"]).unwrap();
        assert_eq!(lines, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_qx_system_status() {
        assert!(qx_system(&["true"]).unwrap().success());
        assert_eq!(qx_system(&["exit", "3"]).unwrap().code(), Some(3));
    }
}
