//! System clipboard host
//!
//! - async tier: the native clipboard through arboard
//! - legacy tier: the platform copy command (pbcopy, wl-copy, xclip, ...)
//!   fed from a temporary staging file
//! - manual tier: the text is framed on stdout for the user to copy

use async_trait::async_trait;
use colored::Colorize;
use std::io::{Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tempfile::NamedTempFile;

use promptkit::{ClipboardHost, DomainError, SelectionHost};

/// Copy commands in order of preference: (program, args)
#[cfg(target_os = "macos")]
const COPY_COMMANDS: &[(&str, &[&str])] = &[("pbcopy", &[])];

#[cfg(target_os = "windows")]
const COPY_COMMANDS: &[(&str, &[&str])] = &[("clip", &[])];

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
const COPY_COMMANDS: &[(&str, &[&str])] = &[
    ("wl-copy", &[]),
    ("xclip", &["-selection", "clipboard"]),
    ("xsel", &["--clipboard", "--input"]),
];

/// Text staged for the copy command
pub struct StagedFile {
    file: NamedTempFile,
    selected: bool,
}

/// Native clipboard with command-line fallback
#[derive(Debug, Default)]
pub struct SystemClipboard;

impl SystemClipboard {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ClipboardHost for SystemClipboard {
    type Staged = StagedFile;

    async fn write_text(&self, text: &str) -> Result<(), DomainError> {
        let text = text.to_string();
        tokio::task::spawn_blocking(move || -> Result<(), arboard::Error> {
            let mut clipboard = arboard::Clipboard::new()?;
            clipboard.set_text(text)
        })
        .await
        .map_err(|e| DomainError::Clipboard(format!("Clipboard task failed: {e}")))?
        .map_err(|e| DomainError::Clipboard(e.to_string()))
    }

    fn stage_text(&self, text: &str) -> Result<StagedFile, DomainError> {
        let mut file = tempfile::Builder::new()
            .prefix("promptkit-")
            .suffix(".txt")
            .tempfile()
            .map_err(io_error)?;
        file.write_all(text.as_bytes()).map_err(io_error)?;
        file.flush().map_err(io_error)?;

        Ok(StagedFile {
            file,
            selected: false,
        })
    }

    fn select_staged(&self, staged: &mut StagedFile) -> Result<(), DomainError> {
        staged
            .file
            .as_file_mut()
            .seek(SeekFrom::Start(0))
            .map_err(io_error)?;
        staged.selected = true;
        Ok(())
    }

    fn exec_copy(&self, staged: &StagedFile) -> Result<bool, DomainError> {
        if !staged.selected {
            return Ok(false);
        }

        let (program, args) = find_copy_command()
            .ok_or_else(|| DomainError::Clipboard("No copy command found on PATH".into()))?;
        let input = staged.file.reopen().map_err(io_error)?;

        tracing::debug!("Running {:?} {:?}", program, args);
        let status = Command::new(&program)
            .args(args)
            .stdin(Stdio::from(input))
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map_err(io_error)?;

        Ok(status.success())
    }

    fn release_staged(&self, staged: StagedFile) {
        if let Err(e) = staged.file.close() {
            tracing::warn!("Failed to remove clipboard staging file: {}", e);
        }
    }
}

/// Manual-copy fallback for a terminal: frame the text so it is easy to select
#[derive(Debug, Default)]
pub struct TerminalSelection;

impl SelectionHost for TerminalSelection {
    type Target = str;

    fn select_all_text(&self, target: &str) -> Result<(), DomainError> {
        let rule = "─".repeat(60);
        println!("{}", rule.dimmed());
        println!("{}", target);
        println!("{}", rule.dimmed());
        Ok(())
    }
}

fn find_copy_command() -> Option<(PathBuf, &'static [&'static str])> {
    let path = std::env::var_os("PATH")?;
    let dirs: Vec<PathBuf> = std::env::split_paths(&path).collect();

    COPY_COMMANDS.iter().find_map(|(program, args)| {
        dirs.iter()
            .find_map(|dir| executable_in(dir, program))
            .map(|found| (found, *args))
    })
}

fn executable_in(dir: &Path, program: &str) -> Option<PathBuf> {
    let candidate = dir.join(program);
    if candidate.is_file() {
        return Some(candidate);
    }
    let with_ext = dir.join(format!("{program}.exe"));
    with_ext.is_file().then_some(with_ext)
}

fn io_error(e: std::io::Error) -> DomainError {
    DomainError::Clipboard(e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;

    #[test]
    fn test_staging_file_is_removed_on_release() {
        let host = SystemClipboard::new();
        let mut staged = host.stage_text("staged text").unwrap();
        let path = staged.file.path().to_path_buf();

        host.select_staged(&mut staged).unwrap();
        let mut content = String::new();
        staged.file.reopen().unwrap().read_to_string(&mut content).unwrap();
        assert_eq!(content, "staged text");
        assert!(path.exists());

        host.release_staged(staged);
        assert!(!path.exists());
    }

    #[test]
    fn test_unselected_text_is_not_copied() {
        let host = SystemClipboard::new();
        let staged = host.stage_text("x").unwrap();
        assert!(!host.exec_copy(&staged).unwrap());
        host.release_staged(staged);
    }

    #[test]
    fn test_executable_lookup() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("pbcopy"), "").unwrap();

        assert!(executable_in(dir.path(), "pbcopy").is_some());
        assert!(executable_in(dir.path(), "xclip").is_none());
    }
}
