//! Opens coupon pages in the system browser.
//!
//! - macOS: `open`
//! - Linux: `xdg-open`
//! - Windows: `cmd /C start`
//!
//! The opener is spawned detached with null stdio so it cannot draw over
//! the terminal UI. We don't wait for it.

use std::fmt;
use std::io;
use std::process::{Command, Stdio};

use log::info;

#[derive(Debug)]
pub enum ViewerError {
    EmptyUrl,
    Unsupported,
    Spawn(io::Error),
}

impl fmt::Display for ViewerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewerError::EmptyUrl => write!(f, "no coupon page for this restaurant"),
            ViewerError::Unsupported => write!(f, "opening a browser is not supported on this platform"),
            ViewerError::Spawn(e) => write!(f, "failed to launch browser: {e}"),
        }
    }
}

impl std::error::Error for ViewerError {}

/// Builds the platform command that opens `url`.
pub fn opener_command(url: &str) -> Result<Command, ViewerError> {
    if url.trim().is_empty() {
        return Err(ViewerError::EmptyUrl);
    }

    #[cfg(target_os = "macos")]
    {
        let mut cmd = Command::new("open");
        cmd.arg(url);
        Ok(cmd)
    }

    #[cfg(target_os = "linux")]
    {
        let mut cmd = Command::new("xdg-open");
        cmd.arg(url);
        Ok(cmd)
    }

    #[cfg(target_os = "windows")]
    {
        let mut cmd = Command::new("cmd");
        // Empty title argument so `start` doesn't treat the URL as a window title.
        cmd.args(["/C", "start", "", url]);
        Ok(cmd)
    }

    #[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
    {
        Err(ViewerError::Unsupported)
    }
}

pub fn open_in_browser(url: &str) -> Result<(), ViewerError> {
    let mut cmd = opener_command(url)?;
    cmd.stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map_err(ViewerError::Spawn)?;
    info!("Opened coupon page: {}", url);
    Ok(())
}
