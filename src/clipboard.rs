// SPDX-License-Identifier: GPL-3.0-or-later
// tabpad - Clipboard text access via platform tools

use log::debug;
use std::io::Read;
use std::process::{Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

/// Read the clipboard as text. Returns `None` on failure, missing tooling or
/// when the tool does not finish within `timeout`; callers treat that as "no
/// clipboard text available".
pub fn read_text(timeout: Duration) -> Option<String> {
    #[cfg(target_os = "macos")]
    {
        run_with_deadline(Command::new("pbpaste"), timeout)
    }

    #[cfg(target_os = "windows")]
    {
        let mut cmd = Command::new("powershell");
        cmd.args(["-NoProfile", "-Command", "Get-Clipboard"]);
        run_with_deadline(cmd, timeout)
    }

    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    {
        let mut xclip = Command::new("xclip");
        xclip.args(["-selection", "clipboard", "-o"]);
        run_with_deadline(xclip, timeout).or_else(|| {
            let mut xsel = Command::new("xsel");
            xsel.args(["--clipboard", "--output"]);
            run_with_deadline(xsel, timeout)
        })
    }
}

fn run_with_deadline(mut cmd: Command, timeout: Duration) -> Option<String> {
    let mut child = cmd
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .ok()?;
    let deadline = Instant::now() + timeout;
    loop {
        match child.try_wait() {
            Ok(Some(status)) => {
                if !status.success() {
                    return None;
                }
                let mut out = String::new();
                child.stdout.take()?.read_to_string(&mut out).ok()?;
                // Some tools append a trailing newline to the transported text.
                while out.ends_with('\n') || out.ends_with('\r') {
                    out.pop();
                }
                return Some(out);
            }
            Ok(None) => {
                if Instant::now() >= deadline {
                    debug!("clipboard read timed out after {:?}", timeout);
                    let _ = child.kill();
                    let _ = child.wait();
                    return None;
                }
                thread::sleep(Duration::from_millis(10));
            }
            Err(_) => return None,
        }
    }
}
