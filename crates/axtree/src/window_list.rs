/*!
Window enumeration via the OS automation scripting interpreter.

Shells out to `osascript` with a fixed payload that walks every
non-background process in System Events and emits a JSON array of
`{pid, appName, title}` objects, one per titled window. The payload is
passed as a single argv element - no shell is involved, so there is no
shell-quoting hazard; titles and app names are JSON-escaped inside the
script itself.

Failure taxonomy is explicit: an interpreter failure (launch error,
nonzero exit, timeout) propagates to the caller, while empty or
malformed output is logged together with the raw output and degrades
to an empty result set.
*/

use std::io::Read;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use crate::types::{AxTreeError, AxTreeResult, WindowRecord};

/// Default deadline for the scripting interpreter. A hung script is
/// killed rather than hanging the host process.
pub const DEFAULT_SCRIPT_TIMEOUT: Duration = Duration::from_secs(10);

const WAIT_POLL_INTERVAL: Duration = Duration::from_millis(10);

const WINDOW_LIST_SCRIPT: &str = r#"
on esc(t)
	set t to my replaceText(t, "\\", "\\\\")
	set t to my replaceText(t, "\"", "\\\"")
	return t
end esc

on replaceText(t, needle, replacement)
	set AppleScript's text item delimiters to needle
	set parts to text items of t
	set AppleScript's text item delimiters to replacement
	set t to parts as text
	set AppleScript's text item delimiters to ""
	return t
end replaceText

set out to "["
set sep to ""
tell application "System Events"
	repeat with proc in (every application process whose background only is false)
		set procId to unix id of proc
		set procName to name of proc
		repeat with win in (every window of proc)
			set winTitle to ""
			try
				set winTitle to name of win
			end try
			if winTitle is not missing value and winTitle is not "" then
				set out to out & sep & "{\"pid\":" & procId & ",\"appName\":\"" & my esc(procName) & "\",\"title\":\"" & my esc(winTitle) & "\"}"
				set sep to ","
			end if
		end repeat
	end repeat
end tell
return out & "]"
"#;

/// How parsing the interpreter's output failed. These degrade to an
/// empty result set; only interpreter failures propagate to callers.
#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
  /// Interpreter exited cleanly but wrote nothing.
  #[error("script produced no output")]
  NoOutput,

  /// Interpreter output did not match the expected JSON schema.
  #[error("malformed script output: {reason}")]
  Malformed {
    reason: String,
    /// Raw interpreter output, kept for the diagnostic log.
    raw: String,
  },
}

/// Interpreter could not be launched, timed out, or exited nonzero.
#[derive(Debug, thiserror::Error)]
#[error("interpreter failed: {reason}")]
struct InterpreterError {
  reason: String,
}

/// Enumerate visible, titled windows across processes.
///
/// Blocking: waits for the interpreter up to `timeout`. Interpreter
/// failures propagate as `Err`; no-output and malformed output are
/// logged and degrade to `Ok(vec![])`.
pub fn window_list(timeout: Duration) -> AxTreeResult<Vec<WindowRecord>> {
  let raw = run_script(timeout).map_err(|e| AxTreeError::Interpreter {
    reason: e.to_string(),
  })?;

  match parse_window_list(&raw) {
    Ok(records) => Ok(records),
    Err(ScriptError::NoOutput) => {
      log::error!("window list script produced no output");
      Ok(Vec::new())
    }
    Err(ScriptError::Malformed { reason, raw }) => {
      log::error!("window list parse failed: {reason}; raw output: {raw}");
      Ok(Vec::new())
    }
  }
}

fn run_script(timeout: Duration) -> Result<String, InterpreterError> {
  let mut child = Command::new("osascript")
    .args(["-e", WINDOW_LIST_SCRIPT])
    .stdin(Stdio::null())
    .stdout(Stdio::piped())
    .stderr(Stdio::piped())
    .spawn()
    .map_err(|e| InterpreterError {
      reason: format!("failed to launch osascript: {e}"),
    })?;

  // Drain both pipes off-thread so a chatty script cannot deadlock the
  // deadline loop on a full pipe.
  let stdout = collect_pipe(child.stdout.take());
  let stderr = collect_pipe(child.stderr.take());

  let status = wait_with_deadline(&mut child, timeout)?;

  let out = stdout.join().unwrap_or_default();
  let err = stderr.join().unwrap_or_default();

  if !status.success() {
    return Err(InterpreterError {
      reason: format!("osascript exited with {status}: {}", err.trim()),
    });
  }
  Ok(out)
}

fn collect_pipe<R: Read + Send + 'static>(pipe: Option<R>) -> thread::JoinHandle<String> {
  thread::spawn(move || {
    let mut buf = String::new();
    if let Some(mut pipe) = pipe {
      drop(pipe.read_to_string(&mut buf));
    }
    buf
  })
}

fn wait_with_deadline(
  child: &mut Child,
  timeout: Duration,
) -> Result<ExitStatus, InterpreterError> {
  let deadline = Instant::now() + timeout;
  loop {
    match child.try_wait() {
      Ok(Some(status)) => return Ok(status),
      Ok(None) => {
        if Instant::now() >= deadline {
          drop(child.kill());
          drop(child.wait());
          return Err(InterpreterError {
            reason: format!("osascript timed out after {timeout:?}"),
          });
        }
        thread::sleep(WAIT_POLL_INTERVAL);
      }
      Err(e) => {
        return Err(InterpreterError {
          reason: format!("failed to wait for osascript: {e}"),
        })
      }
    }
  }
}

/// Schema-validate raw interpreter output into window records.
fn parse_window_list(raw: &str) -> Result<Vec<WindowRecord>, ScriptError> {
  let trimmed = raw.trim();
  if trimmed.is_empty() {
    return Err(ScriptError::NoOutput);
  }

  let records: Vec<WindowRecord> =
    serde_json::from_str(trimmed).map_err(|e| ScriptError::Malformed {
      reason: e.to_string(),
      raw: trimmed.to_string(),
    })?;

  Ok(records.into_iter().filter(|w| !w.title.is_empty()).collect())
}
