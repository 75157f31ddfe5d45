use std::process::Stdio;
use std::time::Duration;

use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::{Child, Command};
use tracing::trace;

use crate::error::{CaptureError, Result};
use crate::process::terminate;
use crate::types::{CaptureRequest, CaptureStream};

/// Bytes requested per pipe read.
const PIPE_CHUNK_SIZE: usize = 4096;

/// Spawn `request.argv` and capture the selected stream until end-of-stream.
///
/// Each wait for the next chunk is bounded by `request.timeout_ms`, and the
/// window re-arms after every chunk — a slow-but-steady producer may run
/// arbitrarily long as long as no single gap exceeds the window.
/// End-of-stream (the child exited or closed the stream) is success, even
/// with zero bytes read.
///
/// On timeout or a read error the child's process group is SIGKILLed before
/// the error is returned: a failed capture is destructive to the child, not
/// merely observational.
pub async fn capture_output(request: &CaptureRequest<'_>) -> Result<Vec<u8>> {
    let (&program, args) = request.argv.split_first().ok_or(CaptureError::EmptyArgv)?;

    let mut command = Command::new(program);
    command.args(args).process_group(0);
    // Pipe only the selected stream; stdin and the other stream stay
    // inherited so unrelated child I/O is not interfered with.
    match request.stream {
        CaptureStream::Stdout => command.stdout(Stdio::piped()),
        CaptureStream::Stderr => command.stderr(Stdio::piped()),
    };

    trace!(command = %request.display(), timeout_ms = request.timeout_ms, "capture");

    let mut child = command
        .spawn()
        .map_err(|e| CaptureError::Spawn(format!("{program}: {e}")))?;

    let window = request.read_window();
    match request.stream {
        CaptureStream::Stdout => {
            let mut pipe = take_pipe(child.stdout.take(), &mut child).await?;
            drain(&mut pipe, window, &mut child).await
        }
        CaptureStream::Stderr => {
            let mut pipe = take_pipe(child.stderr.take(), &mut child).await?;
            drain(&mut pipe, window, &mut child).await
        }
    }
}

/// Capture the child's stdout. See [`capture_output`].
pub async fn capture_stdout(argv: &[&str], timeout_ms: i32) -> Result<Vec<u8>> {
    capture_output(&CaptureRequest {
        argv,
        stream: CaptureStream::Stdout,
        timeout_ms,
    })
    .await
}

/// Capture the child's stderr. See [`capture_output`].
pub async fn capture_stderr(argv: &[&str], timeout_ms: i32) -> Result<Vec<u8>> {
    capture_output(&CaptureRequest {
        argv,
        stream: CaptureStream::Stderr,
        timeout_ms,
    })
    .await
}

/// Take the read end of the pipe out of the child handle.
///
/// Always present for a stream configured as `Stdio::piped()`; if it is
/// somehow missing the child is killed rather than left running unobserved.
async fn take_pipe<T>(pipe: Option<T>, child: &mut Child) -> Result<T> {
    match pipe {
        Some(pipe) => Ok(pipe),
        None => {
            terminate(child).await;
            Err(CaptureError::Spawn("child stream not piped".into()))
        }
    }
}

/// Read the pipe to end-of-stream, each read bounded by `window`.
///
/// `None` waits indefinitely. `Some(Duration::ZERO)` polls: data already in
/// the pipe (or EOF) still completes, a read that would block times out
/// immediately.
async fn drain<R>(pipe: &mut R, window: Option<Duration>, child: &mut Child) -> Result<Vec<u8>>
where
    R: AsyncRead + Unpin,
{
    let mut buffer = Vec::new();
    let mut chunk = [0u8; PIPE_CHUNK_SIZE];

    loop {
        let read = match window {
            Some(window) => match tokio::time::timeout(window, pipe.read(&mut chunk)).await {
                Ok(read) => read,
                // The pending read was dropped with the timed-out future, so
                // nothing can land on `chunk` after this point.
                Err(_elapsed) => {
                    terminate(child).await;
                    return Err(CaptureError::Timeout {
                        window_ms: u64::try_from(window.as_millis()).unwrap_or(u64::MAX),
                    });
                }
            },
            None => pipe.read(&mut chunk).await,
        };

        match read {
            // End-of-stream: the child closed its end, normally via exit.
            Ok(0) => return Ok(buffer),
            Ok(n) => {
                // n <= PIPE_CHUNK_SIZE per the AsyncReadExt contract.
                if let Some(filled) = chunk.get(..n) {
                    buffer.extend_from_slice(filled);
                }
            }
            Err(e) => {
                terminate(child).await;
                return Err(CaptureError::Read(e));
            }
        }
    }
}
