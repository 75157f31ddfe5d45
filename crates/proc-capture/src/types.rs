use std::time::Duration;

/// Which standard stream of the child to capture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureStream {
    Stdout,
    Stderr,
}

/// One capture request.
///
/// `timeout_ms` bounds each individual wait for the next chunk of output, not
/// the capture as a whole — the window re-arms after every chunk. Negative
/// means wait indefinitely, zero means poll (fail immediately unless data is
/// already available).
pub struct CaptureRequest<'a> {
    /// Command line, `argv[0]` being the executable. Must be non-empty.
    pub argv: &'a [&'a str],
    pub stream: CaptureStream,
    pub timeout_ms: i32,
}

impl CaptureRequest<'_> {
    /// The per-read window, or `None` for an unbounded wait.
    pub(crate) fn read_window(&self) -> Option<Duration> {
        u64::try_from(self.timeout_ms).ok().map(Duration::from_millis)
    }

    /// Human-readable command line for log output only — arguments are never
    /// joined for process launch, they pass to the OS verbatim as an array.
    pub(crate) fn display(&self) -> String {
        self.argv.join(" ")
    }
}
