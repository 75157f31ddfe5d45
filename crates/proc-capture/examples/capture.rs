use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use proc_capture::{CaptureRequest, CaptureStream};

#[derive(Clone, Copy, ValueEnum)]
enum Stream {
    Stdout,
    Stderr,
}

#[derive(Parser)]
#[command(name = "capture")]
struct Cli {
    /// Which stream of the child to capture
    #[arg(long, value_enum, default_value_t = Stream::Stdout)]
    stream: Stream,
    /// Per-read timeout in milliseconds (negative = wait indefinitely)
    #[arg(long, default_value_t = 5000, allow_hyphen_values = true)]
    timeout: i32,
    /// Command and arguments to run
    #[arg(required = true, trailing_var_arg = true)]
    argv: Vec<String>,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt().init();

    let cli = Cli::parse();
    let argv: Vec<&str> = cli.argv.iter().map(String::as_str).collect();
    let stream = match cli.stream {
        Stream::Stdout => CaptureStream::Stdout,
        Stream::Stderr => CaptureStream::Stderr,
    };

    let request = CaptureRequest {
        argv: &argv,
        stream,
        timeout_ms: cli.timeout,
    };

    match proc_capture::capture_output(&request).await {
        Ok(output) => {
            eprintln!("captured {} bytes", output.len());
            print!("{}", String::from_utf8_lossy(&output));
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
