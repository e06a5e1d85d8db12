//! Command-line extractor: prints the extraction result as JSON.
//!
//! ```text
//! docparse [--type <media-type>] [PATH]
//! ```
//!
//! Reads PATH, or stdin when no path is given. Without `--type`, files are
//! sniffed and stdin is treated as `text/plain`.

use rs_docparser::{extract_bytes, extract_file, ExtractResult};
use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;

const USAGE: &str = "usage: docparse [--type <media-type>] [PATH]";

#[derive(Debug, Default)]
struct Args {
    media_type: Option<String>,
    path: Option<PathBuf>,
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Args, String> {
    let mut parsed = Args::default();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-t" | "--type" => {
                let value = args.next().ok_or("--type needs a value")?;
                parsed.media_type = Some(value);
            }
            "-h" | "--help" => return Err(USAGE.to_string()),
            _ if arg.starts_with('-') && arg.len() > 1 => return Err(format!("unknown option {arg}\n{USAGE}")),
            _ if parsed.path.is_some() => return Err(format!("unexpected argument {arg}\n{USAGE}")),
            _ => parsed.path = Some(PathBuf::from(arg)),
        }
    }
    Ok(parsed)
}

fn run(args: &Args) -> Result<ExtractResult, String> {
    let media_type = args.media_type.as_deref();
    let result = match &args.path {
        Some(path) => extract_file(path, media_type),
        None => {
            let mut bytes = Vec::new();
            io::stdin()
                .read_to_end(&mut bytes)
                .map_err(|e| format!("Failed to read from stdin: {e}"))?;
            extract_bytes(&bytes, media_type)
        }
    };
    result.map_err(|e| e.to_string())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .target(env_logger::Target::Stderr)
        .init();

    let args = match parse_args(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(message) => {
            eprintln!("{message}");
            return ExitCode::FAILURE;
        }
    };

    match run(&args).and_then(|result| serde_json::to_string(&result).map_err(|e| e.to_string())) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(message) => {
            eprintln!("docparse: {message}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Result<Args, String> {
        parse_args(list.iter().map(|s| (*s).to_string()))
    }

    #[test]
    fn type_and_path() {
        let parsed = args(&["--type", "application/rtf", "notes.rtf"]).unwrap();
        assert_eq!(parsed.media_type.as_deref(), Some("application/rtf"));
        assert_eq!(parsed.path, Some(PathBuf::from("notes.rtf")));
    }

    #[test]
    fn stdin_when_no_path() {
        let parsed = args(&[]).unwrap();
        assert!(parsed.path.is_none());
        assert!(parsed.media_type.is_none());
    }

    #[test]
    fn rejects_bad_usage() {
        assert!(args(&["--type"]).is_err());
        assert!(args(&["--verbose"]).is_err());
        assert!(args(&["a.doc", "b.doc"]).is_err());
    }
}
