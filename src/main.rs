//! FileHasher CLI - compute and verify file checksums

use clap::Parser;
use filehasher::config::{CliArgs, Commands, HashAlgorithm, HasherConfig};
use filehasher::error::{IoResultExt, Result};
use filehasher::hash::{FileHasher, TextEncoding};
use std::io::Write;
use std::path::Path;
use tracing_subscriber::EnvFilter;

fn main() {
    // Parse CLI arguments
    let args = CliArgs::parse();

    init_logging(&args);

    let stdout = std::io::stdout();
    let stderr = std::io::stderr();
    let code = match run(&args, &mut stdout.lock(), &mut stderr.lock()) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    };

    std::process::exit(code);
}

fn init_logging(args: &CliArgs) {
    let level = if args.quiet {
        "error"
    } else {
        match args.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Run the CLI and return the process exit code
fn run(args: &CliArgs, out: &mut dyn Write, err: &mut dyn Write) -> Result<i32> {
    let config = HasherConfig::from_cli(args)?;

    if let Some(command) = &args.command {
        return handle_command(command, config, out);
    }

    let Some(file) = args.file.as_deref() else {
        print_usage(err).with_path("<stderr>")?;
        return Ok(1);
    };

    if args.verbose > 0 {
        tracing::info!(
            "{} with {} chunks",
            config.algorithm.name(),
            humansize::format_size(config.chunk_size as u64, humansize::BINARY)
        );
    }

    let hasher = FileHasher::from_config(&config)?;
    let digest = hasher.hash_file(file)?;
    writeln!(out, "{}: {}", hasher.algorithm().name(), digest).with_path("<stdout>")?;

    Ok(0)
}

fn print_usage(err: &mut dyn Write) -> std::io::Result<()> {
    writeln!(err, "Usage: filehasher <FILE> [ALGORITHM]")?;
    writeln!(err, "       filehasher --help for more information")?;
    writeln!(err, "       filehasher sums <DIR>           - Checksums for a directory tree")?;
    writeln!(err, "       filehasher verify <FILE> <HASH> - Check a file against a digest")
}

fn handle_command(command: &Commands, config: HasherConfig, out: &mut dyn Write) -> Result<i32> {
    match command {
        Commands::Sums { directory, algorithm, json } => {
            cmd_sums(directory, HasherConfig { algorithm: *algorithm, ..config }, *json, out)
        }
        Commands::Verify { file, expected, algorithm } => {
            cmd_verify(file, expected, HasherConfig { algorithm: *algorithm, ..config }, out)
        }
        Commands::Str { text, algorithm, encoding } => cmd_string(text, *algorithm, encoding, out),
        Commands::List => cmd_list(out),
    }
}

fn cmd_sums(directory: &Path, config: HasherConfig, json: bool, out: &mut dyn Write) -> Result<i32> {
    let hasher = FileHasher::from_config(&config)?;
    let checksums = hasher.generate_checksums(directory)?;

    if json {
        serde_json::to_writer_pretty(&mut *out, &checksums)
            .map_err(std::io::Error::from)
            .and_then(|_| writeln!(out))
            .with_path("<stdout>")?;
    } else {
        checksums.write_sums(&mut *out).with_path("<stdout>")?;
    }

    tracing::info!("{} files hashed with {}", checksums.len(), config.algorithm.name());
    Ok(0)
}

fn cmd_verify(file: &Path, expected: &str, config: HasherConfig, out: &mut dyn Write) -> Result<i32> {
    let hasher = FileHasher::from_config(&config)?;
    let matches = hasher.verify_file(file, expected)?;

    let status = if matches { "OK" } else { "FAILED" };
    writeln!(out, "{}: {}", file.display(), status).with_path("<stdout>")?;

    Ok(if matches { 0 } else { 1 })
}

fn cmd_string(text: &str, algorithm: HashAlgorithm, encoding: &str, out: &mut dyn Write) -> Result<i32> {
    let encoding: TextEncoding = encoding.parse()?;
    let digest = FileHasher::with_algorithm(algorithm).hash_string_with_encoding(text, encoding)?;
    writeln!(out, "{}: {}", algorithm.name(), digest).with_path("<stdout>")?;
    Ok(0)
}

fn cmd_list(out: &mut dyn Write) -> Result<i32> {
    writeln!(out, "{:10} {:>6}", "ALGORITHM", "BITS").with_path("<stdout>")?;
    for algorithm in HashAlgorithm::ALL {
        writeln!(out, "{:10} {:>6}", algorithm.as_str(), algorithm.output_size() * 8)
            .with_path("<stdout>")?;
    }
    Ok(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use filehasher::error::ErrorKind;
    use tempfile::TempDir;

    const HELLO_SHA256: &str = "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824";

    fn run_cli(argv: &[&str]) -> (Result<i32>, String, String) {
        let args = CliArgs::parse_from(argv);
        let mut out = Vec::new();
        let mut err = Vec::new();
        let result = run(&args, &mut out, &mut err);
        (
            result,
            String::from_utf8(out).unwrap(),
            String::from_utf8(err).unwrap(),
        )
    }

    fn hello_file(dir: &TempDir) -> String {
        let path = dir.path().join("hello.txt");
        std::fs::write(&path, b"hello").unwrap();
        path.to_string_lossy().into_owned()
    }

    #[test]
    fn test_no_file_prints_usage() {
        let (result, out, err) = run_cli(&["filehasher"]);
        assert_eq!(result.unwrap(), 1);
        assert!(out.is_empty());
        assert!(err.starts_with("Usage: filehasher <FILE> [ALGORITHM]"));
    }

    #[test]
    fn test_hash_file_output() {
        let dir = TempDir::new().unwrap();
        let file = hello_file(&dir);

        let (result, out, _) = run_cli(&["filehasher", file.as_str()]);
        assert_eq!(result.unwrap(), 0);
        assert_eq!(out, format!("SHA256: {}\n", HELLO_SHA256));

        let (result, out, _) = run_cli(&["filehasher", file.as_str(), "md5"]);
        assert_eq!(result.unwrap(), 0);
        assert_eq!(out, "MD5: 5d41402abc4b2a76b9719d911017c592\n");
    }

    #[test]
    fn test_huge_chunk_size_flag() {
        let dir = TempDir::new().unwrap();
        let file = hello_file(&dir);

        let (result, out, _) = run_cli(&["filehasher", "--chunk-size", "1T", file.as_str()]);
        assert_eq!(result.unwrap(), 0);
        assert_eq!(out, format!("SHA256: {}\n", HELLO_SHA256));
    }

    #[test]
    fn test_errors_propagate() {
        let dir = TempDir::new().unwrap();
        let file = hello_file(&dir);

        let (result, _, _) = run_cli(&["filehasher", file.as_str(), "SHA-256"]);
        assert_eq!(result.unwrap_err().kind(), ErrorKind::InvalidArgument);

        let missing = dir.path().join("missing.txt");
        let missing = missing.to_string_lossy().into_owned();
        let (result, _, _) = run_cli(&["filehasher", missing.as_str()]);
        assert_eq!(result.unwrap_err().kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_verify_command() {
        let dir = TempDir::new().unwrap();
        let file = hello_file(&dir);

        let upper = HELLO_SHA256.to_uppercase();
        let (result, out, _) = run_cli(&["filehasher", "verify", file.as_str(), upper.as_str()]);
        assert_eq!(result.unwrap(), 0);
        assert!(out.ends_with(": OK\n"));

        let (result, out, _) = run_cli(&["filehasher", "verify", file.as_str(), "deadbeef"]);
        assert_eq!(result.unwrap(), 1);
        assert!(out.ends_with(": FAILED\n"));
    }

    #[test]
    fn test_sums_and_string_commands() {
        let dir = TempDir::new().unwrap();
        let file = hello_file(&dir);
        let root = dir.path().to_string_lossy().into_owned();

        let (result, out, _) = run_cli(&["filehasher", "sums", root.as_str()]);
        assert_eq!(result.unwrap(), 0);
        assert_eq!(out, format!("{}  {}\n", HELLO_SHA256, file));

        let (result, out, _) = run_cli(&["filehasher", "sums", root.as_str(), "--json"]);
        assert_eq!(result.unwrap(), 0);
        let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed["entries"][file.as_str()], HELLO_SHA256);

        let (result, out, _) = run_cli(&["filehasher", "string", "hello"]);
        assert_eq!(result.unwrap(), 0);
        assert_eq!(out, format!("SHA256: {}\n", HELLO_SHA256));
    }
}
