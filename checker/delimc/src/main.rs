//! Delimit CLI
//!
//! Verifies delimiter balance in JS/TS-family sources.

use delim_report::emitter::ColorMode;
use delimc::commands::{check_paths, CheckOptions};

fn main() {
    delimc::init_tracing();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        std::process::exit(2);
    }

    let command = &args[1];

    match command.as_str() {
        "check" => {
            let mut options = CheckOptions::default();
            let mut paths = Vec::new();

            for arg in args.iter().skip(2) {
                if arg == "--json" {
                    options.json = true;
                } else if let Some(mode) = arg.strip_prefix("--color=") {
                    options.color = match mode {
                        "auto" => ColorMode::Auto,
                        "always" => ColorMode::Always,
                        "never" => ColorMode::Never,
                        _ => {
                            eprintln!("error: unknown color mode '{mode}'");
                            eprintln!("expected one of: auto, always, never");
                            std::process::exit(2);
                        }
                    };
                } else if arg == "--quiet" || arg == "-q" {
                    options.quiet = true;
                } else if arg.starts_with('-') {
                    eprintln!("error: unknown option '{arg}'");
                    print_check_usage();
                    std::process::exit(2);
                } else {
                    paths.push(arg.clone());
                }
            }

            if paths.is_empty() {
                print_check_usage();
                std::process::exit(2);
            }

            std::process::exit(check_paths(&paths, &options));
        }
        "help" | "--help" | "-h" => {
            print_usage();
        }
        "version" | "--version" | "-V" => {
            println!("delim {}", env!("CARGO_PKG_VERSION"));
        }
        unknown => {
            eprintln!("error: unknown command '{unknown}'");
            print_usage();
            std::process::exit(2);
        }
    }
}

fn print_usage() {
    eprintln!("delim - delimiter balance checker for JS/TS sources");
    eprintln!();
    eprintln!("Usage: delim <command> [options]");
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  check <path>...    Scan files or directories for balance defects");
    eprintln!("  help               Show this message");
    eprintln!("  version            Show version");
    eprintln!();
    eprintln!("Exit codes: 0 balanced, 1 defects found, 2 unusable input");
}

fn print_check_usage() {
    eprintln!("Usage: delim check <path>... [options]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --json             Machine-readable output on stdout");
    eprintln!("  --color=<mode>     Color output: auto (default), always, never");
    eprintln!("  -q, --quiet        Suppress the all-clear line and summary");
}
