//! snk-core CLI entry point.
//!
//! Loads configuration from the environment, installs logging and dispatches
//! to the key and config subcommands.
//!
//! ## CLI Subcommands
//!
//! - `snk-core-cli extract <key-file>` - Write or print the public key
//! - `snk-core-cli token <key-file>` - Print the public-key token
//! - `snk-core-cli inspect <key-file>` - Summarize a key file
//! - `snk-core-cli check <hex>` - Validate a hex public key

use std::path::Path;
use std::process::ExitCode;

use snk_core::cli::{self, config_cmd, flag_value, has_flag, EXIT_USAGE};
use snk_core::config as snk_config;
use snk_core::telemetry::init_logging;

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().collect();
    let command = args.get(1).map(|s| s.as_str()).unwrap_or("help");

    let env = snk_config::load();
    if let Err(e) = init_logging(&env.log) {
        eprintln!("Logging disabled: {}", e);
    }

    let code = match command {
        "extract" => match args.get(2) {
            Some(path) => {
                let out = flag_value(&args, "--out").map(Path::new);
                if has_flag(&args, "--out") && out.is_none() {
                    eprintln!("Missing value for --out");
                    EXIT_USAGE
                } else {
                    cli::run_extract(Path::new(path), out, &env.keys)
                }
            }
            None => missing_key_file("extract"),
        },
        "token" => match args.get(2) {
            Some(path) => cli::run_token(Path::new(path), &env.keys),
            None => missing_key_file("token"),
        },
        "inspect" => match args.get(2) {
            Some(path) => {
                let json_output = has_flag(&args, "--json");
                cli::run_inspect(Path::new(path), json_output, &env.keys)
            }
            None => missing_key_file("inspect"),
        },
        "check" => match args.get(2) {
            Some(text) => cli::run_check(text),
            None => {
                eprintln!("Usage: snk-core-cli check <hex>");
                EXIT_USAGE
            }
        },
        "config" => {
            let subcommand = args.get(2).map(|s| s.as_str()).unwrap_or("show");
            match subcommand {
                "show" => {
                    config_cmd::run_show();
                    0
                }
                "defaults" => {
                    config_cmd::run_defaults();
                    0
                }
                "validate" => config_cmd::run_validate(),
                _ => {
                    eprintln!("Unknown config subcommand: {}", subcommand);
                    print_command_help("config");
                    EXIT_USAGE
                }
            }
        }
        "help" | "--help" | "-h" => {
            if let Some(subcommand) = args.get(2) {
                print_command_help(subcommand);
            } else {
                print_usage();
            }
            0
        }
        "version" | "--version" | "-V" => {
            println!("snk-core {}", env!("CARGO_PKG_VERSION"));
            0
        }
        _ => {
            eprintln!("Unknown command: {}", command);
            print_usage();
            EXIT_USAGE
        }
    };

    ExitCode::from(code as u8)
}

fn missing_key_file(command: &str) -> i32 {
    eprintln!("Missing <key-file> argument");
    print_command_help(command);
    EXIT_USAGE
}

fn print_usage() {
    let version = env!("CARGO_PKG_VERSION");
    eprintln!(
        "snk-core - strong-name key blob tool v{}

USAGE:
    snk-core-cli [COMMAND] [OPTIONS]

COMMANDS:
    extract      Extract the public key from a key file
    token        Print the public-key token of a key file
    inspect      Summarize a key file
    check        Validate a public key given as hex
    config       Manage configuration (show, defaults, validate)
    version      Show version information
    help         Show this help message

EXAMPLES:
    snk-core-cli extract KeyPair.snk --out PublicKey.snk
    snk-core-cli token KeyPair.snk
    snk-core-cli inspect PublicKey.snk --json
    snk-core-cli check 0024000004800000940000000602000000240000525341310004...
    snk-core-cli config validate

ENVIRONMENT:
    SNK_CORE_MAX_KEY_FILE_SIZE  Max key file size in bytes (default: 65536)
    SNK_CORE_KEY_SEARCH_PATHS   Directories searched for relative key files
    SNK_CORE_LOG_LEVEL          Log filter (default: warn)
    SNK_CORE_LOG_FORMAT         json or pretty (default: pretty)
    SNK_CORE_LOG_FILE           Write logs to this file instead of stderr

EXIT CODES:
    0  Success
    1  Invalid key
    2  Usage or configuration error
    3  Key file could not be found or read
",
        version
    );
}

/// Print detailed help for a specific command.
fn print_command_help(command: &str) {
    match command {
        "extract" => {
            eprintln!(
                "snk-core-cli extract - Extract the public key

USAGE:
    snk-core-cli extract <key-file> [--out <path>]

OPTIONS:
    --out PATH  Write the binary public key to PATH instead of printing hex

DESCRIPTION:
    Accepts a key pair, a strong-name public key or a bare CAPI public
    blob and produces the strong-name public key for it. Private key
    material is never written.

EXAMPLES:
    snk-core-cli extract KeyPair.snk
    snk-core-cli extract KeyPair.snk --out PublicKey.snk
"
            );
        }
        "token" => {
            eprintln!(
                "snk-core-cli token - Print the public-key token

USAGE:
    snk-core-cli token <key-file>

DESCRIPTION:
    Prints the last 8 bytes of the SHA-1 hash of the public key, reversed,
    as lowercase hex.

EXAMPLES:
    snk-core-cli token KeyPair.snk
"
            );
        }
        "inspect" => {
            eprintln!(
                "snk-core-cli inspect - Summarize a key file

USAGE:
    snk-core-cli inspect <key-file> [--json]

OPTIONS:
    --json  Output in JSON format

EXAMPLES:
    snk-core-cli inspect KeyPair.snk
    snk-core-cli inspect PublicKey.snk --json
"
            );
        }
        "check" => {
            eprintln!(
                "snk-core-cli check - Validate a hex public key

USAGE:
    snk-core-cli check <hex>

EXIT CODES:
    0  The string is a valid public key
    1  The string is not hex or not a valid public key
"
            );
        }
        "config" => {
            eprintln!(
                "snk-core-cli config - Manage configuration

USAGE:
    snk-core-cli config <SUBCOMMAND>

SUBCOMMANDS:
    show           Show current configuration
    validate       Validate environment configuration
    defaults       Show default configuration

EXAMPLES:
    snk-core-cli config show
    snk-core-cli config validate
"
            );
        }
        _ => {
            eprintln!(
                "No detailed help available for '{}'. Use 'snk-core-cli help' for general usage.",
                command
            );
        }
    }
}
