use std::env;
use std::path::PathBuf;

#[derive(Debug)]
pub struct Args {
    pub config_path: Option<PathBuf>,
    pub debug_mode: bool,
    pub timeout_secs: Option<u64>,
}

impl Args {
    /// Parse the process arguments. `None` means the process should exit
    /// right away (help, version or a bad flag was handled already).
    pub fn parse() -> Option<Self> {
        Self::parse_from(env::args().skip(1))
    }

    fn parse_from(args: impl IntoIterator<Item = String>) -> Option<Self> {
        let mut config_path: Option<PathBuf> = None;
        let mut debug_mode = false;
        let mut timeout_secs: Option<u64> = None;

        for arg in args {
            if arg == "--help" || arg == "-h" {
                print_help();
                return None;
            } else if arg == "--version" || arg == "-v" {
                println!(
                    "Screen Sweeper v{} (built {})",
                    env!("SWEEPER_VERSION_DISPLAY"),
                    env!("SWEEPER_BUILD_DATE")
                );
                return None;
            } else if arg == "--debug" {
                debug_mode = true;
            } else if let Some(path) = arg.strip_prefix("--config=") {
                config_path = Some(PathBuf::from(path));
            } else if let Some(val) = arg.strip_prefix("--timeout=") {
                match val.parse::<u64>() {
                    Ok(secs) => timeout_secs = Some(secs),
                    Err(_) => {
                        eprintln!("❌ Invalid timeout value: {}", val);
                        return None;
                    }
                }
            } else {
                eprintln!("❌ Unknown argument: {}", arg);
                print_help();
                return None;
            }
        }

        Some(Args {
            config_path,
            debug_mode,
            timeout_secs,
        })
    }
}

fn print_help() {
    println!("🧹 Screen Sweeper");
    println!();
    println!("Scans the capture area in four quadrants and clicks every target");
    println!("template match that is not covered by a hazard match.");
    println!("Press Enter (or Ctrl-C) to stop.");
    println!();
    println!("USAGE:");
    println!("    screen-sweeper [FLAGS]");
    println!();
    println!("FLAGS:");
    println!("    --config=PATH       Load settings from a JSON file (defaults otherwise)");
    println!("    --debug             Enable debug logging (RUST_LOG overrides)");
    println!("    --timeout=N         Stop automatically after N seconds");
    println!("    --help, -h          Show this help message");
    println!("    --version, -v       Show version information");
    println!();
    println!("EXAMPLES:");
    println!("    screen-sweeper");
    println!("    screen-sweeper --config=sweeper.json --debug");
    println!("    screen-sweeper --timeout=30");
}
