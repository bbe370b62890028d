use std::env;

fn print_usage() {
    eprintln!("Usage: drive-dl [OPTIONS] <folder-url-or-id>");
    eprintln!();
    eprintln!("Downloads a shared Google Drive folder into a matching local tree.");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -o, --output <DIR>    Output directory (default: current directory)");
    eprintln!("  -q, --quiet           Suppress terminal output");
    eprintln!("      --max-depth <N>   Maximum folder nesting depth (default: 32)");
    eprintln!("  -h, --help            Show this help");
}

#[tokio::main]
async fn main() -> drive_dl::Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().skip(1).collect();
    if args.is_empty() {
        print_usage();
        std::process::exit(1);
    }
    if args.iter().any(|a| a == "-h" || a == "--help") {
        print_usage();
        std::process::exit(0);
    }

    #[cfg(feature = "cli")]
    {
        drive_dl::cli::run(args).await
    }
    #[cfg(not(feature = "cli"))]
    {
        let _ = args;
        eprintln!("CLI support not compiled in");
        std::process::exit(1);
    }
}
