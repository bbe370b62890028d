//! CLI mode for drive-dl - command-line interface for downloading shared
//! Drive folders.

mod progress;

use std::path::{Path, PathBuf};

use indicatif::ProgressBar;

use crate::{
    AppConfig, Error, HttpFileFetcher, HttpPageFetcher, NoProgress, Orchestrator, RunProgress,
    TreeBuilder, build_http_client, folder_url, parse_folder_input, plan,
};

use progress::{make_run_progress_bar, print_plan, print_summary};

/// Parsed command-line options.
struct CliOptions {
    folder: String,
    output: Option<String>,
    quiet: bool,
    max_depth: Option<usize>,
}

fn invalid_input(message: String) -> Error {
    Error::Io(std::io::Error::new(
        std::io::ErrorKind::InvalidInput,
        message,
    ))
}

fn parse_args(args: &[String]) -> crate::Result<CliOptions> {
    let mut folder = None;
    let mut output = None;
    let mut quiet = false;
    let mut max_depth = None;

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "-o" | "--output" => {
                i += 1;
                let value = args
                    .get(i)
                    .ok_or_else(|| invalid_input("--output requires a value".to_string()))?;
                output = Some(value.clone());
            }
            "-q" | "--quiet" => quiet = true,
            "--max-depth" => {
                i += 1;
                let value = args
                    .get(i)
                    .ok_or_else(|| invalid_input("--max-depth requires a value".to_string()))?;
                let depth = value
                    .parse()
                    .map_err(|_| invalid_input(format!("invalid --max-depth value: {value}")))?;
                max_depth = Some(depth);
            }
            arg if arg.starts_with('-') => {
                return Err(invalid_input(format!("unknown option: {arg}")));
            }
            arg => {
                if folder.is_some() {
                    return Err(invalid_input(
                        "expected exactly one folder URL or id".to_string(),
                    ));
                }
                folder = Some(arg.to_string());
            }
        }
        i += 1;
    }

    let folder =
        folder.ok_or_else(|| invalid_input("no folder URL or id provided".to_string()))?;
    Ok(CliOptions {
        folder,
        output,
        quiet,
        max_depth,
    })
}

/// Expands a leading `~` to the user's home directory.
fn expand_home(path: &str) -> crate::Result<PathBuf> {
    if path.starts_with('~') {
        let home = dirs::home_dir()
            .ok_or_else(|| invalid_input("could not determine home directory".to_string()))?;
        return Ok(PathBuf::from(path.replacen(
            '~',
            home.to_string_lossy().as_ref(),
            1,
        )));
    }
    Ok(PathBuf::from(path))
}

/// Progress reporter that drives the action bar.
struct CliProgress {
    bar: ProgressBar,
}

impl RunProgress for CliProgress {
    fn on_mkdir(&self, path: &Path) {
        self.bar.set_message(path.display().to_string());
        self.bar.inc(1);
    }

    fn on_fetch_start(&self, _id: &str, path: &Path) {
        self.bar.set_message(path.display().to_string());
    }

    fn on_fetch_complete(&self, path: &Path, bytes: u64) {
        self.bar.println(format!(
            "  {} ({})",
            path.display(),
            crate::format_bytes(bytes)
        ));
        self.bar.inc(1);
    }

    fn on_error(&self, path: &Path, error: &str) {
        self.bar
            .println(format!("Download error at {}: {error}", path.display()));
    }
}

/// Runs the CLI download mode with the given arguments.
///
/// # Errors
///
/// Returns an error if the arguments are invalid, the folder cannot be
/// resolved, or any planned action fails.
pub async fn run(args: Vec<String>) -> crate::Result<()> {
    let options = parse_args(&args)?;
    let folder_id = parse_folder_input(&options.folder)
        .ok_or_else(|| invalid_input(format!("not a Drive folder URL or id: {}", options.folder)))?;

    let mut config = AppConfig::load()?;
    if let Some(depth) = options.max_depth {
        config.download.max_depth = depth;
    }
    if let Some(ref output) = options.output {
        config.paths.output_dir = expand_home(output)?;
    }

    let http = build_http_client()?;
    let builder = TreeBuilder::new(
        HttpPageFetcher::new(http.clone()),
        config.download.max_depth,
    );

    if !options.quiet {
        println!("Retrieving folder list...");
    }
    let tree = builder.build(&folder_url(&folder_id)).await?;
    if !options.quiet {
        println!(
            "Retrieving folder list completed ({} file(s) found).",
            tree.file_count()
        );
    }

    let root_path = config.paths.output_dir.join(&tree.name);
    let actions = plan(&tree, &root_path);
    if !options.quiet {
        print_plan(&actions);
    }

    let orchestrator = Orchestrator::new(HttpFileFetcher::new(http));
    let stats = if options.quiet {
        orchestrator.run(&actions, &NoProgress).await?
    } else {
        let bar = make_run_progress_bar(actions.len() as u64);
        let cli_progress = CliProgress { bar: bar.clone() };
        match orchestrator.run(&actions, &cli_progress).await {
            Ok(stats) => {
                bar.finish_and_clear();
                stats
            }
            Err(e) => {
                bar.abandon();
                eprintln!("Download ended unsuccessfully");
                return Err(e);
            }
        }
    };

    if !options.quiet {
        print_summary(&stats);
        println!("Download completed");
    }
    Ok(())
}
