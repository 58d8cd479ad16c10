//! # sectionnav
//!
//! Read a markdown page with a navigation bar built from its sections.
//!
//! ## Usage
//!
//! Launch the interactive TUI:
//! ```sh
//! sectionnav README.md
//! ```
//!
//! Print the navigation entries:
//! ```sh
//! sectionnav --list README.md
//! ```

mod cli;

use clap::{CommandFactory, Parser as ClapParser};
use cli::Cli;
use color_eyre::Result;
use color_eyre::eyre::{WrapErr, bail};
use sectionnav::{App, Config, NavContainer, Page, build_navigation, parser};
use std::fs::File;
use std::io::{self, IsTerminal, Read};
use std::path::Path;
use std::time::Instant;

fn main() -> Result<()> {
    color_eyre::install()?;

    let args = Cli::parse();

    if let Some(shell) = args.completions {
        let mut command = Cli::command();
        let name = command.get_name().to_string();
        clap_complete::generate(shell, &mut command, name, &mut io::stdout());
        return Ok(());
    }

    init_logging(&args)?;

    let (config, config_warning) = Config::load();
    let settings = config.settings().with_overrides(&args.overrides());
    log::debug!("effective settings: {:?}", settings);

    let (filename, content) = read_input(&args)?;
    let page = parser::parse_markdown(&content, settings.section_level);

    if args.is_list_mode() {
        return print_entries(&page, args.json);
    }

    let mut app = App::new(page, filename, &config, &settings);
    if let Some(warning) = config_warning {
        app.notify(format!("⚠ config: {}", warning), Instant::now());
    }
    sectionnav::tui::launch(app)
}

/// The TUI owns the terminal, so logs only go to a file when asked for.
/// List mode logs to stderr.
fn init_logging(args: &Cli) -> Result<()> {
    if let Some(path) = &args.log_file {
        let file = File::create(path)
            .wrap_err_with(|| format!("could not create log file {}", path.display()))?;
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug"))
            .target(env_logger::Target::Pipe(Box::new(file)))
            .init();
    } else if args.is_list_mode() {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
            .init();
    }
    Ok(())
}

fn read_input(args: &Cli) -> Result<(String, String)> {
    let from_stdin = match args.file.as_deref() {
        Some(path) => path == Path::new("-"),
        None => !io::stdin().is_terminal(),
    };

    if from_stdin {
        if !args.is_list_mode() {
            bail!("reading from stdin needs --list or --json; pass a file to open the TUI");
        }
        let mut content = String::new();
        io::stdin()
            .read_to_string(&mut content)
            .wrap_err("could not read stdin")?;
        return Ok(("stdin".to_string(), content));
    }

    let Some(path) = args.file.as_deref() else {
        bail!("missing markdown file\n\nUsage: sectionnav [OPTIONS] <FILE>");
    };
    let content = std::fs::read_to_string(path)
        .wrap_err_with(|| format!("could not read {}", path.display()))?;
    let filename = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("page")
        .to_string();
    Ok((filename, content))
}

fn print_entries(page: &Page, json: bool) -> Result<()> {
    let mut nav = NavContainer::new();
    build_navigation(page, &mut nav);

    if json {
        let json = serde_json::to_string_pretty(nav.entries())?;
        println!("{}", json);
    } else {
        for entry in nav.entries() {
            println!("{}\t{}", entry.label, entry.target().unwrap_or(""));
        }
    }
    Ok(())
}
