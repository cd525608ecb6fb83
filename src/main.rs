//! paramgrid: a live-synced INI parameter editor, driven headlessly.
#![allow(clippy::multiple_crate_versions)]

use clap::{Parser, Subcommand};
use paramgrid::config::Config;
use paramgrid::document::Document;
use paramgrid::session::{FileSession, PollResult};
use paramgrid::state_store::StateSnapshot;
use serde_json::json;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use std::{fs, thread};

#[derive(Parser)]
#[command(name = "paramgrid")]
#[command(about = "Live grid editing for INI parameter files", long_about = None)]
struct Args {
    /// Override the state file location
    #[arg(long, global = true, value_name = "PATH")]
    state: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print a file's sections and parameters
    Show {
        /// File to display
        file: PathBuf,
        /// Emit the parsed document as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print a single parameter value
    Get {
        /// File to read
        file: PathBuf,
        /// Section containing the key
        section: String,
        /// Key to look up
        key: String,
    },
    /// Set a parameter value and write it through
    Set {
        /// File to edit
        file: PathBuf,
        /// Section containing the key
        section: String,
        /// Key to set
        key: String,
        /// New value text
        value: String,
    },
    /// Flip a toggle parameter between "1" and "0"
    Toggle {
        /// File to edit
        file: PathBuf,
        /// Section containing the key
        section: String,
        /// Key to flip
        key: String,
    },
    /// Move a section one slot up and save the new order
    MoveUp {
        /// File to edit
        file: PathBuf,
        /// Section to move
        section: String,
    },
    /// Move a section one slot down and save the new order
    MoveDown {
        /// File to edit
        file: PathBuf,
        /// Section to move
        section: String,
    },
    /// Poll files for external changes and report them
    Watch {
        /// Files to watch
        files: Vec<PathBuf>,
        /// Emit events as JSON lines instead of text
        #[arg(long)]
        json: bool,
    },
}

fn main() -> io::Result<()> {
    env_logger::init();
    let args = Args::parse();
    let cfg = Config::load();
    let state_path = args.state.unwrap_or_else(default_state_path);

    match args.command {
        Command::Show { file, json } => show(file, &state_path, json),
        Command::Get { file, section, key } => {
            let session = FileSession::open(file);
            match session.document().value(&section, &key) {
                Some(value) => println!("{value}"),
                None => eprintln!("No such parameter: [{section}] {key}"),
            }
            Ok(())
        }
        Command::Set {
            file,
            section,
            key,
            value,
        } => {
            let mut session = FileSession::open(file);
            session
                .apply_local_edit(&section, &key, &value)
                .map_err(io::Error::other)
        }
        Command::Toggle { file, section, key } => {
            let mut session = FileSession::open(file);
            let flipped = match session.document().value(&section, &key) {
                Some("1") => "0",
                _ => "1",
            };
            session
                .apply_local_edit(&section, &key, flipped)
                .map_err(io::Error::other)?;
            let shown = if flipped == "1" { "ON" } else { "OFF" };
            println!("[{section}] {key} {shown}");
            Ok(())
        }
        Command::MoveUp { file, section } => {
            let mut session = FileSession::open(file);
            let moved = session
                .move_section_up(&section)
                .map_err(io::Error::other)?;
            if !moved {
                eprintln!("Cannot move [{section}] up");
            }
            Ok(())
        }
        Command::MoveDown { file, section } => {
            let mut session = FileSession::open(file);
            let moved = session
                .move_section_down(&section)
                .map_err(io::Error::other)?;
            if !moved {
                eprintln!("Cannot move [{section}] down");
            }
            Ok(())
        }
        Command::Watch { files, json } => {
            if files.is_empty() {
                eprintln!("No files to watch");
                return Ok(());
            }
            watch(files, json, &state_path, &cfg)
        }
    }
}

/// State lives in the user's home directory unless overridden.
fn default_state_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".paramgrid")
        .join("state.json")
}

/// Opens a session and applies any section order saved for the file.
fn open_with_saved_order(file: PathBuf, snapshot: &StateSnapshot) -> FileSession {
    let mut session = FileSession::open(file);
    let key = session.path().display().to_string();
    if let Some(state) = snapshot.file_states.get(&key) {
        session.apply_saved_order(&state.order);
    }
    session
}

fn show(file: PathBuf, state_path: &Path, json: bool) -> io::Result<()> {
    let snapshot = StateSnapshot::load(state_path);
    let session = open_with_saved_order(file, &snapshot);
    if json {
        // Serializing the document directly keeps section and key order.
        let rendered =
            serde_json::to_string_pretty(session.document()).map_err(io::Error::other)?;
        println!("{rendered}");
    } else {
        print_document(session.document());
    }
    Ok(())
}

fn print_document(document: &Document) {
    for (section, params) in &document.sections {
        println!("[{section}]");
        for (key, value) in params {
            // "1"/"0" render as toggles, anything else as plain text.
            match value.as_str() {
                "1" => println!("  {key} ON"),
                "0" => println!("  {key} OFF"),
                _ => println!("  {key} = {value}"),
            }
        }
    }
}

/// Polls each file on its own cadence and reports what changed.
///
/// Small files poll at the fast interval, large files at the slow one, per
/// the loaded [`Config`]. Runs until interrupted.
fn watch(files: Vec<PathBuf>, json: bool, state_path: &Path, cfg: &Config) -> io::Result<()> {
    let mut snapshot = StateSnapshot::load(state_path);
    let mut sessions: Vec<FileSession> = files
        .into_iter()
        .map(|file| open_with_saved_order(file, &snapshot))
        .collect();

    // Record the watched set the way the windowed editor records open tabs.
    snapshot.files = sessions
        .iter()
        .map(|session| session.path().display().to_string())
        .collect();
    snapshot.save(state_path);

    let mut deadlines: Vec<Instant> = vec![Instant::now(); sessions.len()];
    let mut missing: Vec<bool> = vec![false; sessions.len()];

    loop {
        let now = Instant::now();
        for (index, session) in sessions.iter_mut().enumerate() {
            if deadlines[index] > now {
                continue;
            }
            let result = session.poll_once();
            report(session.path(), &result, &mut missing[index], json);

            let size = fs::metadata(session.path()).map_or(0, |meta| meta.len());
            deadlines[index] = now + cfg.poll_interval(size);
        }
        thread::sleep(Duration::from_millis(100));
    }
}

fn report(path: &Path, result: &PollResult, missing: &mut bool, json: bool) {
    match result {
        PollResult::NoChange => {}
        PollResult::FileMissing => {
            // Report the disappearance once, not on every tick.
            if !*missing {
                *missing = true;
                if json {
                    let event = json!({"file": path.display().to_string(), "event": "missing"});
                    println!("{event}");
                } else {
                    println!("{}: file missing", path.display());
                }
            }
        }
        PollResult::Updated(updates) => {
            *missing = false;
            if json {
                let event = json!({
                    "file": path.display().to_string(),
                    "event": "updated",
                    "updates": updates,
                });
                println!("{event}");
            } else {
                for update in updates {
                    println!(
                        "{}: [{}] {} = {}",
                        path.display(),
                        update.section,
                        update.key,
                        update.value
                    );
                }
            }
        }
        PollResult::Rebuilt(document) => {
            *missing = false;
            if json {
                let event = json!({
                    "file": path.display().to_string(),
                    "event": "rebuilt",
                    "sections": document.section_names().collect::<Vec<_>>(),
                });
                println!("{event}");
            } else {
                println!(
                    "{}: structure changed, reloaded {} section(s)",
                    path.display(),
                    document.sections.len()
                );
            }
        }
    }
}
