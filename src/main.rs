use anyhow::{bail, Context, Result};
use clap::Parser;
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::Path;
use tracing::info;
use tracing_subscriber::EnvFilter;

use code_vocab::{
    default_file_name, render_export, sample_snapshot, Cli, Command, ExportFormat, JsonFileStore,
    Library, Menu, SilentSpeaker, Snapshot, SnapshotStore, Speaker, SystemSpeaker,
};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    let store = JsonFileStore::new(&cli.data_file);
    let opened = Library::open(store);
    let mut library = opened.library;
    if let Some(err) = opened.load_error {
        eprintln!("❌ {}", err);
        eprintln!("   Starting with an empty vocabulary and the default categories.");
    }

    match cli.command() {
        Command::Menu => run_menu(&cli, &mut library)?,
        #[cfg(feature = "tui")]
        Command::Tui => run_tui(&cli, &library)?,
        Command::Seed { force } => run_seed(&mut library, force)?,
        Command::Export { format, output } => run_export(&library, format, output.as_deref())?,
        Command::Import { path, yes } => run_import(&mut library, &path, yes)?,
        Command::Stats => run_stats(&library),
    }

    Ok(())
}

fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

fn speaker(cli: &Cli) -> Box<dyn Speaker> {
    if cli.no_speech {
        Box::new(SilentSpeaker)
    } else {
        Box::new(SystemSpeaker::detect(cli.speech_rate))
    }
}

fn run_menu(cli: &Cli, library: &mut Library<JsonFileStore>) -> Result<()> {
    info!("Starting menu with data file {:?}", library.backend().path());
    let speaker = speaker(cli);
    let stdin = io::stdin();
    let stdout = io::stdout();

    Menu::new(library, speaker.as_ref(), stdin.lock(), stdout.lock())
        .run()
        .context("Menu loop failed")
}

#[cfg(feature = "tui")]
fn run_tui(cli: &Cli, library: &Library<JsonFileStore>) -> Result<()> {
    println!("🖥️  Loading vocabulary browser...\n");
    let speaker = speaker(cli);

    let mut app = code_vocab::ui::App::new(library.store().clone());
    code_vocab::ui::run_ui(&mut app, speaker.as_ref())?;

    println!("\n✅ Browser closed");
    Ok(())
}

fn run_seed(library: &mut Library<JsonFileStore>, force: bool) -> Result<()> {
    if !library.is_empty() && !force {
        bail!(
            "{} already holds {} entries; pass --force to replace them",
            library.backend().describe(),
            library.len()
        );
    }

    let outcome = library.replace_with(sample_snapshot());
    if let Some(err) = outcome.save_error {
        bail!(err);
    }
    println!("✅ Wrote {} sample entries to {}", outcome.value, library.backend().describe());
    println!("🏷️  {} categories", library.store().category_count());
    Ok(())
}

fn run_export(
    library: &Library<JsonFileStore>,
    format: ExportFormat,
    output: Option<&Path>,
) -> Result<()> {
    let rendered = render_export(library.store(), format)?;
    let path = match output {
        Some(path) => path.to_path_buf(),
        None => default_file_name(format, chrono::Local::now().date_naive()).into(),
    };

    fs::write(&path, rendered).with_context(|| format!("Failed to write {:?}", path))?;
    println!("✅ Exported {} entries to {}", library.len(), path.display());
    Ok(())
}

fn run_import(library: &mut Library<JsonFileStore>, path: &Path, yes: bool) -> Result<()> {
    let text = fs::read_to_string(path).with_context(|| format!("Failed to read {:?}", path))?;
    let snapshot = Snapshot::from_import_json(&text)?;

    if !yes && !confirm(&format!(
        "Replace all {} entries with {} imported ones?",
        library.len(),
        snapshot.vocab_data.len()
    ))? {
        println!("❌ Cancelled");
        return Ok(());
    }

    let outcome = library.replace_with(snapshot);
    if let Some(err) = outcome.save_error {
        bail!(err);
    }
    println!("✅ Imported {} entries", outcome.value);
    Ok(())
}

fn run_stats(library: &Library<JsonFileStore>) {
    println!("📚 Entries: {}", library.len());
    println!("🏷️  Categories: {}", library.store().category_count());
    for (label, count) in library.list_categories() {
        println!("   {:<12} {}", label, count);
    }
}

fn confirm(prompt: &str) -> Result<bool> {
    print!("{} (y/N): ", prompt);
    io::stdout().flush()?;
    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(answer.trim().eq_ignore_ascii_case("y"))
}
