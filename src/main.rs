use clap::Parser;
use gptref::application::init::init;
use gptref::application::{
    export_to_file, import_from_file, read_snapshot_file, ConfigService, EntryStore, StoreEvent,
};
use gptref::cli::output::sanitize;
use gptref::cli::{format_entry_list, format_selected, Cli, Commands};
use gptref::domain::EntryId;
use gptref::error::GptRefError;
use gptref::infrastructure::{FileStorage, Workspace};
use gptref::logging::init_logging;
use log::debug;
use std::sync::mpsc::Receiver;

fn main() {
    let cli = Cli::parse();

    let logger = match init_logging(cli.verbose) {
        Ok(handle) => Some(handle),
        Err(e) => {
            eprintln!("Warning: {}", e);
            None
        }
    };

    let code = match run(cli) {
        Ok(_) => 0,
        Err(e) => {
            eprintln!("Error: {}", e.display_with_suggestions());
            e.exit_code()
        }
    };

    drop(logger);
    std::process::exit(code);
}

fn open_store() -> Result<EntryStore<FileStorage>, GptRefError> {
    let workspace = Workspace::discover()?;
    let config = workspace.load_config()?;
    debug!(
        "event=workspace_open root={} entries_key={}",
        workspace.root().display(),
        config.entries_key
    );
    Ok(EntryStore::open(workspace.storage(), config.storage_keys()))
}

fn drain_events(events: &Receiver<StoreEvent>) {
    for event in events.try_iter() {
        debug!("event=store_changed change={:?}", event);
    }
}

fn run(cli: Cli) -> Result<(), GptRefError> {
    match cli.command {
        Commands::Init { path } => {
            init(&path)?;
            println!("Initialized gptref workspace at {}", path.display());
            Ok(())
        }
        Commands::Config { key, value, list } => {
            let service = ConfigService::new(Workspace::discover()?);

            if list {
                let config = service.list()?;
                println!("entries_key = {}", config.entries_key);
                println!("selected_key = {}", config.selected_key);
                println!("created = {}", config.created.to_rfc3339());
                Ok(())
            } else if let Some(k) = key {
                if let Some(v) = value {
                    service.set(&k, &v)?;
                    println!("Set {} = {}", k, v.trim());
                } else {
                    println!("{}", service.get(&k)?);
                }
                Ok(())
            } else {
                println!("Usage: gptref config [--list | <key> [<value>]]");
                println!("Valid keys: entries_key, selected_key, created");
                Ok(())
            }
        }
        Commands::Add {
            name,
            reference,
            description,
        } => with_store(|store| {
            let entry = store.add(&name, &reference, &description)?;
            println!("Added {} ({})", sanitize(&entry.name), entry.id);
            Ok(())
        }),
        Commands::List => with_store(|store| {
            println!("{}", format_entry_list(&store.view()).trim_end());
            Ok(())
        }),
        Commands::Show => with_store(|store| {
            println!("{}", format_selected(&store.view()).trim_end());
            Ok(())
        }),
        Commands::Select { id } => with_store(|store| {
            let id = EntryId::from(id.trim());
            store.select(&id)?;
            if let Some(entry) = store.selected() {
                println!("Selected {}", sanitize(&entry.name));
            }
            Ok(())
        }),
        Commands::Remove { id } => with_store(|store| {
            let id = EntryId::from(id.trim());
            match store.remove(&id)? {
                Some(entry) => println!("Removed {}", sanitize(&entry.name)),
                None => println!(
                    "No entry with id '{}'; nothing removed",
                    sanitize(id.as_str())
                ),
            }
            Ok(())
        }),
        Commands::Export { output } => with_store(|store| {
            let path = export_to_file(store, &output)?;
            println!(
                "Exported {} reference(s) to {}",
                store.len(),
                path.display()
            );
            Ok(())
        }),
        Commands::Import { file, check: true } => {
            let snapshot = read_snapshot_file(&file)?;
            println!(
                "{} is a valid export with {} reference(s)",
                file.display(),
                snapshot.entries.len()
            );
            Ok(())
        }
        Commands::Import { file, check: false } => with_store(|store| {
            let count = import_from_file(store, &file)?;
            println!("Imported {} reference(s)", count);
            Ok(())
        }),
    }
}

/// Open the workspace store, run `f` against it and log the resulting changes
fn with_store<F>(f: F) -> Result<(), GptRefError>
where
    F: FnOnce(&mut EntryStore<FileStorage>) -> Result<(), GptRefError>,
{
    let mut store = open_store()?;
    let events = store.subscribe();
    let result = f(&mut store);
    drain_events(&events);
    result
}
