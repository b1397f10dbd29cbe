//! `trucks` - CLI for truck-inventory
//!
//! This binary lists, adds, edits and deletes trucks in the local inventory
//! database.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use anyhow::{bail, Context};
use clap::Parser;

use truck_inventory::cli::render::{render, render_field_errors};
use truck_inventory::cli::{
    AddCommand, CheckIdCommand, Cli, Command, ConfigCommand, DeleteCommand, EditCommand,
    ImportCommand, ListCommand,
};
use truck_inventory::{
    init_logging, Collection, Config, DeleteConfirmation, Error, FormSession, Notice,
    RecordStore, SqliteSlots,
};

type Store = RecordStore<SqliteSlots>;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbosity());

    let config = Config::load_from(cli.config.clone()).context("loading configuration")?;

    match cli.command {
        Command::List(cmd) => handle_list(&open_store(&config)?, &config, &cmd),
        Command::Add(cmd) => handle_add(&mut open_store(&config)?, cmd),
        Command::Edit(cmd) => handle_edit(&mut open_store(&config)?, cmd),
        Command::Delete(cmd) => {
            handle_delete(&mut open_store(&config)?, &cmd);
            Ok(())
        }
        Command::CheckId(cmd) => {
            handle_check_id(&open_store(&config)?, &cmd);
            Ok(())
        }
        Command::Export => {
            println!("{}", open_store(&config)?.serialize()?);
            Ok(())
        }
        Command::Import(cmd) => handle_import(&mut open_store(&config)?, &cmd),
        Command::Config(cmd) => handle_config(&config, cmd),
    }
}

fn open_store(config: &Config) -> anyhow::Result<Store> {
    let path = config.database_path();
    let slots = SqliteSlots::open(&path)
        .with_context(|| format!("opening inventory database {}", path.display()))?;
    Ok(RecordStore::open(slots, config.storage.slot_key.as_str()))
}

fn handle_list(store: &Store, config: &Config, cmd: &ListCommand) -> anyhow::Result<()> {
    let format = cmd.format.unwrap_or(config.display.format);
    println!("{}", render(store.collection(), format)?);
    Ok(())
}

/// Print the outcome of a submit. Validation failures list every field.
fn report_submit(result: truck_inventory::Result<Notice>) -> anyhow::Result<()> {
    match result {
        Ok(notice) => {
            println!("{notice}");
            Ok(())
        }
        Err(Error::Validation(errors)) => {
            eprintln!("{}", render_field_errors(&errors));
            bail!("truck not saved");
        }
        Err(Error::NotFound { id }) => {
            println!("{}", Notice::Missing(id));
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

fn handle_add(store: &mut Store, cmd: AddCommand) -> anyhow::Result<()> {
    let mut session = FormSession::new();
    let mut form = session.open_create();
    form.id = cmd.id;
    form.make = cmd.make.map(Into::into);
    form.is_available = cmd.available;
    if let Some(date) = cmd.purchase_date {
        form.purchase_date = Some(date);
    }
    report_submit(session.submit(store, &form))
}

fn handle_edit(store: &mut Store, cmd: EditCommand) -> anyhow::Result<()> {
    let mut session = FormSession::new();
    let mut form = match session.open_edit(store, &cmd.target) {
        Ok(form) => form,
        Err(e) if e.is_not_found() => {
            println!("{}", Notice::Missing(cmd.target));
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    if let Some(id) = cmd.id {
        form.id = id;
    }
    if let Some(make) = cmd.make {
        form.make = Some(make.into());
    }
    if let Some(available) = cmd.available {
        form.is_available = available;
    }
    if let Some(date) = cmd.purchase_date {
        form.purchase_date = Some(date);
    }
    report_submit(session.submit(store, &form))
}

fn handle_delete(store: &mut Store, cmd: &DeleteCommand) {
    let mut confirmation = DeleteConfirmation::new();
    confirmation.request(cmd.id.as_str());

    if !cmd.yes {
        if let Some(prompt) = confirmation.prompt() {
            println!("{prompt}");
        }
        println!("Use --yes to confirm.");
        confirmation.dismiss();
        return;
    }

    if let Some(notice) = confirmation.confirm(store) {
        println!("{notice}");
    }
}

fn handle_check_id(store: &Store, cmd: &CheckIdCommand) {
    let mut session = FormSession::new();
    match &cmd.editing {
        Some(current) => {
            if session.open_edit(store, current).is_err() {
                println!("{}", Notice::Missing(current.clone()));
                return;
            }
        }
        None => {
            session.open_create();
        }
    }

    match session.check_id(store, &cmd.id) {
        Ok(id) => println!("{id} is available."),
        Err(e) => println!("{e}"),
    }
}

fn handle_import(store: &mut Store, cmd: &ImportCommand) -> anyhow::Result<()> {
    let raw = std::fs::read_to_string(&cmd.file)
        .with_context(|| format!("reading {}", cmd.file.display()))?;
    let collection = Collection::deserialize(&raw)
        .with_context(|| format!("parsing {}", cmd.file.display()))?;

    if !cmd.yes {
        println!(
            "This will replace {} stored trucks with {} from {}.",
            store.len(),
            collection.len(),
            cmd.file.display()
        );
        println!("Use --yes to confirm.");
        return Ok(());
    }

    let count = collection.len();
    store.replace_all(collection);
    println!("Imported {count} trucks.");
    Ok(())
}

fn handle_config(config: &Config, cmd: ConfigCommand) -> anyhow::Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Storage]");
                println!("  Database path:      {}", config.database_path().display());
                println!("  Slot key:           {}", config.storage.slot_key);
                println!();
                println!("[Display]");
                println!("  Format:             {:?}", config.display.format);
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => {
            let path = file.unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            match Config::load_from(Some(path)) {
                Ok(_) => println!("Configuration is valid."),
                Err(e) => println!("Configuration error: {e}"),
            }
        }
    }
    Ok(())
}
