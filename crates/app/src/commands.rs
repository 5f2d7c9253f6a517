//! Command execution
//!
//! Configuration changes go straight to the database. Everything touching
//! the launch history goes through the history service, which persists the
//! history when the command finishes.

use relaunch_core::{
    ConfigRef, Error, HistoryEntry, HistoryHandle, HistoryService, LaunchConfiguration,
    LaunchEvent, LaunchMode, Result,
};
use tracing::{info, warn};

use crate::cli::{AddArgs, Command, RecordArgs, RenameArgs};
use crate::state::AppState;

/// Work left for the history service once the database step is done
enum HistoryWork {
    Record(LaunchEvent),
    Forget(ConfigRef),
    List(Vec<LaunchMode>),
    Last,
}

fn add_configuration(state: &AppState, add: &AddArgs) -> Result<()> {
    let mut configuration = LaunchConfiguration::new(&add.memento, &add.name, add.modes());
    configuration.private = add.private;
    configuration.transient = add.transient;
    state.db.configurations().save(&configuration)?;
    println!("Added {} ({})", configuration.name, configuration.memento);
    Ok(())
}

/// Labels already in the history keep the name they were recorded with
fn rename_configuration(state: &AppState, rename: &RenameArgs) -> Result<()> {
    let reference = ConfigRef::new(&rename.memento);
    if !state.db.configurations().rename(&reference, &rename.name)? {
        return Err(Error::NotFound(format!("launch configuration {reference}")));
    }
    println!("Renamed {reference} to {}", rename.name);
    Ok(())
}

fn launch_event(state: &AppState, record: &RecordArgs) -> Result<LaunchEvent> {
    let reference = ConfigRef::new(&record.memento);
    let label = match &record.label {
        Some(label) => label.clone(),
        None => state
            .db
            .configurations()
            .get(&reference)?
            .map(|c| c.name)
            .unwrap_or_else(|| record.memento.clone()),
    };
    Ok(LaunchEvent::new(reference, record.mode, label))
}

fn print_configurations(state: &AppState) -> Result<()> {
    for config in state.db.configurations().list()? {
        let modes: Vec<_> = config.modes.iter().map(LaunchMode::as_str).collect();
        let mut flags = Vec::new();
        if config.private {
            flags.push("private");
        }
        if config.transient {
            flags.push("transient");
        }
        println!(
            "{}\t{}\t{}\t{}",
            config.memento,
            config.name,
            modes.join(","),
            flags.join(",")
        );
    }
    Ok(())
}

fn print_entry(index: usize, entry: &HistoryEntry) {
    println!("  {}. {} ({})", index + 1, entry.label, entry.configuration);
}

async fn run_history(handle: &HistoryHandle, work: HistoryWork) -> Result<()> {
    match work {
        HistoryWork::Record(event) => {
            let memento = event.configuration.clone();
            let mode = event.mode;
            if handle.record(event).await? {
                info!(%memento, %mode, "Recorded launch");
                println!("Recorded {mode} launch of {memento}");
            } else {
                warn!(%memento, %mode, "Launch not eligible for history");
                println!("Ignored {mode} launch of {memento}");
            }
        }
        HistoryWork::Forget(reference) => {
            handle.configuration_removed(reference.clone()).await?;
            println!("Removed {reference}");
        }
        HistoryWork::List(modes) => {
            for mode in modes {
                println!("{mode}:");
                for (index, entry) in handle.history(mode).await?.iter().enumerate() {
                    print_entry(index, entry);
                }
            }
        }
        HistoryWork::Last => match handle.most_recent().await? {
            Some(entry) => println!("{} ({}, {})", entry.label, entry.configuration, entry.mode),
            None => println!("No launches yet"),
        },
    }
    Ok(())
}

/// Run one command against the application state
pub async fn execute(state: AppState, command: Command) -> Result<()> {
    let work = match command {
        Command::Add(add) => return add_configuration(&state, &add),
        Command::Rename(rename) => return rename_configuration(&state, &rename),
        Command::Configs(_) => return print_configurations(&state),
        Command::Remove(remove) => {
            let reference = ConfigRef::new(remove.memento);
            if !state.db.configurations().delete(&reference)? {
                return Err(Error::NotFound(format!("launch configuration {reference}")));
            }
            HistoryWork::Forget(reference)
        }
        Command::Record(record) => HistoryWork::Record(launch_event(&state, &record)?),
        Command::List(list) => HistoryWork::List(match list.mode {
            Some(mode) => vec![mode],
            None => vec![LaunchMode::Run, LaunchMode::Debug],
        }),
        Command::Last(_) => HistoryWork::Last,
    };

    let AppState { db, history_file } = state;
    let (handle, worker) = HistoryService::restore(db, history_file).spawn();

    let result = run_history(&handle, work).await;
    let persisted = handle.shutdown().await;
    if let Err(e) = worker.await {
        warn!(error = %e, "History worker did not finish cleanly");
    }

    result.and(persisted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use relaunch_core::Settings;

    fn settings(dir: &std::path::Path) -> Settings {
        Settings {
            state_dir: Some(dir.to_path_buf()),
            ..Settings::default()
        }
    }

    async fn run(dir: &std::path::Path, args: &[&str]) -> Result<()> {
        let args = <crate::cli::Args as argh::FromArgs>::from_args(&["relaunch"], args)
            .expect("valid arguments");
        execute(AppState::new(&settings(dir))?, args.command).await
    }

    #[tokio::test]
    async fn test_history_survives_between_commands() {
        let dir = tempfile::tempdir().unwrap();
        run(dir.path(), &["add", "app", "App"]).await.unwrap();
        run(dir.path(), &["record", "app", "run"]).await.unwrap();

        let history = settings(dir.path())
            .history_file()
            .unwrap()
            .load()
            .unwrap()
            .unwrap();
        let run_history = history.history(LaunchMode::Run);
        assert_eq!(run_history.len(), 1);
        assert_eq!(run_history[0].label, "App");
        assert_eq!(history.most_recent(), Some(&run_history[0]));
    }

    #[tokio::test]
    async fn test_remove_forgets_launches() {
        let dir = tempfile::tempdir().unwrap();
        run(dir.path(), &["add", "app", "App"]).await.unwrap();
        run(dir.path(), &["record", "app", "debug"]).await.unwrap();
        run(dir.path(), &["remove", "app"]).await.unwrap();

        let history = settings(dir.path())
            .history_file()
            .unwrap()
            .load()
            .unwrap()
            .unwrap();
        assert!(history.is_empty());
    }

    #[tokio::test]
    async fn test_remove_unknown_configuration() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            run(dir.path(), &["remove", "nope"]).await,
            Err(Error::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_rename_keeps_recorded_labels() {
        let dir = tempfile::tempdir().unwrap();
        run(dir.path(), &["add", "app", "App"]).await.unwrap();
        run(dir.path(), &["record", "app", "run"]).await.unwrap();
        run(dir.path(), &["rename", "app", "App (server)"]).await.unwrap();

        let state = AppState::new(&settings(dir.path())).unwrap();
        let renamed = state
            .db
            .configurations()
            .get(&ConfigRef::from("app"))
            .unwrap()
            .unwrap();
        assert_eq!(renamed.name, "App (server)");

        let history = state.history_file.load().unwrap().unwrap();
        assert_eq!(history.history(LaunchMode::Run)[0].label, "App");
        assert_eq!(history.most_recent().unwrap().label, "App");
    }

    #[tokio::test]
    async fn test_rename_unknown_configuration() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            run(dir.path(), &["rename", "nope", "Nope"]).await,
            Err(Error::NotFound(_))
        ));
    }
}
