use anyhow::Context;
use colored::Colorize;
use tracing::{debug, info};

use todo_server::{ServerConfig, TodoServer};
use todo_sql::DatabasePersistence;
use todo_store::TodoStore;
use todo_types::{validate_list_name, validate_list_rename, validate_todo_name, TodoList};
use todo_view::{ListSummary, ListView};

use crate::cli::*;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let path = cli.db_path();
    let open = || {
        debug!(path = %path.display(), "opening database");
        DatabasePersistence::open(&path)
            .with_context(|| format!("opening database {}", path.display()))
    };
    let format = cli.format;
    match cli.command {
        Command::Serve(args) => cmd_serve(args, cli.db),
        Command::Lists => cmd_lists(&open()?, &format),
        Command::Create(args) => cmd_create(&open()?, args),
        Command::Rename(args) => cmd_rename(&open()?, args),
        Command::Delete(args) => {
            open()?.delete_list(args.list)?;
            println!("{} Deleted list {}.", "✓".green(), args.list.to_string().yellow());
            Ok(())
        }
        Command::Show(args) => cmd_show(&open()?, args, &format),
        Command::Add(args) => cmd_add(&open()?, args),
        Command::Done(args) => {
            open()?.update_todo_status(args.list, args.todo, !args.undo)?;
            let state = if args.undo { "open".yellow() } else { "done".green() };
            println!("{} Todo {} is {}.", "✓".green(), args.todo, state);
            Ok(())
        }
        Command::Rm(args) => {
            open()?.delete_todo(args.list, args.todo)?;
            println!("{} Removed todo {}.", "✓".green(), args.todo);
            Ok(())
        }
        Command::CompleteAll(args) => {
            open()?.mark_all_completed(args.list)?;
            println!("{} All todos have been completed.", "✓".green().bold());
            Ok(())
        }
    }
}

fn cmd_serve(args: ServeArgs, db: Option<std::path::PathBuf>) -> anyhow::Result<()> {
    let mut config = match &args.config {
        Some(path) => ServerConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => ServerConfig::default(),
    };
    if let Some(bind) = args.bind {
        config.bind_addr = bind;
    }
    if let Some(storage) = args.storage {
        config.storage = storage;
    }
    if let Some(db) = db {
        config.database_path = db;
    }

    println!(
        "Todo server on {} ({} storage)",
        config.bind_addr.to_string().bold(),
        config.storage
    );
    info!(config = ?args.config, storage = %config.storage, "starting server");
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(TodoServer::new(config).serve())?;
    Ok(())
}

fn cmd_lists(store: &dyn TodoStore, format: &OutputFormat) -> anyhow::Result<()> {
    let summaries = ListSummary::ordered(&store.all_lists()?);
    if *format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&summaries)?);
        return Ok(());
    }
    if summaries.is_empty() {
        println!("No lists yet.");
        return Ok(());
    }
    for s in &summaries {
        let id = format!("#{}", s.id).yellow();
        if s.complete {
            println!("{} {} {}", id, s.name.dimmed().strikethrough(), "✓".green());
        } else {
            println!("{} {} {}/{}", id, s.name.bold(), s.remaining_count, s.todos_count);
        }
    }
    Ok(())
}

fn cmd_create(store: &dyn TodoStore, args: CreateArgs) -> anyhow::Result<()> {
    let name = validate_list_name(&args.name, &store.all_lists()?)?;
    let id = store.create_list(&name)?;
    println!("{} The list has been created. ({})", "✓".green().bold(), format!("#{id}").yellow());
    Ok(())
}

fn cmd_rename(store: &dyn TodoStore, args: RenameArgs) -> anyhow::Result<()> {
    store.load_list(args.list)?;
    let name = validate_list_rename(&args.name, args.list, &store.all_lists()?)?;
    store.rename_list(args.list, &name)?;
    println!("{} The list has been updated.", "✓".green().bold());
    Ok(())
}

fn cmd_show(store: &dyn TodoStore, args: ListArgs, format: &OutputFormat) -> anyhow::Result<()> {
    let view = ListView::of(&store.load_list(args.list)?);
    if *format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&view)?);
        return Ok(());
    }
    print_view(&view);
    Ok(())
}

fn print_view(view: &ListView) {
    let title = if view.complete { view.name.green().bold() } else { view.name.bold() };
    println!(
        "{} {} ({}/{} remaining)",
        format!("#{}", view.id).yellow(),
        title,
        view.remaining_count,
        view.todos_count
    );
    for todo in &view.todos {
        if todo.completed {
            println!("  {} {} {}", "[x]".green(), todo.id.to_string().dimmed(), todo.name.dimmed());
        } else {
            println!("  [ ] {} {}", todo.id.to_string().dimmed(), todo.name);
        }
    }
}

fn cmd_add(store: &dyn TodoStore, args: AddArgs) -> anyhow::Result<()> {
    let list: TodoList = store.load_list(args.list)?;
    let name = validate_todo_name(&args.name)?;
    let id = store.create_todo(list.id, &name)?;
    println!("{} The todo was added. ({})", "✓".green().bold(), format!("#{id}").yellow());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use todo_types::ListId;

    fn run(db: &std::path::Path, args: &[&str]) -> anyhow::Result<()> {
        let db = db.to_str().unwrap();
        let mut argv = vec!["todos", "--db", db];
        argv.extend_from_slice(args);
        run_command(Cli::try_parse_from(argv).unwrap())
    }

    #[test]
    fn commands_operate_on_the_database() {
        let dir = tempfile::tempdir().unwrap();
        let db = dir.path().join("todos.db");

        run(&db, &["create", "Groceries"]).unwrap();
        run(&db, &["add", "1", "Milk"]).unwrap();
        run(&db, &["add", "1", "Eggs"]).unwrap();
        run(&db, &["done", "1", "1"]).unwrap();
        run(&db, &["lists"]).unwrap();
        run(&db, &["show", "1"]).unwrap();

        let store = DatabasePersistence::open(&db).unwrap();
        let list = store.load_list(ListId::new(1)).unwrap();
        assert_eq!(list.name, "Groceries");
        assert_eq!(list.todos.len(), 2);
        assert_eq!(todo_view::remaining_count(&list), 1);
    }

    #[test]
    fn validation_and_missing_ids_fail() {
        let dir = tempfile::tempdir().unwrap();
        let db = dir.path().join("todos.db");

        run(&db, &["create", "Chores"]).unwrap();
        let dup = run(&db, &["create", "Chores"]).unwrap_err();
        assert_eq!(dup.to_string(), "List name must be unique.");

        assert!(run(&db, &["add", "9", "Dishes"]).is_err());
        assert!(run(&db, &["rm", "1", "5"]).is_err());
        assert!(run(&db, &["rename", "1", "   "]).is_err());
    }

    #[test]
    fn complete_all_and_delete() {
        let dir = tempfile::tempdir().unwrap();
        let db = dir.path().join("todos.db");

        run(&db, &["create", "Chores"]).unwrap();
        run(&db, &["add", "1", "Dishes"]).unwrap();
        run(&db, &["complete-all", "1"]).unwrap();
        run(&db, &["--format", "json", "show", "1"]).unwrap();

        let store = DatabasePersistence::open(&db).unwrap();
        assert!(todo_view::is_list_complete(&store.load_list(ListId::new(1)).unwrap()));
        drop(store);

        run(&db, &["delete", "1"]).unwrap();
        let store = DatabasePersistence::open(&db).unwrap();
        assert!(store.all_lists().unwrap().is_empty());
    }

    #[derive(Clone, Default)]
    struct LogBuffer(std::sync::Arc<std::sync::Mutex<Vec<u8>>>);

    impl std::io::Write for LogBuffer {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn opening_the_database_is_logged() {
        let dir = tempfile::tempdir().unwrap();
        let db = dir.path().join("todos.db");
        let buffer = LogBuffer::default();
        let writer = buffer.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();

        tracing::subscriber::with_default(subscriber, || run(&db, &["lists"])).unwrap();

        let bytes = buffer.0.lock().unwrap().clone();
        let logs = String::from_utf8_lossy(&bytes);
        assert!(logs.contains("opening database"), "{logs}");
        assert!(logs.contains("todos.db"), "{logs}");
    }
}
