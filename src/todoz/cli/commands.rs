//! Command selection and context wiring. Every handler calls one API method
//! and hands the `CmdResult` to `print.rs`.

use super::print::{print_messages, print_todos, print_todos_yaml};
use super::setup::{Cli, Commands};
use chrono::{DateTime, Utc};
use clap::Parser;
use todoz::api::{CmdResult, TodosApi};
use todoz::error::Result;
use todoz::init::{initialize, Overrides};
use todoz::model::{StatusFilter, TodoUpdate};
use todoz::store::fs::FileStorage;

struct AppContext {
    api: TodosApi<FileStorage>,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let mut ctx = init_context(&cli)?;

    let command = cli.command.unwrap_or(Commands::List {
        status: StatusFilter::All,
    });

    match command {
        Commands::Add { description, due } => handle_add(&mut ctx, description.join(" "), due),
        Commands::Get { id } => {
            let result = ctx.api.get_todo(id)?;
            print_todos_yaml(&result.listed_todos)
        }
        Commands::List { status } => handle_listing(ctx.api.list_todos(status)?),
        Commands::DueToday => handle_listing(ctx.api.list_due_today()?),
        Commands::DueWeek => handle_listing(ctx.api.list_due_this_week()?),
        Commands::DueBy { date } => handle_listing(ctx.api.list_due_by(date)?),
        Commands::Overdue => handle_listing(ctx.api.list_overdue()?),
        Commands::Recent => {
            let result = ctx.api.most_recently_modified()?;
            print_todos_yaml(&result.listed_todos)?;
            print_messages(&result.messages);
            Ok(())
        }
        Commands::Done { id } => handle_change(ctx.api.mark_done(id)?),
        Commands::Undo { id } => handle_change(ctx.api.mark_pending(id)?),
        Commands::Update {
            id,
            description,
            due,
            clear_due,
        } => {
            let update = build_update(description, due, clear_due);
            handle_change(ctx.api.update_todo(id, &update)?)
        }
        Commands::Move { from, to } => handle_change(ctx.api.move_todo(from, to)?),
        Commands::Delete { id } => handle_change(ctx.api.delete_todo(id)?),
        Commands::Clear { status } => handle_change(ctx.api.clear_todos(status)?),
        Commands::Renumber => {
            let result = ctx.api.renumber_todos()?;
            print_todos(&result.affected_todos);
            print_messages(&result.messages);
            Ok(())
        }
        Commands::Path => {
            println!("{}", ctx.api.todos().storage().path().display());
            Ok(())
        }
    }
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let ctx = initialize(Overrides {
        base_dir: cli.base_dir.clone(),
        log_dir: cli.log_dir.clone(),
        verbose: cli.verbose,
    })?;
    Ok(AppContext { api: ctx.api })
}

fn build_update(
    description: Option<String>,
    due: Option<DateTime<Utc>>,
    clear_due: bool,
) -> TodoUpdate {
    let mut update = TodoUpdate {
        description,
        ..TodoUpdate::default()
    };
    if clear_due {
        update = update.clear_due();
    } else if let Some(due) = due {
        update = update.due(due);
    }
    update
}

fn handle_add(
    ctx: &mut AppContext,
    description: String,
    due: Option<DateTime<Utc>>,
) -> Result<()> {
    let result = ctx.api.add_todo(&description, due)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_listing(result: CmdResult) -> Result<()> {
    print_todos(&result.listed_todos);
    print_messages(&result.messages);
    Ok(())
}

fn handle_change(result: CmdResult) -> Result<()> {
    print_messages(&result.messages);
    Ok(())
}
