//! Tasker - Priority-driven local task tracker
//!
//! The command-line shell over the task store: parses input, drives the
//! core, renders results. No domain logic lives here.

use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;

use tasker::{query, stats, Priority, SortKey, Status, Task, TaskStore, TaskerError};

#[derive(Parser)]
#[command(name = "tasker")]
#[command(version = "0.1.0")]
#[command(about = "Priority-driven local task tracker", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Task data file
    #[arg(short, long, global = true, default_value = "tasks.json")]
    file: PathBuf,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a new task
    Add {
        /// Task title
        title: String,

        /// Longer description
        #[arg(short, long, default_value = "")]
        description: String,

        /// Priority: low, medium, high, or urgent
        #[arg(short, long, value_enum, default_value = "medium")]
        priority: Priority,

        /// Due date (YYYY-MM-DD)
        #[arg(long, value_name = "DATE")]
        due: Option<NaiveDate>,
    },

    /// List tasks (active ones by default, highest priority first)
    List {
        /// Only show tasks with this status
        #[arg(short, long, value_enum)]
        status: Option<Status>,

        /// Sort criterion
        #[arg(long, value_enum, default_value = "priority")]
        sort: SortKey,

        /// Include completed tasks
        #[arg(short, long)]
        all: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Change a task's status
    Status {
        /// Task id
        id: u64,

        /// New status: todo, in-progress, or done
        #[arg(value_enum)]
        status: Status,
    },

    /// Delete a task permanently
    Rm {
        /// Task id
        id: u64,
    },

    /// Show task statistics
    Stats {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose {
        "tasker=debug,info"
    } else {
        "tasker=info,warn"
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let now = Local::now().naive_local();
    let today = now.date();
    let mut store = TaskStore::open(&cli.file);

    match cli.command {
        Commands::Add {
            title,
            description,
            priority,
            due,
        } => {
            let task = store
                .create(title, description, priority, due, now)
                .unwrap_or_else(|e| fail(&e));
            println!(
                "{} Added task [{}]: '{}' ({} priority)",
                "OK".green().bold(),
                task.id,
                task.title,
                task.priority
            );
        }

        Commands::List {
            status,
            sort,
            all,
            json,
        } => {
            let view = if let Some(status) = status {
                query::sort_by(&query::filter_by_status(store.tasks(), Some(status)), sort)
            } else if all {
                query::sort_by(store.tasks(), sort)
            } else {
                query::active_view(store.tasks())
            };

            if json {
                println!("{}", serde_json::to_string_pretty(&view)?);
            } else if view.is_empty() {
                println!("No tasks found.");
            } else {
                for task in &view {
                    render_task(task, today);
                }
            }
        }

        Commands::Status { id, status } => {
            store
                .update_status(id, status, now)
                .unwrap_or_else(|e| fail(&e));
            let task = store.find(id).expect("task exists after status update");
            println!(
                "{} Task '{}' is now {}",
                "OK".green().bold(),
                task.title,
                task.status
            );
        }

        Commands::Rm { id } => {
            let removed = store.delete(id).unwrap_or_else(|e| fail(&e));
            println!("{} Deleted task '{}'", "OK".green().bold(), removed.title);
        }

        Commands::Stats { json } => {
            let summary = stats::compute(store.tasks(), today);
            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                render_stats(&summary);
            }
        }
    }

    Ok(())
}

/// Report a domain error and exit with its code.
fn fail(err: &TaskerError) -> ! {
    eprintln!("{} {}", "Error:".red().bold(), err);
    std::process::exit(err.exit_code());
}

fn render_task(task: &Task, today: NaiveDate) {
    let status_mark = match task.status {
        Status::Todo => "[ ]".normal(),
        Status::InProgress => "[~]".cyan(),
        Status::Done => "[x]".green(),
    };
    let priority_mark = match task.priority {
        Priority::Low => "low".green(),
        Priority::Medium => "medium".yellow(),
        Priority::High => "high".magenta(),
        Priority::Urgent => "urgent".red().bold(),
    };
    let due_flag = match query::due_state(task, today) {
        query::DueState::Overdue => " OVERDUE".red().bold(),
        query::DueState::DueToday => " DUE TODAY".yellow().bold(),
        query::DueState::None => "".normal(),
    };

    println!(
        "{status_mark} {priority_mark} [{}] {}{due_flag}",
        task.id, task.title
    );

    if !task.description.is_empty() {
        println!("        {}", task.description.dimmed());
    }
    if let Some(due) = task.due_date {
        println!("        due: {due}");
    }
    if let Some(completed) = task.completed_date {
        println!("        completed: {}", completed.format("%Y-%m-%d %H:%M"));
    }
}

fn render_stats(summary: &stats::TaskStats) {
    println!("{}", "Task statistics".bold());
    println!("  Total:       {}", summary.total);
    println!("  Todo:        {}", summary.todo);
    println!("  In progress: {}", summary.in_progress);
    println!("  Done:        {}", summary.done);

    if summary.overdue > 0 {
        println!("  Overdue:     {}", summary.overdue.to_string().red());
    }
    if summary.due_today > 0 {
        println!("  Due today:   {}", summary.due_today.to_string().yellow());
    }
    if summary.total > 0 {
        println!("  Completion:  {:.1}%", summary.completion_rate);
    }
}
