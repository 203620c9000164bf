use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use studyplan_core::{
    calculate_progress, dated, generate_schedule, generate_suggestions, plan, week_start,
    DashboardMetrics, Priority, TaskKind, TimePreference,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod config;
mod export;
mod render;
mod state;

use config::{init_config, load_config, save_config};
use state::Store;

#[derive(Parser, Debug)]
#[command(name = "studyplan", version, about = "Weekly study planner for academic and extracurricular work")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write a default config.toml to the studyplan home
    Init,

    /// Add, list, complete or remove tasks
    Task {
        #[command(subcommand)]
        command: TaskCommand,
    },

    /// Show or change scheduling preferences
    Prefs {
        #[command(subcommand)]
        command: PrefsCommand,
    },

    /// Allocate open tasks into the week's study blocks
    Schedule {
        /// Any date in the target week (default: today)
        #[arg(long)]
        week_of: Option<NaiveDate>,

        /// Also write the schedule as CSV to this path
        #[arg(long)]
        csv: Option<PathBuf>,
    },

    /// Hours, balance and upcoming deadlines
    Progress {
        #[arg(long)]
        today: Option<NaiveDate>,
    },

    /// Balance, workload and deadline suggestions
    Suggest {
        #[arg(long)]
        today: Option<NaiveDate>,
    },

    /// Schedule, progress and suggestions in one report
    Plan {
        #[arg(long)]
        today: Option<NaiveDate>,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand, Debug)]
enum TaskCommand {
    /// Add a task
    Add {
        #[command(subcommand)]
        kind: AddKind,
    },

    /// List tasks, open and highest priority first
    List,

    /// Toggle a task's completion flag
    Done { id: String },

    /// Delete a task
    Rm { id: String },
}

#[derive(clap::Args, Debug)]
struct TaskFields {
    /// Task name
    name: String,

    /// Deadline (YYYY-MM-DD)
    #[arg(long)]
    due: NaiveDate,

    /// Estimated hours of work, at most 168
    #[arg(long, default_value_t = 1.0)]
    hours: f64,

    /// Priority 1 (low) to 5 (critical)
    #[arg(long, default_value_t = 3)]
    priority: u8,
}

#[derive(Subcommand, Debug)]
enum AddKind {
    /// Coursework tied to a subject
    Academic {
        #[command(flatten)]
        fields: TaskFields,

        #[arg(long)]
        subject: String,

        #[arg(long, default_value_t = 3)]
        credits: u32,
    },

    /// Clubs, sports, volunteering and the like
    Extracurricular {
        #[command(flatten)]
        fields: TaskFields,

        #[arg(long)]
        activity: String,
    },
}

#[derive(Subcommand, Debug)]
enum PrefsCommand {
    /// Print current preferences
    Show,

    /// Update one or more preferences
    Set {
        #[arg(long)]
        max_hours: Option<f64>,

        /// morning, afternoon, evening or night
        #[arg(long)]
        time: Option<TimePreference>,

        /// Annual extracurricular goal in hours
        #[arg(long)]
        target: Option<f64>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let store = Store::open()?;

    match cli.command {
        Command::Init => {
            init_config(&store)?;
        }

        Command::Task { command } => run_task(&store, command)?,

        Command::Prefs { command } => match command {
            PrefsCommand::Show => {
                let cfg = load_config(&store)?;
                print!("{}", toml::to_string_pretty(&cfg.preferences).context("serialize preferences")?);
                println!("# {}", cfg.preferences.preferred_study_time.label());
            }
            PrefsCommand::Set {
                max_hours,
                time,
                target,
            } => {
                let mut cfg = load_config(&store)?;
                if let Some(h) = max_hours {
                    cfg.preferences.max_study_hours_per_day = h;
                }
                if let Some(t) = time {
                    cfg.preferences.preferred_study_time = t;
                }
                if let Some(t) = target {
                    cfg.preferences.target_extracurricular_hours = t;
                }
                cfg.preferences.validate().context("invalid preferences")?;
                save_config(&store, &cfg)?;
                info!(path = %store.config_path().display(), "saved preferences");
                println!("Saved {}", store.config_path().display());
            }
        },

        Command::Schedule { week_of, csv } => {
            let cfg = load_config(&store)?;
            let tasks = store.load_tasks()?;
            let monday = week_start(week_of.unwrap_or_else(today));
            let schedule = dated(generate_schedule(tasks.as_slice(), &cfg.preferences), monday);

            print!("{}", render::schedule(&schedule, monday));
            if let Some(path) = csv {
                export::export_schedule_csv(&path, &schedule)?;
                println!("\nWrote {} blocks to {}", schedule.len(), path.display());
            }
        }

        Command::Progress { today: day } => {
            let cfg = load_config(&store)?;
            let tasks = store.load_tasks()?;
            let stats = calculate_progress(tasks.as_slice(), day.unwrap_or_else(today));
            let metrics = DashboardMetrics::from_stats(
                &stats,
                cfg.preferences.target_extracurricular_hours,
                cfg.display.target_progress,
            );
            print!("{}", render::progress(&stats, &metrics, cfg.display.upcoming_limit));
        }

        Command::Suggest { today: day } => {
            let cfg = load_config(&store)?;
            let tasks = store.load_tasks()?;
            let day = day.unwrap_or_else(today);
            let stats = calculate_progress(tasks.as_slice(), day);
            let out = generate_suggestions(tasks.as_slice(), &cfg.preferences, &stats, day);
            print!("{}", render::suggestions(&out));
        }

        Command::Plan { today: day, json } => {
            let cfg = load_config(&store)?;
            let tasks = store.load_tasks()?;
            let day = day.unwrap_or_else(today);
            let report = plan(tasks.as_slice(), &cfg.preferences, day);

            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                let metrics = DashboardMetrics::from_stats(
                    &report.stats,
                    cfg.preferences.target_extracurricular_hours,
                    cfg.display.target_progress,
                );
                let monday = week_start(day);
                print!("{}", render::schedule(&dated(report.schedule, monday), monday));
                println!();
                print!("{}", render::progress(&report.stats, &metrics, cfg.display.upcoming_limit));
                println!("\n# Suggestions\n");
                print!("{}", render::suggestions(&report.suggestions));
            }
        }
    }

    Ok(())
}

fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

fn run_task(store: &Store, command: TaskCommand) -> Result<()> {
    match command {
        TaskCommand::Add { kind } => {
            let (fields, kind) = match kind {
                AddKind::Academic {
                    fields,
                    subject,
                    credits,
                } => (fields, TaskKind::Academic { subject, credits }),
                AddKind::Extracurricular { fields, activity } => {
                    (fields, TaskKind::Extracurricular { activity })
                }
            };
            let priority = Priority::new(fields.priority)?;

            let mut tasks = store.load_tasks()?;
            let id = tasks
                .create(fields.name, kind, fields.hours, priority, fields.due)
                .context("invalid task")?;
            store.save_tasks(&tasks)?;
            println!("Added {id}");
        }

        TaskCommand::List => {
            print!("{}", render::task_list(&store.load_tasks()?));
        }

        TaskCommand::Done { id } => {
            let mut tasks = store.load_tasks()?;
            let Some(done) = tasks.toggle_completion(&id) else {
                bail!("no task with id {id} (see `studyplan task list`)");
            };
            store.save_tasks(&tasks)?;
            println!("{} {}", if done { "Completed" } else { "Reopened" }, id);
        }

        TaskCommand::Rm { id } => {
            let mut tasks = store.load_tasks()?;
            let Some(removed) = tasks.remove(&id) else {
                bail!("no task with id {id} (see `studyplan task list`)");
            };
            store.save_tasks(&tasks)?;
            println!("Removed {} ({})", removed.name, id);
        }
    }

    Ok(())
}
