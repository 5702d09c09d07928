//! `coursectl`: command-line front end for the course registry.
//!
//! # Responsibility
//! - Resolve storage/logging configuration from flags and environment.
//! - Map subcommands onto `CourseService` use-cases and print results.

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use course_core::db::open_db;
use course_core::{
    default_log_level, init_logging, sort_by_student_count, Course, CourseDraft, CourseFilter,
    CourseService, CourseStatus, FileStore, KeyValueStore, KvCourseRepository, MemoryStore,
    SortOrder, SqliteStore,
};
use log::info;
use std::path::PathBuf;

const DEFAULT_SQLITE_PATH: &str = "courses.sqlite3";
const DEFAULT_FILE_DIR: &str = "course-data";

#[derive(Parser, Debug)]
#[command(name = "coursectl", version, about = "Manage course records")]
struct Cli {
    #[command(flatten)]
    config: Config,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Debug)]
struct Config {
    /// Storage backend holding the course collection.
    #[arg(long, env = "COURSECTL_BACKEND", value_enum, default_value_t = Backend::Sqlite, global = true)]
    backend: Backend,

    /// Database file (sqlite) or data directory (file).
    #[arg(long, env = "COURSECTL_DATA", global = true)]
    data: Option<PathBuf>,

    #[arg(long, env = "COURSECTL_LOG_LEVEL", global = true)]
    log_level: Option<String>,

    /// Absolute directory for rolling log files; logging is off when unset.
    #[arg(long, env = "COURSECTL_LOG_DIR", global = true)]
    log_dir: Option<String>,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Backend {
    Sqlite,
    File,
    Memory,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List every course in insertion order.
    List,
    /// Show one course by id.
    Show { id: String },
    /// Create a course; the id is generated.
    Add(DraftArgs),
    /// Replace all fields of an existing course.
    Update {
        id: String,
        #[command(flatten)]
        draft: DraftArgs,
    },
    /// Delete a course that has no enrolled students.
    Delete { id: String },
    /// Check whether a course may be deleted.
    CanDelete { id: String },
    /// Filter courses by name, instructor and status.
    Search {
        /// Case-insensitive name substring.
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        instructor: Option<String>,
        #[arg(long, value_parser = parse_status)]
        status: Option<CourseStatus>,
        /// Order by student count.
        #[arg(long, value_enum)]
        sort: Option<SortArg>,
    },
    /// List distinct instructors.
    Instructors,
}

#[derive(Args, Debug)]
struct DraftArgs {
    #[arg(long)]
    name: String,
    #[arg(long)]
    instructor: String,
    #[arg(long)]
    description: Option<String>,
    #[arg(long, default_value_t = 0)]
    students: u32,
    #[arg(long, value_parser = parse_status, default_value = "Open")]
    status: CourseStatus,
}

impl From<DraftArgs> for CourseDraft {
    fn from(args: DraftArgs) -> Self {
        CourseDraft {
            name: args.name,
            instructor: args.instructor,
            description: args.description,
            student_count: args.students,
            status: args.status,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum SortArg {
    Asc,
    Desc,
}

impl From<SortArg> for SortOrder {
    fn from(value: SortArg) -> Self {
        match value {
            SortArg::Asc => SortOrder::Ascending,
            SortArg::Desc => SortOrder::Descending,
        }
    }
}

impl Command {
    fn name(&self) -> &'static str {
        match self {
            Self::List => "list",
            Self::Show { .. } => "show",
            Self::Add(_) => "add",
            Self::Update { .. } => "update",
            Self::Delete { .. } => "delete",
            Self::CanDelete { .. } => "can-delete",
            Self::Search { .. } => "search",
            Self::Instructors => "instructors",
        }
    }

    /// Target course id, for commands that address one course.
    fn target_id(&self) -> Option<&str> {
        match self {
            Self::Show { id }
            | Self::Update { id, .. }
            | Self::Delete { id }
            | Self::CanDelete { id } => Some(id.as_str()),
            _ => None,
        }
    }
}

fn parse_status(value: &str) -> Result<CourseStatus, String> {
    value.parse().map_err(|err| format!("{err}"))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(log_dir) = cli.config.log_dir.as_deref() {
        let level = cli
            .config
            .log_level
            .as_deref()
            .unwrap_or(default_log_level());
        init_logging(level, log_dir).map_err(anyhow::Error::msg)?;
    }

    match cli.config.backend {
        Backend::Sqlite => {
            let path = cli
                .config
                .data
                .clone()
                .unwrap_or_else(|| PathBuf::from(DEFAULT_SQLITE_PATH));
            let conn = open_db(&path)
                .with_context(|| format!("failed to open database `{}`", path.display()))?;
            run(SqliteStore::new(&conn), cli.command)
        }
        Backend::File => {
            let dir = cli
                .config
                .data
                .clone()
                .unwrap_or_else(|| PathBuf::from(DEFAULT_FILE_DIR));
            let store = FileStore::open(&dir)
                .with_context(|| format!("failed to open data directory `{}`", dir.display()))?;
            run(store, cli.command)
        }
        Backend::Memory => run(MemoryStore::new(), cli.command),
    }
}

fn run<S: KeyValueStore>(store: S, command: Command) -> Result<()> {
    let service = CourseService::new(KvCourseRepository::new(store));
    info!(
        "event=cli_command module=cli status=start command={} id={}",
        command.name(),
        command.target_id().unwrap_or("-")
    );

    match command {
        Command::List => print_courses(&service.list_courses()?)?,
        Command::Show { id } => match service.get_course(&id)? {
            Some(course) => print_json(&course)?,
            None => bail!("course not found: {id}"),
        },
        Command::Add(draft) => {
            let course = service.create_course(draft.into())?;
            print_json(&course)?;
        }
        Command::Update { id, draft } => {
            let course = service.update_course(&id, draft.into())?;
            print_json(&course)?;
        }
        Command::Delete { id } => {
            service.delete_course(&id)?;
            println!("deleted {id}");
        }
        Command::CanDelete { id } => println!("{}", service.can_delete(&id)?),
        Command::Search {
            name,
            instructor,
            status,
            sort,
        } => {
            let filter = CourseFilter {
                name_query: name,
                instructor,
                status,
            };
            let mut courses = service.search(&filter)?;
            if let Some(order) = sort {
                sort_by_student_count(&mut courses, order.into());
            }
            print_courses(&courses)?;
        }
        Command::Instructors => {
            for instructor in service.instructors()? {
                println!("{instructor}");
            }
        }
    }

    Ok(())
}

fn print_courses(courses: &[Course]) -> Result<()> {
    print_json(courses)
}

fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
