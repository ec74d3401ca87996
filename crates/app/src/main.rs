use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use quiz_core::model::{DEFAULT_POINTS_PER_CORRECT, DEFAULT_TIME_LIMIT_SECS, QuizRules};
use services::{AppServices, Clock, QuizController, QuizObserver, SettingsService};
use storage::questions::{InMemoryQuestionSource, JsonFileQuestionSource, QuestionSource};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use ui::{App, UiApp, build_app_context};

#[derive(Debug)]
enum ArgsError {
    InvalidDbUrl { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
        }
    }
}

impl std::error::Error for ArgsError {}

/// Timed multiple-choice quiz.
#[derive(Debug, Parser)]
#[command(name = "quiz", version, about, long_about = None)]
struct Args {
    /// JSON question file; the bundled set is used when omitted
    #[arg(long, env = "QUIZ_QUESTIONS")]
    questions: Option<PathBuf>,

    /// SQLite URL or file path for the theme and progress store
    #[arg(long = "db", env = "QUIZ_DB_URL", default_value = "sqlite://quiz.sqlite3")]
    db_url: String,

    /// Seconds allowed per question
    #[arg(long, default_value_t = DEFAULT_TIME_LIMIT_SECS)]
    time_limit: u32,

    /// Points awarded per correct answer
    #[arg(long, default_value_t = DEFAULT_POINTS_PER_CORRECT)]
    points: u32,

    /// Continue from the saved progress snapshot, if any
    #[arg(long)]
    resume: bool,

    /// Debug-level logging unless RUST_LOG is set
    #[arg(short, long)]
    verbose: bool,
}

struct DesktopApp {
    services: AppServices,
    resume: bool,
}

impl UiApp for DesktopApp {
    fn resume_on_launch(&self) -> bool {
        self.resume
    }

    fn settings(&self) -> Arc<SettingsService> {
        self.services.settings()
    }

    fn question_source(&self) -> Arc<dyn QuestionSource> {
        self.services.question_source()
    }

    fn new_controller(&self, observer: Arc<dyn QuizObserver>) -> QuizController {
        self.services.new_controller(observer)
    }
}

fn init_tracing(verbose: bool) {
    let log_level = if verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string()),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();
}

fn normalize_sqlite_url(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed == "sqlite::memory:" || trimmed.starts_with("sqlite://") {
        return trimmed.to_string();
    }

    let path_str = trimmed.strip_prefix("sqlite:").unwrap_or(trimmed);
    let path = std::path::Path::new(path_str);
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(path)
    };
    format!("sqlite://{}", absolute.display())
}

fn prepare_sqlite_file(db_url: &str) -> Result<(), Box<dyn std::error::Error>> {
    if db_url == "sqlite::memory:" {
        return Ok(());
    }

    let path = db_url
        .strip_prefix("sqlite://")
        .ok_or_else(|| ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        })?;
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() {
        return Err(ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        }
        .into());
    }

    let path = std::path::Path::new(path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    if !path.exists() {
        std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(path)?;
    }

    Ok(())
}

fn question_source(
    path: Option<PathBuf>,
) -> Result<Arc<dyn QuestionSource>, Box<dyn std::error::Error>> {
    Ok(match path {
        Some(path) => {
            tracing::info!(path = %path.display(), "using question file");
            Arc::new(JsonFileQuestionSource::new(path))
        }
        None => Arc::new(InMemoryQuestionSource::bundled()?),
    })
}

async fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let rules = QuizRules::new(args.time_limit, args.points)?;
    if args.db_url.trim().is_empty() {
        return Err(ArgsError::InvalidDbUrl { raw: args.db_url }.into());
    }
    let db_url = normalize_sqlite_url(&args.db_url);

    // Open + migrate SQLite at startup. Keep this in the binary glue so core/services stay pure.
    prepare_sqlite_file(&db_url)?;
    let source = question_source(args.questions)?;
    let services = AppServices::new_sqlite(&db_url, source, rules, Clock::system()).await?;
    tracing::info!(
        %db_url,
        time_limit_secs = rules.time_limit_secs(),
        points_per_correct = rules.points_per_correct(),
        resume = args.resume,
        "starting quiz"
    );

    let app: Arc<dyn UiApp> = Arc::new(DesktopApp {
        services,
        resume: args.resume,
    });
    let context = build_app_context(&app);

    // On macOS, Dioxus/tao can default to an always-on-top window in some dev setups.
    let desktop_cfg = DesktopConfig::new().with_window(
        WindowBuilder::new()
            .with_title("Quiz")
            .with_always_on_top(false),
    );

    LaunchBuilder::desktop()
        .with_cfg(desktop_cfg)
        .with_context(context)
        .launch(App);
    Ok(())
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    init_tracing(args.verbose);

    if let Err(err) = run(args).await {
        // At this layer (binary glue), printing once is fine.
        tracing::error!(%err, "quiz failed to start");
        eprintln!("{err}");
        std::process::exit(2);
    }
}
