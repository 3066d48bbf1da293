use anyhow::Result;
use assignment_roster::api::HttpDataSource;
use assignment_roster::config;
use assignment_roster::course::{logging_actions, CourseAssignments};
use assignment_roster::notify::TracingSink;
use assignment_roster::page::{AssignmentsPage, Navigator};
use assignment_roster::placeholder::{PlaceholderSynthesizer, RosterPlaceholders};
use assignment_roster::render::render_table;
use chrono::Utc;
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

#[derive(Debug, Parser)]
#[command(author, version, about = "Print the assignment roster")]
struct Args {
    /// Path to YAML config file
    #[arg(long, default_value = "config.yaml")]
    config: PathBuf,

    /// Show the nested listing for one course instead of the full roster
    #[arg(long, requires = "course_name")]
    course: Option<i64>,

    /// Display name of `--course`
    #[arg(long, requires = "course")]
    course_name: Option<String>,

    /// Seed for placeholder generation (random when omitted)
    #[arg(long)]
    seed: Option<u64>,
}

struct LogNavigator;

impl Navigator for LogNavigator {
    fn navigate(&self, path: &str) {
        info!(path, "navigate");
    }
}

fn rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();

    let args = Args::parse();
    let cfg = config::load(Some(&args.config))?;

    if let (Some(course_id), Some(course_name)) = (args.course, args.course_name.as_deref()) {
        let synth = PlaceholderSynthesizer::course(&cfg.placeholders);
        let listing = CourseAssignments::new(
            course_id,
            course_name,
            &synth,
            &mut rng(args.seed),
            Utc::now(),
            logging_actions(),
        );
        println!("{}", listing.heading());
        print!("{}", render_table(&listing.view()));
        return Ok(());
    }

    let source = Arc::new(HttpDataSource::from_config(&cfg)?);
    let placeholders = RosterPlaceholders::new(
        PlaceholderSynthesizer::roster(&cfg.placeholders),
        rng(args.seed),
        Utc::now,
    );
    let mut page = AssignmentsPage::mount(
        source,
        Arc::new(TracingSink),
        Arc::new(LogNavigator),
        Box::new(placeholders),
    );
    page.tick().await;

    let view = page.view();
    info!(rows = view.data.len(), "roster ready");
    println!("Manage Assignments");
    print!("{}", render_table(&view));
    Ok(())
}
