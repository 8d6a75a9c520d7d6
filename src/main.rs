use clap::Parser;
use color_eyre::eyre::{eyre, WrapErr};
use color_eyre::Result;
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

use site_4d::catalog::ProjectType;
use site_4d::export::{export_csv, export_json, Snapshot};
use site_4d::model::{parse_date, BoqTable, FloorFilter, Schedule};
use site_4d::picking::Viewport;
use site_4d::ui::App;
use site_4d::viewer::BimViewer;

#[derive(Parser, Debug)]
#[command(name = "site-4d")]
#[command(about = "Site 4D - watch a building go up, day by day, from its schedule")]
#[command(version)]
struct Args {
    /// Path to the schedule JSON (array of {id, name, start, end})
    #[arg(required = true)]
    schedule: PathBuf,

    /// Bill of quantities JSON with certified progress and rates
    #[arg(long, value_name = "FILE")]
    boq: Option<PathBuf>,

    /// Building catalog to load
    #[arg(long, default_value = "villa")]
    project_type: ProjectType,

    /// Initial as-of date (YYYY-MM-DD); defaults to the schedule start
    #[arg(long)]
    date: Option<String>,

    /// Level filter: all, sub, gf, 1, roof, upper_roof, ext
    #[arg(long, default_value = "all")]
    floor: FloorFilter,

    /// Export a state snapshot to CSV and exit
    #[arg(long, value_name = "FILE")]
    csv: Option<PathBuf>,

    /// Export a state snapshot to JSON and exit
    #[arg(long, value_name = "FILE")]
    json: Option<PathBuf>,

    /// Write logs to this file (the TUI owns the terminal)
    #[arg(long, value_name = "FILE")]
    log_file: Option<PathBuf>,
}

impl Args {
    fn headless(&self) -> bool {
        self.csv.is_some() || self.json.is_some()
    }
}

fn init_logging(log_file: Option<&Path>, headless: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    match log_file {
        Some(path) => {
            let file = File::create(path)
                .wrap_err_with(|| format!("cannot create log file {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        None if headless => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
        }
        // No sink: stderr would draw over the TUI.
        None => {}
    }
    Ok(())
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();
    init_logging(args.log_file.as_deref(), args.headless())?;

    let schedule = Schedule::load(&args.schedule)?;
    let costs = match &args.boq {
        Some(path) => BoqTable::load(path)?,
        None => BoqTable::default(),
    };
    tracing::info!(
        tasks = schedule.tasks().len(),
        cost_records = costs.len(),
        "inputs loaded"
    );

    let start = match &args.date {
        Some(raw) => Some(parse_date(raw).ok_or_else(|| eyre!("invalid --date: {raw}"))?),
        None => schedule.span().map(|(start, _)| start),
    };

    let mut viewer = BimViewer::init(args.project_type, Viewport::default())?;
    viewer.set_schedule(schedule);
    viewer.set_filter(args.floor);
    if let Some(start) = start {
        viewer.update_simulation(start);
    }

    if args.headless() {
        let snapshot = Snapshot::capture(&viewer);

        if let Some(csv_path) = &args.csv {
            export_csv(&snapshot, csv_path)?;
            println!("Exported to CSV: {}", csv_path.display());
        }

        if let Some(json_path) = &args.json {
            export_json(&snapshot, json_path)?;
            println!("Exported to JSON: {}", json_path.display());
        }

        return Ok(());
    }

    let terminal = ratatui::init();
    let result = run_tui(terminal, App::new(viewer, costs));
    ratatui::restore();
    result
}

/// Runs the dashboard with mouse capture. Capture is released on every path
/// so the caller only has to restore the terminal.
fn run_tui(terminal: ratatui::DefaultTerminal, app: App) -> Result<()> {
    crossterm::execute!(std::io::stdout(), EnableMouseCapture)?;
    let result = app.run(terminal);
    let released = crossterm::execute!(std::io::stdout(), DisableMouseCapture);
    result?;
    released?;
    Ok(())
}
