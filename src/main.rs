use std::path::{Path, PathBuf};

use chrono::{Local, Utc};
use clap::{Args, Parser, Subcommand};
use tabled::{settings::Style, Table, Tabled};
use tracing_subscriber::EnvFilter;

use overdue::config::{config_dir, init_config_dir, load_config, resolve_path};
use overdue::dashboard::{EMPTY_MESSAGE, LOAD_ERROR_MESSAGE};
use overdue::money::format_date_br;
use overdue::report::{export_report, ReportData};
use overdue::{
    format_amount, project, source, Bill, Bucket, Config, Dashboard, FilterState, LoadState,
    OverdueError, Result, SortDirection, SortField, SortState, Stage, Summary,
};

#[derive(Parser)]
#[command(name = "overdue")]
#[command(version, about = "Overdue bill collections dashboard", long_about = None)]
struct Cli {
    /// Path to config directory (default: XDG config dir)
    #[arg(short = 'C', long, global = true)]
    config_dir: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct FilterArgs {
    /// Overdue-age bucket to include: 1-30, 31-60, 61-90, 90+ (repeatable, default: all)
    #[arg(short, long, value_name = "BUCKET")]
    bucket: Vec<Bucket>,

    /// Notification stage: first-notice, second-notice, protest (repeatable, default: any)
    #[arg(short, long, value_name = "STAGE")]
    stage: Vec<Stage>,
}

impl FilterArgs {
    fn to_state(&self) -> FilterState {
        if self.bucket.is_empty() {
            FilterState::new(Bucket::ALL, self.stage.iter().copied())
        } else {
            FilterState::new(self.bucket.iter().copied(), self.stage.iter().copied())
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize config directory with a template config.toml
    Init,

    /// List overdue bills
    List {
        #[command(flatten)]
        filter: FilterArgs,

        /// Sort field: amount, due-date, days-overdue
        #[arg(long, default_value = "days-overdue")]
        sort: SortField,

        /// Sort ascending (default: descending)
        #[arg(long)]
        asc: bool,
    },

    /// Show totals for the selected bills
    Summary {
        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Show a single bill
    Show {
        /// Bill id in the data source
        id: String,
    },

    /// Export the selected bills as a PDF report
    Export {
        #[command(flatten)]
        filter: FilterArgs,

        /// Open generated PDF with system default viewer
        #[arg(long)]
        open: bool,
    },
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let cfg_dir = match cli.config_dir {
        Some(p) => p,
        None => config_dir()?,
    };

    match cli.command {
        Commands::Init => cmd_init(&cfg_dir),
        Commands::List { filter, sort, asc } => {
            let direction = if asc {
                SortDirection::Asc
            } else {
                SortDirection::Desc
            };
            cmd_list(&cfg_dir, filter.to_state(), SortState { field: sort, direction })
        }
        Commands::Summary { filter } => cmd_summary(&cfg_dir, filter.to_state()),
        Commands::Show { id } => cmd_show(&cfg_dir, &id),
        Commands::Export { filter, open } => cmd_export(&cfg_dir, filter.to_state(), open),
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(level))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Initialize config directory with template files
fn cmd_init(cfg_dir: &Path) -> Result<()> {
    init_config_dir(cfg_dir)?;

    println!("Initialized overdue config at: {}", cfg_dir.display());
    println!();
    println!("Next steps:");
    println!(
        "  1. Point [source] at your data:  $EDITOR {}/config.toml",
        cfg_dir.display()
    );
    println!("  2. List overdue bills:           overdue list");

    Ok(())
}

/// Load config and fetch bills. A failed fetch prints the user-facing
/// banner and surfaces as an error.
fn load_dashboard(
    cfg_dir: &Path,
    filter: FilterState,
    sort: SortState,
) -> Result<(Config, Dashboard)> {
    let config = load_config(cfg_dir)?;
    let source = source::from_settings(&config.source, cfg_dir);

    let mut dashboard = Dashboard::new(filter, sort);
    if let LoadState::Failed(detail) = dashboard.load(source.as_ref(), Utc::now()) {
        eprintln!("{LOAD_ERROR_MESSAGE}");
        return Err(OverdueError::Fetch(detail.clone()));
    }

    Ok((config, dashboard))
}

#[derive(Tabled)]
struct BillRow {
    #[tabled(rename = "CODE")]
    code: String,
    #[tabled(rename = "CLIENT")]
    client: String,
    #[tabled(rename = "AMOUNT")]
    amount: String,
    #[tabled(rename = "DUE")]
    due: String,
    #[tabled(rename = "DAYS")]
    days: String,
    #[tabled(rename = "STAGE")]
    stage: String,
}

impl From<&Bill> for BillRow {
    fn from(bill: &Bill) -> Self {
        Self {
            code: bill.code.clone(),
            client: bill.title.clone(),
            amount: format_amount(bill.amount),
            due: bill
                .due_date_naive()
                .map(format_date_br)
                .unwrap_or_else(|| "-".to_string()),
            days: format!("{} dias", bill.days_overdue),
            stage: bill.stage.label().to_string(),
        }
    }
}

fn print_summary(summary: &Summary) {
    println!("Total de Boletos: {}", summary.count);
    println!("Valor Total:      {}", format_amount(summary.total_amount));
    println!("Dias em média:    {} dias", summary.average_age.round() as i64);
}

/// List overdue bills
fn cmd_list(cfg_dir: &Path, filter: FilterState, sort: SortState) -> Result<()> {
    let (_, dashboard) = load_dashboard(cfg_dir, filter, sort)?;
    let view = dashboard.view();

    print_summary(&view.summary);
    println!();

    if view.sorted.is_empty() {
        println!("{EMPTY_MESSAGE}");
        return Ok(());
    }

    let rows: Vec<BillRow> = view.sorted.iter().map(BillRow::from).collect();
    let table = Table::new(rows).with(Style::rounded()).to_string();
    println!("{table}");

    Ok(())
}

/// Show totals for the selected bills
fn cmd_summary(cfg_dir: &Path, filter: FilterState) -> Result<()> {
    let (_, dashboard) = load_dashboard(cfg_dir, filter, SortState::default())?;
    let view = dashboard.view();

    println!("Filtro: {}", dashboard.filter.description());
    print_summary(&view.summary);
    if let Some(message) = dashboard.status_message() {
        println!();
        println!("{message}");
    }

    Ok(())
}

/// Show a single bill
fn cmd_show(cfg_dir: &Path, id: &str) -> Result<()> {
    let config = load_config(cfg_dir)?;
    let source = source::from_settings(&config.source, cfg_dir);

    let raw = source
        .fetch_by_id(id)?
        .ok_or_else(|| OverdueError::BillNotFound(id.to_string()))?;
    let bill = project(&raw, Utc::now());

    println!("Detalhes do Boleto");
    println!("{}", "-".repeat(50));
    println!("Número do Boleto:   {}", bill.code);
    println!("Cliente:            {}", bill.title);
    println!("Valor:              {}", format_amount(bill.amount));
    println!(
        "Vencimento:         {}",
        bill.due_date_naive()
            .map(format_date_br)
            .unwrap_or_else(|| "-".to_string())
    );
    println!("Dias em Atraso:     {} dias", bill.days_overdue);
    println!("Estágio:            {}", bill.stage);
    println!("Pago:               {}", if bill.paid { "sim" } else { "não" });

    Ok(())
}

/// Export the selected bills as a PDF report
fn cmd_export(cfg_dir: &Path, filter: FilterState, open: bool) -> Result<()> {
    let (config, dashboard) = load_dashboard(cfg_dir, filter, SortState::default())?;
    let view = dashboard.view();

    let data = ReportData::build(
        &view.filtered,
        &dashboard.filter.description(),
        view.summary.total_amount,
        view.summary.average_age,
        Local::now().date_naive(),
        &config.report.footer,
    );

    let output_dir = resolve_path(&config.report.output_dir, cfg_dir);
    let pdf_path = export_report(&data, &output_dir)?;

    println!("Exported report");
    println!("  Bills:  {}", view.summary.count);
    println!("  Total:  {}", format_amount(view.summary.total_amount));
    println!("  Saved:  {}", pdf_path.display());

    if open {
        open_path(&pdf_path)?;
    }

    Ok(())
}

fn open_path(pdf_path: &Path) -> Result<()> {
    #[cfg(target_os = "macos")]
    {
        std::process::Command::new("open").arg(pdf_path).spawn()?;
    }

    #[cfg(target_os = "linux")]
    {
        std::process::Command::new("xdg-open").arg(pdf_path).spawn()?;
    }

    #[cfg(target_os = "windows")]
    {
        std::process::Command::new("cmd")
            .args(["/C", "start", ""])
            .arg(pdf_path)
            .spawn()?;
    }
    Ok(())
}
