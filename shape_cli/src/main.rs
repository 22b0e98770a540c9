use clap::{Parser, Subcommand};
use shape_core::store::AnalysisSink;
use shape_core::*;
use std::path::PathBuf;
use uuid::Uuid;

#[derive(Parser)]
#[command(name = "bodyshape")]
#[command(about = "Body shape analysis and workout planner", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Override data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Use this config file instead of the default location
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a set of measurements and record the result
    Analyze {
        /// User the analysis belongs to
        #[arg(long)]
        user: String,

        /// Age in years
        #[arg(long)]
        age: u32,

        /// Weight in kg
        #[arg(long)]
        weight: f64,

        /// Height in cm
        #[arg(long)]
        height: f64,

        /// male or female
        #[arg(long, default_value = "female")]
        gender: Gender,

        /// sedentary, lightly_active, moderately_active, very_active, extra_active
        #[arg(long, default_value = "sedentary")]
        activity: ActivityLevel,

        /// Bust girth in cm
        #[arg(long)]
        bust: f64,

        /// Waist girth in cm
        #[arg(long)]
        waist: f64,

        /// Hip girth in cm
        #[arg(long)]
        hip: f64,

        /// Dry run - show the analysis without recording it
        #[arg(long)]
        dry_run: bool,

        /// Print the record as JSON
        #[arg(long)]
        json: bool,
    },

    /// List a user's analyses, newest first
    History {
        #[arg(long)]
        user: String,

        /// Show at most this many entries
        #[arg(long)]
        limit: Option<usize>,

        /// Print the records as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show one recorded analysis with its workout plan
    Show {
        id: Uuid,

        /// Print the record as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the workout plan for a body shape
    Plan { shape: BodyShape },

    /// Export a user's history to CSV
    Export {
        #[arg(long)]
        user: String,

        #[arg(long)]
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    shape_core::logging::init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    if let Some(data_dir) = cli.data_dir {
        config.data.data_dir = data_dir;
    }

    let catalog = WorkoutCatalog::resolve(config.catalog.path.as_deref())?;

    match cli.command {
        Commands::Analyze {
            user,
            age,
            weight,
            height,
            gender,
            activity,
            bust,
            waist,
            hip,
            dry_run,
            json,
        } => {
            let measurement = Measurement {
                age,
                weight,
                height,
                gender,
                activity_level: activity,
                bust,
                waist,
                hip,
            };
            cmd_analyze(&config, &catalog, user, measurement, dry_run, json)
        }
        Commands::History { user, limit, json } => cmd_history(&config, &user, limit, json),
        Commands::Show { id, json } => cmd_show(&config, id, json),
        Commands::Plan { shape } => cmd_plan(&catalog, shape),
        Commands::Export { user, output } => cmd_export(&config, &user, &output),
    }
}

fn cmd_analyze(
    config: &Config,
    catalog: &WorkoutCatalog,
    user: String,
    measurement: Measurement,
    dry_run: bool,
    json: bool,
) -> Result<()> {
    measurement.validate(&config.validation)?;

    let result = analyze(&measurement, catalog)?;
    let record = AnalysisRecord::new(user, measurement, result);

    if json {
        println!("{}", serde_json::to_string_pretty(&record)?);
    } else {
        display_record(&record);
    }

    if dry_run {
        if !json {
            println!("\n[Dry run - not recording analysis]");
        }
        return Ok(());
    }

    let mut store = JsonlStore::new(config.records_path());
    store.append(&record)?;
    tracing::info!("Recorded analysis {} for {}", record.id, record.user);

    if !json {
        println!("\n✓ Analysis recorded: {}", record.id);
    }
    Ok(())
}

fn cmd_history(config: &Config, user: &str, limit: Option<usize>, json: bool) -> Result<()> {
    let records = load_history(&config.records_path(), user, limit)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&records)?);
        return Ok(());
    }

    if records.is_empty() {
        println!("No analyses recorded for {}.", user);
        return Ok(());
    }

    println!(
        "{:<36}  {:<16}  {:>6}  {:<11}  {:>5}  {}",
        "ID", "DATE", "BMI", "STATUS", "WHR", "SHAPE"
    );
    for record in &records {
        println!(
            "{:<36}  {:<16}  {:>6.2}  {:<11}  {:>5.2}  {}",
            record.id,
            record.created_at.format("%d/%m/%Y %H:%M").to_string(),
            record.result.bmi,
            record.result.bmi_status,
            record.result.whr,
            record.result.body_shape
        );
    }
    Ok(())
}

fn cmd_show(config: &Config, id: Uuid, json: bool) -> Result<()> {
    let record = find_record(&config.records_path(), id)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&record)?);
    } else {
        display_record(&record);
    }
    Ok(())
}

fn cmd_plan(catalog: &WorkoutCatalog, shape: BodyShape) -> Result<()> {
    let plan = catalog.plan_for(shape);
    if plan.is_empty() {
        println!("No workout plan for {}.", shape);
        return Ok(());
    }

    println!("{} ({})", shape, shape.label());
    for (i, exercise) in plan.iter().enumerate() {
        println!(
            "  {}. {}  {} x {}",
            i + 1,
            exercise.name,
            exercise.sets,
            exercise.reps
        );
    }
    Ok(())
}

fn cmd_export(config: &Config, user: &str, output: &std::path::Path) -> Result<()> {
    let records = load_history(&config.records_path(), user, None)?;
    let count = export_csv(&records, output)?;

    println!("✓ Exported {} analyses", count);
    println!("  CSV: {}", output.display());
    Ok(())
}

fn display_record(record: &AnalysisRecord) {
    let result = &record.result;

    println!("\n╭─────────────────────────────────────────╮");
    println!("│  BODY ANALYSIS: {}", record.user);
    println!("╰─────────────────────────────────────────╯");
    println!();
    println!(
        "  BMI:        {:.2} ({}, {})",
        result.bmi,
        result.bmi_status,
        result.bmi_status.label()
    );
    println!("  WHR:        {:.2}", result.whr);
    println!(
        "  Body shape: {} ({})",
        result.body_shape,
        result.body_shape.label()
    );
    println!();

    if result.workout_plan.is_empty() {
        println!("  No workout plan for this shape.");
        return;
    }

    println!("  Workout plan:");
    for (i, exercise) in result.workout_plan.iter().enumerate() {
        println!(
            "  {}. {}  {} x {}",
            i + 1,
            exercise.name,
            exercise.sets,
            exercise.reps
        );
        println!("     → {}", record.image_path(exercise));
    }
}
