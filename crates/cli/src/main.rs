use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use triage_core::{
    config::data_dir_from_env_value, report, CaseCountStore, CoreConfig, PredictionService,
    ReferenceTables,
};

#[derive(Parser)]
#[command(name = "triage")]
#[command(about = "Symptom triage CLI")]
struct Cli {
    /// Directory overriding the embedded reference tables (defaults to TRIAGE_DATA_DIR)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Rank diseases for the given symptoms
    Predict {
        /// Symptoms as entered, in the chosen language
        #[arg(required = true)]
        symptoms: Vec<String>,
        /// Language tag of the symptoms (defaults to the canonical language)
        #[arg(long)]
        lang: Option<String>,
        /// Print the full result as JSON
        #[arg(long)]
        json: bool,
        /// Also write a text report to this file
        #[arg(long)]
        report: Option<PathBuf>,
    },
    /// List the symptom vocabulary for a language
    Symptoms {
        /// Language tag (defaults to the canonical language)
        #[arg(long)]
        lang: Option<String>,
    },
    /// List candidate diseases in tie-break order
    Diseases,
    /// List supported language tags
    Languages,
    /// Show regional yearly case counts
    Stats {
        /// Only show this disease
        #[arg(long)]
        disease: Option<String>,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let Some(command) = cli.command else {
        println!("Use 'triage --help' for commands");
        return Ok(());
    };

    let data_dir = cli
        .data_dir
        .or_else(|| data_dir_from_env_value(std::env::var("TRIAGE_DATA_DIR").ok()));
    let cfg = CoreConfig::new(data_dir)?;
    let tables = Arc::new(ReferenceTables::load(&cfg)?);
    let service = PredictionService::new(tables.clone());

    match command {
        Commands::Predict {
            symptoms,
            lang,
            json,
            report: report_path,
        } => {
            let res = service.predict(&symptoms, lang.as_deref());

            if json {
                println!("{}", serde_json::to_string_pretty(&res)?);
            } else {
                for entry in &res.results {
                    println!(
                        "{:<12} {:>5.1}%  {}",
                        entry.disease,
                        entry.probability,
                        entry.matched_symptoms.join(", ")
                    );
                }
                if !res.unrecognized_symptoms.is_empty() {
                    println!("Unrecognised: {}", res.unrecognized_symptoms.join(", "));
                }
                if let Some(highest) = &res.highest {
                    if !highest.advice.is_empty() {
                        println!();
                        println!("{}: {}", highest.disease, highest.advice);
                    }
                }
            }

            if let Some(path) = report_path {
                let language = service.resolve_language(lang.as_deref());
                let generated_at = chrono::Local::now().naive_local();
                std::fs::write(
                    &path,
                    report::render_report(&res.results, language, generated_at),
                )?;
                eprintln!("Wrote report to {}", path.display());
            }
        }
        Commands::Symptoms { lang } => {
            for label in service.symptoms_for(lang.as_deref()) {
                println!("{label}");
            }
        }
        Commands::Diseases => {
            for name in service.diseases() {
                println!("{name}");
            }
        }
        Commands::Languages => {
            for language in service.languages() {
                println!("{language}");
            }
        }
        Commands::Stats { disease } => {
            let store = CaseCountStore::load(&cfg, tables.catalogue())?;
            let counts = store.snapshot();
            let statewise = counts.statewise();

            let selected: Vec<&String> = match &disease {
                Some(name) if !statewise.contains_key(name) => {
                    eprintln!("No case counts for disease: {name}");
                    return Ok(());
                }
                Some(name) => vec![name],
                None => statewise.keys().collect(),
            };

            for name in selected {
                println!("{name}");
                println!("  {:<16} {}", "State", counts.years().join("  "));
                for region in statewise[name].keys() {
                    let row: Vec<String> = counts
                        .years()
                        .iter()
                        .map(|year| format!("{:>4}", counts.count(name, region, year).unwrap_or(0)))
                        .collect();
                    println!("  {:<16} {}", region, row.join("  "));
                }
            }
        }
    }

    Ok(())
}
