use clap::{Parser, Subcommand};
use intake_core::constants::DEFAULT_DATA_DIR;
use intake_core::render::RenderedForm;
use intake_core::{store, CoreConfig, IdNumber, StoreKind, SubmissionPipeline, SubmittedFields};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "intake")]
#[command(about = "Person intake CLI")]
struct Cli {
    /// Directory holding stored records
    #[arg(long, env = "INTAKE_DATA_DIR", default_value = DEFAULT_DATA_DIR)]
    data_dir: PathBuf,
    /// Store backend: `file` or `memory`
    #[arg(long, env = "INTAKE_STORE", default_value = "file")]
    store: StoreKind,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Submit one person, as the web form would
    Submit {
        #[arg(long, default_value = "")]
        name: String,
        #[arg(long, default_value = "")]
        surname: String,
        /// 13-digit ID number
        #[arg(long, default_value = "")]
        id_number: String,
        /// Date of birth (dd/MM/yyyy)
        #[arg(long, default_value = "")]
        dob: String,
    },
    /// Show the record stored for an ID number
    Lookup {
        /// 13-digit ID number
        id_number: String,
    },
}

fn main() -> anyhow::Result<ExitCode> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("intake_core=warn".parse()?),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let cfg = CoreConfig::new(cli.data_dir, cli.store)?;
    let pipeline = SubmissionPipeline::new(store::open(&cfg));

    match cli.command {
        Commands::Submit {
            name,
            surname,
            id_number,
            dob,
        } => {
            let submitted = SubmittedFields {
                name,
                surname,
                id_number,
                date_of_birth: dob,
            };
            let outcome = pipeline.run(&submitted);
            let form = RenderedForm::from_outcome(&outcome, &submitted);
            if let Some(line) = form.status.line() {
                println!("{line}");
            }
            if outcome.is_success() {
                Ok(ExitCode::SUCCESS)
            } else {
                Ok(ExitCode::FAILURE)
            }
        }
        Commands::Lookup { id_number } => {
            let id_number = IdNumber::parse(&id_number)?;
            match pipeline.people().find(&id_number)? {
                Some(record) => {
                    println!(
                        "ID: {}, Name: {} {}, ID Number: {}, Date of Birth: {}, Created: {}",
                        record.id,
                        record.name,
                        record.surname,
                        record.id_number,
                        record.date_of_birth,
                        record.created_at.to_rfc3339()
                    );
                    Ok(ExitCode::SUCCESS)
                }
                None => {
                    println!("No record found.");
                    Ok(ExitCode::FAILURE)
                }
            }
        }
    }
}
