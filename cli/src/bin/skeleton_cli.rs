use clap::{Parser, Subcommand};
use cli::TraceJob;
use color_eyre::eyre::{eyre, Result};
use skeleton::{
    Connectivity, NeighborClassifier, PipelineBuilder, PipelineConfig, SimplificationConfig,
    SimplificationMethod, TracerConfig,
};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{self, EnvFilter};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Vectorize a skeleton image into GeoJSON polylines
    Trace {
        /// Path to a TOML or JSON job file; overrides the other flags
        #[arg(short, long, conflicts_with_all = ["input", "output"])]
        job: Option<PathBuf>,
        /// Skeleton image to trace
        #[arg(short, long, required_unless_present = "job")]
        input: Option<PathBuf>,
        /// Destination GeoJSON file
        #[arg(short, long, required_unless_present = "job")]
        output: Option<PathBuf>,
        /// Binarization threshold applied before tracing
        #[arg(long, default_value = "128")]
        threshold: u8,
        /// Collapse straight runs while tracing
        #[arg(long)]
        simplify: bool,
        /// Neighbor topology used for counting (moore or cross)
        #[arg(long, default_value = "moore")]
        connectivity: Connectivity,
        /// Douglas-Peucker tolerance applied after tracing
        #[arg(long)]
        tolerance: Option<f64>,
    },
    /// Print the pixels whose foreground neighbor count equals a degree
    Degree {
        /// Skeleton image to classify
        #[arg(short, long)]
        input: PathBuf,
        /// Exact neighbor count to look for (1 = endpoints, 3+ = junctions)
        #[arg(short, long, default_value = "1")]
        degree: u8,
        /// Neighbor topology used for counting (moore or cross)
        #[arg(long, default_value = "moore")]
        connectivity: Connectivity,
    },
    /// Print the JSON schema of the pipeline configuration
    Schema,
}

fn main() -> Result<()> {
    color_eyre::install()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info"))
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Trace {
            job,
            input,
            output,
            threshold,
            simplify,
            connectivity,
            tolerance,
        } => {
            let job = match (job, input, output) {
                (Some(path), _, _) => TraceJob::from_file(path)?,
                (None, Some(input), Some(output)) => TraceJob {
                    input: input.to_string_lossy().to_string(),
                    output: output.to_string_lossy().to_string(),
                    pipeline: PipelineConfig {
                        threshold: Some(threshold),
                        tracer: TracerConfig {
                            connectivity,
                            simplify,
                            ..TracerConfig::default()
                        },
                        simplification: tolerance.map(|tolerance| SimplificationConfig {
                            method: SimplificationMethod::DouglasPeucker,
                            tolerance,
                        }),
                        ..PipelineConfig::default()
                    },
                },
                _ => return Err(eyre!("either --job or both --input and --output are required")),
            };
            run_trace(&job)?;
        }
        Commands::Degree {
            input,
            degree,
            connectivity,
        } => {
            print_degree(&input, degree, connectivity)?;
        }
        Commands::Schema => {
            println!("{}", serde_json::to_string_pretty(&PipelineConfig::schema())?);
        }
    }

    Ok(())
}

fn run_trace(job: &TraceJob) -> Result<()> {
    info!("Tracing {} -> {}", job.input, job.output);

    let image = image::open(&job.input)?.to_luma8();
    let pipeline = PipelineBuilder::from_config(&job.pipeline);
    info!("{}", pipeline.info());

    let result = pipeline.process(&image)?;
    result.save_geojson(&job.output)?;

    info!(
        "Wrote {} polylines ({} points, {:.1} px) to {}",
        result.polyline_count(),
        result.total_points(),
        result.total_length(),
        job.output
    );
    Ok(())
}

fn print_degree(input: &Path, degree: u8, connectivity: Connectivity) -> Result<()> {
    let image = image::open(input)?.to_luma8();
    let classifier = NeighborClassifier::new(connectivity, Default::default());
    let points = classifier.find_degree(&image, degree)?;

    info!("{} pixels with degree {}", points.len(), degree);
    println!("{}", serde_json::to_string_pretty(&points)?);
    Ok(())
}
