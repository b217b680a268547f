#[macro_use]
extern crate tracing;

use clap::Parser;
use eyre::Result;
use kubevirt_os_exporter::{
    collect,
    error::ExportError,
    report::{
        self,
        Format,
    },
};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(version, about)]
struct Args {
    #[clap(short, long, value_enum, help = "Export format: 'csv' or 'md'")]
    format: Format,

    #[clap(
        short,
        long,
        help = "The name/path of the output file (e.g. report.csv or inventory.md)"
    )]
    output: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install().expect("color_eyre init");
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    if !args.format.matches_extension(&args.output) {
        warn!(
            "Output filename {:?} does not match format {:?}",
            args.output,
            args.format.extension()
        );
    }

    run(args).await?;

    Ok(())
}

async fn run(Args { format, output }: Args) -> Result<(), ExportError> {
    let client = collect::connect().await?;

    info!("Scanning cluster for VMIs");

    let api = collect::vmi_api(client);
    let vmis = collect::list_vmis(&api).await?;
    let rows = collect::report_rows(vmis);

    if rows.is_empty() {
        info!("No VMIs found");
        return Ok(());
    }

    report::write_report(&output, format, &rows)?;

    info!("Successfully exported {} records to {}", rows.len(), output.display());

    Ok(())
}
