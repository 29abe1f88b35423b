//! rf-filter CLI
//!
//! Filters a review dump to selected columns and merges product metadata.

use clap::Parser;
use rf_cli_common::format_number;
use tracing::error;

mod args;
mod output;
mod run;

use args::Cli;

fn main() -> anyhow::Result<()> {
    let args = Cli::parse();

    // Initialize logging (to stderr, so stdout is clean for output)
    run::init_logging(args.log_level)?;

    let table = match run::execute(&args) {
        Ok(table) => table,
        Err(e) => {
            let kind = e.kind();
            error!(kind = %kind, "Filter failed");
            eprintln!("Error: {}", e);
            std::process::exit(kind.exit_code());
        }
    };

    let head = table.head(args.head);
    let stdout = std::io::stdout();
    output::write_preview(
        table.status_message(),
        &head,
        args.output_format,
        &mut stdout.lock(),
    )?;

    // Report results to stderr
    eprintln!();
    eprintln!("Filter completed:");
    eprintln!("  Rows:    {}", format_number(table.num_rows() as u64));
    eprintln!("  Columns: {}", table.num_columns());
    eprintln!("  Merged:  {}", if table.joined() { "yes" } else { "no" });

    Ok(())
}
