use std::path::PathBuf;

use clap::Args;

use crate::cli::utils::{introspector, output_success};
use crate::cli::OutputFormat;
use crate::services::ScaffoldService;

#[derive(Args, Debug)]
pub struct DescribeArgs {
    #[arg(long, help = "Table to describe")]
    pub table: String,

    #[arg(long, help = "Read columns from a JSON dump instead of the database")]
    pub columns: Option<PathBuf>,
}

pub async fn handle(args: DescribeArgs, output_format: OutputFormat) -> anyhow::Result<()> {
    let service = ScaffoldService::from_config(introspector(args.columns.as_deref()).await?);
    let description = service.describe(&args.table).await?;

    if let OutputFormat::Text = output_format {
        println!("{} (primary key {})", description.table_name, description.primary_key);
        for field in &description.fields {
            let options = field
                .archetype
                .options()
                .iter()
                .map(|o| format!("{}={}", o.code, o.label))
                .collect::<Vec<_>>();
            if options.is_empty() {
                println!("  {:<24} {:<12} {}", field.name(), field.archetype.name(), field.label);
            } else {
                println!(
                    "  {:<24} {:<12} {} [{}]",
                    field.name(),
                    field.archetype.name(),
                    field.label,
                    options.join(", ")
                );
            }
        }
    }

    output_success(
        &output_format,
        &format!(
            "{} of {} columns surfaced",
            description.fields.len(),
            description.column_count
        ),
        Some(serde_json::to_value(&description)?),
    )
}
