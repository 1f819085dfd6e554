use std::path::PathBuf;

use clap::Args;

use crate::cli::utils::{introspector, output_success};
use crate::cli::OutputFormat;
use crate::scaffold::descriptor::ModuleDescriptor;
use crate::services::ScaffoldService;

#[derive(Args, Debug)]
pub struct ScaffoldArgs {
    #[arg(long, help = "Menu name shown in the admin UI")]
    pub name: String,

    #[arg(long, help = "Module key used for file and route names")]
    pub module: String,

    #[arg(long, help = "Table to generate from")]
    pub table: String,

    #[arg(long, help = "Controller file name")]
    pub controller: String,

    #[arg(long, default_value_t = 0, help = "Module kind")]
    pub kind: u32,

    #[arg(long, help = "Read columns from a JSON dump instead of the database")]
    pub columns: Option<PathBuf>,
}

pub async fn handle(args: ScaffoldArgs, output_format: OutputFormat) -> anyhow::Result<()> {
    let service = ScaffoldService::from_config(introspector(args.columns.as_deref()).await?);

    let mut descriptor = ModuleDescriptor::new(args.name, args.module, args.table, args.controller);
    descriptor.kind = args.kind;

    let report = service.scaffold(descriptor).await?;

    if let OutputFormat::Text = output_format {
        for path in &report.generated_paths {
            println!("  {}", path.display());
        }
        if !report.registry_patched {
            println!("  (routes already mounted)");
        }
    }

    output_success(
        &output_format,
        &format!(
            "Generated module '{}' from {} ({} files, {} of {} columns)",
            report.module_key,
            report.table_name,
            report.generated_paths.len(),
            report.surfaced_field_count,
            report.field_count
        ),
        Some(serde_json::to_value(&report)?),
    )
}
