use anyhow::Context;

use bottle_export::{run_export, ExportConfig};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = ExportConfig::default();
    let summary = run_export(&config)
        .with_context(|| format!("exporting {}", config.input.display()))?;

    println!("{summary}");
    Ok(())
}
