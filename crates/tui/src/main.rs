mod app;

use std::path::PathBuf;

use anyhow::{Context, Result};

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: flamebar <profile>");
        std::process::exit(1);
    }

    let path = PathBuf::from(&args[1]);
    let data =
        std::fs::read(&path).with_context(|| format!("failed to read {}", path.display()))?;
    let samples = flamebar_core::parsers::parse_auto(&data)
        .with_context(|| format!("failed to parse {}", path.display()))?;
    let tree = flamebar_core::model::FlameTree::build(&samples);

    app::run(&tree, &path.display().to_string(), samples.len())
}
