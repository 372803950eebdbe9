pub mod args;

use std::path::Path;
use trianglem_tool::COUNTER;
use trianglem_tool::output_scripts::{export_volume, summary::Summary};
use trianglem_tool::scripts::extract_volume;
use trianglem_tool::types::{ExtraConfig, ScriptResult};
use trianglem_tool::utils::files::{VolumeSource, collect_volumes, read_file};

pub fn process_volume(
    volume: &VolumeSource,
    output: &Path,
    config: &ExtraConfig,
) -> anyhow::Result<()> {
    if !config.quiet {
        eprintln!("Processing {}", volume.name);
    }
    let index = read_file(&volume.memfs)?;
    let body = read_file(&volume.membody)?;
    let extraction = extract_volume(&volume.name, &index, body)?;
    if extraction.discarded > 0 {
        eprintln!(
            "Warning: {}: skipped {} unreadable index entries",
            volume.name, extraction.discarded
        );
        COUNTER.add_warnings(extraction.discarded);
    }
    let written = export_volume(&extraction, output, config)?;
    if !config.quiet {
        eprintln!("{}", Summary::new(&extraction));
        eprintln!(
            "Wrote {} files for {} to {}",
            written.len(),
            volume.name,
            output.display()
        );
    }
    COUNTER.inc(ScriptResult::Ok);
    Ok(())
}

fn main() {
    let arg = args::parse_args();
    if arg.backtrace {
        unsafe { std::env::set_var("RUST_LIB_BACKTRACE", "1") };
    }
    let cfg = arg.extra_config();
    let volumes = match collect_volumes(&arg.input) {
        Ok(volumes) => volumes,
        Err(e) => {
            eprintln!("Error reading {}: {}", arg.input, e);
            std::process::exit(1);
        }
    };
    if volumes.is_empty() {
        eprintln!("No fsroot volumes found in {}", arg.input);
        std::process::exit(1);
    }
    let op = Path::new(&arg.output);
    if op.exists() {
        if !op.is_dir() {
            eprintln!("Output path is not a directory");
            std::process::exit(1);
        }
    } else if let Err(e) = std::fs::create_dir_all(op) {
        eprintln!("Error creating {}: {}", op.display(), e);
        std::process::exit(1);
    }
    for volume in volumes.iter() {
        if let Err(e) = process_volume(volume, op, &cfg) {
            COUNTER.inc_error();
            eprintln!("Error processing {}: {}", volume.name, e);
            if arg.backtrace {
                eprintln!("Backtrace: {}", e.backtrace());
            }
        }
    }
    eprintln!("{}", *COUNTER);
    if COUNTER.errors() > 0 {
        std::process::exit(1);
    }
}
