use trianglem_tool::types::*;
use clap::{ArgAction, Parser};

/// Extracts .tat scripts and dialogue from TriangleM script.memfs/script.membody pairs
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Arg {
    /// Game directory containing fsroot* volumes, or a single volume root
    pub input: String,
    /// Output directory
    #[arg(default_value = "extracted_output")]
    pub output: String,
    #[arg(short = 'T', long, value_enum, default_value_t = TemplateType::Text)]
    /// Translation template layout
    pub template: TemplateType,
    #[arg(long, action = ArgAction::SetTrue)]
    /// Do not write the raw decompressed membody
    pub no_dump: bool,
    #[arg(long, action = ArgAction::SetTrue)]
    /// Do not write the inspection dump
    pub no_inspect: bool,
    #[arg(long, action = ArgAction::SetTrue)]
    /// Do not write one .tat file per scene
    pub no_segments: bool,
    #[arg(long, action = ArgAction::SetTrue)]
    /// Do not write the translation template
    pub no_template: bool,
    #[arg(short, long, action = ArgAction::SetTrue)]
    /// Only print warnings, errors and the final count
    pub quiet: bool,
    #[arg(action = ArgAction::SetTrue, short, long)]
    /// Print backtrace on error
    pub backtrace: bool,
}

impl Arg {
    pub fn extra_config(&self) -> ExtraConfig {
        ExtraConfig {
            template_type: self.template,
            dump_payload: !self.no_dump,
            dump_inspect: !self.no_inspect,
            dump_segments: !self.no_segments,
            dump_template: !self.no_template,
            quiet: self.quiet,
        }
    }
}

pub fn parse_args() -> Arg {
    Arg::parse()
}

#[test]
fn test_parse_args() {
    let arg = Arg::parse_from(["trianglem_tool", "game", "-T", "m3t", "--no-inspect", "-q"]);
    assert_eq!(arg.input, "game");
    assert_eq!(arg.output, "extracted_output");
    let cfg = arg.extra_config();
    assert_eq!(cfg.template_type, TemplateType::M3t);
    assert!(!cfg.dump_inspect);
    assert!(cfg.dump_payload);
    assert!(cfg.quiet);
}
