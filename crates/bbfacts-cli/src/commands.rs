use anyhow::Result;
use tracing::info_span;

use bbfacts_cli::pipeline::{CheckResult, GenerateConfig, GenerateResult, run_check, run_generate};
use bbfacts_model::LabelOptions;

use crate::cli::{CheckArgs, GenerateArgs};

pub fn generate(args: &GenerateArgs) -> Result<GenerateResult> {
    let span = info_span!("generate", input = %args.input_csv.display());
    let _guard = span.enter();
    let config = GenerateConfig {
        input_csv: args.input_csv.clone(),
        output_dir: args.output_dir.clone(),
        archive_name: (!args.no_archive).then(|| args.archive_name.clone()),
        dry_run: args.dry_run,
        label_options: LabelOptions::new()
            .with_charge_name_limit(args.charge_name_limit)
            .with_title(args.title.as_str()),
    };
    run_generate(&config)
}

pub fn check(args: &CheckArgs) -> Result<CheckResult> {
    let span = info_span!("check", input = %args.input_csv.display());
    let _guard = span.enter();
    run_check(&args.input_csv)
}
