use crate::infra::read_function_input;
use clap::Args;
use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::PathBuf;
use tracing::info;
use vip_shipping_discount::config::AppConfig;
use vip_shipping_discount::discount::{run, FunctionRunResult, RuleTemplate};
use vip_shipping_discount::error::AppError;
use vip_shipping_discount::telemetry;

#[derive(Args, Debug, Default)]
pub(crate) struct RunArgs {
    /// Checkout payload to evaluate (reads stdin when omitted)
    #[arg(long)]
    pub(crate) input: Option<PathBuf>,
    /// Pretty-print the JSON result
    #[arg(long)]
    pub(crate) pretty: bool,
}

pub(crate) fn run_function(args: RunArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    let input = match &args.input {
        Some(path) => read_function_input(BufReader::new(File::open(path)?))?,
        None => read_function_input(io::stdin().lock())?,
    };

    let result = run(&input)?;
    info!(discounts = result.discounts.len(), "checkout evaluated");

    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_result(&mut out, &result, args.pretty)?;
    Ok(())
}

pub(crate) fn write_result<W: Write>(
    out: &mut W,
    result: &FunctionRunResult,
    pretty: bool,
) -> Result<(), AppError> {
    if pretty {
        serde_json::to_writer_pretty(&mut *out, result)?;
    } else {
        serde_json::to_writer(&mut *out, result)?;
    }
    writeln!(out)?;
    Ok(())
}

pub(crate) fn print_template() -> Result<(), AppError> {
    let template = RuleTemplate::new_rule();

    println!("Discount title: {}", template.title);
    println!("Metafield namespace: {}", template.namespace);
    println!("Metafield key: {}", template.key);
    println!("Metafield value:\n{}", template.value);

    Ok(())
}
