use anyhow::{anyhow, Context, Result};
use argform::form::{ControlValue, FormOptionsBuilder, ParseStatus};
use argform::options::description::ParserDescription;
use argform::options::{initial_arguments_from_toml, InitialArguments};
use argform::surface::{run_dialog, TerminalSurface};
use argform::{ClapSource, DialogOutcome, FormDialog};
use cli::{Cli, Commands, FormArgs};
use std::process::ExitCode;

mod cli;

fn main() -> ExitCode {
    if let Err(e) = try_main() {
        eprintln!("{}: {e:#}", console::style("Error").red());
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn try_main() -> Result<()> {
    use clap::Parser;
    let cli = Cli::parse();

    match &cli.command {
        Commands::Form(args) => form(args),
        Commands::Preview(args) => preview(args),
        Commands::Inspect(args) => inspect(args),
    }
}

/// Load the description and initial values and build the dialog.
fn load(args: &FormArgs) -> Result<(String, FormDialog<ClapSource>)> {
    let description = ParserDescription::load(&args.description)?;
    let command = description
        .to_command()
        .with_context(|| "Failed to build a parser from the description")?;

    let initial = match &args.initial {
        Some(path) => {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to load initial values {}", path.display()))?;
            initial_arguments_from_toml(&contents)?
        }
        None => InitialArguments::default(),
    };

    let options = FormOptionsBuilder::default()
        .columns(args.columns)
        .initial(initial)
        .build()
        .with_context(|| "Failed to build form options")?;
    let dialog = FormDialog::build(ClapSource::new(command), options)
        .with_context(|| "Failed to build the form")?;

    Ok((description.name, dialog))
}

fn print_result<R: serde::Serialize>(
    name: &str,
    arguments: &[String],
    preview: &str,
    json: bool,
    result: &R,
) -> Result<()> {
    if json {
        let output = serde_json::json!({
            "arguments": arguments,
            "result": result,
        });
        let output = serde_json::to_string_pretty(&output)
            .with_context(|| "Failed to convert result to JSON")?;
        println!("{output}");
    } else if preview.is_empty() {
        println!("{name}");
    } else {
        println!("{name} {preview}");
    }
    Ok(())
}

fn form(args: &FormArgs) -> Result<()> {
    let (name, mut dialog) = load(args)?;
    let mut surface = TerminalSurface::new();
    run_dialog(&mut dialog, &mut surface)?;

    let preview = dialog.preview().to_string();
    match dialog.into_outcome() {
        DialogOutcome::Accepted { result, arguments } => {
            print_result(&name, &arguments, &preview, args.json, &result)
        }
        DialogOutcome::Cancelled => Err(anyhow!("Cancelled")),
        DialogOutcome::Open => Err(anyhow!("The form closed without an answer")),
    }
}

fn preview(args: &FormArgs) -> Result<()> {
    let (name, dialog) = load(args)?;

    if let Some(binding) = dialog.incomplete().and_then(|id| dialog.binding(id)) {
        return Err(anyhow!(
            "Initial value for '{}' is not a valid {}",
            binding.label(),
            binding.option.value_type
        ));
    }
    if let ParseStatus::Rejected(rejected) = dialog.status() {
        return Err(anyhow!("{name} would reject these arguments: {}", rejected.message));
    }

    let result = dialog
        .result()
        .ok_or_else(|| anyhow!("{name} produced no result"))?;
    print_result(&name, dialog.arguments(), dialog.preview(), args.json, result)
}

fn inspect(args: &FormArgs) -> Result<()> {
    let (name, dialog) = load(args)?;

    println!("{}", console::style(&name).bold());
    for group in dialog.groups() {
        println!();
        println!("{}", console::style(&group.title).bold().underlined());
        for (r, row) in group.rows.iter().enumerate() {
            for (c, id) in row.iter().enumerate() {
                let Some(binding) = dialog.binding(*id) else {
                    continue;
                };
                let state = match &binding.value {
                    ControlValue::Flag { checked } => format!("flag, checked: {checked}"),
                    ControlValue::Text { enabled, text, .. } => format!(
                        "{}, enabled: {enabled}, value: '{text}'",
                        binding.option.value_type
                    ),
                };
                println!(
                    "  [{r},{c}] {:<16} {:<20} {state}",
                    binding.label(),
                    binding.option.invocation().unwrap_or_default(),
                );
            }
        }
    }
    println!();
    println!("Command line: {name} {}", dialog.preview());

    Ok(())
}
