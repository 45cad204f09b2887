use std::fs;

use clap::Parser;
use reckon::sheet::worksheet::Worksheet;

/// reckon deduces the inputs of a semicolon-separated calculation sheet,
/// evaluates it, and prints the outputs and result.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Tells reckon to read the sheet from a file instead of the command
    /// line.
    #[arg(short, long)]
    file: bool,

    /// Supplies a value for an input variable. May be repeated.
    #[arg(short, long = "var", value_name = "NAME=VALUE")]
    vars: Vec<String>,

    /// Only lists the input variables the sheet requires, without
    /// evaluating.
    #[arg(short, long)]
    inputs: bool,

    contents: String,
}

fn main() {
    let args = Args::parse();

    let text = if args.file {
        fs::read_to_string(&args.contents).unwrap_or_else(|_| {
            eprintln!("Failed to read the input file '{}'. Perhaps this file does not exist?",
                      &args.contents);
            std::process::exit(1);
        })
    } else {
        args.contents
    };

    let mut sheet = Worksheet::new();
    if let Err(e) = sheet.set_text(&text) {
        eprintln!("{e}");
        std::process::exit(1);
    }

    if args.inputs {
        for (name, _) in sheet.inputs() {
            println!("{}", sheet.display_name(name));
        }
        return;
    }

    for var in &args.vars {
        match var.split_once('=') {
            Some((name, value)) => sheet.set_input(name.trim(), value.trim()),
            None => {
                eprintln!("Invalid --var '{var}'. Expected NAME=VALUE.");
                std::process::exit(1);
            },
        }
    }

    match sheet.calculate() {
        Ok(outcome) => {
            for (name, value) in outcome.outputs() {
                println!("{} = {}", sheet.display_name(name), value);
            }
            if let Some(result) = outcome.result() {
                println!("{result}");
            }
        },
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        },
    }
}
