use std::error::Error;
use std::fs::File;
use std::path::PathBuf;
use std::time::Instant;

use legato::diagnostics::Warning;
use legato::dictionary::TextTables;
use legato::Dictionary;

use clap::Parser;

#[derive(Parser, Debug)]
#[clap(
    name = "inspect",
    about = "A program to load an aff/dic pair and summarize the result."
)]
struct Args {
    /// Affix file (*.aff).
    #[clap(short = 'a', long)]
    aff_in: PathBuf,

    /// Word-list file (*.dic).
    #[clap(short = 'd', long)]
    dic_in: PathBuf,

    /// Print every warning instead of only the count.
    #[clap(short = 'w', long)]
    warnings: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    eprintln!("Loading the dictionary...");
    let start = Instant::now();
    let mut warnings: Vec<Warning> = vec![];
    let dict = Dictionary::from_readers_with_sink(
        File::open(args.aff_in)?,
        File::open(args.dic_in)?,
        &mut warnings,
    )?;
    eprintln!("{} seconds", start.elapsed().as_secs_f64());

    let encoding = dict.encoding();
    println!(
        "encoding: {}",
        if encoding.is_empty() {
            "(default ISO-8859-1)"
        } else {
            encoding.name()
        }
    );
    println!("flag mode: {:?}", dict.flag_mode());
    if !dict.language().is_empty() {
        println!("language: {}", dict.language());
    }
    let (kind, prefixes, suffixes, breaks, replacements) = match dict.tables() {
        TextTables::Narrow(t) => (
            "narrow",
            t.prefixes.len(),
            t.suffixes.len(),
            t.break_table.len(),
            t.replacements.len(),
        ),
        TextTables::Wide(t) => (
            "wide",
            t.prefixes.len(),
            t.suffixes.len(),
            t.break_table.len(),
            t.replacements.len(),
        ),
    };
    println!("tables: {}", kind);
    println!("prefixes: {}", prefixes);
    println!("suffixes: {}", suffixes);
    println!("break patterns: {}", breaks);
    println!("replacements: {}", replacements);
    println!("compound rules: {}", dict.compound_rules().len());
    println!("compound patterns: {}", dict.compound_patterns().len());
    println!("flag aliases: {}", dict.flag_aliases().len());
    println!("words: {}", dict.words().len());

    if args.warnings {
        for warning in &warnings {
            eprintln!("warning: {}", warning);
        }
    } else if !warnings.is_empty() {
        eprintln!("{} warnings (rerun with --warnings to list them)", warnings.len());
    }

    Ok(())
}
