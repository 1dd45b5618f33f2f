use clap::Parser;
use log::LevelFilter;
use std::path::PathBuf;

use ka_randomiser_core::{run, PaletteChoice, RandomiserSettings};

#[derive(Debug, Parser)]
#[command(name = "ka-randomiser", version, about = "Kirby's Adventure randomiser")]
struct Args {
    /// Kirby's Adventure ROM to randomise. It is never modified.
    #[arg(long)]
    input: PathBuf,

    /// Folder for the randomised ROM (defaults to the input's folder).
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Seed text; a number or a word. Generated when omitted.
    #[arg(long)]
    seed: Option<String>,

    #[arg(long, default_value_t = false)]
    randomize_abilities: bool,

    #[arg(long, default_value_t = false, requires = "randomize_abilities")]
    include_neutral_enemies: bool,

    #[arg(long, default_value_t = false, requires = "randomize_abilities")]
    include_star_rod: bool,

    #[arg(long, default_value_t = false)]
    shuffle_doors: bool,

    /// default, random, gray, light-blue, blue, purple, red, orange,
    /// yellow, light-green or green.
    #[arg(long, default_value = "default")]
    palette: PaletteChoice,

    /// Also write a JSON spoiler log next to the ROM.
    #[arg(long, default_value_t = false)]
    spoiler: bool,

    #[arg(long, short, default_value_t = false)]
    verbose: bool,
}

fn init_logging(verbose: bool) -> Result<(), log::SetLoggerError> {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!("[{}] {}", record.level(), message))
        })
        .level(level)
        .chain(std::io::stderr())
        .apply()?;
    Ok(())
}

fn main() {
    let args = Args::parse();

    if let Err(err) = init_logging(args.verbose) {
        eprintln!("Failed to initialise logging: {err}");
    }

    let settings = RandomiserSettings {
        input_path: args.input,
        output_dir: args.output_dir,
        seed: args.seed,
        randomize_abilities: args.randomize_abilities,
        include_neutral_enemies: args.include_neutral_enemies,
        include_star_rod: args.include_star_rod,
        shuffle_doors: args.shuffle_doors,
        palette: args.palette,
        write_spoiler: args.spoiler,
    };

    match run(settings) {
        Ok(report) => {
            println!("Seed: {}", report.seed.label());
            println!("Randomised ROM: {}", report.output_path.display());
            if let Some(path) = &report.spoiler_path {
                println!("Spoiler log: {}", path.display());
            }
        }
        Err(err) => {
            eprintln!("Error: {err}");
            std::process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use ka_randomiser_core::Palette;

    #[test]
    fn command_is_well_formed() {
        Args::command().debug_assert();
    }

    #[test]
    fn parses_palette_names() {
        let args = Args::try_parse_from([
            "ka-randomiser",
            "--input",
            "ka.nes",
            "--palette",
            "light-green",
        ])
        .unwrap();
        assert_eq!(args.palette, PaletteChoice::Explicit(Palette::LightGreen));
        assert!(!args.shuffle_doors);
    }

    #[test]
    fn dependent_flags_need_ability_randomisation() {
        let err = Args::try_parse_from([
            "ka-randomiser",
            "--input",
            "ka.nes",
            "--include-star-rod",
        ])
        .unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);

        let args = Args::try_parse_from([
            "ka-randomiser",
            "--input",
            "ka.nes",
            "--randomize-abilities",
            "--include-star-rod",
            "--include-neutral-enemies",
            "--seed",
            "7",
        ])
        .unwrap();
        assert!(args.include_star_rod && args.include_neutral_enemies);
        assert_eq!(args.seed.as_deref(), Some("7"));
    }

    #[test]
    fn rejects_unknown_palette() {
        assert!(Args::try_parse_from(["ka-randomiser", "--input", "ka.nes", "--palette", "teal"])
            .is_err());
    }
}
