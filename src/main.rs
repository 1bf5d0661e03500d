use std::io::{IsTerminal, Read, Write};

use clap::{Arg, ArgAction, Command};
use svgfont::{convert_with, Include, Options, Tx, FONT_FACE_ATTRS};

fn main() {
    if let Err(e) = run() {
        eprintln!("{e}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let matches = cli().get_matches();

    let mut options = Options::default();
    if let Some(text) = matches.get_one::<String>("include") {
        options.include = Some(Include::Text(text.clone()));
    }

    for &name in FONT_FACE_ATTRS {
        if let Some(value) = matches.get_one::<String>(name) {
            options.font_face_attrs.push((name.to_string(), value.clone()));
        }
    }

    let paths: Vec<&String> = matches
        .get_many::<String>("paths")
        .map(Iterator::collect)
        .unwrap_or_default();

    // On a terminal the font comes from the first path, otherwise it is
    // piped in and the first path already names the destination.
    let (data, dest) = if std::io::stdin().is_terminal() {
        let Some(src) = paths.first() else {
            cli().print_help()?;
            return Ok(());
        };
        (std::fs::read(src.as_str())?, paths.get(1).map(|p| p.as_str()))
    } else {
        let mut data = vec![];
        std::io::stdin().read_to_end(&mut data)?;
        (data, paths.first().map(|p| p.as_str()))
    };

    let output = convert_with(&data, &options, &Tx::from_env())?;
    let bytes = output.into_bytes();

    match dest {
        Some(path) => std::fs::write(path, bytes)?,
        None => std::io::stdout().write_all(&bytes)?,
    }

    Ok(())
}

fn cli() -> Command {
    let mut command = Command::new("svgfont")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Converts OpenType fonts into subsetted SVG font documents.")
        .override_usage(
            "svgfont <src> [dest] [options]\n       \
             cat <font> | svgfont [dest] [options]",
        )
        .disable_version_flag(true)
        .arg(
            Arg::new("version")
                .short('v')
                .long("version")
                .action(ArgAction::Version)
                .help("Print version"),
        )
        .arg(
            Arg::new("include")
                .short('i')
                .long("include")
                .alias("in")
                .short_alias('g')
                .value_name("TEXT")
                .help("Characters whose glyphs the output should cover"),
        )
        .arg(
            Arg::new("paths")
                .value_name("SRC [DEST]")
                .num_args(0..=2)
                .help("Font file to convert and optional destination"),
        )
        .after_help(
            "Every font-face attribute is also accepted as an option and \
             overwrites the attribute in the output, for example \
             --font-weight 400. The SVGFONT_TX environment variable \
             overrides the tx executable.",
        );

    for &name in FONT_FACE_ATTRS {
        command = command
            .arg(Arg::new(name).long(name).value_name("VALUE").hide(true));
    }

    command
}
