//! Command-line surface
//!
//! Flag names, defaults and the level aliases are part of the stable CLI
//! contract; scripts depend on them. Each option may be given at most
//! once (clap rejects duplicates by default).

use clap::error::ErrorKind;
use clap::Parser;
use sharc_report::{InvalidLevel, Level};

/// The compiler for the Shard Programming Language.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "sharc",
    version,
    about = "The compiler for the Shard Programming Language",
    after_help = "Documentation can be found at https://shardlang.org/doc/"
)]
pub struct Args {
    /// File to compile
    #[arg(short, long, value_name = "FILE", default_value = "main.shd")]
    pub file: String,

    /// File to write to
    #[arg(short, long, value_name = "FILE", default_value = "main.asm")]
    pub output: String,

    /// Print debug information
    #[arg(short, long)]
    pub debug: bool,

    /// Minimum severity to print [fatal|error|warn|note|silent]
    #[arg(
        short = 'l',
        long = "error-level",
        value_name = "LEVEL",
        default_value = "warn",
        value_parser = parse_level
    )]
    pub level: Level,

    /// Disable code context in diagnostics
    #[arg(long = "no-context")]
    pub no_context: bool,

    /// Pipeline verbs to run (default: check)
    #[arg(value_name = "VERB")]
    pub verbs: Vec<String>,
}

impl Args {
    /// Parse the process arguments, exiting on `--help`/`--version` (status
    /// 0) or on a usage error (status 1, pointing at `--help`).
    pub fn parse_or_exit() -> Self {
        match Self::try_parse() {
            Ok(args) => args,
            Err(err) => {
                let _ = err.print();
                let code = match err.kind() {
                    ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
                    _ => {
                        eprintln!("(Run with \x1b[1m--help\x1b[0m for usage information)");
                        1
                    }
                };
                std::process::exit(code)
            }
        }
    }

    /// Whether the easter egg was requested.
    pub fn wants_shark(&self) -> bool {
        self.verbs.iter().any(|v| v == "shark")
    }
}

fn parse_level(s: &str) -> Result<Level, InvalidLevel> {
    s.parse()
}

/// Printed in blue when the `shark` verb is given.
pub const SHARK_ASCII: &str = r#"                                 ,-
                               ,'::|
                              /::::|
                            ,'::::o\                                      _..
         ____........-------,..::?88b                                  ,-' /
 _.--"""". . . .      .   .  .  .  ""`-._                           ,-' .;'
<. - :::::o......  ...   . . .. . .  .  .""--._                  ,-'. .;'
 `-._  ` `":`:`:`::||||:::::::::::::::::.:. .  ""--._ ,'|     ,-'.  .;'
     """_=--       //'doo.. ````:`:`::::::::::.:.:.:. .`-`._-'.   .;'
         ""--.__     P(       \               ` ``:`:``:::: .   .;'
                "\""--.:-.     `.                             .:/
                  \. /    `-._   `.""-----.,-..::(--"".\""`.  `:\
                   `P         `-._ \          `-:\          `. `:\
                                   ""            "            `-._)"#;
