//! Command-line front end for the `catrs` binary.

mod same_file;

use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Parser;

use catrs::{ByteSource, CatConfig, CatError, FormatOptions, Transformer, copy_plain};

use self::same_file::OutputIdentity;

/// Concatenate FILE(s) to standard output.
///
/// With no FILE, or when FILE is -, read standard input.
#[derive(Debug, Parser)]
#[command(
    name = "catrs",
    version,
    after_help = "Examples:\n  catrs f - g  Output f's contents, then standard input, then g's contents.\n  catrs        Copy standard input to standard output."
)]
pub struct Args {
    /// Equivalent to -vET
    #[arg(short = 'A', long)]
    pub show_all: bool,

    /// Number nonempty output lines, overrides -n
    #[arg(short = 'b', long)]
    pub number_nonblank: bool,

    /// Equivalent to -vE
    #[arg(short = 'e')]
    pub ends_nonprinting: bool,

    /// Display $ at end of each line
    #[arg(short = 'E', long)]
    pub show_ends: bool,

    /// Number all output lines
    #[arg(short = 'n', long)]
    pub number: bool,

    /// Suppress repeated empty output lines
    #[arg(short = 's', long)]
    pub squeeze_blank: bool,

    /// Equivalent to -vT
    #[arg(short = 't')]
    pub tabs_nonprinting: bool,

    /// Display TAB characters as ^I
    #[arg(short = 'T', long)]
    pub show_tabs: bool,

    /// (ignored)
    #[arg(short = 'u')]
    pub unbuffered: bool,

    /// Use ^ and M- notation, except for LFD and TAB
    #[arg(short = 'v', long)]
    pub show_nonprinting: bool,

    /// Files to concatenate
    #[arg(value_name = "FILE")]
    pub files: Vec<PathBuf>,
}

impl Args {
    /// Folds the short-option bundles into one set of options.
    pub fn format_options(&self) -> FormatOptions {
        let bundled = self.show_all || self.ends_nonprinting || self.tabs_nonprinting;
        FormatOptions::new()
            .with_show_nonprinting(self.show_nonprinting || bundled)
            .with_show_ends(self.show_ends || self.show_all || self.ends_nonprinting)
            .with_show_tabs(self.show_tabs || self.show_all || self.tabs_nonprinting)
            .with_number(self.number)
            .with_number_nonblank(self.number_nonblank)
            .with_squeeze_blank(self.squeeze_blank)
    }

    fn inputs(&self) -> Vec<PathBuf> {
        if self.files.is_empty() {
            vec![PathBuf::from("-")]
        } else {
            self.files.clone()
        }
    }
}

/// Runs the whole session.
///
/// Returns `Ok(false)` when some input could not be read; `Err` only for
/// failures that stop the session (writing to standard output).
pub fn run(args: &Args) -> Result<bool> {
    let options = args.format_options();
    let config = CatConfig::default().with_options(options);
    log::debug!("options: {options:?}");
    if args.unbuffered {
        log::debug!("-u is accepted and ignored");
    }

    let output_identity = OutputIdentity::of_stdout();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    let mut cat = Transformer::new(config);
    let mut ok = true;

    for path in args.inputs() {
        ok &= cat_one(&path, &mut cat, &mut out, output_identity.as_ref())?;
    }

    cat.finish(&mut out)?;
    Ok(ok)
}

/// Processes one input. Failures local to the input are reported on stderr
/// and turn into `Ok(false)`.
fn cat_one<W: Write>(
    path: &Path,
    cat: &mut Transformer,
    out: &mut W,
    output_identity: Option<&OutputIdentity>,
) -> Result<bool, CatError> {
    let name = path.display();

    let result = if path.as_os_str() == "-" {
        if output_identity.is_some_and(OutputIdentity::is_stdin) {
            eprintln!("catrs: {name}: input file is output file");
            return Ok(false);
        }

        let stdin = io::stdin();
        let mut input = stdin.lock();
        process(&mut input, cat, out)
    } else {
        let mut file = match File::open(path) {
            Ok(file) => file,
            Err(e) => {
                eprintln!("catrs: {name}: {e}");
                return Ok(false);
            }
        };

        if output_identity.is_some_and(|id| id.is_same_file(&file)) {
            eprintln!("catrs: {name}: input file is output file");
            return Ok(false);
        }

        process(&mut file, cat, out)
    };

    match result {
        Ok(()) => Ok(true),
        Err(CatError::Read(e)) => {
            eprintln!("catrs: {name}: {e}");
            Ok(false)
        }
        Err(e) => Err(e),
    }
}

fn process<R, W>(input: &mut R, cat: &mut Transformer, out: &mut W) -> Result<(), CatError>
where
    R: ByteSource + ?Sized,
    W: Write + ?Sized,
{
    let config = cat.config();
    if config.options().is_plain() {
        copy_plain(input, out, config.input_size()).map(|_| ())
    } else {
        cat.transform(input, out)
    }
}
