use std::path::{Path, PathBuf};

use clap::{Parser, ValueEnum};

use cfg_rewrite::{Pass, Pipeline};

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum Format {
    /// Bison rules, without actions
    Bison,
    /// A map from production names to rule lists
    Snapshot,
}

impl Format {
    /// Guesses the format of a file from its extension.
    pub fn detect(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("rb") | Some("snapshot") => Format::Snapshot,
            _ => Format::Bison,
        }
    }
}

#[derive(Parser, Debug)]
#[command(version, about)]
pub struct Cli {
    /// File containing the grammar
    pub input: PathBuf,

    /// Input format (default: detected from the extension, `.rb` is a snapshot)
    #[arg(long, value_enum, value_name = "FORMAT")]
    pub from: Option<Format>,

    /// Output format
    #[arg(long, value_enum, value_name = "FORMAT", default_value = "bison")]
    pub to: Format,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Pass to run, in order; repeatable (default: remove-redundant-rules,
    /// remove-indirect-left-recursion, remove-direct-left-recursion,
    /// inline-singleton-productions)
    #[arg(short, long = "pass", value_name = "PASS")]
    pub passes: Vec<Pass>,

    /// When a pass does not converge, write its last grammar instead of failing
    #[arg(long)]
    pub keep_last_snapshot: bool,
}

impl Cli {
    pub fn input_format(&self) -> Format {
        self.from.unwrap_or_else(|| Format::detect(&self.input))
    }

    pub fn pipeline(&self) -> Pipeline {
        if self.passes.is_empty() {
            Pipeline::default()
        } else {
            Pipeline::new(self.passes.iter().copied())
        }
    }
}
