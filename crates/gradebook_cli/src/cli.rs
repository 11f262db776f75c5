//! CLI argument definitions for the gradebook.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "gradebook",
    version,
    about = "Record student grades, compute GPA and compare saved records"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Directory holding saved records (overrides GRADEBOOK_RECORDS_DIR).
    #[arg(long = "records-dir", value_name = "DIR", global = true)]
    pub records_dir: Option<PathBuf>,

    /// Log level: trace|debug|info|warn|error (overrides GRADEBOOK_LOG_LEVEL).
    #[arg(long = "log-level", global = true)]
    pub log_level: Option<String>,

    /// Absolute directory for rolling log files (overrides GRADEBOOK_LOG_DIR).
    #[arg(long = "log-dir", value_name = "DIR", global = true)]
    pub log_dir: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compute a GPA from subjects and save the record.
    Calc(CalcArgs),

    /// List saved record ids.
    List,

    /// Print one saved record.
    Show {
        /// Registration number of the record.
        #[arg(value_name = "REG_NO")]
        reg_no: String,
    },

    /// Export one saved record to a text file.
    Export {
        #[arg(value_name = "REG_NO")]
        reg_no: String,
        /// Destination text file.
        #[arg(value_name = "DEST")]
        destination: PathBuf,
    },

    /// Print `name<TAB>gpa` for every saved record.
    Compare,
}

#[derive(Args, Debug)]
pub struct CalcArgs {
    /// Student name.
    #[arg(long)]
    pub name: String,

    /// Registration number; also the record file name.
    #[arg(long = "reg-no")]
    pub reg_no: String,

    /// Subject as `name:grade:credits`, e.g. `Math:A:3`. Repeatable.
    #[arg(long = "subject", value_name = "SUBJECT", required = true)]
    pub subjects: Vec<String>,

    /// Print the GPA without saving the record.
    #[arg(long = "no-save")]
    pub no_save: bool,
}
