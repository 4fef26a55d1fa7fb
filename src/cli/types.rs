use clap::{Parser, Subcommand};

use crate::models::{Extension, Mode, Operation, Stage};

#[derive(Debug, Parser)]
#[command(name = "dpr")]
#[command(about = "Stage collection artifacts and run indexing pipeline processors", long_about = None)]
#[command(version)]
#[command(override_usage = "dpr [config.properties] [OPTIONS] <COMMAND>")]
#[command(subcommand_help_heading = "Commands")]
pub struct Cli {
    /// Print the staging plan and processor command without running anything
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// Print the dry-run plan as JSON
    #[arg(long, global = true, requires = "dry_run")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run the bridge processor for a collection
    Bridge {
        /// Artifact type to produce
        #[arg(value_enum)]
        extension: Extension,

        /// Bridge run mode
        #[arg(value_enum)]
        mode: Mode,

        /// Collection identifier
        collection_id: String,
    },

    /// Stage bridge output into scd/tea_before and run the tea processor
    Tea {
        /// Collection identifier
        collection_id: String,

        /// Address the tea processor reports to
        listener_ip: String,

        /// Listener port
        port: u16,
    },

    /// Stage the previous step's output and run a gateway operation
    Gateway {
        /// Collection identifier
        collection_id: String,

        /// Gateway operation to run
        #[arg(value_enum)]
        operation: Operation,

        /// Gateway run mode
        #[arg(value_enum)]
        mode: Mode,

        /// Stage whose output should be consumed (omit if inputs are already staged)
        #[arg(value_enum)]
        prev_step: Option<Stage>,
    },
}
