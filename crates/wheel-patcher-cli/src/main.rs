//! wheel-patcher CLI - Add files to built Python wheels
//!
//! Commands:
//! - `wheel-patcher add` - Add a single file to a wheel
//! - `wheel-patcher apply` - Add every file listed in a JSON manifest
//! - `wheel-patcher list` - List the contents of a wheel
//! - `wheel-patcher extract` - Extract a wheel to a directory

use clap::{Parser, Subcommand};

mod add;
mod apply;
mod inspect;
mod logging;
mod output;

#[cfg(test)]
mod test_support;

#[derive(Parser)]
#[command(name = "wheel-patcher")]
#[command(author, version, about = "Add files to Python wheels without rebuilding", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a file to a wheel
    Add {
        /// Path to the wheel file
        wheel: String,

        /// File to add
        file: String,

        /// Destination path in the wheel; a `.dist-info/` prefix targets the
        /// metadata directory (default: file name at the wheel root)
        #[arg(short, long)]
        dest: Option<String>,

        /// Output wheel path (default: <wheel>-patched.whl)
        #[arg(short, long)]
        output: Option<String>,

        /// Overwrite the input wheel
        #[arg(long)]
        in_place: bool,

        /// Replace files that already exist in the wheel
        #[arg(short, long)]
        force: bool,
    },

    /// Add files listed in a JSON manifest
    Apply {
        /// Path to the wheel file
        wheel: String,

        /// Manifest of the form {"files": [{"source": ..., "dest": ...}]}
        #[arg(short, long)]
        manifest: String,

        /// Output wheel path (default: <wheel>-patched.whl)
        #[arg(short, long)]
        output: Option<String>,

        /// Overwrite the input wheel
        #[arg(long)]
        in_place: bool,

        /// Replace files that already exist in the wheel
        #[arg(short, long)]
        force: bool,
    },

    /// List the contents of a wheel
    List {
        /// Path to the wheel file
        wheel: String,

        /// Check every file against its RECORD hash and size
        #[arg(long)]
        verify: bool,
    },

    /// Extract a wheel to a directory
    Extract {
        /// Path to the wheel file
        wheel: String,

        /// Output directory (default: ./<wheel name without extension>)
        #[arg(short, long)]
        output: Option<String>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    match cli.command {
        Commands::Add {
            wheel,
            file,
            dest,
            output,
            in_place,
            force,
        } => {
            add::run(&wheel, &file, dest.as_deref(), output, in_place, force)?;
        }
        Commands::Apply {
            wheel,
            manifest,
            output,
            in_place,
            force,
        } => {
            apply::run(&wheel, &manifest, output, in_place, force)?;
        }
        Commands::List { wheel, verify } => {
            inspect::list(&wheel, verify)?;
        }
        Commands::Extract { wheel, output } => {
            inspect::extract(&wheel, output)?;
        }
    }

    Ok(())
}
