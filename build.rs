//! Build script rendering man pages for `cloudpayload` and its subcommands.
//!
//! Pages land in `OUT_DIR` as `cloudpayload.1` plus one
//! `cloudpayload-<subcommand>.1` per subcommand for packaging.

use std::env;
use std::error::Error;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use clap::{Command, CommandFactory};
use clap_mangen::Man;

#[path = "src/cli/mod.rs"]
mod cli;

fn main() -> Result<(), Box<dyn Error>> {
    let mut stdout = io::stdout();
    for watched in ["build.rs", "src/cli/mod.rs"] {
        writeln!(stdout, "cargo:rerun-if-changed={watched}")?;
    }

    let out_dir = env::var_os("OUT_DIR")
        .map(PathBuf::from)
        .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "OUT_DIR was not set"))?;

    let root = cli::Cli::command();
    render_page(&root, &out_dir.join("cloudpayload.1"))?;
    for sub in root.get_subcommands() {
        let page = format!("cloudpayload-{}.1", sub.get_name());
        render_page(sub, &out_dir.join(page))?;
    }
    Ok(())
}

fn render_page(command: &Command, target: &Path) -> Result<(), Box<dyn Error>> {
    let mut rendered = Vec::new();
    Man::new(command.clone()).render(&mut rendered)?;
    fs::write(target, rendered)?;
    Ok(())
}
