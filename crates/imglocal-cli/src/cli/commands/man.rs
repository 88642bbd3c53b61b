//! `imglocal man` – print the man page.

use anyhow::Result;
use clap::Command;
use std::io;

pub fn run_man(cmd: Command) -> Result<()> {
    clap_mangen::Man::new(cmd).render(&mut io::stdout())?;
    Ok(())
}
