//! `imglocal completions <shell>` – print shell completions.

use clap::Command;
use clap_complete::Shell;
use std::io;

pub fn run_completions(shell: Shell, cmd: &mut Command) {
    let name = cmd.get_name().to_string();
    clap_complete::generate(shell, cmd, name, &mut io::stdout());
}
