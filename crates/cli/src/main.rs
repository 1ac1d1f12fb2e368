use std::process::ExitCode;

fn main() -> ExitCode {
    replyr_cli::run()
}
