use dpr::process::ShellRunner;
use std::process::ExitCode;

fn main() -> ExitCode {
    dpr::logging::init();
    let code = dpr::cli::run(std::env::args_os(), &ShellRunner);
    ExitCode::from(u8::try_from(code).unwrap_or(1))
}
