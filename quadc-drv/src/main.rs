use std::process::ExitCode;

fn main() -> ExitCode {
    let args = std::env::args().skip(1);
    let code = quadc_drv::run(args);
    ExitCode::from(code as u8)
}
