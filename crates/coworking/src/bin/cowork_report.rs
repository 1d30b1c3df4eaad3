//! cowork-report - Run analytical reports over a coworking snapshot.

fn main() -> std::process::ExitCode {
    coworking::cmd::report::main()
}
