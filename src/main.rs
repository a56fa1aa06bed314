// No console window in release builds.
#![cfg_attr(
    all(target_os = "windows", not(debug_assertions)),
    windows_subsystem = "windows"
)]

#[cfg(target_os = "windows")]
mod windows_main;

fn main() {
    let debug = std::env::args().any(|arg| arg == "--debug");
    podium::logging::init(debug);

    #[cfg(target_os = "windows")]
    windows_main::run();

    #[cfg(not(target_os = "windows"))]
    {
        tracing::error!("podium only runs on Windows");
        std::process::exit(1);
    }
}
