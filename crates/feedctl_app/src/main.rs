#[cfg(unix)]
mod platform;

#[cfg(unix)]
fn main() -> anyhow::Result<()> {
    platform::run_app()
}

#[cfg(not(unix))]
fn main() {
    eprintln!("feedctl needs a Unix terminal.");
}
