use std::process::Stdio;
use tokio::process::Command;

/// The desktop's "open this URL" command.
pub fn platform_opener() -> &'static str {
    if cfg!(target_os = "macos") {
        "open"
    } else if cfg!(target_os = "windows") {
        "explorer"
    } else {
        "xdg-open"
    }
}

/// Fire-and-forget: hands `url` to the opener and does not wait for it.
pub fn open_url(program: &str, url: &str) {
    let spawned = Command::new(program)
        .arg(url)
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn();

    match spawned {
        Ok(_) => tracing::info!("Opened {}", url),
        Err(e) => tracing::warn!("Failed to open {} with '{}': {}", url, program, e),
    }
}
