use std::path::{Path, PathBuf};

pub fn data_dir() -> PathBuf {
    // On macOS and Linux, use ~/.local/share/zones/ (XDG standard)
    // instead of macOS Application Support for consistency
    #[cfg(unix)]
    {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("/tmp"))
            .join(".local")
            .join("share")
            .join("zones")
    }
    #[cfg(windows)]
    {
        // Portable data directory beside the executable wins
        if let Some(dir) = beside_exe("data") {
            return dir;
        }

        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("zones")
    }
}

pub fn config_dir() -> PathBuf {
    #[cfg(windows)]
    {
        if let Ok(exe_path) = std::env::current_exe() {
            if let Some(exe_dir) = exe_path.parent() {
                if exe_dir.join("config.toml").exists() {
                    return exe_dir.to_path_buf();
                }
            }
        }
    }

    #[cfg(unix)]
    {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("zones")
    }

    #[cfg(windows)]
    {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("zones")
    }
}

pub fn temp_dir() -> PathBuf {
    std::env::temp_dir()
}

pub fn cache_dir() -> PathBuf {
    #[cfg(unix)]
    {
        dirs::home_dir()
            .unwrap_or_else(|| temp_dir())
            .join(".cache")
            .join("zones")
    }
    #[cfg(windows)]
    {
        dirs::cache_dir()
            .unwrap_or_else(|| temp_dir())
            .join("zones")
    }
}

#[cfg(windows)]
fn beside_exe(name: &str) -> Option<PathBuf> {
    let exe_path = std::env::current_exe().ok()?;
    let dir = exe_path.parent()?.join(name);
    dir.exists().then_some(dir)
}

#[cfg(target_os = "macos")]
fn opener_command(target: &str) -> std::process::Command {
    let mut cmd = std::process::Command::new("open");
    cmd.arg(target);
    cmd
}

#[cfg(all(unix, not(target_os = "macos")))]
fn opener_command(target: &str) -> std::process::Command {
    let mut cmd = std::process::Command::new("xdg-open");
    cmd.arg(target);
    cmd
}

#[cfg(windows)]
fn opener_command(target: &str) -> std::process::Command {
    let mut cmd = std::process::Command::new("cmd");
    // The empty string is the window title slot of `start`.
    cmd.args(["/C", "start", "", target]);
    cmd
}

/// Hand an address (or a local document path) to the desktop's default
/// browser. Returns once the opener process has been spawned.
pub fn open_in_browser(target: &str) -> anyhow::Result<()> {
    let mut cmd = opener_command(target);
    cmd.stdin(std::process::Stdio::null())
        .stdout(std::process::Stdio::null())
        .stderr(std::process::Stdio::null());
    cmd.spawn()
        .map_err(|e| anyhow::anyhow!("failed to launch browser for {}: {}", target, e))?;
    Ok(())
}

/// `file://` form of a local document path, for handing to the browser.
pub fn file_url(path: &Path) -> String {
    let display = path.display().to_string();
    if display.starts_with('/') {
        format!("file://{}", display)
    } else {
        format!("file:///{}", display.replace('\\', "/"))
    }
}
