use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{info, warn};

/// Platform command that shows `file` in the system file manager.
///
/// macOS and Windows select the file itself; elsewhere the parent directory is
/// opened, since selecting a file depends on the desktop environment.
pub fn reveal_command(file: &Path) -> (String, Vec<String>) {
    if cfg!(target_os = "macos") {
        (
            "open".to_string(),
            vec!["-R".to_string(), file.display().to_string()],
        )
    } else if cfg!(target_os = "windows") {
        (
            "explorer".to_string(),
            vec!["/select,".to_string(), file.display().to_string()],
        )
    } else {
        let parent = file
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        ("xdg-open".to_string(), vec![parent.display().to_string()])
    }
}

/// Reveal the written file. Failures are logged and never abort the run.
pub fn reveal_in_file_manager(file: &Path) {
    let (program, args) = reveal_command(file);

    match Command::new(&program).args(&args).status() {
        Ok(status) if status.success() => {
            info!("📂 Revealed {:?} in file manager", file);
        }
        Ok(status) => {
            warn!("⚠️  {} exited with {}", program, status);
        }
        Err(e) => {
            warn!("⚠️  Failed to reveal file with {}: {}", program, e);
        }
    }
}
