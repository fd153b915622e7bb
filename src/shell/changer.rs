use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Interpreter used when `$SHELL` is not set
pub const DEFAULT_SHELL: &str = "/bin/bash";

/// The shell to name in the script's shebang
pub fn current_shell() -> String {
    std::env::var("SHELL")
        .ok()
        .filter(|shell| !shell.is_empty())
        .unwrap_or_else(|| DEFAULT_SHELL.to_string())
}

/// Quote `value` so any POSIX shell reads it back as one literal word
pub fn shell_quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', r"'\''"))
}

/// Script that changes into `path` when sourced
pub fn cd_script(shell: &str, path: &str) -> String {
    format!("#!{}\ncd {}\n", shell, shell_quote(path))
}

/// Write the change-directory script for `path` to `script_path`
///
/// Any partially written script is removed if writing fails.
pub fn write_cd_script(script_path: &Path, shell: &str, path: &str) -> Result<()> {
    let result = fs::write(script_path, cd_script(shell, path))
        .and_then(|()| make_executable(script_path));

    if let Err(err) = result {
        let _ = fs::remove_file(script_path);
        return Err(err).with_context(|| {
            format!(
                "Something went wrong while preparing to change directory: {}",
                script_path.display()
            )
        });
    }
    Ok(())
}

#[cfg(unix)]
fn make_executable(path: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o755))
}

#[cfg(not(unix))]
fn make_executable(_path: &Path) -> std::io::Result<()> {
    Ok(())
}
