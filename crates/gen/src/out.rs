use std::io;
use std::path::Path;
use tracing::debug;

/// Writes a workspace-relative file, creating parent folders.
pub fn write(workdir: &Path, rel: impl AsRef<Path>, content: &str) -> io::Result<()> {
    let path = workdir.join(rel.as_ref());
    debug!(path = %path.display(), "file>");
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, content)
}

/// Creates (or replaces) a workspace-relative symlink.
pub fn symlink(
    workdir: &Path,
    rel: impl AsRef<Path>,
    rel_target: impl AsRef<Path>,
    directory: bool,
) -> io::Result<()> {
    let path = workdir.join(rel.as_ref());
    let target = workdir.join(rel_target.as_ref());
    debug!(path = %path.display(), target = %target.display(), "link>");
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    if path
        .symlink_metadata()
        .map(|m| m.file_type().is_symlink())
        .unwrap_or(false)
    {
        std::fs::remove_file(&path)?;
    }
    platform_symlink(&target, &path, directory)
}

#[cfg(unix)]
fn platform_symlink(target: &Path, path: &Path, _directory: bool) -> io::Result<()> {
    std::os::unix::fs::symlink(target, path)
}

#[cfg(windows)]
fn platform_symlink(target: &Path, path: &Path, directory: bool) -> io::Result<()> {
    if directory {
        std::os::windows::fs::symlink_dir(target, path)
    } else {
        std::os::windows::fs::symlink_file(target, path)
    }
}
