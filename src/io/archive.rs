use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use zip::ZipArchive;

/// Unpack every entry of a zip archive under `dest_dir`.
///
/// Directory entries are created with their parents; file entries are created
/// or truncated and filled with the entry's bytes. Unix permission bits stored
/// in the archive are applied to what gets written. An empty `dest_dir` extracts
/// relative to the current directory.
///
/// Returns the paths of the files written.
pub fn extract_archive<P: AsRef<Path>, Q: AsRef<Path>>(
    archive_path: P,
    dest_dir: Q,
) -> io::Result<Vec<PathBuf>> {
    let archive_path = archive_path.as_ref();
    let dest_dir = dest_dir.as_ref();

    let file = File::open(archive_path)?;
    let mut archive = ZipArchive::new(file).map_err(zip_error)?;

    if !dest_dir.as_os_str().is_empty() {
        fs::create_dir_all(dest_dir)?;
    }

    let mut written = Vec::new();
    for i in 0..archive.len() {
        let mut entry = archive.by_index(i).map_err(zip_error)?;

        let path = match entry.enclosed_name() {
            Some(name) => dest_dir.join(name),
            None => {
                log::warn!("Skipping archive entry with unsafe path: {}", entry.name());
                continue;
            }
        };
        let mode = entry.unix_mode();

        if entry.is_dir() {
            fs::create_dir_all(&path)?;
            apply_mode(&path, mode)?;
            continue;
        }

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        {
            let mut out = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(&path)?;
            io::copy(&mut entry, &mut out)?;
        }
        apply_mode(&path, mode)?;

        log::info!("{}", path.display());
        written.push(path);
    }

    Ok(written)
}

fn zip_error(e: zip::result::ZipError) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, e)
}

#[cfg(unix)]
fn apply_mode(path: &Path, mode: Option<u32>) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;

    match mode {
        Some(mode) => fs::set_permissions(path, fs::Permissions::from_mode(mode & 0o7777)),
        None => Ok(()),
    }
}

#[cfg(not(unix))]
fn apply_mode(_path: &Path, _mode: Option<u32>) -> io::Result<()> {
    Ok(())
}
