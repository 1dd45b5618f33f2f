use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use log::info;
use tempfile::NamedTempFile;

use crate::{RandomiserError, Result};

/// `<dir>/<stem>_<seed>.<ext>`, where `dir` defaults to the input's folder.
pub fn output_path(input: &Path, output_dir: Option<&Path>, seed_label: &str) -> Result<PathBuf> {
    let stem = input
        .file_stem()
        .ok_or_else(|| {
            RandomiserError::InvalidSettings(format!(
                "input path has no file name: {}",
                input.display()
            ))
        })?
        .to_string_lossy();

    let file_name = match input.extension() {
        Some(ext) => format!("{}_{}.{}", stem, seed_label, ext.to_string_lossy()),
        None => format!("{}_{}", stem, seed_label),
    };

    let dir = match output_dir {
        Some(dir) => dir.to_path_buf(),
        None => input.parent().map(Path::to_path_buf).unwrap_or_default(),
    };

    Ok(dir.join(file_name))
}

/// Read the whole input image.
pub fn read_rom(path: &Path) -> Result<Vec<u8>> {
    if path.as_os_str().is_empty() {
        return Err(RandomiserError::MissingInput);
    }

    fs::read(path).map_err(|source| match source.kind() {
        ErrorKind::NotFound => RandomiserError::FileNotFound(path.to_path_buf()),
        _ => RandomiserError::NotReadable {
            path: path.to_path_buf(),
            source,
        },
    })
}

/// An output written to a temporary file next to its destination, not yet
/// visible under its final name.
pub(crate) struct Staged {
    dest: PathBuf,
    tmp: NamedTempFile,
}

fn write_failure(dest: &Path) -> impl Fn(std::io::Error) -> RandomiserError + '_ {
    move |source| RandomiserError::WriteFailure {
        path: dest.to_path_buf(),
        source,
    }
}

pub(crate) fn stage(
    dest: &Path,
    bytes: &[u8],
    permissions: Option<&fs::Permissions>,
) -> Result<Staged> {
    let dir = match dest.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir).map_err(write_failure(dest))?;
    tmp.write_all(bytes).map_err(write_failure(dest))?;
    if let Some(permissions) = permissions {
        tmp.as_file()
            .set_permissions(permissions.clone())
            .map_err(write_failure(dest))?;
    }
    tmp.as_file().sync_all().map_err(write_failure(dest))?;

    Ok(Staged {
        dest: dest.to_path_buf(),
        tmp,
    })
}

/// Move staged files into place in order. If one fails, the ones already
/// moved are removed again; unmoved temporaries are dropped with their files.
pub(crate) fn commit(staged: Vec<Staged>) -> Result<()> {
    let mut placed: Vec<PathBuf> = Vec::with_capacity(staged.len());
    for Staged { dest, tmp } in staged {
        if let Err(e) = tmp.persist(&dest) {
            for path in &placed {
                let _ = fs::remove_file(path);
            }
            return Err(write_failure(&dest)(e.error));
        }
        placed.push(dest);
    }
    Ok(())
}

/// Write every output next to (never over) the input. Outputs get the
/// input's permissions, and either all of them land or none do.
pub fn write_outputs(input: &Path, outputs: &[(&Path, &[u8])]) -> Result<()> {
    for (dest, _) in outputs {
        let same_file = match (fs::canonicalize(input), fs::canonicalize(dest)) {
            (Ok(a), Ok(b)) => a == b,
            _ => input == *dest,
        };
        if same_file {
            return Err(RandomiserError::InvalidSettings(format!(
                "refusing to overwrite the input ROM {}",
                input.display()
            )));
        }
    }

    let permissions = fs::metadata(input)
        .map_err(|source| RandomiserError::NotReadable {
            path: input.to_path_buf(),
            source,
        })?
        .permissions();

    let staged = outputs
        .iter()
        .map(|(dest, bytes)| stage(dest, bytes, Some(&permissions)))
        .collect::<Result<Vec<_>>>()?;
    commit(staged)?;

    for (dest, bytes) in outputs {
        info!("wrote {} bytes to {}", bytes.len(), dest.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind as RunErrorKind;
    use tempfile::tempdir;

    #[test]
    fn name_keeps_extension() {
        let out = output_path(Path::new("roms/Kirby's Adventure.nes"), None, "42").unwrap();
        assert_eq!(out, Path::new("roms").join("Kirby's Adventure_42.nes"));
    }

    #[test]
    fn name_without_extension() {
        let out = output_path(Path::new("kirby"), None, "7").unwrap();
        assert_eq!(out, PathBuf::from("kirby_7"));
    }

    #[test]
    fn only_last_extension_is_split() {
        let out = output_path(Path::new("/tmp/ka.v1.nes"), Some(Path::new("/out")), "abc").unwrap();
        assert_eq!(out, PathBuf::from("/out/ka.v1_abc.nes"));
    }

    #[test]
    fn read_errors_are_categorised() {
        let dir = tempdir().unwrap();
        assert_eq!(read_rom(Path::new("")).unwrap_err().kind(), RunErrorKind::MissingInput);
        assert_eq!(
            read_rom(&dir.path().join("missing.nes")).unwrap_err().kind(),
            RunErrorKind::FileNotFound
        );
        assert_eq!(read_rom(dir.path()).unwrap_err().kind(), RunErrorKind::NotReadable);
    }

    #[test]
    fn staged_write_leaves_no_temp_files() {
        let dir = tempdir().unwrap();
        let dest = dir.path().join("out.nes");
        commit(vec![stage(&dest, &[1, 2, 3], None).unwrap()]).unwrap();

        assert_eq!(fs::read(&dest).unwrap(), vec![1, 2, 3]);
        let entries = fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(entries, 1);
    }

    #[test]
    fn missing_output_dir_is_a_write_failure() {
        let dir = tempdir().unwrap();
        let dest = dir.path().join("no-such-dir").join("out.nes");
        let err = stage(&dest, &[0], None).map(|_| ()).unwrap_err();
        assert_eq!(err.kind(), RunErrorKind::WriteFailure);
        assert!(!dest.exists());
    }

    #[test]
    fn failed_commit_removes_earlier_outputs() {
        let dir = tempdir().unwrap();
        let first = dir.path().join("ka_1.nes");
        let second = dir.path().join("ka_1.spoiler.json");
        // A non-empty directory cannot be replaced by a file.
        fs::create_dir(&second).unwrap();
        fs::write(second.join("keep"), b"x").unwrap();

        let staged = vec![
            stage(&first, &[1, 2], None).unwrap(),
            stage(&second, b"{}", None).unwrap(),
        ];
        let err = commit(staged).unwrap_err();

        assert_eq!(err.kind(), RunErrorKind::WriteFailure);
        assert!(!first.exists());
        assert!(second.is_dir());
        let names: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(names, vec![std::ffi::OsString::from("ka_1.spoiler.json")]);
    }

    #[cfg(unix)]
    #[test]
    fn outputs_copy_input_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        let input = dir.path().join("ka.nes");
        fs::write(&input, [0u8; 4]).unwrap();
        fs::set_permissions(&input, fs::Permissions::from_mode(0o644)).unwrap();

        let dest = dir.path().join("ka_3.nes");
        write_outputs(&input, &[(dest.as_path(), &[1u8; 4][..])]).unwrap();

        let mode = fs::metadata(&dest).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o644);
    }

    #[test]
    fn refuses_to_overwrite_input() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("ka.nes");
        fs::write(&input, [9u8; 4]).unwrap();

        let err = write_outputs(&input, &[(input.as_path(), &[0u8; 4][..])]).unwrap_err();
        assert_eq!(err.kind(), RunErrorKind::InvalidSettings);
        assert_eq!(fs::read(&input).unwrap(), vec![9u8; 4]);
    }
}
