use std::{
    ffi::OsString,
    path::{Component, Path, PathBuf},
};

use flate2::read::GzDecoder;

/// Extracts a `.tar.gz` archive into `dir`.
///
/// Runtime bundles are usually wrapped in a single top-level
/// directory; when every entry lives under one shared toplevel
/// it is stripped, the same way the zip path strips it.
/// Anything else extracts as-is.
pub fn extract_tar_gz(archive: &[u8], dir: &Path) -> Result<(), std::io::Error> {
    std::fs::create_dir_all(dir)?;

    let strip = has_single_toplevel(archive)?;
    let mut tar = tar::Archive::new(GzDecoder::new(archive));
    for entry in tar.entries()? {
        let mut entry = entry?;
        let path = entry.path()?;

        let mut components = path
            .components()
            .filter(|c| matches!(c, Component::Normal(_)));
        if strip {
            components.next();
        }
        let stripped: PathBuf = components.collect();
        if stripped.as_os_str().is_empty() {
            continue;
        }

        let target = dir.join(stripped);
        // Archives don't always carry explicit directory entries
        if let Some(parent) = target.parent() {
            std::fs::create_dir_all(parent)?;
        }
        entry.unpack(target)?;
    }
    Ok(())
}

/// True when every entry is nested under one shared top-level
/// directory. A file sitting at the archive root, or two
/// distinct toplevels, means there is nothing to strip.
fn has_single_toplevel(archive: &[u8]) -> Result<bool, std::io::Error> {
    let mut tar = tar::Archive::new(GzDecoder::new(archive));
    let mut toplevel: Option<OsString> = None;
    for entry in tar.entries()? {
        let entry = entry?;
        let path = entry.path()?;
        let mut components = path
            .components()
            .filter(|c| matches!(c, Component::Normal(_)));
        let Some(Component::Normal(first)) = components.next() else {
            continue;
        };
        if components.next().is_none() && !entry.header().entry_type().is_dir() {
            return Ok(false);
        }
        match &toplevel {
            Some(existing) if existing.as_os_str() != first => return Ok(false),
            Some(_) => {}
            None => toplevel = Some(first.to_owned()),
        }
    }
    Ok(toplevel.is_some())
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::{write::GzEncoder, Compression};
    use std::io::Write;

    fn make_tar_gz(entries: &[(&str, &[u8])]) -> Vec<u8> {
        let mut builder = tar::Builder::new(Vec::new());
        for (name, contents) in entries {
            let mut header = tar::Header::new_gnu();
            header.set_size(contents.len() as u64);
            header.set_mode(0o755);
            header.set_cksum();
            builder.append_data(&mut header, *name, *contents).unwrap();
        }
        let tar_bytes = builder.into_inner().unwrap();
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(&tar_bytes).unwrap();
        encoder.finish().unwrap()
    }

    #[test]
    fn strips_a_single_shared_toplevel() {
        let dir = tempfile::tempdir().unwrap();
        let archive = make_tar_gz(&[
            ("jdk-17/bin/java", b"#!/bin/sh\necho java\n"),
            ("jdk-17/release", b"JAVA_VERSION=17\n"),
        ]);
        extract_tar_gz(&archive, dir.path()).unwrap();

        let java = dir.path().join("bin/java");
        assert!(java.is_file());
        assert!(dir.path().join("release").is_file());
        assert!(!dir.path().join("jdk-17").exists());
        assert_eq!(
            std::fs::read(&java).unwrap(),
            b"#!/bin/sh\necho java\n".to_vec()
        );
    }

    #[test]
    fn keeps_root_level_entries_as_is() {
        let dir = tempfile::tempdir().unwrap();
        let archive = make_tar_gz(&[
            ("release", b"JAVA_VERSION=17\n"),
            ("bin/java", b"#!/bin/sh\necho java\n"),
        ]);
        extract_tar_gz(&archive, dir.path()).unwrap();

        assert_eq!(
            std::fs::read(dir.path().join("release")).unwrap(),
            b"JAVA_VERSION=17\n".to_vec()
        );
        assert!(dir.path().join("bin/java").is_file());
    }

    #[test]
    fn distinct_toplevels_are_not_merged() {
        let dir = tempfile::tempdir().unwrap();
        let archive = make_tar_gz(&[
            ("bin/java", b"#!/bin/sh\necho java\n"),
            ("legal/LICENSE", b"GPLv2 with classpath exception"),
        ]);
        extract_tar_gz(&archive, dir.path()).unwrap();

        assert!(dir.path().join("bin/java").is_file());
        assert!(dir.path().join("legal/LICENSE").is_file());
    }
}
