use std::fs;
use std::io;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

/// Directory inside a volume root holding the script pair
pub const SCRIPT_DIR: &str = "common";
pub const MEMFS_NAME: &str = "script.memfs";
pub const MEMBODY_NAME: &str = "script.membody";
const VOLUME_PREFIX: &str = "fsroot";

#[derive(Clone, Debug, PartialEq, Eq)]
/// A `script.memfs` / `script.membody` pair belonging to one volume.
pub struct VolumeSource {
    pub name: String,
    pub memfs: PathBuf,
    pub membody: PathBuf,
}

impl VolumeSource {
    /// Returns the pair under `root`, or `None` if either file is missing.
    pub fn from_root<P: AsRef<Path> + ?Sized>(root: &P) -> Option<Self> {
        let root = root.as_ref();
        let dir = root.join(SCRIPT_DIR);
        let memfs = dir.join(MEMFS_NAME);
        let membody = dir.join(MEMBODY_NAME);
        if !memfs.is_file() || !membody.is_file() {
            return None;
        }
        let name = root
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| VOLUME_PREFIX.to_string());
        Some(VolumeSource {
            name,
            memfs,
            membody,
        })
    }
}

/// Finds the `fsroot*` directories of a game, sorted by name.
pub fn find_volume_roots(path: &str) -> io::Result<Vec<PathBuf>> {
    let mut result = Vec::new();
    for entry in fs::read_dir(path)? {
        let path = entry?.path();
        if path.is_dir()
            && path.file_name().map_or(false, |name| {
                name.to_string_lossy().starts_with(VOLUME_PREFIX)
            })
        {
            result.push(path);
        }
    }
    result.sort();
    Ok(result)
}

/// Collects volumes from a game directory or a single volume root.
///
/// Roots without a script pair are reported and skipped.
pub fn collect_volumes(path: &str) -> io::Result<Vec<VolumeSource>> {
    let pa = Path::new(path);
    if !pa.is_dir() {
        return Err(io::Error::new(
            io::ErrorKind::NotFound,
            format!("Path {} is not a directory", pa.display()),
        ));
    }
    if let Some(volume) = VolumeSource::from_root(pa) {
        return Ok(vec![volume]);
    }
    let mut volumes = Vec::new();
    for root in find_volume_roots(path)? {
        match VolumeSource::from_root(&root) {
            Some(volume) => volumes.push(volume),
            None => {
                eprintln!(
                    "Warning: no {}/{{{}, {}}} in {}",
                    SCRIPT_DIR,
                    MEMFS_NAME,
                    MEMBODY_NAME,
                    root.display()
                );
                crate::COUNTER.inc(crate::types::ScriptResult::Ignored);
            }
        }
    }
    Ok(volumes)
}

pub fn read_file<F: AsRef<Path> + ?Sized>(f: &F) -> io::Result<Vec<u8>> {
    let mut content = Vec::new();
    if f.as_ref() == Path::new("-") {
        io::stdin().read_to_end(&mut content)?;
    } else {
        content = fs::read(f)?;
    }
    Ok(content)
}

pub fn write_file<F: AsRef<Path> + ?Sized>(f: &F) -> io::Result<Box<dyn Write>> {
    Ok(if f.as_ref() == Path::new("-") {
        Box::new(io::stdout())
    } else {
        Box::new(io::BufWriter::new(fs::File::create(f)?))
    })
}

pub fn make_sure_dir_exists<F: AsRef<Path> + ?Sized>(f: &F) -> io::Result<()> {
    let path = f.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

/// Turns a resolved segment name into a flat `.tat` file name.
pub fn sanitize_segment_name(name: &str) -> String {
    let mut name = name.replace(['/', '\\'], "_");
    if !name.ends_with(".tat") {
        name.push_str(".tat");
    }
    name
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "trianglem_tool_{}_{}",
            name,
            std::process::id()
        ));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn make_volume(root: &Path) {
        let dir = root.join(SCRIPT_DIR);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(MEMFS_NAME), b"").unwrap();
        fs::write(dir.join(MEMBODY_NAME), b"RZ").unwrap();
    }

    #[test]
    fn test_sanitize_segment_name() {
        assert_eq!(sanitize_segment_name("100_main/op.tat"), "100_main_op.tat");
        assert_eq!(sanitize_segment_name("a\\b.json"), "a_b.json.tat");
        assert_eq!(sanitize_segment_name("OP_TOP.tat"), "OP_TOP.tat");
    }

    #[test]
    fn test_collect_volumes() {
        let game = temp_dir("collect");
        make_volume(&game.join("fsroot2"));
        make_volume(&game.join("fsroot"));
        fs::create_dir_all(game.join("fsroot3").join(SCRIPT_DIR)).unwrap();
        make_volume(&game.join("data"));
        let volumes = collect_volumes(game.to_str().unwrap()).unwrap();
        let names: Vec<_> = volumes.iter().map(|v| v.name.as_str()).collect();
        assert_eq!(names, vec!["fsroot", "fsroot2"]);
        assert!(volumes[0].memfs.ends_with("fsroot/common/script.memfs"));

        let single = collect_volumes(game.join("fsroot2").to_str().unwrap()).unwrap();
        assert_eq!(single.len(), 1);
        assert_eq!(single[0].name, "fsroot2");
        let _ = fs::remove_dir_all(&game);
    }

    #[test]
    fn test_collect_volumes_missing_dir() {
        assert!(collect_volumes("/nonexistent/trianglem_tool").is_err());
    }
}
