use anyhow::{Context, Result, bail};
use optspec_manifest::{DEFAULT_MANIFEST_NAME, Manifest};
use std::fs;
use std::path::{Path, PathBuf};

/// Load the manifest at `manifest_path`, relative to the current directory.
pub fn load_manifest(manifest_path: &Path) -> Result<Manifest> {
    let cwd = std::env::current_dir().context("failed to get current directory")?;
    let path = resolve_against(&cwd, manifest_path);

    if !path.exists() {
        bail!("manifest not found: {}", path.display());
    }

    Manifest::from_file(&path).with_context(|| format!("failed to load manifest: {}", path.display()))
}

pub fn write_default_manifest(project_dir: &Path, overwrite: bool) -> Result<PathBuf> {
    let dest = project_dir.join(DEFAULT_MANIFEST_NAME);
    if dest.exists() && !overwrite {
        bail!(
            "{DEFAULT_MANIFEST_NAME} already exists in {} (use --force to overwrite)",
            project_dir.display()
        );
    }

    let bytes =
        serde_json::to_vec_pretty(&Manifest::example()).context("failed to serialize manifest")?;
    let mut out = String::from_utf8(bytes).context("manifest is not valid UTF-8")?;
    out.push('\n');

    let tmp = dest.with_extension("tmp");
    fs::write(&tmp, out.as_bytes())
        .with_context(|| format!("failed to write {}", tmp.display()))?;
    if overwrite && dest.exists() {
        fs::remove_file(&dest).with_context(|| format!("failed to remove {}", dest.display()))?;
    }
    fs::rename(&tmp, &dest)
        .with_context(|| format!("failed to move {} into place", dest.display()))?;
    Ok(dest)
}

fn resolve_against(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn make_temp_dir(prefix: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        let pid = std::process::id();
        let dir = std::env::temp_dir().join(format!("optspec-{prefix}-{pid}-{nanos}"));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn write_default_manifest_writes_example() {
        let dir = make_temp_dir("manifest-defaults");
        let dest = write_default_manifest(&dir, false).unwrap();
        assert_eq!(dest, dir.join(DEFAULT_MANIFEST_NAME));

        let contents = fs::read_to_string(&dest).unwrap();
        assert!(contents.ends_with('\n'));
        assert_eq!(Manifest::from_json(&contents).unwrap(), Manifest::example());
        assert!(!dest.with_extension("tmp").exists());

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn write_default_manifest_refuses_to_overwrite_without_force() {
        let dir = make_temp_dir("manifest-overwrite");
        let dest = dir.join(DEFAULT_MANIFEST_NAME);
        fs::write(&dest, "{}").unwrap();

        let err = write_default_manifest(&dir, false).unwrap_err();
        assert!(err.to_string().contains("already exists"), "{err}");
        assert_eq!(fs::read_to_string(&dest).unwrap(), "{}");

        write_default_manifest(&dir, true).unwrap();
        let m = Manifest::from_file(&dest).unwrap();
        assert_eq!(m, Manifest::example());

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn load_manifest_reports_missing_file() {
        let dir = make_temp_dir("manifest-missing");
        let err = load_manifest(&dir.join("nope.json")).unwrap_err();
        assert!(err.to_string().contains("manifest not found"), "{err}");
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn resolve_against_keeps_absolute_paths() {
        let base = Path::new("/base");
        assert_eq!(resolve_against(base, Path::new("m.json")), base.join("m.json"));
        let abs = std::env::temp_dir().join("m.json");
        assert_eq!(resolve_against(base, &abs), abs);
    }
}
