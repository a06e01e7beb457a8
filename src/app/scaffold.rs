use crate::app::models::{Action, ActionKind, Entry};
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Flags controlling how the scaffold touches the filesystem.
#[derive(Debug, Clone, Default)]
pub struct ScaffoldOptions {
    pub dry_run: bool,
    pub force: bool,
    pub default_file_content: String,
}

pub struct ScaffoldBuilder {
    base: PathBuf,
    options: ScaffoldOptions,
}

impl ScaffoldBuilder {
    pub fn new(base: impl Into<PathBuf>, options: ScaffoldOptions) -> Self {
        Self {
            base: base.into(),
            options,
        }
    }

    /// Creates the root and every entry beneath it, returning the actions in order.
    ///
    /// In dry-run mode the same actions are returned but nothing is touched.
    pub fn build(&self, root: &str, entries: &[Entry]) -> Result<Vec<Action>> {
        let mut actions = Vec::with_capacity(entries.len() + 1);

        // components() drops interior `.` so "./proj" and "." resolve cleanly
        let root_abs: PathBuf = self.base.join(root).components().collect();
        actions.push(Action {
            kind: ActionKind::Mkdir,
            path: root_abs.clone(),
        });
        self.ensure_dir(&root_abs)?;

        for entry in entries {
            let target: PathBuf = entry
                .segments
                .iter()
                .fold(root_abs.clone(), |path, segment| path.join(segment));

            if entry.is_dir {
                actions.push(Action {
                    kind: ActionKind::Mkdir,
                    path: target.clone(),
                });
                self.ensure_dir(&target)?;
            } else {
                if let Some(parent) = target.parent() {
                    self.ensure_dir(parent)?;
                }
                actions.push(Action {
                    kind: ActionKind::Touch,
                    path: target.clone(),
                });
                self.write_file(&target)?;
            }
        }

        Ok(actions)
    }

    fn ensure_dir(&self, path: &Path) -> Result<()> {
        if self.options.dry_run {
            return Ok(());
        }
        fs::create_dir_all(path).context(format!("Failed to create directory {:?}", path))
    }

    fn write_file(&self, path: &Path) -> Result<()> {
        if self.options.dry_run {
            return Ok(());
        }

        if path.is_dir() {
            log::warn!("Not writing {:?}: a directory already exists there", path);
            return Ok(());
        }

        if let Ok(meta) = fs::metadata(path) {
            if meta.len() > 0 && !self.options.force {
                log::debug!("Keeping existing content of {:?}", path);
                return Ok(());
            }
        }

        fs::write(path, &self.options.default_file_content)
            .context(format!("Failed to write file {:?}", path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::BTreeMap;
    use tempfile::TempDir;

    fn entry(path: &str, is_dir: bool) -> Entry {
        Entry {
            segments: path.split('/').map(str::to_string).collect(),
            is_dir,
        }
    }

    fn sample() -> Vec<Entry> {
        vec![
            entry("a", true),
            entry("a/b.txt", false),
            entry("c.txt", false),
        ]
    }

    /// Relative path -> file content (None for directories).
    fn snapshot(dir: &Path) -> BTreeMap<PathBuf, Option<String>> {
        fn walk(base: &Path, dir: &Path, out: &mut BTreeMap<PathBuf, Option<String>>) {
            for item in fs::read_dir(dir).unwrap() {
                let path = item.unwrap().path();
                let rel = path.strip_prefix(base).unwrap().to_path_buf();
                if path.is_dir() {
                    out.insert(rel, None);
                    walk(base, &path, out);
                } else {
                    out.insert(rel, Some(fs::read_to_string(&path).unwrap()));
                }
            }
        }
        let mut out = BTreeMap::new();
        walk(dir, dir, &mut out);
        out
    }

    #[test]
    fn creates_root_directories_and_files() {
        let tmp = TempDir::new().unwrap();
        let builder = ScaffoldBuilder::new(tmp.path(), ScaffoldOptions::default());

        let actions = builder.build("root", &sample()).unwrap();

        let root = tmp.path().join("root");
        assert_eq!(
            actions,
            vec![
                Action {
                    kind: ActionKind::Mkdir,
                    path: root.clone()
                },
                Action {
                    kind: ActionKind::Mkdir,
                    path: root.join("a")
                },
                Action {
                    kind: ActionKind::Touch,
                    path: root.join("a").join("b.txt")
                },
                Action {
                    kind: ActionKind::Touch,
                    path: root.join("c.txt")
                },
            ]
        );
        assert!(root.join("a").is_dir());
        assert_eq!(fs::read_to_string(root.join("a/b.txt")).unwrap(), "");
        assert!(root.join("c.txt").is_file());
    }

    #[test]
    fn current_dir_root_maps_to_base() {
        let tmp = TempDir::new().unwrap();
        let builder = ScaffoldBuilder::new(tmp.path(), ScaffoldOptions::default());

        let actions = builder.build(".", &[entry("x.txt", false)]).unwrap();

        assert_eq!(actions[0].path, tmp.path().to_path_buf());
        assert_eq!(actions[1].path, tmp.path().join("x.txt"));
    }

    #[test]
    fn creates_missing_parents_for_files() {
        let tmp = TempDir::new().unwrap();
        let builder = ScaffoldBuilder::new(tmp.path(), ScaffoldOptions::default());

        let actions = builder.build("r", &[entry("deep/er/file.md", false)]).unwrap();

        assert_eq!(actions.len(), 2);
        assert!(tmp.path().join("r/deep/er/file.md").is_file());
    }

    #[test]
    fn new_files_get_default_content() {
        let tmp = TempDir::new().unwrap();
        let options = ScaffoldOptions {
            default_file_content: "TODO\n".to_string(),
            ..Default::default()
        };
        ScaffoldBuilder::new(tmp.path(), options)
            .build("r", &sample())
            .unwrap();

        assert_eq!(fs::read_to_string(tmp.path().join("r/c.txt")).unwrap(), "TODO\n");
    }

    #[test]
    fn existing_content_is_kept_without_force() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("r")).unwrap();
        fs::write(tmp.path().join("r/c.txt"), "mine").unwrap();

        let options = ScaffoldOptions {
            default_file_content: "generated".to_string(),
            ..Default::default()
        };
        let actions = ScaffoldBuilder::new(tmp.path(), options)
            .build("r", &sample())
            .unwrap();

        assert_eq!(fs::read_to_string(tmp.path().join("r/c.txt")).unwrap(), "mine");
        // Skipped writes are still reported as touch
        assert_eq!(actions[3].kind, ActionKind::Touch);
        assert_eq!(actions[3].path, tmp.path().join("r").join("c.txt"));
    }

    #[test]
    fn empty_existing_file_is_filled_without_force() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("r")).unwrap();
        fs::write(tmp.path().join("r/c.txt"), "").unwrap();

        let options = ScaffoldOptions {
            default_file_content: "generated".to_string(),
            ..Default::default()
        };
        ScaffoldBuilder::new(tmp.path(), options)
            .build("r", &sample())
            .unwrap();

        assert_eq!(fs::read_to_string(tmp.path().join("r/c.txt")).unwrap(), "generated");
    }

    #[test]
    fn force_overwrites_existing_content() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("r")).unwrap();
        fs::write(tmp.path().join("r/c.txt"), "mine").unwrap();

        let options = ScaffoldOptions {
            force: true,
            default_file_content: "generated".to_string(),
            ..Default::default()
        };
        ScaffoldBuilder::new(tmp.path(), options)
            .build("r", &sample())
            .unwrap();

        assert_eq!(fs::read_to_string(tmp.path().join("r/c.txt")).unwrap(), "generated");
    }

    #[test]
    fn file_target_that_is_a_directory_is_left_alone() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("r/c.txt")).unwrap();

        let options = ScaffoldOptions {
            force: true,
            ..Default::default()
        };
        let actions = ScaffoldBuilder::new(tmp.path(), options)
            .build("r", &sample())
            .unwrap();

        assert_eq!(actions.len(), 4);
        assert!(tmp.path().join("r/c.txt").is_dir());
    }

    #[test]
    fn second_run_is_idempotent() {
        let tmp = TempDir::new().unwrap();
        let options = ScaffoldOptions {
            default_file_content: "v1".to_string(),
            ..Default::default()
        };
        let builder = ScaffoldBuilder::new(tmp.path(), options);

        let first_actions = builder.build("r", &sample()).unwrap();
        fs::write(tmp.path().join("r/c.txt"), "edited").unwrap();
        let before = snapshot(tmp.path());

        let second_actions = builder.build("r", &sample()).unwrap();

        assert_eq!(first_actions, second_actions);
        assert_eq!(snapshot(tmp.path()), before);
    }

    #[test]
    fn dry_run_reports_same_actions_without_touching_disk() {
        let planned_dir = TempDir::new().unwrap();
        let real_dir = TempDir::new().unwrap();
        fs::write(planned_dir.path().join("keep.txt"), "x").unwrap();
        let before = snapshot(planned_dir.path());

        let planned = ScaffoldBuilder::new(
            planned_dir.path(),
            ScaffoldOptions {
                dry_run: true,
                ..Default::default()
            },
        )
        .build("root", &sample())
        .unwrap();
        let performed = ScaffoldBuilder::new(real_dir.path(), ScaffoldOptions::default())
            .build("root", &sample())
            .unwrap();

        assert_eq!(snapshot(planned_dir.path()), before);
        let relative = |actions: &[Action], base: &Path| -> Vec<(ActionKind, PathBuf)> {
            actions
                .iter()
                .map(|a| (a.kind, a.path.strip_prefix(base).unwrap().to_path_buf()))
                .collect()
        };
        assert_eq!(
            relative(&planned, planned_dir.path()),
            relative(&performed, real_dir.path())
        );
    }
}
