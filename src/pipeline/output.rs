//! Output layout for finished files
//!
//! Each file gets its own base directory, `{folder or "output"}/{stem}`,
//! unique within the batch. Its artifacts are laid out under that base as
//! an ordered map of relative path to content, then written in one pass.

use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::Path;

use log::{debug, warn};

use super::{BatchOutcome, FileArtifacts, SourceFile, Stage, StageError};
use crate::response::modernization::DEFAULT_FILENAME;
use crate::utils::{Error, Result};

pub const DEFAULT_BASE: &str = "output";
pub const IR_FILE: &str = "ir.json";
pub const ANALYSIS_FILE: &str = "ANALYSIS.md";

/// Final path component of a model-chosen filename
fn safe_name(name: &str) -> &str {
    name.rsplit(['/', '\\'])
        .find(|part| !part.is_empty() && *part != "." && *part != "..")
        .unwrap_or(DEFAULT_FILENAME)
}

/// Base directory for one file, distinct from every base in `taken`.
///
/// `{folder}/{stem}` first, then `{folder}/{stem}_{ext}`, then numbered.
pub fn unique_base(source: &SourceFile, taken: &mut HashSet<String>) -> String {
    let folder = source.folder.as_deref().unwrap_or(DEFAULT_BASE);
    let name = Path::new(safe_name(&source.filename));
    let stem = name
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| DEFAULT_BASE.to_string());

    let first = format!("{}/{}", folder, stem);
    let mut base = first.clone();
    if taken.contains(&base) {
        if let Some(ext) = name.extension() {
            base = format!("{}_{}", first, ext.to_string_lossy());
        }
    }
    let mut n = 2;
    while taken.contains(&base) {
        base = format!("{}_{}", first, n);
        n += 1;
    }

    taken.insert(base.clone());
    base
}

/// Relative path -> content for every artifact of one file
pub fn artifact_files(
    base: &str,
    source: &SourceFile,
    artifacts: &FileArtifacts,
) -> Result<BTreeMap<String, String>> {
    let mut files = BTreeMap::new();

    files.insert(
        format!("{}/modernized/{}", base, safe_name(&artifacts.modernization.filename)),
        artifacts.modernization.modernized_code.clone(),
    );
    for doc in artifacts.documents.iter() {
        files.insert(format!("{}/docs/{}", base, doc.name), doc.content.clone());
    }
    files.insert(
        format!("{}/skeleton/{}", base, safe_name(&source.filename)),
        artifacts.skeleton.clone(),
    );

    let ir = serde_json::to_string_pretty(&artifacts.ir)
        .map_err(|e| Error::Io(format!("cannot serialize IR: {}", e)))?;
    files.insert(format!("{}/analysis/{}", base, IR_FILE), ir);
    files.insert(format!("{}/analysis/{}", base, ANALYSIS_FILE), artifacts.analysis.clone());

    Ok(files)
}

/// Write every entry under `root`, creating directories; returns the count
pub fn write_outputs(root: &Path, files: &BTreeMap<String, String>) -> Result<usize> {
    for (relative, content) in files {
        let path = root.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, content)?;
        debug!("Wrote {}", path.display());
    }
    Ok(files.len())
}

/// One file's layout on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Written {
    pub source: String,
    pub base: String,
    pub files: usize,
}

/// Write the layout of every successful file under `root`.
///
/// A file whose layout cannot be written becomes an output-stage failure
/// in `outcome`; the remaining files are still written.
pub fn write_batch(root: &Path, outcome: &mut BatchOutcome) -> Vec<Written> {
    let mut taken = HashSet::new();
    let mut written = Vec::new();

    for file in outcome.files.iter_mut() {
        let Ok(artifacts) = &file.result else {
            continue;
        };
        let base = unique_base(&file.source, &mut taken);
        let result = artifact_files(&base, &file.source, artifacts)
            .and_then(|layout| write_outputs(root, &layout));

        match result {
            Ok(files) => written.push(Written {
                source: file.source.path(),
                base,
                files,
            }),
            Err(error) => {
                warn!("{}: cannot write {}: {}", file.source.path(), base, error);
                file.result = Err(StageError {
                    stage: Stage::Output,
                    error,
                });
            }
        }
    }

    written
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::fixtures::*;
    use crate::ir::ProjectIR;
    use crate::pipeline::FileOutcome;
    use crate::render::render_bundle;
    use crate::response::Modernization;
    use pretty_assertions::assert_eq;

    fn artifacts_for(ir: ProjectIR, filename: &str) -> FileArtifacts {
        FileArtifacts {
            skeleton: "class OrderService: ...".to_string(),
            analysis: format!("# {} analysis", ir.original_filename),
            documents: render_bundle(&ir, "old", "new", "Typed"),
            modernization: Modernization {
                modernized_code: format!("new {}", ir.original_filename),
                filename: filename.to_string(),
                changes_summary: "Typed".to_string(),
                structured: true,
            },
            ir,
        }
    }

    fn artifacts(filename: &str) -> FileArtifacts {
        artifacts_for(sample_ir(), filename)
    }

    fn done(source: SourceFile, ir: ProjectIR) -> FileOutcome {
        FileOutcome {
            source,
            result: Ok(artifacts_for(ir, "modernized_code.txt")),
        }
    }

    fn paths_under(root: &Path, base: &str) -> Vec<String> {
        let mut found = Vec::new();
        for dir in ["analysis", "docs", "modernized", "skeleton"] {
            let Ok(entries) = fs::read_dir(root.join(base).join(dir)) else {
                continue;
            };
            for entry in entries {
                let name = entry.unwrap().file_name().to_string_lossy().into_owned();
                found.push(format!("{}/{}/{}", base, dir, name));
            }
        }
        found.sort();
        found
    }

    #[test]
    fn test_layout_under_base() {
        let source = SourceFile::new("main.py", "python", "old");
        let files = artifact_files("output/main", &source, &artifacts("order_service.py")).unwrap();
        let paths: Vec<&str> = files.keys().map(String::as_str).collect();

        assert_eq!(
            paths,
            vec![
                "output/main/analysis/ANALYSIS.md",
                "output/main/analysis/ir.json",
                "output/main/docs/API_REFERENCE.md",
                "output/main/docs/ARCHITECTURE.md",
                "output/main/docs/MASTER_DOCUMENTATION.md",
                "output/main/docs/MIGRATION_GUIDE.md",
                "output/main/docs/README.md",
                "output/main/docs/TECHNICAL_DEBT.md",
                "output/main/docs/TESTING_GUIDE.md",
                "output/main/modernized/order_service.py",
                "output/main/skeleton/main.py",
            ]
        );
        assert_eq!(files["output/main/modernized/order_service.py"], "new main.py");
    }

    #[test]
    fn test_unique_base_per_file() {
        let mut taken = HashSet::new();
        let a = SourceFile::new("a.py", "python", "");
        let a_js = SourceFile::new("a.js", "javascript", "");
        let billing = SourceFile::new("a.py", "python", "").with_folder("billing");

        assert_eq!(unique_base(&a, &mut taken), "output/a");
        assert_eq!(unique_base(&a_js, &mut taken), "output/a_js");
        assert_eq!(unique_base(&a, &mut taken), "output/a_py");
        assert_eq!(unique_base(&a, &mut taken), "output/a_2");
        assert_eq!(unique_base(&billing, &mut taken), "billing/a");
    }

    #[test]
    fn test_model_filename_cannot_escape_base() {
        let source = SourceFile::new("main.py", "python", "");
        let files = artifact_files("output/main", &source, &artifacts("../../etc/passwd")).unwrap();
        assert!(files.contains_key("output/main/modernized/passwd"));

        let files = artifact_files("output/main", &source, &artifacts("..")).unwrap();
        assert!(files.contains_key("output/main/modernized/modernized_code.txt"));
    }

    #[test]
    fn test_ir_json_round_trips() {
        let source = SourceFile::new("main.py", "python", "");
        let files = artifact_files("output/main", &source, &artifacts("x.py")).unwrap();
        let ir = crate::ir::validate(&files["output/main/analysis/ir.json"]).unwrap();
        assert_eq!(ir, sample_ir());
    }

    #[test]
    fn test_write_outputs() {
        let dir = tempfile::tempdir().unwrap();
        let mut files = BTreeMap::new();
        files.insert("output/docs/README.md".to_string(), "# readme".to_string());
        files.insert("output/skeleton/main.py".to_string(), "pass".to_string());

        let written = write_outputs(dir.path(), &files).unwrap();
        assert_eq!(written, 2);
        assert_eq!(
            fs::read_to_string(dir.path().join("output/docs/README.md")).unwrap(),
            "# readme"
        );
        assert_eq!(
            fs::read_to_string(dir.path().join("output/skeleton/main.py")).unwrap(),
            "pass"
        );
    }

    #[test]
    fn test_batch_files_never_share_paths() {
        let dir = tempfile::tempdir().unwrap();
        let mut outcome = BatchOutcome {
            files: vec![
                done(SourceFile::new("a.py", "python", ""), sample_ir()),
                done(SourceFile::new("b.py", "python", ""), minimal_ir()),
            ],
        };

        let written = write_batch(dir.path(), &mut outcome);
        let bases: Vec<&str> = written.iter().map(|w| w.base.as_str()).collect();
        assert_eq!(bases, vec!["output/a", "output/b"]);
        assert_eq!(written[0].files, 11);
        assert_eq!(written[1].files, 10);

        let a = paths_under(dir.path(), "output/a");
        let b = paths_under(dir.path(), "output/b");
        assert_eq!(a.len(), 11);
        assert_eq!(b.len(), 10);
        assert!(a.contains(&"output/a/docs/TECHNICAL_DEBT.md".to_string()));
        assert!(!b.contains(&"output/b/docs/TECHNICAL_DEBT.md".to_string()));

        let master_a = fs::read_to_string(dir.path().join("output/a/docs/MASTER_DOCUMENTATION.md")).unwrap();
        let master_b = fs::read_to_string(dir.path().join("output/b/docs/MASTER_DOCUMENTATION.md")).unwrap();
        assert!(master_a.contains("## main.py → order_service.py"));
        assert!(master_b.contains("## script.py → script_service.py"));
        assert_eq!(
            fs::read_to_string(dir.path().join("output/a/modernized/modernized_code.txt")).unwrap(),
            "new main.py"
        );
        assert_eq!(
            fs::read_to_string(dir.path().join("output/b/modernized/modernized_code.txt")).unwrap(),
            "new script.py"
        );
    }

    #[test]
    fn test_write_failure_only_fails_its_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("output")).unwrap();
        // A plain file where b.py's base directory would go.
        fs::write(dir.path().join("output/b"), "blocker").unwrap();

        let mut outcome = BatchOutcome {
            files: vec![
                done(SourceFile::new("a.py", "python", ""), sample_ir()),
                done(SourceFile::new("b.py", "python", ""), minimal_ir()),
                done(SourceFile::new("c.py", "python", ""), minimal_ir()),
            ],
        };

        let written = write_batch(dir.path(), &mut outcome);
        let sources: Vec<&str> = written.iter().map(|w| w.source.as_str()).collect();
        assert_eq!(sources, vec!["a.py", "c.py"]);
        assert_eq!(outcome.succeeded(), 2);

        let failures: Vec<_> = outcome.failures().collect();
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].0.filename, "b.py");
        assert_eq!(failures[0].1.stage, Stage::Output);
        assert_eq!(failures[0].1.error.kind(), "Io");
        assert!(dir.path().join("output/c/docs/README.md").exists());
    }
}
