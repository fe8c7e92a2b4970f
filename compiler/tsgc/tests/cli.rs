//! Driver tests against projects on disk.

#![expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

use std::fs;
use std::path::{Path, PathBuf};

use pretty_assertions::assert_eq;
use tempfile::TempDir;
use tsg_diagnostic::emitter::ColorMode;
use tsgc::commands::{check_paths, fix_paths, CheckOptions, FixOptions, OutputFormat};
use tsgc::DriverError;

const LIBRARY: &str = r"namespace Self
{
    public interface ISelfRequest<TSelf> where TSelf : ISelfRequest<TSelf> { }

    [System.AttributeUsage(System.AttributeTargets.GenericParameter)]
    public sealed class TSelfAttribute : System.Attribute { }
}
";

const BAD: &str = "using Self;\n\nclass Bad<T> : ISelfRequest<T> { }\n";

/// A project with the library, `Bad.cs` and a root `.editorconfig` holding
/// `config` lines.
fn project(config: &str) -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("Lib.cs"), LIBRARY).unwrap();
    fs::write(dir.path().join("Bad.cs"), BAD).unwrap();
    fs::write(
        dir.path().join(".editorconfig"),
        format!("root = true\n\n[*.cs]\n{config}\n"),
    )
    .unwrap();
    dir
}

fn paths(dir: &Path) -> Vec<PathBuf> {
    vec![dir.to_path_buf()]
}

fn check(dir: &Path, format: OutputFormat) -> (tsgc::commands::CheckSummary, String) {
    let options = CheckOptions {
        format,
        color: ColorMode::Never,
    };
    let mut out = Vec::new();
    let summary = check_paths(&paths(dir), &options, &mut out, false).unwrap();
    (summary, String::from_utf8(out).unwrap())
}

#[test]
fn test_check_terminal_report() {
    let dir = project("");
    let (summary, out) = check(dir.path(), OutputFormat::Terminal);

    assert_eq!(summary.documents, 2);
    assert_eq!(summary.warnings, 1);
    assert_eq!(summary.errors, 0);
    assert!(summary.has_findings());
    assert!(out.contains("warning[TSG2]"), "{out}");
    assert!(out.contains("Bad.cs:3:11"), "{out}");
    assert!(!out.contains('\u{1b}'), "no color codes expected: {out}");
}

#[test]
fn test_check_json_report() {
    let dir = project("");
    let (_, out) = check(dir.path(), OutputFormat::Json);

    let report: serde_json::Value = serde_json::from_str(&out).unwrap();
    let entries = report.as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["code"], "TSG2");
    assert_eq!(entries[0]["severity"], "warning");
    assert_eq!(entries[0]["start"]["line"], 3);
    assert_eq!(entries[0]["start"]["column"], 11);
}

#[test]
fn test_check_sarif_report() {
    let dir = project("");
    let (_, out) = check(dir.path(), OutputFormat::Sarif);

    let log: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(log["version"], "2.1.0");
    let run = &log["runs"][0];
    assert_eq!(run["tool"]["driver"]["name"], "tsgc");
    assert_eq!(run["results"][0]["ruleId"], "TSG2");
}

#[test]
fn test_check_clean_project() {
    let dir = project("");
    fs::write(
        dir.path().join("Bad.cs"),
        "using Self;\n\nclass Good<TSelf> : ISelfRequest<TSelf> { }\n",
    )
    .unwrap();
    let (summary, out) = check(dir.path(), OutputFormat::Terminal);
    assert!(!summary.has_findings());
    assert_eq!(out, "");
}

#[test]
fn test_check_severity_from_editorconfig() {
    let dir = project("dotnet_diagnostic.TSG2.severity = error");
    let (summary, out) = check(dir.path(), OutputFormat::Terminal);
    assert_eq!(summary.errors, 1);
    assert!(out.contains("error[TSG2]"), "{out}");

    let dir = project("dotnet_diagnostic.TSG2.severity = none");
    let (summary, _) = check(dir.path(), OutputFormat::Terminal);
    assert!(!summary.has_findings());
}

#[test]
fn test_check_strategies_disabled_from_editorconfig() {
    let dir = project("dotnet_tselfgeneric.tself_param_name.enable = false");
    let (summary, _) = check(dir.path(), OutputFormat::Terminal);
    assert!(!summary.has_findings());
}

#[test]
fn test_fix_rewrites_files() {
    let dir = project("");
    let mut out = Vec::new();
    let summary = fix_paths(&paths(dir.path()), &FixOptions::default(), &mut out).unwrap();

    assert_eq!(summary.applied, 1);
    assert_eq!(summary.files, vec![dir.path().join("Bad.cs")]);
    assert_eq!(
        fs::read_to_string(dir.path().join("Bad.cs")).unwrap(),
        "using Self;\n\nclass Bad<TSelf> : ISelfRequest<TSelf> { }\n"
    );
    let out = String::from_utf8(out).unwrap();
    assert!(out.contains("1 fix in 1 file"), "{out}");

    let (summary, _) = check(dir.path(), OutputFormat::Terminal);
    assert!(!summary.has_findings());
}

#[test]
fn test_fix_with_attribute_key() {
    let dir = project("dotnet_tselfgeneric.tself_attribute_name.enable = true");
    let options = FixOptions {
        key: Some("TSelfNestedFixProviderAttribute".to_string()),
        dry_run: false,
    };
    fix_paths(&paths(dir.path()), &options, Vec::new()).unwrap();

    assert_eq!(
        fs::read_to_string(dir.path().join("Bad.cs")).unwrap(),
        "using Self;\n\nclass Bad<[TSelf] T> : ISelfRequest<T> { }\n"
    );
    let (summary, _) = check(dir.path(), OutputFormat::Terminal);
    assert!(!summary.has_findings());
}

#[test]
fn test_fix_dry_run_leaves_files() {
    let dir = project("");
    let options = FixOptions {
        key: None,
        dry_run: true,
    };
    let mut out = Vec::new();
    let summary = fix_paths(&paths(dir.path()), &options, &mut out).unwrap();

    assert_eq!(summary.files.len(), 1);
    assert_eq!(fs::read_to_string(dir.path().join("Bad.cs")).unwrap(), BAD);
    assert!(String::from_utf8(out).unwrap().contains("would fix"));
}

#[test]
fn test_fix_unknown_key() {
    let dir = project("");
    let options = FixOptions {
        key: Some("NoSuchFix".to_string()),
        dry_run: false,
    };
    let err = fix_paths(&paths(dir.path()), &options, Vec::new()).unwrap_err();
    assert!(matches!(err, DriverError::UnknownFix(key) if key == "NoSuchFix"));
}
