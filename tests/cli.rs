use std::fs;
use std::path::Path;
use std::process::{Command, Output};

fn topo_canon_cmd() -> Command {
    Command::new(env!("CARGO_BIN_EXE_topo-canon"))
}

fn run(args: &[&str]) -> Output {
    topo_canon_cmd()
        .args(args)
        .output()
        .expect("failed to run topo-canon")
}

fn path_str(p: &Path) -> &str {
    p.to_str().expect("utf-8 temp path")
}

#[test]
fn grouped_run_writes_derived_output() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let input = tmp.path().join("day1.txt");
    fs::write(&input, "A,4,99\nA,2,5&10\nA,1,5&10\nA,3,6&1\n").expect("write input");

    let output = run(&[path_str(&input)]);
    assert!(
        output.status.success(),
        "grouped run should exit 0: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let written = fs::read_to_string(tmp.path().join("day1_canon.txt")).expect("derived output");
    assert_eq!(written, "A,1,500\nA,2,5\nA,3,600\nA,4,99\n");
}

#[test]
fn explicit_output_and_adjacent_mode() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let input = tmp.path().join("in.txt");
    let out = tmp.path().join("marked.txt");
    fs::write(&input, "S1,1,5&7\nS1,2,5&7\nS1,3,6&1\n").expect("write input");

    let output = run(&["--mode", "adjacent", path_str(&input), path_str(&out)]);
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(
        fs::read_to_string(&out).expect("output"),
        "S1,1,5&7C\nS1,2,5&7\nS1,3,6&1\n"
    );
}

#[test]
fn key_field_and_suffix_flags() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let input = tmp.path().join("pts.csv");
    fs::write(&input, "2;X;Muro&1F\n1;X;Muro&1@AS\n").expect("write input");

    let output = run(&["-k", "0", "-d", ";", "-s", "fase6", path_str(&input)]);
    assert!(output.status.success());
    assert_eq!(
        fs::read_to_string(tmp.path().join("pts_fase6.csv")).expect("output"),
        "1;X;Muro00 AS\n2;X;Muro\n"
    );
}

#[test]
fn config_file_sets_layout() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let input = tmp.path().join("in.txt");
    let config = tmp.path().join("layout.json");
    fs::write(&input, "A,1,Muro&1\nA,2,10&1\nA,3,Arbol\n").expect("write input");
    fs::write(&config, r#"{ "mode": "by-type", "output_suffix": "sorted" }"#).expect("write config");

    let output = run(&["--config", path_str(&config), path_str(&input)]);
    assert!(output.status.success());
    assert_eq!(
        fs::read_to_string(tmp.path().join("in_sorted.txt")).expect("output"),
        "A,2,1000\nA,1,Muro00\nA,3,Arbol\n"
    );
}

#[test]
fn missing_input_exits_1() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let input = tmp.path().join("nope.txt");

    let output = run(&[path_str(&input)]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("not found"), "stderr: {stderr}");
    assert!(stderr.contains("nope.txt"), "stderr: {stderr}");
}

#[test]
fn unwritable_output_exits_2() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let input = tmp.path().join("in.txt");
    fs::write(&input, "A,1,5&1\n").expect("write input");
    let out = tmp.path().join("no_such_dir").join("out.txt");

    let output = run(&[path_str(&input), path_str(&out)]);
    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("writing"));
}

#[test]
fn bad_config_exits_2() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let input = tmp.path().join("in.txt");
    let config = tmp.path().join("layout.json");
    fs::write(&input, "A,1,5&1\n").expect("write input");
    fs::write(&config, "{ not json").expect("write config");

    let output = run(&["-c", path_str(&config), path_str(&input)]);
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn empty_input_is_not_an_error() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let input = tmp.path().join("empty.txt");
    fs::write(&input, "\n\n").expect("write input");

    let output = run(&[path_str(&input)]);
    assert!(output.status.success());
    assert_eq!(
        fs::read_to_string(tmp.path().join("empty_canon.txt")).expect("output"),
        ""
    );
}
