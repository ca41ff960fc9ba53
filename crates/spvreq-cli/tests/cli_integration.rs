//! CLI integration tests for spvreq resolve / env / parse.
//!
//! These tests invoke the compiled binary to verify end-to-end behavior.

use std::path::Path;
use std::process::{Command, Output};

fn spvreq_bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_spvreq"))
}

fn run(args: &[&str]) -> Output {
    spvreq_bin()
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("run binary")
}

fn write_listing(dir: &Path, name: &str, src: &str) -> String {
    let path = dir.join(name);
    std::fs::write(&path, src).expect("write listing");
    path.to_str().unwrap().to_string()
}

const KERNEL: &str = r#"
    OpMemoryModel 2 2
    OpEntryPoint 6 %k "k"
    %void = OpTypeVoid
    %i64 = OpTypeInt 64 0
    %fnty = OpTypeFunction %void
    %k = OpFunction %void 0 %fnty
    %entry = OpLabel
    %h = OpTypeFloat 16
    OpReturn
    OpFunctionEnd
"#;

#[test]
fn cli_resolve_pretty() {
    let dir = tempfile::tempdir().expect("create tempdir");
    let file = write_listing(dir.path(), "kernel.spvasm", KERNEL);

    let output = run(&["resolve", &file, "--triple", "spirv64-unknown-opencl"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        output.status.success(),
        "spvreq resolve should succeed, stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert_eq!(
        stdout,
        "OpCapability Addresses\nOpCapability Kernel\nOpCapability Int64\nOpCapability Float16\n"
    );
}

#[test]
fn cli_resolve_json_per_unit() {
    let dir = tempfile::tempdir().expect("create tempdir");
    let file = write_listing(dir.path(), "kernel.spvasm", KERNEL);

    let output = run(&[
        "resolve",
        &file,
        "--triple",
        "spirv64-unknown-opencl",
        "--format",
        "json",
        "--per-unit",
    ]);
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let report: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout is JSON");
    assert_eq!(report["units"][0]["unit"], "<module>");
    assert_eq!(report["units"][1]["unit"], "k");
    assert_eq!(report["units"][1]["capabilities"], serde_json::json!(["Float16"]));
    assert_eq!(
        report["capabilities"],
        serde_json::json!(["Addresses", "Kernel", "Int64", "Float16"])
    );
    assert_eq!(report["extensions"], serde_json::json!([]));
}

#[test]
fn cli_resolve_reports_extensions() {
    let dir = tempfile::tempdir().expect("create tempdir");
    let file = write_listing(
        dir.path(),
        "wrap.spvasm",
        "OpDecorate %sum 4469\n%sum = OpIAdd %int %a %b\n",
    );

    let output = run(&["resolve", &file, "--triple", "spirv64v1.2-unknown-opencl"]);
    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "OpExtension \"SPV_KHR_no_integer_wrap_decoration\"\n"
    );
}

#[test]
fn cli_resolve_features_unlock_extensions() {
    let dir = tempfile::tempdir().expect("create tempdir");
    let file = write_listing(
        dir.path(),
        "denorm.spvasm",
        "OpExecutionMode %main 4459 32\n",
    );

    let without = run(&["resolve", &file, "--triple", "spirv64v1.2-unknown-opencl"]);
    assert!(!without.status.success(), "1.4 capability on 1.2 without extension");
    let stderr = String::from_utf8_lossy(&without.stderr);
    assert!(stderr.contains("cannot be legalized"), "stderr: {}", stderr);
    assert!(stderr.contains("DenormPreserve"), "stderr: {}", stderr);

    let with = run(&[
        "resolve",
        &file,
        "--triple",
        "spirv64v1.2-unknown-opencl",
        "--features",
        "+SPV_KHR_float_controls",
    ]);
    assert!(
        with.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&with.stderr)
    );
    assert_eq!(
        String::from_utf8_lossy(&with.stdout),
        "OpCapability DenormPreserve\nOpExtension \"SPV_KHR_float_controls\"\n"
    );
}

#[test]
fn cli_resolve_rejects_unsatisfiable_listing() {
    let dir = tempfile::tempdir().expect("create tempdir");
    let file = write_listing(
        dir.path(),
        "glsl.spvasm",
        "%glsl = OpExtInstImport \"GLSL.std.450\"\n",
    );

    let output = run(&["resolve", &file, "--triple", "spirv64-unknown-opencl"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("GLSL.std.450"), "stderr: {}", stderr);
}

#[test]
fn cli_env_json() {
    let output = run(&["env", "--triple", "spirv-unknown-vulkan1.2", "--format", "json"]);
    assert!(output.status.success());
    let env: serde_json::Value = serde_json::from_slice(&output.stdout).expect("stdout is JSON");
    assert_eq!(env["environment"], "Vulkan");
    assert_eq!(env["addressing"], "Logical");
    assert_eq!(env["vulkan_version"], "1.2");
    assert_eq!(env["ext_inst_sets"], serde_json::json!(["GLSL.std.450"]));
    let caps = env["capabilities"].as_array().expect("capability list");
    assert!(caps.contains(&serde_json::json!("Shader")));
    assert!(!caps.contains(&serde_json::json!("Kernel")));
}

#[test]
fn cli_env_rejects_bad_triple_and_features() {
    let output = run(&["env", "--triple", "spirv-unknown"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("malformed target triple"), "stderr: {}", stderr);

    let output = run(&["env", "--features", "Int64"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("must start with '+' or '-'"), "stderr: {}", stderr);
}

#[test]
fn cli_parse_json() {
    let dir = tempfile::tempdir().expect("create tempdir");
    let file = write_listing(dir.path(), "kernel.spvasm", KERNEL);

    let output = run(&["parse", &file, "--format", "json"]);
    assert!(output.status.success());
    let module: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout is JSON");
    assert_eq!(module["units"].as_array().map(Vec::len), Some(2));
    assert_eq!(module["units"][1]["name"], "k");
}

#[test]
fn cli_parse_error_names_the_line() {
    let dir = tempfile::tempdir().expect("create tempdir");
    let file = write_listing(dir.path(), "bad.spvasm", "OpNop\nOpBogus 1\n");

    let output = run(&["parse", &file]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("line 2: unknown opcode 'OpBogus'"), "stderr: {}", stderr);
}

#[test]
fn cli_rejects_oversized_source() {
    let dir = tempfile::tempdir().expect("create tempdir");
    let file = write_listing(dir.path(), "big.spvasm", &"OpNop\n".repeat(200_000));

    let output = run(&["resolve", &file]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("exceeds 1MB limit"), "stderr: {}", stderr);
}

#[test]
fn cli_resolves_listing_just_under_the_size_limit() {
    let dir = tempfile::tempdir().expect("create tempdir");
    let mut src = String::from("%wide = OpTypeInt 64 0\n");
    let mut n = 0;
    while src.len() < 990_000 {
        src.push_str(&format!("%v{n} = OpTypeInt 32 0\n"));
        n += 1;
    }
    let file = write_listing(dir.path(), "large.spvasm", &src);

    let output = run(&["resolve", &file, "--triple", "spirv64-unknown-opencl"]);
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert_eq!(String::from_utf8_lossy(&output.stdout), "OpCapability Int64\n");
}
