//! End-to-end runs of the scaffold pipeline against real adapters.

use std::fs;
use std::path::Path;

use ctfdock_adapters::{FixedDecision, LocalFilesystem, MemoryFilesystem, TerminalPrompt};
use ctfdock_core::prelude::*;
use ctfdock_core::application::ApplicationError;
use tempfile::TempDir;

fn seed_task(root: &Path) -> std::path::PathBuf {
    let task = root.join("task");
    fs::create_dir_all(&task).unwrap();
    fs::write(task.join("chal"), b"\x7fELF").unwrap();
    fs::write(task.join("flag.txt"), b"flag{test}").unwrap();
    task
}

fn local_service() -> ScaffoldService {
    ScaffoldService::new(Box::new(LocalFilesystem::new()))
}

#[test]
fn scaffolds_a_fresh_output_dir() {
    let tmp = TempDir::new().unwrap();
    let task = seed_task(tmp.path());
    let out = tmp.path().join("out");
    fs::create_dir(&out).unwrap();

    let request = ScaffoldRequest::new(UbuntuVersion::V20, &task, &out, tmp.path());
    let outcome = local_service()
        .run(&request, &mut FixedDecision(OverwriteDecision::Keep))
        .unwrap();

    let ScaffoldOutcome::Completed(report) = outcome else {
        panic!("expected a completed run");
    };
    assert_eq!(report.task_name, "chal");
    assert_eq!(report.flag_name, "flag.txt");

    let chal = out.join("chal");
    assert_eq!(fs::read(chal.join("task/chal")).unwrap(), b"\x7fELF");
    assert_eq!(fs::read(chal.join("task/flag.txt")).unwrap(), b"flag{test}");

    let dockerfile = fs::read_to_string(chal.join("Dockerfile")).unwrap();
    assert!(dockerfile.contains("FROM ubuntu:20.04"));
    assert!(!dockerfile.contains("patchelf"));
    for name in ["docker-compose.yaml", "ctf.xinetd", "start.sh", "build_image.sh"] {
        assert!(chal.join(name).is_file(), "{name} missing");
    }
    assert!(!chal.join("libs").exists());

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mode = fs::metadata(chal.join("start.sh")).unwrap().permissions().mode();
        assert_ne!(mode & 0o100, 0);
    }
}

#[test]
fn declining_leaves_existing_output_untouched() {
    let tmp = TempDir::new().unwrap();
    let task = seed_task(tmp.path());
    let out = tmp.path().join("out");
    fs::create_dir_all(out.join("chal")).unwrap();
    fs::write(out.join("chal/keep.me"), b"old").unwrap();

    let request = ScaffoldRequest::new(UbuntuVersion::V18, &task, &out, tmp.path());
    let mut prompt = TerminalPrompt::new("n\n".as_bytes(), Vec::new());
    let outcome = local_service().run(&request, &mut prompt).unwrap();

    assert!(matches!(outcome, ScaffoldOutcome::Declined { .. }));
    assert_eq!(fs::read(out.join("chal/keep.me")).unwrap(), b"old");
    assert!(!out.join("chal/Dockerfile").exists());
}

#[test]
fn accepting_replaces_existing_output() {
    let tmp = TempDir::new().unwrap();
    let task = seed_task(tmp.path());
    let out = tmp.path().join("out");
    fs::create_dir_all(out.join("chal")).unwrap();
    fs::write(out.join("chal/stale"), b"old").unwrap();

    let request = ScaffoldRequest::new(UbuntuVersion::V16, &task, &out, tmp.path());
    let mut prompt = TerminalPrompt::new("x\nY\n".as_bytes(), Vec::new());
    let outcome = local_service().run(&request, &mut prompt).unwrap();

    assert!(matches!(outcome, ScaffoldOutcome::Completed(_)));
    assert!(!out.join("chal/stale").exists());
    assert!(out.join("chal/Dockerfile").is_file());
}

#[test]
fn patchelf_run_stages_tool_and_libs() {
    let tmp = TempDir::new().unwrap();
    let task = seed_task(tmp.path());
    let out = tmp.path().join("out");
    fs::create_dir(&out).unwrap();
    let kit = tmp.path().join("kit");
    fs::create_dir_all(kit.join("libs")).unwrap();
    fs::write(kit.join("patchelf"), b"tool").unwrap();
    fs::write(kit.join("libs/libc-2.27.so"), b"libc").unwrap();
    fs::write(kit.join("libs/ld-2.27.so"), b"ld").unwrap();

    let request = ScaffoldRequest::new(UbuntuVersion::V18, &task, &out, &kit)
        .with_patchelf(Some("2.27".to_string()));
    let outcome = local_service()
        .run(&request, &mut FixedDecision(OverwriteDecision::Overwrite))
        .unwrap();

    let ScaffoldOutcome::Completed(report) = outcome else {
        panic!("expected a completed run");
    };
    assert!(report.patchelf);

    let chal = out.join("chal");
    assert_eq!(fs::read(chal.join("patchelf")).unwrap(), b"tool");
    assert_eq!(fs::read(chal.join("libs/libc-2.27.so")).unwrap(), b"libc");
    assert_eq!(fs::read(chal.join("libs/ld-2.27.so")).unwrap(), b"ld");

    let start = fs::read_to_string(chal.join("start.sh")).unwrap();
    assert!(start.contains("patchelf --set-interpreter /libs/ld-2.27.so ./chal"));
}

#[test]
fn unknown_libc_version_is_not_found() {
    let tmp = TempDir::new().unwrap();
    let task = seed_task(tmp.path());
    let out = tmp.path().join("out");
    fs::create_dir(&out).unwrap();
    let kit = tmp.path().join("kit");
    fs::create_dir_all(kit.join("libs")).unwrap();
    fs::write(kit.join("patchelf"), b"tool").unwrap();

    let request = ScaffoldRequest::new(UbuntuVersion::V20, &task, &out, &kit)
        .with_patchelf(Some("2.99".to_string()));
    let err = local_service()
        .run(&request, &mut FixedDecision(OverwriteDecision::Overwrite))
        .unwrap_err();

    assert!(matches!(
        err,
        CtfdockError::Application(ApplicationError::LibraryPairNotFound { .. })
    ));
    assert!(!out.join("chal").exists());
}

#[test]
fn runs_against_the_memory_filesystem() {
    let fs = MemoryFilesystem::new();
    fs.add_file("/t/pwn", "bin");
    fs.add_file("/t/myflag", "flag{m}");
    fs.add_dir("/out");

    let service = ScaffoldService::new(Box::new(fs.clone()));
    let request = ScaffoldRequest::new(UbuntuVersion::V21, "/t", "/out", "/kit");
    service
        .run(&request, &mut FixedDecision(OverwriteDecision::Keep))
        .unwrap();

    let dockerfile = fs.read_file(Path::new("/out/pwn/Dockerfile")).unwrap();
    assert!(dockerfile.contains("FROM ubuntu:21.04"));
    assert!(dockerfile.contains("chmod 740 /home/ctf/myflag"));
    assert!(fs.is_executable(Path::new("/out/pwn/build_image.sh")));
    assert_eq!(fs.read_file(Path::new("/out/pwn/task/myflag")).unwrap(), "flag{m}");
}
