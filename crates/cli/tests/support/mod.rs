//! Fixtures shared by the CLI integration tests.
#![allow(dead_code)]

use std::path::{Path, PathBuf};

#[path = "../../../core/tests/support/fixtures.rs"]
mod fixtures;

pub use fixtures::*;

/// Stub tool set: a `nix-locate` that knows `libc.so.6` exactly and `libfoo`
/// only loosely, and a `nix-store` that echoes each realised path, appends it
/// to a log and fails for paths containing `bad`.
#[cfg(unix)]
pub struct StubTools {
    pub nix_locate: PathBuf,
    pub nix_store: PathBuf,
    pub realise_log: PathBuf,
}

#[cfg(unix)]
pub fn stub_tools(dir: &Path) -> StubTools {
    let realise_log = dir.join("realised.log");
    let nix_locate = install_script(
        dir,
        "nix-locate",
        r#"if [ "$2" = "--whole-name" ]; then
  case "$3" in
    /lib/libc.so.6) echo "glibc.out   0 s /nix/store/abc-glibc-2.31/lib/libc.so.6" ;;
    /lib/libbad.so) echo "bad.out   0 s /nix/store/bad-pkg/lib/libbad.so" ;;
  esac
else
  case "$2" in
    /lib/libfoo) printf 'foo.out 0 s /nix/store/one-foo/lib/libfoo.so\nfoo.dev 0 s /nix/store/two-foo/lib/libfoo.so.1\n' ;;
  esac
fi"#,
    );
    let nix_store = install_script(
        dir,
        "nix-store",
        &format!(
            r#"echo "$2"
echo "$2" >> '{}'
case "$2" in *bad*) exit 1 ;; esac"#,
            realise_log.display()
        ),
    );
    StubTools { nix_locate, nix_store, realise_log }
}

/// Lines appended to the realise log, or none when nothing was realised.
#[cfg(unix)]
pub fn realised(tools: &StubTools) -> Vec<String> {
    std::fs::read_to_string(&tools.realise_log)
        .map(|body| body.lines().map(str::to_string).collect())
        .unwrap_or_default()
}

/// Write an ELF fixture importing `needed` to `dir/name`.
pub fn write_elf(dir: &Path, name: &str, needed: &[&str]) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, elf_with_needed(needed)).unwrap();
    path
}
