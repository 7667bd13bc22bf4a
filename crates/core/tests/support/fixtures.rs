//! ELF and stub-script fixtures shared by the core and CLI integration tests.
#![allow(dead_code)]

use std::path::{Path, PathBuf};

/// Assemble a minimal little-endian ELF64 shared object whose dynamic section
/// lists `needed` as `DT_NEEDED` entries.
///
/// Layout: ELF header, a PT_LOAD covering the whole file (vaddr == offset),
/// a PT_DYNAMIC, the dynamic string table, then the dynamic entries.
pub fn elf_with_needed(needed: &[&str]) -> Vec<u8> {
    const EHDR: usize = 64;
    const PHDR: usize = 56;
    const DT_NULL: u64 = 0;
    const DT_NEEDED: u64 = 1;
    const DT_STRTAB: u64 = 5;
    const DT_STRSZ: u64 = 10;

    let strtab_off = EHDR + 2 * PHDR;
    let mut strtab = vec![0u8];
    let mut name_offsets = Vec::new();
    for name in needed {
        name_offsets.push(strtab.len() as u64);
        strtab.extend_from_slice(name.as_bytes());
        strtab.push(0);
    }

    let dyn_off = (strtab_off + strtab.len() + 7) & !7;
    let mut dynamic: Vec<(u64, u64)> = name_offsets.iter().map(|&o| (DT_NEEDED, o)).collect();
    dynamic.push((DT_STRTAB, strtab_off as u64));
    dynamic.push((DT_STRSZ, strtab.len() as u64));
    dynamic.push((DT_NULL, 0));
    let dyn_size = dynamic.len() * 16;
    let total = dyn_off + dyn_size;

    let mut out = Vec::with_capacity(total);
    // e_ident: magic, ELFCLASS64, ELFDATA2LSB, EV_CURRENT, padding.
    out.extend_from_slice(&[0x7f, b'E', b'L', b'F', 2, 1, 1, 0]);
    out.extend_from_slice(&[0u8; 8]);
    out.extend_from_slice(&3u16.to_le_bytes()); // e_type = ET_DYN
    out.extend_from_slice(&62u16.to_le_bytes()); // e_machine = EM_X86_64
    out.extend_from_slice(&1u32.to_le_bytes()); // e_version
    out.extend_from_slice(&0u64.to_le_bytes()); // e_entry
    out.extend_from_slice(&(EHDR as u64).to_le_bytes()); // e_phoff
    out.extend_from_slice(&0u64.to_le_bytes()); // e_shoff
    out.extend_from_slice(&0u32.to_le_bytes()); // e_flags
    out.extend_from_slice(&(EHDR as u16).to_le_bytes()); // e_ehsize
    out.extend_from_slice(&(PHDR as u16).to_le_bytes()); // e_phentsize
    out.extend_from_slice(&2u16.to_le_bytes()); // e_phnum
    out.extend_from_slice(&64u16.to_le_bytes()); // e_shentsize
    out.extend_from_slice(&0u16.to_le_bytes()); // e_shnum
    out.extend_from_slice(&0u16.to_le_bytes()); // e_shstrndx

    push_phdr(&mut out, 1, 4, 0, total as u64, 0x1000); // PT_LOAD, PF_R
    push_phdr(&mut out, 2, 6, dyn_off as u64, dyn_size as u64, 8); // PT_DYNAMIC, PF_R|PF_W

    out.extend_from_slice(&strtab);
    out.resize(dyn_off, 0);
    for (tag, val) in dynamic {
        out.extend_from_slice(&tag.to_le_bytes());
        out.extend_from_slice(&val.to_le_bytes());
    }
    out
}

fn push_phdr(out: &mut Vec<u8>, p_type: u32, flags: u32, offset: u64, size: u64, align: u64) {
    out.extend_from_slice(&p_type.to_le_bytes());
    out.extend_from_slice(&flags.to_le_bytes());
    out.extend_from_slice(&offset.to_le_bytes()); // p_offset
    out.extend_from_slice(&offset.to_le_bytes()); // p_vaddr
    out.extend_from_slice(&offset.to_le_bytes()); // p_paddr
    out.extend_from_slice(&size.to_le_bytes()); // p_filesz
    out.extend_from_slice(&size.to_le_bytes()); // p_memsz
    out.extend_from_slice(&align.to_le_bytes());
}

/// Install an executable `#!/bin/sh` script named `name` in `dir`.
///
/// The body is written to a scratch file and copied into place by `cp`, so no
/// writable descriptor for the final file is ever open in this process while
/// other test threads fork (which would make exec fail with ETXTBSY).
#[cfg(unix)]
pub fn install_script(dir: &Path, name: &str, body: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let scratch = dir.join(format!("{name}.src"));
    std::fs::write(&scratch, format!("#!/bin/sh\n{body}\n")).unwrap();
    let target = dir.join(name);
    let status = std::process::Command::new("cp").arg(&scratch).arg(&target).status().unwrap();
    assert!(status.success(), "cp failed for {}", target.display());
    std::fs::set_permissions(&target, std::fs::Permissions::from_mode(0o755)).unwrap();
    target
}
