// Unit tests for hook module generation
#[cfg(test)]
mod tests {
    use hookstrap_core::hookgen::{
        cache, Freshness, HookGenerator, HookModule, MethodSym, ModuleImage, GENERATOR_VERSION,
    };
    use std::fs;
    use std::path::{Path, PathBuf};
    use std::time::{Duration, SystemTime, UNIX_EPOCH};

    /// Minimal valid ELF64 shared object: header only, no sections, no
    /// program headers. Parses to an image with no methods and no imports.
    fn minimal_elf() -> Vec<u8> {
        let mut e = vec![0u8; 64];
        e[0..4].copy_from_slice(&[0x7f, b'E', b'L', b'F']);
        e[4] = 2; // ELFCLASS64
        e[5] = 1; // little-endian
        e[6] = 1; // EV_CURRENT
        e[16..18].copy_from_slice(&3u16.to_le_bytes()); // ET_DYN
        e[18..20].copy_from_slice(&62u16.to_le_bytes()); // EM_X86_64
        e[20..24].copy_from_slice(&1u32.to_le_bytes());
        e[52..54].copy_from_slice(&64u16.to_le_bytes()); // e_ehsize
        e[54..56].copy_from_slice(&56u16.to_le_bytes()); // e_phentsize
        e[58..60].copy_from_slice(&64u16.to_le_bytes()); // e_shentsize
        e
    }

    fn set_mtime(path: &Path, time: SystemTime) {
        let file = fs::OpenOptions::new().write(true).open(path).unwrap();
        file.set_modified(time).unwrap();
    }

    fn base_time() -> SystemTime {
        UNIX_EPOCH + Duration::from_secs(1_700_000_000)
    }

    fn sample_image(path: &str) -> ModuleImage {
        ModuleImage {
            path: PathBuf::from(path),
            methods: vec![
                MethodSym {
                    name: "internal_tick".to_string(),
                    address: 0x2000,
                    global: false,
                },
                MethodSym {
                    name: "update_world".to_string(),
                    address: 0x1000,
                    global: true,
                },
            ],
            imports: vec![],
        }
    }

    #[test]
    fn generates_artifact_from_module() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("libhost.so");
        fs::write(&source, minimal_elf()).unwrap();

        let output = dir.path().join(HookGenerator::output_name(&source));
        assert_eq!(
            output.file_name().unwrap().to_str().unwrap(),
            "HOOKS-libhost.json"
        );

        let generator = HookGenerator::new(vec![], true);
        generator.generate(&source, &output).unwrap();

        let module: HookModule =
            serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
        assert_eq!(module.source, "libhost.so");
        assert_eq!(module.generator_version, GENERATOR_VERSION);
        assert!(module.entries.is_empty());
    }

    #[test]
    fn fresh_artifact_skips_regeneration() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("libhost.so");
        fs::write(&source, minimal_elf()).unwrap();
        let output = dir.path().join(HookGenerator::output_name(&source));

        let generator = HookGenerator::new(vec![], true);
        generator.generate(&source, &output).unwrap();
        set_mtime(&source, base_time());
        set_mtime(&output, base_time() + Duration::from_secs(10));

        let before = fs::metadata(&output).unwrap().modified().unwrap();

        // Second invocation of the generation step: cache check reports
        // Fresh, so the generator never runs and nothing is written.
        assert_eq!(cache::check(&source, &output).unwrap(), Freshness::Fresh);

        let after = fs::metadata(&output).unwrap().modified().unwrap();
        assert_eq!(before, after, "no filesystem write on second invocation");
    }

    #[test]
    fn stale_artifact_is_deleted_then_replaced() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("libhost.so");
        fs::write(&source, minimal_elf()).unwrap();
        let output = dir.path().join(HookGenerator::output_name(&source));
        fs::write(&output, b"stale junk from a previous run").unwrap();
        set_mtime(&output, base_time());
        set_mtime(&source, base_time() + Duration::from_secs(60));

        assert_eq!(cache::check(&source, &output).unwrap(), Freshness::Stale);
        assert!(!output.exists(), "old artifact removed before regeneration");

        let generator = HookGenerator::new(vec![], true);
        generator.generate(&source, &output).unwrap();

        let content = fs::read(&output).unwrap();
        assert_ne!(content, b"stale junk from a previous run".to_vec());
    }

    #[test]
    fn unreadable_module_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("not_a_module.so");
        fs::write(&source, vec![0xAB; 32]).unwrap();
        let output = dir.path().join("HOOKS-not_a_module.json");

        let generator = HookGenerator::new(vec![], true);
        assert!(generator.generate(&source, &output).is_err());
        assert!(!output.exists());
    }

    #[test]
    fn synthesize_pairs_before_and_after_hooks() {
        let module = HookGenerator::synthesize(&sample_image("libhost.so"), true);

        assert_eq!(module.entries.len(), 2);
        let tick = &module.entries[0];
        assert_eq!(tick.method, "internal_tick");
        assert_eq!(tick.before, "before_internal_tick");
        assert_eq!(tick.after, "after_internal_tick");
        assert_eq!(tick.address, 0x2000);
    }

    #[test]
    fn private_methods_excluded_unless_exposed() {
        let image = sample_image("libhost.so");

        let public_only = HookGenerator::synthesize(&image, false);
        assert_eq!(public_only.entries.len(), 1);
        assert_eq!(public_only.entries[0].method, "update_world");

        let everything = HookGenerator::synthesize(&image, true);
        assert_eq!(everything.entries.len(), 2);
    }
}
