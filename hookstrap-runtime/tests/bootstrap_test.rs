// Unit tests for the interception bootstrap
#[cfg(test)]
mod tests {
    use hookstrap_runtime::mods::bootstrap::{bootstrap, NATIVE_LOADER_KEY};
    use hookstrap_runtime::mods::intercept::{CallRouter, PatchOutcome};

    #[test]
    fn bootstrap_suppresses_native_loading() {
        let mut router = CallRouter::new();
        let registry = bootstrap(&mut router).unwrap();

        assert!(registry.is_empty());
        // The host's own "load all mods" call now reports "did not run".
        assert_eq!(router.dispatch(NATIVE_LOADER_KEY), PatchOutcome::Suppress);
    }

    #[test]
    fn unrelated_calls_still_run() {
        let mut router = CallRouter::new();
        bootstrap(&mut router).unwrap();
        assert_eq!(router.dispatch("Host::update"), PatchOutcome::RunOriginal);
    }

    #[test]
    fn second_bootstrap_is_fatal() {
        let mut router = CallRouter::new();
        bootstrap(&mut router).unwrap();
        assert!(bootstrap(&mut router).is_err());
    }
}
