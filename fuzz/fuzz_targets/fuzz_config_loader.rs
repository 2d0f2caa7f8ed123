#![no_main]

use camvirt::config::Config;
use camvirt::registry::Registries;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Convert bytes to string, ignoring invalid UTF-8
    if let Ok(document) = std::str::from_utf8(data) {
        // Attempt to load the configuration against the site catalog.
        // We don't care about the result, just that it doesn't panic.
        let _ = Config::from_json_str(document, "fuzz.json", Registries::site());
    }
});
