//! Property tests for the configuration loader.

use std::net::{IpAddr, Ipv4Addr};

use proptest::prelude::*;
use serde_json::{Value, json};

use camvirt::config::Config;
use camvirt::error::ConfigError;
use camvirt::registry::{DaemonDescriptor, MachineAddress, Registries, Registry, RegistryKind};

fn station_registries() -> Registries {
    let mut daemons = Registry::new(RegistryKind::Daemon);
    daemons.insert(
        "station_daemon",
        DaemonDescriptor::new("station_daemon", "station", 9100),
    );
    let mut machines = Registry::new(RegistryKind::Machine);
    machines.insert(
        "station_control",
        MachineAddress::new("station_control", IpAddr::V4(Ipv4Addr::new(10, 9, 0, 1))),
    );
    Registries { daemons, machines }
}

fn document_with_timeouts(initialize: f64, shutdown: f64) -> String {
    json!({
        "daemon": "station_daemon",
        "log_name": "stationd",
        "control_machines": ["station_control"],
        "initialize_timeout": initialize,
        "shutdown_timeout": shutdown,
        "domains": {"main": {"cam0": "station_daemon"}}
    })
    .to_string()
}

proptest! {
    #[test]
    fn timeouts_at_or_above_one_load_exactly(
        initialize in 1.0f64..1e9,
        shutdown in 1.0f64..1e9,
    ) {
        let doc = document_with_timeouts(initialize, shutdown);
        let config = Config::from_json_str(&doc, "prop.json", &station_registries()).unwrap();
        prop_assert_eq!(config.initialize_timeout, initialize);
        prop_assert_eq!(config.shutdown_timeout, shutdown);
    }

    #[test]
    fn timeouts_below_one_are_rejected_at_their_path(low in -1e9f64..1.0) {
        let doc = document_with_timeouts(low, 30.0);
        let err = Config::from_json_str(&doc, "prop.json", &station_registries()).unwrap_err();
        match err {
            ConfigError::Schema { issues, .. } => {
                prop_assert_eq!(issues[0].path.as_str(), "initialize_timeout");
            }
            other => prop_assert!(false, "expected schema error, got {other:?}"),
        }
    }

    #[test]
    fn unknown_daemon_names_are_rejected(name in "[a-z_]{1,24}") {
        prop_assume!(name != "station_daemon");
        let doc = json!({
            "daemon": name,
            "log_name": "stationd",
            "control_machines": [],
            "initialize_timeout": 5,
            "shutdown_timeout": 5,
            "domains": {}
        })
        .to_string();
        let err = Config::from_json_str(&doc, "prop.json", &station_registries()).unwrap_err();
        match err {
            ConfigError::Schema { issues, .. } => {
                prop_assert_eq!(issues[0].path.as_str(), "daemon");
                prop_assert!(issues[0].message.contains("unknown daemon"));
            }
            other => prop_assert!(false, "expected schema error, got {other:?}"),
        }
    }

    #[test]
    fn domain_and_camera_order_survive_loading(
        specs in prop::collection::vec(("[a-z]{1,6}", 0usize..4), 1..4),
    ) {
        let mut domains_object = serde_json::Map::new();
        let mut expected_domains = Vec::new();
        let mut expected_cameras = Vec::new();
        for (index, (suffix, count)) in specs.iter().enumerate() {
            let domain_id = format!("d{index}_{suffix}");
            let mut cameras_object = serde_json::Map::new();
            for camera in 0..*count {
                let camera_id = format!("{domain_id}_cam{camera}");
                cameras_object.insert(camera_id.clone(), json!("station_daemon"));
                expected_cameras.push(camera_id);
            }
            domains_object.insert(domain_id.clone(), Value::Object(cameras_object));
            expected_domains.push(domain_id);
        }

        let doc = json!({
            "daemon": "station_daemon",
            "log_name": "stationd",
            "control_machines": ["station_control"],
            "initialize_timeout": 5,
            "shutdown_timeout": 5,
            "domains": Value::Object(domains_object)
        })
        .to_string();

        let config = Config::from_json_str(&doc, "prop.json", &station_registries()).unwrap();
        prop_assert_eq!(&config.domains, &expected_domains);
        let camera_ids: Vec<String> = config.cameras.keys().cloned().collect();
        prop_assert_eq!(&camera_ids, &expected_cameras);
        for (camera_id, binding) in &config.cameras {
            prop_assert_eq!(binding.daemon.port, 9100);
            prop_assert!(camera_id.starts_with(&binding.domain));
        }
    }

    #[test]
    fn loader_never_panics_on_arbitrary_text(input in any::<String>()) {
        let _ = Config::from_json_str(&input, "prop.json", &station_registries());
    }
}
