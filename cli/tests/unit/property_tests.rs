//! Property-based tests for rendering, permissions and scrape payloads.
//!
//! Uses `proptest` to verify invariants across many random inputs.

#![allow(clippy::expect_used)]

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use proptest::prelude::*;
use tester_unit::application::ports::LocalFs;
use tester_unit::application::services::artifact_deployer::deploy;
use tester_unit::application::services::service_unit::publish_and_start;
use tester_unit::domain::scrape::{build_jobs, format_interval, parse_interval};
use tester_unit::domain::{ScrapeMetadata, ScrapeTarget, ServiceUnitSpec};

use crate::fakes::{FakeSystemd, MemFs, journal};

fn metadata() -> ScrapeMetadata {
    ScrapeMetadata {
        model: "lab".into(),
        model_uuid: "00000000-0000-4000-8000-000000000000".into(),
        application: "prometheus-tester".into(),
        unit: "prometheus-tester/0".into(),
    }
}

// ============================================================================
// Unit file rendering
// ============================================================================

proptest! {
    /// Rendering is a pure function of the spec.
    #[test]
    fn prop_render_is_deterministic(
        exec in "/[a-z_]{1,12}(/[a-z_]{1,12}){0,3}",
        description in "[A-Za-z ]{1,30}",
    ) {
        let spec = ServiceUnitSpec {
            exec_start: PathBuf::from(&exec),
            description: description.clone(),
            ..ServiceUnitSpec::default()
        };
        let first = spec.render();
        prop_assert_eq!(&first, &spec.clone().render());
        let exec_line = format!("ExecStart={exec}\n");
        prop_assert!(first.contains(&exec_line));
        prop_assert!(first.ends_with("WantedBy=multi-user.target\n"));
    }
}

#[tokio::test]
async fn publishing_twice_leaves_identical_unit_file() {
    let fs = std::rc::Rc::new(MemFs::with_file(
        "/usr/local/bin/prometheus_tester",
        b"#!/usr/bin/env python3\n",
        0o755,
    ));
    let systemd = FakeSystemd::new(&journal(), &fs);
    let spec = ServiceUnitSpec::default();

    publish_and_start(&systemd, &*fs, &spec).await.expect("first");
    let first = fs.read_to_string(&spec.unit_path).expect("read");
    publish_and_start(&systemd, &*fs, &spec).await.expect("second");
    let second = fs.read_to_string(&spec.unit_path).expect("read");

    assert_eq!(first, second);
}

// ============================================================================
// Artifact permissions
// ============================================================================

proptest! {
    /// Deploy never clears a bit and always adds the owner-execute bit.
    #[test]
    fn prop_deploy_mode_is_superset_plus_exec(mode in 0u32..=0o7777) {
        let fs = MemFs::with_file("/src/tester.py", b"print()\n", mode);
        let dst = Path::new("/usr/local/bin/prometheus_tester");

        deploy(&fs, Path::new("/src/tester.py"), dst, 0o100).expect("deploy");

        let after = fs.mode(dst).expect("mode");
        prop_assert_eq!(after & mode, mode, "a source bit was cleared");
        prop_assert_eq!(after & 0o100, 0o100, "owner execute bit missing");
        prop_assert_eq!(after, mode | 0o100);
    }
}

// ============================================================================
// Scrape payload
// ============================================================================

proptest! {
    /// User labels always win over topology labels with the same key.
    #[test]
    fn prop_user_labels_override_topology(value in "[a-z0-9-]{1,16}") {
        let target = ScrapeTarget {
            targets: vec!["*:8000".into()],
            interval: Duration::from_secs(1),
            labels: BTreeMap::from([("juju_unit".to_string(), value.clone())]),
            metrics_path: "/metrics".into(),
        };
        let jobs = build_jobs(&[target], &metadata());
        prop_assert_eq!(&jobs[0].static_configs[0].labels["juju_unit"], &value);
        prop_assert_eq!(&jobs[0].static_configs[0].labels["juju_model"], "lab");
    }

    /// Every job name is unique and carries the topology prefix.
    #[test]
    fn prop_job_names_unique(count in 1usize..8) {
        let target = ScrapeTarget {
            targets: vec!["*:8000".into()],
            interval: Duration::from_secs(1),
            labels: BTreeMap::new(),
            metrics_path: "/metrics".into(),
        };
        let jobs = build_jobs(&vec![target; count], &metadata());
        let mut names: Vec<_> = jobs.iter().map(|j| j.job_name.clone()).collect();
        prop_assert!(names.iter().all(|n| n.starts_with("juju_lab_prometheus-tester_prometheus_scrape")));
        names.sort();
        names.dedup();
        prop_assert_eq!(names.len(), count);
    }

    /// Formatted intervals are accepted by the config parser unchanged.
    #[test]
    fn prop_formatted_interval_parses_back(ms in 1u64..86_400_000) {
        let d = Duration::from_millis(ms);
        prop_assert_eq!(parse_interval(&format_interval(d)).expect("parse"), d);
    }
}
