//! Service unit spec and rendering.

use std::path::PathBuf;

use crate::domain::install::ARTIFACT_INSTALL_PATH;

/// Name of the managed unit.
pub const UNIT_NAME: &str = "prometheus-tester";

/// Path of the rendered unit file.
pub const UNIT_FILE_PATH: &str = "/etc/systemd/system/prometheus-tester.service";

/// Service unit definition. Rendered on every start event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceUnitSpec {
    pub name: String,
    pub unit_path: PathBuf,
    /// Absolute path executed on activation.
    pub exec_start: PathBuf,
    pub description: String,
}

impl Default for ServiceUnitSpec {
    fn default() -> Self {
        Self {
            name: UNIT_NAME.to_string(),
            unit_path: PathBuf::from(UNIT_FILE_PATH),
            exec_start: PathBuf::from(ARTIFACT_INSTALL_PATH),
            description: "Prometheus Tester".to_string(),
        }
    }
}

impl ServiceUnitSpec {
    /// Name passed to the service manager, e.g. `prometheus-tester.service`.
    #[must_use]
    pub fn service_name(&self) -> String {
        format!("{}.service", self.name)
    }

    /// Render the unit file. Output depends only on the spec.
    #[must_use]
    pub fn render(&self) -> String {
        format!(
            "[Unit]\n\
             Description={description}\n\
             \n\
             [Service]\n\
             ExecStart={exec}\n\
             \n\
             [Install]\n\
             WantedBy=multi-user.target\n",
            description = self.description,
            exec = self.exec_start.display(),
        )
    }
}
