use serde::Deserialize;

/// Rendered for guest OS fields the guest agent did not report.
pub const NOT_AVAILABLE: &str = "N/A";

/// Condition type the virt controller sets while the guest agent is reachable.
pub const AGENT_CONNECTED_CONDITION: &str = "AgentConnected";

/// The slice of a VirtualMachineInstance `status` this tool reads. Everything
/// is optional on the wire, so absent pieces decode to defaults instead of
/// failing the item.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct VmiStatus {
    #[serde(rename = "guestOSInfo", default)]
    pub guest_os_info: GuestOsInfo,
    #[serde(default)]
    pub conditions: Vec<VmiCondition>,
}

/// Guest OS metadata as reported by the in-guest agent.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuestOsInfo {
    pub name: Option<String>,
    pub version: Option<String>,
    pub kernel_release: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct VmiCondition {
    #[serde(rename = "type", default)]
    pub type_: String,
    #[serde(default)]
    pub status: String,
}

impl VmiStatus {
    /// The agent counts as connected iff any condition is exactly
    /// ("AgentConnected", "True"). Condition order is irrelevant; a missing
    /// status field decodes to "" and can never match.
    pub fn agent_connected(&self) -> bool {
        self.conditions
            .iter()
            .any(|condition| condition.type_ == AGENT_CONNECTED_CONDITION && condition.status == "True")
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AgentState {
    Connected,
    Disconnected,
}

impl AgentState {
    pub fn as_str(&self) -> &'static str {
        match self {
            AgentState::Connected => "Connected",
            AgentState::Disconnected => "Disconnected",
        }
    }
}

impl std::fmt::Display for AgentState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One exported record. Field order here is the column order of both report
/// formats. Rows are built once per run and never mutated afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReportRow {
    pub namespace: String,
    pub vm_name: String,
    pub os_name: String,
    pub os_version: String,
    pub kernel: String,
    pub agent_connected: AgentState,
}

impl ReportRow {
    pub fn from_status(namespace: String, vm_name: String, status: &VmiStatus) -> Self {
        let guest = &status.guest_os_info;

        let agent_connected = if status.agent_connected() {
            AgentState::Connected
        } else {
            AgentState::Disconnected
        };

        ReportRow {
            namespace,
            vm_name,
            os_name: or_not_available(guest.name.as_deref()),
            os_version: or_not_available(guest.version.as_deref()),
            kernel: or_not_available(guest.kernel_release.as_deref()),
            agent_connected,
        }
    }

    /// Column values in output order.
    pub fn fields(&self) -> [&str; 6] {
        [
            &self.namespace,
            &self.vm_name,
            &self.os_name,
            &self.os_version,
            &self.kernel,
            self.agent_connected.as_str(),
        ]
    }
}

fn or_not_available(value: Option<&str>) -> String {
    value.unwrap_or(NOT_AVAILABLE).to_string()
}
