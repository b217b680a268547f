use crate::{
    error::ExportError,
    resources::{
        ReportRow,
        VmiStatus,
    },
};
use kube::{
    api::{
        Api,
        ApiResource,
        DynamicObject,
        GroupVersionKind,
        ListParams,
    },
    Client,
};

pub const VMI_GROUP: &str = "kubevirt.io";
pub const VMI_VERSION: &str = "v1";
pub const VMI_KIND: &str = "VirtualMachineInstance";

/// Load ambient cluster credentials (local kubeconfig or in-cluster service
/// account). There is no fallback source; failure aborts the run.
pub async fn connect() -> Result<Client, ExportError> {
    Client::try_default().await.map_err(ExportError::ClusterConfig)
}

/// Cluster-scoped handle for kubevirt.io/v1 virtualmachineinstances. The CRD
/// is consumed, not owned, so the dynamic api is used instead of a derived
/// resource type.
pub fn vmi_api(client: Client) -> Api<DynamicObject> {
    let gvk = GroupVersionKind::gvk(VMI_GROUP, VMI_VERSION, VMI_KIND);
    Api::all_with(client, &ApiResource::from_gvk(&gvk))
}

/// Single list call across all namespaces. No selectors, no pagination; the
/// whole collection comes back in one response.
pub async fn list_vmis(api: &Api<DynamicObject>) -> Result<Vec<DynamicObject>, ExportError> {
    let vmis = api.list(&ListParams::default()).await.map_err(ExportError::Api)?;
    Ok(vmis.items)
}

/// Flatten raw VMIs into report rows, preserving response order. Items
/// without a name or namespace are skipped with a warning; they never abort
/// the run.
pub fn report_rows(vmis: Vec<DynamicObject>) -> Vec<ReportRow> {
    let mut rows = Vec::with_capacity(vmis.len());

    for vmi in vmis {
        let name = vmi.metadata.name.clone().filter(|name| !name.is_empty());
        let namespace = vmi.metadata.namespace.clone().filter(|ns| !ns.is_empty());

        let (Some(name), Some(namespace)) = (name, namespace) else {
            warn!(
                "Skipping VMI with missing metadata (name={:?}, namespace={:?})",
                vmi.metadata.name, vmi.metadata.namespace
            );
            continue;
        };

        let status = vmi_status(&vmi);
        rows.push(ReportRow::from_status(namespace, name, &status));
    }

    rows
}

/// Decode the `status` subtree of a dynamic VMI. Absent or undecodable
/// status means the guest agent never reported anything, so the row falls
/// back to defaults instead of being dropped.
fn vmi_status(vmi: &DynamicObject) -> VmiStatus {
    let Some(status) = vmi.data.get("status") else {
        return VmiStatus::default();
    };

    match serde_json::from_value(status.clone()) {
        Ok(status) => status,
        Err(err) => {
            warn!(
                "Unable to decode status of VMI {:?}, treating as unreported: {err}",
                vmi.metadata.name
            );
            VmiStatus::default()
        }
    }
}
