//! # Validation
//!
//! Parameter validators for the cluster, node pool and pod identity commands.
//!
//! Every validator takes the command's [`Namespace`](crate::namespace::Namespace),
//! returns `Ok(())` or a [`ValidationError`], and may normalize the fields it owns.

mod addons;
mod autoscaler;
mod checks;
mod error;
mod ip_ranges;
mod network;
mod nodepool;
mod pod_identity;
mod resource_id;
mod spot;
mod surge;
mod version;

pub use addons::{addon_profile_name, validate_addon_name, validate_addons};
pub use autoscaler::{validate_autoscaler_key, validate_cluster_autoscaler_profile};
pub use checks::{
    run_checks, run_checks_collect, Check, CREATE_CHECKS, NODEPOOL_ADD_CHECKS,
    POD_IDENTITY_ADD_CHECKS, UPDATE_CHECKS,
};
pub use error::{Result, ValidationError};
pub use ip_ranges::validate_ip_ranges;
pub use network::{
    validate_int_range, validate_load_balancer_idle_timeout,
    validate_load_balancer_outbound_ports, validate_nat_gateway_idle_timeout,
    validate_nat_gateway_managed_outbound_ip_count,
};
pub use nodepool::{
    validate_label, validate_linux_host_name, validate_max_pods, validate_nodepool_labels,
    validate_nodepool_name, validate_nodepool_taints, validate_nodes_count, validate_taint,
};
pub use pod_identity::{
    validate_pod_identity_resource_name, validate_pod_identity_resource_namespace,
    validate_required_field, RequiredField, POD_IDENTITY_NAME, POD_IDENTITY_NAMESPACE,
};
pub use resource_id::{
    is_valid_resource_id, validate_assign_identity, validate_assign_kubelet_identity,
    validate_node_public_ip_prefix_id, validate_pod_subnet_id, validate_resource_id,
    validate_vnet_subnet_id, ResourceId,
};
pub use spot::{validate_eviction_policy, validate_priority, validate_spot_max_price};
pub use surge::{validate_max_surge, MaxSurge};
pub use version::validate_k8s_version;
