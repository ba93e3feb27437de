//! # Check Set
//!
//! Names every validator as a [`Check`] so commands can declare which ones
//! they run, and runs them in order over one namespace.

use tracing::{debug, warn};

use super::error::{Result, ValidationError};
use super::pod_identity::{
    validate_required_field, RequiredField, POD_IDENTITY_NAME, POD_IDENTITY_NAMESPACE,
};
use super::{addons, autoscaler, ip_ranges, network, nodepool, resource_id, spot, surge, version};
use crate::namespace::Namespace;

/// One validator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Check {
    IpRanges,
    ClusterAutoscalerProfile,
    VnetSubnetId,
    PodSubnetId,
    AssignIdentity,
    AssignKubeletIdentity,
    NodePublicIpPrefixId,
    Required(RequiredField),
    MaxSurge,
    Priority,
    EvictionPolicy,
    SpotMaxPrice,
    KubernetesVersion,
    Addons,
    NodepoolName,
    NodesCount,
    MaxPods,
    LinuxHostName,
    NodepoolTaints,
    NodepoolLabels,
    LoadBalancerIdleTimeout,
    LoadBalancerOutboundPorts,
    NatGatewayManagedOutboundIpCount,
    NatGatewayIdleTimeout,
}

impl Check {
    /// Stable name used in logs
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Check::IpRanges => "api-server-authorized-ip-ranges",
            Check::ClusterAutoscalerProfile => "cluster-autoscaler-profile",
            Check::VnetSubnetId => "vnet-subnet-id",
            Check::PodSubnetId => "pod-subnet-id",
            Check::AssignIdentity => "assign-identity",
            Check::AssignKubeletIdentity => "assign-kubelet-identity",
            Check::NodePublicIpPrefixId => "node-public-ip-prefix-id",
            Check::Required(rule) => rule.field,
            Check::MaxSurge => "max-surge",
            Check::Priority => "priority",
            Check::EvictionPolicy => "eviction-policy",
            Check::SpotMaxPrice => "spot-max-price",
            Check::KubernetesVersion => "kubernetes-version",
            Check::Addons => "addons",
            Check::NodepoolName => "nodepool-name",
            Check::NodesCount => "nodes-count",
            Check::MaxPods => "max-pods",
            Check::LinuxHostName => "linux-host-name",
            Check::NodepoolTaints => "nodepool-taints",
            Check::NodepoolLabels => "nodepool-labels",
            Check::LoadBalancerIdleTimeout => "load-balancer-idle-timeout",
            Check::LoadBalancerOutboundPorts => "load-balancer-outbound-ports",
            Check::NatGatewayManagedOutboundIpCount => "nat-gateway-managed-outbound-ip-count",
            Check::NatGatewayIdleTimeout => "nat-gateway-idle-timeout",
        }
    }

    /// Run this check against `namespace`
    ///
    /// # Errors
    /// Returns the validator's failure.
    pub fn apply(&self, namespace: &mut Namespace) -> Result<()> {
        match self {
            Check::IpRanges => ip_ranges::validate_ip_ranges(namespace),
            Check::ClusterAutoscalerProfile => {
                autoscaler::validate_cluster_autoscaler_profile(namespace)
            }
            Check::VnetSubnetId => resource_id::validate_vnet_subnet_id(namespace),
            Check::PodSubnetId => resource_id::validate_pod_subnet_id(namespace),
            Check::AssignIdentity => resource_id::validate_assign_identity(namespace),
            Check::AssignKubeletIdentity => {
                resource_id::validate_assign_kubelet_identity(namespace)
            }
            Check::NodePublicIpPrefixId => {
                resource_id::validate_node_public_ip_prefix_id(namespace)
            }
            Check::Required(rule) => validate_required_field(*rule, namespace),
            Check::MaxSurge => surge::validate_max_surge(namespace),
            Check::Priority => spot::validate_priority(namespace),
            Check::EvictionPolicy => spot::validate_eviction_policy(namespace),
            Check::SpotMaxPrice => spot::validate_spot_max_price(namespace),
            Check::KubernetesVersion => version::validate_k8s_version(namespace),
            Check::Addons => addons::validate_addons(namespace),
            Check::NodepoolName => nodepool::validate_nodepool_name(namespace),
            Check::NodesCount => nodepool::validate_nodes_count(namespace),
            Check::MaxPods => nodepool::validate_max_pods(namespace),
            Check::LinuxHostName => nodepool::validate_linux_host_name(namespace),
            Check::NodepoolTaints => nodepool::validate_nodepool_taints(namespace),
            Check::NodepoolLabels => nodepool::validate_nodepool_labels(namespace),
            Check::LoadBalancerIdleTimeout => {
                network::validate_load_balancer_idle_timeout(namespace)
            }
            Check::LoadBalancerOutboundPorts => {
                network::validate_load_balancer_outbound_ports(namespace)
            }
            Check::NatGatewayManagedOutboundIpCount => {
                network::validate_nat_gateway_managed_outbound_ip_count(namespace)
            }
            Check::NatGatewayIdleTimeout => network::validate_nat_gateway_idle_timeout(namespace),
        }
    }
}

/// `az aks create`
pub const CREATE_CHECKS: &[Check] = &[
    Check::LinuxHostName,
    Check::KubernetesVersion,
    Check::NodepoolName,
    Check::NodesCount,
    Check::MaxPods,
    Check::VnetSubnetId,
    Check::PodSubnetId,
    Check::NodePublicIpPrefixId,
    Check::AssignIdentity,
    Check::AssignKubeletIdentity,
    Check::IpRanges,
    Check::ClusterAutoscalerProfile,
    Check::Addons,
    Check::NodepoolTaints,
    Check::NodepoolLabels,
    Check::LoadBalancerIdleTimeout,
    Check::LoadBalancerOutboundPorts,
    Check::NatGatewayManagedOutboundIpCount,
    Check::NatGatewayIdleTimeout,
];

/// `az aks update`
pub const UPDATE_CHECKS: &[Check] = &[
    Check::NodesCount,
    Check::AssignIdentity,
    Check::IpRanges,
    Check::ClusterAutoscalerProfile,
    Check::LoadBalancerIdleTimeout,
    Check::LoadBalancerOutboundPorts,
    Check::NatGatewayManagedOutboundIpCount,
    Check::NatGatewayIdleTimeout,
];

/// `az aks nodepool add`
pub const NODEPOOL_ADD_CHECKS: &[Check] = &[
    Check::NodepoolName,
    Check::KubernetesVersion,
    Check::NodesCount,
    Check::MaxPods,
    Check::MaxSurge,
    Check::VnetSubnetId,
    Check::PodSubnetId,
    Check::NodePublicIpPrefixId,
    Check::Priority,
    Check::EvictionPolicy,
    Check::SpotMaxPrice,
    Check::NodepoolTaints,
    Check::NodepoolLabels,
];

/// `az aks pod-identity add`
pub const POD_IDENTITY_ADD_CHECKS: &[Check] = &[
    Check::Required(POD_IDENTITY_NAME),
    Check::Required(POD_IDENTITY_NAMESPACE),
];

/// Run `checks` in order, stopping at the first failure
///
/// # Errors
/// Returns the first failing check's error.
pub fn run_checks(namespace: &mut Namespace, checks: &[Check]) -> Result<()> {
    for check in checks {
        debug!(check = check.name(), "Running check");
        if let Err(e) = check.apply(namespace) {
            warn!(check = check.name(), error = %e, "Check failed");
            return Err(e);
        }
    }
    Ok(())
}

/// Run every check and return all failures, in check order
///
/// Checks are independent, so a failure does not stop later ones. Fields a
/// failed check would have normalized are left as given.
pub fn run_checks_collect(namespace: &mut Namespace, checks: &[Check]) -> Vec<ValidationError> {
    checks
        .iter()
        .filter_map(|check| {
            debug!(check = check.name(), "Running check");
            check.apply(namespace).err().inspect(|e| {
                warn!(check = check.name(), error = %e, "Check failed");
            })
        })
        .collect()
}
