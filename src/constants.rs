//! # Constants
//!
//! Fixed sets and limits shared by the validators.
//!
//! These are read-only configuration data: nothing mutates them at runtime.

/// Add-ons accepted by `--enable-addons`, paired with the addon profile key
/// the service uses for each one.
pub const ADDONS: &[(&str, &str)] = &[
    ("http_application_routing", "httpApplicationRouting"),
    ("monitoring", "omsagent"),
    ("virtual-node", "aciConnector"),
    ("azure-policy", "azurepolicy"),
    ("kube-dashboard", "kubeDashboard"),
    ("ingress-appgw", "ingressApplicationGateway"),
    ("confcom", "ACCSGXDevicePlugin"),
    ("open-service-mesh", "openServiceMesh"),
    ("azure-keyvault-secrets-provider", "azureKeyvaultSecretsProvider"),
    ("gitops", "gitops"),
];

/// Settings recognized in `--cluster-autoscaler-profile key=value` entries
pub const CLUSTER_AUTOSCALER_PROFILE_KEYS: &[&str] = &[
    "scan-interval",
    "scale-down-delay-after-add",
    "scale-down-delay-after-delete",
    "scale-down-delay-after-failure",
    "scale-down-unneeded-time",
    "scale-down-unready-time",
    "ok-total-unready-count",
    "max-node-provision-time",
    "scale-down-utilization-threshold",
    "max-empty-bulk-delete",
    "skip-nodes-with-system-pods",
    "skip-nodes-with-local-storage",
    "expander",
    "max-total-unready-percentage",
    "max-graceful-termination-sec",
    "new-pod-scale-up-delay",
    "balance-similar-node-groups",
];

/// Scale set priority that enables `--spot-max-price`
pub const SCALE_SET_PRIORITY_SPOT: &str = "Spot";

/// Default scale set priority
pub const SCALE_SET_PRIORITY_REGULAR: &str = "Regular";

/// Eviction policies accepted for spot node pools
pub const SPOT_EVICTION_POLICIES: &[&str] = &["Delete", "Deallocate"];

/// Spot max price meaning "pay up to the on-demand price"
pub const SPOT_PRICE_ON_DEMAND: f64 = -1.0;

/// Maximum digits after the decimal point in a spot max price
pub const SPOT_PRICE_MAX_DECIMAL_PLACES: usize = 5;

/// Authorized IP range that restricts API server traffic to agent nodes
pub const RESTRICT_TO_AGENT_NODES: &str = "0.0.0.0/32";

/// Node taint effects understood by the kubelet
pub const TAINT_EFFECTS: &[&str] = &["NoSchedule", "PreferNoSchedule", "NoExecute"];

/// Node pool names are capped by the VMSS naming scheme
pub const MAX_NODEPOOL_NAME_LENGTH: usize = 12;

/// Node count bounds per pool
pub const MIN_NODE_COUNT: i64 = 1;
pub const MAX_NODE_COUNT: i64 = 1000;

/// Load balancer idle timeout bounds (minutes)
pub const LOAD_BALANCER_IDLE_TIMEOUT_RANGE: (i64, i64) = (4, 100);

/// Load balancer allocated outbound ports per VM
pub const LOAD_BALANCER_OUTBOUND_PORTS_RANGE: (i64, i64) = (0, 64000);

/// NAT gateway managed outbound IP count bounds
pub const NAT_GATEWAY_OUTBOUND_IP_COUNT_RANGE: (i64, i64) = (1, 16);

/// NAT gateway idle timeout bounds (minutes)
pub const NAT_GATEWAY_IDLE_TIMEOUT_RANGE: (i64, i64) = (4, 120);
