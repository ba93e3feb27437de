//! # Validation Tests
//!
//! Integration tests for the parameter validators.
//!
//! These tests verify:
//! - Authorized IP range rules and normalization
//! - Cluster autoscaler profile parsing
//! - Azure resource ID options
//! - Max surge, spot pricing and priority
//! - Add-on names, Kubernetes versions and pod identity fields
//! - Node pool and outbound network bounds
//! - Check sets and params file loading

use std::collections::BTreeMap;
use std::io::Write;

use aks_validators::constants::ADDONS;
use aks_validators::namespace::load_params_file;
use aks_validators::*;

const IP_RANGES: &str = "api_server_authorized_ip_ranges";

fn ip_ranges(value: &str) -> Namespace {
    Namespace::new().with(IP_RANGES, value)
}

fn error_message(result: Result<()>) -> String {
    match result {
        Ok(()) => panic!("expected a validation error"),
        Err(e) => e.message().to_string(),
    }
}

// --- authorized IP ranges ---

#[test]
fn test_ip_ranges_restrict_to_agent_nodes_with_others() {
    let mut ns = ip_ranges(" 0.0.0.0/32 , 129.1.1.1.1 ");
    assert_eq!(
        error_message(validate_ip_ranges(&mut ns)),
        "Setting --api-server-authorized-ip-ranges to 0.0.0.0/32 is not allowed with other IP ranges. Refer to https://aka.ms/aks/whitelist for more details"
    );
}

#[test]
fn test_ip_ranges_disabled_and_enabled() {
    let mut ns = ip_ranges(" , 129.1.1.1.1");
    assert_eq!(
        error_message(validate_ip_ranges(&mut ns)),
        "--api-server-authorized-ip-ranges cannot be disabled and simultaneously enabled"
    );
}

#[test]
fn test_ip_ranges_disable() {
    let mut ns = ip_ranges("");
    assert!(validate_ip_ranges(&mut ns).is_ok());

    let mut ns = Namespace::new();
    assert!(validate_ip_ranges(&mut ns).is_ok());
    assert!(ns.get(IP_RANGES).is_none());
}

#[test]
fn test_ip_ranges_restrict_to_agent_nodes_alone() {
    for value in ["0.0.0.0/32", "0.0.0.0/32,0.0.0.0/32"] {
        let mut ns = ip_ranges(value);
        assert!(
            validate_ip_ranges(&mut ns).is_ok(),
            "'{value}' should be valid"
        );
    }
}

#[test]
fn test_ip_ranges_reserved() {
    let reserved = vec![
        "192.168.0.0,192.168.0.0/16",
        "10.0.0.0/8",
        "127.0.0.1",
        "169.254.1.1",
        "172.16.5.4",
        "100.64.1.1",
    ];

    for value in reserved {
        let mut ns = ip_ranges(value);
        assert_eq!(
            error_message(validate_ip_ranges(&mut ns)),
            "--api-server-authorized-ip-ranges must be global non-reserved addresses or CIDRs",
            "'{value}' should be rejected as reserved"
        );
    }
}

#[test]
fn test_ip_ranges_malformed() {
    let malformed = vec![
        "193.168.0",
        "129.1.1.1.1",
        "not-an-ip",
        "20.0.0.0/33",
        "20.0.0.1/8",
        "300.1.1.1",
    ];

    for value in malformed {
        let mut ns = ip_ranges(value);
        assert_eq!(
            error_message(validate_ip_ranges(&mut ns)),
            "--api-server-authorized-ip-ranges should be a list of IPv4 addresses or CIDRs",
            "'{value}' should be rejected as malformed"
        );
    }
}

#[test]
fn test_ip_ranges_ipv6() {
    for value in ["3ffe:1900:4545:3:200:f8ff:fe21:67cf", "2001:db8::/32"] {
        let mut ns = ip_ranges(value);
        assert_eq!(
            error_message(validate_ip_ranges(&mut ns)),
            "--api-server-authorized-ip-ranges cannot be IPv6 addresses",
            "'{value}' should be rejected as IPv6"
        );
    }
}

#[test]
fn test_ip_ranges_normalized_to_unique_list() {
    let mut ns = ip_ranges("20.0.0.0/8, 52.1.2.3 ,20.0.0.0/8");
    assert!(validate_ip_ranges(&mut ns).is_ok());
    assert_eq!(
        ns.get(IP_RANGES),
        Some(&ArgValue::from(vec!["20.0.0.0/8", "52.1.2.3"]))
    );
}

#[test]
fn test_ip_ranges_list_input() {
    let mut ns = Namespace::new().with(IP_RANGES, vec!["20.0.0.0/8,52.1.2.3", "40.1.0.0/16"]);
    assert!(validate_ip_ranges(&mut ns).is_ok());
    assert_eq!(ns.get_list(IP_RANGES).map(|l| l.len()), Some(3));
}

// --- cluster autoscaler profile ---

fn autoscaler_profile(entries: Vec<&str>) -> Namespace {
    Namespace::new().with("cluster_autoscaler_profile", entries)
}

#[test]
fn test_autoscaler_empty_keys() {
    let cases = vec![vec!["="], vec!["=", "="], vec!["scan-interval=20s", "="]];

    for entries in cases {
        let mut ns = autoscaler_profile(entries.clone());
        assert_eq!(
            error_message(validate_cluster_autoscaler_profile(&mut ns)),
            "Empty key specified for cluster-autoscaler-profile",
            "{entries:?} should be rejected"
        );
    }
}

#[test]
fn test_autoscaler_invalid_key() {
    let mut ns = autoscaler_profile(vec!["bad-key=val"]);
    assert_eq!(
        error_message(validate_cluster_autoscaler_profile(&mut ns)),
        "Invalid key specified for cluster-autoscaler-profile: bad-key"
    );
}

#[test]
fn test_autoscaler_missing_separator() {
    let mut ns = autoscaler_profile(vec!["scan-interval"]);
    assert_eq!(
        error_message(validate_cluster_autoscaler_profile(&mut ns)),
        "--cluster-autoscaler-profile should be of the form key=value"
    );
}

#[test]
fn test_autoscaler_empty_value_allowed() {
    let mut ns = autoscaler_profile(vec!["scan-interval="]);
    assert!(validate_cluster_autoscaler_profile(&mut ns).is_ok());
    assert_eq!(
        ns.get("cluster_autoscaler_profile"),
        Some(&ArgValue::from(BTreeMap::from([(
            "scan-interval".to_string(),
            String::new()
        )])))
    );
}

#[test]
fn test_autoscaler_valid_parameters() {
    let mut ns = autoscaler_profile(vec!["scan-interval=20s", "scale-down-delay-after-add=15m"]);
    assert!(validate_cluster_autoscaler_profile(&mut ns).is_ok());

    let expected = BTreeMap::from([
        ("scan-interval".to_string(), "20s".to_string()),
        ("scale-down-delay-after-add".to_string(), "15m".to_string()),
    ]);
    assert_eq!(
        ns.get("cluster_autoscaler_profile"),
        Some(&ArgValue::from(expected))
    );

    // a second pass over the normalized map is a no-op
    assert!(validate_cluster_autoscaler_profile(&mut ns).is_ok());
}

#[test]
fn test_autoscaler_absent() {
    let mut ns = Namespace::new();
    assert!(validate_cluster_autoscaler_profile(&mut ns).is_ok());
    assert!(ns.get("cluster_autoscaler_profile").is_none());
}

// --- resource IDs ---

const VALID_SUBNET_ID: &str = "/subscriptions/testid/resourceGroups/MockedResourceGroup/providers/Microsoft.Network/virtualNetworks/MockedNetworkId/subnets/MockedSubNetId";
const VALID_IDENTITY_ID: &str = "/subscriptions/testid/resourceGroups/MockedResourceGroup/providers/Microsoft.ManagedIdentity/userAssignedIdentities/mockIdentityID";

#[test]
fn test_vnet_subnet_id() {
    let mut ns = Namespace::new().with("vnet_subnet_id", "dummy subnet id");
    assert_eq!(
        error_message(validate_vnet_subnet_id(&mut ns)),
        "--vnet-subnet-id is not a valid Azure resource ID."
    );

    for value in [VALID_SUBNET_ID, ""] {
        let mut ns = Namespace::new().with("vnet_subnet_id", value);
        assert!(
            validate_vnet_subnet_id(&mut ns).is_ok(),
            "'{value}' should be valid"
        );
    }
    assert!(validate_vnet_subnet_id(&mut Namespace::new()).is_ok());
}

#[test]
fn test_assign_identity() {
    let mut ns = Namespace::new().with("assign_identity", "dummy identity id");
    assert_eq!(
        error_message(validate_assign_identity(&mut ns)),
        "--assign-identity is not a valid Azure resource ID."
    );

    for value in [VALID_IDENTITY_ID, ""] {
        let mut ns = Namespace::new().with("assign_identity", value);
        assert!(
            validate_assign_identity(&mut ns).is_ok(),
            "'{value}' should be valid"
        );
    }
    assert!(validate_assign_identity(&mut Namespace::new()).is_ok());
}

#[test]
fn test_other_resource_id_options() {
    let mut ns = Namespace::new()
        .with("pod_subnet_id", "subnet")
        .with("assign_kubelet_identity", "kubelet")
        .with("node_public_ip_prefix_id", "prefix");
    assert_eq!(
        error_message(validate_pod_subnet_id(&mut ns)),
        "--pod-subnet-id is not a valid Azure resource ID."
    );
    assert_eq!(
        error_message(validate_assign_kubelet_identity(&mut ns)),
        "--assign-kubelet-identity is not a valid Azure resource ID."
    );
    assert_eq!(
        error_message(validate_node_public_ip_prefix_id(&mut ns)),
        "--node-public-ip-prefix-id is not a valid Azure resource ID."
    );
}

#[test]
fn test_resource_id_parse() {
    let id = ResourceId::parse(VALID_SUBNET_ID).expect("subnet ID should parse");
    assert_eq!(id.subscription, "testid");
    assert_eq!(id.resource_group, "MockedResourceGroup");
    assert_eq!(id.namespace, "Microsoft.Network");
    assert_eq!(id.resource_type, "virtualNetworks");
    assert_eq!(id.name, "MockedNetworkId");
    assert_eq!(id.leaf_name(), "MockedSubNetId");
    assert!(is_valid_resource_id(VALID_IDENTITY_ID));
    assert!(!is_valid_resource_id("/subscriptions/testid"));
}

// --- max surge ---

#[test]
fn test_max_surge_valid() {
    for value in ["5", "33%", "1", "100%"] {
        let mut ns = Namespace::new().with("max_surge", value);
        assert!(
            validate_max_surge(&mut ns).is_ok(),
            "'{value}' should be valid"
        );
    }
    assert!(validate_max_surge(&mut Namespace::new()).is_ok());
}

#[test]
fn test_max_surge_invalid() {
    let mut ns = Namespace::new().with("max_surge", "foobar");
    assert_eq!(
        error_message(validate_max_surge(&mut ns)),
        "--max-surge should be an int or percentage"
    );

    let mut ns = Namespace::new().with("max_surge", "-3");
    assert_eq!(
        error_message(validate_max_surge(&mut ns)),
        "--max-surge must be positive"
    );
}

// --- spot ---

fn spot_price(price: f64) -> Namespace {
    Namespace::new()
        .with("spot_max_price", price)
        .with("priority", "Spot")
}

#[test]
fn test_spot_max_price_valid() {
    for price in [5.0, 5.12345, -1.0, 0.068, 0.071, 5.000_000_00] {
        let mut ns = spot_price(price);
        assert!(
            validate_spot_max_price(&mut ns).is_ok(),
            "{price} should be valid"
        );
    }
}

#[test]
fn test_spot_max_price_too_many_decimals() {
    let mut ns = spot_price(5.123_456);
    assert_eq!(
        error_message(validate_spot_max_price(&mut ns)),
        "--spot_max_price can only include up to 5 decimal places"
    );
}

#[test]
fn test_spot_max_price_non_positive() {
    for price in [-2.0, 0.0] {
        let mut ns = spot_price(price);
        assert_eq!(
            error_message(validate_spot_max_price(&mut ns)),
            "--spot_max_price can only be any decimal value greater than zero, or -1 which indicates default price to be up-to on-demand",
            "{price} should be rejected"
        );
    }
}

#[test]
fn test_spot_max_price_requires_spot_priority() {
    let mut ns = spot_price(2.0).with("priority", "Regular");
    assert_eq!(
        error_message(validate_spot_max_price(&mut ns)),
        "--spot_max_price can only be set when --priority is Spot"
    );
}

#[test]
fn test_spot_max_price_unset() {
    assert!(validate_spot_max_price(&mut Namespace::new()).is_ok());
    let mut ns = Namespace::new().with("spot_max_price", f64::NAN);
    assert!(validate_spot_max_price(&mut ns).is_ok());
}

#[test]
fn test_priority_and_eviction_policy() {
    let mut ns = Namespace::new()
        .with("priority", "Low")
        .with("eviction_policy", "Stop");
    assert_eq!(
        error_message(validate_priority(&mut ns)),
        "--priority can only be Spot or Regular"
    );
    assert_eq!(
        error_message(validate_eviction_policy(&mut ns)),
        "--eviction-policy can only be Delete or Deallocate"
    );

    let mut ns = Namespace::new()
        .with("priority", "Spot")
        .with("eviction_policy", "Deallocate");
    assert!(validate_priority(&mut ns).is_ok());
    assert!(validate_eviction_policy(&mut ns).is_ok());
}

// --- add-ons ---

#[test]
fn test_every_known_addon_is_valid() {
    for (addon, _) in ADDONS {
        let mut ns = Namespace::new().with("addons", *addon);
        assert!(
            validate_addons(&mut ns).is_ok(),
            "Addon '{addon}' should be valid"
        );
    }
}

#[test]
fn test_addon_with_dropped_character_is_invalid() {
    for (addon, _) in ADDONS {
        let mid = addon.len() / 2;
        let misspelled = format!("{}{}", &addon[..mid], &addon[mid + 1..]);
        let mut ns = Namespace::new().with("addons", misspelled.as_str());
        assert!(
            validate_addons(&mut ns).is_err(),
            "Addon '{misspelled}' should be invalid"
        );
    }
}

#[test]
fn test_unknown_addon_message_lists_options() {
    let mut ns = Namespace::new().with("addons", "qfrnmjk");
    let message = error_message(validate_addons(&mut ns));
    assert!(message.starts_with("The addon \"qfrnmjk\" is an invalid addon name."));
    assert!(message.contains("monitoring"));
    assert!(message.contains("azure-keyvault-secrets-provider"));
}

#[test]
fn test_addons_comma_list_and_config_pairs() {
    let mut ns = Namespace::new().with("addons", "monitoring,azure-policy=enabled");
    assert!(validate_addons(&mut ns).is_ok());

    let mut ns = Namespace::new().with("addons", vec!["monitoring", "bogus"]);
    assert!(validate_addons(&mut ns).is_err());
}

// --- pod identity ---

#[test]
fn test_pod_identity_name() {
    let check = validate_pod_identity_resource_name("identity_name", true);

    let mut ns = Namespace::new().with("identity_name", "test-name");
    assert!(validate_required_field(check, &mut ns).is_ok());

    let mut ns = Namespace::new();
    assert_eq!(
        error_message(validate_required_field(check, &mut ns)),
        "--name is required"
    );
}

#[test]
fn test_pod_identity_optional_name_defaults_to_empty() {
    let check = validate_pod_identity_resource_name("binding_selector", false);
    let mut ns = Namespace::new();
    assert!(validate_required_field(check, &mut ns).is_ok());
    assert_eq!(ns.get_str("binding_selector"), Some(""));
}

#[test]
fn test_pod_identity_namespace() {
    let mut ns = Namespace::new().with("namespace", "test-name");
    assert!(validate_pod_identity_resource_namespace(&mut ns).is_ok());

    for mut ns in [Namespace::new(), Namespace::new().with("namespace", "")] {
        assert_eq!(
            error_message(validate_pod_identity_resource_namespace(&mut ns)),
            "--namespace is required"
        );
    }
}

// --- Kubernetes version ---

#[test]
fn test_k8s_version_valid() {
    for version in ["1.11.8", "1.11", ""] {
        let mut ns = Namespace::new().with("kubernetes_version", version);
        assert!(
            validate_k8s_version(&mut ns).is_ok(),
            "Version '{version}' should be valid"
        );
    }
    assert!(validate_k8s_version(&mut Namespace::new()).is_ok());
}

#[test]
fn test_k8s_version_invalid() {
    for version in ["1.2.3.4", "1.", "v1.11", "latest"] {
        let mut ns = Namespace::new().with("kubernetes_version", version);
        assert_eq!(
            error_message(validate_k8s_version(&mut ns)),
            "--kubernetes-version should be the full version number or alias minor version, such as \"1.7.12\" or \"1.7\"",
            "Version '{version}' should be invalid"
        );
    }
}

// --- node pool ---

#[test]
fn test_nodepool_name() {
    for name in ["nodepool1", "a", "abcdefghijkl"] {
        let mut ns = Namespace::new().with("nodepool_name", name);
        assert!(
            validate_nodepool_name(&mut ns).is_ok(),
            "Name '{name}' should be valid"
        );
    }

    let mut ns = Namespace::new().with("nodepool_name", "abcdefghijklm");
    assert_eq!(
        error_message(validate_nodepool_name(&mut ns)),
        "--nodepool-name can contain at most 12 characters"
    );

    let mut ns = Namespace::new().with("nodepool_name", "pool-1");
    assert_eq!(
        error_message(validate_nodepool_name(&mut ns)),
        "--nodepool-name should contain only alphanumeric characters"
    );
}

#[test]
fn test_nodes_count() {
    let mut ns = Namespace::new().with("min_count", 1_i64).with("max_count", 5_i64);
    assert!(validate_nodes_count(&mut ns).is_ok());

    let mut ns = Namespace::new().with("min_count", 0_i64);
    assert_eq!(
        error_message(validate_nodes_count(&mut ns)),
        "--min-count must be in the range [1,1000]"
    );

    let mut ns = Namespace::new().with("max_count", 1001_i64);
    assert_eq!(
        error_message(validate_nodes_count(&mut ns)),
        "--max-count must be in the range [1,1000]"
    );

    let mut ns = Namespace::new().with("min_count", 5_i64).with("max_count", 2_i64);
    assert_eq!(
        error_message(validate_nodes_count(&mut ns)),
        "--min-count must be less than or equal to --max-count"
    );
}

#[test]
fn test_max_pods() {
    // three nodes need ceil(13 / 3) = 5 pods each
    let mut ns = Namespace::new().with("max_pods", 4_i64);
    assert_eq!(
        error_message(validate_max_pods(&mut ns)),
        "--max-pods must be at least 5 for a managed Kubernetes cluster to function."
    );

    for max_pods in [0_i64, 5, 110] {
        let mut ns = Namespace::new().with("max_pods", max_pods);
        assert!(
            validate_max_pods(&mut ns).is_ok(),
            "max_pods {max_pods} should be valid"
        );
    }

    // a single node needs 9
    let mut ns = Namespace::new().with("max_pods", 8_i64).with("node_count", 1_i64);
    assert!(validate_max_pods(&mut ns).is_err());
}

#[test]
fn test_linux_host_name() {
    let mut ns = Namespace::new().with("name", "my-cluster");
    assert!(validate_linux_host_name(&mut ns).is_ok());

    let too_long = "a".repeat(64);
    for name in ["-cluster", "my_cluster", too_long.as_str()] {
        let mut ns = Namespace::new().with("name", name);
        assert!(
            validate_linux_host_name(&mut ns).is_err(),
            "Name '{name}' should be invalid"
        );
    }
}

#[test]
fn test_nodepool_taints() {
    let mut ns = Namespace::new().with(
        "node_taints",
        "sku=gpu:NoSchedule,example.com/team=infra:PreferNoSchedule",
    );
    assert!(validate_nodepool_taints(&mut ns).is_ok());

    let mut ns = Namespace::new().with("node_taints", "sku=gpu:Sometimes");
    assert_eq!(
        error_message(validate_nodepool_taints(&mut ns)),
        "Taint does not match pattern key=value:effect: sku=gpu:Sometimes"
    );
}

#[test]
fn test_labels() {
    assert!(validate_label("kubernetes.io/role", "agent").is_ok());
    assert!(validate_label("tier", "").is_ok());
    assert_eq!(
        error_message(validate_label("-tier", "web")),
        "Invalid label: -tier=web. Label key name must consist of alphanumeric characters, '-', '_' or '.', and must start and end with an alphanumeric character."
    );
    assert_eq!(
        error_message(validate_label("Example.com/tier", "web")),
        "Invalid label: Example.com/tier=web. Label key prefix must be a DNS subdomain: lowercase alphanumeric characters, '-' or '.', starting and ending with an alphanumeric character."
    );

    let mut ns = Namespace::new().with("nodepool_labels", "tier=web env=prod");
    assert!(validate_nodepool_labels(&mut ns).is_ok());

    let mut ns = Namespace::new().with("nodepool_labels", vec!["tier"]);
    assert_eq!(
        error_message(validate_nodepool_labels(&mut ns)),
        "Invalid label: tier. Label definition must be of format name=value."
    );
}

// --- outbound network ---

#[test]
fn test_outbound_network_ranges() {
    let mut ns = Namespace::new()
        .with("load_balancer_idle_timeout", 4_i64)
        .with("load_balancer_outbound_ports", 8000_i64)
        .with("nat_gateway_managed_outbound_ip_count", 16_i64)
        .with("nat_gateway_idle_timeout", 120_i64);
    assert!(validate_load_balancer_idle_timeout(&mut ns).is_ok());
    assert!(validate_load_balancer_outbound_ports(&mut ns).is_ok());
    assert!(validate_nat_gateway_managed_outbound_ip_count(&mut ns).is_ok());
    assert!(validate_nat_gateway_idle_timeout(&mut ns).is_ok());

    let mut ns = Namespace::new()
        .with("load_balancer_idle_timeout", 101_i64)
        .with("load_balancer_outbound_ports", 100_i64)
        .with("nat_gateway_managed_outbound_ip_count", 0_i64)
        .with("nat_gateway_idle_timeout", "3");
    assert_eq!(
        error_message(validate_load_balancer_idle_timeout(&mut ns)),
        "--load-balancer-idle-timeout must be in the range [4,100]"
    );
    assert_eq!(
        error_message(validate_load_balancer_outbound_ports(&mut ns)),
        "--load-balancer-outbound-ports must be a multiple of 8"
    );
    assert_eq!(
        error_message(validate_nat_gateway_managed_outbound_ip_count(&mut ns)),
        "--nat-gateway-managed-outbound-ip-count must be in the range [1,16]"
    );
    assert_eq!(
        error_message(validate_nat_gateway_idle_timeout(&mut ns)),
        "--nat-gateway-idle-timeout must be in the range [4,120]"
    );
}

#[test]
fn test_non_numeric_count() {
    let mut ns = Namespace::new().with("load_balancer_idle_timeout", "ten");
    assert_eq!(
        error_message(validate_load_balancer_idle_timeout(&mut ns)),
        "--load-balancer-idle-timeout must be a number"
    );
}

// --- check sets ---

#[test]
fn test_create_checks_normalize_fields() {
    let mut ns = Namespace::new()
        .with("name", "mycluster")
        .with("kubernetes_version", "1.11.8")
        .with(IP_RANGES, "20.0.0.0/8,52.1.2.3")
        .with("cluster_autoscaler_profile", vec!["scan-interval=20s"])
        .with("addons", "monitoring");

    assert!(run_checks(&mut ns, CREATE_CHECKS).is_ok());
    assert_eq!(ns.get_list(IP_RANGES).map(|l| l.len()), Some(2));
    assert!(matches!(
        ns.get("cluster_autoscaler_profile"),
        Some(ArgValue::Map(_))
    ));
}

#[test]
fn test_run_checks_stops_at_first_failure() {
    let mut ns = Namespace::new()
        .with("kubernetes_version", "1.")
        .with(IP_RANGES, "10.0.0.0/8");
    assert_eq!(
        error_message(run_checks(&mut ns, CREATE_CHECKS)),
        "--kubernetes-version should be the full version number or alias minor version, such as \"1.7.12\" or \"1.7\""
    );

    let errors = run_checks_collect(&mut ns, CREATE_CHECKS);
    assert_eq!(errors.len(), 2);
}

#[test]
fn test_nodepool_add_checks_spot() {
    let mut ns = Namespace::new()
        .with("nodepool_name", "spot1")
        .with("priority", "Spot")
        .with("eviction_policy", "Delete")
        .with("spot_max_price", "-1");
    assert!(run_checks(&mut ns, NODEPOOL_ADD_CHECKS).is_ok());

    let mut ns = Namespace::new()
        .with("priority", "Sometimes")
        .with("spot_max_price", "0.5");
    assert_eq!(
        error_message(run_checks(&mut ns, NODEPOOL_ADD_CHECKS)),
        "--priority can only be Spot or Regular"
    );
}

#[test]
fn test_pod_identity_add_checks() {
    let mut ns = Namespace::new().with("identity_name", "id1");
    assert_eq!(
        error_message(run_checks(&mut ns, POD_IDENTITY_ADD_CHECKS)),
        "--namespace is required"
    );

    let mut ns = ns.with("namespace", "default");
    assert!(run_checks(&mut ns, POD_IDENTITY_ADD_CHECKS).is_ok());
}

#[test]
fn test_update_checks_skip_create_only_fields() {
    let mut ns = Namespace::new()
        .with("name", "not_a_host_name")
        .with("min_count", 3_i64)
        .with("max_count", 10_i64);
    assert!(run_checks(&mut ns, UPDATE_CHECKS).is_ok());
}

// --- params files ---

fn params_file(suffix: &str, content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(suffix)
        .tempfile()
        .expect("Failed to create temp file");
    file.write_all(content.as_bytes())
        .expect("Failed to write temp file");
    file
}

#[test]
fn test_load_json_params_file() {
    let file = params_file(
        ".json",
        r#"{
            "api_server_authorized_ip_ranges": "20.0.0.0/8",
            "cluster_autoscaler_profile": ["scan-interval=20s"],
            "max_pods": 30,
            "vnet_subnet_id": null
        }"#,
    );

    let mut ns = load_params_file(file.path()).expect("params file should load");
    assert!(ns.get("vnet_subnet_id").is_none());
    assert_eq!(ns.get_integer("max_pods"), Ok(Some(30)));
    assert!(run_checks(&mut ns, CREATE_CHECKS).is_ok());
}

#[test]
fn test_load_yaml_params_file() {
    let file = params_file(
        ".yaml",
        "kubernetes_version: \"1.11\"\npriority: Spot\nspot_max_price: 0.068\nnodepool_labels:\n  - tier=web\n",
    );

    let mut ns = load_params_file(file.path()).expect("params file should load");
    assert_eq!(ns.get_str("kubernetes_version"), Some("1.11"));
    assert!(run_checks(&mut ns, NODEPOOL_ADD_CHECKS).is_ok());
}

#[test]
fn test_load_params_file_errors() {
    let file = params_file(".json", "not json");
    let err = load_params_file(file.path()).expect_err("invalid JSON should fail");
    assert!(err.to_string().contains("Failed to parse JSON params file"));

    let missing = std::path::Path::new("/nonexistent/params.json");
    let err = load_params_file(missing).expect_err("missing file should fail");
    assert!(err.to_string().contains("Failed to read params file"));
}

// --- value types and edge tokens ---

#[test]
fn test_wrong_value_types_fail_their_checks() {
    let file = params_file(
        ".json",
        r#"{
            "api_server_authorized_ip_ranges": 10,
            "nodepool_name": 1234567890123456,
            "name": true,
            "priority": 5,
            "eviction_policy": 7,
            "node_taints": {"a": "b"}
        }"#,
    );
    let mut ns = load_params_file(file.path()).expect("params file should load");

    let cases = vec![
        (
            Check::IpRanges,
            "--api-server-authorized-ip-ranges should be a list of IPv4 addresses or CIDRs",
        ),
        (
            Check::NodepoolName,
            "--nodepool-name should contain only alphanumeric characters",
        ),
        (
            Check::LinuxHostName,
            "--name cannot exceed 63 characters and can only contain letters, numbers, or dashes (-).",
        ),
        (Check::Priority, "--priority can only be Spot or Regular"),
        (
            Check::EvictionPolicy,
            "--eviction-policy can only be Delete or Deallocate",
        ),
        (
            Check::NodepoolTaints,
            "Taint does not match pattern key=value:effect: a=b",
        ),
    ];

    for (check, expected) in cases {
        assert_eq!(
            error_message(check.apply(&mut ns)),
            expected,
            "{} should reject a value of the wrong type",
            check.name()
        );
    }
}

#[test]
fn test_ip_ranges_only_empty_tokens() {
    let mut ns = ip_ranges(" , ");
    assert_eq!(
        error_message(validate_ip_ranges(&mut ns)),
        "--api-server-authorized-ip-ranges cannot be disabled and simultaneously enabled"
    );

    let mut ns = Namespace::new().with(IP_RANGES, vec!["", ""]);
    assert!(validate_ip_ranges(&mut ns).is_err());
}

#[test]
fn test_addon_names_are_not_trimmed() {
    for value in [" monitoring", "monitoring ", "monitoring, azure-policy"] {
        let mut ns = Namespace::new().with("addons", value);
        assert!(
            validate_addons(&mut ns).is_err(),
            "Addons '{value}' should be invalid"
        );
    }
}

#[test]
fn test_max_surge_beyond_i64() {
    for value in ["99999999999999999999", "99999999999999999999%"] {
        let mut ns = Namespace::new().with("max_surge", value);
        assert!(
            validate_max_surge(&mut ns).is_ok(),
            "'{value}' should be valid"
        );
    }

    let mut ns = Namespace::new().with("max_surge", "-99999999999999999999");
    assert_eq!(
        error_message(validate_max_surge(&mut ns)),
        "--max-surge must be positive"
    );
}
