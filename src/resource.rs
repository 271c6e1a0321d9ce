// Static registry of resource families. Every subcommand references its entry
// directly, so request paths and body envelope keys are fixed at compile time
// instead of composed from strings at call time.

#[derive(Debug, Clone, Copy)]
pub struct ResourceSpec {
	pub name: &'static str,
	pub plural: &'static str,
	pub path: &'static str,
	// Alternate collection segment for families renamed across API versions
	// (e.g. LBaaS v2 healthmonitor).
	pub shadow_path: Option<&'static str>,
}

pub const API_VERSION: &str = "v2.0";

pub const NETWORK: ResourceSpec = ResourceSpec {
	name: "network",
	plural: "networks",
	path: "networks",
	shadow_path: None,
};

pub const SUBNET: ResourceSpec = ResourceSpec {
	name: "subnet",
	plural: "subnets",
	path: "subnets",
	shadow_path: None,
};

pub const PORT: ResourceSpec = ResourceSpec {
	name: "port",
	plural: "ports",
	path: "ports",
	shadow_path: None,
};

pub const ROUTER: ResourceSpec = ResourceSpec {
	name: "router",
	plural: "routers",
	path: "routers",
	shadow_path: None,
};

pub const FLOATINGIP: ResourceSpec = ResourceSpec {
	name: "floatingip",
	plural: "floatingips",
	path: "floatingips",
	shadow_path: None,
};

pub const SECURITY_GROUP: ResourceSpec = ResourceSpec {
	name: "security_group",
	plural: "security_groups",
	path: "security-groups",
	shadow_path: None,
};

pub const SECURITY_GROUP_RULE: ResourceSpec = ResourceSpec {
	name: "security_group_rule",
	plural: "security_group_rules",
	path: "security-group-rules",
	shadow_path: None,
};

pub const FIREWALL_RULE: ResourceSpec = ResourceSpec {
	name: "firewall_rule",
	plural: "firewall_rules",
	path: "fw/firewall_rules",
	shadow_path: None,
};

pub const FIREWALL_POLICY: ResourceSpec = ResourceSpec {
	name: "firewall_policy",
	plural: "firewall_policies",
	path: "fw/firewall_policies",
	shadow_path: None,
};

pub const HEALTHMONITOR: ResourceSpec = ResourceSpec {
	name: "healthmonitor",
	plural: "healthmonitors",
	path: "lbaas/healthmonitors",
	shadow_path: Some("healthmonitors"),
};

impl ResourceSpec {
	pub fn collection_path(&self) -> String {
		format!("{API_VERSION}/{}", self.path)
	}

	pub fn item_path(&self, id: &str) -> String {
		format!("{}/{id}", self.collection_path())
	}

	// The same family addressed through its alternate path, when one exists.
	pub fn shadowed(&self) -> ResourceSpec {
		ResourceSpec {
			path: self.shadow_path.unwrap_or(self.path),
			..*self
		}
	}

	pub fn display(&self) -> String {
		self.name.replace('_', " ")
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn collection_path_includes_api_version() {
		assert_eq!(NETWORK.collection_path(), "v2.0/networks");
		assert_eq!(
			FIREWALL_POLICY.collection_path(),
			"v2.0/fw/firewall_policies"
		);
	}

	#[test]
	fn item_path_appends_id() {
		assert_eq!(PORT.item_path("p1"), "v2.0/ports/p1");
	}

	#[test]
	fn shadowed_switches_collection_segment() {
		assert_eq!(
			HEALTHMONITOR.collection_path(),
			"v2.0/lbaas/healthmonitors"
		);
		assert_eq!(
			HEALTHMONITOR.shadowed().collection_path(),
			"v2.0/healthmonitors"
		);
		assert_eq!(HEALTHMONITOR.shadowed().name, "healthmonitor");
	}

	#[test]
	fn shadowed_falls_back_to_primary_path_when_absent() {
		assert_eq!(NETWORK.shadowed().collection_path(), "v2.0/networks");
	}
}
