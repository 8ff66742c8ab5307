use super::selection_policy::SelectionPolicy;
use crate::registry::TrackerRegistry;

/// First-fit scan in node registration order. The second upload target is
/// searched strictly after the first pick, never wrapping around, and an
/// incomplete pair counts as no pair at all.
pub struct RegistryOrderPolicy;

impl SelectionPolicy for RegistryOrderPolicy {
    fn upload_targets(
        &self,
        registry: &TrackerRegistry,
        file_name: &str,
    ) -> Option<(String, String)> {
        let mut eligible = registry
            .nodes_in_order()
            .filter(|node| !node.has_file(file_name));
        let first = eligible.next()?;
        let second = eligible.next()?;
        Some((first.hostname.clone(), second.hostname.clone()))
    }

    fn replication_target(&self, registry: &TrackerRegistry, file_name: &str) -> Option<String> {
        registry
            .nodes_in_order()
            .find(|node| !node.has_file(file_name))
            .map(|node| node.hostname.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry_with_nodes(hostnames: &[&str]) -> TrackerRegistry {
        let mut registry = TrackerRegistry::new();
        for hostname in hostnames {
            registry.register_node(hostname);
        }
        registry
    }

    #[test]
    fn picks_first_two_empty_nodes_in_registration_order() {
        let registry = registry_with_nodes(&["http://a:1", "http://b:1", "http://c:1"]);
        let (first, second) = RegistryOrderPolicy
            .upload_targets(&registry, "x.txt")
            .unwrap();
        assert_eq!(first, "http://a:1");
        assert_eq!(second, "http://b:1");
    }

    #[test]
    fn skips_nodes_that_already_hold_the_file() {
        let mut registry = registry_with_nodes(&["http://a:1", "http://b:1", "http://c:1"]);
        registry.register_file("http://b:1", "x.txt", 10);
        let (first, second) = RegistryOrderPolicy
            .upload_targets(&registry, "x.txt")
            .unwrap();
        assert_eq!(first, "http://a:1");
        assert_eq!(second, "http://c:1");
    }

    #[test]
    fn incomplete_pair_is_no_pair() {
        let mut registry = registry_with_nodes(&["http://a:1", "http://b:1"]);
        registry.register_file("http://b:1", "x.txt", 10);
        assert!(
            RegistryOrderPolicy
                .upload_targets(&registry, "x.txt")
                .is_none()
        );
    }

    #[test]
    fn no_pair_when_every_node_holds_the_file() {
        let mut registry = registry_with_nodes(&["http://a:1", "http://b:1"]);
        registry.register_file("http://a:1", "x.txt", 10);
        registry.register_file("http://b:1", "x.txt", 10);
        assert!(
            RegistryOrderPolicy
                .upload_targets(&registry, "x.txt")
                .is_none()
        );
    }

    #[test]
    fn replication_target_is_first_node_without_the_file() {
        let mut registry = registry_with_nodes(&["http://a:1", "http://b:1", "http://c:1"]);
        registry.register_file("http://a:1", "x.txt", 10);
        registry.register_file("http://b:1", "x.txt", 10);
        assert_eq!(
            RegistryOrderPolicy
                .replication_target(&registry, "x.txt")
                .unwrap(),
            "http://c:1"
        );
        registry.register_file("http://c:1", "x.txt", 10);
        assert!(
            RegistryOrderPolicy
                .replication_target(&registry, "x.txt")
                .is_none()
        );
    }
}
