//! Core data types: environment snapshots, peer addresses, and request
//! payloads.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// An immutable, ordered snapshot of environment variables.
///
/// The snapshot is captured once at job construction and never observes later
/// mutation of its source. Keys are unique; iteration follows insertion
/// order.
///
/// # Examples
///
/// ```rust
/// use envsync::EnvironmentSnapshot;
///
/// let mut snapshot = EnvironmentSnapshot::new();
/// snapshot.insert("DISPLAY", ":0");
/// snapshot.insert("LANG", "en_US.UTF-8");
/// assert_eq!(snapshot.get("DISPLAY"), Some(":0"));
/// assert_eq!(snapshot.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvironmentSnapshot {
    vars: IndexMap<String, String>,
}

impl EnvironmentSnapshot {
    /// Create an empty snapshot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Capture the current process environment.
    pub fn capture() -> Self {
        std::env::vars().collect()
    }

    /// Insert or replace a variable.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.vars.insert(name.into(), value.into());
    }

    /// Look up a variable by name.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars.get(name).map(String::as_str)
    }

    /// Number of variables in the snapshot.
    pub fn len(&self) -> usize {
        self.vars.len()
    }

    /// Whether the snapshot holds no variables.
    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    /// Iterate over `(name, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.vars.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl FromIterator<(String, String)> for EnvironmentSnapshot {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            vars: iter.into_iter().collect(),
        }
    }
}

impl<'a> FromIterator<(&'a str, &'a str)> for EnvironmentSnapshot {
    fn from_iter<I: IntoIterator<Item = (&'a str, &'a str)>>(iter: I) -> Self {
        iter.into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }
}

/// Bus address of a single peer: service, object path, interface, and method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeerAddress {
    /// Bus service (well-known name) of the peer.
    pub service: String,
    /// Object path on the peer.
    pub path: String,
    /// Interface the method belongs to.
    pub interface: String,
    /// Method to invoke.
    pub method: String,
}

impl PeerAddress {
    /// Create a peer address.
    pub fn new(
        service: impl Into<String>,
        path: impl Into<String>,
        interface: impl Into<String>,
        method: impl Into<String>,
    ) -> Self {
        Self {
            service: service.into(),
            path: path.into(),
            interface: interface.into(),
            method: method.into(),
        }
    }
}

/// The set of peers one job fans out to.
///
/// `legacy` peers each receive one per-variable call per validated entry; the
/// `activation` peer receives the whole validated set as a single map; the
/// `manager` peer receives the sanitized subset as a single `NAME=VALUE`
/// list. The whole set is configuration: callers that no longer need the
/// legacy per-variable targets can simply leave `legacy` empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeerSet {
    /// Peers receiving one `Payload::Pair` call per validated variable.
    pub legacy: Vec<PeerAddress>,
    /// Peer receiving the whole validated set as one `Payload::Map` call.
    pub activation: PeerAddress,
    /// Peer receiving the sanitized subset as one `Payload::List` call.
    pub manager: PeerAddress,
}

impl Default for PeerSet {
    /// The standard desktop-session targets.
    fn default() -> Self {
        Self {
            legacy: vec![
                PeerAddress::new(
                    "org.kde.klauncher5",
                    "/KLauncher",
                    "org.kde.KLauncher",
                    "setLaunchEnv",
                ),
                PeerAddress::new(
                    "org.kde.Startup",
                    "/Startup",
                    "org.kde.Startup",
                    "updateLaunchEnv",
                ),
            ],
            activation: PeerAddress::new(
                "org.freedesktop.DBus",
                "/org/freedesktop/DBus",
                "org.freedesktop.DBus",
                "UpdateActivationEnvironment",
            ),
            manager: PeerAddress::new(
                "org.freedesktop.systemd1",
                "/org/freedesktop/systemd1",
                "org.freedesktop.systemd1.Manager",
                "SetEnvironment",
            ),
        }
    }
}

/// Request payload, shaped per peer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Payload {
    /// A single `(name, value)` pair for a per-variable peer.
    Pair {
        /// Variable name.
        name: String,
        /// Variable value.
        value: String,
    },
    /// The full validated environment for a batch peer.
    Map {
        /// Name → value entries in snapshot order.
        entries: IndexMap<String, String>,
    },
    /// `NAME=VALUE` lines for a bulk-list peer.
    List {
        /// Entries in snapshot order; only sanitized-safe values appear.
        entries: Vec<String>,
    },
}

/// One outbound call: a peer address plus the payload to deliver.
///
/// Ownership moves into the transport on dispatch; the job keeps no reference
/// beyond the completion handle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutboundRequest {
    /// Where the request goes.
    pub peer: PeerAddress,
    /// What the peer receives.
    pub payload: Payload,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn snapshot_preserves_insertion_order() {
        let mut snapshot = EnvironmentSnapshot::new();
        snapshot.insert("ZEBRA", "1");
        snapshot.insert("ALPHA", "2");
        snapshot.insert("MIDDLE", "3");

        let names: Vec<&str> = snapshot.iter().map(|(k, _)| k).collect();
        assert_eq!(names, vec!["ZEBRA", "ALPHA", "MIDDLE"]);
    }

    #[test]
    fn snapshot_keys_are_unique() {
        let mut snapshot = EnvironmentSnapshot::new();
        snapshot.insert("PATH", "/usr/bin");
        snapshot.insert("PATH", "/usr/local/bin");

        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot.get("PATH"), Some("/usr/local/bin"));
    }

    #[test]
    fn payload_serializes_tagged() {
        let pair = Payload::Pair {
            name: "DISPLAY".to_string(),
            value: ":0".to_string(),
        };
        let json = serde_json::to_value(&pair).unwrap();
        assert_eq!(json["type"], "pair");
        assert_eq!(json["name"], "DISPLAY");
        assert_eq!(json["value"], ":0");

        let list = Payload::List {
            entries: vec!["A=1".to_string()],
        };
        let json = serde_json::to_value(&list).unwrap();
        assert_eq!(json, json!({"type": "list", "entries": ["A=1"]}));
    }

    #[test]
    fn default_peer_set_has_two_legacy_targets() {
        let peers = PeerSet::default();
        assert_eq!(peers.legacy.len(), 2);
        assert_eq!(peers.activation.method, "UpdateActivationEnvironment");
        assert_eq!(peers.manager.method, "SetEnvironment");
    }
}
