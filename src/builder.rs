//! Builds the outbound request set for one job from a validated snapshot.

use indexmap::IndexMap;
use tracing::warn;

use crate::types::{EnvironmentSnapshot, OutboundRequest, Payload, PeerSet};
use crate::validate::{is_sanitized_value, is_valid_name};

/// Build every request one job dispatches, in dispatch order.
///
/// For each entry with a valid name: one `Pair` request per legacy peer, one
/// entry in the activation map, and, if the value passes sanitization, one
/// `NAME=VALUE` line in the manager list. Entries with invalid names are
/// skipped entirely. The map and list requests are always appended last —
/// the list even when empty, so the manager peer drops stale state.
pub(crate) fn build_requests(
    snapshot: &EnvironmentSnapshot,
    peers: &PeerSet,
) -> Vec<OutboundRequest> {
    let mut requests = Vec::with_capacity(snapshot.len() * peers.legacy.len() + 2);
    let mut activation_env: IndexMap<String, String> = IndexMap::new();
    let mut manager_updates: Vec<String> = Vec::new();

    for (name, value) in snapshot.iter() {
        if !is_valid_name(name) {
            warn!(name, "skipping environment variable: name contains unsupported characters");
            continue;
        }

        for peer in &peers.legacy {
            requests.push(OutboundRequest {
                peer: peer.clone(),
                payload: Payload::Pair {
                    name: name.to_string(),
                    value: value.to_string(),
                },
            });
        }

        activation_env.insert(name.to_string(), value.to_string());

        if is_sanitized_value(value) {
            manager_updates.push(format!("{name}={value}"));
        } else {
            warn!(name, "skipping environment variable for manager peer: value contains unsupported characters");
        }
    }

    requests.push(OutboundRequest {
        peer: peers.activation.clone(),
        payload: Payload::Map {
            entries: activation_env,
        },
    });
    requests.push(OutboundRequest {
        peer: peers.manager.clone(),
        payload: Payload::List {
            entries: manager_updates,
        },
    });

    requests
}
