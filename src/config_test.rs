use super::*;

fn lookup_from(pairs: &'static [(&'static str, &'static str)]) -> impl Fn(&str) -> Option<String> {
    move |key| {
        pairs
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| (*v).to_owned())
    }
}

#[test]
fn defaults_apply_when_nothing_is_set() {
    let config = AppConfig::default();
    assert_eq!(config.api_url, "http://localhost:3000");
    assert_eq!(config.socket_url, "ws://localhost:3000/socket.io/?EIO=4&transport=websocket");
    assert_eq!(config.poll_interval, Duration::from_secs(30));
}

#[test]
fn api_url_trailing_slash_is_trimmed() {
    let config = AppConfig::from_lookup(lookup_from(&[("JUNGLE_API_URL", "https://api.zoo.test/ ")]));
    assert_eq!(config.api_url, "https://api.zoo.test");
    assert_eq!(config.socket_url, "wss://api.zoo.test/socket.io/?EIO=4&transport=websocket");
}

#[test]
fn explicit_socket_url_wins_over_derived() {
    let config = AppConfig::from_lookup(lookup_from(&[
        ("JUNGLE_API_URL", "http://api.zoo.test"),
        ("JUNGLE_SOCKET_URL", "ws://push.zoo.test/socket.io/?EIO=4&transport=websocket"),
    ]));
    assert_eq!(config.socket_url, "ws://push.zoo.test/socket.io/?EIO=4&transport=websocket");
}

#[test]
fn poll_secs_parses_and_rejects_garbage() {
    let config = AppConfig::from_lookup(lookup_from(&[("JUNGLE_POLL_SECS", "5")]));
    assert_eq!(config.poll_interval, Duration::from_secs(5));

    let config = AppConfig::from_lookup(lookup_from(&[("JUNGLE_POLL_SECS", "soon")]));
    assert_eq!(config.poll_interval, Duration::from_secs(DEFAULT_POLL_SECS));

    let config = AppConfig::from_lookup(lookup_from(&[("JUNGLE_POLL_SECS", "0")]));
    assert_eq!(config.poll_interval, Duration::from_secs(DEFAULT_POLL_SECS));
}

#[test]
fn socket_url_for_passes_through_unknown_scheme() {
    assert_eq!(socket_url_for("/api"), "/api/socket.io/?EIO=4&transport=websocket");
}
