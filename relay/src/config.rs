/// Runtime configuration for the relay.
#[derive(Debug, Clone, Default)]
pub struct RelayConfig {
    /// Shared secret external agents must present when ingesting
    /// events. `None` fails every ingestion request closed with 503.
    pub shared_secret: Option<String>,
}

impl RelayConfig {
    pub fn new(shared_secret: Option<String>) -> Self {
        // An empty value counts as unset.
        Self {
            shared_secret: shared_secret.filter(|s| !s.is_empty()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_secret_counts_as_unset() {
        assert_eq!(RelayConfig::new(Some(String::new())).shared_secret, None);
        assert_eq!(
            RelayConfig::new(Some("hunter2".into())).shared_secret.as_deref(),
            Some("hunter2")
        );
    }
}
