use openalaw_core::bridge::PermissionSet;
use tracing::debug;

/// Resolve the capability permissions available to the bridge.
///
/// No platform query exists yet, so every capability reports as denied.
pub fn check_permissions() -> PermissionSet {
    debug!("checking device permissions");
    let permissions = PermissionSet::default();
    debug!(?permissions, "permission check completed");
    permissions
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_permissions_start_denied() {
        let permissions = check_permissions();
        assert!(!permissions.accessibility);
        assert!(!permissions.overlay);
        assert!(!permissions.usage_stats);
        assert!(!permissions.input_method);
    }
}
