use press_config::PressConfig;
use press_core::identity::SessionIdentity;

/// Domain parameters the controller needs at construction time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkflowSettings {
    /// Target community, without the `r/` prefix.
    pub community: String,
    pub idea_count: u32,
    pub trend_limit: usize,
    pub identity: SessionIdentity,
}

impl WorkflowSettings {
    #[must_use]
    pub fn from_config(config: &PressConfig) -> Self {
        Self {
            community: config.community.name.clone(),
            idea_count: config.community.idea_count,
            trend_limit: config.community.trend_limit,
            identity: config.session.identity(),
        }
    }
}

impl Default for WorkflowSettings {
    fn default() -> Self {
        Self::from_config(&PressConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_follow_config_defaults() {
        let settings = WorkflowSettings::default();
        assert_eq!(settings.community, "growmybusinessnow");
        assert_eq!(settings.idea_count, 5);
        assert_eq!(settings.identity.user_id, "local-dev-user");
    }
}
