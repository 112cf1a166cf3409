//! Machine configuration options

/// Configuration options for a crumb machine
#[derive(Clone, Debug)]
pub struct VmConfig {
    /// Live-object count that triggers the first collection
    pub initial_threshold: usize,
    /// Capacity of the root stack
    pub max_roots: usize,
    /// Print push/pop and GC phase traces
    pub trace: bool,
}

impl Default for VmConfig {
    fn default() -> Self {
        Self {
            initial_threshold: 16,
            max_roots: 256,
            trace: false,
        }
    }
}

impl VmConfig {
    /// Create a new configuration with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the live-object count that triggers the first collection
    pub fn with_initial_threshold(mut self, threshold: usize) -> Self {
        self.initial_threshold = threshold;
        self
    }

    /// Set the capacity of the root stack
    pub fn with_max_roots(mut self, max_roots: usize) -> Self {
        self.max_roots = max_roots;
        self
    }

    /// Enable or disable trace output
    pub fn with_trace(mut self, trace: bool) -> Self {
        self.trace = trace;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = VmConfig::default();

        assert_eq!(config.initial_threshold, 16);
        assert_eq!(config.max_roots, 256);
        assert!(!config.trace);
    }

    #[test]
    fn test_config_builder_methods() {
        let config = VmConfig::new()
            .with_initial_threshold(4)
            .with_max_roots(8)
            .with_trace(true);

        assert_eq!(config.initial_threshold, 4);
        assert_eq!(config.max_roots, 8);
        assert!(config.trace);
    }
}
