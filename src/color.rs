/// Completion-rate banding shared by the globe and the hierarchy:
/// >= 60 healthy, 50-60 warning, < 50 critical.
pub const HEALTHY: &str = "#10b981";
pub const WARNING: &str = "#f59e0b";
pub const CRITICAL: &str = "#ef4444";

/// Fixed palette color for region nodes, which carry no banding.
pub const REGION: &str = "#3b82f6";

pub fn completion_color(rate: f64) -> &'static str {
    if rate >= 60.0 {
        HEALTHY
    } else if rate >= 50.0 {
        WARNING
    } else {
        CRITICAL
    }
}

/// Translucent variant used for links pointing at a node of this color.
pub fn link_tint(color: &str) -> String {
    format!("{color}33")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bands_have_inclusive_lower_bounds() {
        assert_eq!(completion_color(60.0), HEALTHY);
        assert_eq!(completion_color(59.9), WARNING);
        assert_eq!(completion_color(50.0), WARNING);
        assert_eq!(completion_color(49.9), CRITICAL);
        assert_eq!(completion_color(0.0), CRITICAL);
        assert_eq!(completion_color(100.0), HEALTHY);
    }

    #[test]
    fn link_tint_appends_alpha() {
        assert_eq!(link_tint(HEALTHY), "#10b98133");
    }
}
