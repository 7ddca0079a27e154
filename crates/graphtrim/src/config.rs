//! Configuration types for trimming and styling.
//!
//! All types implement [`serde::Deserialize`] so the CLI can load them from a
//! TOML file; the defaults reproduce the built-in styling policy without any
//! configuration file.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining trim and style settings.
//! - [`TrimConfig`] - Edge pruning policy for the reachability filter.
//! - [`StyleConfig`] - Node rule table, label replacements, and edge coloring.
//!
//! Styling policy is configuration data, not logic: [`NodeRule`]s are
//! evaluated in order with first match winning, and label replacements are
//! applied in their listed order.

use serde::Deserialize;

/// Top-level application configuration combining trim and style settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Trim configuration section.
    #[serde(default)]
    trim: TrimConfig,

    /// Style configuration section.
    #[serde(default)]
    style: StyleConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] with the specified trim and style configurations.
    pub fn new(trim: TrimConfig, style: StyleConfig) -> Self {
        Self { trim, style }
    }

    /// Returns the trim configuration.
    pub fn trim(&self) -> &TrimConfig {
        &self.trim
    }

    /// Returns the style configuration.
    pub fn style(&self) -> &StyleConfig {
        &self.style
    }
}

/// Edge pruning policy for the reachability filter.
///
/// By default an edge is removed when either endpoint leaves the keep set,
/// so no edge ever dangles into a removed node. The historical behavior of
/// pruning on the source endpoint only is available for exact compatibility
/// with older outputs.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TrimConfig {
    /// Prune edges based on the source endpoint only (legacy behavior).
    #[serde(default)]
    prune_by_source_only: bool,
}

impl TrimConfig {
    /// Creates a new [`TrimConfig`] with the given edge pruning policy.
    pub fn new(prune_by_source_only: bool) -> Self {
        Self {
            prune_by_source_only,
        }
    }

    /// Returns whether edges are pruned by their source endpoint only.
    pub fn prune_by_source_only(&self) -> bool {
        self.prune_by_source_only
    }
}

/// Visual styling configuration: node rules, label replacements, edge colors.
#[derive(Debug, Clone, Deserialize)]
pub struct StyleConfig {
    /// Node styling rules, evaluated in order; the first match wins.
    #[serde(default = "default_node_rules")]
    node_rules: Vec<NodeRule>,

    /// Ordered literal label replacements, each applied globally in turn.
    #[serde(default = "default_replacements")]
    replacements: Vec<Replacement>,

    /// Edge color derivation settings.
    #[serde(default)]
    edge: EdgeColorConfig,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            node_rules: default_node_rules(),
            replacements: default_replacements(),
            edge: EdgeColorConfig::default(),
        }
    }
}

impl StyleConfig {
    /// Creates a new [`StyleConfig`] from explicit rule and replacement lists.
    pub fn new(
        node_rules: Vec<NodeRule>,
        replacements: Vec<Replacement>,
        edge: EdgeColorConfig,
    ) -> Self {
        Self {
            node_rules,
            replacements,
            edge,
        }
    }

    /// The older two-tier node policy, kept as configuration data.
    ///
    /// Subsystem nodes are boxed burlywood; any remaining node whose label
    /// contains the lowercase subpackage marker is filled darkolivegreen1.
    pub fn two_tier() -> Self {
        Self {
            node_rules: vec![
                NodeRule {
                    contains_all: vec!["com.android.systemui".to_string()],
                    contains_any: Vec::new(),
                    equals_any: Vec::new(),
                    color: Some("burlywood".to_string()),
                    shape: Some("box".to_string()),
                    styles: vec!["filled".to_string()],
                },
                NodeRule {
                    contains_all: vec!["car".to_string()],
                    contains_any: Vec::new(),
                    equals_any: Vec::new(),
                    color: Some("darkolivegreen1".to_string()),
                    shape: None,
                    styles: vec!["filled".to_string()],
                },
            ],
            replacements: default_replacements(),
            edge: EdgeColorConfig::default(),
        }
    }

    /// Returns the node rules in evaluation order.
    pub fn node_rules(&self) -> &[NodeRule] {
        &self.node_rules
    }

    /// Returns the label replacements in application order.
    pub fn replacements(&self) -> &[Replacement] {
        &self.replacements
    }

    /// Returns the edge color settings.
    pub fn edge(&self) -> &EdgeColorConfig {
        &self.edge
    }
}

/// One node styling rule: a label predicate plus the attributes to assign.
///
/// The predicate requires every `contains_all` substring to occur in the
/// label, and, when the OR-group (`contains_any` / `equals_any`) is
/// non-empty, at least one of its members to match. All matching is
/// case-sensitive.
#[derive(Debug, Clone, Deserialize)]
pub struct NodeRule {
    /// Substrings that must all occur in the label.
    #[serde(default)]
    contains_all: Vec<String>,

    /// OR-group: substrings of which at least one must occur.
    #[serde(default)]
    contains_any: Vec<String>,

    /// OR-group: fully-qualified labels matched exactly.
    #[serde(default)]
    equals_any: Vec<String>,

    /// Fill color to assign when the rule matches.
    #[serde(default)]
    color: Option<String>,

    /// Shape to assign when the rule matches.
    #[serde(default)]
    shape: Option<String>,

    /// Style flags appended when the rule matches.
    #[serde(default)]
    styles: Vec<String>,
}

impl NodeRule {
    /// Whether this rule's predicate matches the given label.
    pub fn matches(&self, label: &str) -> bool {
        if !self.contains_all.iter().all(|needle| label.contains(needle)) {
            return false;
        }
        if self.contains_any.is_empty() && self.equals_any.is_empty() {
            return true;
        }
        self.contains_any.iter().any(|needle| label.contains(needle))
            || self.equals_any.iter().any(|exact| exact == label)
    }

    pub fn color(&self) -> Option<&str> {
        self.color.as_deref()
    }

    pub fn shape(&self) -> Option<&str> {
        self.shape.as_deref()
    }

    pub fn styles(&self) -> &[String] {
        &self.styles
    }
}

/// One literal label replacement: `pattern` occurrences become `replacement`.
#[derive(Debug, Clone, Deserialize)]
pub struct Replacement {
    pattern: String,

    #[serde(default)]
    replacement: String,
}

impl Replacement {
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn replacement(&self) -> &str {
        &self.replacement
    }
}

/// Edge color derivation settings.
#[derive(Debug, Clone, Deserialize)]
pub struct EdgeColorConfig {
    /// Channel value above which a color counts as too light against the
    /// background; when all three channels exceed it, one is clamped to it.
    #[serde(default = "default_contrast_threshold")]
    contrast_threshold: u32,
}

impl Default for EdgeColorConfig {
    fn default() -> Self {
        Self {
            contrast_threshold: default_contrast_threshold(),
        }
    }
}

impl EdgeColorConfig {
    /// Returns the contrast threshold for the too-light guard.
    pub fn contrast_threshold(&self) -> u32 {
        self.contrast_threshold
    }
}

fn default_contrast_threshold() -> u32 {
    180
}

/// The default three-tier node policy for Android SystemUI dependency graphs.
///
/// Car SystemUI classes (by package, by `Car` naming, or via the explicit
/// allow-list of `wm` classes that live outside the usual package paths) are
/// filled darkolivegreen1; remaining SystemUI classes are boxed burlywood.
fn default_node_rules() -> Vec<NodeRule> {
    vec![
        NodeRule {
            contains_all: vec!["com.android.systemui".to_string()],
            contains_any: vec![
                "com.android.systemui.car".to_string(),
                "Car".to_string(),
            ],
            equals_any: vec![
                "com.android.systemui.wm.BarControlPolicy".to_string(),
                "com.android.systemui.wm.DisplaySystemBarsController".to_string(),
                "com.android.systemui.wm.DisplaySystemBarsInsetsControllerHost".to_string(),
            ],
            color: Some("darkolivegreen1".to_string()),
            shape: None,
            styles: vec!["filled".to_string()],
        },
        NodeRule {
            contains_all: vec!["com.android.systemui".to_string()],
            contains_any: Vec::new(),
            equals_any: Vec::new(),
            color: Some("burlywood".to_string()),
            shape: Some("box".to_string()),
            styles: vec!["filled".to_string()],
        },
    ]
}

/// The default label abbreviations, in application order.
///
/// Order matters: later patterns may match text exposed by earlier ones, so
/// the list is data and must not be reordered by the engine.
fn default_replacements() -> Vec<Replacement> {
    [
        ("java.util.", ""),
        ("javax.inject.", ""),
        ("com.", "c."),
        ("google.", "g."),
        ("android.", "a."),
        ("java.lang.", ""),
        ("dagger.Lazy", "Lazy"),
        ("java.util.function.", ""),
    ]
    .into_iter()
    .map(|(pattern, replacement)| Replacement {
        pattern: pattern.to_string(),
        replacement: replacement.to_string(),
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_describe_three_tier_policy() {
        let config = StyleConfig::default();
        assert_eq!(config.node_rules().len(), 2);
        assert_eq!(config.replacements().len(), 8);
        assert_eq!(config.edge().contrast_threshold(), 180);

        assert_eq!(config.node_rules()[0].color(), Some("darkolivegreen1"));
        assert_eq!(config.node_rules()[1].shape(), Some("box"));
    }

    #[test]
    fn rule_predicate_requires_all_and_any() {
        let rules = default_node_rules();
        let car_rule = &rules[0];

        assert!(car_rule.matches("com.android.systemui.car.Thing"));
        assert!(car_rule.matches("com.android.systemui.CarWidget"));
        assert!(car_rule.matches("com.android.systemui.wm.BarControlPolicy"));
        // Subsystem marker alone is not enough for the first tier.
        assert!(!car_rule.matches("com.android.systemui.statusbar.Widget"));
        // The allow-list is exact-match, not substring.
        assert!(!car_rule.matches("x.com.android.systemui.wm.BarControlPolicy"));
    }

    #[test]
    fn empty_or_group_is_vacuously_true() {
        let rules = default_node_rules();
        assert!(rules[1].matches("com.android.systemui.statusbar.Widget"));
        assert!(!rules[1].matches("java.lang.String"));
    }

    #[test]
    fn config_parses_from_toml() {
        let config: AppConfig = toml::from_str(
            r#"
            [trim]
            prune_by_source_only = true

            [[style.node_rules]]
            contains_all = ["acme."]
            color = "lightblue"
            styles = ["filled"]

            [[style.replacements]]
            pattern = "acme.core."
            replacement = "ac."

            [style.edge]
            contrast_threshold = 200
            "#,
        )
        .unwrap();

        assert!(config.trim().prune_by_source_only());
        assert_eq!(config.style().node_rules().len(), 1);
        assert_eq!(config.style().node_rules()[0].color(), Some("lightblue"));
        assert_eq!(config.style().replacements()[0].replacement(), "ac.");
        assert_eq!(config.style().edge().contrast_threshold(), 200);
    }

    #[test]
    fn empty_toml_yields_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert!(!config.trim().prune_by_source_only());
        assert_eq!(config.style().node_rules().len(), 2);
    }
}
