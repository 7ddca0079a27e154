//! Style engine: node rule table, label abbreviation, edge coloring.
//!
//! Styling is attribute-only mutation; it never adds or removes nodes or
//! edges and has no failure conditions. Node rules are matched against the
//! label before abbreviation, mirroring the order the attributes were
//! historically assigned in.

use crate::color;
use crate::config::{NodeRule, Replacement, StyleConfig};
use crate::graph::{DepGraph, GraphNode};

/// Apply the configured styling to every node and edge of `graph`.
pub fn apply(config: &StyleConfig, graph: &mut DepGraph) {
    for node in graph.nodes_mut() {
        let label = node.label().to_string();

        if let Some(rule) = config.node_rules().iter().find(|rule| rule.matches(&label)) {
            apply_rule(rule, node);
        }

        let shortened = apply_replacements(&label, config.replacements());
        if shortened != label {
            node.set_attribute("label", &shortened);
        }
    }

    for edge in graph.edges_mut() {
        let edge_color = color::edge_color(edge.source(), edge.destination(), config.edge());
        edge.set_attribute("color", &edge_color);
    }
}

fn apply_rule(rule: &NodeRule, node: &mut GraphNode) {
    if let Some(fill) = rule.color() {
        node.set_attribute("color", fill);
    }
    if let Some(shape) = rule.shape() {
        node.set_attribute("shape", shape);
    }
    for flag in rule.styles() {
        node.add_style(flag);
    }
}

/// Apply every replacement in order, each globally, to the current label.
fn apply_replacements(label: &str, replacements: &[Replacement]) -> String {
    let mut current = label.to_string();
    for replacement in replacements {
        if current.contains(replacement.pattern()) {
            current = current.replace(replacement.pattern(), replacement.replacement());
        }
    }
    current
}

#[cfg(test)]
mod tests {
    use super::*;

    fn systemui_graph() -> DepGraph {
        DepGraph::from_dot_source(
            r#"digraph deps {
                car [label="com.android.systemui.car.CarServiceProvider"];
                named [label="com.android.systemui.NotACarWidget"];
                wm [label="com.android.systemui.wm.BarControlPolicy"];
                plain [label="com.android.systemui.statusbar.StatusBar"];
                other [label="java.lang.String"];
                car -> plain;
                plain -> other;
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn car_nodes_get_green_fill() {
        let mut graph = systemui_graph();
        apply(&StyleConfig::default(), &mut graph);

        for id in ["car", "named", "wm"] {
            let node = graph.node(id).unwrap();
            assert_eq!(node.attribute("color"), Some("darkolivegreen1"), "{id}");
            assert_eq!(node.attribute("style"), Some("filled"), "{id}");
            assert_eq!(node.attribute("shape"), None, "{id}");
        }
    }

    #[test]
    fn remaining_systemui_nodes_get_boxed_burlywood() {
        let mut graph = systemui_graph();
        apply(&StyleConfig::default(), &mut graph);

        let node = graph.node("plain").unwrap();
        assert_eq!(node.attribute("color"), Some("burlywood"));
        assert_eq!(node.attribute("shape"), Some("box"));
        assert_eq!(node.attribute("style"), Some("filled"));
    }

    #[test]
    fn unmatched_nodes_keep_their_attributes() {
        let mut graph = systemui_graph();
        apply(&StyleConfig::default(), &mut graph);

        let node = graph.node("other").unwrap();
        assert_eq!(node.attribute("color"), None);
        assert_eq!(node.attribute("shape"), None);
        assert_eq!(node.attribute("style"), None);
    }

    #[test]
    fn labels_are_abbreviated_in_order() {
        let mut graph = DepGraph::from_dot_source(
            r#"digraph g {
                a [label="com.google.android.widget.Button"];
                b [label="javax.inject.Provider"];
                c [label="dagger.Lazy"];
            }"#,
        )
        .unwrap();
        apply(&StyleConfig::default(), &mut graph);

        assert_eq!(graph.node("a").unwrap().label(), "c.g.a.widget.Button");
        assert_eq!(graph.node("b").unwrap().label(), "Provider");
        assert_eq!(graph.node("c").unwrap().label(), "Lazy");
    }

    #[test]
    fn rules_match_the_unabbreviated_label() {
        let mut graph = DepGraph::from_dot_source(
            r#"digraph g { a [label="com.android.systemui.car.Hvac"]; }"#,
        )
        .unwrap();
        apply(&StyleConfig::default(), &mut graph);

        let node = graph.node("a").unwrap();
        // Abbreviation rewrites the label after the rule already matched.
        assert_eq!(node.label(), "c.a.systemui.car.Hvac");
        assert_eq!(node.attribute("color"), Some("darkolivegreen1"));
    }

    #[test]
    fn edges_get_deterministic_hex_colors() {
        let mut graph = systemui_graph();
        apply(&StyleConfig::default(), &mut graph);

        let first = graph.edges()[0].attribute("color").unwrap().to_string();
        assert!(first.starts_with('#') && first.len() == 7);

        let mut again = systemui_graph();
        apply(&StyleConfig::default(), &mut again);
        assert_eq!(again.edges()[0].attribute("color").unwrap(), first);
    }

    #[test]
    fn styling_twice_is_a_no_op() {
        let config = StyleConfig::default();

        let mut once = systemui_graph();
        apply(&config, &mut once);

        let mut twice = systemui_graph();
        apply(&config, &mut twice);
        apply(&config, &mut twice);

        for node in once.nodes() {
            let other = twice.node(node.id()).unwrap();
            for key in ["label", "color", "shape", "style"] {
                assert_eq!(node.attribute(key), other.attribute(key), "{}/{key}", node.id());
            }
        }
        assert_eq!(once.edges(), twice.edges());
    }

    #[test]
    fn no_replacement_reintroduces_its_own_pattern() {
        for replacement in StyleConfig::default().replacements() {
            assert!(
                !replacement.replacement().contains(replacement.pattern()),
                "replacement for {:?} is not idempotent",
                replacement.pattern()
            );
        }
    }

    #[test]
    fn two_tier_policy_boxes_all_systemui_nodes() {
        let mut graph = systemui_graph();
        apply(&StyleConfig::two_tier(), &mut graph);

        // The older policy boxes every subsystem node, car packages included.
        let node = graph.node("car").unwrap();
        assert_eq!(node.attribute("color"), Some("burlywood"));
        assert_eq!(node.attribute("shape"), Some("box"));
    }
}
