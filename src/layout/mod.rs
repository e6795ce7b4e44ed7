mod label_path;
mod overlap;
mod placement;
mod template;
pub(crate) mod types;
mod zone;

pub use label_path::{DEFAULT_LABEL_OFFSET, best_label_side, label_path, label_path_with_offset};
pub use overlap::{
    DEFAULT_MAX_ITERATIONS, OverlapParams, count_violations, resolve_overlaps,
    resolve_overlaps_with_report,
};
pub use placement::{assign_position, zone_anchor};
pub use template::{MAX_FIXED_TEMPLATE, select_template, select_template_with_kind};
pub use types::*;
pub use zone::{UNASSIGNED_ZONE, ZONE_SEPARATOR, ZoneIndex, effective_membership, group_by_zone, zone_key};

use crate::config::LayoutConfig;
use crate::ir::Diagram;
use crate::theme::Theme;
use log::debug;
use std::collections::{BTreeMap, BTreeSet};

/// Runs the whole placement pipeline on a diagram snapshot. Pure: the same
/// diagram, theme and config always give the same layout.
pub fn compute_layout(diagram: &Diagram, theme: &Theme, config: &LayoutConfig) -> VennLayout {
    let venn_cfg = &config.venn;
    let (circles, template) = select_template_with_kind(diagram.groups.len());

    // A repeated group id keeps the circle of its first declaration.
    let mut circle_by_group: BTreeMap<&str, CircleDescriptor> = BTreeMap::new();
    for (group, circle) in diagram.groups.iter().zip(circles.iter()) {
        circle_by_group.entry(group.id.as_str()).or_insert(*circle);
    }
    let known: BTreeSet<&str> = circle_by_group.keys().copied().collect();

    let memberships: Vec<Vec<String>> = diagram
        .entities
        .iter()
        .map(|entity| effective_membership(entity, &known))
        .collect();
    let keys: Vec<String> = memberships.iter().map(|ids| zone_key(ids)).collect();
    let zone_index = group_by_zone(&keys);

    let mut raw: Vec<(f32, f32)> = vec![(0.0, 0.0); diagram.entities.len()];
    let mut zones = Vec::with_capacity(zone_index.len());
    for (key, members) in zone_index.iter() {
        let Some(&first) = members.first() else {
            continue;
        };
        let member_circles: Vec<CircleDescriptor> = memberships[first]
            .iter()
            .filter_map(|id| circle_by_group.get(id.as_str()).copied())
            .collect();
        for (index_in_zone, &entity_idx) in members.iter().enumerate() {
            raw[entity_idx] =
                assign_position(&member_circles, index_in_zone, members.len(), venn_cfg);
        }
        zones.push(ZoneLayout {
            key: key.to_string(),
            anchor: zone_anchor(&member_circles, venn_cfg),
            members: members
                .iter()
                .map(|&idx| diagram.entities[idx].id.clone())
                .collect(),
        });
    }

    let candidates: Vec<EntityPosition> = diagram
        .entities
        .iter()
        .zip(raw)
        .zip(keys)
        .map(|((entity, (x, y)), zone_key)| EntityPosition {
            entity_id: entity.id.clone(),
            x,
            y,
            zone_key,
        })
        .collect();
    let (positions, overlap) =
        resolve_overlaps_with_report(candidates, &OverlapParams::from_config(venn_cfg));

    let groups: Vec<GroupLayout> = diagram
        .groups
        .iter()
        .zip(circles)
        .enumerate()
        .map(|(idx, (group, circle))| GroupLayout {
            id: group.id.clone(),
            label: group.display_label().to_string(),
            color: group
                .color
                .clone()
                .unwrap_or_else(|| theme.group_color(idx)),
            circle,
            label_curve: label_path_with_offset(
                &circle,
                best_label_side(&circle),
                config.labels.offset,
            ),
        })
        .collect();

    let entities: Vec<EntityLayout> = diagram
        .entities
        .iter()
        .zip(positions)
        .map(|(entity, position)| EntityLayout {
            label: entity.display_label().to_string(),
            position,
        })
        .collect();

    debug!(
        groups = groups.len(),
        entities = entities.len(),
        zones = zones.len(),
        overlap_iterations = overlap.iterations,
        converged = overlap.converged;
        "Computed venn layout"
    );

    VennLayout {
        title: diagram.title.clone(),
        template,
        groups,
        entities,
        zones,
        overlap,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn diagram(groups: &[&str], entities: &[(&str, &[&str])]) -> Diagram {
        let mut diagram = Diagram::new();
        for id in groups {
            diagram.ensure_group(id, None, None);
        }
        for (id, membership) in entities {
            diagram.ensure_entity(id, None, membership.iter().map(|m| m.to_string()).collect());
        }
        diagram
    }

    fn layout(diagram: &Diagram) -> VennLayout {
        compute_layout(diagram, &Theme::modern(), &LayoutConfig::default())
    }

    #[test]
    fn outputs_align_with_inputs() {
        let d = diagram(
            &["a", "b", "c"],
            &[("x", &["a"]), ("y", &["b", "a"]), ("z", &[])],
        );
        let l = layout(&d);
        assert_eq!(l.template, TemplateKind::Fixed { count: 3 });
        assert_eq!(l.groups.len(), 3);
        assert_eq!(l.groups[1].id, "b");
        let ids: Vec<&str> = l.entities.iter().map(|e| e.position.entity_id.as_str()).collect();
        assert_eq!(ids, vec!["x", "y", "z"]);
        assert_eq!(l.entities[1].position.zone_key, "a+b");
        assert_eq!(l.entities[2].position.zone_key, UNASSIGNED_ZONE);
    }

    #[test]
    fn stale_membership_falls_back_to_unassigned() {
        let d = diagram(&["a"], &[("ghosted", &["nope"]), ("loner", &[])]);
        let l = layout(&d);
        assert_eq!(l.entities[0].position.zone_key, "");
        assert_eq!(l.zones.len(), 1);
        assert_eq!(l.zones[0].members, vec!["ghosted", "loner"]);
        assert_eq!(l.zones[0].anchor, (95.0, 95.0));
    }

    #[test]
    fn partially_stale_membership_keeps_known_ids() {
        let d = diagram(&["a", "b"], &[("e", &["b", "gone"])]);
        let l = layout(&d);
        assert_eq!(l.entities[0].position.zone_key, "b");
    }

    #[test]
    fn group_colors_fill_from_theme() {
        let mut d = diagram(&["a", "b"], &[]);
        d.groups[0].color = Some("#123456".to_string());
        let theme = Theme::modern();
        let l = compute_layout(&d, &theme, &LayoutConfig::default());
        assert_eq!(l.groups[0].color, "#123456");
        assert_eq!(l.groups[1].color, theme.group_color(1));
    }

    #[test]
    fn label_curves_use_configured_offset() {
        let d = diagram(&["a"], &[]);
        let mut config = LayoutConfig::default();
        config.labels.offset = 3.0;
        let l = compute_layout(&d, &Theme::modern(), &config);
        assert_eq!(l.groups[0].label_curve.radius, l.groups[0].circle.r + 3.0);
        assert_eq!(l.groups[0].label_curve.side, LabelSide::Top);
    }

    #[test]
    fn empty_diagram_is_empty_layout() {
        let l = layout(&Diagram::new());
        assert!(l.is_empty());
        assert!(l.entities.is_empty());
        assert_eq!(l.template, TemplateKind::Empty);
        assert!(l.overlap.converged);
    }

    #[test]
    fn many_groups_flag_alternate_view() {
        let ids: Vec<String> = (0..12).map(|i| format!("g{i}")).collect();
        let refs: Vec<&str> = ids.iter().map(String::as_str).collect();
        let l = layout(&diagram(&refs, &[("e", &["g3", "g7"])]));
        assert!(l.template.prefers_alternate_view());
        assert_eq!(l.circles().len(), 12);
        assert_eq!(l.entities[0].position.zone_key, "g3+g7");
    }
}
