use crate::layout::{OverlapReport, TemplateKind, VennLayout};
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

#[derive(Debug, Serialize)]
pub struct LayoutDump {
    pub title: Option<String>,
    pub template: TemplateKind,
    pub prefers_alternate_view: bool,
    pub circles: Vec<CircleDump>,
    pub positions: Vec<PositionDump>,
    pub zones: Vec<ZoneDump>,
    pub overlap: OverlapReport,
}

#[derive(Debug, Serialize)]
pub struct CircleDump {
    pub id: String,
    pub label: String,
    pub color: String,
    pub x: f32,
    pub y: f32,
    pub r: f32,
    pub label_side: String,
    pub label_path: String,
}

#[derive(Debug, Serialize)]
pub struct PositionDump {
    pub entity_id: String,
    pub x: f32,
    pub y: f32,
    pub zone_key: String,
}

#[derive(Debug, Serialize)]
pub struct ZoneDump {
    pub key: String,
    pub anchor: [f32; 2],
    pub members: Vec<String>,
}

impl LayoutDump {
    pub fn from_layout(layout: &VennLayout) -> Self {
        let circles = layout
            .groups
            .iter()
            .map(|group| CircleDump {
                id: group.id.clone(),
                label: group.label.clone(),
                color: group.color.clone(),
                x: group.circle.x,
                y: group.circle.y,
                r: group.circle.r,
                label_side: group.label_curve.side.as_str().to_string(),
                label_path: group.label_curve.to_svg_path(),
            })
            .collect();

        let positions = layout
            .entities
            .iter()
            .map(|entity| PositionDump {
                entity_id: entity.position.entity_id.clone(),
                x: entity.position.x,
                y: entity.position.y,
                zone_key: entity.position.zone_key.clone(),
            })
            .collect();

        let zones = layout
            .zones
            .iter()
            .map(|zone| ZoneDump {
                key: zone.key.clone(),
                anchor: [zone.anchor.0, zone.anchor.1],
                members: zone.members.clone(),
            })
            .collect();

        LayoutDump {
            title: layout.title.clone(),
            template: layout.template,
            prefers_alternate_view: layout.template.prefers_alternate_view(),
            circles,
            positions,
            zones,
            overlap: layout.overlap,
        }
    }

    pub fn to_json(&self) -> anyhow::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

pub fn write_layout_dump(path: &Path, layout: &VennLayout) -> anyhow::Result<()> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    let dump = LayoutDump::from_layout(layout);
    serde_json::to_writer_pretty(writer, &dump)?;
    Ok(())
}
