//! Layer Table Integration Tests
//!
//! Tests for:
//! - Loading a JSON layer table into a pipeline
//! - Binding draw functions by entry name
//! - Table settings flowing into the sealed compositor
//! - Rejection of unbound entries and bad positions

use std::convert::Infallible;

use stratum::{
    BetweenPolicy, DrawBuffer, DrawContext, DrawFn, LayerEntry, LayerError, LayerTable,
    PipelineBuilder, Position,
};

#[derive(Default)]
struct IconDrawSet {
    output: DrawBuffer<(&'static str, u8)>,
}

impl DrawContext for IconDrawSet {
    type Primitive = (&'static str, u8);
    type Error = Infallible;

    fn output(&self) -> &DrawBuffer<Self::Primitive> {
        &self.output
    }

    fn output_mut(&mut self) -> &mut DrawBuffer<Self::Primitive> {
        &mut self.output
    }
}

const PLAYER_TABLE: &str = r#"{
    "settings": { "capacity": 16 },
    "layers": [
        { "name": "TorsoIndent" },
        { "name": "HairBack", "head_layer": true },
        { "name": "Skin" },
        { "name": "Torso" },
        { "name": "Head", "head_layer": true },
        { "name": "TorsoUnindent" },
        { "name": "Wings", "position": { "before": "Skin" } },
        { "name": "NeckAcc", "position": { "between": ["Torso", "Head"] } }
    ]
}"#;

/// Binds every entry to a draw function that records its name and draw index.
fn bind_all(entry: &LayerEntry) -> Option<DrawFn<IconDrawSet>> {
    let name: &'static str = Box::leak(entry.name.clone().into_boxed_str());
    Some(Box::new(move |set: &mut IconDrawSet| -> Result<(), Infallible> {
        let index = u8::try_from(set.output().len()).unwrap_or(u8::MAX);
        set.output_mut().push((name, index));
        Ok(())
    }))
}

#[test]
fn table_loads_in_declared_order() -> anyhow::Result<()> {
    let table = LayerTable::from_json(PLAYER_TABLE)?;
    let compositor = table.build(bind_all)?;

    assert_eq!(
        compositor.order().collect::<Vec<_>>(),
        [
            "TorsoIndent",
            "HairBack",
            "Wings",
            "Skin",
            "Torso",
            "NeckAcc",
            "Head",
            "TorsoUnindent"
        ]
    );
    assert_eq!(compositor.settings().capacity, 16);
    Ok(())
}

#[test]
fn table_matches_equivalent_register_calls() -> anyhow::Result<()> {
    let table = LayerTable::from_json(PLAYER_TABLE)?;
    let from_table = table.build(bind_all)?;

    let mut builder = PipelineBuilder::<IconDrawSet>::new();
    for entry in &table.layers {
        builder.register(
            stratum::FnLayer::new(entry.name.clone(), entry.head_layer, |_: &mut IconDrawSet| {
                Ok(())
            }),
            entry.position.clone(),
        )?;
    }
    let by_hand = builder.build();

    assert!(from_table.order().eq(by_hand.order()));
    assert!(from_table.head_layers().eq(by_hand.head_layers()));
    Ok(())
}

#[test]
fn head_pass_from_table() -> anyhow::Result<()> {
    let compositor = LayerTable::from_json(PLAYER_TABLE)?.build(bind_all)?;
    let mut set = IconDrawSet::default();

    let Ok(summary) = compositor.composite_head_layers(&mut set);

    assert_eq!(summary.drawn, 2);
    assert_eq!(set.output.as_slice(), &[("HairBack", 0), ("Head", 1)]);
    Ok(())
}

#[test]
fn unbound_entry_is_rejected() -> anyhow::Result<()> {
    let table = LayerTable::from_json(PLAYER_TABLE)?;

    let err = table
        .build(|entry| {
            if entry.name == "Wings" {
                None
            } else {
                bind_all(entry)
            }
        })
        .unwrap_err();

    assert!(matches!(err, LayerError::UnboundLayer(ref name) if name == "Wings"));
    Ok(())
}

#[test]
fn load_stops_at_first_bad_entry() -> anyhow::Result<()> {
    let table = LayerTable {
        layers: vec![
            LayerEntry::new("Skin", false, Position::Append),
            LayerEntry::new("Torso", false, Position::Append),
            LayerEntry::new("Head", true, Position::Append),
            LayerEntry::new("Belt", false, Position::between("Head", "Skin")),
            LayerEntry::new("Hat", true, Position::after("Head")),
        ],
        ..Default::default()
    };

    let mut builder = table.builder();
    let err = table.load_into(&mut builder, bind_all).unwrap_err();

    assert!(matches!(err, LayerError::Adjacency { .. }));
    assert_eq!(builder.order().collect::<Vec<_>>(), ["Skin", "Torso", "Head"]);
    Ok(())
}

#[test]
fn table_settings_drive_between_policy() -> anyhow::Result<()> {
    let mut table = LayerTable {
        layers: vec![
            LayerEntry::new("Skin", false, Position::Append),
            LayerEntry::new("Head", true, Position::Append),
            LayerEntry::new("Belt", false, Position::between("Head", "Skin")),
        ],
        ..Default::default()
    };

    let compositor = table.build(bind_all)?;
    assert_eq!(compositor.order().collect::<Vec<_>>(), ["Skin", "Belt", "Head"]);

    table.settings.between = BetweenPolicy::Ordered;
    let err = table.build(bind_all).unwrap_err();
    assert!(matches!(err, LayerError::Adjacency { ref first, .. } if first == "Head"));
    Ok(())
}
