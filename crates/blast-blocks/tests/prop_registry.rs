use blast_blocks::config::{BlockDef, BlocksConfig};
use blast_blocks::registry::{BlockRegistry, STONE_RESISTANCE};
use blast_blocks::types::Block;
use proptest::prelude::*;

fn def(name: &str, resistance: f32) -> BlockDef {
    BlockDef {
        name: name.into(),
        id: None,
        resistance: Some(resistance),
        liquid: None,
        resistance_as: None,
    }
}

#[test]
fn bundled_table_matches_builtin() {
    let root = std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    let file = BlockRegistry::load_from_path(root.join("../../assets/blast/blocks.toml")).unwrap();
    let builtin = BlockRegistry::builtin();
    for name in ["air", "stone", "dirt", "grass", "sand", "sandstone", "obsidian", "bedrock", "water", "lava"] {
        let a = file.block(name).unwrap();
        let b = builtin.block(name).unwrap();
        assert_eq!(a, b, "{name}");
        assert_eq!(file.resistance(a), builtin.resistance(b), "{name}");
        assert_eq!(file.is_liquid(a), builtin.is_liquid(b), "{name}");
    }
}

#[test]
fn builtin_masquerades_resolve_against_stone() {
    let reg = BlockRegistry::builtin();
    let stone = reg.block("stone").unwrap();
    let obsidian = reg.block("obsidian").unwrap();
    let sandstone = reg.block("sandstone").unwrap();
    assert_eq!(reg.resistance(stone), STONE_RESISTANCE);
    assert_eq!(reg.resistance(obsidian), STONE_RESISTANCE * 3.0);
    assert_eq!(reg.resistance(sandstone), STONE_RESISTANCE);
    // The configured value is kept for reference
    assert_eq!(reg.get(obsidian.id).unwrap().base_resistance, 1200.0);
    assert!(reg.resistance(reg.block("bedrock").unwrap()) >= 600_000.0);
}

#[test]
fn builtin_liquids_and_air() {
    let reg = BlockRegistry::builtin();
    assert!(reg.is_liquid(reg.block("water").unwrap()));
    assert!(reg.is_liquid(reg.block("lava").unwrap()));
    assert!(!reg.is_liquid(reg.block("stone").unwrap()));
    assert_eq!(reg.block("air"), Some(Block::AIR));
    assert!(Block::AIR.is_air());
}

#[test]
fn unknown_ids_are_permeable() {
    let reg = BlockRegistry::builtin();
    let ghost = Block::of(9000);
    assert_eq!(reg.resistance(ghost), 0.0);
    assert!(!reg.is_liquid(ghost));
}

#[test]
fn toml_table_with_forward_masquerade() {
    let reg = BlockRegistry::from_toml_str(
        r#"
        [[blocks]]
        name = "air"

        [[blocks]]
        name = "basalt"
        resistance = 99.0
        resistance_as = { block = "granite", scale = 2.0 }

        [[blocks]]
        name = "granite"
        resistance = 7.5

        [[blocks]]
        name = "brine"
        resistance = 40.0
        liquid = true
    "#,
    )
    .unwrap();
    let basalt = reg.block("basalt").unwrap();
    assert_eq!(basalt.id, 1);
    assert_eq!(reg.resistance(basalt), 15.0);
    assert_eq!(reg.get(basalt.id).unwrap().masquerade, Some((2, 2.0)));
    assert!(reg.is_liquid(reg.block("brine").unwrap()));
}

#[test]
fn rejects_bad_tables() {
    // air must own id 0
    let cfg = BlocksConfig { blocks: vec![def("stone", 6.0)] };
    assert!(BlockRegistry::from_configs(cfg).is_err());

    let cfg = BlocksConfig { blocks: vec![def("air", 0.0), def("stone", 6.0), def("stone", 1.0)] };
    assert!(BlockRegistry::from_configs(cfg).is_err());

    let mut sparse = def("stone", 6.0);
    sparse.id = Some(5);
    let cfg = BlocksConfig { blocks: vec![def("air", 0.0), sparse] };
    assert!(BlockRegistry::from_configs(cfg).is_err());

    let err = BlockRegistry::from_toml_str(
        r#"
        [[blocks]]
        name = "air"
        [[blocks]]
        name = "glass"
        resistance_as = { block = "nothing" }
    "#,
    );
    assert!(err.is_err());

    assert!(BlockRegistry::from_configs(BlocksConfig::default()).is_err());
}

proptest! {
    // Borrowed resistance is the target's configured value times the scale
    #[test]
    fn masquerade_scales_target(base in 0.0f32..10_000.0, own in 0.0f32..10_000.0, scale in 0.0f32..8.0) {
        let mut borrower = def("borrower", own);
        borrower.resistance_as = Some(blast_blocks::config::ResistanceAs { block: "target".into(), scale });
        let cfg = BlocksConfig { blocks: vec![def("air", 0.0), def("target", base), borrower] };
        let reg = BlockRegistry::from_configs(cfg).unwrap();
        let b = reg.block("borrower").unwrap();
        prop_assert_eq!(reg.resistance(b), base * scale);
        prop_assert_eq!(reg.resistance(reg.block("target").unwrap()), base);
    }

    // Ids are handed out densely in declaration order
    #[test]
    fn ids_follow_declaration_order(n in 1usize..32) {
        let mut blocks = vec![def("air", 0.0)];
        for i in 0..n { blocks.push(def(&format!("b{}", i), i as f32)); }
        let reg = BlockRegistry::from_configs(BlocksConfig { blocks }).unwrap();
        for i in 0..n {
            let b = reg.block(&format!("b{}", i)).unwrap();
            prop_assert_eq!(b.id as usize, i + 1);
            prop_assert_eq!(reg.resistance(b), i as f32);
        }
    }
}
