use proptest::prelude::*;
use violet_tiles::config::{TileDef, TilesConfig};
use violet_tiles::types::{self, TileSpecial};
use violet_tiles::{AtlasLayout, TileCache, TileRegistry};

fn builtin() -> TileRegistry {
    TileRegistry::builtin().expect("builtin tiles")
}

proptest! {
    // Solidity depends on the code only: repeated and cloned lookups agree
    #[test]
    fn solidity_is_pure(code in any::<u16>()) {
        let reg = builtin();
        let copy = reg.clone();
        let first = reg.is_solid(code);
        prop_assert_eq!(first, reg.is_solid(code));
        prop_assert_eq!(first, copy.is_solid(code));
        if code == types::AIR {
            prop_assert!(!first);
        }
    }

    // Undeclared non-zero codes default to solid
    #[test]
    fn unknown_codes_are_solid(code in 1u16..) {
        let reg = builtin();
        prop_assume!(reg.get(code).is_none());
        prop_assert!(reg.is_solid(code));
    }
}

#[test]
fn from_config_applies_defaults() {
    let cfg = TilesConfig {
        tiles: vec![
            TileDef {
                name: "rock".into(),
                code: 10,
                solid: None,
                special: None,
                breakable: None,
                glyph: None,
            },
            TileDef {
                name: "pool".into(),
                code: 11,
                solid: Some(false),
                special: Some(TileSpecial::Water),
                breakable: Some(false),
                glyph: Some('w'),
            },
        ],
    };
    let reg = TileRegistry::from_config(cfg).expect("registry");
    assert!(reg.is_solid(10));
    assert!(!reg.is_solid(11));
    assert_eq!(reg.special(11), TileSpecial::Water);
    assert_eq!(reg.id_by_name("pool"), Some(11));
    assert_eq!(reg.glyph(11), Some('w'));
    assert_eq!(reg.glyph(10), None);
    assert_eq!(reg.glyph(types::AIR), Some(' '));
}

#[test]
fn toml_special_names_parse() {
    let reg = TileRegistry::from_toml_str(
        r#"
        [[tiles]]
        name = "box"
        code = 600
        solid = false
        special = "chest"
        glyph = "C"
    "#,
    )
    .expect("registry");
    assert_eq!(reg.special(600), TileSpecial::Chest);
    assert!(!reg.is_solid(600));
}

#[test]
fn cache_loads_once_and_remembers_misses() {
    let reg = builtin();
    let mut cache: TileCache<char> = TileCache::new();
    let mut loads = 0;
    for _ in 0..3 {
        let got = cache
            .get_or_load(types::STONE, |c| {
                loads += 1;
                reg.glyph(c)
            })
            .copied();
        assert_eq!(got, Some('#'));
    }
    assert_eq!(loads, 1);

    assert!(cache.get_or_load(4242, |c| reg.glyph(c)).is_none());
    assert!(cache.get_or_load(4242, |_| Some('?')).is_none());
    assert_eq!(cache.misses(), 1);
    assert_eq!(cache.len(), 2);
    cache.clear();
    assert!(cache.is_empty());
}

#[test]
fn atlas_cells_are_one_based() {
    let atlas = AtlasLayout::default();
    assert!(atlas.source_rect(types::AIR).is_none());
    let first = atlas.source_rect(1).expect("cell");
    assert_eq!((first.x, first.y), (0, 0));
    let grass = atlas.source_rect(types::GRASS).expect("cell");
    // 552 - 1 = 551 = 22 * 24 + 23
    assert_eq!((grass.x, grass.y), (23 * 16, 22 * 16));
    assert_eq!((grass.w, grass.h), (16, 16));
}
