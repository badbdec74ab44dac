use std::path::Path;

use violet_world::worldgen::load_config_from_path;
use violet_world::{Preset, WorldGenConfig};

fn shipped() -> WorldGenConfig {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("assets/worldgen.toml");
    load_config_from_path(&path).expect("assets/worldgen.toml parses")
}

#[test]
fn shipped_config_matches_defaults() {
    let file = shipped();
    let def = WorldGenConfig::default();
    assert_eq!(file.world.preset, Preset::Full);
    assert_eq!(file.world.seed, None);
    assert_eq!(file.biomes.desert_max, def.biomes.desert_max);
    assert_eq!(file.height.smoothing_weights, def.height.smoothing_weights);
    assert_eq!(file.height.slope_cap, def.height.slope_cap);
    assert_eq!(file.terrain.soil_depth, def.terrain.soil_depth);
    assert_eq!(
        file.terrain.ore_multipliers.mountains,
        def.terrain.ore_multipliers.mountains
    );
    assert_eq!(file.caves.worm_life, def.caves.worm_life);
    assert_eq!(file.tunnels.max_distance, def.tunnels.max_distance);
    assert_eq!(file.sky.clearance, def.sky.clearance);
    assert_eq!(file.chamber.width, def.chamber.width);
    assert_eq!(file.structures.tree_forest, def.structures.tree_forest);
    assert_eq!(file.buildings.min_spacing, def.buildings.min_spacing);
    assert_eq!(file.path_chests.count, def.path_chests.count);
}
