use std::sync::Arc;

use criterion::{Criterion, black_box, criterion_group, criterion_main};

use violet_physics::{Monster, Player, PlayerInput, SlimeVariant};
use violet_tiles::TileRegistry;
use violet_world::{Preset, World, WorldGenConfig};

fn bench_thousand_ticks(c: &mut Criterion) {
    let reg = Arc::new(TileRegistry::builtin().unwrap());
    let world = World::generate(&WorldGenConfig::with_preset(Preset::Full), reg, 0xC0FFEE);
    let map = &world.tilemap;
    let run = PlayerInput {
        right: true,
        ..PlayerInput::default()
    };
    c.bench_function("player_and_slimes_1000_ticks", |b| {
        b.iter(|| {
            let mut player = Player::new(world.spawn.feet);
            let mut slimes: Vec<Monster> = (0..7)
                .map(|i| {
                    let mut feet = world.chamber.feet;
                    feet.x += (i as f32 - 3.0) * 96.0;
                    Monster::slime(feet, SlimeVariant::Green)
                })
                .collect();
            for tick in 0..1000u32 {
                let mut input = run;
                input.jump_pressed = tick % 40 == 0;
                player.tick(&input, map);
                for s in &mut slimes {
                    s.update(player.body.pos, map);
                }
            }
            black_box(player.body.pos);
        })
    });
}

criterion_group!(benches, bench_thousand_ticks);
criterion_main!(benches);
