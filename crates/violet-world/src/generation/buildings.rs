use std::fmt;

use violet_tiles::types::{AIR, CHEST, DIRT, FURNACE, LOG, PLANKS, STONE, TileId};

use super::GenCtx;
use super::biome::Biome;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum BuildingKind {
    Cottage,
    Hut,
    Cabin,
    SwampHut,
}

impl BuildingKind {
    pub fn for_biome(biome: Biome) -> Self {
        match biome {
            Biome::Plains | Biome::Forest => BuildingKind::Cottage,
            Biome::Desert => BuildingKind::Hut,
            Biome::Mountains => BuildingKind::Cabin,
            Biome::Swamp => BuildingKind::SwampHut,
        }
    }

    /// Footprint width in columns, excluding roof overhang.
    pub fn width(self) -> i32 {
        match self {
            BuildingKind::Cottage => 14,
            BuildingKind::Hut => 9,
            BuildingKind::Cabin => 10,
            BuildingKind::SwampHut => 8,
        }
    }

    fn wall_height(self) -> i32 {
        match self {
            BuildingKind::Cottage => 8,
            BuildingKind::Hut => 5,
            BuildingKind::Cabin => 6,
            BuildingKind::SwampHut => 5,
        }
    }

    fn wall_tile(self) -> TileId {
        match self {
            BuildingKind::Cabin => LOG,
            _ => PLANKS,
        }
    }

    /// Stamps the building with its floor on row `floor_y`, filling any
    /// gap between the floor and the ground below.
    pub(super) fn stamp(self, ctx: &mut GenCtx<'_>, x: i32, floor_y: i32) {
        let w = self.width();
        let floor_y = match self {
            BuildingKind::SwampHut => floor_y - 3,
            _ => floor_y,
        };
        let foundation = match self {
            BuildingKind::Hut => DIRT,
            BuildingKind::SwampHut => PLANKS,
            _ => STONE,
        };
        for hx in x..x + w {
            ctx.map.set_tile(hx, floor_y, foundation);
            let ground = ctx.heights.at(hx);
            if self == BuildingKind::SwampHut {
                if hx == x || hx == x + w - 1 {
                    ctx.map.fill_rect(hx, floor_y + 1, hx, ground - 1, LOG);
                }
            } else if ground > floor_y + 1 {
                ctx.map.fill_rect(hx, floor_y + 1, hx, ground - 1, foundation);
            }
        }

        let h = self.wall_height();
        let wall = self.wall_tile();
        for hx in x..x + w {
            for hy in (floor_y - h)..floor_y {
                let edge = hx == x || hx == x + w - 1 || hy == floor_y - h;
                ctx.map.set_tile(hx, hy, if edge { wall } else { AIR });
            }
        }

        let roof_top = floor_y - h;
        match self {
            BuildingKind::Cottage => {
                stamp_gable(ctx, x - 2, w + 4, roof_top, 5);
                // chimney
                ctx.map.fill_rect(x + w - 3, roof_top - 6, x + w - 3, roof_top - 3, STONE);
            }
            BuildingKind::Cabin => stamp_gable(ctx, x - 1, w + 2, roof_top, 3),
            BuildingKind::Hut | BuildingKind::SwampHut => {
                ctx.map.fill_rect(x - 1, roof_top - 1, x + w, roof_top - 1, PLANKS);
            }
        }

        let door = x + 2;
        ctx.map.set_tile(door, floor_y - 1, AIR);
        ctx.map.set_tile(door, floor_y - 2, AIR);
        if h > 5 {
            ctx.map.set_tile(door, floor_y - 3, LOG);
            let wx = x + w - 4;
            ctx.map.fill_rect(wx, floor_y - 4, wx + 1, floor_y - 3, AIR);
        }

        ctx.map.set_tile(x + w / 2, floor_y - 1, CHEST);
        if matches!(self, BuildingKind::Cottage | BuildingKind::Cabin) {
            ctx.map.set_tile(x + w - 2, floor_y - 1, FURNACE);
        }
        if self == BuildingKind::Cottage {
            ctx.map.fill_rect(x + 4, floor_y - 1, x + 5, floor_y - 1, PLANKS);
        }
        log::debug!("{} stamped at column {} floor row {}", self, x, floor_y);
    }
}

impl fmt::Display for BuildingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            BuildingKind::Cottage => "cottage",
            BuildingKind::Hut => "hut",
            BuildingKind::Cabin => "cabin",
            BuildingKind::SwampHut => "swamp hut",
        };
        f.write_str(s)
    }
}

// Log-edged stepped roof, narrowing one column per side per level.
fn stamp_gable(ctx: &mut GenCtx<'_>, start: i32, width: i32, roof_top: i32, levels: i32) {
    for level in 0..levels {
        let y = roof_top - 1 - level;
        let left = start + level;
        let right = start + width - 1 - level;
        if left > right {
            break;
        }
        if level == levels - 1 {
            ctx.map.fill_rect(left, y, right, y, LOG);
        } else {
            ctx.map.set_tile(left, y, LOG);
            ctx.map.set_tile(right, y, LOG);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_biome_has_a_building() {
        for b in Biome::ALL {
            let kind = BuildingKind::for_biome(b);
            assert!(kind.width() >= 8, "{kind} too narrow");
        }
        assert_eq!(BuildingKind::for_biome(Biome::Swamp), BuildingKind::SwampHut);
    }
}
