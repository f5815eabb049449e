use tilemap_engine::{CellRef, Direction, LayerType, MapSettings, TileId, TileMap, TilePos, TileSpec};

fn map(map_side: u32, chunk_side: u32) -> TileMap {
    let mut b = TileMap::builder(MapSettings::new(map_side, chunk_side));
    b.tile(TileSpec::new("floor")).unwrap();
    b.tile(TileSpec::new("wall")).unwrap();
    b.tile(TileSpec::new("moss")).unwrap();
    b.build().unwrap()
}

fn all_cells(map: &TileMap, layer: LayerType) -> Vec<CellRef> {
    let side = map.map_side() as i32;
    let mut out = Vec::new();
    for y in 0..side {
        for x in 0..side {
            out.push(map.cell_ref_at(TilePos::new(x, y), layer).unwrap());
        }
    }
    out
}

fn assert_symmetric(map: &TileMap, layer: LayerType) {
    let side = map.map_side() as i32;
    for at in all_cells(map, layer) {
        let cell = map.cell(at);
        for dir in Direction::ALL {
            let expected = cell.position().step(dir);
            match cell.neighbor_ref(dir) {
                Some(n) => {
                    assert_eq!(map.cell(n).position(), expected);
                    assert_eq!(map.cell(n).neighbor_ref(dir.opposite()), Some(at), "{:?} {:?}", at, dir);
                }
                None => assert!(!expected.in_square(side as u32), "{:?} missing {:?}", at, dir),
            }
        }
    }
}

fn snapshot(map: &TileMap) -> Vec<[Option<CellRef>; 4]> {
    LayerType::ALL
        .iter()
        .flat_map(|&kind| all_cells(map, kind))
        .map(|at| *map.cell(at).links())
        .collect()
}

/// xorshift32, enough to scatter writes deterministically.
struct Scatter(u32);

impl Scatter {
    fn next(&mut self) -> u32 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.0 = x;
        x
    }
}

#[test]
fn links_are_symmetric_after_build() {
    let map = map(12, 4);
    for kind in LayerType::ALL {
        assert_symmetric(&map, kind);
    }
}

#[test]
fn links_stay_symmetric_after_scattered_writes() {
    let mut map = map(12, 4);
    let mut rng = Scatter(0x9e37_79b9);
    for _ in 0..500 {
        // Includes coordinates off the map on every side.
        let x = (rng.next() % 16) as f32 - 2.0;
        let y = (rng.next() % 16) as f32 - 2.0;
        let id = TileId(rng.next() % 3);
        map.set_tile(x, y, id).unwrap();
    }
    assert_symmetric(&map, LayerType::Floor);
}

#[test]
fn chunk_edge_writes_keep_both_sides_linked() {
    let mut map = map(8, 4);
    for y in 0..8 {
        map.set_tile(3.0, y as f32, TileId(1)).unwrap();
        map.set_tile(4.0, y as f32, TileId(2)).unwrap();
    }
    let a = map.cell_ref_at(TilePos::new(3, 6), LayerType::Floor).unwrap();
    let b = map.cell_ref_at(TilePos::new(4, 6), LayerType::Floor).unwrap();
    assert_eq!(map.cell(a).neighbor_ref(Direction::Right), Some(b));
    assert_eq!(map.cell(b).neighbor_ref(Direction::Left), Some(a));
    assert_eq!(map.neighbor(a, Direction::Right).tile(), TileId(2));
    assert_symmetric(&map, LayerType::Floor);
}

#[test]
fn relink_is_idempotent() {
    let mut map = map(8, 4);
    map.set_tile(4.0, 4.0, TileId(1)).unwrap();
    let before = snapshot(&map);
    map.relink_all();
    let once = snapshot(&map);
    map.relink_all();
    let twice = snapshot(&map);
    assert_eq!(before, once);
    assert_eq!(once, twice);

    map.relink_chunk(LayerType::Decal, 3);
    assert_eq!(snapshot(&map), twice);
}

#[test]
fn reads_are_total() {
    let mut map = map(8, 4);
    for y in -40..48 {
        for x in -40..48 {
            let inside = (0..8).contains(&x) && (0..8).contains(&y);
            for kind in LayerType::ALL {
                let cell = map.get_tile_at(x as f32, y as f32, kind, false);
                assert_eq!(cell.is_synthetic_air(), !inside);
                if !inside {
                    let def = map.definition_of(map.tile_at(x as f32, y as f32, kind));
                    assert!(def.sim().is_empty());
                    assert!(!def.rendered());
                }
            }
        }
    }
    let far = map.tile_at(f32::MAX, f32::MIN, LayerType::Floor);
    assert!(far.is_synthetic_air());
    assert!(far.links().iter().all(Option::is_none));
}
