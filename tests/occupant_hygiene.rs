use std::cell::{Cell, RefCell};
use std::rc::Rc;

use tilemap_engine::{CellMeta, CellRef, LayerType, MapSettings, TileBehavior, TileId, TileMap, TilePos, TileSpec};

/// Tags each cell it occupies and records what it finds on teardown.
struct Probe {
    tag: &'static str,
    inits: Cell<u32>,
    destroys: Cell<u32>,
    seen_on_destroy: RefCell<Vec<Option<&'static str>>>,
}

impl Probe {
    fn new(tag: &'static str) -> Rc<Probe> {
        Rc::new(Probe {
            tag,
            inits: Cell::new(0),
            destroys: Cell::new(0),
            seen_on_destroy: RefCell::new(Vec::new()),
        })
    }
}

impl TileBehavior for Probe {
    fn on_init(&self, map: &mut TileMap, cell: CellRef) {
        self.inits.set(self.inits.get() + 1);
        assert!(map.cell(cell).meta().is_none(), "stale metadata handed to {}", self.tag);
        map.cell_mut(cell).unwrap().set_meta(CellMeta::custom(self.tag));
    }

    fn on_destroy(&self, map: &mut TileMap, cell: CellRef) {
        self.destroys.set(self.destroys.get() + 1);
        let tag = map
            .cell(cell)
            .meta()
            .and_then(|m| m.downcast_ref::<&'static str>())
            .copied();
        self.seen_on_destroy.borrow_mut().push(tag);
    }

    fn on_update(&self, _map: &mut TileMap, _cell: CellRef, _sweep_time: f64) {}
}

const PLAIN: TileId = TileId(0);
const RED: TileId = TileId(1);
const BLUE: TileId = TileId(2);

fn setup() -> (TileMap, Rc<Probe>, Rc<Probe>) {
    let red = Probe::new("red");
    let blue = Probe::new("blue");
    let mut b = TileMap::builder(MapSettings::new(8, 4));
    let red_id = b.behavior("red", red.clone());
    let blue_id = b.behavior("blue", blue.clone());
    b.tile(TileSpec::new("plain")).unwrap();
    b.tile(TileSpec::new("red").behavior(red_id)).unwrap();
    b.tile(TileSpec::new("blue").behavior(blue_id)).unwrap();
    (b.build().unwrap(), red, blue)
}

fn tag_at(map: &TileMap, x: i32, y: i32) -> Option<&'static str> {
    map.tile_at_pos(TilePos::new(x, y), LayerType::Floor)
        .meta()
        .and_then(|m| m.downcast_ref::<&'static str>())
        .copied()
}

#[test]
fn replacement_runs_each_hook_once() {
    let (mut map, red, blue) = setup();

    map.set_tile(3.0, 3.0, RED).unwrap();
    assert_eq!((red.inits.get(), red.destroys.get()), (1, 0));
    assert_eq!(tag_at(&map, 3, 3), Some("red"));

    map.set_tile(3.0, 3.0, BLUE).unwrap();
    assert_eq!((red.inits.get(), red.destroys.get()), (1, 1));
    assert_eq!((blue.inits.get(), blue.destroys.get()), (1, 0));
    assert_eq!(*red.seen_on_destroy.borrow(), vec![Some("red")]);
    assert_eq!(tag_at(&map, 3, 3), Some("blue"));

    map.set_tile(3.0, 3.0, PLAIN).unwrap();
    assert_eq!((blue.inits.get(), blue.destroys.get()), (1, 1));
    assert_eq!(*blue.seen_on_destroy.borrow(), vec![Some("blue")]);
    assert_eq!(tag_at(&map, 3, 3), None);
}

#[test]
fn same_occupant_rewrite_still_cycles_hooks() {
    let (mut map, red, _blue) = setup();
    map.set_tile(1.0, 1.0, RED).unwrap();
    map.set_tile(1.0, 1.0, RED).unwrap();
    assert_eq!(red.inits.get(), 2);
    assert_eq!(red.destroys.get(), 1);
    assert_eq!(tag_at(&map, 1, 1), Some("red"));
}

#[test]
fn flags_belong_to_the_occupant() {
    let (mut map, _red, _blue) = setup();
    let at = map.cell_ref_at(TilePos::new(2, 2), LayerType::Floor).unwrap();
    map.cell_mut(at).unwrap().set_flags(0b101);
    map.set_tile(2.0, 2.0, RED).unwrap();
    assert_eq!(map.cell(at).flags(), 0);
}

#[test]
fn failed_write_runs_no_hooks() {
    let (mut map, red, _blue) = setup();
    map.set_tile(0.0, 0.0, RED).unwrap();
    assert!(map.set_tile(0.0, 0.0, TileId(42)).is_err());
    assert!(map.set_tile(20.0, 0.0, BLUE).is_ok());
    assert_eq!((red.inits.get(), red.destroys.get()), (1, 0));
    assert_eq!(tag_at(&map, 0, 0), Some("red"));
}
